//! Error types for alignsum operations.
//!
//! Every abnormal circumstance in a benchmark run is fatal to that run, so the
//! variants here carry enough context for a clear diagnostic rather than a
//! recovery strategy.

use std::fmt;
use std::path::Path;

/// Errors that can occur while preparing, measuring or recording a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BenchError {
    /// Memory allocation for the aligned sample buffer failed.
    AllocationError {
        /// The size that was requested to be allocated.
        requested_size: usize,
        /// The alignment that was requested.
        requested_alignment: usize,
        /// Human-readable error message.
        message: String,
    },
    /// Invalid layout parameters were provided.
    LayoutError {
        /// The size parameter that caused the error.
        size: usize,
        /// The alignment parameter that caused the error.
        alignment: usize,
        /// Human-readable error message.
        message: String,
    },
    /// A view handed to an aligned reduction does not start on the
    /// strategy's vector boundary.
    MisalignedError {
        /// Start address of the offending view.
        address: usize,
        /// Alignment the reduction strategy requires.
        required_alignment: usize,
    },
    /// Opening or writing the results destination failed.
    OutputError {
        /// Destination path, when the sink writes to a file.
        path: Option<String>,
        /// Human-readable error message.
        message: String,
    },
    /// Input validation error.
    ValidationError {
        /// Human-readable error message.
        message: String,
    },
}

impl fmt::Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchError::AllocationError {
                requested_size,
                requested_alignment,
                message,
            } => write!(
                f,
                "Memory allocation failed: {} (requested {} bytes with {} byte alignment)",
                message, requested_size, requested_alignment
            ),
            BenchError::LayoutError {
                size,
                alignment,
                message,
            } => write!(
                f,
                "Invalid memory layout: {} (size: {}, alignment: {})",
                message, size, alignment
            ),
            BenchError::MisalignedError {
                address,
                required_alignment,
            } => write!(
                f,
                "Misaligned view: address {:#x} is not a multiple of {} bytes",
                address, required_alignment
            ),
            BenchError::OutputError {
                path: Some(path),
                message,
            } => write!(f, "Output error for '{}': {}", path, message),
            BenchError::OutputError {
                path: None,
                message,
            } => write!(f, "Output error: {}", message),
            BenchError::ValidationError { message } => {
                write!(f, "Validation error: {}", message)
            }
        }
    }
}

impl std::error::Error for BenchError {}

impl From<std::io::Error> for BenchError {
    fn from(err: std::io::Error) -> Self {
        output_error(None, err.to_string())
    }
}

impl From<csv::Error> for BenchError {
    fn from(err: csv::Error) -> Self {
        output_error(None, err.to_string())
    }
}

/// Result type alias for alignsum operations.
pub type Result<T> = std::result::Result<T, BenchError>;

/// Creates an allocation error.
pub fn allocation_error(size: usize, alignment: usize, message: impl Into<String>) -> BenchError {
    BenchError::AllocationError {
        requested_size: size,
        requested_alignment: alignment,
        message: message.into(),
    }
}

/// Creates a layout error.
pub fn layout_error(size: usize, alignment: usize, message: impl Into<String>) -> BenchError {
    BenchError::LayoutError {
        size,
        alignment,
        message: message.into(),
    }
}

/// Creates a misalignment error for a view starting at `ptr`.
pub fn misaligned_error<T>(ptr: *const T, required_alignment: usize) -> BenchError {
    BenchError::MisalignedError {
        address: ptr as usize,
        required_alignment,
    }
}

/// Creates an output error, optionally tied to a destination path.
pub fn output_error(path: Option<&Path>, message: impl Into<String>) -> BenchError {
    BenchError::OutputError {
        path: path.map(|p| p.display().to_string()),
        message: message.into(),
    }
}

/// Creates a validation error.
pub fn validation_error(message: impl Into<String>) -> BenchError {
    BenchError::ValidationError {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_error_display() {
        let error = allocation_error(8_000_000, 32, "out of memory");
        let display = format!("{}", error);
        assert!(display.contains("Memory allocation failed"));
        assert!(display.contains("8000000 bytes"));
        assert!(display.contains("32 byte alignment"));
        assert!(display.contains("out of memory"));
    }

    #[test]
    fn test_layout_error_display() {
        let error = layout_error(1000, 31, "alignment must be power of two");
        let display = format!("{}", error);
        assert!(display.contains("Invalid memory layout"));
        assert!(display.contains("size: 1000"));
        assert!(display.contains("alignment: 31"));
    }

    #[test]
    fn test_misaligned_error_display() {
        let error = misaligned_error(0x1008 as *const f64, 32);
        let display = format!("{}", error);
        assert!(display.contains("0x1008"));
        assert!(display.contains("32 bytes"));
    }

    #[test]
    fn test_output_error_display() {
        let error = output_error(Some(Path::new("results.csv")), "permission denied");
        assert_eq!(
            format!("{}", error),
            "Output error for 'results.csv': permission denied"
        );

        let error = output_error(None, "broken pipe");
        assert_eq!(format!("{}", error), "Output error: broken pipe");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory");
        let error: BenchError = io.into();
        assert!(matches!(error, BenchError::OutputError { path: None, .. }));
        assert!(format!("{}", error).contains("no such directory"));
    }

    #[test]
    fn test_error_equality() {
        let error1 = allocation_error(1024, 32, "test");
        let error2 = allocation_error(1024, 32, "test");
        let error3 = allocation_error(2048, 32, "test");

        assert_eq!(error1, error2);
        assert_ne!(error1, error3);
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = validation_error("trial count must be positive");

        let _: &dyn std::error::Error = &error;
        assert!(std::error::Error::source(&error).is_none());
    }
}
