//! Vectorized summation of `f64` slices.
//!
//! A [`Strategy`] names one way of reducing a slice: 256-bit AVX, 128-bit NEON
//! or the portable scalar loop. Vector strategies are compiled in only when the
//! build script emits their cfg, and are re-checked against the running CPU
//! before every dispatch, so asking for an unsupported strategy degrades to the
//! scalar sum instead of trapping.
//!
//! # Reduction order
//!
//! Vector strategies accumulate `W` independent lane sums, add the lanes in
//! ascending lane order, then add the `len % W` tail elements in index order.
//! Results can therefore differ from a sequential sum by a few ULPs and differ
//! between strategies, but are deterministic for a given strategy.
//!
//! # Example
//!
//! ```rust
//! use alignsum::simd::{Access, Strategy};
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let sum = Strategy::detect().sum(&values, Access::Unaligned).unwrap();
//! assert_eq!(sum, 15.0);
//! ```

use std::fmt;

use crate::error::{misaligned_error, Result};

#[cfg(all(avx, any(target_arch = "x86", target_arch = "x86_64")))]
pub mod avx;

#[cfg(all(neon, target_arch = "aarch64"))]
pub mod neon;

pub mod scalar;

pub mod traits;

pub use traits::SimdSum;

/// Memory-access regime of a reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// Aligned loads; the view must start on the strategy's vector boundary.
    Aligned,
    /// Loads tolerant of any element-aligned address.
    Unaligned,
}

/// Vector reduction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// 256-bit AVX, 4 lanes.
    Avx,
    /// 128-bit NEON, 2 lanes.
    Neon,
    /// Sequential scalar loop.
    Scalar,
}

impl Strategy {
    /// Every strategy in preference order.
    pub const ALL: [Strategy; 3] = [Strategy::Avx, Strategy::Neon, Strategy::Scalar];

    /// Picks the most preferred strategy usable on this host.
    pub fn detect() -> Self {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.is_supported())
            .unwrap_or(Strategy::Scalar)
    }

    /// Lists the strategies usable on this host, in preference order.
    ///
    /// [`Strategy::Scalar`] is always present and always last.
    pub fn available() -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|strategy| strategy.is_supported())
            .collect()
    }

    /// Returns `true` if the strategy is compiled in and the running CPU
    /// implements its instruction set.
    pub fn is_supported(self) -> bool {
        match self {
            Strategy::Avx => avx_supported(),
            Strategy::Neon => neon_supported(),
            Strategy::Scalar => true,
        }
    }

    /// Number of `f64` lanes processed per vector operation.
    pub fn lanes(self) -> usize {
        match self {
            Strategy::Avx => 4,
            Strategy::Neon => 2,
            Strategy::Scalar => 1,
        }
    }

    /// Byte alignment an [`Access::Aligned`] view must satisfy.
    pub fn alignment(self) -> usize {
        match self {
            Strategy::Avx => 32,
            Strategy::Neon => 16,
            Strategy::Scalar => std::mem::align_of::<f64>(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Avx => "avx",
            Strategy::Neon => "neon",
            Strategy::Scalar => "scalar",
        }
    }

    /// Sums `values` under the requested access regime.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::MisalignedError`](crate::error::BenchError::MisalignedError)
    /// for an [`Access::Aligned`] request on a non-empty view that does not
    /// start on [`Strategy::alignment`] bytes.
    pub fn sum(self, values: &[f64], access: Access) -> Result<f64> {
        if access == Access::Aligned
            && !values.is_empty()
            && (values.as_ptr() as usize) % self.alignment() != 0
        {
            return Err(misaligned_error(values.as_ptr(), self.alignment()));
        }

        Ok(self.reduce(values, access))
    }

    // Alignment has been checked by `sum`.
    #[inline(always)]
    fn reduce(self, values: &[f64], access: Access) -> f64 {
        match (self, access) {
            #[cfg(all(avx, any(target_arch = "x86", target_arch = "x86_64")))]
            (Strategy::Avx, Access::Aligned) if avx::is_available() => unsafe {
                avx::slice::sum_aligned(values)
            },
            #[cfg(all(avx, any(target_arch = "x86", target_arch = "x86_64")))]
            (Strategy::Avx, Access::Unaligned) if avx::is_available() => unsafe {
                avx::slice::sum_unaligned(values)
            },
            #[cfg(all(neon, target_arch = "aarch64"))]
            (Strategy::Neon, Access::Aligned) if neon::is_available() => unsafe {
                neon::slice::sum_aligned(values)
            },
            #[cfg(all(neon, target_arch = "aarch64"))]
            (Strategy::Neon, Access::Unaligned) if neon::is_available() => unsafe {
                neon::slice::sum_unaligned(values)
            },
            _ => scalar::sum(values),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(all(avx, any(target_arch = "x86", target_arch = "x86_64")))]
fn avx_supported() -> bool {
    avx::is_available()
}

#[cfg(not(all(avx, any(target_arch = "x86", target_arch = "x86_64"))))]
fn avx_supported() -> bool {
    false
}

#[cfg(all(neon, target_arch = "aarch64"))]
fn neon_supported() -> bool {
    neon::is_available()
}

#[cfg(not(all(neon, target_arch = "aarch64")))]
fn neon_supported() -> bool {
    false
}

/// `true` when the build script found no vector unit for this target.
pub const SCALAR_ONLY_BUILD: bool = cfg!(fallback);

impl SimdSum for [f64] {
    #[inline(always)]
    fn simd_sum(&self) -> f64 {
        Strategy::detect().reduce(self, Access::Unaligned)
    }

    #[inline(always)]
    fn simd_sum_aligned(&self) -> Result<f64> {
        Strategy::detect().sum(self, Access::Aligned)
    }

    #[inline(always)]
    fn scalar_sum(&self) -> f64 {
        scalar::sum(self)
    }
}
