//! Fixed benchmark parameters.
//!
//! The binaries take no arguments; each one starts from a preset here.

use crate::error::{validation_error, Result};

/// Number of samples summed per reduction.
pub const SAMPLE_COUNT: usize = 1_000_000;

/// Trials recorded by the CSV binary.
pub const CSV_TRIALS: usize = 100;

/// Trials run by the console binary.
pub const CONSOLE_TRIALS: usize = 1;

/// CSV destination, relative to the working directory.
pub const RESULTS_FILE: &str = "results.csv";

/// Parameters of one benchmark run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    /// Length of the sample buffer.
    pub sample_count: usize,
    /// Number of aligned/unaligned trial pairs.
    pub trials: usize,
    /// Seed for sample generation. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl BenchConfig {
    /// Repeated-trial preset written to [`RESULTS_FILE`].
    pub fn csv() -> Self {
        Self {
            sample_count: SAMPLE_COUNT,
            trials: CSV_TRIALS,
            seed: None,
        }
    }

    /// Single-shot preset printed to the console.
    pub fn console() -> Self {
        Self {
            sample_count: SAMPLE_COUNT,
            trials: CONSOLE_TRIALS,
            seed: None,
        }
    }

    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Rejects configurations whose buffer would not fit in the address space.
    pub fn validate(&self) -> Result<()> {
        let max_samples = isize::MAX as usize / std::mem::size_of::<f64>();

        if self.sample_count > max_samples {
            return Err(validation_error(format!(
                "sample count {} exceeds the addressable maximum of {}",
                self.sample_count, max_samples
            )));
        }

        Ok(())
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self::csv()
    }
}
