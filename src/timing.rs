//! Wall-clock timing of single reductions.

use std::convert::Infallible;
use std::hint::black_box;
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::simd::{Access, Strategy};

/// Result of one timed reduction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub sum: f64,
    pub elapsed: Duration,
}

impl Measurement {
    /// Elapsed time in fractional seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Times one invocation of `f` on the monotonic clock.
///
/// The closure's result goes through [`black_box`] so the measured work cannot
/// be optimized away.
#[inline(never)]
pub fn measure<F>(f: F) -> Measurement
where
    F: FnOnce() -> f64,
{
    match try_measure(|| Ok::<f64, Infallible>(f())) {
        Ok(measurement) => measurement,
        Err(never) => match never {},
    }
}

/// Like [`measure`], for closures that can fail. The error is returned as-is
/// and no measurement is produced.
#[inline(never)]
pub fn try_measure<F, E>(f: F) -> std::result::Result<Measurement, E>
where
    F: FnOnce() -> std::result::Result<f64, E>,
{
    let start = Instant::now();
    let sum = black_box(f()?);
    let elapsed = start.elapsed();

    Ok(Measurement { sum, elapsed })
}

/// Times `strategy` summing `values` under `access`.
pub fn time_reduction(strategy: Strategy, values: &[f64], access: Access) -> Result<Measurement> {
    try_measure(|| strategy.sum(black_box(values), access))
}
