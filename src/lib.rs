//! Aligned versus unaligned SIMD summation benchmark.
//!
//! The crate sums a buffer of uniformly random `f64` values twice per trial:
//! once through aligned vector loads over the whole buffer, once through
//! unaligned loads over the same buffer shifted by one element. Each
//! reduction is timed on the monotonic clock and the pair is handed to an
//! [`OutputSink`](sink::OutputSink), either the console or a CSV file.
//!
//! ```rust
//! use alignsum::bench::Benchmark;
//! use alignsum::config::BenchConfig;
//! use alignsum::sink::CsvSink;
//!
//! let config = BenchConfig::csv().with_sample_count(1_000).with_trials(3).with_seed(1);
//! let mut sink = CsvSink::from_writer(Vec::new());
//! let log = Benchmark::new(config).execute(&mut sink).unwrap();
//!
//! let csv = String::from_utf8(sink.into_inner().unwrap()).unwrap();
//! assert_eq!(csv.lines().count(), log.len() + 1);
//! ```

pub mod bench;
pub mod config;
pub mod error;
pub mod simd;
pub mod sink;
pub mod timing;
pub mod utils;

pub use simd::{Access, SimdSum, Strategy};

/// Installs the `tracing` subscriber used by the binaries.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Log lines go to
/// stderr so stdout carries only benchmark output.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
