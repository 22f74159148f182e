//! Repeated-trial run: 100 aligned/unaligned pairs over 1,000,000 samples,
//! written to `results.csv`.

use std::error::Error;

use tracing::info;

use alignsum::bench::Benchmark;
use alignsum::config::{BenchConfig, RESULTS_FILE};
use alignsum::sink::CsvSink;

fn main() -> Result<(), Box<dyn Error>> {
    alignsum::init_tracing();

    let mut sink = CsvSink::create(RESULTS_FILE)?;
    info!(path = RESULTS_FILE, "writing results");

    Benchmark::new(BenchConfig::csv()).execute(&mut sink)?;

    println!("Results written to {RESULTS_FILE}");
    Ok(())
}
