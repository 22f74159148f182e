//! Single-shot run printed to the console.

use std::error::Error;

use alignsum::bench::Benchmark;
use alignsum::config::BenchConfig;
use alignsum::sink::ConsoleSink;

fn main() -> Result<(), Box<dyn Error>> {
    alignsum::init_tracing();

    let mut sink = ConsoleSink::stdout();
    Benchmark::new(BenchConfig::console()).execute(&mut sink)?;

    Ok(())
}
