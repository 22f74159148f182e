//! Sanity checks on reported timings and the run summary.

use alignsum::bench::{Benchmark, RunLog};
use alignsum::config::BenchConfig;
use alignsum::sink::OutputSink;
use alignsum::simd::{Access, Strategy};
use alignsum::timing::time_reduction;
use alignsum::utils::{uniform_samples, AlignedBuffer, BUFFER_ALIGNMENT};
use statrs::statistics::{Data, OrderStatistics, Statistics};

struct Discard;

impl OutputSink for Discard {
    fn record(&mut self, _trial: &alignsum::bench::TrialRecord) -> alignsum::error::Result<()> {
        Ok(())
    }
}

fn run(trials: usize, samples: usize) -> RunLog {
    let config = BenchConfig::csv()
        .with_sample_count(samples)
        .with_trials(trials)
        .with_seed(99);
    Benchmark::new(config).execute(&mut Discard).unwrap()
}

#[test]
fn test_timings_non_negative() {
    let log = run(20, 50_000);

    for trial in &log.trials {
        assert!(trial.aligned.elapsed_secs() >= 0.0);
        assert!(trial.unaligned.elapsed_secs() >= 0.0);
    }
}

#[test]
fn test_summary_matches_statrs_mean() {
    let log = run(25, 20_000);
    let summary = log.summary().unwrap();

    let aligned: Vec<f64> = log.trials.iter().map(|t| t.aligned.elapsed_secs()).collect();
    let unaligned: Vec<f64> = log.trials.iter().map(|t| t.unaligned.elapsed_secs()).collect();

    assert_eq!(summary.trials, 25);
    assert!((summary.mean_aligned_secs - aligned.iter().mean()).abs() < 1e-12);
    assert!((summary.mean_unaligned_secs - unaligned.iter().mean()).abs() < 1e-12);
}

#[test]
fn test_repeated_timings_same_order_of_magnitude() {
    let samples = uniform_samples(1_000_000, Some(8));
    let buffer = AlignedBuffer::from_slice(&samples, BUFFER_ALIGNMENT).unwrap();
    let strategy = Strategy::detect();

    // Warm caches and page mappings before measuring.
    time_reduction(strategy, &buffer, Access::Aligned).unwrap();

    let times: Vec<f64> = (0..31)
        .map(|_| {
            time_reduction(strategy, &buffer, Access::Aligned)
                .unwrap()
                .elapsed_secs()
        })
        .collect();

    let mut data = Data::new(times.clone());
    let median = data.quantile(0.5);
    let min = times.iter().copied().fold(f64::INFINITY, f64::min);

    println!("{strategy}: min={min:.3e}s median={median:.3e}s");

    // Median within three orders of magnitude of the fastest run; scheduler
    // noise on shared CI machines rarely exceeds that.
    assert!(median > 0.0 && min > 0.0);
    assert!(median / min < 1_000.0);
}
