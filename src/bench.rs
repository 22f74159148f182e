//! Run driver: aligned and unaligned reductions, trial by trial.

use tracing::{debug, info, warn};

use crate::config::BenchConfig;
use crate::error::Result;
use crate::simd::{Access, Strategy};
use crate::sink::OutputSink;
use crate::timing::{time_reduction, Measurement};
use crate::utils::{uniform_samples, AlignedBuffer, BUFFER_ALIGNMENT};

/// One aligned/unaligned measurement pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialRecord {
    /// 1-based trial index.
    pub run: usize,
    pub aligned: Measurement,
    pub unaligned: Measurement,
}

/// All trials of a run, in trial order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunLog {
    pub trials: Vec<TrialRecord>,
}

/// Mean timings across a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub trials: usize,
    pub mean_aligned_secs: f64,
    pub mean_unaligned_secs: f64,
}

impl RunSummary {
    /// Unaligned over aligned mean time; above 1.0 means misalignment cost time.
    pub fn unaligned_ratio(&self) -> f64 {
        self.mean_unaligned_secs / self.mean_aligned_secs
    }
}

impl RunLog {
    pub fn len(&self) -> usize {
        self.trials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }

    /// `None` for a run without trials.
    pub fn summary(&self) -> Option<RunSummary> {
        if self.trials.is_empty() {
            return None;
        }

        let n = self.trials.len() as f64;
        let (aligned, unaligned) = self.trials.iter().fold((0.0, 0.0), |(a, u), trial| {
            (a + trial.aligned.elapsed_secs(), u + trial.unaligned.elapsed_secs())
        });

        Some(RunSummary {
            trials: self.trials.len(),
            mean_aligned_secs: aligned / n,
            mean_unaligned_secs: unaligned / n,
        })
    }
}

/// The two views a trial reduces over.
///
/// The unaligned view starts one element in and therefore covers
/// `len - 1` elements, staying inside the buffer.
pub fn access_views(samples: &[f64]) -> (&[f64], &[f64]) {
    let shifted = samples.get(1..).unwrap_or(&[]);
    (samples, shifted)
}

/// Benchmark driver parameterized by trial count and output sink.
#[derive(Debug, Clone)]
pub struct Benchmark {
    config: BenchConfig,
    strategy: Strategy,
}

impl Benchmark {
    /// Uses the best reduction strategy of this host.
    pub fn new(config: BenchConfig) -> Self {
        Self {
            config,
            strategy: Strategy::detect(),
        }
    }

    /// Forces a strategy. An unsupported one still runs, on the scalar path.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        if !strategy.is_supported() {
            warn!(%strategy, "strategy not supported on this host, reductions fall back to scalar");
        }
        self.strategy = strategy;
        self
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Generates the samples, copies them into an aligned buffer and runs
    /// every trial into `sink`.
    pub fn execute<S>(&self, sink: &mut S) -> Result<RunLog>
    where
        S: OutputSink + ?Sized,
    {
        self.config.validate()?;

        let samples = uniform_samples(self.config.sample_count, self.config.seed);
        let buffer = AlignedBuffer::from_slice(&samples, BUFFER_ALIGNMENT)?;
        drop(samples);

        debug!(
            len = buffer.len(),
            alignment = buffer.alignment(),
            "sample buffer ready"
        );

        self.run(&buffer, sink)
    }

    /// Runs every trial over `samples` and forwards each record to `sink`.
    ///
    /// `samples` must start on the strategy's vector boundary, as an
    /// [`AlignedBuffer`] does; otherwise the first aligned reduction fails with
    /// a misalignment error.
    pub fn run<S>(&self, samples: &[f64], sink: &mut S) -> Result<RunLog>
    where
        S: OutputSink + ?Sized,
    {
        info!(
            strategy = %self.strategy,
            lanes = self.strategy.lanes(),
            samples = samples.len(),
            trials = self.config.trials,
            "starting benchmark"
        );

        let (aligned_view, unaligned_view) = access_views(samples);
        let mut log = RunLog {
            trials: Vec::with_capacity(self.config.trials),
        };

        sink.begin()?;

        for run in 1..=self.config.trials {
            let aligned = time_reduction(self.strategy, aligned_view, Access::Aligned)?;
            let unaligned = time_reduction(self.strategy, unaligned_view, Access::Unaligned)?;

            let trial = TrialRecord {
                run,
                aligned,
                unaligned,
            };

            debug!(
                run,
                aligned_secs = aligned.elapsed_secs(),
                unaligned_secs = unaligned.elapsed_secs(),
                "trial complete"
            );

            sink.record(&trial)?;
            log.trials.push(trial);
        }

        sink.finish()?;

        if let Some(summary) = log.summary() {
            info!(
                trials = summary.trials,
                mean_aligned_secs = summary.mean_aligned_secs,
                mean_unaligned_secs = summary.mean_unaligned_secs,
                unaligned_ratio = summary.unaligned_ratio(),
                "benchmark finished"
            );
        }

        Ok(log)
    }
}
