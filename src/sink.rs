//! Destinations for trial results.
//!
//! [`ConsoleSink`] prints human-readable lines for ad-hoc single-shot runs.
//! [`CsvSink`] writes the `Run,AlignedSum,AlignedTime,UnalignedSum,UnalignedTime`
//! table for repeated-trial runs.

use std::fs::File;
use std::io::{self, Stdout, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::bench::TrialRecord;
use crate::error::{output_error, BenchError, Result};

/// Receives trial records in trial order.
pub trait OutputSink {
    /// Called once before the first trial.
    fn begin(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called once per trial, in trial order.
    fn record(&mut self, trial: &TrialRecord) -> Result<()>;

    /// Called once after the last trial.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Plain-text sink.
#[derive(Debug)]
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl ConsoleSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OutputSink for ConsoleSink<W> {
    fn record(&mut self, trial: &TrialRecord) -> Result<()> {
        writeln!(self.out, "Aligned sum: {}", trial.aligned.sum)?;
        writeln!(
            self.out,
            "Function took: {} seconds.",
            trial.aligned.elapsed_secs()
        )?;
        writeln!(self.out, "Unaligned sum: {}", trial.unaligned.sum)?;
        writeln!(
            self.out,
            "Function took: {} seconds.",
            trial.unaligned.elapsed_secs()
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Header row of the results table.
pub const CSV_HEADER: [&str; 5] = [
    "Run",
    "AlignedSum",
    "AlignedTime",
    "UnalignedSum",
    "UnalignedTime",
];

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct CsvRow {
    run: usize,
    aligned_sum: f64,
    aligned_time: f64,
    unaligned_sum: f64,
    unaligned_time: f64,
}

impl From<&TrialRecord> for CsvRow {
    fn from(trial: &TrialRecord) -> Self {
        Self {
            run: trial.run,
            aligned_sum: trial.aligned.sum,
            aligned_time: trial.aligned.elapsed_secs(),
            unaligned_sum: trial.unaligned.sum,
            unaligned_time: trial.unaligned.elapsed_secs(),
        }
    }
}

/// Comma-separated sink, one row per trial after a fixed header.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    path: Option<PathBuf>,
}

impl CsvSink<File> {
    /// Creates `path`, truncating any previous contents.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)
            .map_err(|err| output_error(Some(path), err.to_string()))?;

        Ok(Self {
            writer,
            path: Some(path.to_path_buf()),
        })
    }
}

impl<W: Write> CsvSink<W> {
    pub fn from_writer(out: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(out),
            path: None,
        }
    }

    /// Destination file, if the sink was opened with [`CsvSink::create`].
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        let CsvSink { writer, path } = self;

        writer
            .into_inner()
            .map_err(|err| output_error(path.as_deref(), err.error().to_string()))
    }

    fn located(&self, err: impl std::fmt::Display) -> BenchError {
        output_error(self.path(), err.to_string())
    }
}

impl<W: Write> OutputSink for CsvSink<W> {
    fn begin(&mut self) -> Result<()> {
        self.writer
            .write_record(CSV_HEADER)
            .map_err(|err| self.located(err))
    }

    fn record(&mut self, trial: &TrialRecord) -> Result<()> {
        self.writer
            .serialize(CsvRow::from(trial))
            .map_err(|err| self.located(err))
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush().map_err(|err| self.located(err))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::timing::Measurement;

    fn trial(run: usize) -> TrialRecord {
        TrialRecord {
            run,
            aligned: Measurement {
                sum: 15.0,
                elapsed: Duration::from_micros(250),
            },
            unaligned: Measurement {
                sum: 14.0,
                elapsed: Duration::from_micros(500),
            },
        }
    }

    #[test]
    fn test_console_format() {
        let mut sink = ConsoleSink::new(Vec::new());
        sink.record(&trial(1)).unwrap();
        sink.finish().unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "Aligned sum: 15",
                "Function took: 0.00025 seconds.",
                "Unaligned sum: 14",
                "Function took: 0.0005 seconds.",
            ]
        );
    }

    #[test]
    fn test_csv_rows() {
        let mut sink = CsvSink::from_writer(Vec::new());
        sink.begin().unwrap();
        sink.record(&trial(1)).unwrap();
        sink.record(&trial(2)).unwrap();
        sink.finish().unwrap();

        let text = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Run,AlignedSum,AlignedTime,UnalignedSum,UnalignedTime");
        assert_eq!(lines[1], "1,15.0,0.00025,14.0,0.0005");
        assert_eq!(lines[2], "2,15.0,0.00025,14.0,0.0005");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_csv_header_only() {
        let mut sink = CsvSink::from_writer(Vec::new());
        sink.begin().unwrap();
        sink.finish().unwrap();

        let text = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        assert_eq!(text, "Run,AlignedSum,AlignedTime,UnalignedSum,UnalignedTime\n");
    }

    #[test]
    fn test_csv_create_missing_directory() {
        let err = CsvSink::create("/nonexistent-alignsum-dir/results.csv").err().unwrap();
        match err {
            BenchError::OutputError { path, .. } => {
                assert_eq!(path.as_deref(), Some("/nonexistent-alignsum-dir/results.csv"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
