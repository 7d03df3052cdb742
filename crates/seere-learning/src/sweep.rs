//! Sweep driver and CSV result log.

use crate::error::Result;
use seere_core::{CompressionMode, StepTimings};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Column order of the result log.
pub const RESULT_COLUMNS: [&str; 8] = [
    "mode",
    "variable",
    "accuracy",
    "total_duration_sec",
    "total_codec_sec",
    "total_transfer_sec",
    "total_steps",
    "epochs",
];

/// One sweep point: a mode configuration and what running it cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub mode: String,
    pub variable: f64,
    pub accuracy: f64,
    pub total_duration_sec: f64,
    pub total_codec_sec: f64,
    pub total_transfer_sec: f64,
    pub total_steps: u64,
    pub epochs: u32,
}

impl RunRecord {
    fn csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{}",
            self.mode,
            self.variable,
            self.accuracy,
            self.total_duration_sec,
            self.total_codec_sec,
            self.total_transfer_sec,
            self.total_steps,
            self.epochs
        )
    }
}

/// CSV log of completed sweep points.
///
/// The whole file is rewritten after every push, so a killed sweep
/// still leaves a complete, parseable log of the points it finished.
#[derive(Debug)]
pub struct ResultLog {
    path: PathBuf,
    records: Vec<RunRecord>,
}

impl ResultLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[RunRecord] {
        &self.records
    }

    /// Append a record and rewrite the log file.
    pub fn push(&mut self, record: RunRecord) -> Result<()> {
        self.records.push(record);
        self.write()
    }

    fn write(&self) -> Result<()> {
        let mut out = BufWriter::new(File::create(&self.path)?);
        writeln!(out, "{}", RESULT_COLUMNS.join(","))?;
        for record in &self.records {
            writeln!(out, "{}", record.csv_row())?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Drives one training run per sweep point, resetting the timing
/// accumulators between points and logging each finished record.
#[derive(Debug)]
pub struct SweepRunner {
    epochs: u32,
    timings: StepTimings,
}

impl SweepRunner {
    pub fn new(epochs: u32) -> Self {
        Self {
            epochs,
            timings: StepTimings::new(),
        }
    }

    /// Run one sweep point. `train` receives fresh timing accumulators
    /// and returns the final evaluation accuracy; total wall-clock
    /// duration is measured around it.
    pub fn run_point<F>(&mut self, mode: CompressionMode, train: F) -> Result<RunRecord>
    where
        F: FnOnce(&mut StepTimings) -> Result<f64>,
    {
        self.timings.reset();
        info!(mode = %mode, epochs = self.epochs, "sweep point starting");

        let start = Instant::now();
        let accuracy = train(&mut self.timings)?;
        let total_duration_sec = start.elapsed().as_secs_f64();

        let record = RunRecord {
            mode: mode.name().to_string(),
            variable: mode.variable(),
            accuracy,
            total_duration_sec,
            total_codec_sec: self.timings.codec_secs(),
            total_transfer_sec: self.timings.transfer_secs(),
            total_steps: self.timings.steps(),
            epochs: self.epochs,
        };
        info!(
            mode = %mode,
            accuracy,
            duration_sec = total_duration_sec,
            codec_sec = record.total_codec_sec,
            transfer_sec = record.total_transfer_sec,
            "sweep point finished"
        );
        Ok(record)
    }

    /// Run every point of a sweep, logging each record as it lands.
    pub fn run_sweep<F>(
        &mut self,
        modes: &[CompressionMode],
        log: &mut ResultLog,
        mut train: F,
    ) -> Result<()>
    where
        F: FnMut(CompressionMode, &mut StepTimings) -> Result<f64>,
    {
        for &mode in modes {
            let record = self.run_point(mode, |timings| train(mode, timings))?;
            log.push(record)?;
        }
        Ok(())
    }
}
