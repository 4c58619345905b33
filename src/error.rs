// SPDX-License-Identifier: MIT
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BenchError>;

#[derive(Debug, Error)]
pub enum BenchError {
    /// A result file could not be read or decoded. The file is skipped.
    #[error("failed to parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("run has no samples")]
    EmptyRun,

    #[error("series of {0} point(s) has no horizontal span")]
    DegenerateSeries(usize),

    #[error("run {run} has {actual} samples, expected {expected}")]
    RunLengthMismatch {
        run: usize,
        expected: usize,
        actual: usize,
    },

    #[error("run {run} frame {frame} has invalid frame time {value}")]
    InvalidSample { run: usize, frame: usize, value: f64 },

    #[error("run {run} has invalid run time {value}")]
    InvalidRunTime { run: usize, value: f64 },

    #[error("results have not been loaded")]
    NotLoaded,

    #[error("selection out of range: {0}")]
    SelectionOutOfRange(String),

    #[error("failed to list result files: {0}")]
    Io(#[from] std::io::Error),
}

impl BenchError {
    #[must_use]
    pub fn parse<P: Into<PathBuf>, T: Into<String>>(path: P, reason: T) -> Self {
        BenchError::Parse {
            path: path.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn out_of_range<T: Into<String>>(msg: T) -> Self {
        BenchError::SelectionOutOfRange(msg.into())
    }

    /// Data-integrity faults abort a single render and are shown in place of
    /// the graph rather than treated as load failures.
    #[must_use]
    pub fn is_data_fault(&self) -> bool {
        matches!(
            self,
            BenchError::EmptyRun
                | BenchError::DegenerateSeries(_)
                | BenchError::RunLengthMismatch { .. }
                | BenchError::InvalidSample { .. }
                | BenchError::InvalidRunTime { .. }
        )
    }
}
