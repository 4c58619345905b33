// SPDX-License-Identifier: MIT
use serde::{Deserialize, Serialize};

use super::info::TestInfo;
use crate::error::{BenchError, Result};

/// One execution of a benchmark scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunData {
    /// Milliseconds per frame, indexed by frame.
    pub raw_samples: Vec<f64>,
    /// Total wall time of the run in seconds.
    pub run_time: f64,
}

impl RunData {
    #[must_use]
    pub fn new(raw_samples: Vec<f64>, run_time: f64) -> Self {
        Self {
            raw_samples,
            run_time,
        }
    }

    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.raw_samples.len()
    }
}

/// A named performance test and all of its runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerfBasic {
    #[serde(default)]
    pub info: TestInfo,
    /// Declared frame budget. May exceed the recorded sample count.
    pub frames: usize,
    #[serde(rename = "runData")]
    pub runs: Vec<RunData>,
}

impl PerfBasic {
    /// Checks that the test has at least one non-empty run, that every run
    /// recorded the same number of samples, and that every frame time and
    /// run time is a finite, non-negative number.
    ///
    /// # Errors
    ///
    /// Returns `EmptyRun` when there is nothing to plot,
    /// `RunLengthMismatch` naming the first run whose length differs from
    /// the first run's, and `InvalidSample` or `InvalidRunTime` for the first
    /// NaN, infinite or negative value.
    pub fn validate(&self) -> Result<()> {
        let first = self.runs.first().ok_or(BenchError::EmptyRun)?;
        let expected = first.sample_count();
        if expected == 0 {
            return Err(BenchError::EmptyRun);
        }

        for (run, data) in self.runs.iter().enumerate().skip(1) {
            if data.sample_count() != expected {
                return Err(BenchError::RunLengthMismatch {
                    run,
                    expected,
                    actual: data.sample_count(),
                });
            }
        }

        let valid = |v: f64| v.is_finite() && v >= 0.0;
        for (run, data) in self.runs.iter().enumerate() {
            if !valid(data.run_time) {
                return Err(BenchError::InvalidRunTime {
                    run,
                    value: data.run_time,
                });
            }
            if let Some((frame, &value)) =
                data.raw_samples.iter().enumerate().find(|(_, ms)| !valid(**ms))
            {
                return Err(BenchError::InvalidSample { run, frame, value });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }
}

/// Everything loaded from one result file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerfResults {
    pub file_name: String,
    pub perf_stats: Vec<PerfBasic>,
}
