// SPDX-License-Identifier: MIT
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use super::source::ResultSource;
use crate::error::{BenchError, Result};
use crate::model::{FrameSample, PerfBasic, PerfResults, RunData};
use crate::stats::{aggregate, compute_statistics};

/// A result file that failed to parse during the last load.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// One complete load. Replaced as a whole on reload.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    pub results: Vec<PerfResults>,
    pub skipped: Vec<SkippedFile>,
}

/// Which series of a test to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunSelector {
    /// Frame-by-frame average of every run.
    #[default]
    Aggregate,
    /// A single run, zero-based.
    Run(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub file: usize,
    pub test: usize,
    pub run: RunSelector,
}

#[derive(Debug, Clone, Copy)]
pub enum Selected<'a> {
    /// Nothing has been recorded yet.
    NoData,
    Test {
        results: &'a PerfResults,
        perf: &'a PerfBasic,
        /// `None` when the aggregate is selected.
        run: Option<&'a RunData>,
    },
}

/// Summary numbers shown under the graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub avg_ms: f64,
    pub runtime: f64,
    /// Only known for a single run.
    pub min_frame: Option<FrameSample>,
    pub max_frame: Option<FrameSample>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesToRender {
    pub series: Vec<f64>,
    pub stats: SeriesStats,
    /// Declared frame budget; markers are placed against this.
    pub total_frames: usize,
    pub markers: bool,
}

impl ResultSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    #[must_use]
    pub fn position_of(&self, file_name: &str) -> Option<usize> {
        self.results.iter().position(|r| r.file_name == file_name)
    }

    /// Resolves a selection against this set.
    ///
    /// # Errors
    ///
    /// Returns `SelectionOutOfRange` if any index is past the end.
    pub fn select(&self, selection: &Selection) -> Result<Selected<'_>> {
        if self.results.is_empty() {
            return Ok(Selected::NoData);
        }

        let results = self.results.get(selection.file).ok_or_else(|| {
            BenchError::out_of_range(format!(
                "file {} of {}",
                selection.file,
                self.results.len()
            ))
        })?;
        let perf = results.perf_stats.get(selection.test).ok_or_else(|| {
            BenchError::out_of_range(format!(
                "test {} of {} in {}",
                selection.test,
                results.perf_stats.len(),
                results.file_name
            ))
        })?;
        let run = match selection.run {
            RunSelector::Aggregate => None,
            RunSelector::Run(index) => Some(perf.runs.get(index).ok_or_else(|| {
                BenchError::out_of_range(format!("run {index} of {}", perf.runs.len()))
            })?),
        };

        Ok(Selected::Test { results, perf, run })
    }

    /// The series, summary and frame budget for a selection, or `None` when
    /// the set is empty.
    ///
    /// # Errors
    ///
    /// Propagates selection errors and data faults from the statistics.
    pub fn series_to_render(&self, selection: &Selection) -> Result<Option<SeriesToRender>> {
        let Selected::Test { perf, run, .. } = self.select(selection)? else {
            return Ok(None);
        };

        let rendered = match run {
            Some(run) => {
                let stats = compute_statistics(run)?;
                SeriesToRender {
                    series: run.raw_samples.clone(),
                    stats: SeriesStats {
                        avg_ms: stats.avg_ms,
                        runtime: run.run_time,
                        min_frame: Some(stats.min_frame),
                        max_frame: Some(stats.max_frame),
                    },
                    total_frames: perf.frames,
                    markers: true,
                }
            }
            None => {
                let agg = aggregate(&perf.runs)?;
                SeriesToRender {
                    series: agg.series,
                    stats: SeriesStats {
                        avg_ms: agg.avg_ms,
                        runtime: agg.runtime,
                        min_frame: None,
                        max_frame: None,
                    },
                    total_frames: perf.frames,
                    markers: false,
                }
            }
        };
        Ok(Some(rendered))
    }
}

pub struct BenchmarkResultStore<S> {
    source: S,
    current: Option<Arc<ResultSet>>,
}

impl<S: ResultSource> BenchmarkResultStore<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            current: None,
        }
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Scans the source and replaces the loaded set. Files that fail to parse
    /// are skipped and recorded in [`ResultSet::skipped`].
    ///
    /// # Errors
    ///
    /// Returns an error only if the file listing fails; the previous set is
    /// kept in that case.
    pub fn load_all(&mut self) -> Result<Arc<ResultSet>> {
        let files = self.source.list_result_files()?;

        let mut set = ResultSet::default();
        for path in files {
            match self.source.parse_result_file(&path) {
                Ok(results) => set.results.push(results),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping result file");
                    set.skipped.push(SkippedFile {
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            files = set.results.len(),
            skipped = set.skipped.len(),
            "loaded benchmark results"
        );

        let set = Arc::new(set);
        self.current = Some(Arc::clone(&set));
        Ok(set)
    }

    /// The most recently loaded set.
    ///
    /// # Errors
    ///
    /// Returns `NotLoaded` before the first successful [`Self::load_all`].
    pub fn current(&self) -> Result<&Arc<ResultSet>> {
        self.current.as_ref().ok_or(BenchError::NotLoaded)
    }

    /// # Errors
    ///
    /// Returns `NotLoaded` before the first load, otherwise as
    /// [`ResultSet::select`].
    pub fn select(&self, selection: &Selection) -> Result<Selected<'_>> {
        self.current()?.select(selection)
    }

    /// # Errors
    ///
    /// Returns `NotLoaded` before the first load, otherwise as
    /// [`ResultSet::series_to_render`].
    pub fn compute_series_to_render(
        &self,
        selection: &Selection,
    ) -> Result<Option<SeriesToRender>> {
        self.current()?.series_to_render(selection)
    }
}
