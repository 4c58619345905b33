// SPDX-License-Identifier: MIT
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::format::{JSON_EXTENSION, NATIVE_EXTENSION};
use super::reader::read_result_file;
use crate::error::{BenchError, Result};
use crate::model::PerfResults;

/// Where result files come from.
pub trait ResultSource {
    /// Lists result files, sorted by file name.
    ///
    /// # Errors
    ///
    /// Returns an error when the listing itself fails.
    fn list_result_files(&self) -> Result<Vec<PathBuf>>;

    /// Parses one listed file.
    ///
    /// # Errors
    ///
    /// Returns `BenchError::Parse` for unreadable or malformed files.
    fn parse_result_file(&self, handle: &Path) -> Result<PerfResults>;
}

/// Result files in a single directory (not recursive).
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn is_result_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| {
        ext.eq_ignore_ascii_case(NATIVE_EXTENSION) || ext.eq_ignore_ascii_case(JSON_EXTENSION)
    })
}

impl ResultSource for DirectorySource {
    fn list_result_files(&self) -> Result<Vec<PathBuf>> {
        let read_dir = match std::fs::read_dir(&self.dir) {
            Ok(rd) => rd,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(dir = %self.dir.display(), "results directory does not exist");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        for entry in read_dir {
            let path = entry?.path();
            if path.is_file() && is_result_file(&path) {
                files.push(path);
            }
        }

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }

    fn parse_result_file(&self, handle: &Path) -> Result<PerfResults> {
        read_result_file(handle).map_err(|e| BenchError::parse(handle, format!("{e:#}")))
    }
}
