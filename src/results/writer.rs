// SPDX-License-Identifier: MIT
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use super::format::{EOF_MARKER, FORMAT_VERSION, FileHeader, MAGIC, generator};
use crate::model::PerfBasic;

pub struct ResultWriter {
    encoder: zstd::Encoder<'static, BufWriter<File>>,
}

impl ResultWriter {
    /// Creates a new result file at `path` and writes the file header.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or the header cannot be written.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("failed to create result file: {}", path.display()))?;
        let buf_writer = BufWriter::new(file);
        let encoder = zstd::Encoder::new(buf_writer, 3).context("failed to create zstd encoder")?;

        let header = FileHeader {
            magic: MAGIC,
            format_version: FORMAT_VERSION,
            generator: generator(),
        };

        let mut writer = Self { encoder };
        writer.write_record(&header, "header")?;
        Ok(writer)
    }

    /// Appends one test with all of its runs.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_test(&mut self, test: &PerfBasic) -> Result<()> {
        self.write_record(test, "test")
    }

    /// Writes the EOF marker, finishes compression, and flushes the file.
    ///
    /// # Errors
    ///
    /// Returns an error if writing or flushing fails.
    pub fn finish(mut self) -> Result<()> {
        self.encoder
            .write_all(&EOF_MARKER)
            .context("failed to write EOF marker")?;
        let mut buf_writer = self
            .encoder
            .finish()
            .context("failed to finish zstd encoder")?;
        buf_writer.flush().context("failed to flush result file")?;
        Ok(())
    }

    fn write_record<T: serde::Serialize>(&mut self, value: &T, what: &str) -> Result<()> {
        let serialized =
            postcard::to_stdvec(value).with_context(|| format!("failed to serialize {what}"))?;

        let len = u32::try_from(serialized.len())
            .with_context(|| format!("{what} too large for result file"))?;
        self.encoder
            .write_all(&len.to_le_bytes())
            .with_context(|| format!("failed to write {what} length"))?;
        self.encoder
            .write_all(&serialized)
            .with_context(|| format!("failed to write {what} data"))?;
        Ok(())
    }
}

/// Writes `tests` to a new native result file.
///
/// # Errors
///
/// See [`ResultWriter::create`] and [`ResultWriter::write_test`].
pub fn write_result_file(path: &Path, tests: &[PerfBasic]) -> Result<()> {
    let mut writer = ResultWriter::create(path)?;
    for test in tests {
        writer.write_test(test)?;
    }
    writer.finish()
}
