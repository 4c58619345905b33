// SPDX-License-Identifier: MIT
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};

use super::format::{
    EOF_MARKER, FORMAT_VERSION, FileHeader, JSON_EXTENSION, JsonResultFile, MAGIC,
};
use crate::model::{PerfBasic, PerfResults};

pub struct ResultReader {
    file_name: String,
    tests: Vec<PerfBasic>,
}

impl ResultReader {
    /// Opens a result file, picking the decoder from its extension, and
    /// validates every test in it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, the header is invalid,
    /// the data is corrupted, the file holds no tests, or a test fails
    /// [`PerfBasic::validate`].
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open result file: {}", path.display()))?;
        let buf_reader = BufReader::new(file);

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(JSON_EXTENSION));
        let tests = if is_json {
            Self::read_json(buf_reader)?
        } else {
            Self::read_native(buf_reader)?
        };

        if tests.is_empty() {
            bail!("result file contains no tests");
        }
        for (i, test) in tests.iter().enumerate() {
            test.validate()
                .with_context(|| format!("test {i} ({})", test.info.display_name()))?;
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self { file_name, tests })
    }

    #[must_use]
    pub fn test_count(&self) -> usize {
        self.tests.len()
    }

    #[must_use]
    pub fn test_at(&self, index: usize) -> Option<&PerfBasic> {
        self.tests.get(index)
    }

    #[must_use]
    pub fn into_results(self) -> PerfResults {
        PerfResults {
            file_name: self.file_name,
            perf_stats: self.tests,
        }
    }

    fn read_json(reader: impl Read) -> Result<Vec<PerfBasic>> {
        let file: JsonResultFile =
            serde_json::from_reader(reader).context("failed to parse JSON results")?;
        Ok(file.perf_stats)
    }

    fn read_native(reader: impl Read) -> Result<Vec<PerfBasic>> {
        let mut decoder = zstd::Decoder::new(reader).context("failed to create zstd decoder")?;

        let header = Self::read_header(&mut decoder)?;
        if header.magic != MAGIC {
            bail!("invalid magic bytes in result file");
        }
        if header.format_version != FORMAT_VERSION {
            bail!(
                "unsupported format version {} (expected {FORMAT_VERSION})",
                header.format_version
            );
        }

        Self::read_all_tests(&mut decoder)
    }

    fn read_header(reader: &mut impl Read) -> Result<FileHeader> {
        let mut len_buf = [0u8; 4];
        reader
            .read_exact(&mut len_buf)
            .context("failed to read header length")?;
        let len = u32::from_le_bytes(len_buf) as usize;

        let mut data = vec![0u8; len];
        reader
            .read_exact(&mut data)
            .context("failed to read header data")?;

        postcard::from_bytes(&data).context("failed to deserialize file header")
    }

    fn read_all_tests(reader: &mut impl Read) -> Result<Vec<PerfBasic>> {
        let mut tests = Vec::new();
        let mut len_buf = [0u8; 4];

        loop {
            reader
                .read_exact(&mut len_buf)
                .context("result file is truncated (missing EOF marker)")?;

            if len_buf == EOF_MARKER {
                break;
            }

            let len = u32::from_le_bytes(len_buf) as usize;
            let mut data = vec![0u8; len];
            reader
                .read_exact(&mut data)
                .context("failed to read test data")?;

            let test: PerfBasic =
                postcard::from_bytes(&data).context("failed to deserialize test")?;
            tests.push(test);
        }

        Ok(tests)
    }
}

/// Reads a whole result file.
///
/// # Errors
///
/// See [`ResultReader::open`].
pub fn read_result_file(path: &Path) -> Result<PerfResults> {
    ResultReader::open(path).map(ResultReader::into_results)
}
