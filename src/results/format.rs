// SPDX-License-Identifier: MIT
use serde::{Deserialize, Serialize};

use crate::model::PerfBasic;

pub const MAGIC: [u8; 4] = *b"BVRS";
pub const FORMAT_VERSION: u8 = 1;
pub const EOF_MARKER: [u8; 4] = *b"BEOF";

/// Extension of the native compressed result format.
pub const NATIVE_EXTENSION: &str = "perf";
/// Extension of result files written by the benchmark harness.
pub const JSON_EXTENSION: &str = "json";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FileHeader {
    pub magic: [u8; 4],
    pub format_version: u8,
    pub generator: String,
}

/// Top-level layout of a harness JSON result file.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct JsonResultFile {
    pub perf_stats: Vec<PerfBasic>,
}

#[must_use]
pub fn generator() -> String {
    format!("benchview {}", env!("CARGO_PKG_VERSION"))
}
