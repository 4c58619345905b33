// SPDX-License-Identifier: MIT
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single recorded frame time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSample {
    pub frame_index: usize,
    pub ms: f64,
}

impl FrameSample {
    #[must_use]
    pub fn new(frame_index: usize, ms: f64) -> Self {
        Self { frame_index, ms }
    }
}

impl fmt::Display for FrameSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}ms (@frame: {})", self.ms, self.frame_index)
    }
}
