// SPDX-License-Identifier: MIT
pub mod info;
pub mod run;
pub mod sample;

pub use info::{InfoField, TestInfo};
pub use run::{PerfBasic, PerfResults, RunData};
pub use sample::FrameSample;
