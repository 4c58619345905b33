// SPDX-License-Identifier: MIT
//! Benchmark frame-time aggregation and visualization.
//!
//! Result files are loaded through a [`results::ResultSource`] into a
//! [`results::BenchmarkResultStore`], reduced by [`stats`], and turned into
//! draw commands by [`graph::render`]. The [`tui`] module paints them.
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod graph;
pub mod logging;
pub mod model;
pub mod orchestrator;
pub mod results;
pub mod stats;
pub mod tui;

pub use error::{BenchError, Result};
