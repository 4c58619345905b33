// SPDX-License-Identifier: MIT
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::config::LogLevel;

pub enum LogTarget<'a> {
    /// Headless commands log to stderr.
    Stderr,
    /// The TUI owns the terminal, so logs go to a file.
    File(&'a Path),
    Off,
}

/// Installs the global tracing subscriber. `RUST_LOG` overrides `level`.
///
/// # Errors
///
/// Returns an error if a subscriber is already installed.
pub fn init_logger(level: LogLevel, target: LogTarget<'_>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

    match target {
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogTarget::File(path) => {
            let directory = path.parent().unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .map_or_else(|| "benchview.log".to_string(), |n| n.to_string_lossy().into_owned());
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(file_name)
                .build(directory)
                .with_context(|| format!("failed to open log file: {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_ansi(false)
                        .with_writer(appender),
                )
                .try_init()
        }
        LogTarget::Off => return Ok(()),
    }
    .context("failed to install logger")
}
