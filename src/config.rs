// SPDX-License-Identifier: MIT
//! Configuration and persisted viewer state.
//!
//! `benchview.toml` is optional; every field has a default.
//!
//! ```toml
//! results_dir = "Benchmarks"
//!
//! [graph]
//! gridlines = 5
//! range = { mode = "fixed", min_ms = 0.0, max_ms = 33.33 }
//!
//! [logging]
//! level = "debug"
//! file = "benchview.log"
//!
//! [orchestrator]
//! run_command = ["./player", "--scenes", "{scenes}"]
//! build_command = ["./build.sh", "{platform}", "{output}", "{scenes}"]
//! loader_scene = "scenes/benchmark/loader"
//! menu_scene = "scenes/menu_benchmark"
//!
//! [[orchestrator.scenes]]
//! name = "Island Flythrough"
//! scene = "scenes/benchmark/island"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::graph::{GraphOptions, ValueRange};

pub const DEFAULT_CONFIG_FILE: &str = "benchview.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub results_dir: PathBuf,
    /// Where the last selected result file is remembered.
    pub state_file: PathBuf,
    pub graph: GraphConfig,
    pub logging: LoggingConfig,
    pub orchestrator: OrchestratorConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub gridlines: usize,
    pub range: ValueRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// Log file used while the TUI owns the terminal. No logging there when unset.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

/// A benchmark scene the orchestrator can run or package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkScene {
    pub name: String,
    pub scene: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    pub run_command: Vec<String>,
    pub build_command: Vec<String>,
    pub build_root: PathBuf,
    pub product_name: String,
    pub loader_scene: String,
    pub menu_scene: String,
    pub scenes: Vec<BenchmarkScene>,
}

/// Selection remembered between sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    pub last_result_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("Benchmarks"),
            state_file: PathBuf::from(".benchview-state.toml"),
            graph: GraphConfig::default(),
            logging: LoggingConfig::default(),
            orchestrator: OrchestratorConfig::default(),
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            gridlines: 5,
            range: ValueRange::Auto,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            file: Some(PathBuf::from("benchview.log")),
        }
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            run_command: Vec::new(),
            build_command: Vec::new(),
            build_root: PathBuf::from("Builds/Benchmark"),
            product_name: "Benchmark".to_string(),
            loader_scene: "scenes/benchmark/loader".to_string(),
            menu_scene: "scenes/menu_benchmark".to_string(),
            scenes: Vec::new(),
        }
    }
}

impl LogLevel {
    #[must_use]
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl GraphConfig {
    #[must_use]
    pub fn options(&self) -> GraphOptions {
        GraphOptions {
            gridlines: self.gridlines,
            range: self.range,
            ..GraphOptions::default()
        }
    }
}

impl Config {
    /// Parses a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Loads `path` if given, otherwise `benchview.toml` in the working
    /// directory when it exists, otherwise the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit or discovered file fails to load.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            Self::from_file(default_path)
        } else {
            Ok(Self::default())
        }
    }
}

impl SessionState {
    /// Reads the state file. A missing file is an empty state.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("failed to parse state file: {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => {
                Err(e).with_context(|| format!("failed to read state file: {}", path.display()))
            }
        }
    }

    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("failed to serialize state")?;
        std::fs::write(path, contents)
            .with_context(|| format!("failed to write state file: {}", path.display()))
    }
}
