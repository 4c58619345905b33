// SPDX-License-Identifier: MIT
//! Launching benchmark runs and packaging benchmark builds.
//!
//! The actual work is done by external commands from the config; this
//! module only decides which scenes go in, where the build lands, and what
//! the resulting result file is called.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use tracing::{error, info};

use crate::config::OrchestratorConfig;
use crate::results::format::NATIVE_EXTENSION;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Platform {
    Linux,
    Windows,
    #[value(name = "macos")]
    MacOs,
    Android,
    Ios,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "Linux"),
            Self::Windows => write!(f, "Windows"),
            Self::MacOs => write!(f, "MacOS"),
            Self::Android => write!(f, "Android"),
            Self::Ios => write!(f, "iOS"),
        }
    }
}

impl Platform {
    #[must_use]
    pub fn executable_extension(self) -> &'static str {
        match self {
            Self::Android => ".apk",
            _ => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneSelector {
    /// Every configured benchmark scene.
    Suite,
    Scene(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub outcome: BuildOutcome,
    pub output_path: PathBuf,
}

pub trait Orchestrator {
    /// Runs the benchmark without packaging.
    ///
    /// # Errors
    ///
    /// Returns an error if the run cannot be started or fails.
    fn launch_interactive(&mut self, scenes: SceneSelector) -> Result<()>;

    /// Packages a build containing `scenes` for `platform`.
    ///
    /// # Errors
    ///
    /// Returns an error if the build cannot be started. A build that runs and
    /// fails is reported through [`BuildReport::outcome`].
    fn package_build(&mut self, platform: Platform, scenes: &[String]) -> Result<BuildReport>;
}

/// `<build_root>/<platform>/<product><ext>`
#[must_use]
pub fn build_output_path(build_root: &Path, platform: Platform, product_name: &str) -> PathBuf {
    build_root
        .join(platform.to_string())
        .join(format!("{product_name}{}", platform.executable_extension()))
}

/// Name of the result file a run of `test_name` should produce.
#[must_use]
pub fn result_file_name(test_name: &str, unix_secs: u64) -> String {
    let slug: String = test_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    let slug = if slug.is_empty() { "benchmark" } else { &slug };
    format!("{slug}_{unix_secs}.{NATIVE_EXTENSION}")
}

fn selected_scenes<'a>(
    config: &'a OrchestratorConfig,
    selector: SceneSelector,
) -> Result<Vec<&'a str>> {
    match selector {
        SceneSelector::Suite => Ok(config.scenes.iter().map(|s| s.scene.as_str()).collect()),
        SceneSelector::Scene(index) => match config.scenes.get(index) {
            Some(s) => Ok(vec![s.scene.as_str()]),
            None => bail!(
                "benchmark scene {index} does not exist ({} configured)",
                config.scenes.len()
            ),
        },
    }
}

/// Scenes packaged into a build: the menu plus every scene for the suite,
/// or the loader plus the one scene.
///
/// # Errors
///
/// Returns an error if the selected scene index is not configured.
pub fn build_scene_list(config: &OrchestratorConfig, selector: SceneSelector) -> Result<Vec<String>> {
    let entry = match selector {
        SceneSelector::Suite => &config.menu_scene,
        SceneSelector::Scene(_) => &config.loader_scene,
    };
    let mut scenes = vec![entry.clone()];
    scenes.extend(selected_scenes(config, selector)?.into_iter().map(String::from));
    Ok(scenes)
}

/// Runs configured commands, substituting `{platform}`, `{output}`,
/// `{scenes}` (comma separated) and `{scene}` (index or `all`).
pub struct CommandOrchestrator {
    config: OrchestratorConfig,
}

impl CommandOrchestrator {
    #[must_use]
    pub fn new(config: OrchestratorConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }
}

fn expand(template: &[String], vars: &[(&str, &str)]) -> Result<Command> {
    let Some((program, args)) = template.split_first() else {
        bail!("no command configured");
    };
    let substitute = |arg: &String| {
        vars.iter()
            .fold(arg.clone(), |acc, (key, value)| acc.replace(key, value))
    };
    let mut command = Command::new(substitute(program));
    command.args(args.iter().map(substitute));
    Ok(command)
}

impl Orchestrator for CommandOrchestrator {
    fn launch_interactive(&mut self, scenes: SceneSelector) -> Result<()> {
        let mut list = vec![self.config.loader_scene.as_str()];
        list.extend(selected_scenes(&self.config, scenes)?);
        let scene_arg = match scenes {
            SceneSelector::Suite => "all".to_string(),
            SceneSelector::Scene(index) => index.to_string(),
        };
        let joined = list.join(",");

        let mut command = expand(
            &self.config.run_command,
            &[("{scenes}", &joined), ("{scene}", &scene_arg)],
        )
        .context("cannot launch benchmark")?;

        info!(scenes = %joined, "launching benchmark");
        let status = command.status().context("failed to start benchmark run")?;
        if !status.success() {
            bail!("benchmark run exited with {status}");
        }
        Ok(())
    }

    fn package_build(&mut self, platform: Platform, scenes: &[String]) -> Result<BuildReport> {
        let output_path =
            build_output_path(&self.config.build_root, platform, &self.config.product_name);
        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let platform_arg = platform.to_string();
        let output_arg = output_path.display().to_string();
        let joined = scenes.join(",");
        let mut command = expand(
            &self.config.build_command,
            &[
                ("{platform}", &platform_arg),
                ("{output}", &output_arg),
                ("{scenes}", &joined),
            ],
        )
        .context("cannot package benchmark build")?;

        info!(%platform, output = %output_arg, "building benchmark");
        let status = command.status().context("failed to start build")?;
        let outcome = if status.success() {
            info!("benchmark build complete");
            BuildOutcome::Succeeded
        } else {
            error!(%status, "benchmark build failed");
            BuildOutcome::Failed
        };

        Ok(BuildReport {
            outcome,
            output_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BenchmarkScene;

    fn config() -> OrchestratorConfig {
        OrchestratorConfig {
            scenes: vec![
                BenchmarkScene {
                    name: "Island".to_string(),
                    scene: "scenes/island".to_string(),
                },
                BenchmarkScene {
                    name: "Harbor".to_string(),
                    scene: "scenes/harbor".to_string(),
                },
            ],
            ..OrchestratorConfig::default()
        }
    }

    #[test]
    fn suite_build_starts_from_menu() {
        let scenes = build_scene_list(&config(), SceneSelector::Suite).unwrap();
        assert_eq!(
            scenes,
            vec!["scenes/menu_benchmark", "scenes/island", "scenes/harbor"]
        );
    }

    #[test]
    fn single_scene_build_starts_from_loader() {
        let scenes = build_scene_list(&config(), SceneSelector::Scene(1)).unwrap();
        assert_eq!(scenes, vec!["scenes/benchmark/loader", "scenes/harbor"]);
        assert!(build_scene_list(&config(), SceneSelector::Scene(2)).is_err());
    }

    #[test]
    fn output_paths() {
        let root = Path::new("Builds/Benchmark");
        assert_eq!(
            build_output_path(root, Platform::Android, "BoatBench"),
            PathBuf::from("Builds/Benchmark/Android/BoatBench.apk")
        );
        assert_eq!(
            build_output_path(root, Platform::Linux, "BoatBench"),
            PathBuf::from("Builds/Benchmark/Linux/BoatBench")
        );
    }

    #[test]
    fn result_file_names() {
        assert_eq!(result_file_name("Island Flythrough", 1700), "island_flythrough_1700.perf");
        assert_eq!(result_file_name("", 5), "benchmark_5.perf");
    }

    #[test]
    fn templates_expand() {
        let template = vec![
            "./build.sh".to_string(),
            "--target={platform}".to_string(),
            "{scenes}".to_string(),
        ];
        let command = expand(
            &template,
            &[("{platform}", "Android"), ("{scenes}", "a,b")],
        )
        .unwrap();
        assert_eq!(command.get_program(), "./build.sh");
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args, vec!["--target=Android", "a,b"]);
    }

    #[test]
    fn empty_command_is_an_error() {
        assert!(expand(&[], &[]).is_err());
        let mut orchestrator = CommandOrchestrator::new(config());
        assert!(orchestrator.launch_interactive(SceneSelector::Suite).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn build_outcome_follows_exit_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config();
        cfg.build_root = dir.path().to_path_buf();

        cfg.build_command = vec!["true".to_string()];
        let report = CommandOrchestrator::new(cfg.clone())
            .package_build(Platform::Linux, &["scenes/island".to_string()])
            .unwrap();
        assert_eq!(report.outcome, BuildOutcome::Succeeded);
        assert_eq!(report.output_path, dir.path().join("Linux").join("Benchmark"));

        cfg.build_command = vec!["false".to_string()];
        let report = CommandOrchestrator::new(cfg)
            .package_build(Platform::Linux, &[])
            .unwrap();
        assert_eq!(report.outcome, BuildOutcome::Failed);
    }
}
