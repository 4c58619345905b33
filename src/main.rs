// SPDX-License-Identifier: MIT
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::fs::File;
use std::io::{self, BufWriter, Stdout, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use num_format::{Locale, ToFormattedString};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, info, warn};

use benchview::config::{Config, SessionState};
use benchview::graph::render::NO_DATA_MESSAGE;
use benchview::logging::{LogTarget, init_logger};
use benchview::model::RunData;
use benchview::orchestrator::{
    BuildOutcome, CommandOrchestrator, Orchestrator, Platform, SceneSelector, build_scene_list,
    result_file_name,
};
use benchview::results::reader::read_result_file;
use benchview::results::writer::write_result_file;
use benchview::results::{BenchmarkResultStore, DirectorySource, RunSelector, Selected, Selection};
use benchview::stats::aggregate;
use benchview::tui::app::{App, view_label};
use benchview::tui::input::handle_key;
use benchview::tui::panels::summary::summary_lines;

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(50);

#[derive(Parser)]
#[command(name = "benchview", about = "benchview: benchmark frame-time viewer")]
struct Cli {
    /// Config file; `benchview.toml` in the working directory is used when present
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse benchmark results
    View {
        /// Results directory, overriding the config
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
    /// Print statistics for one test
    Summary {
        #[arg(short, long)]
        dir: Option<PathBuf>,
        #[arg(long, default_value = "0")]
        file: usize,
        #[arg(long, default_value = "0")]
        test: usize,
        /// Zero-based run; all runs are averaged when omitted
        #[arg(long)]
        run: Option<usize>,
    },
    /// Export a test's frame times to CSV
    Export {
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long, default_value = "0")]
        test: usize,
    },
    /// Convert a JSON result file to the native format
    Import {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run the benchmark suite or a single scene
    Run {
        #[arg(long)]
        scene: Option<usize>,
    },
    /// Package a benchmark build
    Build {
        #[arg(short, long, value_enum)]
        platform: Platform,
        #[arg(long)]
        scene: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    // The TUI owns the terminal, so it may only log to a file.
    let target = match (&cli.command, &config.logging.file) {
        (Commands::View { .. }, Some(file)) => LogTarget::File(file),
        (Commands::View { .. }, None) => LogTarget::Off,
        _ => LogTarget::Stderr,
    };
    init_logger(config.logging.level, target)?;

    match cli.command {
        Commands::View { dir } => cmd_view(&config, dir),
        Commands::Summary {
            dir,
            file,
            test,
            run,
        } => cmd_summary(&config, dir, file, test, run),
        Commands::Export {
            input,
            output,
            test,
        } => cmd_export(&input, &output, test),
        Commands::Import { input, output } => cmd_import(&config, &input, output),
        Commands::Run { scene } => cmd_run(&config, scene),
        Commands::Build { platform, scene } => cmd_build(&config, platform, scene),
    }
}

// ---------------------------------------------------------------------------
// Signal handling
// ---------------------------------------------------------------------------

fn install_signal_handler() -> Result<Arc<AtomicBool>> {
    let shutdown = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&shutdown))
        .context("failed to register SIGINT handler")?;
    signal_hook::flag::register(signal_hook::consts::SIGTERM, Arc::clone(&shutdown))
        .context("failed to register SIGTERM handler")?;
    Ok(shutdown)
}

// ---------------------------------------------------------------------------
// Terminal setup / teardown
// ---------------------------------------------------------------------------

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("failed to create terminal")
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// View subcommand
// ---------------------------------------------------------------------------

fn cmd_view(config: &Config, dir: Option<PathBuf>) -> Result<()> {
    let shutdown = install_signal_handler()?;
    let dir = dir.unwrap_or_else(|| config.results_dir.clone());

    let store = BenchmarkResultStore::new(DirectorySource::new(dir));
    let mut app = App::new(store, config.graph.options());
    app.reload().context("failed to load benchmark results")?;

    let state = SessionState::load(&config.state_file).unwrap_or_else(|e| {
        warn!("ignoring session state: {e:#}");
        SessionState::default()
    });
    if let Some(ref name) = state.last_result_file
        && !app.select_file(name)
    {
        debug!(file = %name, "last result file is gone");
    }

    let mut terminal = setup_terminal()?;
    let result = run_view_loop(&shutdown, &mut app, &mut terminal, &config.state_file);
    restore_terminal(&mut terminal)?;

    save_state(&app, &config.state_file);
    result
}

fn run_view_loop(
    shutdown: &Arc<AtomicBool>,
    app: &mut App<DirectorySource>,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state_file: &Path,
) -> Result<()> {
    let mut saved_file = app.selected_file_name().map(str::to_owned);

    loop {
        if shutdown.load(Ordering::Relaxed) || app.should_quit {
            break;
        }

        if event::poll(EVENT_POLL_TIMEOUT).context("failed to poll events")?
            && let Event::Key(key) = event::read().context("failed to read event")?
            && key.kind == KeyEventKind::Press
        {
            let action = handle_key(key.code, app.cursor.is_some());
            app.handle_action(&action);

            if app.selected_file_name() != saved_file.as_deref() {
                save_state(app, state_file);
                saved_file = app.selected_file_name().map(str::to_owned);
            }
        }

        terminal
            .draw(|f| app.render(f))
            .context("failed to draw frame")?;
    }
    Ok(())
}

fn save_state(app: &App<DirectorySource>, path: &Path) {
    let state = SessionState {
        last_result_file: app.selected_file_name().map(str::to_owned),
    };
    if let Err(e) = state.save(path) {
        warn!("failed to save session state: {e:#}");
    }
}

// ---------------------------------------------------------------------------
// Summary subcommand
// ---------------------------------------------------------------------------

fn cmd_summary(
    config: &Config,
    dir: Option<PathBuf>,
    file: usize,
    test: usize,
    run: Option<usize>,
) -> Result<()> {
    let dir = dir.unwrap_or_else(|| config.results_dir.clone());
    let mut store = BenchmarkResultStore::new(DirectorySource::new(&dir));
    let set = store
        .load_all()
        .with_context(|| format!("failed to load results from {}", dir.display()))?;

    for skipped in &set.skipped {
        eprintln!("Skipped {}: {}", skipped.path.display(), skipped.reason);
    }

    let selection = Selection {
        file,
        test,
        run: run.map_or(RunSelector::Aggregate, RunSelector::Run),
    };
    let Selected::Test { results, perf, .. } = store.select(&selection)? else {
        println!("{NO_DATA_MESSAGE}");
        return Ok(());
    };
    let Some(series) = store
        .compute_series_to_render(&selection)
        .context("cannot summarize selection")?
    else {
        println!("{NO_DATA_MESSAGE}");
        return Ok(());
    };

    println!(
        "{} | {} | {}",
        results.file_name,
        perf.info.display_name(),
        view_label(selection.run)
    );
    for field in perf.info.fields() {
        println!("  {}: {}", field.label, field.value);
    }
    for line in summary_lines(&series, perf.run_count()) {
        println!("{line}");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Export subcommand
// ---------------------------------------------------------------------------

fn cmd_export(input: &Path, output: &Path, test: usize) -> Result<()> {
    let results = read_result_file(input)?;
    let perf = results
        .perf_stats
        .get(test)
        .with_context(|| format!("{} has no test {test}", input.display()))?;
    let averaged = aggregate(&perf.runs).context("cannot average runs")?;

    let file = File::create(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    let mut out = BufWriter::new(file);

    write_csv_header(&mut out, perf.run_count())?;
    for (index, average) in averaged.series.iter().enumerate() {
        write_csv_row(&mut out, index, &perf.runs, *average)?;
    }
    out.flush().context("failed to flush CSV")?;

    eprintln!(
        "Exported {} frames of {} run(s) from {} to {}",
        averaged.series.len().to_formatted_string(&Locale::en),
        perf.run_count(),
        input.display(),
        output.display()
    );
    Ok(())
}

fn write_csv_header(out: &mut impl Write, runs: usize) -> Result<()> {
    let mut header = String::from("frame");
    for run in 1..=runs {
        header.push_str(&format!(",run_{run}"));
    }
    header.push_str(",average");
    writeln!(out, "{header}").context("failed to write CSV header")
}

fn write_csv_row(out: &mut impl Write, index: usize, runs: &[RunData], average: f64) -> Result<()> {
    let mut row = index.to_string();
    for run in runs {
        match run.raw_samples.get(index) {
            Some(ms) => row.push_str(&format!(",{ms:.4}")),
            None => row.push(','),
        }
    }
    row.push_str(&format!(",{average:.4}"));
    writeln!(out, "{row}").context("failed to write CSV row")
}

// ---------------------------------------------------------------------------
// Import subcommand
// ---------------------------------------------------------------------------

fn cmd_import(config: &Config, input: &Path, output: Option<PathBuf>) -> Result<()> {
    let results = read_result_file(input)?;

    let output = output.unwrap_or_else(|| {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());
        let name = results
            .perf_stats
            .first()
            .map_or("benchmark", |t| t.info.display_name());
        config.results_dir.join(result_file_name(name, secs))
    });
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    write_result_file(&output, &results.perf_stats)?;
    info!(tests = results.perf_stats.len(), output = %output.display(), "imported results");

    eprintln!(
        "Imported {} test(s) from {} to {}",
        results.perf_stats.len(),
        input.display(),
        output.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Run / build subcommands
// ---------------------------------------------------------------------------

fn scene_selector(scene: Option<usize>) -> SceneSelector {
    scene.map_or(SceneSelector::Suite, SceneSelector::Scene)
}

fn cmd_run(config: &Config, scene: Option<usize>) -> Result<()> {
    let mut orchestrator = CommandOrchestrator::new(config.orchestrator.clone());
    orchestrator.launch_interactive(scene_selector(scene))?;
    eprintln!("Benchmark finished; results are read from {}", config.results_dir.display());
    Ok(())
}

fn cmd_build(config: &Config, platform: Platform, scene: Option<usize>) -> Result<()> {
    let scenes = build_scene_list(&config.orchestrator, scene_selector(scene))?;
    eprintln!("Building {} scene(s) for {platform} ...", scenes.len());

    let mut orchestrator = CommandOrchestrator::new(config.orchestrator.clone());
    let report = orchestrator.package_build(platform, &scenes)?;
    match report.outcome {
        BuildOutcome::Succeeded => {
            eprintln!("Benchmark build complete: {}", report.output_path.display());
            Ok(())
        }
        BuildOutcome::Failed => bail!(
            "benchmark build failed (expected output {})",
            report.output_path.display()
        ),
    }
}
