// SPDX-License-Identifier: MIT
use std::sync::Arc;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders, Paragraph};
use tracing::{debug, error};

use super::input::Action;
use super::layout::{PanelHeight, PanelKind, PanelState, build_layout};
use super::panels::{graph, header, info, summary};
use super::theme::{COLLAPSED_MARKER, SELECTED_MARKER, Theme};
use crate::error::Result;
use crate::graph::render::NO_DATA_MESSAGE;
use crate::graph::{GraphOptions, render as render_graph};
use crate::model::{PerfBasic, PerfResults};
use crate::results::{
    BenchmarkResultStore, ResultSet, ResultSource, RunSelector, Selected, Selection,
};

const CURSOR_STEP: f64 = 0.01;
const CURSOR_START: f64 = 0.5;
/// Graph padding and label gutter, in braille dots.
const GRAPH_PADDING: f64 = 4.0;
const GRAPH_LABEL_GUTTER: f64 = 16.0;
const GRAPH_MIN_HEIGHT: u16 = 10;

/// Label for a run selector as shown in the header.
#[must_use]
pub fn view_label(run: RunSelector) -> String {
    match run {
        RunSelector::Aggregate => "Smooth all runs".to_string(),
        RunSelector::Run(index) => format!("Run {}", index + 1),
    }
}

fn step(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}

/// Aggregate first, then each run.
fn run_position(run: RunSelector) -> usize {
    match run {
        RunSelector::Aggregate => 0,
        RunSelector::Run(index) => index + 1,
    }
}

fn run_at(position: usize) -> RunSelector {
    match position {
        0 => RunSelector::Aggregate,
        n => RunSelector::Run(n - 1),
    }
}

/// Pulls a selection back inside `set`, resetting whatever no longer exists.
fn clamp_selection(set: &ResultSet, selection: Selection) -> Selection {
    let Some(results) = set.results.get(selection.file) else {
        return Selection::default();
    };
    let Some(perf) = results.perf_stats.get(selection.test) else {
        return Selection {
            file: selection.file,
            ..Selection::default()
        };
    };
    let run = match selection.run {
        RunSelector::Run(index) if index >= perf.runs.len() => RunSelector::Aggregate,
        run => run,
    };
    Selection { run, ..selection }
}

pub struct App<S> {
    pub panels: Vec<PanelState>,
    pub selected_panel: usize,
    pub selection: Selection,
    /// Frame cursor as a fraction of the plot width.
    pub cursor: Option<f64>,
    pub should_quit: bool,
    pub theme: Theme,
    store: BenchmarkResultStore<S>,
    graph_options: GraphOptions,
    load_error: Option<String>,
}

impl<S: ResultSource> App<S> {
    #[must_use]
    pub fn new(store: BenchmarkResultStore<S>, graph_options: GraphOptions) -> Self {
        let panels = vec![
            PanelState {
                name: "Test Info",
                kind: PanelKind::Info,
                collapsed: false,
                height: PanelHeight::Fixed(info::required_height()),
            },
            PanelState {
                name: "Frame Times",
                kind: PanelKind::Graph,
                collapsed: false,
                height: PanelHeight::Fill(GRAPH_MIN_HEIGHT),
            },
            PanelState {
                name: "Summary",
                kind: PanelKind::Summary,
                collapsed: false,
                height: PanelHeight::Fixed(summary::HEIGHT),
            },
        ];

        Self {
            panels,
            selected_panel: 1,
            selection: Selection::default(),
            cursor: None,
            should_quit: false,
            theme: Theme::default(),
            store,
            graph_options: GraphOptions {
                padding: GRAPH_PADDING,
                label_gutter: GRAPH_LABEL_GUTTER,
                ..graph_options
            },
            load_error: None,
        }
    }

    #[must_use]
    pub fn store(&self) -> &BenchmarkResultStore<S> {
        &self.store
    }

    fn results(&self) -> Option<&Arc<ResultSet>> {
        self.store.current().ok()
    }

    fn current_file(&self) -> Option<&PerfResults> {
        self.results()?.results.get(self.selection.file)
    }

    fn current_test(&self) -> Option<&PerfBasic> {
        self.current_file()?.perf_stats.get(self.selection.test)
    }

    #[must_use]
    pub fn selected_file_name(&self) -> Option<&str> {
        self.current_file().map(|r| r.file_name.as_str())
    }

    /// Reloads every result file, staying on the selected file if it is
    /// still there.
    ///
    /// # Errors
    ///
    /// Returns the listing error; the previous results stay on screen.
    pub fn reload(&mut self) -> Result<()> {
        let previous = self.selected_file_name().map(str::to_owned);
        match self.store.load_all() {
            Ok(set) => {
                self.load_error = None;
                let kept = previous.and_then(|name| set.position_of(&name));
                self.selection = match kept {
                    Some(file) => clamp_selection(&set, Selection { file, ..self.selection }),
                    None => Selection::default(),
                };
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "failed to reload results");
                self.load_error = Some(format!("reload failed: {e}"));
                Err(e)
            }
        }
    }

    /// Selects a file by name. Returns false if it is not loaded.
    pub fn select_file(&mut self, file_name: &str) -> bool {
        let Some(file) = self.results().and_then(|set| set.position_of(file_name)) else {
            return false;
        };
        self.selection = Selection {
            file,
            ..Selection::default()
        };
        true
    }

    fn step_file(&mut self, forward: bool) {
        let count = self.results().map_or(0, |set| set.results.len());
        if count == 0 {
            return;
        }
        self.selection = Selection {
            file: step(self.selection.file, count, forward),
            ..Selection::default()
        };
        debug!(file = self.selection.file, "selected result file");
    }

    fn step_test(&mut self, forward: bool) {
        let count = self.current_file().map_or(0, |r| r.perf_stats.len());
        if count == 0 {
            return;
        }
        self.selection.test = step(self.selection.test, count, forward);
        self.selection.run = RunSelector::Aggregate;
    }

    fn step_run(&mut self, forward: bool) {
        let Some(runs) = self.current_test().map(PerfBasic::run_count) else {
            return;
        };
        let position = step(run_position(self.selection.run), runs + 1, forward);
        self.selection.run = run_at(position);
    }

    fn move_cursor(&mut self, delta: f64) {
        if let Some(ref mut cursor) = self.cursor {
            *cursor = (*cursor + delta).clamp(0.0, 1.0);
        }
    }

    pub fn handle_action(&mut self, action: &Action) {
        match *action {
            Action::Quit => self.should_quit = true,
            Action::PanelUp => {
                if self.selected_panel > 0 {
                    self.selected_panel -= 1;
                }
            }
            Action::PanelDown => {
                if self.selected_panel + 1 < self.panels.len() {
                    self.selected_panel += 1;
                }
            }
            Action::ToggleCollapse => {
                if let Some(panel) = self.panels.get_mut(self.selected_panel) {
                    panel.collapsed = !panel.collapsed;
                }
            }
            Action::NextFile => self.step_file(true),
            Action::PrevFile => self.step_file(false),
            Action::NextTest => self.step_test(true),
            Action::PrevTest => self.step_test(false),
            Action::NextRun => self.step_run(true),
            Action::PrevRun => self.step_run(false),
            Action::ToggleCursor => {
                self.cursor = match self.cursor {
                    Some(_) => None,
                    None => Some(CURSOR_START),
                };
            }
            Action::CursorLeft => self.move_cursor(-CURSOR_STEP),
            Action::CursorRight => self.move_cursor(CURSOR_STEP),
            Action::Reload => {
                if self.reload().is_err() {
                    debug!("keeping previous results after failed reload");
                }
            }
            Action::None => {}
        }
    }

    fn header_info(&self) -> header::HeaderInfo<'_> {
        let mut info = header::HeaderInfo {
            notice: self.load_error.as_deref(),
            ..header::HeaderInfo::default()
        };
        let Some(set) = self.results() else {
            return info;
        };
        info.skipped = set.skipped_count();
        if let Ok(Selected::Test { results, perf, .. }) = set.select(&self.selection) {
            info.file = Some((
                results.file_name.as_str(),
                self.selection.file,
                set.results.len(),
            ));
            info.test = Some(perf.info.display_name());
            info.view = Some(view_label(self.selection.run));
        }
        info
    }

    fn render_panel(&self, frame: &mut ratatui::Frame, kind: PanelKind, area: Rect) {
        match kind {
            PanelKind::Info => match self.store.select(&self.selection) {
                Ok(Selected::Test { perf, .. }) => {
                    info::render(frame, area, &perf.info, &self.theme);
                }
                Ok(Selected::NoData) => {
                    frame.render_widget(Paragraph::new(NO_DATA_MESSAGE), area);
                }
                Err(e) => frame.render_widget(Paragraph::new(e.to_string()), area),
            },
            PanelKind::Graph => {
                let options = GraphOptions {
                    cursor: self.cursor,
                    ..self.graph_options
                };
                let commands =
                    render_graph(&self.store, &self.selection, graph::plot_area(area), &options);
                graph::render(frame, area, &commands, &self.theme);
            }
            PanelKind::Summary => {
                let series = self
                    .store
                    .compute_series_to_render(&self.selection)
                    .ok()
                    .flatten();
                let runs = self.current_test().map_or(0, PerfBasic::run_count);
                summary::render(frame, area, series.as_ref(), runs, &self.theme);
            }
        }
    }

    pub fn render(&self, frame: &mut ratatui::Frame) {
        let outer = frame.area();
        if outer.height < 2 || outer.width < 5 {
            return;
        }

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(outer);

        header::render(frame, vertical[0], &self.header_info(), &self.theme);

        let areas = build_layout(&self.panels, vertical[1]);

        for (i, (panel, area)) in self.panels.iter().zip(areas.iter()).enumerate() {
            let is_selected = i == self.selected_panel;

            let sel_mark = if is_selected {
                SELECTED_MARKER[1]
            } else {
                SELECTED_MARKER[0]
            };
            let col_mark = if panel.collapsed {
                COLLAPSED_MARKER[1]
            } else {
                COLLAPSED_MARKER[0]
            };

            let title = format!("{sel_mark} {col_mark} {}", panel.name);

            let border_style = if is_selected {
                self.theme.border_selected
            } else {
                self.theme.border_normal
            };

            let block = Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border_style)
                .title_style(self.theme.title);

            if panel.collapsed {
                frame.render_widget(block, *area);
                continue;
            }

            let inner = block.inner(*area);
            frame.render_widget(block, *area);

            if inner.width < 2 || inner.height < 1 {
                continue;
            }
            self.render_panel(frame, panel.kind, inner);
        }
    }
}
