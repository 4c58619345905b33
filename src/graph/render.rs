// SPDX-License-Identifier: MIT
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::projector::{
    PlotRect, Point, frame_index_at_x, gridlines, lerp, project_frame_index_to_x, project_point,
};
use crate::error::{BenchError, Result};
use crate::results::{BenchmarkResultStore, ResultSource, Selection, SeriesToRender};

pub const NO_DATA_MESSAGE: &str = "No stats found, please run a benchmark.";

/// Vertical axis range of the graph.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ValueRange {
    /// `0..2 * average`, keeping the average line in the middle.
    #[default]
    Auto,
    Fixed { min_ms: f64, max_ms: f64 },
}

impl ValueRange {
    #[must_use]
    pub fn resolve(self, avg_ms: f64) -> (f64, f64) {
        match self {
            ValueRange::Auto => (0.0, avg_ms * 2.0),
            ValueRange::Fixed { min_ms, max_ms } => (min_ms, max_ms),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphOptions {
    pub gridlines: usize,
    pub padding: f64,
    pub label_gutter: f64,
    pub range: ValueRange,
    /// Cursor position as a fraction of the plot width.
    pub cursor: Option<f64>,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            gridlines: 5,
            padding: 20.0,
            label_gutter: 40.0,
            range: ValueRange::Auto,
            cursor: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Series,
    Gridline,
    MaxMarker,
    MinMarker,
    Cursor,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled plot background.
    Background { rect: PlotRect },
    Line {
        from: Point,
        to: Point,
        kind: LineKind,
        dotted: bool,
    },
    Polyline { points: Vec<Point>, kind: LineKind },
    Label { at: Point, text: String },
    /// Shown instead of the graph.
    Placeholder { message: String },
}

/// Draw commands for `selection`, laid out inside `area`.
///
/// Never fails: missing data and data faults turn into a
/// [`DrawCommand::Placeholder`].
pub fn render<S: ResultSource>(
    store: &BenchmarkResultStore<S>,
    selection: &Selection,
    area: PlotRect,
    options: &GraphOptions,
) -> Vec<DrawCommand> {
    draw_series(store.compute_series_to_render(selection), area, options)
}

#[must_use]
pub fn draw_series(
    series: Result<Option<SeriesToRender>>,
    area: PlotRect,
    options: &GraphOptions,
) -> Vec<DrawCommand> {
    let outcome = match series {
        Ok(Some(series)) => draw_graph(&series, area, options),
        Ok(None) => {
            return vec![DrawCommand::Placeholder {
                message: NO_DATA_MESSAGE.to_string(),
            }];
        }
        Err(e) => Err(e),
    };

    outcome.unwrap_or_else(|e| {
        debug!(error = %e, "graph not drawn");
        vec![DrawCommand::Placeholder {
            message: placeholder_message(&e),
        }]
    })
}

fn placeholder_message(e: &BenchError) -> String {
    if e.is_data_fault() {
        format!("invalid data: {e}")
    } else {
        e.to_string()
    }
}

fn draw_graph(
    series: &SeriesToRender,
    area: PlotRect,
    options: &GraphOptions,
) -> Result<Vec<DrawCommand>> {
    let rect = area.inset(options.padding, options.label_gutter);
    let (ms_min, ms_max) = options.range.resolve(series.stats.avg_ms);
    let mut commands = vec![DrawCommand::Background { rect }];

    for line in gridlines(&rect, ms_min, ms_max, options.gridlines) {
        commands.push(DrawCommand::Line {
            from: Point::new(rect.x_min, line.y),
            to: Point::new(rect.x_max, line.y),
            kind: LineKind::Gridline,
            dotted: true,
        });
        commands.push(DrawCommand::Label {
            at: Point::new(rect.x_max, line.y),
            text: format!("{:.1}ms", line.label_ms),
        });
    }

    let total = series.series.len();
    let points = series
        .series
        .iter()
        .enumerate()
        .map(|(i, &ms)| project_point(&rect, i, ms, total, ms_min, ms_max))
        .collect::<Result<Vec<_>>>()?;
    commands.push(DrawCommand::Polyline {
        points,
        kind: LineKind::Series,
    });

    if series.markers {
        let markers = [
            (series.stats.max_frame, LineKind::MaxMarker),
            (series.stats.min_frame, LineKind::MinMarker),
        ];
        for (frame, kind) in markers {
            let Some(frame) = frame else { continue };
            let x = project_frame_index_to_x(&rect, frame.frame_index, series.total_frames)?;
            commands.push(vertical_line(&rect, x, kind));
        }
    }

    if let Some(fraction) = options.cursor {
        let x = lerp(rect.x_min, rect.x_max, fraction);
        let frame = frame_index_at_x(&rect, x, series.total_frames);
        let text = match series.series.get(frame) {
            Some(ms) => format!("frame {frame}: {ms:.2}ms"),
            None => format!("frame {frame}: no sample"),
        };
        commands.push(vertical_line(&rect, x, LineKind::Cursor));
        commands.push(DrawCommand::Label {
            at: Point::new(x, rect.y_min),
            text,
        });
    }

    Ok(commands)
}

fn vertical_line(rect: &PlotRect, x: f64, kind: LineKind) -> DrawCommand {
    DrawCommand::Line {
        from: Point::new(x, rect.y_min),
        to: Point::new(x, rect.y_max),
        kind,
        dotted: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FrameSample;
    use crate::results::SeriesStats;

    fn area() -> PlotRect {
        PlotRect::new(0.0, 0.0, 460.0, 240.0)
    }

    fn single_run() -> SeriesToRender {
        SeriesToRender {
            series: vec![10.0, 20.0, 30.0],
            stats: SeriesStats {
                avg_ms: 20.0,
                runtime: 1.0,
                min_frame: Some(FrameSample::new(0, 10.0)),
                max_frame: Some(FrameSample::new(2, 30.0)),
            },
            total_frames: 4,
            markers: true,
        }
    }

    fn lines_of(commands: &[DrawCommand], wanted: LineKind) -> Vec<(Point, Point)> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { from, to, kind, .. } if *kind == wanted => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn no_data_placeholder() {
        let commands = draw_series(Ok(None), area(), &GraphOptions::default());
        assert_eq!(
            commands,
            vec![DrawCommand::Placeholder {
                message: NO_DATA_MESSAGE.to_string()
            }]
        );
    }

    #[test]
    fn data_fault_placeholder() {
        let commands = draw_series(
            Err(BenchError::RunLengthMismatch {
                run: 1,
                expected: 3,
                actual: 2,
            }),
            area(),
            &GraphOptions::default(),
        );
        match commands.as_slice() {
            [DrawCommand::Placeholder { message }] => {
                assert!(message.starts_with("invalid data:"));
            }
            other => panic!("unexpected commands {other:?}"),
        }
    }

    #[test]
    fn single_sample_series_is_degenerate() {
        let mut series = single_run();
        series.series = vec![12.0];
        let commands = draw_series(Ok(Some(series)), area(), &GraphOptions::default());
        assert!(matches!(
            commands.as_slice(),
            [DrawCommand::Placeholder { message }] if message.contains("no horizontal span")
        ));
    }

    #[test]
    fn graph_layout() {
        let commands = draw_series(Ok(Some(single_run())), area(), &GraphOptions::default());
        let rect = area().inset(20.0, 40.0);
        assert_eq!(commands[0], DrawCommand::Background { rect });

        let grid = lines_of(&commands, LineKind::Gridline);
        assert_eq!(grid.len(), 5);
        let labels: Vec<&str> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Label { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["0.0ms", "10.0ms", "20.0ms", "30.0ms", "40.0ms"]);

        let polyline = commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::Polyline { points, .. } => Some(points),
                _ => None,
            })
            .expect("series polyline");
        assert_eq!(polyline.len(), 3);
        assert!((polyline[0].x - rect.x_min).abs() < 1e-9);
        assert!((polyline[2].x - rect.x_max).abs() < 1e-9);
        // 20ms is the middle of 0..40ms.
        assert!((polyline[1].y - (rect.y_min + rect.y_max) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn markers_align_to_frame_budget() {
        let commands = draw_series(Ok(Some(single_run())), area(), &GraphOptions::default());
        let rect = area().inset(20.0, 40.0);

        let max = lines_of(&commands, LineKind::MaxMarker);
        assert_eq!(max.len(), 1);
        // Frame 2 of a 4 frame budget sits halfway, not at the end.
        let expected = lerp(rect.x_min, rect.x_max, 0.5);
        assert!((max[0].0.x - expected).abs() < 1e-9);
        assert!((max[0].0.y - rect.y_min).abs() < 1e-9);
        assert!((max[0].1.y - rect.y_max).abs() < 1e-9);

        let min = lines_of(&commands, LineKind::MinMarker);
        assert!((min[0].0.x - rect.x_min).abs() < 1e-9);
    }

    #[test]
    fn aggregate_has_no_markers() {
        let mut series = single_run();
        series.markers = false;
        series.stats.min_frame = None;
        series.stats.max_frame = None;
        let commands = draw_series(Ok(Some(series)), area(), &GraphOptions::default());
        assert!(lines_of(&commands, LineKind::MaxMarker).is_empty());
        assert!(lines_of(&commands, LineKind::MinMarker).is_empty());
    }

    #[test]
    fn fixed_range_and_cursor() {
        let options = GraphOptions {
            gridlines: 2,
            range: ValueRange::Fixed {
                min_ms: 0.0,
                max_ms: 33.3,
            },
            cursor: Some(0.25),
            ..GraphOptions::default()
        };
        let commands = draw_series(Ok(Some(single_run())), area(), &options);
        assert_eq!(lines_of(&commands, LineKind::Gridline).len(), 2);
        assert_eq!(lines_of(&commands, LineKind::Cursor).len(), 1);
        assert!(commands.contains(&DrawCommand::Label {
            at: Point::new(lerp(20.0, 400.0, 0.25), 20.0),
            text: "frame 1: 20.00ms".to_string(),
        }));
    }

    #[test]
    fn cursor_past_recorded_samples() {
        let options = GraphOptions {
            cursor: Some(1.0),
            ..GraphOptions::default()
        };
        let commands = draw_series(Ok(Some(single_run())), area(), &options);
        assert!(commands.iter().any(|c| matches!(
            c,
            DrawCommand::Label { text, .. } if text == "frame 4: no sample"
        )));
    }

    #[test]
    fn render_before_load_is_a_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let store =
            BenchmarkResultStore::new(crate::results::DirectorySource::new(dir.path()));
        let commands = render(&store, &Selection::default(), area(), &GraphOptions::default());
        assert!(matches!(
            commands.as_slice(),
            [DrawCommand::Placeholder { message }] if message.contains("not been loaded")
        ));
    }
}
