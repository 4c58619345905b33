// SPDX-License-Identifier: MIT
//! Paints graph draw commands onto a braille canvas.
//!
//! Draw commands use a y-down plot space sized in braille dots; the canvas is
//! y-up, so every y is flipped against the plot height.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::Color;
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine, Rectangle};

use crate::graph::projector::lerp;
use crate::graph::{DrawCommand, PlotRect, Point};
use crate::tui::theme::Theme;

const DOTS_PER_COLUMN: f64 = 2.0;
const DOTS_PER_ROW: f64 = 4.0;
const DASH_LENGTH: f64 = 3.0;

/// Plot space covering `area` at braille resolution.
#[must_use]
pub fn plot_area(area: Rect) -> PlotRect {
    PlotRect::new(
        0.0,
        0.0,
        f64::from(area.width) * DOTS_PER_COLUMN,
        f64::from(area.height) * DOTS_PER_ROW,
    )
}

/// Splits a line into dashes of `dash` length separated by equal gaps.
#[must_use]
pub fn dashes(from: Point, to: Point, dash: f64) -> Vec<(Point, Point)> {
    let length = (to.x - from.x).hypot(to.y - from.y);
    if dash <= 0.0 || length <= dash {
        return vec![(from, to)];
    }

    let along = |d: f64| {
        let t = d / length;
        Point::new(lerp(from.x, to.x, t), lerp(from.y, to.y, t))
    };
    let mut segments = Vec::new();
    let mut start = 0.0;
    while start < length {
        let end = (start + dash).min(length);
        segments.push((along(start), along(end)));
        start += dash * 2.0;
    }
    segments
}

fn placeholder(commands: &[DrawCommand]) -> Option<&str> {
    commands.iter().find_map(|c| match c {
        DrawCommand::Placeholder { message } => Some(message.as_str()),
        _ => None,
    })
}

fn segment(ctx: &mut Context<'_>, from: Point, to: Point, height: f64, color: Color) {
    ctx.draw(&CanvasLine::new(
        from.x,
        height - from.y,
        to.x,
        height - to.y,
        color,
    ));
}

fn paint(ctx: &mut Context<'_>, commands: &[DrawCommand], height: f64, theme: &Theme) {
    for command in commands {
        match command {
            DrawCommand::Background { rect } => ctx.draw(&Rectangle {
                x: rect.x_min,
                y: height - rect.y_max,
                width: rect.width(),
                height: rect.height(),
                color: theme.plot_border,
            }),
            DrawCommand::Line {
                from,
                to,
                kind,
                dotted,
            } => {
                let color = theme.line_color(*kind);
                if *dotted {
                    for (a, b) in dashes(*from, *to, DASH_LENGTH) {
                        segment(ctx, a, b, height, color);
                    }
                } else {
                    segment(ctx, *from, *to, height, color);
                }
            }
            DrawCommand::Polyline { points, kind } => {
                let color = theme.line_color(*kind);
                for pair in points.windows(2) {
                    segment(ctx, pair[0], pair[1], height, color);
                }
            }
            DrawCommand::Label { at, text } => {
                ctx.print(at.x, height - at.y, Span::styled(text.clone(), theme.label));
            }
            DrawCommand::Placeholder { .. } => {}
        }
    }
}

pub fn render(frame: &mut ratatui::Frame, area: Rect, commands: &[DrawCommand], theme: &Theme) {
    if area.height < 2 || area.width < 4 {
        return;
    }

    if let Some(message) = placeholder(commands) {
        let paragraph = Paragraph::new(message.to_string())
            .style(theme.placeholder)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let bounds = plot_area(area);
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([bounds.x_min, bounds.x_max])
        .y_bounds([bounds.y_min, bounds.y_max])
        .paint(|ctx| paint(ctx, commands, bounds.y_max, theme));
    frame.render_widget(canvas, area);
}
