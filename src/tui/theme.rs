// SPDX-License-Identifier: MIT
use ratatui::style::{Color, Modifier, Style};

use crate::graph::LineKind;

pub struct Theme {
    pub series: Color,
    pub max_marker: Color,
    pub min_marker: Color,
    pub gridline: Color,
    pub cursor: Color,
    pub plot_border: Color,
    pub label: Style,
    pub placeholder: Style,
    pub info_label: Style,
    pub border_normal: Style,
    pub border_selected: Style,
    pub title: Style,
    pub status_bar: Style,
    pub warning: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            series: Color::Rgb(33, 150, 243),
            max_marker: Color::Red,
            min_marker: Color::Green,
            gridline: Color::DarkGray,
            cursor: Color::Yellow,
            plot_border: Color::Gray,
            label: Style::default().fg(Color::Gray),
            placeholder: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
            info_label: Style::default().fg(Color::Cyan),
            border_normal: Style::default().fg(Color::White),
            border_selected: Style::default().fg(Color::Cyan),
            title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            status_bar: Style::default().fg(Color::Black).bg(Color::White),
            warning: Style::default()
                .fg(Color::Red)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
        }
    }
}

impl Theme {
    #[must_use]
    pub fn line_color(&self, kind: LineKind) -> Color {
        match kind {
            LineKind::Series => self.series,
            LineKind::Gridline => self.gridline,
            LineKind::MaxMarker => self.max_marker,
            LineKind::MinMarker => self.min_marker,
            LineKind::Cursor => self.cursor,
        }
    }
}

pub const SELECTED_MARKER: [char; 2] = ['\u{2610}', '\u{2611}'];
pub const COLLAPSED_MARKER: [char; 2] = ['\u{25BC}', '\u{25BA}'];
