// SPDX-License-Identifier: MIT
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{InfoField, TestInfo};
use crate::tui::theme::Theme;

/// Fields go into two columns, the left one taking the extra field when the
/// count is odd.
#[must_use]
pub fn split_columns(fields: &[InfoField]) -> (&[InfoField], &[InfoField]) {
    fields.split_at(fields.len().div_ceil(2))
}

/// Rows the panel needs to show every field, borders included.
#[must_use]
pub fn required_height() -> u16 {
    let rows = TestInfo::default().fields().len().div_ceil(2);
    u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(2)
}

fn column<'a>(fields: &[InfoField], theme: &Theme) -> Vec<Line<'a>> {
    fields
        .iter()
        .map(|f| {
            Line::from(vec![
                Span::styled(format!("{}: ", f.label), theme.info_label),
                Span::raw(f.value.clone()),
            ])
        })
        .collect()
}

pub fn render(frame: &mut ratatui::Frame, area: Rect, info: &TestInfo, theme: &Theme) {
    if area.height == 0 || area.width < 4 {
        return;
    }

    let fields = info.fields();
    let (left, right) = split_columns(&fields);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    frame.render_widget(Paragraph::new(column(left, theme)), columns[0]);
    frame.render_widget(Paragraph::new(column(right, theme)), columns[1]);
}
