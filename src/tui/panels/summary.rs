// SPDX-License-Identifier: MIT
use num_format::{Locale, ToFormattedString};
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::results::SeriesToRender;
use crate::tui::theme::Theme;

/// Rows the panel needs, borders included.
pub const HEIGHT: u16 = 7;

#[must_use]
pub fn summary_lines(series: &SeriesToRender, run_count: usize) -> Vec<String> {
    let stats = &series.stats;
    let mut lines = vec![
        format!(
            "Frames: {} ({} run(s))",
            series.total_frames.to_formatted_string(&Locale::en),
            run_count
        ),
        format!("Runtime: {:.2}s", stats.runtime),
        format!("Average: {:.2}ms", stats.avg_ms),
    ];
    if let Some(min) = stats.min_frame {
        lines.push(format!("Minimum(fastest): {min}"));
    }
    if let Some(max) = stats.max_frame {
        lines.push(format!("Maximum(slowest): {max}"));
    }
    lines
}

pub fn render(
    frame: &mut ratatui::Frame,
    area: Rect,
    series: Option<&SeriesToRender>,
    run_count: usize,
    theme: &Theme,
) {
    if area.height == 0 || area.width < 4 {
        return;
    }

    let paragraph = match series {
        Some(series) => Paragraph::new(
            summary_lines(series, run_count)
                .into_iter()
                .map(Line::from)
                .collect::<Vec<_>>(),
        ),
        None => Paragraph::new("-").style(theme.placeholder),
    };
    frame.render_widget(paragraph, area);
}
