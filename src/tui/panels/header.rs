// SPDX-License-Identifier: MIT
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::theme::Theme;

/// What the status bar shows about the current selection.
#[derive(Debug, Default)]
pub struct HeaderInfo<'a> {
    /// File name, zero-based position and number of files.
    pub file: Option<(&'a str, usize, usize)>,
    pub test: Option<&'a str>,
    pub view: Option<String>,
    pub skipped: usize,
    /// Shown after the selection, e.g. a failed reload.
    pub notice: Option<&'a str>,
}

#[must_use]
pub fn header_text(info: &HeaderInfo<'_>) -> String {
    let version = env!("CARGO_PKG_VERSION");
    let mut text = format!("benchview v{version}");

    match info.file {
        Some((name, pos, count)) => {
            text.push_str(&format!(" | {name} ({}/{count})", pos + 1));
        }
        None => text.push_str(" | no results"),
    }
    if let Some(test) = info.test {
        text.push_str(&format!(" | {test}"));
    }
    if let Some(ref view) = info.view {
        text.push_str(&format!(" | {view}"));
    }
    text
}

pub fn render(frame: &mut ratatui::Frame, area: Rect, info: &HeaderInfo<'_>, theme: &Theme) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    let mut spans = vec![Span::styled(header_text(info), theme.status_bar)];
    if info.skipped > 0 {
        spans.push(Span::styled(
            format!(" | {} file(s) skipped ", info.skipped),
            theme.warning,
        ));
    }
    if let Some(notice) = info.notice {
        spans.push(Span::styled(format!(" {notice} "), theme.warning));
    }
    let used: usize = spans.iter().map(Span::width).sum();
    let fill = (area.width as usize).saturating_sub(used);
    spans.push(Span::styled(" ".repeat(fill), theme.status_bar));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_header() {
        let info = HeaderInfo {
            file: Some(("island.perf", 1, 3)),
            test: Some("Island"),
            view: Some("Run 2".to_string()),
            skipped: 1,
            notice: None,
        };
        let text = header_text(&info);
        assert!(text.ends_with("| island.perf (2/3) | Island | Run 2"));
    }

    #[test]
    fn empty_header() {
        let text = header_text(&HeaderInfo::default());
        assert!(text.ends_with("| no results"));
    }
}
