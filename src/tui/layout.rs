// SPDX-License-Identifier: MIT
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rows taken by a collapsed panel: just its border and title.
const COLLAPSED_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Info,
    Graph,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelHeight {
    /// Exactly this many rows, borders included.
    Fixed(u16),
    /// At least this many rows; takes whatever is left.
    Fill(u16),
}

pub struct PanelState {
    pub name: &'static str,
    pub kind: PanelKind,
    pub collapsed: bool,
    pub height: PanelHeight,
}

impl PanelState {
    fn constraint(&self) -> Constraint {
        if self.collapsed {
            return Constraint::Length(COLLAPSED_HEIGHT);
        }
        match self.height {
            PanelHeight::Fixed(rows) => Constraint::Length(rows),
            PanelHeight::Fill(rows) => Constraint::Min(rows),
        }
    }
}

pub fn build_layout(panels: &[PanelState], area: Rect) -> Vec<Rect> {
    let constraints: Vec<Constraint> = panels.iter().map(PanelState::constraint).collect();

    Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area)
        .to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panels() -> Vec<PanelState> {
        vec![
            PanelState {
                name: "Info",
                kind: PanelKind::Info,
                collapsed: false,
                height: PanelHeight::Fixed(8),
            },
            PanelState {
                name: "Graph",
                kind: PanelKind::Graph,
                collapsed: false,
                height: PanelHeight::Fill(10),
            },
        ]
    }

    #[test]
    fn fill_panel_takes_the_rest() {
        let areas = build_layout(&panels(), Rect::new(0, 0, 80, 40));
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].height, 8);
        assert_eq!(areas[1].height, 32);
        assert_eq!(areas[1].y, 8);
    }

    #[test]
    fn collapsed_panel_keeps_its_title_row() {
        let mut panels = panels();
        panels[0].collapsed = true;
        let areas = build_layout(&panels, Rect::new(0, 0, 80, 40));
        assert_eq!(areas[0].height, COLLAPSED_HEIGHT);
        assert_eq!(areas[1].height, 40 - COLLAPSED_HEIGHT);
    }
}
