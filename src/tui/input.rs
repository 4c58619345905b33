// SPDX-License-Identifier: MIT
use crossterm::event::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    PanelUp,
    PanelDown,
    ToggleCollapse,
    NextFile,
    PrevFile,
    NextTest,
    PrevTest,
    NextRun,
    PrevRun,
    ToggleCursor,
    CursorLeft,
    CursorRight,
    Reload,
    None,
}

/// Left/Right step through runs, or move the frame cursor while it is shown.
pub fn handle_key(key: KeyCode, cursor_active: bool) -> Action {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Up => Action::PanelUp,
        KeyCode::Down => Action::PanelDown,
        KeyCode::Enter | KeyCode::Char(' ') => Action::ToggleCollapse,
        KeyCode::Char('f') | KeyCode::PageDown => Action::NextFile,
        KeyCode::Char('F') | KeyCode::PageUp => Action::PrevFile,
        KeyCode::Char('t') | KeyCode::Tab => Action::NextTest,
        KeyCode::Char('T') | KeyCode::BackTab => Action::PrevTest,
        KeyCode::Right if cursor_active => Action::CursorRight,
        KeyCode::Left if cursor_active => Action::CursorLeft,
        KeyCode::Right | KeyCode::Char(']') => Action::NextRun,
        KeyCode::Left | KeyCode::Char('[') => Action::PrevRun,
        KeyCode::Char('c') => Action::ToggleCursor,
        KeyCode::Char('r') => Action::Reload,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_switch_runs_without_cursor() {
        assert_eq!(handle_key(KeyCode::Right, false), Action::NextRun);
        assert_eq!(handle_key(KeyCode::Left, false), Action::PrevRun);
    }

    #[test]
    fn arrows_move_cursor_when_shown() {
        assert_eq!(handle_key(KeyCode::Right, true), Action::CursorRight);
        assert_eq!(handle_key(KeyCode::Left, true), Action::CursorLeft);
        assert_eq!(handle_key(KeyCode::Char(']'), true), Action::NextRun);
    }

    #[test]
    fn selection_keys() {
        assert_eq!(handle_key(KeyCode::Char('f'), false), Action::NextFile);
        assert_eq!(handle_key(KeyCode::Char('F'), false), Action::PrevFile);
        assert_eq!(handle_key(KeyCode::Tab, false), Action::NextTest);
        assert_eq!(handle_key(KeyCode::Char('r'), false), Action::Reload);
        assert_eq!(handle_key(KeyCode::Esc, false), Action::Quit);
        assert_eq!(handle_key(KeyCode::Char('x'), false), Action::None);
    }
}
