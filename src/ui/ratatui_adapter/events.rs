//! Event handling for the ratatui TUI
//!
//! Maps crossterm keyboard and mouse events to application actions. The
//! mapping is pure; applying an action is the app's job.

use crate::search::NavKey;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

/// Edit applied to the query text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// Append a character
    Insert(char),
    /// Remove the last character
    Backspace,
    /// Remove everything
    Clear,
    /// Remove the last word
    DeleteWord,
}

/// What the app should do in response to a terminal event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Navigation key, offered to the controller first
    Nav(NavKey),
    /// Change the query
    Edit(Edit),
    /// Move to the next scope
    CycleScope,
    /// Leave the app
    Quit,
    /// Mouse button pressed
    PointerDown { column: u16, row: u16 },
    /// Mouse moved
    PointerMove { column: u16, row: u16 },
    /// Nothing to do
    None,
}

/// Map a terminal event to an action
#[must_use]
pub fn map_event(event: &Event) -> AppAction {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => map_key(*key),
        Event::Mouse(mouse) => map_mouse(*mouse),
        _ => AppAction::None,
    }
}

fn map_key(key: KeyEvent) -> AppAction {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => AppAction::Quit,

        (KeyCode::Down, _) | (KeyCode::Char('j' | 'n'), KeyModifiers::CONTROL) => {
            AppAction::Nav(NavKey::ArrowDown)
        }
        (KeyCode::Up, _) | (KeyCode::Char('k' | 'p'), KeyModifiers::CONTROL) => {
            AppAction::Nav(NavKey::ArrowUp)
        }
        (KeyCode::Enter, _) => AppAction::Nav(NavKey::Enter),
        (KeyCode::Esc, _) => AppAction::Nav(NavKey::Escape),

        (KeyCode::Tab, _) => AppAction::CycleScope,

        (KeyCode::Char('u'), KeyModifiers::CONTROL) => AppAction::Edit(Edit::Clear),
        (KeyCode::Char('w'), KeyModifiers::CONTROL) => AppAction::Edit(Edit::DeleteWord),
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => AppAction::Edit(Edit::Insert(c)),
        (KeyCode::Backspace, _) => AppAction::Edit(Edit::Backspace),

        _ => AppAction::None,
    }
}

fn map_mouse(mouse: MouseEvent) -> AppAction {
    match mouse.kind {
        MouseEventKind::Down(_) => AppAction::PointerDown {
            column: mouse.column,
            row: mouse.row,
        },
        MouseEventKind::Moved => AppAction::PointerMove {
            column: mouse.column,
            row: mouse.row,
        },
        _ => AppAction::None,
    }
}

/// Apply an edit to `query`
///
/// Returns `false` when the text did not change.
pub fn apply_edit(query: &mut String, edit: Edit) -> bool {
    match edit {
        Edit::Insert(c) => {
            query.push(c);
            true
        }
        Edit::Backspace => query.pop().is_some(),
        Edit::Clear => {
            if query.is_empty() {
                return false;
            }
            query.clear();
            true
        }
        Edit::DeleteWord => {
            if query.is_empty() {
                return false;
            }
            let trimmed_len = query.trim_end().len();
            let cut = query[..trimmed_len].rfind(' ').map_or(0, |space| space + 1);
            query.truncate(cut);
            true
        }
    }
}
