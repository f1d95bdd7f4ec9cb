//! View state for the ratatui TUI
//!
//! Holds what the controller does not: scroll position of the dropdown,
//! where things were last drawn (for mouse hit-testing), and status messages.

use crate::search::RenderRow;
use ratatui::layout::{Position, Rect};
use std::time::{Duration, Instant};

/// Severity of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Something completed
    Success,
    /// Something failed
    Error,
    /// Informational
    Info,
}

/// A status message with timestamp for TTL-based expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    /// Message level
    pub level: MessageLevel,
    /// Message text
    pub text: String,
    /// When the message was created
    pub created_at: Instant,
}

impl StatusMessage {
    /// Create a new status message
    #[must_use]
    pub fn new(level: MessageLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            created_at: Instant::now(),
        }
    }

    /// Check if the message has expired based on TTL
    #[must_use]
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// Scroll position of the dropdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropdownState {
    /// First visible display row
    pub scroll_offset: usize,
}

impl DropdownState {
    /// Adjust scroll so that `row` is inside a viewport of `height` rows
    pub fn follow(&mut self, row: Option<usize>, height: usize) {
        let Some(row) = row else {
            return;
        };
        if height == 0 {
            return;
        }

        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + height {
            self.scroll_offset = row + 1 - height;
        }
    }

    /// Show the top of the list again
    pub const fn reset(&mut self) {
        self.scroll_offset = 0;
    }
}

/// Where the dropdown's rows were drawn last frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropdownHitArea {
    /// Inner area (inside the border)
    pub inner: Rect,
    /// Scroll offset used when drawing
    pub scroll_offset: usize,
    /// Result index per display row; `None` for headers and placeholders
    pub targets: Vec<Option<usize>>,
}

impl DropdownHitArea {
    /// Capture the targets of a set of rows
    #[must_use]
    pub fn new(inner: Rect, scroll_offset: usize, rows: &[RenderRow<'_>]) -> Self {
        Self {
            inner,
            scroll_offset,
            targets: rows.iter().map(RenderRow::index).collect(),
        }
    }

    /// Result index under a screen position
    #[must_use]
    pub fn target_at(&self, pos: Position) -> Option<usize> {
        if !self.inner.contains(pos) {
            return None;
        }
        let row = self.scroll_offset + usize::from(pos.y - self.inner.y);
        self.targets.get(row).copied().flatten()
    }
}

/// Screen regions recorded during the last render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LastLayout {
    /// The whole search component: scope selector, bar, and open dropdown
    pub component: Rect,
    /// The dropdown, when open
    pub dropdown: Option<DropdownHitArea>,
}

impl LastLayout {
    /// Whether a position falls outside the search component
    #[must_use]
    pub fn is_outside(&self, pos: Position) -> bool {
        !self.component.contains(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{ResultItem, ResultKind, group_by_kind};

    #[test]
    fn test_follow_scrolls_down_and_up() {
        let mut state = DropdownState::default();
        state.follow(Some(2), 5);
        assert_eq!(state.scroll_offset, 0);

        state.follow(Some(7), 5);
        assert_eq!(state.scroll_offset, 3);

        state.follow(Some(1), 5);
        assert_eq!(state.scroll_offset, 1);

        state.follow(None, 5);
        assert_eq!(state.scroll_offset, 1);
    }

    #[test]
    fn test_hit_area_maps_rows_to_results() {
        let results = vec![
            ResultItem::new("1", ResultKind::Patient, "Jane Doe"),
            ResultItem::new("2", ResultKind::Encounter, "ED visit"),
        ];
        let rows = group_by_kind(&results);
        let hit = DropdownHitArea::new(Rect::new(10, 5, 30, 4), 0, &rows);

        assert_eq!(hit.target_at(Position::new(12, 5)), None); // PATIENT header
        assert_eq!(hit.target_at(Position::new(12, 6)), Some(0));
        assert_eq!(hit.target_at(Position::new(12, 8)), Some(1));
        assert_eq!(hit.target_at(Position::new(2, 6)), None);
    }

    #[test]
    fn test_outside_check() {
        let layout = LastLayout {
            component: Rect::new(0, 0, 40, 3),
            dropdown: None,
        };
        assert!(!layout.is_outside(Position::new(5, 1)));
        assert!(layout.is_outside(Position::new(5, 10)));
    }

    #[test]
    fn test_message_expiry() {
        let message = StatusMessage::new(MessageLevel::Info, "hello");
        assert!(!message.is_expired(Duration::from_secs(60)));
    }
}
