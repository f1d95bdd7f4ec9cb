//! Output formatting for CLI display
//!
//! Renders the dropdown state as plain, optionally colored, text for the
//! one-shot `query` command.

use crate::search::{Dropdown, RenderRow, ResultItem};
use colored::Colorize;

/// Format a group header
#[must_use]
pub fn header(tag: &str) -> String {
    tag.bold().cyan().to_string()
}

/// Format a result row, marking the highlighted one
#[must_use]
pub fn result_line(item: &ResultItem, highlighted: bool) -> String {
    let marker = if highlighted { ">".yellow().to_string() } else { " ".to_string() };
    let title = if highlighted {
        item.title.bold().to_string()
    } else {
        item.title.clone()
    };

    match &item.subtitle {
        Some(subtitle) => format!("{marker} {title}  {}  {}", subtitle.dimmed(), item.id.dimmed()),
        None => format!("{marker} {title}  {}", item.id.dimmed()),
    }
}

/// Format the whole dropdown, one line per display row
#[must_use]
pub fn dropdown_lines(dropdown: &Dropdown<'_>, cursor: Option<usize>) -> Vec<String> {
    match dropdown {
        Dropdown::Hidden => Vec::new(),
        Dropdown::Results(rows) => rows
            .iter()
            .map(|row| match row {
                RenderRow::Header(kind) => header(kind.as_str()),
                RenderRow::Item { index, item } => result_line(item, cursor == Some(*index)),
            })
            .collect(),
        placeholder => placeholder
            .message()
            .map(|message| message.dimmed().to_string())
            .into_iter()
            .collect(),
    }
}

/// Format a selection confirmation
#[must_use]
pub fn picked(item: &ResultItem) -> String {
    format!("{} {} ({}, {})", "Selected".green(), item.title, item.kind, item.id)
}

/// Format a search failure
#[must_use]
pub fn failure(error: &str) -> String {
    format!("{} {error}", "Search failed:".red())
}
