//! Display shaping for the results dropdown
//!
//! Grouping is derived from the ordered result list: a header goes in front
//! of each run of same-kind items. The underlying order is never changed, so
//! a service that interleaves kinds gets one header per run, not per kind.

use super::types::{ResultItem, ResultKind};

/// One line of the rendered dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderRow<'a> {
    /// Group header for the run of items that follows
    Header(ResultKind),
    /// A result, with its position in the result list
    Item {
        /// Index into the controller's result list (the cursor space)
        index: usize,
        /// The result itself
        item: &'a ResultItem,
    },
}

impl RenderRow<'_> {
    /// Result index, if this row is an item
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        match self {
            Self::Header(_) => None,
            Self::Item { index, .. } => Some(*index),
        }
    }
}

/// Insert a header before each maximal run of same-kind results
#[must_use]
pub fn group_by_kind(results: &[ResultItem]) -> Vec<RenderRow<'_>> {
    let mut rows = Vec::with_capacity(results.len() + 1);
    let mut current: Option<ResultKind> = None;

    for (index, item) in results.iter().enumerate() {
        if current != Some(item.kind) {
            rows.push(RenderRow::Header(item.kind));
            current = Some(item.kind);
        }
        rows.push(RenderRow::Item { index, item });
    }

    rows
}

/// Display row holding the result at `index`
#[must_use]
pub fn row_of(rows: &[RenderRow<'_>], index: usize) -> Option<usize> {
    rows.iter().position(|row| row.index() == Some(index))
}

/// What the dropdown shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dropdown<'a> {
    /// Not searching: nothing rendered
    Hidden,
    /// Grouped results
    Results(Vec<RenderRow<'a>>),
    /// Query long enough but nothing matched
    NoResults,
    /// Query below the minimum length
    TooShort {
        /// Minimum query length in characters
        min_len: usize,
    },
}

impl Dropdown<'_> {
    /// Whether anything is rendered
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    /// Placeholder text for the empty states
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Self::NoResults => Some("No results found".to_string()),
            Self::TooShort { min_len } => {
                Some(format!("Please enter at least {min_len} characters to search"))
            }
            Self::Hidden | Self::Results(_) => None,
        }
    }
}
