//! Ratatui widgets for the search TUI
//!
//! Custom widgets for rendering the search screen.

mod help_bar;
mod result_list;
mod scope_selector;
mod search_bar;
mod status_bar;

pub use help_bar::{HelpBar, KeyHint};
pub use result_list::ResultList;
pub use scope_selector::ScopeSelector;
pub use search_bar::SearchBar;
pub use status_bar::StatusBar;
