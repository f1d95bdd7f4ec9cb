//! Terminal user interface
//!
//! The interactive search screen lives in [`ratatui_adapter`]; errors it can
//! raise are in [`error`].

pub mod error;
pub mod ratatui_adapter;

pub use error::{Result, UiError};
pub use ratatui_adapter::{SearchApp, Theme, run};
