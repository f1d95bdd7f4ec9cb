//! Ratatui front end for the search controller
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 SearchApp                    │
//! │   (owns the controller, renders, hit-tests)  │
//! └──────────────────────┬───────────────────────┘
//!                        │
//!        ┌───────────────┼───────────────┐
//!        ▼               ▼               ▼
//! ┌─────────────┐ ┌─────────────┐ ┌─────────────┐
//! │ Controller  │ │   Ratatui   │ │  Crossterm  │
//! │  (tokio)    │ │  (widgets)  │ │  (events)   │
//! └─────────────┘ └─────────────┘ └─────────────┘
//! ```

mod app;
mod events;
mod state;
mod theme;
pub mod widgets;

pub use app::{SearchApp, run};
pub use events::{AppAction, Edit, apply_edit, map_event};
pub use state::{DropdownState, MessageLevel, StatusMessage};
pub use theme::Theme;
