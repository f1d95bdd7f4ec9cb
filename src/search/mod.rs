//! Typeahead search core
//!
//! The [`SearchController`] turns keystrokes into debounced calls against a
//! [`SearchService`], keeps the ordered result list, and drives a keyboard
//! cursor over it. Everything here is front-end agnostic: the terminal UI in
//! [`crate::ui`] and the one-shot `query` command both drive the same
//! controller.

pub mod controller;
pub mod debounce;
pub mod error;
pub mod grouping;
pub mod mock;
pub mod traits;
pub mod types;

pub use controller::{ControllerSettings, KeyOutcome, NavKey, SearchController, SearchPhase};
pub use error::ServiceError;
pub use grouping::{Dropdown, RenderRow, group_by_kind};
pub use traits::{ResultConsumer, SearchService};
pub use types::{ResultItem, ResultKind, SearchOptions, SearchScope};
