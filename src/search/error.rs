//! Search-specific error types
//!
//! The controller only ever sees one class of failure: the
//! [`SearchService`](super::SearchService) call going wrong. Those failures
//! are caught inside the controller, logged, and turned into an empty result
//! list. They never reach the result consumer.
//!
//! # Error Types
//!
//! - **`Unavailable`**: the backend could not be reached
//! - **`Rejected`**: the backend refused the query (e.g. a scope it does not serve)
//! - **`Backend`**: anything else the backend reported

use thiserror::Error;

/// Failure surfaced by a search service call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Backend unreachable
    #[error("Search service unavailable: {0}")]
    Unavailable(String),

    /// Backend refused the query
    #[error("Search rejected: {0}")]
    Rejected(String),

    /// Backend failed while executing the query
    #[error("Search backend error: {0}")]
    Backend(String),
}

/// Result type for search service calls
pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
