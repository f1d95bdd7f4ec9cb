//! Chartsearch - debounced typeahead search over clinical records
//!
//! This library provides a front-end agnostic search controller (debounce,
//! scope filter, keyboard cursor, grouped dropdown), an in-memory catalog
//! backend, and a terminal UI that drives both.

use thiserror::Error;

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod output;
pub mod search;
pub mod ui;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum ChartsearchError {
    /// Search service error
    #[error("Search service error: {0}")]
    ServiceError(#[from] search::ServiceError),
    /// Catalog error
    #[error("Catalog error: {0}")]
    CatalogError(#[from] catalog::CatalogError),
    /// UI error
    #[error("UI error: {0}")]
    UiError(#[from] ui::UiError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// JSON output error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Logging could not be initialized
    #[error("Logging error: {0}")]
    Logging(String),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for crate-level operations
pub type Result<T> = std::result::Result<T, ChartsearchError>;
