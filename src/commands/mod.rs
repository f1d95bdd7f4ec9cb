//! Command implementations
//!
//! Each command is a module with an execute function that takes the loaded
//! configuration plus parsed CLI args.

pub mod config;
pub mod query;
pub mod tui;

// Re-export execute functions for convenience
pub use config::execute as config;
pub use query::execute as query;
pub use tui::execute as tui;

use crate::catalog::CatalogSearchService;
use crate::config::ChartsearchConfig;
use crate::Result;
use tracing::debug;

/// Open the configured catalog, or the bundled sample when none is set
///
/// # Errors
///
/// Returns an error if the catalog file cannot be read or parsed.
pub fn open_catalog(config: &ChartsearchConfig) -> Result<CatalogSearchService> {
    let settings = config.catalog_settings();
    let catalog = match &config.catalog {
        Some(path) => CatalogSearchService::from_path(path, settings)?,
        None => {
            debug!("No catalog configured, using bundled sample");
            CatalogSearchService::sample(settings)?
        }
    };
    Ok(catalog)
}
