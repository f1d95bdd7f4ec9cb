//! Tui command - interactive search screen

use super::open_catalog;
use crate::config::ChartsearchConfig;
use crate::search::{SearchController, SearchScope};
use crate::ui::{self, Theme};
use crate::{Result, output};
use std::sync::Arc;
use tracing::info;

/// Execute the tui command
///
/// Prints the id and title of every result picked during the session once
/// the terminal has been restored.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the terminal fails.
pub async fn execute(config: &ChartsearchConfig, scope: Option<SearchScope>) -> Result<()> {
    let catalog = Arc::new(open_catalog(config)?);
    let scope = scope.unwrap_or(config.default_scope);
    info!(records = catalog.len(), scope = %scope, "Starting search screen");

    let controller = SearchController::new(catalog, config.controller_settings()).with_scope(scope);
    let picked = ui::run(controller, Theme::default()).await?;

    for item in &picked {
        println!("{}", output::picked(item));
    }
    Ok(())
}
