//! Query command - one debounced search, printed as the dropdown would show it

use super::open_catalog;
use crate::config::ChartsearchConfig;
use crate::search::{Dropdown, NavKey, ResultItem, SearchController, SearchScope, SearchService};
use crate::{Result, output};
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Parameters for the query command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    /// Search text
    pub text: String,
    /// Scope override
    pub scope: Option<SearchScope>,
    /// Cursor moves before Enter
    pub pick: Option<usize>,
    /// Emit JSON
    pub json: bool,
}

/// What a query produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryReport {
    /// Text as typed
    pub query: String,
    /// Scope the search ran in
    pub scope: SearchScope,
    /// Results in service order
    pub results: Vec<ResultItem>,
    /// Selected result, when `pick` was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<ResultItem>,
    /// Placeholder text shown instead of results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Service failure behind an empty result list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Drive a controller through typing, waiting and optionally picking
///
/// Service failures surface as an empty result list, the way the dropdown
/// shows them, and are reported alongside it.
pub async fn run_query<S>(mut controller: SearchController<S>, params: &QueryParams) -> QueryReport
where
    S: SearchService + 'static,
{
    let selected = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&selected);
    controller.set_consumer(move |item: &ResultItem| {
        *sink.lock().unwrap_or_else(PoisonError::into_inner) = Some(item.clone());
    });

    if let Some(scope) = params.scope {
        controller.on_scope_change(scope);
    }
    controller.on_input_change(params.text.as_str());
    controller.settle().await;

    let error = controller.take_error().map(|err| err.to_string());
    let results = controller.results().to_vec();
    let dropdown = controller.dropdown();
    let settings = controller.settings();
    let trimmed = params.text.trim();
    let too_short = trimmed != settings.wildcard && trimmed.chars().count() < settings.min_query_len;
    let message = match &dropdown {
        Dropdown::Hidden if too_short => Dropdown::TooShort {
            min_len: settings.min_query_len,
        }
        .message(),
        other => other.message(),
    };

    if !params.json {
        for line in output::dropdown_lines(&dropdown, controller.cursor()) {
            println!("{line}");
        }
        if let Some(message) = message.as_ref().filter(|_| !dropdown.is_visible()) {
            println!("{message}");
        }
        if let Some(error) = &error {
            eprintln!("{}", output::failure(error));
        }
    }
    drop(dropdown);

    if let Some(moves) = params.pick {
        for _ in 0..moves {
            controller.on_key_down(NavKey::ArrowDown);
        }
        if !controller.on_key_down(NavKey::Enter).prevents_default() {
            debug!("Nothing to pick");
        }
    }

    let selected = selected.lock().unwrap_or_else(PoisonError::into_inner).take();
    QueryReport {
        query: params.text.clone(),
        scope: controller.scope(),
        results,
        selected,
        message,
        error,
    }
}

/// Execute the query command
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or JSON output fails.
pub async fn execute(config: &ChartsearchConfig, params: QueryParams) -> Result<()> {
    let catalog = Arc::new(open_catalog(config)?);
    let controller = SearchController::new(catalog, config.controller_settings()).with_scope(config.default_scope);

    let report = run_query(controller, &params).await;

    if params.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if let Some(item) = &report.selected {
        println!("{}", output::picked(item));
    }
    Ok(())
}
