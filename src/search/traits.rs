//! Seams between the search controller and the embedding application

use super::error::Result;
use super::types::{ResultItem, SearchOptions};
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for search backends
///
/// The backend owns matching and ranking: the controller shows whatever
/// order comes back. "No results" is an empty vector, not an error.
#[async_trait]
pub trait SearchService: Send + Sync {
    /// Execute a query
    ///
    /// # Arguments
    ///
    /// * `query` - The raw query text, untrimmed
    /// * `options` - Scope filter; non-wildcard scopes are passed through as-is
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`](super::ServiceError) if the backend fails.
    async fn search(&self, query: &str, options: SearchOptions) -> Result<Vec<ResultItem>>;
}

#[async_trait]
impl<T: SearchService + ?Sized> SearchService for Arc<T> {
    async fn search(&self, query: &str, options: SearchOptions) -> Result<Vec<ResultItem>> {
        (**self).search(query, options).await
    }
}

/// Receiver for completed selections
///
/// Called exactly once per selection; never for dismissed or cancelled
/// searches. Any `FnMut(&ResultItem)` closure qualifies.
pub trait ResultConsumer: Send {
    /// Handle the selected item
    fn on_select(&mut self, item: &ResultItem);
}

impl<F> ResultConsumer for F
where
    F: FnMut(&ResultItem) + Send,
{
    fn on_select(&mut self, item: &ResultItem) {
        self(item);
    }
}
