//! Mock search service for testing

use super::error::{Result, ServiceError};
use super::traits::SearchService;
use super::types::{ResultItem, SearchOptions, SearchScope};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError};
use tokio::time::{Duration, Instant};

/// A call the mock received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Query text exactly as passed in
    pub query: String,
    /// Scope from the options
    pub scope: SearchScope,
    /// When the call started
    pub at: Instant,
}

/// Mock search service that returns scripted responses
///
/// Every call is recorded so tests can assert on how often, when, and with
/// what arguments the service was reached.
#[derive(Debug)]
pub struct MockSearchService {
    /// Response for queries without a specific script
    default_response: Result<Vec<ResultItem>>,
    /// Per-query responses
    responses: HashMap<String, Result<Vec<ResultItem>>>,
    /// Delay applied to every call
    latency: Duration,
    /// Per-query delays, overriding `latency`
    latencies: HashMap<String, Duration>,
    /// Queries that panic instead of answering
    panics: HashSet<String>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockSearchService {
    /// Mock that returns `items` for every query
    #[must_use]
    pub fn returning(items: Vec<ResultItem>) -> Self {
        Self {
            default_response: Ok(items),
            responses: HashMap::new(),
            latency: Duration::ZERO,
            latencies: HashMap::new(),
            panics: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Mock that fails every query with `error`
    #[must_use]
    pub fn failing(error: ServiceError) -> Self {
        Self {
            default_response: Err(error),
            ..Self::returning(Vec::new())
        }
    }

    /// Delay every response
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Script the response for one query
    #[must_use]
    pub fn with_response_for(
        mut self,
        query: impl Into<String>,
        response: Result<Vec<ResultItem>>,
    ) -> Self {
        self.responses.insert(query.into(), response);
        self
    }

    /// Script the delay for one query
    #[must_use]
    pub fn with_latency_for(mut self, query: impl Into<String>, latency: Duration) -> Self {
        self.latencies.insert(query.into(), latency);
        self
    }

    /// Panic when `query` arrives, like a buggy backend
    #[must_use]
    pub fn with_panic_for(mut self, query: impl Into<String>) -> Self {
        self.panics.insert(query.into());
        self
    }

    /// Calls received so far
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of calls received so far
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for MockSearchService {
    fn default() -> Self {
        Self::returning(Vec::new())
    }
}

#[async_trait]
impl SearchService for MockSearchService {
    async fn search(&self, query: &str, options: SearchOptions) -> Result<Vec<ResultItem>> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedCall {
                query: query.to_string(),
                scope: options.scope,
                at: Instant::now(),
            });

        let latency = self.latencies.get(query).copied().unwrap_or(self.latency);
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        assert!(!self.panics.contains(query), "scripted panic for {query:?}");

        self.responses
            .get(query)
            .unwrap_or(&self.default_response)
            .clone()
    }
}
