//! In-memory search service over a JSON catalog
//!
//! Stands in for a real records backend so the controller can be driven
//! end to end. Matching uses nucleo's fuzzy scorer against each record's
//! title, subtitle and id; results come back grouped by kind and, within a
//! kind, best match first.

pub mod error;

pub use error::CatalogError;

use crate::search::error::Result as ServiceResult;
use crate::search::{ResultItem, ResultKind, SearchOptions, SearchScope, SearchService};
use async_trait::async_trait;
use nucleo::pattern::{CaseMatching, Normalization, Pattern};
use nucleo::{Config, Matcher, Utf32Str};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tokio::time::Duration;
use tracing::{debug, info};

/// Catalog bundled with the binary
const SAMPLE_CATALOG: &str = include_str!("../../data/sample_catalog.json");

/// Behaviour knobs for the catalog service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSettings {
    /// Query that lists every admitted record
    pub wildcard: String,
    /// Cap on returned results
    pub max_results: usize,
    /// Artificial delay per call, to make debouncing visible
    pub latency: Duration,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            wildcard: "*".to_string(),
            max_results: 50,
            latency: Duration::ZERO,
        }
    }
}

/// Search service backed by a fixed list of records
#[derive(Debug, Clone)]
pub struct CatalogSearchService {
    items: Vec<ResultItem>,
    settings: CatalogSettings,
}

impl CatalogSearchService {
    /// Build a catalog from records
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two records share an id.
    pub fn new(items: Vec<ResultItem>, settings: CatalogSettings) -> error::Result<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(CatalogError::DuplicateId(item.id.clone()));
            }
        }

        Ok(Self { items, settings })
    }

    /// Parse a catalog from a JSON array
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or ids repeat.
    pub fn from_json(json: &str, settings: CatalogSettings) -> error::Result<Self> {
        let items: Vec<ResultItem> = serde_json::from_str(json)?;
        Self::new(items, settings)
    }

    /// Load a catalog file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: &Path, settings: CatalogSettings) -> error::Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&json, settings)?;
        info!(path = %path.display(), records = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// The bundled sample catalog
    ///
    /// # Errors
    ///
    /// Returns an error only if the bundled file is malformed.
    pub fn sample(settings: CatalogSettings) -> error::Result<Self> {
        Self::from_json(SAMPLE_CATALOG, settings)
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Rank records for a query without any artificial latency
    #[must_use]
    pub fn rank(&self, query: &str, scope: SearchScope) -> Vec<ResultItem> {
        let admitted = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| scope.admits(item.kind));

        let trimmed = query.trim();
        // (kind, score, original position)
        let mut scored: Vec<(ResultKind, u32, usize)> = if trimmed == self.settings.wildcard {
            admitted.map(|(idx, item)| (item.kind, 0, idx)).collect()
        } else {
            let pattern = Pattern::parse(trimmed, CaseMatching::Smart, Normalization::Smart);
            let mut matcher = Matcher::new(Config::DEFAULT);
            let mut buf = Vec::new();

            admitted
                .filter_map(|(idx, item)| {
                    let haystack = Self::haystack(item);
                    pattern
                        .score(Utf32Str::new(&haystack, &mut buf), &mut matcher)
                        .map(|score| (item.kind, score, idx))
                })
                .collect()
        };

        scored.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)).then(a.2.cmp(&b.2)));
        scored
            .into_iter()
            .take(self.settings.max_results)
            .map(|(_, _, idx)| self.items[idx].clone())
            .collect()
    }

    /// Text a record is matched against
    fn haystack(item: &ResultItem) -> String {
        match &item.subtitle {
            Some(subtitle) => format!("{} {} {}", item.title, subtitle, item.id),
            None => format!("{} {}", item.title, item.id),
        }
    }
}

#[async_trait]
impl SearchService for CatalogSearchService {
    async fn search(&self, query: &str, options: SearchOptions) -> ServiceResult<Vec<ResultItem>> {
        if !self.settings.latency.is_zero() {
            tokio::time::sleep(self.settings.latency).await;
        }

        let results = self.rank(query, options.scope);
        debug!(query, scope = %options.scope, hits = results.len(), "Catalog search");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn catalog() -> CatalogSearchService {
        CatalogSearchService::sample(CatalogSettings::default()).unwrap()
    }

    #[test]
    fn test_sample_catalog_loads() {
        let catalog = catalog();
        assert!(!catalog.is_empty());
        assert!(catalog.len() > 20);
    }

    #[test]
    fn test_wildcard_lists_everything_grouped() {
        let catalog = catalog();
        let results = catalog.rank("*", SearchScope::All);
        assert_eq!(results.len(), catalog.len());

        let kinds: Vec<ResultKind> = results.iter().map(|r| r.kind).collect();
        let mut sorted = kinds.clone();
        sorted.sort();
        assert_eq!(kinds, sorted);
    }

    #[test]
    fn test_scope_filters_kind() {
        let results = catalog().rank("*", SearchScope::Only(ResultKind::Patient));
        assert!(!results.is_empty());
        assert!(results.iter().all(|r| r.kind == ResultKind::Patient));
    }

    #[test]
    fn test_fuzzy_match_finds_patient() {
        let results = catalog().rank("jane", SearchScope::Only(ResultKind::Patient));
        assert_eq!(results.first().map(|r| r.id.as_str()), Some("pat-1001"));
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        assert!(catalog().rank("zzzzqqq", SearchScope::All).is_empty());
    }

    #[test]
    fn test_max_results_caps_output() {
        let settings = CatalogSettings {
            max_results: 2,
            ..CatalogSettings::default()
        };
        let catalog = CatalogSearchService::sample(settings).unwrap();
        assert_eq!(catalog.rank("*", SearchScope::All).len(), 2);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let items = vec![
            ResultItem::new("x", ResultKind::Patient, "A"),
            ResultItem::new("x", ResultKind::Document, "B"),
        ];
        let err = CatalogSearchService::new(items, CatalogSettings::default()).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "x"));
    }

    #[test]
    fn test_from_path_and_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id":"1","type":"PATIENT","title":"Jane Doe"}}]"#).unwrap();
        let catalog = CatalogSearchService::from_path(file.path(), CatalogSettings::default()).unwrap();
        assert_eq!(catalog.len(), 1);

        let err = CatalogSearchService::from_json("{not json", CatalogSettings::default()).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));

        let err = CatalogSearchService::from_path(Path::new("/nonexistent/catalog.json"), CatalogSettings::default())
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/catalog.json"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_applies_latency() {
        let settings = CatalogSettings {
            latency: Duration::from_millis(250),
            ..CatalogSettings::default()
        };
        let catalog = CatalogSearchService::sample(settings).unwrap();
        let start = tokio::time::Instant::now();

        let results = catalog
            .search("doe", SearchOptions::new(SearchScope::All))
            .await
            .unwrap();
        assert!(!results.is_empty());
        assert!(start.elapsed() >= Duration::from_millis(250));
    }
}
