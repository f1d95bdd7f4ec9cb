//! Testing utilities for chartsearch
//!
//! Canned records and a `TestCatalog` wrapper that writes a catalog file into
//! a temporary directory.
//!
//! Only available when compiled with `cfg(test)`.

use crate::search::{ResultItem, ResultKind};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A small mixed set of records, already grouped by kind
#[must_use]
pub fn sample_items() -> Vec<ResultItem> {
    vec![
        ResultItem::new("pat-1", ResultKind::Patient, "Jane Doe").with_subtitle("MRN 100-234"),
        ResultItem::new("pat-2", ResultKind::Patient, "John Doe").with_subtitle("MRN 100-871"),
        ResultItem::new("enc-1", ResultKind::Encounter, "ED visit, chest pain"),
        ResultItem::new("med-1", ResultKind::Medication, "Metformin 500 mg"),
    ]
}

/// Catalog file in a temporary directory, removed on drop
///
/// # Examples
/// ```ignore
/// let catalog = TestCatalog::new(&sample_items());
/// let service = CatalogSearchService::from_path(catalog.path(), CatalogSettings::default())?;
/// ```
pub struct TestCatalog {
    _dir: TempDir,
    path: PathBuf,
}

impl TestCatalog {
    /// Write `items` as a JSON catalog
    ///
    /// # Panics
    /// Panics if the temporary directory or file cannot be created.
    #[must_use]
    pub fn new(items: &[ResultItem]) -> Self {
        let json = serde_json::to_string_pretty(items).expect("Failed to serialize test catalog");
        Self::with_content(&json)
    }

    /// Write raw text as the catalog file
    ///
    /// # Panics
    /// Panics if the temporary directory or file cannot be created.
    #[must_use]
    pub fn with_content(content: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("catalog.json");
        fs::write(&path, content).expect("Failed to write test catalog");
        Self { _dir: dir, path }
    }

    /// Path to the catalog file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_file_round_trips() {
        let catalog = TestCatalog::new(&sample_items());
        let text = fs::read_to_string(catalog.path()).unwrap();
        let items: Vec<ResultItem> = serde_json::from_str(&text).unwrap();
        assert_eq!(items, sample_items());
    }

    #[test]
    fn test_catalog_removed_on_drop() {
        let path = {
            let catalog = TestCatalog::with_content("[]");
            catalog.path().to_path_buf()
        };
        assert!(!path.exists());
    }
}
