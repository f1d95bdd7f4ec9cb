//! Data types shared by the search controller and its collaborators
//!
//! A [`ResultItem`] is what a [`SearchService`](super::SearchService) hands
//! back; a [`SearchScope`] narrows a query to one [`ResultKind`] or leaves it
//! open with the `ALL` wildcard.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of clinical record a search result points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultKind {
    /// A patient chart
    Patient,
    /// A visit or admission
    Encounter,
    /// A diagnosis or problem-list entry
    Condition,
    /// A prescription or administered medication
    Medication,
    /// A lab value or vital sign
    Observation,
    /// A scanned or authored clinical document
    Document,
}

impl ResultKind {
    /// Every kind, in display order
    pub const ALL: [Self; 6] = [
        Self::Patient,
        Self::Encounter,
        Self::Condition,
        Self::Medication,
        Self::Observation,
        Self::Document,
    ];

    /// Wire tag (e.g. `PATIENT`)
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Patient => "PATIENT",
            Self::Encounter => "ENCOUNTER",
            Self::Condition => "CONDITION",
            Self::Medication => "MEDICATION",
            Self::Observation => "OBSERVATION",
            Self::Document => "DOCUMENT",
        }
    }

    /// Plural label used by the scope selector
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Patient => "Patients",
            Self::Encounter => "Encounters",
            Self::Condition => "Conditions",
            Self::Medication => "Medications",
            Self::Observation => "Observations",
            Self::Document => "Documents",
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResultKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown result kind '{s}'"))
    }
}

/// Result-type filter applied to a query
///
/// Serialized as the bare tag (`"PATIENT"`) or `"ALL"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SearchScope {
    /// Wildcard: every kind
    #[default]
    All,
    /// Only results of this kind
    Only(ResultKind),
}

impl SearchScope {
    /// Tag used for the wildcard scope
    pub const ALL_TAG: &'static str = "ALL";

    /// Scope choices in the order the selector presents them
    #[must_use]
    pub fn options() -> Vec<Self> {
        std::iter::once(Self::All)
            .chain(ResultKind::ALL.into_iter().map(Self::Only))
            .collect()
    }

    /// The scope after this one, wrapping around
    #[must_use]
    pub fn next(self) -> Self {
        let options = Self::options();
        let pos = options.iter().position(|s| *s == self).unwrap_or(0);
        options[(pos + 1) % options.len()]
    }

    /// Whether an item of `kind` falls inside this scope
    #[must_use]
    pub fn admits(self, kind: ResultKind) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => only == kind,
        }
    }

    /// Short label for display
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(kind) => kind.label(),
        }
    }

    /// Wire tag (`ALL` or the kind tag)
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => Self::ALL_TAG,
            Self::Only(kind) => kind.as_str(),
        }
    }
}

impl fmt::Display for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case(Self::ALL_TAG) {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl TryFrom<String> for SearchScope {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SearchScope> for String {
    fn from(scope: SearchScope) -> Self {
        scope.as_str().to_string()
    }
}

/// Options passed alongside the query text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Result-type filter
    #[serde(rename = "type")]
    pub scope: SearchScope,
}

impl SearchOptions {
    /// Options for the given scope
    #[must_use]
    pub const fn new(scope: SearchScope) -> Self {
        Self { scope }
    }
}

/// A single search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    /// Opaque unique identifier
    pub id: String,
    /// What kind of record this is
    #[serde(rename = "type")]
    pub kind: ResultKind,
    /// Primary line (e.g. patient name)
    pub title: String,
    /// Secondary line (e.g. MRN and date of birth)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

impl ResultItem {
    /// Create a result without a subtitle
    #[must_use]
    pub fn new(id: impl Into<String>, kind: ResultKind, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            subtitle: None,
        }
    }

    /// Attach a subtitle
    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }
}
