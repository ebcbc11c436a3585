//! Core concept types
//!
//! Concept labels are opaque controlled-vocabulary terms. Equality is exact
//! string equality; casing and spelling are normalized upstream.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Identifier of a scientific concept (e.g. "Machine learning")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ConceptLabel(String);

impl ConceptLabel {
    pub fn new(label: impl Into<String>) -> Self {
        ConceptLabel(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ConceptLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ConceptLabel {
    fn from(s: String) -> Self {
        ConceptLabel(s)
    }
}

impl From<&str> for ConceptLabel {
    fn from(s: &str) -> Self {
        ConceptLabel(s.to_string())
    }
}

impl AsRef<str> for ConceptLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Concepts extracted from a single document, in extraction order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentConceptSet {
    labels: Vec<ConceptLabel>,
}

impl DocumentConceptSet {
    pub fn new(labels: Vec<ConceptLabel>) -> Self {
        Self { labels }
    }

    /// Labels exactly as supplied, duplicates and empty labels included
    pub fn labels(&self) -> &[ConceptLabel] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn push(&mut self, label: impl Into<ConceptLabel>) {
        self.labels.push(label.into());
    }

    /// Sorted, deduplicated, non-empty labels.
    ///
    /// This is the set a document contributes to the co-occurrence graph:
    /// a repeated concept never pairs with itself and never counts twice.
    pub fn distinct_labels(&self) -> BTreeSet<&ConceptLabel> {
        self.labels.iter().filter(|l| !l.is_empty()).collect()
    }
}

impl<L: Into<ConceptLabel>> FromIterator<L> for DocumentConceptSet {
    fn from_iter<I: IntoIterator<Item = L>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Build a vocabulary (set of distinct non-empty labels) from document concept sets
pub fn vocabulary<'a, I>(documents: I) -> BTreeSet<ConceptLabel>
where
    I: IntoIterator<Item = &'a DocumentConceptSet>,
{
    documents
        .into_iter()
        .flat_map(|doc| doc.distinct_labels())
        .cloned()
        .collect()
}
