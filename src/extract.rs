//! Concept extraction contract
//!
//! Upstream services annotate each document with scored, leveled concepts.
//! An extractor keeps the concepts relevant enough (score) and specific
//! enough (level) and hands the engine a [`DocumentConceptSet`].

use crate::concept::{ConceptLabel, DocumentConceptSet};
use serde::{Deserialize, Serialize};

/// A concept annotation attached to a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredConcept {
    pub label: String,
    /// Relevance of the concept to the document, usually in `[0, 1]`
    pub score: f64,
    /// Abstraction level in the concept hierarchy, 0 being the most general
    #[serde(default)]
    pub level: u32,
}

/// A document as delivered by the bibliographic source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub concepts: Vec<ScoredConcept>,
}

/// Turns a document into the concept list used for co-occurrence analysis
pub trait ConceptExtractor {
    type Document;

    fn extract(&self, document: &Self::Document, min_score: f64, min_level: u32) -> DocumentConceptSet;

    fn extract_all(&self, documents: &[Self::Document], min_score: f64, min_level: u32) -> Vec<DocumentConceptSet> {
        documents
            .iter()
            .map(|doc| self.extract(doc, min_score, min_level))
            .collect()
    }
}

/// Keeps concepts with `score >= min_score` and `level >= min_level`.
///
/// Empty labels are dropped; labels are otherwise passed through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdExtractor;

impl ConceptExtractor for ThresholdExtractor {
    type Document = DocumentRecord;

    fn extract(&self, document: &DocumentRecord, min_score: f64, min_level: u32) -> DocumentConceptSet {
        document
            .concepts
            .iter()
            .filter(|c| !c.label.is_empty() && c.score >= min_score && c.level >= min_level)
            .map(|c| ConceptLabel::new(c.label.clone()))
            .collect()
    }
}
