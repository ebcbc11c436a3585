//! Set comparison between two concept vocabularies or two graphs
//!
//! Used to compare historical snapshots (e.g. two publication periods) of
//! the same research area.

use crate::concept::ConceptLabel;
use crate::graph::CooccurrenceGraph;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Overlap of two concept vocabularies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonMetrics {
    pub jaccard: f64,
    pub common: Vec<ConceptLabel>,
    pub exclusive_to_1: Vec<ConceptLabel>,
    pub exclusive_to_2: Vec<ConceptLabel>,
    /// Vocabulary sizes, not document counts
    pub size_1: usize,
    pub size_2: usize,
}

/// An undirected concept pair, `source < target`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConceptPair {
    pub source: ConceptLabel,
    pub target: ConceptLabel,
}

/// Overlap of the edge sets of two co-occurrence graphs (weights ignored)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeComparisonMetrics {
    pub jaccard: f64,
    pub common: Vec<ConceptPair>,
    pub exclusive_to_1: Vec<ConceptPair>,
    pub exclusive_to_2: Vec<ConceptPair>,
    pub size_1: usize,
    pub size_2: usize,
}

/// `|A ∩ B| / |A ∪ B|`, 0 when both sets are empty
pub fn jaccard<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// Compare two vocabularies. All lists are sorted ascending.
pub fn compare(vocabulary_1: &BTreeSet<ConceptLabel>, vocabulary_2: &BTreeSet<ConceptLabel>) -> ComparisonMetrics {
    ComparisonMetrics {
        jaccard: jaccard(vocabulary_1, vocabulary_2),
        common: vocabulary_1.intersection(vocabulary_2).cloned().collect(),
        exclusive_to_1: vocabulary_1.difference(vocabulary_2).cloned().collect(),
        exclusive_to_2: vocabulary_2.difference(vocabulary_1).cloned().collect(),
        size_1: vocabulary_1.len(),
        size_2: vocabulary_2.len(),
    }
}

fn edge_set(graph: &CooccurrenceGraph) -> BTreeSet<ConceptPair> {
    graph
        .edges()
        .map(|(source, target, _)| ConceptPair {
            source: source.clone(),
            target: target.clone(),
        })
        .collect()
}

/// Compare the relationships present in two graphs
pub fn compare_edges(graph_1: &CooccurrenceGraph, graph_2: &CooccurrenceGraph) -> EdgeComparisonMetrics {
    let edges_1 = edge_set(graph_1);
    let edges_2 = edge_set(graph_2);

    EdgeComparisonMetrics {
        jaccard: jaccard(&edges_1, &edges_2),
        common: edges_1.intersection(&edges_2).cloned().collect(),
        exclusive_to_1: edges_1.difference(&edges_2).cloned().collect(),
        exclusive_to_2: edges_2.difference(&edges_1).cloned().collect(),
        size_1: edges_1.len(),
        size_2: edges_2.len(),
    }
}
