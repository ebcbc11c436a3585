//! Co-occurrence graph construction
//!
//! Every unordered pair of distinct concepts found in the same document adds
//! 1 to the weight of the edge between them. Weak edges and the isolated
//! nodes they leave behind are pruned afterwards.

use super::cooccurrence::CooccurrenceGraph;
use crate::concept::{ConceptLabel, DocumentConceptSet};
use crate::error::{AnalysisError, AnalysisResult};
use rustc_hash::FxHashMap;
use tracing::debug;

/// Builder for [`CooccurrenceGraph`]
#[derive(Debug, Clone)]
pub struct CooccurrenceGraphBuilder {
    /// Edges with fewer co-occurrences are removed
    min_cooccurrence: u32,
    /// Upper bound on the number of concepts in the pruned graph
    max_nodes: Option<usize>,
}

impl Default for CooccurrenceGraphBuilder {
    fn default() -> Self {
        Self {
            min_cooccurrence: 1,
            max_nodes: None,
        }
    }
}

impl CooccurrenceGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_cooccurrence(mut self, min_cooccurrence: u32) -> Self {
        self.min_cooccurrence = min_cooccurrence;
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: Option<usize>) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    pub fn min_cooccurrence(&self) -> u32 {
        self.min_cooccurrence
    }

    /// Build a fresh graph from per-document concept lists.
    ///
    /// Fails only when the pruned graph exceeds the configured node limit.
    pub fn build(&self, documents: &[DocumentConceptSet]) -> AnalysisResult<CooccurrenceGraph> {
        let pairs = accumulate_pairs(documents);
        debug!(
            "Accumulated {} concept pairs from {} documents",
            pairs.len(),
            documents.len()
        );

        let graph = CooccurrenceGraph::from_weighted_pairs(
            pairs.into_iter().map(|((a, b), w)| (a, b, w)),
            self.min_cooccurrence,
        );
        debug!(
            "Co-occurrence graph: {} nodes, {} edges (min_cooccurrence = {})",
            graph.node_count(),
            graph.edge_count(),
            self.min_cooccurrence
        );

        if let Some(limit) = self.max_nodes {
            if graph.node_count() > limit {
                return Err(AnalysisError::GraphTooLarge {
                    nodes: graph.node_count(),
                    limit,
                });
            }
        }

        Ok(graph)
    }
}

/// Build a co-occurrence graph without a node limit
pub fn build_cooccurrence_graph(
    documents: &[DocumentConceptSet],
    min_cooccurrence: u32,
) -> CooccurrenceGraph {
    let pairs = accumulate_pairs(documents);
    CooccurrenceGraph::from_weighted_pairs(
        pairs.into_iter().map(|((a, b), w)| (a, b, w)),
        min_cooccurrence,
    )
}

/// Count, per canonical `(lo, hi)` concept pair, the documents containing both
fn accumulate_pairs(
    documents: &[DocumentConceptSet],
) -> FxHashMap<(&ConceptLabel, &ConceptLabel), u32> {
    let mut pairs: FxHashMap<(&ConceptLabel, &ConceptLabel), u32> = FxHashMap::default();

    for doc in documents {
        // Sorted and deduplicated, so (labels[i], labels[j]) with i < j is canonical
        let labels: Vec<&ConceptLabel> = doc.distinct_labels().into_iter().collect();
        for (i, &a) in labels.iter().enumerate() {
            for &b in &labels[i + 1..] {
                *pairs.entry((a, b)).or_insert(0) += 1;
            }
        }
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(raw: &[&[&str]]) -> Vec<DocumentConceptSet> {
        raw.iter().map(|d| d.iter().copied().collect()).collect()
    }

    fn label(s: &str) -> ConceptLabel {
        ConceptLabel::new(s)
    }

    #[test]
    fn test_build_counts_documents() {
        let documents = docs(&[&["A", "B"], &["A", "B", "C"], &["B", "C"]]);
        let graph = CooccurrenceGraphBuilder::new().build(&documents).unwrap();

        assert_eq!(graph.weight(&label("A"), &label("B")), Some(2));
        assert_eq!(graph.weight(&label("A"), &label("C")), Some(1));
        assert_eq!(graph.weight(&label("B"), &label("C")), Some(2));
    }

    #[test]
    fn test_duplicates_do_not_double_count() {
        let documents = docs(&[&["A", "B", "A", "B"], &["A", "A"]]);
        let graph = build_cooccurrence_graph(&documents, 1);

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.weight(&label("A"), &label("B")), Some(1));
        assert_eq!(graph.weight(&label("A"), &label("A")), None);
    }

    #[test]
    fn test_empty_labels_are_skipped() {
        let documents = docs(&[&["", "A"], &["", ""]]);
        let graph = build_cooccurrence_graph(&documents, 1);
        assert!(graph.is_empty());
    }

    #[test]
    fn test_zero_threshold_behaves_like_one() {
        let documents = docs(&[&["A", "B"], &["C"]]);
        let zero = build_cooccurrence_graph(&documents, 0);
        let one = build_cooccurrence_graph(&documents, 1);
        assert_eq!(zero, one);
        assert_eq!(zero.node_count(), 2);
    }

    #[test]
    fn test_node_limit() {
        let documents = docs(&[&["A", "B", "C", "D"]]);
        let builder = CooccurrenceGraphBuilder::new().with_max_nodes(Some(3));

        let err = builder.build(&documents).unwrap_err();
        assert!(matches!(err, AnalysisError::GraphTooLarge { nodes: 4, limit: 3 }));

        // The limit applies after pruning
        let documents = docs(&[&["A", "B", "C", "D"], &["A", "B"]]);
        let graph = builder.with_min_cooccurrence(2).build(&documents).unwrap();
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_document_order_does_not_matter() {
        let forward = docs(&[&["A", "B", "C"], &["C", "D"], &["D", "A", "B"]]);
        let mut backward = forward.clone();
        backward.reverse();

        let g1 = build_cooccurrence_graph(&forward, 1);
        let g2 = build_cooccurrence_graph(&backward, 1);
        assert_eq!(g1, g2);
        assert_eq!(g1.content_hash(), g2.content_hash());
    }
}
