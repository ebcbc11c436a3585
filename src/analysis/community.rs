//! Community detection over co-occurrence graphs
//!
//! The partitioning algorithm sits behind [`CommunityDetectionAlgorithm`] so
//! greedy modularity, label propagation or any other method can be swapped
//! in. [`CommunityDetector`] adds what the thematic map needs on top: a
//! stable cluster order, ordinal names and the minimum-size filter.

use crate::algo::{build_view, greedy_modularity, label_propagation, modularity, resolve_ids, resolve_labels};
use crate::concept::ConceptLabel;
use crate::error::{AnalysisError, AnalysisResult};
use crate::graph::CooccurrenceGraph;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Default minimum number of concepts in a retained cluster
pub const DEFAULT_MIN_CLUSTER_SIZE: usize = 3;

/// A partitioning strategy.
///
/// Implementations must return a true partition: every node of the graph in
/// exactly one set, no empty sets. For a fixed graph the result must be
/// deterministic.
pub trait CommunityDetectionAlgorithm: Send + Sync {
    /// Short name used in logs and reports
    fn name(&self) -> &'static str;

    fn partition(&self, graph: &CooccurrenceGraph) -> Vec<BTreeSet<ConceptLabel>>;
}

/// Clauset-Newman-Moore greedy modularity maximization
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyModularity;

impl CommunityDetectionAlgorithm for GreedyModularity {
    fn name(&self) -> &'static str {
        "greedy_modularity"
    }

    fn partition(&self, graph: &CooccurrenceGraph) -> Vec<BTreeSet<ConceptLabel>> {
        let view = build_view(graph);
        greedy_modularity(&view)
            .communities
            .iter()
            .map(|c| resolve_labels(graph, c))
            .collect()
    }
}

/// Weighted label propagation with a seeded visiting order
#[derive(Debug, Clone, Copy)]
pub struct LabelPropagation {
    pub max_iterations: usize,
    pub seed: u64,
}

impl Default for LabelPropagation {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            seed: 42,
        }
    }
}

impl CommunityDetectionAlgorithm for LabelPropagation {
    fn name(&self) -> &'static str {
        "label_propagation"
    }

    fn partition(&self, graph: &CooccurrenceGraph) -> Vec<BTreeSet<ConceptLabel>> {
        let view = build_view(graph);
        label_propagation(&view, self.max_iterations, self.seed)
            .communities
            .iter()
            .map(|c| resolve_labels(graph, c))
            .collect()
    }
}

/// Newman modularity of a labelled partition of `graph`
pub fn partition_modularity(graph: &CooccurrenceGraph, communities: &[BTreeSet<ConceptLabel>]) -> f64 {
    let view = build_view(graph);
    modularity(&view, &resolve_ids(graph, communities))
}

/// A group of concepts detected as one community
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    /// Ordinal label, "Cluster 1" for the largest retained cluster
    pub name: String,
    /// Member concepts in ascending order
    pub concepts: Vec<ConceptLabel>,
}

impl Cluster {
    pub fn new(name: impl Into<String>, concepts: impl IntoIterator<Item = ConceptLabel>) -> Self {
        let concepts: BTreeSet<ConceptLabel> = concepts.into_iter().collect();
        Self {
            name: name.into(),
            concepts: concepts.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    pub fn contains(&self, label: &ConceptLabel) -> bool {
        self.concepts.binary_search(label).is_ok()
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} concepts)", self.name, self.concepts.len())
    }
}

/// Partitions a graph and keeps the communities large enough to be themes
pub struct CommunityDetector {
    algorithm: Box<dyn CommunityDetectionAlgorithm>,
    min_size: usize,
}

impl fmt::Debug for CommunityDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommunityDetector")
            .field("algorithm", &self.algorithm.name())
            .field("min_size", &self.min_size)
            .finish()
    }
}

impl Default for CommunityDetector {
    fn default() -> Self {
        Self {
            algorithm: Box::new(GreedyModularity),
            min_size: DEFAULT_MIN_CLUSTER_SIZE,
        }
    }
}

impl CommunityDetector {
    /// Create a detector; `min_size` must be at least 1
    pub fn new(algorithm: Box<dyn CommunityDetectionAlgorithm>, min_size: usize) -> AnalysisResult<Self> {
        if min_size == 0 {
            return Err(AnalysisError::invalid(
                "min_size",
                "clusters are never empty, use 1 to keep every community",
            ));
        }
        Ok(Self { algorithm, min_size })
    }

    pub fn greedy(min_size: usize) -> AnalysisResult<Self> {
        Self::new(Box::new(GreedyModularity), min_size)
    }

    pub fn algorithm_name(&self) -> &'static str {
        self.algorithm.name()
    }

    pub fn min_size(&self) -> usize {
        self.min_size
    }

    /// Full partition of the graph, largest community first, ties by first label
    pub fn partition(&self, graph: &CooccurrenceGraph) -> Vec<BTreeSet<ConceptLabel>> {
        let mut communities: Vec<BTreeSet<ConceptLabel>> = self
            .algorithm
            .partition(graph)
            .into_iter()
            .filter(|c| !c.is_empty())
            .collect();
        communities.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.first().cmp(&b.first())));
        communities
    }

    /// Communities with at least `min_size` concepts, named in order.
    ///
    /// Smaller communities are dropped, never merged into others. Empty and
    /// edgeless graphs yield no clusters.
    pub fn detect(&self, graph: &CooccurrenceGraph) -> Vec<Cluster> {
        self.filter(&self.partition(graph))
    }

    /// Name and size-filter a partition returned by [`partition`](Self::partition)
    pub fn filter(&self, partition: &[BTreeSet<ConceptLabel>]) -> Vec<Cluster> {
        partition
            .iter()
            .filter(|c| c.len() >= self.min_size)
            .enumerate()
            .map(|(i, c)| Cluster::new(format!("Cluster {}", i + 1), c.iter().cloned()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_cooccurrence_graph;
    use crate::DocumentConceptSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Greedy modularity that counts how often it runs
    struct CountingGreedy {
        runs: Arc<AtomicUsize>,
    }

    impl CommunityDetectionAlgorithm for CountingGreedy {
        fn name(&self) -> &'static str {
            "counting_greedy"
        }

        fn partition(&self, graph: &CooccurrenceGraph) -> Vec<BTreeSet<ConceptLabel>> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            GreedyModularity.partition(graph)
        }
    }

    /// Two 4-cliques joined by a single weak edge, plus a separate pair
    fn graph() -> CooccurrenceGraph {
        let raw: Vec<Vec<&str>> = vec![
            vec!["a1", "a2", "a3", "a4"],
            vec!["a1", "a2", "a3", "a4"],
            vec!["b1", "b2", "b3", "b4"],
            vec!["b1", "b2", "b3", "b4"],
            vec!["a4", "b1"],
            vec!["x", "y"],
        ];
        let documents: Vec<DocumentConceptSet> =
            raw.into_iter().map(|d| d.into_iter().collect()).collect();
        build_cooccurrence_graph(&documents, 1)
    }

    #[test]
    fn test_partition_covers_every_node_once() {
        let g = graph();
        for algorithm in [
            Box::new(GreedyModularity) as Box<dyn CommunityDetectionAlgorithm>,
            Box::new(LabelPropagation::default()) as Box<dyn CommunityDetectionAlgorithm>,
        ] {
            let detector = CommunityDetector::new(algorithm, 1).unwrap();
            let partition = detector.partition(&g);

            let total: usize = partition.iter().map(|c| c.len()).sum();
            let union: BTreeSet<&ConceptLabel> = partition.iter().flatten().collect();
            assert_eq!(total, g.node_count());
            assert_eq!(union.len(), g.node_count());
        }
    }

    #[test]
    fn test_greedy_finds_cliques() {
        let g = graph();
        let clusters = CommunityDetector::default().detect(&g);

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].name, "Cluster 1");
        assert_eq!(clusters[0].concepts[0].as_str(), "a1");
        assert_eq!(clusters[1].concepts[0].as_str(), "b1");
        assert!(clusters.iter().all(|c| c.len() == 4));

        // The {x, y} community is below min_size and is not redistributed
        assert!(!clusters.iter().any(|c| c.contains(&ConceptLabel::from("x"))));
    }

    #[test]
    fn test_min_size_filter() {
        let g = graph();
        let all = CommunityDetector::greedy(1).unwrap().detect(&g);
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].name, "Cluster 3");

        let none = CommunityDetector::greedy(5).unwrap().detect(&g);
        assert!(none.is_empty());
    }

    #[test]
    fn test_zero_min_size_is_rejected() {
        let err = CommunityDetector::greedy(0).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidParameter { name: "min_size", .. }));
    }

    #[test]
    fn test_empty_graph() {
        let g = CooccurrenceGraph::new();
        assert!(CommunityDetector::default().detect(&g).is_empty());
        assert!(CommunityDetector::default().partition(&g).is_empty());
    }

    #[test]
    fn test_modularity_of_detected_partition() {
        let g = graph();
        let detector = CommunityDetector::default();
        let q = partition_modularity(&g, &detector.partition(&g));
        assert!(q > 0.3, "expected clear community structure, got {}", q);
    }

    #[test]
    fn test_filter_reuses_partition() {
        let g = graph();
        let runs = Arc::new(AtomicUsize::new(0));
        let detector = CommunityDetector::new(Box::new(CountingGreedy { runs: Arc::clone(&runs) }), 3).unwrap();

        let partition = detector.partition(&g);
        let clusters = detector.filter(&partition);
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        assert_eq!(partition.len(), 3);
        assert_eq!(clusters, CommunityDetector::default().detect(&g));
        assert_eq!(clusters[1].name, "Cluster 2");
    }
}
