//! Graph algorithms module
//!
//! Algorithms are implemented in the `scopemap-graph-algorithms` crate.
//! This module provides the integration/adapter layer: it projects a
//! [`CooccurrenceGraph`] onto a dense [`GraphView`] and maps algorithm
//! results back to concept labels.

use crate::concept::ConceptLabel;
use crate::graph::CooccurrenceGraph;
use std::collections::BTreeSet;

// Re-export algorithms
pub use scopemap_graph_algorithms::{
    degree_centrality, greedy_modularity, label_propagation, modularity, CommunityResult,
    GraphView, NodeId as AlgoNodeId,
};

/// Build a GraphView from the co-occurrence graph for algorithm execution.
///
/// Algorithm node ids are the graph's dense node indices.
pub fn build_view(graph: &CooccurrenceGraph) -> GraphView {
    let index_to_node: Vec<AlgoNodeId> = (0..graph.node_count() as AlgoNodeId).collect();

    let edges: Vec<(usize, usize, f64)> = (0..graph.node_count())
        .flat_map(|i| {
            graph
                .adjacency_indices(i)
                .range(i + 1..)
                .map(move |(&j, &w)| (i, j, w as f64))
        })
        .collect();

    GraphView::from_edges(index_to_node, &edges)
}

/// Translate algorithm node ids back to concept labels
pub fn resolve_labels<'a, I>(graph: &CooccurrenceGraph, ids: I) -> BTreeSet<ConceptLabel>
where
    I: IntoIterator<Item = &'a AlgoNodeId>,
{
    ids.into_iter()
        .filter_map(|&id| graph.label(id as usize).cloned())
        .collect()
}

/// Translate concept sets into algorithm node ids, skipping unknown labels
pub fn resolve_ids(graph: &CooccurrenceGraph, communities: &[BTreeSet<ConceptLabel>]) -> Vec<Vec<AlgoNodeId>> {
    communities
        .iter()
        .map(|c| {
            c.iter()
                .filter_map(|l| graph.index_of(l).map(|i| i as AlgoNodeId))
                .collect()
        })
        .collect()
}
