//! Central concept ranking

use crate::algo::{build_view, degree_centrality};
use crate::concept::ConceptLabel;
use crate::graph::CooccurrenceGraph;
use std::cmp::Ordering;

/// Number of concepts returned by [`top_concepts`] by default
pub const DEFAULT_TOP_CONCEPTS: usize = 9;

/// Normalized degree centrality of every concept.
///
/// Ordered by centrality (descending), ties by label (ascending). Values
/// lie in `[0, 1]`; a node adjacent to every other node scores 1.
pub fn rank_by_degree_centrality(graph: &CooccurrenceGraph) -> Vec<(ConceptLabel, f64)> {
    let view = build_view(graph);
    let scores = degree_centrality(&view);

    let mut ranked: Vec<(ConceptLabel, f64)> = scores
        .into_iter()
        .filter_map(|(id, score)| graph.label(id as usize).map(|l| (l.clone(), score)))
        .collect();

    ranked.sort_by(|(la, a), (lb, b)| {
        b.partial_cmp(a)
            .unwrap_or(Ordering::Equal)
            .then_with(|| la.cmp(lb))
    });
    ranked
}

/// The `n` most central concepts; fewer when the graph is smaller
pub fn top_concepts(graph: &CooccurrenceGraph, n: usize) -> Vec<ConceptLabel> {
    rank_by_degree_centrality(graph)
        .into_iter()
        .take(n)
        .map(|(label, _)| label)
        .collect()
}
