//! In-memory co-occurrence graph
//!
//! Undirected, integer-weighted graph of concepts. Invariants upheld by every
//! constructor:
//! - no self-loops
//! - every edge weight is at least 1
//! - no isolated nodes (nodes exist only as edge endpoints)

use super::export::{EdgeRecord, GraphExport, NodeRecord};
use crate::concept::ConceptLabel;
use indexmap::IndexSet;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};

/// Weighted undirected concept co-occurrence graph
///
/// Nodes are kept in lexicographic order, so a node's dense index (used by
/// the matrix and the algorithm views) is the same for equal graphs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CooccurrenceGraph {
    /// Node labels; position is the dense node index
    nodes: IndexSet<ConceptLabel>,
    /// adjacency[i]: neighbor index -> co-occurrence count
    adjacency: Vec<BTreeMap<usize, u32>>,
    edge_count: usize,
}

impl CooccurrenceGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from weighted concept pairs.
    ///
    /// Weights of repeated pairs (in either orientation) are summed. Pairs
    /// whose total weight is below `min_cooccurrence` are dropped, as are
    /// self-pairs and zero weights. Only endpoints of surviving edges
    /// become nodes.
    pub fn from_weighted_pairs<'a, I>(pairs: I, min_cooccurrence: u32) -> Self
    where
        I: IntoIterator<Item = (&'a ConceptLabel, &'a ConceptLabel, u32)>,
    {
        let mut totals: BTreeMap<(&ConceptLabel, &ConceptLabel), u32> = BTreeMap::new();
        for (a, b, w) in pairs {
            if a == b || w == 0 {
                continue;
            }
            let key = if a < b { (a, b) } else { (b, a) };
            *totals.entry(key).or_insert(0) += w;
        }

        let threshold = min_cooccurrence.max(1);
        totals.retain(|_, w| *w >= threshold);

        let labels: BTreeSet<&ConceptLabel> = totals.keys().flat_map(|&(a, b)| [a, b]).collect();
        let nodes: IndexSet<ConceptLabel> = labels.into_iter().cloned().collect();

        let mut adjacency = vec![BTreeMap::new(); nodes.len()];
        for (&(a, b), &w) in &totals {
            // Both endpoints were inserted above
            if let (Some(i), Some(j)) = (nodes.get_index_of(a), nodes.get_index_of(b)) {
                adjacency[i].insert(j, w);
                adjacency[j].insert(i, w);
            }
        }

        CooccurrenceGraph {
            nodes,
            adjacency,
            edge_count: totals.len(),
        }
    }

    /// Re-apply the edge threshold: drop edges below `min_cooccurrence`
    /// and the nodes left isolated. Pruning twice at the same threshold is
    /// a no-op.
    pub fn pruned(&self, min_cooccurrence: u32) -> Self {
        Self::from_weighted_pairs(self.edges(), min_cooccurrence)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node labels in index (lexicographic) order
    pub fn nodes(&self) -> impl Iterator<Item = &ConceptLabel> + '_ {
        self.nodes.iter()
    }

    pub fn contains(&self, label: &ConceptLabel) -> bool {
        self.nodes.contains(label)
    }

    /// Dense index of a node
    pub fn index_of(&self, label: &ConceptLabel) -> Option<usize> {
        self.nodes.get_index_of(label)
    }

    /// Label of the node at a dense index
    pub fn label(&self, idx: usize) -> Option<&ConceptLabel> {
        self.nodes.get_index(idx)
    }

    /// Co-occurrence count of two concepts; symmetric in its arguments
    pub fn weight(&self, a: &ConceptLabel, b: &ConceptLabel) -> Option<u32> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        self.adjacency[i].get(&j).copied()
    }

    /// Number of distinct neighbors; 0 for unknown concepts
    pub fn degree(&self, label: &ConceptLabel) -> usize {
        self.index_of(label).map_or(0, |i| self.adjacency[i].len())
    }

    /// Sum of incident edge weights; 0 for unknown concepts
    pub fn weighted_degree(&self, label: &ConceptLabel) -> u64 {
        self.index_of(label)
            .map_or(0, |i| self.adjacency[i].values().map(|&w| w as u64).sum())
    }

    /// Neighbors of a concept with the co-occurrence count of each edge
    pub fn neighbors<'a>(
        &'a self,
        label: &ConceptLabel,
    ) -> impl Iterator<Item = (&'a ConceptLabel, u32)> + 'a {
        self.index_of(label)
            .into_iter()
            .flat_map(move |i| self.adjacency_row(i))
    }

    /// Every undirected edge once, as `(source, target, weight)` with `source < target`
    pub fn edges(&self) -> impl Iterator<Item = (&ConceptLabel, &ConceptLabel, u32)> + '_ {
        self.adjacency.iter().enumerate().flat_map(move |(i, row)| {
            row.range(i + 1..)
                .map(move |(&j, &w)| (&self.nodes[i], &self.nodes[j], w))
        })
    }

    /// Neighbors of the node at a dense index
    pub(crate) fn adjacency_row(
        &self,
        idx: usize,
    ) -> impl Iterator<Item = (&ConceptLabel, u32)> + '_ {
        self.adjacency[idx]
            .iter()
            .map(move |(&j, &w)| (&self.nodes[j], w))
    }

    /// Neighbor indices and weights of the node at a dense index
    pub(crate) fn adjacency_indices(&self, idx: usize) -> &BTreeMap<usize, u32> {
        &self.adjacency[idx]
    }

    /// Node and edge lists for external serializers
    pub fn export(&self) -> GraphExport {
        let nodes = self
            .nodes
            .iter()
            .enumerate()
            .map(|(id, label)| NodeRecord {
                id,
                label: label.clone(),
                degree: self.adjacency[id].len(),
                weighted_degree: self.adjacency[id].values().map(|&w| w as u64).sum(),
            })
            .collect();

        let edges = self
            .edges()
            .map(|(source, target, weight)| EdgeRecord {
                source: source.clone(),
                target: target.clone(),
                weight,
            })
            .collect();

        GraphExport { nodes, edges }
    }

    /// SHA-256 over the node list and weighted edge list, as lowercase hex.
    ///
    /// Equal graphs hash equally regardless of how they were built, so the
    /// digest can key caches of derived structures.
    pub fn content_hash(&self) -> String {
        let mut hasher = Sha256::new();
        for label in &self.nodes {
            hasher.update(b"n");
            hasher.update((label.as_str().len() as u64).to_le_bytes());
            hasher.update(label.as_str().as_bytes());
        }
        for (i, row) in self.adjacency.iter().enumerate() {
            for (&j, &w) in row.range(i + 1..) {
                hasher.update(b"e");
                hasher.update((i as u64).to_le_bytes());
                hasher.update((j as u64).to_le_bytes());
                hasher.update(w.to_le_bytes());
            }
        }
        format!("{:x}", hasher.finalize())
    }
}
