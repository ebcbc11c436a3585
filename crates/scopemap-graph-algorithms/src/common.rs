//! Shared utilities for graph algorithms
//!
//! Provides a read-only, optimized view of an undirected weighted graph for algorithm execution.

use std::collections::HashMap;

/// Node Identifier type (u64)
pub type NodeId = u64;

/// A dense, integer-indexed view of an undirected graph using Compressed Sparse Row (CSR) format.
///
/// Every undirected edge `{u, v}` is stored twice, once in the row of `u` and
/// once in the row of `v`, so `neighbors(u)` is the full neighborhood.
#[derive(Debug, Clone)]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to NodeId
    pub index_to_node: Vec<NodeId>,
    /// Mapping from NodeId to dense index
    pub node_to_index: HashMap<NodeId, usize>,

    /// Offsets into `targets`. Size = node_count + 1
    pub offsets: Vec<usize>,
    /// Contiguous array of neighbor indices
    pub targets: Vec<usize>,
    /// Edge weights: aligned with `targets`
    pub weights: Vec<f64>,
}

impl GraphView {
    /// Get the (unweighted) degree of a node (by index)
    pub fn degree(&self, idx: usize) -> usize {
        self.offsets[idx + 1] - self.offsets[idx]
    }

    /// Get the neighbors of a node
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        let start = self.offsets[idx];
        let end = self.offsets[idx + 1];
        &self.targets[start..end]
    }

    /// Get weights of the edges incident to a node, aligned with `neighbors`
    pub fn weights(&self, idx: usize) -> &[f64] {
        let start = self.offsets[idx];
        let end = self.offsets[idx + 1];
        &self.weights[start..end]
    }

    /// Sum of the weights of the edges incident to a node
    pub fn weighted_degree(&self, idx: usize) -> f64 {
        self.weights(idx).iter().sum()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.targets.len() / 2
    }

    /// Total weight of all undirected edges (each edge counted once)
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum::<f64>() / 2.0
    }

    /// Build a view from a list of undirected weighted edges given as dense index pairs.
    ///
    /// Self-loops are ignored. Parallel edges are kept as separate entries.
    pub fn from_edges(index_to_node: Vec<NodeId>, edges: &[(usize, usize, f64)]) -> Self {
        let node_count = index_to_node.len();
        let node_to_index = index_to_node
            .iter()
            .enumerate()
            .map(|(idx, &id)| (id, idx))
            .collect();

        let mut adjacency: Vec<Vec<(usize, f64)>> = vec![Vec::new(); node_count];
        for &(u, v, w) in edges {
            if u == v {
                continue;
            }
            adjacency[u].push((v, w));
            adjacency[v].push((u, w));
        }

        // Flatten
        let mut offsets = Vec::with_capacity(node_count + 1);
        let mut targets = Vec::with_capacity(edges.len() * 2);
        let mut weights = Vec::with_capacity(edges.len() * 2);

        offsets.push(0);
        for mut row in adjacency {
            row.sort_by_key(|&(v, _)| v);
            for (v, w) in row {
                targets.push(v);
                weights.push(w);
            }
            offsets.push(targets.len());
        }

        GraphView {
            node_count,
            index_to_node,
            node_to_index,
            offsets,
            targets,
            weights,
        }
    }
}
