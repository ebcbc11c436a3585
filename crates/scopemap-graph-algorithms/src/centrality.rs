//! Degree centrality
//!
//! Normalized degree centrality for undirected graphs.

use super::common::{GraphView, NodeId};
use std::collections::HashMap;

/// Degree centrality of every node: `degree / (N - 1)`.
///
/// Uses the unweighted degree. For graphs with at most one node every
/// score is 0.
pub fn degree_centrality(view: &GraphView) -> HashMap<NodeId, f64> {
    let n = view.node_count;
    let mut result = HashMap::with_capacity(n);

    if n <= 1 {
        for &node in &view.index_to_node {
            result.insert(node, 0.0);
        }
        return result;
    }

    let scale = 1.0 / (n - 1) as f64;
    for idx in 0..n {
        result.insert(view.index_to_node[idx], view.degree(idx) as f64 * scale);
    }

    result
}
