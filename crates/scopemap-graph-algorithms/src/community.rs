//! Community detection algorithms
//!
//! Greedy modularity maximization (Clauset-Newman-Moore) and weighted
//! label propagation over undirected weighted graphs.

use super::common::{GraphView, NodeId};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::{BTreeMap, HashMap};

/// Result of a community detection run
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CommunityResult {
    /// Communities ordered by size (desc), members ordered by dense index
    pub communities: Vec<Vec<NodeId>>,
    /// Map of NodeId -> position in `communities`
    pub node_community: HashMap<NodeId, usize>,
}

impl CommunityResult {
    fn from_groups(view: &GraphView, mut groups: Vec<Vec<usize>>) -> Self {
        for group in groups.iter_mut() {
            group.sort_unstable();
        }
        groups.retain(|g| !g.is_empty());
        groups.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a[0].cmp(&b[0])));

        let mut node_community = HashMap::with_capacity(view.node_count);
        let communities = groups
            .into_iter()
            .enumerate()
            .map(|(cid, group)| {
                group
                    .into_iter()
                    .map(|idx| {
                        let node = view.index_to_node[idx];
                        node_community.insert(node, cid);
                        node
                    })
                    .collect()
            })
            .collect();

        CommunityResult {
            communities,
            node_community,
        }
    }
}

/// Greedy modularity maximization (Clauset-Newman-Moore)
///
/// Starts from singleton communities and repeatedly merges the pair of
/// connected communities with the largest modularity gain. Stops when no
/// merge increases modularity. Ties go to the pair with the lowest indices,
/// which makes the result deterministic for a fixed view.
pub fn greedy_modularity(view: &GraphView) -> CommunityResult {
    let n = view.node_count;
    let two_m = 2.0 * view.total_weight();

    let mut members: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();
    if two_m <= 0.0 {
        return CommunityResult::from_groups(view, members);
    }

    // e[i][j]: fraction of edge ends joining community i to community j
    // a[i]:    fraction of edge ends attached to community i
    let mut e: Vec<BTreeMap<usize, f64>> = vec![BTreeMap::new(); n];
    let mut a = vec![0.0; n];
    for u in 0..n {
        for (&v, &w) in view.neighbors(u).iter().zip(view.weights(u)) {
            *e[u].entry(v).or_insert(0.0) += w / two_m;
        }
        a[u] = view.weighted_degree(u) / two_m;
    }

    loop {
        let mut best: Option<(usize, usize, f64)> = None;
        for i in 0..n {
            for (&j, &e_ij) in e[i].range(i + 1..) {
                let dq = 2.0 * (e_ij - a[i] * a[j]);
                if dq > best.map_or(0.0, |(_, _, b)| b) {
                    best = Some((i, j, dq));
                }
            }
        }

        let Some((i, j, _)) = best else { break };

        // Merge j into i
        let row_j = std::mem::take(&mut e[j]);
        for (k, e_jk) in row_j {
            if k == i {
                continue;
            }
            e[k].remove(&j);
            *e[i].entry(k).or_insert(0.0) += e_jk;
            *e[k].entry(i).or_insert(0.0) += e_jk;
        }
        e[i].remove(&j);
        a[i] += a[j];
        a[j] = 0.0;

        let moved = std::mem::take(&mut members[j]);
        members[i].extend(moved);
    }

    CommunityResult::from_groups(view, members)
}

/// Weighted label propagation
///
/// Each node starts in its own community and repeatedly adopts the label
/// with the highest total edge weight among its neighbors. Nodes are visited
/// in an order shuffled by a seeded RNG, so the same seed yields the same
/// partition. A node keeps its current label when it is among the best.
pub fn label_propagation(view: &GraphView, max_iterations: usize, seed: u64) -> CommunityResult {
    let n = view.node_count;
    let mut labels: Vec<usize> = (0..n).collect();
    let mut order: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);

    for _ in 0..max_iterations {
        order.shuffle(&mut rng);
        let mut changed = false;

        for &u in &order {
            if view.degree(u) == 0 {
                continue;
            }

            let mut label_weights: BTreeMap<usize, f64> = BTreeMap::new();
            for (&v, &w) in view.neighbors(u).iter().zip(view.weights(u)) {
                *label_weights.entry(labels[v]).or_insert(0.0) += w;
            }

            let max_weight = label_weights.values().cloned().fold(f64::MIN, f64::max);
            let current = labels[u];
            if label_weights.get(&current) == Some(&max_weight) {
                continue;
            }

            // BTreeMap iteration picks the smallest label among the best
            if let Some((&best_label, _)) = label_weights.iter().find(|(_, &w)| w == max_weight) {
                labels[u] = best_label;
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }

    let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (idx, label) in labels.into_iter().enumerate() {
        groups.entry(label).or_default().push(idx);
    }

    CommunityResult::from_groups(view, groups.into_values().collect())
}

/// Newman modularity of a partition
///
/// `Q = sum_c [ L_c / m - (d_c / 2m)^2 ]` where `L_c` is the weight inside
/// community `c` and `d_c` the total weighted degree of its members.
/// Nodes missing from `communities` are treated as singletons. Returns 0
/// for graphs without edges.
pub fn modularity(view: &GraphView, communities: &[Vec<NodeId>]) -> f64 {
    let m = view.total_weight();
    if m <= 0.0 {
        return 0.0;
    }

    let mut community_of = vec![usize::MAX; view.node_count];
    for (cid, community) in communities.iter().enumerate() {
        for node in community {
            if let Some(&idx) = view.node_to_index.get(node) {
                community_of[idx] = cid;
            }
        }
    }

    let mut internal = vec![0.0; communities.len()];
    let mut degree = vec![0.0; communities.len()];
    let mut q_singletons = 0.0;

    for u in 0..view.node_count {
        let cu = community_of[u];
        if cu == usize::MAX {
            let d = view.weighted_degree(u) / (2.0 * m);
            q_singletons -= d * d;
            continue;
        }
        degree[cu] += view.weighted_degree(u);
        for (&v, &w) in view.neighbors(u).iter().zip(view.weights(u)) {
            if community_of[v] == cu {
                // Each internal edge is seen from both ends
                internal[cu] += w / 2.0;
            }
        }
    }

    let q: f64 = internal
        .iter()
        .zip(&degree)
        .map(|(l, d)| l / m - (d / (2.0 * m)).powi(2))
        .sum();

    q + q_singletons
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two triangles {0,1,2} and {3,4,5} joined by a single bridge 2-3
    fn two_triangles() -> GraphView {
        GraphView::from_edges(
            vec![0, 1, 2, 3, 4, 5],
            &[
                (0, 1, 1.0),
                (1, 2, 1.0),
                (0, 2, 1.0),
                (3, 4, 1.0),
                (4, 5, 1.0),
                (3, 5, 1.0),
                (2, 3, 1.0),
            ],
        )
    }

    fn assert_partition(view: &GraphView, result: &CommunityResult) {
        let mut seen: Vec<NodeId> = result.communities.iter().flatten().cloned().collect();
        seen.sort_unstable();
        let mut expected = view.index_to_node.clone();
        expected.sort_unstable();
        assert_eq!(seen, expected);
        assert_eq!(result.node_community.len(), view.node_count);
    }

    #[test]
    fn test_greedy_modularity_two_triangles() {
        let view = two_triangles();
        let result = greedy_modularity(&view);

        assert_partition(&view, &result);
        assert_eq!(result.communities.len(), 2);
        assert_eq!(result.communities[0], vec![0, 1, 2]);
        assert_eq!(result.communities[1], vec![3, 4, 5]);

        let q = modularity(&view, &result.communities);
        // 2 * (3/7 - (7/14)^2) = 5/14
        assert!((q - 5.0 / 14.0).abs() < 1e-9, "unexpected modularity {}", q);
    }

    #[test]
    fn test_greedy_modularity_disconnected() {
        // Two separate edges never merge
        let view = GraphView::from_edges(vec![1, 2, 3, 4], &[(0, 1, 3.0), (2, 3, 1.0)]);
        let result = greedy_modularity(&view);

        assert_partition(&view, &result);
        assert_eq!(result.communities.len(), 2);
        assert_ne!(result.node_community[&1], result.node_community[&3]);
        assert_eq!(result.node_community[&1], result.node_community[&2]);
    }

    #[test]
    fn test_greedy_modularity_edgeless() {
        let view = GraphView::from_edges(vec![1, 2, 3], &[]);
        let result = greedy_modularity(&view);
        assert_eq!(result.communities.len(), 3);
        assert!(result.communities.iter().all(|c| c.len() == 1));

        let empty = GraphView::from_edges(Vec::new(), &[]);
        assert!(greedy_modularity(&empty).communities.is_empty());
    }

    #[test]
    fn test_greedy_modularity_is_deterministic() {
        let view = two_triangles();
        let first = greedy_modularity(&view);
        let second = greedy_modularity(&view);
        assert_eq!(first.communities, second.communities);
    }

    #[test]
    fn test_label_propagation_two_triangles() {
        let view = two_triangles();
        let result = label_propagation(&view, 100, 42);

        assert_partition(&view, &result);
        assert_eq!(result.node_community[&0], result.node_community[&1]);
        assert_eq!(result.node_community[&4], result.node_community[&5]);

        let again = label_propagation(&view, 100, 42);
        assert_eq!(result.communities, again.communities);
    }

    #[test]
    fn test_modularity_of_single_community_is_zero() {
        let view = two_triangles();
        let all = vec![vec![0, 1, 2, 3, 4, 5]];
        assert!(modularity(&view, &all).abs() < 1e-12);
    }
}
