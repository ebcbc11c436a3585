//! Thematic map (strategic diagram) analysis
//!
//! Each cluster is placed on two axes:
//! - density: mean co-occurrence weight between its own concepts (cohesion)
//! - centrality: total co-occurrence weight linking it to other concepts (relevance)
//!
//! Both axes are median-centered and scaled to `[-1, 1]` across the clusters
//! of one run, then the sign pair selects one of four quadrants.

use super::community::Cluster;
use crate::concept::ConceptLabel;
use crate::error::{AnalysisError, AnalysisResult};
use crate::graph::CooccurrenceGraph;
use lru::LruCache;
use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn};

/// Default number of leading concepts reported per cluster
pub const DEFAULT_LEADING_CONCEPTS: usize = 5;

/// Strategic-diagram quadrant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    /// Central and well developed
    #[serde(rename = "Motor Theme")]
    MotorTheme,
    /// Central but underdeveloped
    #[serde(rename = "Basic/Transversal Theme")]
    BasicTheme,
    /// Peripheral but well developed
    #[serde(rename = "Niche Theme")]
    NicheTheme,
    /// Peripheral and underdeveloped
    #[serde(rename = "Emerging/Declining Theme")]
    EmergingOrDecliningTheme,
}

impl Quadrant {
    /// Classify from normalized values; 0 counts as the central/developed side
    pub fn classify(centrality_norm: f64, density_norm: f64) -> Self {
        match (centrality_norm >= 0.0, density_norm >= 0.0) {
            (true, true) => Quadrant::MotorTheme,
            (true, false) => Quadrant::BasicTheme,
            (false, true) => Quadrant::NicheTheme,
            (false, false) => Quadrant::EmergingOrDecliningTheme,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Quadrant::MotorTheme => "Motor Theme",
            Quadrant::BasicTheme => "Basic/Transversal Theme",
            Quadrant::NicheTheme => "Niche Theme",
            Quadrant::EmergingOrDecliningTheme => "Emerging/Declining Theme",
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the thematic map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterMetrics {
    pub name: String,
    /// Member concepts in ascending order
    pub concepts: Vec<ConceptLabel>,
    pub density: f64,
    pub centrality: f64,
    pub size: usize,
    pub density_norm: f64,
    pub centrality_norm: f64,
    pub quadrant: Quadrant,
    /// Most connected concepts inside the cluster
    pub leading_concepts: Vec<ConceptLabel>,
}

/// Dense symmetric co-occurrence matrix
///
/// `M[i][j]` is the edge weight between the concepts with dense indices `i`
/// and `j`, 0 without an edge and on the diagonal.
#[derive(Debug, Clone, PartialEq)]
pub struct CooccurrenceMatrix {
    matrix: Array2<f64>,
}

impl CooccurrenceMatrix {
    pub fn from_graph(graph: &CooccurrenceGraph) -> Self {
        let n = graph.node_count();
        let mut matrix = Array2::<f64>::zeros((n, n));
        for i in 0..n {
            for (&j, &w) in graph.adjacency_indices(i) {
                matrix[[i, j]] = w as f64;
            }
        }
        Self { matrix }
    }

    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.matrix[[i, j]]
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.matrix
    }

    /// Mean weight over the unordered pairs of `members`; 0 below two members.
    ///
    /// `size` is the full cluster size, so members unknown to the matrix
    /// count as concepts with no links.
    pub fn density(&self, members: &[usize], size: usize) -> f64 {
        if size < 2 {
            return 0.0;
        }
        let mut total = 0.0;
        for (a, &i) in members.iter().enumerate() {
            for &j in &members[a + 1..] {
                total += self.matrix[[i, j]];
            }
        }
        let pairs = (size * (size - 1) / 2) as f64;
        total / pairs
    }

    /// Sum of `M[i][j]` over every member `i` and every non-member `j`
    pub fn centrality(&self, members: &[usize]) -> f64 {
        let mut inside = vec![false; self.dim()];
        for &i in members {
            inside[i] = true;
        }
        members
            .iter()
            .map(|&i| {
                self.matrix
                    .row(i)
                    .iter()
                    .zip(&inside)
                    .filter(|(_, &member)| !member)
                    .map(|(w, _)| *w)
                    .sum::<f64>()
            })
            .sum()
    }
}

/// Median of a slice; the mean of the two middle values for even lengths, 0 when empty
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Median-center the values and scale by the largest absolute deviation.
///
/// Results lie in `[-1, 1]` with 0 at the median. When every value equals
/// the median the scale is 0 and every result is 0.
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let m = median(values);
    let centered: Vec<f64> = values.iter().map(|v| v - m).collect();
    let max_abs = centered.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if max_abs == 0.0 {
        return vec![0.0; values.len()];
    }
    centered.into_iter().map(|v| v / max_abs).collect()
}

/// LRU cache of co-occurrence matrices keyed by graph content hash
pub struct MatrixCache {
    entries: Mutex<LruCache<String, Arc<CooccurrenceMatrix>>>,
}

impl MatrixCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Return the cached matrix for an equal graph, building it on a miss
    pub fn get_or_build(&self, graph: &CooccurrenceGraph) -> Arc<CooccurrenceMatrix> {
        let key = graph.content_hash();
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(matrix) = entries.get(&key) {
            debug!("Matrix cache hit for {}", key);
            return Arc::clone(matrix);
        }

        let matrix = Arc::new(CooccurrenceMatrix::from_graph(graph));
        entries.put(key, Arc::clone(&matrix));
        matrix
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

/// Computes cluster metrics and quadrants for one graph
#[derive(Debug, Clone)]
pub struct ThematicMapAnalyzer {
    leading_concepts: usize,
}

impl Default for ThematicMapAnalyzer {
    fn default() -> Self {
        Self {
            leading_concepts: DEFAULT_LEADING_CONCEPTS,
        }
    }
}

impl ThematicMapAnalyzer {
    pub fn new(leading_concepts: usize) -> AnalysisResult<Self> {
        if leading_concepts == 0 {
            return Err(AnalysisError::invalid("leading_concepts", "must be at least 1"));
        }
        Ok(Self { leading_concepts })
    }

    /// Thematic map of `clusters` over `graph`; empty when there are no clusters
    pub fn analyze(&self, graph: &CooccurrenceGraph, clusters: &[Cluster]) -> Vec<ClusterMetrics> {
        if clusters.is_empty() {
            return Vec::new();
        }
        let matrix = CooccurrenceMatrix::from_graph(graph);
        self.analyze_with_matrix(graph, &matrix, clusters)
    }

    /// Same as [`analyze`](Self::analyze), reusing a cached matrix for equal graphs
    pub fn analyze_cached(
        &self,
        graph: &CooccurrenceGraph,
        clusters: &[Cluster],
        cache: &MatrixCache,
    ) -> Vec<ClusterMetrics> {
        if clusters.is_empty() {
            return Vec::new();
        }
        let matrix = cache.get_or_build(graph);
        self.analyze_with_matrix(graph, &matrix, clusters)
    }

    /// Analyze with a matrix previously built from `graph`.
    ///
    /// A matrix whose dimension does not match the graph cannot belong to
    /// it and is rebuilt.
    pub fn analyze_with_matrix(
        &self,
        graph: &CooccurrenceGraph,
        matrix: &CooccurrenceMatrix,
        clusters: &[Cluster],
    ) -> Vec<ClusterMetrics> {
        if matrix.dim() != graph.node_count() {
            warn!(
                "Matrix of dimension {} does not match a graph of {} concepts, rebuilding",
                matrix.dim(),
                graph.node_count()
            );
            let rebuilt = CooccurrenceMatrix::from_graph(graph);
            return self.analyze_with_matrix(graph, &rebuilt, clusters);
        }

        let raw: Vec<(f64, f64, Vec<ConceptLabel>)> = clusters
            .par_iter()
            .map(|cluster| {
                let members: Vec<usize> = cluster
                    .concepts
                    .iter()
                    .filter_map(|c| graph.index_of(c))
                    .collect();
                let density = matrix.density(&members, cluster.len());
                let centrality = matrix.centrality(&members);
                let leading = self.leading_concepts(graph, &members);
                (density, centrality, leading)
            })
            .collect();

        let densities: Vec<f64> = raw.iter().map(|(d, _, _)| *d).collect();
        let centralities: Vec<f64> = raw.iter().map(|(_, c, _)| *c).collect();
        let density_norm = normalize(&densities);
        let centrality_norm = normalize(&centralities);

        let metrics: Vec<ClusterMetrics> = clusters
            .iter()
            .zip(raw)
            .enumerate()
            .map(|(i, (cluster, (density, centrality, leading_concepts)))| ClusterMetrics {
                name: cluster.name.clone(),
                concepts: cluster.concepts.clone(),
                density,
                centrality,
                size: cluster.len(),
                density_norm: density_norm[i],
                centrality_norm: centrality_norm[i],
                quadrant: Quadrant::classify(centrality_norm[i], density_norm[i]),
                leading_concepts,
            })
            .collect();

        debug!("Thematic map computed for {} clusters", metrics.len());
        metrics
    }

    /// Members ranked by degree inside the cluster, ties by label
    fn leading_concepts(&self, graph: &CooccurrenceGraph, members: &[usize]) -> Vec<ConceptLabel> {
        let mut ranked: Vec<(usize, &ConceptLabel)> = members
            .iter()
            .filter_map(|&i| {
                let internal = graph
                    .adjacency_indices(i)
                    .keys()
                    .filter(|j| members.binary_search(j).is_ok())
                    .count();
                graph.label(i).map(|label| (internal, label))
            })
            .collect();

        ranked.sort_by(|(da, la), (db, lb)| match db.cmp(da) {
            Ordering::Equal => la.cmp(lb),
            other => other,
        });

        ranked
            .into_iter()
            .take(self.leading_concepts)
            .map(|(_, label)| label.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_cooccurrence_graph;
    use crate::DocumentConceptSet;

    fn graph(raw: &[&[&str]]) -> CooccurrenceGraph {
        let documents: Vec<DocumentConceptSet> =
            raw.iter().map(|d| d.iter().copied().collect()).collect();
        build_cooccurrence_graph(&documents, 1)
    }

    fn cluster(name: &str, concepts: &[&str]) -> Cluster {
        Cluster::new(name, concepts.iter().map(|c| ConceptLabel::from(*c)))
    }

    #[test]
    fn test_quadrant_rules() {
        assert_eq!(Quadrant::classify(0.5, 0.5), Quadrant::MotorTheme);
        assert_eq!(Quadrant::classify(0.5, -0.5), Quadrant::BasicTheme);
        assert_eq!(Quadrant::classify(-0.5, 0.5), Quadrant::NicheTheme);
        assert_eq!(Quadrant::classify(-0.5, -0.5), Quadrant::EmergingOrDecliningTheme);
        // Boundary belongs to the central/developed side
        assert_eq!(Quadrant::classify(0.0, 0.0), Quadrant::MotorTheme);
        assert_eq!(Quadrant::classify(-0.1, 0.0), Quadrant::NicheTheme);
        assert_eq!(Quadrant::BasicTheme.to_string(), "Basic/Transversal Theme");
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[]), 0.0);
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), 2.5);
    }

    #[test]
    fn test_normalize() {
        let norm = normalize(&[0.2, 0.5, 0.5]);
        assert!((norm[0] + 1.0).abs() < 1e-12);
        assert_eq!(norm[1], 0.0);
        assert_eq!(norm[2], 0.0);

        assert_eq!(normalize(&[2.0, 2.0, 2.0]), vec![0.0, 0.0, 0.0]);
        assert!(normalize(&[]).is_empty());

        let norm = normalize(&[1.0, 2.0, 10.0]);
        let max = norm.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        assert_eq!(max, 1.0);
    }

    #[test]
    fn test_matrix() {
        let g = graph(&[&["A", "B"], &["A", "B", "C"], &["B", "C"]]);
        let matrix = CooccurrenceMatrix::from_graph(&g);

        assert_eq!(matrix.dim(), 3);
        assert_eq!(matrix.get(0, 1), 2.0);
        assert_eq!(matrix.get(1, 0), 2.0);
        assert_eq!(matrix.get(0, 2), 1.0);
        assert_eq!(matrix.get(1, 1), 0.0);
        assert_eq!(matrix.as_array().sum(), 10.0);
    }

    #[test]
    fn test_density_and_centrality() {
        // {A, B, C} fully linked, C - D and C - E link outward
        let g = graph(&[&["A", "B", "C"], &["A", "B"], &["C", "D"], &["C", "E"], &["D", "E"]]);
        let matrix = CooccurrenceMatrix::from_graph(&g);
        let members: Vec<usize> = ["A", "B", "C"]
            .iter()
            .filter_map(|c| g.index_of(&ConceptLabel::from(*c)))
            .collect();

        // (A,B)=2 (A,C)=1 (B,C)=1
        assert!((matrix.density(&members, 3) - 4.0 / 3.0).abs() < 1e-12);
        assert_eq!(matrix.centrality(&members), 2.0);
        assert_eq!(matrix.density(&members[..1], 1), 0.0);
    }

    #[test]
    fn test_analyze() {
        let g = graph(&[
            &["A", "B", "C"],
            &["A", "B"],
            &["C", "D"],
            &["D", "E", "F"],
            &["D", "E", "F"],
            &["D", "E", "F"],
        ]);
        let clusters = vec![cluster("Cluster 1", &["A", "B", "C"]), cluster("Cluster 2", &["D", "E", "F"])];
        let metrics = ThematicMapAnalyzer::default().analyze(&g, &clusters);

        assert_eq!(metrics.len(), 2);
        // Both clusters share the single C - D link
        assert_eq!(metrics[0].centrality, 1.0);
        assert_eq!(metrics[1].centrality, 1.0);
        assert_eq!(metrics[0].centrality_norm, 0.0);

        // Densities 4/3 and 3: median is their mean
        assert!((metrics[0].density_norm + 1.0).abs() < 1e-12);
        assert!((metrics[1].density_norm - 1.0).abs() < 1e-12);
        assert_eq!(metrics[0].quadrant, Quadrant::BasicTheme);
        assert_eq!(metrics[1].quadrant, Quadrant::MotorTheme);

        assert_eq!(metrics[0].size, 3);
        assert_eq!(metrics[0].leading_concepts[0].as_str(), "A");
    }

    #[test]
    fn test_leading_concepts_limit() {
        let g = graph(&[&["a", "b", "c", "d", "e", "f", "g"], &["g", "a"], &["g", "b"]]);
        let clusters = vec![cluster("Cluster 1", &["a", "b", "c", "d", "e", "f", "g"])];

        let metrics = ThematicMapAnalyzer::default().analyze(&g, &clusters);
        let leading: Vec<&str> = metrics[0].leading_concepts.iter().map(|l| l.as_str()).collect();
        assert_eq!(leading, vec!["a", "b", "c", "d", "e"]);

        let metrics = ThematicMapAnalyzer::new(2).unwrap().analyze(&g, &clusters);
        assert_eq!(metrics[0].leading_concepts.len(), 2);
    }

    #[test]
    fn test_no_clusters() {
        let g = graph(&[&["A", "B"]]);
        assert!(ThematicMapAnalyzer::default().analyze(&g, &[]).is_empty());
        assert!(ThematicMapAnalyzer::new(0).is_err());
    }

    #[test]
    fn test_matrix_cache() {
        let g = graph(&[&["A", "B", "C"]]);
        let cache = MatrixCache::new(NonZeroUsize::new(2).unwrap());
        let clusters = vec![cluster("Cluster 1", &["A", "B", "C"])];
        let analyzer = ThematicMapAnalyzer::default();

        let first = analyzer.analyze_cached(&g, &clusters, &cache);
        let rebuilt = graph(&[&["C", "B", "A"]]);
        let second = analyzer.analyze_cached(&rebuilt, &clusters, &cache);

        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_mismatched_matrix_is_rebuilt() {
        let g = graph(&[&["A", "B", "C"], &["C", "D"], &["D", "E", "F"]]);
        let clusters = vec![
            Cluster::new("Cluster 1", ["A", "B", "C"].map(ConceptLabel::from)),
            Cluster::new("Cluster 2", ["D", "E", "F"].map(ConceptLabel::from)),
        ];
        let other = CooccurrenceMatrix::from_graph(&graph(&[&["A", "B"]]));
        let analyzer = ThematicMapAnalyzer::default();

        let metrics = analyzer.analyze_with_matrix(&g, &other, &clusters);
        assert_eq!(metrics, analyzer.analyze(&g, &clusters));
        assert_eq!(metrics[0].centrality, 1.0);
    }
}
