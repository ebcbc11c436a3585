//! Analysis over co-occurrence graphs
//!
//! - central concept ranking
//! - community detection
//! - thematic map (strategic diagram) metrics
//! - vocabulary and edge-set comparison

pub mod centrality;
pub mod community;
pub mod comparison;
pub mod thematic_map;

pub use centrality::{rank_by_degree_centrality, top_concepts, DEFAULT_TOP_CONCEPTS};
pub use community::{
    partition_modularity, Cluster, CommunityDetectionAlgorithm, CommunityDetector, GreedyModularity,
    LabelPropagation, DEFAULT_MIN_CLUSTER_SIZE,
};
pub use comparison::{compare, compare_edges, jaccard, ComparisonMetrics, ConceptPair, EdgeComparisonMetrics};
pub use thematic_map::{
    median, normalize, ClusterMetrics, CooccurrenceMatrix, MatrixCache, Quadrant, ThematicMapAnalyzer,
    DEFAULT_LEADING_CONCEPTS,
};
