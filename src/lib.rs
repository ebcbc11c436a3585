//! Scopemap
//!
//! Concept co-occurrence networks and thematic maps for delimiting the
//! scope of a research topic.
//!
//! # Pipeline
//!
//! - Concept lists per document (from [`extract`] or any upstream source)
//! - Weighted undirected co-occurrence graph ([`graph`])
//! - Central concept ranking by degree centrality ([`analysis::centrality`])
//! - Modularity-based community detection ([`analysis::community`])
//! - Strategic diagram: density, centrality, median normalization and
//!   quadrant classification ([`analysis::thematic_map`])
//! - Vocabulary comparison between snapshots ([`analysis::comparison`])
//!
//! Everything here is synchronous, pure and free of I/O apart from loading
//! a configuration file.
//!
//! ## Example Usage
//!
//! ```rust
//! use scopemap::{AnalysisConfig, DocumentConceptSet, ThematicAnalysis};
//!
//! let documents: Vec<DocumentConceptSet> = vec![
//!     ["Ecology", "Biodiversity", "Climate change"].into_iter().collect(),
//!     ["Ecology", "Biodiversity"].into_iter().collect(),
//!     ["Climate change", "Agriculture"].into_iter().collect(),
//! ];
//!
//! let analysis = ThematicAnalysis::new(AnalysisConfig::default()).unwrap();
//! let report = analysis.run(&documents).unwrap();
//!
//! assert_eq!(report.graph.nodes.len(), 4);
//! assert_eq!(report.top_concepts[0].as_str(), "Climate change");
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod analysis;
pub mod concept;
pub mod config;
pub mod error;
pub mod extract;
pub mod graph;
pub mod pipeline;

// Re-export main types for convenience
pub use concept::{vocabulary, ConceptLabel, DocumentConceptSet};
pub use error::{AnalysisError, AnalysisResult};

pub use graph::{
    build_cooccurrence_graph, CooccurrenceGraph, CooccurrenceGraphBuilder, EdgeRecord, GraphExport,
    NodeRecord,
};

pub use analysis::{
    compare, compare_edges, rank_by_degree_centrality, top_concepts, Cluster, ClusterMetrics,
    CommunityDetectionAlgorithm, CommunityDetector, ComparisonMetrics, CooccurrenceMatrix,
    EdgeComparisonMetrics, GreedyModularity, LabelPropagation, MatrixCache, Quadrant,
    ThematicMapAnalyzer,
};

pub use config::{AnalysisConfig, CommunityAlgorithm, ConfigError, ConfigResult, ExtractionConfig};
pub use extract::{ConceptExtractor, DocumentRecord, ScoredConcept, ThresholdExtractor};
pub use pipeline::{AnalysisReport, ThematicAnalysis};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
