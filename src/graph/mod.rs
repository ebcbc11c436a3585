//! Concept co-occurrence graph
//!
//! This module implements the weighted undirected graph at the heart of the
//! engine:
//! - Construction from per-document concept lists with incremental weighting
//! - Pruning of weak edges and isolated nodes
//! - Node/edge list export for external serializers

pub mod builder;
pub mod cooccurrence;
pub mod export;

// Re-export main types
pub use builder::{build_cooccurrence_graph, CooccurrenceGraphBuilder};
pub use cooccurrence::CooccurrenceGraph;
pub use export::{EdgeRecord, GraphExport, NodeRecord};
