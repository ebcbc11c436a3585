//! Serializable node and edge lists
//!
//! Enough for external writers to emit GraphML, GEXF, CSV edge lists or
//! similar interchange formats. No file format is produced here.

use crate::concept::ConceptLabel;
use serde::{Deserialize, Serialize};

/// A node of the exported graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Dense node index
    pub id: usize,
    pub label: ConceptLabel,
    pub degree: usize,
    pub weighted_degree: u64,
}

/// An undirected edge of the exported graph (`source < target`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: ConceptLabel,
    pub target: ConceptLabel,
    pub weight: u32,
}

/// Node list plus edge list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}
