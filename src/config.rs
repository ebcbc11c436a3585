//! Analysis configuration
//!
//! Loaded from YAML or JSON. Every field has a default, so a partial file
//! (or none at all) is a valid configuration.

use crate::analysis::{
    CommunityDetectionAlgorithm, GreedyModularity, LabelPropagation, DEFAULT_LEADING_CONCEPTS,
    DEFAULT_MIN_CLUSTER_SIZE, DEFAULT_TOP_CONCEPTS,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Partitioning algorithm selection
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommunityAlgorithm {
    #[default]
    GreedyModularity,
    LabelPropagation {
        #[serde(default = "default_max_iterations")]
        max_iterations: usize,
        #[serde(default = "default_seed")]
        seed: u64,
    },
}

fn default_max_iterations() -> usize {
    100
}

fn default_seed() -> u64 {
    42
}

impl CommunityAlgorithm {
    pub fn build(&self) -> Box<dyn CommunityDetectionAlgorithm> {
        match *self {
            CommunityAlgorithm::GreedyModularity => Box::new(GreedyModularity),
            CommunityAlgorithm::LabelPropagation { max_iterations, seed } => {
                Box::new(LabelPropagation { max_iterations, seed })
            }
        }
    }
}

/// Thresholds applied when extracting concepts from document records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Minimum relevance score, in `[0, 1]`
    pub min_score: f64,
    /// Minimum abstraction level
    pub min_level: u32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_score: 0.3,
            min_level: 0,
        }
    }
}

/// Configuration of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Edges co-occurring in fewer documents are pruned
    pub min_cooccurrence: u32,
    /// Number of central concepts to report
    pub top_concepts: usize,
    /// Communities smaller than this are dropped
    pub min_cluster_size: usize,
    /// Leading concepts reported per cluster
    pub leading_concepts: usize,
    /// Upper bound on graph size (None = unbounded)
    pub max_nodes: Option<usize>,
    pub algorithm: CommunityAlgorithm,
    pub extraction: ExtractionConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_cooccurrence: 1,
            top_concepts: DEFAULT_TOP_CONCEPTS,
            min_cluster_size: DEFAULT_MIN_CLUSTER_SIZE,
            leading_concepts: DEFAULT_LEADING_CONCEPTS,
            max_nodes: Some(1000),
            algorithm: CommunityAlgorithm::default(),
            extraction: ExtractionConfig::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_yaml_str(s: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(s: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json` file, or YAML for any other extension
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            _ => Self::from_yaml_str(&contents),
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.min_cluster_size == 0 {
            return Err(invalid("min_cluster_size", "must be at least 1"));
        }
        if self.leading_concepts == 0 {
            return Err(invalid("leading_concepts", "must be at least 1"));
        }
        if self.max_nodes == Some(0) {
            return Err(invalid("max_nodes", "must be at least 1 when set"));
        }
        let score = self.extraction.min_score;
        if !(0.0..=1.0).contains(&score) {
            return Err(invalid("extraction.min_score", format!("{} is outside [0, 1]", score)));
        }
        if let CommunityAlgorithm::LabelPropagation { max_iterations: 0, .. } = self.algorithm {
            return Err(invalid("algorithm.max_iterations", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
