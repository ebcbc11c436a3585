//! Error types for the analysis engine
//!
//! Empty inputs, empty graphs and clusters that do not survive filtering
//! are valid outcomes and never surface here. Only bad parameters or
//! configuration and resource limits do.

use crate::config::ConfigError;
use thiserror::Error;

/// Errors that can occur while building or analysing a co-occurrence graph
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Co-occurrence graph has {nodes} concepts, above the limit of {limit}")]
    GraphTooLarge { nodes: usize, limit: usize },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AnalysisError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        AnalysisError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
