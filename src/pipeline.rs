//! End-to-end thematic analysis
//!
//! concept lists -> co-occurrence graph -> {central concepts, communities}
//! -> thematic map.

use crate::analysis::{
    partition_modularity, top_concepts, ClusterMetrics, CommunityDetector, ThematicMapAnalyzer,
};
use crate::concept::{ConceptLabel, DocumentConceptSet};
use crate::config::AnalysisConfig;
use crate::error::AnalysisResult;
use crate::extract::{ConceptExtractor, DocumentRecord, ThresholdExtractor};
use crate::graph::{CooccurrenceGraph, CooccurrenceGraphBuilder, GraphExport};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Everything one analysis run produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub documents: usize,
    pub graph: GraphExport,
    pub top_concepts: Vec<ConceptLabel>,
    /// Newman modularity of the full (unfiltered) partition
    pub modularity: f64,
    pub algorithm: String,
    pub clusters: Vec<ClusterMetrics>,
}

/// Configured analysis pipeline
#[derive(Debug)]
pub struct ThematicAnalysis {
    config: AnalysisConfig,
    builder: CooccurrenceGraphBuilder,
    detector: CommunityDetector,
    analyzer: ThematicMapAnalyzer,
}

impl ThematicAnalysis {
    pub fn new(config: AnalysisConfig) -> AnalysisResult<Self> {
        config.validate()?;

        let builder = CooccurrenceGraphBuilder::new()
            .with_min_cooccurrence(config.min_cooccurrence)
            .with_max_nodes(config.max_nodes);
        let detector = CommunityDetector::new(config.algorithm.build(), config.min_cluster_size)?;
        let analyzer = ThematicMapAnalyzer::new(config.leading_concepts)?;

        Ok(Self {
            config,
            builder,
            detector,
            analyzer,
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Build the co-occurrence graph only
    pub fn build_graph(&self, documents: &[DocumentConceptSet]) -> AnalysisResult<CooccurrenceGraph> {
        self.builder.build(documents)
    }

    /// Run the full analysis on pre-extracted concept lists
    pub fn run(&self, documents: &[DocumentConceptSet]) -> AnalysisResult<AnalysisReport> {
        info!(
            "Analysing {} documents (min_cooccurrence = {}, algorithm = {})",
            documents.len(),
            self.config.min_cooccurrence,
            self.detector.algorithm_name()
        );

        let graph = self.builder.build(documents)?;
        if graph.is_empty() {
            warn!("Co-occurrence graph is empty, no themes to report");
        }

        let top = top_concepts(&graph, self.config.top_concepts);
        let partition = self.detector.partition(&graph);
        let modularity = partition_modularity(&graph, &partition);
        debug!("Partition: {} communities, modularity {:.4}", partition.len(), modularity);

        let clusters = self.detector.filter(&partition);
        let metrics = self.analyzer.analyze(&graph, &clusters);
        info!(
            "Thematic map: {} of {} communities retained (min_size = {})",
            metrics.len(),
            partition.len(),
            self.detector.min_size()
        );

        Ok(AnalysisReport {
            documents: documents.len(),
            graph: graph.export(),
            top_concepts: top,
            modularity,
            algorithm: self.detector.algorithm_name().to_string(),
            clusters: metrics,
        })
    }

    /// Extract concepts with the configured thresholds, then run the analysis
    pub fn run_records(&self, records: &[DocumentRecord]) -> AnalysisResult<AnalysisReport> {
        let extraction = &self.config.extraction;
        let documents = ThresholdExtractor.extract_all(records, extraction.min_score, extraction.min_level);
        self.run(&documents)
    }
}
