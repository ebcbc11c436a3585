//! Scopemap CLI: command-line interface for the thematic-map engine
//!
//! Reads concept lists from JSON files and prints graphs, thematic maps and
//! vocabulary comparisons as tables, JSON or CSV.

use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use scopemap::{
    compare, vocabulary, AnalysisConfig, AnalysisReport, ComparisonMetrics, ConceptExtractor,
    ConceptLabel, DocumentConceptSet, DocumentRecord, GraphExport, ThematicAnalysis,
    ThresholdExtractor,
};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(name = "scopemap", version, about = "Concept co-occurrence and thematic-map analysis")]
struct Cli {
    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Analysis configuration file (YAML, or JSON by extension)
    #[arg(long, global = true, env = "SCOPEMAP_CONFIG")]
    config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the co-occurrence graph and the thematic map
    Analyze {
        /// JSON file with concept lists or document records
        input: PathBuf,

        /// Minimum number of documents an edge must appear in
        #[arg(long)]
        min_cooccurrence: Option<u32>,

        /// Minimum number of concepts per cluster
        #[arg(long)]
        min_cluster_size: Option<usize>,

        /// Number of central concepts to report
        #[arg(long)]
        top: Option<usize>,
    },
    /// Print the node and edge lists of the co-occurrence graph
    Graph {
        /// JSON file with concept lists or document records
        input: PathBuf,

        /// Minimum number of documents an edge must appear in
        #[arg(long)]
        min_cooccurrence: Option<u32>,
    },
    /// Compare the vocabularies of two inputs
    Compare {
        first: PathBuf,
        second: PathBuf,
    },
}

/// Accepted input shapes
#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentInput {
    /// `[["concept", ...], ...]`
    ConceptSets(Vec<DocumentConceptSet>),
    /// `[{"id": ..., "concepts": [{"label", "score", "level"}]}, ...]`
    Records(Vec<DocumentRecord>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum VocabularyInput {
    /// `["concept", ...]`
    Labels(Vec<ConceptLabel>),
    Documents(DocumentInput),
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::WARN })
        .init();

    let result = load_config(cli.config.as_deref()).and_then(|config| match &cli.command {
        Commands::Analyze {
            input,
            min_cooccurrence,
            min_cluster_size,
            top,
        } => {
            let mut config = config;
            if let Some(k) = min_cooccurrence {
                config.min_cooccurrence = *k;
            }
            if let Some(size) = min_cluster_size {
                config.min_cluster_size = *size;
            }
            if let Some(n) = top {
                config.top_concepts = *n;
            }
            run_analyze(config, input, &cli.format)
        }
        Commands::Graph {
            input,
            min_cooccurrence,
        } => {
            let mut config = config;
            if let Some(k) = min_cooccurrence {
                config.min_cooccurrence = *k;
            }
            run_graph(config, input, &cli.format)
        }
        Commands::Compare { first, second } => run_compare(&config, first, second, &cli.format),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<AnalysisConfig, Box<dyn std::error::Error>> {
    Ok(match path {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    })
}

fn read_documents(
    path: &Path,
    config: &AnalysisConfig,
) -> Result<Vec<DocumentConceptSet>, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    let input: DocumentInput = serde_json::from_str(&contents)?;
    Ok(into_concept_sets(input, config))
}

fn into_concept_sets(input: DocumentInput, config: &AnalysisConfig) -> Vec<DocumentConceptSet> {
    match input {
        DocumentInput::ConceptSets(sets) => sets,
        DocumentInput::Records(records) => ThresholdExtractor.extract_all(
            &records,
            config.extraction.min_score,
            config.extraction.min_level,
        ),
    }
}

fn read_vocabulary(
    path: &Path,
    config: &AnalysisConfig,
) -> Result<BTreeSet<ConceptLabel>, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    let input: VocabularyInput = serde_json::from_str(&contents)?;
    Ok(match input {
        VocabularyInput::Labels(labels) => labels.into_iter().filter(|l| !l.is_empty()).collect(),
        VocabularyInput::Documents(docs) => vocabulary(&into_concept_sets(docs, config)),
    })
}

fn run_analyze(
    config: AnalysisConfig,
    input: &Path,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let documents = read_documents(input, &config)?;
    let report = ThematicAnalysis::new(config)?.run(&documents)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Csv => print_clusters_csv(&report),
        OutputFormat::Table => print_report_table(&report),
    }

    Ok(())
}

fn run_graph(
    config: AnalysisConfig,
    input: &Path,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let documents = read_documents(input, &config)?;
    let graph = ThematicAnalysis::new(config)?.build_graph(&documents)?;
    let export = graph.export();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&export)?),
        OutputFormat::Csv => {
            println!("source,target,weight");
            for edge in &export.edges {
                println!(
                    "{},{},{}",
                    csv_field(edge.source.as_str()),
                    csv_field(edge.target.as_str()),
                    edge.weight
                );
            }
        }
        OutputFormat::Table => print_graph_table(&export),
    }

    Ok(())
}

fn run_compare(
    config: &AnalysisConfig,
    first: &Path,
    second: &Path,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let v1 = read_vocabulary(first, config)?;
    let v2 = read_vocabulary(second, config)?;
    let metrics = compare(&v1, &v2);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&metrics)?),
        OutputFormat::Csv => {
            println!("concept,set");
            for (set, labels) in comparison_groups(&metrics) {
                for label in labels {
                    println!("{},{}", csv_field(label.as_str()), set);
                }
            }
        }
        OutputFormat::Table => {
            println!("Jaccard: {:.4}", metrics.jaccard);
            println!("Sizes:   {} / {}", metrics.size_1, metrics.size_2);

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Set", "Count", "Concepts"]);
            for (set, labels) in comparison_groups(&metrics) {
                table.add_row(vec![set.to_string(), labels.len().to_string(), join_labels(labels)]);
            }
            println!("{}", table);
        }
    }

    Ok(())
}

fn comparison_groups(metrics: &ComparisonMetrics) -> [(&'static str, &[ConceptLabel]); 3] {
    [
        ("common", metrics.common.as_slice()),
        ("only_first", metrics.exclusive_to_1.as_slice()),
        ("only_second", metrics.exclusive_to_2.as_slice()),
    ]
}

fn print_report_table(report: &AnalysisReport) {
    println!(
        "{} documents, {} concepts, {} co-occurrences",
        report.documents,
        report.graph.nodes.len(),
        report.graph.edges.len()
    );
    println!("Top concepts: {}", join_labels(&report.top_concepts));
    println!("Modularity ({}): {:.4}", report.algorithm, report.modularity);

    if report.clusters.is_empty() {
        println!("(no clusters)");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Cluster",
        "Size",
        "Density",
        "Centrality",
        "Density (norm)",
        "Centrality (norm)",
        "Quadrant",
        "Leading concepts",
    ]);

    for cluster in &report.clusters {
        table.add_row(vec![
            cluster.name.clone(),
            cluster.size.to_string(),
            format!("{:.3}", cluster.density),
            format!("{:.3}", cluster.centrality),
            format!("{:.3}", cluster.density_norm),
            format!("{:.3}", cluster.centrality_norm),
            cluster.quadrant.to_string(),
            join_labels(&cluster.leading_concepts),
        ]);
    }

    println!("{}", table);
    println!("{} cluster(s)", report.clusters.len());
}

fn print_clusters_csv(report: &AnalysisReport) {
    println!("name,size,density,centrality,density_norm,centrality_norm,quadrant,leading_concepts,concepts");
    for cluster in &report.clusters {
        println!(
            "{},{},{},{},{},{},{},{},{}",
            csv_field(&cluster.name),
            cluster.size,
            cluster.density,
            cluster.centrality,
            cluster.density_norm,
            cluster.centrality_norm,
            csv_field(cluster.quadrant.as_str()),
            csv_field(&join_labels(&cluster.leading_concepts)),
            csv_field(&join_labels(&cluster.concepts)),
        );
    }
}

fn print_graph_table(export: &GraphExport) {
    if export.edges.is_empty() {
        println!("(empty graph)");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Source", "Target", "Weight"]);
    for edge in &export.edges {
        table.add_row(vec![
            edge.source.to_string(),
            edge.target.to_string(),
            edge.weight.to_string(),
        ]);
    }

    println!("{}", table);
    println!("{} node(s), {} edge(s)", export.nodes.len(), export.edges.len());
}

fn join_labels(labels: &[ConceptLabel]) -> String {
    labels
        .iter()
        .map(|l| l.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

fn csv_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
