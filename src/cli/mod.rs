//! Command-line interface for guide-annotate.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **annotate**: Run annotation models over a guide table
//! - **models**: List the registered models
//!
//! ## Usage
//!
//! ```text
//! # Tag guides with exon and repeat overlaps
//! guide-annotate annotate guides.tsv --bed exons:exons.bed,repeats:rmsk.bed.gz
//!
//! # Guides found on renamed scaffolds: move them back to chromosome coordinates first
//! guide-annotate annotate guides.tsv --bed exons:exons.bed --remap scaffolds.txt
//!
//! # JSON output for scripting
//! guide-annotate --format json annotate guides.tsv --bed exons:exons.bed
//! ```

use clap::{Parser, Subcommand};

pub mod annotate;
pub mod models;

#[derive(Parser)]
#[command(name = "guide-annotate")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Annotate CRISPR guide targets with genomic features")]
#[command(
    long_about = "guide-annotate enriches a table of candidate CRISPR guide targets with named annotations.\n\nThe BED annotator tags each guide with the names of BED features overlapping its position and can first remap guides found on renamed working contigs back to the original genome's coordinates."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "tsv")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Annotate a guide table
    Annotate(annotate::AnnotateArgs),

    /// List available annotation models
    Models,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
