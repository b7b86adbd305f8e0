//! Command line argument parsing for the Spyglass CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::document::{DocumentId, DocumentStatus};
use crate::search::ExecutionPolicy;

/// Spyglass - an in-memory TF-IDF document search engine
#[derive(Parser, Debug, Clone)]
#[command(name = "spyglass")]
#[command(about = "An in-memory TF-IDF document search engine")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SpyglassArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Space-separated stop words
    #[arg(short, long, default_value = "")]
    pub stop_words: String,

    /// Document file (JSONL: one {"id", "text", "status", "ratings"} object per line)
    #[arg(short, long, value_name = "DOCUMENT_FILE")]
    pub documents: PathBuf,

    /// Worker threads for parallel evaluation (default: number of CPUs)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SpyglassArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n + 1,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Find the top documents for a query
    Search(SearchArgs),

    /// Show which query words occur in a document
    Match(MatchArgs),

    /// Run every query of a file and print the results
    Batch(BatchArgs),

    /// Remove documents with identical word sets
    Dedup,
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Query string (words, -minus words)
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Only return documents with this status
    #[arg(long)]
    pub status: Option<DocumentStatus>,

    /// Evaluate the query on the worker pool
    #[arg(long)]
    pub parallel: bool,
}

/// Arguments for matching a query against one document
#[derive(Parser, Debug, Clone)]
pub struct MatchArgs {
    /// Query string (words, -minus words)
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Document to match against
    #[arg(value_name = "DOCUMENT_ID", allow_negative_numbers = true)]
    pub id: DocumentId,

    /// Evaluate the query on the worker pool
    #[arg(long)]
    pub parallel: bool,
}

/// Arguments for batch query processing
#[derive(Parser, Debug, Clone)]
pub struct BatchArgs {
    /// File with one query per line
    #[arg(value_name = "QUERY_FILE")]
    pub queries: PathBuf,

    /// Print a single flattened list instead of one list per query
    #[arg(long)]
    pub joined: bool,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

impl SearchArgs {
    pub fn policy(&self) -> ExecutionPolicy {
        policy_for(self.parallel)
    }
}

impl MatchArgs {
    pub fn policy(&self) -> ExecutionPolicy {
        policy_for(self.parallel)
    }
}

fn policy_for(parallel: bool) -> ExecutionPolicy {
    if parallel {
        ExecutionPolicy::Parallel
    } else {
        ExecutionPolicy::Sequential
    }
}
