use crate::search::engine::{
    SearchOptions, DEFAULT_MAX_RELATED, DEFAULT_MAX_RESULTS, DEFAULT_MIN_SCORE,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// docsearch - Keyword search for documentation trees
#[derive(Parser, Debug)]
#[command(name = "docsearch")]
#[command(about = "Build a searchable index over Markdown documentation and query it", long_about = None)]
#[command(version)]
#[command(subcommand_required = false)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Search query (when used without subcommand)
    #[arg(value_name = "QUERY")]
    pub query: Vec<String>,

    /// Documentation root directory (default: docs)
    #[arg(long, global = true)]
    pub docs_dir: Option<PathBuf>,

    /// Path to the full index (default: <docs-dir>/.doc-index.json)
    #[arg(long, global = true)]
    pub index: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(flatten)]
    pub search: SearchArgs,
}

/// Ranking and output options shared by top-level queries and `search`
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Maximum number of results to return
    #[arg(short, long, default_value_t = DEFAULT_MAX_RESULTS)]
    pub limit: usize,

    /// Minimum relevance score (0.0 - 1.0)
    #[arg(short, long, default_value_t = DEFAULT_MIN_SCORE)]
    pub threshold: f64,

    /// Related documents listed for the top result
    #[arg(short, long, default_value_t = DEFAULT_MAX_RELATED)]
    pub related: usize,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    pub fn options(&self) -> SearchOptions {
        SearchOptions {
            max_results: self.limit,
            min_score: self.threshold,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the full index and the metadata view
    Build {
        /// Path to the metadata view (default: <docs-dir>/.doc-metadata.json)
        #[arg(long)]
        metadata: Option<PathBuf>,
    },
    /// Search the documentation index
    Search {
        /// Search query
        #[arg(required = true)]
        query: Vec<String>,
        #[command(flatten)]
        args: SearchArgs,
    },
    /// List documents related to an indexed document
    Related {
        /// Indexed path of the reference document (e.g. docs/guide.md)
        path: String,
        /// Maximum number of related documents
        #[arg(short, long, default_value_t = DEFAULT_MAX_RELATED)]
        limit: usize,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show index statistics
    Stats,
}
