//! CLI commands and argument parsing

use crate::types::ApiVersion;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Page through Jira issue search results
#[derive(Parser, Debug)]
#[command(name = "issue-pager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured search API version
    #[arg(long, global = true)]
    pub api_version: Option<ApiVersion>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a JQL query and print the matching issues
    Search {
        /// JQL expression
        jql: String,

        /// Sort key appended as ORDER BY (ignored if the JQL already sorts)
        #[arg(long, default_value = "updated")]
        order_by: String,

        /// Do not add an ORDER BY clause
        #[arg(long, conflicts_with = "order_by")]
        no_order: bool,

        /// Records per search call (defaults to the configured page size)
        #[arg(short, long)]
        limit: Option<u32>,

        /// Stop after the first page of results
        #[arg(long)]
        single_page: bool,

        /// Fields to request (comma-separated, defaults to the configured projection)
        #[arg(long, value_delimiter = ',')]
        fields: Option<Vec<String>>,

        /// Skip this many leading matches
        #[arg(long)]
        start_at: Option<u64>,

        /// Always hit the server
        #[arg(long)]
        no_cache: bool,
    },

    /// Validate the configuration
    Validate,

    /// Print the default field projection
    Fields,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one issue per line)
    Json,
    /// Pretty-printed JSON array
    Pretty,
}
