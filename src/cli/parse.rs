//! CLI parse: clap types for Splice. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Splice CLI - intercept commands of a manifest-defined command tree
#[derive(Parser)]
#[command(name = "splice")]
#[command(about = "Transparent handler interception for command-dispatch trees")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Command tree manifest (overrides the configured manifest)
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the nodes of the command tree
    Tree {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Maximum depth to list
        #[arg(long)]
        max_depth: Option<usize>,
    },
    /// Check that interception targets resolve to executable commands
    Check {
        /// Target path, dotted or quoted words (repeatable)
        #[arg(long = "intercept", value_name = "PATH")]
        intercept: Vec<String>,
    },
    /// Install the configured interception and dispatch a command line
    Run {
        /// Target path, dotted or quoted words (repeatable)
        #[arg(long = "intercept", value_name = "PATH")]
        intercept: Vec<String>,
        /// Validate every target before writing any
        #[arg(long)]
        atomic: bool,
        /// Sender name passed to handlers
        #[arg(long, default_value = "console")]
        sender: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Command words to dispatch
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
}
