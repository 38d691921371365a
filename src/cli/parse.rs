//! CLI parse: clap types for graphdb-load. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// graphdb-load - register compiled artifacts with a graph database
#[derive(Parser)]
#[command(name = "graphdb-load")]
#[command(about = "Load compiled sources, bytecodes and compilations into a graph database")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
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

    /// Log file path (when output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show every request a load would issue, without contacting a store
    Plan {
        /// Compilation batch (JSON object keyed by unit)
        batch: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Skip the bytecodes stage
        #[arg(long)]
        no_bytecodes: bool,
    },
    /// Load a batch into the configured endpoint
    Load {
        /// Compilation batch (JSON object keyed by unit)
        batch: PathBuf,
        /// GraphQL endpoint URL (overrides endpoint.url)
        #[arg(long)]
        endpoint: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Skip the bytecodes stage
        #[arg(long)]
        no_bytecodes: bool,
    },
    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
}
