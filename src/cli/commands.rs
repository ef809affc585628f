//! CLI commands and argument parsing

use crate::config::GraphFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// JSON Composer CLI
#[derive(Parser, Debug)]
#[command(name = "json-composer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Engine configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Discover the concept graph of each group
    Discover {
        /// Manifest listing the source groups
        #[arg(short, long)]
        manifest: PathBuf,
    },

    /// Compose all groups and encode the result
    Compose {
        /// Manifest listing the source groups
        #[arg(short, long)]
        manifest: PathBuf,

        /// Output format (overrides the config file)
        #[arg(short, long)]
        format: Option<GraphFormat>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start HTTP server mode
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}
