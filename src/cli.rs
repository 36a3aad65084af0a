//! CLI definitions for scopekit.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// scopekit CLI.
#[derive(Parser)]
#[command(name = "scopekit")]
#[command(about = "Inspect scoped API graphs and configuration")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        default_value = "scopekit.toml",
        env = "SCOPEKIT_CONFIG",
        global = true
    )]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Print the transfers and factory build order of an API graph
    Plan {
        /// Graph file (TOML)
        graph: PathBuf,
    },

    /// Load and validate the configuration file
    CheckConfig,
}
