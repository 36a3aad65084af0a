//! scopekit - scoped context and API graph inspection
//!
//! Main entry point for the scopekit CLI.

mod cli;

use std::path::Path;

use anyhow::{Context as _, bail};
use clap::Parser;
use tracing::{debug, info, warn};

use scopekit::bootstrap::root_context;
use scopekit::config::{Config, ConfigLoader, ConfigValidator, ValidationResult};
use scopekit::graph::GraphFile;
use scopekit::logging::init_tracing;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config {}", cli.config.display()))?;
    init_tracing(&config.logging)?;

    let report = ConfigValidator::validate(&config)?;

    match cli.command {
        Commands::Plan { graph } => {
            warn_invalid(&report);
            run_plan(&config, &graph)
        }
        Commands::CheckConfig => check_config(&cli.config, &report),
    }
}

fn warn_invalid(report: &ValidationResult) {
    for error in &report.errors {
        warn!(path = %error.path, "Invalid configuration: {}", error.message);
    }
    for warning in &report.warnings {
        warn!(path = %warning.path, "{}", warning.message);
    }
}

fn run_plan(config: &Config, graph_path: &Path) -> anyhow::Result<()> {
    let root = root_context(&config.context);
    debug!(context = ?root, "Root context ready");

    let graph = GraphFile::load(graph_path)
        .with_context(|| format!("Failed to read graph {}", graph_path.display()))?;
    let summary = graph.plan()?;

    info!(
        transfers = summary.transfers.len(),
        factories = summary.build_order.len(),
        "Graph resolves"
    );
    print!("{summary}");
    Ok(())
}

fn check_config(path: &Path, report: &ValidationResult) -> anyhow::Result<()> {
    for error in &report.errors {
        println!("error: {}: {}", error.path, error.message);
    }
    for warning in &report.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }

    if !report.is_valid() {
        bail!(
            "{} has {} configuration error(s)",
            path.display(),
            report.errors.len()
        );
    }
    println!("{} is valid", path.display());
    Ok(())
}
