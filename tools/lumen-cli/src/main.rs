//! Lumen CLI - browse and get recommendations from a storefront catalog.
//!
//! Commands:
//! - `lumen recommend` - Rank products for a room / lighting / style choice
//! - `lumen filters` - Show filter options discovered from the catalog
//! - `lumen browse` - Search, filter, sort and page through products
//! - `lumen config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{BrowseArgs, ConfigArgs, FiltersArgs, RecommendArgs};

/// Lumen - storefront catalog tools
#[derive(Parser)]
#[command(name = "lumen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Catalog JSON file (overrides the config)
    #[arg(long, global = true)]
    catalog: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend products for a room
    Recommend(RecommendArgs),

    /// List filter options found in the catalog
    Filters(FiltersArgs),

    /// Search and page through the catalog
    Browse(BrowseArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = match context::Context::load(cli.config.as_deref(), cli.catalog.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    logging::init(&ctx.config.logging, cli.verbose);
    tracing::debug!(config = ?ctx.config_path, "context loaded");

    // Execute command
    let result = match cli.command {
        Commands::Recommend(args) => commands::recommend::run(args, &ctx).await,
        Commands::Filters(args) => commands::filters::run(args, &ctx).await,
        Commands::Browse(args) => commands::browse::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
