//! CLI command implementations.

pub mod browse;
pub mod config;
pub mod filters;
pub mod recommend;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use lumen_catalog::prelude::*;

/// Arguments for the recommend command.
#[derive(Args)]
pub struct RecommendArgs {
    /// Room type (e.g. Kitchen, Bedroom) or "All".
    #[arg(long, default_value = "All")]
    pub room_type: String,

    /// Room size (Small, Medium, Large) or "All".
    #[arg(long, default_value = "All")]
    pub room_size: String,

    /// Lighting type (Ambient, Task, Accent, Decorative) or "All".
    #[arg(long, default_value = "All")]
    pub lighting: String,

    /// Style (e.g. Modern, Rustic) or "All".
    #[arg(long, default_value = "All")]
    pub style: String,

    /// Pick each facet from a menu.
    #[arg(short, long)]
    pub interactive: bool,

    /// Maximum results (overrides the config).
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// RNG seed for reproducible jitter and sampling.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Rank by keyword points only.
    #[arg(long)]
    pub no_jitter: bool,

    /// Skip the processing pause.
    #[arg(long)]
    pub no_delay: bool,
}

/// Arguments for the filters command.
#[derive(Args)]
pub struct FiltersArgs {
    /// Show only this facet (e.g. color, wattage, application, or an attribute name).
    #[arg(short, long)]
    pub facet: Option<String>,
}

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Text to search for in names and descriptions.
    #[arg(short, long)]
    pub query: Option<String>,

    /// Facet filter as key=value; repeatable.
    #[arg(short, long = "filter", value_name = "KEY=VALUE")]
    pub filters: Vec<String>,

    /// Sort order: featured, name_asc, name_desc, price_asc, price_desc.
    #[arg(short, long, default_value = "featured")]
    pub sort: String,

    /// Page number.
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Products per page (overrides the config).
    #[arg(long)]
    pub per_page: Option<usize>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Catalog path to write into the config.
        #[arg(long, default_value = "catalog.json")]
        catalog: String,
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file and the catalog it points at.
    Validate,
}

/// Parse `key=value` facet filters into a selection.
pub fn parse_selection(filters: &[String]) -> Result<FilterSelection> {
    let mut selection = FilterSelection::new();
    for raw in filters {
        let Some((key, value)) = raw.split_once('=') else {
            bail!("Invalid filter '{}': expected KEY=VALUE", raw);
        };
        if key.trim().is_empty() {
            bail!("Invalid filter '{}': empty key", raw);
        }
        let key: FacetKey = key.parse()?;
        selection.set(key, value);
    }
    Ok(selection)
}

/// Price column text: a single price or a "min - max" range.
pub fn price_label(product: &Product) -> String {
    match product.price_range() {
        Some((min, max)) if min.amount_cents == max.amount_cents => min.display(),
        Some((min, max)) => format!("{} - {}", min.display(), max.display()),
        None => "-".to_string(),
    }
}
