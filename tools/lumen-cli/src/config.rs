//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use lumen_catalog::search::{Jitter, CURATED_SIZE, RESULT_LIMIT};
use serde::{Deserialize, Serialize};

/// File names searched for, in order, from the working directory upwards.
pub const CONFIG_NAMES: [&str; 3] = ["lumen.toml", ".lumen.toml", "lumen.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Where the catalog comes from.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Recommendation settings.
    #[serde(default)]
    pub recommend: RecommendConfig,

    /// Listing settings.
    #[serde(default)]
    pub listing: ListingConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Problems that make the config unusable.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.catalog.path.trim().is_empty() {
            problems.push("catalog.path is empty".to_string());
        }
        if self.recommend.limit == 0 {
            problems.push("recommend.limit must be at least 1".to_string());
        }
        if self.recommend.curated_size == 0 {
            problems.push("recommend.curated_size must be at least 1".to_string());
        }
        if !(1..=100).contains(&self.listing.per_page) {
            problems.push("listing.per_page must be between 1 and 100".to_string());
        }
        if self.logging.level.parse::<tracing::Level>().is_err() {
            problems.push(format!("logging.level '{}' is not a log level", self.logging.level));
        }
        problems
    }
}

/// Catalog source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Path to a products JSON export, relative to the config file.
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

fn default_catalog_path() -> String {
    "catalog.json".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

/// Recommendation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendConfig {
    /// Results shown when a facet is selected.
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Products sampled when nothing is selected.
    #[serde(default = "default_curated_size")]
    pub curated_size: usize,

    /// Tie-breaking jitter.
    #[serde(default)]
    pub jitter: Jitter,

    /// Fixed RNG seed for reproducible output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Pause before showing results, in milliseconds.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

fn default_limit() -> usize {
    RESULT_LIMIT
}

fn default_curated_size() -> usize {
    CURATED_SIZE
}

fn default_delay_ms() -> u64 {
    1200
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            curated_size: default_curated_size(),
            jitter: Jitter::Enabled,
            seed: None,
            delay_ms: default_delay_ms(),
        }
    }
}

/// Listing settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingConfig {
    /// Products per page.
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

fn default_per_page() -> usize {
    24
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines (for development).
    #[default]
    Human,
    /// JSON lines (for log aggregation).
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::Human,
        }
    }
}

/// Generate a default lumen.toml config file.
pub fn generate_default_config(catalog_path: &str) -> String {
    format!(
        r#"# Lumen storefront configuration

[catalog]
path = "{catalog_path}"

[recommend]
limit = {limit}
curated_size = {curated}
jitter = "enabled"
# seed = 42
delay_ms = 1200

[listing]
per_page = 24

[logging]
level = "warn"
format = "human"
"#,
        catalog_path = catalog_path,
        limit = RESULT_LIMIT,
        curated = CURATED_SIZE,
    )
}
