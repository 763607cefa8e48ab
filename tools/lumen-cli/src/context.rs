//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use lumen_catalog::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Directory relative paths in the config resolve against.
    pub base_dir: PathBuf,
    /// Config file in use, if any.
    pub config_path: Option<PathBuf>,
    /// Catalog path given on the command line.
    catalog_override: Option<PathBuf>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, catalog: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = PathBuf::from(path);
                (CliConfig::load(&path)?, Some(path))
            }
            None => match Self::find_config(&cwd, &output) {
                Some((path, config)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        let base_dir = config_path
            .as_deref()
            .and_then(Path::parent)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or(cwd);

        Ok(Self {
            config,
            output,
            base_dir,
            config_path,
            catalog_override: catalog.map(PathBuf::from),
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path, output: &Output) -> Option<(PathBuf, CliConfig)> {
        for dir in start.ancestors() {
            for name in CONFIG_NAMES {
                let path = dir.join(name);
                if !path.exists() {
                    continue;
                }
                match CliConfig::load(&path) {
                    Ok(config) => return Some((path, config)),
                    Err(e) => output.warn(&format!("Ignoring {}: {e:#}", path.display())),
                }
            }
        }
        None
    }

    /// Resolved catalog path.
    pub fn catalog_path(&self) -> PathBuf {
        match &self.catalog_override {
            Some(path) => path.clone(),
            None => self.base_dir.join(&self.config.catalog.path),
        }
    }

    /// Load the catalog, degrading to an empty one with a warning on failure.
    pub async fn catalog(&self) -> Vec<Product> {
        let path = self.catalog_path();
        match load_catalog(&path).await {
            Ok(products) => {
                self.output
                    .debug(&format!("Loaded {} products from {}", products.len(), path.display()));
                products
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %format!("{e:#}"), "catalog unavailable");
                self.output.warn(&format!("Could not load products: {e:#}"));
                Vec::new()
            }
        }
    }

    /// RNG for scoring: seeded when a seed is configured.
    pub fn rng(&self, seed: Option<u64>) -> StdRng {
        match seed.or(self.config.recommend.seed) {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Read and decode a catalog file.
pub async fn load_catalog(path: &Path) -> Result<Vec<Product>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
    let products = parse_catalog(&content)
        .with_context(|| format!("Failed to parse catalog: {}", path.display()))?;
    tracing::info!(path = %path.display(), products = products.len(), "catalog loaded");
    Ok(products)
}
