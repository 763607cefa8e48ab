//! Configuration management commands.

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_NAMES};
use crate::context::{load_catalog, Context};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { catalog, force } => init_config(&catalog, force, ctx),
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("File", &path.display().to_string()),
        None => ctx.output.kv("File", "(defaults)"),
    }
    ctx.output.info("");
    ctx.output.info(&toml::to_string_pretty(&ctx.config)?);
    Ok(())
}

fn init_config(catalog: &str, force: bool, ctx: &Context) -> Result<()> {
    let path = std::env::current_dir()?.join(CONFIG_NAMES[0]);
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    std::fs::write(&path, generate_default_config(catalog))?;
    ctx.output.success(&format!("Wrote {}", path.display()));
    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    let mut problems = ctx.config.problems();

    let catalog_path = ctx.catalog_path();
    match load_catalog(&catalog_path).await {
        Ok(products) if products.is_empty() => {
            ctx.output.warn(&format!("{} has no products", catalog_path.display()));
        }
        Ok(products) => {
            ctx.output
                .success(&format!("Catalog OK: {} products", products.len()));
        }
        Err(e) => problems.push(format!("{e:#}")),
    }

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "valid": problems.is_empty(),
            "problems": problems,
        }));
    }

    if problems.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for problem in &problems {
        ctx.output.list_item(problem);
    }
    bail!("{} problem(s) found", problems.len());
}
