//! Filter options discovered from the catalog.

use anyhow::{bail, Result};
use lumen_catalog::prelude::*;

use super::FiltersArgs;
use crate::context::Context;

/// Run the filters command.
pub async fn run(args: FiltersArgs, ctx: &Context) -> Result<()> {
    let products = ctx.catalog().await;
    let options = FilterOptions::from_catalog(&products);

    if let Some(name) = args.facet.as_deref() {
        let key: FacetKey = name.parse()?;
        let Some(facet) = options.facet(&key) else {
            bail!("No '{}' values in the catalog", name);
        };

        if ctx.output.is_json() {
            ctx.output.json(facet);
        } else {
            print_facet(facet, ctx);
        }
        return Ok(());
    }

    if ctx.output.is_json() {
        ctx.output.json(&options);
        return Ok(());
    }

    if options.is_empty() {
        ctx.output.info("The catalog has no filterable attributes.");
        return Ok(());
    }

    ctx.output.header(&format!("Filters for {} products", products.len()));
    for facet in options.facets() {
        print_facet(facet, ctx);
    }

    Ok(())
}

fn print_facet(facet: &FacetOptions, ctx: &Context) {
    ctx.output.info("");
    ctx.output.kv(
        &facet.label,
        &format!("{} values, select with {}=<value>", facet.concrete_values().len(), facet.key),
    );
    for value in &facet.values {
        ctx.output.list_item(value);
    }
}
