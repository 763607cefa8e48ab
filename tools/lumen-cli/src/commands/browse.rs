//! Catalog browsing with search, facets, sorting and paging.

use anyhow::Result;
use lumen_catalog::prelude::*;

use super::{parse_selection, price_label, BrowseArgs};
use crate::context::Context;

/// Page links shown under the listing.
const VISIBLE_PAGES: usize = 7;

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let selection = parse_selection(&args.filters)?;
    let sort = SortOption::from_str(&args.sort);
    if sort.as_str() != args.sort {
        ctx.output.warn(&format!("Unknown sort '{}', using {}", args.sort, sort.display_name()));
    }

    let per_page = args.per_page.unwrap_or(ctx.config.listing.per_page);
    let mut query = ListingQuery::new()
        .with_selection(selection)
        .with_sort(sort)
        .with_pagination(args.page, per_page);
    if let Some(text) = args.query {
        query = query.with_text(text);
    }

    let products = ctx.catalog().await;
    let listing = query.run(&products);

    if ctx.output.is_json() {
        ctx.output.json(&listing);
        return Ok(());
    }

    ctx.output.header(&format!("Products ({})", sort.display_name()));
    for (key, value) in query.selection.active() {
        ctx.output.kv(key.label(), value);
    }

    if listing.is_empty() {
        ctx.output.info("No products found.");
        return Ok(());
    }

    let widths = [12, 36, 20, 24];
    ctx.output.table_row(&["ID", "NAME", "PRICE", "IMAGE"], &widths);
    ctx.output.rule();
    for product in &listing.items {
        let image = product.primary_image().map(|i| i.url.as_str()).unwrap_or("-");
        ctx.output.table_row(
            &[product.id.as_str(), &product.name, &price_label(product), image],
            &widths,
        );
    }

    let pagination = &listing.pagination;
    ctx.output.info("");
    ctx.output.info(&format!(
        "Showing {}-{} of {} (page {} of {})",
        pagination.start_item(),
        pagination.end_item(),
        pagination.total,
        pagination.page,
        pagination.total_pages
    ));
    if pagination.total_pages > 1 {
        let pages: Vec<String> = pagination
            .page_numbers(VISIBLE_PAGES)
            .into_iter()
            .map(|n| if n == pagination.page { format!("[{n}]") } else { n.to_string() })
            .collect();
        ctx.output.kv("Pages", &pages.join(" "));
    }

    Ok(())
}
