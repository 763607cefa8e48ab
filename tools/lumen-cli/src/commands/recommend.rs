//! Room-based product recommendations.

use std::time::Duration;

use anyhow::{Context as _, Result};
use chrono::{DateTime, Utc};
use dialoguer::{theme::ColorfulTheme, Select};
use lumen_catalog::prelude::*;
use lumen_catalog::search::values_for;
use serde::Serialize;

use super::{price_label, RecommendArgs};
use crate::context::Context;
use crate::output::score_badge;

/// Run the recommend command.
pub async fn run(args: RecommendArgs, ctx: &Context) -> Result<()> {
    let query = if args.interactive && ctx.output.is_interactive() {
        prompt_query()?
    } else {
        RecommendQuery::new()
            .with(RecommendFacet::RoomType, args.room_type.as_str())
            .with(RecommendFacet::RoomSize, args.room_size.as_str())
            .with(RecommendFacet::LightingType, args.lighting.as_str())
            .with(RecommendFacet::Style, args.style.as_str())
    };

    for (facet, value) in query.active() {
        if values_for(facet).all(|known| !known.eq_ignore_ascii_case(value)) {
            ctx.output.warn(&format!(
                "Unknown {} '{}'; only bonus keywords will count",
                facet.display_name(),
                value
            ));
        }
    }

    let products = ctx.catalog().await;

    let settings = &ctx.config.recommend;
    let jitter = if args.no_jitter { Jitter::Disabled } else { settings.jitter };
    let recommender = Recommender::new()
        .with_limit(args.limit.unwrap_or(settings.limit))
        .with_curated_size(settings.curated_size)
        .with_jitter(jitter);

    let spinner = ctx.output.spinner("Finding the right lights...");
    if !args.no_delay && settings.delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(settings.delay_ms)).await;
    }
    let mut rng = ctx.rng(args.seed);
    let picks = recommender.recommend(&products, &query, &mut rng);
    spinner.finish_and_clear();

    if ctx.output.is_json() {
        ctx.output.json(&RecommendReport {
            generated_at: Utc::now(),
            query: &query,
            catalog_size: products.len(),
            recommendations: &picks,
        });
        return Ok(());
    }

    print_picks(&picks, &query, ctx);
    Ok(())
}

#[derive(Serialize)]
struct RecommendReport<'a> {
    generated_at: DateTime<Utc>,
    query: &'a RecommendQuery,
    catalog_size: usize,
    recommendations: &'a Recommendations<'a>,
}

fn prompt_query() -> Result<RecommendQuery> {
    let theme = ColorfulTheme::default();
    let mut query = RecommendQuery::new();

    for facet in RecommendFacet::ALL {
        let mut items = vec!["All"];
        items.extend(values_for(facet));

        let chosen = Select::with_theme(&theme)
            .with_prompt(facet.display_name())
            .items(&items)
            .default(0)
            .interact()
            .context("Selection cancelled")?;

        query = query.with(facet, items[chosen]);
    }

    Ok(query)
}

fn print_picks(picks: &Recommendations<'_>, query: &RecommendQuery, ctx: &Context) {
    if picks.curated {
        ctx.output.header("Curated selection");
    } else {
        ctx.output.header("Recommended for you");
        for (facet, value) in query.active() {
            ctx.output.kv(facet.display_name(), value);
        }
    }

    if picks.is_empty() {
        ctx.output.info("No products matched. Try widening your choices.");
        return;
    }

    let widths = [8, 36, 20, 30];
    ctx.output.table_row(&["SCORE", "PRODUCT", "PRICE", "WHY"], &widths);
    ctx.output.rule();

    for pick in &picks.items {
        let why = reasons(pick);
        ctx.output.table_row(
            &[
                &score_badge(pick.score),
                &pick.product.name,
                &price_label(pick.product),
                &why,
            ],
            &widths,
        );
    }

    ctx.output.info("");
    if picks.curated {
        ctx.output.info(&format!("Showing {} products picked at random", picks.len()));
    } else {
        ctx.output.info(&format!(
            "Showing {} of {} matching products",
            picks.len(),
            picks.total_matches
        ));
    }
}

fn reasons(pick: &ScoredProduct<'_>) -> String {
    let matched = pick
        .relevance
        .matched
        .iter()
        .flat_map(|m| m.keywords.iter().copied());
    let parts: Vec<&str> = matched.chain(pick.relevance.bonuses.iter().copied()).collect();
    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(", ")
    }
}
