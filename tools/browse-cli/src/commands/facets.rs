//! Facet listing commands.

use anyhow::{Context as _, Result};
use turbo_filter::catalog::FacetOption;
use turbo_filter::BrandId;

use super::ModelsArgs;
use crate::context::Context;

/// List global categories and brands.
pub async fn list_facets(ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;

    let spinner = ctx.output.spinner("Loading facets...");
    let result = catalog.facets().await;
    spinner.finish_and_clear();
    let facets = result.context("Failed to load facets")?;

    if ctx.output.is_json() {
        ctx.output.json(&facets);
        return Ok(());
    }

    ctx.output.header("Categories");
    print_options(&facets.categories, ctx);
    ctx.output.header("Brands");
    print_options(&facets.brands, ctx);
    Ok(())
}

/// List model options for one brand.
pub async fn list_models(args: ModelsArgs, ctx: &Context) -> Result<()> {
    let brand = BrandId::non_empty(args.brand.trim()).context("Brand id is empty")?;
    let catalog = ctx.catalog()?;

    let spinner = ctx.output.spinner(&format!("Loading models for {}...", brand));
    let result = catalog.models(&brand).await;
    spinner.finish_and_clear();
    let models = result.with_context(|| format!("Failed to load models for brand {}", brand))?;

    if ctx.output.is_json() {
        ctx.output.json(&models);
        return Ok(());
    }

    ctx.output.header(&format!("Models for {}", brand));
    print_options(&models, ctx);
    Ok(())
}

fn print_options(options: &[FacetOption], ctx: &Context) {
    if options.is_empty() {
        ctx.output.info("None available.");
        return;
    }
    for option in options {
        ctx.output.list_item(&format!("{} ({})", option.label(), option.id));
    }
}
