//! URL decode/encode commands.

use anyhow::Result;
use turbo_filter::{url, BrandId, CategoryId, FilterState, ModelId};

use super::{DecodeArgs, EncodeArgs};
use crate::context::Context;

/// Run the decode command.
pub fn decode(args: DecodeArgs, ctx: &Context) -> Result<()> {
    let state = url::decode(&args.url);

    if ctx.output.is_json() {
        ctx.output.json(&state);
        return Ok(());
    }

    ctx.output.header("Filter state");
    print_state(&state, ctx);
    ctx.output.kv("Canonical", &display_url(&url::encode(&state)));
    Ok(())
}

/// Run the encode command.
pub fn encode(args: EncodeArgs, ctx: &Context) -> Result<()> {
    let state = state_from_args(&args);
    let encoded = match &args.path {
        Some(path) => url::with_path(path, &state),
        None => url::encode(&state),
    };

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "url": encoded, "state": state }));
    } else {
        println!("{}", encoded);
    }
    Ok(())
}

fn state_from_args(args: &EncodeArgs) -> FilterState {
    FilterState {
        category: args.category.as_deref().and_then(CategoryId::non_empty),
        brand: args.brand.as_deref().and_then(BrandId::non_empty),
        model: args.model.as_deref().and_then(ModelId::non_empty),
        search: args.q.clone(),
        page: args.page,
    }
    .normalized()
}

pub(crate) fn print_state(state: &FilterState, ctx: &Context) {
    let or_dash = |v: Option<&str>| v.unwrap_or("-").to_string();
    ctx.output.kv("Category", &or_dash(state.category.as_ref().map(|c| c.as_str())));
    ctx.output.kv("Brand", &or_dash(state.brand.as_ref().map(|b| b.as_str())));
    ctx.output.kv("Model", &or_dash(state.model.as_ref().map(|m| m.as_str())));
    ctx.output.kv("Search", if state.search.is_empty() { "-" } else { &state.search });
    ctx.output.kv("Page", &state.page.to_string());
}

pub(crate) fn display_url(encoded: &str) -> String {
    if encoded.is_empty() {
        "(no filters)".to_string()
    } else {
        encoded.to_string()
    }
}
