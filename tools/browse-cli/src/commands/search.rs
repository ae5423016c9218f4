//! Search command: open a session on a URL and print its first page.

use anyhow::{bail, Result};
use turbo_browse::{BrowseSession, SessionSnapshot};

use super::url::{display_url, print_state};
use super::SearchArgs;
use crate::context::Context;
use crate::output::status_badge;

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let service = ctx.catalog()?;

    let spinner = ctx.output.spinner("Fetching results...");
    let session = BrowseSession::builder(service)
        .with_config(ctx.config.clone())
        .open(&args.url)
        .await;
    spinner.finish_and_clear();

    let snapshot = session.snapshot();
    session.close();

    if ctx.output.is_json() {
        ctx.output.json(&snapshot);
    } else {
        render(&snapshot, ctx);
    }

    match (&snapshot.error, &snapshot.display) {
        (Some(error), None) => bail!("Search failed: {}", error),
        _ => Ok(()),
    }
}

pub(crate) fn render(snapshot: &SessionSnapshot, ctx: &Context) {
    ctx.output.header("Filters");
    print_state(&snapshot.state, ctx);
    ctx.output.kv("URL", &display_url(&snapshot.url));
    ctx.output.kv("Status", &status_badge(&snapshot.status));

    if !snapshot.models.is_empty() {
        let names: Vec<String> = snapshot.models.iter().map(|m| m.label()).collect();
        ctx.output.kv("Models", &names.join(", "));
    }
    if let Some(error) = &snapshot.error {
        ctx.output.warn(error);
    }

    ctx.output.header("Results");
    match &snapshot.display {
        Some(list) => ctx.output.display_list(list),
        None => ctx.output.info("No results loaded."),
    }
}
