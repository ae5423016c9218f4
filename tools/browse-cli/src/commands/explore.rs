//! Interactive browsing.

use anyhow::{bail, Result};
use dialoguer::{Input, Select};
use tokio::sync::watch;
use turbo_browse::{BrowseSession, SessionSnapshot, UrlSink};
use turbo_filter::catalog::FacetOption;
use turbo_filter::FacetKind;

use super::search::render;
use super::ExploreArgs;
use crate::context::Context;
use crate::output::Output;

/// Prints URL updates in verbose mode instead of writing an address bar.
struct TerminalUrlSink {
    output: Output,
}

impl UrlSink for TerminalUrlSink {
    fn replace(&self, query: &str) {
        self.output.debug(&format!("URL -> {}", if query.is_empty() { "/" } else { query }));
    }
}

const ACTIONS: [&str; 9] = [
    "Category",
    "Brand",
    "Model",
    "Search",
    "Next page",
    "Previous page",
    "Go to page",
    "Reset filters",
    "Quit",
];

/// Run the explore command.
pub async fn run(args: ExploreArgs, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        bail!("explore is interactive and does not support --json");
    }

    let service = ctx.catalog()?;
    let spinner = ctx.output.spinner("Opening catalog...");
    let session = BrowseSession::builder(service)
        .with_config(ctx.config.clone())
        .with_url_sink(std::sync::Arc::new(TerminalUrlSink {
            output: ctx.output.clone(),
        }))
        .open(&args.url)
        .await;
    spinner.finish_and_clear();

    loop {
        render(&session.snapshot(), ctx);
        println!();

        let action = Select::new()
            .with_prompt("Action")
            .items(&ACTIONS)
            .default(0)
            .interact()?;

        let state = session.state();
        match ACTIONS[action] {
            "Category" => {
                let options = session.facets().categories;
                if let Some(id) = pick("Category", &options)? {
                    session.select_facet(FacetKind::Category, id).await;
                }
            }
            "Brand" => {
                let options = session.facets().brands;
                if let Some(id) = pick("Brand", &options)? {
                    session.select_facet(FacetKind::Brand, id).await;
                }
            }
            "Model" => {
                if state.brand.is_none() {
                    ctx.output.warn("Select a brand first.");
                    continue;
                }
                if let Some(id) = pick("Model", &session.models())? {
                    session.select_facet(FacetKind::Model, id).await;
                }
            }
            "Search" => {
                let text: String = Input::new()
                    .with_prompt("Search")
                    .with_initial_text(state.search.clone())
                    .allow_empty(true)
                    .interact_text()?;
                if session.type_search(text).is_some() {
                    settle(&session, ctx).await;
                }
            }
            "Next page" => {
                let last = session.display().map(|d| d.pagination.total_pages).unwrap_or(1);
                if state.page < last {
                    session.go_to_page(state.page + 1).await;
                }
            }
            "Previous page" => {
                session.go_to_page(state.page.saturating_sub(1)).await;
            }
            "Go to page" => {
                let page: u32 = Input::new()
                    .with_prompt("Page")
                    .default(state.page)
                    .interact_text()?;
                session.go_to_page(page).await;
            }
            "Reset filters" => {
                session.reset().await;
            }
            _ => break,
        }
    }

    session.close();
    ctx.output.success(&format!("Final URL: {}", session.current_url()));
    Ok(())
}

/// Choose an option; the first entry clears the facet.
fn pick(prompt: &str, options: &[FacetOption]) -> Result<Option<String>> {
    let mut items = vec!["(any)".to_string()];
    items.extend(options.iter().map(|o| o.label()));

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact_opt()?;

    Ok(selection.map(|i| match i {
        0 => String::new(),
        n => options[n - 1].id.clone(),
    }))
}

/// Wait for the debounced search fetch to land.
async fn settle(session: &BrowseSession, ctx: &Context) {
    let spinner = ctx.output.spinner("Searching...");
    let mut rx = session.subscribe();
    let grace = std::time::Duration::from_millis(50);
    tokio::time::sleep(ctx.config.debounce.search_delay() + grace).await;
    if !wait_idle(&mut rx).await {
        ctx.output.debug("Session closed before the search settled");
    }
    spinner.finish_and_clear();
}

/// Wait until no fetch is loading; `false` if the session went away first.
async fn wait_idle(rx: &mut watch::Receiver<SessionSnapshot>) -> bool {
    rx.wait_for(|s| !s.status.is_loading()).await.is_ok()
}
