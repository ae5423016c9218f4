//! Browse CLI - Command line harness for the TurboBrowse engine.
//!
//! Commands:
//! - `browse decode` - Show the filter state a URL encodes
//! - `browse encode` - Build the canonical URL for a filter state
//! - `browse facets` - List global categories and brands
//! - `browse models` - List model options for a brand
//! - `browse search` - Fetch and display one result page
//! - `browse explore` - Browse interactively

mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{DecodeArgs, EncodeArgs, ExploreArgs, ModelsArgs, SearchArgs};

/// Browse CLI - Drive faceted catalog browsing from the terminal
#[derive(Parser)]
#[command(name = "browse")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a browse URL into filter state
    Decode(DecodeArgs),

    /// Encode filter values into a canonical URL
    Encode(EncodeArgs),

    /// List global facet options
    Facets,

    /// List model options for a brand
    Models(ModelsArgs),

    /// Fetch the result page a URL describes
    Search(SearchArgs),

    /// Browse the catalog interactively
    Explore(ExploreArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };
    ctx.init_logging();

    let result = match cli.command {
        Commands::Decode(args) => commands::url::decode(args, &ctx),
        Commands::Encode(args) => commands::url::encode(args, &ctx),
        Commands::Facets => commands::facets::list_facets(&ctx).await,
        Commands::Models(args) => commands::facets::list_models(args, &ctx).await,
        Commands::Search(args) => commands::search::run(args, &ctx).await,
        Commands::Explore(args) => commands::explore::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
