//! Catalog CLI - list, add and delete products from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show every product
//! catalog list
//!
//! # Add a furniture item
//! catalog add --type furniture --sku A1 --name "Elm Desk" --price 120 \
//!     --height 75 --width 60 --length 110
//!
//! # Delete one product, or several at once
//! catalog delete 3
//! catalog mass-delete 4 5 6 --yes
//! ```
//!
//! Connection settings come from `CATALOG_API_URL`, `CATALOG_AUTH_TOKEN` and
//! `CATALOG_TIMEOUT_SECS`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use catalog_app::{ProductListController, Ui};
use catalog_service::{CatalogConfig, CatalogService, HttpCatalogService};

mod commands;
mod terminal;

#[derive(Parser)]
#[command(name = "catalog")]
#[command(author, version, about = "Product catalog (DVD / Book / Furniture) client")]
struct Cli {
    /// Catalog service base URL (overrides CATALOG_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all products
    List,
    /// Add a product
    Add(AddArgs),
    /// Delete a single product by id
    Delete {
        /// Product id as shown by `list`
        id: String,
    },
    /// Delete every given product in one request
    MassDelete {
        /// Product ids as shown by `list`
        ids: Vec<String>,
    },
}

#[derive(Args)]
pub(crate) struct AddArgs {
    /// Product type (DVD, Book, Furniture)
    #[arg(long = "type", default_value = "DVD")]
    pub product_type: String,

    #[arg(long)]
    pub sku: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    /// Price in dollars
    #[arg(long)]
    pub price: Option<String>,

    /// Size in MB (DVD)
    #[arg(long)]
    pub size: Option<String>,

    /// Weight in KG (Book)
    #[arg(long)]
    pub weight: Option<String>,

    /// Height in CM (Furniture)
    #[arg(long)]
    pub height: Option<String>,

    /// Width in CM (Furniture)
    #[arg(long)]
    pub width: Option<String>,

    /// Length in CM (Furniture)
    #[arg(long)]
    pub length: Option<String>,
}

#[tokio::main]
async fn main() {
    catalog_observability::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("command failed: {e:#}");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = CatalogConfig::from_env().context("invalid catalog configuration")?;
    if let Some(url) = cli.api_url {
        config = config.with_api_url(url);
    }
    tracing::debug!(?config, "catalog configuration loaded");

    let service: Arc<dyn CatalogService> =
        Arc::new(HttpCatalogService::new(config).context("failed to build HTTP client")?);
    let ui: Arc<dyn Ui> = Arc::new(terminal::TerminalUi::new(cli.yes));
    let list = Arc::new(ProductListController::new(service.clone(), ui.clone()));

    match cli.command {
        Commands::List => commands::list(&list).await,
        Commands::Add(args) => commands::add(service, ui, list, args).await,
        Commands::Delete { id } => commands::delete(&list, &id).await,
        Commands::MassDelete { ids } => commands::mass_delete(&list, &ids).await,
    }
}
