// src/main.rs
// Composition root: wires the pool, repository, transport and services,
// then resolves the barcodes given on the command line.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use scanbasket::config::LookupConfig;
use scanbasket::db::{create_connection_pool, create_pool_at, initialize_database};
use scanbasket::domain::lookup::LookupError;
use scanbasket::events::{create_event_bus, SourceAttempted};
use scanbasket::integrations::ReqwestTransport;
use scanbasket::repositories::{ProductRepository, SqliteProductRepository};
use scanbasket::services::{CatalogService, ProductLookupService, RegisterProductRequest};

#[derive(Parser)]
#[command(name = "scanbasket", about = "Resolve scanned barcodes to product names")]
struct Cli {
    /// Barcodes to resolve
    barcodes: Vec<String>,

    /// SQLite database file (defaults to the app data directory)
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// EAN-Search API token; without one the paid source answers 401,
    /// which the chain tolerates
    #[arg(long, env = "EAN_SEARCH_TOKEN", default_value = "")]
    ean_search_token: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Persist remote hits into the local catalog (price 0.00, edit later)
    #[arg(long)]
    save: bool,

    /// Print the catalog and exit
    #[arg(long)]
    list: bool,

    /// Show each source attempt while resolving
    #[arg(long)]
    trace: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 1. INFRASTRUCTURE
    let event_bus = Arc::new(create_event_bus());
    let pool = Arc::new(match &cli.db_path {
        Some(path) => create_pool_at(path)?,
        None => create_connection_pool()?,
    });

    // Initialize schema (idempotent)
    {
        let conn = pool.get().context("get database connection")?;
        initialize_database(&conn)?;
    }

    let config = LookupConfig {
        ean_search_token: cli.ean_search_token.clone(),
        request_timeout: Duration::from_secs(cli.timeout_secs),
        ..LookupConfig::default()
    };
    let transport = Arc::new(ReqwestTransport::new(config.request_timeout)?);

    // 2. REPOSITORIES
    let product_repo: Arc<dyn ProductRepository> =
        Arc::new(SqliteProductRepository::new(pool.clone()));

    // 3. SERVICES
    let catalog_service = CatalogService::new(product_repo.clone(), event_bus.clone());
    let lookup_service =
        ProductLookupService::new(product_repo, transport, config, event_bus.clone());

    // 4. TRACE WIRING
    if cli.trace {
        event_bus.subscribe::<SourceAttempted, _>(|event| {
            println!("  {} -> {}", event.source, event.outcome);
        });
    }

    // 5. COMMANDS
    if cli.list {
        for product in catalog_service.list_products()? {
            println!(
                "{}  {:>8.2}  {}",
                product.barcode, product.price, product.name
            );
        }
        return Ok(());
    }

    if cli.barcodes.is_empty() {
        anyhow::bail!("no barcodes given; try `scanbasket 4001686301656`");
    }

    for barcode in &cli.barcodes {
        match lookup_service.resolve(barcode).await {
            Ok(resolved) => {
                println!("{}  {}  [{}]", barcode, resolved.name, resolved.source);

                if cli.save && resolved.source.is_remote() {
                    let saved = catalog_service.register_product(RegisterProductRequest {
                        name: resolved.name.clone(),
                        price: 0.0,
                        barcode: barcode.trim().to_string(),
                    })?;
                    println!("  saved to catalog as {}", saved.id);
                }
            }
            Err(LookupError::EmptyBarcode) => {
                eprintln!("skipping empty barcode");
            }
            Err(LookupError::AllSourcesFailed(aggregate)) => {
                eprintln!("{}: not found anywhere ({})", barcode, aggregate);
            }
        }
    }

    Ok(())
}
