//! Glowcart CLI - storefront listing and admin tools.
//!
//! # Usage
//!
//! ```bash
//! # Storefront grid: filter and sort the catalog
//! glowcart list --brand COSRX --sort price-asc
//!
//! # Admin dashboard with merchandising stats
//! glowcart admin dashboard --search toner
//!
//! # Pin / unpin a product (requires GLOWCART_ADMIN=1 or --admin)
//! glowcart admin pin cosrx-snail-96-essence
//!
//! # Periodic refresh loop (default every 300 seconds)
//! glowcart watch --interval 60
//! ```
//!
//! # Commands
//!
//! - `list` - Filtered, sorted storefront view of the catalog
//! - `admin dashboard` - Ranked product table with stats and pin markers
//! - `admin pin` / `admin unpin` - Feature management
//! - `watch` - Unconditional periodic refresh until Ctrl+C

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use glowcart_catalog::{ProductStore, SortOption};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod source;

use config::CliConfig;
use source::AppSource;

#[derive(Parser)]
#[command(name = "glowcart")]
#[command(author, version, about = "Glowcart catalog tools")]
struct Cli {
    /// Enable admin commands for this invocation (same as GLOWCART_ADMIN=1).
    #[arg(long, global = true)]
    admin: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the storefront product grid
    List {
        /// Keep only these brands (repeatable)
        #[arg(long = "brand")]
        brands: Vec<String>,

        /// Keep only these categories (repeatable)
        #[arg(long = "category")]
        categories: Vec<String>,

        /// Lower price bound (defaults to the slider minimum, 0)
        #[arg(long)]
        min_price: Option<Decimal>,

        /// Upper price bound (defaults to the slider maximum, 100)
        #[arg(long)]
        max_price: Option<Decimal>,

        /// Sort option: popularity, price-asc, price-desc, newest,
        /// most-viewed, best-selling
        #[arg(long, default_value_t = SortOption::Popularity)]
        sort: SortOption,
    },
    /// Admin dashboard and pin management
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Refresh the catalog on a fixed interval until interrupted
    Watch {
        /// Refresh interval in seconds (default: GLOWCART_REFRESH_SECS or 300)
        #[arg(long)]
        interval: Option<u64>,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Ranked product table with merchandising stats
    Dashboard {
        /// Filter rows by name or brand, case-insensitive
        #[arg(long)]
        search: Option<String>,
    },
    /// Pin a product to the featured set
    Pin {
        /// Product ID
        id: String,
    },
    /// Remove a product from the featured set
    Unpin {
        /// Product ID
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing with EnvFilter; default to info for our crates
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "glowcart=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CliConfig::from_env()?;
    config.admin = config.admin || cli.admin;

    let store = ProductStore::new(AppSource::from_config(&config)?);

    match cli.command {
        Commands::List {
            brands,
            categories,
            min_price,
            max_price,
            sort,
        } => {
            commands::list::run(
                &store,
                commands::list::ListArgs {
                    brands,
                    categories,
                    min_price,
                    max_price,
                    sort,
                },
            )
            .await?;
        }
        Commands::Admin { action } => {
            if !config.admin {
                return Err("admin commands require GLOWCART_ADMIN=1 or --admin".into());
            }
            match action {
                AdminAction::Dashboard { search } => {
                    commands::admin::dashboard(&store, search).await?;
                }
                AdminAction::Pin { id } => commands::admin::pin(&store, &id).await?,
                AdminAction::Unpin { id } => commands::admin::unpin(&store, &id).await?,
            }
        }
        Commands::Watch { interval } => {
            let interval = interval
                .map_or(config.refresh_interval, std::time::Duration::from_secs);
            commands::watch::run(&store, interval).await?;
        }
    }
    Ok(())
}
