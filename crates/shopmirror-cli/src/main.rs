mod sync;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shopmirror")]
#[command(about = "Mirrors storefront catalogs into per-merchant documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Synchronize configured shops into the catalog store.
    Sync {
        /// Only synchronize the shop with this company name.
        #[arg(long)]
        shop: Option<String>,
        /// List the shops that would be synchronized without fetching
        /// anything.
        #[arg(long)]
        dry_run: bool,
    },
    /// Run pending catalog store migrations.
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = shopmirror_core::load_app_config()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Sync { shop, dry_run } => {
            sync::run_sync(&config, shop.as_deref(), dry_run).await
        }
        Commands::Migrate => sync::run_migrate(&config).await,
    }
}
