//! Catalog document store: one JSON document per merchant.
//!
//! The store exposes full-document reads and full-document merge writes
//! addressed by merchant identifier. Writes are last-write-wins at the
//! document level; the engine relies on each merchant document being
//! written by at most one shop-run at a time (shop configurations map 1:1
//! to merchant identifiers).

pub mod memory;
pub mod postgres;
pub mod reconcile;

pub use memory::MemoryCatalogStore;
pub use postgres::PgCatalogStore;
pub use reconcile::Reconciler;

use std::time::Duration;

use async_trait::async_trait;
use shopmirror_core::CatalogSnapshot;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;

// Path relative to crates/shopmirror-store/Cargo.toml; resolves to
// <workspace-root>/migrations/
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("catalog document for '{merchant}' is not valid: {source}")]
    Document {
        merchant: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Read/write access to per-merchant catalog documents.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Reads the full catalog document, or `None` if the merchant has none.
    async fn read_catalog(&self, merchant: &str) -> Result<Option<CatalogSnapshot>, StoreError>;

    /// Writes the full catalog document (merge semantics: the merchant's
    /// product map is replaced wholesale, other merchants are untouched).
    async fn write_catalog(
        &self,
        merchant: &str,
        snapshot: &CatalogSnapshot,
    ) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout_secs: 10,
        }
    }
}

/// Connect to a Postgres pool using explicit URL and config.
///
/// This is the single authenticated store connection for the process; it is
/// constructed once at startup and injected into the orchestrator. A
/// connection failure here is fatal: the engine refuses to run without a
/// usable store.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the connection cannot be established.
pub async fn connect_pool(database_url: &str, config: PoolConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(database_url)
        .await
}

/// Run pending migrations against the pool.
///
/// # Errors
///
/// Returns [`StoreError::Migration`] if a migration fails.
pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    MIGRATOR.run(pool).await?;
    Ok(())
}
