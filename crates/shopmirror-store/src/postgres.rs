//! Postgres-backed catalog store: one JSONB document row per merchant.

use async_trait::async_trait;
use shopmirror_core::CatalogSnapshot;
use sqlx::PgPool;

use crate::{CatalogStore, StoreError};

/// Stores each merchant's catalog as a `jsonb` column in
/// `merchant_catalogs`, upserted wholesale on write.
#[derive(Debug, Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn read_catalog(&self, merchant: &str) -> Result<Option<CatalogSnapshot>, StoreError> {
        let row: Option<serde_json::Value> = sqlx::query_scalar::<_, serde_json::Value>(
            "SELECT products FROM merchant_catalogs WHERE merchant_id = $1",
        )
        .bind(merchant)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|products| {
            serde_json::from_value(products).map_err(|e| StoreError::Document {
                merchant: merchant.to_owned(),
                source: e,
            })
        })
        .transpose()
        .map(|products| products.map(|products| CatalogSnapshot { products }))
    }

    async fn write_catalog(
        &self,
        merchant: &str,
        snapshot: &CatalogSnapshot,
    ) -> Result<(), StoreError> {
        let products =
            serde_json::to_value(&snapshot.products).map_err(|e| StoreError::Document {
                merchant: merchant.to_owned(),
                source: e,
            })?;

        sqlx::query(
            "INSERT INTO merchant_catalogs (merchant_id, products) \
             VALUES ($1, $2::jsonb) \
             ON CONFLICT (merchant_id) DO UPDATE SET \
                 products   = EXCLUDED.products, \
                 updated_at = NOW()",
        )
        .bind(merchant)
        .bind(products)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
