//! In-memory catalog store for tests and local experimentation.

use std::collections::HashMap;

use async_trait::async_trait;
use shopmirror_core::CatalogSnapshot;
use tokio::sync::RwLock;

use crate::{CatalogStore, StoreError};

/// Keeps catalog documents in a process-local map. Semantics mirror the
/// Postgres store: full-document reads, last-write-wins writes.
#[derive(Debug, Default)]
pub struct MemoryCatalogStore {
    documents: RwLock<HashMap<String, CatalogSnapshot>>,
}

impl MemoryCatalogStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a merchant document directly, bypassing the reconciler.
    pub async fn seed(&self, merchant: &str, snapshot: CatalogSnapshot) {
        self.documents
            .write()
            .await
            .insert(merchant.to_owned(), snapshot);
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn read_catalog(&self, merchant: &str) -> Result<Option<CatalogSnapshot>, StoreError> {
        Ok(self.documents.read().await.get(merchant).cloned())
    }

    async fn write_catalog(
        &self,
        merchant: &str,
        snapshot: &CatalogSnapshot,
    ) -> Result<(), StoreError> {
        self.documents
            .write()
            .await
            .insert(merchant.to_owned(), snapshot.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn read_missing_merchant_returns_none() {
        let store = MemoryCatalogStore::new();
        assert!(store.read_catalog("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn write_then_read_round_trips() {
        let store = MemoryCatalogStore::new();
        let snapshot = CatalogSnapshot::default();
        store.write_catalog("acme", &snapshot).await.unwrap();
        let read = store.read_catalog("acme").await.unwrap().unwrap();
        assert!(read.is_empty());
    }

    #[tokio::test]
    async fn merchants_are_isolated() {
        let store = MemoryCatalogStore::new();
        store
            .write_catalog("acme", &CatalogSnapshot::default())
            .await
            .unwrap();
        assert!(store.read_catalog("other").await.unwrap().is_none());
    }
}
