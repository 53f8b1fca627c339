//! Reconciliation of freshly scraped products into a merchant's document.
//!
//! The reconciler exclusively owns the merchant document for the duration
//! of a sync run: load once, merge incrementally as products stream in,
//! prune stale entries at the end.
//!
//! ## The sticky `new` flag
//!
//! A product absent from the stored document is inserted with `new = true`.
//! On every later merge the stored flag is carried forward unchanged; the
//! engine never resets it. Clearing `new` is the job of whatever consumes
//! the document (a storefront UI marking items as seen), so a value
//! externally cleared to `false` stays `false` across runs.

use std::collections::HashSet;

use shopmirror_core::{CatalogSnapshot, Product};

use crate::CatalogStore;

/// Per-run reconciler for one merchant document.
pub struct Reconciler<'a> {
    store: &'a dyn CatalogStore,
    merchant: &'a str,
    snapshot: CatalogSnapshot,
}

impl<'a> Reconciler<'a> {
    /// Loads the merchant's current document, starting from an empty
    /// snapshot if none exists or the read fails (the failure is logged;
    /// a degraded run merges into an empty document rather than aborting).
    pub async fn load(store: &'a dyn CatalogStore, merchant: &'a str) -> Reconciler<'a> {
        let snapshot = match store.read_catalog(merchant).await {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => CatalogSnapshot::default(),
            Err(e) => {
                tracing::error!(
                    merchant,
                    error = %e,
                    "failed to read catalog document; starting from empty snapshot"
                );
                CatalogSnapshot::default()
            }
        };
        Reconciler {
            store,
            merchant,
            snapshot,
        }
    }

    /// Number of products currently in the in-memory snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    /// Merges one extracted product into the document and persists it.
    ///
    /// The product must carry a name; records without one are dropped with
    /// a debug log (callers are expected to have filtered them already).
    /// The incoming record replaces the stored entry wholesale except for
    /// `new`, which follows the sticky rule above. A store write failure is
    /// logged and the merge becomes a no-op for this step; the in-memory
    /// snapshot keeps the merge so a later write persists it.
    pub async fn merge(&mut self, mut product: Product) {
        let Some(name) = product.name.clone() else {
            tracing::debug!(merchant = self.merchant, url = %product.url, "dropping nameless product");
            return;
        };

        product.new = match self.snapshot.products.get(&name) {
            Some(existing) => existing.new,
            None => true,
        };
        self.snapshot.products.insert(name.clone(), product);

        if let Err(e) = self.store.write_catalog(self.merchant, &self.snapshot).await {
            tracing::error!(
                merchant = self.merchant,
                product = %name,
                error = %e,
                "failed to persist merged product"
            );
        }
    }

    /// Removes every stored product not observed in this run.
    ///
    /// Re-reads the document first so pruning operates on what is actually
    /// persisted, then writes the pruned document back. A merchant with no
    /// stored document is a no-op, as is a read/write failure (logged).
    pub async fn prune(&mut self, observed: &HashSet<String>) {
        let mut snapshot = match self.store.read_catalog(self.merchant).await {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                tracing::info!(merchant = self.merchant, "no stored catalog; nothing to prune");
                return;
            }
            Err(e) => {
                tracing::error!(
                    merchant = self.merchant,
                    error = %e,
                    "failed to read catalog document for pruning; skipping"
                );
                return;
            }
        };

        let stale: Vec<String> = snapshot
            .products
            .keys()
            .filter(|name| !observed.contains(*name))
            .cloned()
            .collect();

        if stale.is_empty() {
            tracing::debug!(merchant = self.merchant, "no stale products to remove");
            return;
        }

        for name in &stale {
            tracing::info!(merchant = self.merchant, product = %name, "removing stale product");
            snapshot.products.remove(name);
        }

        match self.store.write_catalog(self.merchant, &snapshot).await {
            Ok(()) => {
                self.snapshot = snapshot;
                tracing::info!(
                    merchant = self.merchant,
                    removed = stale.len(),
                    "stale products removed"
                );
            }
            Err(e) => {
                tracing::error!(
                    merchant = self.merchant,
                    error = %e,
                    "failed to persist pruned catalog"
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;
