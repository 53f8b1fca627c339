//! Shop orchestration: listing crawl → per-product extraction → merge →
//! prune, fanned out across shops under a bounded worker pool.
//!
//! Failure isolation boundaries are "one product" and "one shop": a product
//! page that cannot be rendered or extracted is skipped, a shop whose crawl
//! collapses is reported as failed, and neither stops its siblings.

use std::collections::HashSet;

use anyhow::Context;
use futures::stream::{self, StreamExt};
use shopmirror_core::{AppConfig, ShopConfig};
use shopmirror_scraper::{
    discover_product_urls, extract_product, CompiledSelectors, HttpRenderer, PageRenderer,
};
use shopmirror_store::{CatalogStore, PgCatalogStore, PoolConfig, Reconciler};

/// Result of one shop-run.
#[derive(Debug)]
pub(crate) struct ShopOutcome {
    pub merged: usize,
    /// `false` when the empty-crawl guard suppressed pruning.
    pub pruned: bool,
    pub succeeded: bool,
}

/// Handler for `shopmirror sync`.
///
/// Connects to the catalog store (fatal if unreachable; the engine never
/// runs with a null store), loads and compiles the shop configuration, and
/// synchronizes every selected shop.
pub(crate) async fn run_sync(
    config: &AppConfig,
    shop_filter: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let shops = load_shops_for_sync(config, shop_filter)?;

    if dry_run {
        let names: Vec<&str> = shops
            .iter()
            .map(|(shop, _)| shop.company_name.as_str())
            .collect();
        println!(
            "dry-run: would synchronize {} shops: [{}]",
            shops.len(),
            names.join(", ")
        );
        return Ok(());
    }

    let pool = shopmirror_store::connect_pool(
        &config.database_url,
        PoolConfig {
            max_connections: config.db_max_connections,
            acquire_timeout_secs: config.db_acquire_timeout_secs,
        },
    )
    .await
    .context("failed to connect to the catalog store")?;
    let store = PgCatalogStore::new(pool);

    let client = shopmirror_scraper::build_client(config.request_timeout_secs, &config.user_agent)
        .context("failed to build HTTP client")?;

    let outcomes = synchronize(
        &store,
        &client,
        &shops,
        config.max_concurrent_shops,
        config.render_settle_delay_ms,
    )
    .await;

    let total_merged: usize = outcomes.iter().map(|(_, o)| o.merged).sum();
    let failed: usize = outcomes.iter().filter(|(_, o)| !o.succeeded).count();
    println!(
        "synchronized {} shops ({} products merged, {} shops failed)",
        outcomes.len(),
        total_merged,
        failed
    );

    if failed == outcomes.len() && !outcomes.is_empty() {
        anyhow::bail!("all {failed} shops failed synchronization");
    }
    Ok(())
}

/// Handler for `shopmirror migrate`.
pub(crate) async fn run_migrate(config: &AppConfig) -> anyhow::Result<()> {
    let pool = shopmirror_store::connect_pool(
        &config.database_url,
        PoolConfig {
            max_connections: config.db_max_connections,
            acquire_timeout_secs: config.db_acquire_timeout_secs,
        },
    )
    .await
    .context("failed to connect to the catalog store")?;

    shopmirror_store::run_migrations(&pool)
        .await
        .context("migrations failed")?;
    println!("migrations applied");
    Ok(())
}

/// Loads the shops file, applies the optional `--shop` filter, and compiles
/// every selector set. A selector that does not compile fails the whole
/// command: bad configuration is fatal before any page is fetched.
fn load_shops_for_sync(
    config: &AppConfig,
    shop_filter: Option<&str>,
) -> anyhow::Result<Vec<(ShopConfig, CompiledSelectors)>> {
    let shops_file = shopmirror_core::load_shops(&config.shops_path)?;

    let selected: Vec<ShopConfig> = match shop_filter {
        Some(name) => {
            let shop = shops_file
                .shops
                .into_iter()
                .find(|s| s.company_name == name)
                .ok_or_else(|| anyhow::anyhow!("shop '{name}' not found in configuration"))?;
            vec![shop]
        }
        None => shops_file.shops,
    };

    selected
        .into_iter()
        .map(|shop| {
            let compiled = CompiledSelectors::compile(&shop.selectors)
                .with_context(|| format!("invalid selectors for shop '{}'", shop.company_name))?;
            Ok((shop, compiled))
        })
        .collect()
}

/// Synchronizes all `shops` against `store` under the concurrency bound.
///
/// Shops are independent: each owns a disjoint merchant document, so no
/// ordering is guaranteed or needed across them.
pub(crate) async fn synchronize(
    store: &dyn CatalogStore,
    client: &reqwest::Client,
    shops: &[(ShopConfig, CompiledSelectors)],
    max_concurrent: usize,
    settle_delay_ms: u64,
) -> Vec<(String, ShopOutcome)> {
    stream::iter(shops)
        .map(|(shop, selectors)| async move {
            let outcome = sync_shop(store, client, shop, selectors, settle_delay_ms).await;
            (shop.company_name.clone(), outcome)
        })
        .buffer_unordered(max_concurrent.max(1))
        .collect()
        .await
}

/// Runs one shop end to end: crawl, extract, merge, prune.
pub(crate) async fn sync_shop(
    store: &dyn CatalogStore,
    client: &reqwest::Client,
    shop: &ShopConfig,
    selectors: &CompiledSelectors,
    settle_delay_ms: u64,
) -> ShopOutcome {
    let merchant = shop.company_name.as_str();
    let mut reconciler = Reconciler::load(store, merchant).await;
    tracing::info!(
        shop = merchant,
        existing = reconciler.len(),
        "starting shop sync"
    );

    let urls = discover_product_urls(client, shop, selectors).await;
    if urls.is_empty() {
        // Zero discovered URLs is indistinguishable from a collapsed crawl.
        // Pruning here would wipe the merchant's whole catalog, so the run
        // stops short of the deletion path and reports failure instead.
        tracing::warn!(
            shop = merchant,
            "no product URLs discovered; skipping prune to protect the stored catalog"
        );
        return ShopOutcome {
            merged: 0,
            pruned: false,
            succeeded: false,
        };
    }

    // One rendering session per shop-run; dropped (and thereby released)
    // when this function returns, error paths included.
    let renderer = HttpRenderer::new(client.clone(), settle_delay_ms);

    let mut observed: HashSet<String> = HashSet::new();
    let mut merged = 0usize;

    for url in &urls {
        let html = match renderer.render(url).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(shop = merchant, url, error = %e, "failed to render product page; skipping");
                continue;
            }
        };

        let product = extract_product(&html, selectors, url);
        let Some(name) = product.name.clone() else {
            tracing::warn!(shop = merchant, url, "product page yielded no name; skipping");
            continue;
        };

        tracing::info!(shop = merchant, product = %name, price = %product.price, "product details scraped");
        observed.insert(name);
        reconciler.merge(product).await;
        merged += 1;
    }

    reconciler.prune(&observed).await;
    tracing::info!(shop = merchant, merged, "shop sync finished");

    ShopOutcome {
        merged,
        pruned: true,
        succeeded: true,
    }
}

#[cfg(test)]
#[path = "sync_test.rs"]
mod tests;
