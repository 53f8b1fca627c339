//! Pagination-driven discovery of product detail URLs.
//!
//! Category listings are paginated with a numeric `page` query parameter.
//! The crawl walks pages from 1 upward and stops when the storefront either
//! answers with a non-success status or renders a page with zero product
//! blocks. Termination is exhaustion-driven, never a fixed page count, so
//! the engine adapts to catalogs of arbitrary size.

use std::collections::HashSet;

use scraper::Html;
use shopmirror_core::ShopConfig;

use crate::error::ScraperError;
use crate::fetch::fetch_page;
use crate::selectors::CompiledSelectors;

/// Crawls every listing page of `shop` and returns the de-duplicated set of
/// absolute product detail URLs.
///
/// Failure semantics:
/// - Non-success status on page N ends the crawl, keeping pages 1..N-1.
/// - Zero product blocks on page N ends the crawl the same way.
/// - A transport failure aborts the whole crawl and returns the **empty
///   set**: a partial list must not feed the deletion path downstream.
pub async fn discover_product_urls(
    client: &reqwest::Client,
    shop: &ShopConfig,
    selectors: &CompiledSelectors,
) -> HashSet<String> {
    let mut discovered: Vec<String> = Vec::new();
    let mut page: u32 = 1;

    loop {
        let page_url = shop.category_url(page);
        tracing::info!(shop = %shop.company_name, url = %page_url, page, "fetching category page");

        let body = match fetch_page(client, &page_url).await {
            Ok(body) => body,
            Err(ScraperError::UnexpectedStatus { status, url }) => {
                tracing::warn!(
                    shop = %shop.company_name,
                    url = %url,
                    status,
                    "category page returned non-success status; ending pagination"
                );
                break;
            }
            Err(e) => {
                tracing::error!(
                    shop = %shop.company_name,
                    url = %page_url,
                    error = %e,
                    "listing crawl failed; discarding partial results"
                );
                return HashSet::new();
            }
        };

        let (blocks, hrefs) = extract_listing_links(&body, selectors);
        if blocks == 0 {
            tracing::info!(shop = %shop.company_name, page, "no further products; ending pagination");
            break;
        }

        for href in hrefs {
            discovered.push(join_url(&shop.base_url, &href));
        }

        tracing::info!(shop = %shop.company_name, page, products = blocks, "category page scraped");
        page += 1;
    }

    let unique: HashSet<String> = discovered.into_iter().collect();
    tracing::info!(shop = %shop.company_name, total = unique.len(), "product URL discovery finished");
    unique
}

/// Parses one listing page and returns `(product block count, hrefs)`.
///
/// A block without a link sub-element (or a link without `href`) contributes
/// to the count but not to the hrefs; the count alone drives pagination.
fn extract_listing_links(html: &str, selectors: &CompiledSelectors) -> (usize, Vec<String>) {
    let document = Html::parse_document(html);
    let mut blocks = 0usize;
    let mut hrefs = Vec::new();

    for block in document.select(&selectors.product_block) {
        blocks += 1;
        if let Some(link) = block.select(&selectors.product_link).next() {
            if let Some(href) = link.value().attr("href") {
                hrefs.push(href.to_owned());
            }
        }
    }

    (blocks, hrefs)
}

/// Resolves a listing `href` against the shop base URL.
///
/// Already-absolute hrefs pass through; relative ones are joined with
/// exactly one slash regardless of how the configured base ends.
fn join_url(base_url: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_owned();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        href.trim_start_matches('/')
    )
}

#[cfg(test)]
#[path = "listing_test.rs"]
mod tests;
