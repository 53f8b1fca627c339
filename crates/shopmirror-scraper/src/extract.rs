//! Extraction of one normalized [`Product`] from a rendered detail page.
//!
//! Extraction is deliberately forgiving: a selector that matches nothing
//! yields an absent or empty field, never an error. The one hard rule is
//! that `Html` stays inside this synchronous module: the parsed document
//! is not `Send` and must never be held across an await point.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::Utc;
use scraper::{ElementRef, Html, Selector};
use shopmirror_core::{Price, Product};

use crate::price::normalize_price;
use crate::selectors::CompiledSelectors;

// Static selectors are part of the extraction algorithm, not per-shop
// configuration. Parsing cannot fail for these literals.
static IMG: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").expect("static selector"));
static LABEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("label").expect("static selector"));

/// Class marking a size label as sold out.
const DISABLED_LABEL_CLASS: &str = "is-disabled";

/// Extracts a product record from detail-page HTML.
///
/// Returns a product with `name: None` when the name selector misses; the
/// caller discards such records before reconciliation. All other selector
/// misses degrade to empty fields. `new` is always `false` here; the
/// reconciler owns that flag.
#[must_use]
pub fn extract_product(html: &str, selectors: &CompiledSelectors, url: &str) -> Product {
    let document = Html::parse_document(html);

    let name = document
        .select(&selectors.product_name)
        .next()
        .map(|el| element_text(&el))
        .filter(|text| !text.is_empty());

    let description = selectors.product_description.as_ref().map_or_else(
        String::new,
        |selector| {
            document
                .select(selector)
                .map(|el| element_text(&el))
                .collect::<Vec<_>>()
                .join(" ")
        },
    );

    let mut images = Vec::new();
    for gallery in document.select(&selectors.image_gallery) {
        for img in gallery.select(&IMG) {
            if let Some(src) = img.value().attr("src") {
                if !src.is_empty() {
                    images.push(normalize_image_url(src));
                }
            }
        }
    }

    let sizes = extract_sizes(&document, selectors);

    let price = match document.select(&selectors.price).next() {
        Some(el) => {
            let raw = element_text(&el);
            let price = normalize_price(&raw);
            if price.is_unavailable() {
                tracing::warn!(url, raw, "price text did not normalize");
            }
            price
        }
        None => {
            tracing::warn!(url, "price element not found on product page");
            Price::Unavailable
        }
    };

    Product {
        name,
        description,
        images,
        sizes,
        price,
        url: url.to_owned(),
        timestamp: Utc::now(),
        new: false,
    }
}

/// Size labels and their availability, read from the size input elements.
///
/// The label element associated via `<label for=ID>` decides availability:
/// a label carrying the disabled class means sold out. Inputs without an
/// associated label are treated as available.
fn extract_sizes(document: &Html, selectors: &CompiledSelectors) -> BTreeMap<String, bool> {
    let mut sizes = BTreeMap::new();
    let Some(size_selector) = &selectors.size_options else {
        return sizes;
    };

    for input in document.select(size_selector) {
        let Some(label_text) = input.value().attr(selectors.size_value_attr.as_str()) else {
            continue;
        };
        let label_text = label_text.trim();
        if label_text.is_empty() {
            continue;
        }

        let available = input
            .value()
            .attr("id")
            .and_then(|id| find_label_for(document, id))
            .is_none_or(|label| {
                !label
                    .value()
                    .classes()
                    .any(|class| class == DISABLED_LABEL_CLASS)
            });

        sizes.insert(label_text.to_owned(), available);
    }

    sizes
}

/// Finds the `<label>` whose `for` attribute references `id`.
fn find_label_for<'a>(document: &'a Html, id: &str) -> Option<ElementRef<'a>> {
    document
        .select(&LABEL)
        .find(|label| label.value().attr("for") == Some(id))
}

/// Concatenated, trimmed text content of an element's descendants.
fn element_text(el: &ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_owned()
}

/// Rewrites protocol-relative image sources to explicit `https://`.
fn normalize_image_url(src: &str) -> String {
    src.strip_prefix("//")
        .map_or_else(|| src.to_owned(), |rest| format!("https://{rest}"))
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
