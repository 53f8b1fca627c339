//! Shop configuration: which storefronts to mirror and where in their HTML
//! each product field lives.
//!
//! The shops file is YAML, one entry per storefront. Selectors are plain CSS
//! strings here; they are compiled (and thereby validated) when a sync run
//! starts, so a typo in a selector fails the run up front rather than at
//! extraction time.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Placeholder in `category_url_template` replaced with the page number.
pub const PAGE_PLACEHOLDER: &str = "{page}";

/// Per-shop CSS selectors describing where each product field lives.
///
/// Optional fields disable the corresponding extraction facet: a shop
/// without `product_description` simply yields empty descriptions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// One listing-page product card.
    pub product_block: String,
    /// The detail-page link inside a product block.
    pub product_link: String,
    /// The product name on the detail page.
    pub product_name: String,
    #[serde(default)]
    pub product_description: Option<String>,
    /// Containers whose descendant `<img>` elements form the gallery.
    pub image_gallery: String,
    /// The size input elements (typically radio inputs).
    #[serde(default)]
    pub size_options: Option<String>,
    /// Attribute on a size input carrying the size label.
    #[serde(default = "default_size_value_attr")]
    pub size_value_attr: String,
    /// The single price element on the detail page.
    pub price: String,
}

fn default_size_value_attr() -> String {
    "value".to_owned()
}

/// One storefront to mirror.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Merchant identifier; also the document key in the catalog store.
    pub company_name: String,
    /// Prefix for resolving relative product links.
    pub base_url: String,
    /// Category listing URL with a `{page}` placeholder.
    pub category_url_template: String,
    pub selectors: SelectorConfig,
}

impl ShopConfig {
    /// Returns the listing URL for a 1-based page number.
    #[must_use]
    pub fn category_url(&self, page: u32) -> String {
        self.category_url_template
            .replace(PAGE_PLACEHOLDER, &page.to_string())
    }
}

#[derive(Debug, Deserialize)]
pub struct ShopsFile {
    pub shops: Vec<ShopConfig>,
}

/// Load and validate the shop configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_shops(path: &Path) -> Result<ShopsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ShopsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let shops_file: ShopsFile =
        serde_yaml::from_str(&content).map_err(ConfigError::ShopsFileParse)?;

    validate_shops(&shops_file)?;

    Ok(shops_file)
}

fn validate_shops(shops_file: &ShopsFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for shop in &shops_file.shops {
        if shop.company_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "company_name must be non-empty".to_string(),
            ));
        }

        let lower_name = shop.company_name.to_lowercase();
        if !seen_names.insert(lower_name) {
            return Err(ConfigError::Validation(format!(
                "duplicate company_name: '{}'",
                shop.company_name
            )));
        }

        if !shop.base_url.starts_with("http://") && !shop.base_url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "shop '{}' has base_url '{}' without an http(s) scheme",
                shop.company_name, shop.base_url
            )));
        }

        if !shop.category_url_template.contains(PAGE_PLACEHOLDER) {
            return Err(ConfigError::Validation(format!(
                "shop '{}' has category_url_template without a {PAGE_PLACEHOLDER} placeholder",
                shop.company_name
            )));
        }

        if shop.selectors.size_value_attr.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "shop '{}' has an empty size_value_attr",
                shop.company_name
            )));
        }
    }

    Ok(())
}
