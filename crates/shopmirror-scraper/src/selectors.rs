//! Compiled per-shop selectors.
//!
//! Raw selector strings from the shop configuration are compiled into
//! [`scraper::Selector`] values once, when a sync run starts. A selector
//! that does not parse is a configuration failure surfaced before any page
//! is fetched; extraction code never sees an invalid selector.

use scraper::Selector;
use shopmirror_core::SelectorConfig;

use crate::error::ScraperError;

/// The compiled form of a [`SelectorConfig`], ready for extraction.
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    pub product_block: Selector,
    pub product_link: Selector,
    pub product_name: Selector,
    pub product_description: Option<Selector>,
    pub image_gallery: Selector,
    pub size_options: Option<Selector>,
    /// Attribute on a size input carrying the size label (e.g. `value`).
    pub size_value_attr: String,
    pub price: Selector,
}

impl CompiledSelectors {
    /// Compiles every selector in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] naming the offending field
    /// for the first selector that fails to parse.
    pub fn compile(config: &SelectorConfig) -> Result<Self, ScraperError> {
        Ok(Self {
            product_block: compile_one("product_block", &config.product_block)?,
            product_link: compile_one("product_link", &config.product_link)?,
            product_name: compile_one("product_name", &config.product_name)?,
            product_description: config
                .product_description
                .as_deref()
                .map(|s| compile_one("product_description", s))
                .transpose()?,
            image_gallery: compile_one("image_gallery", &config.image_gallery)?,
            size_options: config
                .size_options
                .as_deref()
                .map(|s| compile_one("size_options", s))
                .transpose()?,
            size_value_attr: config.size_value_attr.clone(),
            price: compile_one("price", &config.price)?,
        })
    }
}

fn compile_one(field: &'static str, raw: &str) -> Result<Selector, ScraperError> {
    Selector::parse(raw).map_err(|e| ScraperError::InvalidSelector {
        field,
        selector: raw.to_owned(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SelectorConfig {
        SelectorConfig {
            product_block: ".product-card".to_owned(),
            product_link: ".product-card__media".to_owned(),
            product_name: ".product-title".to_owned(),
            product_description: None,
            image_gallery: ".product-gallery".to_owned(),
            size_options: None,
            size_value_attr: "value".to_owned(),
            price: "sale-price.h5".to_owned(),
        }
    }

    #[test]
    fn compiles_minimal_config() {
        let compiled = CompiledSelectors::compile(&config()).unwrap();
        assert!(compiled.product_description.is_none());
        assert!(compiled.size_options.is_none());
        assert_eq!(compiled.size_value_attr, "value");
    }

    #[test]
    fn compiles_optional_selectors_when_present() {
        let mut raw = config();
        raw.product_description = Some(".accordion__content.prose".to_owned());
        raw.size_options = Some(".variant-picker input[type='radio']".to_owned());
        let compiled = CompiledSelectors::compile(&raw).unwrap();
        assert!(compiled.product_description.is_some());
        assert!(compiled.size_options.is_some());
    }

    #[test]
    fn invalid_selector_names_the_field() {
        let mut raw = config();
        raw.price = ":::".to_owned();
        let err = CompiledSelectors::compile(&raw).unwrap_err();
        assert!(
            matches!(err, ScraperError::InvalidSelector { field, .. } if field == "price"),
            "unexpected error: {err:?}"
        );
    }
}
