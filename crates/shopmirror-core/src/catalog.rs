//! Catalog data model: the per-merchant product document and its entries.
//!
//! ## Document shape
//!
//! Each merchant owns one document of the form
//! `{"products": {"<product name>": {...}, ...}}`. The product name is the
//! map key; a product without a name can never be stored. The document is
//! read once at the start of a sync run, merged incrementally while product
//! pages are scraped, and pruned at the end of the run.
//!
//! ## Price encoding
//!
//! Prices are stored as integer minor units (cents) to avoid floating-point
//! drift. A price that could not be parsed (typically a sold-out product)
//! is stored as the explicit string sentinel `"unavailable"`. No other
//! string ever appears in the price position.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Sentinel stored in place of a price that could not be determined.
const UNAVAILABLE: &str = "unavailable";

/// A product price in integer minor units, or the explicit unavailable
/// sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Price {
    /// Price in minor units (cents). Always non-negative.
    Cents(i64),
    /// Price could not be determined (sold out, missing element, parse
    /// failure). Serialized as the string `"unavailable"`.
    Unavailable,
}

impl Price {
    /// Returns `true` for the unavailable sentinel.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Price::Unavailable)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Cents(cents) => write!(f, "{cents}"),
            Price::Unavailable => write!(f, "{UNAVAILABLE}"),
        }
    }
}

impl Serialize for Price {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Price::Cents(cents) => serializer.serialize_i64(*cents),
            Price::Unavailable => serializer.serialize_str(UNAVAILABLE),
        }
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PriceVisitor;

        impl Visitor<'_> for PriceVisitor {
            type Value = Price;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a non-negative integer or the string \"{UNAVAILABLE}\"")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Price, E> {
                if v < 0 {
                    return Err(E::custom(format!("negative price {v}")));
                }
                Ok(Price::Cents(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Price, E> {
                i64::try_from(v)
                    .map(Price::Cents)
                    .map_err(|_| E::custom(format!("price {v} out of range")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Price, E> {
                if v == UNAVAILABLE {
                    Ok(Price::Unavailable)
                } else {
                    Err(E::custom(format!("unexpected price string \"{v}\"")))
                }
            }
        }

        deserializer.deserialize_any(PriceVisitor)
    }
}

/// A single product as extracted from a detail page and stored in the
/// merchant document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Display name; the document key once stored. `None` means the name
    /// selector did not match, and such a record is discarded before merging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Space-joined text of all description matches, in document order.
    pub description: String,
    /// Image URLs in gallery order. Duplicates are allowed.
    pub images: Vec<String>,
    /// Size label to availability. `false` means the size is sold out.
    pub sizes: BTreeMap<String, bool>,
    pub price: Price,
    /// The product detail page this record was extracted from.
    pub url: String,
    /// Instant of extraction (UTC).
    pub timestamp: DateTime<Utc>,
    /// Sticky marker set when the product is first inserted into the
    /// document. Never reset automatically; an external consumer clears it.
    #[serde(default)]
    pub new: bool,
}

/// The full persisted catalog for one merchant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub products: BTreeMap<String, Product>,
}

impl CatalogSnapshot {
    /// Returns the number of stored products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns `true` if no products are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product(name: &str) -> Product {
        Product {
            name: Some(name.to_owned()),
            description: "A jacket.".to_owned(),
            images: vec!["https://cdn.example.com/a.jpg".to_owned()],
            sizes: BTreeMap::from([("M".to_owned(), true), ("L".to_owned(), false)]),
            price: Price::Cents(1990),
            url: "https://shop.example.com/products/jacket".to_owned(),
            timestamp: Utc::now(),
            new: false,
        }
    }

    #[test]
    fn price_cents_serializes_as_integer() {
        let json = serde_json::to_value(Price::Cents(1990)).unwrap();
        assert_eq!(json, serde_json::json!(1990));
    }

    #[test]
    fn price_unavailable_serializes_as_sentinel_string() {
        let json = serde_json::to_value(Price::Unavailable).unwrap();
        assert_eq!(json, serde_json::json!("unavailable"));
    }

    #[test]
    fn price_deserializes_integer() {
        let price: Price = serde_json::from_value(serde_json::json!(500)).unwrap();
        assert_eq!(price, Price::Cents(500));
    }

    #[test]
    fn price_deserializes_sentinel() {
        let price: Price = serde_json::from_value(serde_json::json!("unavailable")).unwrap();
        assert_eq!(price, Price::Unavailable);
    }

    #[test]
    fn price_displays_cents_and_sentinel() {
        assert_eq!(Price::Cents(1990).to_string(), "1990");
        assert_eq!(Price::Unavailable.to_string(), "unavailable");
    }

    #[test]
    fn is_unavailable_matches_only_the_sentinel() {
        assert!(Price::Unavailable.is_unavailable());
        assert!(!Price::Cents(0).is_unavailable());
    }

    #[test]
    fn price_rejects_arbitrary_string() {
        let result: Result<Price, _> = serde_json::from_value(serde_json::json!("sold out"));
        assert!(result.is_err());
    }

    #[test]
    fn price_rejects_negative() {
        let result: Result<Price, _> = serde_json::from_value(serde_json::json!(-100));
        assert!(result.is_err());
    }

    #[test]
    fn product_new_flag_defaults_to_false_on_deserialize() {
        let mut value = serde_json::to_value(sample_product("Jacket")).unwrap();
        value.as_object_mut().unwrap().remove("new");
        let product: Product = serde_json::from_value(value).unwrap();
        assert!(!product.new);
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut snapshot = CatalogSnapshot::default();
        snapshot
            .products
            .insert("Jacket".to_owned(), sample_product("Jacket"));
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: CatalogSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.len(), 1);
        assert_eq!(restored.products["Jacket"].price, Price::Cents(1990));
    }

    #[test]
    fn empty_document_deserializes_to_empty_snapshot() {
        let snapshot: CatalogSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.is_empty());
    }
}
