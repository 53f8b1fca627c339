//! Price normalization from raw storefront text to integer minor units.
//!
//! Storefront price elements carry screen-reader prefixes and currency
//! symbols around the actual amount (`"Sale price€19,90"`). Normalization
//! strips the noise, converts the decimal comma, and truncates to cents.
//! A string that still does not parse is not an error: sold-out products
//! routinely render without a price, so the result is the
//! [`Price::Unavailable`] sentinel.

use shopmirror_core::Price;

/// Screen-reader / layout prefixes seen around storefront prices.
const NOISE_TOKENS: &[&str] = &["Sale price", "Regular price", "Unit price", "From"];

const CURRENCY_SYMBOLS: &[char] = &['€', '$', '£'];

/// Normalizes a raw price string into minor units.
///
/// Returns [`Price::Unavailable`] for anything that does not parse as a
/// non-negative amount (empty text, leftover markup, negative values).
#[must_use]
pub fn normalize_price(raw: &str) -> Price {
    let mut cleaned = raw.to_owned();
    for token in NOISE_TOKENS {
        cleaned = cleaned.replace(token, "");
    }
    let cleaned: String = cleaned
        .chars()
        .filter(|c| !CURRENCY_SYMBOLS.contains(c))
        .collect();
    // Decimal comma is the common case for EU storefronts; a thousands
    // separator would produce multiple dots and fail the parse below,
    // which degrades to Unavailable rather than a wrong amount.
    let cleaned = cleaned.replace(',', ".");
    let cleaned = cleaned.trim();

    match cleaned.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => {
            // Round to the nearest cent. The f64 nearest to e.g. "19.9"
            // sits just below the exact value, so truncating the product
            // would drop a cent.
            #[allow(clippy::cast_possible_truncation)]
            Price::Cents((amount * 100.0).round() as i64)
        }
        _ => Price::Unavailable,
    }
}
