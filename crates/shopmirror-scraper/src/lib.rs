pub mod error;
pub mod extract;
pub mod fetch;
pub mod listing;
pub mod price;
pub mod render;
pub mod selectors;

pub use error::ScraperError;
pub use extract::extract_product;
pub use fetch::build_client;
pub use listing::discover_product_urls;
pub use price::normalize_price;
pub use render::{HttpRenderer, PageRenderer};
pub use selectors::CompiledSelectors;
