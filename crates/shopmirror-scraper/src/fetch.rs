//! HTTP client construction and page fetching.

use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;

/// Builds the shared HTTP client with configured timeout and `User-Agent`.
///
/// # Errors
///
/// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
/// cannot be constructed (e.g., invalid TLS config).
pub fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, ScraperError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Fetches the HTML body of `url`.
///
/// # Errors
///
/// - [`ScraperError::UnexpectedStatus`]: non-2xx response. Callers treat
///   this as "page does not exist" (end of pagination, skipped product).
/// - [`ScraperError::Http`]: transport failure (DNS, connect, timeout).
pub(crate) async fn fetch_page(client: &Client, url: &str) -> Result<String, ScraperError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ScraperError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }
    Ok(response.text().await?)
}
