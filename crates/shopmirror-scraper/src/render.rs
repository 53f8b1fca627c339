//! Page-rendering session abstraction.
//!
//! Detail pages on some storefronts finish rendering client-side, after
//! navigation. The [`PageRenderer`] trait models the session contract the
//! orchestrator needs: navigate to a URL, wait a fixed settle delay, and
//! read the resulting HTML. One session is acquired per shop-run and
//! released when the run's future drops it, including on error paths.
//!
//! [`HttpRenderer`] is the plain-HTTP implementation used for storefronts
//! that render server-side. A browser-automation client slots in behind
//! the same trait without touching the orchestrator.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::ScraperError;
use crate::fetch::fetch_page;

/// A rendering session: navigate, settle, read HTML.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Navigates to `url` and returns the rendered HTML after the settle
    /// delay has elapsed.
    async fn render(&self, url: &str) -> Result<String, ScraperError>;
}

/// Renders pages with a plain HTTP GET.
///
/// The configured settle delay is still honored between navigation and
/// returning the body, keeping per-page pacing identical to a
/// render-capable session.
pub struct HttpRenderer {
    client: Client,
    settle_delay: Duration,
}

impl HttpRenderer {
    #[must_use]
    pub fn new(client: Client, settle_delay_ms: u64) -> Self {
        Self {
            client,
            settle_delay: Duration::from_millis(settle_delay_ms),
        }
    }
}

#[async_trait]
impl PageRenderer for HttpRenderer {
    async fn render(&self, url: &str) -> Result<String, ScraperError> {
        let body = fetch_page(&self.client, url).await?;
        if !self.settle_delay.is_zero() {
            tokio::time::sleep(self.settle_delay).await;
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn renders_page_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/a"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>a</html>"))
            .mount(&server)
            .await;

        let client = crate::fetch::build_client(5, "shopmirror-test").unwrap();
        let renderer = HttpRenderer::new(client, 0);
        let html = renderer
            .render(&format!("{}/products/a", server.uri()))
            .await
            .unwrap();
        assert_eq!(html, "<html>a</html>");
    }

    #[tokio::test]
    async fn propagates_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = crate::fetch::build_client(5, "shopmirror-test").unwrap();
        let renderer = HttpRenderer::new(client, 0);
        let err = renderer
            .render(&format!("{}/products/missing", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ScraperError::UnexpectedStatus { status: 404, .. }
        ));
    }
}
