//! ozet-finviz
//!
//! Fetches the Finviz quote page for a ticker. The page is returned as raw
//! HTML; extracting the insider rows is left to the caller.
#![warn(missing_docs)]

use std::time::Duration;

use async_trait::async_trait;
use ozet_core::{OzetConnector, OzetError, Ticker, connector::ProfilePageScraper};
use reqwest::{Client, StatusCode};
use url::Url;

const CONNECTOR: &str = "ozet-finviz";

/// Quote page template root; the symbol goes in the `t` query parameter.
pub const QUOTE_PAGE_URL: &str = "https://finviz.com/quote.ashx";

/// Finviz refuses requests without a browser-like agent.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Quote-page scraper connector.
pub struct FinvizConnector {
    client: Client,
    page_url: Url,
}

impl FinvizConnector {
    /// Connector against finviz.com.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new_default() -> Result<Self, OzetError> {
        let url = Url::parse(QUOTE_PAGE_URL).map_err(|e| OzetError::Other(e.to_string()))?;
        Self::with_page_url(url)
    }

    /// Connector against a custom quote page URL (tests, mirrors).
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_page_url(page_url: Url) -> Result<Self, OzetError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| OzetError::connector(CONNECTOR, e.to_string()))?;
        Ok(Self { client, page_url })
    }
}

impl OzetConnector for FinvizConnector {
    fn name(&self) -> &'static str {
        CONNECTOR
    }

    fn as_profile_page_scraper(&self) -> Option<&dyn ProfilePageScraper> {
        Some(self as &dyn ProfilePageScraper)
    }
}

#[async_trait]
impl ProfilePageScraper for FinvizConnector {
    async fn fetch_quote_page(&self, ticker: &Ticker) -> Result<String, OzetError> {
        let mut url = self.page_url.clone();
        url.query_pairs_mut().append_pair("t", ticker.as_str());

        #[cfg(feature = "tracing")]
        tracing::debug!(target: "ozet::finviz", %url, "fetching quote page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| OzetError::connector(CONNECTOR, format!("request failed: {e}")))?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(OzetError::connector(CONNECTOR, "rate limit: quote page"));
            }
            StatusCode::NOT_FOUND => {
                return Err(OzetError::not_found(format!("quote page for {ticker}")));
            }
            s if !s.is_success() => {
                return Err(OzetError::connector(CONNECTOR, format!("HTTP {s}: quote page")));
            }
            _ => {}
        }

        response
            .text()
            .await
            .map_err(|e| OzetError::connector(CONNECTOR, format!("failed to read page: {e}")))
    }
}
