#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use async_trait::async_trait;
use ozet_core::OzetError;
use tokio::sync::Mutex;
use url::Url;

use crate::wire;

const CONNECTOR: &str = "ozet-yahoo";

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Daily chart abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait YfChart: Send + Sync {
    /// Fetch daily bars covering the trailing `range_days` calendar days.
    async fn chart(&self, symbol: &str, range_days: u32) -> Result<wire::ChartResult, OzetError>;
}

/// `quoteSummary` abstraction for key statistics.
#[async_trait]
pub trait YfSummary: Send + Sync {
    /// Fetch the `defaultKeyStatistics` module for `symbol`.
    async fn key_statistics(&self, symbol: &str) -> Result<wire::KeyStatistics, OzetError>;
}

/// News abstraction over the search endpoint.
#[async_trait]
pub trait YfNews: Send + Sync {
    /// Fetch news entries mentioning `symbol`, in feed order.
    async fn news(&self, symbol: &str) -> Result<Vec<wire::NewsEntry>, OzetError>;
}

/// Real adapter speaking HTTP to Yahoo.
///
/// The client keeps a cookie store; the crumb required by `quoteSummary` is
/// fetched lazily and cached until Yahoo rejects it.
#[derive(Clone)]
pub struct RealAdapter {
    http: reqwest::Client,
    query_base: Url,
    cookie_url: Url,
    crumb: std::sync::Arc<Mutex<Option<String>>>,
}

impl RealAdapter {
    /// Default Yahoo query host.
    pub const QUERY_BASE: &'static str = "https://query2.finance.yahoo.com/";
    /// Page visited to obtain the session cookie.
    pub const COOKIE_URL: &'static str = "https://fc.yahoo.com/";

    /// Build an adapter against the public Yahoo hosts.
    ///
    /// # Errors
    /// Returns `OzetError::Connector` if the HTTP client cannot be built.
    pub fn new_default() -> Result<Self, OzetError> {
        let query_base = Url::parse(Self::QUERY_BASE).map_err(|e| OzetError::Other(e.to_string()))?;
        let cookie_url = Url::parse(Self::COOKIE_URL).map_err(|e| OzetError::Other(e.to_string()))?;
        Self::with_base_urls(query_base, cookie_url)
    }

    /// Build an adapter against custom hosts (used with local HTTP mocks).
    ///
    /// # Errors
    /// Returns `OzetError::Connector` if the HTTP client cannot be built.
    pub fn with_base_urls(query_base: Url, cookie_url: Url) -> Result<Self, OzetError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| OzetError::connector(CONNECTOR, e.to_string()))?;
        Ok(Self {
            http,
            query_base,
            cookie_url,
            crumb: std::sync::Arc::new(Mutex::new(None)),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, OzetError> {
        self.query_base
            .join(path)
            .map_err(|e| OzetError::InvalidArg(format!("bad endpoint {path}: {e}")))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, OzetError> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| map_transport_err(&e, context))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(map_status(status, context));
        }
        resp.json::<T>()
            .await
            .map_err(|e| OzetError::Data(format!("{context}: {e}")))
    }

    async fn crumb(&self) -> Result<String, OzetError> {
        let mut guard = self.crumb.lock().await;
        if let Some(c) = guard.as_ref() {
            return Ok(c.clone());
        }
        // Only the cookies matter here; the page itself often answers 404.
        let _ = self.http.get(self.cookie_url.clone()).send().await;

        let url = self.endpoint("v1/test/getcrumb")?;
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| map_transport_err(&e, "crumb"))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(map_status(status, "crumb"));
        }
        let crumb = resp
            .text()
            .await
            .map_err(|e| map_transport_err(&e, "crumb"))?
            .trim()
            .to_string();
        if crumb.is_empty() || crumb.contains('<') {
            return Err(OzetError::connector(CONNECTOR, "invalid crumb response"));
        }
        *guard = Some(crumb.clone());
        Ok(crumb)
    }
}

fn map_status(status: reqwest::StatusCode, context: &str) -> OzetError {
    match status.as_u16() {
        404 => OzetError::not_found(context.to_string()),
        429 => OzetError::connector(CONNECTOR, format!("rate limit: {context}")),
        s if status.is_server_error() => {
            OzetError::connector(CONNECTOR, format!("server error {s}: {context}"))
        }
        s => OzetError::connector(CONNECTOR, format!("status {s}: {context}")),
    }
}

fn map_transport_err(e: &reqwest::Error, context: &str) -> OzetError {
    OzetError::connector(CONNECTOR, format!("{context}: {e}"))
}

fn map_api_err(e: &wire::ApiError, context: &str) -> OzetError {
    if e.code.eq_ignore_ascii_case("not found") {
        OzetError::not_found(context.to_string())
    } else {
        OzetError::connector(CONNECTOR, format!("{}: {}", e.code, e.description))
    }
}

#[async_trait]
impl YfChart for RealAdapter {
    async fn chart(&self, symbol: &str, range_days: u32) -> Result<wire::ChartResult, OzetError> {
        let context = format!("history for {symbol}");
        let mut url = self.endpoint(&format!("v8/finance/chart/{symbol}"))?;
        url.query_pairs_mut()
            .append_pair("range", &format!("{range_days}d"))
            .append_pair("interval", "1d");
        let env: wire::ChartEnvelope = self.get_json(url, &context).await?;
        if let Some(err) = env.chart.error {
            return Err(map_api_err(&err, &context));
        }
        env.chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| OzetError::not_found(context))
    }
}

#[async_trait]
impl YfSummary for RealAdapter {
    async fn key_statistics(&self, symbol: &str) -> Result<wire::KeyStatistics, OzetError> {
        let context = format!("key statistics for {symbol}");
        let crumb = self.crumb().await?;
        let mut url = self.endpoint(&format!("v10/finance/quoteSummary/{symbol}"))?;
        url.query_pairs_mut()
            .append_pair("modules", "defaultKeyStatistics")
            .append_pair("crumb", &crumb);
        let env: wire::SummaryEnvelope = match self.get_json(url, &context).await {
            Ok(env) => env,
            Err(e) => {
                // A stale crumb answers 401; drop it so the next call refreshes.
                if matches!(&e, OzetError::Connector { msg, .. } if msg.starts_with("status 401")) {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(target: "ozet::yahoo", symbol, "crumb rejected, clearing cache");
                    *self.crumb.lock().await = None;
                }
                return Err(e);
            }
        };
        if let Some(err) = env.quote_summary.error {
            return Err(map_api_err(&err, &context));
        }
        let first = env
            .quote_summary
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| OzetError::not_found(context))?;
        Ok(first.default_key_statistics.unwrap_or_default())
    }
}

#[async_trait]
impl YfNews for RealAdapter {
    async fn news(&self, symbol: &str) -> Result<Vec<wire::NewsEntry>, OzetError> {
        let mut url = self.endpoint("v1/finance/search")?;
        url.query_pairs_mut()
            .append_pair("q", symbol)
            .append_pair("quotesCount", "0")
            .append_pair("newsCount", "10");
        let env: wire::SearchEnvelope = self.get_json(url, &format!("news for {symbol}")).await?;
        Ok(env.news)
    }
}

/* -------- Test-only lightweight adapter constructors ------- */

#[cfg(feature = "test-adapters")]
impl dyn YfChart {
    /// Build a `YfChart` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn YfChart>
    where
        F: Send + Sync + 'static + Fn(String, u32) -> Result<wire::ChartResult, OzetError>,
    {
        struct FnChart<F>(F);
        #[async_trait]
        impl<F> YfChart for FnChart<F>
        where
            F: Send + Sync + 'static + Fn(String, u32) -> Result<wire::ChartResult, OzetError>,
        {
            async fn chart(
                &self,
                symbol: &str,
                range_days: u32,
            ) -> Result<wire::ChartResult, OzetError> {
                (self.0)(symbol.to_string(), range_days)
            }
        }
        Arc::new(FnChart(f))
    }
}

#[cfg(feature = "test-adapters")]
impl dyn YfSummary {
    /// Build a `YfSummary` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn YfSummary>
    where
        F: Send + Sync + 'static + Fn(String) -> Result<wire::KeyStatistics, OzetError>,
    {
        struct FnSummary<F>(F);
        #[async_trait]
        impl<F> YfSummary for FnSummary<F>
        where
            F: Send + Sync + 'static + Fn(String) -> Result<wire::KeyStatistics, OzetError>,
        {
            async fn key_statistics(&self, symbol: &str) -> Result<wire::KeyStatistics, OzetError> {
                (self.0)(symbol.to_string())
            }
        }
        Arc::new(FnSummary(f))
    }
}

#[cfg(feature = "test-adapters")]
impl dyn YfNews {
    /// Build a `YfNews` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn YfNews>
    where
        F: Send + Sync + 'static + Fn(String) -> Result<Vec<wire::NewsEntry>, OzetError>,
    {
        struct FnNews<F>(F);
        #[async_trait]
        impl<F> YfNews for FnNews<F>
        where
            F: Send + Sync + 'static + Fn(String) -> Result<Vec<wire::NewsEntry>, OzetError>,
        {
            async fn news(&self, symbol: &str) -> Result<Vec<wire::NewsEntry>, OzetError> {
                (self.0)(symbol.to_string())
            }
        }
        Arc::new(FnNews(f))
    }
}

/// Hands out per-role adapter handles; unimplemented roles answer `unsupported`.
#[cfg(feature = "test-adapters")]
pub trait CloneArcAdapters {
    /// Clone as `Arc<dyn YfChart>`.
    fn clone_arc_chart(&self) -> Arc<dyn YfChart> {
        <dyn YfChart>::from_fn(|_, _| Err(OzetError::unsupported("history")))
    }
    /// Clone as `Arc<dyn YfSummary>`.
    fn clone_arc_summary(&self) -> Arc<dyn YfSummary> {
        <dyn YfSummary>::from_fn(|_| Err(OzetError::unsupported("company-info")))
    }
    /// Clone as `Arc<dyn YfNews>`.
    fn clone_arc_news(&self) -> Arc<dyn YfNews> {
        <dyn YfNews>::from_fn(|_| Err(OzetError::unsupported("general-news")))
    }
}

#[cfg(feature = "test-adapters")]
impl CloneArcAdapters for RealAdapter {
    fn clone_arc_chart(&self) -> Arc<dyn YfChart> {
        Arc::new(self.clone())
    }
    fn clone_arc_summary(&self) -> Arc<dyn YfSummary> {
        Arc::new(self.clone())
    }
    fn clone_arc_news(&self) -> Arc<dyn YfNews> {
        Arc::new(self.clone())
    }
}
