//! ozet-finnhub
//!
//! Connector for the Finnhub REST API. Serves the secondary metrics tier
//! (`/quote`, `/stock/metric`), company news and the structured insider data
//! (`/stock/insider-transactions`, `/stock/ownership`).
//!
//! Requests authenticate with the `X-Finnhub-Token` header. Finnhub reports
//! average volumes and share counts in millions; they are scaled to absolute
//! counts here.
#![warn(missing_docs)]

mod client;
/// Raw response shapes.
pub mod wire;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use client::FinnhubClient;
use ozet_core::{
    BasicFinancials, CompanyNewsArticle, Decimal, InsiderTransaction, Metric,
    OwnershipRecord, OzetConnector, OzetError, RealtimeQuote, Ticker,
    connector::{CompanyNewsService, FundamentalsService, OwnershipService, RealtimeQuoteService},
};
use rust_decimal::prelude::FromPrimitive;
use url::Url;

pub(crate) const CONNECTOR: &str = "ozet-finnhub";

/// Public Finnhub API root.
pub const BASE_URL: &str = "https://finnhub.io/api/v1/";

const MILLION: f64 = 1_000_000.0;

/// Finnhub connector.
pub struct FinnhubConnector {
    client: FinnhubClient,
}

impl FinnhubConnector {
    /// Connector against the public API.
    ///
    /// # Errors
    /// Returns an error if the key is blank or the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, OzetError> {
        let base = Url::parse(BASE_URL).map_err(|e| OzetError::Other(e.to_string()))?;
        Self::with_base_url(api_key, base)
    }

    /// Connector against a custom API root, e.g. a local HTTP mock.
    ///
    /// # Errors
    /// Returns an error if the key is blank or the HTTP client cannot be built.
    pub fn with_base_url(api_key: impl Into<String>, base: Url) -> Result<Self, OzetError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(OzetError::InvalidArg("finnhub api key is empty".into()));
        }
        Ok(Self {
            client: FinnhubClient::new(api_key, base)?,
        })
    }
}

fn price(v: Option<f64>) -> Metric<Decimal> {
    v.and_then(Decimal::from_f64).into()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count(v: Option<f64>, scale: f64) -> Metric<u64> {
    v.map(|v| v * scale)
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v.round() as u64)
        .into()
}

/// Map a raw `/quote` body. Finnhub answers unknown or halted symbols with
/// zeros; a zero price is treated as missing.
#[must_use]
pub fn quote_from_wire(raw: &wire::QuoteResponse) -> RealtimeQuote {
    let nonzero = |v: Option<f64>| v.filter(|v| *v != 0.0);
    RealtimeQuote {
        current_price: price(nonzero(raw.c)),
        previous_close: price(nonzero(raw.pc)),
        volume: count(raw.v, 1.0),
    }
}

/// Map the metric map, scaling million units to absolute counts.
#[must_use]
pub fn financials_from_wire(raw: &wire::Metrics) -> BasicFinancials {
    BasicFinancials {
        avg_volume_10d: count(raw.avg_volume_10d, MILLION),
        avg_volume_52w: count(raw.avg_volume_52w, MILLION),
        float_shares: count(raw.float_shares, MILLION),
        shares_outstanding: count(raw.shares_outstanding, MILLION),
    }
}

impl OzetConnector for FinnhubConnector {
    fn name(&self) -> &'static str {
        CONNECTOR
    }

    fn as_realtime_quote_service(&self) -> Option<&dyn RealtimeQuoteService> {
        Some(self as &dyn RealtimeQuoteService)
    }
    fn as_fundamentals_service(&self) -> Option<&dyn FundamentalsService> {
        Some(self as &dyn FundamentalsService)
    }
    fn as_company_news_service(&self) -> Option<&dyn CompanyNewsService> {
        Some(self as &dyn CompanyNewsService)
    }
    fn as_ownership_service(&self) -> Option<&dyn OwnershipService> {
        Some(self as &dyn OwnershipService)
    }
}

#[async_trait]
impl RealtimeQuoteService for FinnhubConnector {
    async fn quote(&self, ticker: &Ticker) -> Result<RealtimeQuote, OzetError> {
        let s = ticker.as_str();
        let raw: wire::QuoteResponse = self
            .client
            .get("quote", &[("symbol", s)], &format!("quote for {s}"))
            .await?;
        Ok(quote_from_wire(&raw))
    }
}

#[async_trait]
impl FundamentalsService for FinnhubConnector {
    async fn basic_financials(&self, ticker: &Ticker) -> Result<BasicFinancials, OzetError> {
        let s = ticker.as_str();
        let raw: wire::MetricResponse = self
            .client
            .get(
                "stock/metric",
                &[("symbol", s), ("metric", "all")],
                &format!("basic financials for {s}"),
            )
            .await?;
        Ok(financials_from_wire(&raw.metric))
    }
}

#[async_trait]
impl CompanyNewsService for FinnhubConnector {
    async fn company_news(
        &self,
        ticker: &Ticker,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<CompanyNewsArticle>, OzetError> {
        let s = ticker.as_str();
        let from = from.format("%Y-%m-%d").to_string();
        let to = to.format("%Y-%m-%d").to_string();
        let raw: Vec<wire::NewsEntry> = self
            .client
            .get(
                "company-news",
                &[("symbol", s), ("from", from.as_str()), ("to", to.as_str())],
                &format!("company news for {s}"),
            )
            .await?;
        Ok(raw
            .into_iter()
            .filter_map(|n| {
                Some(CompanyNewsArticle {
                    published_at: DateTime::<Utc>::from_timestamp(n.datetime, 0)?,
                    headline: n.headline,
                    url: n.url,
                })
            })
            .collect())
    }
}

#[async_trait]
impl OwnershipService for FinnhubConnector {
    async fn insider_transactions(
        &self,
        ticker: &Ticker,
    ) -> Result<Vec<InsiderTransaction>, OzetError> {
        let s = ticker.as_str();
        let raw: wire::InsiderResponse = self
            .client
            .get(
                "stock/insider-transactions",
                &[("symbol", s)],
                &format!("insider transactions for {s}"),
            )
            .await?;
        Ok(raw
            .data
            .into_iter()
            .map(|t| InsiderTransaction {
                name: t.name,
                share_change: t.change,
                transaction_date: t
                    .transaction_date
                    .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
            })
            .collect())
    }

    async fn ownership(&self, ticker: &Ticker) -> Result<Vec<OwnershipRecord>, OzetError> {
        let s = ticker.as_str();
        let raw: wire::OwnershipResponse = self
            .client
            .get("stock/ownership", &[("symbol", s)], &format!("ownership for {s}"))
            .await?;
        Ok(raw
            .ownership
            .into_iter()
            .map(|o| OwnershipRecord {
                holder: o.name,
                percent: price(o.percent),
            })
            .collect())
    }
}
