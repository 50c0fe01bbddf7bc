//! ozet-yahoo
//!
//! Connector serving the primary tier from Yahoo Finance: daily price history
//! and company share counts through `MarketHistoryService`, plus the general
//! news feed through `GeneralNewsService`.
#![warn(missing_docs)]

/// Adapter definitions and the production adapter speaking HTTP.
pub mod adapter;
/// Raw response shapes.
pub mod wire;

use std::sync::Arc;

#[cfg(feature = "test-adapters")]
use adapter::CloneArcAdapters;
use adapter::{RealAdapter, YfChart, YfNews, YfSummary};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use ozet_core::{
    CompanyInfo, DailyBar, Decimal, GeneralNewsArticle, Metric, OzetConnector, OzetError,
    PriceHistory, Ticker,
    connector::{GeneralNewsService, MarketHistoryService},
};
use rust_decimal::prelude::FromPrimitive;

#[cfg(not(feature = "test-adapters"))]
type AdapterArc = Arc<RealAdapter>;

#[cfg(feature = "test-adapters")]
type ChartAdapter = Arc<dyn YfChart>;
#[cfg(not(feature = "test-adapters"))]
type ChartAdapter = AdapterArc;

#[cfg(feature = "test-adapters")]
type SummaryAdapter = Arc<dyn YfSummary>;
#[cfg(not(feature = "test-adapters"))]
type SummaryAdapter = AdapterArc;

#[cfg(feature = "test-adapters")]
type NewsAdapter = Arc<dyn YfNews>;
#[cfg(not(feature = "test-adapters"))]
type NewsAdapter = AdapterArc;

/// Public connector type. Production users construct it with `YahooConnector::new_default()`.
pub struct YahooConnector {
    chart: ChartAdapter,
    summary: SummaryAdapter,
    news: NewsAdapter,
}

impl YahooConnector {
    fn looks_like_not_found(msg: &str) -> bool {
        let m = msg.to_ascii_lowercase();
        m.contains("not found") || m.contains("no data") || m.contains("delisted")
    }

    fn normalize_error(e: OzetError, what: &str) -> OzetError {
        match e {
            OzetError::Connector { connector: _, msg } => {
                if Self::looks_like_not_found(&msg) {
                    OzetError::not_found(what.to_string())
                } else {
                    OzetError::connector("ozet-yahoo", msg)
                }
            }
            OzetError::Other(msg) => OzetError::connector("ozet-yahoo", msg),
            other => other,
        }
    }

    /// Build against the public Yahoo hosts.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new_default() -> Result<Self, OzetError> {
        let a = RealAdapter::new_default()?;
        Ok(Self::from_adapter(&a))
    }

    /// For tests/injection (requires the `test-adapters` feature).
    #[cfg(feature = "test-adapters")]
    pub fn from_adapter<A: CloneArcAdapters + 'static>(adapter: &A) -> Self {
        Self {
            chart: adapter.clone_arc_chart(),
            summary: adapter.clone_arc_summary(),
            news: adapter.clone_arc_news(),
        }
    }

    #[cfg(not(feature = "test-adapters"))]
    /// Build from a concrete `RealAdapter` by cloning it into shared handles.
    pub fn from_adapter(adapter: &RealAdapter) -> Self {
        let shared = Arc::new(adapter.clone());
        Self {
            chart: Arc::clone(&shared),
            summary: Arc::clone(&shared),
            news: shared,
        }
    }
}

/// Convert a raw chart series into bars, oldest first.
///
/// Bars are dated in the exchange's timezone when Yahoo names one, in UTC
/// otherwise. Entries without a close are dropped.
#[must_use]
pub fn bars_from_chart(raw: &wire::ChartResult) -> PriceHistory {
    let timezone: Option<Tz> = raw
        .meta
        .exchange_timezone_name
        .as_deref()
        .and_then(|name| name.parse().ok());
    let columns = raw.indicators.quote.first();

    let mut bars: Vec<DailyBar> = raw
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, ts)| {
            let cols = columns?;
            let close = cols.close.get(i).copied().flatten()?;
            let close = Decimal::from_f64(close)?;
            let volume = cols.volume.get(i).copied().flatten().and_then(whole);
            let at = DateTime::<Utc>::from_timestamp(*ts, 0)?;
            Some(DailyBar {
                date: local_date(at, timezone),
                close,
                volume,
            })
        })
        .collect();
    bars.sort_by_key(|b| b.date);
    PriceHistory { bars, timezone }
}

fn local_date(at: DateTime<Utc>, tz: Option<Tz>) -> NaiveDate {
    tz.map_or_else(|| at.date_naive(), |tz| at.with_timezone(&tz).date_naive())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole(v: f64) -> Option<u64> {
    (v.is_finite() && v >= 0.0).then(|| v.round() as u64)
}

/// Share counts from key statistics; missing or negative values are unknown.
#[must_use]
pub fn info_from_statistics(stats: &wire::KeyStatistics) -> CompanyInfo {
    let count = |n: Option<wire::RawNumber>| -> Metric<u64> {
        n.and_then(|n| n.raw).and_then(whole).into()
    };
    CompanyInfo {
        float_shares: count(stats.float_shares),
        shares_outstanding: count(stats.shares_outstanding),
    }
}

impl OzetConnector for YahooConnector {
    fn name(&self) -> &'static str {
        "ozet-yahoo"
    }

    fn as_market_history_service(&self) -> Option<&dyn MarketHistoryService> {
        Some(self as &dyn MarketHistoryService)
    }

    fn as_general_news_service(&self) -> Option<&dyn GeneralNewsService> {
        Some(self as &dyn GeneralNewsService)
    }
}

#[async_trait]
impl MarketHistoryService for YahooConnector {
    async fn history(&self, ticker: &Ticker, lookback_days: u32) -> Result<PriceHistory, OzetError> {
        let raw = self
            .chart
            .chart(ticker.as_str(), lookback_days)
            .await
            .map_err(|e| Self::normalize_error(e, &format!("history for {ticker}")))?;
        Ok(bars_from_chart(&raw))
    }

    async fn company_info(&self, ticker: &Ticker) -> Result<CompanyInfo, OzetError> {
        let stats = self
            .summary
            .key_statistics(ticker.as_str())
            .await
            .map_err(|e| Self::normalize_error(e, &format!("company info for {ticker}")))?;
        Ok(info_from_statistics(&stats))
    }
}

#[async_trait]
impl GeneralNewsService for YahooConnector {
    async fn news(&self, ticker: &Ticker) -> Result<Vec<GeneralNewsArticle>, OzetError> {
        let raw = self
            .news
            .news(ticker.as_str())
            .await
            .map_err(|e| Self::normalize_error(e, &format!("news for {ticker}")))?;
        Ok(raw
            .into_iter()
            .filter_map(|n| {
                Some(GeneralNewsArticle {
                    published_at: DateTime::<Utc>::from_timestamp(n.provider_publish_time, 0)?,
                    title: n.title,
                    link: n.link,
                })
            })
            .collect())
    }
}
