//! Finnhub response shapes. Missing keys deserialize as `None`.

use serde::Deserialize;

/// `/quote`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteResponse {
    /// Current price.
    pub c: Option<f64>,
    /// Previous close.
    pub pc: Option<f64>,
    /// Day volume, not sent on every plan.
    pub v: Option<f64>,
}

/// `/stock/metric?metric=all`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricResponse {
    /// Flat metric map.
    #[serde(default)]
    pub metric: Metrics,
}

/// The subset of the metric map this connector reads. Values are in millions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metrics {
    /// 10-day average volume.
    #[serde(rename = "10DayAverageTradingVolume")]
    pub avg_volume_10d: Option<f64>,
    /// 52-week average volume.
    #[serde(rename = "52WeekAverageTradingVolume")]
    pub avg_volume_52w: Option<f64>,
    /// Float shares.
    #[serde(rename = "floatShares")]
    pub float_shares: Option<f64>,
    /// Shares outstanding.
    #[serde(rename = "sharesOutstanding")]
    pub shares_outstanding: Option<f64>,
}

/// One `/company-news` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsEntry {
    /// Headline.
    #[serde(default)]
    pub headline: String,
    /// Publication time in epoch seconds.
    pub datetime: i64,
    /// Article URL.
    #[serde(default)]
    pub url: String,
}

/// `/stock/insider-transactions`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InsiderResponse {
    /// Transactions, most recent first.
    #[serde(default)]
    pub data: Vec<InsiderEntry>,
}

/// One insider transaction.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsiderEntry {
    /// Insider name.
    #[serde(default)]
    pub name: String,
    /// Net share change.
    pub change: Option<i64>,
    /// `YYYY-MM-DD`.
    pub transaction_date: Option<String>,
}

/// `/stock/ownership`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwnershipResponse {
    /// Holders in provider order.
    #[serde(default)]
    pub ownership: Vec<OwnershipEntry>,
}

/// One holder.
#[derive(Debug, Clone, Deserialize)]
pub struct OwnershipEntry {
    /// Holder name.
    #[serde(default)]
    pub name: String,
    /// Percentage held, already in percent units.
    pub percent: Option<f64>,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: Option<String>,
}
