//! Serde shapes of the Yahoo Finance JSON endpoints used by this connector.
//!
//! Only the fields the connector reads are modelled; everything else is
//! ignored on deserialization.

use serde::Deserialize;

/// `/v8/finance/chart/{symbol}` envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartEnvelope {
    /// Payload.
    pub chart: Chart,
}

/// Chart payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Chart {
    /// One entry per requested symbol.
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    /// Present when Yahoo rejects the symbol.
    #[serde(default)]
    pub error: Option<ApiError>,
}

/// Daily series for one symbol.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartResult {
    /// Exchange metadata.
    #[serde(default)]
    pub meta: ChartMeta,
    /// Bar timestamps in epoch seconds.
    #[serde(default)]
    pub timestamp: Vec<i64>,
    /// Parallel OHLCV arrays.
    #[serde(default)]
    pub indicators: Indicators,
}

/// Chart metadata.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    /// IANA timezone of the listing exchange, e.g. `America/New_York`.
    #[serde(default)]
    pub exchange_timezone_name: Option<String>,
}

/// Indicator arrays.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Indicators {
    /// Usually a single element.
    #[serde(default)]
    pub quote: Vec<QuoteIndicators>,
}

/// Close and volume columns; `null` entries mark missing values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteIndicators {
    /// Closing prices.
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    /// Traded volume.
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

/// Error object embedded in chart and summary envelopes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiError {
    /// Machine code, e.g. `Not Found`.
    #[serde(default)]
    pub code: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}

/// `/v10/finance/quoteSummary/{symbol}` envelope.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryEnvelope {
    /// Payload.
    pub quote_summary: Summary,
}

/// Summary payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Summary {
    /// One entry per requested symbol.
    #[serde(default)]
    pub result: Option<Vec<SummaryResult>>,
    /// Present when Yahoo rejects the symbol.
    #[serde(default)]
    pub error: Option<ApiError>,
}

/// Requested summary modules.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    /// `defaultKeyStatistics` module.
    #[serde(default)]
    pub default_key_statistics: Option<KeyStatistics>,
}

/// Share counts from `defaultKeyStatistics`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyStatistics {
    /// Float shares.
    #[serde(default)]
    pub float_shares: Option<RawNumber>,
    /// Shares outstanding.
    #[serde(default)]
    pub shares_outstanding: Option<RawNumber>,
}

/// Yahoo's `{ "raw": .., "fmt": .. }` number wrapper; `{}` when absent.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RawNumber {
    /// Numeric value.
    #[serde(default)]
    pub raw: Option<f64>,
}

/// `/v1/finance/search` response, only the news part.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchEnvelope {
    /// News items in feed order.
    #[serde(default)]
    pub news: Vec<NewsEntry>,
}

/// One news entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsEntry {
    /// Headline.
    #[serde(default)]
    pub title: String,
    /// Article URL.
    #[serde(default)]
    pub link: String,
    /// Publication time in epoch seconds.
    #[serde(default)]
    pub provider_publish_time: i64,
}
