use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Metric, Ticker};

/// Price, volume and float metrics for one ticker after all fallbacks ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    /// Absolute price change against the reference close.
    pub price_change: Metric<Decimal>,
    /// Price change as a percentage of the reference close.
    pub price_change_pct: Metric<Decimal>,
    /// Latest session volume.
    pub volume: Metric<u64>,
    /// Average daily volume over the trailing window.
    pub avg_volume_30d: Metric<u64>,
    /// `volume / avg_volume_30d`, two decimals.
    pub volume_ratio: Metric<Decimal>,
    /// `float_shares / shares_outstanding * 100`.
    pub float_pct: Metric<Decimal>,
    /// Total shares outstanding.
    pub shares_outstanding: Metric<u64>,
    /// Shares available for public trading.
    pub float_shares: Metric<u64>,
}

impl QuoteSnapshot {
    /// A snapshot with every field `Unknown`.
    #[must_use]
    pub fn unknown() -> Self {
        Self::default()
    }

    /// True when every field holds a value.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.price_change.is_known()
            && self.price_change_pct.is_known()
            && self.volume.is_known()
            && self.avg_volume_30d.is_known()
            && self.volume_ratio.is_known()
            && self.float_pct.is_known()
            && self.shares_outstanding.is_known()
            && self.float_shares.is_known()
    }

    /// Fills each `Unknown` field from `lower`, leaving known fields untouched.
    #[must_use]
    pub fn merge_missing(self, lower: Self) -> Self {
        Self {
            price_change: self.price_change.or(lower.price_change),
            price_change_pct: self.price_change_pct.or(lower.price_change_pct),
            volume: self.volume.or(lower.volume),
            avg_volume_30d: self.avg_volume_30d.or(lower.avg_volume_30d),
            volume_ratio: self.volume_ratio.or(lower.volume_ratio),
            float_pct: self.float_pct.or(lower.float_pct),
            shares_outstanding: self.shares_outstanding.or(lower.shares_outstanding),
            float_shares: self.float_shares.or(lower.float_shares),
        }
    }
}

/// Display-ready insider facts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsiderSummary {
    /// Insider ownership, e.g. `"12.34%"`.
    pub ownership_pct: Metric<String>,
    /// Recent insider activity, e.g. `"5 recent transactions"`.
    pub recent_activity: Metric<String>,
}

impl InsiderSummary {
    /// Both fields `Unknown`.
    #[must_use]
    pub fn unknown() -> Self {
        Self::default()
    }
}

/// A headline shown in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Headline text.
    pub headline: String,
    /// Publication date (UTC).
    pub published: NaiveDate,
    /// Article URL.
    pub url: String,
}

/// Everything the report formatter needs for one ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Ticker the snapshot was built for.
    pub ticker: Ticker,
    /// Merged price/volume/float metrics.
    pub quote: QuoteSnapshot,
    /// Insider ownership and activity.
    pub insider: InsiderSummary,
    /// At most a handful of headlines, newest first.
    pub news: Vec<NewsItem>,
}
