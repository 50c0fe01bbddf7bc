//! Records returned by individual provider calls.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Metric;

/// One daily price/volume bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBar {
    /// Session date in the exchange's local calendar.
    pub date: NaiveDate,
    /// Closing (or latest) price.
    pub close: Decimal,
    /// Traded volume; `None` when the provider left the slot empty.
    pub volume: Option<u64>,
}

/// Daily history ordered oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceHistory {
    /// Bars, oldest first.
    pub bars: Vec<DailyBar>,
    /// Exchange timezone the bar dates are expressed in, when reported.
    pub timezone: Option<Tz>,
}

impl PriceHistory {
    /// The most recent bar, if any.
    #[must_use]
    pub fn last(&self) -> Option<&DailyBar> {
        self.bars.last()
    }

    /// True when the provider returned no bars at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Static share-count facts from the primary provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    /// Shares available for public trading.
    pub float_shares: Metric<u64>,
    /// Total shares outstanding.
    pub shares_outstanding: Metric<u64>,
}

/// Point-in-time quote from the secondary provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealtimeQuote {
    /// Latest traded price.
    pub current_price: Metric<Decimal>,
    /// Prior session close.
    pub previous_close: Metric<Decimal>,
    /// Session volume so far.
    pub volume: Metric<u64>,
}

/// Fundamentals from the secondary provider, in absolute units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicFinancials {
    /// Ten-day average daily volume.
    pub avg_volume_10d: Metric<u64>,
    /// Fifty-two-week average daily volume.
    pub avg_volume_52w: Metric<u64>,
    /// Shares available for public trading.
    pub float_shares: Metric<u64>,
    /// Total shares outstanding.
    pub shares_outstanding: Metric<u64>,
}

/// A company-specific article within a date window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyNewsArticle {
    /// Headline text.
    pub headline: String,
    /// Publication instant.
    pub published_at: DateTime<Utc>,
    /// Article URL.
    pub url: String,
}

/// An entry from a general news feed for a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralNewsArticle {
    /// Headline text.
    pub title: String,
    /// Publication instant.
    pub published_at: DateTime<Utc>,
    /// Article URL.
    pub link: String,
}

/// A single reported insider transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsiderTransaction {
    /// Reporting insider.
    pub name: String,
    /// Signed change in shares held.
    pub share_change: Option<i64>,
    /// Date the transaction took place.
    pub transaction_date: Option<NaiveDate>,
}

/// One holder's ownership record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipRecord {
    /// Holder name.
    pub holder: String,
    /// Percentage of shares outstanding held, in percent units.
    pub percent: Metric<Decimal>,
}
