#![allow(dead_code)]


#[allow(unused_imports)]
pub use mock_connector::{CallLog, MockConnector};

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use ozet::{FixedClock, Ozet, OzetBuilder};
use ozet_core::{
    CompanyInfo, CompanyNewsArticle, DailyBar, Decimal, GeneralNewsArticle, Metric, PriceHistory,
    Ticker,
};

/// Common symbol constants used across tests.
pub const ABCD: &str = "ABCD";
#[allow(dead_code)]
pub const AAPL: &str = "AAPL";

/// Construct a UTC `DateTime` from components for readability in tests.
pub fn dt(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> DateTime<Utc> {
    let date = NaiveDate::from_ymd_opt(y, m, d).expect("invalid date");
    let naive = date
        .and_hms_opt(hh, mm, ss)
        .expect("invalid time components");
    DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc)
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("invalid date")
}

pub fn ticker(sym: &str) -> Ticker {
    Ticker::parse(sym).expect("valid static test symbol")
}

/// "Now" used by most tests: 2024-03-06 15:00 UTC, a Wednesday.
pub fn now() -> DateTime<Utc> {
    dt(2024, 3, 6, 15, 0, 0)
}

/// Builder preloaded with a clock frozen at [`now`].
pub fn builder_at_now() -> OzetBuilder {
    Ozet::builder().clock(Arc::new(FixedClock(now())))
}

/// A daily bar with an integer close.
pub fn bar(date: NaiveDate, close: i64, volume: Option<u64>) -> DailyBar {
    DailyBar {
        date,
        close: Decimal::from(close),
        volume,
    }
}

/// History whose bars end on `last` and step back one day each, oldest first.
pub fn history_ending(last: NaiveDate, closes_and_volumes: &[(i64, Option<u64>)]) -> PriceHistory {
    let n = closes_and_volumes.len();
    let bars = closes_and_volumes
        .iter()
        .enumerate()
        .map(|(i, (close, vol))| {
            let back = i64::try_from(n - 1 - i).unwrap();
            bar(last - chrono::Duration::days(back), *close, *vol)
        })
        .collect();
    PriceHistory {
        bars,
        timezone: None,
    }
}

pub fn company_info(float: u64, outstanding: u64) -> CompanyInfo {
    CompanyInfo {
        float_shares: Metric::Known(float),
        shares_outstanding: Metric::Known(outstanding),
    }
}

pub fn company_article(headline: &str, at: DateTime<Utc>) -> CompanyNewsArticle {
    CompanyNewsArticle {
        headline: headline.to_string(),
        published_at: at,
        url: format!("https://news.example/{}", headline.to_lowercase().replace(' ', "-")),
    }
}

pub fn general_article(title: &str, at: DateTime<Utc>) -> GeneralNewsArticle {
    GeneralNewsArticle {
        title: title.to_string(),
        published_at: at,
        link: format!("https://feed.example/{}", title.to_lowercase().replace(' ', "-")),
    }
}

pub fn dec(s: &str) -> Decimal {
    s.parse().expect("valid decimal literal")
}
