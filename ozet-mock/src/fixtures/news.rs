use chrono::{DateTime, Duration, NaiveDate, Utc};
use ozet_core::{CompanyNewsArticle, GeneralNewsArticle};

use super::today;

fn at(days_back: i64, hour: u32) -> DateTime<Utc> {
    let date: NaiveDate = today() - Duration::days(days_back);
    date.and_hms_opt(hour, 0, 0)
        .unwrap_or_default()
        .and_utc()
}

fn company(headline: &str, days_back: i64, hour: u32, slug: &str) -> CompanyNewsArticle {
    CompanyNewsArticle {
        headline: headline.to_string(),
        published_at: at(days_back, hour),
        url: format!("https://news.mock/{slug}"),
    }
}

fn general(title: &str, days_back: i64, hour: u32, slug: &str) -> GeneralNewsArticle {
    GeneralNewsArticle {
        title: title.to_string(),
        published_at: at(days_back, hour),
        link: format!("https://feed.mock/{slug}"),
    }
}

/// Company news for a symbol, unordered, ignoring the requested window.
pub fn company_by_symbol(s: &str) -> Vec<CompanyNewsArticle> {
    match s {
        "ABCD" => vec![
            company("ABCD beats estimates", 0, 9, "abcd-beats"),
            company("ABCD names new CFO", 2, 13, "abcd-cfo"),
        ],
        "AAPL" => vec![
            company("Apple supplier update", 2, 8, "aapl-supply"),
            company("Apple unveils new chip", 0, 14, "aapl-chip"),
            company("Apple services revenue grows", 1, 10, "aapl-services"),
            company("Apple opens store", 1, 16, "aapl-store"),
        ],
        _ => Vec::new(),
    }
}

/// General feed entries for a symbol, in feed order.
pub fn general_by_symbol(s: &str) -> Vec<GeneralNewsArticle> {
    match s {
        "MSFT" => vec![
            general("Microsoft cloud outlook", 1, 12, "msft-cloud"),
            general("Microsoft ships update", 3, 9, "msft-update"),
            general("Microsoft hiring push", 0, 7, "msft-hiring"),
            general("Microsoft older story", 6, 7, "msft-older"),
        ],
        "ABCD" => vec![general("ABCD in the feed", 1, 11, "abcd-feed")],
        _ => Vec::new(),
    }
}
