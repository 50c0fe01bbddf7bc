//! Plain-text rendering of a snapshot.

use std::fmt::Write as _;

use ozet_core::{Decimal, InsiderSummary, Metric, NewsItem, QuoteSnapshot, Ticker};
use rust_decimal::RoundingStrategy;

/// Rendering used for any field no provider supplied.
pub const NOT_AVAILABLE: &str = "N/A";

/// Render the report text for one ticker.
///
/// Changes, percentages and ratios use two decimals; volumes and share counts
/// use comma thousands grouping; any `Unknown` renders as `N/A` without a
/// trailing `%`.
#[must_use]
pub fn format_report(
    ticker: &Ticker,
    snapshot: &QuoteSnapshot,
    insider: &InsiderSummary,
    news: &[NewsItem],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Ticker: {ticker}");
    let _ = writeln!(
        out,
        "Price Change: {} ({})",
        decimal(snapshot.price_change),
        percent(snapshot.price_change_pct)
    );
    let _ = writeln!(out, "Volume: {}", count(snapshot.volume));
    let _ = writeln!(out, "30d Avg Volume: {}", count(snapshot.avg_volume_30d));
    let _ = writeln!(out, "Today/30-day Vol, x: {}", decimal(snapshot.volume_ratio));
    let _ = writeln!(out, "Float %: {}", percent(snapshot.float_pct));
    let _ = writeln!(out, "Insider Ownership: {}", text(&insider.ownership_pct));
    let _ = writeln!(out, "Insider Activity: {}", text(&insider.recent_activity));
    let _ = writeln!(
        out,
        "Shares Outstanding: {} ({} float)",
        count(snapshot.shares_outstanding),
        count(snapshot.float_shares)
    );
    out.push('\n');
    out.push_str("News (last 3 days):\n");

    if news.is_empty() {
        out.push_str("No recent news.");
    } else {
        let lines: Vec<String> = news
            .iter()
            .map(|n| format!("{} ({}): {}", n.headline, n.published.format("%Y-%m-%d"), n.url))
            .collect();
        out.push_str(&lines.join("\n"));
    }
    out
}

/// Two-decimal fixed-point rendering, rounding half away from zero.
pub(crate) fn fixed2(d: Decimal) -> String {
    let rounded = d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let rounded = if rounded.is_zero() { Decimal::ZERO } else { rounded };
    format!("{rounded:.2}")
}

/// Insert `,` every three digits from the right.
pub(crate) fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn or_na<T>(m: Metric<T>, f: impl FnOnce(T) -> String) -> String {
    m.known().map_or_else(|| NOT_AVAILABLE.to_string(), f)
}

fn decimal(m: Metric<Decimal>) -> String {
    or_na(m, fixed2)
}

fn percent(m: Metric<Decimal>) -> String {
    or_na(m, |d| format!("{}%", fixed2(d)))
}

fn count(m: Metric<u64>) -> String {
    or_na(m, group_thousands)
}

fn text(m: &Metric<String>) -> String {
    or_na(m.as_ref(), String::clone)
}
