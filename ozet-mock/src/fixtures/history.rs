use chrono::Duration;
use ozet_core::{CompanyInfo, DailyBar, Decimal, PriceHistory};

use super::today;

pub fn by_symbol(s: &str) -> Option<PriceHistory> {
    match s {
        // Open session: last bar is dated today.
        "ABCD" => Some(build(
            0,
            None,
            &[("50", Some(6_000)), ("52", Some(8_000)), ("48", Some(10_000))],
        )),
        "AAPL" => Some(build(
            0,
            Some(chrono_tz::America::New_York),
            &[
                ("170.10", Some(52_000_000)),
                ("171.35", Some(48_500_000)),
                ("169.80", None),
                ("172.00", Some(61_200_000)),
                ("173.45", Some(55_000_000)),
            ],
        )),
        // Closed session: last bar is dated yesterday.
        "MSFT" => Some(build(
            1,
            Some(chrono_tz::America::New_York),
            &[
                ("402.00", Some(20_100_000)),
                ("405.50", Some(19_800_000)),
                ("404.25", Some(22_400_000)),
                ("410.10", Some(25_000_000)),
            ],
        )),
        "EMPTY" => Some(PriceHistory::default()),
        _ => None,
    }
}

pub fn company_info(s: &str) -> Option<CompanyInfo> {
    match s {
        "ABCD" => Some(info(Some(1_000_000), Some(4_000_000))),
        "AAPL" => Some(info(Some(15_300_000_000), Some(15_460_000_000))),
        // Float missing upstream; the secondary fills it.
        "MSFT" => Some(info(None, Some(7_430_000_000))),
        "EMPTY" => Some(CompanyInfo::default()),
        _ => None,
    }
}

fn info(float_shares: Option<u64>, shares_outstanding: Option<u64>) -> CompanyInfo {
    CompanyInfo {
        float_shares: float_shares.into(),
        shares_outstanding: shares_outstanding.into(),
    }
}

/// Bars oldest first, the last one `days_back` days before the fixture date.
fn build(
    days_back: i64,
    timezone: Option<chrono_tz::Tz>,
    rows: &[(&str, Option<u64>)],
) -> PriceHistory {
    let last = today() - Duration::days(days_back);
    let n = rows.len();
    let bars = rows
        .iter()
        .enumerate()
        .map(|(i, (close, volume))| DailyBar {
            date: last - Duration::days(i64::try_from(n - 1 - i).unwrap_or_default()),
            close: close.parse().unwrap_or(Decimal::ZERO),
            volume: *volume,
        })
        .collect();
    PriceHistory { bars, timezone }
}

