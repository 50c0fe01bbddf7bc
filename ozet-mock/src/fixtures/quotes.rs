use ozet_core::{BasicFinancials, Decimal, Metric, RealtimeQuote};

fn d(s: &str) -> Metric<Decimal> {
    s.parse().ok().into()
}

pub fn quote_by_symbol(s: &str) -> Option<RealtimeQuote> {
    match s {
        "ABCD" => Some(RealtimeQuote {
            current_price: d("48"),
            previous_close: d("52"),
            volume: Metric::Known(10_000),
        }),
        "AAPL" => Some(RealtimeQuote {
            current_price: d("173.45"),
            previous_close: d("172.00"),
            volume: Metric::Known(55_000_000),
        }),
        "MSFT" => Some(RealtimeQuote {
            current_price: d("410.10"),
            previous_close: d("404.25"),
            volume: Metric::Unknown,
        }),
        _ => None,
    }
}

pub fn financials_by_symbol(s: &str) -> Option<BasicFinancials> {
    match s {
        "ABCD" => Some(BasicFinancials {
            avg_volume_10d: Metric::Known(7_500),
            avg_volume_52w: Metric::Known(9_000),
            float_shares: Metric::Known(1_000_000),
            shares_outstanding: Metric::Known(4_000_000),
        }),
        "AAPL" => Some(BasicFinancials {
            avg_volume_10d: Metric::Known(54_100_000),
            avg_volume_52w: Metric::Known(58_900_000),
            float_shares: Metric::Known(15_300_000_000),
            shares_outstanding: Metric::Known(15_460_000_000),
        }),
        "MSFT" => Some(BasicFinancials {
            avg_volume_10d: Metric::Known(21_000_000),
            avg_volume_52w: Metric::Known(22_500_000),
            float_shares: Metric::Known(7_420_000_000),
            shares_outstanding: Metric::Known(7_430_000_000),
        }),
        _ => None,
    }
}
