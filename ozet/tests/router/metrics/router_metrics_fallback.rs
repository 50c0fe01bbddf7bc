use crate::helpers::{
    CallLog, MockConnector, builder_at_now, company_info, day, dec, history_ending, ticker,
};
use ozet::{Metric, OzetError};
use ozet_core::{BasicFinancials, CompanyInfo, PriceHistory, RealtimeQuote};

fn secondary_quote() -> RealtimeQuote {
    RealtimeQuote {
        current_price: Metric::Known(dec("21")),
        previous_close: Metric::Known(dec("20")),
        volume: Metric::Known(3_000),
    }
}

fn secondary_financials() -> BasicFinancials {
    BasicFinancials {
        avg_volume_10d: Metric::Known(1_500),
        avg_volume_52w: Metric::Known(9_999),
        float_shares: Metric::Known(500),
        shares_outstanding: Metric::Known(2_000),
    }
}

#[tokio::test]
async fn secondary_fills_only_unknown_fields() {
    let log = CallLog::new();
    // Closed market with two bars: no price change; company info missing.
    let primary = MockConnector::builder()
        .name("primary")
        .log(log.clone())
        .returns_history_ok(history_ending(
            day(2024, 3, 5),
            &[(10, Some(100)), (12, Some(300))],
        ))
        .returns_company_info_ok(CompanyInfo::default())
        .build();
    let secondary = MockConnector::builder()
        .name("secondary")
        .log(log.clone())
        .returns_quote_ok(secondary_quote())
        .returns_basic_financials_ok(secondary_financials())
        .build();

    let ozet = builder_at_now()
        .with_connector(primary)
        .with_connector(secondary)
        .build()
        .unwrap();
    let snap = ozet.aggregate(&ticker("X")).await.unwrap();

    // Filled from the secondary.
    assert_eq!(snap.price_change, Metric::Known(dec("1")));
    assert_eq!(snap.price_change_pct, Metric::Known(dec("5")));
    assert_eq!(snap.float_pct, Metric::Known(dec("25")));
    assert_eq!(snap.shares_outstanding, Metric::Known(2_000));
    assert_eq!(snap.float_shares, Metric::Known(500));
    // Primary values are kept.
    assert_eq!(snap.volume, Metric::Known(300));
    assert_eq!(snap.avg_volume_30d, Metric::Known(200));
    assert_eq!(snap.volume_ratio, Metric::Known(dec("1.5")));
    assert_eq!(log.count("quote"), 1);
    assert_eq!(log.count("basic-financials"), 1);
}

#[tokio::test]
async fn primary_zero_volume_is_not_replaced() {
    let primary = MockConnector::builder()
        .returns_history_ok(history_ending(
            day(2024, 3, 6),
            &[(10, Some(0)), (11, None), (12, None)],
        ))
        .build();
    let secondary = MockConnector::builder()
        .name("secondary")
        .returns_quote_ok(secondary_quote())
        .returns_basic_financials_ok(secondary_financials())
        .build();

    let ozet = builder_at_now()
        .with_connector(primary)
        .with_connector(secondary)
        .build()
        .unwrap();
    let snap = ozet.aggregate(&ticker("X")).await.unwrap();

    // Missing last volume counts as zero and stays zero.
    assert_eq!(snap.volume, Metric::Known(0));
    // Average over the single present reading, which is zero.
    assert_eq!(snap.avg_volume_30d, Metric::Known(0));
    // Ratio is unknown on the primary path, so the secondary supplies it.
    assert_eq!(snap.volume_ratio, Metric::Known(dec("2")));
}

#[tokio::test]
async fn complete_primary_skips_secondary() {
    let log = CallLog::new();
    let primary = MockConnector::builder()
        .returns_history_ok(history_ending(
            day(2024, 3, 6),
            &[(10, Some(1)), (11, Some(1)), (12, Some(1))],
        ))
        .returns_company_info_ok(company_info(1, 2))
        .build();
    let secondary = MockConnector::builder()
        .name("secondary")
        .log(log.clone())
        .returns_quote_ok(secondary_quote())
        .returns_basic_financials_ok(secondary_financials())
        .build();

    let ozet = builder_at_now()
        .with_connector(primary)
        .with_connector(secondary)
        .build()
        .unwrap();
    let snap = ozet.aggregate(&ticker("X")).await.unwrap();
    assert!(snap.is_complete());
    assert!(log.calls().is_empty());
}

#[tokio::test]
async fn empty_history_is_all_unknown_without_company_info() {
    let log = CallLog::new();
    let primary = MockConnector::builder()
        .log(log.clone())
        .returns_history_ok(PriceHistory::default())
        .returns_company_info_ok(company_info(1, 2))
        .build();

    let ozet = builder_at_now().with_connector(primary).build().unwrap();
    let snap = ozet.aggregate(&ticker("X")).await.unwrap();
    assert_eq!(snap, ozet::QuoteSnapshot::unknown());
    assert_eq!(log.calls(), vec!["history"]);
}

#[tokio::test]
async fn empty_history_is_filled_by_secondary() {
    let primary = MockConnector::builder()
        .returns_history_ok(PriceHistory::default())
        .build();
    let secondary = MockConnector::builder()
        .name("secondary")
        .returns_quote_ok(secondary_quote())
        .returns_basic_financials_ok(secondary_financials())
        .build();

    let ozet = builder_at_now()
        .with_connector(primary)
        .with_connector(secondary)
        .build()
        .unwrap();
    let snap = ozet.aggregate(&ticker("X")).await.unwrap();
    assert_eq!(snap.volume, Metric::Known(3_000));
    assert_eq!(snap.avg_volume_30d, Metric::Known(1_500));
    assert_eq!(snap.volume_ratio, Metric::Known(dec("2")));
    assert!(snap.is_complete());
}

#[tokio::test]
async fn priceless_secondary_quote_still_merges_fundamentals() {
    let log = CallLog::new();
    let primary = MockConnector::builder()
        .name("primary")
        .returns_history_ok(history_ending(
            day(2024, 3, 6),
            &[(10, Some(100)), (12, Some(300))],
        ))
        .returns_company_info_ok(CompanyInfo::default())
        .build();
    let secondary = MockConnector::builder()
        .name("secondary")
        .log(log.clone())
        .returns_quote_ok(RealtimeQuote {
            current_price: Metric::Unknown,
            previous_close: Metric::Unknown,
            volume: Metric::Known(5_000),
        })
        .returns_basic_financials_ok(secondary_financials())
        .build();

    let ozet = builder_at_now()
        .with_connector(primary)
        .with_connector(secondary)
        .build()
        .unwrap();
    let snap = ozet.aggregate(&ticker("X")).await.unwrap();

    assert_eq!(log.count("basic-financials"), 1);
    assert_eq!(snap.float_pct, Metric::Known(dec("25")));
    assert_eq!(snap.float_shares, Metric::Known(500));
    assert_eq!(snap.shares_outstanding, Metric::Known(2_000));
    // Primary price change and volume stay.
    assert_eq!(snap.price_change, Metric::Known(dec("2")));
    assert_eq!(snap.volume, Metric::Known(300));
}

#[tokio::test]
async fn secondary_failure_keeps_primary_result() {
    let primary = MockConnector::builder()
        .returns_history_ok(history_ending(day(2024, 3, 6), &[(10, Some(5))]))
        .build();
    let secondary = MockConnector::builder()
        .name("secondary")
        .with_quote_fn(|_t| Err(OzetError::Other("rate limited".into())))
        .returns_basic_financials_ok(secondary_financials())
        .build();

    let ozet = builder_at_now()
        .with_connector(primary)
        .with_connector(secondary)
        .build()
        .unwrap();
    let snap = ozet.aggregate(&ticker("X")).await.unwrap();
    assert_eq!(snap.volume, Metric::Known(5));
    assert!(snap.price_change.is_unknown());
    assert!(snap.float_shares.is_unknown());
}

#[tokio::test]
async fn financials_failure_discards_the_quote_too() {
    let primary = MockConnector::builder()
        .returns_history_ok(PriceHistory::default())
        .build();
    let secondary = MockConnector::builder()
        .name("secondary")
        .returns_quote_ok(secondary_quote())
        .with_basic_financials_fn(|_t| Err(OzetError::connector("secondary", "boom")))
        .build();

    let ozet = builder_at_now()
        .with_connector(primary)
        .with_connector(secondary)
        .build()
        .unwrap();
    let snap = ozet.aggregate(&ticker("X")).await.unwrap();
    assert_eq!(snap, ozet::QuoteSnapshot::unknown());
}

#[tokio::test]
async fn primary_history_failure_is_primary_fetch_error() {
    let primary = MockConnector::builder()
        .name("primary")
        .with_history_fn(|_t, _d| Err(OzetError::Data("bad payload".into())))
        .build();
    let secondary = MockConnector::builder()
        .name("secondary")
        .returns_quote_ok(secondary_quote())
        .returns_basic_financials_ok(secondary_financials())
        .build();

    let ozet = builder_at_now()
        .with_connector(primary)
        .with_connector(secondary)
        .build()
        .unwrap();
    let err = ozet.aggregate(&ticker("X")).await.unwrap_err();
    match err {
        OzetError::PrimaryFetch(inner) => match *inner {
            OzetError::Connector { connector, msg } => {
                assert_eq!(connector, "primary");
                assert!(msg.contains("bad payload"));
            }
            other => panic!("unexpected inner: {other:?}"),
        },
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn company_info_failure_is_primary_fetch_error() {
    let primary = MockConnector::builder()
        .returns_history_ok(history_ending(day(2024, 3, 6), &[(10, Some(5))]))
        .with_company_info_fn(|_t| Err(OzetError::not_found("info for X")))
        .build();

    let ozet = builder_at_now().with_connector(primary).build().unwrap();
    let err = ozet.report(&ticker("X")).await.unwrap_err();
    assert_eq!(
        err,
        OzetError::PrimaryFetch(Box::new(OzetError::not_found("info for X")))
    );
}

#[tokio::test]
async fn lookback_days_reach_the_primary() {
    let primary = MockConnector::builder()
        .with_history_fn(|_t, days| {
            assert_eq!(days, 60);
            Ok(PriceHistory::default())
        })
        .build();
    let ozet = builder_at_now()
        .history_lookback_days(60)
        .with_connector(primary)
        .build()
        .unwrap();
    ozet.aggregate(&ticker("X")).await.unwrap();
}
