use crate::helpers::{MockConnector, builder_at_now, company_info, day, dec, history_ending, ticker};
use ozet::Metric;
use ozet_core::{BasicFinancials, PriceHistory, RealtimeQuote};

#[tokio::test]
async fn zero_reference_close_yields_unknown_percentage() {
    let primary = MockConnector::builder()
        .returns_history_ok(history_ending(
            day(2024, 3, 6),
            &[(7, Some(1)), (0, Some(1)), (3, Some(1))],
        ))
        .build();
    let ozet = builder_at_now().with_connector(primary).build().unwrap();

    let snap = ozet.aggregate(&ticker("X")).await.unwrap();
    assert_eq!(snap.price_change, Metric::Known(dec("3")));
    assert!(snap.price_change_pct.is_unknown());
}

#[tokio::test]
async fn zero_previous_close_on_secondary_yields_unknown_percentage() {
    let primary = MockConnector::builder()
        .returns_history_ok(PriceHistory::default())
        .build();
    let secondary = MockConnector::builder()
        .name("secondary")
        .returns_quote_ok(RealtimeQuote {
            current_price: Metric::Known(dec("2")),
            previous_close: Metric::Known(dec("0")),
            volume: Metric::Unknown,
        })
        .returns_basic_financials_ok(BasicFinancials::default())
        .build();
    let ozet = builder_at_now()
        .with_connector(primary)
        .with_connector(secondary)
        .build()
        .unwrap();

    let snap = ozet.aggregate(&ticker("X")).await.unwrap();
    assert_eq!(snap.price_change, Metric::Known(dec("2")));
    assert!(snap.price_change_pct.is_unknown());
    assert!(snap.volume_ratio.is_unknown());
}

#[tokio::test]
async fn ratio_is_unknown_when_average_is_zero_or_missing() {
    // Every reading missing: volume defaults to 0 and the average is unknown.
    let missing = MockConnector::builder()
        .returns_history_ok(history_ending(day(2024, 3, 6), &[(1, None), (2, None)]))
        .build();
    let ozet = builder_at_now().with_connector(missing).build().unwrap();
    let snap = ozet.aggregate(&ticker("X")).await.unwrap();
    assert_eq!(snap.volume, Metric::Known(0));
    assert!(snap.avg_volume_30d.is_unknown());
    assert!(snap.volume_ratio.is_unknown());

    // Every reading zero: average known but zero.
    let zeros = MockConnector::builder()
        .returns_history_ok(history_ending(day(2024, 3, 6), &[(1, Some(0)), (2, Some(0))]))
        .build();
    let ozet = builder_at_now().with_connector(zeros).build().unwrap();
    let snap = ozet.aggregate(&ticker("X")).await.unwrap();
    assert_eq!(snap.avg_volume_30d, Metric::Known(0));
    assert!(snap.volume_ratio.is_unknown());
}

#[tokio::test]
async fn secondary_zero_averages_fall_through() {
    let primary = MockConnector::builder()
        .returns_history_ok(PriceHistory::default())
        .build();
    let secondary = MockConnector::builder()
        .name("secondary")
        .returns_quote_ok(RealtimeQuote {
            volume: Metric::Known(10),
            ..RealtimeQuote::default()
        })
        .returns_basic_financials_ok(BasicFinancials {
            avg_volume_10d: Metric::Known(0),
            avg_volume_52w: Metric::Known(0),
            ..BasicFinancials::default()
        })
        .build();
    let ozet = builder_at_now()
        .with_connector(primary)
        .with_connector(secondary)
        .build()
        .unwrap();

    let snap = ozet.aggregate(&ticker("X")).await.unwrap();
    assert_eq!(snap.volume, Metric::Known(10));
    assert!(snap.avg_volume_30d.is_unknown());
    assert!(snap.volume_ratio.is_unknown());
}

#[tokio::test]
async fn float_pct_needs_nonzero_share_counts() {
    let primary = MockConnector::builder()
        .returns_history_ok(history_ending(day(2024, 3, 6), &[(1, Some(1))]))
        .returns_company_info_ok(company_info(0, 100))
        .build();
    let ozet = builder_at_now().with_connector(primary).build().unwrap();

    let snap = ozet.aggregate(&ticker("X")).await.unwrap();
    assert_eq!(snap.float_shares, Metric::Known(0));
    assert_eq!(snap.shares_outstanding, Metric::Known(100));
    assert!(snap.float_pct.is_unknown());
}

#[tokio::test]
async fn average_uses_only_the_trailing_window() {
    let mut rows: Vec<(i64, Option<u64>)> = (0..40).map(|_| (1, Some(1_000))).collect();
    // The ten oldest readings are far larger and fall outside the window.
    for row in rows.iter_mut().take(10) {
        row.1 = Some(1_000_000);
    }
    let primary = MockConnector::builder()
        .returns_history_ok(history_ending(day(2024, 3, 6), &rows))
        .build();
    let ozet = builder_at_now().with_connector(primary).build().unwrap();

    let snap = ozet.aggregate(&ticker("X")).await.unwrap();
    assert_eq!(snap.avg_volume_30d, Metric::Known(1_000));
    assert_eq!(snap.volume_ratio, Metric::Known(dec("1")));
}
