use std::sync::Arc;
use std::time::Duration;

use crate::helpers::{builder_at_now, day, history_ending, ticker};
use ozet::{Metric, OzetError};
use ozet_mock::MockConnector as FixtureConnector;
use ozet_mock::dynamic::{DynamicMockConnector, MockBehavior};

#[tokio::test]
async fn abcd_fixture_renders_full_report() {
    let ozet = builder_at_now()
        .with_connector(Arc::new(FixtureConnector::new()))
        .build()
        .unwrap();

    let report = ozet.report(&ticker("ABCD")).await.unwrap();
    let expected = "\
Ticker: ABCD
Price Change: -4.00 (-7.69%)
Volume: 10,000
30d Avg Volume: 8,000
Today/30-day Vol, x: 1.25
Float %: 25.00%
Insider Ownership: 12.50%
Insider Activity: 2 recent transactions
Shares Outstanding: 4,000,000 (1,000,000 float)

News (last 3 days):
ABCD beats estimates (2024-03-06): https://news.mock/abcd-beats
ABCD names new CFO (2024-03-04): https://news.mock/abcd-cfo";
    assert_eq!(report, expected);
}

#[tokio::test]
async fn msft_fixture_uses_every_fallback() {
    let ozet = builder_at_now()
        .with_connector(Arc::new(FixtureConnector::new()))
        .build()
        .unwrap();

    let snap = ozet.snapshot(&ticker("MSFT")).await.unwrap();

    // Closed session in New York: previous close vs the one before it.
    assert_eq!(snap.quote.price_change, Metric::Known(crate::helpers::dec("-1.25")));
    // Float came from the secondary, outstanding stayed primary.
    assert_eq!(snap.quote.float_shares, Metric::Known(7_420_000_000));
    assert_eq!(snap.quote.shares_outstanding, Metric::Known(7_430_000_000));

    assert_eq!(snap.insider.ownership_pct, Metric::Known("1.45%".to_string()));
    assert_eq!(snap.insider.recent_activity, Metric::Known("-0.83%".to_string()));

    let headlines: Vec<_> = snap.news.iter().map(|n| n.headline.as_str()).collect();
    assert_eq!(
        headlines,
        ["Microsoft cloud outlook", "Microsoft ships update", "Microsoft hiring push"]
    );
}

#[tokio::test]
async fn fixture_failures_surface_as_primary_fetch() {
    let ozet = builder_at_now()
        .with_connector(Arc::new(FixtureConnector::new()))
        .build()
        .unwrap();

    let err = ozet.report(&ticker("FAIL")).await.unwrap_err();
    assert!(matches!(err, OzetError::PrimaryFetch(_)));
}

#[tokio::test(start_paused = true)]
async fn hanging_history_hits_provider_timeout() {
    let (conn, ctl) = DynamicMockConnector::new_with_controller("dyn");
    ctl.set_history_behavior(ticker("ABCD"), MockBehavior::Hang).await;

    let ozet = builder_at_now()
        .provider_timeout(Duration::from_secs(2))
        .with_connector(conn)
        .build()
        .unwrap();

    let err = ozet.aggregate(&ticker("ABCD")).await.unwrap_err();
    assert_eq!(
        err,
        OzetError::PrimaryFetch(Box::new(OzetError::provider_timeout("dyn", "history")))
    );
}

#[tokio::test]
async fn failing_secondary_quote_skips_financials() {
    let (conn, ctl) = DynamicMockConnector::new_with_controller("dyn");
    ctl.set_history_behavior(
        ticker("ABCD"),
        MockBehavior::Return(history_ending(day(2024, 3, 6), &[(50, Some(10)), (55, Some(30))])),
    )
    .await;
    ctl.set_quote_behavior(
        ticker("ABCD"),
        MockBehavior::Fail(OzetError::connector("dyn", "boom")),
    )
    .await;

    let ozet = builder_at_now().with_connector(conn).build().unwrap();
    let snap = ozet.aggregate(&ticker("ABCD")).await.unwrap();

    assert_eq!(snap.price_change, Metric::Known(ozet::Decimal::from(5)));
    assert!(snap.float_pct.is_unknown());
    assert_eq!(ctl.requests("quote").await.len(), 1);
    assert!(ctl.requests("basic-financials").await.is_empty());
}
