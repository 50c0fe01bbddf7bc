use crate::helpers::{CallLog, MockConnector, builder_at_now, day, dec, history_ending, ticker};
use ozet::Metric;

#[tokio::test]
async fn first_registered_capable_connector_wins() {
    let first_log = CallLog::new();
    let second_log = CallLog::new();
    let first = MockConnector::builder()
        .name("first")
        .log(first_log.clone())
        .returns_history_ok(history_ending(day(2024, 3, 6), &[(10, Some(1)), (12, Some(1))]))
        .build();
    let second = MockConnector::builder()
        .name("second")
        .log(second_log.clone())
        .returns_history_ok(history_ending(day(2024, 3, 6), &[(10, Some(1)), (20, Some(1))]))
        .build();

    let ozet = builder_at_now()
        .with_connector(first)
        .with_connector(second)
        .build()
        .unwrap();
    let snap = ozet.aggregate(&ticker("X")).await.unwrap();
    assert_eq!(snap.price_change, Metric::Known(dec("2")));
    assert_eq!(first_log.count("history"), 1);
    assert_eq!(second_log.count("history"), 0);
}

#[tokio::test]
async fn connectors_without_a_capability_are_skipped() {
    let log = CallLog::new();
    let news_only = MockConnector::builder()
        .name("news_only")
        .log(log.clone())
        .with_general_news_fn(|_t| Ok(vec![]))
        .build();
    let primary = MockConnector::builder()
        .name("primary")
        .returns_history_ok(history_ending(day(2024, 3, 6), &[(10, Some(1)), (12, Some(1))]))
        .build();

    let ozet = builder_at_now()
        .with_connector(news_only)
        .with_connector(primary)
        .build()
        .unwrap();
    ozet.aggregate(&ticker("X")).await.unwrap();
    assert_eq!(log.count("history"), 0);
}
