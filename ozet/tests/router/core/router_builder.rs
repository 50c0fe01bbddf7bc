use std::time::Duration;

use crate::helpers::{MockConnector, day, history_ending};
use ozet::{Ozet, OzetConfig, OzetError};

#[test]
fn build_without_connectors_fails() {
    let err = Ozet::builder().build().err().unwrap();
    assert!(matches!(err, OzetError::InvalidArg(_)));
}

#[test]
fn build_without_history_provider_fails() {
    let news_only = MockConnector::builder()
        .with_general_news_fn(|_t| Ok(vec![]))
        .build();
    let err = Ozet::builder().with_connector(news_only).build().err().unwrap();
    match err {
        OzetError::InvalidArg(msg) => assert!(msg.contains("history")),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn builder_setters_reach_config() {
    let primary = MockConnector::builder()
        .returns_history_ok(history_ending(day(2024, 3, 6), &[(1, Some(1))]))
        .build();
    let ozet = Ozet::builder()
        .with_connector(primary)
        .provider_timeout(Duration::from_millis(250))
        .history_lookback_days(40)
        .volume_average_window(20)
        .news_window_days(5)
        .news_limit(2)
        .build()
        .unwrap();
    assert_eq!(
        ozet.config(),
        &OzetConfig {
            provider_timeout: Duration::from_millis(250),
            history_lookback_days: 40,
            volume_average_window: 20,
            news_window_days: 5,
            news_limit: 2,
        }
    );
}

#[test]
fn config_replaces_defaults_wholesale() {
    let primary = MockConnector::builder()
        .returns_history_ok(history_ending(day(2024, 3, 6), &[(1, Some(1))]))
        .build();
    let cfg = OzetConfig {
        news_limit: 7,
        ..OzetConfig::default()
    };
    let ozet = Ozet::builder()
        .config(cfg.clone())
        .with_connector(primary)
        .build()
        .unwrap();
    assert_eq!(ozet.config(), &cfg);
}
