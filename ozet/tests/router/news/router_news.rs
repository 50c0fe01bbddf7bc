use std::sync::Arc;

use crate::helpers::{
    CallLog, MockConnector, builder_at_now, company_article, day, dt, general_article,
    history_ending, ticker,
};
use ozet::{Ozet, OzetError};

fn primary() -> Arc<MockConnector> {
    MockConnector::builder()
        .name("primary")
        .returns_history_ok(history_ending(day(2024, 3, 6), &[(1, Some(1))]))
        .build()
}

#[tokio::test]
async fn company_news_is_sorted_newest_first_and_limited() {
    let company = MockConnector::builder()
        .name("company")
        .with_company_news_fn(|_t, _from, _to| {
            Ok(vec![
                company_article("Oldest", dt(2024, 3, 3, 9, 0, 0)),
                company_article("Newest", dt(2024, 3, 6, 12, 0, 0)),
                company_article("Middle", dt(2024, 3, 5, 8, 0, 0)),
                company_article("Second", dt(2024, 3, 6, 1, 0, 0)),
            ])
        })
        .build();

    let ozet = builder_at_now()
        .with_connector(primary())
        .with_connector(company)
        .build()
        .unwrap();
    let news = ozet.resolve_news(&ticker("X")).await;
    let headlines: Vec<_> = news.iter().map(|n| n.headline.as_str()).collect();
    assert_eq!(headlines, ["Newest", "Second", "Middle"]);
    assert_eq!(news[0].published, day(2024, 3, 6));
    assert_eq!(news[0].url, "https://news.example/newest");
}

#[tokio::test]
async fn company_news_window_spans_configured_days() {
    let company = MockConnector::builder()
        .name("company")
        .with_company_news_fn(|_t, from, to| {
            assert_eq!(from, day(2024, 3, 3));
            assert_eq!(to, day(2024, 3, 6));
            Ok(vec![company_article("Only", dt(2024, 3, 4, 0, 0, 0))])
        })
        .build();

    let ozet = builder_at_now()
        .with_connector(primary())
        .with_connector(company)
        .build()
        .unwrap();
    assert_eq!(ozet.resolve_news(&ticker("X")).await.len(), 1);
}

#[tokio::test]
async fn non_empty_company_news_skips_general_feed() {
    let log = CallLog::new();
    let both = MockConnector::builder()
        .name("both")
        .log(log.clone())
        .with_company_news_fn(|_t, _f, _to| Ok(vec![company_article("A", dt(2024, 3, 6, 0, 0, 0))]))
        .with_general_news_fn(|_t| Ok(vec![general_article("B", dt(2024, 3, 6, 0, 0, 0))]))
        .build();

    let ozet = builder_at_now()
        .with_connector(primary())
        .with_connector(both)
        .build()
        .unwrap();
    let news = ozet.resolve_news(&ticker("X")).await;
    assert_eq!(news.len(), 1);
    assert_eq!(news[0].headline, "A");
    assert_eq!(log.count("general-news"), 0);
}

fn with_general(company: Arc<MockConnector>, general: Arc<MockConnector>) -> Ozet {
    builder_at_now()
        .with_connector(primary())
        .with_connector(company)
        .with_connector(general)
        .build()
        .unwrap()
}

#[tokio::test]
async fn empty_company_news_falls_back_exactly_once() {
    let log = CallLog::new();
    let company = MockConnector::builder()
        .name("company")
        .with_company_news_fn(|_t, _f, _to| Ok(vec![]))
        .build();
    let general = MockConnector::builder()
        .name("general")
        .log(log.clone())
        .with_general_news_fn(|_t| {
            Ok(vec![
                general_article("First", dt(2024, 2, 1, 0, 0, 0)),
                general_article("Second", dt(2024, 3, 1, 0, 0, 0)),
                general_article("Third", dt(2024, 1, 1, 0, 0, 0)),
                general_article("Fourth", dt(2024, 3, 5, 0, 0, 0)),
            ])
        })
        .build();

    let news = with_general(company, general).resolve_news(&ticker("X")).await;
    // Provider order is kept; only the first entries are taken.
    let titles: Vec<_> = news.iter().map(|n| n.headline.as_str()).collect();
    assert_eq!(titles, ["First", "Second", "Third"]);
    assert_eq!(news[2].published, day(2024, 1, 1));
    assert_eq!(news[0].url, "https://feed.example/first");
    assert_eq!(log.count("general-news"), 1);
}

#[tokio::test]
async fn company_news_error_falls_back_exactly_once() {
    let log = CallLog::new();
    let company = MockConnector::builder()
        .name("company")
        .with_company_news_fn(|_t, _f, _to| Err(OzetError::connector("company", "HTTP 429")))
        .build();
    let general = MockConnector::builder()
        .name("general")
        .log(log.clone())
        .with_general_news_fn(|_t| Ok(vec![general_article("Fallback", dt(2024, 3, 6, 0, 0, 0))]))
        .build();

    let news = with_general(company, general).resolve_news(&ticker("X")).await;
    assert_eq!(news.len(), 1);
    assert_eq!(log.count("general-news"), 1);
}

#[tokio::test]
async fn both_tiers_failing_renders_no_recent_news() {
    let company = MockConnector::builder()
        .name("company")
        .with_company_news_fn(|_t, _f, _to| Err(OzetError::Other("down".into())))
        .build();
    let general = MockConnector::builder()
        .name("general")
        .with_general_news_fn(|_t| Err(OzetError::Other("down".into())))
        .build();

    let ozet = with_general(company, general);
    assert!(ozet.resolve_news(&ticker("X")).await.is_empty());
    let report = ozet.report(&ticker("X")).await.unwrap();
    assert!(report.ends_with("News (last 3 days):\nNo recent news."));
}

#[tokio::test]
async fn news_limit_is_configurable() {
    let company = MockConnector::builder()
        .name("company")
        .with_company_news_fn(|_t, _f, _to| {
            Ok((1..=5)
                .map(|d| company_article(&format!("Day {d}"), dt(2024, 3, d, 0, 0, 0)))
                .collect())
        })
        .build();
    let ozet = builder_at_now()
        .news_limit(1)
        .with_connector(primary())
        .with_connector(company)
        .build()
        .unwrap();
    let news = ozet.resolve_news(&ticker("X")).await;
    assert_eq!(news.len(), 1);
    assert_eq!(news[0].headline, "Day 5");
}
