//! Deterministic connectors for tests and demos.
//!
//! [`MockConnector`] serves every role from static fixtures. The symbols
//! `FAIL` and `TIMEOUT` make every call fail or stall so that error and
//! timeout paths can be exercised without a network.
//!
//! [`dynamic::DynamicMockConnector`] is steered at runtime through a
//! controller instead.
use async_trait::async_trait;
use chrono::NaiveDate;
use ozet_core::connector::{
    CompanyNewsService, FundamentalsService, GeneralNewsService, MarketHistoryService,
    OwnershipService, ProfilePageScraper, RealtimeQuoteService,
};
use ozet_core::{
    BasicFinancials, CompanyInfo, CompanyNewsArticle, GeneralNewsArticle, InsiderTransaction,
    OwnershipRecord, OzetConnector, OzetError, PriceHistory, RealtimeQuote, Ticker,
};

pub mod dynamic;
mod fixtures;

pub use fixtures::today as fixture_today;

/// Connector name reported by [`MockConnector`].
pub const MOCK_NAME: &str = "ozet-mock";

/// How long a `TIMEOUT` call stalls before answering.
pub const TIMEOUT_STALL: std::time::Duration = std::time::Duration::from_secs(60);

/// Mock connector backed by static fixtures.
///
/// Fixture symbols: `ABCD`, `AAPL` (complete data, company news), `MSFT`
/// (closed session, missing float and ownership, general news only) and
/// `EMPTY` (no bars).
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn not_found(what: &str) -> OzetError {
        OzetError::not_found(what.to_string())
    }

    async fn maybe_fail_or_timeout(ticker: &Ticker, capability: &'static str) -> Result<(), OzetError> {
        match ticker.as_str() {
            "FAIL" => Err(OzetError::connector(
                MOCK_NAME,
                format!("forced failure: {capability}"),
            )),
            "TIMEOUT" => {
                tokio::time::sleep(TIMEOUT_STALL).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl OzetConnector for MockConnector {
    fn name(&self) -> &'static str {
        MOCK_NAME
    }

    fn as_market_history_service(&self) -> Option<&dyn MarketHistoryService> {
        Some(self as &dyn MarketHistoryService)
    }
    fn as_realtime_quote_service(&self) -> Option<&dyn RealtimeQuoteService> {
        Some(self as &dyn RealtimeQuoteService)
    }
    fn as_fundamentals_service(&self) -> Option<&dyn FundamentalsService> {
        Some(self as &dyn FundamentalsService)
    }
    fn as_company_news_service(&self) -> Option<&dyn CompanyNewsService> {
        Some(self as &dyn CompanyNewsService)
    }
    fn as_general_news_service(&self) -> Option<&dyn GeneralNewsService> {
        Some(self as &dyn GeneralNewsService)
    }
    fn as_ownership_service(&self) -> Option<&dyn OwnershipService> {
        Some(self as &dyn OwnershipService)
    }
    fn as_profile_page_scraper(&self) -> Option<&dyn ProfilePageScraper> {
        Some(self as &dyn ProfilePageScraper)
    }
}

#[async_trait]
impl MarketHistoryService for MockConnector {
    async fn history(
        &self,
        ticker: &Ticker,
        _lookback_days: u32,
    ) -> Result<PriceHistory, OzetError> {
        Self::maybe_fail_or_timeout(ticker, "history").await?;
        fixtures::history::by_symbol(ticker.as_str())
            .ok_or_else(|| Self::not_found(&format!("history for {ticker}")))
    }

    async fn company_info(&self, ticker: &Ticker) -> Result<CompanyInfo, OzetError> {
        Self::maybe_fail_or_timeout(ticker, "company-info").await?;
        fixtures::history::company_info(ticker.as_str())
            .ok_or_else(|| Self::not_found(&format!("company info for {ticker}")))
    }
}

#[async_trait]
impl RealtimeQuoteService for MockConnector {
    async fn quote(&self, ticker: &Ticker) -> Result<RealtimeQuote, OzetError> {
        Self::maybe_fail_or_timeout(ticker, "quote").await?;
        fixtures::quotes::quote_by_symbol(ticker.as_str())
            .ok_or_else(|| Self::not_found(&format!("quote for {ticker}")))
    }
}

#[async_trait]
impl FundamentalsService for MockConnector {
    async fn basic_financials(&self, ticker: &Ticker) -> Result<BasicFinancials, OzetError> {
        Self::maybe_fail_or_timeout(ticker, "basic-financials").await?;
        fixtures::quotes::financials_by_symbol(ticker.as_str())
            .ok_or_else(|| Self::not_found(&format!("basic financials for {ticker}")))
    }
}

#[async_trait]
impl CompanyNewsService for MockConnector {
    async fn company_news(
        &self,
        ticker: &Ticker,
        _from: NaiveDate,
        _to: NaiveDate,
    ) -> Result<Vec<CompanyNewsArticle>, OzetError> {
        Self::maybe_fail_or_timeout(ticker, "company-news").await?;
        Ok(fixtures::news::company_by_symbol(ticker.as_str()))
    }
}

#[async_trait]
impl GeneralNewsService for MockConnector {
    async fn news(&self, ticker: &Ticker) -> Result<Vec<GeneralNewsArticle>, OzetError> {
        Self::maybe_fail_or_timeout(ticker, "general-news").await?;
        Ok(fixtures::news::general_by_symbol(ticker.as_str()))
    }
}

#[async_trait]
impl OwnershipService for MockConnector {
    async fn insider_transactions(
        &self,
        ticker: &Ticker,
    ) -> Result<Vec<InsiderTransaction>, OzetError> {
        Self::maybe_fail_or_timeout(ticker, "insider-transactions").await?;
        Ok(fixtures::insider::transactions_by_symbol(ticker.as_str()))
    }

    async fn ownership(&self, ticker: &Ticker) -> Result<Vec<OwnershipRecord>, OzetError> {
        Self::maybe_fail_or_timeout(ticker, "ownership").await?;
        Ok(fixtures::insider::ownership_by_symbol(ticker.as_str()))
    }
}

#[async_trait]
impl ProfilePageScraper for MockConnector {
    async fn fetch_quote_page(&self, ticker: &Ticker) -> Result<String, OzetError> {
        Self::maybe_fail_or_timeout(ticker, "quote-page").await?;
        fixtures::insider::quote_page_by_symbol(ticker.as_str())
            .ok_or_else(|| Self::not_found(&format!("quote page for {ticker}")))
    }
}
