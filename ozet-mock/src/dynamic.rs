use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use ozet_core::connector::{
    FundamentalsService, MarketHistoryService, OwnershipService, ProfilePageScraper,
    RealtimeQuoteService,
};
use ozet_core::{
    BasicFinancials, CompanyInfo, InsiderTransaction, OwnershipRecord, OzetConnector, OzetError,
    PriceHistory, RealtimeQuote, Ticker,
};

/// Instruction for how a method should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(OzetError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

impl<T> MockBehavior<T> {
    async fn run(self) -> Result<T, OzetError> {
        match self {
            Self::Return(v) => Ok(v),
            Self::Fail(e) => Err(e),
            Self::Hang => std::future::pending().await,
        }
    }
}

#[derive(Default)]
struct InternalState {
    history_rules: HashMap<Ticker, MockBehavior<PriceHistory>>,
    company_info_rules: HashMap<Ticker, MockBehavior<CompanyInfo>>,
    quote_rules: HashMap<Ticker, MockBehavior<RealtimeQuote>>,
    financials_rules: HashMap<Ticker, MockBehavior<BasicFinancials>>,
    ownership_rules: HashMap<Ticker, MockBehavior<Vec<OwnershipRecord>>>,
    quote_page_rules: HashMap<Ticker, MockBehavior<String>>,
    requests: HashMap<&'static str, Vec<Ticker>>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `history` calls for a specific ticker.
    pub async fn set_history_behavior(&self, ticker: Ticker, behavior: MockBehavior<PriceHistory>) {
        self.state.lock().await.history_rules.insert(ticker, behavior);
    }

    /// Set the behavior for `company_info` calls. Unset tickers get all-unknown info.
    pub async fn set_company_info_behavior(
        &self,
        ticker: Ticker,
        behavior: MockBehavior<CompanyInfo>,
    ) {
        self.state
            .lock()
            .await
            .company_info_rules
            .insert(ticker, behavior);
    }

    /// Set the behavior for realtime `quote` calls for a specific ticker.
    pub async fn set_quote_behavior(&self, ticker: Ticker, behavior: MockBehavior<RealtimeQuote>) {
        self.state.lock().await.quote_rules.insert(ticker, behavior);
    }

    /// Set the behavior for `basic_financials` calls. Unset tickers get all-unknown metrics.
    pub async fn set_financials_behavior(
        &self,
        ticker: Ticker,
        behavior: MockBehavior<BasicFinancials>,
    ) {
        self.state
            .lock()
            .await
            .financials_rules
            .insert(ticker, behavior);
    }

    /// Set the behavior for `ownership` calls. Unset tickers get no records.
    pub async fn set_ownership_behavior(
        &self,
        ticker: Ticker,
        behavior: MockBehavior<Vec<OwnershipRecord>>,
    ) {
        self.state
            .lock()
            .await
            .ownership_rules
            .insert(ticker, behavior);
    }

    /// Set the behavior for `fetch_quote_page` calls for a specific ticker.
    pub async fn set_quote_page_behavior(&self, ticker: Ticker, behavior: MockBehavior<String>) {
        self.state
            .lock()
            .await
            .quote_page_rules
            .insert(ticker, behavior);
    }

    /// Tickers requested through the given capability label, in call order.
    pub async fn requests(&self, capability: &str) -> Vec<Ticker> {
        let guard = self.state.lock().await;
        guard.requests.get(capability).cloned().unwrap_or_default()
    }

    /// Clear all configured behaviors and request logs.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        *guard = InternalState::default();
    }
}

/// A connector that defers all behavior to an external controller.
///
/// Serves market history, realtime quotes, fundamentals, ownership and the
/// quote page. Calls without a configured rule fail with `Unsupported`, except
/// the secondary lookups listed on the controller setters.
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector and its controller.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<dyn OzetConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn OzetConnector>, controller)
    }

    /// Log the request and snapshot the matching rule without holding the
    /// lock across the behavior's await.
    async fn rule<T: Clone>(
        &self,
        capability: &'static str,
        ticker: &Ticker,
        pick: impl FnOnce(&InternalState) -> &HashMap<Ticker, MockBehavior<T>>,
    ) -> Option<MockBehavior<T>> {
        let mut guard = self.state.lock().await;
        guard
            .requests
            .entry(capability)
            .or_default()
            .push(ticker.clone());
        pick(&guard).get(ticker).cloned()
    }
}

impl OzetConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
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

    fn as_ownership_service(&self) -> Option<&dyn OwnershipService> {
        Some(self as &dyn OwnershipService)
    }

    fn as_profile_page_scraper(&self) -> Option<&dyn ProfilePageScraper> {
        Some(self as &dyn ProfilePageScraper)
    }
}

#[async_trait]
impl MarketHistoryService for DynamicMockConnector {
    async fn history(
        &self,
        ticker: &Ticker,
        _lookback_days: u32,
    ) -> Result<PriceHistory, OzetError> {
        match self.rule("history", ticker, |s| &s.history_rules).await {
            Some(b) => b.run().await,
            None => Err(OzetError::unsupported("history")),
        }
    }

    async fn company_info(&self, ticker: &Ticker) -> Result<CompanyInfo, OzetError> {
        match self
            .rule("company-info", ticker, |s| &s.company_info_rules)
            .await
        {
            Some(b) => b.run().await,
            None => Ok(CompanyInfo::default()),
        }
    }
}

#[async_trait]
impl RealtimeQuoteService for DynamicMockConnector {
    async fn quote(&self, ticker: &Ticker) -> Result<RealtimeQuote, OzetError> {
        match self.rule("quote", ticker, |s| &s.quote_rules).await {
            Some(b) => b.run().await,
            None => Err(OzetError::unsupported("quote")),
        }
    }
}

#[async_trait]
impl FundamentalsService for DynamicMockConnector {
    async fn basic_financials(&self, ticker: &Ticker) -> Result<BasicFinancials, OzetError> {
        match self
            .rule("basic-financials", ticker, |s| &s.financials_rules)
            .await
        {
            Some(b) => b.run().await,
            None => Ok(BasicFinancials::default()),
        }
    }
}

#[async_trait]
impl OwnershipService for DynamicMockConnector {
    async fn insider_transactions(
        &self,
        ticker: &Ticker,
    ) -> Result<Vec<InsiderTransaction>, OzetError> {
        let mut guard = self.state.lock().await;
        guard
            .requests
            .entry("insider-transactions")
            .or_default()
            .push(ticker.clone());
        Ok(Vec::new())
    }

    async fn ownership(&self, ticker: &Ticker) -> Result<Vec<OwnershipRecord>, OzetError> {
        match self.rule("ownership", ticker, |s| &s.ownership_rules).await {
            Some(b) => b.run().await,
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl ProfilePageScraper for DynamicMockConnector {
    async fn fetch_quote_page(&self, ticker: &Ticker) -> Result<String, OzetError> {
        match self
            .rule("quote-page", ticker, |s| &s.quote_page_rules)
            .await
        {
            Some(b) => b.run().await,
            None => Err(OzetError::unsupported("quote-page")),
        }
    }
}
