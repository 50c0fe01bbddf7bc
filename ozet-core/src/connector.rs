use async_trait::async_trait;
use chrono::NaiveDate;

use crate::types::{
    BasicFinancials, CompanyInfo, CompanyNewsArticle, GeneralNewsArticle, InsiderTransaction,
    OwnershipRecord, PriceHistory, RealtimeQuote, Ticker,
};
use crate::OzetError;

/// Focused role trait for connectors that provide daily history and company share counts.
#[async_trait]
pub trait MarketHistoryService: Send + Sync {
    /// Fetch daily bars covering roughly `lookback_days` calendar days, oldest first.
    async fn history(&self, ticker: &Ticker, lookback_days: u32)
    -> Result<PriceHistory, OzetError>;

    /// Fetch float and outstanding share counts.
    async fn company_info(&self, ticker: &Ticker) -> Result<CompanyInfo, OzetError>;
}

/// Focused role trait for connectors that provide realtime quotes.
#[async_trait]
pub trait RealtimeQuoteService: Send + Sync {
    /// Fetch a point-in-time quote for the given ticker.
    async fn quote(&self, ticker: &Ticker) -> Result<RealtimeQuote, OzetError>;
}

/// Focused role trait for connectors that provide basic financial metrics.
#[async_trait]
pub trait FundamentalsService: Send + Sync {
    /// Fetch volume averages and share counts, in absolute units.
    async fn basic_financials(&self, ticker: &Ticker) -> Result<BasicFinancials, OzetError>;
}

/// Focused role trait for connectors that provide company news over a date window.
#[async_trait]
pub trait CompanyNewsService: Send + Sync {
    /// Fetch articles published between `from` and `to`, both inclusive.
    async fn company_news(
        &self,
        ticker: &Ticker,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<CompanyNewsArticle>, OzetError>;
}

/// Focused role trait for connectors that provide a general news feed.
#[async_trait]
pub trait GeneralNewsService: Send + Sync {
    /// Fetch the provider's current feed for the ticker, in provider order.
    async fn news(&self, ticker: &Ticker) -> Result<Vec<GeneralNewsArticle>, OzetError>;
}

/// Focused role trait for connectors that provide insider and ownership data.
#[async_trait]
pub trait OwnershipService: Send + Sync {
    /// Fetch reported insider transactions.
    async fn insider_transactions(
        &self,
        ticker: &Ticker,
    ) -> Result<Vec<InsiderTransaction>, OzetError>;

    /// Fetch ownership records; the first record is the most significant holder.
    async fn ownership(&self, ticker: &Ticker) -> Result<Vec<OwnershipRecord>, OzetError>;
}

/// Focused role trait for connectors that serve a scrapeable quote page.
#[async_trait]
pub trait ProfilePageScraper: Send + Sync {
    /// Fetch the raw HTML of the ticker's quote page.
    async fn fetch_quote_page(&self, ticker: &Ticker) -> Result<String, OzetError>;
}

/// Main connector trait implemented by provider crates.
///
/// Capabilities are advertised by returning a trait object from the matching
/// `as_*` accessor. The orchestrator asks each registered connector in order
/// and uses the first one that answers.
pub trait OzetConnector: Send + Sync {
    /// A stable identifier, e.g. "ozet-yahoo".
    fn name(&self) -> &'static str;

    /// If implemented, returns a trait object for daily history and company info.
    fn as_market_history_service(&self) -> Option<&dyn MarketHistoryService> {
        None
    }
    /// If implemented, returns a trait object for realtime quotes.
    fn as_realtime_quote_service(&self) -> Option<&dyn RealtimeQuoteService> {
        None
    }
    /// If implemented, returns a trait object for basic financials.
    fn as_fundamentals_service(&self) -> Option<&dyn FundamentalsService> {
        None
    }
    /// If implemented, returns a trait object for company news.
    fn as_company_news_service(&self) -> Option<&dyn CompanyNewsService> {
        None
    }
    /// If implemented, returns a trait object for the general news feed.
    fn as_general_news_service(&self) -> Option<&dyn GeneralNewsService> {
        None
    }
    /// If implemented, returns a trait object for insider transactions and ownership.
    fn as_ownership_service(&self) -> Option<&dyn OwnershipService> {
        None
    }
    /// If implemented, returns a trait object for quote-page scraping.
    fn as_profile_page_scraper(&self) -> Option<&dyn ProfilePageScraper> {
        None
    }
}
