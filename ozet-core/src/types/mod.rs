//! Core domain types used throughout the ozet workspace.
//!
//! Provider records describe what a single upstream returned; snapshot types
//! describe what the orchestrator hands to the report formatter. Every field
//! a provider may omit is a [`Metric`].

mod metric;
mod records;
mod snapshot;
mod ticker;

pub use metric::Metric;
pub use records::{
    BasicFinancials, CompanyInfo, CompanyNewsArticle, DailyBar, GeneralNewsArticle,
    InsiderTransaction, OwnershipRecord, PriceHistory, RealtimeQuote,
};
pub use snapshot::{InsiderSummary, NewsItem, QuoteSnapshot, Snapshot};
pub use ticker::{Ticker, TickerSet};
