//! Ozet builds a financial snapshot for a ticker out of several unreliable
//! market data providers.
//!
//! Overview
//! - Connectors implement the `ozet_core` role traits and advertise them through
//!   `OzetConnector::as_*` accessors; the first registered connector that
//!   answers an accessor serves that capability.
//! - `Ozet::aggregate` fetches daily history from the primary provider and
//!   derives price change, volume, average volume, volume ratio and float
//!   percentage. Fields still `Unknown` are filled from the secondary quote and
//!   fundamentals providers without touching known values.
//! - `Ozet::resolve_insider` tries structured ownership data and scrapes the
//!   quote page only when the ownership percentage is missing.
//! - `Ozet::resolve_news` prefers company news over a short trailing window and
//!   falls back to the general feed once.
//! - `format_report` renders the result; `respond::Responder` wraps everything
//!   in the chat command surface.
//!
//! Every provider call is bounded by `OzetConfig::provider_timeout` and calls
//! within one request run sequentially.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ozet::{Ozet, Ticker};
//!
//! let ozet = Ozet::builder()
//!     .with_connector(Arc::new(ozet_yahoo::YahooConnector::new_default()?))
//!     .with_connector(Arc::new(ozet_finnhub::FinnhubConnector::new(key)?))
//!     .with_connector(Arc::new(ozet_finviz::FinvizConnector::new_default()?))
//!     .build()?;
//! println!("{}", ozet.report(&Ticker::parse("AAPL")?).await?);
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
mod report;
pub mod respond;
mod router;
mod scrape;

pub use core::{Ozet, OzetBuilder};
pub use report::{NOT_AVAILABLE, format_report};
pub use scrape::parse_insider_facts;

// Re-export core types for convenience
pub use ozet_core::{
    Capability, Clock, Decimal, FixedClock, InsiderSummary, Metric, NewsItem,
    OzetConfig, OzetConnector, OzetError, QuoteSnapshot, Snapshot, SystemClock, Ticker, TickerSet,
};
