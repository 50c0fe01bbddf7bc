//! ozet-core
//!
//! Core types, traits, and utilities shared across the ozet ecosystem.
//!
//! - `types`: the `Metric` sum type, tickers, provider records and the
//!   request-scoped snapshot values produced by the orchestrator.
//! - `connector`: the `OzetConnector` trait and capability provider traits.
//! - `clock`: the injectable wall clock used for market-open detection and
//!   news windows.
//!
//! Async runtime
//! -------------
//! Provider traits are declared with `async_trait` and carry no runtime types
//! of their own. The orchestrator in the `ozet` crate bounds calls with
//! `tokio::time::timeout`, so end-to-end use requires a Tokio 1.x runtime.
#![warn(missing_docs)]

/// Wall-clock abstraction.
pub mod clock;
/// Connector capability traits and the primary `OzetConnector` interface.
pub mod connector;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use connector::OzetConnector;
pub use types::*;

pub use ozet_types::{Capability, OzetConfig, OzetError};
pub use rust_decimal::Decimal;
