use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the ozet workspace.
///
/// Upstream failures (`Connector`, `NotFound`, `Data`, `ProviderTimeout`, ...)
/// are absorbed by the tier that issued the call. Only `PrimaryFetch` and
/// `UnsupportedSymbol` are meant to reach the request boundary.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OzetError {
    /// The requested capability is not implemented by the target connector.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// A capability string describing what was requested (e.g. "quote-page").
        capability: String,
    },

    /// Issues with the returned or expected data (missing fields, malformed payloads).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// An individual connector returned an error.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),

    /// A resource or symbol could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of missing resource, e.g. "history for AAPL".
        what: String,
    },

    /// An individual provider call exceeded the configured timeout.
    #[error("provider timed out: {capability} via {connector}")]
    ProviderTimeout {
        /// Connector name that timed out.
        connector: String,
        /// Capability label (e.g. "history", "quote").
        capability: String,
    },

    /// The primary history/company-info fetch failed; no snapshot can be computed.
    #[error("primary fetch failed: {0}")]
    PrimaryFetch(Box<OzetError>),

    /// The symbol is not part of the configured allow-set.
    #[error("unsupported symbol: {symbol}")]
    UnsupportedSymbol {
        /// The rejected symbol as received.
        symbol: String,
    },

    /// Startup configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),
}

impl OzetError {
    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Helper: build a `Connector` error with the connector name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(connector: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            connector: connector.into(),
            capability: capability.into(),
        }
    }

    /// Helper: wrap a failure of the primary history/info provider.
    #[must_use]
    pub fn primary(inner: Self) -> Self {
        match inner {
            e @ Self::PrimaryFetch(_) => e,
            other => Self::PrimaryFetch(Box::new(other)),
        }
    }
}
