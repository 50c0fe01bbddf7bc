//! Chat-facing dispatch: turns one inbound text message into replies.

use std::sync::Arc;

use async_trait::async_trait;
use ozet_core::{OzetError, TickerSet};

use crate::Ozet;

/// Reply to the `/start` command.
pub const START_REPLY: &str = "Send me a ticker!";
/// Reply for symbols outside the allow-set.
pub const OUT_OF_SCOPE_REPLY: &str = "Not in our scope bro.";
/// Acknowledgement sent before a report is computed.
pub const PROCESSING_REPLY: &str = "Processing...";

/// Destination for replies to a single inbound message, in send order.
#[async_trait]
pub trait ReplySink: Send {
    /// Deliver one reply.
    async fn send(&mut self, text: &str) -> Result<(), OzetError>;
}

/// What an inbound message asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// `/start`, optionally addressed to a bot (`/start@name`).
    Start,
    /// Some other command; ignored.
    OtherCommand,
    /// Plain text naming a symbol in the allow-set.
    Ticker(ozet_core::Ticker),
    /// Plain text that is not a known symbol.
    OutOfScope(OzetError),
}

/// Stateless dispatcher shared by every chat.
#[derive(Clone)]
pub struct Responder {
    ozet: Arc<Ozet>,
    tickers: Arc<TickerSet>,
}

impl Responder {
    /// Create a responder over a built orchestrator and the allow-set.
    #[must_use]
    pub const fn new(ozet: Arc<Ozet>, tickers: Arc<TickerSet>) -> Self {
        Self { ozet, tickers }
    }

    /// Classify inbound text without touching any provider.
    #[must_use]
    pub fn classify(&self, text: &str) -> Request {
        let text = text.trim();
        if let Some(cmd) = text.strip_prefix('/') {
            let name = cmd
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .split('@')
                .next()
                .unwrap_or_default();
            return if name == "start" {
                Request::Start
            } else {
                Request::OtherCommand
            };
        }
        match self.tickers.require(text) {
            Ok(t) => Request::Ticker(t.clone()),
            Err(e) => Request::OutOfScope(e),
        }
    }

    /// Handle one inbound message, sending every reply through `sink`.
    ///
    /// A known ticker gets an acknowledgement first, then either the report
    /// or a user-facing error message. Provider failures never surface as an
    /// `Err` here; only sink failures do.
    ///
    /// # Errors
    /// Returns the first error reported by `sink`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "ozet::respond", skip(self, sink))
    )]
    pub async fn handle(&self, text: &str, sink: &mut dyn ReplySink) -> Result<(), OzetError> {
        match self.classify(text) {
            Request::Start => sink.send(START_REPLY).await,
            Request::OtherCommand => Ok(()),
            Request::OutOfScope(e) => sink.send(&error_reply(&e)).await,
            Request::Ticker(ticker) => {
                sink.send(PROCESSING_REPLY).await?;
                let reply = match self.ozet.report(&ticker).await {
                    Ok(report) => report,
                    Err(e) => {
                        #[cfg(feature = "tracing")]
                        tracing::error!(target: "ozet::respond", symbol = %ticker, error = %e, "report failed");
                        error_reply(&e)
                    }
                };
                sink.send(&reply).await
            }
        }
    }
}

/// User-facing text for a rejected or failed request.
#[must_use]
pub fn error_reply(err: &OzetError) -> String {
    match err {
        OzetError::UnsupportedSymbol { .. } => OUT_OF_SCOPE_REPLY.to_string(),
        _ => format!(
            "Error fetching data: {err}\nPlease try again later or with a different ticker."
        ),
    }
}
