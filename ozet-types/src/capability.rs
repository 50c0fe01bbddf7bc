use core::fmt;
use serde::{Deserialize, Serialize};

/// Provider capability labels used for routing, errors, and telemetry.
///
/// Each variant corresponds to one provider operation consumed by the
/// orchestrator, so error messages and spans name the exact call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Capability {
    /// Daily price/volume history from the primary provider.
    History,
    /// Static company information (float and outstanding shares).
    CompanyInfo,
    /// Realtime quote from the secondary provider.
    Quote,
    /// Basic financial metrics from the secondary provider.
    BasicFinancials,
    /// Company news within a date window.
    CompanyNews,
    /// General news feed for a symbol.
    GeneralNews,
    /// Insider transactions list.
    InsiderTransactions,
    /// Ownership percentage records.
    Ownership,
    /// Raw quote page used for scraping insider facts.
    QuotePage,
}

impl Capability {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::History => "history",
            Self::CompanyInfo => "company-info",
            Self::Quote => "quote",
            Self::BasicFinancials => "basic-financials",
            Self::CompanyNews => "company-news",
            Self::GeneralNews => "general-news",
            Self::InsiderTransactions => "insider-transactions",
            Self::Ownership => "ownership",
            Self::QuotePage => "quote-page",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
