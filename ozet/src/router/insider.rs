use ozet_core::{Capability, InsiderSummary, Metric, OzetError, Ticker};

use crate::Ozet;
use crate::core::tag_err;
use crate::report::fixed2;
use crate::scrape::parse_insider_facts;

impl Ozet {
    /// Resolve insider ownership and recent insider activity.
    ///
    /// Structured ownership data is tried first. Only when it leaves the
    /// ownership percentage `Unknown` is the quote page scraped, and the
    /// scraped facts then replace both fields. Never fails: every upstream
    /// error degrades to `Unknown`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "ozet::router", skip(self), fields(symbol = %ticker))
    )]
    pub async fn resolve_insider(&self, ticker: &Ticker) -> InsiderSummary {
        let structured = self.structured_insider(ticker).await;
        if structured.ownership_pct.is_known() {
            return structured;
        }
        self.scraped_insider(ticker).await.unwrap_or(structured)
    }

    async fn structured_insider(&self, ticker: &Ticker) -> InsiderSummary {
        let Some((name, svc)) = self.first_capable(|c| c.as_ownership_service()) else {
            return InsiderSummary::unknown();
        };
        let timeout = self.cfg.provider_timeout;

        let fetched = async {
            let transactions = Self::provider_call_with_timeout(
                name,
                Capability::InsiderTransactions.as_str(),
                timeout,
                svc.insider_transactions(ticker),
            )
            .await?;
            let ownership = Self::provider_call_with_timeout(
                name,
                Capability::Ownership.as_str(),
                timeout,
                svc.ownership(ticker),
            )
            .await?;
            Ok::<_, OzetError>((transactions, ownership))
        }
        .await
        .map_err(|e| tag_err(name, e));

        match fetched {
            Ok((transactions, ownership)) => InsiderSummary {
                ownership_pct: ownership
                    .first()
                    .map_or(Metric::Unknown, |r| r.percent.map(|p| format!("{}%", fixed2(p)))),
                recent_activity: if transactions.is_empty() {
                    Metric::Unknown
                } else {
                    Metric::Known(format!("{} recent transactions", transactions.len()))
                },
            },
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(target: "ozet::router", symbol = %ticker, error = %_e, "structured insider data unavailable");
                InsiderSummary::unknown()
            }
        }
    }

    /// `None` when no connector serves a quote page.
    async fn scraped_insider(&self, ticker: &Ticker) -> Option<InsiderSummary> {
        let (name, scraper) = self.first_capable(|c| c.as_profile_page_scraper())?;

        let page = Self::provider_call_with_timeout(
            name,
            Capability::QuotePage.as_str(),
            self.cfg.provider_timeout,
            scraper.fetch_quote_page(ticker),
        )
        .await
        .map_err(|e| tag_err(name, e));

        Some(match page {
            Ok(html) => parse_insider_facts(&html),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(target: "ozet::router", symbol = %ticker, error = %_e, "quote page scrape failed");
                InsiderSummary::unknown()
            }
        })
    }
}
