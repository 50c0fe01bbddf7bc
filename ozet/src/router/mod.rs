pub mod insider;
pub mod metrics;
pub mod news;

use ozet_core::{OzetError, Snapshot, Ticker};

use crate::Ozet;
use crate::report::format_report;

impl Ozet {
    /// Run every tier for a ticker: metrics, then insider facts, then news.
    ///
    /// Calls are sequential. Only a primary metrics failure aborts the
    /// request; the insider and news tiers degrade to `Unknown` or empty.
    ///
    /// # Errors
    /// Returns `PrimaryFetch` when the primary history provider fails.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "ozet::router", skip(self), fields(symbol = %ticker))
    )]
    pub async fn snapshot(&self, ticker: &Ticker) -> Result<Snapshot, OzetError> {
        let quote = self.aggregate(ticker).await?;
        let insider = self.resolve_insider(ticker).await;
        let news = self.resolve_news(ticker).await;
        Ok(Snapshot {
            ticker: ticker.clone(),
            quote,
            insider,
            news,
        })
    }

    /// Build the snapshot and render it as the text report.
    ///
    /// # Errors
    /// Same as [`snapshot`](Self::snapshot).
    pub async fn report(&self, ticker: &Ticker) -> Result<String, OzetError> {
        let snap = self.snapshot(ticker).await?;
        Ok(format_report(&snap.ticker, &snap.quote, &snap.insider, &snap.news))
    }
}
