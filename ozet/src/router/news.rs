use chrono::Duration;
use ozet_core::{Capability, NewsItem, Ticker};

use crate::Ozet;
use crate::core::tag_err;

impl Ozet {
    /// Resolve the most recent headlines for a ticker, newest first.
    ///
    /// Company news over the trailing window is preferred. When it fails or
    /// comes back empty, the general news feed is consulted once. Never
    /// fails: if both tiers come up empty the result is empty.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "ozet::router", skip(self), fields(symbol = %ticker))
    )]
    pub async fn resolve_news(&self, ticker: &Ticker) -> Vec<NewsItem> {
        let company = self.company_news(ticker).await;
        if !company.is_empty() {
            return company;
        }
        self.general_news(ticker).await
    }

    async fn company_news(&self, ticker: &Ticker) -> Vec<NewsItem> {
        let Some((name, svc)) = self.first_capable(|c| c.as_company_news_service()) else {
            return vec![];
        };
        let now = self.clock.now();
        let to = now.date_naive();
        let from = (now - Duration::days(i64::from(self.cfg.news_window_days))).date_naive();

        let res = Self::provider_call_with_timeout(
            name,
            Capability::CompanyNews.as_str(),
            self.cfg.provider_timeout,
            svc.company_news(ticker, from, to),
        )
        .await
        .map_err(|e| tag_err(name, e));

        match res {
            Ok(mut articles) => {
                articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
                articles
                    .into_iter()
                    .take(self.cfg.news_limit)
                    .map(|a| NewsItem {
                        headline: a.headline,
                        published: a.published_at.date_naive(),
                        url: a.url,
                    })
                    .collect()
            }
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(target: "ozet::router", symbol = %ticker, error = %_e, "company news unavailable");
                vec![]
            }
        }
    }

    async fn general_news(&self, ticker: &Ticker) -> Vec<NewsItem> {
        let Some((name, svc)) = self.first_capable(|c| c.as_general_news_service()) else {
            return vec![];
        };

        let res = Self::provider_call_with_timeout(
            name,
            Capability::GeneralNews.as_str(),
            self.cfg.provider_timeout,
            svc.news(ticker),
        )
        .await
        .map_err(|e| tag_err(name, e));

        match res {
            Ok(articles) => articles
                .into_iter()
                .take(self.cfg.news_limit)
                .map(|a| NewsItem {
                    headline: a.title,
                    published: a.published_at.date_naive(),
                    url: a.link,
                })
                .collect(),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(target: "ozet::router", symbol = %ticker, error = %_e, "general news unavailable");
                vec![]
            }
        }
    }
}
