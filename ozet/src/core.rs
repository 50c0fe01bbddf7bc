use std::sync::Arc;
use std::time::Duration;

use ozet_core::{Clock, OzetConfig, OzetConnector, OzetError, SystemClock};

/// Orchestrator that resolves ticker snapshots across registered providers.
pub struct Ozet {
    pub(crate) connectors: Vec<Arc<dyn OzetConnector>>,
    pub(crate) cfg: OzetConfig,
    pub(crate) clock: Arc<dyn Clock>,
}

/// Builder for constructing an `Ozet` orchestrator with custom configuration.
pub struct OzetBuilder {
    connectors: Vec<Arc<dyn OzetConnector>>,
    cfg: OzetConfig,
    clock: Arc<dyn Clock>,
}

impl Default for OzetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OzetBuilder {
    /// Create a new builder with default configuration and the system clock.
    ///
    /// Starts with no connectors; register at least one that serves daily
    /// history via [`with_connector`](Self::with_connector).
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: OzetConfig::default(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Register a provider connector.
    ///
    /// Registration order is priority order: for every capability the first
    /// connector that advertises it is used, later ones are ignored for that
    /// capability.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn OzetConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: OzetConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Inject the clock used for market-open detection and the news window.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Set the per-provider request timeout.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Set how many calendar days of history the primary provider is asked for.
    #[must_use]
    pub const fn history_lookback_days(mut self, days: u32) -> Self {
        self.cfg.history_lookback_days = days;
        self
    }

    /// Set how many trailing volume readings feed the average volume.
    #[must_use]
    pub const fn volume_average_window(mut self, bars: usize) -> Self {
        self.cfg.volume_average_window = bars;
        self
    }

    /// Set the company-news window width in days.
    #[must_use]
    pub const fn news_window_days(mut self, days: u32) -> Self {
        self.cfg.news_window_days = days;
        self
    }

    /// Set the maximum number of headlines per report.
    #[must_use]
    pub const fn news_limit(mut self, limit: usize) -> Self {
        self.cfg.news_limit = limit;
        self
    }

    /// Build the `Ozet` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no registered connector serves daily history,
    /// since no snapshot can be computed without a primary provider.
    pub fn build(self) -> Result<Ozet, OzetError> {
        if self.connectors.is_empty() {
            return Err(OzetError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }
        if !self
            .connectors
            .iter()
            .any(|c| c.as_market_history_service().is_some())
        {
            return Err(OzetError::InvalidArg(
                "no registered connector provides daily history".to_string(),
            ));
        }

        Ok(Ozet {
            connectors: self.connectors,
            cfg: self.cfg,
            clock: self.clock,
        })
    }
}

/// Attach the connector name to errors that do not already carry one.
pub fn tag_err(connector: &str, e: OzetError) -> OzetError {
    match e {
        e @ (OzetError::NotFound { .. }
        | OzetError::ProviderTimeout { .. }
        | OzetError::Connector { .. }
        | OzetError::PrimaryFetch(_)) => e,
        other => OzetError::Connector {
            connector: connector.to_string(),
            msg: other.to_string(),
        },
    }
}

impl Ozet {
    /// Start building a new `Ozet` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    ///
    /// let ozet = ozet::Ozet::builder()
    ///     .with_connector(Arc::new(YahooConnector::new_default()?))
    ///     .with_connector(Arc::new(FinnhubConnector::new(api_key)?))
    ///     .with_connector(Arc::new(FinvizConnector::new_default()?))
    ///     .build()?;
    /// let text = ozet.report(&Ticker::parse("AAPL")?).await?;
    /// ```
    #[must_use]
    pub fn builder() -> OzetBuilder {
        OzetBuilder::new()
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &OzetConfig {
        &self.cfg
    }

    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "ozet::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                capability = capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, OzetError>
    where
        Fut: core::future::Future<Output = Result<T, OzetError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(OzetError::provider_timeout(connector_name, capability)))
    }

    /// First registered connector that answers `accessor`, with its name.
    pub(crate) fn first_capable<'a, P: ?Sized + 'a>(
        &'a self,
        accessor: impl Fn(&'a dyn OzetConnector) -> Option<&'a P>,
    ) -> Option<(&'static str, &'a P)> {
        self.connectors
            .iter()
            .find_map(|c| accessor(&**c).map(|p| (c.name(), p)))
    }
}
