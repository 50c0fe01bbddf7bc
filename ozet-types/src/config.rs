//! Configuration for the snapshot orchestrator.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Global configuration for the `Ozet` orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OzetConfig {
    /// Upper bound for every individual provider call.
    pub provider_timeout: Duration,
    /// Calendar days of daily history requested from the primary provider.
    pub history_lookback_days: u32,
    /// Number of trailing non-missing volume readings averaged for the
    /// 30-day average volume.
    pub volume_average_window: usize,
    /// Width of the company-news window, in days ending at "now".
    pub news_window_days: u32,
    /// Maximum number of headlines kept in a report.
    pub news_limit: usize,
}

impl Default for OzetConfig {
    fn default() -> Self {
        Self {
            provider_timeout: Duration::from_secs(10),
            history_lookback_days: 35,
            volume_average_window: 30,
            news_window_days: 3,
            news_limit: 3,
        }
    }
}
