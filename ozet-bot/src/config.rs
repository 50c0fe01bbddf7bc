//! Environment-based startup configuration.

use std::io::Read;
use std::path::{Path, PathBuf};

use ozet::{OzetError, Ticker, TickerSet};

/// Default location of the ticker allow-list.
pub const DEFAULT_TICKERS_PATH: &str = "tickers.csv";

/// Column holding the symbols in the allow-list CSV.
pub const TICKER_COLUMN: &str = "Ticker";

/// Everything the bot needs from its environment.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Telegram Bot API token.
    pub telegram_token: String,
    /// Finnhub API key.
    pub finnhub_api_key: String,
    /// Path of the ticker allow-list CSV.
    pub tickers_path: PathBuf,
}

impl BotConfig {
    /// Load from process environment, reading `.env` first when present.
    ///
    /// # Errors
    /// Returns `OzetError::Config` when a required variable is missing.
    pub fn from_env() -> Result<Self, OzetError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns `OzetError::Config` when a required variable is missing or blank.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, OzetError> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| OzetError::Config(format!("{key} is not set")))
        };
        Ok(Self {
            telegram_token: required("TELEGRAM_BOT_TOKEN")?,
            finnhub_api_key: required("FINNHUB_API_KEY")?,
            tickers_path: lookup("OZET_TICKERS")
                .filter(|v| !v.trim().is_empty())
                .map_or_else(|| PathBuf::from(DEFAULT_TICKERS_PATH), PathBuf::from),
        })
    }
}

/// Read the allow-list CSV at `path`.
///
/// # Errors
/// Returns `OzetError::Config` if the file cannot be opened or parsed.
pub fn load_tickers(path: &Path) -> Result<TickerSet, OzetError> {
    let file = std::fs::File::open(path)
        .map_err(|e| OzetError::Config(format!("cannot open {}: {e}", path.display())))?;
    read_tickers(file)
}

/// Parse an allow-list CSV with a `Ticker` header column.
///
/// Symbols are normalized to uppercase. Blank cells are skipped; cells that
/// are not valid symbols are logged and skipped.
///
/// # Errors
/// Returns `OzetError::Config` when the CSV is malformed or lacks the column.
pub fn read_tickers<R: Read>(reader: R) -> Result<TickerSet, OzetError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr
        .headers()
        .map_err(|e| OzetError::Config(format!("ticker csv: {e}")))?;
    let column = headers
        .iter()
        .position(|h| h.trim() == TICKER_COLUMN)
        .ok_or_else(|| OzetError::Config(format!("ticker csv has no {TICKER_COLUMN} column")))?;

    let mut tickers = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| OzetError::Config(format!("ticker csv: {e}")))?;
        let Some(raw) = record.get(column).map(str::trim).filter(|s| !s.is_empty()) else {
            continue;
        };
        match Ticker::parse(raw) {
            Ok(t) => tickers.push(t),
            Err(e) => tracing::warn!(symbol = raw, error = %e, "skipping invalid ticker"),
        }
    }
    Ok(TickerSet::new(tickers))
}
