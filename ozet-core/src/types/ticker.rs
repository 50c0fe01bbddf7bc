use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use ozet_types::OzetError;

/// An uppercase ticker symbol.
///
/// Accepted characters are `A-Z`, `0-9`, `.`, `-`, `^` and `=`, which covers
/// share classes (`BRK.B`), indices (`^GSPC`) and FX pairs (`EUR=X`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Trims and uppercases `raw`, then validates the character set.
    ///
    /// # Errors
    /// Returns `OzetError::InvalidArg` for empty input or unsupported characters.
    pub fn parse(raw: &str) -> Result<Self, OzetError> {
        let sym = raw.trim().to_ascii_uppercase();
        if sym.is_empty() {
            return Err(OzetError::InvalidArg("ticker symbol is empty".into()));
        }
        if let Some(bad) = sym
            .chars()
            .find(|c| !(c.is_ascii_uppercase() || c.is_ascii_digit() || ".-^=".contains(*c)))
        {
            return Err(OzetError::InvalidArg(format!(
                "ticker symbol '{sym}' contains invalid character '{bad}'"
            )));
        }
        Ok(Self(sym))
    }

    /// The symbol as an uppercase string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ticker {
    type Err = OzetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Ticker {
    type Error = OzetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Ticker> for String {
    fn from(value: Ticker) -> Self {
        value.0
    }
}

/// The fixed allow-set of tickers the service answers for.
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickerSet {
    inner: HashSet<Ticker>,
}

impl TickerSet {
    /// Builds a set from already-validated tickers.
    pub fn new(tickers: impl IntoIterator<Item = Ticker>) -> Self {
        Self {
            inner: tickers.into_iter().collect(),
        }
    }

    /// Parses every symbol, failing on the first invalid one.
    ///
    /// # Errors
    /// Returns `OzetError::InvalidArg` naming the offending symbol.
    pub fn from_symbols<I, S>(symbols: I) -> Result<Self, OzetError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        symbols
            .into_iter()
            .map(|s| Ticker::parse(s.as_ref()))
            .collect::<Result<HashSet<_>, _>>()
            .map(|inner| Self { inner })
    }

    /// Normalizes `raw` and returns the matching member, if any.
    ///
    /// Input that does not parse as a ticker is simply not a member.
    #[must_use]
    pub fn lookup(&self, raw: &str) -> Option<&Ticker> {
        let candidate = Ticker::parse(raw).ok()?;
        self.inner.get(&candidate)
    }

    /// Like [`TickerSet::lookup`], but a miss is an error.
    ///
    /// # Errors
    /// Returns `OzetError::UnsupportedSymbol` carrying the trimmed input.
    pub fn require(&self, raw: &str) -> Result<&Ticker, OzetError> {
        self.lookup(raw).ok_or_else(|| OzetError::UnsupportedSymbol {
            symbol: raw.trim().to_string(),
        })
    }

    /// Membership test for an already-parsed ticker.
    #[must_use]
    pub fn contains(&self, ticker: &Ticker) -> bool {
        self.inner.contains(ticker)
    }

    /// Number of tickers in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True when the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
