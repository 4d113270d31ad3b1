//! Trading pair symbols (`BASE/QUOTE`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PairError {
    #[error("pair '{0}' must look like BASE/QUOTE")]
    Malformed(String),
}

/// A spot trading pair such as `ETH/USD`. Legs are stored upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TradingPair {
    base: String,
    quote: String,
}

impl TradingPair {
    pub fn new(base: &str, quote: &str) -> Result<Self, PairError> {
        let base = base.trim();
        let quote = quote.trim();
        let valid = |leg: &str| !leg.is_empty() && leg.chars().all(|c| c.is_ascii_alphanumeric());
        if !valid(base) || !valid(quote) {
            return Err(PairError::Malformed(format!("{base}/{quote}")));
        }
        Ok(Self {
            base: base.to_ascii_uppercase(),
            quote: quote.to_ascii_uppercase(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn quote(&self) -> &str {
        &self.quote
    }

    /// The three pairs offered by the dashboard selector.
    pub fn default_watchlist() -> Vec<TradingPair> {
        ["ETH", "BTC", "SOL"]
            .iter()
            .map(|base| TradingPair {
                base: (*base).to_string(),
                quote: "USD".to_string(),
            })
            .collect()
    }
}

impl fmt::Display for TradingPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl FromStr for TradingPair {
    type Err = PairError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, quote) = s
            .split_once('/')
            .ok_or_else(|| PairError::Malformed(s.to_string()))?;
        Self::new(base, quote).map_err(|_| PairError::Malformed(s.to_string()))
    }
}

impl TryFrom<String> for TradingPair {
    type Error = PairError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TradingPair> for String {
    fn from(pair: TradingPair) -> Self {
        pair.to_string()
    }
}
