//! Data provider trait and structured fetch errors.
//!
//! The DataProvider trait abstracts over candle sources (the Kraken REST API,
//! static fixtures) so the refresh cycle can be driven without a network.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{BarSeries, SeriesError, Timeframe, TradingPair};

/// Structured error types for a single fetch.
///
/// Displayable in both CLI and TUI contexts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("row limit must be at least 1")]
    InvalidLimit,

    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by venue: {0}")]
    RateLimited(String),

    #[error("symbol not found on venue: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("venue error: {0}")]
    Venue(String),

    #[error("HTTP {status} from venue")]
    Http { status: u16 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("venue returned no {timeframe} candles for {pair}")]
    Empty { pair: String, timeframe: Timeframe },

    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

impl FetchError {
    pub(crate) fn from_series(err: SeriesError, pair: &TradingPair, timeframe: Timeframe) -> Self {
        match err {
            SeriesError::Empty => FetchError::Empty {
                pair: pair.to_string(),
                timeframe,
            },
            SeriesError::NotAscending { index } => FetchError::ResponseFormatChanged(format!(
                "candles out of order at row {index}"
            )),
        }
    }
}

/// Trait for candle providers.
///
/// One call is one attempt: implementations do not retry.
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the newest `limit` bars, oldest first.
    ///
    /// On success the series is non-empty and holds at most `limit` bars.
    fn fetch(
        &self,
        pair: &TradingPair,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<BarSeries, FetchError>;
}

/// What to do with the newest bar while its interval is still open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormingBarPolicy {
    /// Keep the in-progress bar; its close is the latest trade price.
    #[default]
    Include,
    /// Drop the in-progress bar so indicators only see closed intervals.
    Exclude,
}

impl FormingBarPolicy {
    pub fn apply(self, series: BarSeries, now: DateTime<Utc>) -> Result<BarSeries, FetchError> {
        match self {
            FormingBarPolicy::Include => Ok(series),
            FormingBarPolicy::Exclude => {
                let timeframe = series.timeframe();
                let closes_at = series.last().timestamp + timeframe.duration();
                if closes_at <= now {
                    return Ok(series);
                }
                let pair = series.pair().clone();
                tracing::debug!(%pair, %timeframe, "dropping forming bar");
                series
                    .without_last()
                    .map_err(|e| FetchError::from_series(e, &pair, timeframe))
            }
        }
    }
}
