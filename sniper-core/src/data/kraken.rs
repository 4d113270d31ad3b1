//! Kraken public OHLC provider.
//!
//! Fetches candles from `GET /0/public/OHLC`. No authentication, one attempt
//! per call, no retries. Spacing between calls made through the same handle is
//! enforced by a cooperative `Throttle`.
//!
//! Response shape:
//! `{"error": [], "result": {"XXBTZUSD": [[time, "o", "h", "l", "c", "vwap", "volume", count], ...], "last": 1700000000}}`
//! Times are epoch seconds, prices are decimal strings, rows are oldest first,
//! and the final row is the interval that is still forming.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::provider::{DataProvider, FetchError};
use super::throttle::Throttle;
use crate::domain::{Bar, BarSeries, Timeframe, TradingPair};

pub const KRAKEN_BASE_URL: &str = "https://api.kraken.com";

/// Connection settings for one provider handle.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub min_request_interval: Duration,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: KRAKEN_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("sniper/", env!("CARGO_PKG_VERSION")).to_string(),
            min_request_interval: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OhlcResponse {
    #[serde(default)]
    error: Vec<String>,
    result: Option<Map<String, Value>>,
}

/// `[time, open, high, low, close, vwap, volume, count]`
#[derive(Debug, Deserialize)]
struct KrakenCandle(i64, String, String, String, String, String, String, u64);

pub struct KrakenProvider {
    client: reqwest::blocking::Client,
    base_url: String,
    throttle: Throttle,
}

impl KrakenProvider {
    pub fn new(settings: ProviderSettings) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            throttle: Throttle::new(settings.min_request_interval),
        })
    }

    /// Kraken's spelling of a pair: `BTC/USD` -> `XBTUSD`.
    pub fn venue_pair(pair: &TradingPair) -> String {
        let base = match pair.base() {
            "BTC" => "XBT",
            "DOGE" => "XDG",
            other => other,
        };
        format!("{base}{}", pair.quote())
    }

    fn ohlc_url(&self, pair: &TradingPair, timeframe: Timeframe) -> String {
        format!(
            "{}/0/public/OHLC?pair={}&interval={}",
            self.base_url,
            Self::venue_pair(pair),
            timeframe.minutes()
        )
    }

    fn classify_venue_error(pair: &TradingPair, message: &str) -> FetchError {
        if message.contains("Unknown asset pair") {
            FetchError::SymbolNotFound {
                symbol: pair.to_string(),
            }
        } else if message.contains("Rate limit") || message.contains("Too many requests") {
            FetchError::RateLimited(message.to_string())
        } else {
            FetchError::Venue(message.to_string())
        }
    }

    /// Parse a decoded response into bars, oldest first.
    fn parse_response(pair: &TradingPair, resp: OhlcResponse) -> Result<Vec<Bar>, FetchError> {
        if let Some(message) = resp.error.first() {
            return Err(Self::classify_venue_error(pair, message));
        }

        let result = resp
            .result
            .ok_or_else(|| FetchError::ResponseFormatChanged("missing result object".into()))?;

        let rows = result
            .into_iter()
            .find(|(key, _)| key != "last")
            .map(|(_, rows)| rows)
            .ok_or_else(|| FetchError::ResponseFormatChanged("result has no candle array".into()))?;

        let candles: Vec<KrakenCandle> = serde_json::from_value(rows)
            .map_err(|e| FetchError::ResponseFormatChanged(format!("candle rows: {e}")))?;

        candles.into_iter().map(Self::candle_to_bar).collect()
    }

    fn candle_to_bar(candle: KrakenCandle) -> Result<Bar, FetchError> {
        let KrakenCandle(time, open, high, low, close, _vwap, volume, _count) = candle;
        let millis = time
            .checked_mul(1000)
            .ok_or_else(|| FetchError::ResponseFormatChanged(format!("invalid timestamp: {time}")))?;
        Bar::from_epoch_millis(
            millis,
            parse_decimal("open", &open)?,
            parse_decimal("high", &high)?,
            parse_decimal("low", &low)?,
            parse_decimal("close", &close)?,
            parse_decimal("volume", &volume)?,
        )
        .ok_or_else(|| FetchError::ResponseFormatChanged(format!("invalid timestamp: {time}")))
    }
}

fn parse_decimal(field: &str, raw: &str) -> Result<f64, FetchError> {
    raw.parse::<f64>()
        .map_err(|_| FetchError::ResponseFormatChanged(format!("{field} is not a number: '{raw}'")))
}

impl DataProvider for KrakenProvider {
    fn name(&self) -> &str {
        "kraken"
    }

    fn fetch(
        &self,
        pair: &TradingPair,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<BarSeries, FetchError> {
        if limit == 0 {
            return Err(FetchError::InvalidLimit);
        }

        let url = self.ohlc_url(pair, timeframe);
        self.throttle.acquire();
        tracing::debug!(%url, %pair, %timeframe, limit, "requesting OHLC");

        let resp = self.client.get(&url).send().map_err(|e| {
            tracing::warn!(%pair, %timeframe, error = %e, "OHLC request failed");
            FetchError::NetworkUnreachable(e.to_string())
        })?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!(%pair, %timeframe, status = status.as_u16(), "OHLC request rate limited");
            return Err(FetchError::RateLimited(format!("HTTP {status}")));
        }
        if !status.is_success() {
            tracing::warn!(%pair, %timeframe, status = status.as_u16(), "OHLC request rejected");
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let body: OhlcResponse = resp.json().map_err(|e| {
            FetchError::ResponseFormatChanged(format!("failed to decode OHLC response for {pair}: {e}"))
        })?;

        let bars = Self::parse_response(pair, body)?;
        let series = BarSeries::new(pair.clone(), timeframe, bars)
            .and_then(|s| s.tail(limit))
            .map_err(|e| FetchError::from_series(e, pair, timeframe))?;

        tracing::debug!(%pair, %timeframe, bars = series.len(), "OHLC fetched");
        Ok(series)
    }
}
