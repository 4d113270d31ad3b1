//! In-memory provider serving preloaded candles per timeframe.
//!
//! Used by tests to script fetch outcomes and by the offline demo mode. Every
//! call is recorded so callers can check which legs were requested.

use std::collections::HashMap;
use std::sync::Mutex;

use super::provider::{DataProvider, FetchError};
use crate::domain::{Bar, BarSeries, Timeframe, TradingPair};
use crate::synthetic::{bars_from_closes, wave_closes};

#[derive(Debug, Default)]
pub struct StaticProvider {
    responses: HashMap<Timeframe, Result<Vec<Bar>, FetchError>>,
    calls: Mutex<Vec<(TradingPair, Timeframe, usize)>>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `bars` for `timeframe`, whatever pair is asked for.
    pub fn with_bars(mut self, timeframe: Timeframe, bars: Vec<Bar>) -> Self {
        self.responses.insert(timeframe, Ok(bars));
        self
    }

    /// Fail every fetch of `timeframe` with `error`.
    pub fn with_error(mut self, timeframe: Timeframe, error: FetchError) -> Self {
        self.responses.insert(timeframe, Err(error));
        self
    }

    /// Deterministic daily and 4H waves around `price`, for offline runs.
    pub fn demo(price: f64) -> Self {
        let daily = wave_closes(100, price * 0.8, price * 0.002, price * 0.03);
        let intraday = wave_closes(100, price * 0.97, price * 0.0003, price * 0.01);
        Self::new()
            .with_bars(Timeframe::OneDay, bars_from_closes(&daily, Timeframe::OneDay))
            .with_bars(Timeframe::FourHours, bars_from_closes(&intraday, Timeframe::FourHours))
    }

    /// Demo data scaled to a rough price level for `pair`.
    pub fn demo_for(pair: &TradingPair) -> Self {
        let price = match pair.base() {
            "BTC" => 60_000.0,
            "ETH" => 3_000.0,
            "SOL" => 150.0,
            _ => 100.0,
        };
        Self::demo(price)
    }

    /// Timeframes requested so far, in call order.
    pub fn requested(&self) -> Vec<Timeframe> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .map(|(_, tf, _)| *tf)
            .collect()
    }
}

impl DataProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch(
        &self,
        pair: &TradingPair,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<BarSeries, FetchError> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((pair.clone(), timeframe, limit));

        if limit == 0 {
            return Err(FetchError::InvalidLimit);
        }

        let bars = match self.responses.get(&timeframe) {
            Some(Ok(bars)) => bars.clone(),
            Some(Err(e)) => return Err(e.clone()),
            None => Vec::new(),
        };

        BarSeries::new(pair.clone(), timeframe, bars)
            .and_then(|s| s.tail(limit))
            .map_err(|e| FetchError::from_series(e, pair, timeframe))
    }
}
