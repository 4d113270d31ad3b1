//! BarSeries: the immutable, ordered result of one fetch.

use serde::Serialize;
use thiserror::Error;

use super::{Bar, Timeframe, TradingPair};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesError {
    #[error("bar series is empty")]
    Empty,

    #[error("bar timestamps must be strictly ascending (violated at index {index})")]
    NotAscending { index: usize },
}

/// Non-empty sequence of bars for one pair and timeframe, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    pair: TradingPair,
    timeframe: Timeframe,
    bars: Vec<Bar>,
}

impl BarSeries {
    pub fn new(pair: TradingPair, timeframe: Timeframe, bars: Vec<Bar>) -> Result<Self, SeriesError> {
        if bars.is_empty() {
            return Err(SeriesError::Empty);
        }
        if let Some(i) = bars
            .windows(2)
            .position(|w| w[1].timestamp <= w[0].timestamp)
        {
            return Err(SeriesError::NotAscending { index: i + 1 });
        }
        Ok(Self {
            pair,
            timeframe,
            bars,
        })
    }

    pub fn pair(&self) -> &TradingPair {
        &self.pair
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false for a constructed series.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Most recent bar.
    pub fn last(&self) -> &Bar {
        // Non-empty by construction.
        &self.bars[self.bars.len() - 1]
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Keep only the newest `limit` bars.
    pub fn tail(self, limit: usize) -> Result<Self, SeriesError> {
        let skip = self.bars.len().saturating_sub(limit);
        let bars = self.bars.into_iter().skip(skip).collect();
        Self::new(self.pair, self.timeframe, bars)
    }

    /// Drop the final bar. Fails if it was the only one.
    pub fn without_last(self) -> Result<Self, SeriesError> {
        let mut bars = self.bars;
        bars.pop();
        Self::new(self.pair, self.timeframe, bars)
    }

    pub fn into_bars(self) -> Vec<Bar> {
        self.bars
    }
}
