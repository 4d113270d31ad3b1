//! Bar: one OHLCV sample from the venue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV bar for a single trading interval.
///
/// `timestamp` is the interval's open time. Prices are taken as delivered by
/// the venue; the OHLC ordering is assumed, not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// Build a bar from a millisecond epoch timestamp.
    ///
    /// Returns `None` when the timestamp is out of chrono's range.
    pub fn from_epoch_millis(
        millis: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Option<Self> {
        let timestamp = DateTime::from_timestamp_millis(millis)?;
        Some(Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// Millisecond epoch of the bar's open time.
    pub fn epoch_millis(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }

    /// Returns true if every price and the volume are finite.
    pub fn is_finite(&self) -> bool {
        self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
            && self.volume.is_finite()
    }

    /// Basic OHLCV sanity check: low <= open/close <= high, positive prices.
    ///
    /// Diagnostic only; nothing in the pipeline rejects bars on this.
    pub fn is_sane(&self) -> bool {
        if !self.is_finite() {
            return false;
        }
        self.low <= self.open
            && self.open <= self.high
            && self.low <= self.close
            && self.close <= self.high
            && self.low > 0.0
            && self.volume >= 0.0
    }

    /// Returns true if close >= open.
    pub fn is_up(&self) -> bool {
        self.close >= self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bar() -> Bar {
        Bar::from_epoch_millis(1_704_153_600_000, 100.0, 105.0, 98.0, 103.0, 12.5).unwrap()
    }

    #[test]
    fn epoch_millis_roundtrips_through_timestamp() {
        let bar = sample_bar();
        assert_eq!(bar.epoch_millis(), 1_704_153_600_000);
        assert_eq!(bar.timestamp.to_rfc3339(), "2024-01-02T00:00:00+00:00");
    }

    #[test]
    fn bar_is_sane() {
        assert!(sample_bar().is_sane());
    }

    #[test]
    fn bar_detects_non_finite() {
        let mut bar = sample_bar();
        bar.close = f64::NAN;
        assert!(!bar.is_finite());
        assert!(!bar.is_sane());
    }

    #[test]
    fn bar_detects_insane_high_low() {
        let mut bar = sample_bar();
        bar.high = 97.0;
        assert!(!bar.is_sane());
    }

    #[test]
    fn up_and_down_bars() {
        let mut bar = sample_bar();
        assert!(bar.is_up());
        bar.close = 99.0;
        assert!(!bar.is_up());
    }
}
