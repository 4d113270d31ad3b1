//! Synthetic bars for tests, benches and offline demo runs.
//!
//! Generates plausible OHLCV from close prices: open = prev_close (or close for
//! the first bar), high = max(open, close) + 1.0, low = min(open, close) - 1.0,
//! volume = 1000. Bars start at 2024-01-02 00:00 UTC and are spaced one
//! timeframe apart.

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::{Bar, BarSeries, SeriesError, Timeframe, TradingPair};

/// Open time of the first synthetic bar.
pub fn base_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

pub fn bars_from_closes(closes: &[f64], timeframe: Timeframe) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                timestamp: base_timestamp() + timeframe.duration() * i as i32,
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}

/// Bars from explicit `(open, high, low, close)` tuples.
pub fn bars_from_ohlc(data: &[(f64, f64, f64, f64)], timeframe: Timeframe) -> Vec<Bar> {
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| Bar {
            timestamp: base_timestamp() + timeframe.duration() * i as i32,
            open,
            high,
            low,
            close,
            volume: 1000.0,
        })
        .collect()
}

pub fn series_from_closes(
    pair: &TradingPair,
    timeframe: Timeframe,
    closes: &[f64],
) -> Result<BarSeries, SeriesError> {
    BarSeries::new(pair.clone(), timeframe, bars_from_closes(closes, timeframe))
}

/// A gently trending, oscillating close path of `n` bars.
///
/// Deterministic; used by the offline demo and benches.
pub fn wave_closes(n: usize, start: f64, drift: f64, amplitude: f64) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            start + drift * t + amplitude * (t / 6.0).sin()
        })
        .collect()
}
