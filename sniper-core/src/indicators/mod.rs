//! Indicator implementations: EMA trend filter and ATR volatility gauge.
//!
//! Indicators are pure functions: bar history in, numeric series out. Each
//! output has the same length as its input and uses `f64::NAN` for warm-up rows.
//!
//! # Look-ahead contamination guard
//! No value at bar t may depend on bar t+1 or later. Both indicators are
//! checked with the truncated-vs-full series test.

pub mod atr;
pub mod ema;

pub use atr::{rolling_mean, true_range, Atr};
pub use ema::{ema_of_series, Ema};

use crate::domain::Bar;

pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "ema_20", "atr_14").
    fn name(&self) -> &str;

    /// Number of leading rows that are NaN (warm-up).
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    fn compute(&self, bars: &[Bar]) -> Vec<f64>;
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
