//! Pullback signal: daily trend filter plus 4H distance to the EMA.
//!
//! Reads only the most recent row of each annotated series. Evaluation has no
//! error path: both inputs are non-empty by construction.

use serde::{Deserialize, Serialize};

use crate::annotate::AnnotatedSeries;

/// Maximum distance from the 4H EMA, in percent, that counts as a pullback.
pub const PULLBACK_THRESHOLD_PCT: f64 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Latest daily close strictly above the latest daily EMA.
    pub trend_is_bullish: bool,
    /// `|h4_close - h4_ema| / h4_close * 100`.
    pub distance_pct: f64,
    /// `distance_pct <= threshold_pct`.
    pub in_pullback_range: bool,
    pub threshold_pct: f64,
    /// Latest 4H close.
    pub current_price: f64,
    pub daily_close: f64,
    pub daily_ema: f64,
    pub h4_ema: f64,
    /// Latest 4H ATR; `None` while the ATR window is still filling.
    pub atr: Option<f64>,
}

impl Signal {
    pub fn trend_label(&self) -> &'static str {
        if self.trend_is_bullish {
            "Bull"
        } else {
            "Bear"
        }
    }

    pub fn pullback_label(&self) -> &'static str {
        if self.in_pullback_range {
            "in range"
        } else {
            "waiting"
        }
    }

    /// One-line strategy status shown under the chart.
    pub fn summary_note(&self) -> String {
        format!(
            "Daily trend {} | 4H distance to EMA {:.2}%",
            if self.trend_is_bullish { "up" } else { "down" },
            self.distance_pct
        )
    }
}

pub fn pullback_distance_pct(price: f64, ema: f64) -> f64 {
    (price - ema).abs() / price * 100.0
}

pub fn is_in_pullback_range(distance_pct: f64, threshold_pct: f64) -> bool {
    distance_pct <= threshold_pct
}

/// Evaluate with the default 2.5% pullback threshold.
pub fn evaluate(daily: &AnnotatedSeries, h4: &AnnotatedSeries) -> Signal {
    evaluate_with_threshold(daily, h4, PULLBACK_THRESHOLD_PCT)
}

pub fn evaluate_with_threshold(daily: &AnnotatedSeries, h4: &AnnotatedSeries, threshold_pct: f64) -> Signal {
    let daily_last = daily.last();
    let h4_last = h4.last();

    let current_price = h4_last.bar.close;
    let distance_pct = pullback_distance_pct(current_price, h4_last.ema);

    Signal {
        trend_is_bullish: daily_last.bar.close > daily_last.ema,
        distance_pct,
        in_pullback_range: is_in_pullback_range(distance_pct, threshold_pct),
        threshold_pct,
        current_price,
        daily_close: daily_last.bar.close,
        daily_ema: daily_last.ema,
        h4_ema: h4_last.ema,
        atr: h4_last.atr,
    }
}
