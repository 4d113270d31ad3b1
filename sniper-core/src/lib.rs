//! Sniper Core: domain types, candle fetching, indicators and the pullback signal.
//!
//! This crate contains the computational heart of the dashboard:
//! - Domain types (bars, timeframes, trading pairs, bar series)
//! - Candle providers (Kraken public OHLC, static fixtures) behind `DataProvider`
//! - EMA and ATR indicators and the `annotate` engine
//! - The pullback signal evaluator

pub mod annotate;
pub mod data;
pub mod domain;
pub mod indicators;
pub mod signal;
pub mod synthetic;

pub use annotate::{annotate, AnnotatedBar, AnnotatedSeries, ComputationError, IndicatorParams};
pub use data::{DataProvider, FetchError, FormingBarPolicy};
pub use domain::{Bar, BarSeries, Timeframe, TradingPair};
pub use signal::{evaluate, evaluate_with_threshold, Signal, PULLBACK_THRESHOLD_PCT};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: types handed across the TUI/CLI boundary are Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<Bar>();
        require_sync::<Bar>();
        require_send::<BarSeries>();
        require_sync::<BarSeries>();
        require_send::<AnnotatedSeries>();
        require_sync::<AnnotatedSeries>();
        require_send::<Signal>();
        require_sync::<Signal>();
        require_send::<FetchError>();
        require_sync::<FetchError>();
        require_send::<data::KrakenProvider>();
        require_sync::<data::KrakenProvider>();
        require_send::<data::StaticProvider>();
        require_sync::<data::StaticProvider>();
    }

    /// Architecture contract: the evaluator sees annotated series only, never a provider.
    #[test]
    fn evaluate_takes_annotated_series_only() {
        fn _check(daily: &AnnotatedSeries, h4: &AnnotatedSeries) -> Signal {
            evaluate(daily, h4)
        }
    }
}
