//! Indicator engine: turns a fetched `BarSeries` into an `AnnotatedSeries`.
//!
//! The input series is never modified. The output carries its own copy of the
//! bars plus one EMA value and one optional ATR value per row.

use serde::Serialize;
use thiserror::Error;

use crate::domain::{Bar, BarSeries, Timeframe, TradingPair};
use crate::indicators::{Atr, Ema, Indicator};

/// ATR period used throughout the dashboard.
pub const DEFAULT_ATR_PERIOD: usize = 14;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ComputationError {
    #[error("{indicator} period must be >= 1")]
    InvalidPeriod { indicator: &'static str },

    #[error("non-finite {field} at row {index}")]
    NonFinite { index: usize, field: &'static str },

    #[error("{indicator} produced {actual} values for {expected} bars")]
    ShapeMismatch {
        indicator: String,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndicatorParams {
    pub ema_period: usize,
    pub atr_period: usize,
}

impl IndicatorParams {
    /// EMA period with the default ATR period.
    pub fn with_ema(ema_period: usize) -> Self {
        Self {
            ema_period,
            atr_period: DEFAULT_ATR_PERIOD,
        }
    }
}

/// One row of an annotated series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotatedBar<'a> {
    pub bar: &'a Bar,
    pub ema: f64,
    /// `None` during the ATR warm-up.
    pub atr: Option<f64>,
}

/// A bar series with EMA and ATR columns. Only `annotate` builds one, so it
/// is always non-empty and its columns have the series' length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedSeries {
    series: BarSeries,
    params: IndicatorParams,
    ema: Vec<f64>,
    atr: Vec<Option<f64>>,
}

impl AnnotatedSeries {
    pub fn series(&self) -> &BarSeries {
        &self.series
    }

    pub fn pair(&self) -> &TradingPair {
        self.series.pair()
    }

    pub fn timeframe(&self) -> Timeframe {
        self.series.timeframe()
    }

    pub fn params(&self) -> IndicatorParams {
        self.params
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn ema(&self) -> &[f64] {
        &self.ema
    }

    pub fn atr(&self) -> &[Option<f64>] {
        &self.atr
    }

    pub fn row(&self, index: usize) -> Option<AnnotatedBar<'_>> {
        let bar = self.series.bars().get(index)?;
        Some(AnnotatedBar {
            bar,
            ema: self.ema[index],
            atr: self.atr[index],
        })
    }

    /// Most recent row.
    pub fn last(&self) -> AnnotatedBar<'_> {
        let index = self.len() - 1;
        AnnotatedBar {
            bar: self.series.last(),
            ema: self.ema[index],
            atr: self.atr[index],
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = AnnotatedBar<'_>> {
        self.series
            .bars()
            .iter()
            .zip(self.ema.iter().zip(self.atr.iter()))
            .map(|(bar, (&ema, &atr))| AnnotatedBar { bar, ema, atr })
    }
}

/// Compute the EMA and ATR columns for a series.
///
/// Deterministic: the same series and parameters always give the same output.
pub fn annotate(series: &BarSeries, params: IndicatorParams) -> Result<AnnotatedSeries, ComputationError> {
    if params.ema_period == 0 {
        return Err(ComputationError::InvalidPeriod { indicator: "EMA" });
    }
    if params.atr_period == 0 {
        return Err(ComputationError::InvalidPeriod { indicator: "ATR" });
    }
    check_finite(series.bars())?;

    let bars = series.bars();
    let ema = compute_checked(&Ema::new(params.ema_period), bars)?;
    let atr = compute_checked(&Atr::new(params.atr_period), bars)?
        .into_iter()
        .map(|v| if v.is_nan() { None } else { Some(v) })
        .collect();

    tracing::trace!(
        pair = %series.pair(),
        timeframe = %series.timeframe(),
        rows = series.len(),
        ema_period = params.ema_period,
        atr_period = params.atr_period,
        "annotated series"
    );

    Ok(AnnotatedSeries {
        series: series.clone(),
        params,
        ema,
        atr,
    })
}

fn check_finite(bars: &[Bar]) -> Result<(), ComputationError> {
    for (index, bar) in bars.iter().enumerate() {
        let fields = [
            ("open", bar.open),
            ("high", bar.high),
            ("low", bar.low),
            ("close", bar.close),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ComputationError::NonFinite { index, field });
        }
    }
    Ok(())
}

fn compute_checked(indicator: &dyn Indicator, bars: &[Bar]) -> Result<Vec<f64>, ComputationError> {
    let values = indicator.compute(bars);
    if values.len() != bars.len() {
        return Err(ComputationError::ShapeMismatch {
            indicator: indicator.name().to_string(),
            expected: bars.len(),
            actual: values.len(),
        });
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, true_range, DEFAULT_EPSILON};
    use crate::synthetic::{series_from_closes, wave_closes};
    use proptest::prelude::*;

    fn pair() -> TradingPair {
        "ETH/USD".parse().unwrap()
    }

    #[test]
    fn annotates_every_row() {
        let series = series_from_closes(&pair(), Timeframe::FourHours, &wave_closes(30, 100.0, 0.2, 2.0)).unwrap();
        let annotated = annotate(&series, IndicatorParams::with_ema(20)).unwrap();
        assert_eq!(annotated.len(), 30);
        assert_eq!(annotated.ema().len(), 30);
        assert_eq!(annotated.atr().len(), 30);
        assert_eq!(annotated.rows().count(), 30);
        assert_eq!(annotated.params().atr_period, 14);
    }

    #[test]
    fn atr_warmup_rows_are_none() {
        let series = series_from_closes(&pair(), Timeframe::FourHours, &wave_closes(20, 50.0, 0.0, 1.0)).unwrap();
        let annotated = annotate(&series, IndicatorParams::with_ema(20)).unwrap();
        assert!(annotated.atr()[..13].iter().all(Option::is_none));
        assert!(annotated.atr()[13..].iter().all(Option::is_some));
    }

    #[test]
    fn single_bar_series_has_ema_but_no_atr() {
        let series = series_from_closes(&pair(), Timeframe::OneDay, &[123.0]).unwrap();
        let annotated = annotate(&series, IndicatorParams::with_ema(50)).unwrap();
        let last = annotated.last();
        assert_approx(last.ema, 123.0, DEFAULT_EPSILON);
        assert_eq!(last.atr, None);
    }

    #[test]
    fn input_series_is_untouched() {
        let series = series_from_closes(&pair(), Timeframe::OneDay, &[1.0, 2.0, 3.0]).unwrap();
        let before = series.clone();
        let annotated = annotate(&series, IndicatorParams::with_ema(2)).unwrap();
        assert_eq!(series, before);
        assert_eq!(annotated.series(), &before);
    }

    #[test]
    fn zero_periods_are_rejected() {
        let series = series_from_closes(&pair(), Timeframe::OneDay, &[1.0]).unwrap();
        let err = annotate(&series, IndicatorParams { ema_period: 0, atr_period: 14 }).unwrap_err();
        assert_eq!(err, ComputationError::InvalidPeriod { indicator: "EMA" });
        let err = annotate(&series, IndicatorParams { ema_period: 20, atr_period: 0 }).unwrap_err();
        assert_eq!(err, ComputationError::InvalidPeriod { indicator: "ATR" });
    }

    #[test]
    fn non_finite_price_is_reported() {
        let mut bars = crate::synthetic::bars_from_closes(&[1.0, 2.0, 3.0], Timeframe::OneDay);
        bars[1].high = f64::INFINITY;
        let series = BarSeries::new(pair(), Timeframe::OneDay, bars).unwrap();
        let err = annotate(&series, IndicatorParams::with_ema(2)).unwrap_err();
        assert_eq!(err, ComputationError::NonFinite { index: 1, field: "high" });
    }

    #[test]
    fn row_out_of_range_is_none() {
        let series = series_from_closes(&pair(), Timeframe::OneDay, &[1.0, 2.0]).unwrap();
        let annotated = annotate(&series, IndicatorParams::with_ema(2)).unwrap();
        assert!(annotated.row(1).is_some());
        assert!(annotated.row(2).is_none());
    }

    fn ohlc_strategy() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(1.0f64..10_000.0, 1..120)
    }

    proptest! {
        #[test]
        fn ema_seed_equals_first_close(closes in ohlc_strategy(), period in 1usize..80) {
            let series = series_from_closes(&pair(), Timeframe::OneDay, &closes).unwrap();
            let annotated = annotate(&series, IndicatorParams::with_ema(period)).unwrap();
            prop_assert_eq!(annotated.ema()[0], closes[0]);
        }

        #[test]
        fn atr_is_window_mean_of_true_range(closes in ohlc_strategy(), period in 1usize..30) {
            let series = series_from_closes(&pair(), Timeframe::FourHours, &closes).unwrap();
            let annotated = annotate(&series, IndicatorParams { ema_period: 20, atr_period: period }).unwrap();
            let tr = true_range(series.bars());
            for (i, atr) in annotated.atr().iter().enumerate() {
                if i + 1 < period {
                    prop_assert!(atr.is_none());
                } else {
                    let mean = tr[i + 1 - period..=i].iter().sum::<f64>() / period as f64;
                    let value = atr.unwrap();
                    prop_assert!((value - mean).abs() <= 1e-9 * mean.abs().max(1.0));
                }
            }
        }

        #[test]
        fn first_true_range_is_bar_range(closes in ohlc_strategy()) {
            let series = series_from_closes(&pair(), Timeframe::OneDay, &closes).unwrap();
            let first = &series.bars()[0];
            prop_assert_eq!(true_range(series.bars())[0], (first.high - first.low).abs());
        }

        #[test]
        fn annotate_is_deterministic(closes in ohlc_strategy(), period in 1usize..60) {
            let series = series_from_closes(&pair(), Timeframe::FourHours, &closes).unwrap();
            let params = IndicatorParams::with_ema(period);
            prop_assert_eq!(annotate(&series, params).unwrap(), annotate(&series, params).unwrap());
        }
    }
}
