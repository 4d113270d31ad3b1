//! One refresh of the dashboard: daily leg, then 4H leg, then the signal.
//!
//! Steps run strictly in order and stop at the first failure, so a broken
//! daily fetch never triggers the 4H request.

use std::fmt;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use sniper_core::{
    annotate, evaluate_with_threshold, AnnotatedSeries, ComputationError, DataProvider, FetchError,
    Signal, Timeframe, TradingPair,
};

use crate::config::DashboardConfig;

/// Which half of the setup a step belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Leg {
    Daily,
    Intraday,
}

impl Leg {
    pub fn timeframe(self) -> Timeframe {
        match self {
            Leg::Daily => Timeframe::OneDay,
            Leg::Intraday => Timeframe::FourHours,
        }
    }
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.timeframe().label())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CycleError {
    #[error("daily fetch failed: {0}")]
    DailyFetch(FetchError),
    #[error("4H fetch failed: {0}")]
    IntradayFetch(FetchError),
    #[error("{leg} indicator computation failed: {source}")]
    Computation {
        leg: Leg,
        #[source]
        source: ComputationError,
    },
}

impl CycleError {
    /// Message for the status line. The two fetch legs read differently so a
    /// half-loaded refresh is recognisable at a glance.
    pub fn user_message(&self) -> String {
        match self {
            CycleError::DailyFetch(e) => format!(
                "could not fetch daily candles ({e}). Kraken may be busy, refresh again shortly."
            ),
            CycleError::IntradayFetch(e) => {
                format!("daily candles loaded, but the 4H fetch failed ({e}).")
            }
            CycleError::Computation { leg, source } => {
                format!("could not compute {leg} indicators ({source}).")
            }
        }
    }

    pub fn leg(&self) -> Leg {
        match self {
            CycleError::DailyFetch(_) => Leg::Daily,
            CycleError::IntradayFetch(_) => Leg::Intraday,
            CycleError::Computation { leg, .. } => *leg,
        }
    }
}

/// Everything a surface needs to render one refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub pair: TradingPair,
    pub fetched_at: DateTime<Utc>,
    pub daily: AnnotatedSeries,
    pub intraday: AnnotatedSeries,
    pub signal: Signal,
}

fn run_leg(
    provider: &dyn DataProvider,
    config: &DashboardConfig,
    pair: &TradingPair,
    leg: Leg,
    now: DateTime<Utc>,
) -> Result<AnnotatedSeries, CycleError> {
    let timeframe = leg.timeframe();
    let fetch_failed = |e: FetchError| match leg {
        Leg::Daily => CycleError::DailyFetch(e),
        Leg::Intraday => CycleError::IntradayFetch(e),
    };

    let limit = config.leg(timeframe).limit;
    let series = provider
        .fetch(pair, timeframe, limit)
        .and_then(|s| config.forming_bar.apply(s, now))
        .map_err(fetch_failed)?;
    tracing::debug!(%pair, %timeframe, bars = series.len(), "fetched");

    annotate(&series, config.indicator_params(timeframe))
        .map_err(|source| CycleError::Computation { leg, source })
}

/// Run a full refresh for `pair`.
pub fn run_cycle(
    provider: &dyn DataProvider,
    config: &DashboardConfig,
    pair: &TradingPair,
    now: DateTime<Utc>,
) -> Result<DashboardSnapshot, CycleError> {
    let started = Instant::now();
    tracing::info!(%pair, provider = provider.name(), "refresh started");

    let result = run_leg(provider, config, pair, Leg::Daily, now).and_then(|daily| {
        let intraday = run_leg(provider, config, pair, Leg::Intraday, now)?;
        let signal = evaluate_with_threshold(&daily, &intraday, config.pullback_threshold_pct);
        Ok(DashboardSnapshot {
            pair: pair.clone(),
            fetched_at: now,
            daily,
            intraday,
            signal,
        })
    });

    let elapsed_ms = started.elapsed().as_millis() as u64;
    match &result {
        Ok(snapshot) => tracing::info!(
            %pair,
            elapsed_ms,
            trend = snapshot.signal.trend_label(),
            distance_pct = snapshot.signal.distance_pct,
            in_range = snapshot.signal.in_pullback_range,
            "refresh complete"
        ),
        Err(e) => tracing::warn!(%pair, elapsed_ms, leg = %e.leg(), error = %e, "refresh failed"),
    }
    result
}
