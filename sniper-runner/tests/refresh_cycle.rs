//! Integration tests for the refresh cycle.
//!
//! Every test drives `run_cycle` with a scripted in-memory provider, so the
//! fetch outcomes and the legs actually requested are fully controlled.

use chrono::{DateTime, Duration, Utc};
use sniper_core::data::StaticProvider;
use sniper_core::synthetic::{base_timestamp, bars_from_closes};
use sniper_core::{FetchError, Timeframe, TradingPair};
use sniper_runner::{run_cycle, save_snapshot_csv, snapshot_json, CycleError, DashboardConfig, LegConfig};

fn eth() -> TradingPair {
    "ETH/USD".parse().unwrap()
}

fn later() -> DateTime<Utc> {
    base_timestamp() + Duration::days(365)
}

fn rising_daily() -> Vec<f64> {
    (100..=150).map(f64::from).collect()
}

/// 4H config with EMA period 3, so alpha = 0.5 and a two-bar series
/// `[c0, 100]` ends with EMA `(c0 + 100) / 2`.
fn short_ema_config() -> DashboardConfig {
    DashboardConfig {
        intraday: LegConfig {
            limit: 100,
            ema_period: 3,
        },
        ..DashboardConfig::default()
    }
}

#[test]
fn rising_daily_closes_are_bullish() {
    let provider = StaticProvider::new()
        .with_bars(Timeframe::OneDay, bars_from_closes(&rising_daily(), Timeframe::OneDay))
        .with_bars(Timeframe::FourHours, bars_from_closes(&[149.0, 150.0], Timeframe::FourHours));

    let snap = run_cycle(&provider, &DashboardConfig::default(), &eth(), later()).unwrap();

    assert_eq!(snap.daily.len(), 51);
    assert!(snap.signal.trend_is_bullish);
    assert!(snap.signal.daily_ema < 150.0);
    assert_eq!(snap.signal.trend_label(), "Bull");
}

#[test]
fn falling_daily_closes_are_bearish() {
    let falling: Vec<f64> = rising_daily().into_iter().rev().collect();
    let provider = StaticProvider::new()
        .with_bars(Timeframe::OneDay, bars_from_closes(&falling, Timeframe::OneDay))
        .with_bars(Timeframe::FourHours, bars_from_closes(&[101.0, 100.0], Timeframe::FourHours));

    let snap = run_cycle(&provider, &DashboardConfig::default(), &eth(), later()).unwrap();
    assert!(!snap.signal.trend_is_bullish);
    assert!(snap.signal.summary_note().starts_with("Daily trend down"));
}

#[test]
fn two_percent_from_ema_is_in_range() {
    let provider = StaticProvider::new()
        .with_bars(Timeframe::OneDay, bars_from_closes(&rising_daily(), Timeframe::OneDay))
        .with_bars(Timeframe::FourHours, bars_from_closes(&[96.0, 100.0], Timeframe::FourHours));

    let snap = run_cycle(&provider, &short_ema_config(), &eth(), later()).unwrap();

    assert_eq!(snap.signal.current_price, 100.0);
    assert!((snap.signal.h4_ema - 98.0).abs() < 1e-9);
    assert!((snap.signal.distance_pct - 2.0).abs() < 1e-9);
    assert!(snap.signal.in_pullback_range);
}

#[test]
fn ten_percent_from_ema_is_waiting() {
    let provider = StaticProvider::new()
        .with_bars(Timeframe::OneDay, bars_from_closes(&rising_daily(), Timeframe::OneDay))
        .with_bars(Timeframe::FourHours, bars_from_closes(&[80.0, 100.0], Timeframe::FourHours));

    let snap = run_cycle(&provider, &short_ema_config(), &eth(), later()).unwrap();

    assert!((snap.signal.h4_ema - 90.0).abs() < 1e-9);
    assert!((snap.signal.distance_pct - 10.0).abs() < 1e-9);
    assert!(!snap.signal.in_pullback_range);
    assert_eq!(snap.signal.pullback_label(), "waiting");
}

#[test]
fn empty_daily_fetch_halts_before_intraday() {
    let provider = StaticProvider::new()
        .with_bars(Timeframe::FourHours, bars_from_closes(&[1.0, 2.0], Timeframe::FourHours));

    let err = run_cycle(&provider, &DashboardConfig::default(), &eth(), later()).unwrap_err();

    assert!(matches!(err, CycleError::DailyFetch(FetchError::Empty { .. })));
    assert_eq!(provider.requested(), vec![Timeframe::OneDay]);
    assert!(err.user_message().starts_with("could not fetch daily candles"));
}

#[test]
fn daily_network_failure_never_requests_intraday() {
    let provider = StaticProvider::new()
        .with_error(Timeframe::OneDay, FetchError::NetworkUnreachable("connection refused".into()))
        .with_bars(Timeframe::FourHours, bars_from_closes(&[1.0, 2.0], Timeframe::FourHours));

    let err = run_cycle(&provider, &DashboardConfig::default(), &eth(), later()).unwrap_err();

    assert!(matches!(err, CycleError::DailyFetch(FetchError::NetworkUnreachable(_))));
    assert_eq!(provider.requested(), vec![Timeframe::OneDay]);
}

#[test]
fn intraday_failure_reports_loaded_daily() {
    let provider = StaticProvider::new()
        .with_bars(Timeframe::OneDay, bars_from_closes(&rising_daily(), Timeframe::OneDay))
        .with_error(Timeframe::FourHours, FetchError::RateLimited("EAPI:Rate limit exceeded".into()));

    let err = run_cycle(&provider, &DashboardConfig::default(), &eth(), later()).unwrap_err();

    assert!(matches!(err, CycleError::IntradayFetch(FetchError::RateLimited(_))));
    assert_eq!(provider.requested(), vec![Timeframe::OneDay, Timeframe::FourHours]);
    assert!(err
        .user_message()
        .starts_with("daily candles loaded, but the 4H fetch failed"));
}

#[test]
fn non_finite_daily_close_is_a_computation_error() {
    let mut bars = bars_from_closes(&rising_daily(), Timeframe::OneDay);
    bars[10].close = f64::NAN;
    let provider = StaticProvider::new()
        .with_bars(Timeframe::OneDay, bars)
        .with_bars(Timeframe::FourHours, bars_from_closes(&[1.0, 2.0], Timeframe::FourHours));

    let err = run_cycle(&provider, &DashboardConfig::default(), &eth(), later()).unwrap_err();

    assert!(matches!(
        err,
        CycleError::Computation {
            leg: sniper_runner::Leg::Daily,
            ..
        }
    ));
    assert_eq!(provider.requested(), vec![Timeframe::OneDay]);
}

#[test]
fn limits_come_from_config() {
    let closes: Vec<f64> = (0..300).map(|i| 100.0 + i as f64 * 0.1).collect();
    let provider = StaticProvider::new()
        .with_bars(Timeframe::OneDay, bars_from_closes(&closes, Timeframe::OneDay))
        .with_bars(Timeframe::FourHours, bars_from_closes(&closes, Timeframe::FourHours));

    let snap = run_cycle(&provider, &DashboardConfig::default(), &eth(), later()).unwrap();
    assert_eq!(snap.daily.len(), 100);
    assert_eq!(snap.intraday.len(), 100);
    assert_eq!(snap.signal.current_price, *closes.last().unwrap());
}

#[test]
fn repeated_cycles_are_identical() {
    let provider = StaticProvider::demo(3000.0);
    let config = DashboardConfig::default();

    let a = run_cycle(&provider, &config, &eth(), later()).unwrap();
    let b = run_cycle(&provider, &config, &eth(), later()).unwrap();

    assert_eq!(a, b);
    assert_eq!(
        provider.requested(),
        vec![Timeframe::OneDay, Timeframe::FourHours, Timeframe::OneDay, Timeframe::FourHours]
    );
}

#[test]
fn snapshot_exports_json_and_csv() {
    let provider = StaticProvider::demo(150.0);
    let pair: TradingPair = "SOL/USD".parse().unwrap();
    let snap = run_cycle(&provider, &DashboardConfig::default(), &pair, later()).unwrap();

    let json: serde_json::Value = serde_json::from_str(&snapshot_json(&snap).unwrap()).unwrap();
    assert_eq!(json["pair"], "SOL/USD");
    assert_eq!(json["daily_ema_period"], 50);
    assert_eq!(json["h4_ema_period"], 20);
    assert_eq!(json["in_pullback_range"], snap.signal.in_pullback_range);

    let dir = tempfile::tempdir().unwrap();
    let paths = save_snapshot_csv(&snap, &dir.path().join("exports")).unwrap();
    assert_eq!(paths.len(), 2);
    assert!(paths[0].ends_with("SOL-USD_1d.csv"));
    assert!(paths[1].ends_with("SOL-USD_4h.csv"));
    let daily = std::fs::read_to_string(&paths[0]).unwrap();
    assert_eq!(daily.lines().count(), snap.daily.len() + 1);
}
