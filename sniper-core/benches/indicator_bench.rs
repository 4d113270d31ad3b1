//! Criterion benchmarks for the refresh hot path.
//!
//! Benchmarks:
//! 1. Annotate (EMA + ATR) at dashboard and larger series sizes
//! 2. Signal evaluation on pre-annotated series

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use sniper_core::synthetic::{series_from_closes, wave_closes};
use sniper_core::{annotate, evaluate, IndicatorParams, Timeframe, TradingPair};

fn bench_annotate(c: &mut Criterion) {
    let mut group = c.benchmark_group("annotate");
    let pair: TradingPair = "ETH/USD".parse().expect("valid pair");

    for &bar_count in &[100, 720, 5000] {
        let closes = wave_closes(bar_count, 3000.0, 0.5, 40.0);
        let series = series_from_closes(&pair, Timeframe::FourHours, &closes).expect("non-empty");
        group.bench_with_input(BenchmarkId::new("ema20_atr14", bar_count), &bar_count, |b, _| {
            b.iter(|| annotate(black_box(&series), IndicatorParams::with_ema(20)));
        });
    }

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let pair: TradingPair = "ETH/USD".parse().expect("valid pair");
    let daily = series_from_closes(&pair, Timeframe::OneDay, &wave_closes(100, 2500.0, 5.0, 80.0))
        .expect("non-empty");
    let h4 = series_from_closes(&pair, Timeframe::FourHours, &wave_closes(100, 2900.0, 1.0, 30.0))
        .expect("non-empty");
    let daily = annotate(&daily, IndicatorParams::with_ema(50)).expect("annotated");
    let h4 = annotate(&h4, IndicatorParams::with_ema(20)).expect("annotated");

    c.bench_function("evaluate_signal", |b| {
        b.iter(|| evaluate(black_box(&daily), black_box(&h4)));
    });
}

criterion_group!(benches, bench_annotate, bench_evaluate);
criterion_main!(benches);
