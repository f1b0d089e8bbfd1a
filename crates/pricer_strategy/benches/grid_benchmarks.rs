//! Criterion benchmarks for pricer_strategy.
//!
//! Benchmarks cover:
//! - Full grid rebuild for a four-leg strategy, sequential vs Rayon rows
//! - Payoff curve over the default 1000-point axis

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::types::{OptionContract, OptionKind};
use pricer_strategy::grid::{GridConfig, GridEngine, ParallelConfig};
use pricer_strategy::{Direction, PayoffCurve, Strategy, DEFAULT_PAYOFF_SAMPLES};

/// Iron condor 45 days out.
fn iron_condor() -> Strategy {
    let leg = |strike: f64, kind: OptionKind, ask: f64| {
        OptionContract::builder("SPY", strike, kind)
            .quotes(ask - 0.05, ask)
            .implied_volatility(17.0)
            .days_to_expiration(45)
            .build()
    };
    let mut s = Strategy::new("SPY", 520.0, 0.045).with_dividend_yield(0.013);
    let legs = [
        (480.0, OptionKind::Put, 2.10, Direction::Long),
        (495.0, OptionKind::Put, 3.60, Direction::Short),
        (545.0, OptionKind::Call, 3.20, Direction::Short),
        (560.0, OptionKind::Call, 1.55, Direction::Long),
    ];
    for (strike, kind, ask, direction) in legs {
        s.add_leg(leg(strike, kind, ask), direction).unwrap();
    }
    s
}

/// Benchmark grid rebuilds with and without row parallelism.
fn bench_grid_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_build");
    let strategy = iron_condor();
    let now = NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();

    for (label, parallel) in [
        ("sequential", ParallelConfig::sequential()),
        ("rayon", ParallelConfig::new(true, 0)),
    ] {
        let engine = GridEngine::new(GridConfig {
            parallel,
            ..GridConfig::default()
        });
        group.bench_with_input(BenchmarkId::from_parameter(label), &strategy, |b, s| {
            b.iter(|| engine.build(black_box(s), now));
        });
    }

    group.finish();
}

/// Benchmark the expiration payoff curve.
fn bench_payoff_curve(c: &mut Criterion) {
    let strategy = iron_condor();
    c.bench_function("payoff_curve_default_axis", |b| {
        b.iter(|| PayoffCurve::with_default_axis(black_box(&strategy), DEFAULT_PAYOFF_SAMPLES))
    });
}

criterion_group!(benches, bench_grid_build, bench_payoff_curve);
criterion_main!(benches);
