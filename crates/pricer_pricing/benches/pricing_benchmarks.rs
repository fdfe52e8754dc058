//! Criterion benchmarks for the Garman-Kohlhagen pricing engine.
//!
//! Benchmarks cover:
//! - Single trade pricing (call and put)
//! - Sequential pricing of portfolios of varying size

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_models::instruments::FxOptionTrade;
use pricer_models::validation::{validate, RawRecord};
use pricer_pricing::{price, DegeneratePolicy, PricingEngine};

fn synthetic_trade(i: usize) -> FxOptionTrade {
    let record = RawRecord::new(i)
        .with("trade_id", format!("B{}", i))
        .with("currency_pair", "EUR/USD")
        .with("notional", 1_000_000.0 * if i % 2 == 0 { 1.0 } else { -1.0 })
        .with("notional_currency", "EUR")
        .with("strike", 1.00 + (i % 40) as f64 * 0.005)
        .with("spot", 1.08)
        .with("volatility", 0.05 + (i % 10) as f64 * 0.01)
        .with("domestic_rate", 0.045)
        .with("foreign_rate", 0.03)
        .with("time_to_expiry", 0.1 + (i % 20) as f64 * 0.1)
        .with("option_type", if i % 3 == 0 { "put" } else { "call" });
    match validate(&record) {
        Ok(trade) => trade,
        Err(reason) => panic!("synthetic trade {} rejected: {}", i, reason),
    }
}

/// Benchmark single trade pricing.
fn bench_single_trade(c: &mut Criterion) {
    let mut group = c.benchmark_group("gk_single_trade");
    let call = synthetic_trade(1);
    let put = synthetic_trade(0);

    group.bench_function("call", |b| b.iter(|| price(black_box(&call))));
    group.bench_function("put", |b| b.iter(|| price(black_box(&put))));
    group.finish();
}

/// Benchmark sequential portfolio pricing.
fn bench_portfolio(c: &mut Criterion) {
    let mut group = c.benchmark_group("gk_portfolio");
    let engine = PricingEngine::new(DegeneratePolicy::Reject);

    for size in [100, 1_000, 10_000] {
        let trades: Vec<FxOptionTrade> = (0..size).map(synthetic_trade).collect();
        group.bench_with_input(BenchmarkId::new("sequential", size), &trades, |b, trades| {
            b.iter(|| {
                trades
                    .iter()
                    .filter_map(|t| engine.price(black_box(t)).ok())
                    .count()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_trade, bench_portfolio);
criterion_main!(benches);
