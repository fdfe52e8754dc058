//! Criterion benchmarks for the portfolio pipeline.
//!
//! Benchmarks cover:
//! - Full validate → price → normalise → aggregate runs of varying size
//! - Sequential versus rayon-parallel execution
//! - Aggregation alone over pre-normalised trades

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::types::Currency;
use pricer_models::validation::RawRecord;
use pricer_risk::aggregation::{aggregate, GroupKey};
use pricer_risk::normalization::FxRateTable;
use pricer_risk::parallel::ParallelConfig;
use pricer_risk::pipeline::{run_portfolio, PipelineConfig};

const PAIRS: [(&str, &str, f64); 4] = [
    ("EUR/USD", "EUR", 1.08),
    ("USD/JPY", "USD", 148.0),
    ("GBP/USD", "GBP", 1.27),
    ("EUR/GBP", "EUR", 0.85),
];

/// Generate a synthetic book of raw records.
fn synthetic_records(n: usize) -> Vec<RawRecord> {
    (0..n)
        .map(|i| {
            let (pair, base, spot) = PAIRS[i % PAIRS.len()];
            RawRecord::new(i)
                .with("trade_id", format!("T{:06}", i))
                .with("currency_pair", pair)
                .with("notional", if i % 2 == 0 { 1_000_000.0 } else { -500_000.0 })
                .with("notional_currency", base)
                .with("strike", spot * (0.9 + (i % 20) as f64 * 0.01))
                .with("spot", spot)
                .with("volatility", 0.05 + (i % 10) as f64 * 0.01)
                .with("domestic_rate", 0.03)
                .with("foreign_rate", 0.02)
                .with("time_to_expiry", 0.25 + (i % 8) as f64 * 0.25)
                .with("option_type", if i % 3 == 0 { "put" } else { "call" })
        })
        .collect()
}

fn rates() -> FxRateTable {
    FxRateTable::from_rates([
        (Currency::EUR, 1.08),
        (Currency::GBP, 1.27),
        (Currency::JPY, 1.0 / 148.0),
    ])
    .unwrap_or_default()
}

/// Benchmark full pipeline runs, sequential and parallel.
fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let table = rates();

    for n in [100, 1_000, 10_000] {
        let records = synthetic_records(n);

        let sequential = PipelineConfig {
            parallel: ParallelConfig::sequential(),
            ..PipelineConfig::default()
        };
        group.bench_with_input(BenchmarkId::new("sequential", n), &records, |b, records| {
            b.iter(|| run_portfolio(black_box(records), &table, &sequential));
        });

        let parallel = PipelineConfig {
            parallel: ParallelConfig::new(64, 0),
            ..PipelineConfig::default()
        };
        group.bench_with_input(BenchmarkId::new("parallel", n), &records, |b, records| {
            b.iter(|| run_portfolio(black_box(records), &table, &parallel));
        });
    }

    group.finish();
}

/// Benchmark aggregation alone.
fn bench_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation");
    let run = run_portfolio(&synthetic_records(10_000), &rates(), &PipelineConfig::default());

    for keys in [
        vec![GroupKey::CurrencyPair],
        vec![GroupKey::QuoteCurrency, GroupKey::OptionType],
    ] {
        let label = keys.iter().map(|k| k.as_str()).collect::<Vec<_>>().join("+");
        group.bench_with_input(BenchmarkId::new("group_by", label), &keys, |b, keys| {
            b.iter(|| aggregate(black_box(&run.trades), keys));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline, bench_aggregation);
criterion_main!(benches);
