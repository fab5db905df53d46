//! Criterion benchmarks for optcalc_models.
//!
//! Measures Greeks evaluation under both CDFs and the implied-volatility
//! solver in each mode.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use optcalc_core::types::OptionType;
use optcalc_models::analytical::{BlackScholes, CdfApproximation, IvSolverMode};
use optcalc_models::calculators::Calculator;
use optcalc_models::instruments::{ImpliedVolatilityQuery, OptionParameters};
use optcalc_models::CalculatorConfig;

fn atm_call() -> OptionParameters {
    OptionParameters {
        underlying_price: 100.0,
        strike_price: 100.0,
        days_to_expiration: 90.0,
        volatility: 0.25,
        risk_free_rate: 0.05,
        option_type: OptionType::Call,
    }
}

/// Benchmark raw Greeks under each CDF.
fn bench_greeks(c: &mut Criterion) {
    let mut group = c.benchmark_group("greeks");

    for cdf in [CdfApproximation::AbramowitzStegun, CdfApproximation::Reference] {
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.25).unwrap().with_cdf(cdf);
        group.bench_with_input(BenchmarkId::new("raw", format!("{:?}", cdf)), &bs, |b, bs| {
            b.iter(|| bs.greeks(black_box(OptionType::Call), black_box(105.0), black_box(0.25)));
        });
    }

    let calc = Calculator::default();
    group.bench_function("facade", |b| {
        let params = atm_call();
        b.iter(|| calc.greeks(black_box(&params)).unwrap());
    });

    group.finish();
}

/// Benchmark implied volatility in each solver mode.
fn bench_implied_volatility(c: &mut Criterion) {
    let mut group = c.benchmark_group("implied_volatility");

    for mode in [IvSolverMode::Faithful, IvSolverMode::Safeguarded] {
        let calc = Calculator::new(CalculatorConfig {
            iv_solver: mode,
            ..Default::default()
        })
        .unwrap();
        let observed = calc.price(&atm_call()).unwrap();
        let query = ImpliedVolatilityQuery::from((atm_call(), observed * 1.1));

        group.bench_with_input(
            BenchmarkId::new("solve", format!("{:?}", mode)),
            &query,
            |b, query| {
                b.iter(|| calc.implied_volatility(black_box(query)).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_greeks, bench_implied_volatility);
criterion_main!(benches);
