//! Worked examples from the calculators' documentation.

use approx::assert_relative_eq;
use optcalc_core::types::{OptionType, PricingError};
use optcalc_models::calculators::{
    compute_breakeven, compute_margin_scenario, compute_max_pain, compute_roi_metrics,
    compute_sharpe_ratio, compute_sortino_ratio,
};
use optcalc_models::open_interest::{MaxPainTable, OpenInterestRow};
use optcalc_models::scenarios::{MarginScenario, SortinoRating};

#[test]
fn test_max_pain_example_table() {
    let table = MaxPainTable::new(vec![
        OpenInterestRow::new(100.0, 5000.0, 7000.0),
        OpenInterestRow::new(105.0, 6500.0, 5500.0),
        OpenInterestRow::new(110.0, 8000.0, 3000.0),
        OpenInterestRow::new(115.0, 3500.0, 4500.0),
        OpenInterestRow::new(120.0, 2000.0, 9000.0),
    ])
    .unwrap();
    assert_eq!(compute_max_pain(&table), 100.0);
}

#[test]
fn test_breakeven_example() {
    assert_relative_eq!(compute_breakeven(OptionType::Call, 500.0, 5.50).unwrap(), 505.50);
    assert_relative_eq!(compute_breakeven(OptionType::Put, 500.0, 5.50).unwrap(), 494.50);
}

#[test]
fn test_roi_example() {
    let m = compute_roi_metrics(1000.0, 250.0, 30.0).unwrap();
    assert_eq!(format!("{:.2}", m.roi), "25.00");
    assert_eq!(format!("{:.2}", m.premium_per_day), "8.33");
    assert_eq!(format!("{:.2}", m.annualized_roi), "304.17");
}

#[test]
fn test_margin_example() {
    let r = compute_margin_scenario(MarginScenario {
        initial_capital: 10_000.0,
        margin_loan: 10_000.0,
        annual_interest_rate_pct: 8.0,
        duration_days: 365.0,
        price_change_pct: 10.0,
    })
    .unwrap();
    assert_relative_eq!(r.interest_cost, 800.0, epsilon = 1e-9);
    assert_relative_eq!(r.profit_without_margin, 1000.0, epsilon = 1e-9);
    assert_relative_eq!(r.net_profit_with_margin, 1200.0, epsilon = 1e-9);
}

#[test]
fn test_zero_deviation_is_undefined() {
    let sharpe = compute_sharpe_ratio(10.0, 2.0, 0.0).unwrap_err();
    let sortino = compute_sortino_ratio(10.0, 2.0, 0.0).unwrap_err();
    assert_eq!(PricingError::from(sharpe).code(), "invalid_input");
    assert_eq!(PricingError::from(sortino).code(), "invalid_input");
}

#[test]
fn test_sortino_rating() {
    let ratio = compute_sortino_ratio(15.0, 3.0, 8.0).unwrap();
    assert_relative_eq!(ratio, 1.5);
    assert_eq!(SortinoRating::from_ratio(ratio), SortinoRating::Good);
}
