use std::collections::BTreeMap;

use super::common::*;
use crate::valuation::domain::{ComparisonFactorTable, ValidatedFactorTable};
use crate::valuation::{comparison, EvaluationError};

#[test]
fn averages_normalized_prices_and_scales_to_subject_area() {
    let input = validated();

    let result = comparison::compute(&input).expect("comparison value computes");

    // €3750/m² and €3983/m² average to €3866.50/m²; subject 200 m².
    assert_eq!(result.value, 3_866.5 * 200.0);
    assert!(result
        .protocol
        .iter()
        .any(|line| line.contains("€3866.50/m²")));
}

#[test]
fn matches_the_reference_subject_area_example() {
    let mut input = validated();
    input.areas.eligible = 120.0;

    let result = comparison::compute(&input).expect("computes");

    assert_eq!(result.value, 463_980.0);
}

#[test]
fn fails_without_comparison_transactions() {
    let mut input = validated();
    input.comparables.clear();

    match comparison::compute(&input) {
        Err(EvaluationError::MissingData(what)) => assert_eq!(what, "comparison transactions"),
        other => panic!("expected missing-data error, got {other:?}"),
    }
}

#[test]
fn scales_by_the_temporal_index_ratio() {
    let mut request = request();
    request.market_data.price_index = Some(datum(110.0));
    request.comparables[0].index_at_sale = Some(100.0);
    request.comparables[1].index_at_sale = Some(100.0);
    let input = crate::valuation::validate(request).expect("validates");

    let result = comparison::compute(&input).expect("computes");

    assert!((result.value - 3_866.5 * 1.1 * 200.0).abs() < 1e-6);
    assert!(result
        .protocol
        .iter()
        .any(|line| line.starts_with("Temporal adjustment")));
}

#[test]
fn leaves_prices_unscaled_without_a_sale_date_index() {
    let mut request = request();
    request.market_data.price_index = Some(datum(110.0));
    let input = crate::valuation::validate(request).expect("validates");

    let result = comparison::compute(&input).expect("computes");

    assert_eq!(result.value, 3_866.5 * 200.0);
}

#[test]
fn rejects_a_non_positive_sale_date_index() {
    let mut request = request();
    request.market_data.price_index = Some(datum(110.0));
    request.comparables[0].index_at_sale = Some(0.0);
    let input = crate::valuation::validate(request).expect("validates");

    match comparison::compute(&input) {
        Err(EvaluationError::InvalidRate { what, .. }) => {
            assert_eq!(what, "comparable sale-date index");
        }
        other => panic!("expected invalid-rate error, got {other:?}"),
    }
}

#[test]
fn multiplies_named_adjustment_factors() {
    let mut input = validated();
    input.comparables[0]
        .adjustments
        .insert("location".to_string(), 0.9);
    input.comparables[0]
        .adjustments
        .insert("condition".to_string(), 1.1);

    let result = comparison::compute(&input).expect("computes");

    let first = 3_750.0 * 0.9 * 1.1;
    let expected = (first + 3_983.0) / 2.0 * 200.0;
    assert!((result.value - expected).abs() < 1e-6);
}

#[test]
fn factor_table_supplies_defaults_the_sale_can_override() {
    let mut input = validated();
    input.comparison_factors = Some(ValidatedFactorTable {
        factors: BTreeMap::from([("location".to_string(), 0.8)]),
        effective_date: valuation_date(),
        source: "factor handbook".to_string(),
    });
    // The second sale overrides the shared location factor.
    input.comparables[1]
        .adjustments
        .insert("location".to_string(), 1.0);

    let result = comparison::compute(&input).expect("computes");

    let expected = (3_750.0 * 0.8 + 3_983.0) / 2.0 * 200.0;
    assert!((result.value - expected).abs() < 1e-6);
}

#[test]
fn serde_round_trips_the_factor_table() {
    let table = ComparisonFactorTable {
        factors: BTreeMap::from([("location".to_string(), 0.95)]),
        effective_date: Some(valuation_date()),
        source: Some("factor handbook".to_string()),
    };

    let json = serde_json::to_string(&table).expect("serializes");
    let back: ComparisonFactorTable = serde_json::from_str(&json).expect("deserializes");
    assert_eq!(back, table);
}

#[test]
fn repeated_runs_are_bit_identical() {
    let input = validated();

    let first = comparison::compute(&input).expect("computes");
    let second = comparison::compute(&input).expect("computes");

    assert_eq!(first, second);
}
