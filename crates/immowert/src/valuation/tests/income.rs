use super::common::*;
use crate::valuation::{annuity_factor, income, EvaluationError};

#[test]
fn annuity_factor_matches_reference_value() {
    let factor = annuity_factor(5.0, 10.0).expect("positive rate");
    assert!((factor - 7.7217).abs() < 1e-4);
    assert!(factor > 0.0);
}

#[test]
fn annuity_factor_is_zero_for_expired_duration() {
    assert_eq!(annuity_factor(5.0, 0.0).expect("positive rate"), 0.0);
    assert_eq!(annuity_factor(5.0, -3.0).expect("positive rate"), 0.0);
}

#[test]
fn annuity_factor_rejects_non_positive_rate() {
    match annuity_factor(0.0, 10.0) {
        Err(EvaluationError::InvalidRate { what, value }) => {
            assert_eq!(what, "capitalization rate");
            assert_eq!(value, 0.0);
        }
        other => panic!("expected invalid-rate error, got {other:?}"),
    }
}

#[test]
fn capitalizes_building_net_income_on_top_of_land_value() {
    let input = validated();
    let land_value = 100_000.0;

    let result = income::compute(&input, land_value).expect("income value computes");

    // 21_600 gross, 18 % operating costs, 5_000 land charge, 30-year default life.
    let building_net_income = 21_600.0 - 21_600.0 * 0.18 - 5_000.0;
    let factor = annuity_factor(5.0, 30.0).expect("positive rate");
    let expected = building_net_income * factor + land_value;
    assert!((result.value - expected).abs() < 1e-9);
}

#[test]
fn itemizes_all_four_cost_components_before_summing() {
    let input = validated();

    let result = income::compute(&input, 100_000.0).expect("computes");

    let total_position = result
        .protocol
        .iter()
        .position(|line| line.starts_with("Total operating costs"))
        .expect("total line present");
    for component in [
        "Administration",
        "Maintenance",
        "Non-recoverable operating costs",
        "Rent-loss risk",
    ] {
        let item_position = result
            .protocol
            .iter()
            .position(|line| line.starts_with(component))
            .unwrap_or_else(|| panic!("{component} itemized"));
        assert!(item_position < total_position);
    }
}

#[test]
fn documents_the_default_remaining_life() {
    let input = validated();

    let result = income::compute(&input, 100_000.0).expect("computes");

    assert!(result
        .protocol
        .iter()
        .any(|line| line.contains("assumed at 30 years")));
}

#[test]
fn prefers_the_explicit_remaining_life_override() {
    let mut input = validated();
    input.building.remaining_life_override = Some(40.0);

    let result = income::compute(&input, 100_000.0).expect("computes");

    assert!(result
        .protocol
        .iter()
        .any(|line| line.contains("explicit override") && line.contains("40 years")));
}

#[test]
fn negative_building_net_income_is_reported_not_clamped() {
    let mut input = validated();
    input.rents.clear();

    let land_value = 100_000.0;
    let result = income::compute(&input, land_value).expect("computes");

    // No income at all: the capitalized loss pushes the value below the land value.
    assert!(result.value < land_value);
    assert!(result
        .protocol
        .iter()
        .any(|line| line.starts_with("Building net income") && line.contains("€-")));
}

#[test]
fn fails_without_capitalization_rate() {
    let mut input = validated();
    input.capitalization_rate = None;

    match income::compute(&input, 100_000.0) {
        Err(EvaluationError::MissingData(what)) => assert_eq!(what, "capitalization rate"),
        other => panic!("expected missing-data error, got {other:?}"),
    }
}

#[test]
fn gross_income_defaults_to_zero_without_rent_records() {
    let mut input = validated();
    input.rents.clear();

    let result = income::compute(&input, 100_000.0).expect("computes");

    assert!(result.protocol[0].contains("€0.00"));
}

#[test]
fn repeated_runs_are_bit_identical() {
    let input = validated();

    let first = income::compute(&input, 100_000.0).expect("computes");
    let second = income::compute(&input, 100_000.0).expect("computes");

    assert_eq!(first, second);
}
