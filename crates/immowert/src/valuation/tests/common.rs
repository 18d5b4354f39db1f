use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::valuation::domain::{
    Areas, BuildingDescription, BuildingKind, ComparableSale, CostBasis, EvaluationRequest,
    MarketData, MarketDatum, OperatingCosts, Procedure, RentRecord, StandardLevel,
    ValidatedEvaluation,
};
use crate::valuation::validate;

pub(super) fn valuation_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date")
}

pub(super) fn datum(value: f64) -> MarketDatum {
    MarketDatum {
        value,
        effective_date: Some(NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date")),
        source: Some("local valuation committee".to_string()),
    }
}

pub(super) fn market_data() -> MarketData {
    MarketData {
        valuation_date: valuation_date(),
        land_reference_rate: Some(datum(500.0)),
        capitalization_rate: Some(datum(5.0)),
        cost_value_factor: None,
        construction_cost_index: Some(datum(160.0)),
        price_index: None,
        comparison_factors: None,
    }
}

pub(super) fn building() -> BuildingDescription {
    BuildingDescription {
        kind: BuildingKind::DetachedHouse,
        standard: standard_level(3),
        construction_year: Some(1995),
        remaining_life_override: None,
        modernization: BTreeSet::new(),
        outdoor_installations: None,
    }
}

pub(super) fn comparables() -> Vec<ComparableSale> {
    vec![
        ComparableSale {
            sale_date: NaiveDate::from_ymd_opt(2024, 11, 5).expect("valid date"),
            price: 375_000.0,
            area: 100.0,
            index_at_sale: None,
            adjustments: BTreeMap::new(),
        },
        ComparableSale {
            sale_date: NaiveDate::from_ymd_opt(2025, 2, 17).expect("valid date"),
            price: 398_300.0,
            area: 100.0,
            index_at_sale: None,
            adjustments: BTreeMap::new(),
        },
    ]
}

pub(super) fn request() -> EvaluationRequest {
    EvaluationRequest {
        procedures: Procedure::ALL.into_iter().collect(),
        market_data: market_data(),
        areas: Areas {
            eligible: 200.0,
            floor: 180.0,
            plot: 420.0,
        },
        building: building(),
        rents: vec![
            RentRecord {
                area: 120.0,
                annual_net_rent: 14_400.0,
            },
            RentRecord {
                area: 60.0,
                annual_net_rent: 7_200.0,
            },
        ],
        operating_costs: OperatingCosts {
            basis: CostBasis::PercentOfGross,
            administration: 3.0,
            maintenance: 9.0,
            non_recoverable: 2.0,
            rent_loss_risk: 4.0,
        },
        comparables: comparables(),
        rights: None,
        justifications: BTreeMap::new(),
        land_value_adjustment: None,
        weights: None,
    }
}

pub(super) fn validated() -> ValidatedEvaluation {
    validate(request()).expect("fixture request validates")
}

pub(super) fn standard_level(level: u8) -> StandardLevel {
    StandardLevel::new(level).expect("valid standard level")
}
