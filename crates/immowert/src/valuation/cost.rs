use chrono::Datelike;

use super::domain::{ModuleResult, ValidatedEvaluation};
use super::error::EvaluationError;
use super::tables::{modernization_bonus_years, CostTable};

/// Depreciation never implies full loss of value.
const MAX_DEPRECIATION: f64 = 0.9;

/// Cost value: indexed replacement cost, depreciated by age net of
/// modernization credit, market-adjusted, plus land value.
///
/// The market adjustment factor scales the building component only; the
/// land value is added afterwards, unscaled.
pub fn compute(
    input: &ValidatedEvaluation,
    land_value: f64,
    table: &CostTable,
) -> Result<ModuleResult, EvaluationError> {
    let index = input
        .construction_cost_index
        .as_ref()
        .ok_or(EvaluationError::MissingData("construction cost index"))?;
    if index.value <= 0.0 {
        return Err(EvaluationError::InvalidRate {
            what: "construction cost index",
            value: index.value,
        });
    }

    let entry = table.lookup(input.building.kind, input.building.standard)?;

    let mut protocol = vec![format!(
        "Base construction cost for {} at standard level {}: €{:.2}/m²",
        input.building.kind.label(),
        input.building.standard.get(),
        entry.construction_cost
    )];

    let index_factor = index.value / CostTable::BASE_INDEX;
    protocol.push(format!(
        "Cost index factor: {:.2} / {:.0} = {index_factor:.4}",
        index.value,
        CostTable::BASE_INDEX
    ));

    let floor_area = input.areas.floor;
    let mut replacement_cost = entry.construction_cost * index_factor * floor_area;
    protocol.push(format!(
        "Replacement cost: €{:.2} × {index_factor:.4} × {floor_area:.2} m² = €{replacement_cost:.2}",
        entry.construction_cost
    ));
    if let Some(outdoor) = input.building.outdoor_installations {
        replacement_cost += outdoor;
        protocol.push(format!(
            "Outdoor installations: +€{outdoor:.2} → €{replacement_cost:.2}"
        ));
    }

    let total_life = entry.total_useful_life;
    protocol.push(format!("Total useful life: {total_life:.0} years"));

    let remaining_life = remaining_life(input, total_life, &mut protocol)?;

    let depreciation = (1.0 - remaining_life / total_life).clamp(0.0, MAX_DEPRECIATION);
    protocol.push(format!(
        "Depreciation fraction (bounded to [0, {MAX_DEPRECIATION}]): 1 - {remaining_life:.0}/{total_life:.0} = {depreciation:.4}"
    ));

    let building_cost_value = replacement_cost * (1.0 - depreciation);
    protocol.push(format!(
        "Building cost value: €{replacement_cost:.2} × {:.4} = €{building_cost_value:.2}",
        1.0 - depreciation
    ));

    let market_factor = match &input.cost_value_factor {
        Some(factor) => {
            protocol.push(format!(
                "Market adjustment factor ({}): {:.2}",
                factor.source, factor.value
            ));
            factor.value
        }
        None => {
            protocol.push("No market adjustment factor supplied; factor 1.00 applied".to_string());
            1.0
        }
    };

    let adjusted_building_value = building_cost_value * market_factor;
    let value = adjusted_building_value + land_value;
    protocol.push(format!(
        "Cost value: €{building_cost_value:.2} × {market_factor:.2} + land value €{land_value:.2} = €{value:.2}"
    ));

    Ok(ModuleResult { value, protocol })
}

/// Remaining useful life: explicit override, otherwise total life minus age
/// plus the modernization credit, floored at zero.
fn remaining_life(
    input: &ValidatedEvaluation,
    total_life: f64,
    protocol: &mut Vec<String>,
) -> Result<f64, EvaluationError> {
    if let Some(years) = input.building.remaining_life_override {
        protocol.push(format!(
            "Remaining useful life (explicit override): {years:.0} years"
        ));
        return Ok(years);
    }

    let construction_year = input
        .building
        .construction_year
        .ok_or(EvaluationError::MissingData("construction year"))?;

    let valuation_year = input.valuation_date.year();
    let age = valuation_year - construction_year;
    protocol.push(format!(
        "Age at valuation date: {valuation_year} - {construction_year} = {age} years"
    ));

    let bonus = modernization_bonus_years(&input.building.modernization);
    if bonus > 0.0 {
        protocol.push(format!("Modernization credit: +{bonus:.0} years"));
    }

    let remaining = (total_life - f64::from(age) + bonus).max(0.0);
    protocol.push(format!(
        "Remaining useful life: {total_life:.0} - {age} + {bonus:.0} = {remaining:.0} years"
    ));
    Ok(remaining)
}
