use super::domain::{CostBasis, ModuleResult, OperatingCosts, ValidatedEvaluation};
use super::error::EvaluationError;

/// Remaining useful life assumed when the income procedure has neither an
/// override nor building-age data. The assumption is always written to the
/// protocol.
pub const DEFAULT_REMAINING_LIFE_YEARS: f64 = 30.0;

/// Present value of a level annual payment stream over `years` at `rate`
/// percent: `(1 − (1 + i/100)^−n) / (i/100)`.
///
/// A non-positive rate is rejected rather than allowed to produce
/// infinities; a non-positive duration capitalizes to nothing.
pub fn annuity_factor(rate: f64, years: f64) -> Result<f64, EvaluationError> {
    if rate <= 0.0 {
        return Err(EvaluationError::InvalidRate {
            what: "capitalization rate",
            value: rate,
        });
    }
    if years <= 0.0 {
        return Ok(0.0);
    }
    let decimal = rate / 100.0;
    Ok((1.0 - (1.0 + decimal).powf(-years)) / decimal)
}

/// Income value: capitalized building net income plus land value.
pub fn compute(
    input: &ValidatedEvaluation,
    land_value: f64,
) -> Result<ModuleResult, EvaluationError> {
    let rate = input
        .capitalization_rate
        .as_ref()
        .ok_or(EvaluationError::MissingData("capitalization rate"))?;

    let mut protocol = Vec::new();

    let gross_income: f64 = input.rents.iter().map(|rent| rent.annual_net_rent).sum();
    protocol.push(format!(
        "Gross income (sum of annual net rents): €{gross_income:.2}"
    ));

    let operating_costs = itemized_costs(&input.operating_costs, gross_income, &mut protocol);
    protocol.push(format!("Total operating costs: €{operating_costs:.2}"));

    let net_income = gross_income - operating_costs;
    protocol.push(format!(
        "Net income: €{gross_income:.2} - €{operating_costs:.2} = €{net_income:.2}"
    ));

    let land_charge = land_value * rate.value / 100.0;
    protocol.push(format!(
        "Land-value capitalization charge: €{land_value:.2} × {:.2} % = €{land_charge:.2}",
        rate.value
    ));

    // A building running at a loss is a reportable state, not an error.
    let building_net_income = net_income - land_charge;
    protocol.push(format!(
        "Building net income: €{net_income:.2} - €{land_charge:.2} = €{building_net_income:.2}"
    ));

    let remaining_life = match input.building.remaining_life_override {
        Some(years) => {
            protocol.push(format!(
                "Remaining useful life (explicit override): {years:.0} years"
            ));
            years
        }
        None => {
            protocol.push(format!(
                "No building-age data supplied; remaining useful life assumed at \
                 {DEFAULT_REMAINING_LIFE_YEARS:.0} years (default)"
            ));
            DEFAULT_REMAINING_LIFE_YEARS
        }
    };

    let factor = annuity_factor(rate.value, remaining_life)?;
    protocol.push(format!(
        "Annuity present-value factor (i={:.2} %, n={remaining_life:.0} years): {factor:.4}",
        rate.value
    ));

    let building_value = building_net_income * factor;
    protocol.push(format!(
        "Building value: €{building_net_income:.2} × {factor:.4} = €{building_value:.2}"
    ));

    let value = building_value + land_value;
    protocol.push(format!(
        "Income value: €{building_value:.2} + land value €{land_value:.2} = €{value:.2}"
    ));

    Ok(ModuleResult { value, protocol })
}

/// Itemize the four cost components before summing them, in both modes.
fn itemized_costs(costs: &OperatingCosts, gross_income: f64, protocol: &mut Vec<String>) -> f64 {
    let components = [
        ("Administration", costs.administration),
        ("Maintenance", costs.maintenance),
        ("Non-recoverable operating costs", costs.non_recoverable),
        ("Rent-loss risk", costs.rent_loss_risk),
    ];

    let mut total = 0.0;
    for (name, figure) in components {
        let amount = match costs.basis {
            CostBasis::Absolute => {
                protocol.push(format!("{name}: €{figure:.2}"));
                figure
            }
            CostBasis::PercentOfGross => {
                let amount = gross_income * figure / 100.0;
                protocol.push(format!(
                    "{name}: {figure:.2} % of gross income = €{amount:.2}"
                ));
                amount
            }
        };
        total += amount;
    }
    total
}
