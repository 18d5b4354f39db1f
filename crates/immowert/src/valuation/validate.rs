use super::domain::{
    DataSource, EvaluationRequest, MarketDatum, ValidatedEvaluation, ValidatedFactorTable,
};
use super::error::EvaluationError;

/// Turn a raw request into a [`ValidatedEvaluation`] or fail naming the
/// offending field.
///
/// Pure and idempotent: validating the same request twice yields identical
/// output, and a request assembled from an already-validated evaluation
/// passes unchanged. Downstream calculators never re-check what is
/// guaranteed here.
pub fn validate(request: EvaluationRequest) -> Result<ValidatedEvaluation, EvaluationError> {
    if request.procedures.is_empty() {
        return Err(EvaluationError::validation(
            "procedures",
            "at least one valuation procedure must be requested",
        ));
    }

    if !(request.areas.eligible > 0.0) {
        return Err(EvaluationError::validation(
            "areas.eligible",
            format!("eligible area must be positive, got {}", request.areas.eligible),
        ));
    }
    if !(request.areas.floor > 0.0) {
        return Err(EvaluationError::validation(
            "areas.floor",
            format!("floor area must be positive, got {}", request.areas.floor),
        ));
    }
    if !(request.areas.plot > 0.0) {
        return Err(EvaluationError::validation(
            "areas.plot",
            format!("plot area must be positive, got {}", request.areas.plot),
        ));
    }

    for (position, sale) in request.comparables.iter().enumerate() {
        if !(sale.area > 0.0) {
            return Err(EvaluationError::validation(
                "comparables",
                format!(
                    "comparable {} ({}) must have a positive area, got {}",
                    position + 1,
                    sale.sale_date,
                    sale.area
                ),
            ));
        }
    }

    let market = request.market_data;
    let land_reference_rate =
        provenanced(market.land_reference_rate, "market_data.land_reference_rate")?;
    let capitalization_rate =
        provenanced(market.capitalization_rate, "market_data.capitalization_rate")?;
    let cost_value_factor =
        provenanced(market.cost_value_factor, "market_data.cost_value_factor")?;
    let construction_cost_index = provenanced(
        market.construction_cost_index,
        "market_data.construction_cost_index",
    )?;
    let price_index = provenanced(market.price_index, "market_data.price_index")?;

    let comparison_factors = match market.comparison_factors {
        None => None,
        Some(table) => {
            let effective_date = table.effective_date.ok_or_else(|| {
                EvaluationError::validation(
                    "market_data.comparison_factors",
                    "an effective date is required when a factor table is supplied",
                )
            })?;
            let source = non_blank(table.source).ok_or_else(|| {
                EvaluationError::validation(
                    "market_data.comparison_factors",
                    "a provenance source is required when a factor table is supplied",
                )
            })?;
            Some(ValidatedFactorTable {
                factors: table.factors,
                effective_date,
                source,
            })
        }
    };

    Ok(ValidatedEvaluation {
        procedures: request.procedures,
        valuation_date: market.valuation_date,
        land_reference_rate,
        capitalization_rate,
        cost_value_factor,
        construction_cost_index,
        price_index,
        comparison_factors,
        areas: request.areas,
        building: request.building,
        rents: request.rents,
        operating_costs: request.operating_costs,
        comparables: request.comparables,
        rights: request.rights,
        justifications: request.justifications,
        land_value_adjustment: request.land_value_adjustment,
        weights: request.weights,
    })
}

/// A supplied market figure is only acceptable together with its effective
/// date and provenance; a bare number is not a usable legal basis.
fn provenanced(
    datum: Option<MarketDatum>,
    field: &'static str,
) -> Result<Option<DataSource>, EvaluationError> {
    let Some(datum) = datum else {
        return Ok(None);
    };

    let effective_date = datum.effective_date.ok_or_else(|| {
        EvaluationError::validation(field, "an effective date is required when a value is supplied")
    })?;
    let source = non_blank(datum.source).ok_or_else(|| {
        EvaluationError::validation(
            field,
            "a provenance source is required when a value is supplied",
        )
    })?;

    Ok(Some(DataSource {
        value: datum.value,
        effective_date,
        source,
    }))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
