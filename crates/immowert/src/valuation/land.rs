use super::domain::{ModuleResult, ValidatedEvaluation};
use super::error::EvaluationError;

/// Land value: reference rate × eligible area, plus an optional manual
/// adjustment. Full precision is kept internally; the two-decimal formatting
/// in the protocol is cosmetic.
pub fn compute(input: &ValidatedEvaluation) -> Result<ModuleResult, EvaluationError> {
    let rate = input
        .land_reference_rate
        .as_ref()
        .ok_or(EvaluationError::MissingData("land reference rate"))?;

    let area = input.areas.eligible;
    let base = rate.value * area;
    let mut protocol = vec![format!(
        "Land reference rate (€{:.2}/m²) × eligible area ({:.2} m²) = €{:.2}",
        rate.value, area, base
    )];

    let mut value = base;
    if let Some(adjustment) = input.land_value_adjustment {
        value += adjustment;
        let sign = if adjustment >= 0.0 { "+" } else { "" };
        protocol.push(format!("Manual land-value adjustment: {sign}€{adjustment:.2}"));
    }
    protocol.push(format!("Land value: €{value:.2}"));

    Ok(ModuleResult { value, protocol })
}
