use super::domain::{ModuleResult, ValidatedEvaluation};
use super::error::EvaluationError;
use super::income::annuity_factor;

/// Flat deduction of the land value per active encumbrance flag, additive
/// across flags.
const DEDUCTION_PER_RIGHT: f64 = 0.05;

/// Capitalization rate assumed for a ground lease when none is supplied.
/// The fallback is named in the protocol line.
const DEFAULT_GROUND_LEASE_RATE: f64 = 3.0;

/// Signed value adjustment for rights and encumbrances against the subject
/// property. No registered rights yield a zero adjustment with an empty
/// protocol; that is a valid outcome, not an error.
pub fn compute(
    input: &ValidatedEvaluation,
    land_value: f64,
) -> Result<ModuleResult, EvaluationError> {
    let mut protocol = Vec::new();
    let mut adjustment = 0.0;

    let Some(rights) = &input.rights else {
        return Ok(ModuleResult {
            value: adjustment,
            protocol,
        });
    };

    let flags = [
        (rights.usufruct, "Usufruct"),
        (rights.residence_right, "Residence right"),
        (rights.utility_easement, "Utility easement"),
        (rights.right_of_way, "Right of way"),
        (rights.other_servitude, "Other servitude"),
    ];
    for (active, name) in flags {
        if active {
            let deduction = land_value * DEDUCTION_PER_RIGHT;
            adjustment -= deduction;
            protocol.push(format!(
                "{name}: 5 % deduction of land value = -€{deduction:.2}"
            ));
        }
    }

    if let Some(lease) = &rights.ground_lease {
        let (rate, rate_note) = match &input.capitalization_rate {
            Some(source) => (source.value, ""),
            None => (DEFAULT_GROUND_LEASE_RATE, " (default)"),
        };
        let capitalized = lease.annual_payment * annuity_factor(rate, lease.remaining_term_years)?;
        adjustment -= capitalized;
        protocol.push(format!(
            "Ground lease: annual payment €{:.2} × annuity factor (i={rate:.2} %{rate_note}, \
             n={:.0} years) = -€{capitalized:.2}",
            lease.annual_payment, lease.remaining_term_years
        ));
    }

    Ok(ModuleResult {
        value: adjustment,
        protocol,
    })
}
