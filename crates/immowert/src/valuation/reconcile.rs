use std::collections::BTreeMap;

use super::domain::{ModuleResult, Procedure, ReconciliationResult, ValueRange};
use super::error::EvaluationError;

/// Combine the procedure results that actually ran into one weighted final
/// value with a reported range.
///
/// Without supplied weights each participating procedure counts equally;
/// supplied weights are normalized to sum to 1 over the participating
/// procedures. The range is the unweighted min/max of the procedure values.
pub fn reconcile(
    results: &BTreeMap<Procedure, ModuleResult>,
    supplied_weights: Option<&BTreeMap<Procedure, f64>>,
    justification: &str,
) -> Result<ReconciliationResult, EvaluationError> {
    if results.is_empty() {
        return Err(EvaluationError::NoResults);
    }

    let weights = normalized_weights(results, supplied_weights)?;

    let mut protocol = Vec::new();
    let mut final_value = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for (procedure, result) in results {
        let weight = weights[procedure];
        let contribution = result.value * weight;
        final_value += contribution;
        min = min.min(result.value);
        max = max.max(result.value);

        // Exhaustive on purpose: a new procedure must be named here before
        // it can be reconciled.
        let name = match procedure {
            Procedure::Comparison => "Comparison value",
            Procedure::Income => "Income value",
            Procedure::Cost => "Cost value",
        };
        protocol.push(format!(
            "{name}: €{:.2} × weight {weight:.3} = €{contribution:.2}",
            result.value
        ));
    }

    protocol.push(format!("Value range: min €{min:.2}, max €{max:.2}"));
    protocol.push(format!("Weighting justification: {justification}"));

    Ok(ReconciliationResult {
        weights,
        range: ValueRange { min, max },
        final_value,
        justification: justification.to_string(),
        protocol,
    })
}

fn normalized_weights(
    results: &BTreeMap<Procedure, ModuleResult>,
    supplied: Option<&BTreeMap<Procedure, f64>>,
) -> Result<BTreeMap<Procedure, f64>, EvaluationError> {
    match supplied {
        None => {
            let equal = 1.0 / results.len() as f64;
            Ok(results.keys().map(|procedure| (*procedure, equal)).collect())
        }
        Some(supplied) => {
            let sum: f64 = results
                .keys()
                .map(|procedure| supplied.get(procedure).copied().unwrap_or(0.0))
                .sum();
            if sum <= 0.0 {
                return Err(EvaluationError::InvalidWeight { sum });
            }
            Ok(results
                .keys()
                .map(|procedure| {
                    let weight = supplied.get(procedure).copied().unwrap_or(0.0) / sum;
                    (*procedure, weight)
                })
                .collect())
        }
    }
}
