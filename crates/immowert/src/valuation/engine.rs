use std::collections::BTreeMap;

use super::domain::{
    CalculationResult, EvaluationRequest, ModuleResult, Procedure, ValidatedEvaluation,
};
use super::error::EvaluationError;
use super::tables::CostTable;
use super::validate::validate;
use super::{comparison, cost, income, land, reconcile, rights};

/// Stateless engine applying the configured lookup tables to validated
/// inputs. One instance can serve any number of evaluations; it holds no
/// per-run state.
#[derive(Debug, Clone)]
pub struct ValuationEngine {
    cost_table: CostTable,
}

impl ValuationEngine {
    pub fn new(cost_table: CostTable) -> Self {
        Self { cost_table }
    }

    /// Engine backed by the built-in cost and useful-life table.
    pub fn standard() -> Self {
        Self::new(CostTable::standard())
    }

    /// Run every requested procedure in dependency order and reconcile the
    /// outcomes. Fail-fast: the first calculator error aborts the run and
    /// no partial result is returned.
    pub fn appraise(
        &self,
        input: &ValidatedEvaluation,
    ) -> Result<CalculationResult, EvaluationError> {
        let encumbered = input
            .rights
            .as_ref()
            .is_some_and(|rights| !rights.is_empty());

        // Income, cost, and the rights adjustment all consume the land
        // value; comparison does not.
        let needs_land = encumbered
            || input.procedures.contains(&Procedure::Income)
            || input.procedures.contains(&Procedure::Cost);
        let land = if needs_land {
            Some(land::compute(input)?)
        } else {
            None
        };
        let land_value = land.as_ref().map_or(0.0, |result| result.value);

        let mut results: BTreeMap<Procedure, ModuleResult> = BTreeMap::new();
        for procedure in &input.procedures {
            let result = match procedure {
                Procedure::Comparison => comparison::compute(input)?,
                Procedure::Income => income::compute(input, land_value)?,
                Procedure::Cost => cost::compute(input, land_value, &self.cost_table)?,
            };
            results.insert(*procedure, result);
        }

        let rights = if encumbered {
            Some(rights::compute(input, land_value)?)
        } else {
            None
        };

        let justification = join_justifications(&input.justifications);
        let mut reconciliation =
            reconcile::reconcile(&results, input.weights.as_ref(), &justification)?;

        // The rights adjustment is applied after weighting; it is not a
        // procedure of its own.
        if let Some(rights_result) = &rights {
            reconciliation.final_value += rights_result.value;
            reconciliation.protocol.push(format!(
                "Rights/encumbrances adjustment applied after weighting: €{:.2} → final value €{:.2}",
                rights_result.value, reconciliation.final_value
            ));
        }

        let mut comparison_result = None;
        let mut income_result = None;
        let mut cost_result = None;
        for (procedure, result) in results {
            match procedure {
                Procedure::Comparison => comparison_result = Some(result),
                Procedure::Income => income_result = Some(result),
                Procedure::Cost => cost_result = Some(result),
            }
        }

        Ok(CalculationResult {
            land,
            comparison: comparison_result,
            income: income_result,
            cost: cost_result,
            rights,
            reconciliation,
        })
    }
}

/// Validate a raw request and appraise it with the standard tables.
pub fn run_evaluation(request: EvaluationRequest) -> Result<CalculationResult, EvaluationError> {
    let input = validate(request)?;
    ValuationEngine::standard().appraise(&input)
}

fn join_justifications(justifications: &BTreeMap<Procedure, String>) -> String {
    let parts: Vec<String> = justifications
        .iter()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(procedure, text)| format!("{}: {}", procedure.label(), text.trim()))
        .collect();

    if parts.is_empty() {
        "no justification provided".to_string()
    } else {
        parts.join("; ")
    }
}
