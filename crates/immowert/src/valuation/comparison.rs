use std::collections::BTreeSet;

use super::domain::{ComparableSale, ModuleResult, ValidatedEvaluation, ValidatedFactorTable};
use super::error::EvaluationError;

/// Comparison value: arithmetic mean of the normalized per-area comparable
/// prices, scaled to the subject's eligible area. No outlier trimming.
pub fn compute(input: &ValidatedEvaluation) -> Result<ModuleResult, EvaluationError> {
    if input.comparables.is_empty() {
        return Err(EvaluationError::MissingData("comparison transactions"));
    }

    let mut protocol = Vec::new();
    let mut normalized = Vec::with_capacity(input.comparables.len());

    for sale in &input.comparables {
        // Validation guarantees a positive area.
        let mut per_area = sale.price / sale.area;
        protocol.push(format!(
            "Sale {}: €{:.2} / {:.2} m² = €{per_area:.2}/m²",
            sale.sale_date, sale.price, sale.area
        ));

        if let (Some(target), Some(at_sale)) = (&input.price_index, sale.index_at_sale) {
            if target.value <= 0.0 {
                return Err(EvaluationError::InvalidRate {
                    what: "price index",
                    value: target.value,
                });
            }
            if at_sale <= 0.0 {
                return Err(EvaluationError::InvalidRate {
                    what: "comparable sale-date index",
                    value: at_sale,
                });
            }
            let temporal = target.value / at_sale;
            per_area *= temporal;
            protocol.push(format!(
                "Temporal adjustment: {:.2} / {at_sale:.2} = {temporal:.4} → €{per_area:.2}/m²",
                target.value
            ));
        }

        let factor = combined_adjustment(sale, input.comparison_factors.as_ref());
        if (factor - 1.0).abs() > f64::EPSILON {
            per_area *= factor;
            protocol.push(format!(
                "Feature adjustment factor: {factor:.4} → €{per_area:.2}/m²"
            ));
        }

        normalized.push(per_area);
    }

    let mean = normalized.iter().sum::<f64>() / normalized.len() as f64;
    protocol.push(format!(
        "Mean normalized comparable price: €{mean:.2}/m²"
    ));

    let value = mean * input.areas.eligible;
    protocol.push(format!(
        "Comparison value: €{mean:.2}/m² × {:.2} m² = €{value:.2}",
        input.areas.eligible
    ));

    Ok(ModuleResult { value, protocol })
}

/// Product of the named adjustment factors for one sale. The sale's own
/// figure wins over the shared table; a factor absent from both is 1.
fn combined_adjustment(sale: &ComparableSale, table: Option<&ValidatedFactorTable>) -> f64 {
    let mut names: BTreeSet<&str> = sale.adjustments.keys().map(String::as_str).collect();
    if let Some(table) = table {
        names.extend(table.factors.keys().map(String::as_str));
    }

    names
        .into_iter()
        .map(|name| {
            sale.adjustments
                .get(name)
                .or_else(|| table.and_then(|table| table.factors.get(name)))
                .copied()
                .unwrap_or(1.0)
        })
        .product()
}
