use std::fmt::Write as _;
use std::fs;

use chrono::NaiveDate;
use immowert::error::AppError;
use immowert::valuation::{run_evaluation, CalculationResult, EvaluationRequest, ModuleResult};

use crate::cli::EvaluateArgs;

/// Load a JSON evaluation request, run the pipeline, and render the
/// derivation protocol as a plain-text report.
pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let raw = fs::read_to_string(&args.input)?;
    let request: EvaluationRequest = serde_json::from_str(&raw)?;
    let valuation_date = request.market_data.valuation_date;

    let result = run_evaluation(request)?;
    let report = render_report(valuation_date, &result);

    match args.output {
        Some(path) => {
            fs::write(&path, report)?;
            println!("Report written to {}", path.display());
        }
        None => print!("{report}"),
    }

    Ok(())
}

/// Protocol lines are already formatted by the core; they are emitted
/// verbatim, in order.
fn render_report(valuation_date: NaiveDate, result: &CalculationResult) -> String {
    let mut report = String::new();
    let _ = writeln!(report, "Market value appraisal");
    let _ = writeln!(report, "Valuation date: {valuation_date}");

    let sections: [(&str, Option<&ModuleResult>); 5] = [
        ("Land value", result.land.as_ref()),
        ("Comparison value", result.comparison.as_ref()),
        ("Income value", result.income.as_ref()),
        ("Cost value", result.cost.as_ref()),
        ("Rights and encumbrances", result.rights.as_ref()),
    ];
    for (title, module) in sections {
        let Some(module) = module else { continue };
        let _ = writeln!(report);
        let _ = writeln!(report, "{title}");
        for line in &module.protocol {
            let _ = writeln!(report, "  {line}");
        }
    }

    let _ = writeln!(report);
    let _ = writeln!(report, "Reconciliation");
    for line in &result.reconciliation.protocol {
        let _ = writeln!(report, "  {line}");
    }
    let _ = writeln!(
        report,
        "\nFinal market value: €{:.2}",
        result.reconciliation.final_value
    );

    report
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use chrono::NaiveDate;
    use immowert::valuation::{
        run_evaluation, Areas, BuildingDescription, BuildingKind, ComparableSale,
        EvaluationRequest, MarketData, OperatingCosts, Procedure, StandardLevel,
    };

    use super::render_report;

    fn comparison_only_request() -> EvaluationRequest {
        EvaluationRequest {
            procedures: BTreeSet::from([Procedure::Comparison]),
            market_data: MarketData {
                valuation_date: NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date"),
                land_reference_rate: None,
                capitalization_rate: None,
                cost_value_factor: None,
                construction_cost_index: None,
                price_index: None,
                comparison_factors: None,
            },
            areas: Areas {
                eligible: 120.0,
                floor: 120.0,
                plot: 300.0,
            },
            building: BuildingDescription {
                kind: BuildingKind::Condominium,
                standard: StandardLevel::new(3).expect("valid level"),
                construction_year: None,
                remaining_life_override: None,
                modernization: BTreeSet::new(),
                outdoor_installations: None,
            },
            rents: Vec::new(),
            operating_costs: OperatingCosts::default(),
            comparables: vec![
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
            ],
            rights: None,
            justifications: BTreeMap::new(),
            land_value_adjustment: None,
            weights: None,
        }
    }

    #[test]
    fn report_carries_protocol_lines_verbatim() {
        let request = comparison_only_request();
        let valuation_date = request.market_data.valuation_date;
        let result = run_evaluation(request).expect("evaluation succeeds");

        let report = render_report(valuation_date, &result);

        assert!(report.starts_with("Market value appraisal"));
        assert!(report.contains("Comparison value"));
        for line in &result.reconciliation.protocol {
            assert!(report.contains(line.as_str()), "missing line: {line}");
        }
        assert!(report.contains("Final market value: €463980.00"));
    }

    #[test]
    fn skipped_modules_are_omitted_from_the_report() {
        let request = comparison_only_request();
        let valuation_date = request.market_data.valuation_date;
        let result = run_evaluation(request).expect("evaluation succeeds");

        let report = render_report(valuation_date, &result);

        assert!(!report.contains("Income value\n"));
        assert!(!report.contains("Rights and encumbrances"));
    }
}
