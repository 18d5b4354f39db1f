//! The valuation pipeline: input validation, the per-procedure calculators,
//! the rights adjustment, and the reconciliation of procedure outputs into
//! one final market value.
//!
//! All computation is synchronous and side-effect-free; the only shared data
//! are the immutable lookup tables injected into the engine. Land value is
//! computed first whenever income, cost, or a rights adjustment needs it;
//! the three weighted procedures are otherwise independent of each other.

pub mod comparables;
mod comparison;
mod cost;
pub mod domain;
mod engine;
mod error;
mod income;
mod land;
mod reconcile;
mod rights;
mod router;
mod tables;
mod validate;

#[cfg(test)]
mod tests;

pub use domain::{
    Areas, BuildingDescription, BuildingKind, CalculationResult, ComparableSale,
    ComparisonFactorTable, CostBasis, DataSource, EvaluationRequest, GroundLease, MarketData,
    MarketDatum, ModernizationFeature, ModuleResult, OperatingCosts, Procedure,
    ReconciliationResult, RentRecord, RightsAndEncumbrances, StandardLevel, ValidatedEvaluation,
    ValidatedFactorTable, ValueRange,
};
pub use engine::{run_evaluation, ValuationEngine};
pub use error::EvaluationError;
pub use income::{annuity_factor, DEFAULT_REMAINING_LIFE_YEARS};
pub use router::valuation_router;
pub use tables::{modernization_bonus_years, CostTable, CostTableEntry};
pub use validate::validate;
