use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Valuation procedures that participate in reconciliation weighting.
///
/// The land-value building block is deliberately not listed here: it feeds
/// the income and cost procedures (and the rights adjustment) but is never
/// weighted on its own.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Procedure {
    Comparison,
    Income,
    Cost,
}

impl Procedure {
    pub const ALL: [Procedure; 3] = [Procedure::Comparison, Procedure::Income, Procedure::Cost];

    pub const fn label(self) -> &'static str {
        match self {
            Procedure::Comparison => "comparison",
            Procedure::Income => "income",
            Procedure::Cost => "cost",
        }
    }
}

/// Building categories covered by the construction-cost table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BuildingKind {
    DetachedHouse,
    TwoFamilyHouse,
    RowHouse,
    ApartmentBuilding,
    Condominium,
}

impl BuildingKind {
    pub const fn label(self) -> &'static str {
        match self {
            BuildingKind::DetachedHouse => "detached house",
            BuildingKind::TwoFamilyHouse => "two-family house",
            BuildingKind::RowHouse => "row house",
            BuildingKind::ApartmentBuilding => "apartment building",
            BuildingKind::Condominium => "condominium",
        }
    }
}

/// Ordinal construction standard, 1 (basic) through 5 (premium).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct StandardLevel(u8);

impl StandardLevel {
    pub fn new(level: u8) -> Option<Self> {
        (1..=5).contains(&level).then_some(Self(level))
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for StandardLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        StandardLevel::new(value)
            .ok_or_else(|| format!("standard level must be between 1 and 5, got {value}"))
    }
}

impl From<StandardLevel> for u8 {
    fn from(value: StandardLevel) -> Self {
        value.0
    }
}

/// Modernization measures credited with extra remaining useful life.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ModernizationFeature {
    Roof,
    Windows,
    Heating,
    Plumbing,
    ExteriorInsulation,
    Bathrooms,
    Interior,
    FloorPlan,
}

/// A market figure as supplied by the caller; date and source are verified
/// during validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketDatum {
    pub value: f64,
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
    #[serde(default)]
    pub source: Option<String>,
}

/// A market figure that passed validation: value plus mandatory provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    pub value: f64,
    pub effective_date: NaiveDate,
    pub source: String,
}

/// Named adjustment factors shared across comparables, as supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonFactorTable {
    pub factors: BTreeMap<String, f64>,
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Validated counterpart of [`ComparisonFactorTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedFactorTable {
    pub factors: BTreeMap<String, f64>,
    pub effective_date: NaiveDate,
    pub source: String,
}

/// Market data backing an evaluation. The valuation date is the only
/// unconditionally required field; everything else is needed only by the
/// procedures that consume it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    pub valuation_date: NaiveDate,
    #[serde(default)]
    pub land_reference_rate: Option<MarketDatum>,
    #[serde(default)]
    pub capitalization_rate: Option<MarketDatum>,
    #[serde(default)]
    pub cost_value_factor: Option<MarketDatum>,
    #[serde(default)]
    pub construction_cost_index: Option<MarketDatum>,
    #[serde(default)]
    pub price_index: Option<MarketDatum>,
    #[serde(default)]
    pub comparison_factors: Option<ComparisonFactorTable>,
}

/// Relevant areas of the subject property, all in m².
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Areas {
    pub eligible: f64,
    pub floor: f64,
    pub plot: f64,
}

/// Physical description of the improvements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingDescription {
    pub kind: BuildingKind,
    pub standard: StandardLevel,
    #[serde(default)]
    pub construction_year: Option<i32>,
    #[serde(default)]
    pub remaining_life_override: Option<f64>,
    #[serde(default)]
    pub modernization: BTreeSet<ModernizationFeature>,
    #[serde(default)]
    pub outdoor_installations: Option<f64>,
}

/// One let unit: area and the annual net rent it produces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RentRecord {
    pub area: f64,
    pub annual_net_rent: f64,
}

/// How the four operating-cost components are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CostBasis {
    #[default]
    Absolute,
    PercentOfGross,
}

/// The four statutory operating-cost components, either absolute amounts or
/// percentages of gross income depending on `basis`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct OperatingCosts {
    #[serde(default)]
    pub basis: CostBasis,
    #[serde(default)]
    pub administration: f64,
    #[serde(default)]
    pub maintenance: f64,
    #[serde(default)]
    pub non_recoverable: f64,
    #[serde(default)]
    pub rent_loss_risk: f64,
}

/// A comparable transaction used by the comparison procedure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparableSale {
    pub sale_date: NaiveDate,
    pub price: f64,
    pub area: f64,
    #[serde(default)]
    pub index_at_sale: Option<f64>,
    #[serde(default)]
    pub adjustments: BTreeMap<String, f64>,
}

/// Encumbrances registered against the subject property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RightsAndEncumbrances {
    #[serde(default)]
    pub usufruct: bool,
    #[serde(default)]
    pub residence_right: bool,
    #[serde(default)]
    pub utility_easement: bool,
    #[serde(default)]
    pub right_of_way: bool,
    #[serde(default)]
    pub other_servitude: bool,
    #[serde(default)]
    pub ground_lease: Option<GroundLease>,
}

impl RightsAndEncumbrances {
    pub fn is_empty(&self) -> bool {
        !(self.usufruct
            || self.residence_right
            || self.utility_easement
            || self.right_of_way
            || self.other_servitude
            || self.ground_lease.is_some())
    }
}

/// Ground-lease terms for capitalizing the outstanding obligation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundLease {
    pub annual_payment: f64,
    pub remaining_term_years: f64,
}

/// Raw evaluation request as received from a form, file, or HTTP client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub procedures: BTreeSet<Procedure>,
    pub market_data: MarketData,
    pub areas: Areas,
    pub building: BuildingDescription,
    #[serde(default)]
    pub rents: Vec<RentRecord>,
    #[serde(default)]
    pub operating_costs: OperatingCosts,
    #[serde(default)]
    pub comparables: Vec<ComparableSale>,
    #[serde(default)]
    pub rights: Option<RightsAndEncumbrances>,
    #[serde(default)]
    pub justifications: BTreeMap<Procedure, String>,
    #[serde(default)]
    pub land_value_adjustment: Option<f64>,
    #[serde(default)]
    pub weights: Option<BTreeMap<Procedure, f64>>,
}

/// The evaluation input after validation. Constructed exclusively by
/// [`validate`](super::validate::validate); calculators rely on its
/// guarantees (positive areas, provenanced market data, non-empty procedure
/// set) and never re-check them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedEvaluation {
    pub procedures: BTreeSet<Procedure>,
    pub valuation_date: NaiveDate,
    pub land_reference_rate: Option<DataSource>,
    pub capitalization_rate: Option<DataSource>,
    pub cost_value_factor: Option<DataSource>,
    pub construction_cost_index: Option<DataSource>,
    pub price_index: Option<DataSource>,
    pub comparison_factors: Option<ValidatedFactorTable>,
    pub areas: Areas,
    pub building: BuildingDescription,
    pub rents: Vec<RentRecord>,
    pub operating_costs: OperatingCosts,
    pub comparables: Vec<ComparableSale>,
    pub rights: Option<RightsAndEncumbrances>,
    pub justifications: BTreeMap<Procedure, String>,
    pub land_value_adjustment: Option<f64>,
    pub weights: Option<BTreeMap<Procedure, f64>>,
}

/// Result of one calculator: the value and the ordered derivation protocol.
/// Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleResult {
    pub value: f64,
    pub protocol: Vec<String>,
}

/// Spread of the participating procedure values, unweighted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

/// Outcome of weighting the procedure results into one final value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    pub weights: BTreeMap<Procedure, f64>,
    pub range: ValueRange,
    pub final_value: f64,
    pub justification: String,
    pub protocol: Vec<String>,
}

/// Aggregate outcome of one evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub land: Option<ModuleResult>,
    pub comparison: Option<ModuleResult>,
    pub income: Option<ModuleResult>,
    pub cost: Option<ModuleResult>,
    pub rights: Option<ModuleResult>,
    pub reconciliation: ReconciliationResult,
}
