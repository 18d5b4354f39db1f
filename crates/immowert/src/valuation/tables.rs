use std::collections::{BTreeMap, BTreeSet};

use super::domain::{BuildingKind, ModernizationFeature, StandardLevel};
use super::error::EvaluationError;

/// Construction cost and total useful life for one
/// (building kind, standard level) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostTableEntry {
    /// € per m² of floor area at the table's base year (index = 100).
    pub construction_cost: f64,
    /// Total useful life in years.
    pub total_useful_life: f64,
}

/// Immutable lookup table backing the cost procedure.
///
/// Constructed once and injected into the engine so tests can substitute
/// their own figures; the standard table covers every kind × level pair.
#[derive(Debug, Clone)]
pub struct CostTable {
    entries: BTreeMap<(BuildingKind, u8), CostTableEntry>,
}

impl CostTable {
    /// Index value the table's construction costs are quoted at.
    pub const BASE_INDEX: f64 = 100.0;

    pub fn from_entries(
        entries: impl IntoIterator<Item = ((BuildingKind, StandardLevel), CostTableEntry)>,
    ) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|((kind, standard), entry)| ((kind, standard.get()), entry))
                .collect(),
        }
    }

    /// The built-in cost and useful-life figures per building kind, indexed
    /// by standard levels 1 through 5.
    pub fn standard() -> Self {
        let rows: [(BuildingKind, [f64; 5], [f64; 5]); 5] = [
            (
                BuildingKind::DetachedHouse,
                [800.0, 1000.0, 1200.0, 1400.0, 1600.0],
                [60.0, 65.0, 70.0, 75.0, 80.0],
            ),
            (
                BuildingKind::TwoFamilyHouse,
                [850.0, 1050.0, 1250.0, 1450.0, 1650.0],
                [60.0, 65.0, 70.0, 75.0, 80.0],
            ),
            (
                BuildingKind::RowHouse,
                [700.0, 900.0, 1050.0, 1250.0, 1450.0],
                [60.0, 65.0, 70.0, 75.0, 80.0],
            ),
            (
                BuildingKind::ApartmentBuilding,
                [750.0, 900.0, 1050.0, 1200.0, 1350.0],
                [65.0, 70.0, 70.0, 70.0, 70.0],
            ),
            (
                BuildingKind::Condominium,
                [1000.0, 1200.0, 1400.0, 1600.0, 1800.0],
                [65.0, 70.0, 70.0, 70.0, 70.0],
            ),
        ];

        let mut entries = BTreeMap::new();
        for (kind, costs, lives) in rows {
            for level in 1u8..=5 {
                let position = usize::from(level - 1);
                entries.insert(
                    (kind, level),
                    CostTableEntry {
                        construction_cost: costs[position],
                        total_useful_life: lives[position],
                    },
                );
            }
        }

        Self { entries }
    }

    pub fn lookup(
        &self,
        kind: BuildingKind,
        standard: StandardLevel,
    ) -> Result<CostTableEntry, EvaluationError> {
        self.entries
            .get(&(kind, standard.get()))
            .copied()
            .ok_or(EvaluationError::Lookup {
                kind,
                standard: standard.get(),
            })
    }
}

/// Point credit per modernization feature.
const fn feature_points(feature: ModernizationFeature) -> u32 {
    match feature {
        ModernizationFeature::Roof => 5,
        ModernizationFeature::Windows => 3,
        ModernizationFeature::Heating => 5,
        ModernizationFeature::Plumbing => 4,
        ModernizationFeature::ExteriorInsulation => 4,
        ModernizationFeature::Bathrooms => 3,
        ModernizationFeature::Interior => 2,
        ModernizationFeature::FloorPlan => 2,
    }
}

/// Map modernization features to extra remaining useful life in years.
///
/// Point totals fall into fixed bands; the bonus is a monotonically
/// non-decreasing step function of the total.
pub fn modernization_bonus_years(features: &BTreeSet<ModernizationFeature>) -> f64 {
    let points: u32 = features.iter().copied().map(feature_points).sum();
    match points {
        0..=3 => 0.0,
        4..=7 => 5.0,
        8..=12 => 10.0,
        13..=17 => 15.0,
        _ => 20.0,
    }
}
