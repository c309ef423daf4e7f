use std::collections::BTreeMap;

use crate::domain::account_map::BaseCategory;
use crate::domain::direct_cost::DirectCostRow;
use crate::domain::period::Period;

/// Allocation base totals for one period. Always derived from the
/// per-project direct cost table, never adjusted in place, so pool rates
/// and project impacts reconcile by construction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BaseTotals {
    pub direct_labor: f64,
    pub total_labor: f64,
    pub total_cost_input: f64,
    pub direct_labor_hours: f64,
}

impl BaseTotals {
    pub fn value(&self, category: BaseCategory) -> f64 {
        match category {
            BaseCategory::DirectLabor => self.direct_labor,
            BaseCategory::TotalLabor => self.total_labor,
            BaseCategory::TotalCostInput => self.total_cost_input,
            BaseCategory::DirectLaborHours => self.direct_labor_hours,
        }
    }
}

/// The working state threaded from the baseline projector into the
/// scenario engine. Scenario-scoped: the engine clones a baseline and
/// adjusts the copy, so parallel scenario runs never share state.
///
/// All three tables share the same contiguous period axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub pools: BTreeMap<Period, BTreeMap<String, f64>>,
    pub bases: BTreeMap<Period, BaseTotals>,
    pub direct_by_project: BTreeMap<Period, BTreeMap<String, DirectCostRow>>,
    pub assumptions: BTreeMap<String, serde_json::Value>,
}

impl Projection {
    pub fn periods(&self) -> Vec<Period> {
        self.pools.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_totals_value_selects_by_category() {
        let totals = BaseTotals {
            direct_labor: 1.0,
            total_labor: 2.0,
            total_cost_input: 3.0,
            direct_labor_hours: 4.0,
        };
        assert_eq!(totals.value(BaseCategory::DirectLabor), 1.0);
        assert_eq!(totals.value(BaseCategory::TotalLabor), 2.0);
        assert_eq!(totals.value(BaseCategory::TotalCostInput), 3.0);
        assert_eq!(totals.value(BaseCategory::DirectLaborHours), 4.0);
    }
}
