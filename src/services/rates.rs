use std::collections::{BTreeMap, BTreeSet};

use crate::domain::account_map::BaseCategory;
use crate::domain::direct_cost::DirectCostRow;
use crate::domain::forecast::{LoadedCost, PipelineWarning};
use crate::domain::period::Period;
use crate::domain::pool::RateStructure;
use crate::domain::projection::Projection;

/// Rates and per-project impacts for one adjusted projection.
#[derive(Debug, Clone, PartialEq)]
pub struct RateComputation {
    pub rates: BTreeMap<Period, BTreeMap<String, f64>>,
    pub project_impacts: BTreeMap<Period, BTreeMap<String, LoadedCost>>,
    pub warnings: Vec<PipelineWarning>,
}

/// Compute pool rates and per-project loaded costs with a single
/// ordered sweep per period: pools are evaluated in ascending cascade
/// order while a running prior-indirect-dollars total is folded into
/// each later pool's base. Fringe divides by raw labor; Overhead's base
/// carries Fringe dollars; G&A's base carries both.
pub fn compute_rates_and_impacts(
    projection: &Projection,
    structure: &RateStructure,
) -> RateComputation {
    let mut warnings = Vec::new();

    let mut rates: BTreeMap<Period, BTreeMap<String, f64>> = BTreeMap::new();
    for (period, pool_row) in &projection.pools {
        let bases = projection.bases.get(period).copied().unwrap_or_default();

        let mut rate_row = BTreeMap::new();
        let mut prior_indirect = 0.0;
        for group in structure.groups() {
            let pool_dollars = pool_row.get(&group.name).copied().unwrap_or(0.0);
            let denominator = bases.value(group.base) + prior_indirect;
            let rate = if denominator == 0.0 {
                if pool_dollars != 0.0 {
                    warnings.push(PipelineWarning::DegenerateBase {
                        period: *period,
                        pool: group.name.clone(),
                        base: group.base,
                    });
                }
                0.0
            } else {
                pool_dollars / denominator
            };
            rate_row.insert(group.name.clone(), rate);
            prior_indirect += pool_dollars;
        }
        rates.insert(*period, rate_row);
    }

    // Pool columns carrying dollars the structure does not know about
    // produce no rate; surface them instead of dropping silently.
    let undefined: BTreeSet<&String> = projection
        .pools
        .values()
        .flat_map(|row| row.iter())
        .filter(|(name, dollars)| **dollars != 0.0 && !structure.contains(name.as_str()))
        .map(|(name, _)| name)
        .collect();
    for pool in undefined {
        warnings.push(PipelineWarning::UndefinedPool { pool: pool.clone() });
    }

    let no_rates = BTreeMap::new();
    let mut project_impacts: BTreeMap<Period, BTreeMap<String, LoadedCost>> = BTreeMap::new();
    for (period, projects) in &projection.direct_by_project {
        let rate_row = rates.get(period).unwrap_or(&no_rates);
        let mut impacts = BTreeMap::new();
        for (project, row) in projects {
            impacts.insert(project.clone(), loaded_cost(row, rate_row, structure));
        }
        project_impacts.insert(*period, impacts);
    }

    RateComputation {
        rates,
        project_impacts,
        warnings,
    }
}

/// Load one project's direct costs with every pool's rate, cascading
/// the project's own prior indirect dollars exactly as the pool bases
/// cascade. The project's share of a pool's base is its own driver
/// value; pools are not pre-allocated by headcount or other proxies.
fn loaded_cost(
    row: &DirectCostRow,
    rates: &BTreeMap<String, f64>,
    structure: &RateStructure,
) -> LoadedCost {
    let total_cost_input = row.total_cost_input();

    let mut pool_dollars = BTreeMap::new();
    let mut prior_indirect = 0.0;
    for group in structure.groups() {
        let driver = match group.base {
            BaseCategory::DirectLabor | BaseCategory::TotalLabor => row.direct_labor,
            BaseCategory::DirectLaborHours => row.direct_labor_hours,
            BaseCategory::TotalCostInput => total_cost_input,
        };
        let rate = rates.get(&group.name).copied().unwrap_or(0.0);
        let dollars = rate * (driver + prior_indirect);
        pool_dollars.insert(group.name.clone(), dollars);
        prior_indirect += dollars;
    }

    LoadedCost {
        direct_labor: row.direct_labor,
        direct_labor_hours: row.direct_labor_hours,
        subcontract: row.subcontract,
        other_direct: row.other_direct,
        travel: row.travel,
        total_cost_input,
        pools: pool_dollars,
        loaded_total: total_cost_input + prior_indirect,
    }
}
