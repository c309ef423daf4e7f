use std::collections::BTreeMap;

use crate::domain::direct_cost::DirectCostRow;
use crate::domain::forecast::PipelineWarning;
use crate::domain::ledger::MappedLedgerRow;
use crate::domain::period::Period;
use crate::domain::projection::BaseTotals;

/// Period-level actuals: pool dollars, base totals, and the per-project
/// direct cost table all three downstream stages work from.
#[derive(Debug, Clone, PartialEq)]
pub struct ActualAggregates {
    pub pools: BTreeMap<Period, BTreeMap<String, f64>>,
    pub bases: BTreeMap<Period, BaseTotals>,
    pub direct_by_project: BTreeMap<Period, BTreeMap<String, DirectCostRow>>,
}

/// Reduce mapped ledger rows and direct costs into the aggregate tables.
/// Unallowable and unmapped rows are excluded from pool dollars; the
/// period axis is the union of both inputs, zero-filled on the missing
/// side, so no period is ever dropped.
pub fn compute_actual_aggregates(
    mapped: &[MappedLedgerRow],
    direct_costs: &[DirectCostRow],
    entity: Option<&str>,
) -> (ActualAggregates, Vec<PipelineWarning>) {
    let mut warnings = Vec::new();

    let mut pools: BTreeMap<Period, BTreeMap<String, f64>> = BTreeMap::new();
    let mut pooled_any = false;
    for row in mapped {
        if let Some(filter) = entity {
            if row.row.entity != filter {
                continue;
            }
        }
        pooled_any = true;
        let Some(pool) = &row.pool else { continue };
        if row.is_unallowable {
            continue;
        }
        *pools
            .entry(row.row.period)
            .or_default()
            .entry(pool.clone())
            .or_insert(0.0) += row.row.amount;
    }
    if let Some(filter) = entity {
        if !mapped.is_empty() && !pooled_any {
            warnings.push(PipelineWarning::EntityFilterEmpty {
                entity: filter.to_string(),
            });
        }
    }

    // Direct costs can only be filtered when they actually carry entity
    // tags; an untagged table is kept whole.
    let filter_direct = entity.is_some() && direct_costs.iter().any(|row| !row.entity.is_empty());
    let mut direct_by_project: BTreeMap<Period, BTreeMap<String, DirectCostRow>> = BTreeMap::new();
    for row in direct_costs {
        if filter_direct && entity != Some(row.entity.as_str()) {
            continue;
        }
        direct_by_project
            .entry(row.period)
            .or_default()
            .entry(row.project.clone())
            .and_modify(|existing| existing.add_costs(row))
            .or_insert_with(|| row.clone());
    }

    // Union axis: every period seen on either side appears in all three
    // tables.
    let periods: Vec<Period> = pools
        .keys()
        .chain(direct_by_project.keys())
        .copied()
        .collect();
    for period in periods {
        pools.entry(period).or_default();
        direct_by_project.entry(period).or_default();
    }

    let bases = bases_from_direct(&direct_by_project);
    (
        ActualAggregates {
            pools,
            bases,
            direct_by_project,
        },
        warnings,
    )
}

/// Derive allocation base totals from the per-project table. This is
/// the single definition of every base category; the scenario engine
/// reuses it so adjusted bases always reconcile with project costs.
pub fn bases_from_direct(
    direct_by_project: &BTreeMap<Period, BTreeMap<String, DirectCostRow>>,
) -> BTreeMap<Period, BaseTotals> {
    direct_by_project
        .iter()
        .map(|(period, projects)| {
            let mut totals = BaseTotals::default();
            for row in projects.values() {
                totals.direct_labor += row.direct_labor;
                totals.total_labor += row.direct_labor;
                totals.total_cost_input += row.total_cost_input();
                totals.direct_labor_hours += row.direct_labor_hours;
            }
            (*period, totals)
        })
        .collect()
}
