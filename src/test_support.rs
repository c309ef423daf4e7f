use std::collections::BTreeMap;

use crate::domain::account_map::AccountMapping;
use crate::domain::direct_cost::DirectCostRow;
use crate::domain::ledger::{MappedLedgerRow, NormalizedLedgerRow};
use crate::domain::period::Period;
use crate::domain::projection::{BaseTotals, Projection};
use crate::domain::scenario::{CostDeltas, ScenarioEvent};
use crate::services::input_csv::RawTable;

pub fn period(year: i32, month: u32) -> Period {
    Period::new(year, month).unwrap()
}

pub fn raw_table(columns: &[&str], rows: &[&[&str]]) -> RawTable {
    RawTable {
        columns: columns.iter().map(|column| column.to_string()).collect(),
        rows: rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect(),
    }
}

pub fn empty_events_table() -> RawTable {
    raw_table(&["Scenario", "EffectivePeriod"], &[])
}

pub fn ledger_row(period: Period, account: &str, amount: f64) -> NormalizedLedgerRow {
    NormalizedLedgerRow {
        period,
        account: account.to_string(),
        amount,
        entity: String::new(),
        source_row: 1,
    }
}

pub fn mapped_row(
    period: Period,
    account: &str,
    amount: f64,
    pool: Option<&str>,
    is_unallowable: bool,
) -> MappedLedgerRow {
    MappedLedgerRow {
        row: ledger_row(period, account, amount),
        pool: pool.map(str::to_string),
        is_unallowable,
    }
}

pub fn account_mapping(account: &str, pool: &str, is_unallowable: bool) -> AccountMapping {
    AccountMapping {
        account: account.to_string(),
        pool: pool.to_string(),
        base_category: None,
        is_unallowable,
        notes: String::new(),
    }
}

pub fn direct_row(
    period: Period,
    project: &str,
    direct_labor: f64,
    hours: f64,
    subcontract: f64,
    other_direct: f64,
    travel: f64,
) -> DirectCostRow {
    let mut row = DirectCostRow::new(period, project);
    row.direct_labor = direct_labor;
    row.direct_labor_hours = hours;
    row.subcontract = subcontract;
    row.other_direct = other_direct;
    row.travel = travel;
    row
}

pub fn scenario_event(scenario: &str, effective: Period, project: Option<&str>) -> ScenarioEvent {
    ScenarioEvent {
        scenario: scenario.to_string(),
        effective_period: effective,
        event_type: String::new(),
        project: project.map(str::to_string),
        deltas: CostDeltas::default(),
        notes: String::new(),
    }
}

pub fn with_pool_delta(mut event: ScenarioEvent, pool: &str, delta: f64) -> ScenarioEvent {
    event.deltas.pools.insert(pool.to_string(), delta);
    event
}

/// A one-period projection with a single project carrying the given
/// direct labor and subcontract dollars.
pub fn single_period_projection(
    period: Period,
    pools: &[(&str, f64)],
    direct_labor: f64,
    subcontract: f64,
) -> Projection {
    let mut pool_row = BTreeMap::new();
    for (name, dollars) in pools {
        pool_row.insert(name.to_string(), *dollars);
    }

    let mut project_row = DirectCostRow::new(period, "P001");
    project_row.direct_labor = direct_labor;
    project_row.subcontract = subcontract;

    let mut projects = BTreeMap::new();
    projects.insert("P001".to_string(), project_row);

    let bases = BaseTotals {
        direct_labor,
        total_labor: direct_labor,
        total_cost_input: direct_labor + subcontract,
        direct_labor_hours: 0.0,
    };

    Projection {
        pools: BTreeMap::from([(period, pool_row)]),
        bases: BTreeMap::from([(period, bases)]),
        direct_by_project: BTreeMap::from([(period, projects)]),
        assumptions: BTreeMap::new(),
    }
}

/// One pool ("Fringe") per period with identical labor-driven bases.
pub fn projection_with_monthly_pools(rows: &[(Period, f64, f64)]) -> Projection {
    let mut pools = BTreeMap::new();
    let mut bases = BTreeMap::new();
    let mut direct = BTreeMap::new();
    for (period, fringe, labor) in rows {
        pools.insert(*period, BTreeMap::from([("Fringe".to_string(), *fringe)]));
        bases.insert(
            *period,
            BaseTotals {
                direct_labor: *labor,
                total_labor: *labor,
                total_cost_input: *labor,
                direct_labor_hours: 0.0,
            },
        );
        let mut row = DirectCostRow::new(*period, "P001");
        row.direct_labor = *labor;
        direct.insert(*period, BTreeMap::from([("P001".to_string(), row)]));
    }
    Projection {
        pools,
        bases,
        direct_by_project: direct,
        assumptions: BTreeMap::new(),
    }
}
