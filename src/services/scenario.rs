use serde_json::json;

use crate::domain::direct_cost::DirectCostRow;
use crate::domain::projection::Projection;
use crate::domain::scenario::ScenarioEvent;
use crate::services::aggregate::bases_from_direct;

/// Distinct scenario names in the event table, sorted; a table with no
/// events still yields the single "Base" scenario.
pub fn discover_scenarios(events: &[ScenarioEvent]) -> Vec<String> {
    let mut names: Vec<String> = events.iter().map(|event| event.scenario.clone()).collect();
    names.sort();
    names.dedup();
    if names.is_empty() {
        names.push("Base".to_string());
    }
    names
}

/// Apply one scenario's events to a copy of the baseline. Deltas are
/// additive and apply to every period from the effective period forward;
/// history before it is never touched. Bases are then recomputed from
/// the adjusted project table (a derived view, never patched by
/// deltas), so `TCI == Σ project (DL + Subk + ODC + Travel)` holds
/// after any application.
pub fn apply_scenario_events(
    baseline: &Projection,
    events: &[ScenarioEvent],
    scenario: &str,
) -> Projection {
    let mut pools = baseline.pools.clone();
    let mut direct = baseline.direct_by_project.clone();

    let mut applied = 0usize;
    for event in events.iter().filter(|event| event.scenario == scenario) {
        applied += 1;
        for (period, pool_row) in pools.range_mut(event.effective_period..) {
            for (pool, delta) in &event.deltas.pools {
                *pool_row.entry(pool.clone()).or_insert(0.0) += delta;
            }

            if let Some(project) = &event.project {
                let row = direct
                    .entry(*period)
                    .or_default()
                    .entry(project.clone())
                    .or_insert_with(|| DirectCostRow::new(*period, project));
                row.direct_labor += event.deltas.direct_labor;
                row.direct_labor_hours += event.deltas.direct_labor_hours;
                row.subcontract += event.deltas.subcontract;
                row.other_direct += event.deltas.other_direct;
                row.travel += event.deltas.travel;
            }
        }
    }

    let bases = bases_from_direct(&direct);
    let mut assumptions = baseline.assumptions.clone();
    assumptions.insert("scenario".to_string(), json!(scenario));
    assumptions.insert("events_applied".to_string(), json!(applied));

    Projection {
        pools,
        bases,
        direct_by_project: direct,
        assumptions,
    }
}
