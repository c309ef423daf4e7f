use std::collections::{BTreeMap, BTreeSet};

use serde_json::json;
use thiserror::Error;

use crate::domain::direct_cost::DirectCostRow;
use crate::domain::forecast::PipelineWarning;
use crate::domain::period::Period;
use crate::domain::projection::Projection;
use crate::services::aggregate::{bases_from_direct, ActualAggregates};

pub const RUN_RATE_METHOD: &str = "rolling_run_rate";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BaselineError {
    #[error("no actual periods available; cannot project a baseline")]
    NoActualPeriods,
}

/// Extend the actual aggregates `forecast_months` beyond the last actual
/// period. Each projected period is the trailing average of the
/// `run_rate_months` periods immediately preceding it; projected periods
/// feed forward into later windows (a rolling window, not a fixed
/// anchor). Deliberately simple and auditable: no regression, no
/// seasonality.
pub fn build_baseline_projection(
    actuals: &ActualAggregates,
    forecast_months: u32,
    run_rate_months: u32,
) -> Result<(Projection, Vec<PipelineWarning>), BaselineError> {
    let first = *actuals
        .pools
        .keys()
        .next()
        .ok_or(BaselineError::NoActualPeriods)?;
    let last_actual = *actuals.pools.keys().next_back().unwrap_or(&first);

    // Contiguous month axis; interior months missing from the actuals
    // are zero-filled rather than skipped.
    let mut axis = Period::range_inclusive(first, last_actual);
    let mut pools = actuals.pools.clone();
    let mut direct = actuals.direct_by_project.clone();
    for period in &axis {
        pools.entry(*period).or_default();
        direct.entry(*period).or_default();
    }

    let pool_names: BTreeSet<String> = pools
        .values()
        .flat_map(|row| row.keys().cloned())
        .collect();

    let window_len = run_rate_months.max(1) as usize;
    for _ in 0..forecast_months {
        let next = axis.last().copied().unwrap_or(last_actual).next();
        let window: Vec<Period> = axis.iter().rev().take(window_len).copied().collect();
        let divisor = window.len() as f64;

        let mut pool_row = BTreeMap::new();
        for name in &pool_names {
            let sum: f64 = window
                .iter()
                .map(|period| pools[period].get(name).copied().unwrap_or(0.0))
                .sum();
            pool_row.insert(name.clone(), sum / divisor);
        }

        // Projects with no history in the window get no invented row.
        let window_projects: BTreeSet<String> = window
            .iter()
            .flat_map(|period| direct[period].keys().cloned())
            .collect();
        let mut direct_row = BTreeMap::new();
        for project in window_projects {
            let mut projected = DirectCostRow::new(next, &project);
            for period in &window {
                if let Some(row) = direct[period].get(&project) {
                    projected.add_costs(row);
                }
            }
            projected.direct_labor /= divisor;
            projected.direct_labor_hours /= divisor;
            projected.subcontract /= divisor;
            projected.other_direct /= divisor;
            projected.travel /= divisor;
            direct_row.insert(project, projected);
        }

        pools.insert(next, pool_row);
        direct.insert(next, direct_row);
        axis.push(next);
    }

    let bases = bases_from_direct(&direct);
    let mut warnings = Vec::new();
    if bases.values().any(|totals| {
        totals.direct_labor < 0.0 || totals.total_labor < 0.0 || totals.total_cost_input < 0.0
    }) {
        warnings.push(PipelineWarning::NegativeBases);
    }

    let mut assumptions = BTreeMap::new();
    assumptions.insert("method".to_string(), json!(RUN_RATE_METHOD));
    assumptions.insert("run_rate_months".to_string(), json!(run_rate_months));
    assumptions.insert("forecast_months".to_string(), json!(forecast_months));
    assumptions.insert(
        "last_actual_period".to_string(),
        json!(last_actual.to_string()),
    );

    Ok((
        Projection {
            pools,
            bases,
            direct_by_project: direct,
            assumptions,
        },
        warnings,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{direct_row, mapped_row, period};
    use crate::services::aggregate::compute_actual_aggregates;

    fn aggregates_for(
        pool_amounts: &[(Period, f64)],
        direct: &[DirectCostRow],
    ) -> ActualAggregates {
        let mapped: Vec<_> = pool_amounts
            .iter()
            .map(|(p, amount)| mapped_row(*p, "6000", *amount, Some("Fringe"), false))
            .collect();
        compute_actual_aggregates(&mapped, direct, None).0
    }

    #[test]
    fn zero_actual_periods_is_fatal() {
        let aggregates = ActualAggregates {
            pools: BTreeMap::new(),
            bases: BTreeMap::new(),
            direct_by_project: BTreeMap::new(),
        };
        let error = build_baseline_projection(&aggregates, 3, 3).unwrap_err();
        assert_eq!(error, BaselineError::NoActualPeriods);
    }

    #[test]
    fn averages_over_fewer_periods_than_the_window() {
        // Two actuals with a window of three must average the two, not fail.
        let aggregates = aggregates_for(
            &[(period(2025, 1), 100.0), (period(2025, 2), 200.0)],
            &[],
        );
        let (projection, _) = build_baseline_projection(&aggregates, 1, 3).unwrap();
        assert_eq!(projection.pools[&period(2025, 3)]["Fringe"], 150.0);
    }

    #[test]
    fn projected_periods_feed_forward_into_later_windows() {
        let aggregates = aggregates_for(
            &[(period(2025, 1), 100.0), (period(2025, 2), 200.0)],
            &[],
        );
        let (projection, _) = build_baseline_projection(&aggregates, 2, 2).unwrap();
        // 2025-03 = mean(100, 200) = 150; 2025-04 = mean(200, 150) = 175.
        assert_eq!(projection.pools[&period(2025, 3)]["Fringe"], 150.0);
        assert_eq!(projection.pools[&period(2025, 4)]["Fringe"], 175.0);
    }

    #[test]
    fn interior_gap_months_are_zero_filled() {
        let aggregates = aggregates_for(
            &[(period(2025, 1), 300.0), (period(2025, 3), 600.0)],
            &[],
        );
        let (projection, _) = build_baseline_projection(&aggregates, 1, 3).unwrap();
        assert_eq!(projection.pools[&period(2025, 2)].get("Fringe"), None);
        // Window mean treats the gap month as zero: (300 + 0 + 600) / 3.
        assert_eq!(projection.pools[&period(2025, 4)]["Fringe"], 300.0);
    }

    #[test]
    fn projects_outside_the_window_are_not_invented() {
        let direct = vec![
            direct_row(period(2025, 1), "OLD", 500.0, 5.0, 0.0, 0.0, 0.0),
            direct_row(period(2025, 4), "NEW", 900.0, 9.0, 0.0, 0.0, 0.0),
        ];
        let aggregates = aggregates_for(&[(period(2025, 1), 10.0), (period(2025, 4), 10.0)], &direct);

        let (projection, _) = build_baseline_projection(&aggregates, 1, 2).unwrap();
        let projected = &projection.direct_by_project[&period(2025, 5)];
        assert!(projected.contains_key("NEW"));
        assert!(!projected.contains_key("OLD"));
        // NEW appears in one of the two window months: 900 / 2.
        assert_eq!(projected["NEW"].direct_labor, 450.0);
    }

    #[test]
    fn bases_reconcile_with_the_projected_project_table() {
        let direct = vec![
            direct_row(period(2025, 1), "P001", 100.0, 1.0, 40.0, 10.0, 5.0),
            direct_row(period(2025, 2), "P001", 200.0, 2.0, 60.0, 20.0, 15.0),
        ];
        let aggregates = aggregates_for(&[(period(2025, 1), 50.0), (period(2025, 2), 50.0)], &direct);

        let (projection, _) = build_baseline_projection(&aggregates, 3, 2).unwrap();
        for (p, totals) in &projection.bases {
            let from_projects: f64 = projection.direct_by_project[p]
                .values()
                .map(|row| row.total_cost_input())
                .sum();
            assert!((totals.total_cost_input - from_projects).abs() < 1e-9);
        }
    }

    #[test]
    fn negative_bases_are_flagged() {
        let direct = vec![direct_row(period(2025, 1), "P001", -100.0, 0.0, 0.0, 0.0, 0.0)];
        let aggregates = aggregates_for(&[(period(2025, 1), 10.0)], &direct);

        let (_, warnings) = build_baseline_projection(&aggregates, 1, 3).unwrap();
        assert_eq!(warnings, vec![PipelineWarning::NegativeBases]);
    }

    #[test]
    fn assumptions_record_method_and_parameters() {
        let aggregates = aggregates_for(&[(period(2025, 1), 10.0)], &[]);
        let (projection, _) = build_baseline_projection(&aggregates, 6, 3).unwrap();

        assert_eq!(projection.assumptions["method"], json!(RUN_RATE_METHOD));
        assert_eq!(projection.assumptions["run_rate_months"], json!(3));
        assert_eq!(projection.assumptions["forecast_months"], json!(6));
        assert_eq!(projection.assumptions["last_actual_period"], json!("2025-01"));
    }
}
