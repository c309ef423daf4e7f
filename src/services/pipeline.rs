use thiserror::Error;

use crate::domain::forecast::{ForecastResult, PipelineWarning};
use crate::domain::period::Period;
use crate::domain::pool::RateStructure;
use crate::services::aggregate::compute_actual_aggregates;
use crate::services::baseline::{build_baseline_projection, BaselineError};
use crate::services::input_csv::InputTables;
use crate::services::mapping::map_accounts_to_pools;
use crate::services::normalize::{normalize_inputs, NormalizeError};
use crate::services::rates::compute_rates_and_impacts;
use crate::services::scenario::{apply_scenario_events, discover_scenarios};
use crate::services::ytd::compute_ytd_rates;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("input validation failed: {0}")]
    Normalize(#[from] NormalizeError),
    #[error("baseline projection failed: {0}")]
    Baseline(#[from] BaselineError),
}

/// Parameters for one forecast run. With no explicit scenario, every
/// scenario named in the event table is evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPlan {
    pub scenario: Option<String>,
    pub forecast_months: u32,
    pub run_rate_months: u32,
    pub entity: Option<String>,
    pub fiscal_year_start: Option<Period>,
}

/// Run the full pipeline: normalize → map → aggregate → project →
/// per scenario, apply events and compute rates and impacts. Pure:
/// identical inputs and plan produce identical results, so scenarios
/// could be evaluated in parallel since each works on its own copy of the
/// baseline.
pub fn run_forecast(
    tables: &InputTables,
    structure: &RateStructure,
    plan: &ForecastPlan,
) -> Result<Vec<ForecastResult>, PipelineError> {
    let normalized = normalize_inputs(tables)?;
    let mut warnings = normalized.warnings.clone();

    let (mapped, map_warnings) = map_accounts_to_pools(&normalized.ledger, &normalized.account_map);
    warnings.extend(map_warnings);

    let (aggregates, aggregate_warnings) =
        compute_actual_aggregates(&mapped, &normalized.direct_costs, plan.entity.as_deref());
    warnings.extend(aggregate_warnings);

    let (baseline, baseline_warnings) =
        build_baseline_projection(&aggregates, plan.forecast_months, plan.run_rate_months)?;
    warnings.extend(baseline_warnings);

    let scenarios = match &plan.scenario {
        Some(name) => vec![name.clone()],
        None => discover_scenarios(&normalized.events),
    };

    let mut results = Vec::with_capacity(scenarios.len());
    for scenario in scenarios {
        let projection = apply_scenario_events(&baseline, &normalized.events, &scenario);
        let computation = compute_rates_and_impacts(&projection, structure);
        let ytd_rates = plan
            .fiscal_year_start
            .map(|fy_start| compute_ytd_rates(&projection, structure, fy_start));

        let mut scenario_warnings = warnings.clone();
        scenario_warnings.extend(computation.warnings);
        results.push(ForecastResult {
            scenario,
            periods: projection.periods(),
            pools: projection.pools,
            bases: projection.bases,
            rates: computation.rates,
            project_impacts: computation.project_impacts,
            ytd_rates,
            assumptions: projection.assumptions,
            warnings: dedupe(scenario_warnings),
        });
    }
    Ok(results)
}

/// Keep the first occurrence of each warning, preserving order.
fn dedupe(warnings: Vec<PipelineWarning>) -> Vec<PipelineWarning> {
    let mut unique: Vec<PipelineWarning> = Vec::with_capacity(warnings.len());
    for warning in warnings {
        if !unique.contains(&warning) {
            unique.push(warning);
        }
    }
    unique
}
