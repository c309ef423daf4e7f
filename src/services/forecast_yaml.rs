use std::collections::BTreeMap;
use std::io::{self, Write};

use serde::Serialize;

use crate::domain::forecast::{ForecastResult, LoadedCost};
use crate::domain::period::Period;
use crate::domain::projection::BaseTotals;

#[derive(Serialize)]
struct ForecastRecord {
    scenario: String,
    assumptions: BTreeMap<String, serde_json::Value>,
    periods: Vec<String>,
    pools: Vec<PeriodValuesRecord>,
    bases: Vec<BasesRecord>,
    rates: Vec<PeriodValuesRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ytd_rates: Option<Vec<PeriodValuesRecord>>,
    project_impacts: Vec<ImpactRecord>,
    warnings: Vec<String>,
}

#[derive(Serialize)]
struct PeriodValuesRecord {
    period: String,
    values: BTreeMap<String, f64>,
}

#[derive(Serialize)]
struct BasesRecord {
    period: String,
    dl: f64,
    tl: f64,
    tci: f64,
    dlh: f64,
}

#[derive(Serialize)]
struct ImpactRecord {
    period: String,
    project: String,
    direct_labor: f64,
    direct_labor_hours: f64,
    subcontract: f64,
    other_direct: f64,
    travel: f64,
    total_cost_input: f64,
    pools: BTreeMap<String, f64>,
    loaded_cost: f64,
}

pub fn serialize_forecast_to_yaml<W: Write>(
    writer: &mut W,
    result: &ForecastResult,
) -> io::Result<()> {
    let record = ForecastRecord {
        scenario: result.scenario.clone(),
        assumptions: result.assumptions.clone(),
        periods: result.periods.iter().map(Period::to_string).collect(),
        pools: period_values_records(&result.pools),
        bases: result.bases.iter().map(bases_record).collect(),
        rates: period_values_records(&result.rates),
        ytd_rates: result.ytd_rates.as_ref().map(period_values_records),
        project_impacts: impact_records(&result.project_impacts),
        warnings: result
            .warnings
            .iter()
            .map(|warning| warning.to_string())
            .collect(),
    };

    let yaml = serde_yaml::to_string(&record)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    writer.write_all(yaml.as_bytes())
}

fn period_values_records(
    table: &BTreeMap<Period, BTreeMap<String, f64>>,
) -> Vec<PeriodValuesRecord> {
    table
        .iter()
        .map(|(period, values)| PeriodValuesRecord {
            period: period.to_string(),
            values: values.clone(),
        })
        .collect()
}

fn bases_record((period, totals): (&Period, &BaseTotals)) -> BasesRecord {
    BasesRecord {
        period: period.to_string(),
        dl: totals.direct_labor,
        tl: totals.total_labor,
        tci: totals.total_cost_input,
        dlh: totals.direct_labor_hours,
    }
}

fn impact_records(
    impacts: &BTreeMap<Period, BTreeMap<String, LoadedCost>>,
) -> Vec<ImpactRecord> {
    let mut records = Vec::new();
    for (period, projects) in impacts {
        for (project, loaded) in projects {
            records.push(ImpactRecord {
                period: period.to_string(),
                project: project.clone(),
                direct_labor: loaded.direct_labor,
                direct_labor_hours: loaded.direct_labor_hours,
                subcontract: loaded.subcontract,
                other_direct: loaded.other_direct,
                travel: loaded.travel,
                total_cost_input: loaded.total_cost_input,
                pools: loaded.pools.clone(),
                loaded_cost: loaded.loaded_total,
            });
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pool::default_rate_structure;
    use crate::services::rates::compute_rates_and_impacts;
    use crate::test_support::{period, single_period_projection};

    fn build_result() -> ForecastResult {
        let projection = single_period_projection(
            period(2025, 1),
            &[("Fringe", 25_000.0), ("Overhead", 12_500.0), ("G&A", 28_125.0)],
            100_000.0,
            50_000.0,
        );
        let computation = compute_rates_and_impacts(&projection, &default_rate_structure());
        ForecastResult {
            scenario: "Base".to_string(),
            periods: projection.periods(),
            pools: projection.pools.clone(),
            bases: projection.bases.clone(),
            rates: computation.rates,
            project_impacts: computation.project_impacts,
            ytd_rates: None,
            assumptions: projection.assumptions.clone(),
            warnings: computation.warnings,
        }
    }

    #[test]
    fn serializes_rates_and_impacts() {
        let mut buffer = Vec::new();
        serialize_forecast_to_yaml(&mut buffer, &build_result()).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert!(output.contains("scenario: Base"));
        assert!(output.contains("period: 2025-01"));
        assert!(output.contains("Fringe: 0.25"));
        assert!(output.contains("loaded_cost: 215625"));
        assert!(!output.contains("ytd_rates"));
    }

    #[test]
    fn identical_results_serialize_identically() {
        let result = build_result();
        let mut first = Vec::new();
        let mut second = Vec::new();
        serialize_forecast_to_yaml(&mut first, &result).unwrap();
        serialize_forecast_to_yaml(&mut second, &result).unwrap();
        assert_eq!(first, second);
    }
}
