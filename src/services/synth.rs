use std::f64::consts::PI;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use thiserror::Error;

use crate::domain::period::Period;
use crate::services::input_csv::{
    ACCOUNT_MAP_FILE, DIRECT_COSTS_FILE, LEDGER_FILE, SCENARIO_EVENTS_FILE,
};

#[derive(Error, Debug)]
pub enum SynthError {
    #[error("failed to write synthetic dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid distribution parameters")]
    Distribution,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SynthSpec {
    pub start: Period,
    pub months: u32,
    pub projects: u32,
    pub seed: u64,
}

/// Write a seeded synthetic dataset (the four input CSVs) into
/// `out_dir`. Project costs get a mild seasonal swing; pool dollars
/// track the direct base with noise so the resulting rates look like a
/// real trial balance.
pub fn generate_synthetic_dataset(out_dir: &Path, spec: &SynthSpec) -> Result<(), SynthError> {
    std::fs::create_dir_all(out_dir)?;
    let mut rng = StdRng::seed_from_u64(spec.seed);

    let mut periods = Vec::with_capacity(spec.months as usize);
    let mut current = spec.start;
    for _ in 0..spec.months {
        periods.push(current);
        current = current.next();
    }
    let projects: Vec<String> = (1..=spec.projects)
        .map(|idx| format!("P{idx:03}"))
        .collect();

    let labor = normal(250_000.0, 35_000.0)?;
    let wage = normal(110.0, 10.0)?;
    let subk = normal(60_000.0, 15_000.0)?;
    let odc = normal(20_000.0, 5_000.0)?;
    let travel = normal(10_000.0, 4_000.0)?;

    let mut direct_writer = csv::Writer::from_path(out_dir.join(DIRECT_COSTS_FILE))?;
    direct_writer.write_record([
        "Period",
        "Project",
        "DirectLabor$",
        "DirectLaborHrs",
        "Subk",
        "ODC",
        "Travel",
    ])?;

    // Period totals feed the GL below.
    let mut dl_by_period = Vec::with_capacity(periods.len());
    let mut tci_by_period = Vec::with_capacity(periods.len());
    for period in &periods {
        let season = 1.0 + 0.08 * ((f64::from(period.month()) - 1.0) / 12.0 * 2.0 * PI).sin();
        let mut dl_total = 0.0;
        let mut tci_total = 0.0;
        for project in &projects {
            let direct_labor = (labor.sample(&mut rng) * season).max(50_000.0);
            let hours = direct_labor / wage.sample(&mut rng);
            let subcontract = subk.sample(&mut rng).max(0.0);
            let other_direct = odc.sample(&mut rng).max(0.0);
            let travel_cost = travel.sample(&mut rng).max(0.0);

            dl_total += direct_labor;
            tci_total += direct_labor + subcontract + other_direct + travel_cost;
            direct_writer.write_record([
                period.to_string(),
                project.clone(),
                format!("{direct_labor:.2}"),
                format!("{hours:.2}"),
                format!("{subcontract:.2}"),
                format!("{other_direct:.2}"),
                format!("{travel_cost:.2}"),
            ])?;
        }
        dl_by_period.push(dl_total);
        tci_by_period.push(tci_total);
    }
    direct_writer.flush()?;

    let mut map_writer = csv::Writer::from_path(out_dir.join(ACCOUNT_MAP_FILE))?;
    map_writer.write_record(["Account", "Pool", "BaseCategory", "IsUnallowable", "Notes"])?;
    map_writer.write_record(["6000", "Fringe", "TL", "false", "Benefits/Fringe"])?;
    map_writer.write_record(["6100", "Overhead", "DL", "false", "Indirect ops"])?;
    map_writer.write_record(["6200", "G&A", "TCI", "false", "Admin"])?;
    map_writer.write_record(["6999", "Unallowable", "", "true", "Unallowables"])?;
    map_writer.flush()?;

    let fringe_noise = normal(0.0, 12_000.0)?;
    let overhead_noise = normal(0.0, 18_000.0)?;
    let ga_noise = normal(0.0, 10_000.0)?;
    let unallowable = normal(4_000.0, 1_000.0)?;

    let mut gl_writer = csv::Writer::from_path(out_dir.join(LEDGER_FILE))?;
    gl_writer.write_record(["Period", "Account", "Amount"])?;
    for (idx, period) in periods.iter().enumerate() {
        let fringe = dl_by_period[idx] * 0.28 + fringe_noise.sample(&mut rng);
        let overhead = dl_by_period[idx] * 0.55 + overhead_noise.sample(&mut rng);
        let ga = tci_by_period[idx] * 0.12 + ga_noise.sample(&mut rng);
        let rows = [
            ("6000", fringe),
            ("6100", overhead),
            ("6200", ga),
            ("6999", unallowable.sample(&mut rng)),
        ];
        for (account, amount) in rows {
            gl_writer.write_record([
                period.to_string(),
                account.to_string(),
                format!("{amount:.2}"),
            ])?;
        }
    }
    gl_writer.flush()?;

    let effective = periods
        .get(periods.len() * 6 / 10)
        .copied()
        .unwrap_or(spec.start);
    let mut events_writer = csv::Writer::from_path(out_dir.join(SCENARIO_EVENTS_FILE))?;
    events_writer.write_record([
        "Scenario",
        "EffectivePeriod",
        "Type",
        "Project",
        "DeltaDirectLabor$",
        "DeltaDirectLaborHrs",
        "DeltaSubk",
        "DeltaODC",
        "DeltaTravel",
        "DeltaPoolFringe",
        "DeltaPoolOverhead",
        "DeltaPoolGA",
        "Notes",
    ])?;
    let effective = effective.to_string();
    events_writer.write_record([
        "Base",
        effective.as_str(),
        "ADJUST",
        "",
        "0",
        "0",
        "0",
        "0",
        "0",
        "0",
        "0",
        "0",
        "No changes",
    ])?;
    events_writer.write_record([
        "Win",
        effective.as_str(),
        "WIN",
        projects[0].as_str(),
        "90000",
        "800",
        "25000",
        "8000",
        "3000",
        "4000",
        "6000",
        "2000",
        "New award adds base with a small pool lift",
    ])?;
    let lose_project = projects.get(1).unwrap_or(&projects[0]);
    events_writer.write_record([
        "Lose",
        effective.as_str(),
        "LOSE",
        lose_project.as_str(),
        "-110000",
        "-900",
        "-30000",
        "-10000",
        "-4000",
        "0",
        "0",
        "0",
        "Loss shrinks the base while pools stay sticky",
    ])?;
    events_writer.flush()?;

    Ok(())
}

fn normal(mean: f64, std_dev: f64) -> Result<Normal<f64>, SynthError> {
    Normal::new(mean, std_dev).map_err(|_| SynthError::Distribution)
}
