use std::path::Path;

use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_forecast_report;
use crate::domain::period::Period;
use crate::domain::pool::default_rate_structure;
use crate::services::forecast_yaml::serialize_forecast_to_yaml;
use crate::services::input_csv::load_input_tables;
use crate::services::pipeline::{run_forecast, ForecastPlan};
use crate::services::rate_config_yaml::load_rate_structure_from_yaml_file;

pub fn run_command(cmd: Commands) {
    if let Commands::Run {
        input,
        output,
        scenario,
        config,
        forecast_months,
        run_rate_months,
        entity,
        fy_start,
    } = cmd
    {
        let structure = match config {
            Some(path) => match load_rate_structure_from_yaml_file(&path) {
                Ok(structure) => structure,
                Err(e) => {
                    eprintln!("Failed to load rate structure: {e:?}");
                    return;
                }
            },
            None => default_rate_structure(),
        };

        let fiscal_year_start = match fy_start {
            None => None,
            Some(value) => match value.parse::<Period>() {
                Ok(period) => Some(period),
                Err(e) => {
                    eprintln!("Failed to parse fiscal year start: {e:?}");
                    return;
                }
            },
        };

        let tables = match load_input_tables(Path::new(&input)) {
            Ok(tables) => tables,
            Err(e) => {
                eprintln!("Failed to load input tables: {e:?}");
                return;
            }
        };

        let plan = ForecastPlan {
            scenario,
            forecast_months,
            run_rate_months,
            entity,
            fiscal_year_start,
        };
        let results = match run_forecast(&tables, &structure, &plan) {
            Ok(results) => results,
            Err(e) => {
                eprintln!("Forecast failed: {e}");
                return;
            }
        };

        if let Err(e) = std::fs::create_dir_all(&output) {
            eprintln!("Failed to create output directory: {e:?}");
            return;
        }
        for result in &results {
            let path = Path::new(&output).join(format!("{}.yaml", result.scenario));
            let mut buffer = Vec::new();
            if let Err(e) = serialize_forecast_to_yaml(&mut buffer, result) {
                eprintln!("Failed to serialize forecast for {}: {e:?}", result.scenario);
                return;
            }
            if let Err(e) = std::fs::write(&path, buffer) {
                eprintln!("Failed to write forecast output: {e:?}");
                return;
            }

            println!("{}", format_forecast_report(result));
            println!();
            println!(
                "Forecast for scenario {} written to {}",
                result.scenario,
                path.display()
            );
        }
    }
}
