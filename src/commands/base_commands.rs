use chrono::Local;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Forecast indirect rates from a directory of input CSVs
    Run {
        /// Input directory containing GL_Actuals.csv, Account_Map.csv,
        /// Direct_Costs_By_Project.csv and Scenario_Events.csv
        #[arg(short, long)]
        input: String,
        /// Output directory for the per-scenario forecast YAML files
        #[arg(short, long)]
        output: String,
        /// Scenario name (omit to run every scenario found in the events table)
        #[arg(short, long)]
        scenario: Option<String>,
        /// Rate structure YAML (omit to use the built-in Fringe/Overhead/G&A tiers)
        #[arg(short, long)]
        config: Option<String>,
        /// Months beyond the last actual period to project
        #[arg(short = 'f', long, default_value_t = 12, value_parser = clap::value_parser!(u32).range(1..))]
        forecast_months: u32,
        /// Months to average for the run-rate projection
        #[arg(short = 'r', long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
        run_rate_months: u32,
        /// Restrict ledger rows to a single entity
        #[arg(short, long)]
        entity: Option<String>,
        /// Fiscal year start (YYYY-MM); adds year-to-date rates to the output
        #[arg(long)]
        fy_start: Option<String>,
    },
    /// Generate a synthetic input dataset for demos and testing
    Synth {
        /// Output directory for the four input CSVs
        #[arg(short, long)]
        output: String,
        /// First period of the dataset (YYYY-MM)
        #[arg(short, long, default_value_t = default_start_period())]
        start: String,
        /// Number of months
        #[arg(short, long, default_value_t = 18, value_parser = clap::value_parser!(u32).range(3..))]
        months: u32,
        /// Number of projects
        #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
        projects: u32,
        /// RNG seed
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn default_start_period() -> String {
    Local::now().format("%Y-%m").to_string()
}
