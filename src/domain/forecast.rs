use std::collections::BTreeMap;

use thiserror::Error;

use crate::domain::account_map::BaseCategory;
use crate::domain::period::Period;
use crate::domain::projection::BaseTotals;

/// Non-fatal conditions accumulated across the pipeline and attached to
/// the ForecastResult, so callers can present "success with caveats".
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineWarning {
    #[error("{table} row {row}: invalid {column} '{value}'; row excluded")]
    RowExcluded {
        table: &'static str,
        row: usize,
        column: String,
        value: String,
    },
    #[error("{table} missing optional column {column}; defaulting to 0")]
    ColumnDefaulted {
        table: &'static str,
        column: &'static str,
    },
    #[error("account map row {row}: unknown base category '{value}'; ignored")]
    UnknownBaseCategory { row: usize, value: String },
    #[error("duplicate account '{account}' in account map; first mapping kept")]
    DuplicateAccount { account: String },
    #[error("{count} ledger rows reference unmapped account '{account}'; excluded from all pools")]
    UnmappedAccount { account: String, count: usize },
    #[error("no ledger rows match entity '{entity}'")]
    EntityFilterEmpty { entity: String },
    #[error("negative base values detected; rates may be distorted")]
    NegativeBases,
    #[error("{period}: {base} base is zero for pool '{pool}' with nonzero dollars; rate reported as 0")]
    DegenerateBase {
        period: Period,
        pool: String,
        base: BaseCategory,
    },
    #[error("pool '{pool}' has dollars but no rate definition; no rate computed")]
    UndefinedPool { pool: String },
}

/// Fully loaded cost for one project in one period: its direct costs
/// plus each pool's allocated indirect dollars.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedCost {
    pub direct_labor: f64,
    pub direct_labor_hours: f64,
    pub subcontract: f64,
    pub other_direct: f64,
    pub travel: f64,
    pub total_cost_input: f64,
    pub pools: BTreeMap<String, f64>,
    pub loaded_total: f64,
}

/// Terminal, immutable output artifact for one scenario run.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    pub scenario: String,
    pub periods: Vec<Period>,
    pub pools: BTreeMap<Period, BTreeMap<String, f64>>,
    pub bases: BTreeMap<Period, BaseTotals>,
    pub rates: BTreeMap<Period, BTreeMap<String, f64>>,
    pub project_impacts: BTreeMap<Period, BTreeMap<String, LoadedCost>>,
    pub ytd_rates: Option<BTreeMap<Period, BTreeMap<String, f64>>>,
    pub assumptions: BTreeMap<String, serde_json::Value>,
    pub warnings: Vec<PipelineWarning>,
}
