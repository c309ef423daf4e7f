use std::collections::HashSet;

use thiserror::Error;

use crate::domain::account_map::{AccountMapping, BaseCategory};
use crate::domain::direct_cost::DirectCostRow;
use crate::domain::forecast::PipelineWarning;
use crate::domain::ledger::NormalizedLedgerRow;
use crate::domain::period::Period;
use crate::domain::scenario::{CostDeltas, ScenarioEvent};
use crate::services::input_csv::{InputTables, RawTable};

const LEDGER_TABLE: &str = "GL_Actuals";
const ACCOUNT_MAP_TABLE: &str = "Account_Map";
const DIRECT_COSTS_TABLE: &str = "Direct_Costs_By_Project";
const SCENARIO_EVENTS_TABLE: &str = "Scenario_Events";

const DIRECT_COST_COLUMNS: [&str; 5] =
    ["DirectLabor$", "DirectLaborHrs", "Subk", "ODC", "Travel"];
const DELTA_COLUMNS: [&str; 5] = [
    "DeltaDirectLabor$",
    "DeltaDirectLaborHrs",
    "DeltaSubk",
    "DeltaODC",
    "DeltaTravel",
];
const POOL_DELTA_PREFIX: &str = "DeltaPool";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("{table} is missing required column {column}")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
}

/// Canonical, typed inputs plus the non-fatal warnings collected while
/// producing them.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedInputs {
    pub ledger: Vec<NormalizedLedgerRow>,
    pub account_map: Vec<AccountMapping>,
    pub direct_costs: Vec<DirectCostRow>,
    pub events: Vec<ScenarioEvent>,
    pub warnings: Vec<PipelineWarning>,
}

/// Validate and standardize the four raw tables. Missing required
/// columns abort before any row is parsed; malformed rows are excluded
/// and reported so callers can show "N imported, M errors".
pub fn normalize_inputs(tables: &InputTables) -> Result<NormalizedInputs, NormalizeError> {
    require_columns(&tables.ledger, LEDGER_TABLE, &["Period", "Account", "Amount"])?;
    require_columns(&tables.account_map, ACCOUNT_MAP_TABLE, &["Account", "Pool"])?;
    require_columns(&tables.direct_costs, DIRECT_COSTS_TABLE, &["Period", "Project"])?;
    require_columns(&tables.scenario_events, SCENARIO_EVENTS_TABLE, &["EffectivePeriod"])?;

    let mut warnings = Vec::new();
    let ledger = normalize_ledger(&tables.ledger, &mut warnings);
    let account_map = normalize_account_map(&tables.account_map, &mut warnings);
    let direct_costs = normalize_direct_costs(&tables.direct_costs, &mut warnings);
    let events = normalize_scenario_events(&tables.scenario_events, &mut warnings);

    Ok(NormalizedInputs {
        ledger,
        account_map,
        direct_costs,
        events,
        warnings,
    })
}

fn require_columns(
    table: &RawTable,
    name: &'static str,
    required: &[&'static str],
) -> Result<(), NormalizeError> {
    for column in required {
        if !table.has_column(column) {
            return Err(NormalizeError::MissingColumn {
                table: name,
                column,
            });
        }
    }
    Ok(())
}

fn normalize_ledger(
    table: &RawTable,
    warnings: &mut Vec<PipelineWarning>,
) -> Vec<NormalizedLedgerRow> {
    let mut rows = Vec::with_capacity(table.rows.len());
    for idx in 0..table.rows.len() {
        let row_number = idx + 1;
        let Some(period) = parse_period_cell(table, idx, "Period", LEDGER_TABLE, warnings) else {
            continue;
        };
        let account = table.value(idx, "Account").unwrap_or("");
        if account.is_empty() {
            exclude_row(warnings, LEDGER_TABLE, row_number, "Account", account);
            continue;
        }
        let amount_cell = table.value(idx, "Amount").unwrap_or("");
        let Ok(amount) = amount_cell.parse::<f64>() else {
            exclude_row(warnings, LEDGER_TABLE, row_number, "Amount", amount_cell);
            continue;
        };

        rows.push(NormalizedLedgerRow {
            period,
            account: account.to_string(),
            amount,
            entity: table.value(idx, "Entity").unwrap_or("").to_string(),
            source_row: row_number,
        });
    }
    rows
}

fn normalize_account_map(
    table: &RawTable,
    warnings: &mut Vec<PipelineWarning>,
) -> Vec<AccountMapping> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut mappings = Vec::with_capacity(table.rows.len());
    for idx in 0..table.rows.len() {
        let row_number = idx + 1;
        let account = table.value(idx, "Account").unwrap_or("");
        if account.is_empty() {
            exclude_row(warnings, ACCOUNT_MAP_TABLE, row_number, "Account", account);
            continue;
        }
        let pool = table.value(idx, "Pool").unwrap_or("");
        if pool.is_empty() {
            exclude_row(warnings, ACCOUNT_MAP_TABLE, row_number, "Pool", pool);
            continue;
        }
        if !seen.insert(account.to_string()) {
            warnings.push(PipelineWarning::DuplicateAccount {
                account: account.to_string(),
            });
            continue;
        }

        let base_cell = table.value(idx, "BaseCategory").unwrap_or("");
        let base_category = if base_cell.is_empty() {
            None
        } else {
            match base_cell.parse::<BaseCategory>() {
                Ok(category) => Some(category),
                Err(()) => {
                    warnings.push(PipelineWarning::UnknownBaseCategory {
                        row: row_number,
                        value: base_cell.to_string(),
                    });
                    None
                }
            }
        };

        mappings.push(AccountMapping {
            account: account.to_string(),
            pool: pool.to_string(),
            base_category,
            is_unallowable: truthy(table.value(idx, "IsUnallowable").unwrap_or("")),
            notes: table.value(idx, "Notes").unwrap_or("").to_string(),
        });
    }
    mappings
}

fn normalize_direct_costs(
    table: &RawTable,
    warnings: &mut Vec<PipelineWarning>,
) -> Vec<DirectCostRow> {
    for column in DIRECT_COST_COLUMNS {
        if !table.has_column(column) {
            warnings.push(PipelineWarning::ColumnDefaulted {
                table: DIRECT_COSTS_TABLE,
                column,
            });
        }
    }

    let mut rows = Vec::with_capacity(table.rows.len());
    'rows: for idx in 0..table.rows.len() {
        let row_number = idx + 1;
        let Some(period) = parse_period_cell(table, idx, "Period", DIRECT_COSTS_TABLE, warnings)
        else {
            continue;
        };
        let project = table.value(idx, "Project").unwrap_or("");
        if project.is_empty() {
            exclude_row(warnings, DIRECT_COSTS_TABLE, row_number, "Project", project);
            continue;
        }

        let mut values = [0.0_f64; DIRECT_COST_COLUMNS.len()];
        for (slot, column) in values.iter_mut().zip(DIRECT_COST_COLUMNS) {
            match optional_number(table, idx, column) {
                Ok(value) => *slot = value,
                Err(bad) => {
                    exclude_row(warnings, DIRECT_COSTS_TABLE, row_number, column, &bad);
                    continue 'rows;
                }
            }
        }

        let mut row = DirectCostRow::new(period, project);
        row.entity = table.value(idx, "Entity").unwrap_or("").to_string();
        row.direct_labor = values[0];
        row.direct_labor_hours = values[1];
        row.subcontract = values[2];
        row.other_direct = values[3];
        row.travel = values[4];
        rows.push(row);
    }
    rows
}

fn normalize_scenario_events(
    table: &RawTable,
    warnings: &mut Vec<PipelineWarning>,
) -> Vec<ScenarioEvent> {
    let pool_delta_columns: Vec<(String, String)> = table
        .columns
        .iter()
        .filter_map(|column| {
            let suffix = column.strip_prefix(POOL_DELTA_PREFIX)?;
            if suffix.is_empty() {
                return None;
            }
            // Legacy alias kept for older event files.
            let pool = if suffix == "GA" { "G&A" } else { suffix };
            Some((column.clone(), pool.to_string()))
        })
        .collect();

    let mut events = Vec::with_capacity(table.rows.len());
    'rows: for idx in 0..table.rows.len() {
        let row_number = idx + 1;
        let Some(effective_period) =
            parse_period_cell(table, idx, "EffectivePeriod", SCENARIO_EVENTS_TABLE, warnings)
        else {
            continue;
        };

        let mut deltas = CostDeltas::default();
        let mut fixed = [0.0_f64; DELTA_COLUMNS.len()];
        for (slot, column) in fixed.iter_mut().zip(DELTA_COLUMNS) {
            match optional_number(table, idx, column) {
                Ok(value) => *slot = value,
                Err(bad) => {
                    exclude_row(warnings, SCENARIO_EVENTS_TABLE, row_number, column, &bad);
                    continue 'rows;
                }
            }
        }
        deltas.direct_labor = fixed[0];
        deltas.direct_labor_hours = fixed[1];
        deltas.subcontract = fixed[2];
        deltas.other_direct = fixed[3];
        deltas.travel = fixed[4];

        for (column, pool) in &pool_delta_columns {
            match optional_number(table, idx, column) {
                Ok(value) => {
                    if value != 0.0 {
                        deltas.pools.insert(pool.clone(), value);
                    }
                }
                Err(bad) => {
                    exclude_row(warnings, SCENARIO_EVENTS_TABLE, row_number, column, &bad);
                    continue 'rows;
                }
            }
        }

        let scenario = table.value(idx, "Scenario").unwrap_or("");
        let project = table.value(idx, "Project").unwrap_or("");
        events.push(ScenarioEvent {
            scenario: if scenario.is_empty() {
                "Base".to_string()
            } else {
                scenario.to_string()
            },
            effective_period,
            event_type: table.value(idx, "Type").unwrap_or("").to_string(),
            project: if project.is_empty() {
                None
            } else {
                Some(project.to_string())
            },
            deltas,
            notes: table.value(idx, "Notes").unwrap_or("").to_string(),
        });
    }
    events
}

fn parse_period_cell(
    table: &RawTable,
    idx: usize,
    column: &'static str,
    table_name: &'static str,
    warnings: &mut Vec<PipelineWarning>,
) -> Option<Period> {
    let cell = table.value(idx, column).unwrap_or("");
    match cell.parse::<Period>() {
        Ok(period) => Some(period),
        Err(_) => {
            exclude_row(warnings, table_name, idx + 1, column, cell);
            None
        }
    }
}

/// Absent column or empty cell is 0; a present, unparsable value is an
/// error carrying the offending text.
fn optional_number(table: &RawTable, idx: usize, column: &str) -> Result<f64, String> {
    let Some(cell) = table.value(idx, column) else {
        return Ok(0.0);
    };
    if cell.is_empty() {
        return Ok(0.0);
    }
    cell.parse::<f64>().map_err(|_| cell.to_string())
}

fn truthy(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "y"
    )
}

fn exclude_row(
    warnings: &mut Vec<PipelineWarning>,
    table: &'static str,
    row: usize,
    column: &str,
    value: &str,
) {
    warnings.push(PipelineWarning::RowExcluded {
        table,
        row,
        column: column.to_string(),
        value: value.to_string(),
    });
}
