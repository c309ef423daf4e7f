use std::path::Path;

use csv::{ReaderBuilder, Trim};
use thiserror::Error;

pub const LEDGER_FILE: &str = "GL_Actuals.csv";
pub const ACCOUNT_MAP_FILE: &str = "Account_Map.csv";
pub const DIRECT_COSTS_FILE: &str = "Direct_Costs_By_Project.csv";
pub const SCENARIO_EVENTS_FILE: &str = "Scenario_Events.csv";

#[derive(Error, Debug)]
pub enum InputCsvError {
    #[error("missing required input: {0}")]
    MissingFile(String),
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: csv::Error,
    },
}

/// A table as it arrives from disk: column names plus untyped cells.
/// The normalizer turns this into typed rows.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell value by data row index and column name; `None` when the
    /// column is absent or the row is shorter than the header.
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx).map(String::as_str)
    }
}

/// The four raw input tables the pipeline consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct InputTables {
    pub ledger: RawTable,
    pub account_map: RawTable,
    pub direct_costs: RawTable,
    pub scenario_events: RawTable,
}

pub fn load_input_tables(input_dir: &Path) -> Result<InputTables, InputCsvError> {
    Ok(InputTables {
        ledger: read_table(&input_dir.join(LEDGER_FILE))?,
        account_map: read_table(&input_dir.join(ACCOUNT_MAP_FILE))?,
        direct_costs: read_table(&input_dir.join(DIRECT_COSTS_FILE))?,
        scenario_events: read_table(&input_dir.join(SCENARIO_EVENTS_FILE))?,
    })
}

fn read_table(path: &Path) -> Result<RawTable, InputCsvError> {
    if !path.exists() {
        return Err(InputCsvError::MissingFile(path.display().to_string()));
    }
    // flexible: ragged rows surface as short rows, which the normalizer
    // reports per row instead of aborting the whole file.
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|source| InputCsvError::Read {
            path: path.display().to_string(),
            source,
        })?;

    let columns = reader
        .headers()
        .map_err(|source| InputCsvError::Read {
            path: path.display().to_string(),
            source,
        })?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| InputCsvError::Read {
            path: path.display().to_string(),
            source,
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable { columns, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir() -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("ratecast-input-{nanos}"));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn load_input_tables_requires_every_file() {
        let dir = temp_dir();
        std::fs::write(dir.join(LEDGER_FILE), "Period,Account,Amount\n").unwrap();

        let error = load_input_tables(&dir).unwrap_err();
        assert!(matches!(error, InputCsvError::MissingFile(path) if path.contains("Account_Map")));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn read_table_trims_cells_and_keeps_short_rows() {
        let dir = temp_dir();
        let path = dir.join(LEDGER_FILE);
        std::fs::write(&path, "Period, Account ,Amount\n2025-01, 6000 ,100.5\n2025-02,6100\n").unwrap();

        let table = read_table(&path).unwrap();
        assert_eq!(table.columns, ["Period", "Account", "Amount"]);
        assert_eq!(table.value(0, "Account"), Some("6000"));
        assert_eq!(table.value(0, "Amount"), Some("100.5"));
        assert_eq!(table.value(1, "Amount"), None);
        assert_eq!(table.value(0, "Entity"), None);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
