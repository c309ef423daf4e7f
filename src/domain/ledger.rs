use crate::domain::period::Period;

/// One general-ledger posting after normalization. Credits and reversals
/// carry negative amounts.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedLedgerRow {
    pub period: Period,
    pub account: String,
    pub amount: f64,
    pub entity: String,
    /// 1-based data row number in the source table, for drill-down.
    pub source_row: usize,
}

/// A ledger row joined to its pool classification. Unmapped rows keep
/// `pool = None` and contribute nothing to any pool or base.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedLedgerRow {
    pub row: NormalizedLedgerRow,
    pub pool: Option<String>,
    pub is_unallowable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapped_row_keeps_source_identity() {
        let row = NormalizedLedgerRow {
            period: Period::new(2025, 1).unwrap(),
            account: "6000".to_string(),
            amount: -125.5,
            entity: String::new(),
            source_row: 7,
        };
        let mapped = MappedLedgerRow {
            row: row.clone(),
            pool: Some("Fringe".to_string()),
            is_unallowable: false,
        };
        assert_eq!(mapped.row, row);
        assert_eq!(mapped.row.source_row, 7);
    }
}
