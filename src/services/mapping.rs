use std::collections::{BTreeMap, HashMap};

use crate::domain::account_map::AccountMapping;
use crate::domain::forecast::PipelineWarning;
use crate::domain::ledger::{MappedLedgerRow, NormalizedLedgerRow};

/// Join each ledger row to its pool classification. Rows without a
/// match keep their identity for drill-down but contribute nothing to
/// any pool; one warning is recorded per distinct unmapped account.
pub fn map_accounts_to_pools(
    ledger: &[NormalizedLedgerRow],
    account_map: &[AccountMapping],
) -> (Vec<MappedLedgerRow>, Vec<PipelineWarning>) {
    let by_account: HashMap<&str, &AccountMapping> = account_map
        .iter()
        .map(|mapping| (mapping.account.as_str(), mapping))
        .collect();

    let mut unmapped: BTreeMap<String, usize> = BTreeMap::new();
    let mut mapped = Vec::with_capacity(ledger.len());
    for row in ledger {
        match by_account.get(row.account.as_str()) {
            Some(mapping) => mapped.push(MappedLedgerRow {
                row: row.clone(),
                pool: Some(mapping.pool.clone()),
                is_unallowable: mapping.is_unallowable,
            }),
            None => {
                *unmapped.entry(row.account.clone()).or_insert(0) += 1;
                mapped.push(MappedLedgerRow {
                    row: row.clone(),
                    pool: None,
                    is_unallowable: false,
                });
            }
        }
    }

    let warnings = unmapped
        .into_iter()
        .map(|(account, count)| PipelineWarning::UnmappedAccount { account, count })
        .collect();
    (mapped, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{account_mapping, ledger_row, period};

    #[test]
    fn maps_rows_to_their_pool() {
        let ledger = vec![
            ledger_row(period(2025, 1), "6000", 1_000.0),
            ledger_row(period(2025, 1), "6100", 2_000.0),
        ];
        let map = vec![
            account_mapping("6000", "Fringe", false),
            account_mapping("6100", "Overhead", false),
        ];

        let (mapped, warnings) = map_accounts_to_pools(&ledger, &map);
        assert!(warnings.is_empty());
        assert_eq!(mapped[0].pool.as_deref(), Some("Fringe"));
        assert_eq!(mapped[1].pool.as_deref(), Some("Overhead"));
    }

    #[test]
    fn unmapped_accounts_warn_once_per_account() {
        let ledger = vec![
            ledger_row(period(2025, 1), "9999", 10.0),
            ledger_row(period(2025, 2), "9999", 20.0),
            ledger_row(period(2025, 2), "8888", 30.0),
        ];

        let (mapped, warnings) = map_accounts_to_pools(&ledger, &[]);
        assert!(mapped.iter().all(|row| row.pool.is_none()));
        assert_eq!(
            warnings,
            vec![
                PipelineWarning::UnmappedAccount {
                    account: "8888".to_string(),
                    count: 1,
                },
                PipelineWarning::UnmappedAccount {
                    account: "9999".to_string(),
                    count: 2,
                },
            ]
        );
    }

    #[test]
    fn unallowable_flag_is_carried_through() {
        let ledger = vec![ledger_row(period(2025, 1), "6999", 4_000.0)];
        let map = vec![account_mapping("6999", "Unallowable", true)];

        let (mapped, _) = map_accounts_to_pools(&ledger, &map);
        assert!(mapped[0].is_unallowable);
        assert_eq!(mapped[0].pool.as_deref(), Some("Unallowable"));
    }
}
