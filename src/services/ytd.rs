use std::collections::BTreeMap;

use crate::domain::period::Period;
use crate::domain::pool::RateStructure;
use crate::domain::projection::{BaseTotals, Projection};

/// Cumulative year-to-date rates for every period in the projection.
/// Each period's window runs from the start of its fiscal year (derived
/// from `fy_start`'s month) through the period itself, with the same
/// cascaded denominators as the monthly rates. Zero denominators yield
/// a 0 rate.
pub fn compute_ytd_rates(
    projection: &Projection,
    structure: &RateStructure,
    fy_start: Period,
) -> BTreeMap<Period, BTreeMap<String, f64>> {
    let fy_month = fy_start.month();

    let mut ytd = BTreeMap::new();
    for period in projection.pools.keys() {
        let fy_begin = fiscal_year_begin(*period, fy_month);

        let mut cumulative_pools: BTreeMap<&str, f64> = BTreeMap::new();
        let mut cumulative_bases = BaseTotals::default();
        for (window_period, pool_row) in projection.pools.range(fy_begin..=*period) {
            for (name, dollars) in pool_row {
                *cumulative_pools.entry(name.as_str()).or_insert(0.0) += dollars;
            }
            if let Some(totals) = projection.bases.get(window_period) {
                cumulative_bases.direct_labor += totals.direct_labor;
                cumulative_bases.total_labor += totals.total_labor;
                cumulative_bases.total_cost_input += totals.total_cost_input;
                cumulative_bases.direct_labor_hours += totals.direct_labor_hours;
            }
        }

        let mut rate_row = BTreeMap::new();
        let mut prior_indirect = 0.0;
        for group in structure.groups() {
            let pool_dollars = cumulative_pools
                .get(group.name.as_str())
                .copied()
                .unwrap_or(0.0);
            let denominator = cumulative_bases.value(group.base) + prior_indirect;
            let rate = if denominator == 0.0 {
                0.0
            } else {
                pool_dollars / denominator
            };
            rate_row.insert(group.name.clone(), rate);
            prior_indirect += pool_dollars;
        }
        ytd.insert(*period, rate_row);
    }
    ytd
}

fn fiscal_year_begin(period: Period, fy_month: u32) -> Period {
    let year = if period.month() >= fy_month {
        period.year()
    } else {
        period.year() - 1
    };
    Period::new(year, fy_month).unwrap_or(period)
}
