use std::collections::BTreeMap;

use crate::domain::period::Period;

/// Additive adjustments carried by one scenario event. Pool deltas are
/// keyed by pool name; direct-cost deltas apply to the event's project.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CostDeltas {
    pub direct_labor: f64,
    pub direct_labor_hours: f64,
    pub subcontract: f64,
    pub other_direct: f64,
    pub travel: f64,
    pub pools: BTreeMap<String, f64>,
}

impl CostDeltas {
    pub fn is_empty(&self) -> bool {
        self.direct_labor == 0.0
            && self.direct_labor_hours == 0.0
            && self.subcontract == 0.0
            && self.other_direct == 0.0
            && self.travel == 0.0
            && self.pools.is_empty()
    }
}

/// A what-if adjustment applied to every period from `effective_period`
/// forward, inclusive. Immutable once normalized; edits replace the row.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioEvent {
    pub scenario: String,
    pub effective_period: Period,
    pub event_type: String,
    pub project: Option<String>,
    pub deltas: CostDeltas,
    pub notes: String,
}
