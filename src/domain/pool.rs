use thiserror::Error;

use crate::domain::account_map::BaseCategory;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RateStructureError {
    #[error("rate structure has no pools")]
    Empty,
    #[error("duplicate pool name '{name}'")]
    DuplicatePoolName { name: String },
    #[error("cascade order {order} is shared by pools '{first}' and '{second}'")]
    DuplicateCascadeOrder {
        order: u32,
        first: String,
        second: String,
    },
}

/// An indirect cost pool and the base its rate divides by. Pools with a
/// lower cascade order are evaluated first and their dollars roll into
/// the base of every later pool.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolGroup {
    pub name: String,
    pub base: BaseCategory,
    pub cascade_order: u32,
}

impl PoolGroup {
    pub fn new(name: &str, base: BaseCategory, cascade_order: u32) -> Self {
        Self {
            name: name.to_string(),
            base,
            cascade_order,
        }
    }
}

/// Validated pool configuration. Cascade orders must form a strict total
/// order, so the cascading rate pass is a single ordered sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct RateStructure {
    groups: Vec<PoolGroup>,
}

impl RateStructure {
    pub fn new(mut groups: Vec<PoolGroup>) -> Result<Self, RateStructureError> {
        if groups.is_empty() {
            return Err(RateStructureError::Empty);
        }
        groups.sort_by_key(|group| group.cascade_order);
        for pair in groups.windows(2) {
            if pair[0].cascade_order == pair[1].cascade_order {
                return Err(RateStructureError::DuplicateCascadeOrder {
                    order: pair[0].cascade_order,
                    first: pair[0].name.clone(),
                    second: pair[1].name.clone(),
                });
            }
        }
        for (idx, group) in groups.iter().enumerate() {
            if groups[..idx].iter().any(|other| other.name == group.name) {
                return Err(RateStructureError::DuplicatePoolName {
                    name: group.name.clone(),
                });
            }
        }
        Ok(Self { groups })
    }

    /// Pools in ascending cascade order.
    pub fn groups(&self) -> &[PoolGroup] {
        &self.groups
    }

    pub fn contains(&self, pool_name: &str) -> bool {
        self.groups.iter().any(|group| group.name == pool_name)
    }
}

/// The conventional three-tier structure: Fringe on total labor,
/// Overhead on direct labor, G&A on total cost input.
pub fn default_rate_structure() -> RateStructure {
    RateStructure {
        groups: vec![
            PoolGroup::new("Fringe", BaseCategory::TotalLabor, 0),
            PoolGroup::new("Overhead", BaseCategory::DirectLabor, 1),
            PoolGroup::new("G&A", BaseCategory::TotalCostInput, 2),
        ],
    }
}
