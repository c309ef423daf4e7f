use std::fmt;
use std::str::FromStr;

/// Allocation base denominators a pool can divide by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseCategory {
    /// Direct labor dollars.
    DirectLabor,
    /// Total labor dollars (identical to direct labor in this model).
    TotalLabor,
    /// Total cost input: direct labor + subcontract + other directs + travel.
    TotalCostInput,
    /// Direct labor hours.
    DirectLaborHours,
}

impl BaseCategory {
    pub fn code(&self) -> &'static str {
        match self {
            BaseCategory::DirectLabor => "DL",
            BaseCategory::TotalLabor => "TL",
            BaseCategory::TotalCostInput => "TCI",
            BaseCategory::DirectLaborHours => "DLH",
        }
    }
}

impl FromStr for BaseCategory {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "DL" => Ok(BaseCategory::DirectLabor),
            "TL" => Ok(BaseCategory::TotalLabor),
            "TCI" => Ok(BaseCategory::TotalCostInput),
            "DLH" => Ok(BaseCategory::DirectLaborHours),
            _ => Err(()),
        }
    }
}

impl fmt::Display for BaseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Classification of one GL account into a pool. An account maps to at
/// most one pool; unallowable accounts are tracked but never recovered.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountMapping {
    pub account: String,
    pub pool: String,
    pub base_category: Option<BaseCategory>,
    pub is_unallowable: bool,
    pub notes: String,
}
