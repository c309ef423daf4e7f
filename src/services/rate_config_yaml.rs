use std::io;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::account_map::BaseCategory;
use crate::domain::pool::{PoolGroup, RateStructure, RateStructureError};

#[derive(Error, Debug)]
pub enum RateConfigError {
    #[error("failed to read rate structure yaml: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse rate structure yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("pool '{pool}' has unknown base '{base}'; expected DL, TL, TCI or DLH")]
    UnknownBase { pool: String, base: String },
    #[error("invalid rate structure: {0}")]
    Invalid(#[from] RateStructureError),
}

#[derive(Deserialize)]
struct RateStructureRecord {
    pools: Vec<PoolGroupRecord>,
}

#[derive(Deserialize)]
struct PoolGroupRecord {
    name: String,
    base: String,
    cascade_order: u32,
}

pub fn load_rate_structure_from_yaml_file(path: &str) -> Result<RateStructure, RateConfigError> {
    let contents = std::fs::read_to_string(path)?;
    deserialize_rate_structure_from_yaml_str(&contents)
}

pub fn deserialize_rate_structure_from_yaml_str(
    input: &str,
) -> Result<RateStructure, RateConfigError> {
    let record: RateStructureRecord = serde_yaml::from_str(input)?;
    let mut groups = Vec::with_capacity(record.pools.len());
    for pool in record.pools {
        let base: BaseCategory =
            pool.base
                .parse()
                .map_err(|()| RateConfigError::UnknownBase {
                    pool: pool.name.clone(),
                    base: pool.base.clone(),
                })?;
        groups.push(PoolGroup {
            name: pool.name,
            base,
            cascade_order: pool.cascade_order,
        });
    }
    Ok(RateStructure::new(groups)?)
}
