pub mod account_map;
pub mod direct_cost;
pub mod forecast;
pub mod ledger;
pub mod period;
pub mod pool;
pub mod projection;
pub mod scenario;
