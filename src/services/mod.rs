pub mod aggregate;
pub mod baseline;
pub mod forecast_yaml;
pub mod input_csv;
pub mod mapping;
pub mod normalize;
pub mod pipeline;
pub mod rate_config_yaml;
pub mod rates;
pub mod scenario;
pub mod synth;
pub mod ytd;
