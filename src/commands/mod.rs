pub mod base_commands;
pub mod report_format;
pub mod run_cmd;
pub mod synth_cmd;
