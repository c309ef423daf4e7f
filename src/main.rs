mod commands;
mod domain;
mod services;
#[cfg(test)]
mod test_support;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use crate::commands::base_commands::{CliArgs, Commands};
use crate::commands::run_cmd::run_command;
use crate::commands::synth_cmd::synth_command;

fn main() {
    let args = CliArgs::parse();
    match args.command {
        cmd @ Commands::Run { .. } => run_command(cmd),
        cmd @ Commands::Synth { .. } => synth_command(cmd),
        Commands::Completions { shell } => {
            let mut command = CliArgs::command();
            generate(shell, &mut command, "ratecast", &mut std::io::stdout());
        }
    }
}
