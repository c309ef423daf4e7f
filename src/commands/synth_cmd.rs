use std::path::Path;

use crate::commands::base_commands::Commands;
use crate::domain::period::Period;
use crate::services::synth::{generate_synthetic_dataset, SynthSpec};

pub fn synth_command(cmd: Commands) {
    if let Commands::Synth {
        output,
        start,
        months,
        projects,
        seed,
    } = cmd
    {
        let start = match start.parse::<Period>() {
            Ok(period) => period,
            Err(e) => {
                eprintln!("Failed to parse start period: {e:?}");
                return;
            }
        };

        let spec = SynthSpec {
            start,
            months,
            projects,
            seed,
        };
        if let Err(e) = generate_synthetic_dataset(Path::new(&output), &spec) {
            eprintln!("Failed to generate synthetic dataset: {e:?}");
        } else {
            println!("Synthetic dataset written to {output}");
        }
    }
}
