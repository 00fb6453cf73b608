use std::{env, fs};

use anyhow::Context;
use liblife::{Simulation, SimulationConfig};

mod cli;

fn main() -> anyhow::Result<()> {
    let config = match env::args().nth(1) {
        Some(config_path) => {
            let config_serialized = fs::read(&config_path)
                .with_context(|| format!("Couldn't read config {config_path}"))?;
            serde_json::from_slice(&config_serialized).context("Couldn't deserialize config")?
        }
        None => SimulationConfig::default(),
    };

    let simulation = Simulation::new(config);
    cli::run_cli(simulation);

    Ok(())
}
