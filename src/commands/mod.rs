mod input;
mod runner;

pub use input::CommandInput;
pub use runner::Simulation;

use crate::catalog::Library;
use crate::config::SimConfig;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use tracing::info;

/// Replays a scenario file against a library file and returns the command
/// outputs, one JSON object per command plus the final monetization report.
pub fn run_scenario(
    library_path: &Path,
    scenario_path: &Path,
    config: SimConfig,
) -> Result<Vec<Value>> {
    let library = Library::from_file(library_path)?;
    let text = std::fs::read_to_string(scenario_path)
        .with_context(|| format!("Failed to read scenario file {}", scenario_path.display()))?;
    let commands: Vec<CommandInput> = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse scenario file {}", scenario_path.display()))?;

    info!(
        songs = library.songs.len(),
        podcasts = library.podcasts.len(),
        users = library.users.len(),
        commands = commands.len(),
        "replaying scenario"
    );

    let mut simulation = Simulation::new(&library, config);
    let mut outputs = Vec::with_capacity(commands.len() + 1);
    for command in &commands {
        outputs.push(simulation.execute(command));
    }
    outputs.push(simulation.end_program());
    Ok(outputs)
}
