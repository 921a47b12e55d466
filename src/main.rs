use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wavecast_simulator::config::{FileConfig, SimConfig};
use wavecast_simulator::run_scenario;

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the library file (songs, podcasts, users).
    pub library: PathBuf,

    /// Path to the scenario file (timestamped commands).
    pub scenario: PathBuf,

    /// Where to write the outputs. Defaults to stdout.
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the output JSON.
    #[clap(long)]
    pub pretty: bool,

    /// Optional TOML file overriding the simulation constants.
    #[clap(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let config = match &cli_args.config {
        Some(path) => SimConfig::with_overrides(&FileConfig::load(path)?),
        None => SimConfig::default(),
    };

    let outputs = run_scenario(&cli_args.library, &cli_args.scenario, config)?;

    let rendered = if cli_args.pretty {
        serde_json::to_string_pretty(&outputs)?
    } else {
        serde_json::to_string(&outputs)?
    };

    match &cli_args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write output file {}", path.display()))?;
            info!("Wrote {} outputs to {}", outputs.len(), path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
