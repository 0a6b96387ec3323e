//! DOLO backdrop CLI
//!
//! Runs the landing page background effects against a headless viewport.

use anyhow::Result;
use clap::{Parser, Subcommand};
use dolo_cli::{run_scenario, DoloConfig, Scenario};
use dolo_core::ColorScheme;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "dolo")]
#[command(author, version, about = "DOLO backdrop - reactive outline and grid, headless", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the backdrop for a scenario and report on it
    Simulate {
        /// Path to dolo.toml
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// JSON scenario to replay (idle run when absent)
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Frames for the idle run, overrides [run] frames
        #[arg(short, long)]
        frames: Option<u32>,

        /// Initial color scheme
        #[arg(long)]
        scheme: Option<ColorScheme>,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Path to dolo.toml
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Simulate {
            config,
            scenario,
            frames,
            scheme,
            report,
        } => cmd_simulate(
            config.as_deref(),
            scenario.as_deref(),
            frames,
            scheme,
            report.as_deref(),
        ),
        Commands::Config { config } => cmd_config(config.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> Result<DoloConfig> {
    match path {
        Some(path) => DoloConfig::load(path),
        None => Ok(DoloConfig::default()),
    }
}

fn cmd_simulate(
    config: Option<&Path>,
    scenario: Option<&Path>,
    frames: Option<u32>,
    scheme: Option<ColorScheme>,
    report: Option<&Path>,
) -> Result<()> {
    let mut config = load_config(config)?;
    if let Some(frames) = frames {
        config.run.frames = frames;
    }
    if let Some(scheme) = scheme {
        config.viewport.scheme = scheme;
    }

    let scenario = match scenario {
        Some(path) => Scenario::from_path(path)?,
        None => Scenario::idle(config.run.frames),
    };

    let summary = run_scenario(&config, &scenario)?;
    info!(
        frames = summary.frames_rendered,
        grid_redraws = summary.grid_redraws,
        "simulation finished"
    );

    match report {
        Some(path) => {
            summary.write_to_path(path)?;
            info!("report written to {}", path.display());
        }
        None => summary.write_to_writer(&mut std::io::stdout().lock())?,
    }
    Ok(())
}

fn cmd_config(config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    print!("{}", config.to_toml()?);
    Ok(())
}
