//! QPFL CLI - Command-line interface
//!
//! Commands:
//! - generate: Build a season and write the schedule listings
//! - teams: Re-derive per-team schedules from a schedule listing
//! - sos: Rank strength of schedule from a listing and win rates
//! - init: Write the default league configuration

mod files;
mod generate;
mod sos;
mod teams;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use qpfl_core::LeagueConfig;

#[derive(Parser)]
#[command(name = "qpfl")]
#[command(about = "QPFL league schedule generator")]
struct Cli {
    /// Random seed for reproducible schedules
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a season schedule
    Generate(generate::GenerateArgs),
    /// Per-team schedules from an existing schedule listing
    Teams(teams::TeamsArgs),
    /// Strength of schedule from an existing schedule listing
    Sos(sos::SosArgs),
    /// Write the default league configuration as JSON
    Init {
        #[arg(long, default_value = "league.json")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => generate::run(args, cli.seed),
        Commands::Teams(args) => teams::run(args),
        Commands::Sos(args) => sos::run(args),
        Commands::Init { output } => {
            LeagueConfig::default().save(&output)?;
            tracing::info!("Wrote default league configuration to {}", output.display());
            Ok(())
        }
    }
}
