//! Sos command - strength of schedule from a listing and historical win rates

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use qpfl_schedule::{render_strength, resolve_listing, strength_of_schedule};

use crate::files::{listing_roster, load_listing, load_win_rates, write_all_or_nothing};
use crate::generate::{SCHEDULE_FILE, STRENGTH_FILE};

#[derive(Args)]
pub struct SosArgs {
    /// Historical win rates JSON ({"team": rate})
    #[arg(long, value_name = "FILE")]
    pub win_rates: PathBuf,

    /// Schedule listing to read
    #[arg(long, value_name = "FILE", default_value = SCHEDULE_FILE)]
    pub schedule: PathBuf,

    /// League config, for roster order (defaults to order of first appearance)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory to write strength_of_schedule.txt into (prints to stdout if omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: SosArgs) -> Result<()> {
    let weeks = load_listing(&args.schedule)?;
    let roster = listing_roster(args.config.as_deref(), &weeks)?;
    let rates = load_win_rates(&args.win_rates)?;

    let schedule = resolve_listing(&roster, &weeks)
        .with_context(|| format!("{} names teams outside the roster", args.schedule.display()))?;
    let ranking = strength_of_schedule(&roster, schedule.all_matchups(), &rates)?;

    let unranked = roster.len() - ranking.len();
    if unranked > 0 {
        tracing::warn!("{} teams faced no rated opponents and are not ranked", unranked);
    }

    let listing = render_strength(&roster, &ranking);
    match &args.output {
        Some(dir) => {
            for path in write_all_or_nothing(dir, &[(STRENGTH_FILE, listing)])? {
                tracing::info!("Wrote {}", path.display());
            }
        }
        None => print!("{}", listing),
    }

    Ok(())
}
