//! Teams command - per-team schedules from an existing schedule listing

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use qpfl_schedule::render_team_schedules;

use crate::files::{listing_roster, load_listing, write_all_or_nothing};
use crate::generate::{SCHEDULE_FILE, TEAMS_FILE};

#[derive(Args)]
pub struct TeamsArgs {
    /// Schedule listing to read
    #[arg(long, value_name = "FILE", default_value = SCHEDULE_FILE)]
    pub schedule: PathBuf,

    /// League config, for roster order (defaults to order of first appearance)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory to write team_schedules.txt into (prints to stdout if omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: TeamsArgs) -> Result<()> {
    let weeks = load_listing(&args.schedule)?;
    let roster = listing_roster(args.config.as_deref(), &weeks)?;
    let listing = render_team_schedules(&roster, &weeks)
        .with_context(|| format!("{} is missing games", args.schedule.display()))?;

    match &args.output {
        Some(dir) => {
            for path in write_all_or_nothing(dir, &[(TEAMS_FILE, listing)])? {
                tracing::info!("Wrote {}", path.display());
            }
        }
        None => print!("{}", listing),
    }

    Ok(())
}
