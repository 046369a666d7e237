//! Generate command - build a season and write the listings
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_league(), generate_season(), render_reports(), save
//! - Level 3: build_season_config(), JSON output
//! - Level 4: file I/O (see `files`)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rustc_hash::FxHashMap;

use qpfl_core::League;
use qpfl_schedule::{
    generate_season, parse_schedule_listing, render_audit, render_schedule, render_strength,
    render_team_schedules, resolve_listing, strength_of_schedule, AttemptLimits, GeneratedSeason,
    ParsedWeek, SeasonConfig,
};

use crate::files::{load_league_config, load_win_rates, write_all_or_nothing};

pub const SCHEDULE_FILE: &str = "schedule.txt";
pub const AUDIT_FILE: &str = "matchup_counts.txt";
pub const TEAMS_FILE: &str = "team_schedules.txt";
pub const STRENGTH_FILE: &str = "strength_of_schedule.txt";

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct GenerateArgs {
    /// League configuration JSON (defaults to the built-in QPFL league)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the number of weeks
    #[arg(long)]
    pub season_length: Option<usize>,

    /// Override the rivalry week
    #[arg(long)]
    pub rivalry_week: Option<usize>,

    /// Override the first week in which pairs may meet twice
    #[arg(long)]
    pub repeat_week: Option<usize>,

    /// Opponent draws per team before a week is restarted
    #[arg(long)]
    pub team_attempts: Option<usize>,

    /// Consecutive week failures before the season is restarted
    #[arg(long)]
    pub week_failures: Option<usize>,

    /// Full season attempts before giving up
    #[arg(long)]
    pub season_attempts: Option<usize>,

    /// Run season attempts in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Historical win rates JSON ({"team": rate}) for strength of schedule
    #[arg(long, value_name = "FILE")]
    pub win_rates: Option<PathBuf>,

    /// Output directory for the listings
    #[arg(long, default_value = ".")]
    pub output: PathBuf,

    /// Also print the schedule as JSON
    #[arg(long)]
    pub json: bool,
}

/// Rendered listings, in memory until the season is known to be good
struct Reports {
    schedule: String,
    audit: String,
    teams: String,
    strength: Option<String>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run generate command
///
/// 1. Build the league from config and overrides
/// 2. Generate and audit a season
/// 3. Render every listing
/// 4. Write them all at once
pub fn run(args: GenerateArgs, seed: Option<u64>) -> Result<()> {
    let league = build_league(&args)?;
    let config = build_season_config(&args, &league, seed);

    let season = generate_season(&league, &config).context("Schedule generation failed")?;
    let reports = render_reports(&league, &season, &args)?;

    save_reports(&reports, &args)?;

    if args.json {
        print_json_schedule(&league, &season)?;
    }
    print_summary(&league, &season, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Load config, apply command-line overrides, validate
fn build_league(args: &GenerateArgs) -> Result<League> {
    let mut config = load_league_config(args.config.as_deref())?;

    if let Some(weeks) = args.season_length {
        config.season_length = weeks;
    }
    if let Some(week) = args.rivalry_week {
        config.rivalry_week = week;
    }
    if let Some(week) = args.repeat_week {
        config.repeat_week = week;
    }

    let league = config.validate().context("Invalid league configuration")?;
    tracing::debug!("League {} with teams {:?}", league.name, league.roster.names());
    Ok(league)
}

/// Render all listings; the per-team and strength listings are derived
/// from the re-parsed schedule listing
fn render_reports(
    league: &League,
    season: &GeneratedSeason,
    args: &GenerateArgs,
) -> Result<Reports> {
    let roster = &league.roster;
    let schedule = render_schedule(roster, &season.schedule);
    let parsed =
        parse_schedule_listing(&schedule).context("Rendered schedule does not re-parse")?;

    let teams = render_team_schedules(roster, &parsed)?;
    let audit = render_audit(roster, &season.audit);

    let strength = match &args.win_rates {
        Some(path) => {
            let rates = load_win_rates(path)?;
            Some(render_strength_listing(league, &parsed, &rates)?)
        }
        None => None,
    };

    Ok(Reports {
        schedule,
        audit,
        teams,
        strength,
    })
}

/// Write every listing into the output directory
fn save_reports(reports: &Reports, args: &GenerateArgs) -> Result<()> {
    let mut files = vec![
        (SCHEDULE_FILE, reports.schedule.clone()),
        (AUDIT_FILE, reports.audit.clone()),
        (TEAMS_FILE, reports.teams.clone()),
    ];
    if let Some(strength) = &reports.strength {
        files.push((STRENGTH_FILE, strength.clone()));
    }

    for path in write_all_or_nothing(&args.output, &files)? {
        tracing::info!("Wrote {}", path.display());
    }
    Ok(())
}

/// Print summary to console
fn print_summary(league: &League, season: &GeneratedSeason, args: &GenerateArgs) {
    println!("\n=== {} Schedule Generated ===", league.name);
    println!("Teams:            {}", league.roster.len());
    println!("Weeks:            {}", season.schedule.len());
    println!("Season attempts:  {}", season.stats.season_attempts);
    println!("Week restarts:    {}", season.stats.week_restarts);
    println!("Output directory: {}", args.output.display());
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Season config from limits scaled to the roster plus overrides
fn build_season_config(args: &GenerateArgs, league: &League, seed: Option<u64>) -> SeasonConfig {
    let mut limits = AttemptLimits::for_roster(league.roster.len());
    if let Some(n) = args.team_attempts {
        limits = limits.with_team_attempts(n);
    }
    if let Some(n) = args.week_failures {
        limits = limits.with_week_failures(n);
    }
    if let Some(n) = args.season_attempts {
        limits = limits.with_season_attempts(n);
    }

    let mut config = SeasonConfig::default()
        .with_limits(limits)
        .parallel(args.parallel);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    config
}

fn render_strength_listing(
    league: &League,
    parsed: &[ParsedWeek],
    rates: &FxHashMap<String, f64>,
) -> Result<String> {
    let resolved = resolve_listing(&league.roster, parsed)?;
    let ranking = strength_of_schedule(&league.roster, resolved.all_matchups(), rates)?;
    Ok(render_strength(&league.roster, &ranking))
}

/// Print the schedule as JSON with team names
fn print_json_schedule(league: &League, season: &GeneratedSeason) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonWeek {
        week: usize,
        label: String,
        rivalry: bool,
        games: Vec<[String; 2]>,
    }

    #[derive(serde::Serialize)]
    struct JsonSeason {
        league: String,
        season_attempts: usize,
        week_restarts: usize,
        weeks: Vec<JsonWeek>,
    }

    let roster = &league.roster;
    let output = JsonSeason {
        league: league.name.clone(),
        season_attempts: season.stats.season_attempts,
        week_restarts: season.stats.week_restarts,
        weeks: season
            .schedule
            .weeks
            .iter()
            .map(|w| JsonWeek {
                week: w.label.week(),
                label: w.label.to_string(),
                rivalry: w.label.is_rivalry(),
                games: w
                    .matchups
                    .iter()
                    .map(|m| [roster.name(m.home).to_string(), roster.name(m.away).to_string()])
                    .collect(),
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&output)?;
    println!("{}", json);

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> GenerateArgs {
        GenerateArgs {
            config: None,
            season_length: None,
            rivalry_week: None,
            repeat_week: None,
            team_attempts: None,
            week_failures: None,
            season_attempts: None,
            parallel: false,
            win_rates: None,
            output: PathBuf::from("test"),
            json: false,
        }
    }

    #[test]
    fn test_build_league_applies_overrides() {
        let mut args = args();
        args.season_length = Some(16);
        args.rivalry_week = Some(10);
        args.repeat_week = Some(9);

        let league = build_league(&args).unwrap();
        assert_eq!(league.season_length, 16);
        assert_eq!(league.rivalry_week, 10);
        assert_eq!(league.repeat_week, 9);
    }

    #[test]
    fn test_build_league_rejects_bad_rivalry_week() {
        let mut args = args();
        args.rivalry_week = Some(40);
        assert!(build_league(&args).is_err());
    }

    #[test]
    fn test_build_season_config() {
        let mut args = args();
        args.team_attempts = Some(7);
        args.parallel = true;
        let league = build_league(&args).unwrap();

        let config = build_season_config(&args, &league, Some(3));
        assert_eq!(config.limits.team_attempts, 7);
        assert_eq!(config.limits.week_failures, 15);
        assert_eq!(config.seed, Some(3));
        assert!(config.parallel);
    }

    #[test]
    fn test_render_reports() {
        let args = args();
        let league = build_league(&args).unwrap();
        let config = build_season_config(&args, &league, Some(11));
        let season = generate_season(&league, &config).unwrap();

        let reports = render_reports(&league, &season, &args).unwrap();
        assert_eq!(reports.schedule.lines().count(), 15);
        assert!(reports.schedule.contains("Rivalry Week 9: Griffin versus Ryan"));
        assert!(reports.teams.starts_with("Griffin Schedule\n"));
        assert!(reports.audit.lines().all(|l| l.ends_with(" times")));
        assert!(reports.strength.is_none());
    }
}
