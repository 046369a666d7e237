//! Error types for season generation

use qpfl_core::LeagueError;

/// Failures that escape the retry loops.
///
/// Transient dead ends (a team that cannot be paired, a week that keeps
/// failing) are absorbed by the week and season retries and never show
/// up here.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error(transparent)]
    League(#[from] LeagueError),

    #[error("no valid season found after {attempts} full attempts")]
    Exhausted { attempts: usize },

    #[error(
        "count mismatch for ({home}, {away}): counter says {recorded}, matchup list says {derived}"
    )]
    CountMismatch {
        home: String,
        away: String,
        recorded: u32,
        derived: u32,
    },

    #[error("{team} is scheduled against itself in {week}")]
    SelfPairing { team: String, week: String },

    #[error("({home}, {away}) meet {count} times, cap is {cap}")]
    OverCap {
        home: String,
        away: String,
        count: u32,
        cap: u32,
    },

    #[error("{week} is not a perfect matching: {reason}")]
    ImperfectWeek { week: String, reason: String },

    #[error("season has {actual} weeks, expected {expected}")]
    SeasonLength { expected: usize, actual: usize },

    #[error("schedule listing line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("invalid win rate for {team}: {rate}")]
    InvalidWinRate { team: String, rate: f64 },
}
