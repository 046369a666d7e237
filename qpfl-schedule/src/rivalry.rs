//! Rivalry week - the fixed rival pairings, played unconditionally
//!
//! Level 3 - Steps

use qpfl_core::{League, LeagueError};

use crate::error::ScheduleError;
use crate::week::WeekSchedule;

/// Build the rivalry week from the league's rival map.
///
/// No history checks apply. The only failure is a rival map that does not
/// pair every team exactly once, which is a configuration defect.
pub fn rivalry_week(league: &League) -> Result<WeekSchedule, ScheduleError> {
    let teams = league.roster.len();
    if league.rivals.len() != teams {
        return Err(LeagueError::MalformedRivalMap(format!(
            "rival map covers {} teams, roster has {}",
            league.rivals.len(),
            teams
        ))
        .into());
    }

    let week = WeekSchedule::new(league.rivals.pairs());
    if let Some(defect) = week.matching_defect(teams) {
        return Err(LeagueError::MalformedRivalMap(defect).into());
    }

    Ok(week)
}
