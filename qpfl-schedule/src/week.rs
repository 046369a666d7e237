//! Week scheduling - greedy random pairing of the whole roster
//!
//! Level 3 - Steps

use qpfl_core::{League, Matchup, MatchupCounter, TeamId};
use rand::Rng;

use crate::error::ScheduleError;
use crate::retry::attempt;
use crate::validator::MatchupValidator;

/// One week's games: every team appears in exactly one matchup
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeekSchedule {
    pub matchups: Vec<Matchup>,
}

impl WeekSchedule {
    pub fn new(matchups: Vec<Matchup>) -> Self {
        Self { matchups }
    }

    /// First team that is missing or doubled, if the week is not a perfect matching
    pub fn matching_defect(&self, teams: usize) -> Option<String> {
        let mut seen = vec![0usize; teams];
        for m in &self.matchups {
            for team in [m.home, m.away] {
                match seen.get_mut(team) {
                    Some(slot) => *slot += 1,
                    None => return Some(format!("team id {} is not on the roster", team)),
                }
            }
        }
        seen.iter().enumerate().find_map(|(team, &times)| match times {
            1 => None,
            0 => Some(format!("team id {} has no game", team)),
            n => Some(format!("team id {} plays {} times", team, n)),
        })
    }
}

/// Pair every team for `week`, or report `None` if the greedy draw dead-ends.
///
/// Teams are visited in roster order. Each unpaired team draws opponents
/// uniformly from the unpaired pool (itself included) until the validator
/// accepts one or `team_attempts` draws have been spent. A team that runs
/// out of draws abandons the whole week; nothing from a failed week is kept.
///
/// The counter is only read here. Callers record the returned week.
pub fn schedule_week<R: Rng>(
    league: &League,
    week: usize,
    counter: &MatchupCounter,
    previous_week: &[Matchup],
    team_attempts: usize,
    rng: &mut R,
) -> Result<Option<WeekSchedule>, ScheduleError> {
    let validator = MatchupValidator::new(league);
    let mut available: Vec<TeamId> = league.roster.ids().collect();
    let mut matchups = Vec::with_capacity(league.roster.matchups_per_week());

    for team in league.roster.ids() {
        if !available.contains(&team) {
            continue;
        }

        let drawn = attempt(team_attempts, |_| {
            let opponent = available[rng.gen_range(0..available.len())];
            let candidate = Matchup::new(team, opponent);
            let accepted = validator.validate(&candidate, week, counter, previous_week)?;
            Ok::<_, ScheduleError>(accepted.then_some(candidate))
        })?;

        match drawn {
            Ok(matchup) => {
                available.retain(|&t| !matchup.involves(t));
                matchups.push(matchup);
            }
            Err(exhausted) => {
                tracing::debug!(
                    "Week {}: no opponent for {} after {} draws",
                    week,
                    league.roster.name(team),
                    exhausted.tries
                );
                return Ok(None);
            }
        }
    }

    if matchups.len() != league.roster.matchups_per_week() {
        return Ok(None);
    }

    Ok(Some(WeekSchedule::new(matchups)))
}
