//! Post-generation audit - re-derives pair counts from the raw matchup list
//!
//! Level 2 - Phases

use qpfl_core::{League, MatchupCounter, TeamId};

use crate::error::ScheduleError;
use crate::season::SeasonSchedule;

/// Meetings between one pair over the season
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairTally {
    /// Lower roster position of the pair
    pub first: TeamId,
    /// Higher roster position of the pair
    pub second: TeamId,
    pub count: u32,
}

/// Result of a clean audit: every pair that met, sorted by roster position
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScheduleAudit {
    pub tallies: Vec<PairTally>,
}

impl ScheduleAudit {
    /// Tally for a pair, in either order
    pub fn tally(&self, a: TeamId, b: TeamId) -> Option<&PairTally> {
        let (first, second) = (a.min(b), a.max(b));
        self.tallies
            .iter()
            .find(|t| t.first == first && t.second == second)
    }
}

/// Check a finished season against its counter.
///
/// - the season has `season_length` weeks, each a perfect matching
/// - nobody plays themselves
/// - counts rebuilt from the matchup list equal the counter, pair by pair
/// - no pair meets more than `max_meetings` times
///
/// Any failure is an internal-consistency error.
pub fn validate_schedule(
    league: &League,
    schedule: &SeasonSchedule,
    counter: &MatchupCounter,
) -> Result<ScheduleAudit, ScheduleError> {
    let roster = &league.roster;

    if schedule.len() != league.season_length {
        return Err(ScheduleError::SeasonLength {
            expected: league.season_length,
            actual: schedule.len(),
        });
    }

    for week in &schedule.weeks {
        if let Some(m) = week.matchups.iter().find(|m| m.is_self_pairing()) {
            return Err(ScheduleError::SelfPairing {
                team: roster.name(m.home).to_string(),
                week: week.label.to_string(),
            });
        }
        if let Some(reason) = week.as_week().matching_defect(roster.len()) {
            return Err(ScheduleError::ImperfectWeek {
                week: week.label.to_string(),
                reason,
            });
        }
    }

    let derived = MatchupCounter::from_matchups(roster.len(), schedule.all_matchups());

    let mut pairs = derived.played_pairs();
    pairs.extend(counter.played_pairs());
    pairs.sort_unstable();
    pairs.dedup();

    let mut tallies = Vec::with_capacity(pairs.len());
    for (first, second) in pairs {
        let recorded = counter.count_named(roster, first, second)?;
        let rebuilt = derived.count_named(roster, first, second)?;
        if recorded != rebuilt {
            return Err(ScheduleError::CountMismatch {
                home: roster.name(first).to_string(),
                away: roster.name(second).to_string(),
                recorded,
                derived: rebuilt,
            });
        }
        if recorded > league.max_meetings {
            return Err(ScheduleError::OverCap {
                home: roster.name(first).to_string(),
                away: roster.name(second).to_string(),
                count: recorded,
                cap: league.max_meetings,
            });
        }
        tallies.push(PairTally {
            first,
            second,
            count: recorded,
        });
    }

    Ok(ScheduleAudit { tallies })
}
