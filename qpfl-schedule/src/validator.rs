//! Matchup validation - decides whether a drawn pairing may be played
//!
//! Level 3 - Steps

use qpfl_core::League;
use qpfl_core::{Matchup, MatchupCounter};

use crate::error::ScheduleError;

/// Why a candidate matchup was turned down
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// Team drew itself
    SelfPairing,
    /// Same two teams met the week before
    RepeatOfLastWeek,
    /// Rivals are saved for rivalry week
    RivalReserved,
    /// The pair already met as often as the current phase allows
    CapReached { count: u32, cap: u32 },
}

/// Pure predicate over the season-to-date state
#[derive(Clone, Copy, Debug)]
pub struct MatchupValidator<'a> {
    league: &'a League,
}

impl<'a> MatchupValidator<'a> {
    pub fn new(league: &'a League) -> Self {
        Self { league }
    }

    /// First rule the candidate breaks, or `None` if it is acceptable.
    ///
    /// Rules are checked in order: self-pairing, repeat of last week,
    /// rival before rivalry week, per-phase meeting cap. An asymmetric
    /// counter is a fatal error.
    pub fn check(
        &self,
        candidate: &Matchup,
        week: usize,
        counter: &MatchupCounter,
        previous_week: &[Matchup],
    ) -> Result<Option<Rejection>, ScheduleError> {
        if candidate.is_self_pairing() {
            return Ok(Some(Rejection::SelfPairing));
        }

        if previous_week.iter().any(|m| m.same_pair(candidate)) {
            return Ok(Some(Rejection::RepeatOfLastWeek));
        }

        if week < self.league.rivalry_week && self.league.rivals.is_rivalry(candidate) {
            return Ok(Some(Rejection::RivalReserved));
        }

        let count = counter.count_named(&self.league.roster, candidate.home, candidate.away)?;
        let cap = self.league.meeting_cap(week);
        if count >= cap {
            return Ok(Some(Rejection::CapReached { count, cap }));
        }

        Ok(None)
    }

    /// Whether the candidate may be scheduled in `week`
    pub fn validate(
        &self,
        candidate: &Matchup,
        week: usize,
        counter: &MatchupCounter,
        previous_week: &[Matchup],
    ) -> Result<bool, ScheduleError> {
        Ok(self.check(candidate, week, counter, previous_week)?.is_none())
    }
}
