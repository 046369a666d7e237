//! Matchup - one game between two teams in a given week

use serde::{Deserialize, Serialize};

use crate::roster::{Roster, TeamId};

/// A pairing of two teams.
///
/// Stored with an orientation (`home` drew `away`), but compared as an
/// unordered pair everywhere counts or repeats matter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Matchup {
    pub home: TeamId,
    pub away: TeamId,
}

impl Matchup {
    pub fn new(home: TeamId, away: TeamId) -> Self {
        Self { home, away }
    }

    /// True if both slots hold the same team
    pub fn is_self_pairing(&self) -> bool {
        self.home == self.away
    }

    /// Same two teams, in either orientation
    pub fn same_pair(&self, other: &Matchup) -> bool {
        (self.home == other.home && self.away == other.away)
            || (self.home == other.away && self.away == other.home)
    }

    /// Whether `team` plays in this matchup
    pub fn involves(&self, team: TeamId) -> bool {
        self.home == team || self.away == team
    }

    /// Orientation-free key with the lower roster position first
    pub fn pair_key(&self) -> (TeamId, TeamId) {
        (self.home.min(self.away), self.home.max(self.away))
    }

    /// `"<home> versus <away>"`
    pub fn render(&self, roster: &Roster) -> String {
        format!("{} versus {}", roster.name(self.home), roster.name(self.away))
    }
}
