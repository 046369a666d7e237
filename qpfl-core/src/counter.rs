//! MatchupCounter - how many times each pair of teams has met

use crate::error::LeagueError;
use crate::matchup::Matchup;
use crate::roster::{Roster, TeamId};

/// Square table of meeting counts indexed by roster position.
///
/// Both directions of a pair are stored and updated together, so
/// `count(a, b) == count(b, a)` holds after every public mutation. A
/// read that finds the two cells disagreeing reports
/// [`LeagueError::CounterAsymmetry`] instead of picking one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchupCounter {
    size: usize,
    counts: Vec<u32>,
}

impl MatchupCounter {
    /// Empty counter for a roster of `size` teams
    pub fn new(size: usize) -> Self {
        Self {
            size,
            counts: vec![0; size * size],
        }
    }

    /// Rebuild counts from a raw list of matchups
    pub fn from_matchups<'a, I>(size: usize, matchups: I) -> Self
    where
        I: IntoIterator<Item = &'a Matchup>,
    {
        let mut counter = Self::new(size);
        for matchup in matchups {
            counter.record(matchup);
        }
        counter
    }

    /// Number of teams the table covers
    pub fn size(&self) -> usize {
        self.size
    }

    /// Record one meeting, in both directions
    pub fn record(&mut self, matchup: &Matchup) {
        let (a, b) = (matchup.home, matchup.away);
        self.counts[a * self.size + b] += 1;
        if a != b {
            self.counts[b * self.size + a] += 1;
        }
    }

    /// Record every matchup of a week
    pub fn record_all<'a, I>(&mut self, matchups: I)
    where
        I: IntoIterator<Item = &'a Matchup>,
    {
        for matchup in matchups {
            self.record(matchup);
        }
    }

    /// Meetings between `a` and `b`, checked for symmetry
    pub fn count(&self, a: TeamId, b: TeamId) -> Result<u32, LeagueError> {
        let forward = self.counts[a * self.size + b];
        let backward = self.counts[b * self.size + a];
        if forward != backward {
            return Err(LeagueError::CounterAsymmetry {
                home: a.to_string(),
                away: b.to_string(),
                forward,
                backward,
            });
        }
        Ok(forward)
    }

    /// Like [`count`](Self::count), with team names in the error
    pub fn count_named(&self, roster: &Roster, a: TeamId, b: TeamId) -> Result<u32, LeagueError> {
        self.count(a, b).map_err(|err| match err {
            LeagueError::CounterAsymmetry { forward, backward, .. } => {
                LeagueError::CounterAsymmetry {
                    home: roster.name(a).to_string(),
                    away: roster.name(b).to_string(),
                    forward,
                    backward,
                }
            }
            other => other,
        })
    }

    /// Every pair that has met at least once, lower roster position first
    pub fn played_pairs(&self) -> Vec<(TeamId, TeamId)> {
        let mut pairs = Vec::new();
        for a in 0..self.size {
            for b in a..self.size {
                if self.counts[a * self.size + b] > 0 || self.counts[b * self.size + a] > 0 {
                    pairs.push((a, b));
                }
            }
        }
        pairs
    }

    /// Total meetings recorded, counting each game once
    pub fn total_games(&self) -> u32 {
        let mut total = 0;
        for a in 0..self.size {
            for b in a..self.size {
                total += self.counts[a * self.size + b];
            }
        }
        total
    }

    /// Bump a single direction only, leaving the table asymmetric.
    /// Only for consistency tests, here and in dependent crates.
    #[cfg(any(test, feature = "test-support"))]
    pub fn record_directed(&mut self, matchup: &Matchup) {
        self.counts[matchup.home * self.size + matchup.away] += 1;
    }
}
