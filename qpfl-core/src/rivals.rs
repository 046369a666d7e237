//! Rival pairings - each team's designated rival for rivalry week

use crate::error::LeagueError;
use crate::matchup::Matchup;
use crate::roster::{Roster, TeamId};

/// Symmetric team -> rival mapping covering the whole roster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RivalMap {
    partner: Vec<TeamId>,
}

impl RivalMap {
    /// Build from a partner table where `partner[a]` is the rival of `a`.
    ///
    /// The table must be an involution without fixed points: nobody is
    /// their own rival and `partner[partner[a]] == a` for every team.
    pub fn from_partners(partner: Vec<TeamId>) -> Result<Self, LeagueError> {
        let n = partner.len();
        for (team, &rival) in partner.iter().enumerate() {
            if rival >= n {
                return Err(LeagueError::MalformedRivalMap(format!(
                    "team {} points at rival {} outside the roster",
                    team, rival
                )));
            }
            if rival == team {
                return Err(LeagueError::MalformedRivalMap(format!(
                    "team {} is its own rival",
                    team
                )));
            }
            if partner[rival] != team {
                return Err(LeagueError::MalformedRivalMap(format!(
                    "team {} names {} as rival, but {} names {}",
                    team, rival, rival, partner[rival]
                )));
            }
        }
        Ok(Self { partner })
    }

    /// Build from named pairs; every roster team must appear in exactly one pair
    pub fn from_pairs<S: AsRef<str>>(
        roster: &Roster,
        pairs: &[(S, S)],
    ) -> Result<Self, LeagueError> {
        let mut partner: Vec<Option<TeamId>> = vec![None; roster.len()];

        for (a, b) in pairs {
            let (a, b): (&str, &str) = (a.as_ref(), b.as_ref());
            let ia = roster.id(a)?;
            let ib = roster.id(b)?;
            if ia == ib {
                return Err(LeagueError::MalformedRivalMap(format!(
                    "{} is paired with itself",
                    a
                )));
            }
            for (team, name) in [(ia, a), (ib, b)] {
                if partner[team].is_some() {
                    return Err(LeagueError::MalformedRivalMap(format!(
                        "{} appears in more than one rival pair",
                        name
                    )));
                }
            }
            partner[ia] = Some(ib);
            partner[ib] = Some(ia);
        }

        let partner = partner
            .into_iter()
            .enumerate()
            .map(|(team, rival)| {
                rival.ok_or_else(|| {
                    LeagueError::MalformedRivalMap(format!(
                        "{} has no designated rival",
                        roster.name(team)
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_partners(partner)
    }

    /// Designated rival of `team`
    pub fn rival(&self, team: TeamId) -> TeamId {
        self.partner[team]
    }

    /// Whether a matchup pits two rivals against each other
    pub fn is_rivalry(&self, matchup: &Matchup) -> bool {
        self.partner.get(matchup.home) == Some(&matchup.away)
    }

    /// The rivalry-week pairings, one per pair, in roster order of the first team
    pub fn pairs(&self) -> Vec<Matchup> {
        self.partner
            .iter()
            .enumerate()
            .filter(|&(team, &rival)| team < rival)
            .map(|(team, &rival)| Matchup::new(team, rival))
            .collect()
    }

    /// Number of teams covered
    pub fn len(&self) -> usize {
        self.partner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        Roster::new(["A", "B", "C", "D"]).unwrap()
    }

    #[test]
    fn test_from_pairs() {
        let rivals = RivalMap::from_pairs(&roster(), &[("A", "B"), ("D", "C")]).unwrap();
        assert_eq!(rivals.rival(0), 1);
        assert_eq!(rivals.rival(1), 0);
        assert_eq!(rivals.rival(2), 3);
        assert!(rivals.is_rivalry(&Matchup::new(3, 2)));
        assert!(!rivals.is_rivalry(&Matchup::new(0, 2)));
        assert_eq!(rivals.pairs(), vec![Matchup::new(0, 1), Matchup::new(2, 3)]);
    }

    #[test]
    fn test_self_rival_rejected() {
        let err = RivalMap::from_pairs(&roster(), &[("A", "A"), ("C", "D")]).unwrap_err();
        assert!(matches!(err, LeagueError::MalformedRivalMap(_)));

        let err = RivalMap::from_partners(vec![0, 2, 1, 3]).unwrap_err();
        assert!(matches!(err, LeagueError::MalformedRivalMap(_)));
    }

    #[test]
    fn test_duplicate_and_missing_rejected() {
        let dup = RivalMap::from_pairs(&roster(), &[("A", "B"), ("A", "C")]);
        assert!(matches!(dup, Err(LeagueError::MalformedRivalMap(_))));

        let missing = RivalMap::from_pairs(&roster(), &[("A", "B")]);
        assert!(matches!(missing, Err(LeagueError::MalformedRivalMap(_))));

        let unknown = RivalMap::from_pairs(&roster(), &[("A", "Z"), ("C", "D")]);
        assert_eq!(unknown, Err(LeagueError::UnknownTeam("Z".to_string())));
    }

    #[test]
    fn test_asymmetric_partners_rejected() {
        // 0 -> 1 but 1 -> 2
        let err = RivalMap::from_partners(vec![1, 2, 1, 0]).unwrap_err();
        assert!(matches!(err, LeagueError::MalformedRivalMap(_)));
    }
}
