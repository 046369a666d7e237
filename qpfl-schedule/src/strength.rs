//! Strength of schedule - average historical win rate of each team's opponents
//!
//! Level 2 - Phases

use qpfl_core::{Matchup, Roster, TeamId};
use rustc_hash::FxHashMap;

use crate::error::ScheduleError;

/// One team's row in the strength-of-schedule ranking
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleStrength {
    pub team: TeamId,
    /// 1 = hardest schedule
    pub rank: usize,
    /// Mean win rate over rated opponent games
    pub average: f64,
    /// Opponent games that had a win rate
    pub rated_games: usize,
}

/// Rank teams by the mean win rate of the opponents they face.
///
/// Every scheduled game counts, so an opponent met twice weighs twice.
/// Opponents without a win rate are left out of the mean; a team whose
/// opponents are all unrated gets no average and is left out of the
/// ranking. Ties keep roster order.
pub fn strength_of_schedule<'a, I>(
    roster: &Roster,
    matchups: I,
    win_rates: &FxHashMap<String, f64>,
) -> Result<Vec<ScheduleStrength>, ScheduleError>
where
    I: IntoIterator<Item = &'a Matchup>,
{
    let mut rates: Vec<Option<f64>> = vec![None; roster.len()];
    for (name, &rate) in win_rates {
        if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
            return Err(ScheduleError::InvalidWinRate {
                team: name.clone(),
                rate,
            });
        }
        match roster.id(name) {
            Ok(team) => rates[team] = Some(rate),
            Err(_) => tracing::warn!("Ignoring win rate for {}, not on the roster", name),
        }
    }

    let mut totals = vec![0.0f64; roster.len()];
    let mut games = vec![0usize; roster.len()];
    for m in matchups {
        for (team, opponent) in [(m.home, m.away), (m.away, m.home)] {
            if let Some(rate) = rates[opponent] {
                totals[team] += rate;
                games[team] += 1;
            }
        }
    }

    let mut ranking: Vec<ScheduleStrength> = roster
        .ids()
        .filter_map(|team| {
            if games[team] == 0 {
                tracing::debug!("{} faces no rated opponents, skipping", roster.name(team));
                return None;
            }
            Some(ScheduleStrength {
                team,
                rank: 0,
                average: totals[team] / games[team] as f64,
                rated_games: games[team],
            })
        })
        .collect();

    // sort_by is stable, so equal averages stay in roster order
    ranking.sort_by(|a, b| {
        b.average
            .partial_cmp(&a.average)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for (i, row) in ranking.iter_mut().enumerate() {
        row.rank = i + 1;
    }

    Ok(ranking)
}

/// English ordinal: 1st, 2nd, 3rd, 4th, ..., 11th, 12th, 13th, 21st
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        Roster::new(["A", "B", "C", "D"]).unwrap()
    }

    fn rates(pairs: &[(&str, f64)]) -> FxHashMap<String, f64> {
        pairs.iter().map(|&(t, r)| (t.to_string(), r)).collect()
    }

    #[test]
    fn test_ordinal() {
        let got: Vec<String> = [1, 2, 3, 4, 10, 11, 12, 13, 21, 22, 23, 101, 111]
            .iter()
            .map(|&n| ordinal(n))
            .collect();
        assert_eq!(
            got,
            [
                "1st", "2nd", "3rd", "4th", "10th", "11th", "12th", "13th", "21st", "22nd",
                "23rd", "101st", "111th"
            ]
        );
    }

    #[test]
    fn test_repeat_opponents_count_twice() {
        let games = [Matchup::new(0, 1), Matchup::new(0, 1), Matchup::new(0, 2)];
        let ranking = strength_of_schedule(
            &roster(),
            games.iter(),
            &rates(&[("A", 0.5), ("B", 0.9), ("C", 0.3), ("D", 0.1)]),
        )
        .unwrap();

        let a = ranking.iter().find(|r| r.team == 0).unwrap();
        assert!((a.average - 0.7).abs() < 1e-9);
        assert_eq!(a.rated_games, 3);
        // D never plays
        assert!(ranking.iter().all(|r| r.team != 3));
    }

    #[test]
    fn test_ranking_descending_with_stable_ties() {
        let games = [Matchup::new(0, 1), Matchup::new(2, 3)];
        let ranking = strength_of_schedule(
            &roster(),
            games.iter(),
            &rates(&[("A", 0.4), ("B", 0.4), ("C", 0.8), ("D", 0.2)]),
        )
        .unwrap();

        let order: Vec<(TeamId, usize)> = ranking.iter().map(|r| (r.team, r.rank)).collect();
        // D faces 0.8, A and B face 0.4 (tie, roster order), C faces 0.2
        assert_eq!(order, vec![(3, 1), (0, 2), (1, 3), (2, 4)]);
    }

    #[test]
    fn test_unrated_opponents_excluded() {
        let games = [Matchup::new(0, 1), Matchup::new(2, 3), Matchup::new(0, 2)];
        let ranking =
            strength_of_schedule(&roster(), games.iter(), &rates(&[("A", 0.6), ("Z", 0.9)]))
                .unwrap();

        // Only B and C faced A; nobody else faced a rated team
        let teams: Vec<TeamId> = ranking.iter().map(|r| r.team).collect();
        assert_eq!(teams, vec![1, 2]);
        assert!(ranking.iter().all(|r| (r.average - 0.6).abs() < 1e-9));
    }

    #[test]
    fn test_bad_rate_rejected() {
        let no_games = std::iter::empty::<&Matchup>();
        let err = strength_of_schedule(&roster(), no_games, &rates(&[("A", 1.5)])).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidWinRate { .. }));
    }
}
