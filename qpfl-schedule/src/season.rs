//! Season generation - week loop with week restarts and season restarts
//!
//! Level 1 - Orchestration and Level 2 - Phases

use std::fmt;
use std::str::FromStr;

use qpfl_core::{League, Matchup, MatchupCounter};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::audit::{validate_schedule, ScheduleAudit};
use crate::config::{create_rng, AttemptLimits, SeasonConfig};
use crate::error::ScheduleError;
use crate::retry::attempt;
use crate::rivalry::rivalry_week;
use crate::week::{schedule_week, WeekSchedule};

/// Label of a week in the season listing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WeekLabel {
    /// `Week <n>`
    Regular(usize),
    /// `Rivalry Week <n>`
    Rivalry(usize),
}

impl WeekLabel {
    /// 1-based week number
    pub fn week(&self) -> usize {
        match *self {
            WeekLabel::Regular(n) | WeekLabel::Rivalry(n) => n,
        }
    }

    pub fn is_rivalry(&self) -> bool {
        matches!(self, WeekLabel::Rivalry(_))
    }
}

impl fmt::Display for WeekLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekLabel::Regular(n) => write!(f, "Week {}", n),
            WeekLabel::Rivalry(n) => write!(f, "Rivalry Week {}", n),
        }
    }
}

impl FromStr for WeekLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (rivalry, number) = match s.strip_prefix("Rivalry Week ") {
            Some(rest) => (true, rest),
            None => match s.strip_prefix("Week ") {
                Some(rest) => (false, rest),
                None => return Err(format!("unrecognized week label {:?}", s)),
            },
        };
        let n: usize = number
            .trim()
            .parse()
            .map_err(|_| format!("bad week number in {:?}", s))?;
        if n == 0 {
            return Err(format!("week numbers start at 1, got {:?}", s));
        }
        Ok(if rivalry {
            WeekLabel::Rivalry(n)
        } else {
            WeekLabel::Regular(n)
        })
    }
}

/// A week of the finished season
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledWeek {
    pub label: WeekLabel,
    pub matchups: Vec<Matchup>,
}

impl ScheduledWeek {
    pub fn as_week(&self) -> WeekSchedule {
        WeekSchedule::new(self.matchups.clone())
    }
}

/// All weeks of a season, in order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeasonSchedule {
    pub weeks: Vec<ScheduledWeek>,
}

impl SeasonSchedule {
    /// Every game of the season, week by week
    pub fn all_matchups(&self) -> impl Iterator<Item = &Matchup> {
        self.weeks.iter().flat_map(|w| w.matchups.iter())
    }

    /// Week by 1-based number
    pub fn week(&self, number: usize) -> Option<&ScheduledWeek> {
        self.weeks.iter().find(|w| w.label.week() == number)
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }
}

/// How hard the search had to work
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Season attempts used, the successful one included
    pub season_attempts: usize,
    /// Week retries inside the successful attempt
    pub week_restarts: usize,
}

/// A validated season and its bookkeeping
#[derive(Clone, Debug)]
pub struct GeneratedSeason {
    pub schedule: SeasonSchedule,
    pub counter: MatchupCounter,
    pub audit: ScheduleAudit,
    pub stats: GenerationStats,
}

/// Mutable state of one season attempt. Built fresh per attempt and
/// dropped whole when the attempt is abandoned.
#[derive(Clone, Debug)]
struct SeasonState {
    counter: MatchupCounter,
    weeks: Vec<ScheduledWeek>,
    previous_week: Vec<Matchup>,
}

impl SeasonState {
    fn new(teams: usize) -> Self {
        Self {
            counter: MatchupCounter::new(teams),
            weeks: Vec::new(),
            previous_week: Vec::new(),
        }
    }

    /// Accept a week: count its games and make it the new previous week
    fn commit(&mut self, label: WeekLabel, week: WeekSchedule) {
        self.counter.record_all(&week.matchups);
        self.previous_week = week.matchups.clone();
        self.weeks.push(ScheduledWeek {
            label,
            matchups: week.matchups,
        });
    }
}

/// Successful season attempt
struct AttemptOutcome {
    state: SeasonState,
    week_restarts: usize,
}

// ============================================================================
// Level 1 - Orchestration
// ============================================================================

/// Generate a full season (Level 1 orchestration)
///
/// One seed per season attempt is drawn up front from the master RNG, so
/// attempts are independent and the result for a given seed does not
/// depend on whether attempts run sequentially or in parallel. The first
/// successful attempt in attempt order wins and is audited before being
/// returned.
///
/// # Errors
/// - [`ScheduleError::Exhausted`] when every season attempt was abandoned
/// - any fatal consistency or configuration error, immediately
pub fn generate_season(
    league: &League,
    config: &SeasonConfig,
) -> Result<GeneratedSeason, ScheduleError> {
    let limits = config.limits;
    let mut master = create_rng(config.seed);
    let seeds: Vec<u64> = (0..limits.season_attempts).map(|_| master.gen()).collect();

    tracing::info!(
        "Generating {}-week season for {} teams (rivalry week {}, repeats from week {})",
        league.season_length,
        league.roster.len(),
        league.rivalry_week,
        league.repeat_week
    );

    let found = if config.parallel {
        search_parallel(league, &limits, &seeds)?
    } else {
        search_sequential(league, &limits, &seeds)?
    };

    let (attempt_no, outcome) = match found {
        Some(found) => found,
        None => {
            tracing::warn!("Giving up after {} season attempts", seeds.len());
            return Err(ScheduleError::Exhausted {
                attempts: seeds.len(),
            });
        }
    };

    let schedule = SeasonSchedule {
        weeks: outcome.state.weeks,
    };
    let counter = outcome.state.counter;
    let audit = validate_schedule(league, &schedule, &counter)?;

    let stats = GenerationStats {
        season_attempts: attempt_no + 1,
        week_restarts: outcome.week_restarts,
    };
    tracing::info!(
        "Season found on attempt {} ({} week restarts)",
        stats.season_attempts,
        stats.week_restarts
    );

    Ok(GeneratedSeason {
        schedule,
        counter,
        audit,
        stats,
    })
}

// ============================================================================
// Level 2 - Phases
// ============================================================================

/// Try seeds one after another
fn search_sequential(
    league: &League,
    limits: &AttemptLimits,
    seeds: &[u64],
) -> Result<Option<(usize, AttemptOutcome)>, ScheduleError> {
    let found = attempt(seeds.len(), |attempt_no| {
        let outcome = run_season_attempt(league, limits, attempt_no, seeds[attempt_no])?;
        Ok::<_, ScheduleError>(outcome.map(|o| (attempt_no, o)))
    })?;
    Ok(found.ok())
}

/// Try seeds on the rayon pool; the lowest successful attempt index wins
fn search_parallel(
    league: &League,
    limits: &AttemptLimits,
    seeds: &[u64],
) -> Result<Option<(usize, AttemptOutcome)>, ScheduleError> {
    seeds
        .par_iter()
        .enumerate()
        .find_map_first(|(attempt_no, &seed)| {
            match run_season_attempt(league, limits, attempt_no, seed) {
                Ok(Some(outcome)) => Some(Ok((attempt_no, outcome))),
                Ok(None) => None,
                Err(e) => Some(Err(e)),
            }
        })
        .transpose()
}

/// One season attempt from week 1 (Level 2 phase)
///
/// Each regular week gets `week_failures + 1` tries; running past that
/// abandons the attempt and returns `None`.
fn run_season_attempt(
    league: &League,
    limits: &AttemptLimits,
    attempt_no: usize,
    seed: u64,
) -> Result<Option<AttemptOutcome>, ScheduleError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut state = SeasonState::new(league.roster.len());
    let mut week_restarts = 0;

    for week in 1..=league.season_length {
        if league.is_rivalry_week(week) {
            state.commit(WeekLabel::Rivalry(week), rivalry_week(league)?);
            continue;
        }

        let scheduled = attempt(limits.week_failures + 1, |try_no| {
            if try_no > 0 {
                week_restarts += 1;
            }
            schedule_week(
                league,
                week,
                &state.counter,
                &state.previous_week,
                limits.team_attempts,
                &mut rng,
            )
        })?;

        match scheduled {
            Ok(schedule) => state.commit(WeekLabel::Regular(week), schedule),
            Err(exhausted) => {
                tracing::warn!(
                    "Season attempt {}: week {} failed {} times in a row, restarting season",
                    attempt_no + 1,
                    week,
                    exhausted.tries
                );
                return Ok(None);
            }
        }
    }

    tracing::debug!(
        "Season attempt {} complete with {} week restarts",
        attempt_no + 1,
        week_restarts
    );

    Ok(Some(AttemptOutcome {
        state,
        week_restarts,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use qpfl_core::LeagueConfig;

    fn four_team_league() -> League {
        LeagueConfig {
            name: "mini".to_string(),
            teams: ["A", "B", "C", "D"].iter().map(|t| t.to_string()).collect(),
            rivals: vec![
                ("A".to_string(), "B".to_string()),
                ("C".to_string(), "D".to_string()),
            ],
            season_length: 3,
            rivalry_week: 2,
            repeat_week: 3,
            max_meetings: 2,
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn test_week_label_display_and_parse() {
        assert_eq!(WeekLabel::Regular(3).to_string(), "Week 3");
        assert_eq!(WeekLabel::Rivalry(9).to_string(), "Rivalry Week 9");
        assert_eq!("Week 12".parse::<WeekLabel>(), Ok(WeekLabel::Regular(12)));
        assert_eq!(
            "Rivalry Week 9".parse::<WeekLabel>(),
            Ok(WeekLabel::Rivalry(9))
        );
        assert!("Weak 1".parse::<WeekLabel>().is_err());
        assert!("Week 0".parse::<WeekLabel>().is_err());
        assert!("Week x".parse::<WeekLabel>().is_err());
    }

    #[test]
    fn test_four_team_scenario() {
        let league = four_team_league();
        let ab_cd = [Matchup::new(0, 1), Matchup::new(2, 3)];

        for seed in 0..20 {
            let config = SeasonConfig::for_roster(4).with_seed(seed);
            let season = generate_season(&league, &config).unwrap();
            let weeks = &season.schedule.weeks;
            assert_eq!(weeks.len(), 3);

            assert_eq!(weeks[1].label, WeekLabel::Rivalry(2));
            assert_eq!(weeks[1].matchups, ab_cd.to_vec());

            for week in [&weeks[0], &weeks[2]] {
                assert!(!week.label.is_rivalry());
                assert_eq!(week.matchups.len(), 2);
                for m in &week.matchups {
                    assert!(ab_cd.iter().all(|r| !r.same_pair(m)));
                }
            }

            for a in 0..4 {
                for b in 0..4 {
                    assert!(season.counter.count(a, b).unwrap() <= 2);
                }
            }
        }
    }

    #[test]
    fn test_default_league_generates() {
        let league = LeagueConfig::default().validate().unwrap();
        let config = SeasonConfig::for_roster(10).with_seed(2024);
        let season = generate_season(&league, &config).unwrap();

        assert_eq!(season.schedule.len(), 15);
        assert_eq!(season.counter.total_games(), 75);
        assert!(season.schedule.week(9).unwrap().label.is_rivalry());
        assert!(season.stats.season_attempts >= 1);
    }

    #[test]
    fn test_same_seed_same_season() {
        let league = LeagueConfig::default().validate().unwrap();
        let config = SeasonConfig::for_roster(10).with_seed(99);
        let a = generate_season(&league, &config).unwrap();
        let b = generate_season(&league, &config).unwrap();
        assert_eq!(a.schedule, b.schedule);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let league = LeagueConfig::default().validate().unwrap();
        let sequential = SeasonConfig::for_roster(10).with_seed(5);
        let parallel = sequential.clone().parallel(true);

        let a = generate_season(&league, &sequential).unwrap();
        let b = generate_season(&league, &parallel).unwrap();
        assert_eq!(a.schedule, b.schedule);
        assert_eq!(a.stats, b.stats);
    }

    #[test]
    fn test_tiny_team_ceiling_forces_week_restarts() {
        let league = four_team_league();
        let limits = AttemptLimits::default().with_team_attempts(1);

        let mut recoveries = 0;
        for seed in 0..10 {
            let config = SeasonConfig::default().with_limits(limits).with_seed(seed);
            let season = generate_season(&league, &config).unwrap();
            assert_eq!(season.schedule.len(), 3);
            recoveries += season.stats.week_restarts + season.stats.season_attempts - 1;
        }
        assert!(recoveries > 0, "a one-draw ceiling should force restarts");
    }

    #[test]
    fn test_impossible_season_exhausts_budget() {
        // Rivals held back until week 4, but with the cap at 1 each team
        // only has two legal opponents for weeks 1-3.
        let league = LeagueConfig {
            name: "impossible".to_string(),
            teams: ["A", "B", "C", "D"].iter().map(|t| t.to_string()).collect(),
            rivals: vec![
                ("A".to_string(), "B".to_string()),
                ("C".to_string(), "D".to_string()),
            ],
            season_length: 4,
            rivalry_week: 4,
            repeat_week: 10,
            max_meetings: 2,
        }
        .validate()
        .unwrap();
        let limits = AttemptLimits::default()
            .with_team_attempts(20)
            .with_week_failures(3)
            .with_season_attempts(5);
        let config = SeasonConfig::default().with_limits(limits).with_seed(1);

        let err = generate_season(&league, &config).unwrap_err();
        assert!(matches!(err, ScheduleError::Exhausted { attempts: 5 }));
    }
}
