//! Flat text listings - what the league office reads and what other tools re-parse
//!
//! Level 4 - Formatting utilities

use qpfl_core::{Matchup, Roster};

use crate::audit::ScheduleAudit;
use crate::error::ScheduleError;
use crate::season::{ScheduledWeek, SeasonSchedule, WeekLabel};
use crate::strength::{ordinal, ScheduleStrength};

/// One line of a schedule listing, team names unresolved
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedWeek {
    pub label: WeekLabel,
    pub games: Vec<(String, String)>,
}

impl ParsedWeek {
    /// Map team names onto roster positions
    pub fn resolve(&self, roster: &Roster) -> Result<ScheduledWeek, ScheduleError> {
        let matchups = self
            .games
            .iter()
            .map(|(home, away)| -> Result<Matchup, ScheduleError> {
                Ok(Matchup::new(roster.id(home)?, roster.id(away)?))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ScheduledWeek {
            label: self.label,
            matchups,
        })
    }

    /// Opponent of `team` this week, by name
    pub fn opponent_of(&self, team: &str) -> Option<&str> {
        self.games.iter().find_map(|(home, away)| {
            if home == team {
                Some(away.as_str())
            } else if away == team {
                Some(home.as_str())
            } else {
                None
            }
        })
    }
}

/// `"<label>: <home> versus <away>, <home> versus <away>, ..."`, one line per week
pub fn render_schedule(roster: &Roster, schedule: &SeasonSchedule) -> String {
    let mut out = String::new();
    for week in &schedule.weeks {
        let games: Vec<String> = week.matchups.iter().map(|m| m.render(roster)).collect();
        out.push_str(&format!("{}: {}\n", week.label, games.join(", ")));
    }
    out
}

/// Parse a listing produced by [`render_schedule`]. Blank lines are skipped.
pub fn parse_schedule_listing(text: &str) -> Result<Vec<ParsedWeek>, ScheduleError> {
    let mut weeks = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        if line.trim().is_empty() {
            continue;
        }
        let parse_err = |reason: String| ScheduleError::Parse {
            line: line_no,
            reason,
        };

        let (label, games) = line
            .split_once(':')
            .ok_or_else(|| parse_err("missing ':' after week label".to_string()))?;
        let label: WeekLabel = label.parse().map_err(parse_err)?;

        let games = games.trim();
        if games.is_empty() {
            return Err(parse_err(format!("{} has no games", label)));
        }

        let games = games
            .split(", ")
            .map(|game| -> Result<(String, String), ScheduleError> {
                let (home, away) = game
                    .split_once(" versus ")
                    .ok_or_else(|| parse_err(format!("{:?} is not '<team> versus <team>'", game)))?;
                let (home, away) = (home.trim(), away.trim());
                if home.is_empty() || away.is_empty() {
                    return Err(parse_err(format!("{:?} is missing a team", game)));
                }
                Ok((home.to_string(), away.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        weeks.push(ParsedWeek { label, games });
    }

    Ok(weeks)
}

/// Roster in order of first appearance in the listing
pub fn roster_from_listing(weeks: &[ParsedWeek]) -> Result<Roster, ScheduleError> {
    let mut names: Vec<&str> = Vec::new();
    for (home, away) in weeks.iter().flat_map(|w| w.games.iter()) {
        for name in [home.as_str(), away.as_str()] {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    Ok(Roster::new(names)?)
}

/// Resolve every parsed week against a roster
pub fn resolve_listing(
    roster: &Roster,
    weeks: &[ParsedWeek],
) -> Result<SeasonSchedule, ScheduleError> {
    let weeks = weeks
        .iter()
        .map(|w| w.resolve(roster))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SeasonSchedule { weeks })
}

/// Each team's season, week by week, from a parsed listing.
///
/// ```text
/// Griffin Schedule
/// Week 1: versus Bill
/// Rivalry Week 9: versus Ryan
/// ```
pub fn render_team_schedules(
    roster: &Roster,
    weeks: &[ParsedWeek],
) -> Result<String, ScheduleError> {
    let mut blocks = Vec::with_capacity(roster.len());

    for team in roster.names() {
        let mut block = format!("{} Schedule\n", team);
        for week in weeks {
            let opponent = week
                .opponent_of(team)
                .ok_or_else(|| ScheduleError::ImperfectWeek {
                    week: week.label.to_string(),
                    reason: format!("{} has no game", team),
                })?;
            block.push_str(&format!("{}: versus {}\n", week.label, opponent));
        }
        blocks.push(block);
    }

    Ok(blocks.join("\n"))
}

/// `"(<team>, <team>) plays <k> times"`, one line per pair that met
pub fn render_audit(roster: &Roster, audit: &ScheduleAudit) -> String {
    audit
        .tallies
        .iter()
        .map(|t| {
            format!(
                "({}, {}) plays {} times\n",
                roster.name(t.first),
                roster.name(t.second),
                t.count
            )
        })
        .collect()
}

/// `"<team> has the <rank> hardest schedule with an opponent winning percentage of <avg>"`
pub fn render_strength(roster: &Roster, ranking: &[ScheduleStrength]) -> String {
    ranking
        .iter()
        .map(|row| {
            format!(
                "{} has the {} hardest schedule with an opponent winning percentage of {:.3}\n",
                roster.name(row.team),
                ordinal(row.rank),
                row.average
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::PairTally;

    fn roster() -> Roster {
        Roster::new(["Griffin", "Ryan", "Tim/Spencer", "Bill"]).unwrap()
    }

    fn schedule() -> SeasonSchedule {
        SeasonSchedule {
            weeks: vec![
                ScheduledWeek {
                    label: WeekLabel::Regular(1),
                    matchups: vec![Matchup::new(0, 2), Matchup::new(1, 3)],
                },
                ScheduledWeek {
                    label: WeekLabel::Rivalry(2),
                    matchups: vec![Matchup::new(0, 1), Matchup::new(2, 3)],
                },
            ],
        }
    }

    #[test]
    fn test_render_schedule_layout() {
        let text = render_schedule(&roster(), &schedule());
        assert_eq!(
            text,
            "Week 1: Griffin versus Tim/Spencer, Ryan versus Bill\n\
             Rivalry Week 2: Griffin versus Ryan, Tim/Spencer versus Bill\n"
        );
    }

    #[test]
    fn test_listing_reparses_to_same_schedule() {
        let roster = roster();
        let text = render_schedule(&roster, &schedule());
        let parsed = parse_schedule_listing(&text).unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].label, WeekLabel::Rivalry(2));
        assert_eq!(resolve_listing(&roster, &parsed).unwrap(), schedule());

        let derived = roster_from_listing(&parsed).unwrap();
        assert_eq!(derived.names(), roster.names());
    }

    #[test]
    fn test_parse_errors_carry_line_numbers() {
        let err = parse_schedule_listing("Week 1: A versus B\n\nWeek 2 A versus B\n").unwrap_err();
        assert!(matches!(err, ScheduleError::Parse { line: 3, .. }));

        let err = parse_schedule_listing("Week 1: A plays B\n").unwrap_err();
        assert!(matches!(err, ScheduleError::Parse { line: 1, .. }));

        let err = parse_schedule_listing("Round 1: A versus B\n").unwrap_err();
        assert!(matches!(err, ScheduleError::Parse { line: 1, .. }));

        let err = parse_schedule_listing("Week 1:\n").unwrap_err();
        assert!(matches!(err, ScheduleError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_team_schedules() {
        let roster = roster();
        let parsed = parse_schedule_listing(&render_schedule(&roster, &schedule())).unwrap();
        let text = render_team_schedules(&roster, &parsed).unwrap();

        let griffin = "Griffin Schedule\n\
                       Week 1: versus Tim/Spencer\n\
                       Rivalry Week 2: versus Ryan\n";
        let bill = "\nBill Schedule\n\
                    Week 1: versus Ryan\n\
                    Rivalry Week 2: versus Tim/Spencer\n";
        assert!(text.starts_with(griffin));
        assert!(text.contains(bill));
    }

    #[test]
    fn test_team_missing_from_week() {
        let roster = roster();
        let parsed = parse_schedule_listing("Week 1: Griffin versus Ryan\n").unwrap();
        let err = render_team_schedules(&roster, &parsed).unwrap_err();
        assert!(matches!(err, ScheduleError::ImperfectWeek { .. }));
    }

    #[test]
    fn test_render_audit_and_strength() {
        let roster = roster();
        let audit = ScheduleAudit {
            tallies: vec![
                PairTally {
                    first: 0,
                    second: 1,
                    count: 1,
                },
                PairTally {
                    first: 0,
                    second: 2,
                    count: 2,
                },
            ],
        };
        assert_eq!(
            render_audit(&roster, &audit),
            "(Griffin, Ryan) plays 1 times\n(Griffin, Tim/Spencer) plays 2 times\n"
        );

        let ranking = vec![
            ScheduleStrength {
                team: 3,
                rank: 1,
                average: 0.61234,
                rated_games: 2,
            },
            ScheduleStrength {
                team: 0,
                rank: 2,
                average: 0.5,
                rated_games: 2,
            },
        ];
        assert_eq!(
            render_strength(&roster, &ranking),
            "Bill has the 1st hardest schedule with an opponent winning percentage of 0.612\n\
             Griffin has the 2nd hardest schedule with an opponent winning percentage of 0.500\n"
        );
    }
}
