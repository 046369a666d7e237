//! QPFL Schedule - Randomized constraint-satisfaction season generator
//!
//! This crate builds a week-by-week schedule for a fixed round-robin league:
//! - Matchup validation (no self games, no back-to-back repeats, rivals held back)
//! - Greedy random week construction with per-team retry ceilings
//! - Rivalry week injection
//! - Season orchestration with week restarts and full season restarts
//! - Post-hoc consistency audit and strength-of-schedule ranking
//! - Flat text listings (render and re-parse)
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: generate_season (orchestration)
//! - Level 2: run_season_attempt, validate_schedule (phases)
//! - Level 3: schedule_week, rivalry_week, MatchupValidator (steps)
//! - Level 4: retry combinator, configuration, reports

mod audit;
mod config;
mod error;
mod report;
mod retry;
mod rivalry;
mod season;
mod strength;
mod validator;
mod week;

pub use audit::{validate_schedule, PairTally, ScheduleAudit};
pub use config::{create_rng, AttemptLimits, SeasonConfig};
pub use error::ScheduleError;
pub use report::{
    parse_schedule_listing, render_audit, render_schedule, render_strength,
    render_team_schedules, resolve_listing, roster_from_listing, ParsedWeek,
};
pub use retry::{attempt, Exhausted};
pub use rivalry::rivalry_week;
pub use season::{
    generate_season, GeneratedSeason, GenerationStats, ScheduledWeek, SeasonSchedule, WeekLabel,
};
pub use strength::{ordinal, strength_of_schedule, ScheduleStrength};
pub use validator::{MatchupValidator, Rejection};
pub use week::{schedule_week, WeekSchedule};
