//! QPFL Core - League data model
//!
//! This crate provides the shared vocabulary of the scheduler:
//! - Roster of teams (fixed order, even size)
//! - Rival pairings (a complete involution over the roster)
//! - Matchups and the symmetric per-pair meeting counter
//! - League configuration loaded from JSON

pub mod counter;
pub mod error;
pub mod league;
pub mod matchup;
pub mod rivals;
pub mod roster;

// Re-exports for convenient access
pub use counter::MatchupCounter;
pub use error::LeagueError;
pub use league::{League, LeagueConfig};
pub use matchup::Matchup;
pub use rivals::RivalMap;
pub use roster::{Roster, TeamId};
