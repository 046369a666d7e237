//! Error types for the league model

/// Errors raised while building or consulting league state.
///
/// Every variant is fatal: they describe malformed configuration or a
/// broken internal invariant, never a condition worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeagueError {
    #[error("invalid roster: {0}")]
    InvalidRoster(String),

    #[error("invalid season: {0}")]
    InvalidSeason(String),

    #[error("team listed twice in roster: {0}")]
    DuplicateTeam(String),

    #[error("unknown team: {0}")]
    UnknownTeam(String),

    #[error("malformed rival map: {0}")]
    MalformedRivalMap(String),

    #[error(
        "asymmetric meeting count for ({home}, {away}): \
         {home} vs {away} = {forward}, {away} vs {home} = {backward}"
    )]
    CounterAsymmetry {
        home: String,
        away: String,
        forward: u32,
        backward: u32,
    },
}
