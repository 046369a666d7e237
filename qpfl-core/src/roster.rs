//! Roster - the fixed, ordered set of teams in a season

use rustc_hash::FxHashMap;

use crate::error::LeagueError;

/// Position of a team in the roster.
pub type TeamId = usize;

/// Ordered list of team names with O(1) name lookup.
///
/// The roster order is significant: the week scheduler walks teams in
/// this order and reports list pairs by it.
#[derive(Clone, Debug)]
pub struct Roster {
    names: Vec<String>,
    index: FxHashMap<String, TeamId>,
}

impl Roster {
    /// Build a roster, rejecting empty, odd-sized, or duplicated team lists
    /// and names the schedule listing could not read back
    pub fn new<I, S>(names: I) -> Result<Self, LeagueError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        if names.len() < 2 {
            return Err(LeagueError::InvalidRoster(format!(
                "need at least two teams, got {}",
                names.len()
            )));
        }
        if names.len() % 2 != 0 {
            return Err(LeagueError::InvalidRoster(format!(
                "team count must be even (no byes), got {}",
                names.len()
            )));
        }

        let mut index = FxHashMap::default();
        for (id, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(LeagueError::InvalidRoster(format!(
                    "team {} has an empty name",
                    id + 1
                )));
            }
            if let Some(problem) = listing_problem(name) {
                return Err(LeagueError::InvalidRoster(format!(
                    "team name {:?} {}",
                    name, problem
                )));
            }
            if index.insert(name.clone(), id).is_some() {
                return Err(LeagueError::DuplicateTeam(name.clone()));
            }
        }

        Ok(Self { names, index })
    }

    /// Number of teams
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Matchups needed to pair every team once
    pub fn matchups_per_week(&self) -> usize {
        self.names.len() / 2
    }

    /// Name of the team at `id`
    ///
    /// # Panics
    /// Panics if `id` is not a position in this roster.
    pub fn name(&self, id: TeamId) -> &str {
        &self.names[id]
    }

    /// Look up a team by name
    pub fn id(&self, name: &str) -> Result<TeamId, LeagueError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| LeagueError::UnknownTeam(name.to_string()))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// All team ids in roster order
    pub fn ids(&self) -> impl Iterator<Item = TeamId> {
        0..self.names.len()
    }
}

/// Why `name` would not read back from a `"<label>: <a> versus <b>, ..."` line
fn listing_problem(name: &str) -> Option<&'static str> {
    if name.trim() != name {
        Some("has leading or trailing whitespace")
    } else if name.chars().any(char::is_control) {
        Some("contains a control character")
    } else if name.contains(':') {
        Some("contains ':'")
    } else if name.contains(", ") || name.ends_with(',') {
        Some("contains the game separator ','")
    } else if name.contains(" versus ")
        || name.starts_with("versus ")
        || name.ends_with(" versus")
    {
        Some("contains the word 'versus'")
    } else {
        None
    }
}
