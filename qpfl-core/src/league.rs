//! LeagueConfig - season parameters loaded from JSON

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::LeagueError;
use crate::rivals::RivalMap;
use crate::roster::Roster;

/// Season parameters as stored on disk
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeagueConfig {
    pub name: String,
    /// Teams in scheduling order
    pub teams: Vec<String>,
    /// Rival pairs; every team appears in exactly one
    pub rivals: Vec<(String, String)>,
    /// Total number of weeks, rivalry week included
    pub season_length: usize,
    /// 1-based week reserved for rivalry games
    pub rivalry_week: usize,
    /// First week in which a pair may meet a second time
    pub repeat_week: usize,
    /// Meeting cap once repeats are allowed
    #[serde(default = "default_max_meetings")]
    pub max_meetings: u32,
}

fn default_max_meetings() -> u32 {
    2
}

impl Default for LeagueConfig {
    fn default() -> Self {
        let teams = [
            "Griffin",
            "Ryan",
            "Kaminska",
            "Connor",
            "Stephen",
            "Tim/Spencer",
            "Bocki",
            "Joe",
            "Bill",
            "Arnav",
        ];
        let rivals = teams
            .chunks(2)
            .map(|pair| (pair[0].to_string(), pair[1].to_string()))
            .collect();

        Self {
            name: "QPFL".to_string(),
            teams: teams.iter().map(|t| t.to_string()).collect(),
            rivals,
            season_length: 15,
            rivalry_week: 9,
            repeat_week: 7,
            max_meetings: default_max_meetings(),
        }
    }
}

impl LeagueConfig {
    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: LeagueConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check the parameters and build the runtime league description
    pub fn validate(&self) -> Result<League, LeagueError> {
        let roster = Roster::new(self.teams.iter().cloned())?;
        let rivals = RivalMap::from_pairs(&roster, &self.rivals)?;

        if self.season_length == 0 {
            return Err(LeagueError::InvalidSeason(
                "season must have at least one week".to_string(),
            ));
        }
        if self.rivalry_week == 0 || self.rivalry_week > self.season_length {
            return Err(LeagueError::InvalidSeason(format!(
                "rivalry week {} is outside the {}-week season",
                self.rivalry_week, self.season_length
            )));
        }
        if self.max_meetings == 0 {
            return Err(LeagueError::InvalidSeason(
                "meeting cap must be at least 1".to_string(),
            ));
        }

        Ok(League {
            name: self.name.clone(),
            roster,
            rivals,
            season_length: self.season_length,
            rivalry_week: self.rivalry_week,
            repeat_week: self.repeat_week,
            max_meetings: self.max_meetings,
        })
    }
}

/// A validated league, ready to schedule
#[derive(Clone, Debug)]
pub struct League {
    pub name: String,
    pub roster: Roster,
    pub rivals: RivalMap,
    pub season_length: usize,
    pub rivalry_week: usize,
    pub repeat_week: usize,
    pub max_meetings: u32,
}

impl League {
    /// Per-pair meeting cap in effect for `week`: 1 before the repeat week, then `max_meetings`
    pub fn meeting_cap(&self, week: usize) -> u32 {
        if week < self.repeat_week {
            1
        } else {
            self.max_meetings
        }
    }

    pub fn is_rivalry_week(&self, week: usize) -> bool {
        week == self.rivalry_week
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let league = LeagueConfig::default().validate().unwrap();
        assert_eq!(league.roster.len(), 10);
        assert_eq!(league.rivals.pairs().len(), 5);
        assert_eq!(league.season_length, 15);
        assert_eq!(league.rivalry_week, 9);
    }

    #[test]
    fn test_meeting_cap_phases() {
        let league = LeagueConfig::default().validate().unwrap();
        assert_eq!(league.meeting_cap(1), 1);
        assert_eq!(league.meeting_cap(6), 1);
        assert_eq!(league.meeting_cap(7), 2);
        assert_eq!(league.meeting_cap(15), 2);
    }

    #[test]
    fn test_rivalry_week_out_of_range() {
        let config = LeagueConfig {
            rivalry_week: 16,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(LeagueError::InvalidSeason(_))));

        let config = LeagueConfig {
            rivalry_week: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_round_trip_defaults_cap() {
        let json = r#"{
            "name": "Mini",
            "teams": ["A", "B", "C", "D"],
            "rivals": [["A", "B"], ["C", "D"]],
            "season_length": 3,
            "rivalry_week": 2,
            "repeat_week": 3
        }"#;
        let config: LeagueConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.max_meetings, 2);
        let league = config.validate().unwrap();
        assert!(league.is_rivalry_week(2));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("qpfl-league-{}.json", std::process::id()));
        let config = LeagueConfig::default();
        config.save(&path).unwrap();
        let loaded = LeagueConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }
}
