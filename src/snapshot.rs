//! Competition snapshot and its JSON file adapter
//!
//! A snapshot is the read-only starting state of a projection. The file
//! adapter reads the competition record kept by the persistence layer:
//! teams keyed by name and a flat match list with a `played` flag.

use crate::standings;
use crate::types::{MatchFixture, MatchResult, TeamRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub competition_name: String,
    pub current_matchday: u32,
    pub teams: Vec<TeamRecord>,
    pub fixtures: Vec<MatchFixture>,
}

impl Snapshot {
    pub fn new(teams: Vec<TeamRecord>, fixtures: Vec<MatchFixture>) -> Self {
        let current_matchday = fixtures
            .iter()
            .filter(|f| f.is_played())
            .map(|f| f.matchday)
            .max()
            .unwrap_or(0);

        Self {
            competition_name: String::new(),
            current_matchday,
            teams,
            fixtures,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.competition_name = name.into();
        self
    }

    /// Team key to position in `teams`
    pub fn team_index(&self) -> HashMap<&str, usize> {
        self.teams
            .iter()
            .enumerate()
            .map(|(i, team)| (team.name.as_str(), i))
            .collect()
    }

    pub fn team(&self, name: &str) -> Option<&TeamRecord> {
        self.teams.iter().find(|team| team.name == name)
    }

    pub fn unplayed_fixtures(&self) -> impl Iterator<Item = &MatchFixture> {
        self.fixtures.iter().filter(|f| !f.is_played())
    }

    pub fn remaining_fixture_count(&self) -> usize {
        self.unplayed_fixtures().count()
    }

    /// Current table, best team first
    pub fn standings(&self) -> Vec<&TeamRecord> {
        standings::resolve(&self.teams)
            .into_iter()
            .map(|index| &self.teams[index])
            .collect()
    }

    /// Load a competition record from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SnapshotError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SnapshotError::FileRead(e.to_string()))?;

        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self, SnapshotError> {
        let record: CompetitionRecord = serde_json::from_str(content)
            .map_err(|e| SnapshotError::Parse(e.to_string()))?;

        record.into_snapshot()
    }
}

/// On-disk layout of a saved competition
#[derive(Debug, Deserialize)]
struct CompetitionRecord {
    competition_name: String,
    #[serde(default)]
    current_matchday: u32,
    teams: BTreeMap<String, TeamEntry>,
    #[serde(default)]
    matches: Vec<MatchEntry>,
}

#[derive(Debug, Deserialize)]
struct TeamEntry {
    name: String,
    #[serde(default)]
    country: String,
    matches_played: u32,
    wins: u32,
    draws: u32,
    losses: u32,
    goals_for: u32,
    goals_against: u32,
    points: u32,
}

#[derive(Debug, Deserialize)]
struct MatchEntry {
    home_team: String,
    away_team: String,
    matchday: u32,
    home_score: Option<u32>,
    away_score: Option<u32>,
    played: bool,
}

impl CompetitionRecord {
    fn into_snapshot(self) -> Result<Snapshot, SnapshotError> {
        let mut teams = Vec::with_capacity(self.teams.len());
        for (key, entry) in self.teams {
            if key != entry.name {
                return Err(SnapshotError::Inconsistent(format!(
                    "team entry '{}' is stored under key '{}'",
                    entry.name, key
                )));
            }
            teams.push(TeamRecord {
                name: entry.name,
                country: entry.country,
                matches_played: entry.matches_played,
                wins: entry.wins,
                draws: entry.draws,
                losses: entry.losses,
                goals_for: entry.goals_for,
                goals_against: entry.goals_against,
                points: entry.points,
            });
        }

        let mut fixtures = Vec::with_capacity(self.matches.len());
        for entry in self.matches {
            let result = match (entry.played, entry.home_score, entry.away_score) {
                (true, Some(home_score), Some(away_score)) => Some(MatchResult { home_score, away_score }),
                (false, None, None) => None,
                (played, _, _) => {
                    return Err(SnapshotError::Inconsistent(format!(
                        "{} vs {} (matchday {}) has played={} but scores do not match",
                        entry.home_team, entry.away_team, entry.matchday, played
                    )));
                }
            };

            fixtures.push(MatchFixture {
                home_team: entry.home_team,
                away_team: entry.away_team,
                matchday: entry.matchday,
                result,
            });
        }

        Ok(Snapshot {
            competition_name: self.competition_name,
            current_matchday: self.current_matchday,
            teams,
            fixtures,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Snapshot file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read snapshot file: {0}")]
    FileRead(String),

    #[error("Failed to parse snapshot: {0}")]
    Parse(String),

    #[error("Inconsistent snapshot: {0}")]
    Inconsistent(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str = r#"{
        "competition_name": "Champions League",
        "current_matchday": 1,
        "teams": {
            "Arsenal": {"name": "Arsenal", "country": "England", "matches_played": 1, "wins": 1,
                        "draws": 0, "losses": 0, "goals_for": 2, "goals_against": 0,
                        "points": 3, "goal_difference": 2},
            "Porto": {"name": "Porto", "country": "Portugal", "matches_played": 1, "wins": 0,
                      "draws": 0, "losses": 1, "goals_for": 0, "goals_against": 2,
                      "points": 0, "goal_difference": -2}
        },
        "matches": [
            {"home_team": "Arsenal", "away_team": "Porto", "matchday": 1,
             "home_score": 2, "away_score": 0, "played": true},
            {"home_team": "Porto", "away_team": "Arsenal", "matchday": 2,
             "home_score": null, "away_score": null, "played": false}
        ]
    }"#;

    #[test]
    fn test_parse_competition_record() {
        let snapshot = Snapshot::from_json_str(RECORD).unwrap();

        assert_eq!(snapshot.competition_name, "Champions League");
        assert_eq!(snapshot.teams.len(), 2);
        assert_eq!(snapshot.fixtures.len(), 2);
        assert!(snapshot.fixtures[0].is_played());
        assert_eq!(snapshot.remaining_fixture_count(), 1);
        assert_eq!(snapshot.standings()[0].name, "Arsenal");
        assert_eq!(snapshot.team("Porto").map(|t| t.country.as_str()), Some("Portugal"));
    }

    #[test]
    fn test_played_without_score_rejected() {
        let broken = RECORD.replace(
            r#""home_score": 2, "away_score": 0, "played": true"#,
            r#""home_score": null, "away_score": 0, "played": true"#,
        );
        let err = Snapshot::from_json_str(&broken).unwrap_err();
        assert!(matches!(err, SnapshotError::Inconsistent(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Snapshot::from_json_file("does/not/exist.json").unwrap_err();
        assert!(matches!(err, SnapshotError::FileNotFound(_)));
    }

    #[test]
    fn test_new_derives_current_matchday() {
        let snapshot = Snapshot::new(
            vec![TeamRecord::new("A"), TeamRecord::new("B")],
            vec![
                MatchFixture::played("A", "B", 3, 1, 0),
                MatchFixture::unplayed("B", "A", 4),
            ],
        );
        assert_eq!(snapshot.current_matchday, 3);
    }
}
