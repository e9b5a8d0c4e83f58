// Common test utilities and helpers
#![allow(dead_code)]

use season_projector::{MatchFixture, Snapshot, TeamRecord};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Team record with a consistent tally
pub fn team(name: &str, wins: u32, draws: u32, losses: u32, goals_for: u32, goals_against: u32) -> TeamRecord {
    TeamRecord {
        name: name.to_string(),
        country: String::new(),
        matches_played: wins + draws + losses,
        wins,
        draws,
        losses,
        goals_for,
        goals_against,
        points: 3 * wins + draws,
    }
}

/// Four-team double round robin after two of six matchdays
pub fn small_league() -> Snapshot {
    let teams = vec![
        team("Arsenal", 2, 0, 0, 3, 0),
        team("Barcelona", 1, 0, 1, 3, 3),
        team("Celtic", 0, 1, 1, 1, 2),
        team("Dortmund", 0, 1, 1, 2, 4),
    ];

    let fixtures = vec![
        MatchFixture::played("Arsenal", "Barcelona", 1, 2, 0),
        MatchFixture::played("Celtic", "Dortmund", 1, 1, 1),
        MatchFixture::played("Arsenal", "Celtic", 2, 1, 0),
        MatchFixture::played("Barcelona", "Dortmund", 2, 3, 1),
        MatchFixture::unplayed("Arsenal", "Dortmund", 3),
        MatchFixture::unplayed("Barcelona", "Celtic", 3),
        MatchFixture::unplayed("Barcelona", "Arsenal", 4),
        MatchFixture::unplayed("Dortmund", "Celtic", 4),
        MatchFixture::unplayed("Celtic", "Arsenal", 5),
        MatchFixture::unplayed("Dortmund", "Barcelona", 5),
        MatchFixture::unplayed("Dortmund", "Arsenal", 6),
        MatchFixture::unplayed("Celtic", "Barcelona", 6),
    ];

    Snapshot::new(teams, fixtures).with_name("Test League")
}

/// Two fresh teams and a single unplayed fixture
pub fn two_team_snapshot() -> Snapshot {
    Snapshot::new(
        vec![TeamRecord::new("Ajax"), TeamRecord::new("Benfica")],
        vec![MatchFixture::unplayed("Ajax", "Benfica", 1)],
    )
}

/// Every fixture already has a result
pub fn finished_league() -> Snapshot {
    let teams = vec![
        team("Arsenal", 2, 0, 0, 3, 0),
        team("Barcelona", 1, 0, 1, 3, 3),
        team("Celtic", 0, 1, 1, 1, 2),
        team("Dortmund", 0, 1, 1, 2, 4),
    ];

    let fixtures = vec![
        MatchFixture::played("Arsenal", "Barcelona", 1, 2, 0),
        MatchFixture::played("Celtic", "Dortmund", 1, 1, 1),
        MatchFixture::played("Arsenal", "Celtic", 2, 1, 0),
        MatchFixture::played("Barcelona", "Dortmund", 2, 3, 1),
    ];

    Snapshot::new(teams, fixtures)
}

/// Competition record as written by the persistence layer
pub fn competition_json() -> &'static str {
    r#"{
        "competition_name": "Champions League",
        "current_matchday": 1,
        "teams": {
            "Arsenal": {
                "name": "Arsenal", "country": "England",
                "matches_played": 1, "wins": 1, "draws": 0, "losses": 0,
                "goals_for": 2, "goals_against": 0, "points": 3
            },
            "Barcelona": {
                "name": "Barcelona", "country": "Spain",
                "matches_played": 1, "wins": 0, "draws": 0, "losses": 1,
                "goals_for": 0, "goals_against": 2, "points": 0
            }
        },
        "matches": [
            {
                "home_team": "Arsenal", "away_team": "Barcelona", "matchday": 1,
                "home_score": 2, "away_score": 0, "played": true
            },
            {
                "home_team": "Barcelona", "away_team": "Arsenal", "matchday": 2,
                "home_score": null, "away_score": null, "played": false
            }
        ]
    }"#
}

/// Write `content` into a fresh temporary directory
pub fn write_temp_file(file_name: &str, content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join(file_name);
    fs::write(&path, content).expect("Failed to write temp file");
    (temp_dir, path)
}
