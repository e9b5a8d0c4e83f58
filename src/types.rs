// Competition types shared by the engine, the resolver and the snapshot adapter

use serde::{Deserialize, Serialize};

pub const POINTS_FOR_WIN: u32 = 3;
pub const POINTS_FOR_DRAW: u32 = 1;

/// Cumulative record of one team in the competition.
///
/// `name` is the unique key used by fixtures to reference the team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub name: String,
    #[serde(default)]
    pub country: String,
    pub matches_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
}

impl TeamRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: String::new(),
            matches_played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            points: 0,
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn goal_difference(&self) -> i64 {
        self.goals_for as i64 - self.goals_against as i64
    }

    /// Returns the record after one more match with the given score,
    /// seen from this team's side. The receiver is left untouched.
    pub fn with_result(&self, scored: u32, conceded: u32) -> Self {
        let mut next = self.clone();
        next.matches_played = next.matches_played.saturating_add(1);
        next.goals_for = next.goals_for.saturating_add(scored);
        next.goals_against = next.goals_against.saturating_add(conceded);

        if scored > conceded {
            next.wins = next.wins.saturating_add(1);
            next.points = next.points.saturating_add(POINTS_FOR_WIN);
        } else if scored == conceded {
            next.draws = next.draws.saturating_add(1);
            next.points = next.points.saturating_add(POINTS_FOR_DRAW);
        } else {
            next.losses = next.losses.saturating_add(1);
        }

        next
    }

    /// `points == 3·wins + draws` and `matches_played == wins + draws + losses`.
    /// Tallies too large to add up are never consistent.
    pub fn is_consistent(&self) -> bool {
        let expected_points = POINTS_FOR_WIN
            .checked_mul(self.wins)
            .zip(POINTS_FOR_DRAW.checked_mul(self.draws))
            .and_then(|(won, drawn)| won.checked_add(drawn));
        let expected_matches = self
            .wins
            .checked_add(self.draws)
            .and_then(|played| played.checked_add(self.losses));

        expected_points == Some(self.points) && expected_matches == Some(self.matches_played)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub home_score: u32,
    pub away_score: u32,
}

/// A scheduled match. It counts as played exactly when a result is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchFixture {
    pub home_team: String,
    pub away_team: String,
    pub matchday: u32,
    pub result: Option<MatchResult>,
}

impl MatchFixture {
    pub fn unplayed(home_team: impl Into<String>, away_team: impl Into<String>, matchday: u32) -> Self {
        Self {
            home_team: home_team.into(),
            away_team: away_team.into(),
            matchday,
            result: None,
        }
    }

    pub fn played(
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        matchday: u32,
        home_score: u32,
        away_score: u32,
    ) -> Self {
        Self {
            home_team: home_team.into(),
            away_team: away_team.into(),
            matchday,
            result: Some(MatchResult { home_score, away_score }),
        }
    }

    pub fn is_played(&self) -> bool {
        self.result.is_some()
    }

    /// Short label used in logs and error messages
    pub fn label(&self) -> String {
        format!("{} vs {} (matchday {})", self.home_team, self.away_team, self.matchday)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_result_win_draw_loss() {
        let team = TeamRecord::new("Inter");

        let won = team.with_result(3, 1);
        assert_eq!(won.points, 3);
        assert_eq!(won.wins, 1);
        assert_eq!(won.goal_difference(), 2);

        let drawn = won.with_result(0, 0);
        assert_eq!(drawn.points, 4);
        assert_eq!(drawn.draws, 1);

        let lost = drawn.with_result(1, 4);
        assert_eq!(lost.points, 4);
        assert_eq!(lost.losses, 1);
        assert_eq!(lost.matches_played, 3);
        assert_eq!(lost.goal_difference(), -1);
        assert!(lost.is_consistent());

        // Original record is never touched
        assert_eq!(team.matches_played, 0);
        assert_eq!(team.points, 0);
    }

    #[test]
    fn test_inconsistent_record_detected() {
        let mut team = TeamRecord::new("Benfica");
        team.wins = 2;
        team.matches_played = 2;
        team.points = 5;
        assert!(!team.is_consistent());
    }

    #[test]
    fn test_oversized_tally_is_inconsistent() {
        let mut team = TeamRecord::new("Galatasaray");
        team.wins = 2_000_000_000;
        team.matches_played = 2_000_000_000;
        team.points = u32::MAX;
        assert!(!team.is_consistent());

        team.wins = u32::MAX;
        team.draws = 1;
        assert!(!team.is_consistent());
    }

    #[test]
    fn test_with_result_saturates_at_limit() {
        let mut team = TeamRecord::new("Feyenoord");
        team.goals_for = u32::MAX - 1;
        team.points = u32::MAX;

        let next = team.with_result(5, 0);
        assert_eq!(next.goals_for, u32::MAX);
        assert_eq!(next.points, u32::MAX);
        assert_eq!(next.wins, 1);
    }

    #[test]
    fn test_fixture_played_flag_follows_result() {
        let mut fixture = MatchFixture::unplayed("Ajax", "Celtic", 4);
        assert!(!fixture.is_played());

        fixture.result = Some(MatchResult { home_score: 2, away_score: 2 });
        assert!(fixture.is_played());
        assert_eq!(fixture.label(), "Ajax vs Celtic (matchday 4)");
    }
}
