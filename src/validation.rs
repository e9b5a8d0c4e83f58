//! Pre-flight validation for competition snapshots
//!
//! Checks referential integrity and tally consistency before a projection
//! runs, so bad input is reported as a list of findings instead of failing
//! halfway through a session.

use crate::snapshot::Snapshot;
use crate::types::TeamRecord;
use std::collections::{HashMap, HashSet};
use tracing::{error, info, warn};

/// Validation result with detailed findings
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub passed: bool,
    pub checks: Vec<ValidationCheck>,
}

#[derive(Debug, Clone)]
pub struct ValidationCheck {
    pub name: String,
    pub passed: bool,
    pub message: String,
    pub level: ValidationLevel,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationLevel {
    Critical,  // Must pass before simulating
    Warning,   // Suspicious, simulation can still run
    Info,      // Informational only
}

impl ValidationCheck {
    fn pass(name: &str, message: String) -> Self {
        Self { name: name.to_string(), passed: true, message, level: ValidationLevel::Info }
    }

    fn fail(name: &str, message: String, level: ValidationLevel) -> Self {
        Self { name: name.to_string(), passed: false, message, level }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationResult {
    pub fn new() -> Self {
        ValidationResult {
            passed: true,
            checks: Vec::new(),
        }
    }

    pub fn add_check(&mut self, check: ValidationCheck) {
        if !check.passed && check.level == ValidationLevel::Critical {
            self.passed = false;
        }
        self.checks.push(check);
    }

    pub fn critical_failures(&self) -> Vec<&ValidationCheck> {
        self.checks
            .iter()
            .filter(|c| !c.passed && c.level == ValidationLevel::Critical)
            .collect()
    }

    pub fn warnings(&self) -> Vec<&ValidationCheck> {
        self.checks
            .iter()
            .filter(|c| !c.passed && c.level == ValidationLevel::Warning)
            .collect()
    }

    pub fn display(&self) {
        info!("🔍 Snapshot Validation");
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

        for check in &self.checks {
            let icon = if check.passed {
                "✅"
            } else {
                match check.level {
                    ValidationLevel::Critical => "❌",
                    ValidationLevel::Warning => "⚠️",
                    ValidationLevel::Info => "ℹ️",
                }
            };

            info!("{} {} - {}", icon, check.name, check.message);
        }

        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

        if !self.passed {
            let failures = self.critical_failures();
            error!("❌ Validation failed: {} critical issue(s)", failures.len());
            for failure in failures {
                error!("   • {}: {}", failure.name, failure.message);
            }
        } else {
            let warnings = self.warnings();
            if !warnings.is_empty() {
                warn!("⚠️  {} warning(s) detected", warnings.len());
                for warning in warnings {
                    warn!("   • {}: {}", warning.name, warning.message);
                }
            }
            info!("✅ All critical checks passed");
        }
    }
}

/// Pre-flight validator for a snapshot and a qualification cutoff
pub struct SnapshotValidator<'a> {
    snapshot: &'a Snapshot,
    qualification_cutoff: usize,
}

impl<'a> SnapshotValidator<'a> {
    pub fn new(snapshot: &'a Snapshot, qualification_cutoff: usize) -> Self {
        Self { snapshot, qualification_cutoff }
    }

    /// Run full validation suite
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.add_check(self.check_team_count());
        result.add_check(self.check_unique_names());
        result.add_check(self.check_tallies());
        result.add_check(self.check_fixture_references());
        result.add_check(self.check_self_fixtures());
        result.add_check(self.check_remaining_fixtures());
        result.add_check(self.check_cutoff());
        result.add_check(self.check_goal_balance());
        if let Some(check) = self.check_recorded_results() {
            result.add_check(check);
        }

        result
    }

    // Individual check methods

    fn check_team_count(&self) -> ValidationCheck {
        match self.snapshot.teams.len() {
            0 => ValidationCheck::fail("Teams", "Snapshot has no teams".to_string(), ValidationLevel::Critical),
            1 => ValidationCheck::fail(
                "Teams",
                "Only one team, every projection is trivial".to_string(),
                ValidationLevel::Warning,
            ),
            n => ValidationCheck::pass("Teams", format!("{} teams", n)),
        }
    }

    fn check_unique_names(&self) -> ValidationCheck {
        let mut seen = HashSet::new();
        let duplicates: Vec<&str> = self
            .snapshot
            .teams
            .iter()
            .filter(|team| !seen.insert(team.name.as_str()))
            .map(|team| team.name.as_str())
            .collect();

        if duplicates.is_empty() {
            ValidationCheck::pass("Unique Names", "All team keys are unique".to_string())
        } else {
            ValidationCheck::fail(
                "Unique Names",
                format!("Duplicate team keys: {}", duplicates.join(", ")),
                ValidationLevel::Critical,
            )
        }
    }

    fn check_tallies(&self) -> ValidationCheck {
        let broken: Vec<&str> = self
            .snapshot
            .teams
            .iter()
            .filter(|team| !team.is_consistent())
            .map(|team| team.name.as_str())
            .collect();

        if broken.is_empty() {
            ValidationCheck::pass("Team Tallies", "Points and match counts agree".to_string())
        } else {
            ValidationCheck::fail(
                "Team Tallies",
                format!("Points or match counts do not add up for: {}", broken.join(", ")),
                ValidationLevel::Critical,
            )
        }
    }

    fn check_fixture_references(&self) -> ValidationCheck {
        let index = self.snapshot.team_index();
        let mut missing: Vec<String> = Vec::new();

        for fixture in &self.snapshot.fixtures {
            for key in [&fixture.home_team, &fixture.away_team] {
                if !index.contains_key(key.as_str()) {
                    missing.push(format!("'{}' in {}", key, fixture.label()));
                }
            }
        }

        if missing.is_empty() {
            ValidationCheck::pass(
                "Fixture References",
                format!("{} fixtures reference known teams", self.snapshot.fixtures.len()),
            )
        } else {
            ValidationCheck::fail(
                "Fixture References",
                format!("Unknown teams: {}", missing.join("; ")),
                ValidationLevel::Critical,
            )
        }
    }

    fn check_self_fixtures(&self) -> ValidationCheck {
        let invalid: Vec<String> = self
            .snapshot
            .fixtures
            .iter()
            .filter(|f| f.home_team == f.away_team)
            .map(|f| f.label())
            .collect();

        if invalid.is_empty() {
            ValidationCheck::pass("Fixture Sides", "No team plays itself".to_string())
        } else {
            ValidationCheck::fail(
                "Fixture Sides",
                format!("Same team on both sides: {}", invalid.join("; ")),
                ValidationLevel::Critical,
            )
        }
    }

    fn check_remaining_fixtures(&self) -> ValidationCheck {
        let remaining = self.snapshot.remaining_fixture_count();
        if remaining == 0 {
            ValidationCheck::fail(
                "Remaining Fixtures",
                "All fixtures are played, every run returns the current table".to_string(),
                ValidationLevel::Warning,
            )
        } else {
            ValidationCheck::pass(
                "Remaining Fixtures",
                format!("{} of {} fixtures to simulate", remaining, self.snapshot.fixtures.len()),
            )
        }
    }

    fn check_cutoff(&self) -> ValidationCheck {
        let teams = self.snapshot.teams.len();
        if self.qualification_cutoff == 0 {
            ValidationCheck::fail(
                "Qualification Cutoff",
                "Cutoff must be at least 1".to_string(),
                ValidationLevel::Critical,
            )
        } else if self.qualification_cutoff >= teams {
            ValidationCheck::fail(
                "Qualification Cutoff",
                format!(
                    "Top {} of {} teams qualify, every team qualifies in every run",
                    self.qualification_cutoff, teams
                ),
                ValidationLevel::Warning,
            )
        } else {
            ValidationCheck::pass(
                "Qualification Cutoff",
                format!("Top {} of {} teams qualify", self.qualification_cutoff, teams),
            )
        }
    }

    fn check_goal_balance(&self) -> ValidationCheck {
        let scored: u64 = self.snapshot.teams.iter().map(|t| t.goals_for as u64).sum();
        let conceded: u64 = self.snapshot.teams.iter().map(|t| t.goals_against as u64).sum();

        if scored == conceded {
            ValidationCheck::pass("Goal Balance", format!("{} goals scored and conceded", scored))
        } else {
            ValidationCheck::fail(
                "Goal Balance",
                format!("Goals scored ({}) differ from goals conceded ({})", scored, conceded),
                ValidationLevel::Warning,
            )
        }
    }

    /// Compares tallies with the played fixtures in the list. Skipped when
    /// no fixture has a result, since tallies may come from elsewhere.
    fn check_recorded_results(&self) -> Option<ValidationCheck> {
        if !self.snapshot.fixtures.iter().any(|f| f.is_played()) {
            return None;
        }

        let mut rebuilt: HashMap<&str, TeamRecord> = self
            .snapshot
            .teams
            .iter()
            .map(|team| (team.name.as_str(), TeamRecord::new(team.name.clone())))
            .collect();

        for fixture in &self.snapshot.fixtures {
            let Some(result) = fixture.result else { continue };
            if let Some(home) = rebuilt.get_mut(fixture.home_team.as_str()) {
                *home = home.with_result(result.home_score, result.away_score);
            }
            if let Some(away) = rebuilt.get_mut(fixture.away_team.as_str()) {
                *away = away.with_result(result.away_score, result.home_score);
            }
        }

        let mismatched: Vec<&str> = self
            .snapshot
            .teams
            .iter()
            .filter(|team| {
                rebuilt.get(team.name.as_str()).map_or(false, |r| {
                    r.points != team.points
                        || r.matches_played != team.matches_played
                        || r.goals_for != team.goals_for
                        || r.goals_against != team.goals_against
                })
            })
            .map(|team| team.name.as_str())
            .collect();

        Some(if mismatched.is_empty() {
            ValidationCheck::pass("Recorded Results", "Tallies match played fixtures".to_string())
        } else {
            ValidationCheck::fail(
                "Recorded Results",
                format!("Tallies differ from played fixtures for: {}", mismatched.join(", ")),
                ValidationLevel::Warning,
            )
        })
    }
}
