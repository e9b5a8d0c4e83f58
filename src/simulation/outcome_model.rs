// Strength-based score model
// Expected goals follow current points; goals are a truncated normal draw

use super::SimulationError;
use crate::types::TeamRecord;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

#[derive(Debug, Clone, PartialEq)]
pub struct ModelParams {
    pub home_advantage: f64,       // Strength bonus for the home side, in points
    pub goal_scale: f64,           // Strength divided by this gives expected goals
    pub min_expected_goals: f64,   // Floor for expected goals
    pub score_variance: f64,       // Standard deviation of a team's goal draw
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            home_advantage: 10.0,
            goal_scale: 10.0,
            min_expected_goals: 0.5,
            score_variance: 1.5,
        }
    }
}

impl ModelParams {
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.home_advantage.is_finite() || self.home_advantage < 0.0 {
            return Err(SimulationError::Config(
                "home_advantage must be a non-negative number".to_string(),
            ));
        }

        if !self.score_variance.is_finite() || self.score_variance < 0.0 {
            return Err(SimulationError::Config(
                "score_variance must be a non-negative number".to_string(),
            ));
        }

        if !self.goal_scale.is_finite() || self.goal_scale <= 0.0 {
            return Err(SimulationError::Config("goal_scale must be positive".to_string()));
        }

        if !self.min_expected_goals.is_finite() || self.min_expected_goals < 0.0 {
            return Err(SimulationError::Config(
                "min_expected_goals must be a non-negative number".to_string(),
            ));
        }

        Ok(())
    }

    pub fn expected_goals(&self, strength: f64) -> f64 {
        (strength / self.goal_scale).max(self.min_expected_goals)
    }

    /// Expected goals for (home, away)
    pub fn expected_score(&self, home: &TeamRecord, away: &TeamRecord) -> (f64, f64) {
        let home_strength = home.points as f64 + self.home_advantage;
        let away_strength = away.points as f64;
        (self.expected_goals(home_strength), self.expected_goals(away_strength))
    }
}

/// One simulated final score for `home` against `away`.
///
/// Each side's goals are drawn independently and truncated toward zero,
/// which biases scores slightly below the expected value.
pub fn simulate_match<R: Rng + ?Sized>(
    home: &TeamRecord,
    away: &TeamRecord,
    model: &ModelParams,
    rng: &mut R,
) -> (u32, u32) {
    let (home_expected, away_expected) = model.expected_score(home, away);
    let home_score = draw_goals(home_expected, model.score_variance, rng);
    let away_score = draw_goals(away_expected, model.score_variance, rng);
    (home_score, away_score)
}

fn draw_goals<R: Rng + ?Sized>(mean: f64, std_dev: f64, rng: &mut R) -> u32 {
    let z: f64 = StandardNormal.sample(rng);
    let goals = (mean + std_dev * z).max(0.0);
    goals.trunc() as u32
}
