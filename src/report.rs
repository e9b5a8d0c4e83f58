// Text rendering of projections and tables for the command line

use crate::simulation::AggregateStatistics;
use crate::types::TeamRecord;
use std::fmt::Write;

/// Qualification probability bands used in summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum QualificationTier {
    Certain,        // > 95%
    VeryLikely,     // > 75%
    Likely,         // > 50%
    Possible,       // > 25%
    Unlikely,       // > 5%
    VeryUnlikely,
}

impl QualificationTier {
    pub const ALL: [QualificationTier; 6] = [
        QualificationTier::Certain,
        QualificationTier::VeryLikely,
        QualificationTier::Likely,
        QualificationTier::Possible,
        QualificationTier::Unlikely,
        QualificationTier::VeryUnlikely,
    ];

    pub fn from_probability(probability: f64) -> Self {
        if probability > 95.0 {
            QualificationTier::Certain
        } else if probability > 75.0 {
            QualificationTier::VeryLikely
        } else if probability > 50.0 {
            QualificationTier::Likely
        } else if probability > 25.0 {
            QualificationTier::Possible
        } else if probability > 5.0 {
            QualificationTier::Unlikely
        } else {
            QualificationTier::VeryUnlikely
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QualificationTier::Certain => "🟢 CERTAIN (>95%)",
            QualificationTier::VeryLikely => "🔵 VERY LIKELY (75-95%)",
            QualificationTier::Likely => "🟡 LIKELY (50-75%)",
            QualificationTier::Possible => "🟠 POSSIBLE (25-50%)",
            QualificationTier::Unlikely => "🔴 UNLIKELY (5-25%)",
            QualificationTier::VeryUnlikely => "⚫ VERY UNLIKELY (<5%)",
        }
    }
}

/// Teams grouped by tier, best tier first, highest probability first
pub fn qualification_tiers(stats: &AggregateStatistics) -> Vec<(QualificationTier, Vec<(&str, f64)>)> {
    let ranked = stats.by_qualification();
    QualificationTier::ALL
        .iter()
        .map(|&tier| {
            let teams: Vec<(&str, f64)> = ranked
                .iter()
                .filter(|t| QualificationTier::from_probability(t.qualification_probability) == tier)
                .map(|t| (t.name.as_str(), t.qualification_probability))
                .collect();
            (tier, teams)
        })
        .filter(|(_, teams)| !teams.is_empty())
        .collect()
}

pub fn render_standings(competition: &str, matchday: u32, table: &[&TeamRecord]) -> String {
    let mut out = String::new();
    let rule = "=".repeat(90);
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "{} - STANDINGS (After Matchday {})", competition.to_uppercase(), matchday);
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(
        out,
        "{:<4} {:<30} {:<4} {:<4} {:<4} {:<4} {:<4} {:<4} {:<5} {:<4}",
        "Pos", "Team", "MP", "W", "D", "L", "GF", "GA", "GD", "Pts"
    );
    let _ = writeln!(out, "{}", "-".repeat(90));

    for (i, team) in table.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<4} {:<30} {:<4} {:<4} {:<4} {:<4} {:<4} {:<4} {:>+5} {:<4}",
            i + 1,
            team.name,
            team.matches_played,
            team.wins,
            team.draws,
            team.losses,
            team.goals_for,
            team.goals_against,
            team.goal_difference(),
            team.points
        );
    }

    let _ = writeln!(out, "{}", rule);
    out
}

pub fn render_projection(stats: &AggregateStatistics) -> String {
    let mut out = String::new();
    let rule = "=".repeat(80);

    let _ = writeln!(out, "{}", rule);
    if stats.cancelled {
        let _ = writeln!(
            out,
            "MONTE CARLO SIMULATION RESULTS ({} of {} simulations, stopped early)",
            stats.completed_runs, stats.requested_runs
        );
    } else {
        let _ = writeln!(out, "MONTE CARLO SIMULATION RESULTS ({} simulations)", stats.completed_runs);
    }
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "\n{:<30} {:<8} {:<10} Points Range", "Team", "Qual%", "Avg Pts");
    let _ = writeln!(out, "{}", "-".repeat(80));

    for team in stats.by_qualification() {
        let range = match team.points_range() {
            Some((min, max)) => format!("{:>5} - {:<5}", min, max),
            None => "    -".to_string(),
        };
        let _ = writeln!(
            out,
            "{:<30} {:>6.1}% {:>8.1} {}",
            team.name, team.qualification_probability, team.average_points, range
        );
    }

    let _ = writeln!(out, "\n{}", rule);
    let _ = writeln!(out, "Top {} teams qualify", stats.qualification_cutoff);
    let _ = writeln!(out, "{}", rule);
    out
}

/// Position likelihood table for the `teams` most likely qualifiers
pub fn render_position_table(stats: &AggregateStatistics, teams: usize, positions: usize) -> String {
    let mut out = String::new();
    let positions = positions.min(stats.teams.len());

    let _ = writeln!(out, "POSITION PROBABILITY (Top {} Teams):\n", teams);
    let _ = write!(out, "{:<25}", "Team");
    for pos in 1..=positions {
        let _ = write!(out, " {:>6}", pos);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "-".repeat(25 + 7 * positions));

    for team in stats.by_qualification().into_iter().take(teams) {
        let _ = write!(out, "{:<25}", team.name);
        for pos in 1..=positions {
            let _ = write!(out, " {:>5.1}%", team.position_probability(pos));
        }
        let _ = writeln!(out);
    }

    out
}

pub fn render_tiers(stats: &AggregateStatistics) -> String {
    let mut out = String::new();
    let rule = "=".repeat(60);

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "QUALIFICATION PROBABILITY TIERS");
    let _ = writeln!(out, "{}", rule);

    for (tier, teams) in qualification_tiers(stats) {
        let _ = writeln!(out, "\n{}", tier.label());
        for (name, probability) in teams {
            let _ = writeln!(out, "  {:<30} {:>6.1}%", name, probability);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::TeamProjection;

    fn projection(name: &str, qualification_probability: f64) -> TeamProjection {
        TeamProjection {
            name: name.to_string(),
            starting_points: 0,
            position_counts: vec![1, 1, 0],
            qualification_count: 1,
            points_sum: 6,
            min_points: Some(1),
            max_points: Some(5),
            qualification_probability,
            average_points: 3.0,
        }
    }

    fn stats() -> AggregateStatistics {
        AggregateStatistics {
            requested_runs: 2,
            completed_runs: 2,
            cancelled: false,
            qualification_cutoff: 1,
            seed: 1,
            teams: vec![projection("Slavia", 3.0), projection("Napoli", 97.0), projection("Brugge", 60.0)],
        }
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(QualificationTier::from_probability(100.0), QualificationTier::Certain);
        assert_eq!(QualificationTier::from_probability(95.0), QualificationTier::VeryLikely);
        assert_eq!(QualificationTier::from_probability(50.0), QualificationTier::Possible);
        assert_eq!(QualificationTier::from_probability(5.0), QualificationTier::VeryUnlikely);
        assert_eq!(QualificationTier::from_probability(0.0), QualificationTier::VeryUnlikely);
    }

    #[test]
    fn test_tiers_skip_empty_bands() {
        let stats = stats();
        let tiers = qualification_tiers(&stats);

        assert_eq!(tiers.len(), 3);
        assert_eq!(tiers[0].0, QualificationTier::Certain);
        assert_eq!(tiers[0].1, vec![("Napoli", 97.0)]);
        assert_eq!(tiers[2].0, QualificationTier::VeryUnlikely);
    }

    #[test]
    fn test_projection_table_orders_by_probability() {
        let text = render_projection(&stats());
        let napoli = text.find("Napoli").unwrap();
        let slavia = text.find("Slavia").unwrap();
        assert!(napoli < slavia);
        assert!(text.contains("Top 1 teams qualify"));
    }

    #[test]
    fn test_position_table_columns_capped_by_team_count() {
        let text = render_position_table(&stats(), 2, 8);
        assert!(text.contains("Napoli"));
        assert!(!text.contains("Slavia"));
        assert!(text.contains("50.0%"));
    }
}
