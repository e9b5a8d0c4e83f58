// Single-run engine
// Plays out every remaining fixture once on a private copy of the snapshot

use super::outcome_model::{simulate_match, ModelParams};
use super::{SimulationConfig, SimulationError, SimulationResult};
use crate::snapshot::Snapshot;
use crate::standings;
use crate::types::{MatchFixture, MatchResult, TeamRecord};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Final state of one simulated season
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub records: Vec<TeamRecord>,            // Same order as the snapshot's teams
    pub ranking: Vec<usize>,                 // Indices into `records`, champion first
    pub results: Vec<Option<MatchResult>>,   // Same order as the snapshot's fixtures
    pub simulated_fixtures: usize,
}

impl RunOutcome {
    pub fn ranked_keys(&self) -> Vec<&str> {
        self.ranking
            .iter()
            .map(|&index| self.records[index].name.as_str())
            .collect()
    }

    /// 1-based position of the team at `index`
    pub fn position_of(&self, index: usize) -> Option<usize> {
        self.ranking.iter().position(|&i| i == index).map(|rank| rank + 1)
    }
}

#[derive(Debug, Clone, Copy)]
struct ScheduledFixture {
    fixture: usize,
    home: usize,
    away: usize,
}

/// Snapshot with its remaining fixtures resolved to team indices.
///
/// Referential integrity is checked once here, so individual runs cannot
/// fail and never see a fabricated team.
pub struct RunEngine<'a> {
    snapshot: &'a Snapshot,
    model: ModelParams,
    schedule: Vec<ScheduledFixture>,
}

impl<'a> RunEngine<'a> {
    pub fn new(snapshot: &'a Snapshot, config: &SimulationConfig) -> SimulationResult<Self> {
        let mut seen = HashSet::with_capacity(snapshot.teams.len());
        for team in &snapshot.teams {
            if !seen.insert(team.name.as_str()) {
                return Err(SimulationError::DuplicateTeam(team.name.clone()));
            }
        }

        let index = snapshot.team_index();
        let mut schedule = Vec::new();
        for (i, fixture) in snapshot.fixtures.iter().enumerate() {
            let home = resolve_team(&index, fixture, &fixture.home_team)?;
            let away = resolve_team(&index, fixture, &fixture.away_team)?;

            if home == away {
                return Err(SimulationError::InvalidFixture(fixture.label()));
            }

            let in_horizon = config
                .through_matchday
                .map_or(true, |last| fixture.matchday <= last);

            if !fixture.is_played() && in_horizon {
                schedule.push(ScheduledFixture { fixture: i, home, away });
            }
        }

        debug!(
            "🗓️  Prepared run engine: {} teams, {} of {} fixtures to simulate",
            snapshot.teams.len(),
            schedule.len(),
            snapshot.fixtures.len()
        );

        Ok(Self {
            snapshot,
            model: config.model.clone(),
            schedule,
        })
    }

    pub fn fixtures_to_simulate(&self) -> usize {
        self.schedule.len()
    }

    pub fn team_count(&self) -> usize {
        self.snapshot.teams.len()
    }

    pub fn snapshot(&self) -> &Snapshot {
        self.snapshot
    }

    /// Simulate the remaining fixtures once, in snapshot order.
    ///
    /// Later fixtures see the points earned in earlier simulated fixtures
    /// of the same run.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> RunOutcome {
        let mut records = self.snapshot.teams.clone();
        let mut results: Vec<Option<MatchResult>> =
            self.snapshot.fixtures.iter().map(|f| f.result).collect();

        for scheduled in &self.schedule {
            let (home_score, away_score) = simulate_match(
                &records[scheduled.home],
                &records[scheduled.away],
                &self.model,
                rng,
            );

            results[scheduled.fixture] = Some(MatchResult { home_score, away_score });

            let home_next = records[scheduled.home].with_result(home_score, away_score);
            let away_next = records[scheduled.away].with_result(away_score, home_score);
            records[scheduled.home] = home_next;
            records[scheduled.away] = away_next;
        }

        let ranking = standings::resolve(&records);

        RunOutcome {
            records,
            ranking,
            results,
            simulated_fixtures: self.schedule.len(),
        }
    }
}

fn resolve_team(
    index: &HashMap<&str, usize>,
    fixture: &MatchFixture,
    key: &str,
) -> SimulationResult<usize> {
    index.get(key).copied().ok_or_else(|| SimulationError::Reference {
        fixture: fixture.label(),
        team: key.to_string(),
    })
}

/// Random stream for run `run_index` of a session.
///
/// Every run shares the session key and gets its own ChaCha stream, so
/// sequences never overlap and do not depend on which worker runs them.
pub fn run_rng(session_seed: u64, run_index: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(session_seed);
    rng.set_stream(run_index);
    rng
}

/// Simulate the remaining fixtures of `snapshot` once.
pub fn run_once<R: Rng + ?Sized>(
    snapshot: &Snapshot,
    config: &SimulationConfig,
    rng: &mut R,
) -> SimulationResult<RunOutcome> {
    let engine = RunEngine::new(snapshot, config)?;
    Ok(engine.run(rng))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_league() -> Snapshot {
        let mut leader = TeamRecord::new("Leader");
        leader.matches_played = 1;
        leader.wins = 1;
        leader.goals_for = 2;
        leader.points = 3;

        let mut trailer = TeamRecord::new("Trailer");
        trailer.matches_played = 1;
        trailer.losses = 1;
        trailer.goals_against = 2;

        Snapshot::new(
            vec![leader, trailer, TeamRecord::new("Idle")],
            vec![
                MatchFixture::played("Leader", "Trailer", 1, 2, 0),
                MatchFixture::unplayed("Trailer", "Leader", 2),
                MatchFixture::unplayed("Leader", "Trailer", 3),
            ],
        )
    }

    #[test]
    fn test_run_plays_only_unplayed_fixtures() {
        let snapshot = small_league();
        let config = SimulationConfig::default();
        let mut rng = run_rng(1, 0);

        let outcome = run_once(&snapshot, &config, &mut rng).unwrap();

        assert_eq!(outcome.simulated_fixtures, 2);
        assert_eq!(outcome.records[0].matches_played, 3);
        assert_eq!(outcome.records[1].matches_played, 3);
        assert_eq!(outcome.records[2], snapshot.teams[2]);
        assert!(outcome.records.iter().all(TeamRecord::is_consistent));
        assert_eq!(outcome.ranking.len(), 3);
    }

    #[test]
    fn test_results_filled_for_simulated_fixtures_only() {
        let snapshot = small_league();
        let outcome = run_once(&snapshot, &SimulationConfig::default(), &mut run_rng(4, 2)).unwrap();

        assert_eq!(outcome.results.len(), 3);
        assert_eq!(outcome.results[0], snapshot.fixtures[0].result);
        assert!(outcome.results[1].is_some());
        assert!(outcome.results[2].is_some());
        assert!(snapshot.fixtures[1].result.is_none());
    }

    #[test]
    fn test_later_fixtures_see_earlier_results() {
        // A 5W 2D on 17 points. First leg at home: 27 -> 2.7 xG -> 2-0.
        // Return leg away on 20 points: 2.0 xG -> 2-1 win. Stale 17 points
        // would give 1.7 xG and a 1-1 draw.
        let mut a = TeamRecord::new("A");
        a.matches_played = 7;
        a.wins = 5;
        a.draws = 2;
        a.points = 17;

        let snapshot = Snapshot::new(
            vec![a, TeamRecord::new("B")],
            vec![
                MatchFixture::unplayed("A", "B", 1),
                MatchFixture::unplayed("B", "A", 2),
            ],
        );
        let config = SimulationConfig {
            model: ModelParams {
                score_variance: 0.0,
                ..ModelParams::default()
            },
            ..SimulationConfig::default()
        };

        let outcome = run_once(&snapshot, &config, &mut run_rng(1, 0)).unwrap();

        assert_eq!(outcome.results[0], Some(MatchResult { home_score: 2, away_score: 0 }));
        assert_eq!(outcome.results[1], Some(MatchResult { home_score: 1, away_score: 2 }));
        assert_eq!(outcome.records[0].wins, 7);
        assert_eq!(outcome.records[0].points, 23);
        assert_eq!(outcome.records[1].losses, 2);
    }

    #[test]
    fn test_snapshot_left_untouched() {
        let snapshot = small_league();
        let before = snapshot.clone();
        let engine = RunEngine::new(&snapshot, &SimulationConfig::default()).unwrap();

        for run in 0..25 {
            engine.run(&mut run_rng(5, run));
        }

        assert_eq!(snapshot, before);
    }

    #[test]
    fn test_unknown_team_is_reference_error() {
        let mut snapshot = small_league();
        snapshot.fixtures.push(MatchFixture::unplayed("Leader", "Ghost", 4));

        let err = RunEngine::new(&snapshot, &SimulationConfig::default()).err().unwrap();
        assert_eq!(
            err,
            SimulationError::Reference {
                fixture: "Leader vs Ghost (matchday 4)".to_string(),
                team: "Ghost".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_team_rejected() {
        let mut snapshot = small_league();
        snapshot.teams.push(TeamRecord::new("Idle"));

        let err = RunEngine::new(&snapshot, &SimulationConfig::default()).err().unwrap();
        assert_eq!(err, SimulationError::DuplicateTeam("Idle".to_string()));
    }

    #[test]
    fn test_through_matchday_limits_schedule() {
        let snapshot = small_league();
        let config = SimulationConfig {
            through_matchday: Some(2),
            ..SimulationConfig::default()
        };

        let engine = RunEngine::new(&snapshot, &config).unwrap();
        assert_eq!(engine.fixtures_to_simulate(), 1);

        let outcome = engine.run(&mut run_rng(3, 0));
        assert_eq!(outcome.records[0].matches_played, 2);
    }

    #[test]
    fn test_run_streams_differ_by_index() {
        let mut first = run_rng(42, 0);
        let mut second = run_rng(42, 1);
        let a: Vec<u64> = (0..8).map(|_| first.gen()).collect();
        let b: Vec<u64> = (0..8).map(|_| second.gen()).collect();
        assert_ne!(a, b);

        let mut replay = run_rng(42, 0);
        let c: Vec<u64> = (0..8).map(|_| replay.gen()).collect();
        assert_eq!(a, c);
    }

    #[test]
    fn test_position_of_matches_ranking() {
        let snapshot = small_league();
        let outcome = run_once(&snapshot, &SimulationConfig::default(), &mut run_rng(9, 3)).unwrap();

        for (rank, &index) in outcome.ranking.iter().enumerate() {
            assert_eq!(outcome.position_of(index), Some(rank + 1));
        }
        assert_eq!(outcome.ranked_keys().len(), 3);
    }
}
