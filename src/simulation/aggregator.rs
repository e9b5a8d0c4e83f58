// Monte Carlo aggregation
// Drives many independent runs in parallel and reduces their final tables
// into position histograms, qualification counts and points statistics

use super::run_engine::{run_rng, RunEngine, RunOutcome};
use super::{SimulationConfig, SimulationError, SimulationResult};
use crate::snapshot::Snapshot;
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Called with (runs_completed, run_count) after each batch of runs
pub type ProgressCallback = Box<dyn Fn(usize, usize) + Send + Sync>;

/// Cooperative stop signal shared between the caller and a running session.
///
/// Checked between batches, so a stopped session holds exactly runs
/// `0..completed_runs` and replays with the same seed and run count.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, AtomicOrdering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(AtomicOrdering::SeqCst)
    }
}

/// Running counters for one team
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamTally {
    pub position_counts: Vec<u64>,   // Index 0 is first place
    pub qualification_count: u64,
    pub points_sum: u64,
    pub min_points: Option<u32>,
    pub max_points: Option<u32>,
}

impl TeamTally {
    fn new(team_count: usize) -> Self {
        Self {
            position_counts: vec![0; team_count],
            qualification_count: 0,
            points_sum: 0,
            min_points: None,
            max_points: None,
        }
    }

    fn record(&mut self, position: usize, points: u32, qualified: bool) {
        self.position_counts[position - 1] += 1;
        if qualified {
            self.qualification_count += 1;
        }
        self.points_sum += points as u64;
        self.min_points = Some(self.min_points.map_or(points, |min| min.min(points)));
        self.max_points = Some(self.max_points.map_or(points, |max| max.max(points)));
    }

    fn merge(&mut self, other: &TeamTally) {
        for (count, extra) in self.position_counts.iter_mut().zip(&other.position_counts) {
            *count += extra;
        }
        self.qualification_count += other.qualification_count;
        self.points_sum += other.points_sum;
        self.min_points = combine(self.min_points, other.min_points, u32::min);
        self.max_points = combine(self.max_points, other.max_points, u32::max);
    }
}

fn combine(a: Option<u32>, b: Option<u32>, pick: fn(u32, u32) -> u32) -> Option<u32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(pick(a, b)),
        (a, None) => a,
        (None, b) => b,
    }
}

/// Mergeable accumulator over a subset of runs.
///
/// Counts and sums add and extremes take min/max, so tallies built over
/// disjoint sets of runs merge to the same result in any order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonTally {
    teams: Vec<TeamTally>,
    runs: usize,
}

impl SeasonTally {
    pub fn new(team_count: usize) -> Self {
        Self {
            teams: (0..team_count).map(|_| TeamTally::new(team_count)).collect(),
            runs: 0,
        }
    }

    pub fn runs(&self) -> usize {
        self.runs
    }

    pub fn team(&self, index: usize) -> Option<&TeamTally> {
        self.teams.get(index)
    }

    /// Fold one finished run into the tally
    pub fn record(&mut self, outcome: &RunOutcome, qualification_cutoff: usize) {
        for (rank, &index) in outcome.ranking.iter().enumerate() {
            let position = rank + 1;
            let points = outcome.records[index].points;
            self.teams[index].record(position, points, position <= qualification_cutoff);
        }
        self.runs += 1;
    }

    pub fn merge(mut self, other: SeasonTally) -> SeasonTally {
        debug_assert_eq!(self.teams.len(), other.teams.len());
        for (team, extra) in self.teams.iter_mut().zip(&other.teams) {
            team.merge(extra);
        }
        self.runs += other.runs;
        self
    }

    /// Convert counters into per-team probabilities and averages.
    ///
    /// `completed_runs` is the denominator. With no completed runs every
    /// probability is zero and no points range is reported.
    pub fn finalize(
        self,
        snapshot: &Snapshot,
        requested_runs: usize,
        qualification_cutoff: usize,
        seed: u64,
    ) -> AggregateStatistics {
        let completed_runs = self.runs;
        let denominator = completed_runs as f64;

        let teams = self
            .teams
            .into_iter()
            .zip(&snapshot.teams)
            .map(|(tally, record)| {
                let (qualification_probability, average_points) = if completed_runs == 0 {
                    (0.0, 0.0)
                } else {
                    (
                        tally.qualification_count as f64 / denominator * 100.0,
                        tally.points_sum as f64 / denominator,
                    )
                };

                TeamProjection {
                    name: record.name.clone(),
                    starting_points: record.points,
                    position_counts: tally.position_counts,
                    qualification_count: tally.qualification_count,
                    points_sum: tally.points_sum,
                    min_points: tally.min_points,
                    max_points: tally.max_points,
                    qualification_probability,
                    average_points,
                }
            })
            .collect();

        AggregateStatistics {
            requested_runs,
            completed_runs,
            cancelled: completed_runs < requested_runs,
            qualification_cutoff,
            seed,
            teams,
        }
    }
}

/// Projection for one team over all completed runs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamProjection {
    pub name: String,
    pub starting_points: u32,
    pub position_counts: Vec<u64>,   // Index 0 is first place
    pub qualification_count: u64,
    pub points_sum: u64,
    pub min_points: Option<u32>,
    pub max_points: Option<u32>,
    pub qualification_probability: f64,   // Percent, 0..=100
    pub average_points: f64,
}

impl TeamProjection {
    pub fn points_range(&self) -> Option<(u32, u32)> {
        self.min_points.zip(self.max_points)
    }

    /// Percent of runs finishing at `position` (1-based)
    pub fn position_probability(&self, position: usize) -> f64 {
        let total: u64 = self.position_counts.iter().sum();
        if total == 0 || position == 0 {
            return 0.0;
        }
        let count = self.position_counts.get(position - 1).copied().unwrap_or(0);
        count as f64 / total as f64 * 100.0
    }

    /// Most frequent final position, best position wins ties
    pub fn most_likely_position(&self) -> Option<usize> {
        self.position_counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .max_by(|(a_pos, a), (b_pos, b)| a.cmp(b).then_with(|| b_pos.cmp(a_pos)))
            .map(|(index, _)| index + 1)
    }
}

/// Result of an aggregation session. Read-only once returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateStatistics {
    pub requested_runs: usize,
    pub completed_runs: usize,
    pub cancelled: bool,
    pub qualification_cutoff: usize,
    pub seed: u64,
    pub teams: Vec<TeamProjection>,   // Snapshot order
}

impl AggregateStatistics {
    pub fn team(&self, name: &str) -> Option<&TeamProjection> {
        self.teams.iter().find(|team| team.name == name)
    }

    /// Teams by qualification probability, then average points, then name
    pub fn by_qualification(&self) -> Vec<&TeamProjection> {
        let mut teams: Vec<&TeamProjection> = self.teams.iter().collect();
        teams.sort_by(|a, b| {
            b.qualification_probability
                .partial_cmp(&a.qualification_probability)
                .unwrap_or(Ordering::Equal)
                .then_with(|| {
                    b.average_points
                        .partial_cmp(&a.average_points)
                        .unwrap_or(Ordering::Equal)
                })
                .then_with(|| a.name.cmp(&b.name))
        });
        teams
    }

    pub fn is_complete(&self) -> bool {
        !self.cancelled && self.completed_runs == self.requested_runs
    }
}

/// Runs a projection session: validation, parallel runs, reduction
pub struct Aggregator {
    config: SimulationConfig,
    progress: Option<ProgressCallback>,
    cancellation: Option<CancellationToken>,
}

impl Aggregator {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            progress: None,
            cancellation: None,
        }
    }

    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(usize, usize) + Send + Sync + 'static,
    {
        self.progress = Some(Box::new(callback));
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Project `snapshot` to the end of the season
    pub fn aggregate(&self, snapshot: &Snapshot) -> SimulationResult<AggregateStatistics> {
        self.config.validate()?;
        let engine = RunEngine::new(snapshot, &self.config)?;
        let seed = self.config.seed.unwrap_or_else(rand::random);

        info!(
            "🎲 Running {} Monte Carlo simulations ({} fixtures each, seed {})",
            self.config.run_count,
            engine.fixtures_to_simulate(),
            seed
        );

        let tally = match self.config.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| SimulationError::ThreadPool(e.to_string()))?;
                pool.install(|| self.drive(&engine, seed))
            }
            None => self.drive(&engine, seed),
        };

        let statistics = tally.finalize(
            snapshot,
            self.config.run_count,
            self.config.qualification_cutoff,
            seed,
        );

        if statistics.cancelled {
            warn!(
                "⚠️  Simulation cancelled after {}/{} runs",
                statistics.completed_runs, statistics.requested_runs
            );
        } else {
            info!("✅ Simulations complete!");
        }

        Ok(statistics)
    }

    // Batches always finish; cancellation only stops the next one
    fn drive(&self, engine: &RunEngine<'_>, seed: u64) -> SeasonTally {
        let team_count = engine.team_count();
        let total = self.config.run_count;
        let cutoff = self.config.qualification_cutoff;
        let mut tally = SeasonTally::new(team_count);
        let mut next_run = 0;

        while next_run < total && !self.is_cancelled() {
            let batch_end = (next_run + self.config.progress_interval).min(total);

            let batch = (next_run..batch_end)
                .into_par_iter()
                .fold(
                    || SeasonTally::new(team_count),
                    |mut partial, run_index| {
                        let mut rng = run_rng(seed, run_index as u64);
                        let outcome = engine.run(&mut rng);
                        partial.record(&outcome, cutoff);
                        partial
                    },
                )
                .reduce(|| SeasonTally::new(team_count), SeasonTally::merge);

            tally = tally.merge(batch);
            next_run = batch_end;

            debug!(
                "  Progress: {}/{} ({:.1}%)",
                tally.runs(),
                total,
                100.0 * tally.runs() as f64 / total as f64
            );

            if let Some(progress) = &self.progress {
                progress(tally.runs(), total);
            }
        }

        tally
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .map_or(false, CancellationToken::is_cancelled)
    }
}

/// Run a full projection session without progress reporting or cancellation
pub fn aggregate(snapshot: &Snapshot, config: &SimulationConfig) -> SimulationResult<AggregateStatistics> {
    Aggregator::new(config.clone()).aggregate(snapshot)
}
