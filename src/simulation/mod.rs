// Monte Carlo season projection
// Simulates the unplayed fixtures many times and aggregates the final tables

pub mod outcome_model;
pub mod run_engine;
pub mod aggregator;

pub use outcome_model::{simulate_match, ModelParams};
pub use run_engine::{run_once, run_rng, RunEngine, RunOutcome};
pub use aggregator::{
    aggregate, AggregateStatistics, Aggregator, CancellationToken, SeasonTally, TeamProjection,
};

/// Projection session parameters
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub run_count: usize,
    pub qualification_cutoff: usize,
    pub model: ModelParams,
    pub seed: Option<u64>,
    pub through_matchday: Option<u32>,   // Only simulate fixtures up to this matchday
    pub progress_interval: usize,        // Runs between progress callbacks
    pub threads: Option<usize>,          // Worker threads, None = rayon default
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            run_count: 10_000,
            qualification_cutoff: 8,     // Top 8 go straight to the knockout stage
            model: ModelParams::default(),
            seed: None,
            through_matchday: None,
            progress_interval: 1_000,
            threads: None,
        }
    }
}

impl SimulationConfig {
    pub fn with_runs(mut self, run_count: usize) -> Self {
        self.run_count = run_count;
        self
    }

    pub fn with_cutoff(mut self, qualification_cutoff: usize) -> Self {
        self.qualification_cutoff = qualification_cutoff;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Checked before any run executes
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.run_count == 0 {
            return Err(SimulationError::Config("run_count must be at least 1".to_string()));
        }

        if self.qualification_cutoff < 1 {
            return Err(SimulationError::Config(
                "qualification_cutoff must be at least 1".to_string(),
            ));
        }

        if self.progress_interval == 0 {
            return Err(SimulationError::Config(
                "progress_interval must be at least 1".to_string(),
            ));
        }

        if self.threads == Some(0) {
            return Err(SimulationError::Config("threads must be at least 1".to_string()));
        }

        self.model.validate()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    #[error("Invalid simulation config: {0}")]
    Config(String),

    #[error("Fixture {fixture} references unknown team '{team}'")]
    Reference { fixture: String, team: String },

    #[error("Fixture {0} has the same team on both sides")]
    InvalidFixture(String),

    #[error("Team '{0}' appears more than once in the snapshot")]
    DuplicateTeam(String),

    #[error("Failed to start worker pool: {0}")]
    ThreadPool(String),
}

pub type SimulationResult<T> = Result<T, SimulationError>;
