// Season Projector Library
//
// Monte Carlo projection of a partially played round-robin competition:
// simulate the remaining fixtures many times and aggregate the final tables

pub mod types;
pub mod standings;
pub mod snapshot;
pub mod simulation;
pub mod config;
pub mod error;       // Unified error handling
pub mod validation;  // Pre-flight snapshot checks
pub mod progress;
pub mod report;

// Re-export competition types
pub use types::{MatchFixture, MatchResult, TeamRecord};
pub use snapshot::{Snapshot, SnapshotError};

// Re-export the simulation engine
pub use simulation::{
    aggregate, run_once, run_rng, simulate_match, AggregateStatistics, Aggregator,
    CancellationToken, ModelParams, RunEngine, RunOutcome, SeasonTally, SimulationConfig,
    SimulationError, SimulationResult, TeamProjection,
};

// Re-export error types
pub use error::{ProjectionError, ProjectionResult};

// Re-export configuration
pub use config::{Config, ConfigError, ModelSettings, OutputSettings, SimulationSettings};

// Re-export validation types
pub use validation::{SnapshotValidator, ValidationCheck, ValidationLevel, ValidationResult};

// Re-export progress and reporting helpers
pub use progress::SimulationProgress;
pub use report::QualificationTier;
