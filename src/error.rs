//! Unified error handling for the season projector
//!
//! Library modules report their own error types; this module folds them
//! into one application error with categories and actionable hints.

use crate::config::ConfigError;
use crate::simulation::SimulationError;
use crate::snapshot::SnapshotError;
use std::fmt;

/// Main error type for the projector application
#[derive(Debug)]
pub enum ProjectionError {
    // Configuration errors
    ConfigParse(String),
    ConfigValidation(String),

    // Snapshot errors
    SnapshotNotFound(String),
    SnapshotParse(String),
    SnapshotInconsistent(String),
    UnknownTeam(String, String), // (fixture, team)

    // Simulation errors
    WorkerPool(String),

    // IO errors
    FileRead(String),
    FileWrite(String),

    // General errors
    Internal(String),
}

impl ProjectionError {
    /// Get a user-friendly error message with helpful context
    pub fn user_message(&self) -> String {
        match self {
            ProjectionError::ConfigParse(msg) => {
                format!(
                    "Configuration parse error: {}\n\n\
                    💡 Quick fix:\n\
                    1. Run: season-sim init --force\n\
                    2. Re-apply your changes to season.toml\n\
                    3. Try again",
                    msg
                )
            }
            ProjectionError::ConfigValidation(msg) => {
                format!(
                    "Configuration validation error: {}\n\n\
                    💡 Check season.toml for:\n\
                    - runs and qualification_cutoff of at least 1\n\
                    - Non-negative model constants",
                    msg
                )
            }
            ProjectionError::SnapshotNotFound(path) => {
                format!(
                    "Competition file not found: {}\n\n\
                    💡 Save the competition from the main application first",
                    path
                )
            }
            ProjectionError::UnknownTeam(fixture, team) => {
                format!(
                    "Fixture {} references unknown team '{}'\n\n\
                    💡 Run: season-sim validate <file> to list all integrity problems",
                    fixture, team
                )
            }
            _ => self.to_string(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            ProjectionError::ConfigParse(_)
            | ProjectionError::ConfigValidation(_) => "config",

            ProjectionError::SnapshotNotFound(_)
            | ProjectionError::SnapshotParse(_)
            | ProjectionError::SnapshotInconsistent(_)
            | ProjectionError::UnknownTeam(_, _) => "snapshot",

            ProjectionError::WorkerPool(_) => "simulation",

            ProjectionError::FileRead(_) | ProjectionError::FileWrite(_) => "io",

            ProjectionError::Internal(_) => "internal",
        }
    }
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionError::ConfigParse(msg) => {
                write!(f, "Configuration parse error: {}", msg)
            }
            ProjectionError::ConfigValidation(msg) => {
                write!(f, "Configuration validation error: {}", msg)
            }

            ProjectionError::SnapshotNotFound(path) => {
                write!(f, "Competition file not found: {}", path)
            }
            ProjectionError::SnapshotParse(msg) => {
                write!(f, "Competition file parse error: {}", msg)
            }
            ProjectionError::SnapshotInconsistent(msg) => {
                write!(f, "Inconsistent competition data: {}", msg)
            }
            ProjectionError::UnknownTeam(fixture, team) => {
                write!(f, "Fixture {} references unknown team '{}'", fixture, team)
            }

            ProjectionError::WorkerPool(msg) => {
                write!(f, "Worker pool error: {}", msg)
            }

            ProjectionError::FileRead(msg) => {
                write!(f, "File read error: {}", msg)
            }
            ProjectionError::FileWrite(msg) => {
                write!(f, "File write error: {}", msg)
            }

            ProjectionError::Internal(msg) => {
                write!(f, "Internal error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ProjectionError {}

// Conversion implementations for library error types

impl From<serde_json::Error> for ProjectionError {
    fn from(err: serde_json::Error) -> Self {
        ProjectionError::Internal(format!("JSON error: {}", err))
    }
}

impl From<ConfigError> for ProjectionError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::FileRead(msg) => ProjectionError::FileRead(msg),
            ConfigError::FileWrite(msg) => ProjectionError::FileWrite(msg),
            ConfigError::Parse(msg) => ProjectionError::ConfigParse(msg),
            ConfigError::Serialize(msg) => ProjectionError::Internal(msg),
            ConfigError::Validation(msg) => ProjectionError::ConfigValidation(msg),
        }
    }
}

impl From<SnapshotError> for ProjectionError {
    fn from(err: SnapshotError) -> Self {
        match err {
            SnapshotError::FileNotFound(path) => ProjectionError::SnapshotNotFound(path),
            SnapshotError::FileRead(msg) => ProjectionError::FileRead(msg),
            SnapshotError::Parse(msg) => ProjectionError::SnapshotParse(msg),
            SnapshotError::Inconsistent(msg) => ProjectionError::SnapshotInconsistent(msg),
        }
    }
}

impl From<SimulationError> for ProjectionError {
    fn from(err: SimulationError) -> Self {
        match err {
            SimulationError::Config(msg) => ProjectionError::ConfigValidation(msg),
            SimulationError::Reference { fixture, team } => ProjectionError::UnknownTeam(fixture, team),
            SimulationError::InvalidFixture(_) | SimulationError::DuplicateTeam(_) => {
                ProjectionError::SnapshotInconsistent(err.to_string())
            }
            SimulationError::ThreadPool(msg) => ProjectionError::WorkerPool(msg),
        }
    }
}

/// Result type alias using ProjectionError
pub type ProjectionResult<T> = Result<T, ProjectionError>;
