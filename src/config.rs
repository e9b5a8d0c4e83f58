// Configuration management for the season projector

use crate::simulation::{ModelParams, SimulationConfig, SimulationError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSettings {
    #[serde(default = "default_runs")]
    pub runs: usize,
    #[serde(default = "default_qualification_cutoff")]
    pub qualification_cutoff: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,
    #[serde(default)]
    pub threads: Option<usize>,     // Unset = one worker per core
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSettings {
    #[serde(default = "default_home_advantage")]
    pub home_advantage: f64,        // Points added to home strength
    #[serde(default = "default_goal_scale")]
    pub goal_scale: f64,            // Strength per expected goal
    #[serde(default = "default_min_expected_goals")]
    pub min_expected_goals: f64,
    #[serde(default = "default_score_variance")]
    pub score_variance: f64,        // Std deviation of goals per team
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_true")]
    pub show_progress: bool,
    #[serde(default = "default_position_columns")]
    pub position_columns: usize,    // Positions shown in the probability table
    #[serde(default = "default_position_teams")]
    pub position_teams: usize,      // Teams shown in the probability table
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub simulation: SimulationSettings,
    pub model: ModelSettings,
    pub output: OutputSettings,
}

fn default_runs() -> usize { 10_000 }
fn default_qualification_cutoff() -> usize { 8 }
fn default_progress_interval() -> usize { 1_000 }
fn default_home_advantage() -> f64 { 10.0 }
fn default_goal_scale() -> f64 { 10.0 }
fn default_min_expected_goals() -> f64 { 0.5 }
fn default_score_variance() -> f64 { 1.5 }
fn default_true() -> bool { true }
fn default_position_columns() -> usize { 8 }
fn default_position_teams() -> usize { 5 }

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            runs: default_runs(),
            qualification_cutoff: default_qualification_cutoff(),
            seed: None,
            progress_interval: default_progress_interval(),
            threads: None,
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            home_advantage: default_home_advantage(),
            goal_scale: default_goal_scale(),
            min_expected_goals: default_min_expected_goals(),
            score_variance: default_score_variance(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            show_progress: true,
            position_columns: default_position_columns(),
            position_teams: default_position_teams(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            simulation: SimulationSettings::default(),
            model: ModelSettings::default(),
            output: OutputSettings::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(e.to_string()))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path, content)
            .map_err(|e| ConfigError::FileWrite(e.to_string()))?;

        Ok(())
    }

    /// Load configuration from file, or create default if file doesn't exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            let config = Self::default();
            config.to_file(&path)?;
            info!("📁 Created default config file: {}", path.as_ref().display());
            Ok(config)
        }
    }

    /// Engine parameters described by this file
    pub fn simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            run_count: self.simulation.runs,
            qualification_cutoff: self.simulation.qualification_cutoff,
            model: ModelParams {
                home_advantage: self.model.home_advantage,
                goal_scale: self.model.goal_scale,
                min_expected_goals: self.model.min_expected_goals,
                score_variance: self.model.score_variance,
            },
            seed: self.simulation.seed,
            through_matchday: None,
            progress_interval: self.simulation.progress_interval,
            threads: self.simulation.threads,
        }
    }

    /// Validate configuration values with the same rules the engine applies
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulation_config().validate().map_err(|e| match e {
            SimulationError::Config(msg) => ConfigError::Validation(msg),
            other => ConfigError::Validation(other.to_string()),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(String),

    #[error("Failed to write config file: {0}")]
    FileWrite(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}
