// Integration tests for configuration loading and validation

mod common;

use common::write_temp_file;
use season_projector::{Config, ConfigError, ProjectionError};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_file_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("season.toml");

    let mut config = Config::default();
    config.simulation.runs = 2_500;
    config.simulation.seed = Some(42);
    config.model.home_advantage = 6.0;
    config.output.show_progress = false;

    config.to_file(&config_path).expect("Failed to write config");
    let loaded = Config::from_file(&config_path).expect("Failed to load config");

    assert_eq!(loaded.simulation.runs, 2_500);
    assert_eq!(loaded.simulation.seed, Some(42));
    assert_eq!(loaded.model.home_advantage, 6.0);
    assert!(!loaded.output.show_progress);
}

#[test]
fn test_load_or_create_writes_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("season.toml");
    assert!(!config_path.exists());

    let config = Config::load_or_create(&config_path).expect("Failed to create config");

    assert!(config_path.exists());
    assert_eq!(config.simulation.runs, 10_000);
    assert_eq!(config.simulation.qualification_cutoff, 8);

    let written = fs::read_to_string(&config_path).unwrap();
    assert!(written.contains("[simulation]"));
    assert!(written.contains("[model]"));
}

#[test]
fn test_simulation_config_carries_file_values() {
    let (_dir, path) = write_temp_file(
        "season.toml",
        r#"
[simulation]
runs = 750
qualification_cutoff = 4
seed = 9
threads = 2

[model]
score_variance = 2.0

[output]
"#,
    );

    let config = Config::from_file(&path).expect("Failed to load config");
    let sim = config.simulation_config();

    assert_eq!(sim.run_count, 750);
    assert_eq!(sim.qualification_cutoff, 4);
    assert_eq!(sim.seed, Some(9));
    assert_eq!(sim.threads, Some(2));
    assert_eq!(sim.model.score_variance, 2.0);
    assert_eq!(sim.model.home_advantage, 10.0);
    assert!(sim.through_matchday.is_none());
}

#[test]
fn test_zero_runs_rejected_on_load() {
    let (_dir, path) = write_temp_file(
        "season.toml",
        "[simulation]\nruns = 0\n\n[model]\n\n[output]\n",
    );

    let result = Config::from_file(&path);
    assert!(matches!(result, Err(ConfigError::Validation(_))));

    let err: ProjectionError = result.unwrap_err().into();
    assert_eq!(err.category(), "config");
}

#[test]
fn test_config_malformed_toml() {
    let (_dir, path) = write_temp_file("malformed.toml", "this is not valid toml {{{");

    let result = Config::from_file(&path);
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_config_missing_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let result = Config::from_file(temp_dir.path().join("missing.toml"));
    assert!(matches!(result, Err(ConfigError::FileRead(_))));
}

#[test]
fn test_nan_variance_rejected_on_load() {
    let (_dir, path) = write_temp_file(
        "season.toml",
        "[simulation]\n\n[model]\nscore_variance = nan\n\n[output]\n",
    );

    let result = Config::from_file(&path);
    match result {
        Err(ConfigError::Validation(msg)) => assert!(msg.contains("score_variance")),
        other => panic!("expected validation error, got {:?}", other.map(|_| ())),
    }
}
