// Projection command implementations
use tracing::{info, warn, error};
use std::path::Path;
use season_projector::{
    report, Aggregator, Config, ProjectionError, ProjectionResult, SimulationProgress, Snapshot,
    SnapshotValidator,
};

/// Command-line overrides for a single `simulate` invocation
#[derive(Debug, Default, Clone)]
pub struct SimulateOverrides {
    pub runs: Option<usize>,
    pub cutoff: Option<usize>,
    pub seed: Option<u64>,
    pub through_matchday: Option<u32>,
    pub threads: Option<usize>,
    pub positions: Option<usize>,
    pub json: bool,
}

fn load_snapshot(path: &str) -> ProjectionResult<Snapshot> {
    if !Path::new(path).exists() {
        return Err(ProjectionError::SnapshotNotFound(path.to_string()));
    }
    let snapshot = Snapshot::from_json_file(path)?;
    info!(
        "📂 Loaded {} ({} teams, {} fixtures remaining)",
        snapshot.competition_name,
        snapshot.teams.len(),
        snapshot.remaining_fixture_count()
    );
    Ok(snapshot)
}

pub fn show_standings(path: &str) -> ProjectionResult<()> {
    let snapshot = load_snapshot(path)?;
    println!(
        "{}",
        report::render_standings(
            &snapshot.competition_name,
            snapshot.current_matchday,
            &snapshot.standings()
        )
    );
    Ok(())
}

pub fn validate_snapshot(path: &str, config: &Config) -> ProjectionResult<()> {
    let snapshot = load_snapshot(path)?;
    let validation =
        SnapshotValidator::new(&snapshot, config.simulation.qualification_cutoff).validate();

    info!("");
    validation.display();

    if !validation.passed {
        return Err(ProjectionError::SnapshotInconsistent(
            "Critical validation checks did not pass".to_string(),
        ));
    }
    Ok(())
}

pub fn run_simulation(path: &str, overrides: SimulateOverrides, config: &Config) -> ProjectionResult<()> {
    let snapshot = load_snapshot(path)?;

    let mut sim_config = config.simulation_config();
    if let Some(runs) = overrides.runs {
        sim_config = sim_config.with_runs(runs);
    }
    if let Some(cutoff) = overrides.cutoff {
        sim_config = sim_config.with_cutoff(cutoff);
    }
    if let Some(seed) = overrides.seed {
        sim_config = sim_config.with_seed(seed);
    }
    if let Some(threads) = overrides.threads {
        sim_config = sim_config.with_threads(threads);
    }
    sim_config.through_matchday = overrides.through_matchday;

    // Run pre-flight validation
    let validation = SnapshotValidator::new(&snapshot, sim_config.qualification_cutoff).validate();
    validation.display();
    if !validation.passed {
        error!("");
        error!("❌ Pre-flight validation failed. Cannot simulate.");
        return Err(ProjectionError::SnapshotInconsistent(
            "Critical validation checks did not pass".to_string(),
        ));
    }

    let progress = if config.output.show_progress && !overrides.json {
        SimulationProgress::new(sim_config.run_count)
    } else {
        SimulationProgress::hidden()
    };

    let aggregator = Aggregator::new(sim_config).with_progress(progress.callback());
    let stats = aggregator.aggregate(&snapshot)?;

    if stats.cancelled {
        progress.finish_cancelled(stats.completed_runs, stats.requested_runs);
    } else {
        progress.finish(stats.completed_runs);
    }

    if overrides.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    let positions = overrides.positions.unwrap_or(config.output.position_columns);
    println!(
        "{}",
        report::render_standings(
            &snapshot.competition_name,
            snapshot.current_matchday,
            &snapshot.standings()
        )
    );
    println!("{}", report::render_projection(&stats));
    println!(
        "{}",
        report::render_position_table(&stats, config.output.position_teams, positions)
    );
    println!("{}", report::render_tiers(&stats));

    if stats.completed_runs == 0 {
        warn!("⚠️  No runs completed, probabilities are empty");
    }
    info!("🔁 Reproduce with: season-sim simulate {} --seed {}", path, stats.seed);

    Ok(())
}
