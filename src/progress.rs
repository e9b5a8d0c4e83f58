//! Progress bar utilities for long-running projections
//!
//! Visual feedback for simulation sessions using the indicatif crate.
//! The bar is driven by the aggregator's progress callback.

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar for a Monte Carlo session
#[derive(Clone)]
pub struct SimulationProgress {
    pub progress: ProgressBar,
}

impl SimulationProgress {
    /// Create a new simulation progress bar
    pub fn new(total_runs: usize) -> Self {
        let progress = ProgressBar::new(total_runs as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} runs ({eta})\n{msg}")
        {
            progress.set_style(style.progress_chars("#>-"));
        }

        Self { progress }
    }

    /// Hidden bar for quiet sessions and tests
    pub fn hidden() -> Self {
        Self { progress: ProgressBar::hidden() }
    }

    /// Update with the number of completed runs
    pub fn update(&self, completed: usize, total: usize) {
        self.progress.set_position(completed as u64);
        self.progress.set_message(format!(
            "🎲 {:.1}% of runs simulated",
            100.0 * completed as f64 / total.max(1) as f64
        ));
    }

    /// Callback suitable for `Aggregator::with_progress`
    pub fn callback(&self) -> impl Fn(usize, usize) + Send + Sync + 'static {
        let bar = self.clone();
        move |completed, total| bar.update(completed, total)
    }

    /// Mark simulation as complete
    pub fn finish(&self, completed: usize) {
        self.progress.finish_with_message(format!(
            "✅ Simulation complete! {} runs",
            completed
        ));
    }

    /// Mark simulation as stopped early
    pub fn finish_cancelled(&self, completed: usize, requested: usize) {
        self.progress.abandon_with_message(format!(
            "⚠️  Stopped after {}/{} runs",
            completed, requested
        ));
    }
}
