// Season Projector - Monte Carlo CLI
// Single entry point for standings, validation and season projections

use clap::{Parser, Subcommand};
use tracing::{info, warn, error, Level};
use season_projector::{Config, ProjectionResult};

// Load command modules from cli directory
#[path = "../cli/simulate_commands.rs"]
mod simulate_commands;

use simulate_commands::SimulateOverrides;

#[derive(Parser)]
#[command(name = "season-sim")]
#[command(version = "0.1.0")]
#[command(about = "Monte Carlo projection of a round-robin season", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "season.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show the current standings of a competition file
    Standings {
        /// Competition JSON file
        file: String,
    },

    /// Run pre-flight checks on a competition file
    Validate {
        /// Competition JSON file
        file: String,
    },

    /// Project the rest of the season
    Simulate {
        /// Competition JSON file
        file: String,

        /// Number of simulated seasons
        #[arg(short, long)]
        runs: Option<usize>,

        /// Number of qualifying positions
        #[arg(long)]
        cutoff: Option<usize>,

        /// Session seed for reproducible results
        #[arg(short, long)]
        seed: Option<u64>,

        /// Only simulate fixtures up to this matchday
        #[arg(long)]
        through_matchday: Option<u32>,

        /// Worker threads (defaults to one per core)
        #[arg(short, long)]
        threads: Option<usize>,

        /// Positions shown in the probability table
        #[arg(short, long)]
        positions: Option<usize>,

        /// Print statistics as JSON instead of tables
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // Setup logging first (before config load so we can see config errors)
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    info!("⚽ Season Projector v0.1.0");

    let result = match cli.command {
        // Init doesn't require config (it creates it)
        Commands::Init { force } => init_config(force, &cli.config),

        // Standings never touch the simulation settings
        Commands::Standings { file } => simulate_commands::show_standings(&file),

        Commands::Validate { file } => load_config_or_default(&cli.config)
            .and_then(|config| simulate_commands::validate_snapshot(&file, &config)),

        Commands::Simulate { file, runs, cutoff, seed, through_matchday, threads, positions, json } => {
            let overrides = SimulateOverrides {
                runs,
                cutoff,
                seed,
                through_matchday,
                threads,
                positions,
                json,
            };
            load_config_or_default(&cli.config)
                .and_then(|config| simulate_commands::run_simulation(&file, overrides, &config))
        }
    };

    if let Err(e) = result {
        error!("❌ {} error", e.category());
        error!("{}", e.user_message());
        std::process::exit(1);
    }
}

/// Load config, fall back to defaults when the file is missing
fn load_config_or_default(path: &str) -> ProjectionResult<Config> {
    if !std::path::Path::new(path).exists() {
        warn!("⚠️  {} not found, using defaults (run: season-sim init)", path);
        return Ok(Config::default());
    }

    let config = Config::from_file(path)?;
    info!("📁 Config: {}", path);
    Ok(config)
}

fn init_config(force: bool, config_path: &str) -> ProjectionResult<()> {
    info!("🔧 Initializing configuration...");

    if std::path::Path::new(config_path).exists() && !force {
        warn!("⚠️  {} already exists, skipping (use --force to overwrite)", config_path);
        return Ok(());
    }

    Config::default().to_file(config_path)?;
    info!("📝 Created {}", config_path);

    info!("✅ Configuration initialized successfully!");
    info!("💡 Next steps:");
    info!("   1. Adjust runs and qualification_cutoff in {}", config_path);
    info!("   2. Run: season-sim validate competition.json");
    info!("   3. Run: season-sim simulate competition.json");

    Ok(())
}
