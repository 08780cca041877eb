use clap::{Parser, Subcommand};
use std::path::Path;

use tintboard::cli::commands;
use tintboard::config::difficulty::Difficulty;
use tintboard::config::params::PuzzleParams;

#[derive(Parser)]
#[command(name = "tintboard")]
#[command(about = "A map-coloring puzzle generator with organically partitioned regions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a puzzle and print its summary (or JSON)
    Generate {
        /// Path to a puzzle parameter TOML file; overrides tier/level
        #[arg(short, long)]
        params: Option<String>,

        /// Difficulty tier used when no parameter file is given
        #[arg(short, long, value_enum, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,

        /// Progression level within the tier (starts at 1)
        #[arg(short, long, default_value_t = 1)]
        level: u32,

        /// RNG seed; 0 picks a random seed
        #[arg(short, long, default_value_t = 0)]
        seed: u64,

        /// Board width in units
        #[arg(long, default_value_t = 800.0)]
        width: f64,

        /// Board height in units
        #[arg(long, default_value_t = 600.0)]
        height: f64,

        /// Emit the puzzle as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Generate many puzzles and print aggregate statistics
    Sample {
        /// Number of puzzles to generate
        #[arg(short, long, default_value_t = 100)]
        count: u32,

        /// Difficulty tier
        #[arg(short, long, value_enum, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,

        /// Progression level within the tier (starts at 1)
        #[arg(short, long, default_value_t = 1)]
        level: u32,

        /// Base RNG seed; 0 makes every run random
        #[arg(short, long, default_value_t = 0)]
        seed: u64,
    },
}

fn resolve_params(
    file: Option<&str>,
    difficulty: Difficulty,
    level: u32,
    seed: u64,
    width: f64,
    height: f64,
) -> Result<PuzzleParams, String> {
    let mut params = match file {
        Some(path) => PuzzleParams::from_file(Path::new(path))?,
        None => difficulty.params_for(level, width, height),
    };
    if seed != 0 {
        params.seed = seed;
    }
    Ok(params)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            params,
            difficulty,
            level,
            seed,
            width,
            height,
            json,
        } => resolve_params(params.as_deref(), difficulty, level, seed, width, height)
            .and_then(|p| commands::generate(&p, json)),

        Commands::Sample {
            count,
            difficulty,
            level,
            seed,
        } => resolve_params(None, difficulty, level, seed, 800.0, 600.0)
            .and_then(|p| commands::sample(&p, count)),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
