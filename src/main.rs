use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use cube_snake::game::GameConfig;
use cube_snake::modes::{AutoplayConfig, AutoplayMode, HumanMode, RunEnd};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cube_snake")]
#[command(version, about = "Snake on the surface of a cube")]
struct Cli {
    #[arg(long, value_enum, default_value = "human")]
    mode: Mode,

    /// JSON game configuration; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cells along each cube edge
    #[arg(long)]
    grid_size: Option<usize>,

    /// Milliseconds between ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Body segments behind the head at start
    #[arg(long)]
    initial_length: Option<usize>,

    /// Fixed seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Number of runs in autoplay mode
    #[arg(long, default_value = "10")]
    games: u32,

    /// Tick cap per autoplay run
    #[arg(long, default_value = "10000")]
    max_steps: u32,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play with keyboard controls
    Human,
    /// Let the autopilot play headless batches
    Autoplay,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => GameConfig::default(),
        };

        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_period_secs = tick_ms as f64 / 1000.0;
        }
        if let Some(length) = self.initial_length {
            config.initial_body_length = length;
        }
        if self.seed.is_some() {
            config.rng_seed = self.seed;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.game_config()?;

    match cli.mode {
        Mode::Human => {
            // The terminal UI owns stderr, so no log subscriber here
            let mut human_mode = HumanMode::new(config)?;
            human_mode.run().await?;
        }
        Mode::Autoplay => {
            init_tracing();
            let autoplay = AutoplayConfig {
                games: cli.games,
                max_steps: cli.max_steps,
            };
            let mut mode = AutoplayMode::new(config, autoplay)?;
            let reports = mode.run();

            let timed_out = reports
                .iter()
                .filter(|report| report.end == RunEnd::TimedOut)
                .count();
            let metrics = mode.metrics();
            println!(
                "played {} | won {} | lost {} | timed out {} | best score {} | longest {}",
                reports.len(),
                metrics.wins,
                metrics.losses(),
                timed_out,
                metrics.high_score,
                metrics.longest_snake
            );
        }
    }

    Ok(())
}
