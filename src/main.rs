use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::game::GameConfig;
use grid_snake::modes::human;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake in the terminal, with keyboard and mouse-swipe controls")]
struct Cli {
    /// JSON file with game settings; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of grid cells across the board
    #[arg(long)]
    columns: Option<u32>,

    /// Initial tick interval in milliseconds
    #[arg(long)]
    speed: Option<u64>,

    /// Fill the terminal instead of using a square board
    #[arg(long)]
    fill: bool,

    /// Disable the terminal bell
    #[arg(long)]
    mute: bool,

    /// Write logs to this file (filtered by RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(columns) = self.columns {
            config.columns = columns;
        }
        if let Some(speed) = self.speed {
            config.initial_tick_ms = speed;
        }
        if self.fill {
            config.square_surface = false;
        }
        if self.mute {
            config.sound = false;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

/// The terminal belongs to the game, so logs only go to a file when asked for
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {:?}", path))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_deref())?;
    let config = cli.game_config()?;

    human::run(config).await
}
