use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use super::state::Position;

/// Configuration for the game
///
/// Every field has a default, so a config file only needs to name the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of cells across the play surface; the cell size is derived from it
    pub columns: u32,
    /// Use the largest square that fits instead of filling the terminal
    pub square_surface: bool,

    /// Head position of a fresh snake
    pub start_position: Position,
    /// Initial length of the snake
    pub initial_snake_length: usize,

    /// Points awarded per food item
    pub food_score: u32,

    /// Tick interval at the start of every game, in milliseconds
    pub initial_tick_ms: u64,
    /// The interval never drops below this
    pub min_tick_ms: u64,
    /// Amount the interval shrinks after each food item
    pub tick_decrement_ms: u64,

    /// Shortest accepted swipe, measured in grid cells along the dominant axis
    pub swipe_min_cells: f32,
    /// Swipes ending sooner than this after the previous one are dropped
    pub swipe_cooldown_ms: u64,

    /// Ring the terminal bell for eat and game-over cues
    pub sound: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: 20,
            square_surface: true,
            start_position: Position::new(5, 5),
            initial_snake_length: 3,
            food_score: 10,
            initial_tick_ms: 170,
            min_tick_ms: 60,
            tick_decrement_ms: 2,
            swipe_min_cells: 1.5,
            swipe_cooldown_ms: 100,
            sound: true,
        }
    }
}

impl GameConfig {
    /// Read a JSON config file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.columns > 0, "columns must be at least 1");
        ensure!(
            self.initial_snake_length > 0,
            "initial_snake_length must be at least 1"
        );
        ensure!(
            self.initial_snake_length <= self.columns as usize,
            "initial_snake_length ({}) is longer than the board is wide ({} columns)",
            self.initial_snake_length,
            self.columns
        );
        ensure!(self.min_tick_ms > 0, "min_tick_ms must be positive");
        ensure!(
            self.initial_tick_ms >= self.min_tick_ms,
            "initial_tick_ms ({}) is below min_tick_ms ({})",
            self.initial_tick_ms,
            self.min_tick_ms
        );
        ensure!(
            self.swipe_min_cells >= 0.0,
            "swipe_min_cells must not be negative"
        );
        Ok(())
    }

    pub fn initial_tick_interval(&self) -> Duration {
        Duration::from_millis(self.initial_tick_ms)
    }

    pub fn min_tick_interval(&self) -> Duration {
        Duration::from_millis(self.min_tick_ms)
    }

    pub fn tick_decrement(&self) -> Duration {
        Duration::from_millis(self.tick_decrement_ms)
    }

    pub fn swipe_cooldown(&self) -> Duration {
        Duration::from_millis(self.swipe_cooldown_ms)
    }
}
