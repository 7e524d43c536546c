//! Core game logic for Snake
//!
//! Everything here is free of terminal I/O so the simulation can be driven
//! deterministically from tests.

pub mod config;
pub mod direction;
pub mod engine;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{GameEngine, TickResult};
pub use grid::{Grid, Viewport};
pub use state::{CollisionType, GameState, Phase, Position, Snake};
