//! Grid Snake - the classic arcade game in a terminal
//!
//! This library provides:
//! - Core game logic and the fixed-tick engine (game module)
//! - The cancellable tick timer (scheduler module)
//! - Keyboard and mouse-swipe input routing (input module)
//! - TUI rendering behind a surface trait (render module)
//! - Sound cues (audio module) and in-memory session stats (metrics module)
//! - The interactive controller (modes module)

pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod scheduler;
