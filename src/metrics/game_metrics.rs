use std::time::{Duration, Instant};

/// Per-process session statistics. Nothing here outlives the process.
pub struct GameMetrics {
    run_started: Option<Instant>,
    pub elapsed_time: Duration,
    pub best_score: u32,
    pub games_played: u32,
    pub foods_eaten: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            run_started: None,
            elapsed_time: Duration::ZERO,
            best_score: 0,
            games_played: 0,
            foods_eaten: 0,
        }
    }

    /// Refresh the run clock. Frozen between games.
    pub fn update(&mut self) {
        if let Some(started) = self.run_started {
            self.elapsed_time = started.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.run_started = Some(Instant::now());
        self.elapsed_time = Duration::ZERO;
        self.foods_eaten = 0;
    }

    pub fn on_food_eaten(&mut self) {
        self.foods_eaten += 1;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.update();
        self.run_started = None;
        self.games_played += 1;
        self.best_score = self.best_score.max(final_score);
    }

    pub fn is_timing(&self) -> bool {
        self.run_started.is_some()
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
