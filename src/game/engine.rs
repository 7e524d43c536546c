use std::time::Duration;

use rand::Rng;
use rand::rngs::ThreadRng;
use tracing::{debug, info, trace};

use super::{
    config::GameConfig,
    direction::Direction,
    grid::Grid,
    state::{CollisionType, GameState, Phase, Position, Snake},
};

/// What a single tick did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickResult {
    /// The snake advanced one cell
    pub moved: bool,
    /// The snake ate food this tick
    pub ate_food: bool,
    /// Set when this tick ended the game
    pub collision: Option<CollisionType>,
    /// New tick interval when the game sped up; the caller must reschedule
    pub new_interval: Option<Duration>,
}

impl TickResult {
    pub fn ended(&self) -> bool {
        self.collision.is_some()
    }
}

/// Heading of a freshly laid out snake
const START_DIRECTION: Direction = Direction::Right;

/// Fixed-tick simulation: owns the game state and is the only thing that mutates it
pub struct GameEngine<R: Rng = ThreadRng> {
    config: GameConfig,
    state: GameState,
    rng: R,
}

impl GameEngine<ThreadRng> {
    /// Create an idle engine for the given grid
    pub fn new(config: GameConfig, grid: Grid) -> Self {
        Self::with_rng(config, grid, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, grid: Grid, rng: R) -> Self {
        let state = GameState::idle(grid, config.initial_tick_interval());
        Self { config, state, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Whether a fresh snake lies entirely inside the current grid
    pub fn start_layout_fits(&self) -> bool {
        self.start_snake()
            .body
            .iter()
            .all(|&segment| self.state.grid.contains(segment))
    }

    /// Begin a new game from any phase. Returns the interval to schedule ticks at.
    pub fn start(&mut self) -> Duration {
        let direction = START_DIRECTION;

        self.state.snake = self.start_snake();
        self.state.direction = direction;
        self.state.pending_direction = direction;
        self.state.score = 0;
        self.state.collision = None;
        self.state.tick_interval = self.config.initial_tick_interval();
        self.state.food = self.spawn_food();
        self.state.phase = Phase::Running;

        info!(
            grid_width = self.state.grid.width,
            grid_height = self.state.grid.height,
            interval_ms = self.state.tick_interval.as_millis() as u64,
            "game started"
        );

        self.state.tick_interval
    }

    /// Buffer a turn for the next tick. A reversal of the current direction is
    /// ignored; otherwise the request replaces whatever was pending.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.state.direction.is_opposite(direction) {
            trace!(?direction, current = ?self.state.direction, "reversal ignored");
            return false;
        }

        self.state.pending_direction = direction;
        true
    }

    /// Advance the simulation by one cell. Does nothing unless a game is running.
    pub fn tick(&mut self) -> TickResult {
        if self.state.phase != Phase::Running {
            return TickResult::default();
        }

        self.state.direction = self.state.pending_direction;

        let Some(head) = self.state.snake.head() else {
            return TickResult::default();
        };
        let new_head = head.moved_in_direction(self.state.direction);

        if let Some(collision) = self.check_collision(new_head) {
            return self.end(collision);
        }

        self.state.snake.push_head(new_head);

        let ate_food = self.state.food == Some(new_head);
        let mut new_interval = None;

        if ate_food {
            self.state.score += self.config.food_score;
            self.state.food = self.spawn_food();
            new_interval = self.speed_up();

            debug!(
                score = self.state.score,
                length = self.state.snake.len(),
                "food eaten"
            );
        } else {
            self.state.snake.drop_tail();
        }

        TickResult {
            moved: true,
            ate_food,
            collision: None,
            new_interval,
        }
    }

    /// Adopt new grid bounds. The snake and food keep their coordinates even if
    /// they now fall outside the grid.
    pub fn resize(&mut self, grid: Grid) {
        if grid != self.state.grid {
            debug!(width = grid.width, height = grid.height, "grid resized");
            self.state.grid = grid;
        }
    }

    fn start_snake(&self) -> Snake {
        Snake::new(
            self.config.start_position,
            START_DIRECTION,
            self.config.initial_snake_length,
        )
    }

    #[cfg(test)]
    pub(crate) fn place_food(&mut self, food: Position) {
        self.state.food = Some(food);
    }

    fn check_collision(&self, pos: Position) -> Option<CollisionType> {
        if !self.state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if self.state.is_occupied_by_snake(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    fn end(&mut self, collision: CollisionType) -> TickResult {
        self.state.phase = Phase::Ended;
        self.state.collision = Some(collision);

        info!(score = self.state.score, ?collision, "game over");

        TickResult {
            moved: false,
            ate_food: false,
            collision: Some(collision),
            new_interval: None,
        }
    }

    /// Shrink the tick interval by one step, never past the floor
    fn speed_up(&mut self) -> Option<Duration> {
        let floor = self.config.min_tick_interval();
        if self.state.tick_interval <= floor {
            return None;
        }

        let next = self
            .state
            .tick_interval
            .saturating_sub(self.config.tick_decrement())
            .max(floor);
        self.state.tick_interval = next;

        debug!(interval_ms = next.as_millis() as u64, "speed up");
        Some(next)
    }

    /// Pick a random free cell by rejection sampling. Returns None when the snake
    /// covers every cell of the grid.
    fn spawn_food(&mut self) -> Option<Position> {
        let grid = self.state.grid;
        let covered = self
            .state
            .snake
            .body
            .iter()
            .filter(|pos| grid.contains(**pos))
            .count();

        if covered >= grid.cell_count() {
            return None;
        }

        loop {
            let x = self.rng.gen_range(0..grid.width) as i32;
            let y = self.rng.gen_range(0..grid.height) as i32;
            let pos = Position::new(x, y);

            if !self.state.snake.occupies(pos) {
                return Some(pos);
            }
        }
    }
}
