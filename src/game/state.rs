use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::grid::Grid;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake's body, head at index 0 and tail last
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snake {
    pub body: Vec<Position>,
}

impl Snake {
    /// Lay out `length` segments in a straight line trailing behind `head`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.opposite().delta();
        let body = (0..length as i32)
            .map(|i| head.moved_by(dx * i, dy * i))
            .collect();

        Self { body }
    }

    pub fn from_segments(body: Vec<Position>) -> Self {
        Self { body }
    }

    pub fn head(&self) -> Option<Position> {
        self.body.first().copied()
    }

    pub fn tail(&self) -> Option<Position> {
        self.body.last().copied()
    }

    /// True if any segment, head and tail included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub fn push_head(&mut self, head: Position) {
        self.body.insert(0, head);
    }

    pub fn drop_tail(&mut self) -> Option<Position> {
        self.body.pop()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the grid
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

/// Top-level lifecycle of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Ended,
}

/// Complete game state. Only the engine mutates it; everything else reads.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub phase: Phase,
    pub snake: Snake,
    pub food: Option<Position>,
    /// Direction applied on the tick just executed
    pub direction: Direction,
    /// Direction buffered from input, committed at the start of the next tick
    pub pending_direction: Direction,
    pub score: u32,
    pub tick_interval: Duration,
    pub grid: Grid,
    /// Why the last game ended, if it did
    pub collision: Option<CollisionType>,
}

impl GameState {
    /// State before the first game: nothing on the board
    pub fn idle(grid: Grid, tick_interval: Duration) -> Self {
        Self {
            phase: Phase::Idle,
            snake: Snake::default(),
            food: None,
            direction: Direction::Right,
            pending_direction: Direction::Right,
            score: 0,
            tick_interval,
            grid,
            collision: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_in_bounds(&self, pos: Position) -> bool {
        self.grid.contains(pos)
    }

    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_in_direction(Direction::Left), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert_eq!(
            snake.body,
            vec![Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)]
        );

        let snake = Snake::new(Position::new(5, 5), Direction::Up, 2);
        assert_eq!(snake.body, vec![Position::new(5, 5), Position::new(5, 6)]);
    }

    #[test]
    fn test_snake_growth_and_shrink() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        snake.push_head(Position::new(6, 5));
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Some(Position::new(6, 5)));

        assert_eq!(snake.drop_tail(), Some(Position::new(3, 5)));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.tail(), Some(Position::new(4, 5)));
    }

    #[test]
    fn test_occupancy_includes_head_and_tail() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert!(snake.occupies(Position::new(5, 5)));
        assert!(snake.occupies(Position::new(3, 5)));
        assert!(!snake.occupies(Position::new(10, 10)));
    }

    #[test]
    fn test_idle_state_is_empty() {
        let state = GameState::idle(Grid::new(20, 20), Duration::from_millis(170));
        assert_eq!(state.phase, Phase::Idle);
        assert!(state.snake.is_empty());
        assert_eq!(state.snake.head(), None);
        assert_eq!(state.food, None);
        assert_eq!(state.direction, Direction::Right);
        assert!(!state.is_running());
    }
}
