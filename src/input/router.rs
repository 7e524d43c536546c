use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;

use super::gesture::{SurfacePoint, SwipeTracker};
use super::handler::{InputHandler, KeyAction};
use crate::game::{Direction, Phase};

/// What the controller should do in response to input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Start,
    Quit,
}

/// Turns keys and pointer gestures into commands
pub struct InputRouter {
    keys: InputHandler,
    swipe: SwipeTracker,
}

impl InputRouter {
    pub fn new(swipe_min_distance: f32, swipe_cooldown: Duration) -> Self {
        Self {
            keys: InputHandler::new(),
            swipe: SwipeTracker::new(swipe_min_distance, swipe_cooldown),
        }
    }

    /// Swipe threshold in surface units; follows the cell size on resize
    pub fn set_swipe_threshold(&mut self, min_distance: f32) {
        self.swipe.set_min_distance(min_distance);
    }

    pub fn swipe_threshold(&self) -> f32 {
        self.swipe.min_distance()
    }

    pub fn route_key(&self, key: KeyEvent, phase: Phase) -> Option<Command> {
        match self.keys.handle_key_event(key) {
            KeyAction::Turn(direction) => Some(Command::Turn(direction)),
            KeyAction::Start if phase != Phase::Running => Some(Command::Start),
            KeyAction::Start => None,
            KeyAction::Restart => Some(Command::Start),
            KeyAction::Quit => Some(Command::Quit),
            KeyAction::None => None,
        }
    }

    /// Pointer pressed. Only presses on the play surface begin a swipe, and such a
    /// press starts a game when none is running.
    pub fn pointer_down(
        &mut self,
        point: SurfacePoint,
        on_surface: bool,
        phase: Phase,
    ) -> Option<Command> {
        if !on_surface {
            return None;
        }

        self.swipe.begin(point);

        if phase != Phase::Running {
            return Some(Command::Start);
        }
        None
    }

    pub fn pointer_up(&mut self, point: SurfacePoint, now: Instant) -> Option<Command> {
        self.swipe.end(point, now).map(Command::Turn)
    }
}
