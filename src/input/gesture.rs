//! Swipe recognition for pointer drags

use std::time::{Duration, Instant};

use crate::game::Direction;

/// A point on the play surface, in viewport units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfacePoint {
    pub x: f32,
    pub y: f32,
}

impl SurfacePoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Classify a drag from `start` to `end`.
///
/// The dominant axis wins, with ties going to vertical. Drags shorter than
/// `min_distance` along that axis are noise.
pub fn classify_swipe(
    start: SurfacePoint,
    end: SurfacePoint,
    min_distance: f32,
) -> Option<Direction> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;

    let (magnitude, direction) = if dx.abs() > dy.abs() {
        let direction = if dx < 0.0 { Direction::Left } else { Direction::Right };
        (dx.abs(), direction)
    } else {
        let direction = if dy < 0.0 { Direction::Up } else { Direction::Down };
        (dy.abs(), direction)
    };

    if magnitude == 0.0 || magnitude < min_distance {
        return None;
    }

    Some(direction)
}

/// Tracks one drag at a time and rate-limits completed swipes
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    min_distance: f32,
    cooldown: Duration,
    start: Option<SurfacePoint>,
    last_swipe: Option<Instant>,
}

impl SwipeTracker {
    pub fn new(min_distance: f32, cooldown: Duration) -> Self {
        Self {
            min_distance,
            cooldown,
            start: None,
            last_swipe: None,
        }
    }

    pub fn min_distance(&self) -> f32 {
        self.min_distance
    }

    pub fn set_min_distance(&mut self, min_distance: f32) {
        self.min_distance = min_distance;
    }

    pub fn begin(&mut self, point: SurfacePoint) {
        self.start = Some(point);
    }

    /// Finish the current drag. A drag ending inside the cooldown is dropped and
    /// leaves the cooldown clock alone; any other drag restarts it, even one that
    /// turns out too short to count.
    pub fn end(&mut self, point: SurfacePoint, now: Instant) -> Option<Direction> {
        let start = self.start.take()?;

        if let Some(last) = self.last_swipe {
            if now.saturating_duration_since(last) < self.cooldown {
                return None;
            }
        }

        self.last_swipe = Some(now);
        classify_swipe(start, point, self.min_distance)
    }
}
