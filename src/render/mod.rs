//! Drawing the game to a terminal
//!
//! The controller only talks to [`RenderSurface`]; the ratatui pieces behind it
//! never mutate game state.

pub mod board;
pub mod renderer;
pub mod surface;

use anyhow::Result;
use ratatui::layout::Rect;

use crate::game::{GameState, Viewport};
use crate::input::SurfacePoint;
use crate::metrics::GameMetrics;

pub use board::Board;
pub use renderer::{Overlay, Renderer};
pub use surface::TerminalSurface;

/// Read-only view of everything a frame shows
pub struct Scene<'a> {
    pub state: &'a GameState,
    pub metrics: &'a GameMetrics,
}

/// Where the board sits on screen and how big it is in viewport units.
/// One viewport unit is one terminal row or two terminal columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceGeometry {
    pub board: Rect,
    pub viewport: Viewport,
}

impl SurfaceGeometry {
    pub fn new(board: Rect) -> Self {
        Self {
            board,
            viewport: Viewport::new(board.width as u32 / 2, board.height as u32),
        }
    }

    /// Whether the board gives each of `columns` cells at least one unit
    pub fn holds_grid(&self, columns: u32) -> bool {
        self.viewport.height > 0 && self.viewport.width >= columns.max(1)
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.board.x
            && column < self.board.x.saturating_add(self.board.width)
            && row >= self.board.y
            && row < self.board.y.saturating_add(self.board.height)
    }

    /// Convert terminal coordinates into viewport units relative to the board.
    /// Points off the board map outside the viewport rather than being clamped.
    pub fn to_surface(&self, column: u16, row: u16) -> SurfacePoint {
        SurfacePoint::new(
            (column as f32 - self.board.x as f32) / 2.0,
            row as f32 - self.board.y as f32,
        )
    }
}

pub trait RenderSurface {
    /// Current board placement; changes when the terminal is resized
    fn geometry(&mut self) -> Result<SurfaceGeometry>;

    fn draw(&mut self, scene: &Scene<'_>) -> Result<()>;

    fn draw_game_over(&mut self, scene: &Scene<'_>, final_score: u32) -> Result<()>;

    /// Tell the player the board cannot be shown or played at this size
    fn draw_too_small(&mut self, scene: &Scene<'_>) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_viewport_units() {
        let geometry = SurfaceGeometry::new(Rect::new(10, 4, 40, 20));
        assert_eq!(geometry.viewport, Viewport::new(20, 20));
    }

    #[test]
    fn test_holds_grid() {
        assert!(SurfaceGeometry::new(Rect::new(0, 0, 40, 20)).holds_grid(20));
        assert!(!SurfaceGeometry::new(Rect::new(0, 0, 38, 20)).holds_grid(20));
        assert!(!SurfaceGeometry::new(Rect::new(0, 0, 40, 0)).holds_grid(20));
        assert!(!SurfaceGeometry::default().holds_grid(20));
    }

    #[test]
    fn test_hit_testing() {
        let geometry = SurfaceGeometry::new(Rect::new(10, 4, 40, 20));

        assert!(geometry.contains(10, 4));
        assert!(geometry.contains(49, 23));
        assert!(!geometry.contains(9, 4));
        assert!(!geometry.contains(50, 10));
        assert!(!geometry.contains(20, 24));
    }

    #[test]
    fn test_surface_coordinates() {
        let geometry = SurfaceGeometry::new(Rect::new(10, 4, 40, 20));

        assert_eq!(geometry.to_surface(10, 4), SurfacePoint::new(0.0, 0.0));
        assert_eq!(geometry.to_surface(30, 14), SurfacePoint::new(10.0, 10.0));
        assert_eq!(geometry.to_surface(0, 0), SurfacePoint::new(-5.0, -4.0));
    }
}
