use super::state::Position;

/// Pixel-like dimensions of the play surface as reported by the frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn square(side: u32) -> Self {
        Self::new(side, side)
    }

    /// Size of one grid cell when the width is split into `columns` cells
    pub fn cell_size(&self, columns: u32) -> f32 {
        if columns == 0 {
            return 0.0;
        }
        self.width as f32 / columns as f32
    }
}

/// Bounds of the playing field in cells. Valid coordinates are [0, width) x [0, height).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Derive the grid from the surface: the width always holds `columns` cells and
    /// the height holds as many whole cells of the same size as fit.
    pub fn from_viewport(viewport: Viewport, columns: u32) -> Self {
        let columns = columns.max(1);
        let rows = (viewport.height as u64 * columns as u64)
            .checked_div(viewport.width as u64)
            .unwrap_or(0)
            .max(1);

        Self::new(columns as usize, rows as usize)
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < self.width
            && (pos.y as usize) < self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_viewport_gives_square_grid() {
        assert_eq!(Grid::from_viewport(Viewport::square(400), 20), Grid::new(20, 20));
        assert_eq!(Grid::from_viewport(Viewport::square(37), 20), Grid::new(20, 20));
    }

    #[test]
    fn test_tall_viewport_adds_rows() {
        // 10 units per cell, 250 units tall -> 25 whole rows
        assert_eq!(Grid::from_viewport(Viewport::new(200, 250), 20), Grid::new(20, 25));
        // partial rows are dropped
        assert_eq!(Grid::from_viewport(Viewport::new(200, 259), 20), Grid::new(20, 25));
    }

    #[test]
    fn test_degenerate_viewport() {
        assert_eq!(Grid::from_viewport(Viewport::new(0, 0), 20), Grid::new(20, 1));
        assert_eq!(Grid::from_viewport(Viewport::new(100, 100), 0), Grid::new(1, 1));
    }

    #[test]
    fn test_cell_size() {
        assert_eq!(Viewport::square(400).cell_size(20), 20.0);
        assert_eq!(Viewport::square(400).cell_size(0), 0.0);
    }

    #[test]
    fn test_bounds_checking() {
        let grid = Grid::new(20, 20);

        assert!(grid.contains(Position::new(0, 0)));
        assert!(grid.contains(Position::new(19, 19)));
        assert!(!grid.contains(Position::new(-1, 0)));
        assert!(!grid.contains(Position::new(20, 0)));
        assert!(!grid.contains(Position::new(0, 20)));
        assert_eq!(grid.cell_count(), 400);
    }
}
