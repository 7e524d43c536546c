use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::{Scene, SurfaceGeometry, board::Board};
use crate::game::{GameConfig, Phase};

/// Extra layer drawn over the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    GameOver { final_score: u32 },
    /// The board cannot show every cell, or the start layout is off the grid
    TooSmall,
}

pub struct Renderer {
    square_surface: bool,
    columns: u16,
}

impl Renderer {
    pub fn new(square_surface: bool, columns: u32) -> Self {
        Self {
            square_surface,
            columns: u16::try_from(columns).unwrap_or(u16::MAX).max(1),
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.square_surface, config.columns)
    }

    fn layout(&self, area: Rect) -> (Rect, Rect, Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(1), // Footer
            ])
            .split(area);

        (chunks[0], chunks[1], chunks[2])
    }

    /// Place the board inside the game area, leaving room for its border. Every
    /// grid cell gets the same whole number of viewport units, so no row or column
    /// is ever squeezed out. The board is empty when one unit per cell does not fit.
    pub fn geometry(&self, area: Rect) -> SurfaceGeometry {
        let (_, body, _) = self.layout(area);
        let inner = Rect::new(
            body.x + 1,
            body.y + 1,
            body.width.saturating_sub(2),
            body.height.saturating_sub(2),
        );

        // one unit is two terminal columns or one row
        let (units_wide, units_high) = (inner.width / 2, inner.height);
        let columns = self.columns;

        let (board_width, board_height) = if self.square_surface {
            let cell = units_wide.min(units_high) / columns;
            (columns * cell, columns * cell)
        } else {
            let cell = units_wide / columns;
            let rows = units_high.checked_div(cell).unwrap_or(0);
            (columns * cell, rows * cell)
        };

        let board = Rect::new(
            inner.x + (inner.width - board_width * 2) / 2,
            inner.y + (inner.height - board_height) / 2,
            board_width * 2,
            board_height,
        );

        SurfaceGeometry::new(board)
    }

    pub fn render(&self, frame: &mut Frame, scene: &Scene<'_>, overlay: Overlay) {
        let area = frame.area();
        let (header, body, footer) = self.layout(area);
        let board = self.geometry(area).board;

        frame.render_widget(self.render_stats(scene), header);
        frame.render_widget(self.render_controls(), footer);

        if overlay == Overlay::TooSmall {
            frame.render_widget(self.render_too_small(), centered(body, 36, 5));
            return;
        }

        let border = Rect::new(
            board.x.saturating_sub(1),
            board.y.saturating_sub(1),
            board.width + 2,
            board.height + 2,
        )
        .intersection(area);
        frame.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
            border,
        );
        frame.render_widget(Board::new(scene.state), board);

        match overlay {
            Overlay::GameOver { final_score } => {
                let popup = centered(board, 36, 7);
                frame.render_widget(Clear, popup);
                frame.render_widget(self.render_game_over(final_score), popup);
            }
            Overlay::None if scene.state.phase == Phase::Idle => {
                let popup = centered(board, 36, 5);
                frame.render_widget(Clear, popup);
                frame.render_widget(self.render_idle(), popup);
            }
            Overlay::None | Overlay::TooSmall => {}
        }
    }

    fn render_stats(&self, scene: &Scene<'_>) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                scene.state.score.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(scene.metrics.best_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(
                format!("{}ms", scene.state.tick_interval.as_millis()),
                value,
            ),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(scene.metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_idle(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "SNAKE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Press Space or click to start",
                Style::default().fg(Color::Gray),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
    }

    fn render_too_small(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(Span::styled(
                "Terminal too small",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Enlarge the window to play",
                Style::default().fg(Color::Gray),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
    }

    fn render_game_over(&self, final_score: u32) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled("Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    final_score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Press Space or click to play again",
                Style::default().fg(Color::Gray),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" or drag to turn | "),
            Span::styled("Space", Style::default().fg(Color::Green)),
            Span::raw(" start | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_geometry() {
        let renderer = Renderer::new(true, 20);
        // 98x26 inside the border: 49x26 units, so one unit per cell
        let geometry = renderer.geometry(Rect::new(0, 0, 100, 30));

        assert_eq!(geometry.board, Rect::new(30, 5, 40, 20));
        assert_eq!(geometry.viewport.width, geometry.viewport.height);
    }

    #[test]
    fn test_square_geometry_on_80x24() {
        let renderer = Renderer::new(true, 20);
        let geometry = renderer.geometry(Rect::new(0, 0, 80, 24));

        assert_eq!(geometry.board, Rect::new(20, 2, 40, 20));
        assert!(geometry.holds_grid(20));
    }

    #[test]
    fn test_square_geometry_scales_by_whole_cells() {
        let renderer = Renderer::new(true, 20);
        // 69x46 units fit two units per cell, not 2.3
        let geometry = renderer.geometry(Rect::new(0, 0, 140, 50));

        assert_eq!(geometry.board, Rect::new(30, 5, 80, 40));
        assert_eq!(geometry.viewport.width, 40);
    }

    #[test]
    fn test_fill_geometry_uses_whole_rows() {
        let renderer = Renderer::new(false, 20);
        // 64 units wide gives three units per cell; 26 rows hold eight cells
        let geometry = renderer.geometry(Rect::new(0, 0, 130, 30));

        assert_eq!(geometry.board, Rect::new(5, 3, 120, 24));
        assert_eq!(geometry.viewport.width, 60);
        assert_eq!(geometry.viewport.height, 24);
        assert_eq!(
            crate::game::Grid::from_viewport(geometry.viewport, 20),
            crate::game::Grid::new(20, 8)
        );
    }

    #[test]
    fn test_board_too_small_for_one_unit_per_cell() {
        let renderer = Renderer::new(true, 20);
        let geometry = renderer.geometry(Rect::new(0, 0, 80, 20));

        assert!(geometry.board.is_empty());
        assert!(!geometry.holds_grid(20));
    }

    #[test]
    fn test_tiny_terminal_does_not_underflow() {
        let renderer = Renderer::default();
        let geometry = renderer.geometry(Rect::new(0, 0, 3, 4));
        assert_eq!(geometry.board.width, 0);
        assert_eq!(geometry.board.height, 0);
    }

    #[test]
    fn test_centered() {
        assert_eq!(
            centered(Rect::new(0, 0, 40, 20), 10, 4),
            Rect::new(15, 8, 10, 4)
        );
        assert_eq!(
            centered(Rect::new(5, 5, 6, 2), 10, 4),
            Rect::new(5, 5, 6, 2)
        );
    }
}
