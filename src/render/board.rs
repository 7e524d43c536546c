use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use crate::game::{Direction, GameState, Grid, Position};

const EMPTY: Color = Color::Rgb(0x22, 0x22, 0x22);
const HEAD: Color = Color::Rgb(0x8B, 0xC3, 0x4A);
const BODY_LIGHT: Color = Color::Rgb(0x4C, 0xAF, 0x50);
const BODY_DARK: Color = Color::Rgb(0x2E, 0x7D, 0x32);
const FOOD: Color = Color::Rgb(0xE5, 0x39, 0x35);

pub const FOOD_GLYPH: &str = "●";

pub fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "▲",
        Direction::Down => "▼",
        Direction::Left => "◀",
        Direction::Right => "▶",
    }
}

/// Screen rectangle covered by a grid cell when the grid is stretched over `area`.
/// None for cells off the grid or squeezed to nothing on a small terminal.
pub fn cell_rect(area: Rect, grid: Grid, pos: Position) -> Option<Rect> {
    if !grid.contains(pos) {
        return None;
    }

    let (x, y) = (pos.x as u32, pos.y as u32);
    let (width, height) = (area.width as u32, area.height as u32);
    let (columns, rows) = (grid.width as u32, grid.height as u32);

    let x0 = x * width / columns;
    let x1 = (x + 1) * width / columns;
    let y0 = y * height / rows;
    let y1 = (y + 1) * height / rows;

    if x1 == x0 || y1 == y0 {
        return None;
    }

    Some(Rect::new(
        area.x + x0 as u16,
        area.y + y0 as u16,
        (x1 - x0) as u16,
        (y1 - y0) as u16,
    ))
}

/// The playing field: empty cells, food, and the snake on top
pub struct Board<'a> {
    state: &'a GameState,
}

impl<'a> Board<'a> {
    pub fn new(state: &'a GameState) -> Self {
        Self { state }
    }

    fn paint(buf: &mut Buffer, rect: Rect, glyph: Option<&str>, style: Style) {
        buf.set_style(rect, style);
        if let Some(glyph) = glyph {
            buf.set_string(rect.x + rect.width / 2, rect.y + rect.height / 2, glyph, style);
        }
    }
}

impl Widget for Board<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let grid = self.state.grid;
        buf.set_style(area, Style::default().bg(EMPTY));

        if let Some(food) = self.state.food {
            if let Some(rect) = cell_rect(area, grid, food) {
                let style = Style::default().fg(Color::White).bg(FOOD);
                Self::paint(buf, rect, Some(FOOD_GLYPH), style);
            }
        }

        // tail first so the head always ends up on top
        for (index, segment) in self.state.snake.body.iter().enumerate().rev() {
            let Some(rect) = cell_rect(area, grid, *segment) else {
                continue;
            };

            if index == 0 {
                let style = Style::default()
                    .fg(Color::Black)
                    .bg(HEAD)
                    .add_modifier(Modifier::BOLD);
                Self::paint(buf, rect, Some(head_glyph(self.state.direction)), style);
            } else {
                let shade = if index % 2 == 0 { BODY_LIGHT } else { BODY_DARK };
                Self::paint(buf, rect, None, Style::default().bg(shade));
            }
        }
    }
}
