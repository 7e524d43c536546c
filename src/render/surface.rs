use anyhow::{Context, Result};
use ratatui::{Terminal, backend::Backend, layout::Rect};

use super::{Overlay, RenderSurface, Renderer, Scene, SurfaceGeometry};

/// A ratatui terminal acting as the play surface
pub struct TerminalSurface<B: Backend> {
    terminal: Terminal<B>,
    renderer: Renderer,
}

impl<B: Backend> TerminalSurface<B> {
    pub fn new(terminal: Terminal<B>, renderer: Renderer) -> Self {
        Self { terminal, renderer }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    fn draw_with(&mut self, scene: &Scene<'_>, overlay: Overlay) -> Result<()> {
        let renderer = &self.renderer;
        self.terminal
            .draw(|frame| renderer.render(frame, scene, overlay))
            .context("Failed to draw frame")?;
        Ok(())
    }
}

impl<B: Backend> RenderSurface for TerminalSurface<B> {
    fn geometry(&mut self) -> Result<SurfaceGeometry> {
        let size = self
            .terminal
            .size()
            .context("Failed to query terminal size")?;
        Ok(self
            .renderer
            .geometry(Rect::new(0, 0, size.width, size.height)))
    }

    fn draw(&mut self, scene: &Scene<'_>) -> Result<()> {
        self.draw_with(scene, Overlay::None)
    }

    fn draw_game_over(&mut self, scene: &Scene<'_>, final_score: u32) -> Result<()> {
        self.draw_with(scene, Overlay::GameOver { final_score })
    }

    fn draw_too_small(&mut self, scene: &Scene<'_>) -> Result<()> {
        self.draw_with(scene, Overlay::TooSmall)
    }
}
