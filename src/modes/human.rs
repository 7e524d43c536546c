use std::io::stderr;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::{Stream, StreamExt};
use rand::Rng;
use rand::rngs::ThreadRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::audio::{AudioSink, Muted, TerminalBell};
use crate::game::{GameConfig, GameEngine, Grid, Phase};
use crate::input::{Command, InputRouter};
use crate::metrics::GameMetrics;
use crate::render::{RenderSurface, Renderer, Scene, SurfaceGeometry, TerminalSurface};
use crate::scheduler::TickScheduler;

/// Interactive play: wires input, the tick timer and the collaborators to the engine
pub struct HumanMode<S: RenderSurface, A: AudioSink, R: Rng = ThreadRng> {
    engine: GameEngine<R>,
    scheduler: TickScheduler,
    router: InputRouter,
    surface: S,
    audio: A,
    metrics: GameMetrics,
    geometry: SurfaceGeometry,
    should_quit: bool,
}

impl<S: RenderSurface, A: AudioSink> HumanMode<S, A> {
    pub fn new(config: GameConfig, surface: S, audio: A) -> Result<Self> {
        let columns = config.columns as usize;
        let engine = GameEngine::new(config, Grid::new(columns, columns));
        Self::with_engine(engine, surface, audio)
    }
}

impl<S: RenderSurface, A: AudioSink, R: Rng> HumanMode<S, A, R> {
    pub fn with_engine(engine: GameEngine<R>, surface: S, audio: A) -> Result<Self> {
        let router = InputRouter::new(0.0, engine.config().swipe_cooldown());

        let mut mode = Self {
            engine,
            scheduler: TickScheduler::new(),
            router,
            surface,
            audio,
            metrics: GameMetrics::new(),
            geometry: SurfaceGeometry::default(),
            should_quit: false,
        };
        mode.relayout()?;

        Ok(mode)
    }

    pub fn engine(&self) -> &GameEngine<R> {
        &self.engine
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Drive the game until quit or until `events` runs dry
    pub async fn run_loop<E>(&mut self, mut events: E) -> Result<()>
    where
        E: Stream<Item = std::io::Result<Event>> + Unpin,
    {
        self.redraw()?;

        // keeps the run clock in the header moving between ticks
        let mut clock = interval(Duration::from_secs(1));

        loop {
            tokio::select! {
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event, Instant::now())?,
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => break,
                    }
                }

                _ = self.scheduler.tick() => {
                    self.on_tick()?;
                }

                _ = clock.tick() => {
                    if self.engine.state().is_running() {
                        self.redraw()?;
                    }
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    pub fn handle_event(&mut self, event: Event, now: Instant) -> Result<()> {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return Ok(());
                }
                if let Some(command) = self.router.route_key(key, self.engine.phase()) {
                    self.apply(command)?;
                }
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse, now)?,
            Event::Resize(width, height) => {
                debug!(width, height, "terminal resized");
                self.relayout()?;
                self.redraw()?;
            }
            _ => {}
        }

        Ok(())
    }

    /// One scheduled tick: advance the engine and notify the collaborators
    pub fn on_tick(&mut self) -> Result<()> {
        let result = self.engine.tick();

        if result.ended() {
            self.scheduler.stop();
            self.audio.play_game_over();
            self.metrics.on_game_over(self.engine.state().score);
            return self.redraw();
        }

        if !result.moved {
            return Ok(());
        }

        if result.ate_food {
            self.audio.play_eat();
            self.metrics.on_food_eaten();
        }

        if let Some(period) = result.new_interval {
            self.scheduler.reschedule(period);
        }

        self.redraw()
    }

    /// Draw the current state, with the game-over overlay once the game has ended.
    /// A running game stays visible as long as the board can show every cell.
    pub fn redraw(&mut self) -> Result<()> {
        self.metrics.update();

        let too_small = !self.board_fits()
            || (!self.engine.state().is_running() && !self.engine.start_layout_fits());

        let state = self.engine.state();
        let scene = Scene {
            state,
            metrics: &self.metrics,
        };

        if too_small {
            return self.surface.draw_too_small(&scene);
        }

        match state.phase {
            Phase::Ended => self.surface.draw_game_over(&scene, state.score),
            Phase::Idle | Phase::Running => self.surface.draw(&scene),
        }
    }

    fn board_fits(&self) -> bool {
        self.geometry.holds_grid(self.engine.config().columns)
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) -> Result<()> {
        let point = self.geometry.to_surface(mouse.column, mouse.row);

        let command = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let on_surface = self.geometry.contains(mouse.column, mouse.row);
                self.router
                    .pointer_down(point, on_surface, self.engine.phase())
            }
            MouseEventKind::Up(MouseButton::Left) => self.router.pointer_up(point, now),
            _ => None,
        };

        if let Some(command) = command {
            self.apply(command)?;
        }
        Ok(())
    }

    fn apply(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Turn(direction) => {
                self.engine.request_direction(direction);
            }
            Command::Start => self.start_game()?,
            Command::Quit => self.should_quit = true,
        }
        Ok(())
    }

    fn start_game(&mut self) -> Result<()> {
        // pick up any size change before laying out the new snake
        self.relayout()?;

        if !self.board_fits() || !self.engine.start_layout_fits() {
            warn!(
                board = ?self.geometry.board,
                grid = ?self.engine.state().grid,
                "surface too small to start a game"
            );
            return self.redraw();
        }

        let period = self.engine.start();
        self.scheduler.start(period);
        self.metrics.on_game_start();

        self.redraw()
    }

    /// Re-derive the grid and swipe threshold from the surface size
    fn relayout(&mut self) -> Result<()> {
        self.geometry = self.surface.geometry()?;

        let config = self.engine.config();
        let columns = config.columns;
        let threshold = config.swipe_min_cells * self.geometry.viewport.cell_size(columns);

        self.engine
            .resize(Grid::from_viewport(self.geometry.viewport, columns));
        self.router.set_swipe_threshold(threshold);
        Ok(())
    }
}

/// Take over the terminal, play until the user quits, then put the terminal back
pub async fn run(config: GameConfig) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    let result = play(config).await;

    restore_terminal()?;
    result
}

async fn play(config: GameConfig) -> Result<()> {
    let mut stderr = stderr();
    execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    terminal.clear().context("Failed to clear terminal")?;

    let surface = TerminalSurface::new(terminal, Renderer::from_config(&config));
    let audio: Box<dyn AudioSink> = if config.sound {
        Box::new(TerminalBell::new(std::io::stderr()))
    } else {
        Box::new(Muted)
    };

    info!(?config, "starting snake");

    let mut mode = HumanMode::new(config, surface, audio)?;
    mode.run_loop(EventStream::new()).await
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    let mut stderr = stderr();
    execute!(stderr, LeaveAlternateScreen, DisableMouseCapture, Show)
        .context("Failed to leave alternate screen")?;
    Ok(())
}
