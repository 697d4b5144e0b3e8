use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::{Duration, Instant};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

use crate::game::{GameSession, WorldConfig, WorldError};
use crate::input::{InputHandler, KeyAction};
use crate::render::Renderer;

/// Time between rendered frames (about 60 FPS)
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Keyboard-driven play in the terminal
pub struct HumanMode {
    config: WorldConfig,
    seed: Option<u64>,
    restarts: u64,
    session: GameSession,
    renderer: Renderer,
    input_handler: InputHandler,
    board_full: bool,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: WorldConfig, seed: Option<u64>) -> Result<Self> {
        let session = GameSession::new(&config, seed).context("Failed to start game session")?;

        Ok(Self {
            config,
            seed,
            restarts: 0,
            session,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            board_full: false,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut frame_timer = interval(FRAME_INTERVAL);
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_frame = Instant::now();

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event)?,
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                _ = frame_timer.tick() => {
                    let now = Instant::now();
                    let delta = now.duration_since(last_frame).as_secs_f32();
                    last_frame = now;

                    self.update_game(delta)?;
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.session.world(), self.board_full);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        info!(
            ticks = self.session.world().ticks(),
            segments = self.session.world().segment_count(),
            "session ended"
        );
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            match self.input_handler.handle_key_event(key) {
                KeyAction::Turn(direction) => {
                    self.session.request_direction(direction);
                }
                KeyAction::Restart => self.reset_game()?,
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn update_game(&mut self, delta_secs: f32) -> Result<()> {
        if self.board_full {
            return Ok(());
        }

        match self.session.frame(delta_secs) {
            Ok(_) => Ok(()),
            Err(WorldError::InfeasiblePlacement { occupied, .. }) => {
                warn!(occupied, "board is full, stopping the simulation");
                self.board_full = true;
                Ok(())
            }
            Err(err) => Err(err).context("Failed to advance game"),
        }
    }

    fn reset_game(&mut self) -> Result<()> {
        self.restarts += 1;
        let seed = self.seed.map(|seed| seed.wrapping_add(self.restarts));
        self.session =
            GameSession::new(&self.config, seed).context("Failed to restart game session")?;
        self.board_full = false;
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
