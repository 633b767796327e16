use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::{GameConfig, GameEngine, GameEvent, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let mut engine = GameEngine::new(config).context("Invalid game configuration")?;
        let state = engine.reset();

        Ok(Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
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

        let result = self.run_game_loop(&mut terminal).await;

        // Restore the terminal even when the loop failed
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.engine.config().tick_period());

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = tick_timer.tick() => {
                    self.update_game();
                }

                _ = render_timer.tick() => {
                    if self.state.is_running() && self.state.started {
                        self.metrics.update();
                    }
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.engine.grid(), &self.state, &self.metrics);
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

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }
            let action = self.input_handler.handle_key_event(key);
            self.apply(action);
        }
    }

    fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Turn(turn) => {
                // Screen directions are read against the face currently shown
                let direction = turn.to_world(self.state.snake.head.normal);
                self.state.set_pending_direction(direction);
            }
            KeyAction::Restart => self.reset_game(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        let was_started = self.state.started;
        let result = self.engine.step(&mut self.state);

        // The clock runs from the first accepted heading, not from the reset
        if !was_started && self.state.started {
            self.metrics.on_game_start();
        }

        for event in &result.events {
            if let GameEvent::GameEnded(outcome) = event {
                self.metrics
                    .on_game_over(*outcome, self.state.score, self.state.snake.len());
            }
        }
    }

    fn reset_game(&mut self) {
        self.state = self.engine.reset();
        self.metrics.on_game_start();
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{BodySegment, Direction, GameStatus, GridCell, HeadState, Snake};
    use crate::input::ScreenDirection;
    use std::time::Instant;

    fn seeded() -> GameConfig {
        GameConfig {
            rng_seed: Some(5),
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_game_initialization() {
        let mode = HumanMode::new(seeded()).unwrap();
        assert!(mode.state.is_running());
        assert!(!mode.state.started);
        assert_eq!(mode.state.score, 0);
    }

    #[test]
    fn test_invalid_config_is_reported() {
        assert!(HumanMode::new(GameConfig::new(1)).is_err());
    }

    #[test]
    fn test_waits_for_first_key() {
        let mut mode = HumanMode::new(seeded()).unwrap();
        let head = mode.state.snake.head_cell();

        mode.update_game();
        assert_eq!(mode.state.snake.head_cell(), head);

        mode.apply(KeyAction::Turn(ScreenDirection::Right));
        assert_eq!(mode.state.pending_direction(), Some(Direction::PosX));
        mode.update_game();
        assert_eq!(mode.state.snake.head_cell(), GridCell::new(3, 2, 4));
    }

    #[test]
    fn test_reverse_key_is_ignored() {
        let mut mode = HumanMode::new(seeded()).unwrap();
        // Initial heading is +Y, shown as up on the front face
        mode.apply(KeyAction::Turn(ScreenDirection::Down));
        assert_eq!(mode.state.pending_direction(), None);
    }

    #[test]
    fn test_game_reset() {
        let mut mode = HumanMode::new(seeded()).unwrap();
        mode.state.score = 10;
        mode.state.status = GameStatus::Lost;
        mode.apply(KeyAction::Restart);
        assert_eq!(mode.state.score, 0);
        assert!(mode.state.is_running());
    }

    #[test]
    fn test_collision_is_recorded_once() {
        let mut mode = HumanMode::new(seeded()).unwrap();
        // Head boxed in by its own body; moving on hits the segment at (3,2,4)
        let head = HeadState::new(GridCell::new(2, 2, 4), Direction::PosZ, Direction::PosX);
        let body = [(1, 2), (1, 1), (2, 1), (3, 1), (3, 2), (3, 3)].map(|(x, y)| BodySegment {
            cell: GridCell::new(x, y, 4),
            normal: Direction::PosZ,
        });
        mode.state = mode.engine.restore(Snake::new(head, body), None).unwrap();

        mode.update_game();
        assert_eq!(mode.state.status, GameStatus::Lost);
        assert_eq!(mode.metrics.games_played, 1);
        assert_eq!(mode.metrics.longest_snake, 7);

        mode.update_game();
        assert_eq!(mode.metrics.games_played, 1);
    }

    #[test]
    fn test_clock_starts_with_first_move() {
        let mut mode = HumanMode::new(seeded()).unwrap();
        mode.metrics.start_time = Instant::now()
            .checked_sub(Duration::from_secs(30))
            .unwrap();

        // Idle ticks before the first key leave the clock alone
        mode.update_game();
        mode.metrics.update();
        assert!(mode.metrics.elapsed_time >= Duration::from_secs(30));

        mode.apply(KeyAction::Turn(ScreenDirection::Up));
        mode.update_game();
        mode.metrics.update();
        assert!(mode.metrics.elapsed_time < Duration::from_secs(5));
    }

    #[test]
    fn test_quit_key() {
        let mut mode = HumanMode::new(seeded()).unwrap();
        mode.apply(KeyAction::Quit);
        assert!(mode.should_quit);
    }
}
