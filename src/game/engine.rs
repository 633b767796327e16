use std::collections::HashSet;

use tracing::{debug, info, warn};

use super::{
    config::GameConfig,
    direction::Direction,
    error::{ConfigError, SnakeError},
    food::FoodPlacer,
    grid::{CubeGrid, GridCell},
    state::{BodySegment, FoodCell, GameOutcome, GameState, HeadState, Snake, food_points},
    transition::FaceTransitions,
};

/// Notification for whatever sits around the simulation (renderer, UI, audio)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The snake moved; emitted after every committed tick
    SegmentsChanged {
        head: HeadState,
        body: Vec<BodySegment>,
    },
    /// New food was placed
    FoodRelocated(FoodCell),
    /// The run is over; emitted exactly once
    GameEnded(GameOutcome),
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No heading has been requested yet
    Waiting,
    /// The move was rejected and nothing changed
    Stalled,
    Moved { ate_food: bool, wrapped: bool },
    /// The head ran into the body
    Collided,
    /// The run had already ended before this tick
    Finished,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub outcome: TickOutcome,
    /// Whether the game has terminated
    pub terminated: bool,
    /// Notifications produced by this tick, in order
    pub events: Vec<GameEvent>,
}

impl StepResult {
    fn new(outcome: TickOutcome, state: &GameState, events: Vec<GameEvent>) -> Self {
        Self {
            outcome,
            terminated: state.status.is_terminal(),
            events,
        }
    }

    pub fn ate_food(&self) -> bool {
        matches!(self.outcome, TickOutcome::Moved { ate_food: true, .. })
    }
}

/// The game engine that handles all game logic
#[derive(Debug)]
pub struct GameEngine {
    config: GameConfig,
    grid: CubeGrid,
    transitions: FaceTransitions,
    food: FoodPlacer,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = CubeGrid::new(config.grid_size, config.unit_size, config.gap)?;
        let transitions = FaceTransitions::new(&grid);
        let food = FoodPlacer::new(&grid, config.food_retry_budget, config.rng_seed);

        Ok(Self {
            config,
            grid,
            transitions,
            food,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &CubeGrid {
        &self.grid
    }

    pub fn transitions(&self) -> &FaceTransitions {
        &self.transitions
    }

    /// Reset the game to initial state.
    ///
    /// The first food is only visible through the returned state; use
    /// [`GameEngine::reset_with_events`] when it must be announced.
    pub fn reset(&mut self) -> GameState {
        self.reset_with_events().0
    }

    /// Reset, also returning the `FoodRelocated` event for the first food
    pub fn reset_with_events(&mut self) -> (GameState, Vec<GameEvent>) {
        let snake = self.initial_snake();
        let food = self.spawn_food(&snake);
        let events = food.map(GameEvent::FoodRelocated).into_iter().collect();
        (GameState::new(snake, food, !self.config.wait_for_input), events)
    }

    /// Start a run from an explicit layout.
    ///
    /// The run is already started. Cells must lie on the surface and on the
    /// face each segment claims, no cell may be used twice, and food must sit
    /// on a free surface cell.
    pub fn restore(&self, snake: Snake, food: Option<GridCell>) -> Result<GameState, SnakeError> {
        self.check_snake(&snake)?;
        if let Some(cell) = food {
            if !self.grid.is_surface(cell) || snake.occupies(cell) {
                return Err(SnakeError::InvalidFood { cell });
            }
        }
        Ok(GameState::new(snake, food.map(|cell| FoodCell { cell }), true))
    }

    /// Execute one step of the game
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        let mut events = Vec::new();

        if state.status.is_terminal() {
            return StepResult::new(TickOutcome::Finished, state, events);
        }

        if !state.started {
            if state.pending_direction().is_none() {
                return StepResult::new(TickOutcome::Waiting, state, events);
            }
            state.started = true;
        }

        let head = state.snake.head;
        let direction = state
            .pending_direction()
            .filter(|&requested| head.accepts(requested))
            .unwrap_or(head.direction);

        let Some(landing) = self
            .transitions
            .advance(head.cell, head.normal, direction)
            .landing()
        else {
            return StepResult::new(TickOutcome::Stalled, state, events);
        };

        state.clear_pending_direction();
        state.steps += 1;

        // The tail only stays put when the snake grows, so only then is it in the way.
        let ate_food = state.food.is_some_and(|food| food.cell == landing.cell);
        if state.snake.collides_with_body(landing.cell, ate_food) {
            self.finish(state, GameOutcome::Lost, &mut events);
            return StepResult::new(TickOutcome::Collided, state, events);
        }

        state.snake.advance(landing, ate_food);
        if ate_food {
            state.foods_eaten += 1;
            state.score = state.score.saturating_add(food_points(state.foods_eaten));
            state.food = None;
        }

        events.push(GameEvent::SegmentsChanged {
            head: state.snake.head,
            body: state.snake.body.iter().copied().collect(),
        });

        let outcome = TickOutcome::Moved {
            ate_food,
            wrapped: landing.wrapped,
        };

        if state.snake.len() == self.grid.surface_count() {
            self.finish(state, GameOutcome::Won, &mut events);
            return StepResult::new(outcome, state, events);
        }

        if state.food.is_none() {
            if let Some(food) = self.spawn_food(&state.snake) {
                state.food = Some(food);
                events.push(GameEvent::FoodRelocated(food));
            }
        }

        StepResult::new(outcome, state, events)
    }

    /// Head in the middle of the +Z face heading +Y, body trailing behind it
    fn initial_snake(&self) -> Snake {
        let mid = self.grid.size() / 2;
        let head = HeadState::new(
            GridCell::new(mid, mid, self.grid.max_coord()),
            Direction::PosZ,
            Direction::PosY,
        );

        // Walk backwards from the head; the trail may wrap over an edge.
        let mut body = Vec::with_capacity(self.config.initial_body_length);
        let (mut cell, mut normal, mut heading) = (head.cell, head.normal, head.direction.opposite());
        for _ in 0..self.config.initial_body_length {
            let Some(landing) = self.transitions.advance(cell, normal, heading).landing() else {
                break;
            };
            body.push(BodySegment {
                cell: landing.cell,
                normal: landing.normal,
            });
            (cell, normal, heading) = (landing.cell, landing.normal, landing.direction);
        }

        Snake::new(head, body)
    }

    fn spawn_food(&mut self, snake: &Snake) -> Option<FoodCell> {
        match self.food.place(|cell| snake.occupies(cell)) {
            Ok(food) => {
                debug!(cell = ?food.cell, "food relocated");
                Some(food)
            }
            Err(err) => {
                warn!(%err, length = snake.len(), "food placement failed, retrying next tick");
                None
            }
        }
    }

    fn finish(&self, state: &mut GameState, outcome: GameOutcome, events: &mut Vec<GameEvent>) {
        state.status = outcome.into();
        state.clear_pending_direction();
        events.push(GameEvent::GameEnded(outcome));
        info!(
            ?outcome,
            score = state.score,
            length = state.snake.len(),
            steps = state.steps,
            "game ended"
        );
    }

    fn check_snake(&self, snake: &Snake) -> Result<(), SnakeError> {
        let capacity = self.grid.surface_count();
        if snake.len() > capacity {
            return Err(SnakeError::TooLong {
                length: snake.len(),
                capacity,
            });
        }

        let head = snake.head;
        if head.direction.is_parallel(head.normal) {
            return Err(SnakeError::NotTangent {
                direction: head.direction,
                normal: head.normal,
            });
        }

        let segments = std::iter::once(head.segment()).chain(snake.body.iter().copied());
        let mut seen = HashSet::new();
        for segment in segments {
            if !self.grid.is_surface(segment.cell) {
                return Err(SnakeError::OffSurface { cell: segment.cell });
            }
            if !self.grid.is_on_face(segment.cell, segment.normal) {
                return Err(SnakeError::OffFace {
                    cell: segment.cell,
                    normal: segment.normal,
                });
            }
            if !seen.insert(segment.cell) {
                return Err(SnakeError::Overlap { cell: segment.cell });
            }
        }
        Ok(())
    }
}
