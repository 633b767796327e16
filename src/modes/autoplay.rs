use std::cmp::Reverse;
use std::collections::{HashSet, VecDeque};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::game::{
    Direction, GameConfig, GameEngine, GameEvent, GameOutcome, GameState, GridCell, TickOutcome,
};
use crate::metrics::GameMetrics;

/// Settings for a headless batch of runs
#[derive(Debug, Clone)]
pub struct AutoplayConfig {
    pub games: u32,
    /// Runs still going after this many ticks are abandoned
    pub max_steps: u32,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            games: 10,
            max_steps: 10_000,
        }
    }
}

/// Greedy steering toward the food.
///
/// Each legal move is scored by the length of the shortest surface path from
/// where it lands to the food, routed through the wrap rules around the body.
/// Ties go to the move with the most safe follow-ups.
#[derive(Debug, Default, Clone, Copy)]
pub struct Autopilot;

impl Autopilot {
    /// Heading to request for the next tick, or `None` when every move is fatal
    pub fn choose(&self, engine: &GameEngine, state: &GameState) -> Option<Direction> {
        let head = state.snake.head;
        let food = state.food.map(|food| food.cell);

        head.normal
            .tangents()
            .into_iter()
            .filter(|&direction| !direction.is_opposite(head.direction))
            .filter_map(|direction| {
                let landing = engine
                    .transitions()
                    .advance(head.cell, head.normal, direction)
                    .landing()?;
                let grows = food == Some(landing.cell);
                if state.snake.collides_with_body(landing.cell, grows) {
                    return None;
                }
                let distance = food
                    .and_then(|food| self.path_length(engine, state, landing.cell, landing.normal, food))
                    .unwrap_or(usize::MAX);
                let exits = self.safe_exits(engine, state, landing.cell, landing.normal, landing.direction);
                Some((direction, distance, exits))
            })
            .filter(|&(_, _, exits)| exits > 0)
            .min_by_key(|&(_, distance, exits)| (distance, Reverse(exits)))
            .map(|(direction, _, _)| direction)
    }

    /// Moves needed to reach `target` from `start`, treating the body as walls
    fn path_length(
        &self,
        engine: &GameEngine,
        state: &GameState,
        start: GridCell,
        normal: Direction,
        target: GridCell,
    ) -> Option<usize> {
        let mut queue = VecDeque::from([(start, normal, 0)]);
        let mut seen = HashSet::from([(start, normal)]);

        while let Some((cell, normal, distance)) = queue.pop_front() {
            if cell == target {
                return Some(distance);
            }
            for direction in normal.tangents() {
                let Some(landing) = engine.transitions().advance(cell, normal, direction).landing()
                else {
                    continue;
                };
                if landing.cell == state.snake.head_cell()
                    || state.snake.collides_with_body(landing.cell, false)
                {
                    continue;
                }
                if seen.insert((landing.cell, landing.normal)) {
                    queue.push_back((landing.cell, landing.normal, distance + 1));
                }
            }
        }
        None
    }

    fn safe_exits(
        &self,
        engine: &GameEngine,
        state: &GameState,
        cell: GridCell,
        normal: Direction,
        heading: Direction,
    ) -> usize {
        normal
            .tangents()
            .into_iter()
            .filter(|&direction| !direction.is_opposite(heading))
            .filter_map(|direction| engine.transitions().advance(cell, normal, direction).landing())
            .filter(|landing| {
                landing.cell != state.snake.head_cell()
                    && !state.snake.collides_with_body(landing.cell, false)
            })
            .count()
    }
}

/// How one autoplayed run finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEnd {
    Finished(GameOutcome),
    TimedOut,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub end: RunEnd,
    pub score: u64,
    pub length: usize,
    pub steps: u32,
}

pub struct AutoplayMode {
    engine: GameEngine,
    pilot: Autopilot,
    config: AutoplayConfig,
    metrics: GameMetrics,
}

impl AutoplayMode {
    pub fn new(game_config: GameConfig, config: AutoplayConfig) -> Result<Self> {
        let engine = GameEngine::new(game_config).context("Invalid game configuration")?;
        Ok(Self {
            engine,
            pilot: Autopilot,
            config,
            metrics: GameMetrics::new(),
        })
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    /// Play every configured game and return one report per run
    pub fn run(&mut self) -> Vec<RunReport> {
        info!(
            games = self.config.games,
            grid_size = self.engine.config().grid_size,
            "starting autoplay"
        );

        let reports: Vec<_> = (1..=self.config.games)
            .map(|game| {
                let report = self.play_one();
                info!(
                    game,
                    end = ?report.end,
                    score = report.score,
                    length = report.length,
                    steps = report.steps,
                    "run finished"
                );
                report
            })
            .collect();

        self.metrics.update();
        info!(
            played = self.metrics.games_played,
            wins = self.metrics.wins,
            high_score = self.metrics.high_score,
            elapsed = %self.metrics.format_time(),
            "autoplay complete"
        );
        reports
    }

    fn play_one(&mut self) -> RunReport {
        let (mut state, events) = self.engine.reset_with_events();
        for event in &events {
            debug!(?event, "run reset");
        }
        let mut ticks = 0;

        let end = loop {
            if ticks >= self.config.max_steps {
                break RunEnd::TimedOut;
            }
            ticks += 1;

            let direction = self
                .pilot
                .choose(&self.engine, &state)
                .unwrap_or(state.snake.head.direction);
            state.set_pending_direction(direction);

            let result = self.engine.step(&mut state);
            if result.outcome == TickOutcome::Stalled {
                debug!(head = ?state.snake.head, "autopilot stalled");
            }
            let ended = result.events.iter().find_map(|event| match event {
                GameEvent::GameEnded(outcome) => Some(*outcome),
                _ => None,
            });
            if let Some(outcome) = ended {
                self.metrics
                    .on_game_over(outcome, state.score, state.snake.len());
                break RunEnd::Finished(outcome);
            }
        };

        RunReport {
            end,
            score: state.score,
            length: state.snake.len(),
            steps: state.steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{BodySegment, HeadState, Snake};

    fn seeded(grid_size: usize) -> GameConfig {
        GameConfig {
            rng_seed: Some(23),
            ..GameConfig::new(grid_size)
        }
    }

    #[test]
    fn test_heads_for_food() {
        let engine = GameEngine::new(seeded(5)).unwrap();
        let head = HeadState::new(GridCell::new(2, 2, 4), Direction::PosZ, Direction::PosY);
        let state = engine
            .restore(Snake::new(head, []), Some(GridCell::new(4, 2, 4)))
            .unwrap();

        assert_eq!(Autopilot.choose(&engine, &state), Some(Direction::PosX));
    }

    #[test]
    fn test_avoids_body() {
        let engine = GameEngine::new(seeded(5)).unwrap();
        let head = HeadState::new(GridCell::new(2, 2, 4), Direction::PosZ, Direction::PosY);
        let body = [(3, 2), (3, 1), (2, 1)].map(|(x, y)| BodySegment {
            cell: GridCell::new(x, y, 4),
            normal: Direction::PosZ,
        });
        let state = engine
            .restore(Snake::new(head, body), Some(GridCell::new(4, 2, 4)))
            .unwrap();

        let choice = Autopilot.choose(&engine, &state).unwrap();
        assert_ne!(choice, Direction::PosX);
        assert_ne!(choice, Direction::NegY);
    }

    #[test]
    fn test_trapped_snake_has_no_choice() {
        let engine = GameEngine::new(seeded(5)).unwrap();
        let head = HeadState::new(GridCell::new(2, 2, 4), Direction::PosZ, Direction::PosX);
        let body = [(1, 2), (1, 1), (2, 1), (3, 1), (3, 2), (3, 3), (2, 3), (1, 3), (0, 3)].map(
            |(x, y)| BodySegment {
                cell: GridCell::new(x, y, 4),
                normal: Direction::PosZ,
            },
        );
        let state = engine.restore(Snake::new(head, body), None).unwrap();

        assert_eq!(Autopilot.choose(&engine, &state), None);
    }

    #[test]
    fn test_batch_reports_every_game() {
        let config = AutoplayConfig {
            games: 3,
            max_steps: 500,
        };
        let mut mode = AutoplayMode::new(seeded(4), config).unwrap();
        let reports = mode.run();

        assert_eq!(reports.len(), 3);
        let finished = reports
            .iter()
            .filter(|report| matches!(report.end, RunEnd::Finished(_)))
            .count() as u32;
        assert_eq!(mode.metrics().games_played, finished);
        for report in &reports {
            assert!(report.steps <= 500);
            assert!(report.length >= 3);
        }
    }

    #[test]
    fn test_pilot_eats_on_small_cube() {
        let mut mode = AutoplayMode::new(
            seeded(4),
            AutoplayConfig {
                games: 1,
                max_steps: 200,
            },
        )
        .unwrap();
        let reports = mode.run();
        assert!(reports[0].score > 0);
    }
}
