use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::direction::{Direction, FaceNormal};
use super::grid::GridCell;
use super::transition::Landing;

/// Where the head is, which face it stands on and where it last moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeadState {
    pub cell: GridCell,
    pub normal: FaceNormal,
    /// Last committed heading
    pub direction: Direction,
}

impl HeadState {
    pub fn new(cell: GridCell, normal: FaceNormal, direction: Direction) -> Self {
        Self {
            cell,
            normal,
            direction,
        }
    }

    /// Check if the head may be steered toward `requested`.
    ///
    /// A heading must run along the current face and must not reverse the
    /// last committed one.
    pub fn accepts(&self, requested: Direction) -> bool {
        !requested.is_parallel(self.normal) && !requested.is_opposite(self.direction)
    }

    /// Snapshot of this head as a body segment
    pub fn segment(&self) -> BodySegment {
        BodySegment {
            cell: self.cell,
            normal: self.normal,
        }
    }
}

/// A cell the head has vacated, with the face it was on at the time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodySegment {
    pub cell: GridCell,
    pub normal: FaceNormal,
}

/// The single live food item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FoodCell {
    pub cell: GridCell,
}

/// The snake on the cube
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    pub head: HeadState,
    /// Body segments, most recently vacated first, tail last
    pub body: VecDeque<BodySegment>,
}

impl Snake {
    pub fn new(head: HeadState, body: impl IntoIterator<Item = BodySegment>) -> Self {
        Self {
            head,
            body: body.into_iter().collect(),
        }
    }

    pub fn head_cell(&self) -> GridCell {
        self.head.cell
    }

    /// The segment dropped on the next non-growing move
    pub fn tail(&self) -> Option<&BodySegment> {
        self.body.back()
    }

    /// Check if `cell` is covered by a body segment.
    ///
    /// With `include_tail` false the tail is ignored, since it moves out of
    /// the way on a tick that does not grow the snake.
    pub fn collides_with_body(&self, cell: GridCell, include_tail: bool) -> bool {
        let hazards = if include_tail {
            self.body.len()
        } else {
            self.body.len().saturating_sub(1)
        };
        self.body.iter().take(hazards).any(|segment| segment.cell == cell)
    }

    /// Check if `cell` is covered by the head or any body segment
    pub fn occupies(&self, cell: GridCell) -> bool {
        self.head.cell == cell || self.body.iter().any(|segment| segment.cell == cell)
    }

    /// Move the head to `landing`, growing instead of dropping the tail if asked
    pub fn advance(&mut self, landing: Landing, grow: bool) {
        self.body.push_front(self.head.segment());
        if !grow {
            self.body.pop_back();
        }
        self.head = HeadState::new(landing.cell, landing.normal, landing.direction);
    }

    /// Number of occupied cells, head included
    pub fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// Always false: a snake has at least its head
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Every occupied cell, head first
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        std::iter::once(self.head.cell).chain(self.body.iter().map(|segment| segment.cell))
    }
}

/// How a finished run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// The snake covers every surface cell
    Won,
    /// The head ran into the body
    Lost,
}

/// Lifecycle of a run; both non-running states are final
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Running,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Running)
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        match self {
            GameStatus::Running => None,
            GameStatus::Won => Some(GameOutcome::Won),
            GameStatus::Lost => Some(GameOutcome::Lost),
        }
    }
}

impl From<GameOutcome> for GameStatus {
    fn from(outcome: GameOutcome) -> Self {
        match outcome {
            GameOutcome::Won => GameStatus::Won,
            GameOutcome::Lost => GameStatus::Lost,
        }
    }
}

/// Points for the `nth` food eaten (1-based): 1, 1, 2, 3, 5, 8, ...
pub fn food_points(nth: u32) -> u64 {
    let (mut a, mut b) = (0u64, 1u64);
    for _ in 1..nth {
        let next = a.saturating_add(b);
        a = b;
        b = next;
    }
    if nth == 0 { 0 } else { b }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Option<FoodCell>,
    pub status: GameStatus,
    pub score: u64,
    pub foods_eaten: u32,
    pub steps: u32,
    /// False until the first heading is requested, when the run waits for input
    pub started: bool,
    pending_direction: Option<Direction>,
}

impl GameState {
    pub fn new(snake: Snake, food: Option<FoodCell>, started: bool) -> Self {
        Self {
            snake,
            food,
            status: GameStatus::Running,
            score: 0,
            foods_eaten: 0,
            steps: 0,
            started,
            pending_direction: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    /// Queue a heading for the next tick; the last accepted request wins.
    ///
    /// Requests that would turn into or out of the surface, or reverse the
    /// last committed heading, are ignored and the previously queued heading
    /// stays. Returns whether the request was accepted.
    pub fn set_pending_direction(&mut self, direction: Direction) -> bool {
        if !self.is_running() || !self.snake.head.accepts(direction) {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub(crate) fn clear_pending_direction(&mut self) {
        self.pending_direction = None;
    }

    /// Check if a cell is occupied by the snake
    pub fn is_occupied_by_snake(&self, cell: GridCell) -> bool {
        self.snake.occupies(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(x: i32, y: i32, z: i32) -> BodySegment {
        BodySegment {
            cell: GridCell::new(x, y, z),
            normal: Direction::PosZ,
        }
    }

    fn straight_snake() -> Snake {
        let head = HeadState::new(GridCell::new(3, 2, 4), Direction::PosZ, Direction::PosX);
        Snake::new(head, [segment(2, 2, 4), segment(1, 2, 4), segment(0, 2, 4)])
    }

    #[test]
    fn test_heading_validation() {
        let head = HeadState::new(GridCell::new(2, 2, 4), Direction::PosZ, Direction::PosX);
        assert!(head.accepts(Direction::PosX));
        assert!(head.accepts(Direction::PosY));
        assert!(head.accepts(Direction::NegY));
        assert!(!head.accepts(Direction::NegX)); // reversal
        assert!(!head.accepts(Direction::PosZ)); // off the surface
        assert!(!head.accepts(Direction::NegZ)); // into the cube
    }

    #[test]
    fn test_snake_movement() {
        let mut snake = straight_snake();
        let landing = Landing {
            cell: GridCell::new(4, 2, 4),
            direction: Direction::PosX,
            normal: Direction::PosZ,
            wrapped: false,
        };

        snake.advance(landing, false);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head_cell(), GridCell::new(4, 2, 4));
        assert_eq!(snake.body[0].cell, GridCell::new(3, 2, 4));
        assert_eq!(snake.tail().unwrap().cell, GridCell::new(1, 2, 4));

        let landing = Landing {
            cell: GridCell::new(4, 3, 4),
            direction: Direction::PosY,
            ..landing
        };
        snake.advance(landing, true);
        assert_eq!(snake.len(), 5);
        assert_eq!(snake.head.direction, Direction::PosY);
        assert_eq!(snake.tail().unwrap().cell, GridCell::new(1, 2, 4));
    }

    #[test]
    fn test_headless_body_moves_without_trail() {
        let head = HeadState::new(GridCell::new(2, 2, 4), Direction::PosZ, Direction::PosX);
        let mut snake = Snake::new(head, []);
        let landing = Landing {
            cell: GridCell::new(3, 2, 4),
            direction: Direction::PosX,
            normal: Direction::PosZ,
            wrapped: false,
        };
        snake.advance(landing, false);
        assert_eq!(snake.len(), 1);
        assert!(snake.tail().is_none());
    }

    #[test]
    fn test_collision_detection() {
        let snake = straight_snake();
        assert!(!snake.collides_with_body(GridCell::new(3, 2, 4), true)); // head
        assert!(snake.collides_with_body(GridCell::new(2, 2, 4), false));
        assert!(!snake.collides_with_body(GridCell::new(0, 2, 4), false)); // tail moves away
        assert!(snake.collides_with_body(GridCell::new(0, 2, 4), true)); // unless it stays
        assert!(!snake.collides_with_body(GridCell::new(4, 4, 4), true));
    }

    #[test]
    fn test_occupancy() {
        let snake = straight_snake();
        let cells: Vec<_> = snake.cells().collect();
        assert_eq!(cells.len(), 4);
        assert!(cells.iter().all(|&cell| snake.occupies(cell)));
        assert!(!snake.occupies(GridCell::new(0, 0, 4)));
    }

    #[test]
    fn test_food_points_follow_fibonacci() {
        let points: Vec<_> = (1..=8).map(food_points).collect();
        assert_eq!(points, vec![1, 1, 2, 3, 5, 8, 13, 21]);
        assert_eq!(food_points(0), 0);
        assert_eq!(food_points(200), u64::MAX);
    }

    #[test]
    fn test_pending_direction_last_valid_wins() {
        let mut state = GameState::new(straight_snake(), None, true);
        assert!(state.set_pending_direction(Direction::PosY));
        assert!(!state.set_pending_direction(Direction::NegX));
        assert_eq!(state.pending_direction(), Some(Direction::PosY));
        assert!(state.set_pending_direction(Direction::NegY));
        assert_eq!(state.pending_direction(), Some(Direction::NegY));
    }

    #[test]
    fn test_terminal_state_ignores_input() {
        let mut state = GameState::new(straight_snake(), None, true);
        state.status = GameStatus::Lost;
        assert!(!state.set_pending_direction(Direction::PosY));
        assert_eq!(state.pending_direction(), None);
        assert_eq!(state.status.outcome(), Some(GameOutcome::Lost));
    }
}
