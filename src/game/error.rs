use thiserror::Error;

use super::direction::Direction;
use super::grid::GridCell;

/// Errors raised while validating a [`GameConfig`](super::GameConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid size must be at least 2, got {0}")]
    GridTooSmall(usize),
    #[error("grid size {0} does not fit lattice coordinates")]
    GridTooLarge(usize),
    #[error("food retry budget must be at least 1")]
    ZeroRetryBudget,
    #[error("tick period must be a positive number of seconds, got {0}")]
    InvalidTickPeriod(f64),
    #[error("unit size must be positive, got {0}")]
    InvalidUnitSize(f32),
    #[error("gap must be non-negative, got {0}")]
    InvalidGap(f32),
    #[error("initial body length {length} does not fit a {ring}-cell ring around the cube")]
    InitialBodyTooLong { length: usize, ring: usize },
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised when assembling a snake from explicit parts.
#[derive(Debug, Error)]
pub enum SnakeError {
    #[error("cell {cell:?} is not on the cube surface")]
    OffSurface { cell: GridCell },
    #[error("cell {cell:?} does not lie on the face with normal {normal:?}")]
    OffFace { cell: GridCell, normal: Direction },
    #[error("heading {direction:?} is not tangent to the face with normal {normal:?}")]
    NotTangent { direction: Direction, normal: Direction },
    #[error("cell {cell:?} is occupied more than once")]
    Overlap { cell: GridCell },
    #[error("snake of length {length} does not fit {capacity} surface cells")]
    TooLong { length: usize, capacity: usize },
    #[error("food at {cell:?} is not a free surface cell")]
    InvalidFood { cell: GridCell },
}

/// Food placement could not find a free surface cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("no free surface cell found after {attempts} attempts")]
    Exhausted { attempts: u32 },
}
