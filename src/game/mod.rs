//! Core game logic for snake on a cube
//!
//! This module contains all the game logic without any I/O or rendering dependencies:
//! the cube lattice, movement and edge wrapping across faces, the snake body and
//! its collision rules, and food placement.

pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod food;
pub mod grid;
pub mod state;
pub mod transition;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::{Axis, Direction, FaceNormal};
pub use engine::{GameEngine, GameEvent, StepResult, TickOutcome};
pub use error::{ConfigError, PlacementError, SnakeError};
pub use food::FoodPlacer;
pub use grid::{CubeGrid, GridCell, LatticeBounds};
pub use state::{
    BodySegment, FoodCell, GameOutcome, GameState, GameStatus, HeadState, Snake, food_points,
};
pub use transition::{FaceTransitions, Landing, Transition, WRAP_TABLE, WrapRule};
