//! Cube Snake - snake on the six faces of a voxel cube
//!
//! This library provides:
//! - Core game logic (game module): lattice, face wrapping, body and collisions, food
//! - Terminal input translation (input module)
//! - TUI rendering of the face under the head (render module)
//! - Session metrics (metrics module)
//! - Execution modes (human, autoplay)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
