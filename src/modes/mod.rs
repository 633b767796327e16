pub mod autoplay;
pub mod human;

pub use autoplay::{AutoplayConfig, AutoplayMode, Autopilot, RunEnd, RunReport};
pub use human::HumanMode;
