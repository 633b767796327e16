use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Configuration for the game, fixed for the lifetime of an engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cells along each edge of the cube (N)
    pub grid_size: usize,
    /// Seconds between simulation ticks
    pub tick_period_secs: f64,
    /// Body segments behind the head at the start of a run
    pub initial_body_length: usize,
    /// Random draws food placement may spend before giving up for a tick
    pub food_retry_budget: u32,
    /// Edge length of one cell's visual cube, in world units
    pub unit_size: f32,
    /// Empty space between neighbouring cells, in world units
    pub gap: f32,
    /// Hold the snake in place until the first heading is requested
    pub wait_for_input: bool,
    /// Seed for food placement; entropy is used when unset
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 5,
            tick_period_secs: 0.2,
            initial_body_length: 2,
            food_retry_budget: 100,
            unit_size: 1.0,
            gap: 0.25,
            wait_for_input: true,
            rng_seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Cells in one straight loop around the cube
    pub fn ring_length(&self) -> usize {
        4 * self.grid_size.saturating_sub(1)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(self.tick_period_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 2 {
            return Err(ConfigError::GridTooSmall(self.grid_size));
        }
        if self.food_retry_budget == 0 {
            return Err(ConfigError::ZeroRetryBudget);
        }
        if self.tick_period_secs <= 0.0
            || Duration::try_from_secs_f64(self.tick_period_secs).is_err()
        {
            return Err(ConfigError::InvalidTickPeriod(self.tick_period_secs));
        }
        if !self.unit_size.is_finite() || self.unit_size <= 0.0 {
            return Err(ConfigError::InvalidUnitSize(self.unit_size));
        }
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(ConfigError::InvalidGap(self.gap));
        }
        if self.initial_body_length >= self.ring_length() {
            return Err(ConfigError::InitialBodyTooLong {
                length: self.initial_body_length,
                ring: self.ring_length(),
            });
        }
        Ok(())
    }
}
