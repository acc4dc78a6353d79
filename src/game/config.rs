use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::error::ConfigError;
use super::state::GridSize;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Score awarded per food eaten
    pub food_reward: u32,
    /// Simulation ticks per second
    pub tick_rate_hz: u32,
    /// Whether the path hint is shown when a game starts
    pub hint_enabled: bool,
    /// Random samples tried before food placement falls back to a full scan
    pub placement_attempts: usize,
    /// Fixed RNG seed; entropy is used when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 40,
            grid_height: 30,
            initial_snake_length: 3,
            food_reward: 10,
            tick_rate_hz: 10,
            hint_enabled: true,
            placement_attempts: 256,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.grid_width, self.grid_height);
        if width < 2 || height < 2 {
            return Err(ConfigError::GridTooSmall { width, height });
        }
        if width > i32::MAX as usize || height > i32::MAX as usize {
            return Err(ConfigError::GridTooLarge { width, height });
        }
        if self.tick_rate_hz == 0 || self.tick_rate_hz > 120 {
            return Err(ConfigError::InvalidTickRate(self.tick_rate_hz));
        }
        // The wrapped tail must not sit directly in front of the head
        if self.initial_snake_length == 0 || self.initial_snake_length >= width {
            return Err(ConfigError::InvalidInitialLength {
                length: self.initial_snake_length,
                width,
            });
        }
        Ok(())
    }

    pub fn grid(&self) -> GridSize {
        GridSize::new(self.grid_width, self.grid_height)
    }

    /// Time between two simulation ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.tick_rate_hz.max(1)))
    }
}
