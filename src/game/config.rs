use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::clock::{SimulationClock, DEFAULT_TICK_INTERVAL};
use super::error::ConfigError;
use super::state::{Grid, Position};

/// Which cells food may not be placed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FoodPlacement {
    /// Only the head cell is off limits; food may land under the body
    #[default]
    AvoidHead,
    /// Neither the head nor any body segment may hold food
    AvoidSnake,
}

/// Configuration for the world, fixed for the lifetime of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Width of the game grid, in cells
    pub grid_width: usize,
    /// Height of the game grid, in cells
    pub grid_height: usize,
    /// Size of one cell in pixels, used when deriving extents from a window
    pub cell_size: u32,
    /// Seconds between simulation ticks
    pub tick_interval_secs: f32,
    /// Cell the head starts on
    pub start: Position,
    /// Initial heading
    pub start_direction: Direction,
    pub food_placement: FoodPlacement,
    /// Random draws tried before falling back to picking among free cells
    pub max_placement_attempts: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        // A 1024x720 window split into 32 px cells
        Self {
            grid_width: 32,
            grid_height: 22,
            cell_size: 32,
            tick_interval_secs: DEFAULT_TICK_INTERVAL,
            start: Position::new(0, 0),
            start_direction: Direction::Right,
            food_placement: FoodPlacement::AvoidHead,
            max_placement_attempts: 1024,
        }
    }
}

impl WorldConfig {
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

    /// Derive grid extents from a window size in pixels. Partial cells at the
    /// right and bottom edges are dropped.
    pub fn from_pixels(width_px: u32, height_px: u32, cell_size: u32) -> Result<Self, ConfigError> {
        if cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        let width = (width_px / cell_size) as usize;
        let height = (height_px / cell_size) as usize;
        if width == 0 || height == 0 {
            return Err(ConfigError::WindowTooSmall {
                width_px,
                height_px,
                cell_size,
            });
        }

        Ok(Self {
            grid_width: width,
            grid_height: height,
            cell_size,
            ..Default::default()
        })
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: WorldConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }

    /// Check every field, returning the grid on success
    pub fn validate(&self) -> Result<Grid, ConfigError> {
        let grid = Grid::new(self.grid_width, self.grid_height)?;

        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        SimulationClock::new(self.tick_interval_secs)?;
        if !grid.contains(self.start) {
            return Err(ConfigError::StartOutsideGrid {
                start: self.start,
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.max_placement_attempts == 0 {
            return Err(ConfigError::ZeroPlacementAttempts);
        }

        Ok(grid)
    }
}
