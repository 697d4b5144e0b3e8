use thiserror::Error;

use super::state::Position;

/// Misconfiguration detected while building a world or clock
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid must be at least 1x1 cells, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("grid extent {extent} does not fit in a cell coordinate")]
    GridTooLarge { extent: usize },

    #[error("cell size must be positive")]
    ZeroCellSize,

    #[error("window of {width_px}x{height_px} px holds no {cell_size} px cell")]
    WindowTooSmall {
        width_px: u32,
        height_px: u32,
        cell_size: u32,
    },

    #[error("tick interval must be a positive number of seconds, got {0}")]
    InvalidTickInterval(f32),

    #[error("start cell ({}, {}) lies outside the {width}x{height} grid", .start.x, .start.y)]
    StartOutsideGrid {
        start: Position,
        width: usize,
        height: usize,
    },

    #[error("food placement needs at least one sampling attempt")]
    ZeroPlacementAttempts,
}

/// Runtime conditions surfaced by the world
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorldError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("no free cell for food on the {width}x{height} grid ({occupied} cells occupied)")]
    InfeasiblePlacement {
        width: usize,
        height: usize,
        occupied: usize,
    },
}
