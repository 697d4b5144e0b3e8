//! Core simulation for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! A [`GameSession`] feeds frame time to a [`SimulationClock`] and steps the
//! [`SnakeWorld`] once per fired tick.

pub mod action;
pub mod clock;
pub mod config;
pub mod error;
pub mod session;
pub mod state;
pub mod world;

// Re-export commonly used types
pub use action::{Direction, TurnVerdict};
pub use clock::{SimulationClock, DEFAULT_TICK_INTERVAL};
pub use config::{FoodPlacement, WorldConfig};
pub use error::{ConfigError, WorldError};
pub use session::{FrameReport, GameSession};
pub use state::{Grid, Position, Snake};
pub use world::{SnakeWorld, StepOutcome};
