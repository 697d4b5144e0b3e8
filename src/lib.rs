//! Grid Snake - a fixed-tick snake simulation on a wrap-around grid
//!
//! This library provides:
//! - The simulation core (game module): clock, world, session
//! - Keyboard input mapping (input module)
//! - TUI rendering (render module)
//! - The interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod modes;
pub mod render;
