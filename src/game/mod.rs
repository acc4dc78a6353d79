//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The [`Simulation`] can be driven headless by tests or by the terminal mode.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod food;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, Intent};
pub use config::GameConfig;
pub use engine::{Simulation, Snapshot, TickInfo, TickResult};
pub use error::{ConfigError, PlacementError};
pub use food::Food;
pub use state::{GridSize, MoveOutcome, Position, Snake};
