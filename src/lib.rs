//! Path Snake - a terminal Snake game with an A* path hint
//!
//! This library provides:
//! - Core game logic on a toroidal grid (game module)
//! - A* search used for the hint overlay (pathfinding module)
//! - TUI rendering, keyboard input and session metrics
//! - The interactive terminal mode

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod pathfinding;
pub mod render;
