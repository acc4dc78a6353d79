//! Grid pathfinding used for the hint overlay
//!
//! Pure functions over a bounded grid with an obstacle set. Nothing here
//! touches game state; callers pass in the snake body as obstacles.

pub mod astar;

pub use astar::search;
