use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta, without wrapping
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move one cell in a direction, re-entering from the opposite edge
    pub fn wrapped_step(&self, direction: Direction, grid: GridSize) -> Self {
        let (dx, dy) = direction.delta();
        grid.wrap(self.moved_by(dx, dy))
    }

    pub fn manhattan(&self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Dimensions of the playing field in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub width: usize,
    pub height: usize,
}

impl GridSize {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn center(&self) -> Position {
        Position::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Check if a position is within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    /// Fold any coordinate back onto the torus
    pub fn wrap(&self, pos: Position) -> Position {
        Position::new(
            pos.x.rem_euclid(self.width as i32),
            pos.y.rem_euclid(self.height as i32),
        )
    }

    /// Row-major cell index, `None` outside the grid
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.y as usize * self.width + pos.x as usize)
    }

    pub fn position_at(&self, index: usize) -> Position {
        Position::new((index % self.width) as i32, (index / self.width) as i32)
    }

    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.area()).map(move |index| self.position_at(index))
    }
}

/// What a call to [`Snake::advance`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Head moved, tail followed
    Moved,
    /// Head moved, tail retained
    Grew,
    /// Next head landed on the body; the snake is now dead
    Collided,
    /// Snake was already dead
    Inactive,
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
    /// Length the body grows toward by keeping its tail
    pub growth_target: usize,
    pub score: u32,
    pub is_alive: bool,
    /// Last computed route from head to food, empty when unavailable
    pub hint_path: Vec<Position>,
    grid: GridSize,
    initial_length: usize,
}

impl Snake {
    /// Create a new snake with given starting position and direction.
    ///
    /// Segments are laid out behind the head and wrap across edges.
    pub fn new(head: Position, direction: Direction, length: usize, grid: GridSize) -> Self {
        let length = length.max(1);
        let mut body = vec![grid.wrap(head)];

        let back = direction.opposite();
        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.wrapped_step(back, grid));
        }

        Self {
            body,
            direction,
            growth_target: length,
            score: 0,
            is_alive: true,
            hint_path: Vec::new(),
            grid,
            initial_length: length,
        }
    }

    /// Snake in its starting configuration: centred, heading right
    pub fn spawn(grid: GridSize, length: usize) -> Self {
        Self::new(grid.center(), Direction::Right, length, grid)
    }

    pub fn reset(&mut self) {
        *self = Self::spawn(self.grid, self.initial_length);
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// All occupied cells, for use as an obstacle set
    pub fn occupied_cells(&self) -> HashSet<Position> {
        self.body.iter().copied().collect()
    }

    /// Change heading. Reversing onto the neck is silently refused.
    ///
    /// Returns whether the request was accepted.
    pub fn turn(&mut self, requested: Direction) -> bool {
        if self.body.len() > 1 && requested.is_opposite(self.direction) {
            return false;
        }
        self.direction = requested;
        true
    }

    /// Advance one cell in the current direction.
    pub fn advance(&mut self) -> MoveOutcome {
        if !self.is_alive {
            return MoveOutcome::Inactive;
        }

        let new_head = self.head().wrapped_step(self.direction, self.grid);
        if self.collides_with_body(new_head) {
            debug!(x = new_head.x, y = new_head.y, "snake ran into itself");
            self.is_alive = false;
            return MoveOutcome::Collided;
        }

        self.body.insert(0, new_head);
        if self.body.len() > self.growth_target {
            self.body.pop();
            MoveOutcome::Moved
        } else {
            MoveOutcome::Grew
        }
    }

    /// Credit an eaten food. The extra segment appears on the next advance.
    pub fn consume(&mut self, reward: u32) {
        self.score += reward;
        self.growth_target += 1;
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
