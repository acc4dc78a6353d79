use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use super::error::PlacementError;
use super::state::{GridSize, Position};

/// The single food cell the snake is chasing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
    grid: GridSize,
    max_attempts: usize,
}

impl Food {
    pub fn new(position: Position, grid: GridSize, max_attempts: usize) -> Self {
        Self {
            position: grid.wrap(position),
            grid,
            max_attempts,
        }
    }

    /// Move the food to a uniformly random free cell.
    ///
    /// Sampling is capped at `max_attempts`; after that the free cells are
    /// enumerated and one is chosen directly. The position is left untouched
    /// when the obstacles cover the whole grid.
    pub fn randomize<R: Rng>(
        &mut self,
        obstacles: &HashSet<Position>,
        rng: &mut R,
    ) -> Result<Position, PlacementError> {
        for _ in 0..self.max_attempts {
            let candidate = Position::new(
                rng.gen_range(0..self.grid.width) as i32,
                rng.gen_range(0..self.grid.height) as i32,
            );
            if !obstacles.contains(&candidate) {
                self.position = candidate;
                return Ok(candidate);
            }
        }

        let free: Vec<Position> = self
            .grid
            .cells()
            .filter(|cell| !obstacles.contains(cell))
            .collect();
        let chosen = *free.choose(rng).ok_or(PlacementError::GridFull)?;
        self.position = chosen;
        Ok(chosen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_randomize_avoids_obstacles() {
        let grid = GridSize::new(6, 6);
        let mut rng = StdRng::seed_from_u64(42);
        let obstacles: HashSet<Position> = grid.cells().filter(|p| p.x < 5).collect();
        let mut food = Food::new(Position::new(0, 0), grid, 64);

        for _ in 0..50 {
            let pos = food.randomize(&obstacles, &mut rng).unwrap();
            assert!(!obstacles.contains(&pos));
            assert_eq!(pos, food.position);
            assert!(grid.contains(pos));
        }
    }

    #[test]
    fn test_scan_fallback_finds_last_free_cell() {
        let grid = GridSize::new(5, 5);
        let hole = Position::new(3, 1);
        let obstacles: HashSet<Position> = grid.cells().filter(|p| *p != hole).collect();
        let mut rng = StdRng::seed_from_u64(1);
        // Zero attempts forces the enumeration path.
        let mut food = Food::new(Position::new(0, 0), grid, 0);

        assert_eq!(food.randomize(&obstacles, &mut rng), Ok(hole));
        assert_eq!(food.position, hole);
    }

    #[test]
    fn test_full_grid_reports_grid_full() {
        let grid = GridSize::new(3, 3);
        let obstacles: HashSet<Position> = grid.cells().collect();
        let mut rng = StdRng::seed_from_u64(9);
        let mut food = Food::new(Position::new(2, 2), grid, 16);

        assert_eq!(
            food.randomize(&obstacles, &mut rng),
            Err(PlacementError::GridFull)
        );
        assert_eq!(food.position, Position::new(2, 2));
    }
}
