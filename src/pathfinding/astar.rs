use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use crate::game::{Direction, GridSize, Position};

/// A node discovered during one search; lives in the per-call arena.
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    position: Position,
    parent: Option<usize>,
    g: u32,
    h: u32,
}

impl SearchNode {
    fn f(&self) -> u32 {
        self.g + self.h
    }
}

/// Frontier ordering: lowest `f` first, then earliest push.
type FrontierKey = Reverse<(u32, u64, usize)>;

/// Shortest 4-connected path from `start` to `goal`, avoiding `obstacles`.
///
/// The result includes both endpoints, so a path of `n` steps has `n + 1`
/// cells; `[start]` when `start == goal`, and empty when the goal cannot be
/// reached. The start cell is always traversable and the goal is never
/// treated as an obstacle.
///
/// Neighbours do not wrap around the grid edges, even though the snake itself
/// moves on a torus. Routes found here are valid but may be longer than a
/// route through an edge.
pub fn search(
    start: Position,
    goal: Position,
    obstacles: &HashSet<Position>,
    grid: GridSize,
) -> Vec<Position> {
    if !grid.contains(start) || !grid.contains(goal) {
        return Vec::new();
    }

    let mut arena: Vec<SearchNode> = Vec::with_capacity(grid.area());
    let mut closed = vec![false; grid.area()];
    let mut frontier: BinaryHeap<FrontierKey> = BinaryHeap::new();
    let mut sequence: u64 = 0;

    arena.push(SearchNode {
        position: start,
        parent: None,
        g: 0,
        h: start.manhattan(goal),
    });
    frontier.push(Reverse((arena[0].f(), sequence, 0)));

    while let Some(Reverse((_, _, node_index))) = frontier.pop() {
        let current = arena[node_index];
        if current.position == goal {
            return backtrack(&arena, node_index);
        }

        let Some(cell) = grid.index_of(current.position) else {
            continue;
        };
        if closed[cell] {
            continue;
        }
        closed[cell] = true;

        for direction in Direction::ALL {
            let (dx, dy) = direction.delta();
            let next = current.position.moved_by(dx, dy);
            let Some(next_cell) = grid.index_of(next) else {
                continue;
            };
            if closed[next_cell] || (next != goal && obstacles.contains(&next)) {
                continue;
            }

            let node = SearchNode {
                position: next,
                parent: Some(node_index),
                g: current.g + 1,
                h: next.manhattan(goal),
            };
            sequence += 1;
            arena.push(node);
            frontier.push(Reverse((node.f(), sequence, arena.len() - 1)));
        }
    }

    Vec::new()
}

fn backtrack(arena: &[SearchNode], mut index: usize) -> Vec<Position> {
    let mut path = vec![arena[index].position];
    while let Some(parent) = arena[index].parent {
        path.push(arena[parent].position);
        index = parent;
    }
    path.reverse();
    path
}
