use crate::components::Position;
use crate::grid::Grid;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::f64::consts::SQRT_2;

const CARDINAL_COST: f64 = 1.0;
const DIAGONAL_COST: f64 = SQRT_2;

/// Cardinal first, then diagonal
const NEIGHBORS: [(i32, i32); 8] = [
    (0, -1),
    (0, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

#[derive(Clone, Copy)]
struct ScoredNode {
    pos: Position,
    f_score: f64, // g_score + heuristic
    /// Push order, so equal f-scores pop first-in first
    seq: u64,
}

impl PartialEq for ScoredNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredNode {}

// BinaryHeap is a max-heap, so we reverse the ordering for min-heap behavior
impl Ord for ScoredNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_score
            .total_cmp(&self.f_score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for ScoredNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find a path from start to goal using A* with 8-directional movement.
///
/// Returns the positions after `start` up to and including `goal`. The
/// result is empty when `start == goal`, when either end is out of bounds,
/// or when the goal can't be reached. Callers that need to tell "already
/// there" from "blocked" compare the endpoints themselves.
///
/// Diagonal steps cost √2 and may not squeeze between two walls that touch
/// only at a corner.
pub fn find_path(grid: &Grid, start: Position, goal: Position) -> Vec<Position> {
    if start == goal || !grid.in_bounds(start.x, start.y) || !grid.is_walkable(goal) {
        return Vec::new();
    }

    let mut open_set = BinaryHeap::new();
    let mut closed: HashSet<Position> = HashSet::new();
    let mut came_from: HashMap<Position, Position> = HashMap::new();
    let mut g_score: HashMap<Position, f64> = HashMap::new();
    let mut seq = 0;

    g_score.insert(start, 0.0);
    open_set.push(ScoredNode {
        pos: start,
        f_score: heuristic(start, goal),
        seq,
    });

    while let Some(current) = open_set.pop() {
        if current.pos == goal {
            return reconstruct_path(&came_from, current.pos);
        }

        // Stale heap entry for a node we already expanded more cheaply
        if !closed.insert(current.pos) {
            continue;
        }

        let current_g = g_score.get(&current.pos).copied().unwrap_or(f64::INFINITY);

        for (dx, dy) in NEIGHBORS {
            let neighbor = current.pos.offset(dx, dy);

            if !grid.is_walkable(neighbor) || closed.contains(&neighbor) {
                continue;
            }

            let diagonal = dx != 0 && dy != 0;
            if diagonal && cuts_corner(grid, current.pos, dx, dy) {
                continue;
            }

            let step = if diagonal { DIAGONAL_COST } else { CARDINAL_COST };
            let tentative_g = current_g + step;
            let neighbor_g = g_score.get(&neighbor).copied().unwrap_or(f64::INFINITY);

            if tentative_g < neighbor_g {
                came_from.insert(neighbor, current.pos);
                g_score.insert(neighbor, tentative_g);
                seq += 1;
                open_set.push(ScoredNode {
                    pos: neighbor,
                    f_score: tentative_g + heuristic(neighbor, goal),
                    seq,
                });
            }
        }
    }

    Vec::new() // No path found
}

/// Get just the next step toward a goal.
/// Returns None if no path exists or already at goal.
pub fn next_step_toward(grid: &Grid, start: Position, goal: Position) -> Option<Position> {
    find_path(grid, start, goal).first().copied()
}

/// Total movement cost of walking `path` from `start`
pub fn path_cost(start: Position, path: &[Position]) -> f64 {
    let mut prev = start;
    let mut cost = 0.0;
    for &step in path {
        let diagonal = step.x != prev.x && step.y != prev.y;
        cost += if diagonal { DIAGONAL_COST } else { CARDINAL_COST };
        prev = step;
    }
    cost
}

/// Both orthogonal cells flanking the diagonal are walls
fn cuts_corner(grid: &Grid, from: Position, dx: i32, dy: i32) -> bool {
    grid.is_wall(from.offset(0, dy)) && grid.is_wall(from.offset(dx, 0))
}

/// Euclidean distance; admissible with √2 diagonals
fn heuristic(from: Position, to: Position) -> f64 {
    let dx = (from.x - to.x) as f64;
    let dy = (from.y - to.y) as f64;
    (dx * dx + dy * dy).sqrt()
}

/// Reconstruct the path from came_from map
fn reconstruct_path(came_from: &HashMap<Position, Position>, mut current: Position) -> Vec<Position> {
    let mut path = vec![current];

    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }

    path.reverse();
    // Remove the start position
    if !path.is_empty() {
        path.remove(0);
    }
    path
}
