//! Weighted best-first (A*) search toward a single goal.
//! Ties on `f` are broken by the lowest cell in `(x, y)` order so the chosen
//! route does not depend on container iteration order.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use super::goal::Goal;
use super::path::{Path, PredecessorMap, reconstruct};
use crate::error::SearchError;
use crate::geometry::neighbors;
use crate::types::Cell;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Priority(f64);

impl Eq for Priority {}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: Priority,
    cell: Cell,
    g: u32,
}

/// Plain A* with weight 1 toward an exact cell.
pub fn astar_path(
    start: Cell,
    goal: Cell,
    walls: &BTreeSet<Cell>,
    floor: &BTreeSet<Cell>,
) -> Result<Option<Path>, SearchError> {
    weighted_path(start, Goal::Exact(goal), walls, floor, 1.0)
}

/// Searches `floor` minus `walls` for a route from `start` to `goal`.
///
/// Priority is `g + weight * h` with `h` the Manhattan distance to the goal.
/// Weights above 1 may return longer-than-shortest routes. Cells outside
/// `floor` are never entered. Returns `Ok(None)` when the open set runs dry.
pub fn weighted_path(
    start: Cell,
    goal: Goal,
    walls: &BTreeSet<Cell>,
    floor: &BTreeSet<Cell>,
    weight: f64,
) -> Result<Option<Path>, SearchError> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(SearchError::InvalidWeight(weight));
    }
    if walls.contains(&start) || !floor.contains(&start) {
        return Err(SearchError::StartOutsideUniverse { start });
    }

    let priority = |g: u32, cell: Cell| Priority(f64::from(g) + weight * goal.distance_from(cell));

    let mut open = BTreeSet::new();
    let mut closed = BTreeSet::new();
    let mut g_score = BTreeMap::new();
    let mut came_from = PredecessorMap::new();

    open.insert(OpenNode { f: priority(0, start), cell: start, g: 0 });
    g_score.insert(start, 0u32);
    came_from.insert(start, None);

    while let Some(current) = open.pop_first() {
        // Entries superseded by a cheaper route stay in the set until popped.
        if !closed.insert(current.cell) {
            continue;
        }
        if goal.is_reached_by(current.cell) {
            return reconstruct(current.cell, &came_from).map(Some);
        }

        let next_g = current.g + 1;
        for next in neighbors(current.cell) {
            if walls.contains(&next) || !floor.contains(&next) || closed.contains(&next) {
                continue;
            }
            if next_g >= g_score.get(&next).copied().unwrap_or(u32::MAX) {
                continue;
            }
            g_score.insert(next, next_g);
            came_from.insert(next, Some(current.cell));
            open.insert(OpenNode { f: priority(next_g, next), cell: next, g: next_g });
        }
    }

    tracing::trace!(?start, ?goal, "weighted search exhausted");
    Ok(None)
}
