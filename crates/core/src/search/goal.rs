//! Termination rules for goal-directed and target-set searches.

use std::collections::BTreeSet;

use crate::geometry::{half_manhattan, manhattan};
use crate::types::{Cell, HalfCell, SHADOW_OFFSETS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Goal {
    /// Stop only on this cell.
    Exact(Cell),
    /// Stop on any cell whose shadow region covers this position.
    Shadow(HalfCell),
}

impl Goal {
    pub fn is_reached_by(&self, cell: Cell) -> bool {
        match *self {
            Goal::Exact(goal) => cell == goal,
            Goal::Shadow(goal) => {
                let origin = HalfCell::from(cell);
                SHADOW_OFFSETS.iter().any(|offset| origin.shifted(*offset) == goal)
            }
        }
    }

    /// Manhattan distance from `cell` to the goal, in cells.
    pub fn distance_from(&self, cell: Cell) -> f64 {
        match *self {
            Goal::Exact(goal) => f64::from(manhattan(cell, goal)),
            Goal::Shadow(goal) => f64::from(half_manhattan(HalfCell::from(cell), goal)) / 2.0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum TargetSet<'a> {
    Exact(&'a BTreeSet<Cell>),
    Shadow(&'a BTreeSet<HalfCell>),
}

impl TargetSet<'_> {
    pub fn is_reached_by(&self, cell: Cell) -> bool {
        match self {
            TargetSet::Exact(targets) => targets.contains(&cell),
            TargetSet::Shadow(targets) => {
                let origin = HalfCell::from(cell);
                SHADOW_OFFSETS.iter().any(|offset| targets.contains(&origin.shifted(*offset)))
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            TargetSet::Exact(targets) => targets.is_empty(),
            TargetSet::Shadow(targets) => targets.is_empty(),
        }
    }
}
