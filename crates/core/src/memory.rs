//! Per-episode knowledge owned by the decision policy.
//! This module holds state and simple transitions only; arbitration lives in `policy`.

use std::collections::BTreeSet;
use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use crate::geometry::{enumerate_floor, interior_corner};
use crate::search::Path;
use crate::types::{Cell, DecisionEvent};

/// Static maze facts captured from the first snapshot of an episode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeLayout {
    walls: BTreeSet<Cell>,
    corners: Vec<Cell>,
    floor: BTreeSet<Cell>,
}

impl MazeLayout {
    /// `raw_corners` are exterior corners; they are nudged inward here.
    pub fn new(walls: BTreeSet<Cell>, raw_corners: &[Cell]) -> Self {
        let corners: Vec<Cell> = raw_corners.iter().copied().map(interior_corner).collect();
        let floor = enumerate_floor(&corners);
        Self { walls, corners, floor }
    }

    pub fn walls(&self) -> &BTreeSet<Cell> {
        &self.walls
    }

    pub fn corners(&self) -> &[Cell] {
        &self.corners
    }

    pub fn floor(&self) -> &BTreeSet<Cell> {
        &self.floor
    }

    pub fn corner_index(&self, cell: Cell) -> Option<usize> {
        self.corners.iter().position(|corner| *corner == cell)
    }

    /// Corner selected by an exploration counter, wrapping around.
    pub fn corner_at(&self, counter: usize) -> Option<Cell> {
        if self.corners.is_empty() {
            return None;
        }
        Some(self.corners[counter % self.corners.len()])
    }
}

/// Remaining steps of the current foraging route, next step on top.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteCache {
    stack: Vec<Cell>,
}

impl RouteCache {
    pub fn load(&mut self, path: Path) {
        self.stack = path.into_cells();
        self.stack.reverse();
    }

    pub fn pop_next(&mut self) -> Option<Cell> {
        self.stack.pop()
    }

    pub fn peek_next(&self) -> Option<Cell> {
        self.stack.last().copied()
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Remaining cells in travel order.
    pub fn remaining(&self) -> impl Iterator<Item = Cell> + '_ {
        self.stack.iter().rev().copied()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EpisodeMemory {
    pub(crate) layout: Option<MazeLayout>,
    pub(crate) targets: BTreeSet<Cell>,
    pub(crate) route: RouteCache,
    pub(crate) exploration_counter: usize,
    pub(crate) tick: u64,
    pub(crate) log: Vec<DecisionEvent>,
}

impl EpisodeMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets everything learned in the current episode.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn layout(&self) -> Option<&MazeLayout> {
        self.layout.as_ref()
    }

    pub fn targets(&self) -> &BTreeSet<Cell> {
        &self.targets
    }

    pub fn route(&self) -> &RouteCache {
        &self.route
    }

    pub fn exploration_counter(&self) -> usize {
        self.exploration_counter
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn log(&self) -> &[DecisionEvent] {
        &self.log
    }

    /// Corner currently chosen for exploration, if the maze has corners.
    pub fn exploration_target(&self) -> Option<Cell> {
        self.layout.as_ref()?.corner_at(self.exploration_counter)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Stable hash of the decision-relevant memory contents.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.tick);
        hasher.write_u64(self.exploration_counter as u64);
        match &self.layout {
            None => hasher.write_u8(0),
            Some(layout) => {
                hasher.write_u8(1);
                hasher.write_u64(layout.walls.len() as u64);
                for wall in &layout.walls {
                    write_cell(&mut hasher, *wall);
                }
                for corner in &layout.corners {
                    write_cell(&mut hasher, *corner);
                }
            }
        }
        hasher.write_u64(self.targets.len() as u64);
        for target in &self.targets {
            write_cell(&mut hasher, *target);
        }
        hasher.write_u64(self.route.len() as u64);
        for step in self.route.remaining() {
            write_cell(&mut hasher, step);
        }
        hasher.finish()
    }
}

fn write_cell(hasher: &mut Xxh3, cell: Cell) {
    hasher.write_i32(cell.x);
    hasher.write_i32(cell.y);
}
