//! Breadth-first search for the nearest member of a target set.

use std::collections::{BTreeSet, VecDeque};

use super::goal::TargetSet;
use super::path::{Path, PredecessorMap, reconstruct};
use crate::error::SearchError;
use crate::geometry::neighbors;
use crate::types::Cell;

/// Finds a shortest route from `start` to the closest cell satisfying `targets`.
///
/// Only `walls` bound the search, so an unwalled maze is explored without
/// limit. Equal-length candidates resolve by discovery order of the
/// east/west/north/south expansion.
pub fn nearest_target_path(
    start: Cell,
    targets: TargetSet<'_>,
    walls: &BTreeSet<Cell>,
) -> Result<Option<Path>, SearchError> {
    if walls.contains(&start) {
        return Err(SearchError::StartOutsideUniverse { start });
    }
    if targets.is_empty() {
        return Ok(None);
    }

    let mut came_from = PredecessorMap::new();
    let mut queue = VecDeque::new();
    came_from.insert(start, None);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if targets.is_reached_by(current) {
            return reconstruct(current, &came_from).map(Some);
        }
        for next in neighbors(current) {
            if walls.contains(&next) || came_from.contains_key(&next) {
                continue;
            }
            came_from.insert(next, Some(current));
            queue.push_back(next);
        }
    }

    tracing::trace!(?start, "nearest-target search exhausted");
    Ok(None)
}
