//! Bounded-depth probe for movement directions that lead into pockets.
//!
//! Each open neighbor of the start seeds its own breadth-first frontier. A
//! direction stays flagged until one of its cells reaches `threshold` steps
//! from the start. The start cell itself is never re-entered, so a pocket
//! cannot escape through the agent's own position. Frontiers keep separate
//! visited sets: two directions that open into the same region both survive.

use std::collections::{BTreeSet, VecDeque};

use crate::error::SearchError;
use crate::geometry::neighbors;
use crate::types::{Cell, Direction};

pub const DEFAULT_DEATH_TRAP_THRESHOLD: u32 = 5;

pub fn death_trap_directions(
    start: Cell,
    walls: &BTreeSet<Cell>,
    threshold: u32,
) -> Result<BTreeSet<Direction>, SearchError> {
    if threshold == 0 {
        return Err(SearchError::InvalidThreshold);
    }
    if walls.contains(&start) {
        return Err(SearchError::StartOutsideUniverse { start });
    }

    let mut flagged = BTreeSet::new();
    let mut visited = BTreeSet::new();
    let mut queue = VecDeque::new();

    for direction in Direction::ALL {
        let first = start.step(direction);
        if walls.contains(&first) {
            continue;
        }
        flagged.insert(direction);
        visited.insert((direction, first));
        queue.push_back((first, direction, 1u32));
    }

    while let Some((current, direction, distance)) = queue.pop_front() {
        if !flagged.contains(&direction) {
            continue;
        }
        if distance >= threshold {
            flagged.remove(&direction);
            continue;
        }
        for next in neighbors(current) {
            if next == start || walls.contains(&next) || !visited.insert((direction, next)) {
                continue;
            }
            queue.push_back((next, direction, distance + 1));
        }
    }

    Ok(flagged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[test]
    fn short_dead_end_east_is_flagged() {
        let maze = Maze::parse(&[
            "%%%%%%%%%%%%", //
            "%    %%%%%%%",
            "%    P   %%%",
            "%    %%%%%%%",
            "%%%%%%%%%%%%",
        ]);
        let agent = maze.agent();
        let traps = death_trap_directions(agent, &maze.walls, 5).unwrap();
        assert!(traps.contains(&Direction::East));
        assert!(!traps.contains(&Direction::West));
    }

    #[test]
    fn corridor_reaching_threshold_is_not_flagged() {
        let maze = Maze::parse(&[
            "%%%%%%%%%", //
            "%P      %",
            "%%%%%%%%%",
        ]);
        let traps = death_trap_directions(maze.agent(), &maze.walls, 5).unwrap();
        assert!(traps.is_empty());
    }

    #[test]
    fn corridor_one_short_of_threshold_is_flagged() {
        let maze = Maze::parse(&[
            "%%%%%%%", //
            "%P    %",
            "%%%%%%%",
        ]);
        let traps = death_trap_directions(maze.agent(), &maze.walls, 5).unwrap();
        assert_eq!(traps, BTreeSet::from([Direction::East]));
    }

    const WINDING: [&str; 7] = [
        "%%%%%%%%", //
        "%   %%%%",
        "% % %%%%",
        "% % %%%%",
        "%P% %%%%",
        "%%%   %%",
        "%%%%%%%%",
    ];

    #[test]
    fn winding_corridor_long_enough_is_not_flagged() {
        let maze = Maze::parse(&WINDING);
        for threshold in 1..=11 {
            let traps = death_trap_directions(maze.agent(), &maze.walls, threshold).unwrap();
            assert!(traps.is_empty(), "threshold {threshold}: {traps:?}");
        }
    }

    #[test]
    fn winding_corridor_one_short_is_flagged() {
        let maze = Maze::parse(&WINDING);
        let traps = death_trap_directions(maze.agent(), &maze.walls, 12).unwrap();
        assert_eq!(traps, BTreeSet::from([Direction::North]));
    }

    #[test]
    fn directions_sharing_an_open_room_both_survive() {
        let maze = Maze::parse(&[
            "%%%%%%%%", //
            "%      %",
            "%      %",
            "%P     %",
            "%%%%%%%%",
        ]);
        let traps = death_trap_directions(maze.agent(), &maze.walls, 5).unwrap();
        assert!(traps.is_empty());
    }

    #[test]
    fn fully_enclosed_agent_has_no_directions() {
        let maze = Maze::parse(&["%%%", "%P%", "%%%"]);
        assert!(death_trap_directions(maze.agent(), &maze.walls, 5).unwrap().is_empty());
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let maze = Maze::parse(&["%%%", "%P%", "%%%"]);
        assert_eq!(
            death_trap_directions(maze.agent(), &maze.walls, 0),
            Err(SearchError::InvalidThreshold)
        );
    }
}
