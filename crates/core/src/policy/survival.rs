//! Imminent-threat detection for the survival tier.

use crate::config::PolicyConfig;
use crate::error::PolicyError;
use crate::geometry::half_manhattan;
use crate::memory::MazeLayout;
use crate::search::{Goal, weighted_path};
use crate::types::{Cell, Direction, HalfCell};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct Threat {
    pub(super) adversary: HalfCell,
    /// `None` when no route to the adversary exists inside the floor.
    pub(super) path_len: Option<usize>,
    /// Directions the threat approaches from.
    pub(super) blocked: Vec<Direction>,
}

/// Returns every adversary close enough to be an imminent threat.
///
/// With a route, the approach vector runs from the agent to the route's first
/// step. Without one, the raw agent-to-adversary vector is used and the
/// adversary only counts when its direct distance is within the limit.
pub(super) fn assess_threats(
    agent: Cell,
    adversaries: &[HalfCell],
    layout: &MazeLayout,
    config: &PolicyConfig,
) -> Result<Vec<Threat>, PolicyError> {
    let origin = HalfCell::from(agent);
    let mut threats = Vec::new();

    for &adversary in adversaries {
        let path = weighted_path(
            agent,
            Goal::Shadow(adversary),
            layout.walls(),
            layout.floor(),
            config.threat_weight,
        )?;
        let (imminent, approach) = match &path {
            Some(path) => {
                (path.len() <= config.threat_path_limit, path.first_step().map(HalfCell::from))
            }
            None => {
                // Compared in whole cells, rounding half a cell up.
                let cells = (half_manhattan(origin, adversary) as usize).div_ceil(2);
                (cells <= config.threat_path_limit, None)
            }
        };
        if !imminent {
            continue;
        }

        let approach = approach.unwrap_or(adversary);
        threats.push(Threat {
            adversary,
            path_len: path.as_ref().map(|path| path.len()),
            blocked: approach_directions(approach.x2 - origin.x2, approach.y2 - origin.y2),
        });
    }

    Ok(threats)
}

fn approach_directions(dx: i32, dy: i32) -> Vec<Direction> {
    let mut blocked = Vec::new();
    if dx > 0 {
        blocked.push(Direction::East);
    }
    if dx < 0 {
        blocked.push(Direction::West);
    }
    if dy > 0 {
        blocked.push(Direction::North);
    }
    if dy < 0 {
        blocked.push(Direction::South);
    }
    blocked
}
