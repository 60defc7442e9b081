//! Per-tick arbitration between survival, foraging, and exploration.
//! This module exists to turn one snapshot plus episode memory into one action.
//! It does not own search algorithms or the lifetime of the memory it mutates.

use std::collections::BTreeSet;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

use crate::config::PolicyConfig;
use crate::error::PolicyError;
use crate::memory::{EpisodeMemory, MazeLayout};
use crate::search::{Goal, TargetSet, death_trap_directions, nearest_target_path, weighted_path};
use crate::sensor::Sensor;
use crate::types::{Action, Cell, DecisionEvent, Direction, Mode};

mod survival;

use survival::assess_threats;

/// Chooses one action for the current tick and updates `memory`.
///
/// Unreachable targets and corners fall through to lower tiers. Any
/// [`PolicyError`], including an invalid `config`, aborts the tick without
/// emitting an action.
pub fn decide<S: Sensor + ?Sized>(
    memory: &mut EpisodeMemory,
    sensor: &S,
    config: &PolicyConfig,
    rng: &mut ChaCha8Rng,
) -> Result<Action, PolicyError> {
    config.validate()?;
    let layout = match memory.layout.take() {
        Some(layout) => layout,
        None => map_maze(memory, sensor),
    };
    let outcome = decide_mapped(memory, &layout, sensor, config, rng);
    memory.layout = Some(layout);
    outcome
}

fn decide_mapped<S: Sensor + ?Sized>(
    memory: &mut EpisodeMemory,
    layout: &MazeLayout,
    sensor: &S,
    config: &PolicyConfig,
    rng: &mut ChaCha8Rng,
) -> Result<Action, PolicyError> {
    let agent = sensor.agent_position();
    update_memory(memory, layout, sensor, agent, config, rng);

    let mut legal = sensor.legal_actions();
    legal.remove(&Action::Stop);
    for direction in death_trap_directions(agent, layout.walls(), config.death_trap_threshold)? {
        legal.remove(&Action::Move(direction));
    }
    pad_with_stop(&mut legal);

    let threats = assess_threats(agent, &sensor.adversaries(), layout, config)?;
    if !threats.is_empty() {
        for threat in &threats {
            memory.log.push(DecisionEvent::ThreatDetected {
                adversary: threat.adversary,
                path_len: threat.path_len,
            });
            for direction in &threat.blocked {
                legal.remove(&Action::Move(*direction));
            }
        }
        pad_with_stop(&mut legal);
        memory.route.clear();
        let action = choose(rng, &legal);
        tracing::debug!(threats = threats.len(), ?action, "survival mode");
        return Ok(finish(memory, agent, Mode::Survival, action));
    }

    if !memory.targets.is_empty() {
        if memory.route.is_empty()
            && let Some(path) =
                nearest_target_path(agent, TargetSet::Exact(&memory.targets), layout.walls())?
        {
            if let Some(target) = path.terminal() {
                memory.log.push(DecisionEvent::RouteComputed { target, path_len: path.len() });
            }
            memory.route.load(path);
        }
        if let Some(next) = memory.route.pop_next() {
            match Direction::between(agent, next) {
                Some(direction) => {
                    tracing::debug!(?next, remaining = memory.route.len(), "foraging");
                    return Ok(finish(memory, agent, Mode::Foraging, Action::Move(direction)));
                }
                None => {
                    tracing::debug!(?agent, ?next, "cached route is stale, dropping it");
                    memory.route.clear();
                }
            }
        }
    }

    let Some(corner) = layout.corner_at(memory.exploration_counter) else {
        return Err(PolicyError::NoCorners);
    };
    if let Some(path) = weighted_path(
        agent,
        Goal::Exact(corner),
        layout.walls(),
        layout.floor(),
        config.exploration_weight,
    )? && let Some(first) = path.first_step()
        && let Some(direction) = Direction::between(agent, first)
    {
        tracing::debug!(?corner, path_len = path.len(), "exploring");
        return Ok(finish(memory, agent, Mode::Exploration, Action::Move(direction)));
    }

    let action = choose(rng, &legal);
    tracing::debug!(?action, "fallback");
    Ok(finish(memory, agent, Mode::Fallback, action))
}

fn map_maze<S: Sensor + ?Sized>(memory: &mut EpisodeMemory, sensor: &S) -> MazeLayout {
    let layout = MazeLayout::new(sensor.walls(), &sensor.corners());
    let (walls, corners, floor) =
        (layout.walls().len(), layout.corners().len(), layout.floor().len());
    tracing::debug!(walls, corners, floor, "mapped maze");
    memory.log.push(DecisionEvent::Mapped { walls, corners, floor });
    layout
}

fn update_memory<S: Sensor + ?Sized>(
    memory: &mut EpisodeMemory,
    layout: &MazeLayout,
    sensor: &S,
    agent: Cell,
    config: &PolicyConfig,
    rng: &mut ChaCha8Rng,
) {
    memory.targets.remove(&agent);
    memory.targets.extend(sensor.food());
    memory.targets.extend(sensor.capsules());

    if let Some(index) = layout.corner_index(agent) {
        let advance = random_in(rng, config.corner_advance.min, config.corner_advance.max);
        // `index` is below the corner count, so the sum cannot overflow.
        memory.exploration_counter = index + advance % layout.corners().len();
        memory.log.push(DecisionEvent::CornerReached {
            corner: agent,
            next_index: memory.exploration_counter % layout.corners().len(),
        });
    }
}

fn finish(memory: &mut EpisodeMemory, position: Cell, mode: Mode, action: Action) -> Action {
    memory.log.push(DecisionEvent::Decision { tick: memory.tick, position, mode, action });
    memory.tick += 1;
    action
}

fn pad_with_stop(legal: &mut BTreeSet<Action>) {
    if legal.is_empty() {
        legal.insert(Action::Stop);
    }
}

fn choose(rng: &mut ChaCha8Rng, legal: &BTreeSet<Action>) -> Action {
    if legal.is_empty() {
        return Action::Stop;
    }
    let index = rng.next_u64() as usize % legal.len();
    legal.iter().nth(index).copied().unwrap_or(Action::Stop)
}

/// Uniform-ish draw from `min..=max`; requires `1 <= min <= max`.
fn random_in(rng: &mut ChaCha8Rng, min: usize, max: usize) -> usize {
    min + (rng.next_u64() as usize % (max - min + 1))
}
