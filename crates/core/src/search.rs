//! Search primitives used by the decision policy.
//! Every function here is stateless; the policy owns all memory between ticks.

mod death_trap;
mod goal;
mod nearest;
mod path;
mod weighted;

pub use death_trap::{DEFAULT_DEATH_TRAP_THRESHOLD, death_trap_directions};
pub use goal::{Goal, TargetSet};
pub use nearest::nearest_target_path;
pub use path::{Path, PredecessorMap, reconstruct};
pub use weighted::{astar_path, weighted_path};
