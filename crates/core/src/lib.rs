pub mod agent;
pub mod config;
pub mod error;
pub mod geometry;
pub mod memory;
pub mod policy;
pub mod replay;
pub mod search;
pub mod sensor;
pub mod trace;
pub mod trace_file;
pub mod types;

#[cfg(test)]
mod test_support;

pub use agent::Agent;
pub use config::{CornerAdvance, PolicyConfig};
pub use error::{ConfigError, PolicyError, SearchError, SnapshotError};
pub use memory::{EpisodeMemory, MazeLayout, RouteCache};
pub use replay::{Divergence, ReplayError, ReplayResult, replay_trace};
pub use sensor::{Sensor, Snapshot};
pub use trace::{DecisionTrace, TraceRecord};
pub use types::*;
