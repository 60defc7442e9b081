use serde::{Deserialize, Serialize};

use crate::config::PolicyConfig;
use crate::sensor::Snapshot;
use crate::types::Action;

pub const TRACE_FORMAT_VERSION: u16 = 1;

/// One decision as observed by the host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    pub tick: u64,
    pub snapshot: Snapshot,
    pub action: Action,
    /// The host ended the episode right after this decision.
    pub episode_end: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionTrace {
    pub format_version: u16,
    pub config: PolicyConfig,
    pub records: Vec<TraceRecord>,
}

impl DecisionTrace {
    pub fn new(config: PolicyConfig) -> Self {
        Self { format_version: TRACE_FORMAT_VERSION, config, records: Vec::new() }
    }

    pub fn push(&mut self, snapshot: Snapshot, action: Action) {
        let tick = self.records.len() as u64;
        self.records.push(TraceRecord { tick, snapshot, action, episode_end: false });
    }

    /// Marks the most recent decision as the last one of its episode.
    pub fn mark_episode_end(&mut self) {
        if let Some(last) = self.records.last_mut() {
            last.episode_end = true;
        }
    }
}
