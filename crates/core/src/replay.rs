//! Re-runs a recorded [`DecisionTrace`] through a fresh [`Agent`] and checks
//! that every decision comes out the same.

use thiserror::Error;

use crate::agent::Agent;
use crate::error::PolicyError;
use crate::trace::{DecisionTrace, TRACE_FORMAT_VERSION};
use crate::types::Action;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReplayError {
    #[error("unsupported trace format version {0}")]
    UnsupportedVersion(u16),
    #[error("decision at tick {tick} failed: {source}")]
    Policy {
        tick: u64,
        #[source]
        source: PolicyError,
    },
}

/// First recorded decision the replayed agent disagreed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Divergence {
    pub tick: u64,
    pub recorded: Action,
    pub replayed: Action,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayResult {
    /// Decisions replayed, including a diverging one.
    pub ticks: u64,
    pub episodes: u64,
    pub divergence: Option<Divergence>,
    /// Memory fingerprint after the last replayed decision.
    pub final_fingerprint: u64,
}

pub fn replay_trace(trace: &DecisionTrace) -> Result<ReplayResult, ReplayError> {
    if trace.format_version != TRACE_FORMAT_VERSION {
        return Err(ReplayError::UnsupportedVersion(trace.format_version));
    }
    let mut agent = Agent::new(trace.config.clone())
        .map_err(|source| ReplayError::Policy { tick: 0, source })?;

    let mut ticks = 0;
    let mut episodes = 0;
    for record in &trace.records {
        let replayed = agent
            .get_action(&record.snapshot)
            .map_err(|source| ReplayError::Policy { tick: record.tick, source })?;
        ticks += 1;

        if replayed != record.action {
            tracing::warn!(tick = record.tick, recorded = ?record.action, ?replayed, "replay diverged");
            return Ok(ReplayResult {
                ticks,
                episodes,
                divergence: Some(Divergence { tick: record.tick, recorded: record.action, replayed }),
                final_fingerprint: agent.memory().fingerprint(),
            });
        }

        if record.episode_end {
            agent.end_episode(&record.snapshot);
            episodes += 1;
        }
    }

    Ok(ReplayResult {
        ticks,
        episodes,
        divergence: None,
        final_fingerprint: agent.memory().fingerprint(),
    })
}
