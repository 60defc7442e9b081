//! Host-facing agent: owns episode memory, configuration and the random stream.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::config::PolicyConfig;
use crate::error::PolicyError;
use crate::memory::EpisodeMemory;
use crate::policy::decide;
use crate::sensor::Sensor;
use crate::types::Action;

pub struct Agent {
    config: PolicyConfig,
    memory: EpisodeMemory,
    rng: ChaCha8Rng,
}

impl Agent {
    pub fn new(config: PolicyConfig) -> Result<Self, PolicyError> {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Ok(Self { config, memory: EpisodeMemory::new(), rng })
    }

    /// Produces one action for the current tick.
    pub fn get_action<S: Sensor + ?Sized>(&mut self, sensor: &S) -> Result<Action, PolicyError> {
        decide(&mut self.memory, sensor, &self.config, &mut self.rng)
    }

    /// End-of-episode hook. Memory is cleared; the random stream continues.
    pub fn end_episode<S: Sensor + ?Sized>(&mut self, _final_state: &S) {
        tracing::debug!(ticks = self.memory.tick(), "episode finished");
        self.memory.reset();
    }

    pub fn memory(&self) -> &EpisodeMemory {
        &self.memory
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }
}
