use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::search::DEFAULT_DEATH_TRAP_THRESHOLD;

/// Inclusive range for the random corner advance drawn on corner arrival.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CornerAdvance {
    pub min: usize,
    pub max: usize,
}

/// Tunables for the decision policy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub death_trap_threshold: u32,
    /// Adversaries whose route length is at most this are imminent threats.
    pub threat_path_limit: usize,
    pub exploration_weight: f64,
    pub threat_weight: f64,
    pub corner_advance: CornerAdvance,
    pub seed: u64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            death_trap_threshold: DEFAULT_DEATH_TRAP_THRESHOLD,
            threat_path_limit: 4,
            exploration_weight: 1.0,
            threat_weight: 1.0,
            corner_advance: CornerAdvance { min: 1, max: 3 },
            seed: 0,
        }
    }
}

impl PolicyConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self { seed, ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.death_trap_threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        if self.threat_path_limit == 0 {
            return Err(ConfigError::ZeroThreatLimit);
        }
        for (field, value) in
            [("exploration_weight", self.exploration_weight), ("threat_weight", self.threat_weight)]
        {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidWeight { field, value });
            }
        }
        let CornerAdvance { min, max } = self.corner_advance;
        if min == 0 || min > max {
            return Err(ConfigError::InvalidCornerAdvance { min, max });
        }
        Ok(())
    }
}
