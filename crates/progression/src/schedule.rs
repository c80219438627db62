//! Cooldown schedule.
//!
//! The wait required before each level-up is an operational parameter, not
//! a constant: tier lengths are handed in as an explicit list and only
//! required to be non-empty and non-decreasing. Levels past the last tier
//! reuse the final interval.

use relics_types::params::DEFAULT_COOLDOWN_TIERS;
use relics_types::{EngineError, Level, Result, Tick};
use serde::{Deserialize, Serialize};

/// Non-decreasing per-level cooldown intervals, in ticks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooldownSchedule {
    tiers: Vec<Tick>,
}

impl CooldownSchedule {
    /// Build a schedule from explicit tiers.
    pub fn new(tiers: Vec<Tick>) -> Result<Self> {
        if tiers.is_empty() {
            return Err(EngineError::InvalidParameter(
                "cooldown_tiers must not be empty",
            ));
        }
        if tiers.windows(2).any(|w| w[1] < w[0]) {
            return Err(EngineError::InvalidParameter(
                "cooldown_tiers must be non-decreasing",
            ));
        }
        Ok(Self { tiers })
    }

    /// Cooldown required to advance *from* `level`. Levels are 1-indexed;
    /// anything past the last tier waits the final interval.
    pub fn cooldown_for(&self, level: Level) -> Tick {
        let index = (level.max(1) as usize - 1).min(self.tiers.len() - 1);
        self.tiers[index]
    }

    pub fn tiers(&self) -> &[Tick] {
        &self.tiers
    }
}

impl Default for CooldownSchedule {
    fn default() -> Self {
        Self {
            tiers: DEFAULT_COOLDOWN_TIERS.to_vec(),
        }
    }
}
