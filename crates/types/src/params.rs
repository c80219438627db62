//! Economy parameters.
//!
//! Costs and the cooldown schedule are operational parameters adjusted by
//! the administrator at runtime; the hard supply cap is fixed at build
//! time.

use crate::errors::{EngineError, Result};
use crate::scalars::{Amount, Tick, UNIT};
use serde::{Deserialize, Serialize};

/// Hard ceiling on the number of tokens that can ever be minted.
pub const MAX_SUPPLY: u64 = 10_000;

/// Default first-acquisition cost: 0.10 coin.
pub const DEFAULT_CLAIM_COST: Amount = UNIT / 10;

/// Default level-up cost: 0.05 coin.
pub const DEFAULT_LEVEL_UP_COST: Amount = UNIT / 20;

/// Default cooldown tiers, in ticks, for levels 1, 2, 3, ... Levels past
/// the last tier reuse the final interval.
pub const DEFAULT_COOLDOWN_TIERS: [Tick; 5] = [400, 500, 600, 700, 800];

/// Tunable economy parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EconomyParams {
    /// Supply cap for this deployment; must be in `[1, MAX_SUPPLY]`.
    pub max_supply: u64,
    /// Cost of first acquisition. Zero is allowed.
    pub claim_cost: Amount,
    /// Cost of one level-up. Zero is allowed.
    pub level_up_cost: Amount,
    /// Per-level cooldown intervals in ticks; non-empty, non-decreasing.
    pub cooldown_tiers: Vec<Tick>,
}

impl Default for EconomyParams {
    fn default() -> Self {
        Self {
            max_supply: MAX_SUPPLY,
            claim_cost: DEFAULT_CLAIM_COST,
            level_up_cost: DEFAULT_LEVEL_UP_COST,
            cooldown_tiers: DEFAULT_COOLDOWN_TIERS.to_vec(),
        }
    }
}

impl EconomyParams {
    /// Check every parameter against its allowed range.
    pub fn validate(&self) -> Result<()> {
        if self.max_supply == 0 {
            return Err(EngineError::InvalidParameter("max_supply must be positive"));
        }
        if self.max_supply > MAX_SUPPLY {
            return Err(EngineError::InvalidParameter(
                "max_supply exceeds the hard supply cap",
            ));
        }
        if self.cooldown_tiers.is_empty() {
            return Err(EngineError::InvalidParameter(
                "cooldown_tiers must not be empty",
            ));
        }
        if self.cooldown_tiers.windows(2).any(|w| w[1] < w[0]) {
            return Err(EngineError::InvalidParameter(
                "cooldown_tiers must be non-decreasing",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(EconomyParams::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_supply() {
        let params = EconomyParams {
            max_supply: 0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(EngineError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_rejects_supply_above_cap() {
        let params = EconomyParams {
            max_supply: MAX_SUPPLY + 1,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_rejects_decreasing_cooldowns() {
        let params = EconomyParams {
            cooldown_tiers: vec![400, 300],
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_zero_costs_are_allowed() {
        let params = EconomyParams {
            claim_cost: 0,
            level_up_cost: 0,
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }
}
