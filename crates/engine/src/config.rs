//! Engine configuration.

use relics_types::{AccountId, EconomyParams, EngineError, Result};
use serde::{Deserialize, Serialize};

/// Everything needed to construct a [`crate::RelicEngine`] besides the
/// collaborator handles and mint entropy.
///
/// Loadable from TOML:
///
/// ```toml
/// custodian = "0000000000000000000000000000000000000000000000000000000000000000"
/// treasury_recipient = "adadadadadadadadadadadadadadadadadadadadadadadadadadadadadadadad"
///
/// [economy]
/// max_supply = 10000
/// claim_cost = 10000000
/// level_up_cost = 5000000
/// cooldown_tiers = [400, 500, 600, 700, 800]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Account that holds every token from mint until first claim.
    pub custodian: AccountId,
    /// Where treasury withdrawals are sent.
    pub treasury_recipient: AccountId,
    pub economy: EconomyParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            custodian: AccountId::of_byte(0),
            treasury_recipient: AccountId::of_byte(0),
            economy: EconomyParams::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(raw).map_err(|err| EngineError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.economy.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relics_types::params::{DEFAULT_CLAIM_COST, MAX_SUPPLY};

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_parses_documented_toml() {
        let raw = format!(
            r#"
custodian = "{}"
treasury_recipient = "{}"

[economy]
max_supply = 500
claim_cost = {}
level_up_cost = 5000000
cooldown_tiers = [400, 500]
"#,
            "00".repeat(32),
            "ad".repeat(32),
            DEFAULT_CLAIM_COST,
        );
        let config = EngineConfig::from_toml_str(&raw).unwrap();
        assert_eq!(config.economy.max_supply, 500);
        assert_eq!(config.economy.claim_cost, DEFAULT_CLAIM_COST);
        assert_eq!(config.treasury_recipient, AccountId::of_byte(0xad));
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let raw = format!(
            r#"
custodian = "{}"
treasury_recipient = "{}"

[economy]
max_supply = {}
claim_cost = 0
level_up_cost = 0
cooldown_tiers = [400, 300]
"#,
            "00".repeat(32),
            "ad".repeat(32),
            MAX_SUPPLY,
        );
        assert!(matches!(
            EngineConfig::from_toml_str(&raw),
            Err(EngineError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        assert!(matches!(
            EngineConfig::from_toml_str("custodian = 7"),
            Err(EngineError::Config(_))
        ));
    }
}
