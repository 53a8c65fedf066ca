//! Token configuration
//!
//! Fixed metadata plus the genesis supply and mint cooldown.

use crate::token::clock::SECONDS_PER_DAY;
use crate::token::error::ConfigError;
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

pub const DEFAULT_NAME: &str = "ProtoCoin";
pub const DEFAULT_SYMBOL: &str = "PRC";
pub const DEFAULT_DECIMALS: u8 = 18;

/// Whole tokens created at genesis
pub const GENESIS_WHOLE_TOKENS: u64 = 100;

/// Minimum time between two mints by the same account
pub const DEFAULT_MINT_COOLDOWN_SECS: u64 = SECONDS_PER_DAY;

/// One whole token expressed in base units for `decimals`
pub fn unit(decimals: u8) -> U256 {
    U256::from(10u64).pow(U256::from(decimals))
}

/// Token parameters fixed at genesis
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Token name (e.g., "ProtoCoin")
    pub name: String,
    /// Token symbol (e.g., "PRC")
    pub symbol: String,
    /// Decimal places
    pub decimals: u8,
    /// Supply credited to the owner at genesis, in base units
    pub initial_supply: U256,
    /// Cooldown between mints by one account, in seconds
    pub mint_cooldown_secs: u64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            symbol: DEFAULT_SYMBOL.to_string(),
            decimals: DEFAULT_DECIMALS,
            initial_supply: U256::from(GENESIS_WHOLE_TOKENS) * unit(DEFAULT_DECIMALS),
            mint_cooldown_secs: DEFAULT_MINT_COOLDOWN_SECS,
        }
    }
}

impl TokenConfig {
    /// Override the mint cooldown
    pub fn with_cooldown(mut self, secs: u64) -> Self {
        self.mint_cooldown_secs = secs;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() || self.name.len() > 50 {
            return Err(ConfigError::InvalidName);
        }

        if self.symbol.is_empty() || self.symbol.len() > 10 {
            return Err(ConfigError::InvalidSymbol);
        }

        if self.decimals > 18 {
            return Err(ConfigError::InvalidDecimals);
        }

        if self.initial_supply.is_zero() {
            return Err(ConfigError::InvalidSupply);
        }

        if self.mint_cooldown_secs == 0 {
            return Err(ConfigError::InvalidCooldown);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TokenConfig::default();

        assert_eq!(config.name, "ProtoCoin");
        assert_eq!(config.symbol, "PRC");
        assert_eq!(config.decimals, 18);
        assert_eq!(
            config.initial_supply,
            U256::from(100u64) * U256::from(1_000_000_000_000_000_000u128)
        );
        assert_eq!(config.mint_cooldown_secs, 86_400);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let base = TokenConfig::default();

        let config = TokenConfig {
            name: String::new(),
            ..base.clone()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidName));

        let config = TokenConfig {
            symbol: "TOOLONGSYMBOL".to_string(),
            ..base.clone()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidSymbol));

        let config = TokenConfig {
            decimals: 19,
            ..base.clone()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidDecimals));

        let config = TokenConfig {
            initial_supply: U256::ZERO,
            ..base.clone()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidSupply));

        let config = base.with_cooldown(0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidCooldown));
    }
}
