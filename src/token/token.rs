//! The ProtoCoin ledger aggregate
//!
//! Owns the ledger tables, the mint configuration, the owner identity and the
//! event log. Operations are split across [`engine`](super::engine) (transfers
//! and approvals) and [`mint`](super::mint) (owner-gated issuance).

use crate::token::config::TokenConfig;
use crate::token::error::ConfigError;
use crate::token::events::LedgerEvent;
use crate::token::mint::MintController;
use crate::token::store::LedgerStore;
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// An ERC-20 style fungible token with cooldown-gated self-service minting
///
/// Every public operation either commits all of its changes and returns the
/// emitted event, or returns an error and leaves the ledger exactly as it was.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProtoCoin {
    /// Fixed token parameters
    pub(crate) config: TokenConfig,
    /// Account that received the genesis supply and configures minting
    pub(crate) owner: Address,
    /// Balances, allowances and total supply
    pub(crate) store: LedgerStore,
    /// Mint amount and per-account cooldowns
    pub(crate) minting: MintController,
    /// Every emitted event in commit order
    pub(crate) events: Vec<LedgerEvent>,
}

impl ProtoCoin {
    /// Deploy with the default ProtoCoin parameters
    pub fn new(owner: Address) -> Self {
        let config = TokenConfig::default();
        Self::genesis(owner, config)
    }

    /// Deploy with custom parameters
    pub fn with_config(owner: Address, config: TokenConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::genesis(owner, config))
    }

    fn genesis(owner: Address, config: TokenConfig) -> Self {
        let supply = config.initial_supply;
        let minting = MintController::new(config.mint_cooldown_secs);

        log::info!(
            "{} ({}) genesis: {} base units to {}",
            config.name,
            config.symbol,
            supply,
            owner
        );

        Self {
            store: LedgerStore::with_genesis(owner, supply),
            events: vec![LedgerEvent::mint(owner, supply)],
            config,
            owner,
            minting,
        }
    }

    // =========================================================================
    // ERC-20 View Functions
    // =========================================================================

    /// Get token name
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Get token symbol
    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }

    /// Get decimal places
    pub fn decimals(&self) -> u8 {
        self.config.decimals
    }

    pub fn total_supply(&self) -> U256 {
        self.store.total_supply()
    }

    /// Get balance of an account
    pub fn balance_of(&self, account: &Address) -> U256 {
        self.store.balance_of(account)
    }

    /// Get allowance for a spender
    pub fn allowance(&self, owner: &Address, spender: &Address) -> U256 {
        self.store.allowance(owner, spender)
    }

    // =========================================================================
    // Ledger inspection
    // =========================================================================

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// Get all holders with balances
    pub fn holders(&self) -> Vec<(&Address, &U256)> {
        self.store.holders()
    }

    pub fn holder_count(&self) -> usize {
        self.store.holder_count()
    }

    /// Balances add up to the total supply
    pub fn is_conserved(&self) -> bool {
        self.store.is_conserved()
    }

    /// All events in commit order, starting with the genesis mint
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Events involving `account`
    pub fn events_for(&self, account: Address) -> impl Iterator<Item = &LedgerEvent> + '_ {
        self.events
            .iter()
            .filter(move |event| event.involves(&account))
    }

    /// Append a committed event and hand it back to the caller
    pub(crate) fn emit(&mut self, event: LedgerEvent) -> LedgerEvent {
        self.events.push(event.clone());
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::config::unit;
    use crate::token::events::BalanceIndexer;

    fn owner() -> Address {
        Address::repeat_byte(0x01)
    }

    #[test]
    fn test_metadata() {
        let token = ProtoCoin::new(owner());

        assert_eq!(token.name(), "ProtoCoin");
        assert_eq!(token.symbol(), "PRC");
        assert_eq!(token.decimals(), 18);
    }

    #[test]
    fn test_genesis_supply() {
        let token = ProtoCoin::new(owner());
        let supply = U256::from(100) * unit(18);

        assert_eq!(token.total_supply(), supply);
        assert_eq!(token.balance_of(&owner()), supply);
        assert_eq!(token.balance_of(&Address::repeat_byte(0x02)), U256::ZERO);
        assert_eq!(token.holder_count(), 1);
        assert_eq!(token.owner(), owner());
        assert!(token.is_conserved());
    }

    #[test]
    fn test_genesis_is_logged_as_mint() {
        let token = ProtoCoin::new(owner());

        assert_eq!(
            token.events(),
            &[LedgerEvent::mint(owner(), token.total_supply())]
        );

        let mut indexer = BalanceIndexer::new();
        assert!(indexer.apply_all(token.events()));
        assert_eq!(indexer.balance_of(&owner()), token.total_supply());

        assert_eq!(token.events_for(owner()).count(), 1);
        assert_eq!(token.events_for(Address::repeat_byte(0x02)).count(), 0);
    }

    #[test]
    fn test_with_config_validates() {
        let config = TokenConfig {
            decimals: 30,
            ..TokenConfig::default()
        };

        let result = ProtoCoin::with_config(owner(), config);
        assert!(matches!(result, Err(ConfigError::InvalidDecimals)));
    }

    #[test]
    fn test_with_config_custom_supply() {
        let config = TokenConfig {
            initial_supply: U256::from(1_000),
            ..TokenConfig::default()
        };

        let token = ProtoCoin::with_config(owner(), config).unwrap();
        assert_eq!(token.total_supply(), U256::from(1_000));
    }
}
