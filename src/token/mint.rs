//! Owner-configured, cooldown-gated self-service minting
//!
//! Minting is disabled while the mint amount is zero. Once the owner sets a
//! non-zero amount, any account may mint that amount to itself, at most once
//! per cooldown interval. Cooldowns are tracked per account.

use crate::token::clock::Timestamp;
use crate::token::error::TokenError;
use crate::token::events::LedgerEvent;
use crate::token::token::ProtoCoin;
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Where an account stands in its mint cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MintStatus {
    /// The account has never minted
    NeverMinted,
    /// At least one full interval has passed since the last mint
    CooledDown,
    /// A mint is not possible for another `remaining` seconds
    Cooling { remaining: u64 },
}

impl MintStatus {
    pub fn can_mint(&self) -> bool {
        !matches!(self, MintStatus::Cooling { .. })
    }
}

/// Mint configuration and last-mint bookkeeping
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MintController {
    /// Amount credited per mint; zero disables minting
    mint_amount: U256,
    /// Minimum seconds between mints by one account
    cooldown_secs: u64,
    /// Last successful mint per account
    last_mint: HashMap<Address, Timestamp>,
}

impl MintController {
    pub fn new(cooldown_secs: u64) -> Self {
        Self {
            mint_amount: U256::ZERO,
            cooldown_secs,
            last_mint: HashMap::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.mint_amount.is_zero()
    }

    pub fn status(&self, account: &Address, now: Timestamp) -> MintStatus {
        match self.last_mint.get(account) {
            None => MintStatus::NeverMinted,
            Some(&last) => {
                // A clock behind the last mint counts as no time elapsed
                let elapsed = now.saturating_sub(last);
                if elapsed >= self.cooldown_secs {
                    MintStatus::CooledDown
                } else {
                    MintStatus::Cooling {
                        remaining: self.cooldown_secs - elapsed,
                    }
                }
            }
        }
    }
}

impl ProtoCoin {
    /// Set the amount each mint credits; zero disables minting
    ///
    /// Only the owner may call this. Existing cooldowns are unaffected.
    pub fn set_mint_amount(&mut self, caller: Address, amount: U256) -> Result<(), TokenError> {
        if caller != self.owner {
            log::warn!("set_mint_amount rejected for non-owner {}", caller);
            return Err(TokenError::Unauthorized);
        }

        self.minting.mint_amount = amount;
        log::info!("mint amount set to {}", amount);
        Ok(())
    }

    /// Credit the configured mint amount to the caller
    ///
    /// `now` is the execution environment's clock at the time of the call.
    pub fn mint(&mut self, caller: Address, now: Timestamp) -> Result<LedgerEvent, TokenError> {
        if !self.minting.is_enabled() {
            return Err(TokenError::MintingDisabled);
        }

        if !self.minting.status(&caller, now).can_mint() {
            return Err(TokenError::MintCooldownActive);
        }

        let amount = self.minting.mint_amount;
        self.store.credit(caller, amount)?;
        self.minting.last_mint.insert(caller, now);

        log::info!("minted {} to {} at {}", amount, caller, now);
        Ok(self.emit(LedgerEvent::mint(caller, amount)))
    }

    /// Current mint amount; zero while minting is disabled
    pub fn mint_amount(&self) -> U256 {
        self.minting.mint_amount
    }

    pub fn mint_cooldown(&self) -> u64 {
        self.minting.cooldown_secs
    }

    pub fn last_mint(&self, account: &Address) -> Option<Timestamp> {
        self.minting.last_mint.get(account).copied()
    }

    pub fn mint_status(&self, account: &Address, now: Timestamp) -> MintStatus {
        self.minting.status(account, now)
    }
}
