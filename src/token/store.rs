//! Balance and allowance bookkeeping
//!
//! The store is the only place balances and total supply change. Each
//! primitive computes every new value before writing any of them, so a
//! failed call leaves the store untouched.

use crate::token::error::TokenError;
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ledger tables: balances, allowances and total supply
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerStore {
    /// Sum of all balances
    total_supply: U256,
    /// Balances: account -> amount
    balances: HashMap<Address, U256>,
    /// Allowances: owner -> (spender -> amount)
    allowances: HashMap<Address, HashMap<Address, U256>>,
}

impl LedgerStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with the whole genesis supply held by `holder`
    pub fn with_genesis(holder: Address, supply: U256) -> Self {
        let mut balances = HashMap::new();
        balances.insert(holder, supply);

        Self {
            total_supply: supply,
            balances,
            allowances: HashMap::new(),
        }
    }

    pub fn total_supply(&self) -> U256 {
        self.total_supply
    }

    /// Balance of `account`; unknown accounts hold zero
    pub fn balance_of(&self, account: &Address) -> U256 {
        self.balances.get(account).copied().unwrap_or(U256::ZERO)
    }

    /// Amount `spender` may still draw from `owner`
    pub fn allowance(&self, owner: &Address, spender: &Address) -> U256 {
        self.allowances
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or(U256::ZERO)
    }

    /// Accounts with a non-zero balance
    pub fn holders(&self) -> Vec<(&Address, &U256)> {
        self.balances.iter().filter(|(_, b)| !b.is_zero()).collect()
    }

    pub fn holder_count(&self) -> usize {
        self.balances.values().filter(|b| !b.is_zero()).count()
    }

    /// True when the balances add up to the total supply
    pub fn is_conserved(&self) -> bool {
        self.balances
            .values()
            .try_fold(U256::ZERO, |acc, b| acc.checked_add(*b))
            .map(|sum| sum == self.total_supply)
            .unwrap_or(false)
    }

    /// Add `amount` to `account` and to the total supply
    ///
    /// This is the only path that grows the supply.
    pub(crate) fn credit(&mut self, account: Address, amount: U256) -> Result<(), TokenError> {
        let new_total = self
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::ArithmeticOverflow)?;
        let new_balance = self
            .balance_of(&account)
            .checked_add(amount)
            .ok_or(TokenError::ArithmeticOverflow)?;

        self.total_supply = new_total;
        self.balances.insert(account, new_balance);
        Ok(())
    }

    /// Move `amount` from `from` to `to`, leaving the total supply unchanged
    ///
    /// A zero amount and a self-move both succeed without changing balances.
    pub(crate) fn move_balance(
        &mut self,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), TokenError> {
        let from_balance = self.balance_of(&from);
        if from_balance < amount {
            return Err(TokenError::InsufficientBalance {
                account: from,
                balance: from_balance,
                needed: amount,
            });
        }

        if from == to {
            return Ok(());
        }

        let new_from = from_balance
            .checked_sub(amount)
            .ok_or(TokenError::ArithmeticOverflow)?;
        let new_to = self
            .balance_of(&to)
            .checked_add(amount)
            .ok_or(TokenError::ArithmeticOverflow)?;

        self.balances.insert(from, new_from);
        self.balances.insert(to, new_to);
        Ok(())
    }

    /// Overwrite the allowance of `spender` over `owner`'s balance
    pub(crate) fn set_allowance(&mut self, owner: Address, spender: Address, amount: U256) {
        self.allowances
            .entry(owner)
            .or_default()
            .insert(spender, amount);
    }
}
