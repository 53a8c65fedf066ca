//! Transfers and approvals
//!
//! `caller` is always the authenticated account that invoked the operation.
//! It is derived at the call boundary and never taken from a payload field.

use crate::token::error::TokenError;
use crate::token::events::LedgerEvent;
use crate::token::token::ProtoCoin;
use alloy_primitives::{Address, U256};

/// Allowance value that `transfer_from` never decrements
pub const UNLIMITED_ALLOWANCE: U256 = U256::MAX;

impl ProtoCoin {
    /// Transfer tokens from the caller to another account
    ///
    /// Zero amounts and self-transfers are allowed and still emit an event.
    pub fn transfer(
        &mut self,
        caller: Address,
        to: Address,
        amount: U256,
    ) -> Result<LedgerEvent, TokenError> {
        self.store.move_balance(caller, to, amount)?;

        log::debug!("transfer {} -> {}: {}", caller, to, amount);
        Ok(self.emit(LedgerEvent::transfer(caller, to, amount)))
    }

    /// Set how much `spender` may draw from the caller's balance
    ///
    /// The new value replaces the old one. A spender that watches for the
    /// replacement can spend the old allowance first and then the new one;
    /// owners who care set the allowance to zero before changing it.
    pub fn approve(&mut self, caller: Address, spender: Address, amount: U256) -> LedgerEvent {
        self.store.set_allowance(caller, spender, amount);

        log::debug!("approve {} for {}: {}", spender, caller, amount);
        self.emit(LedgerEvent::approval(caller, spender, amount))
    }

    /// Spend from `from`'s balance using the caller's allowance
    ///
    /// An allowance shortfall is reported before a balance shortfall.
    pub fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<LedgerEvent, TokenError> {
        let current_allowance = self.store.allowance(&from, &caller);
        if current_allowance < amount {
            return Err(TokenError::InsufficientAllowance {
                spender: caller,
                allowance: current_allowance,
                needed: amount,
            });
        }

        // Fails on a short balance before the allowance is touched
        self.store.move_balance(from, to, amount)?;

        if current_allowance != UNLIMITED_ALLOWANCE {
            self.store.set_allowance(from, caller, current_allowance - amount);
        }

        log::debug!("transfer_from {} -> {} by {}: {}", from, to, caller, amount);
        Ok(self.emit(LedgerEvent::transfer(from, to, amount)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::config::unit;

    fn owner() -> Address {
        Address::repeat_byte(0x01)
    }

    fn other() -> Address {
        Address::repeat_byte(0x02)
    }

    fn third() -> Address {
        Address::repeat_byte(0x03)
    }

    fn genesis_supply() -> U256 {
        U256::from(100) * unit(18)
    }

    #[test]
    fn test_transfer() {
        let mut token = ProtoCoin::new(owner());

        let event = token.transfer(owner(), other(), U256::from(1)).unwrap();

        assert_eq!(event, LedgerEvent::transfer(owner(), other(), U256::from(1)));
        assert_eq!(token.balance_of(&owner()), genesis_supply() - U256::from(1));
        assert_eq!(token.balance_of(&other()), U256::from(1));
        assert_eq!(token.events().last(), Some(&event));
        assert!(token.is_conserved());
    }

    #[test]
    fn test_transfer_insufficient_balance() {
        let mut token = ProtoCoin::new(owner());
        let events_before = token.events().len();

        let result = token.transfer(other(), owner(), U256::from(1));

        assert!(matches!(
            result,
            Err(TokenError::InsufficientBalance { account, .. }) if account == other()
        ));
        assert_eq!(token.balance_of(&owner()), genesis_supply());
        assert_eq!(token.balance_of(&other()), U256::ZERO);
        assert_eq!(token.events().len(), events_before);
    }

    #[test]
    fn test_transfer_zero_and_self() {
        let mut token = ProtoCoin::new(owner());

        token.transfer(other(), owner(), U256::ZERO).unwrap();
        token.transfer(owner(), owner(), U256::from(5)).unwrap();

        assert_eq!(token.balance_of(&owner()), genesis_supply());
        assert_eq!(token.balance_of(&other()), U256::ZERO);
    }

    #[test]
    fn test_approve_and_allowance() {
        let mut token = ProtoCoin::new(owner());

        assert_eq!(token.allowance(&owner(), &other()), U256::ZERO);

        let event = token.approve(owner(), other(), U256::from(1));
        assert_eq!(event, LedgerEvent::approval(owner(), other(), U256::from(1)));
        assert_eq!(token.allowance(&owner(), &other()), U256::from(1));

        // Overwrites, not additive
        token.approve(owner(), other(), U256::from(5));
        assert_eq!(token.allowance(&owner(), &other()), U256::from(5));

        token.approve(owner(), other(), U256::ZERO);
        assert_eq!(token.allowance(&owner(), &other()), U256::ZERO);
    }

    #[test]
    fn test_transfer_from() {
        let mut token = ProtoCoin::new(owner());

        token.approve(owner(), other(), U256::from(10));
        let event = token
            .transfer_from(other(), owner(), other(), U256::from(5))
            .unwrap();

        assert_eq!(event, LedgerEvent::transfer(owner(), other(), U256::from(5)));
        assert_eq!(token.balance_of(&owner()), genesis_supply() - U256::from(5));
        assert_eq!(token.balance_of(&other()), U256::from(5));
        assert_eq!(token.allowance(&owner(), &other()), U256::from(5));
        assert!(token.is_conserved());
    }

    #[test]
    fn test_transfer_from_to_third_party() {
        let mut token = ProtoCoin::new(owner());

        token.approve(owner(), other(), U256::from(10));
        token
            .transfer_from(other(), owner(), third(), U256::from(10))
            .unwrap();

        assert_eq!(token.balance_of(&third()), U256::from(10));
        assert_eq!(token.balance_of(&other()), U256::ZERO);
        assert_eq!(token.allowance(&owner(), &other()), U256::ZERO);
    }

    #[test]
    fn test_transfer_from_insufficient_allowance() {
        let mut token = ProtoCoin::new(owner());

        let result = token.transfer_from(other(), owner(), other(), U256::from(1));
        assert!(matches!(
            result,
            Err(TokenError::InsufficientAllowance { spender, .. }) if spender == other()
        ));

        token.approve(owner(), other(), U256::from(5));
        let result = token.transfer_from(other(), owner(), other(), U256::from(6));
        assert!(matches!(result, Err(TokenError::InsufficientAllowance { .. })));
        assert_eq!(token.allowance(&owner(), &other()), U256::from(5));
    }

    #[test]
    fn test_transfer_from_insufficient_balance() {
        let mut token = ProtoCoin::new(owner());

        // other holds nothing but has approved owner generously
        token.approve(other(), owner(), U256::from(100));
        let result = token.transfer_from(owner(), other(), owner(), U256::from(1));

        assert!(matches!(
            result,
            Err(TokenError::InsufficientBalance { account, .. }) if account == other()
        ));
        assert_eq!(token.allowance(&other(), &owner()), U256::from(100));
    }

    #[test]
    fn test_allowance_error_wins_when_both_short() {
        let mut token = ProtoCoin::new(owner());

        token.approve(other(), owner(), U256::from(1));
        let result = token.transfer_from(owner(), other(), owner(), U256::from(2));

        assert!(matches!(result, Err(TokenError::InsufficientAllowance { .. })));
    }

    #[test]
    fn test_unlimited_allowance_is_not_consumed() {
        let mut token = ProtoCoin::new(owner());

        token.approve(owner(), other(), UNLIMITED_ALLOWANCE);
        token
            .transfer_from(other(), owner(), third(), U256::from(42))
            .unwrap();

        assert_eq!(token.allowance(&owner(), &other()), UNLIMITED_ALLOWANCE);
        assert_eq!(token.balance_of(&third()), U256::from(42));
    }
}
