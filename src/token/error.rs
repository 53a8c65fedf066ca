//! Ledger error taxonomy
//!
//! Every variant aborts the operation that produced it with no state change.

use alloy_primitives::{Address, U256};
use thiserror::Error;

/// Errors returned by ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("ERC20InsufficientBalance: {account} has {balance}, needs {needed}")]
    InsufficientBalance {
        account: Address,
        balance: U256,
        needed: U256,
    },
    #[error("ERC20InsufficientAllowance: {spender} may spend {allowance}, needs {needed}")]
    InsufficientAllowance {
        spender: Address,
        allowance: U256,
        needed: U256,
    },
    #[error("You do not have permission.")]
    Unauthorized,
    #[error("Minting is not enabled.")]
    MintingDisabled,
    #[error("You cannot mint twice in a row.")]
    MintCooldownActive,
    #[error("Arithmetic overflow")]
    ArithmeticOverflow,
}

/// Errors raised while validating a [`TokenConfig`](crate::token::TokenConfig)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid name: must be 1-50 characters")]
    InvalidName,
    #[error("Invalid symbol: must be 1-10 characters")]
    InvalidSymbol,
    #[error("Invalid decimals: must be 0-18")]
    InvalidDecimals,
    #[error("Invalid supply: must be greater than 0")]
    InvalidSupply,
    #[error("Invalid mint cooldown: must be greater than 0 seconds")]
    InvalidCooldown,
}
