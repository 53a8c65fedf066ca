//! ProtoCoin: a fungible token ledger in Rust
//!
//! This crate provides:
//! - An ERC-20 style ledger with balances, allowances and delegated transfers
//! - Owner-configured minting gated by a per-account cooldown
//! - An ordered event log and a balance indexer that replays it
//! - JSON snapshot persistence with SHA-256 integrity checks
//! - Command handlers for the `protocoin` CLI
//!
//! # Example
//!
//! ```rust
//! use alloy_primitives::{Address, U256};
//! use protocoin::token::{Clock, ManualClock, ProtoCoin, SECONDS_PER_DAY};
//!
//! let owner = Address::repeat_byte(1);
//! let spender = Address::repeat_byte(2);
//! let clock = ManualClock::new(1_700_000_000);
//!
//! let mut token = ProtoCoin::new(owner);
//! token.approve(owner, spender, U256::from(10));
//! token.transfer_from(spender, owner, spender, U256::from(5)).unwrap();
//! assert_eq!(token.allowance(&owner, &spender), U256::from(5));
//!
//! token.set_mint_amount(owner, U256::from(100)).unwrap();
//! token.mint(spender, clock.now()).unwrap();
//! assert!(token.mint(spender, clock.now()).is_err());
//!
//! clock.advance(SECONDS_PER_DAY);
//! token.mint(spender, clock.now()).unwrap();
//! assert_eq!(token.balance_of(&spender), U256::from(205));
//! ```

pub mod cli;
pub mod crypto;
pub mod storage;
pub mod token;

// Re-export commonly used types
pub use storage::{Storage, StorageConfig};
pub use token::{LedgerEvent, MintStatus, ProtoCoin, TokenConfig, TokenError};
