//! ProtoCoin: an ERC-20 style fungible token ledger
//!
//! Provides:
//! - Balances per account with a conserved total supply
//! - Allowances for delegated transfers
//! - Owner-configured minting with a per-account cooldown
//! - An ordered event log of every committed state change
//!
//! # Example
//!
//! ```
//! use alloy_primitives::{Address, U256};
//! use protocoin::token::ProtoCoin;
//!
//! let owner = Address::repeat_byte(1);
//! let user = Address::repeat_byte(2);
//! let mut token = ProtoCoin::new(owner);
//!
//! token.transfer(owner, user, U256::from(1_000)).unwrap();
//! assert_eq!(token.balance_of(&user), U256::from(1_000));
//!
//! token.set_mint_amount(owner, U256::from(100)).unwrap();
//! token.mint(user, 1_700_000_000).unwrap();
//! assert_eq!(token.balance_of(&user), U256::from(1_100));
//! ```

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod mint;
pub mod store;
pub mod token;
pub mod units;

pub use clock::{Clock, ManualClock, SystemClock, Timestamp, SECONDS_PER_DAY};
pub use config::{unit, TokenConfig, DEFAULT_MINT_COOLDOWN_SECS};
pub use engine::UNLIMITED_ALLOWANCE;
pub use error::{ConfigError, TokenError};
pub use events::{BalanceIndexer, LedgerEvent};
pub use mint::{MintController, MintStatus};
pub use store::LedgerStore;
pub use token::ProtoCoin;
pub use units::{format_units, parse_units, UnitsError};

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, U256};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Random operation sequences never break conservation, and the event
    /// log always replays to the live balances.
    #[test]
    fn test_random_operations_conserve_supply() {
        let mut rng = StdRng::seed_from_u64(7);
        let accounts: Vec<Address> = (1..=5u8).map(Address::repeat_byte).collect();
        let owner = accounts[0];
        let clock = ManualClock::new(1_700_000_000);

        let mut token = ProtoCoin::new(owner);
        token.set_mint_amount(owner, unit(18)).unwrap();

        for _ in 0..500 {
            let caller = accounts[rng.gen_range(0..accounts.len())];
            let a = accounts[rng.gen_range(0..accounts.len())];
            let b = accounts[rng.gen_range(0..accounts.len())];
            let amount = U256::from(rng.gen_range(0u64..5)) * unit(18);
            let before = token.clone();

            let result = match rng.gen_range(0..4) {
                0 => token.transfer(caller, a, amount),
                1 => Ok(token.approve(caller, a, amount)),
                2 => token.transfer_from(caller, a, b, amount),
                _ => token.mint(caller, clock.now()),
            };

            if result.is_err() {
                assert_eq!(token.events().len(), before.events().len());
                assert_eq!(token.total_supply(), before.total_supply());
                for account in &accounts {
                    assert_eq!(token.balance_of(account), before.balance_of(account));
                }
            }

            assert!(token.is_conserved());
            clock.advance(rng.gen_range(0..SECONDS_PER_DAY / 4));
        }

        let mut indexer = BalanceIndexer::new();
        assert!(indexer.apply_all(token.events()));
        assert_eq!(indexer.total_supply(), token.total_supply());
        for account in &accounts {
            assert_eq!(indexer.balance_of(account), token.balance_of(account));
        }
    }
}
