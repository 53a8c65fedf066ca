//! State-change notifications
//!
//! The event log is the audit trail external consumers rely on. A mint is a
//! transfer with no sender.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Notification emitted by a successful mutating operation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// Balance movement; `from == None` is supply expansion
    Transfer {
        from: Option<Address>,
        to: Option<Address>,
        amount: U256,
    },
    /// Allowance set to an absolute value
    Approval {
        owner: Address,
        spender: Address,
        amount: U256,
    },
}

impl LedgerEvent {
    pub fn transfer(from: Address, to: Address, amount: U256) -> Self {
        LedgerEvent::Transfer {
            from: Some(from),
            to: Some(to),
            amount,
        }
    }

    pub fn mint(to: Address, amount: U256) -> Self {
        LedgerEvent::Transfer {
            from: None,
            to: Some(to),
            amount,
        }
    }

    pub fn approval(owner: Address, spender: Address, amount: U256) -> Self {
        LedgerEvent::Approval {
            owner,
            spender,
            amount,
        }
    }

    /// Whether this event touches `account` in any role
    pub fn involves(&self, account: &Address) -> bool {
        match self {
            LedgerEvent::Transfer { from, to, .. } => {
                from.as_ref() == Some(account) || to.as_ref() == Some(account)
            }
            LedgerEvent::Approval { owner, spender, .. } => owner == account || spender == account,
        }
    }
}

/// Rebuilds balances and supply from a transfer stream
///
/// Approvals do not move value and are skipped. A full ledger log starts
/// with the genesis mint, so an empty indexer is the right starting point.
#[derive(Debug, Default, Clone)]
pub struct BalanceIndexer {
    balances: HashMap<Address, U256>,
    total_supply: U256,
}

impl BalanceIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event. Returns `false` if the event would drive a balance
    /// negative or overflow, which means the stream is not a valid ledger log.
    pub fn apply(&mut self, event: &LedgerEvent) -> bool {
        let LedgerEvent::Transfer { from, to, amount } = event else {
            return true;
        };

        match from {
            Some(sender) => {
                let balance = self.balance_of(sender);
                match balance.checked_sub(*amount) {
                    Some(rest) => {
                        self.balances.insert(*sender, rest);
                    }
                    None => return false,
                }
            }
            None => match self.total_supply.checked_add(*amount) {
                Some(total) => self.total_supply = total,
                None => return false,
            },
        }

        match to {
            Some(receiver) => match self.balance_of(receiver).checked_add(*amount) {
                Some(next) => {
                    self.balances.insert(*receiver, next);
                }
                None => return false,
            },
            None => match self.total_supply.checked_sub(*amount) {
                Some(total) => self.total_supply = total,
                None => return false,
            },
        }

        true
    }

    /// Apply every event in order, stopping at the first invalid one
    pub fn apply_all<'a>(&mut self, events: impl IntoIterator<Item = &'a LedgerEvent>) -> bool {
        events.into_iter().all(|event| self.apply(event))
    }

    pub fn balance_of(&self, account: &Address) -> U256 {
        self.balances.get(account).copied().unwrap_or(U256::ZERO)
    }

    pub fn total_supply(&self) -> U256 {
        self.total_supply
    }

    /// Accounts left with a non-zero balance
    pub fn holder_count(&self) -> usize {
        self.balances.values().filter(|b| !b.is_zero()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexer_follows_transfers_and_mints() {
        let alice = Address::repeat_byte(1);
        let bob = Address::repeat_byte(2);
        let mut indexer = BalanceIndexer::new();

        let events = vec![
            LedgerEvent::mint(alice, U256::from(100)),
            LedgerEvent::transfer(alice, bob, U256::from(40)),
            LedgerEvent::approval(bob, alice, U256::from(7)),
            LedgerEvent::mint(bob, U256::from(10)),
        ];

        assert!(indexer.apply_all(&events));
        assert_eq!(indexer.balance_of(&alice), U256::from(60));
        assert_eq!(indexer.balance_of(&bob), U256::from(50));
        assert_eq!(indexer.total_supply(), U256::from(110));
        assert_eq!(indexer.holder_count(), 2);

        indexer.apply(&LedgerEvent::transfer(bob, alice, U256::from(50)));
        assert_eq!(indexer.holder_count(), 1);
    }

    #[test]
    fn test_indexer_rejects_overdraft() {
        let alice = Address::repeat_byte(1);
        let bob = Address::repeat_byte(2);
        let mut indexer = BalanceIndexer::new();

        assert!(!indexer.apply(&LedgerEvent::transfer(alice, bob, U256::from(1))));
    }

    #[test]
    fn test_event_json_shape() {
        let event = LedgerEvent::mint(Address::repeat_byte(3), U256::from(100));
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["kind"], "transfer");
        assert!(json["from"].is_null());

        let back: LedgerEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_involves() {
        let alice = Address::repeat_byte(1);
        let bob = Address::repeat_byte(2);
        let carol = Address::repeat_byte(3);

        let event = LedgerEvent::approval(alice, bob, U256::from(1));
        assert!(event.involves(&alice));
        assert!(event.involves(&bob));
        assert!(!event.involves(&carol));
    }
}
