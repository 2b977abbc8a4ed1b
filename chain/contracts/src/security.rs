//! Shared security primitives for the wallet
//!
//! Role registry (single owner, single trader) and the withdrawal
//! destination whitelist.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use types::ids::Address;

/// Roles recognised by the wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Administrative control: role reassignment, whitelist management
    Owner,
    /// May withdraw to whitelisted destinations and initiate swaps
    Trader,
}

/// Holder of the owner and trader slots.
///
/// There is always exactly one owner. The trader may be the same identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRegistry {
    owner: Address,
    trader: Address,
}

impl RoleRegistry {
    pub fn new(owner: Address, trader: Address) -> Self {
        Self { owner, trader }
    }

    pub fn has_role(&self, caller: &Address, role: Role) -> bool {
        match role {
            Role::Owner => *caller == self.owner,
            Role::Trader => *caller == self.trader,
        }
    }

    pub fn is_owner(&self, caller: &Address) -> bool {
        self.has_role(caller, Role::Owner)
    }

    pub fn is_trader(&self, caller: &Address) -> bool {
        self.has_role(caller, Role::Trader)
    }

    /// Owner or trader: may move funds out of the wallet.
    pub fn is_operator(&self, caller: &Address) -> bool {
        self.is_owner(caller) || self.is_trader(caller)
    }

    /// Hand the owner slot to `new_owner`. Only the current owner can.
    ///
    /// `new_owner` is not validated; passing an unreachable identity locks
    /// administration permanently.
    pub fn transfer_ownership(&mut self, caller: &Address, new_owner: Address) -> bool {
        if !self.is_owner(caller) {
            return false;
        }
        self.owner = new_owner;
        true
    }

    /// Replace the trader. Only the owner can.
    pub fn set_trader(&mut self, caller: &Address, new_trader: Address) -> bool {
        if !self.is_owner(caller) {
            return false;
        }
        self.trader = new_trader;
        true
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn trader(&self) -> Address {
        self.trader
    }
}

/// Destinations approved to receive withdrawals.
///
/// Membership is explicit: neither the owner nor the trader is implicitly a
/// member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WithdrawalWhitelist {
    entries: HashSet<Address>,
}

impl WithdrawalWhitelist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `addr` was not already present.
    pub fn insert(&mut self, addr: Address) -> bool {
        self.entries.insert(addr)
    }

    /// Returns `true` if `addr` was present.
    pub fn remove(&mut self, addr: &Address) -> bool {
        self.entries.remove(addr)
    }

    pub fn contains(&self, addr: &Address) -> bool {
        self.entries.contains(addr)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Members in ascending address order.
    pub fn sorted(&self) -> Vec<Address> {
        let mut members: Vec<Address> = self.entries.iter().copied().collect();
        members.sort();
        members
    }
}
