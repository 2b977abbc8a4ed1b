//! Wallet events
//!
//! Immutable records appended by each successful state-changing operation.
//! A failed operation appends nothing.

use serde::{Deserialize, Serialize};
use types::ids::{Address, Asset};
use types::numeric::Amount;
use uuid::Uuid;

/// Owner slot changed hands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipTransferred {
    pub previous_owner: Address,
    pub new_owner: Address,
}

/// Trader slot reassigned by the owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraderUpdated {
    pub previous_trader: Address,
    pub new_trader: Address,
}

/// Destination added to the withdrawal whitelist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalAddressAdded {
    pub destination: Address,
}

/// Destination removed from the withdrawal whitelist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalAddressRemoved {
    pub destination: Address,
}

/// Native currency or tokens received from an external party
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposited {
    pub from: Address,
    pub asset: Asset,
    pub amount: Amount,
}

/// Funds sent to a whitelisted destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawn {
    pub withdrawal_id: Uuid,
    pub caller: Address,
    pub asset: Asset,
    pub amount: Amount,
    pub destination: Address,
}

/// Swap committed with the slippage floor satisfied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapExecuted {
    pub swap_id: Uuid,
    pub caller: Address,
    pub venue: Address,
    pub input_token: Address,
    pub output_token: Address,
    /// Measured decrease of the input balance
    pub amount_in: Amount,
    /// Measured increase of the output balance
    pub amount_out: Amount,
    pub min_amount_out: Amount,
}

/// Enum wrapper for all wallet events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractEvent {
    OwnershipTransferred(OwnershipTransferred),
    TraderUpdated(TraderUpdated),
    WithdrawalAddressAdded(WithdrawalAddressAdded),
    WithdrawalAddressRemoved(WithdrawalAddressRemoved),
    Deposited(Deposited),
    Withdrawn(Withdrawn),
    SwapExecuted(SwapExecuted),
}
