//! Swap venue capability
//!
//! The wallet forwards a caller-supplied payload to a venue without parsing
//! it. Whatever the payload encodes, the wallet only trusts the net balance
//! change it measures on the ledger afterwards.

use serde::{Deserialize, Serialize};
use tracing::debug;
use types::ids::{Address, Asset};
use types::numeric::Amount;

use crate::errors::VenueError;
use crate::ledger::{Ledger, LedgerExt};

/// A single invocation of a venue by an account.
#[derive(Debug, Clone, Copy)]
pub struct VenueCall<'a> {
    /// Account invoking the venue (the wallet).
    pub sender: Address,
    /// Opaque instruction payload, forwarded verbatim.
    pub payload: &'a [u8],
}

/// External exchange that executes an opaque swap instruction.
///
/// `execute` may move assets on `ledger` in any way its payload describes,
/// within the allowances the sender granted. Returning an error reports a
/// failed call; the caller is responsible for discarding any ledger writes
/// made before the failure.
pub trait SwapVenue {
    /// Fixed identity of the venue on the ledger (the spender the wallet
    /// approves).
    fn address(&self) -> Address;

    fn execute(&mut self, ledger: &mut dyn Ledger, call: &VenueCall<'_>) -> Result<(), VenueError>;
}

/// Instruction understood by [`QuoteVenue`]: pull `amount_in` of `token_in`
/// from the sender and pay `amount_out` of `token_out` to `recipient`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRoute {
    pub token_in: Address,
    pub token_out: Address,
    pub amount_in: Amount,
    pub amount_out: Amount,
    pub recipient: Address,
}

impl SwapRoute {
    /// JSON payload bytes for this route.
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn decode(payload: &[u8]) -> Result<Self, VenueError> {
        serde_json::from_slice(payload).map_err(|e| VenueError::MalformedPayload {
            reason: e.to_string(),
        })
    }
}

/// Fixed-quote venue settling against reserves it holds on the ledger.
///
/// The quote is whatever the route says; the venue does not price anything.
/// It is the off-chain router's job to produce a sensible route and the
/// wallet's job to reject one that pays too little.
#[derive(Debug, Clone)]
pub struct QuoteVenue {
    address: Address,
    halted: bool,
}

impl QuoteVenue {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            halted: false,
        }
    }

    /// While halted every call is rejected.
    pub fn set_halted(&mut self, halted: bool) {
        self.halted = halted;
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }
}

impl SwapVenue for QuoteVenue {
    fn address(&self) -> Address {
        self.address
    }

    fn execute(&mut self, ledger: &mut dyn Ledger, call: &VenueCall<'_>) -> Result<(), VenueError> {
        if self.halted {
            return Err(VenueError::Rejected {
                reason: "venue halted".to_string(),
            });
        }

        let route = SwapRoute::decode(call.payload)?;
        if route.token_in == route.token_out {
            return Err(VenueError::RouteMismatch {
                reason: format!("input and output are both {}", route.token_in),
            });
        }

        // Pull input first; the caller's transaction scope undoes it if
        // anything below fails.
        ledger.transfer_from(
            &route.token_in,
            &self.address,
            &call.sender,
            &self.address,
            route.amount_in,
        )?;

        let out_asset = Asset::Token(route.token_out);
        let reserves = ledger.balance_of(&out_asset, &self.address);
        if reserves < route.amount_out {
            return Err(VenueError::InsufficientLiquidity {
                token: route.token_out,
                required: route.amount_out,
                available: reserves,
            });
        }

        ledger.transfer(&out_asset, &self.address, &route.recipient, route.amount_out)?;

        debug!(
            venue = %self.address,
            sender = %call.sender,
            token_in = %route.token_in,
            token_out = %route.token_out,
            amount_in = %route.amount_in,
            amount_out = %route.amount_out,
            "Route settled"
        );
        Ok(())
    }
}
