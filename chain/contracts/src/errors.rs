//! Contract-specific error types
//!
//! Error taxonomy for the wallet and its ledger, venue and configuration
//! collaborators.

use thiserror::Error;
use types::ids::Address;
use types::numeric::Amount;

/// Errors surfaced by wallet operations.
///
/// Any of these leaves the wallet and the ledger exactly as they were before
/// the failing call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WalletError {
    #[error("Unauthorized: caller lacks the required role")]
    Unauthorized,

    #[error("Swap input and output are the same token: {token}")]
    IdenticalTokens { token: Address },

    #[error("Destination not whitelisted: {destination}")]
    DestinationNotWhitelisted { destination: Address },

    #[error("Insufficient balance for {asset}: required {required}, available {available}")]
    InsufficientBalance {
        asset: String,
        required: Amount,
        available: Amount,
    },

    #[error("Venue call failed: {0}")]
    VenueCallFailed(#[from] VenueError),

    #[error("Slippage exceeded: received {received}, minimum {minimum}")]
    SlippageExceeded { received: Amount, minimum: Amount },

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

/// Errors raised by the value-transfer ledger.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Insufficient balance for {asset}: required {required}, available {available}")]
    InsufficientBalance {
        asset: String,
        required: Amount,
        available: Amount,
    },

    #[error("Insufficient allowance on {token}: required {required}, approved {approved}")]
    InsufficientAllowance {
        token: Address,
        required: Amount,
        approved: Amount,
    },

    #[error("Arithmetic overflow in balance calculation")]
    Overflow,

    #[error("Unsupported asset for this operation: {asset}")]
    UnsupportedAsset { asset: String },
}

/// Errors reported by an external swap venue.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VenueError {
    #[error("Malformed payload: {reason}")]
    MalformedPayload { reason: String },

    #[error("Route mismatch: {reason}")]
    RouteMismatch { reason: String },

    #[error("Insufficient venue liquidity for {token}: required {required}, available {available}")]
    InsufficientLiquidity {
        token: Address,
        required: Amount,
        available: Amount,
    },

    #[error("Settlement failed: {0}")]
    Settlement(#[from] LedgerError),

    #[error("Venue rejected call: {reason}")]
    Rejected { reason: String },

    #[error("Venue overdrew {token}: approved {approved}, debited {debited}")]
    Overdrawn {
        token: Address,
        approved: Amount,
        debited: Amount,
    },
}

/// Configuration loading errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid wallet configuration: {reason}")]
    Invalid { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_error_display() {
        let err = WalletError::DestinationNotWhitelisted {
            destination: Address::repeat_byte(0x0a),
        };
        assert_eq!(
            err.to_string(),
            "Destination not whitelisted: 0x0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a"
        );
    }

    #[test]
    fn test_slippage_error_display() {
        let err = WalletError::SlippageExceeded {
            received: Amount::new(2),
            minimum: Amount::new(3),
        };
        assert!(err.to_string().contains("received 2"));
        assert!(err.to_string().contains("minimum 3"));
    }

    #[test]
    fn test_wallet_error_from_venue() {
        let venue_err = VenueError::Rejected {
            reason: "paused".to_string(),
        };
        let wallet_err: WalletError = venue_err.into();
        assert!(matches!(wallet_err, WalletError::VenueCallFailed(_)));
    }

    #[test]
    fn test_wallet_error_from_ledger() {
        let wallet_err: WalletError = LedgerError::Overflow.into();
        assert_eq!(wallet_err, WalletError::Ledger(LedgerError::Overflow));
    }

    #[test]
    fn test_venue_error_from_ledger() {
        let venue_err: VenueError = LedgerError::Overflow.into();
        assert!(matches!(venue_err, VenueError::Settlement(_)));
    }
}
