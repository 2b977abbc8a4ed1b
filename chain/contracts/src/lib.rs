//! Role-gated custodial smart wallet
//!
//! This crate implements a wallet account that holds native currency and
//! tokens on behalf of its owner, lets a delegated trader swap through a
//! fixed exchange venue, and only ever pays out to whitelisted destinations.
//!
//! # Modules
//! - `wallet`: The wallet itself (roles, whitelist, deposits, withdrawals, swaps)
//! - `ledger`: Value-transfer ledger capability and transactional overlay
//! - `venue`: Swap venue capability and a fixed-quote venue
//! - `security`: Role registry and withdrawal whitelist
//! - `config`: Deployment configuration
//! - `events`: Events appended by successful operations
//! - `errors`: Contract-specific error types

pub mod config;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod security;
pub mod venue;
pub mod wallet;

pub use config::WalletConfig;
pub use errors::{ConfigError, LedgerError, VenueError, WalletError};
pub use events::ContractEvent;
pub use ledger::{InMemoryLedger, Ledger, LedgerExt, LedgerTx};
pub use security::{Role, RoleRegistry, WithdrawalWhitelist};
pub use venue::{QuoteVenue, SwapRoute, SwapVenue, VenueCall};
pub use wallet::{SmartWallet, SwapReceipt, SwapRequest};

/// Contract ABI version, frozen after release
pub const CONTRACT_ABI_VERSION: &str = "1.0.0";
