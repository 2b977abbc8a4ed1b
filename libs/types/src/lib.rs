//! Types library for the custodial smart wallet
//!
//! Core type definitions shared by the wallet contract and its ledger and
//! venue collaborators.
//!
//! # Modules
//! - `ids`: Participant and asset identities (Address, Asset)
//! - `numeric`: Integer base-unit amounts (Amount)
//! - `errors`: Parse and conversion errors

pub mod ids;
pub mod numeric;
pub mod errors;
