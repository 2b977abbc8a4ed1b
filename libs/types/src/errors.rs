//! Error types for shared identity and amount parsing

use thiserror::Error;

/// Errors raised while constructing shared types from external input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TypesError {
    #[error("Invalid address: {input}")]
    InvalidAddress { input: String },

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },
}
