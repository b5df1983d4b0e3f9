//! Error types for the rai facade.

use rai_core::{Amount, CoreError, ValidationError};
use rai_work::WorkError;
use thiserror::Error;

/// Errors that can occur while building blocks.
#[derive(Debug, Error)]
pub enum RaiError {
    /// Malformed address, key, seed or hex input.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// A finished block failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Work generation ended without a nonce.
    #[error("work error: {0}")]
    Work(#[from] WorkError),

    /// The blocking work task could not be joined.
    #[error("work task failed: {0}")]
    TaskJoin(String),

    /// A send would take the balance below zero.
    #[error("insufficient balance: have {balance}, need {amount}")]
    InsufficientBalance { balance: Amount, amount: Amount },

    /// A receive would overflow the balance.
    #[error("balance overflow: {balance} + {amount}")]
    BalanceOverflow { balance: Amount, amount: Amount },

    /// The operation does not fit the account's current state.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

/// Result type for rai operations.
pub type Result<T> = std::result::Result<T, RaiError>;
