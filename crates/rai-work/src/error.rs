//! Error types for work generation.

use std::time::Duration;
use thiserror::Error;

/// Ways a work search can end without a result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkError {
    /// The configured deadline passed before a nonce was found.
    #[error("deadline exceeded after {elapsed:?}")]
    DeadlineExceeded { elapsed: Duration },

    /// The caller's cancel token was triggered.
    #[error("work generation cancelled")]
    CancellationRequested,

    /// The attempt budget ran out.
    #[error("no valid work after {attempts} attempts")]
    AttemptsExhausted { attempts: u64 },

    /// The configuration cannot run.
    #[error("invalid work config: {0}")]
    InvalidConfig(String),

    /// A search thread panicked.
    #[error("work worker panicked")]
    WorkerPanicked,
}

/// Result type for work generation.
pub type Result<T> = std::result::Result<T, WorkError>;
