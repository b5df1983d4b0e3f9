//! Error types for rai core.

use thiserror::Error;

/// Errors returned by the codec, key derivation and signature primitives.
///
/// None of these are retried internally: malformed input is reported to the
/// caller as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid address format: {0}")]
    InvalidAddressFormat(String),

    #[error("address checksum mismatch")]
    InvalidChecksum,

    #[error("invalid hex input: {0}")]
    InvalidHexInput(String),

    #[error("seed must be 32 bytes, got {0}")]
    InvalidSeedLength(usize),

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("invalid signature")]
    InvalidSignature,
}

impl From<hex::FromHexError> for CoreError {
    fn from(e: hex::FromHexError) -> Self {
        CoreError::InvalidHexInput(e.to_string())
    }
}

/// Validation errors for finished blocks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("signature verification failed")]
    SignatureFailed,

    #[error("block has no work attached")]
    MissingWork,

    #[error("insufficient work: value {value:#018x} does not exceed threshold {threshold:#018x}")]
    InsufficientWork { value: u64, threshold: u64 },

    #[error("structural error: {0}")]
    StructuralError(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
