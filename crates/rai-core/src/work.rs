//! Proof-of-work values and their validation.
//!
//! A work value is valid for a root when
//! `u64::from_le_bytes(Blake2b-64(work.to_le_bytes() || root)) > threshold`.
//! This is the same as byte-reversing the nonce before hashing and the digest
//! after, then reading big-endian. Searching for work lives in `rai-work`.

use blake2::Digest;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::account::Account;
use crate::crypto::Blake2b64;
use crate::error::{CoreError, Result};
use crate::types::{decode_hex_array, BlockHash};

/// The production admission threshold.
pub const WORK_THRESHOLD: u64 = 0xFFFF_FFC0_0000_0000;

/// A 64-bit proof-of-work nonce.
///
/// Written as 16 lowercase hex digits of the big-endian value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Work(pub u64);

impl Work {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Bytes in the order they are hashed.
    pub const fn to_hash_bytes(&self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    /// Inverse of [`Work::to_hash_bytes`].
    pub const fn from_hash_bytes(bytes: [u8; 8]) -> Self {
        Self(u64::from_le_bytes(bytes))
    }

    /// Convert to 16 lowercase hex digits.
    pub fn to_hex(&self) -> String {
        format!("{:016x}", self.0)
    }

    /// Parse from exactly 16 hex digits (either case).
    pub fn from_hex(s: &str) -> Result<Self> {
        decode_hex_array::<8>(s).map(|bytes| Self(u64::from_be_bytes(bytes)))
    }
}

impl fmt::Debug for Work {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Work({})", self.to_hex())
    }
}

impl fmt::Display for Work {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Work {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Work {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

impl From<Work> for String {
    fn from(work: Work) -> Self {
        work.to_hex()
    }
}

/// The 32 bytes a work value is computed against.
///
/// This is the previous block hash, or the account key for an account's
/// first block.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkRoot(pub [u8; 32]);

impl WorkRoot {
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        decode_hex_array(s).map(Self)
    }
}

impl fmt::Debug for WorkRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WorkRoot({})", &self.to_hex()[..16])
    }
}

impl From<BlockHash> for WorkRoot {
    fn from(hash: BlockHash) -> Self {
        Self(hash.0)
    }
}

impl From<Account> for WorkRoot {
    fn from(account: Account) -> Self {
        Self(account.0)
    }
}

impl From<[u8; 32]> for WorkRoot {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// A minimum work value; valid work must be strictly greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkThreshold(pub u64);

impl WorkThreshold {
    pub const PRODUCTION: Self = Self(WORK_THRESHOLD);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_met_by(&self, value: u64) -> bool {
        value > self.0
    }

    /// Expected number of hashes to find one valid nonce.
    pub fn expected_attempts(&self) -> f64 {
        let passing = (u64::MAX - self.0) as f64;
        if passing == 0.0 {
            f64::INFINITY
        } else {
            (u64::MAX as f64) / passing
        }
    }
}

impl Default for WorkThreshold {
    fn default() -> Self {
        Self::PRODUCTION
    }
}

/// The numeric value of a work nonce against a root.
#[inline]
pub fn work_value(work: Work, root: &WorkRoot) -> u64 {
    let mut hasher = Blake2b64::new();
    hasher.update(work.to_hash_bytes());
    hasher.update(root.as_bytes());
    let digest: [u8; 8] = hasher.finalize().into();
    u64::from_le_bytes(digest)
}

/// Validate work against the production threshold.
pub fn validate(work: Work, root: &WorkRoot) -> bool {
    validate_with(work, root, WorkThreshold::PRODUCTION)
}

/// Validate work against an arbitrary threshold.
pub fn validate_with(work: Work, root: &WorkRoot, threshold: WorkThreshold) -> bool {
    threshold.is_met_by(work_value(work, root))
}
