//! Strong type definitions for block fields.
//!
//! All fixed-width values are newtypes so that a balance can never be passed
//! where a hash is expected. Text forms follow protocol convention: uppercase
//! hex on output, either case on input.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::account::Account;
use crate::error::{CoreError, Result};

/// Decode a hex string into a fixed-size array, accepting either case.
pub(crate) fn decode_hex_array<const N: usize>(s: &str) -> Result<[u8; N]> {
    let mut arr = [0u8; N];
    decode_hex_into(s, &mut arr)?;
    Ok(arr)
}

/// Decode a hex string straight into `out`, which must match its length.
pub(crate) fn decode_hex_into(s: &str, out: &mut [u8]) -> Result<()> {
    hex::decode_to_slice(s, out)?;
    Ok(())
}

/// A 32-byte block hash, computed as Blake2b-256 over a block's canonical layout.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BlockHash(pub [u8; 32]);

impl BlockHash {
    /// The zero hash: the `previous` of an account's first block.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check for the zero sentinel.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Convert to uppercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    /// Parse from hex (either case).
    pub fn from_hex(s: &str) -> Result<Self> {
        decode_hex_array(s).map(Self)
    }
}

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockHash({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for BlockHash {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for BlockHash {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

impl From<BlockHash> for String {
    fn from(hash: BlockHash) -> Self {
        hash.to_hex()
    }
}

impl AsRef<[u8]> for BlockHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for BlockHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// An account balance in raw units (128-bit unsigned).
///
/// Hashed as 16 big-endian bytes; written as 32 uppercase hex digits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(pub u128);

impl Amount {
    pub const ZERO: Self = Self(0);
    pub const MAX: Self = Self(u128::MAX);

    /// Create from a raw value.
    pub const fn raw(value: u128) -> Self {
        Self(value)
    }

    /// Get the raw value.
    pub const fn as_u128(&self) -> u128 {
        self.0
    }

    /// Big-endian bytes, as they appear in block hashes.
    pub const fn to_be_bytes(&self) -> [u8; 16] {
        self.0.to_be_bytes()
    }

    /// Convert to 32 uppercase hex digits.
    pub fn to_hex(&self) -> String {
        format!("{:032X}", self.0)
    }

    /// Parse from exactly 32 hex digits (either case).
    pub fn from_hex(s: &str) -> Result<Self> {
        decode_hex_array::<16>(s).map(|bytes| Self(u128::from_be_bytes(bytes)))
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Self)
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amount({})", self.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Amount {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.to_hex()
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

/// The 32-byte `link` field of a state block.
///
/// Holds the destination account for a send, the source block hash for a
/// receive or open, and zero for a representative change.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Link(pub [u8; 32]);

impl Link {
    pub const ZERO: Self = Self([0u8; 32]);

    /// Link for a send: the destination account key.
    pub const fn destination(account: &Account) -> Self {
        Self(account.0)
    }

    /// Link for a receive or open: the hash of the pairing send block.
    pub const fn source(hash: &BlockHash) -> Self {
        Self(hash.0)
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Interpret as a destination account.
    pub const fn as_account(&self) -> Account {
        Account(self.0)
    }

    /// Interpret as a source block hash.
    pub const fn as_block_hash(&self) -> BlockHash {
        BlockHash(self.0)
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        decode_hex_array(s).map(Self)
    }
}

impl fmt::Debug for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Link({})", &self.to_hex()[..16])
    }
}

impl TryFrom<String> for Link {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

impl From<Link> for String {
    fn from(link: Link) -> Self {
        link.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_hash_hex_roundtrip() {
        let hash = BlockHash::from_bytes([0x42; 32]);
        let hex = hash.to_hex();
        assert_eq!(hex, "42".repeat(32));
        assert_eq!(BlockHash::from_hex(&hex).unwrap(), hash);
    }

    #[test]
    fn test_block_hash_accepts_lowercase() {
        let upper = "C8E5B875778702445B25657276ABC56AA9910B283537CA438B2CC59B0CF93712";
        let lower = upper.to_lowercase();
        assert_eq!(
            BlockHash::from_hex(upper).unwrap(),
            BlockHash::from_hex(&lower).unwrap()
        );
        assert_eq!(BlockHash::from_hex(&lower).unwrap().to_hex(), upper);
    }

    #[test]
    fn test_block_hash_rejects_bad_hex() {
        assert!(matches!(
            BlockHash::from_hex("zz"),
            Err(CoreError::InvalidHexInput(_))
        ));
        assert!(matches!(
            BlockHash::from_hex("abcd"),
            Err(CoreError::InvalidHexInput(_))
        ));
        assert!(matches!(
            BlockHash::from_hex(&"g".repeat(64)),
            Err(CoreError::InvalidHexInput(_))
        ));
    }

    #[test]
    fn test_block_hash_debug() {
        let hash = BlockHash::from_bytes([0xcd; 32]);
        assert_eq!(format!("{:?}", hash), "BlockHash(CDCDCDCDCDCDCDCD)");
    }

    #[test]
    fn test_amount_hex() {
        let amount = Amount::raw(1);
        assert_eq!(amount.to_hex(), "00000000000000000000000000000001");
        assert_eq!(amount.to_be_bytes()[15], 1);

        let parsed = Amount::from_hex("000000FC6F7C40458122964CFFFFFF9C").unwrap();
        assert_eq!(parsed.to_hex(), "000000FC6F7C40458122964CFFFFFF9C");
        assert!(Amount::from_hex("01").is_err());
    }

    #[test]
    fn test_amount_arithmetic() {
        assert_eq!(Amount::MAX.checked_add(Amount::raw(1)), None);
        assert_eq!(Amount::ZERO.checked_sub(Amount::raw(1)), None);
        assert_eq!(
            Amount::raw(5).checked_sub(Amount::raw(2)),
            Some(Amount::raw(3))
        );
    }

    #[test]
    fn test_link_interpretations() {
        let hash = BlockHash::from_bytes([0x11; 32]);
        let link = Link::source(&hash);
        assert_eq!(link.as_block_hash(), hash);
        assert!(Link::ZERO.is_zero());
        assert!(!link.is_zero());
    }

    #[test]
    fn test_serde_uses_hex_strings() {
        let hash = BlockHash::from_bytes([0xab; 32]);
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{}\"", "AB".repeat(32)));
        let back: BlockHash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);

        let amount: Amount = serde_json::from_str("\"0000000000000000000000000000000A\"").unwrap();
        assert_eq!(amount, Amount::raw(10));
    }
}
