//! Accounts: 256-bit public keys and their `xrb_` addresses.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::codec;
use crate::crypto::{verify_raw, KeyPair, Signature};
use crate::error::{CoreError, Result};
use crate::types::decode_hex_array;

/// A 32-byte account public key.
///
/// Displays and serializes as its checksummed address. Block hashing always
/// uses the raw bytes, never the text form.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Account(pub [u8; 32]);

impl Account {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Encode as an `xrb_` address.
    pub fn to_address(&self) -> String {
        codec::encode(&self.0)
    }

    /// Decode and checksum-verify an `xrb_` address.
    pub fn from_address(address: &str) -> Result<Self> {
        codec::decode(address).map(Self)
    }

    /// Convert to uppercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    /// Parse from hex (either case).
    pub fn from_hex(s: &str) -> Result<Self> {
        decode_hex_array(s).map(Self)
    }

    /// Verify a signature made by this account's key over a message.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<()> {
        verify_raw(&self.0, message, signature)
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Account({})", self.to_address())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_address())
    }
}

impl FromStr for Account {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_address(s)
    }
}

impl TryFrom<String> for Account {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self> {
        Self::from_address(&s)
    }
}

impl From<Account> for String {
    fn from(account: Account) -> Self {
        account.to_address()
    }
}

impl From<&KeyPair> for Account {
    fn from(keypair: &KeyPair) -> Self {
        keypair.account()
    }
}

impl AsRef<[u8]> for Account {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Account {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}
