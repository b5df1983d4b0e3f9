//! Wallet seeds and deterministic per-index key derivation.
//!
//! `private(index) = Blake2b-256(seed || index as u32 big-endian)`, and the
//! public key follows from the private key by Ed25519-Blake2b.

use blake2::digest::generic_array::GenericArray;
use blake2::Digest;
use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;
use zeroize::Zeroizing;

use crate::crypto::{Blake2b256, KeyPair, RawKey};
use crate::error::{CoreError, Result};

/// Seed length in bytes.
pub const SEED_LEN: usize = 32;

/// A secret 256-bit wallet seed.
///
/// Owned exclusively (no `Clone`), zeroed on drop, and redacted in `Debug`.
pub struct Seed(Zeroizing<[u8; SEED_LEN]>);

impl Seed {
    /// Wrap raw seed bytes.
    ///
    /// The caller's copy of `bytes` is not zeroed; prefer `From<Zeroizing<_>>`,
    /// [`from_slice`](Self::from_slice) or [`from_hex`](Self::from_hex) for a
    /// real wallet seed.
    pub fn from_bytes(bytes: [u8; SEED_LEN]) -> Self {
        Self(Zeroizing::new(bytes))
    }

    /// Copy a seed out of a buffer that must be exactly 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SEED_LEN {
            return Err(CoreError::InvalidSeedLength(bytes.len()));
        }
        let mut seed = Zeroizing::new([0u8; SEED_LEN]);
        seed.copy_from_slice(bytes);
        Ok(Self(seed))
    }

    /// Parse from hex (either case).
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = Zeroizing::new(hex::decode(s)?);
        Self::from_slice(&bytes)
    }

    /// Draw a fresh seed from the operating system.
    pub fn generate() -> Self {
        let mut seed = Zeroizing::new([0u8; SEED_LEN]);
        OsRng.fill_bytes(&mut seed[..]);
        Self(seed)
    }

    /// Borrow the secret bytes.
    pub fn expose_secret(&self) -> &[u8; SEED_LEN] {
        &self.0
    }

    /// Derive the private key at `index`.
    pub fn derive_private(&self, index: u32) -> RawKey {
        let mut hasher = Blake2b256::new();
        hasher.update(&self.0[..]);
        hasher.update(index.to_be_bytes());

        let mut key = Zeroizing::new([0u8; 32]);
        hasher.finalize_into(GenericArray::from_mut_slice(&mut key[..]));
        RawKey::from(key)
    }

    /// Derive the keypair at `index`.
    pub fn derive(&self, index: u32) -> KeyPair {
        KeyPair::from_private(self.derive_private(index))
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(<redacted>)")
    }
}

impl From<Zeroizing<[u8; SEED_LEN]>> for Seed {
    fn from(bytes: Zeroizing<[u8; SEED_LEN]>) -> Self {
        Self(bytes)
    }
}

/// Derive the keypair at `index` from raw seed bytes.
pub fn derive(seed: &[u8], index: u32) -> Result<KeyPair> {
    Ok(Seed::from_slice(seed)?.derive(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = "9F1D53E732E48F25F94711D5B22086778278624F715D9B2BEC8FB81134E7C904";

    #[test]
    fn test_known_private_keys() {
        let seed = Seed::from_hex(SEED).unwrap();
        assert_eq!(
            seed.derive_private(0).to_hex().as_str(),
            "7712B29E9E541E8B6D36AF7151C46714667AA69E509D7D4DAAB050E9731B2D43"
        );
        assert_eq!(
            seed.derive_private(1).to_hex().as_str(),
            "85A6F4618829397190319D19A5C3993C300AE4370B46DA0B670D5FD07C3835F6"
        );
    }

    #[test]
    fn test_known_accounts() {
        let seed = Seed::from_hex(SEED).unwrap();
        assert_eq!(
            seed.derive(0).account().to_address(),
            "xrb_34bmpi65zr967cdzy4uy4twu7mqs9nrm53r1penffmuex6ruqy8nxp7ms1h1"
        );
        assert_eq!(
            seed.derive(1).account().to_address(),
            "xrb_3pq7jpt1ixd6unh5pep4we1tmwnaydr1farsc81poeugkdsce7cain19myin"
        );
    }

    #[test]
    fn test_deterministic() {
        let a = Seed::from_hex(SEED).unwrap();
        let b = Seed::from_hex(&SEED.to_lowercase()).unwrap();
        for index in [0, 1, 7, u32::MAX] {
            assert_eq!(a.derive(index).account(), b.derive(index).account());
        }
    }

    #[test]
    fn test_indices_differ() {
        let seed = Seed::from_bytes([0x42; 32]);
        let accounts: Vec<_> = (0..8).map(|i| seed.derive(i).account()).collect();
        for i in 0..accounts.len() {
            for j in i + 1..accounts.len() {
                assert_ne!(accounts[i], accounts[j]);
            }
        }
    }

    #[test]
    fn test_invalid_length() {
        assert_eq!(
            Seed::from_slice(&[0u8; 31]).unwrap_err(),
            CoreError::InvalidSeedLength(31)
        );
        assert_eq!(
            derive(&[0u8; 33], 0).unwrap_err(),
            CoreError::InvalidSeedLength(33)
        );
        assert_eq!(
            Seed::from_hex(&SEED[..62]).unwrap_err(),
            CoreError::InvalidSeedLength(31)
        );
        assert!(matches!(
            Seed::from_hex("xyz"),
            Err(CoreError::InvalidHexInput(_))
        ));
    }

    #[test]
    fn test_from_zeroizing_matches_hex() {
        let mut bytes = Zeroizing::new([0u8; SEED_LEN]);
        hex::decode_to_slice(SEED, &mut bytes[..]).unwrap();
        let seed = Seed::from(bytes);
        let expected = Seed::from_hex(SEED).unwrap();
        assert_eq!(seed.expose_secret(), expected.expose_secret());
        assert_eq!(seed.derive(0).account(), expected.derive(0).account());
    }

    #[test]
    fn test_seed_never_printed() {
        let seed = Seed::from_hex(SEED).unwrap();
        assert_eq!(format!("{:?}", seed), "Seed(<redacted>)");
    }
}
