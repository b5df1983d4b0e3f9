//! Cryptographic primitives: Blake2b hashing and Ed25519-Blake2b signatures.
//!
//! The protocol signs with Ed25519 where both the secret-key expansion and
//! the challenge hash use Blake2b-512 in place of SHA-512. Curve arithmetic is
//! delegated to ed25519-dalek's `hazmat` layer, parameterised over the digest.

use blake2::digest::consts::{U32, U5, U8};
use blake2::digest::generic_array::GenericArray;
use blake2::{Blake2b, Blake2b512, Digest};
use ed25519_dalek::hazmat::{raw_sign, raw_verify, ExpandedSecretKey};
use ed25519_dalek::{Signature as DalekSignature, VerifyingKey};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroizing;

use crate::account::Account;
use crate::error::{CoreError, Result};
use crate::types::{decode_hex_array, decode_hex_into, BlockHash};

/// Blake2b with a 32-byte output: block hashes and key derivation.
pub type Blake2b256 = Blake2b<U32>;

/// Blake2b with a 5-byte output: address checksums.
pub type Blake2b40 = Blake2b<U5>;

/// Blake2b with an 8-byte output: proof-of-work digests.
pub type Blake2b64 = Blake2b<U8>;

/// Blake2b-256 over the concatenation of `parts`.
pub fn blake2b_256(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// A 32-byte private key.
///
/// The buffer is zeroed when dropped and never printed.
#[derive(Clone)]
pub struct RawKey(Zeroizing<[u8; 32]>);

impl RawKey {
    /// Wrap raw key bytes.
    ///
    /// The caller's copy of `bytes` is not zeroed; prefer `From<Zeroizing<_>>`
    /// or [`from_hex`](Self::from_hex) for real key material.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(Zeroizing::new(bytes))
    }

    /// Parse from hex (either case).
    pub fn from_hex(s: &str) -> Result<Self> {
        let mut key = Zeroizing::new([0u8; 32]);
        decode_hex_into(s, &mut key[..])?;
        Ok(Self(key))
    }

    /// Draw a random key from the operating system.
    pub fn generate() -> Self {
        let mut key = Zeroizing::new([0u8; 32]);
        OsRng.fill_bytes(&mut key[..]);
        Self(key)
    }

    /// Borrow the secret bytes.
    pub fn expose_secret(&self) -> &[u8; 32] {
        &self.0
    }

    /// Uppercase hex of the secret, in a buffer that is zeroed on drop.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode_upper(&self.0[..]))
    }

    /// Expand into the scalar and nonce prefix used for signing.
    fn expand(&self) -> ExpandedSecretKey {
        let mut hasher = Blake2b512::new();
        hasher.update(&self.0[..]);
        let mut expanded = Zeroizing::new([0u8; 64]);
        hasher.finalize_into(GenericArray::from_mut_slice(&mut expanded[..]));
        ExpandedSecretKey::from_bytes(&expanded)
    }
}

impl fmt::Debug for RawKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawKey(<redacted>)")
    }
}

impl From<Zeroizing<[u8; 32]>> for RawKey {
    fn from(bytes: Zeroizing<[u8; 32]>) -> Self {
        Self(bytes)
    }
}

/// A 64-byte Ed25519-Blake2b signature.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Signature(pub [u8; 64]);

impl Signature {
    /// The zero signature (invalid, used as placeholder).
    pub const ZERO: Self = Self([0u8; 64]);

    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
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

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({}...)", &self.to_hex()[..16])
    }
}

impl TryFrom<String> for Signature {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

impl From<Signature> for String {
    fn from(signature: Signature) -> Self {
        signature.to_hex()
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 64]> for Signature {
    fn from(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }
}

/// A private key together with its public key.
#[derive(Clone)]
pub struct KeyPair {
    private: RawKey,
    public: VerifyingKey,
}

impl KeyPair {
    /// Rebuild a pair from its private key.
    pub fn from_private(private: RawKey) -> Self {
        let public = VerifyingKey::from(&private.expand());
        Self { private, public }
    }

    /// Generate a new random keypair.
    pub fn generate() -> Self {
        Self::from_private(RawKey::generate())
    }

    /// The public key, as an account.
    pub fn account(&self) -> Account {
        Account(self.public.to_bytes())
    }

    pub fn private_key(&self) -> &RawKey {
        &self.private
    }

    /// Sign an arbitrary message.
    pub fn sign(&self, message: &[u8]) -> Signature {
        let expanded = self.private.expand();
        let signature = raw_sign::<Blake2b512>(&expanded, message, &self.public);
        Signature(signature.to_bytes())
    }

    /// Sign a block hash. This is the only message a block signature covers.
    pub fn sign_hash(&self, hash: &BlockHash) -> Signature {
        self.sign(hash.as_bytes())
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyPair({:?})", self.account())
    }
}

/// Verify `signature` over `message` under the Ed25519-Blake2b scheme.
pub(crate) fn verify_raw(public: &[u8; 32], message: &[u8], signature: &Signature) -> Result<()> {
    let verifying_key = VerifyingKey::from_bytes(public).map_err(|_| CoreError::InvalidPublicKey)?;
    let sig = DalekSignature::from_bytes(&signature.0);
    raw_verify::<Blake2b512>(&verifying_key, message, &sig).map_err(|_| CoreError::InvalidSignature)
}

/// Sign a block hash with a derived keypair.
pub fn sign(keypair: &KeyPair, hash: &BlockHash) -> Signature {
    keypair.sign_hash(hash)
}

/// Check a block signature. Any failure, including a malformed key, is `false`.
pub fn verify(account: &Account, hash: &BlockHash, signature: &Signature) -> bool {
    verify_raw(&account.0, hash.as_bytes(), signature).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypair_sign_verify() {
        let keypair = KeyPair::generate();
        let message = b"hello world";
        let signature = keypair.sign(message);

        // Valid signature should verify
        keypair
            .account()
            .verify(message, &signature)
            .expect("valid signature should verify");

        // Tampered message should fail
        let tampered = b"hello worlD";
        assert!(keypair.account().verify(tampered, &signature).is_err());
    }

    #[test]
    fn test_keypair_deterministic_from_private() {
        let kp1 = KeyPair::from_private(RawKey::from_bytes([0x42; 32]));
        let kp2 = KeyPair::from_private(RawKey::from_bytes([0x42; 32]));
        assert_eq!(kp1.account(), kp2.account());
        assert_eq!(kp1.sign(b"m"), kp2.sign(b"m"));
    }

    #[test]
    fn test_verify_with_other_key_fails() {
        let signer = KeyPair::from_private(RawKey::from_bytes([0x01; 32]));
        let other = KeyPair::from_private(RawKey::from_bytes([0x02; 32]));
        let hash = BlockHash::from_bytes([0x33; 32]);
        let signature = sign(&signer, &hash);

        assert!(verify(&signer.account(), &hash, &signature));
        assert!(!verify(&other.account(), &hash, &signature));
    }

    #[test]
    fn test_blake2b_256_concatenates() {
        assert_eq!(blake2b_256(&[b"ab", b"cd"]), blake2b_256(&[b"abcd"]));
        assert_ne!(blake2b_256(&[b"abcd"]), blake2b_256(&[b"abce"]));
    }

    #[test]
    fn test_raw_key_from_hex() {
        let hex = "7712B29E9E541E8B6D36AF7151C46714667AA69E509D7D4DAAB050E9731B2D43";
        let key = RawKey::from_hex(&hex.to_lowercase()).unwrap();
        assert_eq!(key.to_hex().as_str(), hex);
        assert!(RawKey::from_hex(&hex[..62]).is_err());
        assert!(RawKey::from_hex(&format!("{}zz", &hex[..62])).is_err());
    }

    #[test]
    fn test_raw_key_never_printed() {
        let key = RawKey::from_bytes([0xaa; 32]);
        let debug = format!("{:?}", key);
        assert!(!debug.contains("aa") && !debug.contains("AA"));
    }

    #[test]
    fn test_signature_hex_roundtrip() {
        let signature = KeyPair::generate().sign(b"x");
        let hex = signature.to_hex();
        assert_eq!(Signature::from_hex(&hex).unwrap(), signature);
        assert_eq!(Signature::from_hex(&hex.to_lowercase()).unwrap(), signature);
    }
}
