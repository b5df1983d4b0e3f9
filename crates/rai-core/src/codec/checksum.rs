//! Checksum layer: raw key <-> 40-bit address checksum.

use blake2::Digest;

use crate::crypto::Blake2b40;
use crate::error::{CoreError, Result};

/// Checksum width in bytes.
pub const CHECKSUM_LEN: usize = 5;

/// Compute the address checksum of a key, in the byte order it is written.
///
/// This is Blake2b with a 5-byte output over the key's 32 bytes, reversed.
pub fn account_checksum(key: &[u8; 32]) -> [u8; CHECKSUM_LEN] {
    let mut checksum: [u8; CHECKSUM_LEN] = Blake2b40::digest(key).into();
    checksum.reverse();
    checksum
}

/// Check a decoded checksum against the key it was decoded with.
pub fn verify_checksum(key: &[u8; 32], checksum: &[u8; CHECKSUM_LEN]) -> Result<()> {
    if account_checksum(key) == *checksum {
        Ok(())
    } else {
        Err(CoreError::InvalidChecksum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_deterministic() {
        let key = [0x42u8; 32];
        assert_eq!(account_checksum(&key), account_checksum(&key));
        assert_ne!(account_checksum(&key), account_checksum(&[0x43u8; 32]));
    }

    #[test]
    fn test_verify_checksum() {
        let key = [0x07u8; 32];
        let checksum = account_checksum(&key);
        assert!(verify_checksum(&key, &checksum).is_ok());

        let mut wrong = checksum;
        wrong[0] ^= 0x01;
        assert_eq!(verify_checksum(&key, &wrong), Err(CoreError::InvalidChecksum));
    }
}
