//! Account address codec.
//!
//! An address is `xrb_` followed by 52 symbols of key and 8 symbols of
//! checksum, 64 characters in all. The codec is split into two layers that
//! are composed here:
//!
//! - [`bits`]: symbol packing, independent of any hash
//! - [`checksum`]: the Blake2b-40 digest of the key
//!
//! [`encode`] packs bits directly; [`encode_base32`] goes through RFC 4648
//! base-32 and an alphabet translation. Both must agree for every key.

pub mod bits;
pub mod checksum;

use crate::error::{CoreError, Result};

/// Fixed protocol prefix.
pub const ADDRESS_PREFIX: &str = "xrb_";

/// Total address length in characters.
pub const ADDRESS_LEN: usize = ADDRESS_PREFIX.len() + bits::KEY_SYMBOLS + bits::CHECKSUM_SYMBOLS;

/// Encode a public key as an address.
pub fn encode(key: &[u8; 32]) -> String {
    let symbols = bits::encode_key(key);
    let check = bits::encode_checksum(&checksum::account_checksum(key));
    assemble(&symbols, &check)
}

/// Encode a public key as an address via base-32 translation.
pub fn encode_base32(key: &[u8; 32]) -> String {
    let symbols = bits::encode_key_base32(key);
    let check = bits::encode_checksum_base32(&checksum::account_checksum(key));
    assemble(&symbols, &check)
}

/// Decode an address into its public key, verifying the checksum.
pub fn decode(address: &str) -> Result<[u8; 32]> {
    let raw = address.as_bytes();
    if raw.len() != ADDRESS_LEN {
        return Err(CoreError::InvalidAddressFormat(format!(
            "expected {} characters, got {}",
            ADDRESS_LEN,
            raw.len()
        )));
    }
    if !raw.starts_with(ADDRESS_PREFIX.as_bytes()) {
        return Err(CoreError::InvalidAddressFormat(format!(
            "missing {:?} prefix",
            ADDRESS_PREFIX
        )));
    }

    let body = &raw[ADDRESS_PREFIX.len()..];
    let (key_part, check_part) = body.split_at(bits::KEY_SYMBOLS);

    let key = bits::decode_key(key_part)?;
    let check = bits::decode_checksum(check_part)?;
    checksum::verify_checksum(&key, &check)?;

    Ok(key)
}

fn assemble(symbols: &[u8], check: &[u8]) -> String {
    let mut address = String::with_capacity(ADDRESS_LEN);
    address.push_str(ADDRESS_PREFIX);
    // Both slices hold alphabet symbols only, which are ASCII.
    address.extend(symbols.iter().chain(check).map(|&b| char::from(b)));
    address
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZERO_ADDRESS: &str = "xrb_1111111111111111111111111111111111111111111111111111hifc8npp";
    const MAX_ADDRESS: &str = "xrb_3zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzc3yoon41";

    #[test]
    fn test_known_addresses() {
        assert_eq!(encode(&[0u8; 32]), ZERO_ADDRESS);
        assert_eq!(encode(&[0xff; 32]), MAX_ADDRESS);
        assert_eq!(decode(ZERO_ADDRESS).unwrap(), [0u8; 32]);
        assert_eq!(decode(MAX_ADDRESS).unwrap(), [0xff; 32]);
    }

    #[test]
    fn test_address_length() {
        assert_eq!(ADDRESS_LEN, 64);
        assert_eq!(encode(&[0x5a; 32]).len(), ADDRESS_LEN);
    }

    #[test]
    fn test_paths_agree_on_known_keys() {
        for key in [[0u8; 32], [0xff; 32], [0x5a; 32], [0xa5; 32]] {
            assert_eq!(encode(&key), encode_base32(&key));
        }
    }

    #[test]
    fn test_wrong_length() {
        assert!(matches!(
            decode(&ZERO_ADDRESS[..63]),
            Err(CoreError::InvalidAddressFormat(_))
        ));
        assert!(matches!(
            decode(&format!("{}1", ZERO_ADDRESS)),
            Err(CoreError::InvalidAddressFormat(_))
        ));
        assert!(matches!(decode(""), Err(CoreError::InvalidAddressFormat(_))));
    }

    #[test]
    fn test_wrong_prefix() {
        let renamed = ZERO_ADDRESS.replacen("xrb_", "xrb-", 1);
        assert!(matches!(
            decode(&renamed),
            Err(CoreError::InvalidAddressFormat(_))
        ));
        let other = ZERO_ADDRESS.replacen("xrb_", "abc_", 1);
        assert!(matches!(decode(&other), Err(CoreError::InvalidAddressFormat(_))));
    }

    #[test]
    fn test_non_ascii_does_not_panic() {
        // 64 bytes, but the multi-byte character straddles the segment split.
        let mut address = String::from("xrb_");
        address.push_str(&"1".repeat(51));
        address.push('é');
        address.push_str(&"1".repeat(7));
        assert_eq!(address.len(), 64);
        assert!(matches!(
            decode(&address),
            Err(CoreError::InvalidAddressFormat(_))
        ));
    }

    #[test]
    fn test_uppercase_rejected() {
        let upper = format!("xrb_{}", ZERO_ADDRESS[4..].to_uppercase());
        assert!(matches!(decode(&upper), Err(CoreError::InvalidAddressFormat(_))));
    }

    #[test]
    fn test_checksum_mismatch() {
        // Change one key symbol, keep the checksum.
        let mut tampered = ZERO_ADDRESS.to_string();
        tampered.replace_range(10..11, "3");
        assert_eq!(decode(&tampered), Err(CoreError::InvalidChecksum));
    }
}
