//! Bit-packing layer: raw bytes <-> 5-bit symbols of the address alphabet.
//!
//! The alphabet omits `0`, `2`, `l` and `v`. Symbols are packed most
//! significant bit first. A 256-bit key is logically prefixed with four zero
//! bits so that it fills exactly 52 symbols.

use crate::error::{CoreError, Result};

/// Index -> symbol.
pub const ALPHABET: [u8; 32] = *b"13456789abcdefghijkmnopqrstuwxyz";

const INVALID: u8 = 0xff;

/// Symbol -> index, `INVALID` for anything outside the alphabet.
pub const REVERSE: [u8; 128] = build_reverse();

const fn build_reverse() -> [u8; 128] {
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// RFC 4648 alphabet (lowercase) -> address alphabet, indexed by ASCII.
const RFC4648_TO_ADDRESS: [u8; 128] = build_translation();

const RFC4648_ALPHABET: &[u8; 32] = b"abcdefghijklmnopqrstuvwxyz234567";

const fn build_translation() -> [u8; 128] {
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < RFC4648_ALPHABET.len() {
        table[RFC4648_ALPHABET[i] as usize] = ALPHABET[i];
        i += 1;
    }
    table
}

/// Number of symbols encoding a 256-bit key.
pub const KEY_SYMBOLS: usize = 52;

/// Number of symbols encoding a 40-bit checksum.
pub const CHECKSUM_SYMBOLS: usize = 8;

/// Leading zero bits that pad a key to a multiple of five.
const KEY_PAD_BITS: u32 = 4;

/// Look up the 5-bit value of an address symbol.
#[inline]
pub fn value_of(symbol: u8) -> Option<u8> {
    match REVERSE.get(symbol as usize) {
        Some(&v) if v != INVALID => Some(v),
        _ => None,
    }
}

/// Encode a 256-bit key as 52 symbols (direct bit-packing).
pub fn encode_key(key: &[u8; 32]) -> [u8; KEY_SYMBOLS] {
    let mut out = [0u8; KEY_SYMBOLS];
    write_symbols(key, KEY_PAD_BITS, &mut out);
    out
}

/// Decode 52 symbols into a 256-bit key.
///
/// The first symbol carries the four padding bits, so only `1` or `3` can
/// start a key.
pub fn decode_key(symbols: &[u8]) -> Result<[u8; 32]> {
    if symbols.len() != KEY_SYMBOLS {
        return Err(CoreError::InvalidAddressFormat(format!(
            "key segment must be {} characters, got {}",
            KEY_SYMBOLS,
            symbols.len()
        )));
    }
    let mut key = [0u8; 32];
    read_symbols(symbols, KEY_PAD_BITS, &mut key)?;
    Ok(key)
}

/// Encode a 5-byte checksum as 8 symbols.
pub fn encode_checksum(checksum: &[u8; 5]) -> [u8; CHECKSUM_SYMBOLS] {
    let mut out = [0u8; CHECKSUM_SYMBOLS];
    write_symbols(checksum, 0, &mut out);
    out
}

/// Decode 8 symbols into a 5-byte checksum.
pub fn decode_checksum(symbols: &[u8]) -> Result<[u8; 5]> {
    if symbols.len() != CHECKSUM_SYMBOLS {
        return Err(CoreError::InvalidAddressFormat(format!(
            "checksum segment must be {} characters, got {}",
            CHECKSUM_SYMBOLS,
            symbols.len()
        )));
    }
    let mut checksum = [0u8; 5];
    read_symbols(symbols, 0, &mut checksum)?;
    Ok(checksum)
}

/// Encode a key through standard base-32 and translate the alphabet.
///
/// Three zero bytes are prepended so the 280-bit input starts on a symbol
/// boundary; the first four symbols then cover 20 zero bits and are dropped,
/// leaving the same 4 pad bits + 256 key bits as [`encode_key`].
pub fn encode_key_base32(key: &[u8; 32]) -> [u8; KEY_SYMBOLS] {
    let mut padded = [0u8; 35];
    padded[3..].copy_from_slice(key);
    let encoded = base32_encode(&padded);

    let mut out = [0u8; KEY_SYMBOLS];
    for (slot, &c) in out.iter_mut().zip(&encoded.as_bytes()[4..]) {
        *slot = RFC4648_TO_ADDRESS[c as usize];
    }
    out
}

/// Encode a checksum through standard base-32 and translate the alphabet.
pub fn encode_checksum_base32(checksum: &[u8; 5]) -> [u8; CHECKSUM_SYMBOLS] {
    let encoded = base32_encode(checksum);
    let mut out = [0u8; CHECKSUM_SYMBOLS];
    for (slot, &c) in out.iter_mut().zip(encoded.as_bytes()) {
        *slot = RFC4648_TO_ADDRESS[c as usize];
    }
    out
}

/// Pack `bytes`, preceded by `pad_bits` zero bits, into symbols.
fn write_symbols(bytes: &[u8], pad_bits: u32, out: &mut [u8]) {
    debug_assert_eq!(bytes.len() * 8 + pad_bits as usize, out.len() * 5);

    let mut acc: u32 = 0;
    let mut bits = pad_bits;
    let mut input = bytes.iter();

    for slot in out.iter_mut() {
        if bits < 5 {
            if let Some(&byte) = input.next() {
                acc = (acc << 8) | u32::from(byte);
                bits += 8;
            }
        }
        bits -= 5;
        *slot = ALPHABET[((acc >> bits) & 0x1f) as usize];
        acc &= (1 << bits) - 1;
    }
}

/// Unpack symbols into `out`, checking that the first `pad_bits` are zero.
fn read_symbols(symbols: &[u8], pad_bits: u32, out: &mut [u8]) -> Result<()> {
    debug_assert_eq!(symbols.len() * 5, out.len() * 8 + pad_bits as usize);

    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut written = 0;

    for (position, &symbol) in symbols.iter().enumerate() {
        let value = value_of(symbol).ok_or_else(|| {
            CoreError::InvalidAddressFormat(format!(
                "character {:?} is not in the address alphabet",
                char::from(symbol)
            ))
        })?;

        acc = (acc << 5) | u32::from(value);
        bits += 5;

        if position == 0 && pad_bits > 0 {
            if u32::from(value) >> (5 - pad_bits) != 0 {
                return Err(CoreError::InvalidAddressFormat(format!(
                    "leading character {:?} overflows 256 bits",
                    char::from(symbol)
                )));
            }
            bits -= pad_bits;
            acc &= (1 << bits) - 1;
        }

        if bits >= 8 {
            bits -= 8;
            out[written] = (acc >> bits) as u8;
            written += 1;
            acc &= (1 << bits) - 1;
        }
    }

    Ok(())
}

/// RFC 4648 base-32 (lowercase, no padding).
fn base32_encode(data: &[u8]) -> String {
    let mut result = String::with_capacity((data.len() * 8 + 4) / 5);
    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;

    for &byte in data {
        buffer = (buffer << 8) | (byte as u64);
        bits_in_buffer += 8;

        while bits_in_buffer >= 5 {
            bits_in_buffer -= 5;
            let index = ((buffer >> bits_in_buffer) & 0x1f) as usize;
            result.push(RFC4648_ALPHABET[index] as char);
        }
    }

    if bits_in_buffer > 0 {
        let index = ((buffer << (5 - bits_in_buffer)) & 0x1f) as usize;
        result.push(RFC4648_ALPHABET[index] as char);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_tables_are_inverse() {
        for (i, &symbol) in ALPHABET.iter().enumerate() {
            assert_eq!(value_of(symbol), Some(i as u8));
        }
        for excluded in [b'0', b'2', b'l', b'v', b'A', b'_', 0x80, 0xff] {
            assert_eq!(value_of(excluded), None);
        }
    }

    #[test]
    fn test_zero_key() {
        let symbols = encode_key(&[0u8; 32]);
        assert_eq!(&symbols, &[b'1'; KEY_SYMBOLS]);
        assert_eq!(decode_key(&symbols).unwrap(), [0u8; 32]);
    }

    #[test]
    fn test_all_ones_key() {
        let symbols = encode_key(&[0xff; 32]);
        assert_eq!(symbols[0], b'3');
        assert!(symbols[1..].iter().all(|&s| s == b'z'));
        assert_eq!(decode_key(&symbols).unwrap(), [0xff; 32]);
    }

    #[test]
    fn test_single_bit_positions() {
        for bit in 0..256 {
            let mut key = [0u8; 32];
            key[bit / 8] = 0x80 >> (bit % 8);
            let symbols = encode_key(&key);
            assert_eq!(decode_key(&symbols).unwrap(), key, "bit {}", bit);
            assert_eq!(encode_key_base32(&key), symbols, "bit {}", bit);
        }
    }

    #[test]
    fn test_leading_symbol_overflow_rejected() {
        let mut symbols = encode_key(&[0u8; 32]);
        symbols[0] = b'4';
        assert!(matches!(
            decode_key(&symbols),
            Err(CoreError::InvalidAddressFormat(_))
        ));
    }

    #[test]
    fn test_invalid_character_rejected() {
        let mut symbols = encode_key(&[0u8; 32]);
        symbols[10] = b'0';
        assert!(matches!(
            decode_key(&symbols),
            Err(CoreError::InvalidAddressFormat(_))
        ));
    }

    #[test]
    fn test_checksum_symbols() {
        let checksum = [0x01, 0x23, 0x45, 0x67, 0x89];
        let symbols = encode_checksum(&checksum);
        assert_eq!(decode_checksum(&symbols).unwrap(), checksum);
        assert_eq!(encode_checksum_base32(&checksum), symbols);
    }

    #[test]
    fn test_base32_encode() {
        // RFC 4648 test vectors
        assert_eq!(base32_encode(b""), "");
        assert_eq!(base32_encode(b"f"), "my");
        assert_eq!(base32_encode(b"fo"), "mzxq");
        assert_eq!(base32_encode(b"foo"), "mzxw6");
        assert_eq!(base32_encode(b"foob"), "mzxw6yq");
        assert_eq!(base32_encode(b"fooba"), "mzxw6ytb");
        assert_eq!(base32_encode(b"foobar"), "mzxw6ytboi");
    }

    proptest! {
        #[test]
        fn test_key_symbols_roundtrip(key in any::<[u8; 32]>()) {
            let symbols = encode_key(&key);
            prop_assert!(symbols[0] == b'1' || symbols[0] == b'3');
            prop_assert_eq!(decode_key(&symbols).unwrap(), key);
            prop_assert_eq!(encode_key_base32(&key), symbols);
        }

        #[test]
        fn test_checksum_symbols_roundtrip(checksum in any::<[u8; 5]>()) {
            let symbols = encode_checksum(&checksum);
            prop_assert_eq!(decode_checksum(&symbols).unwrap(), checksum);
            prop_assert_eq!(encode_checksum_base32(&checksum), symbols);
        }
    }
}
