//! Canonical byte layouts for block hashing.
//!
//! Every block hashes as Blake2b-256 over a fixed concatenation of its
//! fields. No length prefixes, no field tags; account-like fields are the raw
//! 32 key bytes and balances are 16 bytes big-endian:
//!
//! | type    | layout                                                          |
//! |---------|-----------------------------------------------------------------|
//! | state   | preamble(32) account previous representative balance(16) link  |
//! | send    | previous destination balance(16)                               |
//! | receive | previous source                                                 |
//! | open    | source representative account                                   |
//! | change  | previous representative                                         |
//!
//! Signature and work are never part of the layout.

use blake2::Digest;

use crate::block::Block;
use crate::crypto::Blake2b256;
use crate::types::BlockHash;

/// Domain-separation prefix for state blocks: 31 zero bytes then 6.
pub const STATE_PREAMBLE: [u8; 32] = {
    let mut preamble = [0u8; 32];
    preamble[31] = 6;
    preamble
};

/// Length of the canonical layout for a block.
pub fn canonical_len(block: &Block) -> usize {
    match block {
        Block::State(_) => 32 * 5 + 16,
        Block::Send(_) => 32 * 2 + 16,
        Block::Receive(_) | Block::Change(_) => 32 * 2,
        Block::Open(_) => 32 * 3,
    }
}

/// The exact bytes a block's hash is computed over.
pub fn canonical_bytes(block: &Block) -> Vec<u8> {
    let mut buf = Vec::with_capacity(canonical_len(block));
    write_layout(block, |part| buf.extend_from_slice(part));
    buf
}

/// Blake2b-256 over the canonical layout.
pub fn block_hash(block: &Block) -> BlockHash {
    let mut hasher = Blake2b256::new();
    write_layout(block, |part| hasher.update(part));
    BlockHash(hasher.finalize().into())
}

fn write_layout(block: &Block, mut emit: impl FnMut(&[u8])) {
    match block {
        Block::State(b) => {
            emit(&STATE_PREAMBLE);
            emit(b.account.as_bytes());
            emit(b.previous.as_bytes());
            emit(b.representative.as_bytes());
            emit(&b.balance.to_be_bytes());
            emit(b.link.as_bytes());
        }
        Block::Send(b) => {
            emit(b.previous.as_bytes());
            emit(b.destination.as_bytes());
            emit(&b.balance.to_be_bytes());
        }
        Block::Receive(b) => {
            emit(b.previous.as_bytes());
            emit(b.source.as_bytes());
        }
        Block::Open(b) => {
            emit(b.source.as_bytes());
            emit(b.representative.as_bytes());
            emit(b.account.as_bytes());
        }
        Block::Change(b) => {
            emit(b.previous.as_bytes());
            emit(b.representative.as_bytes());
        }
    }
}
