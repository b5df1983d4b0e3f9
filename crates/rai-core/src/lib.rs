//! # rai core
//!
//! Pure primitives for the rai protocol: account addresses, seed derivation,
//! block hashing and signing, and proof-of-work validation.
//!
//! This crate contains no I/O, no threads, no networking. Searching for work
//! lives in `rai-work`; wiring it to block construction lives in `rai`.
//!
//! ## Key Types
//!
//! - [`Account`] - A public key and its checksummed `xrb_` address
//! - [`Seed`] - Secret root from which keypairs are derived by index
//! - [`Block`] - Tagged union over the state and legacy block layouts
//! - [`Work`] - A proof-of-work nonce, validated against a [`WorkRoot`]
//!
//! ## Canonicalization
//!
//! Block hashes are Blake2b-256 over fixed field layouts. See [`canonical`].

pub mod account;
pub mod block;
pub mod canonical;
pub mod codec;
pub mod crypto;
pub mod error;
pub mod seed;
pub mod types;
pub mod validation;
pub mod work;

pub use account::Account;
pub use block::{
    Block, BlockBuilder, BlockIntent, BlockType, ChangeBlock, OpenBlock, ReceiveBlock, SendBlock,
    StateBlock,
};
pub use canonical::{block_hash, canonical_bytes};
pub use crypto::{sign, verify, KeyPair, RawKey, Signature};
pub use error::{CoreError, Result, ValidationError};
pub use seed::{derive, Seed};
pub use types::{Amount, BlockHash, Link};
pub use validation::{validate_block, validate_block_structure, validate_block_with};
pub use work::{validate, validate_with, work_value, Work, WorkRoot, WorkThreshold, WORK_THRESHOLD};
