//! # rai testkit
//!
//! Testing utilities for rai.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Fixed addresses, derivations, block hashes and work
//!   nonces every implementation must reproduce
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up test scenarios
//!
//! ## Golden Vectors
//!
//! ```rust
//! use rai_testkit::vectors::{block_vectors, generate_block_from_vector};
//!
//! for vector in block_vectors() {
//!     let block = generate_block_from_vector(&vector);
//!     assert_eq!(block.hash().to_hex(), vector.expected_hash);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use rai_testkit::generators::{block_from_params, BlockParams};
//!
//! proptest! {
//!     #[test]
//!     fn hash_is_deterministic(params: BlockParams) {
//!         let b1 = block_from_params(&params);
//!         let b2 = block_from_params(&params);
//!         prop_assert_eq!(b1.hash(), b2.hash());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use rai_testkit::fixtures::{with_easy_work, TestFixture};
//! use rai_core::{Amount, BlockHash};
//!
//! let fixture = TestFixture::new();
//! let open = fixture.make_open(BlockHash::from_bytes([1u8; 32]), Amount::raw(1));
//! let open = with_easy_work(open).unwrap();
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{easy_config, multi_party_fixtures, with_easy_work, TestFixture, EASY_THRESHOLD};
pub use generators::{block_from_params, BlockParams, BlockShape};
pub use vectors::{
    block_vectors, generate_block_from_vector, verify_all_vectors, BlockVector, SEED,
};
