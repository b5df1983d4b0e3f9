//! # rai
//!
//! Account derivation, block construction and proof-of-work for the rai
//! protocol, in one place.
//!
//! ## Overview
//!
//! - **Accounts**: 256-bit public keys written as checksummed `xrb_` addresses
//! - **Seeds**: one secret from which every account key is derived by index
//! - **Blocks**: signed over their hash only; work is attached afterwards
//! - **Work**: a Blake2b nonce gate, generated off the async runtime
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rai::{Amount, BlockFactory, BlockHash, LocalWorkSource, RaiConfig, Seed};
//!
//! async fn example() -> rai::Result<()> {
//!     let seed = Seed::generate();
//!     let config = RaiConfig::default();
//!     let factory = BlockFactory::from_seed(
//!         &seed,
//!         0,
//!         LocalWorkSource::new(config.work.clone()),
//!         config,
//!     );
//!
//!     let mut head = factory.unopened_head();
//!     let pending = BlockHash::from_hex(
//!         "C8E5B875778702445B25657276ABC56AA9910B283537CA438B2CC59B0CF93712",
//!     )?;
//!     let open = factory
//!         .open(&mut head, pending, Amount::raw(1), factory.account())
//!         .await?;
//!     println!("{}", open.hash());
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `rai::core` - Codec, keys, blocks and work validation
//! - `rai::work` - Work generation

pub mod error;
pub mod factory;
pub mod source;

pub use rai_core as core;
pub use rai_work as work;

pub use error::{RaiError, Result};
pub use factory::{AccountHead, BlockFactory, RaiConfig};
pub use source::{LocalWorkSource, WorkSource};

pub use rai_core::{
    Account, Amount, Block, BlockBuilder, BlockHash, BlockType, KeyPair, Link, RawKey, Seed,
    Signature, Work, WorkRoot, WorkThreshold,
};
pub use rai_work::{CancelToken, WorkConfig};
