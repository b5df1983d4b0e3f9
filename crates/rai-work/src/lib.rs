//! # rai work
//!
//! Proof-of-work generation for rai blocks. Validation is pure and lives in
//! `rai-core`; this crate owns the threads.
//!
//! A search is bounded by a [`WorkConfig`] (threshold, worker count, attempt
//! cap, deadline) and can be stopped from outside with a [`CancelToken`].
//!
//! ```no_run
//! use rai_core::WorkRoot;
//! use rai_work::{WorkConfig, WorkGenerator};
//! use std::time::Duration;
//!
//! let generator = WorkGenerator::new(WorkConfig::default().deadline(Duration::from_secs(30)));
//! let work = generator.generate(&WorkRoot([0u8; 32]))?;
//! # Ok::<(), rai_work::WorkError>(())
//! ```

pub mod cancel;
pub mod config;
pub mod error;
pub mod generator;

pub use cancel::CancelToken;
pub use config::WorkConfig;
pub use error::{Result, WorkError};
pub use generator::{generate, search_batch, Solution, WorkGenerator, BATCH_SIZE};
