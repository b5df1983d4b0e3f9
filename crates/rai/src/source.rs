//! Work sources: where a block factory gets its proof-of-work.
//!
//! The factory only needs "a nonce for this root". Local generation is the
//! default; a remote work server or a precomputed cache can implement the
//! same trait.

use std::sync::Arc;

use async_trait::async_trait;
use rai_core::{Work, WorkRoot};
use rai_work::{CancelToken, WorkConfig, WorkGenerator};

use crate::error::{RaiError, Result};

/// Async interface for obtaining work.
///
/// Implementations must stop promptly once `cancel` fires and report
/// `WorkError::CancellationRequested`.
#[async_trait]
pub trait WorkSource: Send + Sync {
    /// Produce work valid for `root`.
    async fn generate(&self, root: WorkRoot, cancel: CancelToken) -> Result<Work>;
}

/// Generates work on this machine.
///
/// The search runs on tokio's blocking pool so it never stalls the runtime.
#[derive(Debug, Clone)]
pub struct LocalWorkSource {
    generator: Arc<WorkGenerator>,
}

impl LocalWorkSource {
    pub fn new(config: WorkConfig) -> Self {
        Self {
            generator: Arc::new(WorkGenerator::new(config)),
        }
    }

    pub fn config(&self) -> &WorkConfig {
        self.generator.config()
    }
}

impl Default for LocalWorkSource {
    fn default() -> Self {
        Self::new(WorkConfig::default())
    }
}

#[async_trait]
impl WorkSource for LocalWorkSource {
    async fn generate(&self, root: WorkRoot, cancel: CancelToken) -> Result<Work> {
        let generator = self.generator.clone();
        let mut guard = CancelOnDrop::new(cancel.clone());

        let result = tokio::task::spawn_blocking(move || generator.generate_with_cancel(&root, &cancel))
            .await
            .map_err(|e| RaiError::TaskJoin(format!("spawn_blocking failed: {}", e)))?;

        guard.disarm();
        Ok(result?)
    }
}

/// Cancels the search if the awaiting future is dropped before it finishes.
struct CancelOnDrop {
    token: CancelToken,
    armed: bool,
}

impl CancelOnDrop {
    fn new(token: CancelToken) -> Self {
        Self { token, armed: true }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        if self.armed {
            self.token.cancel();
        }
    }
}
