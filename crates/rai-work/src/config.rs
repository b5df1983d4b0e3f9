//! Work generation configuration.

use std::time::Duration;

use rai_core::WorkThreshold;

use crate::error::{Result, WorkError};

/// Configuration for a work search.
#[derive(Debug, Clone)]
pub struct WorkConfig {
    /// Minimum work value; found work is strictly greater.
    pub threshold: WorkThreshold,
    /// Number of search threads.
    pub workers: usize,
    /// Stop after this many hashes across all workers (None = unbounded).
    pub max_attempts: Option<u64>,
    /// Stop after this much wall time (None = unbounded).
    pub deadline: Option<Duration>,
}

impl Default for WorkConfig {
    fn default() -> Self {
        Self {
            threshold: WorkThreshold::PRODUCTION,
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            max_attempts: None,
            deadline: None,
        }
    }
}

impl WorkConfig {
    /// Set the threshold.
    pub fn threshold(mut self, threshold: WorkThreshold) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the number of search threads.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Cap the total number of hashes.
    pub fn max_attempts(mut self, attempts: u64) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Cap the wall time.
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Reject configurations that can never run.
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(WorkError::InvalidConfig("workers must be at least 1".into()));
        }
        if self.max_attempts == Some(0) {
            return Err(WorkError::InvalidConfig(
                "max_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_production_and_unbounded() {
        let config = WorkConfig::default();
        assert_eq!(config.threshold, WorkThreshold::PRODUCTION);
        assert!(config.workers >= 1);
        assert_eq!(config.max_attempts, None);
        assert_eq!(config.deadline, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let config = WorkConfig::default().workers(0);
        assert!(matches!(config.validate(), Err(WorkError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let config = WorkConfig::default().max_attempts(0);
        assert!(matches!(config.validate(), Err(WorkError::InvalidConfig(_))));
    }
}
