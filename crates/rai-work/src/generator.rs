//! Parallel work search.
//!
//! Each worker draws 8 random bytes, then probes the 256 nonces that differ
//! only in the last hashed byte. The first worker to find a passing nonce
//! raises a shared flag that stops the others at their next draw.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use rand::RngCore;
use rai_core::{work_value, Work, WorkRoot, WorkThreshold};

use crate::cancel::CancelToken;
use crate::config::WorkConfig;
use crate::error::{Result, WorkError};

/// Nonces probed per random draw.
pub const BATCH_SIZE: u64 = 256;

/// A found nonce and what it took to find it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Solution {
    pub work: Work,
    /// `work_value(work, root)`, strictly above the threshold.
    pub value: u64,
    /// Hashes computed across all workers.
    pub attempts: u64,
    pub elapsed: Duration,
}

/// Probe the 256 nonces reachable from `start` by varying the last hashed byte.
///
/// Returns the first nonce whose value exceeds `threshold`.
pub fn search_batch(start: [u8; 8], root: &WorkRoot, threshold: WorkThreshold) -> Option<(Work, u64)> {
    let mut bytes = start;
    for _ in 0..BATCH_SIZE {
        let work = Work::from_hash_bytes(bytes);
        let value = work_value(work, root);
        if threshold.is_met_by(value) {
            return Some((work, value));
        }
        bytes[7] = bytes[7].wrapping_add(1);
    }
    None
}

/// State shared by all workers of one search.
struct Shared {
    done: AtomicBool,
    reserved: AtomicU64,
    hashed: AtomicU64,
}

enum Exit {
    Found(Work, u64),
    Stopped,
    Cancelled,
    Deadline,
    Exhausted,
}

/// Runs work searches with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct WorkGenerator {
    config: WorkConfig,
}

impl WorkGenerator {
    pub fn new(config: WorkConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WorkConfig {
        &self.config
    }

    /// Find work for `root`.
    pub fn generate(&self, root: &WorkRoot) -> Result<Work> {
        self.solve(root, &CancelToken::new()).map(|s| s.work)
    }

    /// Find work for `root`, stopping early if `cancel` fires.
    pub fn generate_with_cancel(&self, root: &WorkRoot, cancel: &CancelToken) -> Result<Work> {
        self.solve(root, cancel).map(|s| s.work)
    }

    /// Find work for `root` and report the search statistics.
    pub fn solve(&self, root: &WorkRoot, cancel: &CancelToken) -> Result<Solution> {
        self.config.validate()?;

        let started = Instant::now();
        let deadline = self.config.deadline.map(|d| started + d);
        let shared = Shared {
            done: AtomicBool::new(false),
            reserved: AtomicU64::new(0),
            hashed: AtomicU64::new(0),
        };

        tracing::debug!(
            root = ?root,
            threshold = format_args!("{:#018x}", self.config.threshold.value()),
            workers = self.config.workers,
            expected_attempts = self.config.threshold.expected_attempts(),
            "starting work search"
        );

        let threshold = self.config.threshold;
        let max_attempts = self.config.max_attempts;
        let shared = &shared;
        let exits: Vec<thread::Result<Exit>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..self.config.workers)
                .map(move |_| {
                    scope.spawn(move || {
                        run_worker(root, threshold, max_attempts, deadline, cancel, shared)
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join()).collect()
        });

        let elapsed = started.elapsed();
        let attempts = shared.hashed.load(Ordering::Acquire);

        let mut outcome = None;
        let mut panicked = false;
        let mut cancelled = false;
        let mut timed_out = false;
        for exit in exits {
            match exit {
                Ok(Exit::Found(work, value)) => {
                    outcome.get_or_insert((work, value));
                }
                Ok(Exit::Cancelled) => cancelled = true,
                Ok(Exit::Deadline) => timed_out = true,
                Ok(Exit::Exhausted) | Ok(Exit::Stopped) => {}
                Err(_) => panicked = true,
            }
        }

        if let Some((work, value)) = outcome {
            tracing::info!(
                work = %work,
                value = format_args!("{:#018x}", value),
                attempts,
                elapsed_ms = elapsed.as_millis() as u64,
                "found work"
            );
            return Ok(Solution {
                work,
                value,
                attempts,
                elapsed,
            });
        }

        let err = if panicked {
            WorkError::WorkerPanicked
        } else if cancelled {
            WorkError::CancellationRequested
        } else if timed_out {
            WorkError::DeadlineExceeded { elapsed }
        } else {
            WorkError::AttemptsExhausted { attempts }
        };
        tracing::warn!(root = ?root, attempts, error = %err, "work search stopped");
        Err(err)
    }
}

fn run_worker(
    root: &WorkRoot,
    threshold: WorkThreshold,
    max_attempts: Option<u64>,
    deadline: Option<Instant>,
    cancel: &CancelToken,
    shared: &Shared,
) -> Exit {
    let mut rng = rand::thread_rng();
    let mut start = [0u8; 8];

    loop {
        if shared.done.load(Ordering::Acquire) {
            return Exit::Stopped;
        }
        if cancel.is_cancelled() {
            shared.done.store(true, Ordering::Release);
            return Exit::Cancelled;
        }
        if deadline.is_some_and(|d| Instant::now() >= d) {
            shared.done.store(true, Ordering::Release);
            return Exit::Deadline;
        }
        if let Some(max) = max_attempts {
            if shared.reserved.fetch_add(BATCH_SIZE, Ordering::AcqRel) >= max {
                return Exit::Exhausted;
            }
        }

        rng.fill_bytes(&mut start);
        let found = search_batch(start, root, threshold);

        match found {
            Some((work, value)) => {
                // Count only the nonces actually hashed in this batch.
                let probed = u64::from(work.to_hash_bytes()[7].wrapping_sub(start[7])) + 1;
                shared.hashed.fetch_add(probed, Ordering::AcqRel);
                shared.done.store(true, Ordering::Release);
                return Exit::Found(work, value);
            }
            None => {
                shared.hashed.fetch_add(BATCH_SIZE, Ordering::AcqRel);
            }
        }
    }
}

/// Find work for `root` with the default configuration.
pub fn generate(root: &WorkRoot) -> Result<Work> {
    WorkGenerator::default().generate(root)
}
