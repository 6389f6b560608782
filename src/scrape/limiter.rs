//! Admission gate bounding concurrent store searches
//!
//! Backed by a tokio `Semaphore`, which hands out permits in the order they
//! were requested, so queued tasks start in submission order.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Default number of searches allowed in flight
pub const DEFAULT_CAPACITY: usize = 5;

/// Bounds how many tasks run their body at the same time
#[derive(Debug, Clone)]
pub struct ConcurrencyLimiter {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

impl ConcurrencyLimiter {
    /// Creates a limiter admitting at most `capacity` tasks at once
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Permits not currently held by a running task
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Waits for a free slot, then runs `task` to completion
    ///
    /// The slot is released when `task` finishes, whatever it returns.
    pub async fn run<F, T>(&self, task: F) -> T
    where
        F: Future<Output = T>,
    {
        // acquire() only errors on a closed semaphore and this one is never closed
        let _permit = self.semaphore.acquire().await.ok();
        task.await
    }
}

impl Default for ConcurrencyLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
