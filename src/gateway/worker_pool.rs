//! Bounded pool for blocking model invocations

use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::error::{AppError, Result};

/// Runs blocking closures on tokio's blocking threads, at most `capacity`
/// at a time. Excess submissions wait for a permit without occupying a
/// thread.
#[derive(Clone)]
pub struct WorkerPool {
    permits: Arc<Semaphore>,
    capacity: usize,
}

impl WorkerPool {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            permits: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of workers currently free
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Run `job` on a blocking worker and wait for its result.
    ///
    /// The permit travels with the job, so capacity stays claimed until the
    /// job finishes even if the awaiting future is dropped.
    pub async fn run<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| AppError::Internal("Worker pool is closed".to_string()))?;

        debug!(available = self.available(), "Dispatching job to worker pool");

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            job()
        })
        .await
        .map_err(|e| AppError::Processing(format!("worker task failed: {}", e)))
    }
}
