use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use super::error::{Error, Result};

/// Shared queue of unit indices the pool's workers pull from.
///
/// The counter only guarantees each unit is handed out exactly once;
/// dispatch order across workers is unspecified.
#[derive(Debug)]
pub struct WorkQueue {
    next: AtomicU64,
    total: u64,
}

impl WorkQueue {
    #[must_use]
    pub fn new(total: u64) -> Self {
        Self {
            next: AtomicU64::new(0),
            total,
        }
    }

    /// Index of the next unit to execute, or `None` once all units have
    /// been handed out.
    pub fn next(&self) -> Option<u64> {
        let idx = self.next.fetch_add(1, Ordering::Relaxed);
        (idx < self.total).then_some(idx)
    }
}

/// Bounded set of concurrent execution slots.
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    width: u64,
}

impl WorkerPool {
    pub fn new(width: u64) -> Result<Self> {
        if width == 0 {
            return Err(Error::InvalidConcurrency);
        }
        Ok(Self { width })
    }

    #[must_use]
    pub fn width(&self) -> u64 {
        self.width
    }

    /// Execute `units` units with at most `width` in flight, blocking the
    /// caller until every unit completed or `timeout` elapsed.
    ///
    /// Returns `false` in the timeout case. In-flight units are not
    /// interrupted; they keep running detached and may still deliver
    /// their outcome to a collector that has not been sealed yet.
    pub async fn drain<F, Fut>(&self, units: u64, timeout: Duration, unit: F) -> Result<bool>
    where
        F: Fn(u64) -> Fut + Clone + Send + Sync + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        let queue = Arc::new(WorkQueue::new(units));

        let workers = self.width.min(units);
        let mut handles = Vec::with_capacity(workers as usize);
        for _ in 0..workers {
            let queue = queue.clone();
            let unit = unit.clone();
            handles.push(tokio::spawn(async move {
                while let Some(idx) = queue.next() {
                    unit(idx).await;
                }
            }));
        }

        let joined = async move {
            for handle in handles {
                handle.await?;
            }
            Ok::<(), tokio::task::JoinError>(())
        };

        match tokio::time::timeout(timeout, joined).await {
            Ok(joined) => {
                joined?;
                Ok(true)
            }
            // Dropping the join handles detaches the remaining workers.
            Err(_) => Ok(false),
        }
    }
}
