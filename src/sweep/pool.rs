use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::{
    foundation::error::{FailureRecord, SweepError, SweepResult},
    sweep::{
        collect::{FrameResult, ResultCollector},
        schedule::{Task, TaskQueue},
    },
};

/// Default number of sweep workers.
pub const DEFAULT_WORKERS: usize = 30;

/// Cooperative cancellation flag shared between a sweep and its caller.
///
/// Cancelling never drops tasks: every task not yet started is recorded as a
/// [`SweepError::Cancelled`] failure, so the sweep as a whole fails.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Fixed-size set of workers draining one shared [`TaskQueue`].
pub struct WorkerPool {
    workers: usize,
    pool: rayon::ThreadPool,
}

impl WorkerPool {
    /// Build a pool with exactly `workers` threads. `0` is rejected.
    pub fn new(workers: usize) -> SweepResult<Self> {
        if workers == 0 {
            return Err(SweepError::validation("sweep workers must be >= 1"));
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("blocksweep-worker-{i}"))
            .build()
            .map_err(|e| SweepError::transform(format!("failed to build worker pool: {e}")))?;
        Ok(Self { workers, pool })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Drain `queue`, publishing every task's outcome to `collector`.
    ///
    /// Returns once every worker has observed an empty queue.
    pub fn run<F>(&self, queue: &TaskQueue, work: F, collector: &ResultCollector)
    where
        F: Fn(Task) -> Result<FrameResult, FailureRecord> + Sync,
    {
        self.run_with_cancel(queue, work, collector, &CancelToken::new());
    }

    /// [`run`](Self::run) with a cancellation flag checked before each task.
    pub fn run_with_cancel<F>(
        &self,
        queue: &TaskQueue,
        work: F,
        collector: &ResultCollector,
        cancel: &CancelToken,
    ) where
        F: Fn(Task) -> Result<FrameResult, FailureRecord> + Sync,
    {
        let total = queue.len();
        let done = AtomicUsize::new(0);
        let work = &work;
        let done = &done;

        self.pool.scope(|s| {
            for _ in 0..self.workers {
                s.spawn(move |_| {
                    while let Some(task) = queue.pop() {
                        let outcome = if cancel.is_cancelled() {
                            Err(FailureRecord::new(
                                task.block_size,
                                SweepError::Cancelled {
                                    block_size: task.block_size,
                                },
                            ))
                        } else {
                            run_task(work, task)
                        };

                        let n = done.fetch_add(1, Ordering::Relaxed) + 1;
                        log_progress(n, total, task, &outcome);
                        collector.publish(outcome);
                    }
                });
            }
        });
    }
}

fn run_task<F>(work: &F, task: Task) -> Result<FrameResult, FailureRecord>
where
    F: Fn(Task) -> Result<FrameResult, FailureRecord>,
{
    match catch_unwind(AssertUnwindSafe(|| work(task))) {
        Ok(outcome) => outcome,
        Err(payload) => Err(FailureRecord::new(
            task.block_size,
            SweepError::transform(format!("worker panicked: {}", panic_message(&*payload))),
        )),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

fn log_progress(n: usize, total: usize, task: Task, outcome: &Result<FrameResult, FailureRecord>) {
    let pct = if total == 0 {
        100.0
    } else {
        100.0 * n as f64 / total as f64
    };
    match outcome {
        Ok(_) => tracing::info!(
            done = n,
            total,
            block_size = task.block_size,
            "[{n:>3}/{total:03} {pct:5.2}%] done with image"
        ),
        Err(f) => tracing::warn!(
            done = n,
            total,
            block_size = task.block_size,
            error = %f.cause,
            "[{n:>3}/{total:03} {pct:5.2}%] block size failed"
        ),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sweep/pool.rs"]
mod tests;
