//! Fixed-size worker pool over a shared FIFO job queue

use std::{
    collections::VecDeque,
    panic::{self, AssertUnwindSafe},
    sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError},
    thread::{self, JoinHandle},
};

use crate::{Error, Result};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Lifecycle of a [`WorkerPool`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolState {
    /// Accepting and running jobs
    Running,
    /// No new jobs; workers finish what is queued, then exit
    Draining,
    /// Every worker has been joined
    Stopped,
}

struct Queue {
    jobs: VecDeque<Job>,
    state: PoolState,
}

struct Shared {
    queue: Mutex<Queue>,
    available: Condvar,
}

impl Shared {
    // Jobs run outside the lock; a poisoned queue is still consistent.
    fn lock(&self) -> MutexGuard<'_, Queue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Pool of worker threads consuming boxed jobs in submission order
///
/// Workers sleep on a condition variable while the queue is empty. Dropping
/// the pool drains the queue and joins every worker.
pub struct WorkerPool {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn `workers` threads.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for zero workers and
    /// [`Error::WorkerSpawn`] if the OS refuses a thread; threads spawned
    /// before the failure are joined.
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(Error::InvalidConfiguration {
                message: "worker pool needs at least one thread".to_string(),
            });
        }

        let mut pool = Self {
            shared: Arc::new(Shared {
                queue: Mutex::new(Queue {
                    jobs: VecDeque::new(),
                    state: PoolState::Running,
                }),
                available: Condvar::new(),
            }),
            workers: Vec::with_capacity(workers),
        };

        for id in 0..workers {
            let shared = Arc::clone(&pool.shared);
            let handle = thread::Builder::new()
                .name(format!("trial-worker-{id}"))
                .spawn(move || worker_loop(id, &shared))
                .map_err(|source| Error::WorkerSpawn { source })?;
            pool.workers.push(handle);
        }

        tracing::debug!(workers, "worker pool started");
        Ok(pool)
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    pub fn state(&self) -> PoolState {
        self.shared.lock().state
    }

    /// Queue a job and wake one idle worker.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PoolShutDown`] once shutdown has begun.
    pub fn submit<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        {
            let mut queue = self.shared.lock();
            if queue.state != PoolState::Running {
                return Err(Error::PoolShutDown);
            }
            queue.jobs.push_back(Box::new(job));
        }
        self.shared.available.notify_one();
        Ok(())
    }

    /// Stop accepting jobs, let workers drain the queue, and join them.
    ///
    /// Idempotent; called by `Drop`.
    pub fn shutdown(&mut self) {
        {
            let mut queue = self.shared.lock();
            if queue.state == PoolState::Stopped {
                return;
            }
            queue.state = PoolState::Draining;
        }
        self.shared.available.notify_all();

        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                tracing::warn!("worker thread terminated abnormally");
            }
        }

        self.shared.lock().state = PoolState::Stopped;
        tracing::debug!("worker pool stopped");
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop(id: usize, shared: &Shared) {
    loop {
        let job = {
            let mut queue = shared.lock();
            loop {
                if let Some(job) = queue.jobs.pop_front() {
                    break job;
                }
                if queue.state != PoolState::Running {
                    return;
                }
                queue = shared
                    .available
                    .wait(queue)
                    .unwrap_or_else(PoisonError::into_inner);
            }
        };

        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(job)) {
            tracing::warn!(
                worker = id,
                message = %panic_message(payload.as_ref()),
                "job panicked"
            );
        }
    }
}

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
