//! Fork-join dispatch of independent trials onto a [`WorkerPool`]

use std::{
    panic::{self, AssertUnwindSafe},
    sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError},
};

use super::pool::{WorkerPool, panic_message};
use crate::{Error, Result};

struct Slots<T> {
    results: Vec<Option<std::result::Result<T, String>>>,
    completed: usize,
}

/// Results keyed by trial index plus a completion barrier
///
/// Each slot is written once. [`ResultTable::wait`] blocks until every slot is
/// filled and returns the values in index order, whatever order the trials
/// finished in.
pub struct ResultTable<T> {
    slots: Mutex<Slots<T>>,
    done: Condvar,
}

impl<T> ResultTable<T> {
    pub fn new(trials: usize) -> Self {
        Self {
            slots: Mutex::new(Slots {
                results: (0..trials).map(|_| None).collect(),
                completed: 0,
            }),
            done: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slots<T>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.lock().results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn completed(&self) -> usize {
        self.lock().completed
    }

    /// Store the outcome of trial `index`; an `Err` carries a panic message.
    ///
    /// Out-of-range indices and second writes to a slot are ignored.
    pub fn record(&self, index: usize, outcome: std::result::Result<T, String>) {
        let mut slots = self.lock();
        let total = slots.results.len();
        match slots.results.get_mut(index) {
            Some(slot) if slot.is_none() => *slot = Some(outcome),
            _ => {
                tracing::warn!(index, "ignored duplicate or out-of-range trial result");
                return;
            }
        }
        slots.completed += 1;
        if slots.completed == total {
            self.done.notify_all();
        }
    }

    /// Block until every trial has reported, then take the results.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TrialPanicked`] for the lowest-indexed failed trial.
    pub fn wait(&self) -> Result<Vec<T>> {
        let mut slots = self.lock();
        while slots.completed < slots.results.len() {
            slots = self
                .done
                .wait(slots)
                .unwrap_or_else(PoisonError::into_inner);
        }

        std::mem::take(&mut slots.results)
            .into_iter()
            .enumerate()
            .map(|(index, slot)| match slot {
                Some(Ok(value)) => Ok(value),
                Some(Err(message)) => Err(Error::TrialPanicked { index, message }),
                None => Err(Error::TrialPanicked {
                    index,
                    message: "result already taken".to_string(),
                }),
            })
            .collect()
    }
}

/// Run `trials` independent calls of `trial(index)` on `pool` and return the
/// results in index order once all have finished.
///
/// A panicking trial is captured and reported as [`Error::TrialPanicked`]
/// after the barrier releases; it does not take its worker down.
pub fn run_trials<T, F>(pool: &WorkerPool, trials: usize, trial: F) -> Result<Vec<T>>
where
    T: Send + 'static,
    F: Fn(usize) -> T + Send + Sync + 'static,
{
    let table = Arc::new(ResultTable::new(trials));
    let trial = Arc::new(trial);

    for index in 0..trials {
        let table = Arc::clone(&table);
        let trial = Arc::clone(&trial);
        pool.submit(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| trial(index)))
                .map_err(|payload| panic_message(payload.as_ref()));
            table.record(index, outcome);
        })?;
    }

    tracing::debug!(trials, "waiting for trials");
    table.wait()
}
