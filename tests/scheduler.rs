//! Worker pool fork-join behaviour

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use rlbook::{
    Error,
    scheduler::{PoolState, ResultTable, WorkerPool, run_trials},
};

#[test]
fn test_fork_join_writes_every_index_once() {
    const JOBS: usize = 200;

    let mut pool = WorkerPool::new(4).unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let table = Arc::new(ResultTable::new(JOBS));

    for index in 0..JOBS {
        let seen = Arc::clone(&seen);
        let table = Arc::clone(&table);
        pool.submit(move || {
            seen.lock().unwrap().push(index);
            table.record(index, Ok(index * 2));
        })
        .unwrap();
    }

    let results = table.wait().unwrap();
    assert_eq!(results, (0..JOBS).map(|i| i * 2).collect::<Vec<_>>());

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), JOBS);
    assert_eq!(seen.iter().copied().collect::<HashSet<_>>().len(), JOBS);

    pool.shutdown();
    assert_eq!(pool.state(), PoolState::Stopped);
}

#[test]
fn test_shutdown_drains_queued_jobs() {
    let mut pool = WorkerPool::new(1).unwrap();
    let counter = Arc::new(Mutex::new(0));
    for _ in 0..50 {
        let counter = Arc::clone(&counter);
        pool.submit(move || *counter.lock().unwrap() += 1).unwrap();
    }
    pool.shutdown();
    assert_eq!(*counter.lock().unwrap(), 50);
}

#[test]
fn test_submit_after_shutdown_fails() {
    let mut pool = WorkerPool::new(2).unwrap();
    pool.shutdown();
    pool.shutdown();
    assert!(matches!(pool.submit(|| {}), Err(Error::PoolShutDown)));
}

#[test]
fn test_zero_workers_rejected() {
    assert!(matches!(
        WorkerPool::new(0),
        Err(Error::InvalidConfiguration { .. })
    ));
}

#[test]
fn test_panicking_trial_does_not_kill_workers() {
    let pool = WorkerPool::new(1).unwrap();
    let failed = run_trials(&pool, 3, |index| {
        assert_ne!(index, 1, "bad trial");
        index
    });
    assert!(matches!(failed, Err(Error::TrialPanicked { index: 1, .. })));

    // The single worker survived and still runs jobs.
    let results = run_trials(&pool, 4, |index| index + 1).unwrap();
    assert_eq!(results, vec![1, 2, 3, 4]);
}
