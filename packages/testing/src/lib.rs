#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))] // This is all test code, no need to test it.

//! Private helpers for tests and benchmarks in `free_list` packages.

use std::num::NonZero;
use std::panic;
use std::sync::Barrier;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

/// Runs `test_fn` on a separate thread and panics if it does not finish in time.
///
/// Concurrency tests that deadlock would otherwise hang the test run forever. The limit is
/// 10 seconds, or 60 seconds under Miri, which is far slower at thread synchronization.
///
/// Setting the `MUTATION_TESTING` environment variable to `1` disables the watchdog, so that
/// mutation testing can observe a hanging mutant instead of a panic.
///
/// # Panics
///
/// Panics if `test_fn` exceeds the time limit. If `test_fn` panics, the panic is resumed on
/// the calling thread.
pub fn with_watchdog<F, R>(test_fn: F) -> R
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    if std::env::var("MUTATION_TESTING").as_deref() == Ok("1") {
        return test_fn();
    }

    let limit = if cfg!(miri) {
        Duration::from_secs(60)
    } else {
        Duration::from_secs(10)
    };

    let (result_tx, result_rx) = mpsc::channel();

    let worker = thread::spawn(move || {
        // The receiver is gone if we already timed out, nobody to report to.
        drop(result_tx.send(test_fn()));
    });

    match result_rx.recv_timeout(limit) {
        Ok(result) => {
            worker.join().expect("worker already sent its result");
            result
        }
        Err(RecvTimeoutError::Timeout) => panic!("test did not complete within {limit:?}"),
        Err(RecvTimeoutError::Disconnected) => match worker.join() {
            Ok(()) => panic!("worker exited without a result"),
            Err(payload) => panic::resume_unwind(payload),
        },
    }
}

/// Calls `work` on `thread_count` threads at once and collects the results in thread order.
///
/// All threads are released together after they have started, to maximize contention on
/// whatever `work` touches. Each call receives the index of its thread.
///
/// # Panics
///
/// Panics if any of the calls panics.
pub fn on_many_threads<F, R>(thread_count: NonZero<usize>, work: F) -> Vec<R>
where
    F: Fn(usize) -> R + Sync,
    R: Send,
{
    let start = Barrier::new(thread_count.get());

    thread::scope(|scope| {
        let handles = (0..thread_count.get())
            .map(|index| {
                let start = &start;
                let work = &work;

                scope.spawn(move || {
                    start.wait();
                    work(index)
                })
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|payload| panic::resume_unwind(payload))
            })
            .collect()
    })
}
