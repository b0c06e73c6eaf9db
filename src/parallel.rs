//! Fork-join over a fixed number of OS threads.
//!
//! Each call spawns its own scoped threads, runs one body per share and
//! joins them all before returning. There is no pool: the threaded kernels
//! time thread start-up as part of what they measure, and nothing is reused
//! across calls. Results come back ordered by thread index, never by
//! completion order; combining them is the caller's job.

use std::ops::Range;
use std::thread;

use crate::error::{validation_error, Result};

/// Upper bound on threads in a single fork-join call.
pub const MAX_THREADS: usize = 32;

/// One thread's share of the work: its index and the half-open element range
/// it owns exclusively until join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub index: usize,
    pub range: Range<usize>,
}

impl Task {
    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

fn check_thread_count(threads: usize) -> Result<()> {
    if threads == 0 || threads > MAX_THREADS {
        return Err(validation_error(format!(
            "thread count {threads} must be in 1..={MAX_THREADS}"
        )));
    }
    Ok(())
}

/// Splits `0..n` into `threads` contiguous, non-overlapping ranges.
///
/// Every range gets `n / threads` elements and the first `n % threads`
/// ranges get one more, so the ranges cover `0..n` exactly.
pub fn partition(n: usize, threads: usize) -> Result<Vec<Task>> {
    check_thread_count(threads)?;

    let base = n / threads;
    let remainder = n % threads;

    let mut tasks = Vec::with_capacity(threads);
    let mut offset = 0;
    for index in 0..threads {
        let len = base + usize::from(index < remainder);
        tasks.push(Task {
            index,
            range: offset..offset + len,
        });
        offset += len;
    }
    debug_assert_eq!(offset, n);
    Ok(tasks)
}

/// Runs `body` once per share of `0..n` on its own thread and returns the
/// per-thread results in thread-index order.
///
/// A panic in any body is re-raised on the calling thread after all threads
/// have been joined.
pub fn parallel_for<T, F>(threads: usize, n: usize, body: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(&Task) -> T + Sync,
{
    let tasks = partition(n, threads)?;
    let body = &body;

    let results = thread::scope(|s| {
        let handles: Vec<_> = tasks
            .iter()
            .map(|task| s.spawn(move || body(task)))
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|p| std::panic::resume_unwind(p)))
            .collect::<Vec<T>>()
    });

    Ok(results)
}

/// Hands each element of `slots` to its own thread as `&mut`, together with
/// the slot index, and joins them all.
///
/// Every slot has exactly one writer for the lifetime of the call, so no
/// synchronization is involved even when slots share a cache line.
pub fn parallel_slots<S, F>(slots: &mut [S], body: F) -> Result<()>
where
    S: Send,
    F: Fn(usize, &mut S) + Sync,
{
    check_thread_count(slots.len())?;
    let body = &body;

    thread::scope(|s| {
        let handles: Vec<_> = slots
            .iter_mut()
            .enumerate()
            .map(|(i, slot)| s.spawn(move || body(i, slot)))
            .collect();

        for h in handles {
            h.join().unwrap_or_else(|p| std::panic::resume_unwind(p));
        }
    });

    Ok(())
}
