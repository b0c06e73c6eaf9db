//! False sharing between threads that never touch each other's data.
//!
//! Eight threads each bump their own counter `10 * n` times. In the packed
//! layout the counters are adjacent `u64`s, so all eight share one cache line
//! and every increment invalidates the line in the other cores. In the padded
//! layout each counter owns a full line. Both layouts do the same number of
//! increments; only the coherence traffic differs.
//!
//! The counters live for one kernel call: reset before the threads start,
//! each written only by its own thread, read back after join.

use std::ptr;

use crate::barrier::escape;
use crate::error::Result;
use crate::kernels::run_or_sentinel;
use crate::parallel::parallel_slots;
use crate::record::BenchResult;
use crate::timing::measure;

pub const CONTENTION_THREADS: usize = 8;

/// Increments per thread per buffer element.
pub const CONTENTION_ROUNDS: usize = 10;

pub const CACHE_LINE_SIZE: usize = 64;

/// A per-thread counter with a volatile increment, so every bump is a real
/// load and store instead of being folded into one add.
pub trait Counter: Default + Send {
    fn bump(&mut self, times: u64);
    fn get(&self) -> u64;
}

/// Bare counter; eight of them fit in one 64-byte line.
#[derive(Debug, Default)]
#[repr(C)]
pub struct PackedCounter {
    count: u64,
}

/// Counter aligned and padded to a full cache line.
#[derive(Debug, Default)]
#[repr(C, align(64))]
pub struct PaddedCounter {
    count: u64,
}

#[inline(always)]
fn bump_volatile(slot: &mut u64, times: u64) {
    let p: *mut u64 = slot;
    for _ in 0..times {
        // SAFETY: `p` comes from a live `&mut u64`.
        unsafe { ptr::write_volatile(p, ptr::read_volatile(p).wrapping_add(1)) };
    }
}

impl Counter for PackedCounter {
    fn bump(&mut self, times: u64) {
        bump_volatile(&mut self.count, times);
    }

    fn get(&self) -> u64 {
        self.count
    }
}

impl Counter for PaddedCounter {
    fn bump(&mut self, times: u64) {
        bump_volatile(&mut self.count, times);
    }

    fn get(&self) -> u64 {
        self.count
    }
}

/// One counter per contention thread, in a single contiguous array that
/// starts on a cache-line boundary. Packed, the eight slots fill exactly one
/// line.
#[derive(Debug, Default)]
#[repr(C, align(64))]
pub struct ContentionCounters<C: Counter> {
    slots: [C; CONTENTION_THREADS],
}

impl<C: Counter> ContentionCounters<C> {
    pub fn reset(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = C::default();
        }
    }

    /// Each thread bumps its own slot `per_thread` times; returns once all
    /// threads have joined.
    pub fn run(&mut self, per_thread: u64) -> Result<()> {
        parallel_slots(&mut self.slots, |_, slot| slot.bump(per_thread))
    }

    pub fn total(&self) -> u64 {
        self.slots.iter().fold(0u64, |a, c| a.wrapping_add(c.get()))
    }

    pub fn counts(&self) -> [u64; CONTENTION_THREADS] {
        std::array::from_fn(|i| self.slots[i].get())
    }
}

/// Increments reported for a buffer of `n` elements.
pub fn contention_iterations(n: usize) -> u64 {
    (n * CONTENTION_ROUNDS * CONTENTION_THREADS) as u64
}

fn run_contention<C: Counter>(n: usize, name: &'static str) -> BenchResult {
    run_or_sentinel(name, || {
        let mut counters = Box::<ContentionCounters<C>>::default();
        counters.reset();
        let per_thread = (n * CONTENTION_ROUNDS) as u64;

        let (outcome, ns) = measure(|| counters.run(per_thread));
        outcome?;
        let total = escape(counters.total());

        Ok(BenchResult::new(name, contention_iterations(n), ns).with_checksum(total))
    })
}

pub fn false_sharing(buffer: &mut [u64]) -> BenchResult {
    run_contention::<PackedCounter>(buffer.len(), "False sharing (packed counters)")
}

pub fn no_false_sharing(buffer: &mut [u64]) -> BenchResult {
    run_contention::<PaddedCounter>(buffer.len(), "No false sharing (padded counters)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_match_cache_line_assumptions() {
        assert_eq!(std::mem::size_of::<PackedCounter>(), 8);
        assert_eq!(std::mem::size_of::<PaddedCounter>(), CACHE_LINE_SIZE);
        assert_eq!(std::mem::align_of::<PaddedCounter>(), CACHE_LINE_SIZE);
        assert_eq!(
            std::mem::size_of::<ContentionCounters<PackedCounter>>(),
            CACHE_LINE_SIZE
        );
        assert_eq!(
            std::mem::align_of::<ContentionCounters<PackedCounter>>(),
            CACHE_LINE_SIZE
        );
    }

    #[test]
    fn packed_counters_start_on_a_line_boundary() {
        let boxes: Vec<_> = (0..32)
            .map(|_| Box::<ContentionCounters<PackedCounter>>::default())
            .collect();
        for counters in &boxes {
            let addr = &**counters as *const ContentionCounters<PackedCounter> as usize;
            assert_eq!(addr % CACHE_LINE_SIZE, 0, "counters at {addr:#x} span two lines");
        }
    }

    #[test]
    fn reset_then_run_counts_exactly() {
        let mut counters = ContentionCounters::<PaddedCounter>::default();
        counters.run(5).unwrap();
        counters.reset();
        assert_eq!(counters.total(), 0);
        counters.run(1_000).unwrap();
        assert_eq!(counters.counts(), [1_000; CONTENTION_THREADS]);
        assert_eq!(counters.total(), 8_000);
    }
}
