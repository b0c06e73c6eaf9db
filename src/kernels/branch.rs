//! Branch predictor sensitivity.
//!
//! All three kernels fill the buffer with the same seeded values in
//! `0..2^32` and sum those below [`THRESHOLD`] (about half of them). The
//! sorted kernel sorts first, which turns the branch into one long run of
//! "taken" followed by one of "not taken". The branchless kernel replaces
//! the branch with an all-ones/all-zeros mask. Because the multiset of
//! values is identical, all three produce the same sum.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::barrier::{clobber, escape};
use crate::permutation::DEFAULT_SEED;
use crate::record::BenchResult;
use crate::timing::measure;

/// Midpoint of the value range.
pub const THRESHOLD: u64 = (u32::MAX / 2) as u64;

/// Overwrites `buffer` with seeded pseudo-random values in `0..2^32`.
pub fn fill_random(buffer: &mut [u64], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    for slot in buffer.iter_mut() {
        *slot = u64::from(rng.random::<u32>());
    }
}

#[inline(always)]
pub fn sum_below_branchy(data: &[u64], threshold: u64) -> u64 {
    let mut sum = 0u64;
    for &x in data {
        if x < threshold {
            sum = sum.wrapping_add(x);
        }
        clobber();
    }
    sum
}

#[inline(always)]
pub fn sum_below_branchless(data: &[u64], threshold: u64) -> u64 {
    let mut sum = 0u64;
    for &x in data {
        // true -> 0xFFFF..FF, false -> 0
        let mask = u64::from(x < threshold).wrapping_neg();
        sum = sum.wrapping_add(x & mask);
        clobber();
    }
    sum
}

fn finish(name: &'static str, n: usize, sum: u64, ns: u64) -> BenchResult {
    BenchResult::new(name, n as u64, ns).with_checksum(escape(sum))
}

pub fn sorted(buffer: &mut [u64]) -> BenchResult {
    fill_random(buffer, DEFAULT_SEED);
    buffer.sort_unstable();
    let data: &[u64] = buffer;

    let (sum, ns) = measure(|| sum_below_branchy(data, THRESHOLD));
    finish("Branch sorted (predictable)", data.len(), sum, ns)
}

pub fn unsorted(buffer: &mut [u64]) -> BenchResult {
    fill_random(buffer, DEFAULT_SEED);
    let data: &[u64] = buffer;

    let (sum, ns) = measure(|| sum_below_branchy(data, THRESHOLD));
    finish("Branch random (unpredictable)", data.len(), sum, ns)
}

pub fn branchless(buffer: &mut [u64]) -> BenchResult {
    fill_random(buffer, DEFAULT_SEED);
    let data: &[u64] = buffer;

    let (sum, ns) = measure(|| sum_below_branchless(data, THRESHOLD));
    finish("Branchless (mask)", data.len(), sum, ns)
}
