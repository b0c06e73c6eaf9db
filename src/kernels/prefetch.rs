//! Software prefetch distance sweeps.
//!
//! The prefetch target is the element `distance` steps ahead in *access
//! order*: for the random kernels that is `data[indices[i + distance]]`, not
//! `data[i + distance]`. A distance of zero issues no prefetch at all.

use crate::barrier::{clobber, escape, prefetch_read};
use crate::kernels::run_or_sentinel;
use crate::permutation::{Permutation, DEFAULT_SEED};
use crate::record::BenchResult;
use crate::timing::measure;

/// Distances swept by the random-order kernels.
pub const RANDOM_DISTANCES: [usize; 4] = [0, 8, 32, 128];

/// Distances swept by the sequential kernels.
pub const SEQUENTIAL_DISTANCES: [usize; 2] = [0, 64];

/// Sums `data` in `indices` order, prefetching `distance` accesses ahead.
#[inline(always)]
pub fn sum_gather(data: &[u64], indices: &[usize], distance: usize) -> u64 {
    let n = indices.len();
    let mut sum = 0u64;
    if distance == 0 {
        for &i in indices {
            sum = sum.wrapping_add(data[i]);
            clobber();
        }
    } else {
        let base = data.as_ptr();
        for k in 0..n {
            if let Some(&ahead) = indices.get(k + distance) {
                prefetch_read(base.wrapping_add(ahead));
            }
            sum = sum.wrapping_add(data[indices[k]]);
            clobber();
        }
    }
    sum
}

/// Sums `data` in index order, prefetching `distance` elements ahead.
#[inline(always)]
pub fn sum_stream(data: &[u64], distance: usize) -> u64 {
    let n = data.len();
    let mut sum = 0u64;
    if distance == 0 {
        for &x in data {
            sum = sum.wrapping_add(x);
            clobber();
        }
    } else {
        let base = data.as_ptr();
        for i in 0..n {
            if i + distance < n {
                prefetch_read(base.wrapping_add(i + distance));
            }
            sum = sum.wrapping_add(data[i]);
            clobber();
        }
    }
    sum
}

fn run_random(buffer: &mut [u64], distance: usize, name: &'static str) -> BenchResult {
    run_or_sentinel(name, || {
        let data: &[u64] = buffer;
        let order = Permutation::generate(data.len(), DEFAULT_SEED)?;
        let indices = order.as_slice();

        let (sum, ns) = measure(|| sum_gather(data, indices, distance));
        escape(sum);

        Ok(BenchResult::new(name, indices.len() as u64, ns))
    })
}

fn run_sequential(buffer: &mut [u64], distance: usize, name: &'static str) -> BenchResult {
    let data: &[u64] = buffer;
    let (sum, ns) = measure(|| sum_stream(data, distance));
    escape(sum);
    BenchResult::new(name, data.len() as u64, ns)
}

pub fn random_no_prefetch(buffer: &mut [u64]) -> BenchResult {
    run_random(buffer, 0, "Random no prefetch")
}

pub fn random_prefetch_8(buffer: &mut [u64]) -> BenchResult {
    run_random(buffer, 8, "Random prefetch +8")
}

pub fn random_prefetch_32(buffer: &mut [u64]) -> BenchResult {
    run_random(buffer, 32, "Random prefetch +32")
}

pub fn random_prefetch_128(buffer: &mut [u64]) -> BenchResult {
    run_random(buffer, 128, "Random prefetch +128")
}

pub fn sequential_no_prefetch(buffer: &mut [u64]) -> BenchResult {
    run_sequential(buffer, 0, "Sequential no sw prefetch")
}

pub fn sequential_prefetch_64(buffer: &mut [u64]) -> BenchResult {
    run_sequential(buffer, 64, "Sequential sw prefetch +64")
}
