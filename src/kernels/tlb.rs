//! Strided passes that touch one element every `stride` elements.
//!
//! At 512 elements (4 KiB) every access lands on a new page, so the cost is
//! dominated by TLB misses rather than data-cache misses.

use crate::barrier::{clobber, escape};
use crate::record::BenchResult;
use crate::timing::measure;

/// Passes over the buffer per kernel call.
pub const STRIDE_REPEATS: usize = 10;

/// Reported accesses: `STRIDE_REPEATS * floor(n / stride)`, counting at least
/// one element per pass when the stride exceeds a non-empty buffer. An empty
/// buffer reports none.
pub fn strided_iterations(n: usize, stride: usize) -> u64 {
    if n == 0 {
        return 0;
    }
    let per_pass = (n / stride).max(1);
    (per_pass * STRIDE_REPEATS) as u64
}

/// Sums every `stride`-th element, `STRIDE_REPEATS` times over.
#[inline(always)]
pub fn sum_strided(data: &[u64], stride: usize) -> u64 {
    let mut sum = 0u64;
    for _ in 0..STRIDE_REPEATS {
        for &x in data.iter().step_by(stride) {
            sum = sum.wrapping_add(x);
            clobber();
        }
    }
    sum
}

fn run_stride(buffer: &mut [u64], stride: usize, name: &'static str) -> BenchResult {
    let data: &[u64] = buffer;
    let (sum, ns) = measure(|| sum_strided(data, stride));
    escape(sum);
    BenchResult::new(name, strided_iterations(data.len(), stride), ns)
}

pub fn stride_8b(buffer: &mut [u64]) -> BenchResult {
    run_stride(buffer, 1, "Stride 8B (sequential)")
}

pub fn stride_64b(buffer: &mut [u64]) -> BenchResult {
    run_stride(buffer, 8, "Stride 64B (cache line)")
}

pub fn stride_512b(buffer: &mut [u64]) -> BenchResult {
    run_stride(buffer, 64, "Stride 512B")
}

pub fn stride_4k(buffer: &mut [u64]) -> BenchResult {
    run_stride(buffer, 512, "Stride 4KB (1 per page)")
}

pub fn stride_8k(buffer: &mut [u64]) -> BenchResult {
    run_stride(buffer, 1024, "Stride 8KB (skip pages)")
}
