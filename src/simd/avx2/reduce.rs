//! AVX2 integer reductions over `u64` (4 lanes per 256-bit register).

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::simd::scalar::{fold, naive_sum};

pub const LANE_COUNT: usize = 4;

/// Vector accumulators used by [`ilp_sum`].
pub const ACCUMULATORS: usize = 4;

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn horizontal(v: __m256i) -> u64 {
    let mut lanes = [0u64; LANE_COUNT];
    _mm256_storeu_si256(lanes.as_mut_ptr() as *mut __m256i, v);
    fold(&lanes)
}

/// Single vector accumulator.
///
/// # Safety
///
/// The CPU must support AVX2.
#[target_feature(enable = "avx2")]
pub unsafe fn sum(data: &[u64]) -> u64 {
    let mut vsum = _mm256_setzero_si256();

    let chunks = data.chunks_exact(LANE_COUNT);
    let tail = chunks.remainder();
    for chunk in chunks {
        let v = _mm256_loadu_si256(chunk.as_ptr() as *const __m256i);
        vsum = _mm256_add_epi64(vsum, v);
    }

    horizontal(vsum).wrapping_add(naive_sum(tail))
}

/// Four independent vector accumulators, 16 elements per iteration.
///
/// # Safety
///
/// The CPU must support AVX2.
#[target_feature(enable = "avx2")]
pub unsafe fn ilp_sum(data: &[u64]) -> u64 {
    let mut vsum0 = _mm256_setzero_si256();
    let mut vsum1 = _mm256_setzero_si256();
    let mut vsum2 = _mm256_setzero_si256();
    let mut vsum3 = _mm256_setzero_si256();

    let block = LANE_COUNT * ACCUMULATORS;
    let chunks = data.chunks_exact(block);
    let tail = chunks.remainder();
    for chunk in chunks {
        let p = chunk.as_ptr();
        let v0 = _mm256_loadu_si256(p as *const __m256i);
        let v1 = _mm256_loadu_si256(p.add(4) as *const __m256i);
        let v2 = _mm256_loadu_si256(p.add(8) as *const __m256i);
        let v3 = _mm256_loadu_si256(p.add(12) as *const __m256i);
        vsum0 = _mm256_add_epi64(vsum0, v0);
        vsum1 = _mm256_add_epi64(vsum1, v1);
        vsum2 = _mm256_add_epi64(vsum2, v2);
        vsum3 = _mm256_add_epi64(vsum3, v3);
    }

    let v01 = _mm256_add_epi64(vsum0, vsum1);
    let v23 = _mm256_add_epi64(vsum2, vsum3);
    horizontal(_mm256_add_epi64(v01, v23)).wrapping_add(naive_sum(tail))
}
