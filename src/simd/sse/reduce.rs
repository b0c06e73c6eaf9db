#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::simd::scalar::{fold, naive_sum};

pub const LANE_COUNT: usize = 2;
pub const ACCUMULATORS: usize = 4;

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn horizontal(v: __m128i) -> u64 {
    let mut lanes = [0u64; LANE_COUNT];
    _mm_storeu_si128(lanes.as_mut_ptr() as *mut __m128i, v);
    fold(&lanes)
}

/// # Safety
///
/// The CPU must support SSE2.
#[target_feature(enable = "sse2")]
pub unsafe fn sum(data: &[u64]) -> u64 {
    let mut vsum = _mm_setzero_si128();

    let chunks = data.chunks_exact(LANE_COUNT);
    let tail = chunks.remainder();
    for chunk in chunks {
        let v = _mm_loadu_si128(chunk.as_ptr() as *const __m128i);
        vsum = _mm_add_epi64(vsum, v);
    }

    horizontal(vsum).wrapping_add(naive_sum(tail))
}

/// # Safety
///
/// The CPU must support SSE2.
#[target_feature(enable = "sse2")]
pub unsafe fn ilp_sum(data: &[u64]) -> u64 {
    let mut vsum0 = _mm_setzero_si128();
    let mut vsum1 = _mm_setzero_si128();
    let mut vsum2 = _mm_setzero_si128();
    let mut vsum3 = _mm_setzero_si128();

    let chunks = data.chunks_exact(LANE_COUNT * ACCUMULATORS);
    let tail = chunks.remainder();
    for chunk in chunks {
        let p = chunk.as_ptr();
        vsum0 = _mm_add_epi64(vsum0, _mm_loadu_si128(p as *const __m128i));
        vsum1 = _mm_add_epi64(vsum1, _mm_loadu_si128(p.add(2) as *const __m128i));
        vsum2 = _mm_add_epi64(vsum2, _mm_loadu_si128(p.add(4) as *const __m128i));
        vsum3 = _mm_add_epi64(vsum3, _mm_loadu_si128(p.add(6) as *const __m128i));
    }

    let v = _mm_add_epi64(_mm_add_epi64(vsum0, vsum1), _mm_add_epi64(vsum2, vsum3));
    horizontal(v).wrapping_add(naive_sum(tail))
}
