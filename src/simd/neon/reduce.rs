use std::arch::aarch64::*;

use crate::simd::scalar::naive_sum;

pub const LANE_COUNT: usize = 2;
pub const ACCUMULATORS: usize = 4;

/// # Safety
///
/// The CPU must support NEON (every AArch64 core does).
#[target_feature(enable = "neon")]
pub unsafe fn sum(data: &[u64]) -> u64 {
    let mut vsum = vdupq_n_u64(0);

    let chunks = data.chunks_exact(LANE_COUNT);
    let tail = chunks.remainder();
    for chunk in chunks {
        vsum = vaddq_u64(vsum, vld1q_u64(chunk.as_ptr()));
    }

    vaddvq_u64(vsum).wrapping_add(naive_sum(tail))
}

/// # Safety
///
/// The CPU must support NEON.
#[target_feature(enable = "neon")]
pub unsafe fn ilp_sum(data: &[u64]) -> u64 {
    let mut vsum0 = vdupq_n_u64(0);
    let mut vsum1 = vdupq_n_u64(0);
    let mut vsum2 = vdupq_n_u64(0);
    let mut vsum3 = vdupq_n_u64(0);

    let chunks = data.chunks_exact(LANE_COUNT * ACCUMULATORS);
    let tail = chunks.remainder();
    for chunk in chunks {
        let p = chunk.as_ptr();
        vsum0 = vaddq_u64(vsum0, vld1q_u64(p));
        vsum1 = vaddq_u64(vsum1, vld1q_u64(p.add(2)));
        vsum2 = vaddq_u64(vsum2, vld1q_u64(p.add(4)));
        vsum3 = vaddq_u64(vsum3, vld1q_u64(p.add(6)));
    }

    let v = vaddq_u64(vaddq_u64(vsum0, vsum1), vaddq_u64(vsum2, vsum3));
    vaddvq_u64(v).wrapping_add(naive_sum(tail))
}
