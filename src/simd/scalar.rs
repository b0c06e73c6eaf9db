//! Portable reductions. Also the fallback for every vector path.

/// One accumulator, one add per element.
#[inline]
pub fn naive_sum(data: &[u64]) -> u64 {
    let mut sum = 0u64;
    for &x in data {
        sum = sum.wrapping_add(x);
    }
    sum
}

/// Eight independent accumulators per iteration so consecutive adds do not
/// wait on each other; the tail goes into the first accumulator.
#[inline]
pub fn ilp_sum(data: &[u64]) -> u64 {
    let mut acc = [0u64; 8];

    let chunks = data.chunks_exact(8);
    let tail = chunks.remainder();
    for chunk in chunks {
        acc[0] = acc[0].wrapping_add(chunk[0]);
        acc[1] = acc[1].wrapping_add(chunk[1]);
        acc[2] = acc[2].wrapping_add(chunk[2]);
        acc[3] = acc[3].wrapping_add(chunk[3]);
        acc[4] = acc[4].wrapping_add(chunk[4]);
        acc[5] = acc[5].wrapping_add(chunk[5]);
        acc[6] = acc[6].wrapping_add(chunk[6]);
        acc[7] = acc[7].wrapping_add(chunk[7]);
    }
    for &x in tail {
        acc[0] = acc[0].wrapping_add(x);
    }

    fold(&acc)
}

/// Wrapping sum of a small lane or accumulator array.
#[inline(always)]
pub fn fold(lanes: &[u64]) -> u64 {
    lanes.iter().fold(0u64, |a, &x| a.wrapping_add(x))
}
