//! Memory-level parallelism: `K` independent chase cursors advanced in the
//! same loop body. With one cursor each miss waits for the previous one; with
//! `K` cursors up to `K` misses are in flight at once.

use crate::barrier::{clobber, escape};
use crate::chain::build_chain;
use crate::kernels::run_or_sentinel;
use crate::record::BenchResult;
use crate::timing::measure;

/// Advances every cursor by one hop per iteration, `iterations` times, and
/// returns the final cursor positions.
#[inline(always)]
pub fn chase_interleaved<const K: usize>(
    buffer: &[u64],
    mut cursors: [usize; K],
    iterations: usize,
) -> [usize; K] {
    for _ in 0..iterations {
        for cursor in cursors.iter_mut() {
            *cursor = buffer[*cursor] as usize;
        }
        clobber();
    }
    cursors
}

fn run_chase<const K: usize>(buffer: &mut [u64], name: &'static str) -> BenchResult {
    run_or_sentinel(name, || {
        let starts = build_chain(buffer, K)?;
        let cursors = starts.cursors::<K>()?;
        let data: &[u64] = buffer;
        let iterations = data.len() / K;

        let (ends, ns) = measure(|| chase_interleaved(data, cursors, iterations));
        for end in ends {
            escape(end);
        }

        Ok(BenchResult::new(name, (iterations * K) as u64, ns))
    })
}

pub fn chase_1(buffer: &mut [u64]) -> BenchResult {
    run_chase::<1>(buffer, "Chase 1 chain (MLP=1)")
}

pub fn chase_2(buffer: &mut [u64]) -> BenchResult {
    run_chase::<2>(buffer, "Chase 2 chains (MLP=2)")
}

pub fn chase_4(buffer: &mut [u64]) -> BenchResult {
    run_chase::<4>(buffer, "Chase 4 chains (MLP=4)")
}

pub fn chase_8(buffer: &mut [u64]) -> BenchResult {
    run_chase::<8>(buffer, "Chase 8 chains (MLP=8)")
}

pub fn chase_16(buffer: &mut [u64]) -> BenchResult {
    run_chase::<16>(buffer, "Chase 16 chains (MLP=16)")
}
