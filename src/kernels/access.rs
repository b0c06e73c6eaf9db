//! Single-stream latency kernels: index order, shuffled order, pointer chase.

use crate::barrier::{clobber, escape};
use crate::chain::build_chain;
use crate::error::validation_error;
use crate::kernels::run_or_sentinel;
use crate::permutation::{Permutation, DEFAULT_SEED};
use crate::record::BenchResult;
use crate::timing::measure;

/// Sums every element in index order. Hardware prefetchers see a perfect
/// stream, so this is the best case for the memory hierarchy.
pub fn sequential(buffer: &mut [u64]) -> BenchResult {
    let data: &[u64] = buffer;
    let n = data.len();

    let (sum, ns) = measure(|| {
        let mut sum = 0u64;
        for &x in data {
            sum = sum.wrapping_add(x);
            clobber();
        }
        sum
    });
    escape(sum);

    BenchResult::new("Sequential Access", n as u64, ns)
}

/// Sums every element once in a fixed shuffled order held in a separate
/// index array. The loads are independent, so several misses can overlap.
pub fn random(buffer: &mut [u64]) -> BenchResult {
    const NAME: &str = "Random Access";
    run_or_sentinel(NAME, || {
        let data: &[u64] = buffer;
        let order = Permutation::generate(data.len(), DEFAULT_SEED)?;
        let indices = order.as_slice();

        let (sum, ns) = measure(|| {
            let mut sum = 0u64;
            for &i in indices {
                sum = sum.wrapping_add(data[i]);
                clobber();
            }
            sum
        });
        escape(sum);

        Ok(BenchResult::new(NAME, indices.len() as u64, ns))
    })
}

/// Follows the successor cycle for `n` hops. Each load address depends on
/// the previous load, so this measures raw serial latency.
pub fn pointer_chase(buffer: &mut [u64]) -> BenchResult {
    const NAME: &str = "Pointer Chase (Serial DRAM Latency)";
    run_or_sentinel(NAME, || {
        if buffer.is_empty() {
            return Err(validation_error("pointer chase needs a non-empty buffer"));
        }
        let starts = build_chain(buffer, 1)?;
        let [start] = starts.cursors::<1>()?;
        let data: &[u64] = buffer;
        let n = data.len();

        let (index, ns) = measure(|| {
            let mut index = start;
            for _ in 0..n {
                index = data[index] as usize;
                clobber();
            }
            index
        });
        escape(index);

        Ok(BenchResult::new(NAME, n as u64, ns))
    })
}
