//! Throughput-bound reductions over the whole buffer.
//!
//! Unlike the latency kernels there is no per-iteration [`clobber`]: the
//! point is to let the compiler and the core overlap as much work as each
//! strategy allows. Only the final sum is escaped.
//!
//! [`clobber`]: crate::barrier::clobber

use crate::barrier::escape;
use crate::error::Result;
use crate::kernels::run_or_sentinel;
use crate::record::BenchResult;
use crate::simd::{SimdLevel, SimdSum};
use crate::timing::measure;

/// Threads used by the threaded reduction kernels.
pub const REDUCTION_THREADS: usize = 8;

fn finish(name: &'static str, n: usize, sum: u64, ns: u64) -> BenchResult {
    tracing::debug!(kernel = name, sum, "reduction finished");
    BenchResult::new(name, n as u64, ns).with_checksum(sum)
}

fn run_infallible(buffer: &[u64], name: &'static str, reduce: fn(&[u64]) -> u64) -> BenchResult {
    let (sum, ns) = measure(|| escape(reduce(buffer)));
    finish(name, buffer.len(), sum, ns)
}

fn run_threaded(
    buffer: &[u64],
    name: &'static str,
    reduce: fn(&[u64], usize) -> Result<u64>,
) -> BenchResult {
    run_or_sentinel(name, || {
        let (sum, ns) = measure(|| reduce(buffer, REDUCTION_THREADS).map(escape));
        Ok(finish(name, buffer.len(), sum?, ns))
    })
}

pub fn naive(buffer: &mut [u64]) -> BenchResult {
    run_infallible(buffer, "Reduction Naive (1 accumulator)", |d| d.naive_sum())
}

pub fn ilp(buffer: &mut [u64]) -> BenchResult {
    run_infallible(buffer, "Reduction ILP (8 accumulators)", |d| d.ilp_sum())
}

pub fn simd(buffer: &mut [u64]) -> BenchResult {
    let name = SimdLevel::detect().simd_label();
    run_infallible(buffer, name, |d| d.simd_sum())
}

pub fn threaded(buffer: &mut [u64]) -> BenchResult {
    run_threaded(buffer, "Reduction Threaded (8 threads)", |d, t| d.par_sum(t))
}

pub fn ilp_simd(buffer: &mut [u64]) -> BenchResult {
    let name = SimdLevel::detect().ilp_simd_label();
    run_infallible(buffer, name, |d| d.ilp_simd_sum())
}

pub fn all(buffer: &mut [u64]) -> BenchResult {
    run_threaded(buffer, "Reduction All (8 threads + ILP + SIMD)", |d, t| {
        d.par_ilp_simd_sum(t)
    })
}
