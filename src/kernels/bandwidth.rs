//! Read bandwidth with 1, 2, 4 or 8 threads summing contiguous shares.
//!
//! Uses the same partition-and-join path as the threaded reduction; the
//! only addition is the derived GB/s figure.

use crate::barrier::escape;
use crate::kernels::run_or_sentinel;
use crate::record::BenchResult;
use crate::simd::SimdSum;
use crate::timing::{gigabytes_per_second, measure};

pub const THREAD_COUNTS: [usize; 4] = [1, 2, 4, 8];

fn run_bandwidth(buffer: &mut [u64], threads: usize, name: &'static str) -> BenchResult {
    run_or_sentinel(name, || {
        let data: &[u64] = buffer;
        let (sum, ns) = measure(|| data.par_sum(threads).map(escape));
        let sum = sum?;

        let bytes = std::mem::size_of_val(data) as u64;
        let gbps = gigabytes_per_second(bytes, ns);
        tracing::debug!(kernel = name, threads, ?gbps, "bandwidth measured");

        Ok(BenchResult::new(name, data.len() as u64, ns)
            .with_checksum(sum)
            .with_bandwidth(gbps))
    })
}

pub fn bw_1(buffer: &mut [u64]) -> BenchResult {
    run_bandwidth(buffer, 1, "Bandwidth 1 thread")
}

pub fn bw_2(buffer: &mut [u64]) -> BenchResult {
    run_bandwidth(buffer, 2, "Bandwidth 2 threads")
}

pub fn bw_4(buffer: &mut [u64]) -> BenchResult {
    run_bandwidth(buffer, 4, "Bandwidth 4 threads")
}

pub fn bw_8(buffer: &mut [u64]) -> BenchResult {
    run_bandwidth(buffer, 8, "Bandwidth 8 threads")
}
