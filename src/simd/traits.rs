use crate::error::Result;

/// Wrapping `u64` sum of a slice, in every strategy the reduction kernels
/// compare. All methods return the same value for the same input.
pub trait SimdSum {
    /// One accumulator.
    fn naive_sum(self) -> u64;

    /// Eight scalar accumulators.
    fn ilp_sum(self) -> u64;

    /// One accumulator of the widest vector type available; falls back to
    /// [`SimdSum::ilp_sum`] without vector support.
    fn simd_sum(self) -> u64;

    /// Several vector accumulators per iteration.
    fn ilp_simd_sum(self) -> u64;

    /// `threads` contiguous shares summed naively on their own threads.
    fn par_sum(self, threads: usize) -> Result<u64>;

    /// `threads` contiguous shares, each summed with [`SimdSum::ilp_simd_sum`].
    fn par_ilp_simd_sum(self, threads: usize) -> Result<u64>;
}
