use crate::error::Result;
use crate::parallel::parallel_for;
use crate::simd::scalar::{self, fold};
use crate::simd::traits::SimdSum;
use crate::simd::{ilp_simd_sum_at, simd_sum_at, SimdLevel};

#[inline(always)]
fn parallel_reduce<F>(data: &[u64], threads: usize, reduce: F) -> Result<u64>
where
    F: Fn(&[u64]) -> u64 + Sync,
{
    let partials = parallel_for(threads, data.len(), |task| reduce(&data[task.range.clone()]))?;
    Ok(fold(&partials))
}

impl SimdSum for &[u64] {
    #[inline(always)]
    fn naive_sum(self) -> u64 {
        scalar::naive_sum(self)
    }

    #[inline(always)]
    fn ilp_sum(self) -> u64 {
        scalar::ilp_sum(self)
    }

    #[inline(always)]
    fn simd_sum(self) -> u64 {
        simd_sum_at(SimdLevel::detect(), self)
    }

    #[inline(always)]
    fn ilp_simd_sum(self) -> u64 {
        ilp_simd_sum_at(SimdLevel::detect(), self)
    }

    fn par_sum(self, threads: usize) -> Result<u64> {
        parallel_reduce(self, threads, scalar::naive_sum)
    }

    fn par_ilp_simd_sum(self, threads: usize) -> Result<u64> {
        let level = SimdLevel::detect();
        parallel_reduce(self, threads, move |share| ilp_simd_sum_at(level, share))
    }
}

impl SimdSum for &Vec<u64> {
    fn naive_sum(self) -> u64 {
        self.as_slice().naive_sum()
    }

    fn ilp_sum(self) -> u64 {
        self.as_slice().ilp_sum()
    }

    fn simd_sum(self) -> u64 {
        self.as_slice().simd_sum()
    }

    fn ilp_simd_sum(self) -> u64 {
        self.as_slice().ilp_simd_sum()
    }

    fn par_sum(self, threads: usize) -> Result<u64> {
        self.as_slice().par_sum(threads)
    }

    fn par_ilp_simd_sum(self, threads: usize) -> Result<u64> {
        self.as_slice().par_ilp_simd_sum(threads)
    }
}
