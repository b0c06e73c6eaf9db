//! Integer reduction kernels and the instruction-set selection behind them.
//!
//! `build.rs` compiles in every vector path the build host supports
//! (`cfg(avx2)`, `cfg(sse)`, `cfg(neon)`); [`SimdLevel::detect`] then picks
//! the widest one the running CPU also reports, once per process. The scalar
//! ILP path is always compiled and is the fallback for every level.
//!
//! All paths add in wrapping `u64` arithmetic. Wrapping addition is
//! associative and commutative, so lane order, accumulator count and thread
//! partitioning never change the result.

#[cfg(avx2)]
pub mod avx2;

#[cfg(sse)]
pub mod sse;

#[cfg(neon)]
pub mod neon;

pub mod scalar;
pub mod slice;
pub mod traits;

use std::fmt;
use std::sync::OnceLock;

pub use traits::SimdSum;

/// Widest integer vector extension available to the reduction kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimdLevel {
    Avx2,
    Sse2,
    Neon,
    Scalar,
}

impl SimdLevel {
    /// The level used by this process, probed on first call.
    pub fn detect() -> SimdLevel {
        static LEVEL: OnceLock<SimdLevel> = OnceLock::new();
        *LEVEL.get_or_init(|| {
            let level = Self::probe();
            tracing::debug!(?level, "selected SIMD level");
            level
        })
    }

    #[allow(unreachable_code)]
    fn probe() -> SimdLevel {
        #[cfg(all(avx2, any(target_arch = "x86", target_arch = "x86_64")))]
        {
            if std::arch::is_x86_feature_detected!("avx2") {
                return SimdLevel::Avx2;
            }
        }

        #[cfg(all(sse, any(target_arch = "x86", target_arch = "x86_64")))]
        {
            if std::arch::is_x86_feature_detected!("sse2") {
                return SimdLevel::Sse2;
            }
        }

        #[cfg(all(neon, target_arch = "aarch64"))]
        {
            if std::arch::is_aarch64_feature_detected!("neon") {
                return SimdLevel::Neon;
            }
        }

        SimdLevel::Scalar
    }

    /// `u64` lanes per vector register.
    pub fn lanes(self) -> usize {
        match self {
            SimdLevel::Avx2 => 4,
            SimdLevel::Sse2 | SimdLevel::Neon => 2,
            SimdLevel::Scalar => 1,
        }
    }

    pub fn simd_label(self) -> &'static str {
        match self {
            SimdLevel::Avx2 => "Reduction SIMD (AVX2 4x64)",
            SimdLevel::Sse2 => "Reduction SIMD (SSE2 2x64)",
            SimdLevel::Neon => "Reduction SIMD (NEON 2x64)",
            SimdLevel::Scalar => "Reduction SIMD (fallback)",
        }
    }

    pub fn ilp_simd_label(self) -> &'static str {
        match self {
            SimdLevel::Avx2 => "Reduction ILP+SIMD (4xAVX2)",
            SimdLevel::Sse2 => "Reduction ILP+SIMD (4xSSE2)",
            SimdLevel::Neon => "Reduction ILP+SIMD (4xNEON)",
            SimdLevel::Scalar => "Reduction ILP+SIMD (fallback)",
        }
    }
}

impl fmt::Display for SimdLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SimdLevel::Avx2 => "avx2",
            SimdLevel::Sse2 => "sse2",
            SimdLevel::Neon => "neon",
            SimdLevel::Scalar => "scalar",
        };
        f.write_str(name)
    }
}

/// Single-accumulator vector sum at `level`; ILP scalar sum when `level`
/// has no compiled vector path. `level` must come from [`SimdLevel::detect`]
/// or be `Scalar`.
#[inline]
pub(crate) fn simd_sum_at(level: SimdLevel, data: &[u64]) -> u64 {
    match level {
        // SAFETY: `detect` only reports Avx2 after the run-time probe.
        #[cfg(avx2)]
        SimdLevel::Avx2 => unsafe { avx2::reduce::sum(data) },
        // SAFETY: `detect` only reports Sse2 after the run-time probe.
        #[cfg(sse)]
        SimdLevel::Sse2 => unsafe { sse::reduce::sum(data) },
        // SAFETY: `detect` only reports Neon after the run-time probe.
        #[cfg(neon)]
        SimdLevel::Neon => unsafe { neon::reduce::sum(data) },
        _ => scalar::ilp_sum(data),
    }
}

/// Multi-accumulator vector sum at `level`, with the same fallback.
#[inline]
pub(crate) fn ilp_simd_sum_at(level: SimdLevel, data: &[u64]) -> u64 {
    match level {
        // SAFETY: see `simd_sum_at`.
        #[cfg(avx2)]
        SimdLevel::Avx2 => unsafe { avx2::reduce::ilp_sum(data) },
        // SAFETY: see `simd_sum_at`.
        #[cfg(sse)]
        SimdLevel::Sse2 => unsafe { sse::reduce::ilp_sum(data) },
        // SAFETY: see `simd_sum_at`.
        #[cfg(neon)]
        SimdLevel::Neon => unsafe { neon::reduce::ilp_sum(data) },
        _ => scalar::ilp_sum(data),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_is_stable() {
        assert_eq!(SimdLevel::detect(), SimdLevel::detect());
    }

    #[test]
    fn every_level_path_agrees_with_scalar() {
        let data: Vec<u64> = (0..1_037u64).map(|i| i.wrapping_mul(0x9E37_79B9_7F4A_7C15)).collect();
        let expected = scalar::naive_sum(&data);
        let level = SimdLevel::detect();
        assert_eq!(simd_sum_at(level, &data), expected);
        assert_eq!(ilp_simd_sum_at(level, &data), expected);
        assert_eq!(simd_sum_at(SimdLevel::Scalar, &data), expected);
        assert_eq!(ilp_simd_sum_at(SimdLevel::Scalar, &data), expected);
    }

    #[test]
    fn labels_name_the_level() {
        assert!(SimdLevel::Avx2.simd_label().contains("AVX2"));
        assert!(SimdLevel::Scalar.ilp_simd_label().contains("fallback"));
        assert_eq!(SimdLevel::Neon.lanes(), 2);
        assert_eq!(SimdLevel::Sse2.to_string(), "sse2");
    }
}
