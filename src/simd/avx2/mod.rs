//! AVX2 reductions for 256-bit integer vectors.
//!
//! # Architecture Requirements
//!
//! - **CPU Support**: Intel Haswell (2013+) or AMD Excavator (2015+)
//! - **Target Architecture**: x86 or x86_64
//! - **Compilation**: compiled in when `build.rs` finds AVX2 on the build host;
//!   functions carry `#[target_feature(enable = "avx2")]`, and
//!   [`SimdLevel::detect`](crate::simd::SimdLevel::detect) confirms the feature
//!   at run time before any of them is called.
//!
//! # Layout
//!
//! A `__m256i` holds four `u64` lanes. `_mm256_add_epi64` wraps per lane,
//! which keeps results identical to the scalar wrapping sum.

pub mod reduce;
