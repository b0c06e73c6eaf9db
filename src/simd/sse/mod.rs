//! SSE2 reductions for 128-bit integer vectors (two `u64` lanes).
//!
//! SSE2 is part of the x86_64 baseline, so on 64-bit hosts this path is
//! always present; it still goes through the same run-time probe as AVX2.

pub mod reduce;
