//! ARM NEON reductions for 128-bit integer vectors.
//!
//! # Architecture Requirements
//!
//! - **CPU Support**: any AArch64 processor (Apple Silicon, Graviton, Cortex-A)
//! - **Vector Width**: 128 bits, two `u64` lanes per `uint64x2_t`
//! - **Horizontal add**: `vaddvq_u64`, AArch64 only
//!
//! `vaddq_u64` wraps per lane, matching the scalar wrapping sum bit for bit.

pub mod reduce;
