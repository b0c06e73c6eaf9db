//! Micro-benchmarks for the memory hierarchy and the instruction pipeline.
//!
//! Every kernel takes one caller-owned `u64` buffer, may overwrite it, and
//! returns a [`BenchResult`] with the raw elapsed time of its access loop:
//!
//! | Family | Kernels | What it shows |
//! |--------|---------|---------------|
//! | access | sequential, random, pointer chase | streaming vs. independent vs. dependent loads |
//! | mlp | 1/2/4/8/16 interleaved chases | how many misses overlap |
//! | prefetch | random +0/8/32/128, sequential +0/64 | software prefetch distance |
//! | tlb | 8B..8KB strides | page-walk cost |
//! | branch | sorted, random, branchless | misprediction cost |
//! | store_fwd | same, overlapping, independent | store buffer forwarding |
//! | reduction | naive, ILP, SIMD, threaded, ILP+SIMD, all | throughput strategies |
//! | bandwidth | 1/2/4/8 threads | sustainable read GB/s |
//! | contention | packed vs. padded counters | false sharing |
//!
//! ```rust
//! use memprobe::kernels::reduction;
//!
//! let mut buffer: Vec<u64> = (0..1_000).collect();
//! let result = reduction::naive(&mut buffer);
//! assert_eq!(result.checksum, Some(499_500));
//! assert_eq!(result.iterations, 1_000);
//! ```

pub mod barrier;
pub mod chain;
pub mod error;
pub mod kernels;
pub mod parallel;
pub mod permutation;
pub mod record;
pub mod registry;
pub mod simd;
pub mod timing;

pub use chain::{build_chain, ChainStarts, MAX_CHAINS};
pub use error::{MemprobeError, Result};
pub use kernels::KernelFn;
pub use parallel::{parallel_for, partition, Task, MAX_THREADS};
pub use permutation::{shuffle, Permutation, DEFAULT_SEED};
pub use record::BenchResult;
pub use simd::{SimdLevel, SimdSum};

/// Buffer size used when the command line gives none.
pub const DEFAULT_SIZE_MB: usize = 128;

/// Largest accepted buffer size.
pub const MAX_SIZE_MB: usize = 4096;

const ELEMENTS_PER_MB: usize = 1024 * 1024 / std::mem::size_of::<u64>();

/// Number of `u64` elements in a buffer of `size_mb` mebibytes, or `None`
/// when that count does not fit in `usize`.
pub const fn elements_for_mb(size_mb: usize) -> Option<usize> {
    size_mb.checked_mul(ELEMENTS_PER_MB)
}
