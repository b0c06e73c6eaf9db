//! The timed access patterns.
//!
//! Every kernel has the shape [`KernelFn`]: it receives the caller's buffer,
//! may overwrite it freely, builds whatever index structure it needs outside
//! the timed region and returns one [`BenchResult`]. Setup failures never
//! escape as errors; they are logged and reported as the sentinel record.

pub mod access;
pub mod bandwidth;
pub mod branch;
pub mod contention;
pub mod mlp;
pub mod prefetch;
pub mod reduction;
pub mod store_fwd;
pub mod tlb;

use crate::error::Result;
use crate::record::BenchResult;

/// Common kernel signature. `buffer.len()` is the element count `n`.
pub type KernelFn = fn(&mut [u64]) -> BenchResult;

/// Runs a fallible kernel body, turning any error into the sentinel record.
pub(crate) fn run_or_sentinel<F>(name: &'static str, body: F) -> BenchResult
where
    F: FnOnce() -> Result<BenchResult>,
{
    match body() {
        Ok(result) => result,
        Err(err) => {
            tracing::error!(kernel = name, error = %err, "kernel could not run");
            BenchResult::failed(name)
        }
    }
}
