//! Monotonic timing around a kernel body.

use std::time::Instant;

/// Runs `body` once and returns its value with the elapsed time in
/// nanoseconds, read from the monotonic clock (`Instant`, not `SystemTime`).
///
/// Only the closure is timed. Index and chain setup belongs outside of it.
/// `u64` nanoseconds cover roughly 584 years, so the conversion saturates
/// instead of truncating for anything beyond that.
#[inline(always)]
pub fn measure<T, F>(body: F) -> (T, u64)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let value = body();
    let elapsed = start.elapsed();
    (value, u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX))
}

/// Effective bandwidth in GB/s (10^9 bytes) for `bytes` moved in `ns`.
///
/// `None` when the clock did not advance.
pub fn gigabytes_per_second(bytes: u64, ns: u64) -> Option<f64> {
    if ns == 0 {
        return None;
    }
    let seconds = ns as f64 / 1e9;
    Some(bytes as f64 / seconds / 1e9)
}
