//! Store-to-load forwarding.
//!
//! Each iteration stores `i`, then loads. A [`clobber`] between the store and
//! the load forces both to go through memory instead of a register.
//!
//! * same address: the load is served straight from the store buffer.
//! * overlapping: the store starts one byte into the loaded word, which most
//!   cores cannot forward, so the load waits for the store to retire.
//! * independent: the load reads a different cache line; no dependency.

use crate::barrier::{clobber, escape};
use crate::error::validation_error;
use crate::kernels::run_or_sentinel;
use crate::record::BenchResult;
use crate::timing::measure;

/// Element offset of the independent load (512 bytes away).
pub const DISTANT_OFFSET: usize = 64;

pub fn same_address(buffer: &mut [u64]) -> BenchResult {
    const NAME: &str = "Store-load aligned (fast forward)";
    run_or_sentinel(NAME, || {
        let n = buffer.len();
        let slot = buffer
            .first_mut()
            .ok_or_else(|| validation_error("store forwarding needs one element"))?;
        let slot: *mut u64 = slot;

        let (sum, ns) = measure(|| {
            let mut sum = 0u64;
            for i in 0..n as u64 {
                // SAFETY: `slot` points at buffer[0], exclusively borrowed here.
                unsafe {
                    slot.write(i);
                    clobber();
                    sum = sum.wrapping_add(slot.read());
                }
                clobber();
            }
            sum
        });
        escape(sum);

        Ok(BenchResult::new(NAME, n as u64, ns))
    })
}

pub fn overlapping(buffer: &mut [u64]) -> BenchResult {
    const NAME: &str = "Store-load overlap (stall)";
    run_or_sentinel(NAME, || {
        let n = buffer.len();
        if n < 2 {
            return Err(validation_error(
                "overlapping store needs two elements (bytes 1..9)",
            ));
        }
        let word = buffer.as_mut_ptr();
        let shifted = (word as *mut u8).wrapping_add(1) as *mut u64;

        let (sum, ns) = measure(|| {
            let mut sum = 0u64;
            for i in 0..n as u64 {
                // SAFETY: bytes 0..9 lie inside buffer[0..2]; the unaligned
                // store is written with `write_unaligned`.
                unsafe {
                    shifted.write_unaligned(i);
                    clobber();
                    sum = sum.wrapping_add(word.read());
                }
                clobber();
            }
            sum
        });
        escape(sum);

        Ok(BenchResult::new(NAME, n as u64, ns))
    })
}

pub fn independent(buffer: &mut [u64]) -> BenchResult {
    const NAME: &str = "Store-load independent (no dep)";
    run_or_sentinel(NAME, || {
        let n = buffer.len();
        if n < 2 {
            return Err(validation_error(
                "independent store/load needs two distinct elements",
            ));
        }
        let distant = DISTANT_OFFSET.min(n - 1);
        let base = buffer.as_mut_ptr();

        let (sum, ns) = measure(|| {
            let mut sum = 0u64;
            for i in 0..n as u64 {
                // SAFETY: 0 and `distant` are both < n.
                unsafe {
                    base.write(i);
                    clobber();
                    sum = sum.wrapping_add(base.add(distant).read());
                }
                clobber();
            }
            sum
        });
        escape(sum);

        Ok(BenchResult::new(NAME, n as u64, ns))
    })
}
