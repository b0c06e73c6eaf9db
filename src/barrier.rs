//! Anti-optimization primitives wrapped around every timed loop.
//!
//! * [`escape`] makes a value observable so the loop producing it stays.
//! * [`clobber`] makes all memory observable and possibly modified, so loads
//!   and stores inside the loop body are neither hoisted nor merged.
//! * [`prefetch_read`] issues a non-temporal read hint for the prefetch kernels.

/// Treats `value` as read by an unknown observer and hands it back.
#[inline(always)]
pub fn escape<T>(value: T) -> T {
    std::hint::black_box(value)
}

/// Compiler-level memory clobber.
///
/// An `asm!` block without `nomem` may read and write any memory the program
/// can reach, so pending stores are committed before it and later loads are
/// re-issued after it. No instruction is emitted.
#[inline(always)]
pub fn clobber() {
    #[cfg(any(
        target_arch = "x86",
        target_arch = "x86_64",
        target_arch = "aarch64",
        target_arch = "arm",
        target_arch = "riscv64"
    ))]
    // SAFETY: the template is empty; it only constrains the optimizer.
    unsafe {
        std::arch::asm!("", options(nostack, preserves_flags));
    }

    #[cfg(not(any(
        target_arch = "x86",
        target_arch = "x86_64",
        target_arch = "aarch64",
        target_arch = "arm",
        target_arch = "riscv64"
    )))]
    {
        std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);
    }
}

/// Hints the CPU to fetch the cache line holding `ptr` with minimal cache
/// pollution. Never faults; a no-op on architectures without a hint.
#[inline(always)]
pub fn prefetch_read<T>(ptr: *const T) {
    #[cfg(target_arch = "x86_64")]
    // SAFETY: prefetch is a hint and does not dereference `ptr`.
    unsafe {
        use std::arch::x86_64::{_mm_prefetch, _MM_HINT_NTA};
        _mm_prefetch::<_MM_HINT_NTA>(ptr as *const i8);
    }

    #[cfg(target_arch = "x86")]
    // SAFETY: prefetch is a hint and does not dereference `ptr`.
    unsafe {
        use std::arch::x86::{_mm_prefetch, _MM_HINT_NTA};
        _mm_prefetch::<_MM_HINT_NTA>(ptr as *const i8);
    }

    #[cfg(target_arch = "aarch64")]
    // SAFETY: PRFM never faults, even on unmapped addresses.
    unsafe {
        std::arch::asm!(
            "prfm pldl1strm, [{0}]",
            in(reg) ptr,
            options(nostack, readonly, preserves_flags)
        );
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64")))]
    let _ = ptr;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_returns_its_input() {
        assert_eq!(escape(42u64), 42);
        let v = vec![1u64, 2, 3];
        assert_eq!(escape(&v).len(), 3);
    }

    #[test]
    fn clobber_keeps_stores_visible() {
        let mut slot = 0u64;
        for i in 0..100u64 {
            slot = i;
            clobber();
        }
        assert_eq!(escape(slot), 99);
    }

    #[test]
    fn prefetch_out_of_range_is_harmless() {
        let data = [0u64; 4];
        prefetch_read(data.as_ptr());
        prefetch_read(data.as_ptr().wrapping_add(1 << 20));
    }
}
