//! Error types for memprobe operations.
//!
//! Kernels themselves never surface these to callers: a failed setup step is
//! logged and turned into a sentinel [`BenchResult`](crate::BenchResult). The
//! errors are returned by the building blocks (permutation, chain builder,
//! fork-join executor, registry lookup) so they can be tested and composed.

use std::fmt;

/// Errors that can occur while preparing or dispatching a benchmark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemprobeError {
    /// An auxiliary array (indices, permutation) could not be allocated.
    AllocationError {
        /// Number of elements that were requested.
        requested_elements: usize,
        /// Size of one element in bytes.
        element_size: usize,
        /// Human-readable error message.
        message: String,
    },
    /// Input validation error (thread count, chain count, buffer size).
    ValidationError {
        /// Human-readable error message.
        message: String,
    },
    /// No registered benchmark carries this name.
    UnknownBenchmark {
        /// The identifier that was looked up.
        name: String,
    },
}

impl fmt::Display for MemprobeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemprobeError::AllocationError {
                requested_elements,
                element_size,
                message,
            } => write!(
                f,
                "Memory allocation failed: {} (requested {} elements of {} bytes)",
                message, requested_elements, element_size
            ),
            MemprobeError::ValidationError { message } => {
                write!(f, "Validation error: {}", message)
            }
            MemprobeError::UnknownBenchmark { name } => {
                write!(f, "Unknown benchmark type '{}'", name)
            }
        }
    }
}

impl std::error::Error for MemprobeError {}

/// Result type alias for memprobe operations.
pub type Result<T> = std::result::Result<T, MemprobeError>;

/// Creates an allocation error.
pub fn allocation_error(
    elements: usize,
    element_size: usize,
    message: impl Into<String>,
) -> MemprobeError {
    MemprobeError::AllocationError {
        requested_elements: elements,
        element_size,
        message: message.into(),
    }
}

/// Creates a validation error.
pub fn validation_error(message: impl Into<String>) -> MemprobeError {
    MemprobeError::ValidationError {
        message: message.into(),
    }
}

/// Creates an unknown-benchmark error.
pub fn unknown_benchmark(name: impl Into<String>) -> MemprobeError {
    MemprobeError::UnknownBenchmark { name: name.into() }
}

/// Allocates an empty vector with room for exactly `len` elements, reporting
/// failure instead of aborting the process.
pub(crate) fn try_with_capacity<T>(len: usize, what: &str) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len).map_err(|e| {
        allocation_error(len, std::mem::size_of::<T>(), format!("{what}: {e}"))
    })?;
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_error_display() {
        let error = allocation_error(1024, 8, "indices");
        let display = format!("{}", error);
        assert!(display.contains("Memory allocation failed"));
        assert!(display.contains("1024 elements"));
        assert!(display.contains("8 bytes"));
        assert!(display.contains("indices"));
    }

    #[test]
    fn test_validation_error_display() {
        let error = validation_error("thread count must be in 1..=32");
        let display = format!("{}", error);
        assert!(display.contains("Validation error"));
        assert!(display.contains("thread count must be in 1..=32"));
    }

    #[test]
    fn test_unknown_benchmark_display() {
        let error = unknown_benchmark("nope");
        assert_eq!(format!("{}", error), "Unknown benchmark type 'nope'");
    }

    #[test]
    fn test_error_equality() {
        let error1 = allocation_error(1024, 8, "test");
        let error2 = allocation_error(1024, 8, "test");
        let error3 = allocation_error(2048, 8, "test");

        assert_eq!(error1, error2);
        assert_ne!(error1, error3);
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = validation_error("test error");
        let _: &dyn std::error::Error = &error;
        assert!(std::error::Error::source(&error).is_none());
    }

    #[test]
    fn test_try_with_capacity_reports_overflow() {
        let err = try_with_capacity::<u64>(usize::MAX, "huge").unwrap_err();
        assert!(matches!(err, MemprobeError::AllocationError { .. }));

        let ok = try_with_capacity::<u64>(16, "small").unwrap();
        assert!(ok.capacity() >= 16);
        assert!(ok.is_empty());
    }
}
