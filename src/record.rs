//! The outcome of a single kernel run.

use std::fmt;

/// Raw timing of one kernel invocation.
///
/// Built once by the kernel and never mutated afterwards. A record whose
/// `iterations` and `total_ns` are both zero is the sentinel for "the kernel
/// could not run", see [`BenchResult::is_sentinel`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BenchResult {
    pub name: &'static str,
    pub iterations: u64,
    pub total_ns: u64,
    /// `total_ns / iterations`, or `0.0` when no iteration ran.
    pub ns_per_access: f64,
    /// Final accumulated value, for eyeballing that the work happened.
    pub checksum: Option<u64>,
    pub bandwidth_gbps: Option<f64>,
}

impl BenchResult {
    pub fn new(name: &'static str, iterations: u64, total_ns: u64) -> Self {
        let ns_per_access = if iterations == 0 {
            0.0
        } else {
            total_ns as f64 / iterations as f64
        };
        Self {
            name,
            iterations,
            total_ns,
            ns_per_access,
            checksum: None,
            bandwidth_gbps: None,
        }
    }

    /// The all-zero record returned when setup failed. The name is kept so the
    /// caller can say which kernel did not run.
    pub fn failed(name: &'static str) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    pub fn with_checksum(mut self, checksum: u64) -> Self {
        self.checksum = Some(checksum);
        self
    }

    pub fn with_bandwidth(mut self, gbps: Option<f64>) -> Self {
        self.bandwidth_gbps = gbps;
        self
    }

    pub fn is_sentinel(&self) -> bool {
        self.iterations == 0 && self.total_ns == 0
    }

    pub fn total_ms(&self) -> f64 {
        self.total_ns as f64 / 1e6
    }
}

impl fmt::Display for BenchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} ===", self.name)?;
        if self.is_sentinel() {
            return writeln!(f, "Kernel could not run (setup failed)");
        }
        writeln!(f, "Iterations:      {}", self.iterations)?;
        writeln!(f, "Total time:      {:.2} ms", self.total_ms())?;
        writeln!(f, "Time per access: {:.2} ns", self.ns_per_access)?;
        if let Some(sum) = self.checksum {
            writeln!(f, "Sum:             {}", sum)?;
        }
        if let Some(gbps) = self.bandwidth_gbps {
            writeln!(f, "Bandwidth:       {:.1} GB/s", gbps)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_access_is_plain_division() {
        let r = BenchResult::new("x", 3, 10);
        assert_eq!(r.ns_per_access, 10.0 / 3.0);
        assert!(!r.is_sentinel());
    }

    #[test]
    fn zero_iterations_do_not_produce_nan() {
        let r = BenchResult::new("x", 0, 5);
        assert_eq!(r.ns_per_access, 0.0);
    }

    #[test]
    fn failed_record_is_sentinel() {
        let r = BenchResult::failed("Random Access");
        assert!(r.is_sentinel());
        assert_eq!(r.name, "Random Access");
        assert_eq!(r.ns_per_access, 0.0);
        assert_eq!(r.checksum, None);
        assert!(format!("{r}").contains("could not run"));
    }

    #[test]
    fn display_includes_optional_fields() {
        let r = BenchResult::new("Bandwidth 2 threads", 1_000, 2_000_000)
            .with_checksum(499_500)
            .with_bandwidth(Some(12.34));
        let text = format!("{r}");
        assert!(text.starts_with("=== Bandwidth 2 threads ==="));
        assert!(text.contains("Iterations:      1000"));
        assert!(text.contains("Total time:      2.00 ms"));
        assert!(text.contains("Time per access: 2000.00 ns"));
        assert!(text.contains("Sum:             499500"));
        assert!(text.contains("Bandwidth:       12.3 GB/s"));
    }
}
