use proptest::prelude::*;

use memprobe::kernels::reduction;
use memprobe::{SimdLevel, SimdSum};

const N: u64 = 1_000_000;
const EXPECTED: u64 = 499_999_500_000;

fn indices(n: u64) -> Vec<u64> {
    (0..n).collect()
}

#[test]
fn test_every_strategy_sums_indices() {
    let data = indices(N);

    assert_eq!(data.naive_sum(), EXPECTED);
    assert_eq!(data.ilp_sum(), EXPECTED);
    assert_eq!(data.simd_sum(), EXPECTED);
    assert_eq!(data.ilp_simd_sum(), EXPECTED);
    for threads in [1, 2, 3, 8, 32] {
        assert_eq!(data.par_sum(threads).unwrap(), EXPECTED, "threads = {threads}");
        assert_eq!(data.par_ilp_simd_sum(threads).unwrap(), EXPECTED, "threads = {threads}");
    }
}

#[test]
fn test_every_reduction_kernel_reports_the_same_checksum() {
    let kernels: [fn(&mut [u64]) -> memprobe::BenchResult; 6] = [
        reduction::naive,
        reduction::ilp,
        reduction::simd,
        reduction::threaded,
        reduction::ilp_simd,
        reduction::all,
    ];

    let mut buffer = indices(N);
    for kernel in kernels {
        let result = kernel(&mut buffer);
        assert!(!result.is_sentinel(), "{} did not run", result.name);
        assert_eq!(result.iterations, N, "{}", result.name);
        assert_eq!(result.checksum, Some(EXPECTED), "{}", result.name);
    }
}

#[test]
fn test_simd_labels_name_the_detected_path() {
    let mut buffer = indices(64);
    let level = SimdLevel::detect();
    assert_eq!(reduction::simd(&mut buffer).name, level.simd_label());
    assert_eq!(reduction::ilp_simd(&mut buffer).name, level.ilp_simd_label());
}

#[test]
fn test_overflow_wraps_identically() {
    let data = vec![u64::MAX; 1_001];
    let expected = u64::MAX.wrapping_mul(1_001);

    assert_eq!(data.naive_sum(), expected);
    assert_eq!(data.ilp_sum(), expected);
    assert_eq!(data.simd_sum(), expected);
    assert_eq!(data.ilp_simd_sum(), expected);
    assert_eq!(data.par_sum(8).unwrap(), expected);
    assert_eq!(data.par_ilp_simd_sum(8).unwrap(), expected);
}

#[test]
fn test_fewer_elements_than_threads() {
    let data = indices(3);
    assert_eq!(data.par_sum(8).unwrap(), 3);
    assert_eq!(data.par_ilp_simd_sum(8).unwrap(), 3);

    let mut empty: Vec<u64> = Vec::new();
    let result = reduction::all(&mut empty);
    assert_eq!(result.checksum, Some(0));
    assert_eq!(result.iterations, 0);
    assert_eq!(result.ns_per_access, 0.0);
}

#[test]
fn test_bad_thread_count_is_an_error() {
    let data = indices(100);
    assert!(data.par_sum(0).is_err());
    assert!(data.par_ilp_simd_sum(33).is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_strategies_agree(data in prop::collection::vec(any::<u64>(), 0..2_000), threads in 1usize..=32) {
        let expected = data.iter().fold(0u64, |acc, &x| acc.wrapping_add(x));
        prop_assert_eq!(data.naive_sum(), expected);
        prop_assert_eq!(data.ilp_sum(), expected);
        prop_assert_eq!(data.simd_sum(), expected);
        prop_assert_eq!(data.ilp_simd_sum(), expected);
        prop_assert_eq!(data.par_sum(threads).unwrap(), expected);
        prop_assert_eq!(data.par_ilp_simd_sum(threads).unwrap(), expected);
    }
}
