//! Cycle structure of the pointer chain and its interleaved sub-chains.

use proptest::prelude::*;

use memprobe::chain::{build_chain, follow, SUPPORTED_CHAIN_COUNTS};
use memprobe::kernels::mlp::chase_interleaved;

fn visit_all(buffer: &[u64], start: usize, hops: usize) -> Vec<usize> {
    let mut seen = Vec::with_capacity(hops);
    let mut index = start;
    for _ in 0..hops {
        seen.push(index);
        index = buffer[index] as usize;
    }
    seen
}

#[test]
fn test_single_chain_is_hamiltonian_cycle() {
    let n = 4096;
    let mut buffer = vec![0u64; n];
    let starts = build_chain(&mut buffer, 1).unwrap();

    let mut visited = visit_all(&buffer, starts.as_slice()[0], n);
    visited.sort_unstable();
    assert_eq!(visited, (0..n).collect::<Vec<_>>());
}

#[test]
fn test_cycle_from_any_index() {
    let n = 1000;
    let mut buffer = vec![0u64; n];
    build_chain(&mut buffer, 1).unwrap();
    for start in [0, 1, 499, 999] {
        assert_eq!(follow(&buffer, start, n), start);
    }
}

#[test]
fn test_interleaved_chains_partition_indices() {
    let n = 1 << 12;
    for &k in SUPPORTED_CHAIN_COUNTS.iter() {
        let mut buffer = vec![0u64; n];
        let starts = build_chain(&mut buffer, k).unwrap();
        assert_eq!(starts.len(), k);

        let mut all: Vec<usize> = starts
            .as_slice()
            .iter()
            .flat_map(|&s| visit_all(&buffer, s, n / k))
            .collect();
        all.sort_unstable();
        assert_eq!(all, (0..n).collect::<Vec<_>>(), "k = {k}");
    }
}

#[test]
fn test_interleaved_cursors_end_on_next_start() {
    let n = 1024;
    let mut buffer = vec![0u64; n];
    let starts = build_chain(&mut buffer, 8).unwrap();
    let cursors: [usize; 8] = starts.cursors().unwrap();

    let ends = chase_interleaved(&buffer, cursors, n / 8);
    for c in 0..8 {
        assert_eq!(ends[c], cursors[(c + 1) % 8]);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_chains_cover_everything_once(blocks in 1usize..256, k_idx in 0usize..5) {
        let k = SUPPORTED_CHAIN_COUNTS[k_idx];
        let n = blocks * k;
        let mut buffer = vec![0u64; n];
        let starts = build_chain(&mut buffer, k).unwrap();

        let mut seen = vec![false; n];
        for &s in starts.as_slice() {
            let end = visit_all(&buffer, s, n / k)
                .into_iter()
                .inspect(|&i| {
                    assert!(!seen[i], "index {i} visited twice");
                    seen[i] = true;
                })
                .count();
            prop_assert_eq!(end, n / k);
        }
        prop_assert!(seen.iter().all(|&v| v));
        let first = starts.as_slice()[0];
        prop_assert_eq!(follow(&buffer, first, n), first);
    }
}
