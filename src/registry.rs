//! Name -> kernel table used by the command line.

use crate::error::{unknown_benchmark, Result};
use crate::kernels::{
    access, bandwidth, branch, contention, mlp, prefetch, reduction, store_fwd, tlb, KernelFn,
};

/// Identifier that runs every registered kernel in order.
pub const RUN_ALL: &str = "all";

#[derive(Debug, Clone, Copy)]
pub struct BenchEntry {
    pub cli_name: &'static str,
    pub description: &'static str,
    pub run: KernelFn,
}

macro_rules! entry {
    ($cli:literal, $desc:literal, $run:path) => {
        BenchEntry {
            cli_name: $cli,
            description: $desc,
            run: $run,
        }
    };
}

pub static BENCHMARKS: &[BenchEntry] = &[
    // Memory access patterns
    entry!("seq", "Sequential access", access::sequential),
    entry!("ran", "Random access (parallel loads)", access::random),
    entry!("chase", "Pointer chasing (serial loads)", access::pointer_chase),
    // Memory-level parallelism
    entry!("chase1", "Pointer chase, 1 chain (MLP=1)", mlp::chase_1),
    entry!("chase2", "Pointer chase, 2 chains (MLP=2)", mlp::chase_2),
    entry!("chase4", "Pointer chase, 4 chains (MLP=4)", mlp::chase_4),
    entry!("chase8", "Pointer chase, 8 chains (MLP=8)", mlp::chase_8),
    entry!("chase16", "Pointer chase, 16 chains (MLP=16)", mlp::chase_16),
    // Software prefetch
    entry!("pf_none", "Random access, no prefetch", prefetch::random_no_prefetch),
    entry!("pf8", "Random access, prefetch +8", prefetch::random_prefetch_8),
    entry!("pf32", "Random access, prefetch +32", prefetch::random_prefetch_32),
    entry!("pf128", "Random access, prefetch +128", prefetch::random_prefetch_128),
    entry!("seq_pf_none", "Sequential, no sw prefetch", prefetch::sequential_no_prefetch),
    entry!("seq_pf64", "Sequential, sw prefetch +64", prefetch::sequential_prefetch_64),
    // TLB
    entry!("tlb_seq", "Stride 8B (sequential)", tlb::stride_8b),
    entry!("tlb64", "Stride 64B (cache line)", tlb::stride_64b),
    entry!("tlb512", "Stride 512B", tlb::stride_512b),
    entry!("tlb_page", "Stride 4KB (1 per page)", tlb::stride_4k),
    entry!("tlb_2page", "Stride 8KB (skip pages)", tlb::stride_8k),
    // Branch prediction
    entry!("branch_sorted", "Branch on sorted data (predictable)", branch::sorted),
    entry!("branch_random", "Branch on random data (unpredictable)", branch::unsorted),
    entry!("branchless", "Branchless mask-and-add", branch::branchless),
    // Store-to-load forwarding
    entry!("sf_same", "Store then load, same address", store_fwd::same_address),
    entry!("sf_overlap", "Store then load, overlapping (stall)", store_fwd::overlapping),
    entry!("sf_none", "Store then independent load", store_fwd::independent),
    // Reductions
    entry!("red_naive", "Reduction naive (1 accumulator)", reduction::naive),
    entry!("red_ilp", "Reduction ILP (8 accumulators)", reduction::ilp),
    entry!("red_simd", "Reduction SIMD (AVX2/SSE2/NEON)", reduction::simd),
    entry!("red_thread", "Reduction threaded (8 threads)", reduction::threaded),
    entry!("red_ilp_simd", "Reduction ILP+SIMD combined", reduction::ilp_simd),
    entry!("red_all", "Reduction all (threads+ILP+SIMD)", reduction::all),
    // Bandwidth
    entry!("bw1", "Read bandwidth, 1 thread", bandwidth::bw_1),
    entry!("bw2", "Read bandwidth, 2 threads", bandwidth::bw_2),
    entry!("bw4", "Read bandwidth, 4 threads", bandwidth::bw_4),
    entry!("bw8", "Read bandwidth, 8 threads", bandwidth::bw_8),
    // Coherence
    entry!("false_sharing", "8 threads, packed counters", contention::false_sharing),
    entry!("no_false_sharing", "8 threads, padded counters", contention::no_false_sharing),
];

pub fn find(name: &str) -> Result<&'static BenchEntry> {
    BENCHMARKS
        .iter()
        .find(|entry| entry.cli_name == name)
        .ok_or_else(|| unknown_benchmark(name))
}

/// What a CLI identifier selects.
#[derive(Debug, Clone, Copy)]
pub enum Selection {
    One(&'static BenchEntry),
    All,
}

impl Selection {
    pub fn parse(name: &str) -> Result<Self> {
        if name == RUN_ALL {
            return Ok(Selection::All);
        }
        find(name).map(Selection::One)
    }

    pub fn entries(&self) -> &'static [BenchEntry] {
        match self {
            Selection::One(entry) => std::slice::from_ref(*entry),
            Selection::All => BENCHMARKS,
        }
    }
}
