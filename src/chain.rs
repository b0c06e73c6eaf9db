//! Successor chains laid out inside the shared buffer.
//!
//! After [`build_chain`], `buffer[i]` holds the index visited after `i`. The
//! links form one cycle through all `n` slots in shuffled order, so every hop
//! is a dependent load the prefetchers cannot predict.

use crate::error::{validation_error, Result};
use crate::permutation::{Permutation, DEFAULT_SEED};

/// Upper bound on interleaved chains. Start cursors live in a fixed array.
pub const MAX_CHAINS: usize = 16;

/// Chain counts the multi-chain kernels are written for.
pub const SUPPORTED_CHAIN_COUNTS: [usize; 5] = [1, 2, 4, 8, 16];

/// Entry points into the cycle, one per interleaved chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainStarts {
    starts: [usize; MAX_CHAINS],
    len: usize,
}

impl ChainStarts {
    pub fn as_slice(&self) -> &[usize] {
        &self.starts[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The first `K` starts as a stack array. `K` must not exceed `len()`.
    pub fn cursors<const K: usize>(&self) -> Result<[usize; K]> {
        if K > self.len {
            return Err(validation_error(format!(
                "requested {K} cursors but only {} chains were built",
                self.len
            )));
        }
        let mut out = [0usize; K];
        out.copy_from_slice(&self.starts[..K]);
        Ok(out)
    }
}

/// Rewrites `buffer` as a single successor cycle and returns `chain_count`
/// starting points spaced `n / chain_count` apart along the cycle.
///
/// Walking `n / chain_count` hops from each start touches disjoint segments;
/// when `chain_count` divides `n` the segments cover every slot.
pub fn build_chain(buffer: &mut [u64], chain_count: usize) -> Result<ChainStarts> {
    if !SUPPORTED_CHAIN_COUNTS.contains(&chain_count) {
        return Err(validation_error(format!(
            "chain count {chain_count} is not one of {SUPPORTED_CHAIN_COUNTS:?}"
        )));
    }
    let n = buffer.len();
    if n < chain_count {
        return Err(validation_error(format!(
            "buffer of {n} elements is too small for {chain_count} chains"
        )));
    }

    let order = Permutation::generate(n, DEFAULT_SEED)?;
    link(buffer, order.as_slice());

    let segment = n / chain_count;
    let mut starts = [0usize; MAX_CHAINS];
    for (c, start) in starts.iter_mut().take(chain_count).enumerate() {
        *start = order[c * segment];
    }
    tracing::debug!(n, chain_count, segment, "built pointer chain");

    Ok(ChainStarts {
        starts,
        len: chain_count,
    })
}

/// `buffer[order[i]] = order[i + 1]`, closing the cycle at the end.
fn link(buffer: &mut [u64], order: &[usize]) {
    for pair in order.windows(2) {
        buffer[pair[0]] = pair[1] as u64;
    }
    if let (Some(&first), Some(&last)) = (order.first(), order.last()) {
        buffer[last] = first as u64;
    }
}

/// Follows `hops` successor links from `start` and returns where it lands.
pub fn follow(buffer: &[u64], start: usize, hops: usize) -> usize {
    let mut index = start;
    for _ in 0..hops {
        index = buffer[index] as usize;
    }
    index
}
