//! Reproducible random orderings of `0..n`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{try_with_capacity, Result};

/// Seed shared by every "random but repeatable" access pattern.
pub const DEFAULT_SEED: u64 = 42;

/// Fisher–Yates shuffle of `items` driven by a generator freshly seeded with
/// `seed`, so equal inputs always produce equal outputs.
///
/// Walks `i` from `len - 1` down to `1` and swaps with a uniform `j` in
/// `0..=i`. Slices of length 0 or 1 are left untouched.
pub fn shuffle<T>(items: &mut [T], seed: u64) {
    if items.len() <= 1 {
        return;
    }
    let mut rng = StdRng::seed_from_u64(seed);
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// A bijection on `0..n` in shuffled order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    indices: Vec<usize>,
}

impl Permutation {
    /// Builds the shuffled order of `0..n` for `seed`.
    ///
    /// Fails only if the index array cannot be allocated.
    pub fn generate(n: usize, seed: u64) -> Result<Self> {
        let mut indices = try_with_capacity(n, "permutation indices")?;
        indices.extend(0..n);
        shuffle(&mut indices, seed);
        tracing::debug!(n, seed, "generated permutation");
        Ok(Self { indices })
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    /// Whether every index in `0..len` occurs exactly once.
    pub fn is_bijection(&self) -> bool {
        let mut seen = vec![false; self.indices.len()];
        for &i in &self.indices {
            match seen.get_mut(i) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }
}

impl std::ops::Index<usize> for Permutation {
    type Output = usize;

    fn index(&self, i: usize) -> &usize {
        &self.indices[i]
    }
}
