//! Seeded permutation generation
//!
//! Null samples are only reproducible if every implementation consumes the
//! random stream in the same order. The order used here is fixed:
//!
//! 1. the stream is ChaCha8, seeded with [`SeedableRng::seed_from_u64`];
//! 2. every draw starts from a fresh identity vector `0..len`;
//! 3. a forward Fisher-Yates pass runs `i = 0..len`, drawing
//!    `j` uniformly from `i..len` and swapping positions `i` and `j`.
//!
//! Successive draws continue the same stream, so a sequence of requests is
//! replayed exactly by a source constructed with the same seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Shuffle `values` in place with a forward Fisher-Yates pass
pub fn permute_in_place<T, R: Rng + ?Sized>(values: &mut [T], rng: &mut R) {
    let len = values.len();
    for i in 0..len {
        let j = rng.gen_range(i..len);
        values.swap(i, j);
    }
}

/// Deterministic source of uniformly random permutations
#[derive(Debug, Clone)]
pub struct PermutationSource {
    rng: ChaCha8Rng,
    seed: u64,
    draws: u64,
}

impl PermutationSource {
    /// Create a source whose stream is fully determined by `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            draws: 0,
        }
    }

    /// Seed this source was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of permutations drawn so far
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Overwrite `buffer` with the next permutation of `0..buffer.len()`
    pub fn fill_permutation(&mut self, buffer: &mut [usize]) {
        for (i, slot) in buffer.iter_mut().enumerate() {
            *slot = i;
        }
        permute_in_place(buffer, &mut self.rng);
        self.draws += 1;
    }

    /// Draw the next permutation of `0..len`
    pub fn next_permutation(&mut self, len: usize) -> Vec<usize> {
        let mut permutation = vec![0; len];
        self.fill_permutation(&mut permutation);
        permutation
    }

    /// Draw `count` consecutive permutations of `0..len`, in stream order
    pub fn draw_batch(&mut self, count: usize, len: usize) -> Vec<Vec<usize>> {
        log::trace!(
            "Drawing {count} permutations of length {len} (seed {}, {} drawn before)",
            self.seed,
            self.draws
        );
        (0..count).map(|_| self.next_permutation(len)).collect()
    }
}
