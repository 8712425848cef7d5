//! SplitMix64 deterministic generator for seed expansion.
//!
//! Implements Steele, Lea & Flood's SplitMix64 with a fixed, normative
//! parameter set, providing bit-identical output across implementations
//! in any language. Tunny uses it to expand a caller seed into the 12
//! cam patterns and initial positions of a wheel bank; a platform RNG
//! would break cross-implementation reproducibility of fixtures.

/// SplitMix64 pseudorandom generator with a 64-bit state.
///
/// When constructed via [`with_seed`](Self::with_seed) or
/// [`from_bytes`](Self::from_bytes), the output sequence is fully
/// deterministic. The algorithm is part of the wheel-generation contract:
/// changing it changes every wheel bank ever derived from a seed.
pub(crate) struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    /// Creates a new generator with the given 64-bit state.
    pub(crate) fn with_seed(seed: u64) -> Self {
        SplitMix64 { state: seed }
    }

    /// Creates a new generator from a byte-sequence seed.
    ///
    /// The bytes are folded into the initial state with the 64-bit FNV-1a
    /// hash (offset basis `0xcbf29ce484222325`, prime `0x100000001b3`).
    /// The fold is normative: the same bytes yield the same state in every
    /// conforming implementation.
    pub(crate) fn from_bytes(seed: &[u8]) -> Self {
        let mut state: u64 = 0xcbf29ce484222325;
        for &byte in seed {
            state ^= byte as u64;
            state = state.wrapping_mul(0x100000001b3);
        }
        SplitMix64 { state }
    }

    /// Generates the next 64-bit pseudorandom value.
    pub(crate) fn next_long(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    /// Generates a pseudorandom boolean from the low bit of the next value.
    pub(crate) fn next_bool(&mut self) -> bool {
        self.next_long() & 1 == 1
    }

    /// Generates a bounded pseudorandom value in range [0, n).
    ///
    /// Plain modulo reduction. The bias is irrelevant for wheel positions
    /// (n < 64 against a 64-bit draw) and keeping the reduction trivial
    /// keeps the expansion easy to reproduce in other languages.
    pub(crate) fn next_bounded(&mut self, n: u64) -> u64 {
        if n == 0 {
            return 0;
        }
        self.next_long() % n
    }
}
