//! Deterministic seed-expansion subsystem.
//!
//! Provides the pinned SplitMix64 generator that expands a caller seed
//! into cam patterns and wheel positions.

pub(crate) mod splitmix;
