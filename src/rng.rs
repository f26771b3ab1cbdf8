//! Random sources for target selection.
//!
//! The engine never reaches for a global generator. It draws indices through
//! [`RandomSource`], so a seed (or a scripted source in tests) fully
//! determines which cities come up.

// Index reduction intentionally truncates u64 -> usize
#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]

/// Uniform index generator.
pub trait RandomSource {
    /// Draw an index uniformly from `[0, upper)`.
    ///
    /// Implementations return `0` when `upper` is `0`.
    fn next_index(&mut self, upper: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_index(&mut self, upper: usize) -> usize {
        (**self).next_index(upper)
    }
}

/// Deterministic PRNG using xorshift64.
#[derive(Debug, Clone, Copy)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        // Ensure non-zero state
        let state = if seed == 0 { 0x5555_5555_5555_5555 } else { seed };
        Self { state }
    }

    /// Generate next random u64.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate random f64 in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Generate random f64 in [low, high).
    pub fn next_range(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }
}

impl RandomSource for SeededRng {
    fn next_index(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        (self.next_u64() % upper as u64) as usize
    }
}

/// A seed derived from the current time, for runs without an explicit seed.
#[must_use]
pub fn entropy_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}
