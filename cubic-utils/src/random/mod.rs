//! Random number sources used by world generation.
//!
//! Only the legacy `java.util.Random` compatible source is provided: every seed
//! derivation in the terrain pipeline has to reproduce the same stream bit for bit.

pub mod legacy_random;

/// A source of pseudo-random values.
///
/// Implementations must be fully deterministic given their seed.
pub trait Random {
    /// Returns the next uniformly distributed `i32`.
    fn next_i32(&mut self) -> i32;

    /// Returns a uniformly distributed `i32` in `0..bound`.
    ///
    /// `bound` must be positive.
    fn next_i32_bounded(&mut self, bound: i32) -> i32;

    /// Returns the next uniformly distributed `i64`.
    fn next_i64(&mut self) -> i64;

    /// Returns a uniformly distributed `f64` in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Advances the generator by `count` steps, discarding the values.
    fn consume_count(&mut self, count: i32) {
        for _ in 0..count {
            self.next_i32();
        }
    }
}
