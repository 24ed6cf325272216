//! Bit-exact port of the `java.util.Random` linear congruential generator.
//!
//! The legacy terrain generator derives every noise seed through this LCG
//! (`new Random(seed * k).nextInt()`), so matching it exactly is what makes two
//! generator instances with the same world seed agree.

use super::Random;

const MULTIPLIER: i64 = 0x5_DEEC_E66D;
const ADDEND: i64 = 0xB;
const MASK: i64 = (1 << 48) - 1;

/// `2^-53`, the scale used to build a double from 53 random bits.
const DOUBLE_UNIT: f64 = 1.0 / (1u64 << 53) as f64;

/// A 48-bit LCG identical to `java.util.Random`.
#[derive(Debug, Clone)]
pub struct LegacyRandom {
    seed: i64,
}

impl LegacyRandom {
    /// Creates a generator from a 64-bit seed, scrambling it the way Java does.
    #[must_use]
    pub const fn from_seed(seed: u64) -> Self {
        Self {
            seed: (seed as i64 ^ MULTIPLIER) & MASK,
        }
    }

    /// Re-seeds the generator in place.
    pub const fn set_seed(&mut self, seed: u64) {
        self.seed = (seed as i64 ^ MULTIPLIER) & MASK;
    }

    /// Advances the state and returns the top `bits` bits as a signed value.
    #[inline]
    const fn next_bits(&mut self, bits: u32) -> i32 {
        self.seed = self.seed.wrapping_mul(MULTIPLIER).wrapping_add(ADDEND) & MASK;
        (self.seed >> (48 - bits)) as i32
    }
}

impl Random for LegacyRandom {
    #[inline]
    fn next_i32(&mut self) -> i32 {
        self.next_bits(32)
    }

    fn next_i32_bounded(&mut self, bound: i32) -> i32 {
        debug_assert!(bound > 0, "bound must be positive, got {bound}");

        // Power of two: take the high bits directly
        if bound & bound.wrapping_neg() == bound {
            return ((i64::from(bound) * i64::from(self.next_bits(31))) >> 31) as i32;
        }

        // Reject values from the final partial range to keep the distribution uniform
        loop {
            let bits = self.next_bits(31);
            let value = bits % bound;
            if bits.wrapping_sub(value).wrapping_add(bound - 1) >= 0 {
                return value;
            }
        }
    }

    fn next_i64(&mut self) -> i64 {
        let high = i64::from(self.next_bits(32));
        let low = i64::from(self.next_bits(32));
        (high << 32).wrapping_add(low)
    }

    fn next_f64(&mut self) -> f64 {
        let high = i64::from(self.next_bits(26));
        let low = i64::from(self.next_bits(27));
        ((high << 27) + low) as f64 * DOUBLE_UNIT
    }
}
