//! Octave-summed 2D simplex noise.
//!
//! Every level is sampled at the same scale with its own offsets; each
//! successive level has twice the amplitude of the previous one. With four
//! levels the output spans roughly `[-8.25, 8.25]`.

use crate::noise::SimplexNoise;
use crate::random::Random;

/// Amplitude of the first level.
const BASE_AMPLITUDE: f64 = 0.55;

/// A stack of [`SimplexNoise`] levels drawn from one random stream.
#[derive(Debug, Clone)]
pub struct PerlinSimplexNoise {
    levels: Vec<SimplexNoise>,
}

impl PerlinSimplexNoise {
    /// Creates `octaves` levels, each consuming its share of `random` in order.
    pub fn new<R: Random>(random: &mut R, octaves: usize) -> Self {
        let levels = (0..octaves).map(|_| SimplexNoise::new(random)).collect();
        Self { levels }
    }

    /// Number of levels.
    #[must_use]
    pub fn octaves(&self) -> usize {
        self.levels.len()
    }

    /// Upper bound of the absolute output, assuming each level stays in `[-1, 1]`.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        let mut amplitude = BASE_AMPLITUDE;
        let mut total = 0.0;
        for _ in &self.levels {
            total += amplitude;
            amplitude *= 2.0;
        }
        total
    }

    /// Samples every level at `(x * scale, z * scale)` plus its offsets.
    #[must_use]
    pub fn get_value(&self, x: f64, z: f64, scale: f64) -> f64 {
        let mut value = 0.0;
        let mut amplitude = BASE_AMPLITUDE;

        for level in &self.levels {
            let sx = x * scale + level.xo;
            let sz = z * scale + level.yo;
            value += level.get_value_2d(sx, sz) * amplitude;
            amplitude *= 2.0;
        }

        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::legacy_random::LegacyRandom;

    #[test]
    fn four_level_bound() {
        let noise = PerlinSimplexNoise::new(&mut LegacyRandom::from_seed(0), 4);
        assert_eq!(noise.octaves(), 4);
        assert!((noise.max_value() - 8.25).abs() < 1e-12);
    }

    #[test]
    fn output_within_bound() {
        let noise = PerlinSimplexNoise::new(&mut LegacyRandom::from_seed(17), 4);
        let bound = noise.max_value() * 1.05;
        for x in -40..40 {
            for z in -40..40 {
                let value = noise.get_value(f64::from(x), f64::from(z), 0.0625);
                assert!(value.abs() <= bound, "({x}, {z}) gave {value}");
            }
        }
    }

    #[test]
    fn same_stream_same_noise() {
        let a = PerlinSimplexNoise::new(&mut LegacyRandom::from_seed(5), 4);
        let b = PerlinSimplexNoise::new(&mut LegacyRandom::from_seed(5), 4);
        assert_eq!(
            a.get_value(123.0, -77.0, 0.0625).to_bits(),
            b.get_value(123.0, -77.0, 0.0625).to_bits()
        );
    }
}
