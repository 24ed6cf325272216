//! Two-dimensional simplex noise.
//!
//! Used (through [`PerlinSimplexNoise`](super::PerlinSimplexNoise)) for the
//! surface depth noise that decides how thick the top/filler layer is in each
//! block column.

use crate::math::floor;
use crate::noise::GRADIENT;
use crate::random::Random;

const SQRT_3: f64 = 1.732_050_807_568_877_2;
/// Skewing factor for 2D simplex: `0.5 * (sqrt(3) - 1)`
const F2: f64 = 0.5 * (SQRT_3 - 1.0);
/// Unskewing factor for 2D simplex: `(3 - sqrt(3)) / 6`
const G2: f64 = (3.0 - SQRT_3) / 6.0;

/// Simplex noise generator with a 512-entry mirrored permutation table.
#[derive(Debug, Clone)]
pub struct SimplexNoise {
    p: [i32; 512],
    /// X offset for the noise coordinates.
    pub xo: f64,
    /// Y offset for the noise coordinates (the second 2D axis).
    pub yo: f64,
}

impl SimplexNoise {
    /// Create a new simplex noise generator from a random source.
    ///
    /// Consumes 3 doubles for offsets, then shuffles a 256-entry permutation table.
    pub fn new<R: Random>(random: &mut R) -> Self {
        let xo = random.next_f64() * 256.0;
        let yo = random.next_f64() * 256.0;
        // The third offset is only drawn to keep the stream aligned.
        random.next_f64();

        let mut p = [0i32; 512];

        for (i, val) in p.iter_mut().enumerate().take(256) {
            *val = i as i32;
        }

        for i in 0..256 {
            let offset = random.next_i32_bounded((256 - i) as i32) as usize;
            p.swap(i, offset + i);
        }

        for i in 0..256 {
            p[i + 256] = p[i];
        }

        Self { p, xo, yo }
    }

    #[inline]
    const fn p(&self, x: i32) -> i32 {
        self.p[(x & 0xFF) as usize]
    }

    #[inline]
    fn corner(index: usize, x: f64, y: f64) -> f64 {
        let t = 0.5 - x * x - y * y;
        if t < 0.0 {
            0.0
        } else {
            let t = t * t;
            let g = &GRADIENT[index];
            t * t * (f64::from(g[0]) * x + f64::from(g[1]) * y)
        }
    }

    /// Sample 2D simplex noise at the given coordinates.
    ///
    /// Offsets are not applied here; callers add [`xo`](Self::xo)/[`yo`](Self::yo)
    /// themselves. Returns a value in roughly `[-1, 1]`.
    #[must_use]
    pub fn get_value_2d(&self, xin: f64, yin: f64) -> f64 {
        let s = (xin + yin) * F2;
        let i = floor(xin + s);
        let j = floor(yin + s);
        let t = f64::from(i + j) * G2;
        let x0 = xin - (f64::from(i) - t);
        let y0 = yin - (f64::from(j) - t);

        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - f64::from(i1) + G2;
        let y1 = y0 - f64::from(j1) + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = i & 0xFF;
        let jj = j & 0xFF;
        let gi0 = (self.p(ii + self.p(jj)) % 12) as usize;
        let gi1 = (self.p(ii + i1 + self.p(jj + j1)) % 12) as usize;
        let gi2 = (self.p(ii + 1 + self.p(jj + 1)) % 12) as usize;

        70.0 * (Self::corner(gi0, x0, y0) + Self::corner(gi1, x1, y1) + Self::corner(gi2, x2, y2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::legacy_random::LegacyRandom;

    #[test]
    fn deterministic_for_seed() {
        let noise1 = SimplexNoise::new(&mut LegacyRandom::from_seed(42));
        let noise2 = SimplexNoise::new(&mut LegacyRandom::from_seed(42));

        for i in 0..10 {
            let x = f64::from(i) * 13.7;
            let z = f64::from(i) * 7.3;
            assert_eq!(
                noise1.get_value_2d(x, z).to_bits(),
                noise2.get_value_2d(x, z).to_bits()
            );
        }
    }

    #[test]
    fn spatial_variation() {
        let noise = SimplexNoise::new(&mut LegacyRandom::from_seed(0));

        let values: Vec<f64> = (0..20)
            .map(|i| noise.get_value_2d(f64::from(i) * 0.37, f64::from(i) * 0.21))
            .collect();

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert!(max - min > 0.01, "2D simplex should have spatial variation");
    }

    #[test]
    fn stays_in_unit_range() {
        let noise = SimplexNoise::new(&mut LegacyRandom::from_seed(8));
        for i in 0..1000 {
            let v = noise.get_value_2d(f64::from(i) * 0.131, f64::from(i) * -0.077);
            assert!(v.abs() <= 1.05, "sample {i} out of range: {v}");
        }
    }
}
