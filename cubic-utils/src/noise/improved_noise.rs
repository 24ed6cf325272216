//! Improved (Perlin 2002) gradient noise, one octave.
//!
//! This is the building block of [`NoiseField`](super::NoiseField). The
//! permutation table and coordinate offsets are drawn from a [`Random`] at
//! construction, so the whole field is a pure function of its seed.

use crate::math::{floor, lerp3, smoothstep};
use crate::noise::GRADIENT;
use crate::random::Random;

/// A single octave of improved Perlin noise.
#[derive(Debug, Clone)]
pub struct ImprovedNoise {
    p: [u8; 256],
    /// X offset applied before sampling.
    pub xo: f64,
    /// Y offset applied before sampling.
    pub yo: f64,
    /// Z offset applied before sampling.
    pub zo: f64,
}

impl ImprovedNoise {
    /// Creates a new octave from a random source.
    ///
    /// Consumes three doubles for the offsets, then shuffles the identity
    /// permutation with a forward Fisher-Yates pass.
    pub fn new<R: Random>(random: &mut R) -> Self {
        let xo = random.next_f64() * 256.0;
        let yo = random.next_f64() * 256.0;
        let zo = random.next_f64() * 256.0;

        let mut p = [0u8; 256];
        for (i, val) in p.iter_mut().enumerate() {
            *val = i as u8;
        }

        for i in 0..256 {
            let offset = random.next_i32_bounded((256 - i) as i32) as usize;
            p.swap(i, i + offset);
        }

        Self { p, xo, yo, zo }
    }

    #[inline]
    fn p(&self, index: i32) -> i32 {
        i32::from(self.p[(index & 0xFF) as usize])
    }

    #[inline]
    fn grad_dot(hash: i32, x: f64, y: f64, z: f64) -> f64 {
        let g = &GRADIENT[(hash & 15) as usize];
        f64::from(g[0]) * x + f64::from(g[1]) * y + f64::from(g[2]) * z
    }

    /// Samples the noise at the given coordinates.
    ///
    /// The result stays within roughly `[-1, 1]`.
    #[must_use]
    pub fn noise(&self, x: f64, y: f64, z: f64) -> f64 {
        let x = x + self.xo;
        let y = y + self.yo;
        let z = z + self.zo;
        let xf = floor(x);
        let yf = floor(y);
        let zf = floor(z);
        let xr = x - f64::from(xf);
        let yr = y - f64::from(yf);
        let zr = z - f64::from(zf);

        self.sample_and_lerp(xf, yf, zf, xr, yr, zr)
    }

    #[expect(
        clippy::many_single_char_names,
        reason = "hash and corner names of the reference algorithm"
    )]
    fn sample_and_lerp(&self, x: i32, y: i32, z: i32, xr: f64, yr: f64, zr: f64) -> f64 {
        let i = self.p(x);
        let j = self.p(x + 1);
        let k = self.p(i + y);
        let l = self.p(i + y + 1);
        let m = self.p(j + y);
        let n = self.p(j + y + 1);

        let d = Self::grad_dot(self.p(k + z), xr, yr, zr);
        let e = Self::grad_dot(self.p(m + z), xr - 1.0, yr, zr);
        let f = Self::grad_dot(self.p(l + z), xr, yr - 1.0, zr);
        let g = Self::grad_dot(self.p(n + z), xr - 1.0, yr - 1.0, zr);
        let h = Self::grad_dot(self.p(k + z + 1), xr, yr, zr - 1.0);
        let o = Self::grad_dot(self.p(m + z + 1), xr - 1.0, yr, zr - 1.0);
        let q = Self::grad_dot(self.p(l + z + 1), xr, yr - 1.0, zr - 1.0);
        let r = Self::grad_dot(self.p(n + z + 1), xr - 1.0, yr - 1.0, zr - 1.0);

        lerp3(
            smoothstep(xr),
            smoothstep(yr),
            smoothstep(zr),
            d,
            e,
            f,
            g,
            h,
            o,
            q,
            r,
        )
    }
}
