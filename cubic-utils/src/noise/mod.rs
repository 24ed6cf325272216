//! Noise generation primitives for terrain synthesis.
//!
//! - [`ImprovedNoise`] - single octave of improved Perlin noise
//! - [`NoiseField`] - configurable multi-octave field built from [`NoiseConfig`]
//! - [`SimplexNoise`] - 2D simplex noise
//! - [`PerlinSimplexNoise`] - octave stack of simplex noise (surface depth noise)

mod improved_noise;
mod noise_field;
mod perlin_simplex_noise;
mod simplex_noise;

pub use improved_noise::ImprovedNoise;
pub use noise_field::{NoiseConfig, NoiseConfigError, NoiseField, wrap};
pub use perlin_simplex_noise::PerlinSimplexNoise;
pub use simplex_noise::SimplexNoise;

/// Gradient vectors shared between improved and simplex noise.
///
/// The first twelve are the cube edge midpoints; the last four repeat some of
/// them so a 4-bit hash can index the table directly.
pub(crate) const GRADIENT: [[i32; 3]; 16] = [
    [1, 1, 0],
    [-1, 1, 0],
    [1, -1, 0],
    [-1, -1, 0],
    [1, 0, 1],
    [-1, 0, 1],
    [1, 0, -1],
    [-1, 0, -1],
    [0, 1, 1],
    [0, -1, 1],
    [0, 1, -1],
    [0, -1, -1],
    [1, 1, 0],
    [0, -1, 1],
    [-1, 1, 0],
    [0, -1, -1],
];
