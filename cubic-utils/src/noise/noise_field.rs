//! Configurable multi-octave scalar noise field.
//!
//! A [`NoiseField`] is built once from a [`NoiseConfig`] and afterwards is a
//! pure function of its input coordinate: the octave permutations are fixed at
//! construction, and sampling never mutates anything. Two cubes that share a
//! lattice point therefore always read the same value for it.
//!
//! Sampling pipeline, per call:
//!
//! 1. sum `octaves` layers of [`ImprovedNoise`], layer `i` at `frequency * 2^i`
//!    with amplitude `persistence^i`,
//! 2. divide by the total amplitude so the sum stays within roughly `[-1, 1]`,
//! 3. multiply by `elevation` and add `sea_level`,
//! 4. clamp to the configured range, if any.

use glam::DVec3;
use thiserror::Error;

use crate::math::lfloor;
use crate::noise::ImprovedNoise;
use crate::random::legacy_random::LegacyRandom;

/// Coordinates are wrapped into this period before sampling an octave, so
/// high-frequency octaves keep their precision far from the origin.
const ROUND_OFF: f64 = 33_554_432.0;

/// Wraps a coordinate into `[-ROUND_OFF / 2, ROUND_OFF / 2)`.
#[inline]
#[must_use]
pub fn wrap(value: f64) -> f64 {
    value - (lfloor(value / ROUND_OFF + 0.5) as f64) * ROUND_OFF
}

/// Reasons a [`NoiseConfig`] is rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NoiseConfigError {
    /// The field has no octaves.
    #[error("noise field needs at least one octave")]
    NoOctaves,
    /// A frequency component is zero, negative or not finite.
    #[error("frequency must be positive and finite, got {axis} = {value}")]
    InvalidFrequency {
        /// The offending axis (`x`, `y` or `z`).
        axis: char,
        /// The rejected value.
        value: f64,
    },
    /// Persistence is zero, negative or not finite.
    #[error("persistence must be positive and finite, got {0}")]
    InvalidPersistence(f64),
    /// Elevation or sea level bias is not finite.
    #[error("elevation scale and bias must be finite, got {elevation} and {sea_level}")]
    InvalidScale {
        /// The rejected elevation scale.
        elevation: f64,
        /// The rejected bias.
        sea_level: f64,
    },
    /// The clamp range has `min > max`.
    #[error("clamp range is inverted: [{min}, {max}]")]
    InvertedClamp {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
}

/// Construction parameters of a [`NoiseField`].
///
/// Setters consume and return the config so fields can be chained:
///
/// ```
/// use cubic_utils::noise::NoiseConfig;
///
/// let field = NoiseConfig::new(1234)
///     .octaves(8)
///     .persistence(0.5)
///     .frequency(0.01)
///     .elevation(2.0)
///     .clamp(-1.0, 1.0)
///     .build()
///     .expect("valid config");
/// assert!(field.sample(3.0, 4.0, 5.0).abs() <= 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseConfig {
    /// Seed of the random stream the octaves are drawn from.
    pub seed: i32,
    /// Number of layers.
    pub octaves: u32,
    /// Amplitude ratio between successive layers.
    pub persistence: f64,
    /// Base frequency per axis.
    pub frequency: DVec3,
    /// Output scale applied after normalisation.
    pub elevation: f64,
    /// Bias added after scaling.
    pub sea_level: f64,
    /// Optional output range.
    pub clamp: Option<(f64, f64)>,
}

impl NoiseConfig {
    /// A single-octave, unit-frequency, unscaled config.
    #[must_use]
    pub const fn new(seed: i32) -> Self {
        Self {
            seed,
            octaves: 1,
            persistence: 0.5,
            frequency: DVec3::ONE,
            elevation: 1.0,
            sea_level: 0.0,
            clamp: None,
        }
    }

    /// Sets the octave count.
    #[must_use]
    pub const fn octaves(mut self, octaves: u32) -> Self {
        self.octaves = octaves;
        self
    }

    /// Sets the persistence.
    #[must_use]
    pub const fn persistence(mut self, persistence: f64) -> Self {
        self.persistence = persistence;
        self
    }

    /// Sets the same base frequency on all three axes.
    #[must_use]
    pub const fn frequency(mut self, frequency: f64) -> Self {
        self.frequency = DVec3::splat(frequency);
        self
    }

    /// Sets a per-axis base frequency.
    #[must_use]
    pub const fn frequency_xyz(mut self, x: f64, y: f64, z: f64) -> Self {
        self.frequency = DVec3::new(x, y, z);
        self
    }

    /// Sets the elevation scale.
    #[must_use]
    pub const fn elevation(mut self, elevation: f64) -> Self {
        self.elevation = elevation;
        self
    }

    /// Sets the sea level bias.
    #[must_use]
    pub const fn sea_level(mut self, sea_level: f64) -> Self {
        self.sea_level = sea_level;
        self
    }

    /// Clamps the output to `[min, max]`.
    #[must_use]
    pub const fn clamp(mut self, min: f64, max: f64) -> Self {
        self.clamp = Some((min, max));
        self
    }

    /// Checks the config without building anything.
    pub fn validate(&self) -> Result<(), NoiseConfigError> {
        if self.octaves < 1 {
            return Err(NoiseConfigError::NoOctaves);
        }
        for (axis, value) in [
            ('x', self.frequency.x),
            ('y', self.frequency.y),
            ('z', self.frequency.z),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(NoiseConfigError::InvalidFrequency { axis, value });
            }
        }
        if !self.persistence.is_finite() || self.persistence <= 0.0 {
            return Err(NoiseConfigError::InvalidPersistence(self.persistence));
        }
        if !self.elevation.is_finite() || !self.sea_level.is_finite() {
            return Err(NoiseConfigError::InvalidScale {
                elevation: self.elevation,
                sea_level: self.sea_level,
            });
        }
        match self.clamp {
            Some((min, max)) if min > max => Err(NoiseConfigError::InvertedClamp { min, max }),
            _ => Ok(()),
        }
    }

    /// Validates the config and builds the field.
    pub fn build(self) -> Result<NoiseField, NoiseConfigError> {
        self.validate()?;

        let mut random = LegacyRandom::from_seed(i64::from(self.seed) as u64);
        let octaves: Vec<ImprovedNoise> = (0..self.octaves)
            .map(|_| ImprovedNoise::new(&mut random))
            .collect();

        let mut amplitude = 1.0;
        let mut total_amplitude = 0.0;
        for _ in 0..self.octaves {
            total_amplitude += amplitude;
            amplitude *= self.persistence;
        }

        Ok(NoiseField {
            octaves,
            normalizer: 1.0 / total_amplitude,
            config: self,
        })
    }
}

/// A built, immutable multi-octave noise field.
#[derive(Debug, Clone)]
pub struct NoiseField {
    octaves: Vec<ImprovedNoise>,
    normalizer: f64,
    config: NoiseConfig,
}

impl NoiseField {
    /// The config this field was built from.
    #[must_use]
    pub const fn config(&self) -> &NoiseConfig {
        &self.config
    }

    /// Samples the field at a 3D coordinate.
    #[must_use]
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let frequency = self.config.frequency;
        let mut value = 0.0;
        let mut amplitude = 1.0;
        let mut scale = 1.0;

        for octave in &self.octaves {
            value += octave.noise(
                wrap(x * frequency.x * scale),
                wrap(y * frequency.y * scale),
                wrap(z * frequency.z * scale),
            ) * amplitude;
            amplitude *= self.config.persistence;
            scale *= 2.0;
        }

        let value = value * self.normalizer * self.config.elevation + self.config.sea_level;
        match self.config.clamp {
            Some((min, max)) => value.clamp(min, max),
            None => value,
        }
    }

    /// Samples the field on the `y = 0` plane.
    #[must_use]
    pub fn sample_2d(&self, x: f64, z: f64) -> f64 {
        self.sample(x, 0.0, z)
    }
}
