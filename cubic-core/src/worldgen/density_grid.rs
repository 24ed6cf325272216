//! Coarse noise lattice sampled once per cube.
//!
//! The lattice of cube `(cx, cy, cz)` starts at lattice coordinate
//! `(cx, cy, cz) * (sections - 1)`, so the last plane of one cube is the first
//! plane of its neighbour. Every sample is taken at the absolute lattice
//! coordinate, which makes shared planes bit-identical no matter which cube
//! asks for them.

use cubic_utils::CubePos;
use cubic_utils::noise::{NoiseConfig, NoiseField};
use cubic_utils::random::Random;
use cubic_utils::random::legacy_random::LegacyRandom;
use glam::IVec3;

use super::{GenerationError, TerrainSettings};

/// Octaves of the high and low selector fields.
const TERRAIN_OCTAVES: u32 = 16;
/// Octaves of the alpha field.
const ALPHA_OCTAVES: u32 = 8;
/// Octaves of the 2D height field.
const HEIGHT_OCTAVES: u32 = 10;

/// Samples of one cube's lattice, reused across `generate` calls.
///
/// The three 3D arrays are indexed `[x][y][z]` flattened with `z` fastest;
/// the height array is `[x][z]`.
#[derive(Debug, Clone, Default)]
pub struct DensityLattice {
    origin: IVec3,
    horizontal: usize,
    vertical: usize,
    high: Vec<f64>,
    low: Vec<f64>,
    alpha: Vec<f64>,
    height: Vec<f64>,
}

impl DensityLattice {
    /// Allocates a lattice for the given settings.
    #[must_use]
    pub fn new(settings: &TerrainSettings) -> Self {
        let mut lattice = Self::default();
        lattice.prepare(settings);
        lattice
    }

    /// Resizes the buffers if `settings` needs a different shape. Contents are
    /// unspecified until the next fill.
    pub fn prepare(&mut self, settings: &TerrainSettings) {
        let horizontal = settings.horizontal_sections();
        let vertical = settings.vertical_sections();
        if self.horizontal == horizontal && self.vertical == vertical {
            return;
        }
        self.horizontal = horizontal;
        self.vertical = vertical;

        let volume = horizontal * vertical * horizontal;
        self.high.resize(volume, 0.0);
        self.low.resize(volume, 0.0);
        self.alpha.resize(volume, 0.0);
        self.height.resize(horizontal * horizontal, 0.0);
    }

    /// Absolute lattice coordinate of sample `(0, 0, 0)`.
    #[must_use]
    pub const fn origin(&self) -> IVec3 {
        self.origin
    }

    /// Samples per horizontal axis.
    #[must_use]
    pub const fn horizontal_sections(&self) -> usize {
        self.horizontal
    }

    /// Samples along Y.
    #[must_use]
    pub const fn vertical_sections(&self) -> usize {
        self.vertical
    }

    #[inline]
    const fn index(&self, x: usize, y: usize, z: usize) -> usize {
        (x * self.vertical + y) * self.horizontal + z
    }

    /// High selector sample.
    #[inline]
    #[must_use]
    pub fn high(&self, x: usize, y: usize, z: usize) -> f64 {
        self.high[self.index(x, y, z)]
    }

    /// Low selector sample.
    #[inline]
    #[must_use]
    pub fn low(&self, x: usize, y: usize, z: usize) -> f64 {
        self.low[self.index(x, y, z)]
    }

    /// Alpha (blend factor) sample, in `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn alpha(&self, x: usize, y: usize, z: usize) -> f64 {
        self.alpha[self.index(x, y, z)]
    }

    /// 2D height noise sample.
    #[inline]
    #[must_use]
    pub fn height(&self, x: usize, z: usize) -> f64 {
        self.height[x * self.horizontal + z]
    }
}

/// Owns the four noise fields of the legacy terrain and fills
/// [`DensityLattice`]s from them.
#[derive(Debug, Clone)]
pub struct DensityGridBuilder {
    high: NoiseField,
    low: NoiseField,
    alpha: NoiseField,
    height: NoiseField,
    cells_per_cube: IVec3,
}

impl DensityGridBuilder {
    /// Derives the field seeds from `seed` and builds the fields.
    pub fn new(seed: i64, settings: &TerrainSettings) -> Result<Self, GenerationError> {
        settings.validate()?;
        let scale = settings.elevation_factor();

        let terrain_frequency = 684.412 / f64::from(1u32 << TERRAIN_OCTAVES) / scale;
        let alpha_frequency = 8.555_15 / f64::from(1u32 << ALPHA_OCTAVES) / scale;
        let height_frequency = 200.0 / f64::from(1u32 << HEIGHT_OCTAVES) / scale;

        let high = NoiseConfig::new(derived_seed(seed, 2))
            .octaves(TERRAIN_OCTAVES)
            .persistence(0.5)
            .frequency(terrain_frequency)
            .elevation(2.0)
            .clamp(-1.0, 1.0);
        let low = NoiseConfig {
            seed: derived_seed(seed, 3),
            ..high.clone()
        };
        let alpha = NoiseConfig::new(derived_seed(seed, 4))
            .octaves(ALPHA_OCTAVES)
            .persistence(0.5)
            .frequency_xyz(alpha_frequency, alpha_frequency * 2.0, alpha_frequency)
            .elevation(25.6)
            .sea_level(0.5)
            .clamp(0.0, 1.0);
        let height = NoiseConfig::new(LegacyRandom::from_seed(seed as u64).next_i32())
            .octaves(HEIGHT_OCTAVES)
            .persistence(0.5)
            .frequency(height_frequency)
            .elevation(8.0);

        Ok(Self {
            high: build_field("high", high)?,
            low: build_field("low", low)?,
            alpha: build_field("alpha", alpha)?,
            height: build_field("height", height)?,
            cells_per_cube: IVec3::new(
                settings.cube_size / settings.cell_width,
                settings.cube_size / settings.cell_height,
                settings.cube_size / settings.cell_width,
            ),
        })
    }

    /// Absolute lattice coordinate of the first sample of cube `pos`.
    #[must_use]
    pub fn lattice_origin(&self, pos: CubePos) -> IVec3 {
        pos.0 * self.cells_per_cube
    }

    /// The high selector field.
    #[must_use]
    pub const fn high_field(&self) -> &NoiseField {
        &self.high
    }

    /// The low selector field.
    #[must_use]
    pub const fn low_field(&self) -> &NoiseField {
        &self.low
    }

    /// The alpha field.
    #[must_use]
    pub const fn alpha_field(&self) -> &NoiseField {
        &self.alpha
    }

    /// The 2D height field.
    #[must_use]
    pub const fn height_field(&self) -> &NoiseField {
        &self.height
    }

    /// Samples every lattice point of cube `pos` into `lattice`.
    ///
    /// `lattice` must have been prepared for the settings this builder was
    /// created with.
    pub fn fill(&self, pos: CubePos, lattice: &mut DensityLattice) {
        let origin = self.lattice_origin(pos);
        lattice.origin = origin;

        let horizontal = lattice.horizontal;
        let vertical = lattice.vertical;
        for x in 0..horizontal {
            let lattice_x = f64::from(origin.x + x as i32);
            for z in 0..horizontal {
                let lattice_z = f64::from(origin.z + z as i32);
                lattice.height[x * horizontal + z] = self.height.sample_2d(lattice_x, lattice_z);

                for y in 0..vertical {
                    let lattice_y = f64::from(origin.y + y as i32);
                    let index = lattice.index(x, y, z);
                    lattice.high[index] = self.high.sample(lattice_x, lattice_y, lattice_z);
                    lattice.low[index] = self.low.sample(lattice_x, lattice_y, lattice_z);
                    lattice.alpha[index] = self.alpha.sample(lattice_x, lattice_y, lattice_z);
                }
            }
        }
    }
}

/// First `next_i32` of a legacy random seeded with `seed * factor`.
fn derived_seed(seed: i64, factor: i64) -> i32 {
    LegacyRandom::from_seed(seed.wrapping_mul(factor) as u64).next_i32()
}

fn build_field(field: &'static str, config: NoiseConfig) -> Result<NoiseField, GenerationError> {
    config
        .build()
        .map_err(|source| GenerationError::InvalidNoiseConfig { field, source })
}
