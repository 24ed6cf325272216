//! First-pass material assignment from density.

use crate::cube::Material;

use super::{BiomeId, DensitySample};

/// Solid voxels whose density falls off upwards and stays below this value
/// become filler.
pub const DIRT_DEPTH: f64 = 4.0;

/// Maps a density sample to a provisional material.
///
/// The decision only looks at the voxel itself: the sign of the density, the
/// vertical gradient (to tell whether the block above is likely empty) and the
/// block height relative to sea level.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceClassifier {
    sea_level: i32,
}

impl SurfaceClassifier {
    /// Creates a classifier for the given sea level.
    #[must_use]
    pub const fn new(sea_level: i32) -> Self {
        Self { sea_level }
    }

    /// Classifies one voxel at absolute height `block_y` in biome `biome`.
    #[must_use]
    pub fn classify(&self, sample: &DensitySample, block_y: i32, biome: BiomeId) -> Material {
        let density = sample.value;
        let y_gradient = sample.gradient.y;

        if density > 0.0 {
            if density + y_gradient <= 0.0 {
                // The block above is not solid.
                if block_y < self.sea_level - 1 {
                    Material::BiomeFiller(biome)
                } else {
                    Material::BiomeTop(biome)
                }
            } else if y_gradient < 0.0 && density < DIRT_DEPTH {
                Material::BiomeFiller(biome)
            } else {
                Material::Stone
            }
        } else if block_y < self.sea_level {
            Material::Water
        } else {
            Material::Air
        }
    }
}
