use std::fmt;

use crate::worldgen::BiomeId;

/// The material stored in one voxel.
///
/// Biome surface materials carry the biome they came from; what they resolve
/// to (grass, sand, ...) is the biome registry's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Material {
    /// Empty space.
    #[default]
    Air,
    /// Generic rock produced by the density field.
    Stone,
    /// Still water below sea level.
    Water,
    /// The surface block of a biome.
    BiomeTop(BiomeId),
    /// The subsurface block of a biome.
    BiomeFiller(BiomeId),
    /// Sandstone bands under sandy fillers.
    Sandstone,
}

impl Material {
    /// Whether the voxel counts as solid ground.
    #[must_use]
    pub const fn is_solid(self) -> bool {
        !matches!(self, Self::Air | Self::Water)
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Air => f.write_str("air"),
            Self::Stone => f.write_str("stone"),
            Self::Water => f.write_str("water"),
            Self::BiomeTop(id) => write!(f, "top({})", id.0),
            Self::BiomeFiller(id) => write!(f, "filler({})", id.0),
            Self::Sandstone => f.write_str("sandstone"),
        }
    }
}
