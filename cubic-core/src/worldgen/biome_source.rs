//! Biome source abstraction.
//!
//! The terrain passes only need "which biome is at this column" and "what are
//! its parameters". [`BiomeSource`] is that seam; [`BiomeSourceKind`] bundles
//! the sources shipped with this crate behind enum dispatch so the hot
//! per-column lookups avoid a vtable.

use cubic_utils::random::Random;
use cubic_utils::random::legacy_random::LegacyRandom;

use super::{Biome, BiomeId, BiomeRegistry, GenerationError};

/// Supplies biomes for block columns.
pub trait BiomeSource {
    /// The biome of the column at block coordinates `(block_x, block_z)`.
    fn biome_at(&self, block_x: i32, block_z: i32) -> BiomeId;

    /// Parameters of a biome returned by [`biome_at`](Self::biome_at).
    fn biome(&self, id: BiomeId) -> &Biome;

    /// Fills `out` with the biomes of a `width × depth` rectangle whose samples
    /// are `spacing` blocks apart, starting at `(min_x, min_z)`.
    ///
    /// The result is stored X-fastest: sample `(dx, dz)` lands at
    /// `dz * width + dx`.
    fn fill_biomes(
        &self,
        out: &mut Vec<BiomeId>,
        min_x: i32,
        min_z: i32,
        width: usize,
        depth: usize,
        spacing: i32,
    ) {
        out.clear();
        out.reserve(width * depth);
        for dz in 0..depth {
            let block_z = min_z + dz as i32 * spacing;
            for dx in 0..width {
                out.push(self.biome_at(min_x + dx as i32 * spacing, block_z));
            }
        }
    }
}

/// The same biome everywhere.
#[derive(Debug, Clone)]
pub struct FixedBiomeSource {
    registry: BiomeRegistry,
    biome: BiomeId,
}

impl FixedBiomeSource {
    /// Uses `biome` from `registry` for every column.
    pub fn new(registry: BiomeRegistry, biome: BiomeId) -> Result<Self, GenerationError> {
        if !registry.contains(biome) {
            return Err(GenerationError::InvalidSettings(format!(
                "fixed biome {} is not registered",
                biome.0
            )));
        }
        Ok(Self { registry, biome })
    }

    /// A source with a single-entry registry holding `biome`.
    #[must_use]
    pub fn single(biome: Biome) -> Self {
        let mut registry = BiomeRegistry::new();
        let id = registry.register(biome);
        Self {
            registry,
            biome: id,
        }
    }

    /// The biome used everywhere.
    #[must_use]
    pub const fn id(&self) -> BiomeId {
        self.biome
    }
}

impl BiomeSource for FixedBiomeSource {
    #[inline]
    fn biome_at(&self, _block_x: i32, _block_z: i32) -> BiomeId {
        self.biome
    }

    fn biome(&self, id: BiomeId) -> &Biome {
        self.registry.resolve(id)
    }
}

/// Square cells of `cell_size` blocks, each assigned a registered biome by a
/// seeded hash of the cell coordinate.
#[derive(Debug, Clone)]
pub struct CellBiomeSource {
    registry: BiomeRegistry,
    seed: u64,
    cell_size: i32,
}

impl CellBiomeSource {
    /// Creates a cell source over every biome in `registry`.
    pub fn new(
        seed: u64,
        registry: BiomeRegistry,
        cell_size: i32,
    ) -> Result<Self, GenerationError> {
        if registry.is_empty() {
            return Err(GenerationError::InvalidSettings(
                "cell biome source needs at least one biome".to_owned(),
            ));
        }
        if cell_size <= 0 {
            return Err(GenerationError::InvalidSettings(format!(
                "biome cell size must be positive, got {cell_size}"
            )));
        }
        Ok(Self {
            registry,
            seed,
            cell_size,
        })
    }

    /// The biome of the cell at cell coordinates `(cell_x, cell_z)`.
    #[must_use]
    pub fn biome_of_cell(&self, cell_x: i32, cell_z: i32) -> BiomeId {
        let mix = i64::from(cell_x)
            .wrapping_mul(341_873_128_712)
            .wrapping_add(i64::from(cell_z).wrapping_mul(132_897_987_541));
        let mut random = LegacyRandom::from_seed(self.seed ^ mix as u64);
        let index = random.next_i32_bounded(self.registry.len() as i32);
        BiomeId(index as u16)
    }
}

impl BiomeSource for CellBiomeSource {
    fn biome_at(&self, block_x: i32, block_z: i32) -> BiomeId {
        self.biome_of_cell(
            block_x.div_euclid(self.cell_size),
            block_z.div_euclid(self.cell_size),
        )
    }

    fn biome(&self, id: BiomeId) -> &Biome {
        self.registry.resolve(id)
    }
}

/// Biome sources shipped with the crate.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum BiomeSourceKind {
    /// One biome everywhere.
    Fixed(FixedBiomeSource),
    /// Hashed square cells.
    Cells(CellBiomeSource),
}

impl BiomeSource for BiomeSourceKind {
    #[inline]
    fn biome_at(&self, block_x: i32, block_z: i32) -> BiomeId {
        match self {
            Self::Fixed(source) => source.biome_at(block_x, block_z),
            Self::Cells(source) => source.biome_at(block_x, block_z),
        }
    }

    fn biome(&self, id: BiomeId) -> &Biome {
        match self {
            Self::Fixed(source) => source.biome(id),
            Self::Cells(source) => source.biome(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_source_everywhere() {
        let source = FixedBiomeSource::single(Biome::new("ocean", -1.0, 0.1));
        let mut out = Vec::new();
        source.fill_biomes(&mut out, -8, 40, 3, 2, 4);
        assert_eq!(out.len(), 6);
        assert!(out.iter().all(|&id| id == source.id()));
        assert_eq!(source.biome(source.id()).name, "ocean");
    }

    #[test]
    fn fixed_source_rejects_unknown_biome() {
        let result = FixedBiomeSource::new(BiomeRegistry::legacy(), BiomeId(999));
        assert!(result.is_err());
    }

    #[test]
    fn cells_are_uniform_inside() {
        let source = CellBiomeSource::new(7, BiomeRegistry::legacy(), 32).expect("valid");
        let corner = source.biome_at(64, -32);
        for x in 64..96 {
            for z in -32..0 {
                assert_eq!(source.biome_at(x, z), corner);
            }
        }
    }

    #[test]
    fn cells_vary_across_the_world() {
        let source = CellBiomeSource::new(7, BiomeRegistry::legacy(), 16).expect("valid");
        let first = source.biome_of_cell(0, 0);
        let differs = (0..64).any(|i| source.biome_of_cell(i, -i) != first);
        assert!(differs);
    }

    #[test]
    fn fill_biomes_is_x_fastest() {
        let source = CellBiomeSource::new(3, BiomeRegistry::legacy(), 1).expect("valid");
        let mut out = Vec::new();
        source.fill_biomes(&mut out, 10, 20, 4, 3, 2);
        assert_eq!(out[2 * 4 + 1], source.biome_at(12, 24));
    }

    #[test]
    fn rejects_bad_cells() {
        assert!(CellBiomeSource::new(0, BiomeRegistry::new(), 16).is_err());
        assert!(CellBiomeSource::new(0, BiomeRegistry::legacy(), 0).is_err());
    }
}
