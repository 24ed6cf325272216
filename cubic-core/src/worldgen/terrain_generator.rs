//! Density and first-pass material generation for whole cubes.

use cubic_utils::CubePos;
use cubic_utils::coords::cube_to_min_block;

use crate::cube::{CubeAccess, VoxelGrid};

use super::{
    BiomeBlender, BiomeId, BiomeSource, ColumnBlend, DensityExpander, DensityGridBuilder,
    DensityLattice, DensitySample, GenerationError, SurfaceClassifier, TerrainSettings,
};

/// Working buffers for one generation call.
///
/// A generator never keeps per-cube state; callers own a scratch per worker
/// and pass it into every call. Buffers are resized on demand, so a scratch
/// created for one [`TerrainSettings`] can be reused with another.
#[derive(Debug, Clone, Default)]
pub struct TerrainScratch {
    lattice: DensityLattice,
    window: Vec<BiomeId>,
    blends: Vec<ColumnBlend>,
    samples: Vec<DensitySample>,
    column_biomes: Vec<BiomeId>,
}

impl TerrainScratch {
    /// Allocates buffers sized for `settings`.
    #[must_use]
    pub fn new(settings: &TerrainSettings) -> Self {
        let sections = settings.horizontal_sections();
        let size = settings.cube_len();
        Self {
            lattice: DensityLattice::new(settings),
            window: Vec::new(),
            blends: Vec::with_capacity(sections * sections),
            samples: Vec::with_capacity(size * size * size),
            column_biomes: Vec::with_capacity(size * size),
        }
    }

    /// Makes the buffers fit `settings`.
    pub fn prepare(&mut self, settings: &TerrainSettings) {
        self.lattice.prepare(settings);
    }

    /// The coarse lattice of the last generated cube.
    #[must_use]
    pub const fn lattice(&self) -> &DensityLattice {
        &self.lattice
    }

    /// The column blends of the last generated cube, `[x][z]`.
    #[must_use]
    pub fn blends(&self) -> &[ColumnBlend] {
        &self.blends
    }

    /// The per-voxel density of the last generated cube.
    #[must_use]
    pub fn samples(&self) -> &[DensitySample] {
        &self.samples
    }
}

/// Generates the density field and provisional materials of cubes.
///
/// The generator is immutable after construction and can be shared between
/// threads; every call is a pure function of the seed, the settings, the biome
/// source and the cube position.
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    seed: i64,
    settings: TerrainSettings,
    grid: DensityGridBuilder,
    blender: BiomeBlender,
    expander: DensityExpander,
    classifier: SurfaceClassifier,
}

impl TerrainGenerator {
    /// Builds the noise fields and kernels for `seed`.
    pub fn new(seed: i64, settings: TerrainSettings) -> Result<Self, GenerationError> {
        let grid = DensityGridBuilder::new(seed, &settings)?;
        let blender = BiomeBlender::new(&settings);
        log::debug!(
            "Terrain generator ready: seed {seed}, smoothing radius {}, {}x{}x{} lattice per cube",
            blender.radius(),
            settings.horizontal_sections(),
            settings.vertical_sections(),
            settings.horizontal_sections(),
        );

        Ok(Self {
            seed,
            settings,
            grid,
            blender,
            expander: DensityExpander::new(&settings),
            classifier: SurfaceClassifier::new(settings.sea_level),
        })
    }

    /// The world seed.
    #[must_use]
    pub const fn seed(&self) -> i64 {
        self.seed
    }

    /// The world constants.
    #[must_use]
    pub const fn settings(&self) -> &TerrainSettings {
        &self.settings
    }

    /// The lattice sampler.
    #[must_use]
    pub const fn grid_builder(&self) -> &DensityGridBuilder {
        &self.grid
    }

    /// A scratch sized for this generator.
    #[must_use]
    pub fn scratch(&self) -> TerrainScratch {
        TerrainScratch::new(&self.settings)
    }

    /// Computes the per-voxel density of `pos` into `scratch`.
    pub fn generate_density<'a, B: BiomeSource>(
        &self,
        pos: CubePos,
        biomes: &B,
        scratch: &'a mut TerrainScratch,
    ) -> Result<&'a [DensitySample], GenerationError> {
        scratch.prepare(&self.settings);

        self.grid.fill(pos, &mut scratch.lattice);
        self.blender.fill_window(
            biomes,
            scratch.lattice.origin(),
            scratch.lattice.horizontal_sections(),
            &mut scratch.window,
        );
        self.blender
            .blend(biomes, &scratch.window, &scratch.lattice, &mut scratch.blends)?;
        self.expander.expand(
            &scratch.lattice,
            &scratch.blends,
            pos.y(),
            &mut scratch.samples,
        );

        Ok(&scratch.samples)
    }

    /// Generates the density field of `pos` and classifies every voxel.
    #[tracing::instrument(level = "trace", skip(self, biomes, scratch), name = "generate_cube")]
    pub fn generate_density_and_materials<B: BiomeSource>(
        &self,
        pos: CubePos,
        biomes: &B,
        scratch: &mut TerrainScratch,
    ) -> Result<VoxelGrid, GenerationError> {
        let size = self.settings.cube_size;
        let len = self.settings.cube_len();

        self.generate_density(pos, biomes, scratch)?;
        biomes.fill_biomes(
            &mut scratch.column_biomes,
            cube_to_min_block(pos.x(), size),
            cube_to_min_block(pos.z(), size),
            len,
            len,
            1,
        );

        let min_y = cube_to_min_block(pos.y(), size);
        let mut grid = VoxelGrid::new(pos, len);
        for y in 0..len {
            let block_y = min_y + y as i32;
            for z in 0..len {
                for x in 0..len {
                    let sample = &scratch.samples[(y * len + z) * len + x];
                    let biome = scratch.column_biomes[z * len + x];
                    grid.set_material(x, y, z, self.classifier.classify(sample, block_y, biome));
                }
            }
        }

        log::trace!("Generated cube {pos}");
        Ok(grid)
    }

    /// Like [`generate_density_and_materials`](Self::generate_density_and_materials)
    /// with a throwaway scratch.
    pub fn generate<B: BiomeSource>(
        &self,
        pos: CubePos,
        biomes: &B,
    ) -> Result<VoxelGrid, GenerationError> {
        self.generate_density_and_materials(pos, biomes, &mut self.scratch())
    }
}
