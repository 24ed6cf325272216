//! Surface replacement pass.
//!
//! Runs after a cube and both of its vertical neighbours have been classified.
//! Every column is scanned from 8 blocks above the cube down to 8 blocks below
//! it; the run of stone under each air boundary is rewritten with the biome's
//! top and filler materials.

use std::ops::AddAssign;

use cubic_utils::CubePos;
use cubic_utils::coords::{block_to_local, cube_to_max_block, cube_to_min_block};
use cubic_utils::math::floor;
use cubic_utils::noise::PerlinSimplexNoise;
use cubic_utils::random::Random;
use cubic_utils::random::legacy_random::LegacyRandom;

use crate::cube::{CubeAccess, CubeProvider, Material};

use super::{
    Biome, BiomeId, BiomeSource, GenerationError, SURFACE_SCAN_MARGIN, TerrainSettings,
};

/// Octaves of the surface depth noise.
const DEPTH_NOISE_OCTAVES: usize = 4;
/// Block-to-noise scale of the surface depth noise. Neighbouring columns land
/// sixteen noise units apart, so depths are nearly independent per block.
const DEPTH_NOISE_SCALE: f64 = 16.0;

/// Counters reported by one surface pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceStats {
    /// Voxels whose material changed.
    pub blocks_written: usize,
    /// Columns with at least one changed voxel.
    pub columns_touched: usize,
}

impl AddAssign for SurfaceStats {
    fn add_assign(&mut self, rhs: Self) {
        self.blocks_written += rhs.blocks_written;
        self.columns_touched += rhs.columns_touched;
    }
}

/// The per-column replacement automaton.
///
/// Feed it the column top-down, one voxel per [`step`](Self::step); it
/// returns the material to write at that voxel, if any.
#[derive(Debug, Clone)]
pub struct ColumnReplacer {
    biome: BiomeId,
    sand_filler: bool,
    sea_level: i32,
    depth: i32,
    /// `-1` while looking for the next stone below air.
    remaining: i32,
    top: Material,
    filler: Material,
}

impl ColumnReplacer {
    /// Starts a column of `biome` with surface depth `depth`.
    #[must_use]
    pub fn new(id: BiomeId, biome: &Biome, depth: i32, sea_level: i32) -> Self {
        Self {
            biome: id,
            sand_filler: biome.has_sand_filler(),
            sea_level,
            depth,
            remaining: -1,
            top: Material::BiomeTop(id),
            filler: Material::BiomeFiller(id),
        }
    }

    /// Surface depth of this column.
    #[must_use]
    pub const fn depth(&self) -> i32 {
        self.depth
    }

    /// Processes the voxel at `block_y` that currently holds `current`.
    pub fn step<R: Random>(
        &mut self,
        block_y: i32,
        current: Material,
        random: &mut R,
    ) -> Option<Material> {
        match current {
            Material::Air => {
                self.remaining = -1;
                return None;
            }
            Material::Stone => {}
            _ => return None,
        }

        if self.remaining == -1 {
            if self.depth <= 0 {
                self.top = Material::Air;
                self.filler = Material::Stone;
            } else if (self.sea_level - 4..=self.sea_level + 1).contains(&block_y) {
                self.top = Material::BiomeTop(self.biome);
                self.filler = Material::BiomeFiller(self.biome);
            }
            if block_y < self.sea_level && self.top == Material::Air {
                self.top = Material::Water;
            }
            self.remaining = self.depth.max(0);

            // No grass at or just above the waterline.
            return Some(if block_y <= self.sea_level + 1 {
                self.filler
            } else {
                self.top
            });
        }

        if self.remaining <= 0 {
            return None;
        }
        self.remaining -= 1;
        let written = self.filler;

        if self.remaining == 0
            && self.sand_filler
            && self.filler == Material::BiomeFiller(self.biome)
        {
            self.remaining = random.next_i32_bounded(4);
            self.filler = Material::Sandstone;
        }
        Some(written)
    }
}

/// Which cube a write at a block height lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteTarget {
    /// The cube being processed.
    Current,
    /// The cube directly below it.
    Below,
}

/// Resolves the cube a write at `block_y` goes to, or `None` if the height is
/// above the processed cube and must not be written.
#[must_use]
pub const fn write_target(block_y: i32, cube_y: i32, cube_size: i32) -> Option<WriteTarget> {
    if block_y > cube_to_max_block(cube_y, cube_size) {
        None
    } else if block_y < cube_to_min_block(cube_y, cube_size) {
        Some(WriteTarget::Below)
    } else {
        Some(WriteTarget::Current)
    }
}

/// Rewrites the near-surface stone of classified cubes.
#[derive(Debug, Clone)]
pub struct SurfaceReplacer {
    seed: i64,
    settings: TerrainSettings,
    depth_noise: PerlinSimplexNoise,
}

impl SurfaceReplacer {
    /// Builds the depth noise for `seed`.
    pub fn new(seed: i64, settings: TerrainSettings) -> Result<Self, GenerationError> {
        settings.validate()?;
        let mut random = LegacyRandom::from_seed(seed as u64);
        Ok(Self {
            seed,
            settings,
            depth_noise: PerlinSimplexNoise::new(&mut random, DEPTH_NOISE_OCTAVES),
        })
    }

    /// Seed of the random stream used while processing cube `pos`.
    #[must_use]
    pub fn cube_seed(&self, pos: CubePos) -> u64 {
        let mix = i64::from(pos.x())
            .wrapping_mul(341_873_128_712)
            .wrapping_add(i64::from(pos.y()).wrapping_mul(42_317_861))
            .wrapping_add(i64::from(pos.z()).wrapping_mul(132_897_987_541));
        (self.seed ^ mix) as u64
    }

    /// Raw depth noise of a block column.
    #[must_use]
    pub fn depth_noise(&self, block_x: i32, block_z: i32) -> f64 {
        self.depth_noise
            .get_value(f64::from(block_x), f64::from(block_z), DEPTH_NOISE_SCALE)
    }

    /// Surface depth of a block column; draws one double from `random`.
    pub fn surface_depth<R: Random>(&self, block_x: i32, block_z: i32, random: &mut R) -> i32 {
        floor(self.depth_noise(block_x, block_z) / 3.0 + 3.0 + random.next_f64() * 0.25)
    }

    /// Runs the pass on cube `pos`.
    ///
    /// The cube and both vertical neighbours must exist. Locks are taken
    /// bottom to top: the cube below and the cube itself for writing, the cube
    /// above for reading.
    pub fn apply<P: CubeProvider, B: BiomeSource>(
        &self,
        provider: &P,
        pos: CubePos,
        biomes: &B,
    ) -> Result<SurfaceStats, GenerationError> {
        let current = provider.cube(pos).ok_or(GenerationError::MissingCube(pos))?;
        let below = provider
            .cube(pos.below())
            .ok_or(GenerationError::MissingNeighbor {
                pos,
                missing: pos.below(),
            })?;
        let above = provider
            .cube(pos.above())
            .ok_or(GenerationError::MissingNeighbor {
                pos,
                missing: pos.above(),
            })?;

        let mut below = below.write();
        let mut current = current.write();
        let above = above.read();

        let size = self.settings.cube_size;
        let len = self.settings.cube_len();
        let min_x = cube_to_min_block(pos.x(), size);
        let min_z = cube_to_min_block(pos.z(), size);
        let bottom = cube_to_min_block(pos.y(), size);
        let top = cube_to_max_block(pos.y(), size);

        let mut column_biomes = Vec::with_capacity(len * len);
        biomes.fill_biomes(&mut column_biomes, min_x, min_z, len, len, 1);

        let mut random = LegacyRandom::from_seed(self.cube_seed(pos));
        let mut stats = SurfaceStats::default();

        for x in 0..len {
            let block_x = min_x + x as i32;
            for z in 0..len {
                let block_z = min_z + z as i32;
                let id = column_biomes[z * len + x];
                let depth = self.surface_depth(block_x, block_z, &mut random);
                let mut replacer =
                    ColumnReplacer::new(id, biomes.biome(id), depth, self.settings.sea_level);

                let mut touched = false;
                for block_y in (bottom - SURFACE_SCAN_MARGIN..=top + SURFACE_SCAN_MARGIN).rev() {
                    let y = block_to_local(block_y, size) as usize;
                    let material = if block_y > top {
                        above.material(x, y, z)
                    } else if block_y < bottom {
                        below.material(x, y, z)
                    } else {
                        current.material(x, y, z)
                    };

                    let Some(replacement) = replacer.step(block_y, material, &mut random) else {
                        continue;
                    };
                    if replacement == material {
                        continue;
                    }
                    match write_target(block_y, pos.y(), size) {
                        Some(WriteTarget::Current) => current.set_material(x, y, z, replacement),
                        Some(WriteTarget::Below) => below.set_material(x, y, z, replacement),
                        None => continue,
                    }
                    stats.blocks_written += 1;
                    touched = true;
                }
                if touched {
                    stats.columns_touched += 1;
                }
            }
        }

        log::trace!(
            "Surface pass on {pos}: {} blocks in {} columns",
            stats.blocks_written,
            stats.columns_touched
        );
        Ok(stats)
    }
}
