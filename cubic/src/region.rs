//! Parallel generation of a box of cubes.

use std::time::Instant;

use anyhow::{Context, bail};
use cubic_core::worldgen::{
    BiomeSource, GenerationError, SurfaceReplacer, SurfaceStats, TerrainGenerator,
};
use cubic_core::{CubeMap, VoxelGrid};
use cubic_utils::CubePos;
use rayon::prelude::*;

/// An inclusive box of cube positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    min: CubePos,
    max: CubePos,
}

impl Region {
    /// Creates a region; every component of `min` must be `<=` that of `max`.
    pub fn new(min: CubePos, max: CubePos) -> anyhow::Result<Self> {
        if min.x() > max.x() || min.y() > max.y() || min.z() > max.z() {
            bail!("region min {min} is above max {max}");
        }
        Ok(Self { min, max })
    }

    /// The region grown by one cube up and down.
    #[must_use]
    pub const fn padded_vertically(&self) -> Self {
        Self {
            min: self.min.below(),
            max: self.max.above(),
        }
    }

    /// Number of cubes.
    #[must_use]
    pub const fn cube_count(&self) -> usize {
        let width = (self.max.x() - self.min.x() + 1) as usize;
        let height = (self.max.y() - self.min.y() + 1) as usize;
        let depth = (self.max.z() - self.min.z() + 1) as usize;
        width * height * depth
    }

    /// All `(x, z)` cube columns.
    pub fn columns(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (self.min.x()..=self.max.x())
            .flat_map(move |x| (self.min.z()..=self.max.z()).map(move |z| (x, z)))
    }

    /// All positions, column by column, bottom to top.
    pub fn positions(&self) -> impl Iterator<Item = CubePos> + '_ {
        self.columns().flat_map(move |(x, z)| {
            (self.min.y()..=self.max.y()).map(move |y| CubePos::new(x, y, z))
        })
    }
}

/// Generates and classifies every cube of `region` in parallel.
///
/// Each worker owns one scratch for all the cubes it generates.
pub fn generate<B: BiomeSource + Sync>(
    generator: &TerrainGenerator,
    biomes: &B,
    region: Region,
) -> anyhow::Result<CubeMap> {
    let _span = tracing::info_span!("generate", cubes = region.cube_count()).entered();
    let start = Instant::now();

    let positions: Vec<CubePos> = region.positions().collect();
    let grids: Vec<VoxelGrid> = positions
        .par_iter()
        .map_init(
            || generator.scratch(),
            |scratch, &pos| {
                generator
                    .generate_density_and_materials(pos, biomes, scratch)
                    .with_context(|| format!("generating cube {pos}"))
            },
        )
        .collect::<anyhow::Result<_>>()?;

    log::info!("Generated {} cubes in {:?}", grids.len(), start.elapsed());
    Ok(grids.into_iter().collect())
}

/// Runs the surface pass on every cube of `region`.
///
/// Columns run in parallel; the cubes of one column are processed bottom to
/// top on the same worker, so no two passes ever lock the same pair of cubes.
/// Cubes whose neighbours are missing are skipped.
pub fn replace_surfaces<B: BiomeSource + Sync>(
    replacer: &SurfaceReplacer,
    cubes: &CubeMap,
    biomes: &B,
    region: Region,
) -> anyhow::Result<SurfaceStats> {
    let _span = tracing::info_span!("surface", cubes = region.cube_count()).entered();
    let start = Instant::now();

    let columns: Vec<(i32, i32)> = region.columns().collect();
    let stats = columns
        .par_iter()
        .map(|&(x, z)| {
            let mut stats = SurfaceStats::default();
            for y in region.min.y()..=region.max.y() {
                let pos = CubePos::new(x, y, z);
                match replacer.apply(cubes, pos, biomes) {
                    Ok(cube_stats) => stats += cube_stats,
                    Err(err) if err.is_retryable() => {
                        log::debug!("Skipping surface pass: {err}");
                    }
                    Err(err) => return Err(err),
                }
            }
            Ok(stats)
        })
        .try_reduce(SurfaceStats::default, |mut total, stats| {
            total += stats;
            Ok::<_, GenerationError>(total)
        })
        .context("running the surface pass")?;

    log::info!(
        "Surface pass wrote {} blocks in {} columns in {:?}",
        stats.blocks_written,
        stats.columns_touched,
        start.elapsed()
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_inverted_region() {
        assert!(Region::new(CubePos::new(0, 1, 0), CubePos::new(0, 0, 0)).is_err());
    }

    #[test]
    fn positions_cover_the_box() {
        let region = Region::new(CubePos::new(-1, 0, 0), CubePos::new(0, 2, 1)).expect("valid");
        assert_eq!(region.cube_count(), 2 * 3 * 2);
        assert_eq!(region.positions().count(), region.cube_count());
        assert_eq!(region.columns().count(), 4);

        let padded = region.padded_vertically();
        assert_eq!(padded.cube_count(), 2 * 5 * 2);
        assert_eq!(padded.positions().next(), Some(CubePos::new(-1, -1, 0)));
    }
}
