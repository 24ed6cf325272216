//! Terrain generation pipeline.
//!
//! [`TerrainGenerator`] turns a cube position into classified voxels:
//! [`DensityGridBuilder`] samples the coarse noise lattice, [`BiomeBlender`]
//! smooths biome parameters per lattice column, [`DensityExpander`]
//! interpolates density and gradient per voxel and [`SurfaceClassifier`] picks
//! a provisional material. [`SurfaceReplacer`] runs later, once the vertical
//! neighbours of a cube exist, and lays down biome surface strata.

mod biome;
mod biome_blender;
mod biome_source;
mod density_expander;
mod density_grid;
mod error;
mod settings;
mod surface_classifier;
mod surface_replacement;
mod terrain_generator;

pub use biome::{Biome, BiomeId, BiomeRegistry, SurfaceBlock};
pub use biome_blender::{BiomeBlender, ColumnBlend, add_height};
pub use biome_source::{BiomeSource, BiomeSourceKind, CellBiomeSource, FixedBiomeSource};
pub use density_expander::{DensityExpander, DensitySample};
pub use density_grid::{DensityGridBuilder, DensityLattice};
pub use error::GenerationError;
pub use settings::{MAX_ELEVATION_FACTOR, SURFACE_SCAN_MARGIN, TerrainSettings};
pub use surface_classifier::{DIRT_DEPTH, SurfaceClassifier};
pub use surface_replacement::{
    ColumnReplacer, SurfaceReplacer, SurfaceStats, WriteTarget, write_target,
};
pub use terrain_generator::{TerrainGenerator, TerrainScratch};
