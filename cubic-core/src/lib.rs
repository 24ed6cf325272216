//! Terrain generation for a world stored in cubes.
//!
//! The crate covers the numeric pipeline only: noise lattice sampling, biome
//! blending, density expansion, classification and the surface replacement
//! pass. Cube storage, scheduling and biome layouts are supplied by the caller
//! through [`cube::CubeProvider`] and [`worldgen::BiomeSource`].

pub mod cube;
pub mod worldgen;

pub use cube::{CubeAccess, CubeMap, CubeProvider, Material, VoxelGrid};
pub use worldgen::{GenerationError, SurfaceReplacer, TerrainGenerator, TerrainSettings};
