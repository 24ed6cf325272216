//! Cube storage interfaces used by the generation passes.
//!
//! Storage and lifecycle live outside this crate. The generator only needs to
//! read and write materials at local coordinates ([`CubeAccess`]) and to find
//! neighbouring cubes ([`CubeProvider`]). [`CubeMap`] is a minimal in-memory
//! provider for drivers and tests.

mod cube_map;
mod material;
mod voxel_grid;

use cubic_utils::CubePos;
use parking_lot::RwLock;

pub use cube_map::CubeMap;
pub use material::Material;
pub use voxel_grid::VoxelGrid;

/// Read/write access to the materials of one cube.
pub trait CubeAccess {
    /// Material at a local coordinate.
    fn material(&self, x: usize, y: usize, z: usize) -> Material;

    /// Overwrites the material at a local coordinate.
    fn set_material(&mut self, x: usize, y: usize, z: usize, material: Material);
}

/// Lookup of already materialised cubes.
///
/// The provider hands out per-cube locks; callers that touch more than one
/// cube acquire them bottom to top.
pub trait CubeProvider {
    /// The stored cube type.
    type Cube: CubeAccess;

    /// The lock guarding the cube at `pos`, if it exists.
    fn cube(&self, pos: CubePos) -> Option<&RwLock<Self::Cube>>;

    /// Whether a cube has been materialised at `pos`.
    fn cube_exists(&self, pos: CubePos) -> bool {
        self.cube(pos).is_some()
    }
}
