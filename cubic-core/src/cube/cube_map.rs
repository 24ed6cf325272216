use cubic_utils::CubePos;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::{CubeProvider, VoxelGrid};

/// In-memory cube storage with one lock per cube.
///
/// Inserting requires `&mut self`; once populated the map can be shared and
/// cubes mutated through their locks.
#[derive(Debug, Default)]
pub struct CubeMap {
    cubes: FxHashMap<CubePos, RwLock<VoxelGrid>>,
}

impl CubeMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a cube, replacing any previous cube at the same position.
    pub fn insert(&mut self, grid: VoxelGrid) {
        self.cubes.insert(grid.pos(), RwLock::new(grid));
    }

    /// Removes a cube and returns it.
    pub fn remove(&mut self, pos: CubePos) -> Option<VoxelGrid> {
        self.cubes.remove(&pos).map(RwLock::into_inner)
    }

    /// Number of stored cubes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    /// Iterates over stored positions in no particular order.
    pub fn positions(&self) -> impl Iterator<Item = CubePos> + '_ {
        self.cubes.keys().copied()
    }
}

impl CubeProvider for CubeMap {
    type Cube = VoxelGrid;

    fn cube(&self, pos: CubePos) -> Option<&RwLock<VoxelGrid>> {
        self.cubes.get(&pos)
    }
}

impl FromIterator<VoxelGrid> for CubeMap {
    fn from_iter<I: IntoIterator<Item = VoxelGrid>>(iter: I) -> Self {
        let mut map = Self::new();
        for grid in iter {
            map.insert(grid);
        }
        map
    }
}
