use cubic_utils::CubePos;

use super::{CubeAccess, Material};

/// A dense cube of materials.
///
/// Indexing is `x` fastest, then `z`, then `y`, so a vertical column walk
/// strides by `size * size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxelGrid {
    pos: CubePos,
    size: usize,
    materials: Box<[Material]>,
}

impl VoxelGrid {
    /// Creates an all-air cube.
    #[must_use]
    pub fn new(pos: CubePos, size: usize) -> Self {
        Self {
            pos,
            size,
            materials: vec![Material::Air; size * size * size].into_boxed_slice(),
        }
    }

    /// Position of the cube.
    #[must_use]
    pub const fn pos(&self) -> CubePos {
        self.pos
    }

    /// Edge length in voxels.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// All voxels in storage order.
    #[must_use]
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    #[inline]
    const fn index(&self, x: usize, y: usize, z: usize) -> usize {
        (y * self.size + z) * self.size + x
    }

    /// Number of voxels holding `material`.
    #[must_use]
    pub fn count(&self, material: Material) -> usize {
        self.materials.iter().filter(|&&m| m == material).count()
    }
}

impl CubeAccess for VoxelGrid {
    #[inline]
    fn material(&self, x: usize, y: usize, z: usize) -> Material {
        self.materials[self.index(x, y, z)]
    }

    #[inline]
    fn set_material(&mut self, x: usize, y: usize, z: usize, material: Material) {
        let index = self.index(x, y, z);
        self.materials[index] = material;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let grid = VoxelGrid::new(CubePos::new(0, 0, 0), 4);
        assert_eq!(grid.materials().len(), 64);
        assert_eq!(grid.count(Material::Air), 64);
    }

    #[test]
    fn set_and_get() {
        let mut grid = VoxelGrid::new(CubePos::new(1, -2, 3), 16);
        grid.set_material(3, 15, 7, Material::Stone);
        assert_eq!(grid.material(3, 15, 7), Material::Stone);
        assert_eq!(grid.material(7, 15, 3), Material::Air);
        assert_eq!(grid.count(Material::Stone), 1);
    }
}
