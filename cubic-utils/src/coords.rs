//! Cube and block coordinate conversions.
//!
//! Cubes are `size`-block cubical volumes addressed by integer cube
//! coordinates. All helpers floor towards negative infinity, so block `-1`
//! lives in cube `-1` at local coordinate `size - 1`.

use std::fmt;

use glam::IVec3;

/// Position of a cube in cube coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CubePos(pub IVec3);

impl CubePos {
    /// Creates a cube position.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self(IVec3::new(x, y, z))
    }

    /// Cube X coordinate.
    #[must_use]
    pub const fn x(self) -> i32 {
        self.0.x
    }

    /// Cube Y coordinate.
    #[must_use]
    pub const fn y(self) -> i32 {
        self.0.y
    }

    /// Cube Z coordinate.
    #[must_use]
    pub const fn z(self) -> i32 {
        self.0.z
    }

    /// The cube directly above.
    #[must_use]
    pub const fn above(self) -> Self {
        Self::new(self.0.x, self.0.y + 1, self.0.z)
    }

    /// The cube directly below.
    #[must_use]
    pub const fn below(self) -> Self {
        Self::new(self.0.x, self.0.y - 1, self.0.z)
    }
}

impl fmt::Display for CubePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.0.x, self.0.y, self.0.z)
    }
}

/// The cube containing a block coordinate.
#[inline]
#[must_use]
pub const fn block_to_cube(block: i32, size: i32) -> i32 {
    block.div_euclid(size)
}

/// The local coordinate of a block inside its cube.
#[inline]
#[must_use]
pub const fn block_to_local(block: i32, size: i32) -> i32 {
    block.rem_euclid(size)
}

/// The lowest block coordinate inside a cube.
#[inline]
#[must_use]
pub const fn cube_to_min_block(cube: i32, size: i32) -> i32 {
    cube * size
}

/// The highest block coordinate inside a cube.
#[inline]
#[must_use]
pub const fn cube_to_max_block(cube: i32, size: i32) -> i32 {
    cube * size + size - 1
}

/// Converts a local coordinate inside `cube` to a block coordinate.
#[inline]
#[must_use]
pub const fn local_to_block(cube: i32, local: i32, size: i32) -> i32 {
    cube * size + local
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_blocks_floor() {
        assert_eq!(block_to_cube(-1, 16), -1);
        assert_eq!(block_to_local(-1, 16), 15);
        assert_eq!(block_to_cube(-16, 16), -1);
        assert_eq!(block_to_cube(-17, 16), -2);
    }

    #[test]
    fn cube_bounds() {
        assert_eq!(cube_to_min_block(2, 16), 32);
        assert_eq!(cube_to_max_block(2, 16), 47);
        assert_eq!(cube_to_min_block(-1, 16), -16);
        assert_eq!(cube_to_max_block(-1, 16), -1);
    }

    #[test]
    fn local_round_trip() {
        for block in -40..40 {
            let cube = block_to_cube(block, 16);
            let local = block_to_local(block, 16);
            assert_eq!(local_to_block(cube, local, 16), block);
        }
    }

    #[test]
    fn neighbours() {
        let pos = CubePos::new(1, 2, 3);
        assert_eq!(pos.above(), CubePos::new(1, 3, 3));
        assert_eq!(pos.below(), CubePos::new(1, 1, 3));
        assert_eq!(pos.to_string(), "[1, 2, 3]");
    }
}
