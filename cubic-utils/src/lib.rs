//! Leaf utilities for cubic terrain generation: deterministic random sources,
//! noise primitives, numeric helpers and cube coordinate math.

pub mod coords;
pub mod math;
pub mod noise;
pub mod random;

pub use coords::CubePos;
