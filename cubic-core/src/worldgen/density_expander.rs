//! Expands a coarse lattice to one density sample per voxel.
//!
//! Inside a lattice cell the low, high and alpha fields are each trilinearly
//! interpolated, mixed with the interpolated alpha, then biased by the
//! bilinearly interpolated column blend. The gradient is the difference of that
//! density across the cell faces, divided by the cell size, so it is expressed
//! per block.

use std::array;

use cubic_utils::math::{lerp, lerp2, lerp3};
use glam::DVec3;

use super::{ColumnBlend, DensityLattice, TerrainSettings};

/// Density and its per-block gradient at one voxel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DensitySample {
    /// Positive values are solid.
    pub value: f64,
    /// Change of `value` per block along each axis.
    pub gradient: DVec3,
}

/// The eight corners of one lattice cell and the four column blends above it.
///
/// Corner arrays are ordered `x` fastest, then `y`, then `z`; blends are
/// `x` fastest, then `z`.
struct Cell {
    low: [f64; 8],
    high: [f64; 8],
    alpha: [f64; 8],
    height: [f64; 4],
    volatility: [f64; 4],
}

impl Cell {
    fn load(
        lattice: &DensityLattice,
        blends: &[ColumnBlend],
        x: usize,
        y: usize,
        z: usize,
    ) -> Self {
        let corner = |i: usize| (x + (i & 1), y + ((i >> 1) & 1), z + ((i >> 2) & 1));
        let sections = lattice.horizontal_sections();
        let column = |i: usize| blends[(x + (i & 1)) * sections + z + (i >> 1)];

        Self {
            low: array::from_fn(|i| {
                let (cx, cy, cz) = corner(i);
                lattice.low(cx, cy, cz)
            }),
            high: array::from_fn(|i| {
                let (cx, cy, cz) = corner(i);
                lattice.high(cx, cy, cz)
            }),
            alpha: array::from_fn(|i| {
                let (cx, cy, cz) = corner(i);
                lattice.alpha(cx, cy, cz)
            }),
            height: array::from_fn(|i| column(i).height),
            volatility: array::from_fn(|i| column(i).volatility),
        }
    }

    #[inline]
    fn corners(values: &[f64; 8], dx: f64, dy: f64, dz: f64) -> f64 {
        lerp3(
            dx, dy, dz, values[0], values[1], values[2], values[3], values[4], values[5],
            values[6], values[7],
        )
    }

    /// Unbiased selector mix at a fractional position inside the cell.
    #[inline]
    fn mix(&self, dx: f64, dy: f64, dz: f64) -> f64 {
        let low = Self::corners(&self.low, dx, dy, dz);
        let high = Self::corners(&self.high, dx, dy, dz);
        let alpha = Self::corners(&self.alpha, dx, dy, dz);
        lerp(alpha, low, high)
    }

    #[inline]
    fn blend(&self, dx: f64, dz: f64) -> ColumnBlend {
        let [h00, h10, h01, h11] = self.height;
        let [v00, v10, v01, v11] = self.volatility;
        ColumnBlend {
            height: lerp2(dx, dz, h00, h10, h01, h11),
            volatility: lerp2(dx, dz, v00, v10, v01, v11),
        }
    }
}

/// Per-voxel density synthesis.
#[derive(Debug, Clone)]
pub struct DensityExpander {
    sea_level: f64,
    max_elevation: f64,
    cube_size: usize,
    cell_width: usize,
    cell_height: usize,
}

impl DensityExpander {
    /// Creates an expander for `settings`.
    #[must_use]
    pub fn new(settings: &TerrainSettings) -> Self {
        Self {
            sea_level: f64::from(settings.sea_level),
            max_elevation: settings.max_elevation,
            cube_size: settings.cube_len(),
            cell_width: settings.cell_width as usize,
            cell_height: settings.cell_height as usize,
        }
    }

    /// Final density of a selector mix at `block_y` under `blend`.
    ///
    /// Below the blended height the volatility is quartered, which flattens
    /// the lower part of tall biomes.
    #[must_use]
    pub fn bias(&self, mix: f64, blend: ColumnBlend, block_y: f64) -> f64 {
        let y_abs = block_y / self.max_elevation;
        let mut volatility = blend.volatility;
        if y_abs < blend.height {
            volatility /= 4.0;
        }
        let value = mix * volatility + blend.height;
        value * self.max_elevation + self.sea_level - y_abs * self.max_elevation
    }

    /// Fills `out` with one sample per voxel of cube layer `cube_y`, stored
    /// in [`VoxelGrid`](crate::cube::VoxelGrid) order.
    ///
    /// `blends` holds the `[x][z]` column blends of `lattice`.
    pub fn expand(
        &self,
        lattice: &DensityLattice,
        blends: &[ColumnBlend],
        cube_y: i32,
        out: &mut Vec<DensitySample>,
    ) {
        let size = self.cube_size;
        out.clear();
        out.resize(size * size * size, DensitySample::default());

        let x_step = self.cell_width as f64;
        let y_step = self.cell_height as f64;
        let cube_min_y = f64::from(cube_y) * size as f64;

        for cell_x in 0..size / self.cell_width {
            for cell_z in 0..size / self.cell_width {
                for cell_y in 0..size / self.cell_height {
                    let cell = Cell::load(lattice, blends, cell_x, cell_y, cell_z);
                    let cell_min_y = cube_min_y + (cell_y * self.cell_height) as f64;

                    let density = |dx: f64, dy: f64, dz: f64| {
                        self.bias(
                            cell.mix(dx, dy, dz),
                            cell.blend(dx, dz),
                            cell_min_y + dy * y_step,
                        )
                    };

                    for lx in 0..self.cell_width {
                        let dx = lx as f64 / x_step;
                        for lz in 0..self.cell_width {
                            let dz = lz as f64 / x_step;
                            for ly in 0..self.cell_height {
                                let dy = ly as f64 / y_step;

                                let gradient = DVec3::new(
                                    (density(1.0, dy, dz) - density(0.0, dy, dz)) / x_step,
                                    (density(dx, 1.0, dz) - density(dx, 0.0, dz)) / y_step,
                                    (density(dx, dy, 1.0) - density(dx, dy, 0.0)) / x_step,
                                );

                                let x = cell_x * self.cell_width + lx;
                                let y = cell_y * self.cell_height + ly;
                                let z = cell_z * self.cell_width + lz;
                                out[(y * size + z) * size + x] = DensitySample {
                                    value: density(dx, dy, dz),
                                    gradient,
                                };
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worldgen::{Biome, BiomeBlender, DensityGridBuilder, FixedBiomeSource};
    use cubic_utils::CubePos;

    fn expand(pos: CubePos, biome: Biome) -> Vec<DensitySample> {
        let settings = TerrainSettings::default();
        let source = FixedBiomeSource::single(biome);
        let builder = DensityGridBuilder::new(42, &settings).expect("valid settings");
        let blender = BiomeBlender::new(&settings);
        let expander = DensityExpander::new(&settings);

        let mut lattice = DensityLattice::new(&settings);
        builder.fill(pos, &mut lattice);
        let mut window = Vec::new();
        blender.fill_window(&source, lattice.origin(), 5, &mut window);
        let mut blends = Vec::new();
        blender
            .blend(&source, &window, &lattice, &mut blends)
            .expect("blends");
        let mut out = Vec::new();
        expander.expand(&lattice, &blends, pos.y(), &mut out);
        out
    }

    #[test]
    fn bias_centres_on_sea_level() {
        let expander = DensityExpander::new(&TerrainSettings::default());
        let flat = ColumnBlend {
            height: 0.0,
            volatility: 1.0,
        };
        assert!((expander.bias(0.0, flat, 64.0) - 0.0).abs() < 1e-9);
        assert!(expander.bias(0.0, flat, 10.0) > 0.0);
        assert!(expander.bias(0.0, flat, 100.0) < 0.0);
    }

    #[test]
    fn volatility_is_quartered_below_height() {
        let expander = DensityExpander::new(&TerrainSettings::default());
        let blend = ColumnBlend {
            height: 0.5,
            volatility: 1.0,
        };
        // y_abs = 0.25 < 0.5: mix contributes a quarter.
        let below = expander.bias(1.0, blend, 32.0) - expander.bias(0.0, blend, 32.0);
        assert!((below - 0.25 * 128.0).abs() < 1e-9);
        // y_abs = 0.75 >= 0.5: mix contributes fully.
        let above = expander.bias(1.0, blend, 96.0) - expander.bias(0.0, blend, 96.0);
        assert!((above - 128.0).abs() < 1e-9);
    }

    #[test]
    fn deep_cubes_are_solid_and_high_cubes_empty() {
        let plains = Biome::new("plains", 0.125, 0.05);
        let deep = expand(CubePos::new(0, -4, 0), plains.clone());
        assert!(deep.iter().all(|sample| sample.value > 0.0));
        let high = expand(CubePos::new(0, 12, 0), plains);
        assert!(high.iter().all(|sample| sample.value <= 0.0));
    }

    #[test]
    fn gradient_points_down_on_average() {
        let samples = expand(CubePos::new(3, 3, -2), Biome::new("plains", 0.125, 0.05));
        let mean = samples.iter().map(|s| s.gradient.y).sum::<f64>() / samples.len() as f64;
        assert!(mean < 0.0, "mean y gradient {mean}");
    }

    #[test]
    fn expansion_matches_lattice_at_cell_corners() {
        let settings = TerrainSettings::default();
        let pos = CubePos::new(1, 2, 1);
        let samples = expand(pos, Biome::new("forest", 0.1, 0.2));

        let builder = DensityGridBuilder::new(42, &settings).expect("valid settings");
        let mut lattice = DensityLattice::new(&settings);
        builder.fill(pos, &mut lattice);
        let source = FixedBiomeSource::single(Biome::new("forest", 0.1, 0.2));
        let blender = BiomeBlender::new(&settings);
        let mut window = Vec::new();
        blender.fill_window(&source, lattice.origin(), 5, &mut window);
        let mut blends = Vec::new();
        blender
            .blend(&source, &window, &lattice, &mut blends)
            .expect("blends");
        let expander = DensityExpander::new(&settings);

        // Voxel (4, 8, 12) sits exactly on lattice point (1, 1, 3).
        let mix = lerp(
            lattice.alpha(1, 1, 3),
            lattice.low(1, 1, 3),
            lattice.high(1, 1, 3),
        );
        let expected = expander.bias(mix, blends[5 + 3], 32.0 + 8.0);
        let actual = samples[(8 * 16 + 12) * 16 + 4].value;
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }
}
