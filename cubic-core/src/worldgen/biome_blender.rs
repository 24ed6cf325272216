//! Biome height and volatility smoothing.
//!
//! Every lattice column averages the base height and height variation of the
//! biomes in a square window around it, weighted by a radial kernel. The
//! accumulators are `f32` and the kernel mixes `f32` and `f64` operands the
//! same way the legacy generator did, so outputs stay bit-compatible.

use glam::IVec3;

use super::{BiomeId, BiomeSource, DensityLattice, GenerationError, TerrainSettings};

/// Smoothed biome parameters of one lattice column, in the normalised
/// domain the density expander works in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColumnBlend {
    /// Normalised terrain height; `0` is sea level, `1` is max elevation above it.
    pub height: f64,
    /// Normalised volatility.
    pub volatility: f64,
}

/// Folds a raw height noise sample into the small legacy height correction.
///
/// The input is expected in `[-8, 8]`; the result lies in `[-0.36, 0.125]`.
#[must_use]
pub fn add_height(noise: f64) -> f64 {
    let mut value = noise;
    if value < 0.0 {
        value = -value * 0.3;
    }
    value = value * 3.0 - 2.0;

    if value < 0.0 {
        (value / 2.0).max(-1.0) / 1.4 / 2.0
    } else {
        value.min(1.0) / 8.0
    }
}

/// Radial-kernel smoother for biome parameters.
#[derive(Debug, Clone)]
pub struct BiomeBlender {
    radius: i32,
    diameter: usize,
    cell_width: i32,
    kernel: Box<[f64]>,
}

impl BiomeBlender {
    /// Precomputes the kernel for the smoothing radius of `settings`.
    #[must_use]
    pub fn new(settings: &TerrainSettings) -> Self {
        let radius = settings.smooth_radius();
        let diameter = (radius * 2 + 1) as usize;

        let mut kernel = vec![0.0; diameter * diameter];
        for dz in -radius..=radius {
            for dx in -radius..=radius {
                // `int + 0.2F` is a float addition in the legacy code.
                let distance_sq = (dx * dx + dz * dz) as f32 + 0.2_f32;
                let index = (dx + radius) as usize + (dz + radius) as usize * diameter;
                kernel[index] = 10.0 / f64::from(distance_sq).sqrt();
            }
        }

        Self {
            radius,
            diameter,
            cell_width: settings.cell_width,
            kernel: kernel.into_boxed_slice(),
        }
    }

    /// Smoothing radius in lattice columns.
    #[must_use]
    pub const fn radius(&self) -> i32 {
        self.radius
    }

    /// Edge length of the biome window for a lattice with `sections` columns.
    #[must_use]
    pub const fn window_width(&self, sections: usize) -> usize {
        sections + self.radius as usize * 2
    }

    /// Unscaled kernel weight at offset `(dx, dz)`; both must be within the radius.
    #[must_use]
    pub fn kernel_weight(&self, dx: i32, dz: i32) -> f64 {
        self.kernel[(dx + self.radius) as usize + (dz + self.radius) as usize * self.diameter]
    }

    /// Samples the biomes of every lattice column a cube's blend reads,
    /// `radius` columns beyond the lattice on each side.
    pub fn fill_window<B: BiomeSource>(
        &self,
        biomes: &B,
        origin: IVec3,
        sections: usize,
        window: &mut Vec<BiomeId>,
    ) {
        let width = self.window_width(sections);
        biomes.fill_biomes(
            window,
            (origin.x - self.radius) * self.cell_width,
            (origin.z - self.radius) * self.cell_width,
            width,
            width,
            self.cell_width,
        );
    }

    /// Blends every column of `lattice`, writing `[x][z]` results to `out`.
    ///
    /// `window` must come from [`fill_window`](Self::fill_window) for the same
    /// lattice.
    pub fn blend<B: BiomeSource>(
        &self,
        biomes: &B,
        window: &[BiomeId],
        lattice: &DensityLattice,
        out: &mut Vec<ColumnBlend>,
    ) -> Result<(), GenerationError> {
        let sections = lattice.horizontal_sections();
        let origin = lattice.origin();
        out.clear();
        for x in 0..sections {
            for z in 0..sections {
                let noise = lattice.height(x, z);
                if !(-8.0..=8.0).contains(&noise) {
                    return Err(GenerationError::HeightNoiseOutOfRange {
                        x: origin.x + x as i32,
                        z: origin.z + z as i32,
                        value: noise,
                    });
                }
                let blend = self
                    .blend_column(biomes, window, sections, x, z, add_height(noise))
                    .map_err(|sum| GenerationError::DegenerateBiomeWeights {
                        x: origin.x + x as i32,
                        z: origin.z + z as i32,
                        sum,
                    })?;
                out.push(blend);
            }
        }
        Ok(())
    }

    /// Smoothed parameters of lattice column `(x, z)`, or the weight sum if it
    /// is zero or not finite.
    fn blend_column<B: BiomeSource>(
        &self,
        biomes: &B,
        window: &[BiomeId],
        sections: usize,
        x: usize,
        z: usize,
        add_height: f64,
    ) -> Result<ColumnBlend, f32> {
        let width = self.window_width(sections);
        let radius = self.radius as usize;
        let center = biomes.biome(window[(z + radius) * width + x + radius]);

        let mut smooth_volatility = 0.0_f32;
        let mut smooth_height = 0.0_f32;
        let mut weight_sum = 0.0_f32;

        for dx in -self.radius..=self.radius {
            for dz in -self.radius..=self.radius {
                let wx = (x as i32 + dx + self.radius) as usize;
                let wz = (z as i32 + dz + self.radius) as usize;
                let biome = biomes.biome(window[wz * width + wx]);

                let mut weight = (self.kernel_weight(dx, dz)
                    / f64::from(biome.base_height + 2.0_f32))
                .abs();
                if biome.base_height > center.base_height {
                    weight /= 2.0;
                }

                // f32 += f64 narrows after every step.
                smooth_volatility =
                    (f64::from(smooth_volatility) + f64::from(biome.height_variation) * weight)
                        as f32;
                smooth_height =
                    (f64::from(smooth_height) + f64::from(biome.base_height) * weight) as f32;
                weight_sum = (f64::from(weight_sum) + weight) as f32;
            }
        }

        if !weight_sum.is_finite() || weight_sum == 0.0 {
            return Err(weight_sum);
        }

        smooth_volatility /= weight_sum;
        smooth_height /= weight_sum;

        let volatility = (f64::from(smooth_volatility) * 0.9 + 0.1) * (4.0 / 3.0);
        let height = 0.75 / 64.0
            + f64::from(smooth_height) * 17.0 / 64.0
            + 0.2 * add_height * 17.0 / 64.0;

        Ok(ColumnBlend { height, volatility })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worldgen::{Biome, DensityGridBuilder, FixedBiomeSource};
    use cubic_utils::CubePos;

    fn blend_fixed(biome: Biome) -> Result<Vec<ColumnBlend>, GenerationError> {
        let settings = TerrainSettings::default();
        let source = FixedBiomeSource::single(biome);
        let builder = DensityGridBuilder::new(0, &settings).expect("valid settings");
        let blender = BiomeBlender::new(&settings);
        let mut lattice = DensityLattice::new(&settings);
        builder.fill(CubePos::new(0, 0, 0), &mut lattice);

        let mut window = Vec::new();
        blender.fill_window(&source, lattice.origin(), 5, &mut window);
        let mut out = Vec::new();
        blender.blend(&source, &window, &lattice, &mut out)?;
        Ok(out)
    }

    #[test]
    fn add_height_reference_values() {
        assert!((add_height(0.0) - -1.0 / 1.4 / 2.0).abs() < 1e-12);
        assert!((add_height(8.0) - 0.125).abs() < 1e-12);
        assert!((add_height(1.0) - 0.125).abs() < 1e-12);
        assert!((add_height(0.5) - (-0.25 / 1.4 / 2.0)).abs() < 1e-12);
        // Negative samples fold to a third of their magnitude first.
        assert!((add_height(-5.0) - add_height(1.5)).abs() < 1e-12);
    }

    #[test]
    fn add_height_is_bounded() {
        for i in -800..=800 {
            let value = add_height(f64::from(i) / 100.0);
            assert!((-1.0 / 2.8..=0.125).contains(&value), "{i} gave {value}");
        }
    }

    #[test]
    fn kernel_peaks_at_centre() {
        let blender = BiomeBlender::new(&TerrainSettings::default());
        assert_eq!(blender.radius(), 4);
        let centre = blender.kernel_weight(0, 0);
        assert!((centre - 10.0 / f64::from(0.2_f32).sqrt()).abs() < 1e-12);
        assert!(centre > blender.kernel_weight(1, 0));
        assert_eq!(
            blender.kernel_weight(3, -2).to_bits(),
            blender.kernel_weight(-2, 3).to_bits()
        );
    }

    #[test]
    fn uniform_biome_keeps_its_parameters() {
        let out = blend_fixed(Biome::new("ocean", -1.0, 0.1)).expect("blends");
        assert_eq!(out.len(), 25);
        for blend in out {
            assert!((blend.volatility - (0.1 * 0.9 + 0.1) * 4.0 / 3.0).abs() < 1e-5);
            let base = 0.75 / 64.0 - 17.0 / 64.0;
            // addHeight moves the height by at most 0.2 * 17/64 * 0.36.
            assert!((blend.height - base).abs() < 0.02);
        }
    }

    #[test]
    fn degenerate_weights_are_rejected() {
        let err = blend_fixed(Biome::new("void", -2.0, 0.1)).unwrap_err();
        assert!(matches!(err, GenerationError::DegenerateBiomeWeights { .. }));
    }

    #[test]
    fn lower_neighbours_dominate() {
        use crate::worldgen::{BiomeRegistry, BiomeSource};

        // A source with a single low column in the middle of high terrain.
        struct Spike {
            registry: BiomeRegistry,
        }
        impl BiomeSource for Spike {
            fn biome_at(&self, block_x: i32, block_z: i32) -> BiomeId {
                if block_x == 8 && block_z == 8 {
                    BiomeId(0)
                } else {
                    BiomeId(1)
                }
            }
            fn biome(&self, id: BiomeId) -> &Biome {
                self.registry.get(id).expect("registered")
            }
        }

        let settings = TerrainSettings::default();
        let source = Spike {
            registry: [Biome::new("low", 0.0, 0.0), Biome::new("high", 1.0, 0.0)]
                .into_iter()
                .collect(),
        };
        let builder = DensityGridBuilder::new(0, &settings).expect("valid settings");
        let blender = BiomeBlender::new(&settings);
        let mut lattice = DensityLattice::new(&settings);
        builder.fill(CubePos::new(0, 0, 0), &mut lattice);
        let mut window = Vec::new();
        blender.fill_window(&source, lattice.origin(), 5, &mut window);
        let mut out = Vec::new();
        blender
            .blend(&source, &window, &lattice, &mut out)
            .expect("blends");

        // Column (2, 2) sits on the low biome, so every high neighbour is halved.
        let centre = out[2 * 5 + 2];
        let corner = out[0];
        assert!(centre.height < corner.height);
    }
}
