//! World constants injected into the generator.

use serde::{Deserialize, Serialize};

use super::GenerationError;

/// Blocks scanned above and below a cube by the surface pass.
pub const SURFACE_SCAN_MARGIN: i32 = 8;

/// Largest accepted `max_elevation / 64`. Keeps the smoothing kernel at most
/// 257×257 columns.
pub const MAX_ELEVATION_FACTOR: f64 = 64.0;

/// World constants for terrain generation.
///
/// The defaults reproduce the legacy cubic generator: 16³ cubes, a lattice
/// cell of 4×8×4 blocks, sea level at 64 and a maximum elevation of 128.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    /// Sea level in blocks.
    pub sea_level: i32,
    /// Height above sea level that a normalised height of 1 maps to.
    pub max_elevation: f64,
    /// Edge length of a cube in blocks.
    pub cube_size: i32,
    /// Horizontal size of a lattice cell in blocks.
    pub cell_width: i32,
    /// Vertical size of a lattice cell in blocks.
    pub cell_height: i32,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            sea_level: 64,
            max_elevation: 128.0,
            cube_size: 16,
            cell_width: 4,
            cell_height: 8,
        }
    }
}

impl TerrainSettings {
    /// Checks that the lattice tiles a cube exactly and the surface pass fits.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if !self.max_elevation.is_finite() || self.max_elevation <= 0.0 {
            return Err(GenerationError::InvalidSettings(format!(
                "max_elevation must be positive, got {}",
                self.max_elevation
            )));
        }
        if self.elevation_factor() > MAX_ELEVATION_FACTOR {
            return Err(GenerationError::InvalidSettings(format!(
                "max_elevation must be at most {}, got {}",
                MAX_ELEVATION_FACTOR * 64.0,
                self.max_elevation
            )));
        }
        if self.cell_width <= 0 || self.cell_height <= 0 {
            return Err(GenerationError::InvalidSettings(format!(
                "cell sizes must be positive, got {}x{}",
                self.cell_width, self.cell_height
            )));
        }
        if self.cube_size < SURFACE_SCAN_MARGIN {
            return Err(GenerationError::InvalidSettings(format!(
                "cube_size must be at least {SURFACE_SCAN_MARGIN}, got {}",
                self.cube_size
            )));
        }
        if self.cube_size % self.cell_width != 0 || self.cube_size % self.cell_height != 0 {
            return Err(GenerationError::InvalidSettings(format!(
                "cube_size {} is not a multiple of the cell size {}x{}",
                self.cube_size, self.cell_width, self.cell_height
            )));
        }
        Ok(())
    }

    /// Lattice samples per cube along X and Z (cells + 1).
    #[must_use]
    pub const fn horizontal_sections(&self) -> usize {
        (self.cube_size / self.cell_width) as usize + 1
    }

    /// Lattice samples per cube along Y (cells + 1).
    #[must_use]
    pub const fn vertical_sections(&self) -> usize {
        (self.cube_size / self.cell_height) as usize + 1
    }

    /// Cube edge length as `usize`.
    #[must_use]
    pub const fn cube_len(&self) -> usize {
        self.cube_size as usize
    }

    /// Ratio of the max elevation to the legacy 64-block reference height.
    #[must_use]
    pub fn elevation_factor(&self) -> f64 {
        self.max_elevation / 64.0
    }

    /// Radius, in lattice columns, of the biome smoothing window.
    ///
    /// Only meaningful for settings that pass [`validate`](Self::validate).
    #[must_use]
    pub fn smooth_radius(&self) -> i32 {
        (self.elevation_factor() as i32).saturating_mul(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = TerrainSettings::default();
        settings.validate().expect("defaults validate");
        assert_eq!(settings.horizontal_sections(), 5);
        assert_eq!(settings.vertical_sections(), 3);
        assert_eq!(settings.smooth_radius(), 4);
    }

    #[test]
    fn rejects_uneven_cells() {
        let settings = TerrainSettings {
            cell_width: 5,
            ..TerrainSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(GenerationError::InvalidSettings(_))
        ));
    }

    #[test]
    fn rejects_small_cubes() {
        let settings = TerrainSettings {
            cube_size: 4,
            cell_width: 4,
            cell_height: 4,
            ..TerrainSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn rejects_huge_elevation() {
        let settings = TerrainSettings {
            max_elevation: 1e12,
            ..TerrainSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(GenerationError::InvalidSettings(_))
        ));
        assert_eq!(settings.smooth_radius(), i32::MAX);

        let largest = TerrainSettings {
            max_elevation: MAX_ELEVATION_FACTOR * 64.0,
            ..TerrainSettings::default()
        };
        largest.validate().expect("the cap itself is accepted");
        assert_eq!(largest.smooth_radius(), 128);
    }

    #[test]
    fn rejects_non_positive_elevation() {
        let settings = TerrainSettings {
            max_elevation: 0.0,
            ..TerrainSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
