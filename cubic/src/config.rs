//! Driver configuration loaded from `cubic.json5`.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, bail};
use cubic_core::worldgen::{
    Biome, BiomeRegistry, BiomeSourceKind, CellBiomeSource, FixedBiomeSource, TerrainSettings,
};
use cubic_utils::CubePos;
use serde::Deserialize;

/// Top-level config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CubicConfig {
    /// World seed. Numeric strings are used as-is, other strings are hashed,
    /// an empty string picks a random seed.
    pub seed: String,
    /// Default log filter, overridden by `RUST_LOG`.
    pub log_level: String,
    /// World constants.
    pub terrain: TerrainSettings,
    /// Cubes to generate.
    pub region: RegionConfig,
    /// Biome definitions; the legacy presets when empty.
    pub biomes: Vec<Biome>,
    /// Use this biome everywhere instead of a cell layout.
    pub fixed_biome: Option<String>,
    /// Edge length in blocks of a biome cell.
    pub biome_cell_size: i32,
}

impl Default for CubicConfig {
    fn default() -> Self {
        Self {
            seed: String::new(),
            log_level: "info".to_owned(),
            terrain: TerrainSettings::default(),
            region: RegionConfig::default(),
            biomes: Vec::new(),
            fixed_biome: None,
            biome_cell_size: 64,
        }
    }
}

/// Inclusive cube range.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RegionConfig {
    /// Lowest cube coordinate.
    pub min: [i32; 3],
    /// Highest cube coordinate.
    pub max: [i32; 3],
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            min: [-4, 0, -4],
            max: [3, 7, 3],
        }
    }
}

impl RegionConfig {
    /// Lowest cube.
    #[must_use]
    pub const fn min_pos(&self) -> CubePos {
        CubePos::new(self.min[0], self.min[1], self.min[2])
    }

    /// Highest cube.
    #[must_use]
    pub const fn max_pos(&self) -> CubePos {
        CubePos::new(self.max[0], self.max[1], self.max[2])
    }
}

impl CubicConfig {
    /// Reads and parses the config at `path`. Returns `None` if the file does
    /// not exist.
    pub fn load(path: &Path) -> anyhow::Result<Option<Self>> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("reading {}", path.display()));
            }
        };
        let config = serde_json5::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(config))
    }

    /// Resolves the configured seed.
    #[must_use]
    pub fn seed(&self) -> i64 {
        if self.seed.is_empty() {
            return rand::random();
        }
        self.seed.parse().unwrap_or_else(|_| {
            let mut hash: i64 = 0;
            for byte in self.seed.bytes() {
                hash = hash.wrapping_mul(31).wrapping_add(i64::from(byte));
            }
            hash
        })
    }

    /// The biome registry described by the config.
    #[must_use]
    pub fn registry(&self) -> BiomeRegistry {
        if self.biomes.is_empty() {
            BiomeRegistry::legacy()
        } else {
            self.biomes.iter().cloned().collect()
        }
    }

    /// Builds the biome source described by the config.
    pub fn biome_source(&self, seed: i64) -> anyhow::Result<BiomeSourceKind> {
        let registry = self.registry();
        if let Some(name) = &self.fixed_biome {
            let Some(id) = registry.id_of(name) else {
                bail!("fixed biome {name:?} is not defined");
            };
            return Ok(BiomeSourceKind::Fixed(FixedBiomeSource::new(registry, id)?));
        }
        Ok(BiomeSourceKind::Cells(CellBiomeSource::new(
            seed as u64,
            registry,
            self.biome_cell_size,
        )?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_seed(seed: &str) -> CubicConfig {
        CubicConfig {
            seed: seed.to_owned(),
            ..CubicConfig::default()
        }
    }

    #[test]
    fn numeric_seed_is_used_verbatim() {
        assert_eq!(with_seed("42").seed(), 42);
        assert_eq!(with_seed("-7").seed(), -7);
    }

    #[test]
    fn text_seed_is_hashed() {
        // 'a' * 31 + 'b'
        assert_eq!(with_seed("ab").seed(), 97 * 31 + 98);
        assert_eq!(with_seed("ab").seed(), with_seed("ab").seed());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config: CubicConfig = serde_json5::from_str(
            "{
                seed: '1',
                terrain: { sea_level: 32 },
                region: { min: [0, 0, 0], max: [1, 1, 1] },
            }",
        )
        .expect("parses");
        assert_eq!(config.terrain.sea_level, 32);
        assert_eq!(config.terrain.cube_size, 16);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.region.max_pos(), CubePos::new(1, 1, 1));
    }

    #[test]
    fn fixed_biome_must_exist() {
        let config = CubicConfig {
            fixed_biome: Some("nowhere".to_owned()),
            ..CubicConfig::default()
        };
        assert!(config.biome_source(0).is_err());

        let config = CubicConfig {
            fixed_biome: Some("ocean".to_owned()),
            ..CubicConfig::default()
        };
        assert!(matches!(
            config.biome_source(0),
            Ok(BiomeSourceKind::Fixed(_))
        ));
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let loaded = CubicConfig::load(Path::new("definitely/not/here.json5")).expect("loads");
        assert!(loaded.is_none());
    }
}
