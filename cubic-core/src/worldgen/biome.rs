//! Biome definitions and the registry that owns them.
//!
//! The generator treats biomes as read-only lookup data: a base height and a
//! height variation in the legacy (beta 1.8 era) scale, plus the surface blocks
//! the surface pass lays down.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Identifier of a registered biome.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct BiomeId(pub u16);

/// Blocks a biome can use for its top and filler layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceBlock {
    /// Grass block.
    Grass,
    /// Dirt.
    Dirt,
    /// Sand. Filler runs of sand end in a sandstone band.
    Sand,
    /// Gravel.
    Gravel,
    /// Stone.
    Stone,
    /// Snow block.
    Snow,
    /// Mycelium.
    Mycelium,
    /// Clay.
    Clay,
}

/// A biome definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Biome {
    /// Unique name.
    pub name: String,
    /// Legacy base height; `0` is sea level, `1` is roughly 17 blocks above it.
    pub base_height: f32,
    /// Legacy height variation.
    pub height_variation: f32,
    /// Surface block.
    #[serde(default = "default_top")]
    pub top: SurfaceBlock,
    /// Subsurface block.
    #[serde(default = "default_filler")]
    pub filler: SurfaceBlock,
}

const fn default_top() -> SurfaceBlock {
    SurfaceBlock::Grass
}

const fn default_filler() -> SurfaceBlock {
    SurfaceBlock::Dirt
}

impl Biome {
    /// A grass-over-dirt biome.
    #[must_use]
    pub fn new(name: impl Into<String>, base_height: f32, height_variation: f32) -> Self {
        Self {
            name: name.into(),
            base_height,
            height_variation,
            top: default_top(),
            filler: default_filler(),
        }
    }

    /// Replaces the surface blocks.
    #[must_use]
    pub const fn with_surface(mut self, top: SurfaceBlock, filler: SurfaceBlock) -> Self {
        self.top = top;
        self.filler = filler;
        self
    }

    /// Whether filler runs of this biome end in sandstone.
    #[must_use]
    pub fn has_sand_filler(&self) -> bool {
        self.filler == SurfaceBlock::Sand
    }
}

/// Biomes indexed by [`BiomeId`].
#[derive(Debug, Clone, Default)]
pub struct BiomeRegistry {
    biomes: Vec<Biome>,
    by_name: FxHashMap<String, BiomeId>,
}

impl BiomeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The legacy overworld presets.
    #[must_use]
    pub fn legacy() -> Self {
        use SurfaceBlock::{Sand, Snow};

        let mut registry = Self::new();
        for biome in [
            Biome::new("ocean", -1.0, 0.1),
            Biome::new("plains", 0.125, 0.05),
            Biome::new("desert", 0.125, 0.05).with_surface(Sand, Sand),
            Biome::new("extreme_hills", 1.0, 0.5),
            Biome::new("forest", 0.1, 0.2),
            Biome::new("taiga", 0.2, 0.2),
            Biome::new("swampland", -0.2, 0.1),
            Biome::new("river", -0.5, 0.0),
            Biome::new("beach", 0.0, 0.025).with_surface(Sand, Sand),
            Biome::new("ice_plains", 0.125, 0.05).with_surface(Snow, SurfaceBlock::Dirt),
            Biome::new("deep_ocean", -1.8, 0.1),
        ] {
            registry.register(biome);
        }
        registry
    }

    /// Registers a biome, returning its id. A biome with an existing name
    /// replaces the previous definition and keeps its id.
    pub fn register(&mut self, biome: Biome) -> BiomeId {
        if let Some(&id) = self.by_name.get(&biome.name) {
            self.biomes[usize::from(id.0)] = biome;
            return id;
        }
        let id = BiomeId(self.biomes.len() as u16);
        self.by_name.insert(biome.name.clone(), id);
        self.biomes.push(biome);
        id
    }

    /// Looks up a biome.
    #[must_use]
    pub fn get(&self, id: BiomeId) -> Option<&Biome> {
        self.biomes.get(usize::from(id.0))
    }

    /// Looks up an id by biome name.
    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<BiomeId> {
        self.by_name.get(name).copied()
    }

    /// Whether `id` is registered.
    #[must_use]
    pub fn contains(&self, id: BiomeId) -> bool {
        usize::from(id.0) < self.biomes.len()
    }

    /// Number of biomes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.biomes.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty()
    }

    /// All registered ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = BiomeId> + '_ {
        (0..self.biomes.len()).map(|i| BiomeId(i as u16))
    }

    /// Looks up a biome that is known to be registered.
    ///
    /// Only ids handed out by this registry may be passed here.
    pub(crate) fn resolve(&self, id: BiomeId) -> &Biome {
        &self.biomes[usize::from(id.0)]
    }
}

impl FromIterator<Biome> for BiomeRegistry {
    fn from_iter<I: IntoIterator<Item = Biome>>(iter: I) -> Self {
        let mut registry = Self::new();
        for biome in iter {
            registry.register(biome);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_presets() {
        let registry = BiomeRegistry::legacy();
        let ocean = registry.id_of("ocean").expect("ocean registered");
        let biome = registry.get(ocean).expect("ocean resolves");
        assert!((biome.base_height - -1.0).abs() < f32::EPSILON);
        assert!(
            registry
                .get(registry.id_of("desert").expect("desert registered"))
                .expect("desert resolves")
                .has_sand_filler()
        );
    }

    #[test]
    fn re_registering_keeps_id() {
        let mut registry = BiomeRegistry::new();
        let first = registry.register(Biome::new("plains", 0.1, 0.1));
        let second = registry.register(Biome::new("plains", 0.2, 0.3));
        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
        assert!((registry.resolve(first).height_variation - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn surface_defaults_when_deserialised() {
        let biome: Biome = serde_json5::from_str(
            "{ name: 'meadow', base_height: 0.2, height_variation: 0.1 }",
        )
        .expect("parses");
        assert_eq!(biome.top, SurfaceBlock::Grass);
        assert_eq!(biome.filler, SurfaceBlock::Dirt);
    }
}
