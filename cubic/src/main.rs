//! Command-line driver: generates a region of cubes and reports what it built.

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod config;
mod logger;
mod region;

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use cubic_core::worldgen::{BiomeSource, SurfaceReplacer, TerrainGenerator};
use cubic_core::{CubeMap, CubeProvider, Material};
use rustc_hash::FxHashMap;

use crate::config::CubicConfig;
use crate::region::Region;

const DEFAULT_CONFIG: &str = "cubic.json5";

fn main() -> anyhow::Result<()> {
    let path = env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG), PathBuf::from);
    let loaded = CubicConfig::load(&path)?;
    let found = loaded.is_some();
    let config = loaded.unwrap_or_default();

    logger::init(&config.log_level)?;
    if !found {
        log::warn!("{} not found, using the default config", path.display());
    }

    #[cfg(feature = "deadlock_detection")]
    spawn_deadlock_detector();

    let seed = config.seed();
    log::info!("Seed: {seed}");

    let biomes = config.biome_source(seed)?;
    let generator =
        TerrainGenerator::new(seed, config.terrain).context("building the terrain generator")?;
    let replacer =
        SurfaceReplacer::new(seed, config.terrain).context("building the surface pass")?;

    let region = Region::new(config.region.min_pos(), config.region.max_pos())?;
    // One extra layer above and below so every cube of the region has both
    // vertical neighbours for the surface pass.
    let cubes = region::generate(&generator, &biomes, region.padded_vertically())?;
    region::replace_surfaces(&replacer, &cubes, &biomes, region)?;

    log_histogram(&cubes, &biomes, region);
    Ok(())
}

/// Logs how many voxels of each material the region holds.
fn log_histogram<B: BiomeSource>(cubes: &CubeMap, biomes: &B, region: Region) {
    let mut counts: FxHashMap<Material, usize> = FxHashMap::default();
    for pos in region.positions() {
        let Some(cube) = cubes.cube(pos) else {
            continue;
        };
        for &material in cube.read().materials() {
            *counts.entry(material).or_default() += 1;
        }
    }

    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_unstable_by(|a, b| b.1.cmp(&a.1));
    for (material, count) in counts {
        let label = match material {
            Material::BiomeTop(id) => format!("{} top", biomes.biome(id).name),
            Material::BiomeFiller(id) => format!("{} filler", biomes.biome(id).name),
            other => other.to_string(),
        };
        log::info!("{label:>24}: {count}");
    }
}

#[cfg(feature = "deadlock_detection")]
fn spawn_deadlock_detector() {
    use std::thread;
    use std::time::Duration;

    thread::spawn(|| {
        loop {
            thread::sleep(Duration::from_secs(10));
            let deadlocks = parking_lot::deadlock::check_deadlock();
            if deadlocks.is_empty() {
                continue;
            }
            log::error!("{} deadlocks detected", deadlocks.len());
            for (i, threads) in deadlocks.iter().enumerate() {
                for thread in threads {
                    log::error!(
                        "Deadlock #{i}, thread {:?}:\n{:?}",
                        thread.thread_id(),
                        thread.backtrace()
                    );
                }
            }
        }
    });
}
