#![expect(missing_docs, reason = "criterion macros generate undocumented items")]

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use cubic_core::worldgen::{
    BiomeRegistry, CellBiomeSource, SurfaceReplacer, TerrainGenerator, TerrainSettings,
};
use cubic_core::{CubeMap, VoxelGrid};
use cubic_utils::CubePos;
use std::hint::black_box;

const SEED: i64 = 0;

fn biomes() -> CellBiomeSource {
    CellBiomeSource::new(SEED as u64, BiomeRegistry::legacy(), 64).expect("valid cell source")
}

fn bench_generator_construction(c: &mut Criterion) {
    c.bench_function("terrain_generator_new", |b| {
        b.iter(|| {
            black_box(
                TerrainGenerator::new(black_box(SEED), TerrainSettings::default())
                    .expect("valid settings"),
            )
        });
    });
}

fn bench_single_cube(c: &mut Criterion) {
    let generator = TerrainGenerator::new(SEED, TerrainSettings::default()).expect("valid");
    let biomes = biomes();
    let mut scratch = generator.scratch();

    c.bench_function("terrain_single_cube", |b| {
        b.iter(|| {
            black_box(
                generator
                    .generate_density_and_materials(
                        black_box(CubePos::new(0, 4, 0)),
                        &biomes,
                        &mut scratch,
                    )
                    .expect("generation succeeds"),
            )
        });
    });
}

fn bench_cube_grid(c: &mut Criterion) {
    let generator = TerrainGenerator::new(SEED, TerrainSettings::default()).expect("valid");
    let biomes = biomes();
    let mut scratch = generator.scratch();

    let mut group = c.benchmark_group("terrain_cube_grid");
    for side in [2, 4] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{side}x{side}x{side}")),
            &side,
            |b, &side| {
                b.iter(|| {
                    for x in 0..side {
                        for z in 0..side {
                            for y in 2..2 + side {
                                black_box(
                                    generator
                                        .generate_density_and_materials(
                                            CubePos::new(x, y, z),
                                            &biomes,
                                            &mut scratch,
                                        )
                                        .expect("generation succeeds"),
                                );
                            }
                        }
                    }
                });
            },
        );
    }
    group.finish();
}

fn bench_surface_pass(c: &mut Criterion) {
    let settings = TerrainSettings::default();
    let generator = TerrainGenerator::new(SEED, settings).expect("valid");
    let replacer = SurfaceReplacer::new(SEED, settings).expect("valid");
    let biomes = biomes();
    let pos = CubePos::new(0, 4, 0);
    let grids: Vec<VoxelGrid> = [pos.below(), pos, pos.above()]
        .into_iter()
        .map(|p| generator.generate(p, &biomes).expect("generation succeeds"))
        .collect();

    c.bench_function("surface_pass_single_cube", |b| {
        b.iter_batched(
            || grids.iter().cloned().collect::<CubeMap>(),
            |cubes| black_box(replacer.apply(&cubes, pos, &biomes).expect("pass runs")),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_generator_construction,
    bench_single_cube,
    bench_cube_grid,
    bench_surface_pass
);
criterion_main!(benches);
