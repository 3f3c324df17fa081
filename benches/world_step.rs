use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rs_rigid::world::World;

const DT: f32 = 1.0 / 60.0;

fn build_scene(count: usize, seed: u64) -> World {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut world = World::new();

    for i in 0..count {
        let position = (
            rng.random_range(-5.0..5.0),
            rng.random_range(1.0..15.0),
            rng.random_range(-5.0..5.0),
        );
        let result = match i % 3 {
            0 => world.add_sphere(position, rng.random_range(0.2..0.6), 1.0),
            1 => world.add_box(position, (0.6, 0.6, 0.6), 1.0),
            _ => world.add_cylinder(position, 0.3, 0.8, 1.0),
        };
        if let Err(e) = result {
            debug!("Skipping body {}: {}", i, e);
        }
    }
    world
}

pub fn bench_world_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_step");
    group.measurement_time(std::time::Duration::from_secs(5));
    group.sample_size(50);

    for &count in &[8usize, 32, 128] {
        // Settle the scene first so the bench covers resting contacts and sleep.
        let mut settled = build_scene(count, 7);
        for _ in 0..120 {
            let _ = settled.step(DT);
        }

        group.bench_with_input(BenchmarkId::new("falling", count), &count, |b, &count| {
            b.iter_batched(
                || build_scene(count, 7),
                |mut world| {
                    for _ in 0..10 {
                        let _ = world.step(black_box(DT));
                    }
                    world
                },
                criterion::BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("settled", count), &settled, |b, settled| {
            b.iter_batched(
                || settled.clone(),
                |mut world| {
                    let _ = world.step(black_box(DT));
                    world
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_world_step);
criterion_main!(benches);
