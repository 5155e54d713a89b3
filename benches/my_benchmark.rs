extern crate waypoint_routing;
use env_logger::Env;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use nanorand::{Rng, WyRand};
use waypoint_routing::prelude::*;

/// A square grid of Waypoints with two-way roads, where roughly one in `gaps` roads is missing
fn build_grid(size: u32, gaps: u32) -> Network<(u32, u32)> {
    let mut rng = WyRand::new_seed(4);
    let mut builder = NetworkBuilder::new();

    for x in 0..size {
        for y in 0..size {
            builder.add_waypoint((x, y), (x as f32 * 10.0, y as f32 * 10.0));
            if x > 0 && rng.generate_range(0..gaps) != 0 {
                builder.add_link((x - 1, y), (x, y), Direction::TwoWay);
            }
            if y > 0 && rng.generate_range(0..gaps) != 0 {
                builder.add_link((x, y - 1), (x, y), Direction::TwoWay);
            }
        }
    }
    builder.build()
}

#[allow(unused)]
// Setup logging output
fn init() {
    let env = Env::default()
        .filter_or("MY_LOG_LEVEL", "info") // Change this to trace to see the timing of every search.
        .write_style_or("MY_LOG_STYLE", "always");

    let _ = env_logger::Builder::from_env(env).is_test(true).try_init();
}

fn bench_a_star(c: &mut Criterion) {
    let mut group = c.benchmark_group("A*");
    group.sample_size(20);

    init();

    for size in [16, 64, 128] {
        let network = build_grid(size, 5);
        let start = (0, 0);
        let goal = (size - 1, size - 1);

        group.bench_with_input(
            BenchmarkId::new("corner to corner", size),
            &network,
            |b, network| b.iter(|| network.find_path(start, goal)),
        );
    }
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("Batch queries");
    group.sample_size(10);

    init();

    let size = 64;
    let network = build_grid(size, 5);
    let mut rng = WyRand::new_seed(17);
    let queries: Vec<((u32, u32), (u32, u32))> = (0..256)
        .map(|_| {
            (
                (rng.generate_range(0..size), rng.generate_range(0..size)),
                (rng.generate_range(0..size), rng.generate_range(0..size)),
            )
        })
        .collect();

    group.bench_function("find_paths, 256 queries", |b| {
        b.iter(|| network.graph().find_paths(&queries, &network))
    });
    group.bench_function("a_star one by one, 256 queries", |b| {
        b.iter(|| {
            queries
                .iter()
                .map(|&(start, goal)| network.find_path(start, goal))
                .collect::<Vec<_>>()
        })
    });
    group.finish();
}

fn bench_simulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Simulation");
    group.sample_size(10);

    init();

    let size = 32;
    let network = build_grid(size, 8);
    let kinds = [VehicleKind::Bike, VehicleKind::Bus, VehicleKind::Car];

    for count in [16, 128] {
        let mut rng = WyRand::new_seed(5);
        let mut registry = VehicleRegistry::new();
        for i in 0..count {
            let pos = (
                rng.generate_range(0..size * 10) as f32,
                rng.generate_range(0..size * 10) as f32,
            );
            registry.register(VehicleAgent::new(kinds[i % kinds.len()], pos));
        }

        group.bench_function(BenchmarkId::new("60 ticks", count), |b| {
            b.iter(|| {
                for _ in 0..60 {
                    registry.tick(1.0 / 60.0, &network, &mut rng);
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_a_star, bench_batch, bench_simulation);
criterion_main!(benches);
