//! Performance benchmarks for route_sim_core using Criterion.rs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use route_sim_core::geo::Coordinate;
use route_sim_core::interpolate::interpolate;
use route_sim_core::route::build_route;
use route_sim_core::test_helpers::{manual_controller, ScriptedDirections};

/// Zig-zag path of `vertices` points heading north-east out of Seoul.
fn zigzag_path(vertices: usize) -> Vec<Coordinate> {
    (0..vertices)
        .map(|i| {
            let step = i as f64 * 0.0005;
            let wiggle = if i % 2 == 0 { 0.0 } else { 0.0003 };
            Coordinate::new(37.5 + step, 127.0 + step * 0.5 + wiggle)
        })
        .collect()
}

fn bench_build_route(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_route");
    for vertices in [100, 1_000, 10_000] {
        let path = zigzag_path(vertices);
        group.bench_with_input(BenchmarkId::from_parameter(vertices), &path, |b, path| {
            b.iter(|| black_box(build_route(path)));
        });
    }
    group.finish();
}

fn bench_interpolate(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpolate");
    for vertices in [100, 1_000, 10_000] {
        let route = build_route(&zigzag_path(vertices));
        let total = route.total_distance_m();
        group.bench_with_input(
            BenchmarkId::from_parameter(vertices),
            &route,
            |b, route| {
                let mut distance = 0.0;
                b.iter(|| {
                    distance = (distance + total / 97.0) % total;
                    black_box(interpolate(route.segments(), distance))
                });
            },
        );
    }
    group.finish();
}

fn bench_playback_frames(c: &mut Criterion) {
    let path = zigzag_path(2_000);
    let provider = ScriptedDirections::new(path.clone());

    c.bench_function("playback_60fps_frames", |b| {
        b.iter(|| {
            let (mut controller, time) = manual_controller(120.0);
            controller.set_start_point(path[0]);
            if let Some(request) = controller.set_end_point(path[path.len() - 1]) {
                controller.resolve_with(&provider, request);
            }
            controller.play();
            for _ in 0..600 {
                time.advance_secs(1.0 / 60.0);
                black_box(controller.tick());
            }
        });
    });
}

criterion_group!(
    benches,
    bench_build_route,
    bench_interpolate,
    bench_playback_frames
);
criterion_main!(benches);
