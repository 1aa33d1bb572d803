use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mindfull_bench::util;
use mindfull_canvas::{AnimationSettings, ParticleEngine};
use std::hint::black_box;

fn bench_animation_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("animation_tick");
    for node_count in [10usize, 100, 1000] {
        let (nodes, mut graph) = util::generate_constellation(node_count).unwrap();
        let mut engine = ParticleEngine::new(AnimationSettings::default());

        group.bench_with_input(
            BenchmarkId::from_parameter(node_count),
            &node_count,
            |b, _| {
                b.iter(|| {
                    let animated = engine.tick(black_box(&nodes), &mut graph);
                    black_box(animated);
                })
            },
        );
    }
    group.finish();
}

fn bench_refresh_geometry(c: &mut Criterion) {
    let (nodes, mut graph) = util::generate_constellation(1000).unwrap();
    let engine = ParticleEngine::new(AnimationSettings::default());

    c.bench_function("refresh_geometry_1000_nodes", |b| {
        b.iter(|| engine.refresh_geometry(black_box(&nodes), &mut graph))
    });
}

criterion_group!(benches, bench_animation_tick, bench_refresh_geometry);
criterion_main!(benches);
