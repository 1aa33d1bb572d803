use criterion::{Criterion, criterion_group, criterion_main};
use mindfull_bench::util;
use mindfull_canvas::HitTester;
use mindfull_core::Vec2;
use std::hint::black_box;

fn bench_hit_test_1000_nodes(c: &mut Criterion) {
    let (nodes, graph) = util::generate_constellation(1000).unwrap();
    let tester = HitTester::default();
    let viewport = util::viewport_for(1000);
    let points: Vec<Vec2> = (0..64)
        .map(|i| {
            let x = viewport.x * (i as f32 / 64.0);
            let y = viewport.y * ((i * 7 % 64) as f32 / 64.0);
            Vec2::new(x, y)
        })
        .collect();

    c.bench_function("hit_test_1000_nodes", |b| {
        b.iter(|| {
            for point in &points {
                black_box(tester.hit_test(&nodes, &graph, black_box(*point)));
            }
        })
    });
}

criterion_group!(benches, bench_hit_test_1000_nodes);
criterion_main!(benches);
