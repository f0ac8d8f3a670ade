//! Benchmarks for rectangle hit testing.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use stackdock_core::geometry::LayoutRect;
use stackdock_core::math::Vec2;

fn bench_contains(c: &mut Criterion) {
    let mut group = c.benchmark_group("rect_contains");

    for size in [10, 100, 1000] {
        let rects: Vec<LayoutRect> = (0..size)
            .map(|i| LayoutRect::new(i as f32 * 40.0, 0.0, 40.0, 22.0))
            .collect();
        let point = Vec2::new(size as f32 * 40.0 - 1.0, 11.0);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("linear_scan", size), &rects, |b, rects| {
            b.iter(|| rects.iter().position(|r| r.contains(black_box(point))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_contains);
criterion_main!(benches);
