//! Benchmarks for drag placement on a stacked station.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use stackdock::prelude::*;
use stackdock::{DefaultTabStrip, DisplayerId, PlacementResolver};
use stackdock_core::profiling::{ProfilingBackend, init_profiling, new_frame};

fn strip_with(tabs: usize) -> DefaultTabStrip {
    let mut strip = DefaultTabStrip::new(StackStyle::default());
    strip.set_bounds(LayoutRect::new(0.0, 0.0, tabs as f32 * 80.0, 22.0));
    for i in 0..tabs {
        strip.add_tab(&format!("tab {i}"), None, DisplayerId(i));
    }
    strip
}

fn bench_tab_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("tab_index_at");

    for tabs in [4, 32, 256] {
        let strip = strip_with(tabs);
        let last = strip.tab_bounds(tabs - 1).unwrap_or_default();
        let point = Vec2::new(last.right() - 1.0, 11.0);

        group.throughput(Throughput::Elements(tabs as u64));
        group.bench_with_input(BenchmarkId::new("last_tab", tabs), &strip, |b, strip| {
            b.iter(|| PlacementResolver::tab_index_at(strip, tabs, black_box(point)));
        });
    }

    group.finish();
}

fn bench_prepare_drop(c: &mut Criterion) {
    init_profiling(ProfilingBackend::InProcess);

    let mut tree = DockTree::new(DockConfig::default());
    let stack = tree.insert_stack(Panel::new("stack"));
    let panels: Vec<PanelId> = (0..32)
        .map(|i| tree.insert_panel(Panel::new(format!("panel {i}"))))
        .collect();
    let dragged = tree.insert_panel(Panel::new("dragged"));
    tree.with_stack(stack, |station, tree| {
        station.set_bounds(tree, LayoutRect::new(0.0, 0.0, 4000.0, 600.0));
        for &panel in &panels {
            station.drop_append(tree, panel)?;
        }
        Ok(())
    })
    .unwrap();

    c.bench_function("prepare_drop_32_tabs", |b| {
        b.iter(|| {
            new_frame();
            tree.with_stack(stack, |station, tree| {
                Ok(station.prepare_drop(tree, black_box(Vec2::new(1500.0, 10.0)), dragged))
            })
            .unwrap()
        });
    });
}

criterion_group!(benches, bench_tab_hit, bench_prepare_drop);
criterion_main!(benches);
