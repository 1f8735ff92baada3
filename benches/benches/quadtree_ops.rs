// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for the core quad tree: bulk builds, point and rect
//! queries, and removal under grid, overlapping, and clustered loads.

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use easel_quadtree::QuadTree;
use kurbo::{Point, Rect};

/// Axis-aligned `n x n` grid of non-overlapping cells.
fn gen_grid_rects(n: usize, cell: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Rect::new(x0, y0, x0 + cell, y0 + cell));
        }
    }
    out
}

/// Grid whose cells are scaled up so neighbors overlap; `scale > 1`
/// produces straddlers that refuse to sink into a single quadrant.
fn gen_overlap_grid_rects(n: usize, cell: f64, scale: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n * n);
    let w = cell * scale;
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Rect::new(x0, y0, x0 + w, y0 + w));
        }
    }
    out
}

/// Small deterministic xorshift so benchmark inputs are stable across runs.
#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64();
        (v >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Tight clusters of small rects with empty space between them, the
/// shape of a canvas holding a handful of dense component groups.
fn gen_clustered_rects(clusters: usize, per_cluster: usize, extent: f64, spread: f64) -> Vec<Rect> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    let mut out = Vec::with_capacity(clusters * per_cluster);
    for _ in 0..clusters {
        let cx = rng.next_f64() * extent;
        let cy = rng.next_f64() * extent;
        for _ in 0..per_cluster {
            let x0 = cx + (rng.next_f64() - 0.5) * spread;
            let y0 = cy + (rng.next_f64() - 0.5) * spread;
            let w = 4.0 + rng.next_f64() * 12.0;
            let h = 4.0 + rng.next_f64() * 12.0;
            out.push(Rect::new(x0, y0, x0 + w, y0 + h));
        }
    }
    out
}

fn world_for(rects: &[Rect]) -> Rect {
    let mut world = Rect::new(0.0, 0.0, 1.0, 1.0);
    for r in rects {
        world = world.union(*r);
    }
    world
}

fn build_tree(world: Rect, rects: &[Rect]) -> QuadTree<u32> {
    let mut tree = QuadTree::new(world);
    for (i, r) in rects.iter().copied().enumerate() {
        let _ = tree.insert(r, i as u32);
    }
    tree
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_build");
    for &n in &[32usize, 64, 128] {
        let rects = gen_grid_rects(n, 10.0);
        let world = world_for(&rects);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("grid_insert_n{n}"), |b| {
            b.iter_batched(
                || QuadTree::<u32>::new(world),
                |mut tree| {
                    for (i, r) in rects.iter().copied().enumerate() {
                        let _ = tree.insert(r, i as u32);
                    }
                    black_box(tree.stats().nodes);
                },
                BatchSize::SmallInput,
            );
        });
    }

    let rects = gen_overlap_grid_rects(64, 10.0, 3.0);
    let world = world_for(&rects);
    group.throughput(Throughput::Elements((64 * 64) as u64));
    group.bench_function("overlap_insert_n64", |b| {
        b.iter_batched(
            || QuadTree::<u32>::new(world),
            |mut tree| {
                for (i, r) in rects.iter().copied().enumerate() {
                    let _ = tree.insert(r, i as u32);
                }
                black_box(tree.stats().entries);
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_point_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_query_point");
    let rects = gen_grid_rects(128, 8.0);
    let world = world_for(&rects);
    group.throughput(Throughput::Elements(256));
    group.bench_function("grid_256_probes", |b| {
        b.iter_batched(
            || build_tree(world, &rects),
            |tree| {
                let mut total = 0usize;
                for q in 0..256u32 {
                    let x = f64::from(q % 16) * 64.0 + 3.0;
                    let y = f64::from(q / 16) * 64.0 + 3.0;
                    total += tree.query_point(Point::new(x, y)).count();
                }
                black_box(total);
            },
            BatchSize::SmallInput,
        );
    });

    let rects = gen_clustered_rects(12, 400, 5000.0, 160.0);
    let world = world_for(&rects);
    group.throughput(Throughput::Elements(256));
    group.bench_function("clustered_256_probes", |b| {
        b.iter_batched(
            || build_tree(world, &rects),
            |tree| {
                let mut rng = Rng::new(0x0DD_BA11_5EED);
                let mut total = 0usize;
                for _ in 0..256 {
                    let x = rng.next_f64() * 5000.0;
                    let y = rng.next_f64() * 5000.0;
                    total += tree.query_point(Point::new(x, y)).count();
                }
                black_box(total);
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_rect_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_query_rect");
    let rects = gen_grid_rects(128, 8.0);
    let world = world_for(&rects);
    group.throughput(Throughput::Elements(64));
    group.bench_function("grid_64_windows", |b| {
        b.iter_batched(
            || build_tree(world, &rects),
            |tree| {
                let mut total = 0usize;
                for q in 0..64u32 {
                    let x0 = f64::from(q % 8) * 128.0;
                    let y0 = f64::from(q / 8) * 128.0;
                    let window = Rect::new(x0, y0, x0 + 96.0, y0 + 96.0);
                    total += tree.query_rect(window).count();
                }
                black_box(total);
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_remove");
    let rects = gen_grid_rects(64, 10.0);
    let world = world_for(&rects);
    group.throughput(Throughput::Elements((64 * 64 / 2) as u64));
    group.bench_function("remove_half_then_query", |b| {
        b.iter_batched(
            || build_tree(world, &rects),
            |mut tree| {
                for i in (0..64u32 * 64).step_by(2) {
                    let _ = tree.remove(&i);
                }
                let hits = tree.query_rect(Rect::new(0.0, 0.0, 320.0, 320.0)).count();
                black_box(hits);
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_rebuild");
    let rects = gen_clustered_rects(8, 512, 4000.0, 200.0);
    let world = world_for(&rects);
    group.throughput(Throughput::Elements(rects.len() as u64));
    group.bench_function("clustered_4096", |b| {
        b.iter_batched(
            || QuadTree::<u32>::new(world),
            |mut tree| {
                tree.rebuild(
                    world,
                    rects.iter().copied().enumerate().map(|(i, r)| (r, i as u32)),
                );
                black_box(tree.len());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_build,
    bench_point_queries,
    bench_rect_queries,
    bench_remove,
    bench_rebuild
);
criterion_main!(benches);
