// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for the hit-test service over a synthetic document:
//! index builds, pick storms, marquee queries, incremental updates,
//! and canvas-mode round trips.

use std::collections::HashMap;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use easel_hit::{
    CanvasMode, Element, ElementFlags, ElementId, ElementKind, HitTester, Population,
    PopulationEvent,
};
use kurbo::Rect;

struct Item {
    id: ElementId,
    kind: ElementKind,
    bounds: Rect,
}

impl Element for Item {
    fn id(&self) -> &ElementId {
        &self.id
    }
    fn kind(&self) -> ElementKind {
        self.kind
    }
    fn flags(&self) -> ElementFlags {
        ElementFlags::default()
    }
    fn bounds(&self) -> Rect {
        self.bounds
    }
    fn parent(&self) -> Option<&ElementId> {
        None
    }
}

struct Doc {
    items: Vec<Item>,
    index: HashMap<ElementId, usize>,
}

impl Doc {
    fn new(items: Vec<Item>) -> Self {
        let index = items
            .iter()
            .enumerate()
            .map(|(i, item)| (item.id.clone(), i))
            .collect();
        Self { items, index }
    }
}

impl Population for Doc {
    type Elem = Item;

    fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    fn by_id(&self, id: &ElementId) -> Option<&Item> {
        self.index.get(id).map(|&i| &self.items[i])
    }
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

/// Scattered document with a script node every 7th element and a
/// variant root every 11th, roughly the mix of a busy design file.
fn gen_doc(count: usize, extent: f64) -> Doc {
    let mut rng = Rng::new(0xE5E1_CAFE_D0C5_0001);
    let mut items = Vec::with_capacity(count);
    for i in 0..count {
        let x = rng.next_f64() * extent;
        let y = rng.next_f64() * extent;
        let w = 8.0 + rng.next_f64() * 56.0;
        let h = 8.0 + rng.next_f64() * 56.0;
        let kind = if i % 7 == 0 {
            ElementKind::Node
        } else if i % 11 == 0 {
            ElementKind::Variant
        } else {
            ElementKind::Shape
        };
        items.push(Item {
            id: ElementId::new(format!("el-{i}")),
            kind,
            bounds: Rect::new(x, y, x + w, y + h),
        });
    }
    Doc::new(items)
}

fn ready_tester(doc: &Doc) -> HitTester {
    let mut tester = HitTester::new();
    tester.set_population(doc);
    tester
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_service_build");
    for &count in &[1024usize, 4096] {
        let doc = gen_doc(count, 4000.0);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("set_population_n{count}"), |b| {
            b.iter_batched(
                HitTester::new,
                |mut tester| {
                    tester.set_population(&doc);
                    black_box(tester.index_stats().entries);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_point_picks(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_service_pick");
    let doc = gen_doc(4096, 4000.0);
    group.throughput(Throughput::Elements(256));
    group.bench_function("hit_test_256_probes", |b| {
        b.iter_batched(
            || ready_tester(&doc),
            |mut tester| {
                let mut found = 0usize;
                for q in 0..256u32 {
                    let x = f64::from(q % 16) * 250.0 + 10.0;
                    let y = f64::from(q / 16) * 250.0 + 10.0;
                    if tester.hit_test_xy(x, y, &doc).is_some() {
                        found += 1;
                    }
                }
                black_box(found);
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_marquee(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_service_marquee");
    let doc = gen_doc(4096, 4000.0);
    group.throughput(Throughput::Elements(16));
    group.bench_function("elements_in_rect_16_windows", |b| {
        b.iter_batched(
            || ready_tester(&doc),
            |mut tester| {
                let mut total = 0usize;
                for q in 0..16u32 {
                    let x0 = f64::from(q % 4) * 1000.0;
                    let y0 = f64::from(q / 4) * 1000.0;
                    let window = Rect::new(x0, y0, x0 + 800.0, y0 + 800.0);
                    total += tester.elements_in_rect(window, &doc).len();
                }
                black_box(total);
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_update_storm(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_service_update");
    let count = 4096usize;
    group.throughput(Throughput::Elements((count / 8) as u64));
    group.bench_function("move_every_eighth", |b| {
        b.iter_batched(
            || {
                let doc = gen_doc(count, 4000.0);
                let tester = ready_tester(&doc);
                (tester, doc)
            },
            |(mut tester, mut doc)| {
                for i in (0..count).step_by(8) {
                    let old = doc.items[i].bounds;
                    doc.items[i].bounds =
                        Rect::new(old.x0 + 3.0, old.y0 + 2.0, old.x1 + 3.0, old.y1 + 2.0);
                    let id = doc.items[i].id.clone();
                    tester.apply(&PopulationEvent::Updated(id), &doc);
                }
                black_box(tester.hit_test_xy(2000.0, 2000.0, &doc));
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_mode_switch(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_service_mode");
    let doc = gen_doc(2048, 3000.0);
    group.throughput(Throughput::Elements(8));
    group.bench_function("design_script_round_trips", |b| {
        b.iter_batched(
            || ready_tester(&doc),
            |mut tester| {
                for _ in 0..4 {
                    tester.set_canvas_mode(CanvasMode::Script, &doc);
                    tester.set_canvas_mode(CanvasMode::Design, &doc);
                }
                black_box(tester.rebuild_epoch());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_build,
    bench_point_picks,
    bench_marquee,
    bench_update_storm,
    bench_mode_switch
);
criterion_main!(benches);
