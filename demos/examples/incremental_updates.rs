// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Incremental index maintenance.
//!
//! Small moves patch the spatial index in place; a move outside the
//! indexed region forces a full rebuild, visible through the rebuild
//! epoch counter.
//!
//! Run:
//! - `cargo run -p easel_demos --example incremental_updates`

use easel_hit::{
    Element, ElementFlags, ElementId, ElementKind, HitTester, Population, PopulationEvent,
};
use kurbo::Rect;

struct Item {
    id: ElementId,
    bounds: Rect,
}

impl Element for Item {
    fn id(&self) -> &ElementId {
        &self.id
    }
    fn kind(&self) -> ElementKind {
        ElementKind::Shape
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

struct Doc(Vec<Item>);

impl Doc {
    fn move_to(&mut self, id: &str, x: f64, y: f64) -> ElementId {
        let item = self
            .0
            .iter_mut()
            .find(|item| item.id.as_str() == id)
            .expect("known card");
        let size = item.bounds.size();
        item.bounds = Rect::new(x, y, x + size.width, y + size.height);
        item.id.clone()
    }
}

impl Population for Doc {
    type Elem = Item;
    fn iter(&self) -> impl Iterator<Item = &Item> {
        self.0.iter()
    }
    fn by_id(&self, id: &ElementId) -> Option<&Item> {
        self.0.iter().find(|item| &item.id == id)
    }
}

fn main() {
    // A row of cards, 80x60 each, 10 apart.
    let mut doc = Doc(
        (0..5)
            .map(|i| {
                let x = f64::from(i) * 90.0;
                Item {
                    id: ElementId::new(format!("card-{i}")),
                    bounds: Rect::new(x, 100.0, x + 80.0, 160.0),
                }
            })
            .collect(),
    );

    let mut tester = HitTester::new();
    tester.set_population(&doc);
    println!("== Initial ==");
    println!("  epoch:  {}", tester.rebuild_epoch());
    println!("  region: {:?}", tester.index_bounds());
    println!("  stats:  {:?}", tester.index_stats());
    assert_eq!(tester.rebuild_epoch(), 1);

    // Nudge a card; the padded region absorbs it without a rebuild.
    let id = doc.move_to("card-2", 220.0, 100.0);
    tester.apply(&PopulationEvent::Updated(id), &doc);
    println!("== After nudge ==");
    println!("  epoch: {}", tester.rebuild_epoch());
    assert_eq!(tester.rebuild_epoch(), 1);
    assert_eq!(
        tester.hit_test_xy(230.0, 130.0, &doc),
        Some(ElementId::new("card-2"))
    );
    assert_eq!(tester.hit_test_xy(190.0, 130.0, &doc), None);

    // Fling it far outside the indexed region; the index rebuilds
    // around the new extent.
    let id = doc.move_to("card-2", 5000.0, 100.0);
    tester.apply(&PopulationEvent::Updated(id), &doc);
    println!("== After fling ==");
    println!("  epoch:  {}", tester.rebuild_epoch());
    println!("  region: {:?}", tester.index_bounds());
    assert_eq!(tester.rebuild_epoch(), 2);
    assert_eq!(
        tester.hit_test_xy(5010.0, 130.0, &doc),
        Some(ElementId::new("card-2"))
    );
}
