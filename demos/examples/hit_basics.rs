// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit-test basics.
//!
//! Build a small document, pick the topmost element under a point, and
//! watch a removal expose the frame underneath.
//!
//! Run:
//! - `cargo run -p easel_demos --example hit_basics`

use easel_hit::{
    Element, ElementFlags, ElementId, ElementKind, HitTester, Population, PopulationEvent,
};
use kurbo::{Point, Rect};

struct Item {
    id: ElementId,
    bounds: Rect,
}

impl Element for Item {
    fn id(&self) -> &ElementId {
        &self.id
    }
    fn kind(&self) -> ElementKind {
        ElementKind::Frame
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

impl Population for Doc {
    type Elem = Item;
    fn iter(&self) -> impl Iterator<Item = &Item> {
        self.0.iter()
    }
    fn by_id(&self, id: &ElementId) -> Option<&Item> {
        self.0.iter().find(|item| &item.id == id)
    }
}

fn frame(id: &str, x: f64, y: f64, w: f64, h: f64) -> Item {
    Item {
        id: ElementId::new(id),
        bounds: Rect::new(x, y, x + w, y + h),
    }
}

fn main() {
    // Population order is back to front: frame-two draws over frame-one.
    let mut doc = Doc(vec![
        frame("frame-one", 0.0, 0.0, 100.0, 100.0),
        frame("frame-two", 50.0, 50.0, 150.0, 150.0),
    ]);

    let mut tester = HitTester::new();
    tester.set_population(&doc);

    // Both frames cover (60, 60); the later one wins.
    let hit = tester.hit_test(Point::new(60.0, 60.0), &doc);
    println!("== Pick ==\n  hit at (60, 60): {hit:?}");
    assert_eq!(hit, Some(ElementId::new("frame-two")));
    assert_eq!(tester.hit_test(Point::new(400.0, 400.0), &doc), None);

    // Every element under the point, top to bottom.
    let stack = tester.elements_at(Point::new(60.0, 60.0), &doc);
    println!("== Stack ==\n  at (60, 60): {stack:?}");
    assert_eq!(stack.len(), 2);

    // Remove the top frame; the point now reaches frame-one.
    doc.0.retain(|item| item.id.as_str() != "frame-two");
    tester.apply(&PopulationEvent::Removed(ElementId::new("frame-two")), &doc);
    let hit = tester.hit_test(Point::new(60.0, 60.0), &doc);
    println!("== After removal ==\n  hit at (60, 60): {hit:?}");
    assert_eq!(hit, Some(ElementId::new("frame-one")));

    // A marquee returns everything its rectangle touches.
    let grabbed = tester.elements_in_rect(Rect::new(0.0, 0.0, 300.0, 300.0), &doc);
    println!("== Marquee ==\n  grabbed: {grabbed:?}");
    assert_eq!(grabbed, vec![ElementId::new("frame-one")]);
}
