// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canvas modes.
//!
//! One document, three pick policies: Design mode hides variant
//! subtrees and the script graph, Script mode sees only the graph, and
//! Variant mode sees only variant subtrees.
//!
//! Run:
//! - `cargo run -p easel_demos --example canvas_modes`

use easel_hit::{
    CanvasMode, Element, ElementFlags, ElementId, ElementKind, HitTester, Population,
};
use kurbo::Rect;

struct Item {
    id: ElementId,
    kind: ElementKind,
    parent: Option<ElementId>,
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
        self.parent.as_ref()
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

fn item(id: &str, kind: ElementKind, parent: Option<&str>, bounds: Rect) -> Item {
    Item {
        id: ElementId::new(id),
        kind,
        parent: parent.map(ElementId::new),
        bounds,
    }
}

fn main() {
    let doc = Doc(vec![
        item(
            "canvas-frame",
            ElementKind::Frame,
            None,
            Rect::new(0.0, 0.0, 200.0, 200.0),
        ),
        item(
            "variant-root",
            ElementKind::Variant,
            None,
            Rect::new(300.0, 300.0, 500.0, 500.0),
        ),
        item(
            "variant-label",
            ElementKind::Text,
            Some("variant-root"),
            Rect::new(320.0, 320.0, 380.0, 380.0),
        ),
        item(
            "logic-node",
            ElementKind::Node,
            None,
            Rect::new(0.0, 0.0, 80.0, 40.0),
        ),
    ]);

    let mut tester = HitTester::new();
    tester.set_population(&doc);

    // Design mode: frames pick, variant subtrees and script nodes do not.
    let on_frame = tester.hit_test_xy(40.0, 20.0, &doc);
    let on_variant = tester.hit_test_xy(340.0, 340.0, &doc);
    println!("== Design ==\n  over frame: {on_frame:?}\n  over variant: {on_variant:?}");
    assert_eq!(on_frame, Some(ElementId::new("canvas-frame")));
    assert_eq!(on_variant, None);

    // Script mode: only the graph shows.
    tester.set_canvas_mode(CanvasMode::Script, &doc);
    let on_node = tester.hit_test_xy(40.0, 20.0, &doc);
    let on_design = tester.hit_test_xy(150.0, 150.0, &doc);
    println!("== Script ==\n  over node: {on_node:?}\n  over frame: {on_design:?}");
    assert_eq!(on_node, Some(ElementId::new("logic-node")));
    assert_eq!(on_design, None);

    // Variant mode: variant roots and their descendants take over.
    tester.set_canvas_mode(CanvasMode::Variant, &doc);
    let on_label = tester.hit_test_xy(340.0, 340.0, &doc);
    let off_variant = tester.hit_test_xy(150.0, 150.0, &doc);
    println!("== Variant ==\n  over label: {on_label:?}\n  over frame: {off_variant:?}");
    assert_eq!(on_label, Some(ElementId::new("variant-label")));
    assert_eq!(off_variant, None);
}
