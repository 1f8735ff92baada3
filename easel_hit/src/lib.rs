// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easel Hit: mode-aware hit testing for a 2D design canvas.
//!
//! Given a point or rectangle in canvas coordinates, [`HitTester`] answers
//! which elements occupy it, topmost first, while the element population
//! mutates continuously during editing.
//!
//! - Elements reach the tester through the read-only [`Element`] and
//!   [`Population`] traits; the tester stores string identifiers only and
//!   never owns element state.
//! - A [`CanvasMode`] policy decides which elements participate: design
//!   elements, script-graph nodes and edges, or component-variant subtrees.
//! - Candidates come from a bounded quad tree ([`easel_quadtree`]) that is
//!   maintained incrementally from [`PopulationEvent`]s and rebuilt on bounds
//!   overflow, with a polled [`rebuild_epoch`](HitTester::rebuild_epoch) to
//!   observe full rebuilds.
//! - Z-order follows population order: later elements draw on top and win
//!   picks. The tester never sorts by geometry.
//!
//! # Example
//!
//! ```rust
//! use easel_hit::{Element, ElementFlags, ElementId, ElementKind, HitTester, Population};
//! use kurbo::{Point, Rect};
//!
//! struct Item {
//!     id: ElementId,
//!     bounds: Rect,
//! }
//!
//! impl Element for Item {
//!     fn id(&self) -> &ElementId {
//!         &self.id
//!     }
//!     fn kind(&self) -> ElementKind {
//!         ElementKind::Frame
//!     }
//!     fn flags(&self) -> ElementFlags {
//!         ElementFlags::default()
//!     }
//!     fn bounds(&self) -> Rect {
//!         self.bounds
//!     }
//!     fn parent(&self) -> Option<&ElementId> {
//!         None
//!     }
//! }
//!
//! struct Doc(Vec<Item>);
//!
//! impl Population for Doc {
//!     type Elem = Item;
//!     fn iter(&self) -> impl Iterator<Item = &Item> {
//!         self.0.iter()
//!     }
//!     fn by_id(&self, id: &ElementId) -> Option<&Item> {
//!         self.0.iter().find(|item| item.id() == id)
//!     }
//! }
//!
//! let doc = Doc(vec![
//!     Item { id: ElementId::new("back"), bounds: Rect::new(0.0, 0.0, 100.0, 100.0) },
//!     Item { id: ElementId::new("front"), bounds: Rect::new(25.0, 25.0, 75.0, 75.0) },
//! ]);
//!
//! let mut tester = HitTester::new();
//! tester.set_population(&doc);
//!
//! // The later element draws on top and wins the pick.
//! assert_eq!(
//!     tester.hit_test(Point::new(50.0, 50.0), &doc),
//!     Some(ElementId::new("front"))
//! );
//! assert_eq!(
//!     tester.hit_test(Point::new(10.0, 10.0), &doc),
//!     Some(ElementId::new("back"))
//! );
//! assert_eq!(tester.hit_test(Point::new(-20.0, -20.0), &doc), None);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod element;
pub mod filter;
pub mod service;

pub use element::{Element, ElementFlags, ElementId, ElementKind, Population, PopulationEvent};
pub use filter::{CanvasMode, has_variant_ancestor, is_testable};
pub use service::HitTester;
