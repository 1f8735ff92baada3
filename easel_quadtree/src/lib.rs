// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easel Quad Tree: a bounded quad tree for canvas hit testing.
//!
//! The tree covers a fixed world rectangle and stores axis-aligned bounding
//! boxes with user payloads.
//!
//! - Nodes subdivide into four equal quadrants once they hold more than a
//!   configurable number of entries (four by default), down to a fixed depth
//!   limit of [`MAX_DEPTH`].
//! - An entry that straddles a quadrant boundary stays at the node it was
//!   inserted into, so every entry lives in exactly one node list.
//! - Queries by point or by intersecting rectangle prune whole subtrees whose
//!   quadrant cannot match.
//!
//! Coordinates are `f64` via [`kurbo::Rect`] and [`kurbo::Point`], and all
//! containment and intersection tests are boundary-inclusive. The tree
//! assumes finite coordinates (no NaNs).
//!
//! # Example
//!
//! ```rust
//! use easel_quadtree::QuadTree;
//! use kurbo::{Point, Rect};
//!
//! // Cover the canvas and add two rectangles.
//! let mut tree: QuadTree<u32> = QuadTree::new(Rect::new(0.0, 0.0, 100.0, 100.0));
//! assert!(tree.insert(Rect::new(10.0, 10.0, 30.0, 30.0), 1));
//! assert!(tree.insert(Rect::new(20.0, 20.0, 60.0, 60.0), 2));
//!
//! // Point queries return every entry whose rectangle contains the point.
//! let mut hits: Vec<u32> = tree.query_point(Point::new(25.0, 25.0)).collect();
//! hits.sort_unstable();
//! assert_eq!(hits, [1, 2]);
//!
//! // Entries that do not fit the covered area are rejected, and that is the
//! // only way an insert can fail.
//! assert!(!tree.insert(Rect::new(90.0, 90.0, 120.0, 120.0), 3));
//! assert_eq!(tree.len(), 2);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod geom;
pub mod tree;

pub use tree::{DEFAULT_NODE_CAPACITY, MAX_DEPTH, QuadTree, Stats};
