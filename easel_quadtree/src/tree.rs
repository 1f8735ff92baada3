// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A bounded quad tree over axis-aligned rectangles.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};
use core::mem;

use kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::geom;

/// Number of entries a node holds before it subdivides, unless overridden
/// with [`QuadTree::with_node_capacity`].
pub const DEFAULT_NODE_CAPACITY: usize = 4;

/// Maximum node depth. Nodes at this depth never subdivide; the root is at
/// depth zero.
pub const MAX_DEPTH: usize = 8;

/// Occupancy counters for a [`QuadTree`], as reported by [`QuadTree::stats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    /// Total number of nodes, including empty ones.
    pub nodes: usize,
    /// Total number of stored entries across all nodes.
    pub entries: usize,
    /// Depth of the deepest node. Zero for a tree that never subdivided.
    pub max_depth: usize,
}

struct Node<P> {
    bounds: Rect,
    entries: SmallVec<[(Rect, P); DEFAULT_NODE_CAPACITY]>,
    children: Option<Box<[Node<P>; 4]>>,
}

impl<P> Node<P> {
    fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            entries: SmallVec::new(),
            children: None,
        }
    }

    fn insert(&mut self, depth: usize, capacity: usize, rect: Rect, payload: P) {
        if self.children.is_none() && depth < MAX_DEPTH && self.entries.len() >= capacity {
            self.subdivide();
        }
        if let Some(children) = &mut self.children {
            if let Some(q) = geom::quadrant_of(self.bounds, rect) {
                children[q].insert(depth + 1, capacity, rect, payload);
                return;
            }
        }
        self.entries.push((rect, payload));
    }

    /// Splits the node and pushes down every entry that fits entirely in one
    /// quadrant. Straddlers stay here.
    fn subdivide(&mut self) {
        let mut children = Box::new(geom::quadrant_rects(self.bounds).map(Self::new));
        for (rect, payload) in mem::take(&mut self.entries) {
            match geom::quadrant_of(self.bounds, rect) {
                Some(q) => children[q].entries.push((rect, payload)),
                None => self.entries.push((rect, payload)),
            }
        }
        self.children = Some(children);
    }

    fn remove(&mut self, payload: &P) -> bool
    where
        P: PartialEq,
    {
        if let Some(i) = self.entries.iter().position(|(_, p)| p == payload) {
            self.entries.remove(i);
            return true;
        }
        if let Some(children) = &mut self.children {
            for child in children.iter_mut() {
                if child.remove(payload) {
                    return true;
                }
            }
        }
        false
    }

    fn collect_point(&self, pt: Point, out: &mut Vec<P>)
    where
        P: Copy,
    {
        if !geom::contains_point(self.bounds, pt) {
            return;
        }
        for (rect, payload) in &self.entries {
            if geom::contains_point(*rect, pt) {
                out.push(*payload);
            }
        }
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.collect_point(pt, out);
            }
        }
    }

    fn collect_rect(&self, rect: Rect, out: &mut Vec<P>)
    where
        P: Copy,
    {
        if !geom::intersects(self.bounds, rect) {
            return;
        }
        for (entry_rect, payload) in &self.entries {
            if geom::intersects(*entry_rect, rect) {
                out.push(*payload);
            }
        }
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.collect_rect(rect, out);
            }
        }
    }

    fn accumulate(&self, depth: usize, stats: &mut Stats) {
        stats.nodes += 1;
        stats.entries += self.entries.len();
        stats.max_depth = stats.max_depth.max(depth);
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.accumulate(depth + 1, stats);
            }
        }
    }
}

/// A quad tree over a fixed world rectangle.
///
/// Each entry is an axis-aligned rectangle with a payload. A node subdivides
/// into four equal quadrants once it holds more than its capacity, up to
/// [`MAX_DEPTH`]; entries that straddle a center line stay at the node that
/// subdivided, so every entry lives in exactly one node.
///
/// Entries must fit entirely inside the world rectangle. [`QuadTree::insert`]
/// rejects anything else and that is the only way an insert can fail.
pub struct QuadTree<P> {
    root: Node<P>,
    capacity: usize,
    len: usize,
}

impl<P> QuadTree<P> {
    /// Creates an empty tree over `bounds` with [`DEFAULT_NODE_CAPACITY`].
    pub fn new(bounds: Rect) -> Self {
        Self::with_node_capacity(bounds, DEFAULT_NODE_CAPACITY)
    }

    /// Creates an empty tree over `bounds` that subdivides nodes holding more
    /// than `capacity` entries. A capacity of zero is treated as one.
    pub fn with_node_capacity(bounds: Rect, capacity: usize) -> Self {
        Self {
            root: Node::new(bounds),
            capacity: capacity.max(1),
            len: 0,
        }
    }

    /// The world rectangle this tree covers.
    pub fn bounds(&self) -> Rect {
        self.root.bounds
    }

    /// The per-node entry capacity.
    pub fn node_capacity(&self) -> usize {
        self.capacity
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree stores no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts `rect` with `payload`.
    ///
    /// Returns `false` without storing anything if `rect` does not fit
    /// entirely inside [`Self::bounds`] (edges included). Everything that
    /// fits is accepted, including zero-area rectangles and duplicate
    /// payloads.
    pub fn insert(&mut self, rect: Rect, payload: P) -> bool {
        if !geom::contains_rect(self.root.bounds, rect) {
            return false;
        }
        self.root.insert(0, self.capacity, rect, payload);
        self.len += 1;
        true
    }

    /// Removes the first entry whose payload equals `payload`, searching each
    /// node's own list before its children. Returns whether one was found.
    pub fn remove(&mut self, payload: &P) -> bool
    where
        P: PartialEq,
    {
        let removed = self.root.remove(payload);
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Payloads of all entries whose rectangle contains `pt`, edges included.
    ///
    /// Order is unspecified.
    pub fn query_point(&self, pt: Point) -> impl Iterator<Item = P> + '_
    where
        P: Copy,
    {
        let mut out = Vec::new();
        self.root.collect_point(pt, &mut out);
        out.into_iter()
    }

    /// Payloads of all entries whose rectangle intersects `rect`, shared
    /// edges included.
    ///
    /// Order is unspecified.
    pub fn query_rect(&self, rect: Rect) -> impl Iterator<Item = P> + '_
    where
        P: Copy,
    {
        let mut out = Vec::new();
        self.root.collect_rect(rect, &mut out);
        out.into_iter()
    }

    /// Drops all entries and re-populates the tree over a new world
    /// rectangle, keeping the node capacity.
    ///
    /// Entries that do not fit inside `bounds` are skipped, exactly as
    /// [`Self::insert`] would skip them.
    pub fn rebuild(&mut self, bounds: Rect, entries: impl IntoIterator<Item = (Rect, P)>) {
        self.root = Node::new(bounds);
        self.len = 0;
        for (rect, payload) in entries {
            let _ = self.insert(rect, payload);
        }
    }

    /// Drops all entries, keeping bounds and node capacity.
    pub fn clear(&mut self) {
        self.root = Node::new(self.root.bounds);
        self.len = 0;
    }

    /// Walks the tree and counts nodes, entries, and the deepest level.
    pub fn stats(&self) -> Stats {
        let mut stats = Stats::default();
        self.root.accumulate(0, &mut stats);
        stats
    }
}

impl<P> Debug for QuadTree<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let stats = self.stats();
        f.debug_struct("QuadTree")
            .field("bounds", &self.root.bounds)
            .field("node_capacity", &self.capacity)
            .field("len", &self.len)
            .field("nodes", &stats.nodes)
            .field("max_depth", &stats.max_depth)
            .finish_non_exhaustive()
    }
}
