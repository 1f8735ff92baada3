// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The hit-test service: testable-visuals cache, index lifecycle, ranked queries.

use alloc::vec::Vec;
use core::cmp::Reverse;
use core::fmt::{Debug, Formatter};

use hashbrown::HashMap;
use kurbo::{Point, Rect};

use easel_quadtree::{DEFAULT_NODE_CAPACITY, QuadTree, Stats, geom};

use crate::element::{Element, ElementFlags, ElementId, Population, PopulationEvent};
use crate::filter::{self, CanvasMode};

/// Padding added on every side of the union of testable bounds when the
/// indexed region is computed.
const BOUNDS_PADDING: f64 = 500.0;

/// Indexed region used when the population has no testable visuals.
const EMPTY_REGION: Rect = Rect::new(-1000.0, -1000.0, 1000.0, 1000.0);

/// Region around the canvas origin that every indexed region covers, so
/// fresh elements dropped near the origin index cheaply.
const ORIGIN_REGION: Rect = Rect::new(-100.0, -100.0, 100.0, 100.0);

/// What a query is probing for.
#[derive(Copy, Clone)]
enum Probe {
    At(Point),
    Within(Rect),
}

/// Mode-aware hit testing over a lazily maintained spatial index.
///
/// The tester owns a [`QuadTree`] keyed by compact slots and a derived list
/// of testable element ids in population order (the "testable visuals").
/// Both follow the population through [`apply`](Self::apply):
///
/// - every applied event marks the visuals cache stale; the next query
///   refreshes it once, so notification bursts cost one refresh;
/// - geometry updates remove and reinsert single index entries while the new
///   bounds still fit the indexed region, and fall back to a full
///   [`rebuild_index`](Self::rebuild_index) when they do not (bounds
///   overflow is not an error);
/// - every full rebuild bumps [`rebuild_epoch`](Self::rebuild_epoch), which
///   observers poll to notice large-scale index changes.
///
/// Populations are passed by reference to every call; the tester stores
/// element identifiers only, never element state. Unknown identifiers and
/// untestable elements are ignored at every entry point.
pub struct HitTester {
    mode: CanvasMode,
    node_capacity: usize,
    tree: Option<QuadTree<u32>>,
    /// Slot arena resolving tree payloads back to element ids.
    slots: Vec<Option<ElementId>>,
    free_slots: Vec<u32>,
    slot_of: HashMap<ElementId, u32>,
    /// Testable element ids in population order, bottom to top.
    visuals: Vec<ElementId>,
    rank_of: HashMap<ElementId, usize>,
    cache_valid: bool,
    rebuild_epoch: u64,
}

impl HitTester {
    /// Creates a tester in [`CanvasMode::Design`] with the default node
    /// capacity. No index exists until the first query or
    /// [`set_population`](Self::set_population).
    pub fn new() -> Self {
        Self::with_node_capacity(DEFAULT_NODE_CAPACITY)
    }

    /// Creates a tester whose quad-tree nodes subdivide past `capacity`
    /// entries. A capacity of zero is treated as one.
    pub fn with_node_capacity(capacity: usize) -> Self {
        Self {
            mode: CanvasMode::default(),
            node_capacity: capacity.max(1),
            tree: None,
            slots: Vec::new(),
            free_slots: Vec::new(),
            slot_of: HashMap::new(),
            visuals: Vec::new(),
            rank_of: HashMap::new(),
            cache_valid: false,
            rebuild_epoch: 0,
        }
    }

    /// Resets all derived state against `population` and rebuilds the index.
    ///
    /// Route that population's mutation notifications through
    /// [`apply`](Self::apply) afterwards.
    pub fn set_population(&mut self, population: &impl Population) {
        self.cache_valid = false;
        self.rebuild_index(population);
    }

    /// Switches the canvas mode and re-indexes under the new policy.
    /// Setting the current mode again is a no-op.
    pub fn set_canvas_mode(&mut self, mode: CanvasMode, population: &impl Population) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        self.cache_valid = false;
        self.rebuild_index(population);
    }

    /// The active canvas mode.
    pub fn canvas_mode(&self) -> CanvasMode {
        self.mode
    }

    /// The topmost testable element whose precise containment test passes at
    /// `pt`, or `None` over empty canvas.
    pub fn hit_test(&mut self, pt: Point, population: &impl Population) -> Option<ElementId> {
        self.pick(Probe::At(pt), population, ElementFlags::empty())
    }

    /// [`hit_test`](Self::hit_test) for a coordinate pair.
    pub fn hit_test_xy(
        &mut self,
        x: f64,
        y: f64,
        population: &impl Population,
    ) -> Option<ElementId> {
        self.hit_test(Point::new(x, y), population)
    }

    /// As [`hit_test`](Self::hit_test), but skips elements currently flagged
    /// [`ElementFlags::SELECTED`], so hover feedback falls through an active
    /// selection.
    pub fn hit_test_for_hover(
        &mut self,
        pt: Point,
        population: &impl Population,
    ) -> Option<ElementId> {
        self.pick(Probe::At(pt), population, ElementFlags::SELECTED)
    }

    /// Every testable element whose precise containment test passes at `pt`,
    /// top to bottom, each exactly once.
    pub fn elements_at(&mut self, pt: Point, population: &impl Population) -> Vec<ElementId> {
        self.ranked(Probe::At(pt), population)
    }

    /// Every testable element whose current bounding rectangle intersects
    /// `rect` (shared edges included), top to bottom.
    ///
    /// Candidates from the index are re-tested against their current bounds;
    /// no precise containment is involved for rectangle queries.
    pub fn elements_in_rect(
        &mut self,
        rect: Rect,
        population: &impl Population,
    ) -> Vec<ElementId> {
        self.ranked(Probe::Within(rect), population)
    }

    /// Applies one population mutation, invalidating the visuals cache and
    /// routing the event to the matching incremental maintenance call.
    pub fn apply(&mut self, event: &PopulationEvent, population: &impl Population) {
        match event {
            PopulationEvent::Added(id) => self.insert_element(id, population),
            PopulationEvent::Removed(id) => self.remove_element(id),
            PopulationEvent::Updated(id) => self.update_element(id, population),
        }
    }

    /// Indexes a newly added element if it is testable and not indexed yet.
    ///
    /// A failed insert (bounds outside the indexed region, or no index built
    /// yet) falls back to a full rebuild.
    pub fn insert_element(&mut self, id: &ElementId, population: &impl Population) {
        self.cache_valid = false;
        let Some(element) = population.by_id(id) else {
            return;
        };
        if !filter::is_testable(self.mode, element, population) {
            return;
        }
        if self.slot_of.contains_key(id) {
            return;
        }
        let bounds = element.bounds();
        let slot = self.alloc_slot(id);
        if self.tree_insert(bounds, slot) {
            self.slot_of.insert(id.clone(), slot);
        } else {
            self.release_slot(slot);
            self.rebuild_index(population);
        }
    }

    /// Drops an element from the index. Unknown or unindexed ids are ignored.
    pub fn remove_element(&mut self, id: &ElementId) {
        self.cache_valid = false;
        let Some(slot) = self.slot_of.remove(id) else {
            return;
        };
        self.tree_remove(slot);
        self.release_slot(slot);
    }

    /// Re-indexes an element after a geometry, flag, kind, or parent change.
    ///
    /// While the new bounds fit the indexed region this is a cheap remove and
    /// reinsert; otherwise the whole index is rebuilt. Elements that became
    /// untestable are dropped, newly testable ones are inserted, and an id
    /// that vanished from the population is treated as removed.
    pub fn update_element(&mut self, id: &ElementId, population: &impl Population) {
        self.cache_valid = false;
        let Some(element) = population.by_id(id) else {
            self.remove_element(id);
            return;
        };
        let testable = filter::is_testable(self.mode, element, population);
        match (self.slot_of.get(id).copied(), testable) {
            (None, true) => self.insert_element(id, population),
            (Some(_), false) => self.remove_element(id),
            (Some(slot), true) => {
                let bounds = element.bounds();
                let fits = self
                    .tree
                    .as_ref()
                    .is_some_and(|tree| geom::contains_rect(tree.bounds(), bounds));
                if !fits {
                    self.rebuild_index(population);
                    return;
                }
                self.tree_remove(slot);
                if !self.tree_insert(bounds, slot) {
                    self.rebuild_index(population);
                }
            }
            (None, false) => {}
        }
    }

    /// Rebuilds the index from scratch: recomputes the visuals cache even
    /// when it is not marked stale, computes the indexed region (union of
    /// testable bounds padded by 500 units per side, the default region for
    /// an empty population, always unioned with the origin region),
    /// reinserts every testable visual, and bumps the rebuild epoch.
    ///
    /// Callable on demand to force immediate consistency after changes that
    /// were never routed through [`apply`](Self::apply), such as bulk
    /// programmatic element creation.
    pub fn rebuild_index(&mut self, population: &impl Population) {
        self.refresh_cache(population);

        let mut union: Option<Rect> = None;
        for id in &self.visuals {
            if let Some(element) = population.by_id(id) {
                let bounds = element.bounds();
                union = Some(match union {
                    Some(acc) => acc.union(bounds),
                    None => bounds,
                });
            }
        }
        let region = match union {
            Some(acc) => acc.inflate(BOUNDS_PADDING, BOUNDS_PADDING),
            None => EMPTY_REGION,
        }
        .union(ORIGIN_REGION);

        let mut tree = QuadTree::with_node_capacity(region, self.node_capacity);
        let mut slots: Vec<Option<ElementId>> = Vec::with_capacity(self.visuals.len());
        let mut slot_of: HashMap<ElementId, u32> = HashMap::with_capacity(self.visuals.len());
        for id in &self.visuals {
            let Some(element) = population.by_id(id) else {
                continue;
            };
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Index slots are intentionally 32-bit; canvases stay far below u32::MAX elements."
            )]
            let slot = slots.len() as u32;
            if tree.insert(element.bounds(), slot) {
                slots.push(Some(id.clone()));
                slot_of.insert(id.clone(), slot);
            }
        }

        self.tree = Some(tree);
        self.slots = slots;
        self.slot_of = slot_of;
        self.free_slots.clear();
        self.rebuild_epoch = self.rebuild_epoch.wrapping_add(1);
    }

    /// Monotonic (wrapping) count of full rebuilds. Poll it to detect that
    /// previously returned results may be arbitrarily stale.
    pub fn rebuild_epoch(&self) -> u64 {
        self.rebuild_epoch
    }

    /// Occupancy counters of the current index; zeros before the first build.
    pub fn index_stats(&self) -> Stats {
        self.tree.as_ref().map(QuadTree::stats).unwrap_or_default()
    }

    /// The indexed region, or `None` before the first build.
    pub fn index_bounds(&self) -> Option<Rect> {
        self.tree.as_ref().map(QuadTree::bounds)
    }

    fn ensure_cache(&mut self, population: &impl Population) {
        if !self.cache_valid {
            self.refresh_cache(population);
        }
    }

    fn refresh_cache(&mut self, population: &impl Population) {
        self.visuals.clear();
        self.rank_of.clear();
        for element in population.iter() {
            if filter::is_testable(self.mode, element, population) {
                let id = element.id().clone();
                self.rank_of.insert(id.clone(), self.visuals.len());
                self.visuals.push(id);
            }
        }
        self.cache_valid = true;
    }

    /// Makes the tree and cache consistent with `population` before a query.
    fn ensure_ready(&mut self, population: &impl Population) {
        if self.tree.is_none() {
            self.rebuild_index(population);
        } else {
            self.ensure_cache(population);
        }
    }

    /// Shared candidate pipeline: probe the index, resolve slots to ids, keep
    /// currently testable elements passing the probe's precise test, and pair
    /// each with its z rank (higher is nearer the top).
    fn gather(&mut self, probe: Probe, population: &impl Population) -> Vec<(usize, ElementId)> {
        self.ensure_ready(population);
        let Some(tree) = &self.tree else {
            return Vec::new();
        };
        let candidates: Vec<u32> = match probe {
            Probe::At(pt) => tree.query_point(pt).collect(),
            Probe::Within(rect) => tree.query_rect(rect).collect(),
        };
        let mut out = Vec::new();
        for slot in candidates {
            let Some(id) = self.slots[slot as usize].as_ref() else {
                continue;
            };
            let Some(&rank) = self.rank_of.get(id) else {
                continue;
            };
            let Some(element) = population.by_id(id) else {
                continue;
            };
            let matched = match probe {
                Probe::At(pt) => element.contains(pt),
                Probe::Within(rect) => geom::intersects(element.bounds(), rect),
            };
            if matched {
                out.push((rank, id.clone()));
            }
        }
        out
    }

    fn pick(
        &mut self,
        probe: Probe,
        population: &impl Population,
        skip: ElementFlags,
    ) -> Option<ElementId> {
        let mut best: Option<(ElementId, usize)> = None;
        for (rank, id) in self.gather(probe, population) {
            if !skip.is_empty()
                && population
                    .by_id(&id)
                    .is_some_and(|element| element.flags().intersects(skip))
            {
                continue;
            }
            match &best {
                None => best = Some((id, rank)),
                Some((_, best_rank)) if rank >= *best_rank => best = Some((id, rank)),
                _ => {}
            }
        }
        best.map(|(id, _)| id)
    }

    fn ranked(&mut self, probe: Probe, population: &impl Population) -> Vec<ElementId> {
        let mut hits = self.gather(probe, population);
        hits.sort_unstable_by_key(|&(rank, _)| Reverse(rank));
        hits.into_iter().map(|(_, id)| id).collect()
    }

    fn tree_insert(&mut self, bounds: Rect, slot: u32) -> bool {
        match &mut self.tree {
            Some(tree) => tree.insert(bounds, slot),
            None => false,
        }
    }

    fn tree_remove(&mut self, slot: u32) {
        if let Some(tree) = &mut self.tree {
            let _ = tree.remove(&slot);
        }
    }

    fn alloc_slot(&mut self, id: &ElementId) -> u32 {
        if let Some(slot) = self.free_slots.pop() {
            self.slots[slot as usize] = Some(id.clone());
            slot
        } else {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Index slots are intentionally 32-bit; canvases stay far below u32::MAX elements."
            )]
            let slot = self.slots.len() as u32;
            self.slots.push(Some(id.clone()));
            slot
        }
    }

    fn release_slot(&mut self, slot: u32) {
        self.slots[slot as usize] = None;
        self.free_slots.push(slot);
    }
}

impl Default for HitTester {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for HitTester {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HitTester")
            .field("mode", &self.mode)
            .field("indexed", &self.slot_of.len())
            .field("visuals", &self.visuals.len())
            .field("cache_valid", &self.cache_valid)
            .field("rebuild_epoch", &self.rebuild_epoch)
            .field("index_bounds", &self.index_bounds())
            .finish_non_exhaustive()
    }
}
