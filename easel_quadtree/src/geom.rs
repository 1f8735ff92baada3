// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle predicates and quadrant routing.
//!
//! All comparisons are boundary-inclusive: a point on a rectangle's edge is
//! inside it, and two rectangles sharing only an edge intersect. Inputs are
//! assumed finite (no NaNs).

use kurbo::{Point, Rect};

/// Whether `r` contains `pt`, edges included.
#[inline]
pub fn contains_point(r: Rect, pt: Point) -> bool {
    r.x0 <= pt.x && pt.x <= r.x1 && r.y0 <= pt.y && pt.y <= r.y1
}

/// Whether `outer` fully contains `inner`, edges included.
#[inline]
pub fn contains_rect(outer: Rect, inner: Rect) -> bool {
    outer.x0 <= inner.x0 && inner.x1 <= outer.x1 && outer.y0 <= inner.y0 && inner.y1 <= outer.y1
}

/// Whether `a` and `b` overlap, shared edges included.
#[inline]
pub fn intersects(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// The four equal quadrants of `bounds`, in NW, NE, SW, SE order.
pub fn quadrant_rects(bounds: Rect) -> [Rect; 4] {
    let cx = 0.5 * (bounds.x0 + bounds.x1);
    let cy = 0.5 * (bounds.y0 + bounds.y1);
    [
        Rect::new(bounds.x0, bounds.y0, cx, cy),
        Rect::new(cx, bounds.y0, bounds.x1, cy),
        Rect::new(bounds.x0, cy, cx, bounds.y1),
        Rect::new(cx, cy, bounds.x1, bounds.y1),
    ]
}

/// Which quadrant of `bounds` contains `rect` entirely (0 = NW, 1 = NE,
/// 2 = SW, 3 = SE), or `None` if it straddles a center line.
///
/// A rectangle belongs to a quadrant only when it lies entirely on one side
/// of both center lines. Straddlers must stay at their current node, which is
/// what keeps every entry in exactly one node list.
pub fn quadrant_of(bounds: Rect, rect: Rect) -> Option<usize> {
    let cx = 0.5 * (bounds.x0 + bounds.x1);
    let cy = 0.5 * (bounds.y0 + bounds.y1);
    let west = rect.x1 <= cx;
    let east = rect.x0 >= cx;
    let north = rect.y1 <= cy;
    let south = rect.y0 >= cy;
    match (north, south, west, east) {
        (true, _, true, _) => Some(0),
        (true, _, _, true) => Some(1),
        (_, true, true, _) => Some(2),
        (_, true, _, true) => Some(3),
        _ => None,
    }
}
