// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canvas element vocabulary: identifiers, kinds, flags, and the population seam.
//!
//! The hit tester never owns element state. It reads geometry and flags
//! through the [`Element`] and [`Population`] traits and stores only string
//! identifiers, so any document model can sit behind them.

use alloc::string::String;
use core::fmt;

use kurbo::{Point, Rect};

use easel_quadtree::geom;

/// Stable string identifier of a canvas element.
///
/// Identifiers are minted by the document model; the hit tester copies them
/// freely and resolves them back through [`Population::by_id`] at use time.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ElementId(String);

impl ElementId {
    /// Wraps a string identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What an element is, as far as picking policy cares.
///
/// [`CanvasMode`](crate::CanvasMode) policies select kinds wholesale: design
/// kinds in Design and Variant modes, script kinds in Script mode.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ElementKind {
    /// Container frame, top-level or nested.
    Frame,
    /// Text block.
    Text,
    /// Vector shape.
    Shape,
    /// Placed instance of a reusable component.
    Instance,
    /// Root of a component-variant definition.
    Variant,
    /// Script-graph node.
    Node,
    /// Script-graph edge.
    Edge,
}

impl ElementKind {
    /// Whether this kind belongs to the design layer.
    pub fn is_design(self) -> bool {
        !self.is_script()
    }

    /// Whether this kind belongs to the script graph.
    pub fn is_script(self) -> bool {
        matches!(self, Self::Node | Self::Edge)
    }
}

bitflags::bitflags! {
    /// Element capability flags read by the testability filter.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element renders and may participate in hit testing.
        const VISUAL        = 0b0000_0001;
        /// Element accepts pointer interaction.
        const MOUSE_ENABLED = 0b0000_0010;
        /// Element is currently selected; hover lookups skip it.
        const SELECTED      = 0b0000_0100;
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self::VISUAL | Self::MOUSE_ENABLED
    }
}

/// Read-only view of one canvas element, implemented by the document model.
pub trait Element {
    /// Stable identifier.
    fn id(&self) -> &ElementId;

    /// Kind discriminator consumed by the mode filter.
    fn kind(&self) -> ElementKind;

    /// Capability flags.
    fn flags(&self) -> ElementFlags;

    /// Current axis-aligned bounding rectangle in canvas coordinates.
    fn bounds(&self) -> Rect;

    /// Identifier of the parent element, or `None` at the document root.
    fn parent(&self) -> Option<&ElementId>;

    /// Precise point containment, edges included.
    ///
    /// The default tests the bounding rectangle. Non-rectangular elements can
    /// override it; the index probes conservative bounds first, so an
    /// override only ever narrows a hit.
    fn contains(&self, pt: Point) -> bool {
        geom::contains_point(self.bounds(), pt)
    }
}

/// Read-only view of the whole element population.
///
/// Iteration order is the document's canonical back-to-front order: later
/// elements draw on top of earlier ones, and hit testing prefers them.
pub trait Population {
    /// Element view type.
    type Elem: Element;

    /// All elements, bottom to top.
    fn iter(&self) -> impl Iterator<Item = &Self::Elem>;

    /// Looks up one element by identifier.
    fn by_id(&self, id: &ElementId) -> Option<&Self::Elem>;
}

/// A population mutation, forwarded by the embedder to
/// [`HitTester::apply`](crate::HitTester::apply).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PopulationEvent {
    /// An element was added.
    Added(ElementId),
    /// An element was removed.
    Removed(ElementId),
    /// An element's geometry, flags, kind, or parent changed.
    Updated(ElementId),
}
