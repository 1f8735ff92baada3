// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mode policies deciding which elements hit testing sees.

use crate::element::{Element, ElementFlags, ElementKind, Population};

/// Editing mode of the canvas.
///
/// The mode selects the policy applied by [`is_testable`]; the service
/// re-indexes when it changes.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum CanvasMode {
    /// Regular design editing: frames, text, shapes, and instances, with
    /// component-variant subtrees excluded.
    #[default]
    Design,
    /// Script-graph editing: nodes and edges only.
    Script,
    /// Component-variant editing: variant roots and their subtrees only.
    Variant,
}

/// Upper bound on parent hops when resolving variant ancestry. Malformed
/// models with parent cycles terminate here instead of looping.
const MAX_ANCESTRY_DEPTH: usize = 100;

/// Whether `element` participates in hit testing under `mode`.
///
/// Every mode requires [`ElementFlags::VISUAL`] and
/// [`ElementFlags::MOUSE_ENABLED`]. On top of that, Design mode takes design
/// kinds outside any variant subtree, Script mode takes script kinds, and
/// Variant mode takes exactly the variant subtrees Design mode excludes.
pub fn is_testable<P: Population>(mode: CanvasMode, element: &P::Elem, population: &P) -> bool {
    if !element
        .flags()
        .contains(ElementFlags::VISUAL | ElementFlags::MOUSE_ENABLED)
    {
        return false;
    }
    let kind = element.kind();
    match mode {
        CanvasMode::Design => {
            kind.is_design()
                && kind != ElementKind::Variant
                && !has_variant_ancestor(element, population)
        }
        CanvasMode::Script => kind.is_script(),
        CanvasMode::Variant => {
            kind.is_design()
                && (kind == ElementKind::Variant || has_variant_ancestor(element, population))
        }
    }
}

/// Whether any ancestor of `element` is a component-variant root.
///
/// Walks parent identifiers through `population`, bounded at 100 hops. A
/// missing parent or an exhausted budget ends the walk with no match.
pub fn has_variant_ancestor<P: Population>(element: &P::Elem, population: &P) -> bool {
    let mut current = element.parent();
    for _ in 0..MAX_ANCESTRY_DEPTH {
        let Some(id) = current else {
            return false;
        };
        let Some(ancestor) = population.by_id(id) else {
            return false;
        };
        if ancestor.kind() == ElementKind::Variant {
            return true;
        }
        current = ancestor.parent();
    }
    false
}
