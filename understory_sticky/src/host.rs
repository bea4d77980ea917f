// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contracts implemented by the host list: group ids, marker elements, and drawing.

use kurbo::{Insets, Rect, Size};

use crate::types::{GroupId, MarkerKind, Viewport};

/// Per-position group identity for headers and footers.
///
/// Ids must be stable for as long as the underlying data is unchanged. When
/// membership may have changed, the host calls
/// [`StickyDecorations::invalidate_headers`](crate::StickyDecorations::invalidate_headers)
/// and/or [`StickyDecorations::invalidate_footers`](crate::StickyDecorations::invalidate_footers).
pub trait GroupSource {
    /// Number of logical positions in the list.
    fn item_count(&self) -> usize;

    /// Header group of `position`; negative means no header.
    ///
    /// Only called with `position < item_count()`.
    fn header_group(&self, position: usize) -> GroupId;

    /// Footer group of `position`; negative means no footer.
    ///
    /// Only called with `position < item_count()`.
    ///
    /// Header push-off is keyed on footer group ends, so a header-only list
    /// that wants push-off returns its header ids here and disables footers
    /// through [`StickyConfig::markers`](crate::StickyConfig::markers).
    fn footer_group(&self, position: usize) -> GroupId;

    /// Group of `position` for the given marker kind.
    fn group(&self, kind: MarkerKind, position: usize) -> GroupId {
        match kind {
            MarkerKind::Header => self.header_group(position),
            MarkerKind::Footer => self.footer_group(position),
        }
    }
}

/// Constraint along one axis for a marker measure pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Constraint {
    /// The element must take exactly this extent.
    Exact(f64),
    /// The element picks its own extent.
    Unbounded,
}

impl Constraint {
    /// Resolve against the element's desired extent.
    #[must_use]
    pub fn resolve(self, desired: f64) -> f64 {
        match self {
            Self::Exact(extent) => extent,
            Self::Unbounded => desired,
        }
    }
}

/// Constraints for measuring and laying out a freshly created marker.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MeasureSpec {
    /// Horizontal constraint.
    pub width: Constraint,
    /// Vertical constraint.
    pub height: Constraint,
}

/// A node in a marker's rendered subtree that can receive synthetic activations.
///
/// Frames are relative to the parent's origin. A marker root is normally laid
/// out at the origin, so its screen rectangle is the drawn marker bounds.
pub trait ActivationNode {
    /// Hit box relative to the parent's origin.
    fn frame(&self) -> Rect;

    /// Whether the node is currently visible.
    fn is_visible(&self) -> bool {
        true
    }

    /// Number of child nodes.
    fn child_count(&self) -> usize {
        0
    }

    /// Mutable access to the child at `index`.
    fn child_mut(&mut self, index: usize) -> Option<&mut dyn ActivationNode> {
        let _ = index;
        None
    }

    /// Tag the node with the owning list position and run its activation handler.
    ///
    /// Returns `true` if the node handled the activation.
    fn activate(&mut self, position: usize) -> bool {
        let _ = position;
        false
    }
}

/// A rendered header or footer element.
pub trait MarkerElement: ActivationNode {
    /// Measure and lay out the element under `spec`, returning its size.
    fn measure(&mut self, spec: MeasureSpec) -> Size;

    /// Size from the last measure pass.
    fn size(&self) -> Size;

    /// External margins around the element.
    fn margins(&self) -> Insets {
        Insets::ZERO
    }
}

/// Creates and binds marker elements for one marker kind.
pub trait MarkerFactory {
    /// Element type produced by this factory.
    type Element: MarkerElement;

    /// Create an unbound element for the given viewport.
    fn create(&mut self, viewport: &Viewport) -> Self::Element;

    /// Bind `element` to the data of `position`.
    fn bind(&mut self, element: &mut Self::Element, position: usize);
}

/// Resolves the four-sided external spacing of a marker element.
pub trait MarginResolver<E: ?Sized> {
    /// Margins of `element`.
    fn margins(&self, element: &E) -> Insets;
}

/// [`MarginResolver`] that asks the element via [`MarkerElement::margins`].
#[derive(Copy, Clone, Debug, Default)]
pub struct ElementMargins;

impl<E: MarkerElement + ?Sized> MarginResolver<E> for ElementMargins {
    fn margins(&self, element: &E) -> Insets {
        element.margins()
    }
}

/// Drawing target for marker overlays.
pub trait OverlaySurface<E: ?Sized> {
    /// Draw `element` with its origin at `bounds.origin()`, clipped to `clip` if present.
    fn draw_marker(&mut self, kind: MarkerKind, element: &E, bounds: Rect, clip: Option<Rect>);
}
