// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Sticky: sticky group headers and footers for linear lists.
//!
//! This crate decorates a scrollable list with group markers. A header is drawn
//! before the first item of each group and stays pinned at the leading edge of
//! the viewport while its group scrolls underneath; a footer does the same after
//! the last item, at the trailing edge. When a group runs out, its pinned marker
//! is pushed out of view by the next group's marker.
//!
//! The core pieces are:
//!
//! - [`GroupSource`]: the host's per-position header and footer group ids.
//!   Negative ids mean "no marker".
//! - [`MarkerFactory`] and [`MarkerElement`]: how the host creates, binds, and
//!   measures marker elements. The crate keeps one element per group in a
//!   [`MarkerCache`].
//! - [`PositionCalculator`]: group boundaries, sticky eligibility, and marker
//!   bounds including the push-off transition.
//! - [`StickyDecorations`]: the per-frame controller. It reserves spacing around
//!   boundary items, draws overlays through an [`OverlaySurface`], and records
//!   where each marker was drawn.
//! - [`PointerRouter`]: intercepts presses over markers and turns taps into
//!   activations of the marker's subtree ([`ActivationNode`]).
//!
//! The crate does not lay out, virtualize, or render anything itself. Hosts are
//! responsible for:
//!
//! - Calling [`StickyDecorations::item_spacing`] while laying out items.
//! - Calling [`StickyDecorations::draw_overlays`] after drawing them, with the
//!   realized items in a [`Frame`].
//! - Forwarding pointer input to a [`PointerRouter`].
//! - Calling [`StickyDecorations::invalidate_headers`] /
//!   [`StickyDecorations::invalidate_footers`] when group membership changes.
//!
//! Both vertical and horizontal lists are supported, as are reversed layouts
//! (see [`Orientation`]).
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use understory_sticky::{
//!     ActivationNode, Frame, GroupId, GroupSource, MarkerElement, MarkerFactory, MarkerKind,
//!     MeasureSpec, Orientation, OverlaySurface, StickyConfig, StickyDecorations, Viewport,
//!     VisibleItem,
//! };
//!
//! // Ten rows; the first three form group 0, the rest group 1.
//! struct Rows;
//! impl GroupSource for Rows {
//!     fn item_count(&self) -> usize { 10 }
//!     fn header_group(&self, p: usize) -> GroupId { GroupId(if p < 3 { 0 } else { 1 }) }
//!     fn footer_group(&self, _: usize) -> GroupId { GroupId::NONE }
//! }
//!
//! struct Label { size: Size }
//! impl ActivationNode for Label {
//!     fn frame(&self) -> Rect { Rect::from_origin_size(Point::ORIGIN, self.size) }
//! }
//! impl MarkerElement for Label {
//!     fn measure(&mut self, spec: MeasureSpec) -> Size {
//!         self.size = Size::new(spec.width.resolve(0.0), spec.height.resolve(24.0));
//!         self.size
//!     }
//!     fn size(&self) -> Size { self.size }
//! }
//!
//! struct Labels;
//! impl MarkerFactory for Labels {
//!     type Element = Label;
//!     fn create(&mut self, _: &Viewport) -> Label { Label { size: Size::ZERO } }
//!     fn bind(&mut self, _: &mut Label, _: usize) {}
//! }
//!
//! struct Canvas(Vec<Rect>);
//! impl OverlaySurface<Label> for Canvas {
//!     fn draw_marker(&mut self, _: MarkerKind, _: &Label, bounds: Rect, _: Option<Rect>) {
//!         self.0.push(bounds);
//!     }
//! }
//!
//! let mut sticky = StickyDecorations::new(Rows, Labels, Labels, StickyConfig::new()).unwrap();
//! let viewport = Viewport::new(Size::new(320.0, 480.0), Orientation::VERTICAL);
//!
//! // Row 1 is half scrolled off the top; row 3 starts group 1 further down.
//! let items = [
//!     VisibleItem::new(1, Rect::new(0.0, -20.0, 320.0, 20.0)),
//!     VisibleItem::new(2, Rect::new(0.0, 20.0, 320.0, 60.0)),
//!     VisibleItem::new(3, Rect::new(0.0, 84.0, 320.0, 124.0)),
//! ];
//! let mut canvas = Canvas(Vec::new());
//! sticky.draw_overlays(&Frame { viewport, items: &items }, &mut canvas);
//!
//! // Group 0's header is pinned at the top, group 1's sits above row 3.
//! assert_eq!(canvas.0, [Rect::new(0.0, 0.0, 320.0, 24.0), Rect::new(0.0, 60.0, 320.0, 84.0)]);
//! assert_eq!(sticky.header_at(Point::new(10.0, 10.0)), Some(1));
//! ```
//!
//! This crate is `no_std` and uses `alloc`. Diagnostics go through the [`log`]
//! facade.

#![no_std]

extern crate alloc;

mod axis;
mod cache;
mod calculator;
mod config;
mod decorations;
mod host;
mod pointer;
mod rects;
mod tap;
mod types;

#[cfg(test)]
mod testing;

pub use cache::MarkerCache;
pub use calculator::{MarkerGeometry, PositionCalculator};
pub use config::{ConfigError, DEFAULT_TAP_SLOP, DEFAULT_TAP_TIMEOUT, StickyConfig};
pub use decorations::StickyDecorations;
pub use host::{
    ActivationNode, Constraint, ElementMargins, GroupSource, MarginResolver, MarkerElement,
    MarkerFactory, MeasureSpec, OverlaySurface,
};
pub use pointer::{MarkerActivation, PointerRouter, dispatch_activation};
pub use rects::PositionRects;
pub use tap::{Press, TapState};
pub use types::{
    Axis, Frame, GroupId, MarkerKind, MarkerKinds, Orientation, Viewport, VisibleItem,
};
