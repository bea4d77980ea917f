// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Group boundaries, sticky eligibility, and marker placement with push-off.
//!
//! ## Placement
//!
//! A marker drawn for a boundary item sits in the space reserved next to that
//! item (see [`StickyDecorations::item_spacing`](crate::StickyDecorations::item_spacing)),
//! clamped so it never leaves the viewport's leading (header) or trailing (footer)
//! edge. The clamp is what makes the marker "stick".
//!
//! ## Push-off
//!
//! For the item currently under the pinned edge, the marker also checks whether
//! its group is running out: a header follows the last item of its group once
//! that item's trailing edge rises above the header's trailing edge, and a footer
//! stays behind the leading edge of its group's first item. The net effect is the
//! outgoing marker being shoved out of view by the incoming group.

use kurbo::{Insets, Rect, Size};

use crate::cache::MarkerCache;
use crate::host::{ElementMargins, GroupSource, MarginResolver, MarkerElement, MarkerFactory};
use crate::types::{Frame, GroupId, MarkerKind, Viewport, VisibleItem};

/// Resolved geometry of one marker element.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MarkerGeometry {
    /// Group the marker represents.
    pub group: GroupId,
    /// Measured size.
    pub size: Size,
    /// External margins.
    pub margins: Insets,
}

/// Geometry core of the sticky decorations.
///
/// The calculator is stateless apart from its [`MarginResolver`]; all list and
/// viewport state is passed in per call.
#[derive(Copy, Clone, Debug, Default)]
pub struct PositionCalculator<M = ElementMargins> {
    margins: M,
}

impl<M> PositionCalculator<M> {
    /// Create a calculator that resolves marker margins with `margins`.
    pub const fn new(margins: M) -> Self {
        Self { margins }
    }

    /// The margin resolver.
    pub fn margin_resolver(&self) -> &M {
        &self.margins
    }

    /// Geometry of `element` as the marker of `group`.
    pub fn geometry<E>(&self, group: GroupId, element: &E) -> MarkerGeometry
    where
        E: MarkerElement,
        M: MarginResolver<E>,
    {
        MarkerGeometry {
            group,
            size: element.size(),
            margins: self.margins.margins(element),
        }
    }

    /// Returns `true` if `position` starts a header group.
    ///
    /// The neighbor compared against is `position - 1`, or `position + 1` when
    /// `reversed`. A missing neighbor counts as "no group", so the first
    /// position with a header always starts a group.
    pub fn is_group_start<S: GroupSource + ?Sized>(
        &self,
        source: &S,
        position: usize,
        reversed: bool,
    ) -> bool {
        boundary(source, MarkerKind::Header, position, !reversed)
    }

    /// Returns `true` if `position` ends a footer group.
    ///
    /// Mirror of [`PositionCalculator::is_group_start`]: the neighbor is
    /// `position + 1`, or `position - 1` when `reversed`.
    pub fn is_group_end<S: GroupSource + ?Sized>(
        &self,
        source: &S,
        position: usize,
        reversed: bool,
    ) -> bool {
        boundary(source, MarkerKind::Footer, position, reversed)
    }

    /// Boundary test for either marker kind.
    pub fn is_boundary<S: GroupSource + ?Sized>(
        &self,
        source: &S,
        kind: MarkerKind,
        position: usize,
        reversed: bool,
    ) -> bool {
        match kind {
            MarkerKind::Header => self.is_group_start(source, position, reversed),
            MarkerKind::Footer => self.is_group_end(source, position, reversed),
        }
    }

    /// Returns `true` if `item` is at the leading edge and may own the pinned header.
    ///
    /// The item's leading edge must lie within `[-extent - trailing_margin, leading_margin]`.
    pub fn has_sticky_header<S: GroupSource + ?Sized>(
        &self,
        source: &S,
        viewport: &Viewport,
        item: &VisibleItem,
        position: usize,
    ) -> bool {
        if position >= source.item_count() {
            return false;
        }
        let axis = viewport.orientation.axis;
        let offset = axis.leading(item.rect);
        let extent = axis.extent(item.rect.size());
        offset >= -extent - axis.trailing_inset(item.margins)
            && offset <= axis.leading_inset(item.margins)
            && source.header_group(position).is_marker()
    }

    /// Returns `true` if `item` is at the trailing edge and may own the pinned footer.
    pub fn has_sticky_footer<S: GroupSource + ?Sized>(
        &self,
        source: &S,
        viewport: &Viewport,
        item: &VisibleItem,
        position: usize,
    ) -> bool {
        if position >= source.item_count() {
            return false;
        }
        let axis = viewport.orientation.axis;
        let offset = axis.trailing(item.rect);
        let edge = axis.extent(viewport.size);
        let extent = axis.extent(item.rect.size());
        offset >= edge - axis.trailing_inset(item.margins)
            && offset <= edge + extent + axis.leading_inset(item.margins)
            && source.footer_group(position).is_marker()
    }

    /// Bounds of `header` drawn for `item`.
    ///
    /// `sticky` is the result of [`PositionCalculator::has_sticky_header`]; only
    /// then is push-off considered. `footers` supplies the margins of the footer
    /// that pushes the header; pass `None` when footers are not in use.
    pub fn header_bounds<S, F>(
        &self,
        source: &S,
        frame: &Frame<'_>,
        header: &MarkerGeometry,
        item: &VisibleItem,
        sticky: bool,
        footers: Option<&mut MarkerCache<F>>,
    ) -> Rect
    where
        S: GroupSource + ?Sized,
        F: MarkerFactory,
        M: MarginResolver<F::Element>,
    {
        let viewport = &frame.viewport;
        let axis = viewport.orientation.axis;
        let extent = axis.extent(header.size);
        let primary = (axis.leading(item.rect)
            - axis.leading_inset(item.margins)
            - extent
            - axis.trailing_inset(header.margins))
        .max(viewport.list_leading() + axis.leading_inset(header.margins));
        let cross = axis.cross_leading(item.rect) - axis.cross_leading_inset(item.margins)
            + axis.cross_leading_inset(header.margins);
        let bounds = axis.rect(primary, cross, header.size);
        if !sticky {
            return bounds;
        }
        match self.header_push_off(source, frame, header, footers) {
            Some(shift) => axis.translate(bounds, shift),
            None => bounds,
        }
    }

    /// Bounds of `footer` drawn for `item`.
    ///
    /// `sticky` is the result of [`PositionCalculator::has_sticky_footer`]; only
    /// then is push-off considered.
    pub fn footer_bounds<S: GroupSource + ?Sized>(
        &self,
        source: &S,
        frame: &Frame<'_>,
        footer: &MarkerGeometry,
        item: &VisibleItem,
        sticky: bool,
    ) -> Rect {
        let viewport = &frame.viewport;
        let axis = viewport.orientation.axis;
        let extent = axis.extent(footer.size);
        let trailing = (axis.trailing(item.rect)
            + axis.trailing_inset(item.margins)
            + axis.leading_inset(footer.margins)
            + extent)
            .min(viewport.list_trailing() - axis.trailing_inset(footer.margins));
        let cross = axis.cross_leading(item.rect) - axis.cross_leading_inset(item.margins)
            + axis.cross_leading_inset(footer.margins);
        let bounds = axis.rect(trailing - extent, cross, footer.size);
        if !sticky {
            return bounds;
        }
        match self.footer_push_off(source, frame, footer) {
            Some(shift) => axis.translate(bounds, shift),
            None => bounds,
        }
    }

    /// Primary-axis shift applied to a pinned header whose group is ending.
    fn header_push_off<S, F>(
        &self,
        source: &S,
        frame: &Frame<'_>,
        header: &MarkerGeometry,
        footers: Option<&mut MarkerCache<F>>,
    ) -> Option<f64>
    where
        S: GroupSource + ?Sized,
        F: MarkerFactory,
        M: MarginResolver<F::Element>,
    {
        let viewport = &frame.viewport;
        let axis = viewport.orientation.axis;
        let last = self.last_item_under_header(source, frame, header)?;
        let position = last.position?;
        let reversed = viewport.orientation.reversed;
        if position == 0 || !self.is_group_end(source, position, reversed) {
            return None;
        }
        let footer_margins = match footers {
            Some(cache) => {
                let group = source.footer_group(position);
                let footer = cache.get_or_create(group, position, viewport);
                self.margins.margins(footer)
            }
            None => Insets::ZERO,
        };
        let extent = axis.extent(header.size);
        let header_end = viewport.list_leading() + extent + axis.inset_sum(header.margins);
        let next_footer_start = axis.trailing(last.rect) + axis.leading_inset(footer_margins);
        if next_footer_start >= header_end {
            return None;
        }
        Some(
            axis.trailing(last.rect) + axis.trailing_inset(header.margins)
                - extent
                - viewport.list_leading()
                - axis.inset_sum(header.margins),
        )
    }

    /// Primary-axis shift applied to a pinned footer whose group has not started yet.
    fn footer_push_off<S: GroupSource + ?Sized>(
        &self,
        source: &S,
        frame: &Frame<'_>,
        footer: &MarkerGeometry,
    ) -> Option<f64> {
        let viewport = &frame.viewport;
        let axis = viewport.orientation.axis;
        let item = self.first_item_under_footer(source, frame, footer)?;
        let position = item.position?;
        let reversed = viewport.orientation.reversed;
        if position == 0 || !self.is_group_start(source, position, reversed) {
            return None;
        }
        let footer_start = footer_start(viewport, footer);
        let next_header_end = axis.leading(item.rect) - axis.leading_inset(item.margins);
        let shift = next_header_end - footer_start;
        (shift > 0.0).then_some(shift)
    }

    /// Last item, in traversal order, still covered by the pinned header.
    ///
    /// `None` if the very first item is already clear of the header or every
    /// item is covered.
    fn last_item_under_header<'a, S: GroupSource + ?Sized>(
        &self,
        source: &S,
        frame: &Frame<'a>,
        header: &MarkerGeometry,
    ) -> Option<&'a VisibleItem> {
        let mut previous = None;
        for item in traversal(frame) {
            if !obscured_by_header(source, &frame.viewport, item, header) {
                return previous;
            }
            previous = Some(item);
        }
        None
    }

    /// First item, in traversal order, reaching under the pinned footer.
    fn first_item_under_footer<'a, S: GroupSource + ?Sized>(
        &self,
        source: &S,
        frame: &Frame<'a>,
        footer: &MarkerGeometry,
    ) -> Option<&'a VisibleItem> {
        traversal(frame).find(|item| obscured_by_footer(source, &frame.viewport, item, footer))
    }
}

fn boundary<S: GroupSource + ?Sized>(
    source: &S,
    kind: MarkerKind,
    position: usize,
    towards_previous: bool,
) -> bool {
    let count = source.item_count();
    if position >= count {
        return false;
    }
    let group = source.group(kind, position);
    if !group.is_marker() {
        return false;
    }
    let neighbor = if towards_previous {
        position.checked_sub(1)
    } else {
        position.checked_add(1).filter(|&n| n < count)
    };
    let neighbor_group = neighbor.map_or(GroupId::NONE, |n| source.group(kind, n));
    group != neighbor_group
}

/// Items front to back, or back to front for a reversed layout.
fn traversal<'a>(frame: &Frame<'a>) -> impl Iterator<Item = &'a VisibleItem> + use<'a> {
    let items = frame.items;
    let reversed = frame.viewport.orientation.reversed;
    let len = items.len();
    (0..len).map(move |i| &items[if reversed { len - 1 - i } else { i }])
}

fn item_group<S: GroupSource + ?Sized>(
    source: &S,
    kind: MarkerKind,
    item: &VisibleItem,
) -> Option<GroupId> {
    item.position
        .filter(|&p| p < source.item_count())
        .map(|p| source.group(kind, p))
}

fn obscured_by_header<S: GroupSource + ?Sized>(
    source: &S,
    viewport: &Viewport,
    item: &VisibleItem,
    header: &MarkerGeometry,
) -> bool {
    // Items of a different group are never under this header, even when a
    // smaller trailing header would put them there geometrically.
    if item_group(source, MarkerKind::Header, item) != Some(header.group) {
        return false;
    }
    let axis = viewport.orientation.axis;
    let item_start = axis.leading(item.rect) - axis.leading_inset(item.margins);
    let header_end =
        viewport.list_leading() + axis.extent(header.size) + axis.inset_sum(header.margins);
    item_start < header_end
}

fn obscured_by_footer<S: GroupSource + ?Sized>(
    source: &S,
    viewport: &Viewport,
    item: &VisibleItem,
    footer: &MarkerGeometry,
) -> bool {
    if item_group(source, MarkerKind::Footer, item) != Some(footer.group) {
        return false;
    }
    let axis = viewport.orientation.axis;
    let item_end = axis.trailing(item.rect) + axis.trailing_inset(item.margins);
    item_end >= footer_start(viewport, footer)
}

/// Leading edge of a footer pinned at the trailing edge, margins included.
fn footer_start(viewport: &Viewport, footer: &MarkerGeometry) -> f64 {
    let axis = viewport.orientation.axis;
    viewport.list_trailing() - axis.extent(footer.size) - axis.inset_sum(footer.margins)
}
