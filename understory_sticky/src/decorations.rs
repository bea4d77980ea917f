// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame controller: spacing reservation, overlay drawing, and rect bookkeeping.

use alloc::boxed::Box;

use kurbo::{Insets, Point, Rect};

use crate::cache::MarkerCache;
use crate::calculator::PositionCalculator;
use crate::config::{ConfigError, StickyConfig};
use crate::host::{ElementMargins, GroupSource, MarginResolver, MarkerFactory, OverlaySurface};
use crate::rects::PositionRects;
use crate::types::{Frame, GroupId, MarkerKind, Viewport};

type VisibilityFilter = Box<dyn Fn(usize) -> bool>;

/// Sticky header and footer decorations for one list.
///
/// The host drives it once per frame:
/// 1. [`StickyDecorations::item_spacing`] while laying out each item, to reserve
///    room for boundary markers.
/// 2. [`StickyDecorations::draw_overlays`] after drawing the items.
/// 3. [`StickyDecorations::marker_at`] (or a [`PointerRouter`](crate::PointerRouter))
///    when input arrives.
///
/// Headers and footers share one element type so a single [`OverlaySurface`]
/// can draw both.
pub struct StickyDecorations<S, H, F, M = ElementMargins>
where
    H: MarkerFactory,
    F: MarkerFactory,
{
    source: S,
    config: StickyConfig,
    calculator: PositionCalculator<M>,
    headers: MarkerCache<H>,
    footers: MarkerCache<F>,
    header_rects: PositionRects,
    footer_rects: PositionRects,
    visibility: Option<VisibilityFilter>,
    viewport: Option<Viewport>,
}

impl<S, H, F, M> core::fmt::Debug for StickyDecorations<S, H, F, M>
where
    H: MarkerFactory,
    F: MarkerFactory,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StickyDecorations")
            .field("config", &self.config)
            .field("headers", &self.headers)
            .field("footers", &self.footers)
            .field("header_rects", &self.header_rects.len())
            .field("footer_rects", &self.footer_rects.len())
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

impl<S, H, F> StickyDecorations<S, H, F>
where
    S: GroupSource,
    H: MarkerFactory,
    F: MarkerFactory<Element = H::Element>,
{
    /// Create decorations whose marker margins come from the elements themselves.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`StickyConfig::validate`].
    pub fn new(
        source: S,
        headers: H,
        footers: F,
        config: StickyConfig,
    ) -> Result<Self, ConfigError> {
        Self::with_margins(source, headers, footers, ElementMargins, config)
    }
}

impl<S, H, F, M> StickyDecorations<S, H, F, M>
where
    S: GroupSource,
    H: MarkerFactory,
    F: MarkerFactory<Element = H::Element>,
    M: MarginResolver<H::Element>,
{
    /// Create decorations with a custom [`MarginResolver`].
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`StickyConfig::validate`].
    pub fn with_margins(
        source: S,
        headers: H,
        footers: F,
        margins: M,
        config: StickyConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        log::debug!("sticky decorations enabled for {:?}", config.markers);
        Ok(Self {
            source,
            config,
            calculator: PositionCalculator::new(margins),
            headers: MarkerCache::new(MarkerKind::Header, headers),
            footers: MarkerCache::new(MarkerKind::Footer, footers),
            header_rects: PositionRects::new(),
            footer_rects: PositionRects::new(),
            visibility: None,
            viewport: None,
        })
    }

    /// Restrict hit testing to positions for which `filter` returns `true`.
    ///
    /// Hosts that keep markers of partially visible groups around use this to
    /// make stale rectangles unclickable.
    #[must_use]
    pub fn with_visibility(mut self, filter: impl Fn(usize) -> bool + 'static) -> Self {
        self.visibility = Some(Box::new(filter));
        self
    }

    /// The group source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the group source.
    ///
    /// Changing group membership requires [`StickyDecorations::invalidate_headers`]
    /// and/or [`StickyDecorations::invalidate_footers`].
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// The configuration.
    pub fn config(&self) -> &StickyConfig {
        &self.config
    }

    /// The geometry core.
    pub fn calculator(&self) -> &PositionCalculator<M> {
        &self.calculator
    }

    /// Viewport of the last draw pass, if any.
    pub fn last_viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    fn enabled(&self, kind: MarkerKind) -> bool {
        self.config.markers.has(kind)
    }

    /// Extra space to reserve around the item at `position`.
    ///
    /// A group's first item gets room for its header on the leading side; a
    /// group's last item gets room for its footer on the trailing side.
    pub fn item_spacing(&mut self, position: usize, viewport: &Viewport) -> Insets {
        let axis = viewport.orientation.axis;
        let reversed = viewport.orientation.reversed;
        let reserve_headers = self.enabled(MarkerKind::Header);
        let reserve_footers = self.enabled(MarkerKind::Footer);
        let calculator = &self.calculator;
        let source = &self.source;
        let mut leading = 0.0;
        let mut trailing = 0.0;
        if reserve_headers && calculator.is_group_start(source, position, reversed) {
            let group = source.header_group(position);
            let header = self.headers.get_or_create(group, position, viewport);
            let geometry = calculator.geometry(group, &*header);
            leading = axis.extent(geometry.size) + axis.inset_sum(geometry.margins);
        }
        if reserve_footers && calculator.is_group_end(source, position, reversed) {
            let group = source.footer_group(position);
            let footer = self.footers.get_or_create(group, position, viewport);
            let geometry = calculator.geometry(group, &*footer);
            trailing = axis.extent(geometry.size) + axis.inset_sum(geometry.margins);
        }
        axis.insets(leading, trailing)
    }

    /// Draw marker overlays for `frame` and record their rectangles.
    ///
    /// Items are visited in host order; for each, the header is drawn if the
    /// item is the sticky candidate or starts a group, then the footer likewise.
    /// Later draws cover earlier ones.
    pub fn draw_overlays<D>(&mut self, frame: &Frame<'_>, surface: &mut D)
    where
        D: OverlaySurface<H::Element> + ?Sized,
    {
        let viewport = frame.viewport;
        self.viewport = Some(viewport);
        let reversed = viewport.orientation.reversed;
        let clip = viewport.content_clip();
        let draw_headers = self.enabled(MarkerKind::Header);
        let draw_footers = self.enabled(MarkerKind::Footer);
        let count = self.source.item_count();
        let calculator = &self.calculator;
        let source = &self.source;
        let mut drawn = 0_usize;

        for item in frame.items {
            let Some(position) = item.position.filter(|&p| p < count) else {
                continue;
            };

            if draw_headers {
                let sticky = calculator.has_sticky_header(source, &viewport, item, position);
                if sticky || calculator.is_group_start(source, position, reversed) {
                    let group = source.header_group(position);
                    let header = self.headers.get_or_create(group, position, &viewport);
                    let marker = calculator.geometry(group, &*header);
                    let footers = draw_footers.then_some(&mut self.footers);
                    let bounds =
                        calculator.header_bounds(source, frame, &marker, item, sticky, footers);
                    self.header_rects.record(position, bounds);
                    surface.draw_marker(MarkerKind::Header, &*header, bounds, clip);
                    drawn += 1;
                }
            }

            if draw_footers {
                let sticky = calculator.has_sticky_footer(source, &viewport, item, position);
                if sticky || calculator.is_group_end(source, position, reversed) {
                    let group = source.footer_group(position);
                    let footer = self.footers.get_or_create(group, position, &viewport);
                    let marker = calculator.geometry(group, &*footer);
                    let bounds = calculator.footer_bounds(source, frame, &marker, item, sticky);
                    self.footer_rects.record(position, bounds);
                    surface.draw_marker(MarkerKind::Footer, &*footer, bounds, clip);
                    drawn += 1;
                }
            }
        }
        log::trace!("drew {drawn} markers over {} items", frame.items.len());
    }

    /// Drop cached headers and forget their rectangles.
    pub fn invalidate_headers(&mut self) {
        log::debug!("invalidating headers");
        self.headers.invalidate();
        self.header_rects.clear();
    }

    /// Drop cached footers and forget their rectangles.
    pub fn invalidate_footers(&mut self) {
        log::debug!("invalidating footers");
        self.footers.invalidate();
        self.footer_rects.clear();
    }

    /// Last-drawn header rectangles.
    pub fn header_rects(&self) -> &PositionRects {
        &self.header_rects
    }

    /// Last-drawn footer rectangles.
    pub fn footer_rects(&self) -> &PositionRects {
        &self.footer_rects
    }

    /// Position whose `kind` marker lies under `point`.
    ///
    /// Returns `None` before the first draw pass, when `kind` is disabled, or
    /// when nothing (visible) was drawn there. Overlaps resolve to the most
    /// recently drawn marker.
    pub fn marker_at(&self, kind: MarkerKind, point: Point) -> Option<usize> {
        if self.viewport.is_none() || !self.enabled(kind) {
            return None;
        }
        let rects = match kind {
            MarkerKind::Header => &self.header_rects,
            MarkerKind::Footer => &self.footer_rects,
        };
        let visibility = self.visibility.as_deref();
        let accept = |position: usize| visibility.is_none_or(|visible| visible(position));
        rects.hit(point, accept)
    }

    /// Position whose header lies under `point`.
    pub fn header_at(&self, point: Point) -> Option<usize> {
        self.marker_at(MarkerKind::Header, point)
    }

    /// Position whose footer lies under `point`.
    pub fn footer_at(&self, point: Point) -> Option<usize> {
        self.marker_at(MarkerKind::Footer, point)
    }

    /// Header element of `position`'s group, created on first use.
    ///
    /// `None` if `position` is out of range or has no header group.
    pub fn header_element(
        &mut self,
        position: usize,
        viewport: &Viewport,
    ) -> Option<&mut H::Element> {
        if position >= self.source.item_count() {
            return None;
        }
        let group = self.source.header_group(position);
        if !group.is_marker() {
            return None;
        }
        Some(self.headers.get_or_create(group, position, viewport))
    }

    /// Footer element of `position`'s group, created on first use.
    pub fn footer_element(
        &mut self,
        position: usize,
        viewport: &Viewport,
    ) -> Option<&mut H::Element> {
        if position >= self.source.item_count() {
            return None;
        }
        let group = self.source.footer_group(position);
        if !group.is_marker() {
            return None;
        }
        Some(self.footers.get_or_create(group, position, viewport))
    }

    /// Last-drawn rectangle of `position`'s `kind` marker.
    pub(crate) fn drawn_rect(&self, kind: MarkerKind, position: usize) -> Option<Rect> {
        match kind {
            MarkerKind::Header => self.header_rects.get(position),
            MarkerKind::Footer => self.footer_rects.get(position),
        }
    }

    /// Already cached `kind` element of `position`'s group; never creates one.
    pub(crate) fn cached_marker_mut(
        &mut self,
        kind: MarkerKind,
        position: usize,
    ) -> Option<(GroupId, &mut H::Element)> {
        if position >= self.source.item_count() {
            return None;
        }
        let group = self.source.group(kind, position);
        let element = match kind {
            MarkerKind::Header => self.headers.get_mut(group),
            MarkerKind::Footer => self.footers.get_mut(group),
        }?;
        Some((group, element))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Groups, RecordingSurface, TestFactory, column, row, vertical};
    use crate::types::{MarkerKinds, Orientation};
    use alloc::vec::Vec;
    use kurbo::Size;

    /// Items 0-2 in group 1, 3-9 in group 2.
    fn three_then_seven() -> Groups {
        Groups::uniform(&[1, 1, 1, 2, 2, 2, 2, 2, 2, 2])
    }

    fn decorations(config: StickyConfig) -> StickyDecorations<Groups, TestFactory, TestFactory> {
        StickyDecorations::new(
            three_then_seven(),
            TestFactory::new(50.0),
            TestFactory::new(30.0),
            config,
        )
        .unwrap()
    }

    fn sorted(rects: &PositionRects) -> Vec<(usize, Rect)> {
        let mut v: Vec<_> = rects.iter().collect();
        v.sort_by_key(|(p, _)| *p);
        v
    }

    #[test]
    fn empty_marker_set_fails_fast() {
        let err = StickyDecorations::new(
            three_then_seven(),
            TestFactory::new(50.0),
            TestFactory::new(30.0),
            StickyConfig::new().with_markers(MarkerKinds::empty()),
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::NoMarkerKinds);
    }

    #[test]
    fn spacing_reserved_at_group_boundaries() {
        let mut deco = decorations(StickyConfig::new());
        let viewport = vertical(300.0, 500.0);
        assert_eq!(
            deco.item_spacing(0, &viewport),
            Insets::new(0.0, 50.0, 0.0, 0.0)
        );
        assert_eq!(deco.item_spacing(1, &viewport), Insets::ZERO);
        assert_eq!(
            deco.item_spacing(2, &viewport),
            Insets::new(0.0, 0.0, 0.0, 30.0)
        );
        assert_eq!(
            deco.item_spacing(3, &viewport),
            Insets::new(0.0, 50.0, 0.0, 0.0)
        );
        assert_eq!(
            deco.item_spacing(10, &viewport),
            Insets::ZERO,
            "out of range"
        );
    }

    #[test]
    fn spacing_includes_marker_margins() {
        let mut deco = StickyDecorations::new(
            Groups::uniform(&[4]),
            TestFactory::new(20.0).with_margins(Insets::new(1.0, 2.0, 3.0, 4.0)),
            TestFactory::new(10.0).with_margins(Insets::new(1.0, 5.0, 3.0, 6.0)),
            StickyConfig::new(),
        )
        .unwrap();
        let viewport = vertical(300.0, 500.0);
        assert_eq!(
            deco.item_spacing(0, &viewport),
            Insets::new(0.0, 26.0, 0.0, 21.0),
            "single item starts and ends its group"
        );
        let horizontal = Viewport::new(Size::new(500.0, 300.0), Orientation::HORIZONTAL);
        deco.invalidate_headers();
        deco.invalidate_footers();
        assert_eq!(
            deco.item_spacing(0, &horizontal),
            Insets::new(24.0, 0.0, 14.0, 0.0)
        );
    }

    #[test]
    fn disabled_kind_reserves_nothing() {
        let mut deco = decorations(StickyConfig::new().with_markers(MarkerKinds::HEADERS));
        let viewport = vertical(300.0, 500.0);
        assert_eq!(deco.item_spacing(2, &viewport), Insets::ZERO);
    }

    #[test]
    fn hits_miss_before_first_draw() {
        let deco = decorations(StickyConfig::new());
        assert_eq!(deco.header_at(Point::new(10.0, 10.0)), None);
        assert_eq!(deco.footer_at(Point::new(10.0, 490.0)), None);
        assert!(deco.last_viewport().is_none());
    }

    #[test]
    fn draw_records_pushed_header_and_boundaries() {
        let mut deco = decorations(StickyConfig::new());
        let items = column(
            300.0,
            &[(1, -30.0, 10.0), (2, 10.0, 40.0), (3, 90.0, 140.0)],
        );
        let frame = Frame {
            viewport: vertical(300.0, 500.0),
            items: &items,
        };
        let mut surface = RecordingSurface::default();
        deco.draw_overlays(&frame, &mut surface);

        assert_eq!(
            sorted(deco.header_rects()),
            [
                (1, Rect::new(0.0, -10.0, 300.0, 40.0)),
                (3, Rect::new(0.0, 40.0, 300.0, 90.0)),
            ]
        );
        assert_eq!(
            sorted(deco.footer_rects()),
            [(2, Rect::new(0.0, 40.0, 300.0, 70.0))]
        );
        let headers = surface.of_kind(MarkerKind::Header);
        assert_eq!(headers.len(), 2);
        assert_eq!(
            headers[0].bound,
            Some(1),
            "group 1 bound by the sticky item"
        );
        assert_eq!(headers[0].clip, Some(Rect::new(0.0, 0.0, 300.0, 500.0)));
        assert_eq!(headers[1].bounds, Rect::new(0.0, 40.0, 300.0, 90.0));

        assert_eq!(deco.header_at(Point::new(5.0, 20.0)), Some(1));
        assert_eq!(deco.header_at(Point::new(5.0, 60.0)), Some(3));
        assert_eq!(deco.header_at(Point::new(5.0, 100.0)), None);
        assert_eq!(deco.footer_at(Point::new(5.0, 50.0)), Some(2));
    }

    #[test]
    fn incoming_header_covers_outgoing_one() {
        let mut deco = decorations(StickyConfig::new());
        let items = column(
            300.0,
            &[(1, -30.0, 10.0), (2, 10.0, 40.0), (3, 70.0, 120.0)],
        );
        let frame = Frame {
            viewport: vertical(300.0, 500.0),
            items: &items,
        };
        deco.draw_overlays(&frame, &mut RecordingSurface::default());
        assert_eq!(
            deco.header_rects().get(1),
            Some(Rect::new(0.0, -10.0, 300.0, 40.0))
        );
        assert_eq!(
            deco.header_rects().get(3),
            Some(Rect::new(0.0, 20.0, 300.0, 70.0))
        );
        assert_eq!(deco.header_at(Point::new(5.0, 30.0)), Some(3));
    }

    #[test]
    fn repeated_draws_are_idempotent() {
        let mut deco = decorations(StickyConfig::new());
        let items = column(
            300.0,
            &[(1, -30.0, 10.0), (2, 10.0, 40.0), (3, 90.0, 140.0)],
        );
        let frame = Frame {
            viewport: vertical(300.0, 500.0),
            items: &items,
        };
        deco.draw_overlays(&frame, &mut RecordingSurface::default());
        let headers = sorted(deco.header_rects());
        let footers = sorted(deco.footer_rects());
        let mut surface = RecordingSurface::default();
        deco.draw_overlays(&frame, &mut surface);
        assert_eq!(sorted(deco.header_rects()), headers);
        assert_eq!(sorted(deco.footer_rects()), footers);
        assert_eq!(surface.draws.len(), 3);
        assert_eq!(
            deco.headers.factory().created,
            2,
            "elements reused across frames"
        );
    }

    #[test]
    fn invalidate_headers_clears_hits_until_next_draw() {
        let mut deco = decorations(StickyConfig::new());
        let items = column(
            300.0,
            &[(1, -30.0, 10.0), (2, 10.0, 40.0), (3, 90.0, 140.0)],
        );
        let frame = Frame {
            viewport: vertical(300.0, 500.0),
            items: &items,
        };
        deco.draw_overlays(&frame, &mut RecordingSurface::default());
        assert_eq!(deco.header_at(Point::new(5.0, 20.0)), Some(1));

        deco.invalidate_headers();
        assert_eq!(deco.header_at(Point::new(5.0, 20.0)), None);
        assert_eq!(
            deco.footer_at(Point::new(5.0, 50.0)),
            Some(2),
            "footers untouched"
        );

        deco.draw_overlays(&frame, &mut RecordingSurface::default());
        assert_eq!(deco.header_at(Point::new(5.0, 20.0)), Some(1));
        assert_eq!(deco.headers.factory().created, 4, "headers rebuilt");
    }

    #[test]
    fn visibility_filter_hides_positions() {
        let mut deco = decorations(StickyConfig::new()).with_visibility(|p| p != 1);
        let items = column(
            300.0,
            &[(1, -30.0, 10.0), (2, 10.0, 40.0), (3, 90.0, 140.0)],
        );
        let frame = Frame {
            viewport: vertical(300.0, 500.0),
            items: &items,
        };
        deco.draw_overlays(&frame, &mut RecordingSurface::default());
        assert_eq!(deco.header_at(Point::new(5.0, 20.0)), None);
        assert_eq!(deco.header_at(Point::new(5.0, 60.0)), Some(3));
    }

    #[test]
    fn clip_follows_padding() {
        let mut deco = decorations(StickyConfig::new());
        let items = column(300.0, &[(3, 90.0, 140.0)]);
        let padded = vertical(300.0, 500.0).with_padding(Insets::new(4.0, 8.0, 4.0, 8.0));
        let mut surface = RecordingSurface::default();
        deco.draw_overlays(
            &Frame {
                viewport: padded,
                items: &items,
            },
            &mut surface,
        );
        assert_eq!(
            surface.draws[0].clip,
            Some(Rect::new(4.0, 8.0, 296.0, 492.0))
        );

        let mut surface = RecordingSurface::default();
        deco.draw_overlays(
            &Frame {
                viewport: padded.with_clip_to_padding(false),
                items: &items,
            },
            &mut surface,
        );
        assert_eq!(surface.draws[0].clip, None);
    }

    #[test]
    fn disabled_headers_are_not_drawn_or_hit() {
        let mut deco = decorations(StickyConfig::new().with_markers(MarkerKinds::FOOTERS));
        let items = column(
            300.0,
            &[(1, -30.0, 10.0), (2, 10.0, 40.0), (3, 90.0, 140.0)],
        );
        let frame = Frame {
            viewport: vertical(300.0, 500.0),
            items: &items,
        };
        let mut surface = RecordingSurface::default();
        deco.draw_overlays(&frame, &mut surface);
        assert!(surface.of_kind(MarkerKind::Header).is_empty());
        assert!(deco.header_rects().is_empty());
        assert_eq!(deco.header_at(Point::new(5.0, 20.0)), None);
        assert_eq!(surface.of_kind(MarkerKind::Footer).len(), 1);
    }

    #[test]
    fn items_without_position_are_skipped() {
        let mut deco = decorations(StickyConfig::new());
        let mut items = column(300.0, &[(0, 0.0, 40.0), (99, 40.0, 80.0)]);
        items[0].position = None;
        let frame = Frame {
            viewport: vertical(300.0, 500.0),
            items: &items,
        };
        let mut surface = RecordingSurface::default();
        deco.draw_overlays(&frame, &mut surface);
        assert!(surface.draws.is_empty());
    }

    #[test]
    fn sticky_footer_in_horizontal_list() {
        let mut deco = decorations(StickyConfig::new());
        let items = row(200.0, &[(4, 400.0, 470.0), (5, 470.0, 540.0)]);
        let frame = Frame {
            viewport: Viewport::new(Size::new(500.0, 200.0), Orientation::HORIZONTAL),
            items: &items,
        };
        let mut surface = RecordingSurface::default();
        deco.draw_overlays(&frame, &mut surface);
        assert_eq!(
            deco.footer_rects().get(5),
            Some(Rect::new(470.0, 0.0, 500.0, 200.0))
        );
        assert_eq!(deco.footer_at(Point::new(480.0, 100.0)), Some(5));
    }

    #[test]
    fn element_lookups() {
        let mut deco = StickyDecorations::new(
            Groups::new(&[1, -1], &[-1, 2]),
            TestFactory::new(50.0),
            TestFactory::new(30.0),
            StickyConfig::new(),
        )
        .unwrap();
        let viewport = vertical(300.0, 500.0);
        assert!(
            deco.cached_marker_mut(MarkerKind::Header, 0).is_none(),
            "nothing cached yet"
        );
        assert_eq!(
            deco.header_element(0, &viewport).map(|e| e.bound),
            Some(Some(0))
        );
        assert!(deco.header_element(1, &viewport).is_none());
        assert!(deco.footer_element(0, &viewport).is_none());
        assert_eq!(
            deco.footer_element(1, &viewport).map(|e| e.bound),
            Some(Some(1))
        );
        assert!(deco.header_element(2, &viewport).is_none());
        let (group, _) = deco.cached_marker_mut(MarkerKind::Header, 0).unwrap();
        assert_eq!(group, GroupId(1));
        assert!(MarkerKinds::HEADERS.has(MarkerKind::Header));
        assert!(!MarkerKinds::HEADERS.has(MarkerKind::Footer));
    }
}
