// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host stand-ins shared by the unit tests.

use alloc::vec::Vec;

use kurbo::{Insets, Point, Rect, Size};

use crate::host::{
    ActivationNode, GroupSource, MarkerElement, MarkerFactory, MeasureSpec, OverlaySurface,
};
use crate::types::{GroupId, MarkerKind, Orientation, Viewport, VisibleItem};

/// Group ids backed by two vectors.
#[derive(Clone, Debug)]
pub(crate) struct Groups {
    headers: Vec<i64>,
    footers: Vec<i64>,
}

impl Groups {
    pub(crate) fn new(headers: &[i64], footers: &[i64]) -> Self {
        assert_eq!(headers.len(), footers.len());
        Self {
            headers: headers.to_vec(),
            footers: footers.to_vec(),
        }
    }

    /// Same ids for headers and footers.
    pub(crate) fn uniform(ids: &[i64]) -> Self {
        Self::new(ids, ids)
    }
}

impl GroupSource for Groups {
    fn item_count(&self) -> usize {
        self.headers.len()
    }

    fn header_group(&self, position: usize) -> GroupId {
        GroupId(self.headers[position])
    }

    fn footer_group(&self, position: usize) -> GroupId {
        GroupId(self.footers[position])
    }
}

/// A node inside a test marker.
#[derive(Clone, Debug)]
pub(crate) struct TestNode {
    pub(crate) frame: Rect,
    pub(crate) visible: bool,
    pub(crate) handles: bool,
    pub(crate) activations: Vec<usize>,
    pub(crate) children: Vec<Self>,
}

impl TestNode {
    pub(crate) fn new(frame: Rect) -> Self {
        Self {
            frame,
            visible: true,
            handles: true,
            activations: Vec::new(),
            children: Vec::new(),
        }
    }

    pub(crate) fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub(crate) fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }
}

impl ActivationNode for TestNode {
    fn frame(&self) -> Rect {
        self.frame
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn child_mut(&mut self, index: usize) -> Option<&mut dyn ActivationNode> {
        self.children
            .get_mut(index)
            .map(|c| c as &mut dyn ActivationNode)
    }

    fn activate(&mut self, position: usize) -> bool {
        self.activations.push(position);
        self.handles
    }
}

/// Marker produced by [`TestFactory`].
#[derive(Clone, Debug)]
pub(crate) struct TestMarker {
    pub(crate) serial: usize,
    pub(crate) bound: Option<usize>,
    pub(crate) desired: Size,
    pub(crate) size: Size,
    pub(crate) margins: Insets,
    pub(crate) activations: Vec<usize>,
    pub(crate) children: Vec<TestNode>,
}

impl ActivationNode for TestMarker {
    fn frame(&self) -> Rect {
        Rect::from_origin_size(Point::ORIGIN, self.size)
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn child_mut(&mut self, index: usize) -> Option<&mut dyn ActivationNode> {
        self.children
            .get_mut(index)
            .map(|c| c as &mut dyn ActivationNode)
    }

    fn activate(&mut self, position: usize) -> bool {
        self.activations.push(position);
        true
    }
}

impl MarkerElement for TestMarker {
    fn measure(&mut self, spec: MeasureSpec) -> Size {
        self.size = Size::new(
            spec.width.resolve(self.desired.width),
            spec.height.resolve(self.desired.height),
        );
        self.size
    }

    fn size(&self) -> Size {
        self.size
    }

    fn margins(&self) -> Insets {
        self.margins
    }
}

/// Factory whose markers want `extent` along both axes.
#[derive(Clone, Debug)]
pub(crate) struct TestFactory {
    pub(crate) extent: f64,
    pub(crate) margins: Insets,
    pub(crate) children: Vec<TestNode>,
    pub(crate) created: usize,
}

impl TestFactory {
    pub(crate) fn new(extent: f64) -> Self {
        Self {
            extent,
            margins: Insets::ZERO,
            children: Vec::new(),
            created: 0,
        }
    }

    pub(crate) fn with_margins(mut self, margins: Insets) -> Self {
        self.margins = margins;
        self
    }

    pub(crate) fn with_child(mut self, child: TestNode) -> Self {
        self.children.push(child);
        self
    }
}

impl MarkerFactory for TestFactory {
    type Element = TestMarker;

    fn create(&mut self, _viewport: &Viewport) -> TestMarker {
        self.created += 1;
        TestMarker {
            serial: self.created,
            bound: None,
            desired: Size::new(self.extent, self.extent),
            size: Size::ZERO,
            margins: self.margins,
            activations: Vec::new(),
            children: self.children.clone(),
        }
    }

    fn bind(&mut self, element: &mut TestMarker, position: usize) {
        element.bound = Some(position);
    }
}

/// One recorded `draw_marker` call.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Draw {
    pub(crate) kind: MarkerKind,
    pub(crate) bound: Option<usize>,
    pub(crate) bounds: Rect,
    pub(crate) clip: Option<Rect>,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct RecordingSurface {
    pub(crate) draws: Vec<Draw>,
}

impl RecordingSurface {
    pub(crate) fn of_kind(&self, kind: MarkerKind) -> Vec<&Draw> {
        self.draws.iter().filter(|d| d.kind == kind).collect()
    }
}

impl OverlaySurface<TestMarker> for RecordingSurface {
    fn draw_marker(
        &mut self,
        kind: MarkerKind,
        element: &TestMarker,
        bounds: Rect,
        clip: Option<Rect>,
    ) {
        self.draws.push(Draw {
            kind,
            bound: element.bound,
            bounds,
            clip,
        });
    }
}

/// Unpadded vertical viewport.
pub(crate) fn vertical(width: f64, height: f64) -> Viewport {
    Viewport::new(Size::new(width, height), Orientation::VERTICAL)
}

/// Items stacked vertically, `(position, top, bottom)`, spanning `width`.
pub(crate) fn column(width: f64, spans: &[(usize, f64, f64)]) -> Vec<VisibleItem> {
    spans
        .iter()
        .map(|&(p, y0, y1)| VisibleItem::new(p, Rect::new(0.0, y0, width, y1)))
        .collect()
}

/// Items laid out horizontally, `(position, left, right)`, spanning `height`.
pub(crate) fn row(height: f64, spans: &[(usize, f64, f64)]) -> Vec<VisibleItem> {
    spans
        .iter()
        .map(|&(p, x0, x1)| VisibleItem::new(p, Rect::new(x0, 0.0, x1, height)))
        .collect()
}
