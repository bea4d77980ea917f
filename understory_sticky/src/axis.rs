// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-relative accessors so placement code is written once for both orientations.
//!
//! "Leading" and "trailing" are along the primary (scroll) axis; "cross" is the
//! perpendicular axis. For [`Axis::Vertical`] leading is top and cross-leading is left.

use kurbo::{Insets, Rect, Size, Vec2};

use crate::types::Axis;

impl Axis {
    pub(crate) fn leading(self, rect: Rect) -> f64 {
        match self {
            Self::Vertical => rect.y0,
            Self::Horizontal => rect.x0,
        }
    }

    pub(crate) fn trailing(self, rect: Rect) -> f64 {
        match self {
            Self::Vertical => rect.y1,
            Self::Horizontal => rect.x1,
        }
    }

    pub(crate) fn cross_leading(self, rect: Rect) -> f64 {
        match self {
            Self::Vertical => rect.x0,
            Self::Horizontal => rect.y0,
        }
    }

    /// Size along the primary axis.
    pub(crate) fn extent(self, size: Size) -> f64 {
        match self {
            Self::Vertical => size.height,
            Self::Horizontal => size.width,
        }
    }

    /// Size along the cross axis.
    pub(crate) fn cross_extent(self, size: Size) -> f64 {
        match self {
            Self::Vertical => size.width,
            Self::Horizontal => size.height,
        }
    }

    pub(crate) fn leading_inset(self, insets: Insets) -> f64 {
        match self {
            Self::Vertical => insets.y0,
            Self::Horizontal => insets.x0,
        }
    }

    pub(crate) fn trailing_inset(self, insets: Insets) -> f64 {
        match self {
            Self::Vertical => insets.y1,
            Self::Horizontal => insets.x1,
        }
    }

    pub(crate) fn cross_leading_inset(self, insets: Insets) -> f64 {
        match self {
            Self::Vertical => insets.x0,
            Self::Horizontal => insets.y0,
        }
    }

    pub(crate) fn cross_trailing_inset(self, insets: Insets) -> f64 {
        match self {
            Self::Vertical => insets.x1,
            Self::Horizontal => insets.y1,
        }
    }

    /// Sum of the leading and trailing insets.
    pub(crate) fn inset_sum(self, insets: Insets) -> f64 {
        self.leading_inset(insets) + self.trailing_inset(insets)
    }

    /// Rect of `size` whose leading edge sits at `primary` and cross-leading edge at `cross`.
    pub(crate) fn rect(self, primary: f64, cross: f64, size: Size) -> Rect {
        match self {
            Self::Vertical => Rect::from_origin_size((cross, primary), size),
            Self::Horizontal => Rect::from_origin_size((primary, cross), size),
        }
    }

    /// Moves `rect` by `delta` along the primary axis.
    pub(crate) fn translate(self, rect: Rect, delta: f64) -> Rect {
        match self {
            Self::Vertical => rect + Vec2::new(0.0, delta),
            Self::Horizontal => rect + Vec2::new(delta, 0.0),
        }
    }

    /// Insets with only the primary-axis edges set.
    pub(crate) fn insets(self, leading: f64, trailing: f64) -> Insets {
        match self {
            Self::Vertical => Insets::new(0.0, leading, 0.0, trailing),
            Self::Horizontal => Insets::new(leading, 0.0, trailing, 0.0),
        }
    }
}
