// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types: group identifiers, marker kinds, orientation, and per-frame viewport data.

use kurbo::{Insets, Rect, Size};

/// Group identifier associated with a list position.
///
/// Negative values mean "this position carries no marker of this kind".
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub i64);

impl GroupId {
    /// Sentinel used for positions without a marker and for out-of-range neighbors.
    pub const NONE: Self = Self(-1);

    /// Returns `true` if this id names an actual group (`>= 0`).
    #[must_use]
    pub const fn is_marker(self) -> bool {
        self.0 >= 0
    }
}

/// Which edge of a group a marker belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// Leading marker, pinned at the leading edge of the viewport.
    Header,
    /// Trailing marker, pinned at the trailing edge of the viewport.
    Footer,
}

impl MarkerKind {
    /// The [`MarkerKinds`] flag for this kind.
    #[must_use]
    pub const fn flag(self) -> MarkerKinds {
        match self {
            Self::Header => MarkerKinds::HEADERS,
            Self::Footer => MarkerKinds::FOOTERS,
        }
    }
}

bitflags::bitflags! {
    /// Set of marker kinds a decoration reserves space for, draws, and hit tests.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct MarkerKinds: u8 {
        /// Group headers.
        const HEADERS = 0b0000_0001;
        /// Group footers.
        const FOOTERS = 0b0000_0010;
    }
}

impl MarkerKinds {
    /// Returns `true` if `kind` is in the set.
    #[must_use]
    pub const fn has(self, kind: MarkerKind) -> bool {
        self.contains(kind.flag())
    }
}

impl Default for MarkerKinds {
    fn default() -> Self {
        Self::HEADERS | Self::FOOTERS
    }
}

/// Scroll axis of the list.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Items stack top to bottom; the primary axis is `y`.
    #[default]
    Vertical,
    /// Items stack left to right; the primary axis is `x`.
    Horizontal,
}

/// Scroll axis plus traversal direction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Orientation {
    /// Primary (scroll) axis.
    pub axis: Axis,
    /// `true` when positions are laid out from the trailing edge (reverse layout).
    pub reversed: bool,
}

impl Orientation {
    /// Vertical, not reversed.
    pub const VERTICAL: Self = Self {
        axis: Axis::Vertical,
        reversed: false,
    };

    /// Horizontal, not reversed.
    pub const HORIZONTAL: Self = Self {
        axis: Axis::Horizontal,
        reversed: false,
    };

    /// Returns the same axis with `reversed` set.
    #[must_use]
    pub const fn reversed(mut self) -> Self {
        self.reversed = true;
        self
    }
}

/// Snapshot of the host viewport for one layout or draw pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Size of the scroll container.
    pub size: Size,
    /// Inner padding of the scroll container.
    pub padding: Insets,
    /// Whether content is clipped to the padded box.
    ///
    /// When set, sticky markers pin against the padded edges and are drawn with
    /// a clip equal to [`Viewport::content_clip`].
    pub clip_to_padding: bool,
    /// Scroll axis and traversal direction.
    pub orientation: Orientation,
}

impl Viewport {
    /// Create a viewport with no padding that clips to padding.
    #[must_use]
    pub const fn new(size: Size, orientation: Orientation) -> Self {
        Self {
            size,
            padding: Insets::ZERO,
            clip_to_padding: true,
            orientation,
        }
    }

    /// Set the inner padding.
    #[must_use]
    pub const fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// Set whether content is clipped to the padded box.
    #[must_use]
    pub const fn with_clip_to_padding(mut self, clip: bool) -> Self {
        self.clip_to_padding = clip;
        self
    }

    /// Set the orientation.
    #[must_use]
    pub const fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Clip rectangle applied to markers, if any.
    #[must_use]
    pub fn content_clip(&self) -> Option<Rect> {
        self.clip_to_padding.then(|| {
            Rect::new(
                self.padding.x0,
                self.padding.y0,
                self.size.width - self.padding.x1,
                self.size.height - self.padding.y1,
            )
        })
    }

    /// Leading edge markers pin against along the primary axis.
    pub(crate) fn list_leading(&self) -> f64 {
        if self.clip_to_padding {
            self.orientation.axis.leading_inset(self.padding)
        } else {
            0.0
        }
    }

    /// Trailing edge markers pin against along the primary axis.
    pub(crate) fn list_trailing(&self) -> f64 {
        let axis = self.orientation.axis;
        let extent = axis.extent(self.size);
        if self.clip_to_padding {
            extent - axis.trailing_inset(self.padding)
        } else {
            extent
        }
    }
}

/// A realized list item as laid out by the host.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VisibleItem {
    /// Logical position, or `None` if the host cannot resolve one (e.g. the item is being removed).
    pub position: Option<usize>,
    /// On-screen rectangle in viewport coordinates, excluding decoration insets.
    pub rect: Rect,
    /// External margins of the item.
    pub margins: Insets,
}

impl VisibleItem {
    /// Create an item with zero margins.
    #[must_use]
    pub const fn new(position: usize, rect: Rect) -> Self {
        Self {
            position: Some(position),
            rect,
            margins: Insets::ZERO,
        }
    }

    /// Set the item's margins.
    #[must_use]
    pub const fn with_margins(mut self, margins: Insets) -> Self {
        self.margins = margins;
        self
    }
}

/// Everything the decorations need to know about one draw pass.
///
/// `items` are in host child order; for a reversed layout the host still lists
/// them in its own child order and [`Orientation::reversed`] tells the engine
/// to traverse them back to front.
#[derive(Copy, Clone, Debug)]
pub struct Frame<'a> {
    /// Viewport state for this pass.
    pub viewport: Viewport,
    /// Realized items.
    pub items: &'a [VisibleItem],
}
