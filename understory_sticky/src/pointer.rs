// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer routing: intercepting presses over markers and dispatching taps into them.
//!
//! Markers are drawn as overlays, so the host's own hit testing never sees
//! them. The router sits in front of the host's input handling:
//!
//! - [`PointerRouter::on_pointer_down`] reports whether a marker is under the
//!   pointer; if so the host should keep the gesture away from the items below.
//! - [`PointerRouter::on_pointer_up`] turns a recognized tap into a synthetic
//!   activation of the marker's subtree and notifies the activation listener.

use alloc::boxed::Box;

use kurbo::Point;

use crate::config::{ConfigError, StickyConfig};
use crate::decorations::StickyDecorations;
use crate::host::{ActivationNode, GroupSource, MarginResolver, MarkerFactory};
use crate::tap::TapState;
use crate::types::{GroupId, MarkerKind};

/// A tap delivered to a marker.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MarkerActivation {
    /// Kind of the tapped marker.
    pub kind: MarkerKind,
    /// List position whose marker was tapped.
    pub position: usize,
    /// Group the marker represents.
    pub group: GroupId,
    /// Pointer location in viewport coordinates.
    pub point: Point,
    /// Number of nodes in the marker's subtree that handled the activation.
    pub handled: usize,
}

type ActivationListener = Box<dyn FnMut(&MarkerActivation)>;

/// Routes pointer input to sticky markers.
pub struct PointerRouter {
    tap: TapState,
    listener: Option<ActivationListener>,
}

impl core::fmt::Debug for PointerRouter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PointerRouter")
            .field("tap", &self.tap)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl PointerRouter {
    /// Create a router using the tap thresholds of `config`.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`StickyConfig::validate`].
    pub fn new(config: &StickyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            tap: TapState::with_thresholds(config.tap_slop, config.tap_timeout),
            listener: None,
        })
    }

    /// Register the callback told about every marker activation.
    pub fn set_activation_listener(&mut self, listener: impl FnMut(&MarkerActivation) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Remove the activation callback.
    pub fn clear_activation_listener(&mut self) {
        self.listener = None;
    }

    /// Tap recognizer state.
    pub fn tap(&self) -> &TapState {
        &self.tap
    }

    /// Handle a pointer press. Returns `true` if a marker is under `point` and
    /// the host should intercept the gesture.
    pub fn on_pointer_down<S, H, F, M>(
        &mut self,
        decorations: &StickyDecorations<S, H, F, M>,
        point: Point,
        timestamp: u64,
    ) -> bool
    where
        S: GroupSource,
        H: MarkerFactory,
        F: MarkerFactory<Element = H::Element>,
        M: MarginResolver<H::Element>,
    {
        let over_marker =
            decorations.header_at(point).is_some() || decorations.footer_at(point).is_some();
        if over_marker {
            self.tap.on_down(point, timestamp);
        } else {
            self.tap.cancel();
        }
        over_marker
    }

    /// Handle pointer movement. Returns `true` if the press stopped being a tap candidate.
    pub fn on_pointer_move(&mut self, point: Point) -> bool {
        self.tap.on_move(point)
    }

    /// Abandon the current press.
    pub fn on_pointer_cancel(&mut self) {
        self.tap.cancel();
    }

    /// Handle a pointer release; dispatches into the marker under `point` if the
    /// press was a tap.
    pub fn on_pointer_up<S, H, F, M>(
        &mut self,
        decorations: &mut StickyDecorations<S, H, F, M>,
        point: Point,
        timestamp: u64,
    ) -> Option<MarkerActivation>
    where
        S: GroupSource,
        H: MarkerFactory,
        F: MarkerFactory<Element = H::Element>,
        M: MarginResolver<H::Element>,
    {
        if !self.tap.on_up(point, timestamp) {
            return None;
        }
        self.activate_at(decorations, point)
    }

    /// Activate the marker under `point`, headers before footers.
    ///
    /// Returns `None` if no marker is under the point or its element is no
    /// longer cached.
    pub fn activate_at<S, H, F, M>(
        &mut self,
        decorations: &mut StickyDecorations<S, H, F, M>,
        point: Point,
    ) -> Option<MarkerActivation>
    where
        S: GroupSource,
        H: MarkerFactory,
        F: MarkerFactory<Element = H::Element>,
        M: MarginResolver<H::Element>,
    {
        let (kind, position) = match decorations.header_at(point) {
            Some(position) => (MarkerKind::Header, position),
            None => (MarkerKind::Footer, decorations.footer_at(point)?),
        };
        let bounds = decorations.drawn_rect(kind, position)?;
        let Some((group, element)) = decorations.cached_marker_mut(kind, position) else {
            log::debug!("{kind:?} at {position} was hit but is no longer cached");
            return None;
        };
        let handled = dispatch_activation(element, bounds.origin(), point, position);
        let activation = MarkerActivation {
            kind,
            position,
            group,
            point,
            handled,
        };
        log::trace!(
            "activated {kind:?} of group {} at {position} ({handled} handled)",
            group.0
        );
        if let Some(listener) = self.listener.as_mut() {
            listener(&activation);
        }
        Some(activation)
    }
}

/// Activate every visible node under `point`, children before their parent.
///
/// `parent_origin` is the screen position of the node's parent. Returns the
/// number of nodes that handled the activation.
pub fn dispatch_activation(
    node: &mut dyn ActivationNode,
    parent_origin: Point,
    point: Point,
    position: usize,
) -> usize {
    let frame = node.frame() + parent_origin.to_vec2();
    let mut handled = 0;
    for index in 0..node.child_count() {
        if let Some(child) = node.child_mut(index) {
            handled += dispatch_activation(child, frame.origin(), point, position);
        }
    }
    if node.is_visible() && frame.contains(point) && node.activate(position) {
        handled += 1;
    }
    handled
}
