// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-group marker element cache.

use hashbrown::HashMap;

use crate::host::{Constraint, MarkerElement, MarkerFactory, MeasureSpec};
use crate::types::{Axis, GroupId, MarkerKind, Viewport};

/// Lazily creates and caches one marker element per group id.
///
/// All positions that share a group share the same element, which is what keeps
/// a sticky marker visually stable as its owning position changes while scrolling.
/// Elements live until [`MarkerCache::invalidate`].
pub struct MarkerCache<F: MarkerFactory> {
    kind: MarkerKind,
    factory: F,
    elements: HashMap<GroupId, F::Element>,
}

impl<F: MarkerFactory> core::fmt::Debug for MarkerCache<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MarkerCache")
            .field("kind", &self.kind)
            .field("cached", &self.elements.len())
            .finish_non_exhaustive()
    }
}

impl<F: MarkerFactory> MarkerCache<F> {
    /// Create an empty cache backed by `factory`.
    pub fn new(kind: MarkerKind, factory: F) -> Self {
        Self {
            kind,
            factory,
            elements: HashMap::new(),
        }
    }

    /// Marker kind this cache serves.
    pub fn kind(&self) -> MarkerKind {
        self.kind
    }

    /// Shared access to the factory.
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Mutable access to the factory.
    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    /// Number of cached elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Cached element for `group`, without creating one.
    pub fn get(&self, group: GroupId) -> Option<&F::Element> {
        self.elements.get(&group)
    }

    /// Mutable cached element for `group`, without creating one.
    pub fn get_mut(&mut self, group: GroupId) -> Option<&mut F::Element> {
        self.elements.get_mut(&group)
    }

    /// Element for `group`, creating, binding to `position`, and measuring it on first use.
    ///
    /// New elements are measured with the cross axis fixed to the viewport's
    /// padded cross extent and the primary axis unbounded.
    pub fn get_or_create(
        &mut self,
        group: GroupId,
        position: usize,
        viewport: &Viewport,
    ) -> &mut F::Element {
        debug_assert!(
            group.is_marker(),
            "marker requested for position {position} without a group"
        );
        let kind = self.kind;
        let factory = &mut self.factory;
        self.elements.entry(group).or_insert_with(|| {
            let mut element = factory.create(viewport);
            factory.bind(&mut element, position);
            let size = element.measure(measure_spec(viewport));
            log::trace!(
                "created {kind:?} marker for group {} at {position}: {size:?}",
                group.0
            );
            element
        })
    }

    /// Drop every cached element; the next lookup rebuilds.
    pub fn invalidate(&mut self) {
        if !self.elements.is_empty() {
            log::debug!(
                "dropping {} cached {:?} markers",
                self.elements.len(),
                self.kind
            );
        }
        self.elements.clear();
    }
}

fn measure_spec(viewport: &Viewport) -> MeasureSpec {
    let axis = viewport.orientation.axis;
    let cross = (axis.cross_extent(viewport.size)
        - axis.cross_leading_inset(viewport.padding)
        - axis.cross_trailing_inset(viewport.padding))
    .max(0.0);
    match axis {
        Axis::Vertical => MeasureSpec {
            width: Constraint::Exact(cross),
            height: Constraint::Unbounded,
        },
        Axis::Horizontal => MeasureSpec {
            width: Constraint::Unbounded,
            height: Constraint::Exact(cross),
        },
    }
}
