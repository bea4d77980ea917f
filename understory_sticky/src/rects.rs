// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Last-drawn marker rectangles, keyed by list position.

use hashbrown::HashMap;
use kurbo::{Point, Rect};

#[derive(Copy, Clone, Debug, PartialEq)]
struct Drawn {
    rect: Rect,
    /// Draw sequence number; higher was drawn later (and therefore on top).
    seq: u64,
}

/// Position → rectangle index for one marker kind.
///
/// Every draw pass overwrites the entries of the positions it draws. Entries of
/// positions that scrolled away are not pruned; they go stale until overwritten
/// or until [`PositionRects::clear`].
#[derive(Clone, Debug, Default)]
pub struct PositionRects {
    entries: HashMap<usize, Drawn>,
    next_seq: u64,
}

impl PositionRects {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the marker of `position` was just drawn at `rect`.
    pub fn record(&mut self, position: usize, rect: Rect) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.entries.insert(position, Drawn { rect, seq });
    }

    /// Last-drawn rectangle of `position`.
    pub fn get(&self, position: usize) -> Option<Rect> {
        self.entries.get(&position).map(|d| d.rect)
    }

    /// Number of recorded positions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget every rectangle.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.next_seq = 0;
    }

    /// Iterate `(position, rect)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Rect)> + '_ {
        self.entries.iter().map(|(p, d)| (*p, d.rect))
    }

    /// Position whose rectangle contains `point`, among those `accept` allows.
    ///
    /// When several rectangles contain the point, the most recently drawn wins,
    /// matching what is visually on top.
    pub fn hit(&self, point: Point, mut accept: impl FnMut(usize) -> bool) -> Option<usize> {
        self.entries
            .iter()
            .filter(|(_, d)| d.rect.contains(point))
            .filter(|(p, _)| accept(**p))
            .max_by_key(|(_, d)| d.seq)
            .map(|(p, _)| *p)
    }
}
