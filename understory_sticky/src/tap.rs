// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-pointer tap recognition.
//!
//! A press becomes a tap when it is released within a travel slop and a time
//! limit. Movement beyond the slop at any point during the press rejects it,
//! even if the pointer comes back before release.
//!
//! ```
//! use understory_sticky::TapState;
//! use kurbo::Point;
//!
//! let mut tap = TapState::with_thresholds(Some(10.0), Some(500));
//! tap.on_down(Point::new(10.0, 20.0), 1000);
//! assert!(!tap.on_move(Point::new(15.0, 25.0)));
//! assert!(tap.on_up(Point::new(16.0, 26.0), 1200));
//! ```

use kurbo::Point;

use crate::config::{DEFAULT_TAP_SLOP, DEFAULT_TAP_TIMEOUT};

/// State of the active press.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Press {
    /// Pointer position at press time.
    pub down_position: Point,
    /// Timestamp of the press in milliseconds.
    pub down_time: u64,
    /// True once the pointer travelled past the slop.
    pub slop_exceeded: bool,
}

/// Tap recognizer for one pointer.
#[derive(Clone, Debug)]
pub struct TapState {
    press: Option<Press>,
    /// Travel allowed before the press stops counting as a tap, or `None` for unlimited.
    pub slop: Option<f64>,
    /// Duration in milliseconds allowed before release, or `None` for unlimited.
    pub timeout: Option<u64>,
}

impl TapState {
    /// Create a recognizer with the default 8px slop and 300ms timeout.
    pub fn new() -> Self {
        Self::with_thresholds(Some(DEFAULT_TAP_SLOP), Some(DEFAULT_TAP_TIMEOUT))
    }

    /// Create a recognizer with custom thresholds.
    pub fn with_thresholds(slop: Option<f64>, timeout: Option<u64>) -> Self {
        Self {
            press: None,
            slop,
            timeout,
        }
    }

    /// Start a press, replacing any press already in progress.
    pub fn on_down(&mut self, position: Point, timestamp: u64) {
        self.press = Some(Press {
            down_position: position,
            down_time: timestamp,
            slop_exceeded: false,
        });
    }

    /// Track movement of the active press.
    ///
    /// Returns `true` if this move pushed the press past the slop.
    pub fn on_move(&mut self, position: Point) -> bool {
        let Some(press) = self.press.as_mut() else {
            return false;
        };
        if press.slop_exceeded {
            return false;
        }
        let exceeded = self
            .slop
            .is_some_and(|slop| press.down_position.distance(position) > slop);
        press.slop_exceeded = exceeded;
        exceeded
    }

    /// End the active press; returns `true` if it was a tap.
    pub fn on_up(&mut self, position: Point, timestamp: u64) -> bool {
        let Some(press) = self.press.take() else {
            return false;
        };
        if press.slop_exceeded {
            return false;
        }
        let travel_ok = self
            .slop
            .is_none_or(|slop| press.down_position.distance(position) <= slop);
        let time_ok = self
            .timeout
            .is_none_or(|timeout| timestamp.saturating_sub(press.down_time) <= timeout);
        travel_ok && time_ok
    }

    /// Abandon the active press. Returns `true` if one was active.
    pub fn cancel(&mut self) -> bool {
        self.press.take().is_some()
    }

    /// Returns `true` while a press is active.
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// The active press, if any.
    pub fn press(&self) -> Option<&Press> {
        self.press.as_ref()
    }
}

impl Default for TapState {
    fn default() -> Self {
        Self::new()
    }
}
