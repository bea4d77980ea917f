// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Setup-time configuration and its validation errors.

use core::fmt;

use crate::types::MarkerKinds;

/// Default pointer travel, in logical pixels, before a press stops counting as a tap.
pub const DEFAULT_TAP_SLOP: f64 = 8.0;

/// Default press duration, in milliseconds, before a press stops counting as a tap.
pub const DEFAULT_TAP_TIMEOUT: u64 = 300;

/// Configuration shared by [`StickyDecorations`](crate::StickyDecorations) and
/// [`PointerRouter`](crate::PointerRouter).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StickyConfig {
    /// Marker kinds that get spacing, overlays, and hit testing.
    pub markers: MarkerKinds,
    /// Tap slop in logical pixels, or `None` for unlimited travel.
    pub tap_slop: Option<f64>,
    /// Tap timeout in milliseconds, or `None` for unlimited duration.
    pub tap_timeout: Option<u64>,
}

impl Default for StickyConfig {
    fn default() -> Self {
        Self {
            markers: MarkerKinds::default(),
            tap_slop: Some(DEFAULT_TAP_SLOP),
            tap_timeout: Some(DEFAULT_TAP_TIMEOUT),
        }
    }
}

impl StickyConfig {
    /// Create the default configuration (headers and footers, default tap thresholds).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the marker kinds.
    #[must_use]
    pub fn with_markers(mut self, markers: MarkerKinds) -> Self {
        self.markers = markers;
        self
    }

    /// Set tap thresholds. `None` disables the corresponding check.
    #[must_use]
    pub fn with_tap_thresholds(mut self, slop: Option<f64>, timeout: Option<u64>) -> Self {
        self.tap_slop = slop;
        self.tap_timeout = timeout;
        self
    }

    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NoMarkerKinds`] if `markers` is empty.
    /// - [`ConfigError::InvalidTapSlop`] if `tap_slop` is negative or not finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.markers.is_empty() {
            return Err(ConfigError::NoMarkerKinds);
        }
        if let Some(slop) = self.tap_slop
            && !(slop.is_finite() && slop >= 0.0)
        {
            return Err(ConfigError::InvalidTapSlop(slop));
        }
        Ok(())
    }
}

/// Errors reported when wiring sticky decorations.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The configuration enables neither headers nor footers.
    NoMarkerKinds,
    /// The tap slop is negative or not finite.
    InvalidTapSlop(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMarkerKinds => write!(f, "no marker kinds are enabled"),
            Self::InvalidTapSlop(slop) => {
                write!(f, "tap slop must be finite and >= 0 (got {slop})")
            }
        }
    }
}

impl core::error::Error for ConfigError {}
