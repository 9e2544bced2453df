// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carousel configuration: defaults, chainable setters, and attribute parsing.
//!
//! Hosts that declare carousels in markup usually carry their settings as
//! `data-*` attributes on the container. [`CarouselOptions::from_attributes`]
//! turns those key/value pairs into options, starting from the defaults:
//!
//! ```
//! use understory_carousel::{Axis, CarouselOptions};
//!
//! let opts = CarouselOptions::from_attributes([
//!     ("data-axis", "y"),
//!     ("data-auto-advance", "3000"),
//!     ("data-hide-last", "true"),
//!     ("class", "carousel"), // ignored
//! ])
//! .unwrap();
//!
//! assert_eq!(opts.axis, Axis::Y);
//! assert_eq!(opts.auto_advance, 3000);
//! assert!(opts.hide_last);
//! assert!(opts.swipe);
//! ```

use alloc::string::{String, ToString};
use core::str::FromStr;

use crate::axis::{Axis, ParseAxisError};

/// Default fraction of one page a swipe must cover to turn the page.
pub const DEFAULT_SNAP_THRESHOLD: f64 = 0.1;

/// Default rate limit for re-measuring on viewport resize, in milliseconds.
pub const DEFAULT_RESIZE_THROTTLE: u64 = 200;

/// Settings for a [`SlideTrack`](crate::SlideTrack).
///
/// The change callback and the pagination control are handed to the track
/// directly since they are live objects rather than settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct CarouselOptions {
    /// Milliseconds between automatic advances to the next slide; `0` disables.
    pub auto_advance: u64,
    /// Axis the slides are laid out along.
    pub axis: Axis,
    /// Center the visible items, splitting the leftover space evenly.
    pub center: bool,
    /// Slide shown after construction. Clamped to the available slides.
    pub initial_slide: usize,
    /// Cover the partially visible next page while on the first page.
    pub hide_last: bool,
    /// Track touch swipes.
    pub swipe: bool,
    /// Fraction of a page a swipe must cover to move to the neighbouring page.
    pub snap_threshold: f64,
    /// Minimum milliseconds between re-measurements caused by viewport resizes.
    pub resize_throttle: u64,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            auto_advance: 0,
            axis: Axis::X,
            center: false,
            initial_slide: 0,
            hide_last: false,
            swipe: true,
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
            resize_throttle: DEFAULT_RESIZE_THROTTLE,
        }
    }
}

impl CarouselOptions {
    /// Sets [`auto_advance`](Self::auto_advance).
    #[must_use]
    pub fn with_auto_advance(mut self, millis: u64) -> Self {
        self.auto_advance = millis;
        self
    }

    /// Sets [`axis`](Self::axis).
    #[must_use]
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Sets [`center`](Self::center).
    #[must_use]
    pub fn with_center(mut self, center: bool) -> Self {
        self.center = center;
        self
    }

    /// Sets [`initial_slide`](Self::initial_slide).
    #[must_use]
    pub fn with_initial_slide(mut self, slide: usize) -> Self {
        self.initial_slide = slide;
        self
    }

    /// Sets [`hide_last`](Self::hide_last).
    #[must_use]
    pub fn with_hide_last(mut self, hide_last: bool) -> Self {
        self.hide_last = hide_last;
        self
    }

    /// Sets [`swipe`](Self::swipe).
    #[must_use]
    pub fn with_swipe(mut self, swipe: bool) -> Self {
        self.swipe = swipe;
        self
    }

    /// Sets [`snap_threshold`](Self::snap_threshold).
    #[must_use]
    pub fn with_snap_threshold(mut self, threshold: f64) -> Self {
        self.snap_threshold = threshold;
        self
    }

    /// Sets [`resize_throttle`](Self::resize_throttle).
    #[must_use]
    pub fn with_resize_throttle(mut self, millis: u64) -> Self {
        self.resize_throttle = millis;
        self
    }

    /// Builds options from markup attributes, starting from the defaults.
    ///
    /// Keys are matched with or without a `data-` prefix, in kebab-case
    /// (`auto-advance`, `axis`, `center`, `initial-slide`, `hide-last`,
    /// `swipe`, `snap-threshold`, `resize-throttle`). Unknown keys are
    /// ignored. Booleans accept `true`/`false`, `1`/`0` and `yes`/`no`; an
    /// empty value counts as `true`, as for a bare HTML attribute.
    pub fn from_attributes<'a, I>(attributes: I) -> Result<Self, OptionsError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut opts = Self::default();
        for (key, value) in attributes {
            let key = key.strip_prefix("data-").unwrap_or(key);
            match key {
                "auto-advance" => opts.auto_advance = parse_int(key, value)?,
                "axis" => {
                    opts.axis = value
                        .parse()
                        .map_err(|source| OptionsError::Axis { source })?;
                }
                "center" => opts.center = parse_bool(key, value)?,
                "initial-slide" => opts.initial_slide = parse_int(key, value)?,
                "hide-last" => opts.hide_last = parse_bool(key, value)?,
                "swipe" => opts.swipe = parse_bool(key, value)?,
                "snap-threshold" => {
                    let threshold: f64 = value.trim().parse().map_err(|_| {
                        OptionsError::InvalidNumber {
                            key: key.to_string(),
                            value: value.to_string(),
                        }
                    })?;
                    if !(0.0..1.0).contains(&threshold) {
                        return Err(OptionsError::SnapThresholdOutOfRange(threshold));
                    }
                    opts.snap_threshold = threshold;
                }
                "resize-throttle" => opts.resize_throttle = parse_int(key, value)?,
                _ => log::trace!("ignoring carousel attribute `{key}`"),
            }
        }
        Ok(opts)
    }
}

/// Error returned by [`CarouselOptions::from_attributes`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum OptionsError {
    /// A value that must be a non-negative integer was not.
    #[error("`{key}` expects a non-negative integer, got `{value}`")]
    InvalidInteger {
        /// Attribute name, without the `data-` prefix.
        key: String,
        /// Offending value.
        value: String,
    },
    /// A value that must be a boolean was not.
    #[error("`{key}` expects a boolean, got `{value}`")]
    InvalidBoolean {
        /// Attribute name, without the `data-` prefix.
        key: String,
        /// Offending value.
        value: String,
    },
    /// A value that must be a number was not.
    #[error("`{key}` expects a number, got `{value}`")]
    InvalidNumber {
        /// Attribute name, without the `data-` prefix.
        key: String,
        /// Offending value.
        value: String,
    },
    /// The snap threshold must be a fraction of a page.
    #[error("snap threshold must be in [0, 1), got {0}")]
    SnapThresholdOutOfRange(f64),
    /// The axis was neither `x` nor `y`.
    #[error("invalid axis")]
    Axis {
        /// Underlying parse error.
        #[source]
        source: ParseAxisError,
    },
}

fn parse_int<T: FromStr>(key: &str, value: &str) -> Result<T, OptionsError> {
    value
        .trim()
        .parse()
        .map_err(|_| OptionsError::InvalidInteger {
            key: key.to_string(),
            value: value.to_string(),
        })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, OptionsError> {
    match value.trim() {
        "" | "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(OptionsError::InvalidBoolean {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
