// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The axis a carousel slides along.

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use kurbo::{Point, Rect, Size};

/// Direction in which slides are laid out and swiped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Axis {
    /// Horizontal strip; lengths are widths.
    #[default]
    X,
    /// Vertical strip; lengths are heights.
    Y,
}

impl Axis {
    /// Extent of `size` along this axis.
    #[must_use]
    pub fn main(self, size: Size) -> f64 {
        match self {
            Self::X => size.width,
            Self::Y => size.height,
        }
    }

    /// Extent of `size` perpendicular to this axis.
    #[must_use]
    pub fn cross(self, size: Size) -> f64 {
        match self {
            Self::X => size.height,
            Self::Y => size.width,
        }
    }

    /// Coordinate of `point` along this axis.
    #[must_use]
    pub fn main_coord(self, point: Point) -> f64 {
        match self {
            Self::X => point.x,
            Self::Y => point.y,
        }
    }

    /// Coordinate of `point` perpendicular to this axis.
    #[must_use]
    pub fn cross_coord(self, point: Point) -> f64 {
        match self {
            Self::X => point.y,
            Self::Y => point.x,
        }
    }

    /// Leading edge of `rect` along this axis (left for `X`, top for `Y`).
    #[must_use]
    pub fn leading_edge(self, rect: Rect) -> f64 {
        match self {
            Self::X => rect.x0,
            Self::Y => rect.y0,
        }
    }

    /// Returns `true` for the vertical axis.
    #[must_use]
    pub fn is_vertical(self) -> bool {
        self == Self::Y
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X => "x",
            Self::Y => "y",
        })
    }
}

/// Error returned when parsing an [`Axis`] from text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown axis `{0}`, expected `x` or `y`")]
pub struct ParseAxisError(String);

impl FromStr for Axis {
    type Err = ParseAxisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "x" | "X" => Ok(Self::X),
            "y" | "Y" => Ok(Self::Y),
            other => Err(ParseAxisError(other.to_string())),
        }
    }
}
