// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paging arithmetic: how many items fit per page and where each page sits.

use crate::axis::Axis;
use crate::surface::Surface;

/// Measured layout of a carousel, recomputed wholesale by every measurement.
///
/// All lengths are along the active axis unless noted otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Layout {
    /// Length of the visible container.
    pub container_length: f64,
    /// Length of one item (the first item is taken as representative).
    pub item_length: f64,
    /// Extent of one item perpendicular to the axis.
    pub item_cross_length: f64,
    /// Total number of items.
    pub item_count: usize,
    /// Whole items that fit in the container.
    pub items_per_slide: usize,
    /// Number of pages.
    pub num_slides: usize,
    /// Distance the track moves per page.
    pub stride: f64,
}

impl Layout {
    /// Measures `surface` along `axis`.
    ///
    /// The first item is taken as representative of all items.
    #[must_use]
    pub fn measure<S: Surface + ?Sized>(surface: &S, axis: Axis) -> Self {
        let item_count = surface.item_count();
        let container_length = axis.main(surface.container_rect().size());
        let (item_length, item_cross_length) = if item_count > 0 {
            let item = surface.item_size(0);
            (axis.main(item), axis.cross(item))
        } else {
            (0.0, 0.0)
        };
        Self::from_lengths(container_length, item_length, item_cross_length, item_count)
    }

    /// Computes a layout from raw lengths.
    ///
    /// A well-formed layout needs at least one item whose length fits in the
    /// container. When that does not hold, the layout is
    /// [degenerate](Self::is_degenerate) and falls back to one item per page
    /// so that paging stays finite.
    #[must_use]
    pub fn from_lengths(
        container_length: f64,
        item_length: f64,
        item_cross_length: f64,
        item_count: usize,
    ) -> Self {
        let fit = libm::floor(container_length / item_length);
        let items_per_slide = if fit >= 1.0 && fit.is_finite() {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "finite and at least one; saturates for absurd ratios"
            )]
            {
                fit as usize
            }
        } else {
            1
        };
        Self {
            container_length,
            item_length,
            item_cross_length,
            item_count,
            items_per_slide,
            num_slides: item_count.div_ceil(items_per_slide),
            stride: items_per_slide as f64 * item_length,
        }
    }

    /// Returns `true` when the measurement did not satisfy the layout
    /// preconditions (no items, non-positive item length, or a container
    /// shorter than one item).
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        let fits = self.item_length > 0.0 && self.container_length >= self.item_length;
        self.item_count == 0 || !fits
    }

    /// Index of the last page, or `0` when there are no pages.
    #[must_use]
    pub fn last_slide(&self) -> usize {
        self.num_slides.saturating_sub(1)
    }

    /// Clamps a requested page into `[0, last_slide]`.
    #[must_use]
    pub fn clamp_slide(&self, index: isize) -> usize {
        usize::try_from(index).map_or(0, |index| index.min(self.last_slide()))
    }

    /// Wraps a requested page around the page count.
    ///
    /// Negative indices count back from the end (`-1` is the last page), for
    /// any magnitude. With no pages the index is returned unchanged.
    #[must_use]
    pub fn wrap_slide(&self, index: isize) -> isize {
        match isize::try_from(self.num_slides) {
            Ok(n) if n > 0 => index.rem_euclid(n),
            _ => index,
        }
    }

    /// Track offset that shows page `slide`.
    #[must_use]
    pub fn offset_for(&self, slide: usize) -> f64 {
        -(slide as f64 * self.stride)
    }

    /// Space left over after the whole items of one page, floored.
    #[must_use]
    pub fn leftover(&self) -> f64 {
        libm::floor(self.container_length - self.item_length * self.items_per_slide as f64)
    }

    /// Leading/trailing padding that centers one page's items.
    #[must_use]
    pub fn center_gap(&self) -> f64 {
        libm::floor(
            (self.container_length - self.item_length * self.items_per_slide as f64) / 2.0,
        )
    }

    /// Extent of the overlay hiding the partial next page.
    ///
    /// When centered, only the trailing half of the leftover space shows the
    /// next page.
    #[must_use]
    pub fn hider_extent(&self, centered: bool) -> f64 {
        let gap = self.leftover();
        if centered { gap / 2.0 } else { gap }
    }
}

/// How items are positioned inside the track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LayoutStrategy {
    /// Items flow one after another; the surface lays them out.
    #[default]
    InlineFlow,
    /// Each item is placed explicitly at `index * item_length`.
    ///
    /// Used for surfaces that cannot flow items in a line on their own.
    AbsolutePosition,
}

impl LayoutStrategy {
    /// Picks the strategy matching the surface's capabilities.
    #[must_use]
    pub fn for_surface<S: Surface + ?Sized>(surface: &S) -> Self {
        if surface.supports_inline_flow() {
            Self::InlineFlow
        } else {
            Self::AbsolutePosition
        }
    }

    /// Positions items on `surface` according to this strategy.
    pub fn apply<S: Surface + ?Sized>(self, surface: &mut S, axis: Axis, layout: &Layout) {
        match self {
            Self::InlineFlow => {}
            Self::AbsolutePosition => {
                for index in 0..layout.item_count {
                    surface.place_item(index, axis, index as f64 * layout.item_length);
                }
            }
        }
    }
}
