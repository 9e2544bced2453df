// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering surface a carousel measures and positions.
//!
//! A carousel is made of three host-owned pieces: a container that clips the
//! visible region, a track (strip) inside it holding every item, and the items
//! themselves. [`Surface`] is the seam between the headless
//! [`SlideTrack`](crate::SlideTrack) and whatever draws those pieces: DOM
//! elements, retained widgets, or a test double.
//!
//! [`MemorySurface`] keeps everything in memory and records what the track
//! asked for. It is used by the tests and is a reasonable starting point for
//! hosts that apply the recorded state to their own widgets after each event.

use alloc::vec::Vec;

use kurbo::{Rect, Size, Vec2};

use crate::axis::Axis;

/// Measurement and styling capabilities the carousel needs from its host.
///
/// All rectangles are in the same coordinate space as the pointer positions
/// passed to [`SlideTrack::pointer_down`](crate::SlideTrack::pointer_down)
/// (typically viewport pixels).
pub trait Surface {
    /// Outer bounds of the container element.
    fn container_rect(&self) -> Rect;

    /// Current bounds of the track, including any offset applied to it.
    fn track_rect(&self) -> Rect;

    /// Number of slide items in the track.
    fn item_count(&self) -> usize;

    /// Outer size of the item at `index`.
    fn item_size(&self, index: usize) -> Size;

    /// Whether items flow one after the other without explicit placement.
    ///
    /// Surfaces that cannot lay items out in a row (or column) on their own
    /// return `false`, and the carousel positions every item explicitly.
    fn supports_inline_flow(&self) -> bool {
        true
    }

    /// Moves the track to `offset` along `axis`, relative to the container's
    /// leading edge.
    fn set_track_offset(&mut self, axis: Axis, offset: f64);

    /// Fixes the extent perpendicular to `axis` so items do not wrap.
    ///
    /// For [`Axis::X`] this is the track height; for [`Axis::Y`] the width of
    /// both the container and the track.
    fn lock_cross_extent(&mut self, axis: Axis, extent: f64);

    /// Pads the track's leading and trailing edges along `axis`.
    fn set_track_padding(&mut self, axis: Axis, padding: f64);

    /// Enables or disables the animated transition on the track's offset.
    fn set_transition_enabled(&mut self, enabled: bool);

    /// Sizes the overlay that hides the trailing partial page.
    ///
    /// Surfaces without such an overlay can ignore this.
    fn set_hider_extent(&mut self, axis: Axis, extent: f64) {
        let _ = (axis, extent);
    }

    /// Places the item at `index` at `offset` along `axis`.
    ///
    /// Only called when [`supports_inline_flow`](Self::supports_inline_flow)
    /// returns `false`.
    fn place_item(&mut self, index: usize, axis: Axis, offset: f64);
}

/// In-memory [`Surface`] that records the state applied to it.
#[derive(Clone, Debug)]
pub struct MemorySurface {
    container: Rect,
    items: Vec<Size>,
    inline_flow: bool,
    axis: Axis,
    track_offset: Vec2,
    track_offset_writes: usize,
    cross_extent: Option<f64>,
    padding: f64,
    transition_enabled: bool,
    hider_extent: f64,
    item_offsets: Vec<Option<f64>>,
}

impl MemorySurface {
    /// Creates a surface with the given container bounds and item sizes.
    #[must_use]
    pub fn new(container: Rect, items: impl IntoIterator<Item = Size>) -> Self {
        let items: Vec<Size> = items.into_iter().collect();
        let item_offsets = alloc::vec![None; items.len()];
        Self {
            container,
            items,
            inline_flow: true,
            axis: Axis::X,
            track_offset: Vec2::ZERO,
            track_offset_writes: 0,
            cross_extent: None,
            padding: 0.0,
            transition_enabled: true,
            hider_extent: 0.0,
            item_offsets,
        }
    }

    /// Creates a surface with `count` items of identical `item` size.
    #[must_use]
    pub fn uniform(container: Rect, item: Size, count: usize) -> Self {
        Self::new(container, core::iter::repeat_n(item, count))
    }

    /// Sets whether the surface lays items out on its own.
    #[must_use]
    pub fn with_inline_flow(mut self, inline_flow: bool) -> Self {
        self.inline_flow = inline_flow;
        self
    }

    /// Replaces the container bounds, as a responsive layout change would.
    pub fn set_container(&mut self, container: Rect) {
        self.container = container;
    }

    /// Replaces all items.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = Size>) {
        self.items = items.into_iter().collect();
        self.item_offsets = alloc::vec![None; self.items.len()];
    }

    /// Offset last applied to the track along the active axis.
    #[must_use]
    pub fn track_offset(&self) -> Vec2 {
        self.track_offset
    }

    /// Number of times the track offset has been written.
    #[must_use]
    pub fn track_offset_writes(&self) -> usize {
        self.track_offset_writes
    }

    /// Cross-axis extent locked by the last measurement.
    #[must_use]
    pub fn cross_extent(&self) -> Option<f64> {
        self.cross_extent
    }

    /// Leading/trailing padding applied to the track.
    #[must_use]
    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Whether the track's offset transition is enabled.
    #[must_use]
    pub fn transition_enabled(&self) -> bool {
        self.transition_enabled
    }

    /// Extent of the overlay covering the trailing partial page.
    #[must_use]
    pub fn hider_extent(&self) -> f64 {
        self.hider_extent
    }

    /// Explicit placement of the item at `index`, if one was applied.
    #[must_use]
    pub fn item_offset(&self, index: usize) -> Option<f64> {
        self.item_offsets.get(index).copied().flatten()
    }
}

impl Surface for MemorySurface {
    fn container_rect(&self) -> Rect {
        self.container
    }

    fn track_rect(&self) -> Rect {
        let origin = self.container.origin() + self.track_offset;
        let (main, cross) = self.items.iter().fold((0.0, 0.0_f64), |(main, cross), item| {
            (main + self.axis.main(*item), cross.max(self.axis.cross(*item)))
        });
        let content = match self.axis {
            Axis::X => Size::new(main, cross),
            Axis::Y => Size::new(cross, main),
        };
        Rect::from_origin_size(origin, content)
    }

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn item_size(&self, index: usize) -> Size {
        self.items.get(index).copied().unwrap_or(Size::ZERO)
    }

    fn supports_inline_flow(&self) -> bool {
        self.inline_flow
    }

    fn set_track_offset(&mut self, axis: Axis, offset: f64) {
        self.axis = axis;
        self.track_offset = match axis {
            Axis::X => Vec2::new(offset, 0.0),
            Axis::Y => Vec2::new(0.0, offset),
        };
        self.track_offset_writes += 1;
    }

    fn lock_cross_extent(&mut self, axis: Axis, extent: f64) {
        self.axis = axis;
        self.cross_extent = Some(extent);
    }

    fn set_track_padding(&mut self, _axis: Axis, padding: f64) {
        self.padding = padding;
    }

    fn set_transition_enabled(&mut self, enabled: bool) {
        self.transition_enabled = enabled;
    }

    fn set_hider_extent(&mut self, _axis: Axis, extent: f64) {
        self.hider_extent = extent;
    }

    fn place_item(&mut self, index: usize, _axis: Axis, offset: f64) {
        if let Some(slot) = self.item_offsets.get_mut(index) {
            *slot = Some(offset);
        }
    }
}
