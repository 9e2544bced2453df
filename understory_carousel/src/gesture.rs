// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swipe recognition: axis locking, live follow offsets, and the snap decision.
//!
//! A [`Swipe`] lives from pointer-down to pointer-up:
//!
//! 1) [`Swipe::begin`] records where the pointer landed, both in absolute
//!    terms and relative to the track's leading edge. The phase is
//!    [`SwipePhase::Tracking`].
//! 2) The first [`Swipe::pointer_moved`] decides, once, whether the motion is
//!    along the carousel axis ([`SwipePhase::Swiping`]) or across it
//!    ([`SwipePhase::Scrolling`], handed back to the page). Ties count as a
//!    swipe.
//! 3) While swiping, [`Swipe::follow_offset`] gives the track offset that keeps
//!    the grabbed point under the pointer.
//! 4) On release, [`snap_target`] turns the last offset into a page.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_carousel::{Axis, Swipe, SwipePhase};
//!
//! let track = Rect::new(0.0, 0.0, 900.0, 100.0);
//! let mut swipe = Swipe::begin(Point::new(50.0, 50.0), track, 0);
//!
//! assert_eq!(swipe.pointer_moved(Point::new(20.0, 55.0), Axis::X), SwipePhase::Swiping);
//! assert_eq!(swipe.follow_offset(Axis::X, 0.0), Some(-30.0));
//! ```

use kurbo::{Point, Rect, Vec2};

use crate::axis::Axis;
use crate::layout::Layout;

bitflags::bitflags! {
    /// What the host should do with the native event after the carousel
    /// handled it.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EventDisposition: u8 {
        /// Suppress the platform's default action (scrolling the page).
        const PREVENT_DEFAULT  = 0b0000_0001;
        /// Do not deliver the event to ancestors.
        const STOP_PROPAGATION = 0b0000_0010;
    }
}

/// Where a swipe is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwipePhase {
    /// Pointer is down; no movement yet.
    Tracking,
    /// Movement is along the carousel axis; the track follows the pointer.
    Swiping,
    /// Movement is across the carousel axis; the page scrolls instead.
    Scrolling,
}

/// State of one pointer-down to pointer-up sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Swipe {
    start: Point,
    in_track: Vec2,
    start_slide: usize,
    phase: SwipePhase,
    pointer_pos: Option<f64>,
    last_offset: Option<f64>,
}

impl Swipe {
    /// Starts tracking a pointer that went down at `pointer` over a track
    /// currently occupying `track_rect`, while `start_slide` is showing.
    #[must_use]
    pub fn begin(pointer: Point, track_rect: Rect, start_slide: usize) -> Self {
        Self {
            start: pointer,
            in_track: pointer - track_rect.origin(),
            start_slide,
            phase: SwipePhase::Tracking,
            pointer_pos: None,
            last_offset: None,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> SwipePhase {
        self.phase
    }

    /// Returns `true` once the gesture was classified as a swipe.
    #[must_use]
    pub fn is_swiping(&self) -> bool {
        self.phase == SwipePhase::Swiping
    }

    /// Page that was showing when the pointer went down.
    #[must_use]
    pub fn start_slide(&self) -> usize {
        self.start_slide
    }

    /// Where the pointer went down.
    #[must_use]
    pub fn start(&self) -> Point {
        self.start
    }

    /// Latest pointer coordinate along the axis, once swiping.
    #[must_use]
    pub fn pointer_pos(&self) -> Option<f64> {
        self.pointer_pos
    }

    /// Last offset applied to the track while following the pointer.
    #[must_use]
    pub fn last_offset(&self) -> Option<f64> {
        self.last_offset
    }

    /// Feeds a pointer move and returns the resulting phase.
    ///
    /// The axis decision is made on the first move only; later moves never
    /// reclassify the gesture.
    pub fn pointer_moved(&mut self, pointer: Point, axis: Axis) -> SwipePhase {
        if self.phase == SwipePhase::Tracking {
            let along = (axis.main_coord(pointer) - axis.main_coord(self.start)).abs();
            let across = (axis.cross_coord(pointer) - axis.cross_coord(self.start)).abs();
            self.phase = if across > along {
                SwipePhase::Scrolling
            } else {
                SwipePhase::Swiping
            };
            log::trace!("swipe classified as {:?} (along {along}, across {across})", self.phase);
        }
        if self.phase == SwipePhase::Swiping {
            self.pointer_pos = Some(axis.main_coord(pointer));
        }
        self.phase
    }

    /// Track offset that keeps the grabbed point under the pointer, given the
    /// container's leading edge.
    ///
    /// Returns `None` until the gesture is swiping with a known pointer.
    #[must_use]
    pub fn follow_offset(&self, axis: Axis, container_leading: f64) -> Option<f64> {
        if !self.is_swiping() {
            return None;
        }
        let in_track = match axis {
            Axis::X => self.in_track.x,
            Axis::Y => self.in_track.y,
        };
        self.pointer_pos
            .map(|pointer| pointer - in_track - container_leading)
    }

    /// Records the offset that was applied to the track.
    pub fn record_offset(&mut self, offset: f64) {
        self.last_offset = Some(offset);
    }
}

/// Chooses the page to settle on after a swipe released at `last_offset`.
///
/// The released position is converted into a fractional page estimate. If it
/// rounds to `start_slide`, the gesture only turns the page when it moved more
/// than `threshold` of a page away from it; otherwise the rounded estimate
/// wins. The result may be out of range and is expected to be clamped by the
/// caller.
#[must_use]
pub fn snap_target(last_offset: f64, layout: &Layout, start_slide: usize, threshold: f64) -> isize {
    let progress = -last_offset;
    let estimate = progress / layout.item_length / layout.items_per_slide as f64;
    let rounded = libm::round(estimate);
    let start = start_slide as f64;

    let target = if rounded == start {
        let diff = estimate - start;
        if diff.abs() > threshold {
            if diff > 0.0 { start + 1.0 } else { start - 1.0 }
        } else {
            start
        }
    } else {
        rounded
    };

    #[expect(
        clippy::cast_possible_truncation,
        reason = "page estimates are small; NaN and overflow saturate and get clamped by the caller"
    )]
    {
        target as isize
    }
}
