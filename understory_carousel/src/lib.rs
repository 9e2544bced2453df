// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_carousel --heading-base-level=0

//! Understory Carousel: a headless slide track.
//!
//! A carousel shows a strip of equally sized items through a fixed-size
//! container, one page at a time. This crate computes everything about that
//! except the drawing:
//!
//! - [`Layout`]: how many items fit per page, how many pages exist, and the
//!   stride the track moves per page, measured from a [`Surface`].
//! - [`SlideTrack`]: the controller. It moves the track between pages
//!   ([`SlideTrack::set_slide`], [`SlideTrack::next_slide`],
//!   [`SlideTrack::previous_slide`]), re-measures on viewport resize
//!   (throttled), auto-advances on a timer, and follows touch swipes.
//! - [`Swipe`]: the gesture recognizer behind swipes. The first move locks the
//!   gesture to either swiping the carousel or scrolling the page; release
//!   snaps to a page.
//! - [`Pagination`]: binding to a page indicator control, with
//!   [`PageIndicator`] as a ready-made model.
//! - [`CarouselOptions`]: settings, including parsing from markup attributes.
//!
//! The crate does not own any element tree, event loop, or clock. Hosts
//! implement [`Surface`] over their widgets (or use [`MemorySurface`] and copy
//! the recorded state out), forward pointer and resize events, and call
//! [`SlideTrack::tick`] with a monotonic timestamp.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use understory_carousel::{CarouselOptions, MemorySurface, SlideTrack};
//!
//! // Ten 100x80 items in a 350px wide container: 3 per page, 4 pages.
//! let surface = MemorySurface::uniform(
//!     Rect::new(0.0, 0.0, 350.0, 80.0),
//!     Size::new(100.0, 80.0),
//!     10,
//! );
//! let mut track = SlideTrack::new(surface, CarouselOptions::default());
//! assert_eq!(track.num_slides(), 4);
//!
//! track.next_slide(false);
//! assert_eq!(track.slide(), 1);
//! assert_eq!(track.surface().track_offset().x, -300.0);
//!
//! // Wrapping past the last page comes back to the first.
//! track.set_slide(4, true);
//! assert_eq!(track.slide(), 0);
//!
//! // A swipe to the left by more than a page moves forward.
//! track.pointer_down(Point::new(300.0, 40.0), 1);
//! track.pointer_move(Point::new(100.0, 42.0), 1);
//! track.pointer_move(Point::new(-20.0, 42.0), 1);
//! track.pointer_up();
//! assert_eq!(track.slide(), 1);
//! ```
//!
//! ## Preconditions
//!
//! Layout needs at least one item whose length fits in the container. A
//! measurement that violates this is logged and treated as one item per page;
//! the carousel keeps working but will not look right.
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: page commits and measurements
//! at `debug`, gesture and timer details at `trace`, degenerate layouts at
//! `warn`. It never installs a logger.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod axis;
mod gesture;
mod layout;
mod options;
mod pagination;
mod surface;
mod track;

pub use axis::{Axis, ParseAxisError};
pub use gesture::{EventDisposition, Swipe, SwipePhase, snap_target};
pub use layout::{Layout, LayoutStrategy};
pub use options::{
    CarouselOptions, DEFAULT_RESIZE_THROTTLE, DEFAULT_SNAP_THRESHOLD, OptionsError,
};
pub use pagination::{ChangeOrigin, PageIndicator, Pagination};
pub use surface::{MemorySurface, Surface};
pub use track::{FRAME_FALLBACK_INTERVAL, SlideTrack};
