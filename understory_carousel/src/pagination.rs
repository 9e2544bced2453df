// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding between a carousel and a pagination control.
//!
//! Both sides mirror the same current page. Every update says which side it
//! came from ([`ChangeOrigin`]), so the side that initiated a change is never
//! notified of its own change and the two cannot ping-pong.
//!
//! The flow in each direction:
//!
//! - **Track → control**: the track calls
//!   [`Pagination::set_current`] with [`ChangeOrigin::Track`]. The control
//!   updates its display and must not report this back as a user change.
//! - **Control → track**: the control records the user's choice (with
//!   [`ChangeOrigin::Control`]), and the host calls
//!   [`SlideTrack::pagination_changed`](crate::SlideTrack::pagination_changed)
//!   (or [`SlideTrack::select_page`](crate::SlideTrack::select_page), which
//!   does both steps). The track moves once and only writes back to the
//!   control if clamping changed the page.

/// Which side of the binding initiated a page change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangeOrigin {
    /// The carousel changed page (navigation call, swipe, auto-advance).
    Track,
    /// The pagination control changed page (user picked a page).
    Control,
}

/// A pagination control bound to a [`SlideTrack`](crate::SlideTrack).
pub trait Pagination {
    /// Currently selected page.
    fn current(&self) -> usize;

    /// Selects `page`.
    ///
    /// Implementations should clamp `page` into their size and must not raise
    /// a change notification when `origin` is [`ChangeOrigin::Track`].
    fn set_current(&mut self, page: usize, origin: ChangeOrigin);

    /// Sets the number of pages.
    fn set_size(&mut self, size: usize);
}

/// Minimal page indicator model: a page count and a selected page.
///
/// This is the control a carousel builds for itself when the host asks for
/// pagination without supplying its own control. Hosts render it (for
/// example as a row of dots) from [`size`](Self::size) and
/// [`current`](Self::current), and use [`revision`](Self::revision) to skip
/// redraws when nothing changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageIndicator {
    size: usize,
    current: usize,
    revision: u64,
    last_origin: Option<ChangeOrigin>,
}

impl PageIndicator {
    /// Creates an indicator with `size` pages and the first page selected.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Number of pages.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Revision counter, bumped whenever size or selection changes.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Side that made the most recent selection change, if any.
    #[must_use]
    pub fn last_origin(&self) -> Option<ChangeOrigin> {
        self.last_origin
    }

    fn clamp(&self, page: usize) -> usize {
        page.min(self.size.saturating_sub(1))
    }
}

impl Pagination for PageIndicator {
    fn current(&self) -> usize {
        self.current
    }

    fn set_current(&mut self, page: usize, origin: ChangeOrigin) {
        let page = self.clamp(page);
        if page != self.current {
            self.current = page;
            self.revision += 1;
            self.last_origin = Some(origin);
        }
    }

    fn set_size(&mut self, size: usize) {
        if size == self.size {
            return;
        }
        self.size = size;
        self.current = self.clamp(self.current);
        self.revision += 1;
    }
}
