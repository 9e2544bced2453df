// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The carousel controller.

use alloc::boxed::Box;
use core::fmt;

use kurbo::Point;
use understory_timing::{Throttle, TimerId, TimerQueue};

use crate::axis::Axis;
use crate::gesture::{EventDisposition, Swipe, SwipePhase, snap_target};
use crate::layout::{Layout, LayoutStrategy};
use crate::options::CarouselOptions;
use crate::pagination::{ChangeOrigin, PageIndicator, Pagination};
use crate::surface::Surface;

/// Period of the built-in follow loop, for hosts without an animation-frame
/// clock (about 30 frames per second).
pub const FRAME_FALLBACK_INTERVAL: u64 = 33;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TrackTimer {
    AutoAdvance,
    FollowFrame,
}

/// A carousel: a track of items paged through a fixed-size container.
///
/// `SlideTrack` owns the paging state and drives a host [`Surface`]. Layout
/// state changes only in two places: [`measure`](Self::measure) recomputes the
/// [`Layout`] from the surface, and [`set_slide`](Self::set_slide) moves the
/// track to a page. Everything else (swipes, resizes, pagination clicks,
/// auto-advance) funnels into those two.
///
/// ## Driving the track
///
/// - Forward pointer events to [`pointer_down`](Self::pointer_down),
///   [`pointer_move`](Self::pointer_move) and [`pointer_up`](Self::pointer_up),
///   and apply the returned [`EventDisposition`] to the native event.
/// - Forward viewport resizes to [`viewport_resized`](Self::viewport_resized).
/// - Call [`tick`](Self::tick) with a monotonic millisecond timestamp whenever
///   [`next_deadline`](Self::next_deadline) comes due (or simply every
///   frame). The track never sees a clock outside `tick`, so a timer armed
///   between ticks (auto-advance, the follow loop) starts counting at the next
///   `tick`, and time spent idle before that never counts toward it. While
///   such a timer is waiting, `next_deadline` returns a timestamp that has
///   already passed: tick right away.
/// - Hosts with an animation-frame clock may also call
///   [`animation_frame`](Self::animation_frame) each frame while it returns
///   `true`; the track then follows the pointer at display rate.
pub struct SlideTrack<S> {
    surface: S,
    options: CarouselOptions,
    strategy: LayoutStrategy,
    layout: Layout,
    measured: bool,
    current: usize,
    pagination: Option<Box<dyn Pagination>>,
    on_change: Option<Box<dyn FnMut(usize)>>,
    swipe: Option<Swipe>,
    timers: TimerQueue<TrackTimer>,
    follow_task: Option<TimerId>,
    auto_advance: Option<TimerId>,
    resize: Throttle,
}

impl<S: fmt::Debug> fmt::Debug for SlideTrack<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlideTrack")
            .field("surface", &self.surface)
            .field("options", &self.options)
            .field("strategy", &self.strategy)
            .field("layout", &self.layout)
            .field("current", &self.current)
            .field("paginated", &self.pagination.is_some())
            .field("swipe", &self.swipe)
            .finish_non_exhaustive()
    }
}

impl<S: Surface> SlideTrack<S> {
    /// Creates a carousel over `surface`, measures it, and shows
    /// `options.initial_slide` (clamped).
    pub fn new(surface: S, options: CarouselOptions) -> Self {
        let strategy = LayoutStrategy::for_surface(&surface);
        let resize = Throttle::new(options.resize_throttle);
        let mut track = Self {
            surface,
            strategy,
            layout: Layout::default(),
            measured: false,
            current: options.initial_slide,
            pagination: None,
            on_change: None,
            swipe: None,
            timers: TimerQueue::new(),
            follow_task: None,
            auto_advance: None,
            resize,
            options,
        };
        track.measure();
        track.set_auto_advance(track.options.auto_advance);
        track
    }

    /// Registers a callback invoked with the page index on every
    /// [`set_slide`](Self::set_slide).
    #[must_use]
    pub fn with_on_change(mut self, on_change: impl FnMut(usize) + 'static) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }

    /// Binds a pagination control, sizing it to the current page count and
    /// selecting the current page.
    #[must_use]
    pub fn with_pagination(mut self, mut pagination: Box<dyn Pagination>) -> Self {
        pagination.set_size(self.layout.num_slides);
        pagination.set_current(self.current, ChangeOrigin::Track);
        self.pagination = Some(pagination);
        self
    }

    /// Binds a fresh [`PageIndicator`].
    #[must_use]
    pub fn with_page_indicator(self) -> Self {
        let indicator = PageIndicator::new(self.layout.num_slides);
        self.with_pagination(Box::new(indicator))
    }

    /// The surface being driven.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface, for example to change its contents
    /// before calling [`measure`](Self::measure).
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consumes the track, returning the surface. Pending timers are dropped.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// The options the track was created with.
    pub fn options(&self) -> &CarouselOptions {
        &self.options
    }

    /// Axis the track slides along.
    pub fn axis(&self) -> Axis {
        self.options.axis
    }

    /// Layout from the most recent measurement.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// How items are positioned inside the track.
    pub fn strategy(&self) -> LayoutStrategy {
        self.strategy
    }

    /// Number of pages.
    pub fn num_slides(&self) -> usize {
        self.layout.num_slides
    }

    /// The bound pagination control, if any.
    pub fn pagination(&self) -> Option<&dyn Pagination> {
        self.pagination.as_deref()
    }

    /// The gesture in progress, if any.
    pub fn swipe(&self) -> Option<&Swipe> {
        self.swipe.as_ref()
    }

    /// Re-measures the surface and re-applies the current page.
    ///
    /// Locks the cross-axis extent, recomputes items per page and page count,
    /// updates centering padding and the hider, places items when the surface
    /// needs explicit placement, resizes the pagination control when the page
    /// count changed, and finally re-clamps and re-applies the current page.
    pub fn measure(&mut self) {
        let axis = self.options.axis;
        let layout = Layout::measure(&self.surface, axis);
        if layout.is_degenerate() {
            log::warn!(
                "degenerate carousel layout: {} item(s) of length {} in container of length {}",
                layout.item_count,
                layout.item_length,
                layout.container_length
            );
        }
        let pages_changed = !self.measured || layout.num_slides != self.layout.num_slides;
        self.layout = layout;
        self.measured = true;
        log::debug!(
            "measured carousel: {} per page, {} page(s), stride {}",
            layout.items_per_slide,
            layout.num_slides,
            layout.stride
        );

        self.surface.lock_cross_extent(axis, layout.item_cross_length);
        if self.options.center {
            self.surface.set_track_padding(axis, layout.center_gap());
        }
        self.update_hider();
        self.strategy.apply(&mut self.surface, axis, &layout);

        if pages_changed
            && let Some(pagination) = self.pagination.as_mut()
        {
            pagination.set_size(layout.num_slides);
        }
        self.set_slide(index_of(self.slide()), false);
    }

    /// Alias for [`measure`](Self::measure).
    pub fn refit(&mut self) {
        self.measure();
    }

    /// Current page.
    ///
    /// Reads the pagination control when one is bound; the two are kept in
    /// sync by every page change.
    pub fn slide(&self) -> usize {
        self.pagination
            .as_ref()
            .map_or(self.current, |pagination| pagination.current())
    }

    /// Moves to page `index` and returns the page actually shown.
    ///
    /// With `wrap`, the index is first reduced modulo the page count (negative
    /// indices count back from the end). The result is then clamped to the
    /// valid pages, the track is moved, the change callback runs, and the
    /// pagination control and hider are updated.
    pub fn set_slide(&mut self, index: isize, wrap: bool) -> usize {
        let index = if wrap {
            self.layout.wrap_slide(index)
        } else {
            index
        };
        let slide = self.layout.clamp_slide(index);
        let axis = self.options.axis;

        self.surface
            .set_track_offset(axis, self.layout.offset_for(slide));
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(slide);
        }
        self.current = slide;
        if let Some(pagination) = self.pagination.as_mut()
            && pagination.current() != slide
        {
            pagination.set_current(slide, ChangeOrigin::Track);
        }
        self.update_hider();
        slide
    }

    /// Moves one page forward.
    pub fn next_slide(&mut self, wrap: bool) -> usize {
        self.set_slide(index_of(self.slide()).saturating_add(1), wrap)
    }

    /// Moves one page back.
    pub fn previous_slide(&mut self, wrap: bool) -> usize {
        self.set_slide(index_of(self.slide()).saturating_sub(1), wrap)
    }

    /// Change path of the pagination control: moves the track to the page the
    /// control now shows.
    ///
    /// Call this after the user picked a page on the bound control. The track
    /// moves exactly once; the control is written back only if the page had to
    /// be clamped.
    pub fn pagination_changed(&mut self) -> usize {
        let page = self.slide();
        log::debug!("pagination selected page {page}");
        self.set_slide(index_of(page), false)
    }

    /// Selects `page` on the bound pagination control as if the user had
    /// picked it, then follows it with [`pagination_changed`](Self::pagination_changed).
    ///
    /// Without a bound control this is a plain [`set_slide`](Self::set_slide).
    pub fn select_page(&mut self, page: usize) -> usize {
        match self.pagination.as_mut() {
            Some(pagination) => {
                pagination.set_current(page, ChangeOrigin::Control);
                self.pagination_changed()
            }
            None => self.set_slide(index_of(page), false),
        }
    }

    /// Replaces the auto-advance interval in milliseconds; `0` stops it.
    ///
    /// The first advance comes one interval after the next [`tick`](Self::tick).
    /// Auto-advance is not paused during user interaction.
    pub fn set_auto_advance(&mut self, interval: u64) {
        if let Some(id) = self.auto_advance.take() {
            self.timers.cancel(id);
        }
        self.options.auto_advance = interval;
        if interval > 0 {
            self.auto_advance = Some(
                self.timers
                    .schedule_repeating(interval, TrackTimer::AutoAdvance),
            );
        }
    }

    /// Records a viewport resize at `now`; re-measures at most once per
    /// [`resize_throttle`](CarouselOptions::resize_throttle) window, with a
    /// trailing re-measure delivered by [`tick`](Self::tick).
    pub fn viewport_resized(&mut self, now: u64) {
        if self.resize.request(now) {
            self.measure();
        }
    }

    /// Runs every timer due at `now`: trailing resize, auto-advance, and the
    /// fallback follow loop.
    pub fn tick(&mut self, now: u64) {
        if self.resize.poll(now) {
            self.measure();
        }
        for fired in self.timers.advance_to(now) {
            match fired.key {
                TrackTimer::AutoAdvance => {
                    let slide = self.next_slide(true);
                    log::trace!("auto-advanced to page {slide}");
                }
                TrackTimer::FollowFrame => {
                    self.animation_frame();
                }
            }
        }
    }

    /// Host timestamp at which [`tick`](Self::tick) next has work to do.
    ///
    /// A timestamp in the past (including `0` before the first tick) means a
    /// timer is waiting for a tick to start counting. `None` means nothing is
    /// scheduled.
    pub fn next_deadline(&self) -> Option<u64> {
        match (self.timers.next_deadline(), self.resize.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// One step of the follow loop: moves the track under the pointer.
    ///
    /// Returns `true` while a swipe is in progress and more frames are wanted.
    /// Once the gesture is over, the loop's fallback timer is cancelled and
    /// this returns `false`.
    pub fn animation_frame(&mut self) -> bool {
        let axis = self.options.axis;
        let container_leading = axis.leading_edge(self.surface.container_rect());
        let Some(swipe) = self.swipe.as_mut().filter(|swipe| swipe.is_swiping()) else {
            self.stop_follow();
            return false;
        };
        if let Some(offset) = swipe.follow_offset(axis, container_leading) {
            swipe.record_offset(offset);
            self.surface.set_track_offset(axis, offset);
        }
        true
    }

    /// Pointer went down at `position` with `touch_count` active touches.
    ///
    /// Only single-touch sequences are tracked; additional touches abort the
    /// gesture in progress.
    pub fn pointer_down(&mut self, position: Point, touch_count: usize) -> EventDisposition {
        if !self.options.swipe {
            return EventDisposition::empty();
        }
        if touch_count != 1 {
            self.abort_swipe();
            return EventDisposition::empty();
        }
        self.stop_follow();
        let track_rect = self.surface.track_rect();
        self.swipe = Some(Swipe::begin(position, track_rect, self.slide()));
        self.surface.set_transition_enabled(false);
        log::trace!("swipe started at {position:?}");
        EventDisposition::STOP_PROPAGATION
    }

    /// Pointer moved to `position` with `touch_count` active touches.
    pub fn pointer_move(&mut self, position: Point, touch_count: usize) -> EventDisposition {
        if touch_count > 1 {
            self.abort_swipe();
            return EventDisposition::empty();
        }
        let axis = self.options.axis;
        let Some(swipe) = self.swipe.as_mut() else {
            return EventDisposition::empty();
        };
        let undecided = swipe.phase() == SwipePhase::Tracking;
        match swipe.pointer_moved(position, axis) {
            SwipePhase::Swiping => {
                if undecided {
                    self.start_follow();
                }
                EventDisposition::PREVENT_DEFAULT | EventDisposition::STOP_PROPAGATION
            }
            SwipePhase::Scrolling | SwipePhase::Tracking => EventDisposition::STOP_PROPAGATION,
        }
    }

    /// Pointer released: settles a swipe on a page.
    ///
    /// A gesture that was never classified as a swipe (no move, or a
    /// cross-axis scroll) leaves the page unchanged.
    pub fn pointer_up(&mut self) -> EventDisposition {
        let Some(mut swipe) = self.swipe.take() else {
            return EventDisposition::empty();
        };
        self.stop_follow();

        let axis = self.options.axis;
        let container_leading = axis.leading_edge(self.surface.container_rect());
        let mut disposition = EventDisposition::empty();
        if let Some(offset) = swipe.follow_offset(axis, container_leading) {
            swipe.record_offset(offset);
        }
        if let Some(last_offset) = swipe.last_offset() {
            let target = snap_target(
                last_offset,
                &self.layout,
                swipe.start_slide(),
                self.options.snap_threshold,
            );
            let slide = self.set_slide(target, false);
            log::debug!(
                "swipe from page {} settled on page {slide}",
                swipe.start_slide()
            );
            disposition = EventDisposition::STOP_PROPAGATION;
        }
        self.surface.set_transition_enabled(true);
        disposition
    }

    fn abort_swipe(&mut self) {
        let Some(swipe) = self.swipe.take() else {
            return;
        };
        log::trace!("swipe aborted by multi-touch");
        self.stop_follow();
        if swipe.is_swiping() {
            let axis = self.options.axis;
            self.surface
                .set_track_offset(axis, self.layout.offset_for(self.current));
        }
        self.surface.set_transition_enabled(true);
    }

    fn start_follow(&mut self) {
        self.stop_follow();
        self.follow_task = Some(
            self.timers
                .schedule_repeating(FRAME_FALLBACK_INTERVAL, TrackTimer::FollowFrame),
        );
        self.animation_frame();
    }

    fn stop_follow(&mut self) {
        if let Some(id) = self.follow_task.take() {
            self.timers.cancel(id);
        }
    }

    fn update_hider(&mut self) {
        if !self.options.hide_last {
            return;
        }
        let extent = if self.current == 0 {
            self.layout.hider_extent(self.options.center)
        } else {
            0.0
        };
        self.surface.set_hider_extent(self.options.axis, extent);
    }
}

fn index_of(slide: usize) -> isize {
    isize::try_from(slide).unwrap_or(isize::MAX)
}
