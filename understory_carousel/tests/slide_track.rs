// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_carousel` crate.
//!
//! These drive a `SlideTrack` over a `MemorySurface` through navigation,
//! re-measurement, pagination binding, swipes, auto-advance and resize
//! throttling, checking what ends up applied to the surface.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect, Size};
use understory_carousel::{
    Axis, CarouselOptions, ChangeOrigin, EventDisposition, FRAME_FALLBACK_INTERVAL, LayoutStrategy,
    MemorySurface, Pagination, SlideTrack, SwipePhase,
};

/// Ten 100x80 items in a 350px container: 3 per page, 4 pages, stride 300.
fn surface() -> MemorySurface {
    MemorySurface::uniform(
        Rect::new(0.0, 0.0, 350.0, 80.0),
        Size::new(100.0, 80.0),
        10,
    )
}

fn track(options: CarouselOptions) -> SlideTrack<MemorySurface> {
    SlideTrack::new(surface(), options)
}

#[derive(Debug, Default)]
struct PaginationLog {
    current: usize,
    calls: Vec<(usize, ChangeOrigin)>,
    sizes: Vec<usize>,
}

/// Pagination control that records every call and does not clamp.
struct RecordingPagination(Rc<RefCell<PaginationLog>>);

impl Pagination for RecordingPagination {
    fn current(&self) -> usize {
        self.0.borrow().current
    }

    fn set_current(&mut self, page: usize, origin: ChangeOrigin) {
        let mut log = self.0.borrow_mut();
        log.current = page;
        log.calls.push((page, origin));
    }

    fn set_size(&mut self, size: usize) {
        self.0.borrow_mut().sizes.push(size);
    }
}

#[test]
fn every_slide_offset_is_a_multiple_of_the_stride() {
    let mut t = track(CarouselOptions::default());
    let stride = t.layout().stride;
    assert_eq!(stride, 300.0);
    for i in 0..t.num_slides() {
        let shown = t.set_slide(i as isize, false);
        assert_eq!(shown, i);
        assert_eq!(t.surface().track_offset().x, -(i as f64) * stride);
    }
}

#[test]
fn out_of_range_slides_clamp_without_wrap() {
    let mut t = track(CarouselOptions::default());
    assert_eq!(t.set_slide(-7, false), 0);
    assert_eq!(t.surface().track_offset().x, 0.0);
    assert_eq!(t.set_slide(17, false), 3);
    assert_eq!(t.surface().track_offset().x, -900.0);
}

#[test]
fn wrap_one_past_the_end_returns_to_first() {
    let mut t = track(CarouselOptions::default());
    assert_eq!(t.set_slide(4, true), 0);
    assert_eq!(t.set_slide(9, true), 1);
}

#[test]
fn negative_wrap_counts_back_from_the_end() {
    let mut t = track(CarouselOptions::default());
    assert_eq!(t.set_slide(-1, true), 3);
    assert_eq!(t.set_slide(-2, true), 2);
    assert_eq!(t.set_slide(-4, true), 0);
    // More negative than the page count keeps counting back.
    assert_eq!(t.set_slide(-5, true), 3);
    assert_eq!(t.set_slide(-6, true), 2);
}

#[test]
fn next_and_previous_respect_wrap() {
    let mut t = track(CarouselOptions::default().with_initial_slide(3));
    assert_eq!(t.next_slide(false), 3);
    assert_eq!(t.next_slide(true), 0);
    assert_eq!(t.previous_slide(false), 0);
    assert_eq!(t.previous_slide(true), 3);
    assert_eq!(t.previous_slide(false), 2);
}

#[test]
fn on_change_reports_every_commit() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let mut t = track(CarouselOptions::default()).with_on_change(move |i| sink.borrow_mut().push(i));
    t.next_slide(false);
    t.set_slide(1, false);
    t.set_slide(10, false);
    assert_eq!(*seen.borrow(), vec![1, 1, 3]);
}

#[test]
fn remeasure_recomputes_pages_and_reclamps() {
    let mut t = track(CarouselOptions::default().with_initial_slide(3));
    assert_eq!(t.surface().track_offset().x, -900.0);

    // Container grows to fit 6 items per page: 2 pages remain.
    t.surface_mut()
        .set_container(Rect::new(0.0, 0.0, 650.0, 80.0));
    t.measure();
    assert_eq!(t.layout().items_per_slide, 6);
    assert_eq!(t.num_slides(), 2);
    assert_eq!(t.slide(), 1);
    assert_eq!(t.surface().track_offset().x, -600.0);

    // Items shrink: more fit per page, page count follows the formula.
    t.surface_mut()
        .set_items(std::iter::repeat_n(Size::new(50.0, 40.0), 25));
    t.refit();
    assert_eq!(t.layout().items_per_slide, 13);
    assert_eq!(t.num_slides(), 2);
    assert_eq!(t.surface().cross_extent(), Some(40.0));
}

#[test]
fn pagination_change_moves_track_exactly_once() {
    let log = Rc::new(RefCell::new(PaginationLog::default()));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let mut t = track(CarouselOptions::default())
        .with_on_change(move |i| sink.borrow_mut().push(i))
        .with_pagination(Box::new(RecordingPagination(log.clone())));
    assert_eq!(log.borrow().sizes, vec![4]);
    log.borrow_mut().calls.clear();

    t.select_page(2);
    assert_eq!(*seen.borrow(), vec![2]);
    // The control is not told about the change it made itself.
    assert_eq!(log.borrow().calls, vec![(2, ChangeOrigin::Control)]);
    assert_eq!(t.slide(), 2);
    assert_eq!(t.surface().track_offset().x, -600.0);
}

#[test]
fn pagination_is_corrected_when_its_page_is_clamped() {
    let log = Rc::new(RefCell::new(PaginationLog::default()));
    let mut t = track(CarouselOptions::default())
        .with_pagination(Box::new(RecordingPagination(log.clone())));
    log.borrow_mut().calls.clear();

    t.select_page(10);
    assert_eq!(
        log.borrow().calls,
        vec![(10, ChangeOrigin::Control), (3, ChangeOrigin::Track)]
    );
    assert_eq!(t.slide(), 3);
}

#[test]
fn track_changes_are_pushed_to_pagination() {
    let log = Rc::new(RefCell::new(PaginationLog::default()));
    let mut t = track(CarouselOptions::default().with_initial_slide(1))
        .with_pagination(Box::new(RecordingPagination(log.clone())));
    assert_eq!(log.borrow().calls, vec![(1, ChangeOrigin::Track)]);
    log.borrow_mut().calls.clear();

    t.next_slide(false);
    assert_eq!(log.borrow().calls, vec![(2, ChangeOrigin::Track)]);

    // Same page again: nothing to tell the control.
    t.set_slide(2, false);
    assert_eq!(log.borrow().calls.len(), 1);

    // Page count changes are forwarded; unchanged counts are not.
    t.measure();
    assert_eq!(log.borrow().sizes, vec![4]);
    t.surface_mut()
        .set_container(Rect::new(0.0, 0.0, 650.0, 80.0));
    t.measure();
    assert_eq!(log.borrow().sizes, vec![4, 2]);
    assert_eq!(t.slide(), 1);
}

/// Control that never clamps and reports an absurd page.
struct RunawayPagination;

impl Pagination for RunawayPagination {
    fn current(&self) -> usize {
        usize::MAX
    }

    fn set_current(&mut self, _page: usize, _origin: ChangeOrigin) {}

    fn set_size(&mut self, _size: usize) {}
}

#[test]
fn stepping_from_an_unclamped_pagination_page_saturates() {
    let mut t = track(CarouselOptions::default()).with_pagination(Box::new(RunawayPagination));
    assert_eq!(t.next_slide(false), 3);
    assert_eq!(t.previous_slide(false), 3);
    assert_eq!(t.surface().track_offset().x, -900.0);
    assert!(t.next_slide(true) < 4);
}

#[test]
fn page_indicator_follows_the_track() {
    let mut t = track(CarouselOptions::default()).with_page_indicator();
    assert_eq!(t.pagination().map(|p| p.current()), Some(0));
    t.next_slide(false);
    assert_eq!(t.pagination().map(|p| p.current()), Some(1));
    t.select_page(3);
    assert_eq!(t.slide(), 3);
    assert_eq!(t.surface().track_offset().x, -900.0);
}

#[test]
fn swipe_past_a_page_commits_to_next_page() {
    let mut t = track(CarouselOptions::default());
    let down = t.pointer_down(Point::new(10.0, 10.0), 1);
    assert_eq!(down, EventDisposition::STOP_PROPAGATION);
    assert!(!t.surface().transition_enabled());

    // Three moves along the axis: 420px total, 120px beyond one stride.
    for x in [-100.0, -250.0, -410.0] {
        let moved = t.pointer_move(Point::new(x, 12.0), 1);
        assert!(moved.contains(EventDisposition::PREVENT_DEFAULT));
    }
    assert_eq!(t.swipe().map(|s| s.phase()), Some(SwipePhase::Swiping));

    let up = t.pointer_up();
    assert_eq!(up, EventDisposition::STOP_PROPAGATION);
    assert_eq!(t.slide(), 1);
    assert_eq!(t.surface().track_offset().x, -300.0);
    assert!(t.surface().transition_enabled());
    assert!(t.swipe().is_none());
}

#[test]
fn short_swipe_snaps_back_and_threshold_swipe_turns_page() {
    let mut t = track(CarouselOptions::default().with_initial_slide(1));

    // 20px is under 10% of a 300px page.
    t.pointer_down(Point::new(200.0, 40.0), 1);
    t.pointer_move(Point::new(180.0, 40.0), 1);
    t.pointer_up();
    assert_eq!(t.slide(), 1);
    assert_eq!(t.surface().track_offset().x, -300.0);

    // 45px is 15% of a page, backwards.
    t.pointer_down(Point::new(200.0, 40.0), 1);
    t.pointer_move(Point::new(245.0, 40.0), 1);
    t.pointer_up();
    assert_eq!(t.slide(), 0);
}

#[test]
fn snap_threshold_is_configurable() {
    let mut t = track(CarouselOptions::default().with_snap_threshold(0.3));
    t.pointer_down(Point::new(200.0, 40.0), 1);
    t.pointer_move(Point::new(140.0, 40.0), 1);
    t.pointer_up();
    assert_eq!(t.slide(), 0);
}

#[test]
fn cross_axis_motion_becomes_a_page_scroll() {
    let mut t = track(CarouselOptions::default().with_initial_slide(1));
    let writes = t.surface().track_offset_writes();

    t.pointer_down(Point::new(10.0, 10.0), 1);
    let mut dispositions = vec![t.pointer_move(Point::new(14.0, 60.0), 1)];
    for x in [-200.0, -400.0] {
        dispositions.push(t.pointer_move(Point::new(x, 90.0), 1));
    }
    assert_eq!(t.swipe().map(|s| s.phase()), Some(SwipePhase::Scrolling));
    t.tick(0);
    t.tick(500);
    dispositions.push(t.pointer_up());

    assert!(
        dispositions
            .iter()
            .all(|d| !d.contains(EventDisposition::PREVENT_DEFAULT))
    );
    assert_eq!(t.surface().track_offset_writes(), writes);
    assert_eq!(t.slide(), 1);
    assert!(t.surface().transition_enabled());
}

#[test]
fn tap_without_move_keeps_page() {
    let mut t = track(CarouselOptions::default().with_initial_slide(2));
    t.pointer_down(Point::new(10.0, 10.0), 1);
    assert!(t.pointer_up().is_empty());
    assert_eq!(t.slide(), 2);
}

#[test]
fn multi_touch_aborts_the_gesture() {
    let mut t = track(CarouselOptions::default());
    t.pointer_down(Point::new(200.0, 40.0), 1);
    t.pointer_move(Point::new(150.0, 40.0), 1);
    assert_eq!(t.surface().track_offset().x, -50.0);

    assert!(t.pointer_move(Point::new(100.0, 40.0), 2).is_empty());
    assert!(t.swipe().is_none());
    assert_eq!(t.surface().track_offset().x, 0.0);
    assert!(t.surface().transition_enabled());
    assert!(t.pointer_up().is_empty());
    assert_eq!(t.slide(), 0);

    // A second finger going down never starts a gesture.
    assert!(t.pointer_down(Point::new(10.0, 10.0), 2).is_empty());
    assert!(t.swipe().is_none());
}

#[test]
fn fallback_frame_loop_follows_pointer() {
    let mut t = track(CarouselOptions::default());
    t.tick(0);
    t.pointer_down(Point::new(300.0, 40.0), 1);
    t.pointer_move(Point::new(250.0, 40.0), 1);
    assert_eq!(t.surface().track_offset().x, -50.0);

    t.pointer_move(Point::new(200.0, 40.0), 1);
    assert_eq!(t.surface().track_offset().x, -50.0);
    // The loop starts counting at the next tick.
    t.tick(10);
    assert_eq!(t.surface().track_offset().x, -50.0);
    t.tick(10 + FRAME_FALLBACK_INTERVAL);
    assert_eq!(t.surface().track_offset().x, -100.0);

    // Hosts with a frame clock drive the same loop directly.
    t.pointer_move(Point::new(150.0, 40.0), 1);
    assert!(t.animation_frame());
    assert_eq!(t.surface().track_offset().x, -150.0);
    assert_eq!(t.swipe().and_then(|s| s.last_offset()), Some(-150.0));
}

#[test]
fn auto_advance_after_k_periods() {
    const PERIOD: u64 = 1_000;
    let mut t = track(
        CarouselOptions::default()
            .with_initial_slide(1)
            .with_auto_advance(PERIOD),
    );
    t.tick(50_000);
    assert_eq!(t.slide(), 1);

    t.tick(50_000 + 5 * PERIOD);
    assert_eq!(t.slide(), (1 + 5) % 4);

    for k in 6..=9 {
        t.tick(50_000 + k * PERIOD);
        assert_eq!(t.slide(), (1 + k as usize) % 4);
    }
}

#[test]
fn auto_advance_enabled_after_idle_gap_starts_fresh() {
    let advances = Rc::new(RefCell::new(0_usize));
    let sink = advances.clone();
    let mut t =
        track(CarouselOptions::default()).with_on_change(move |_| *sink.borrow_mut() += 1);
    t.tick(0);
    assert_eq!(t.next_deadline(), None);

    // Host sleeps for a minute, then turns auto-advance on.
    t.set_auto_advance(1_000);
    assert!(t.next_deadline().is_some_and(|deadline| deadline <= 61_000));
    t.tick(61_000);
    assert_eq!(*advances.borrow(), 0);
    assert_eq!(t.slide(), 0);
    assert_eq!(t.next_deadline(), Some(62_000));

    t.tick(62_000);
    assert_eq!(*advances.borrow(), 1);
    assert_eq!(t.slide(), 1);
}

#[test]
fn auto_advance_waits_for_first_tick() {
    let mut t = track(CarouselOptions::default().with_auto_advance(1_000));
    assert_eq!(t.next_deadline(), Some(0));

    t.tick(7_000);
    assert_eq!(t.slide(), 0);
    assert_eq!(t.next_deadline(), Some(8_000));
    t.tick(8_000);
    assert_eq!(t.slide(), 1);
}

#[test]
fn swipe_after_idle_gap_does_not_replay_frames() {
    let mut t = track(CarouselOptions::default());
    t.tick(0);
    t.pointer_down(Point::new(300.0, 40.0), 1);
    t.pointer_move(Point::new(250.0, 40.0), 1);
    let writes = t.surface().track_offset_writes();

    t.tick(600_000);
    assert_eq!(t.surface().track_offset_writes(), writes);
    t.tick(600_000 + FRAME_FALLBACK_INTERVAL);
    assert_eq!(t.surface().track_offset_writes(), writes + 1);
}

#[test]
fn auto_advance_can_be_stopped() {
    let mut t = track(CarouselOptions::default().with_auto_advance(100));
    t.tick(0);
    t.tick(100);
    assert_eq!(t.slide(), 1);
    t.set_auto_advance(0);
    t.tick(1_000);
    assert_eq!(t.slide(), 1);
    assert_eq!(t.next_deadline(), None);
}

#[test]
fn resize_is_throttled_with_trailing_measure() {
    let mut t = track(CarouselOptions::default());
    t.viewport_resized(1_000);
    assert_eq!(t.num_slides(), 4);

    t.surface_mut()
        .set_container(Rect::new(0.0, 0.0, 650.0, 80.0));
    t.viewport_resized(1_050);
    t.viewport_resized(1_100);
    assert_eq!(t.num_slides(), 4);
    assert_eq!(t.next_deadline(), Some(1_200));

    t.tick(1_150);
    assert_eq!(t.num_slides(), 4);
    t.tick(1_200);
    assert_eq!(t.num_slides(), 2);
    assert_eq!(t.next_deadline(), None);
}

#[test]
fn hider_covers_partial_page_on_first_slide_only() {
    let wide = MemorySurface::uniform(
        Rect::new(0.0, 0.0, 355.0, 80.0),
        Size::new(100.0, 80.0),
        10,
    );
    let mut t = SlideTrack::new(wide.clone(), CarouselOptions::default().with_hide_last(true));
    assert_eq!(t.surface().hider_extent(), 55.0);
    t.next_slide(false);
    assert_eq!(t.surface().hider_extent(), 0.0);
    t.previous_slide(false);
    assert_eq!(t.surface().hider_extent(), 55.0);

    let centered = SlideTrack::new(
        wide,
        CarouselOptions::default()
            .with_hide_last(true)
            .with_center(true),
    );
    assert_eq!(centered.surface().padding(), 27.0);
    assert_eq!(centered.surface().hider_extent(), 27.5);
}

#[test]
fn vertical_axis_measures_heights_and_swipes_vertically() {
    let surface = MemorySurface::uniform(
        Rect::new(0.0, 0.0, 80.0, 350.0),
        Size::new(80.0, 100.0),
        10,
    );
    let mut t = SlideTrack::new(surface, CarouselOptions::default().with_axis(Axis::Y));
    assert_eq!(t.num_slides(), 4);
    assert_eq!(t.surface().cross_extent(), Some(80.0));

    t.pointer_down(Point::new(40.0, 300.0), 1);
    t.pointer_move(Point::new(42.0, 100.0), 1);
    t.pointer_move(Point::new(42.0, -20.0), 1);
    t.pointer_up();
    assert_eq!(t.slide(), 1);
    assert_eq!(t.surface().track_offset().y, -300.0);
}

#[test]
fn surfaces_without_inline_flow_get_explicit_placement() {
    let surface = surface().with_inline_flow(false);
    let t = SlideTrack::new(surface, CarouselOptions::default());
    assert_eq!(t.strategy(), LayoutStrategy::AbsolutePosition);
    for i in 0..10 {
        assert_eq!(t.surface().item_offset(i), Some(i as f64 * 100.0));
    }
}

#[test]
fn empty_carousel_is_inert() {
    let surface = MemorySurface::new(Rect::new(0.0, 0.0, 350.0, 80.0), []);
    let mut t = SlideTrack::new(surface, CarouselOptions::default().with_initial_slide(3));
    assert_eq!(t.num_slides(), 0);
    assert_eq!(t.slide(), 0);
    assert_eq!(t.next_slide(true), 0);
    assert_eq!(t.previous_slide(false), 0);
}

#[test]
fn options_from_attributes_drive_a_track() {
    let options =
        CarouselOptions::from_attributes([("data-initial-slide", "2"), ("data-swipe", "false")])
            .unwrap();
    let mut t = track(options);
    assert_eq!(t.slide(), 2);
    assert!(t.pointer_down(Point::new(10.0, 10.0), 1).is_empty());
}
