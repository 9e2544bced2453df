// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic timer primitives for UI runtimes.
//!
//! UI components often need "call me back later" behavior: auto-advancing
//! slideshows, rate-limited resize handling, or a fallback frame loop when the
//! host has no animation-frame clock. This crate models those timers as plain
//! data driven by timestamps the host supplies, so it works the same in a
//! browser, a native event loop, or a test with a simulated clock.
//!
//! - [`TimerQueue`]: one-shot and repeating timers with cancellable
//!   [`TimerId`] handles. The host calls [`TimerQueue::advance_to`] with the
//!   current time and receives every [`Fired`] timer in deadline order.
//!   Timers are scheduled either at a known host time
//!   ([`TimerQueue::schedule_at`]) or deferred until the next timestamp the
//!   queue observes ([`TimerQueue::schedule`]), so an idle host never builds
//!   up a backlog of missed periods.
//! - [`Throttle`]: a rate limiter that runs immediately when its window has
//!   elapsed and otherwise defers exactly one run to the trailing edge.
//!
//! Time is expressed as `u64` milliseconds on a monotonic clock of the host's
//! choosing. Nothing here reads a clock, spawns a thread, or sleeps.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_timing::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! let tick = timers.schedule_repeating(100, "tick");
//! timers.schedule(250, "once");
//!
//! // Deferred timers start counting at the next timestamp observed.
//! assert!(timers.advance_to(5_000).is_empty());
//!
//! let fired = timers.advance_to(5_300);
//! let keys: Vec<_> = fired.iter().map(|f| f.key).collect();
//! assert_eq!(keys, ["tick", "tick", "once", "tick"]);
//!
//! timers.cancel(tick);
//! assert!(timers.is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod queue;
mod throttle;

pub use queue::{Fired, TimerId, TimerQueue};
pub use throttle::Throttle;
