// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rate limiting for bursty signals such as viewport resizes.
//!
//! ## Usage
//!
//! 1) Call [`Throttle::request`] whenever the signal arrives. If it returns
//!    `true`, do the work now.
//! 2) Otherwise a trailing run has been armed; call [`Throttle::poll`] from
//!    your timer tick and do the work when it returns `true`.
//!
//! ```
//! use understory_timing::Throttle;
//!
//! let mut resize = Throttle::new(200);
//! assert!(resize.request(0)); // leading edge runs immediately
//! assert!(!resize.request(50)); // inside the window: deferred
//! assert!(!resize.request(120)); // still one deferred run
//! assert_eq!(resize.deadline(), Some(200));
//! assert!(!resize.poll(199));
//! assert!(resize.poll(200)); // trailing edge
//! assert!(!resize.poll(400));
//! ```

/// Runs at most once per interval, never dropping the last request.
#[derive(Clone, Copy, Debug)]
pub struct Throttle {
    interval: u64,
    last_run: Option<u64>,
    trailing: Option<u64>,
}

impl Throttle {
    /// Creates a throttle with the given interval in milliseconds.
    #[must_use]
    pub fn new(interval: u64) -> Self {
        Self {
            interval,
            last_run: None,
            trailing: None,
        }
    }

    /// Returns the configured interval in milliseconds.
    #[must_use]
    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// Records a request at `now`.
    ///
    /// Returns `true` when the caller should run immediately. Otherwise a
    /// single trailing run is armed for the end of the current window.
    pub fn request(&mut self, now: u64) -> bool {
        match self.last_run {
            Some(last) if now.saturating_sub(last) < self.interval => {
                if self.trailing.is_none() {
                    self.trailing = Some(last.saturating_add(self.interval));
                }
                false
            }
            _ => {
                self.last_run = Some(now);
                self.trailing = None;
                true
            }
        }
    }

    /// Returns `true` (once) when an armed trailing run is due at `now`.
    pub fn poll(&mut self, now: u64) -> bool {
        match self.trailing {
            Some(at) if now >= at => {
                self.trailing = None;
                self.last_run = Some(now);
                true
            }
            _ => false,
        }
    }

    /// Timestamp of the armed trailing run, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.trailing
    }

    /// Returns `true` while a trailing run is armed.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.trailing.is_some()
    }

    /// Disarms any pending trailing run.
    pub fn cancel(&mut self) {
        self.trailing = None;
    }
}
