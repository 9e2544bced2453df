// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timer queue: deadlines, repeating periods, and cancellation handles.

use alloc::collections::BinaryHeap;
use alloc::vec::Vec;
use core::cmp::Reverse;

/// Handle to a timer scheduled on a [`TimerQueue`].
///
/// Handles are generational: once a timer fires (one-shot) or is cancelled,
/// its slot may be reused, but the old handle never aliases the new timer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TimerId {
    slot: u32,
    generation: u32,
}

/// A timer that came due during [`TimerQueue::advance_to`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fired<K> {
    /// Handle of the timer that fired.
    pub id: TimerId,
    /// Caller payload registered with the timer.
    pub key: K,
    /// Host timestamp at which the timer was due.
    ///
    /// This can be earlier than the timestamp passed to `advance_to` when the
    /// host polls late.
    pub deadline: u64,
}

#[derive(Clone, Debug)]
struct Timer<K> {
    key: K,
    /// Deadline on the queue's timeline once anchored; the delay until then.
    deadline: u64,
    period: Option<u64>,
    anchored: bool,
}

#[derive(Clone, Debug)]
struct Slot<K> {
    generation: u32,
    timer: Option<Timer<K>>,
}

/// Heap entry. Entries go stale when their timer is cancelled or rescheduled;
/// they are validated against the slot when popped.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
struct Pending {
    deadline: u64,
    seq: u64,
    id: TimerId,
}

/// Host-driven queue of one-shot and repeating timers.
///
/// The queue never reads a clock; it only knows the timestamps the host hands
/// it. Timers are scheduled in one of two ways:
///
/// - [`schedule_at`](Self::schedule_at) and
///   [`schedule_repeating_at`](Self::schedule_repeating_at) take the current
///   host time and count from it.
/// - [`schedule`](Self::schedule) and
///   [`schedule_repeating`](Self::schedule_repeating) are for callers that do
///   not know the time. The timer is deferred: it starts counting at the next
///   timestamp the queue observes, so an idle stretch before that never
///   counts toward it. [`next_deadline`](Self::next_deadline) reports deferred
///   timers as already due so the host ticks promptly.
///
/// Repeating timers catch up: if the host polls after several periods have
/// elapsed, the timer fires once per elapsed period, in order.
#[derive(Clone, Debug)]
pub struct TimerQueue<K> {
    origin: Option<u64>,
    elapsed: u64,
    slots: Vec<Slot<K>>,
    free: Vec<u32>,
    heap: BinaryHeap<Reverse<Pending>>,
    deferred: Vec<TimerId>,
    seq: u64,
    live: usize,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> TimerQueue<K> {
    /// Creates an empty queue that has not observed any timestamp yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: None,
            elapsed: 0,
            slots: Vec::new(),
            free: Vec::new(),
            heap: BinaryHeap::new(),
            deferred: Vec::new(),
            seq: 0,
            live: 0,
        }
    }

    /// Returns the most recent host timestamp observed, if any.
    #[must_use]
    pub fn now(&self) -> Option<u64> {
        self.origin.map(|origin| origin + self.elapsed)
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` if no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Schedules `key` to fire once, `delay` milliseconds after the next
    /// timestamp the queue observes.
    pub fn schedule(&mut self, delay: u64, key: K) -> TimerId {
        self.insert(Timer {
            key,
            deadline: delay,
            period: None,
            anchored: false,
        })
    }

    /// Schedules `key` to fire every `period` milliseconds, starting one
    /// period after the next timestamp the queue observes.
    ///
    /// A zero period is treated as one millisecond so that a single
    /// [`advance_to`](Self::advance_to) call always terminates.
    pub fn schedule_repeating(&mut self, period: u64, key: K) -> TimerId {
        let period = period.max(1);
        self.insert(Timer {
            key,
            deadline: period,
            period: Some(period),
            anchored: false,
        })
    }

    /// Schedules `key` to fire once, `delay` milliseconds after the host
    /// timestamp `now`.
    ///
    /// Moves the queue's clock to `now` without firing anything; timers that
    /// are already due fire on the next [`advance_to`](Self::advance_to).
    pub fn schedule_at(&mut self, now: u64, delay: u64, key: K) -> TimerId {
        let elapsed = self.observe(now);
        self.insert(Timer {
            key,
            deadline: elapsed.saturating_add(delay),
            period: None,
            anchored: true,
        })
    }

    /// Schedules `key` to fire every `period` milliseconds, starting one
    /// period after the host timestamp `now`.
    ///
    /// See [`schedule_at`](Self::schedule_at) for the clock handling and
    /// [`schedule_repeating`](Self::schedule_repeating) for zero periods.
    pub fn schedule_repeating_at(&mut self, now: u64, period: u64, key: K) -> TimerId {
        let period = period.max(1);
        let elapsed = self.observe(now);
        self.insert(Timer {
            key,
            deadline: elapsed.saturating_add(period),
            period: Some(period),
            anchored: true,
        })
    }

    /// Cancels a pending timer, returning its payload.
    ///
    /// Returns `None` for stale handles (already fired one-shots, cancelled
    /// timers, or handles from another queue).
    pub fn cancel(&mut self, id: TimerId) -> Option<K> {
        let slot = self.slot_mut(id)?;
        let timer = slot.timer.take()?;
        self.free.push(id.slot);
        self.live -= 1;
        if !timer.anchored {
            self.deferred.retain(|deferred| *deferred != id);
        }
        Some(timer.key)
    }

    /// Returns `true` if `id` refers to a timer that has not fired (one-shot)
    /// or been cancelled.
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.slots
            .get(id.slot as usize)
            .is_some_and(|slot| slot.generation == id.generation && slot.timer.is_some())
    }

    /// Returns the host timestamp at which the next timer is due.
    ///
    /// Deferred timers (see [`schedule`](Self::schedule)) only start counting
    /// once the queue observes a timestamp, so while any are waiting this
    /// returns the last observed timestamp (or `0` before the first one): a
    /// time that has already passed, meaning "call
    /// [`advance_to`](Self::advance_to) now". Returns `None` when no timers
    /// are pending.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        if self.has_deferred() {
            return Some(self.now().unwrap_or(0));
        }
        let origin = self.origin?;
        self.slots
            .iter()
            .filter_map(|slot| slot.timer.as_ref().map(|timer| timer.deadline))
            .min()
            .map(|deadline| origin + deadline)
    }

    /// Advances the queue's clock to the host timestamp `now` and returns
    /// every timer that came due, in deadline order.
    ///
    /// Timestamps earlier than the last observed one are treated as "no time
    /// has passed".
    pub fn advance_to(&mut self, now: u64) -> Vec<Fired<K>>
    where
        K: Clone,
    {
        self.observe(now);
        let origin = self.origin.unwrap_or(now);

        let mut fired = Vec::new();
        while let Some(Reverse(pending)) = self.heap.peek().copied() {
            if pending.deadline > self.elapsed {
                break;
            }
            self.heap.pop();

            let Some(slot) = self.slot_mut(pending.id) else {
                continue;
            };
            let Some(timer) = slot.timer.as_mut() else {
                continue;
            };
            if !timer.anchored || timer.deadline != pending.deadline {
                continue;
            }

            fired.push(Fired {
                id: pending.id,
                key: timer.key.clone(),
                deadline: origin + timer.deadline,
            });

            match timer.period {
                Some(period) => {
                    timer.deadline = timer.deadline.saturating_add(period);
                    let deadline = timer.deadline;
                    self.push_pending(deadline, pending.id);
                }
                None => {
                    slot.timer = None;
                    self.free.push(pending.id.slot);
                    self.live -= 1;
                }
            }
        }

        if !fired.is_empty() {
            log::trace!("timer queue at {now}: {} timer(s) fired", fired.len());
        }
        fired
    }

    /// Moves the clock to the host timestamp `now` and anchors deferred
    /// timers there. Returns the elapsed time on the queue's timeline.
    fn observe(&mut self, now: u64) -> u64 {
        let origin = *self.origin.get_or_insert(now);
        self.elapsed = self.elapsed.max(now.saturating_sub(origin));

        let elapsed = self.elapsed;
        for id in core::mem::take(&mut self.deferred) {
            let Some(timer) = self
                .slot_mut(id)
                .and_then(|slot| slot.timer.as_mut())
                .filter(|timer| !timer.anchored)
            else {
                continue;
            };
            timer.anchored = true;
            timer.deadline = elapsed.saturating_add(timer.deadline);
            let deadline = timer.deadline;
            self.push_pending(deadline, id);
        }
        elapsed
    }

    fn has_deferred(&self) -> bool {
        self.deferred.iter().any(|id| {
            self.slots.get(id.slot as usize).is_some_and(|slot| {
                slot.generation == id.generation
                    && slot.timer.as_ref().is_some_and(|timer| !timer.anchored)
            })
        })
    }

    fn insert(&mut self, timer: Timer<K>) -> TimerId {
        let deadline = timer.deadline;
        let anchored = timer.anchored;
        let id = match self.free.pop() {
            Some(slot_idx) => {
                let slot = &mut self.slots[slot_idx as usize];
                slot.generation = slot.generation.wrapping_add(1);
                slot.timer = Some(timer);
                TimerId {
                    slot: slot_idx,
                    generation: slot.generation,
                }
            }
            None => {
                let slot_idx = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
                self.slots.push(Slot {
                    generation: 1,
                    timer: Some(timer),
                });
                TimerId {
                    slot: slot_idx,
                    generation: 1,
                }
            }
        };
        self.live += 1;
        if anchored {
            self.push_pending(deadline, id);
        } else {
            self.deferred.push(id);
        }
        id
    }

    fn push_pending(&mut self, deadline: u64, id: TimerId) {
        self.seq += 1;
        self.heap.push(Reverse(Pending {
            deadline,
            seq: self.seq,
            id,
        }));
    }

    fn slot_mut(&mut self, id: TimerId) -> Option<&mut Slot<K>> {
        self.slots
            .get_mut(id.slot as usize)
            .filter(|slot| slot.generation == id.generation)
    }
}
