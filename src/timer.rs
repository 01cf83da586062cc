//! Single-threaded deferred-task queue with virtual time.
//!
//! Deferred work (delayed log emission, wrapper deadlines) is modelled as an
//! explicit task with a fire time on a single-threaded queue, never as an
//! implicit platform timer. The queue owns a virtual clock: time advances
//! only through [`TimerQueue::advance`] or [`TimerQueue::advance_to`], which
//! makes every time-dependent behavior deterministic under test.
//!
//! Scheduling never runs a task inline, even at zero delay; the caller's
//! turn completes before any deferred task executes. Tasks run outside the
//! queue's interior borrow, so a running task may schedule or cancel timers.
//!
//! Cancellation is opt-in via [`TimerHandle::cancel`]. Dropping a handle
//! does nothing; armed timers are fire-and-forget by default.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use slab::Slab;
use tracing::trace;

/// A point on the queue's virtual clock, in nanoseconds since queue creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(u64);

impl Time {
    /// The queue epoch.
    pub const ZERO: Self = Self(0);

    /// Creates a time from nanoseconds since the epoch.
    #[inline]
    #[must_use]
    pub const fn from_nanos(nanos: u64) -> Self {
        Self(nanos)
    }

    /// Creates a time from milliseconds since the epoch.
    #[inline]
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis.saturating_mul(1_000_000))
    }

    /// Returns the time as nanoseconds since the epoch.
    #[inline]
    #[must_use]
    pub const fn as_nanos(self) -> u64 {
        self.0
    }

    /// Returns the time as milliseconds since the epoch (truncated).
    #[inline]
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0 / 1_000_000
    }

    /// Returns this time advanced by `delta`, saturating at the maximum.
    #[must_use]
    pub fn saturating_add(self, delta: Duration) -> Self {
        let nanos = delta.as_nanos().min(u128::from(u64::MAX)) as u64;
        Self(self.0.saturating_add(nanos))
    }
}

enum TimerTask {
    Once(Box<dyn FnOnce()>),
    Repeating {
        period: Duration,
        task: Box<dyn FnMut()>,
    },
}

struct TimerEntry {
    seq: u64,
    // Taken while the task body runs so the queue borrow can be released.
    task: Option<TimerTask>,
}

#[derive(PartialEq, Eq)]
struct HeapSlot {
    deadline: Time,
    order: u64,
    key: usize,
    seq: u64,
}

impl Ord for HeapSlot {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap: earliest deadline first, ties
        // broken by arming order.
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for HeapSlot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

struct QueueInner {
    now: Time,
    entries: Slab<TimerEntry>,
    heap: BinaryHeap<HeapSlot>,
    next_seq: u64,
    next_order: u64,
}

impl QueueInner {
    fn is_live(&self, key: usize, seq: u64) -> bool {
        self.entries.get(key).is_some_and(|entry| entry.seq == seq)
    }
}

/// What a due heap slot resolved to, extracted under the borrow and run
/// outside it.
enum Fired {
    Once(Box<dyn FnOnce()>),
    Repeating {
        key: usize,
        seq: u64,
        deadline: Time,
        period: Duration,
        task: Box<dyn FnMut()>,
    },
}

/// A shared handle to the single-threaded deferred-task queue.
///
/// Cloning is cheap and every clone refers to the same queue. The queue is
/// deliberately not `Send`: the concurrency model is interleaved
/// single-threaded turns, not parallelism.
#[derive(Clone)]
pub struct TimerQueue {
    inner: Rc<RefCell<QueueInner>>,
}

impl TimerQueue {
    /// Creates an empty queue with its clock at [`Time::ZERO`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(QueueInner {
                now: Time::ZERO,
                entries: Slab::new(),
                heap: BinaryHeap::new(),
                next_seq: 0,
                next_order: 0,
            })),
        }
    }

    /// Returns the current virtual time.
    #[must_use]
    pub fn now(&self) -> Time {
        self.inner.borrow().now
    }

    /// Returns the number of live (armed, uncancelled) timers.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Arms a one-shot timer firing `delay` after the current virtual time.
    ///
    /// The task never runs inside this call, even at zero delay; it runs
    /// during the `advance` that reaches its deadline.
    pub fn schedule_once(&self, delay: Duration, task: impl FnOnce() + 'static) -> TimerHandle {
        self.arm(delay, TimerTask::Once(Box::new(task)))
    }

    /// Arms a repeating timer that first fires `period` after the current
    /// virtual time and re-arms at each fire until cancelled.
    ///
    /// A zero period is clamped to one nanosecond; re-arming at the same
    /// instant would never let `advance` terminate.
    pub fn schedule_repeating(
        &self,
        period: Duration,
        task: impl FnMut() + 'static,
    ) -> TimerHandle {
        let period = period.max(Duration::from_nanos(1));
        self.arm(
            period,
            TimerTask::Repeating {
                period,
                task: Box::new(task),
            },
        )
    }

    fn arm(&self, delay: Duration, task: TimerTask) -> TimerHandle {
        let mut inner = self.inner.borrow_mut();
        let deadline = inner.now.saturating_add(delay);
        let seq = inner.next_seq;
        inner.next_seq += 1;
        let order = inner.next_order;
        inner.next_order += 1;
        let key = inner.entries.insert(TimerEntry {
            seq,
            task: Some(task),
        });
        inner.heap.push(HeapSlot {
            deadline,
            order,
            key,
            seq,
        });
        trace!(key, seq, deadline_ms = deadline.as_millis(), "armed timer");
        TimerHandle {
            queue: Rc::downgrade(&self.inner),
            key,
            seq,
        }
    }

    /// Advances the clock by `delta`, running every task that falls due.
    pub fn advance(&self, delta: Duration) {
        let target = self.now().saturating_add(delta);
        self.advance_to(target);
    }

    /// Advances the clock to `target`, running every task that falls due.
    ///
    /// Tasks run in deadline order, ties broken by arming order, and each
    /// observes `now` equal to its own deadline. A task that arms a new
    /// timer with a deadline at or before `target` sees that timer fire
    /// within the same call. A `target` at or before the current time runs
    /// nothing and leaves the clock unchanged.
    pub fn advance_to(&self, target: Time) {
        loop {
            let Some(fired) = self.take_due(target) else {
                break;
            };
            match fired {
                Fired::Once(task) => {
                    task();
                }
                Fired::Repeating {
                    key,
                    seq,
                    deadline,
                    period,
                    mut task,
                } => {
                    task();
                    self.rearm(key, seq, deadline.saturating_add(period), period, task);
                }
            }
        }
    }

    /// Pops the next due, live heap slot and extracts its task; prunes
    /// cancelled slots on the way. Moves the clock to the fired deadline, or
    /// to `target` when nothing further is due.
    fn take_due(&self, target: Time) -> Option<Fired> {
        let mut inner = self.inner.borrow_mut();
        loop {
            let due = inner
                .heap
                .peek()
                .is_some_and(|slot| slot.deadline <= target);
            if !due {
                break;
            }
            let Some(slot) = inner.heap.pop() else {
                break;
            };
            if !inner.is_live(slot.key, slot.seq) {
                // Cancelled after arming; the slab entry is gone.
                continue;
            }
            if slot.deadline > inner.now {
                inner.now = slot.deadline;
            }
            trace!(
                key = slot.key,
                seq = slot.seq,
                now_ms = inner.now.as_millis(),
                "timer fired"
            );
            let task = inner.entries[slot.key].task.take();
            match task {
                Some(TimerTask::Once(task)) => {
                    inner.entries.remove(slot.key);
                    return Some(Fired::Once(task));
                }
                Some(TimerTask::Repeating { period, task }) => {
                    // Entry stays in the slab (task slot empty) so
                    // cancellation during the run is observable.
                    return Some(Fired::Repeating {
                        key: slot.key,
                        seq: slot.seq,
                        deadline: slot.deadline,
                        period,
                        task,
                    });
                }
                None => {}
            }
        }
        if target > inner.now {
            inner.now = target;
        }
        None
    }

    /// Puts a repeating task back after a fire, unless it was cancelled
    /// while running.
    fn rearm(
        &self,
        key: usize,
        seq: u64,
        deadline: Time,
        period: Duration,
        task: Box<dyn FnMut()>,
    ) {
        let mut inner = self.inner.borrow_mut();
        if !inner.is_live(key, seq) {
            return;
        }
        inner.entries[key].task = Some(TimerTask::Repeating { period, task });
        let order = inner.next_order;
        inner.next_order += 1;
        inner.heap.push(HeapSlot {
            deadline,
            order,
            key,
            seq,
        });
    }
}

impl Default for TimerQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TimerQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("TimerQueue")
            .field("now", &inner.now)
            .field("pending", &inner.entries.len())
            .finish()
    }
}

/// Cancellation token for an armed timer.
///
/// Dropping the handle does not cancel; timers are fire-and-forget unless
/// [`cancel`](Self::cancel) is called. Handles to one-shot timers become
/// inert once the timer fires.
pub struct TimerHandle {
    queue: Weak<RefCell<QueueInner>>,
    key: usize,
    seq: u64,
}

impl TimerHandle {
    /// Cancels the timer if it is still live.
    ///
    /// Returns whether a live timer was cancelled. Idempotent; cancelling a
    /// fired one-shot, an already-cancelled timer, or a timer on a dropped
    /// queue returns `false`.
    pub fn cancel(&self) -> bool {
        let Some(inner) = self.queue.upgrade() else {
            return false;
        };
        let mut inner = inner.borrow_mut();
        if !inner.is_live(self.key, self.seq) {
            return false;
        }
        inner.entries.remove(self.key);
        trace!(key = self.key, seq = self.seq, "cancelled timer");
        true
    }
}

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle")
            .field("key", &self.key)
            .field("seq", &self.seq)
            .finish()
    }
}
