//! Stateful wrappers: compute-once and deadline-bounded callbacks.
//!
//! Each wrapper is a small owned struct holding its cached slot and bound
//! callback; ownership of the state belongs exclusively to the wrapper
//! instance, and nothing is shared across instances. Both wrappers implement
//! [`Callable`], so they compose with the logging decorators.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use tracing::trace;

use crate::call::Callable;
use crate::timer::TimerQueue;

/// Wraps a callback so it computes at most once.
///
/// The result slot starts empty. The first call invokes the callback with
/// its arguments and fills the slot; every call, including the first,
/// returns the slot's value. Arguments supplied after the first call are
/// ignored entirely, and the cached value is never overwritten.
///
/// # Sentinel divergence
///
/// A rendition that detects "not yet computed" by comparing the slot against
/// an unset sentinel value recomputes whenever a genuine first result equals
/// that sentinel. The `Option` slot here is an explicit has-value flag
/// instead: every first result freezes, including default-like ones. This
/// divergence is deliberate and documented rather than silent.
pub struct Once<F, R> {
    f: F,
    slot: Option<R>,
}

impl<F, R> Once<F, R> {
    /// Creates the wrapper with an empty result slot.
    pub fn new(f: F) -> Self {
        Self { f, slot: None }
    }

    /// Returns whether the first computation has happened.
    #[must_use]
    pub fn is_computed(&self) -> bool {
        self.slot.is_some()
    }
}

/// Free-function form of [`Once::new`].
pub fn once<F, R>(f: F) -> Once<F, R> {
    Once::new(f)
}

impl<F, R, Args> Callable<Args> for Once<F, R>
where
    F: Callable<Args, Output = R>,
    R: Clone,
{
    type Output = R;

    fn call(&mut self, args: Args) -> R {
        if let Some(result) = &self.slot {
            return result.clone();
        }
        let result = self.f.call(args);
        self.slot = Some(result.clone());
        result
    }
}

/// Wraps a callback so it recomputes only until a deadline elapses.
///
/// The deadline clock starts at the first call, not at construction: the
/// first call arms a one-shot task on the queue that flips the completion
/// flag `delay` later. While the flag is down every call invokes the
/// callback and overwrites the cached slot; once the flag is up the wrapper
/// is frozen at the last pre-deadline result and later calls are pure reads.
/// The flag never resets, and the internal timer exposes no cancellation.
pub struct Until<F, R> {
    queue: TimerQueue,
    delay: Duration,
    f: F,
    slot: Option<R>,
    armed: bool,
    expired: Rc<Cell<bool>>,
}

impl<F, R> Until<F, R> {
    /// Creates the wrapper; the deadline is not armed until the first call.
    pub fn new(queue: &TimerQueue, f: F, delay: Duration) -> Self {
        Self {
            queue: queue.clone(),
            delay,
            f,
            slot: None,
            armed: false,
            expired: Rc::new(Cell::new(false)),
        }
    }

    /// Returns whether the deadline has fired and the wrapper is frozen.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.expired.get()
    }
}

/// Free-function form of [`Until::new`].
pub fn until<F, R>(queue: &TimerQueue, f: F, delay: Duration) -> Until<F, R> {
    Until::new(queue, f, delay)
}

impl<F, R, Args> Callable<Args> for Until<F, R>
where
    F: Callable<Args, Output = R>,
    R: Clone,
{
    type Output = R;

    fn call(&mut self, args: Args) -> R {
        if !self.armed {
            self.armed = true;
            let expired = Rc::clone(&self.expired);
            // Fire-and-forget; the handle is dropped on purpose.
            self.queue.schedule_once(self.delay, move || {
                expired.set(true);
                trace!("deadline elapsed, wrapper frozen");
            });
        }
        if self.expired.get() {
            if let Some(result) = &self.slot {
                return result.clone();
            }
        }
        let result = self.f.call(args);
        self.slot = Some(result.clone());
        result
    }
}
