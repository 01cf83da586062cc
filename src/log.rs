//! Invocation loggers and logging decorators.
//!
//! Two shapes of the same idea. The `invoke_and_log*` functions perform one
//! call: invoke the callback, report the result to the sink, hand the result
//! back. The `with_logging*` constructors instead bind a sink and a callback
//! once and return a reusable decorated callable; every later call
//! re-invokes both.
//!
//! In every shape the result reaches the caller unchanged, and a call that
//! panics never reaches the sink.

use std::time::Duration;

use crate::call::Callable;
use crate::sink::{LOG_LABEL, Sink};
use crate::timer::{TimerHandle, TimerQueue};

/// Fixed emission period of [`invoke_and_log_every`].
pub const EVERY_LOG_PERIOD: Duration = Duration::from_millis(1000);

/// Calls `f` with `args`, reports the result to `sink` under the
/// [`LOG_LABEL`] label, and returns the result.
///
/// The sink runs exactly once, after `f` returns and before this function
/// returns.
pub fn invoke_and_log<S, F, Args>(sink: &mut S, mut f: F, args: Args) -> F::Output
where
    F: Callable<Args>,
    S: Sink<F::Output>,
{
    let result = f.call(args);
    sink.emit(Some(LOG_LABEL), &result);
    result
}

/// Calls `f` immediately and returns its result; the [`LOG_LABEL`] emission
/// is deferred by `delay` on `queue`.
///
/// The caller observes the result before the log line exists. The deferred
/// emission has no cancellation path; once armed it runs when the queue
/// reaches its deadline. The result is cloned into the deferred task.
pub fn invoke_and_log_delayed<S, F, Args>(
    queue: &TimerQueue,
    delay: Duration,
    mut sink: S,
    mut f: F,
    args: Args,
) -> F::Output
where
    F: Callable<Args>,
    F::Output: Clone + 'static,
    S: Sink<F::Output> + 'static,
{
    let result = f.call(args);
    let deferred = result.clone();
    queue.schedule_once(delay, move || sink.emit(Some(LOG_LABEL), &deferred));
    result
}

/// Calls `f` immediately and returns its result paired with a cancellation
/// handle; the [`LOG_LABEL`] emission repeats every [`EVERY_LOG_PERIOD`]
/// until the holder cancels the handle.
///
/// Cancellation is the holder's responsibility; the emissions continue
/// indefinitely otherwise.
pub fn invoke_and_log_every<S, F, Args>(
    queue: &TimerQueue,
    mut sink: S,
    mut f: F,
    args: Args,
) -> (F::Output, TimerHandle)
where
    F: Callable<Args>,
    F::Output: Clone + 'static,
    S: Sink<F::Output> + 'static,
{
    let result = f.call(args);
    let deferred = result.clone();
    let handle = queue.schedule_repeating(EVERY_LOG_PERIOD, move || {
        sink.emit(Some(LOG_LABEL), &deferred);
    });
    (result, handle)
}

/// Decorated callable produced by [`with_logging`].
pub struct Logged<S, F> {
    sink: S,
    f: F,
}

/// Binds `sink` and `f` once; the returned decorator reports every result to
/// the sink (value only, no label) and passes it through.
pub fn with_logging<S, F>(sink: S, f: F) -> Logged<S, F> {
    Logged { sink, f }
}

impl<S, F, Args> Callable<Args> for Logged<S, F>
where
    F: Callable<Args>,
    S: Sink<F::Output>,
{
    type Output = F::Output;

    fn call(&mut self, args: Args) -> F::Output {
        let result = self.f.call(args);
        self.sink.emit(None, &result);
        result
    }
}

/// Decorated callable produced by [`with_logging_comment`].
pub struct Commented<S, F> {
    sink: S,
    comment: String,
    f: F,
}

/// Like [`with_logging`], but every emission carries `comment` as its label.
pub fn with_logging_comment<S, F>(sink: S, comment: impl Into<String>, f: F) -> Commented<S, F> {
    Commented {
        sink,
        comment: comment.into(),
        f,
    }
}

impl<S, F, Args> Callable<Args> for Commented<S, F>
where
    F: Callable<Args>,
    S: Sink<F::Output>,
{
    type Output = F::Output;

    fn call(&mut self, args: Args) -> F::Output {
        let result = self.f.call(args);
        self.sink.emit(Some(&self.comment), &result);
        result
    }
}
