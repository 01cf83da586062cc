//! The logging-sink capability.
//!
//! A sink is the single collaborator interface the loggers consume: a
//! side-effect consumer of results, supplied by the caller. Its return value
//! is never used. Labelled variants (the invocation loggers, the commented
//! decorator) pass `Some(label)`; the plain decorator passes `None`.

use std::fmt;

/// Label used by the invocation loggers.
pub const LOG_LABEL: &str = "Log: ";

/// A side-effect consumer of logged values.
///
/// Implemented for any `FnMut(Option<&str>, &T)` closure, so a sink can be
/// supplied inline. Sinks observe values by reference and cannot alter what
/// the wrapped call returns.
pub trait Sink<T> {
    /// Consumes one logged value, with an optional label.
    fn emit(&mut self, label: Option<&str>, value: &T);
}

impl<T, F> Sink<T> for F
where
    F: FnMut(Option<&str>, &T),
{
    fn emit(&mut self, label: Option<&str>, value: &T) {
        self(label, value);
    }
}

/// A ready-made sink that forwards every emission to a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl<T: fmt::Debug> Sink<T> for TracingSink {
    fn emit(&mut self, label: Option<&str>, value: &T) {
        tracing::info!(label = label.unwrap_or_default(), value = ?value, "sink emission");
    }
}
