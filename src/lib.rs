//! Rewrap: composable callback wrappers with a deterministic deferred-task queue.
//!
//! # Overview
//!
//! Rewrap is a small library of higher-order utilities: invocation loggers,
//! sequence iteration helpers, compute-once and deadline-bounded wrappers,
//! and randomized helpers. Each utility is a leaf; none depends on another,
//! and there is no shared state across wrapper instances.
//!
//! Deferred behavior (delayed log emission, wrapper deadlines) never touches
//! a platform timer. It is modelled as explicit tasks with fire times on a
//! single-threaded [`timer::TimerQueue`] whose virtual clock advances only
//! when the caller says so, which makes every time-dependent contract in
//! this crate fully deterministic under test.
//!
//! # Core contracts
//!
//! - **Loggers pass results through unchanged**: a sink observes a result;
//!   it never alters what the caller receives.
//! - **Wrapped failures propagate**: a panic in a wrapped callback surfaces
//!   immediately and unmodified; no sink runs for a call that failed.
//! - **Caller's turn completes first**: scheduling a deferred task never runs
//!   it inline, even at zero delay.
//! - **Frozen state stays frozen**: a [`wrap::Once`] slot, once filled, is
//!   never overwritten; a [`wrap::Until`] wrapper past its deadline never
//!   recomputes.
//!
//! # Module structure
//!
//! - [`call`]: the [`Callable`] argument-forwarding seam all wrappers share
//! - [`sink`]: the logging-sink capability consumed by the loggers
//! - [`timer`]: virtual-time deferred-task queue with cancellation handles
//! - [`log`](mod@log): invocation loggers and logging decorators
//! - [`seq`]: slice iteration and transformation helpers
//! - [`wrap`]: compute-once and deadline-bounded wrappers
//! - [`random`]: OS-entropy-backed randomized helpers
//! - [`error`](mod@error): the single invalid-input error kind

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]

pub mod call;
pub mod error;
pub mod log;
pub mod random;
pub mod seq;
pub mod sink;
pub mod timer;
pub mod wrap;

pub use call::Callable;
pub use error::{Error, Result};
pub use log::{
    Commented, EVERY_LOG_PERIOD, Logged, invoke_and_log, invoke_and_log_delayed,
    invoke_and_log_every, with_logging, with_logging_comment,
};
pub use random::{random_below, repeat_digit};
pub use seq::{for_each, map, map_recursive};
pub use sink::{LOG_LABEL, Sink, TracingSink};
pub use timer::{Time, TimerHandle, TimerQueue};
pub use wrap::{Once, Until, once, until};
