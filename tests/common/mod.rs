//! Shared test support: a recording sink and tracing initialization.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use rewrap::Sink;

/// A sink that records every emission. Clones share the same event buffer,
/// so a test can move one clone into a deferred task and read the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink<T> {
    events: Rc<RefCell<Vec<(Option<String>, T)>>>,
}

impl<T> RecordingSink<T> {
    pub fn new() -> Self {
        Self {
            events: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl<T: Clone> RecordingSink<T> {
    pub fn events(&self) -> Vec<(Option<String>, T)> {
        self.events.borrow().clone()
    }
}

impl<T: Clone> Sink<T> for RecordingSink<T> {
    fn emit(&mut self, label: Option<&str>, value: &T) {
        self.events
            .borrow_mut()
            .push((label.map(str::to_owned), value.clone()));
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
