//! End-to-end coverage of the invocation loggers against the virtual-time
//! queue: synchronous, delayed, and repeating emission.

mod common;

use std::time::Duration;

use common::{RecordingSink, init_tracing};
use rewrap::{
    EVERY_LOG_PERIOD, TimerQueue, invoke_and_log, invoke_and_log_delayed, invoke_and_log_every,
};

fn add(a: i32, b: i32) -> i32 {
    a + b
}

#[test]
fn immediate_logger_emits_once_with_label() {
    init_tracing();
    let mut sink = RecordingSink::new();
    let result = invoke_and_log(&mut sink, add, (10, 12));
    assert_eq!(result, 22);
    assert_eq!(sink.events(), vec![(Some("Log: ".to_owned()), 22)]);
}

#[test]
fn immediate_logger_is_reusable_with_fresh_arguments() {
    let mut sink = RecordingSink::new();
    assert_eq!(invoke_and_log(&mut sink, add, (10, 12)), 22);
    assert_eq!(invoke_and_log(&mut sink, add, (10, 15)), 25);
    assert_eq!(
        sink.events(),
        vec![
            (Some("Log: ".to_owned()), 22),
            (Some("Log: ".to_owned()), 25),
        ]
    );
}

#[test]
fn delayed_logger_hands_back_the_result_before_the_log_line_exists() {
    init_tracing();
    let queue = TimerQueue::new();
    let sink = RecordingSink::new();
    let reader = sink.clone();

    let result = invoke_and_log_delayed(&queue, Duration::from_millis(250), sink, add, (3, 4));
    assert_eq!(result, 7, "result is synchronous");
    assert!(reader.is_empty(), "emission waits for the queue");

    queue.advance(Duration::from_millis(249));
    assert!(reader.is_empty(), "no early emission");
    queue.advance(Duration::from_millis(1));
    assert_eq!(reader.events(), vec![(Some("Log: ".to_owned()), 7)]);

    queue.advance(Duration::from_millis(60_000));
    assert_eq!(reader.len(), 1, "one-shot never repeats");
}

#[test]
fn repeating_logger_emits_each_period_until_the_holder_cancels() {
    init_tracing();
    let queue = TimerQueue::new();
    let sink = RecordingSink::new();
    let reader = sink.clone();

    let (result, handle) = invoke_and_log_every(&queue, sink, add, (20, 22));
    assert_eq!(result, 42);
    assert_eq!(queue.pending(), 1);

    queue.advance(EVERY_LOG_PERIOD);
    queue.advance(EVERY_LOG_PERIOD);
    assert_eq!(reader.len(), 2);
    assert!(
        reader
            .events()
            .iter()
            .all(|event| event == &(Some("Log: ".to_owned()), 42)),
        "every emission repeats the original result"
    );

    assert!(handle.cancel());
    queue.advance(EVERY_LOG_PERIOD);
    queue.advance(EVERY_LOG_PERIOD);
    assert_eq!(reader.len(), 2, "cancellation stops the stream");
    assert_eq!(queue.pending(), 0);
}

#[test]
fn deferred_emissions_from_separate_loggers_interleave_by_deadline() {
    let queue = TimerQueue::new();
    let sink = RecordingSink::new();
    let reader = sink.clone();

    invoke_and_log_delayed(
        &queue,
        Duration::from_millis(300),
        sink.clone(),
        |x: i32| x,
        (2,),
    );
    invoke_and_log_delayed(&queue, Duration::from_millis(100), sink, |x: i32| x, (1,));

    queue.advance(Duration::from_millis(500));
    assert_eq!(
        reader.events(),
        vec![
            (Some("Log: ".to_owned()), 1),
            (Some("Log: ".to_owned()), 2),
        ]
    );
}
