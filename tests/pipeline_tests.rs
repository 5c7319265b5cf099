//! Integration tests for `pipe_fm` and `pipe_async_fm`.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use fonad::prelude::*;
use rstest::rstest;

/// Stores `value` in `state`, ignoring the input.
fn set_me(state: &Capture<i64>, value: i64) -> Func<i64> {
    let state = state.clone();
    Func::updater(move |_: &mut Fonad<i64>| state.set(Fonad::just(value))).named("set_me")
}

/// Rewrites `state` after `delay`, returning the input untouched.
fn update_later(state: &Capture<i64>, delay_ms: u64, update: fn(i64) -> i64) -> Func<i64> {
    let state = state.clone();
    Func::fonad(move |input: Fonad<i64>| {
        let state = state.clone();
        deferred::<i64, _, _>(async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            let current = state.get().and_then(Fonad::into_value).unwrap_or_default();
            state.set(Fonad::just(update(current)));
            input
        })
    })
}

#[tokio::test]
async fn test_deferred_stages_run_in_listed_order() {
    let state = Capture::new();
    let pipeline = pipe_fm![
        set_me(&state, 3),
        update_later(&state, 15, |value| value * value),
        update_later(&state, 10, |value| value * 2),
        update_later(&state, 5, |value| value * 3),
    ];

    let result = pipeline.run(0).await;

    assert_eq!(result, Fonad::just(0));
    assert_eq!(state.get(), Some(Fonad::just(54)));
}

#[tokio::test]
async fn test_async_pipeline_runs_in_listed_order() {
    let state = Capture::new();
    let pipeline = pipe_async_fm![
        set_me(&state, 3),
        update_later(&state, 15, |value| value * value),
        update_later(&state, 10, |value| value * 2),
        update_later(&state, 5, |value| value * 3),
    ];

    pipeline.run(0).await;

    assert_eq!(state.get(), Some(Fonad::just(54)));
}

#[rstest]
fn test_reflection_input_skips_every_stage() {
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&runs);
    let counted = Func::fonad(move |input: Fonad<i32>| {
        counter.fetch_add(1, Ordering::SeqCst);
        input
    });
    let pipeline = pipe_fm![counted];

    let fault: Fonad<i32> = Fonad::fault("load", "failed");
    assert_eq!(pipeline.run(fault.clone()).wait(), fault);
    assert_eq!(pipeline.run(Fonad::<i32>::nothing()).wait(), Fonad::nothing());
    assert_eq!(runs.load(Ordering::SeqCst), 0);
}

#[rstest]
fn test_fault_mid_pipeline_short_circuits_value_stages() {
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&runs);
    let pipeline = pipe_fm![
        |value: i32| value.checked_sub(10).ok_or_else(|| Exception::new("underflow")),
        |value: i32| u8::try_from(value).map(i32::from),
        move |value: i32| {
            counter.fetch_add(1, Ordering::SeqCst);
            value
        },
    ];

    assert_eq!(pipeline.run(20).wait(), Fonad::just(10));
    let result = pipeline.run(5).wait();
    let fault = result.as_fault().expect("fault");
    assert_eq!(fault.exception().map(Exception::name), Some("TryFromIntError"));
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[rstest]
fn test_terminal_passthrough_is_unwrapped() {
    let pipeline = pipe_fm![
        |value: i32| value + 1,
        passthrough_if(Pred::value(|value: &i32| *value > 1)),
        |value: i32| value * 1000,
    ];
    assert_eq!(pipeline.run(1).wait(), Fonad::just(2));
    assert_eq!(pipeline.run(0).wait(), Fonad::just(1000));
}

#[rstest]
fn test_passthrough_of_fault_surfaces_the_fault() {
    let pipeline = pipe_fm![
        |_: i32| Fonad::passthrough(Fonad::<i32>::fault("cache", "stale")),
        |value: i32| value + 1,
    ];
    assert!(pipeline.run(1).wait().is_fault());
}

#[tokio::test]
async fn test_async_pipeline_accepts_a_pending_input() {
    let pipeline = pipe_async_fm![|value: i32| value * 2];
    let input = deferred::<i32, _, _>(async { 21 });
    assert_eq!(pipeline.run(input).await, Fonad::just(42));
}

#[tokio::test]
async fn test_async_pipeline_reflection_input_skips_stages() {
    let pipeline = pipe_async_fm![|value: i32| value * 2];
    assert!(pipeline.run(None::<i32>).await.is_nothing());
}

#[tokio::test]
async fn test_pipelines_compose() {
    let normalize = pipe_fm![|text: String| text.trim().to_lowercase()];
    let lookup = pipe_async_fm![|key: String| {
        deferred::<String, _, _>(async move {
            tokio::time::sleep(Duration::from_millis(1)).await;
            format!("value of {key}")
        })
    }];
    let pipeline = pipe_fm![normalize, lookup, add_note("looked up")];

    let result = pipeline.run("  KEY ".to_string()).await;
    assert_eq!(result.value().map(String::as_str), Some("value of key"));
    assert_eq!(result.notes(), ["looked up"]);
}
