//! Integration tests for the core operators and tagged functions.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use fonad::prelude::*;
use rstest::rstest;

fn counting(counter: &Arc<AtomicUsize>) -> Func<i32> {
    let counter = Arc::clone(counter);
    func(move |value: i32| {
        counter.fetch_add(1, Ordering::SeqCst);
        value
    })
}

// =============================================================================
// map / chain
// =============================================================================

#[rstest]
fn test_map_reflections_are_returned_unchanged() {
    let invoked = Arc::new(AtomicUsize::new(0));
    let square = map(counting(&invoked));
    let reflections: Vec<Fonad<i32>> = vec![
        Fonad::nothing(),
        Fonad::ok(),
        Fonad::fault("load", "missing"),
        Fonad::passthrough_value(3),
    ];
    for reflection in reflections {
        assert_eq!(square.apply(reflection.clone()).wait(), reflection);
    }
    assert_eq!(invoked.load(Ordering::SeqCst), 0);
}

#[rstest]
fn test_chain_returns_passthrough_unchanged() {
    let invoked = Arc::new(AtomicUsize::new(0));
    let next = chain(counting(&invoked));
    let carried = Fonad::passthrough_value(3);
    assert_eq!(next.apply(carried.clone()).wait(), Err(carried));
    assert_eq!(invoked.load(Ordering::SeqCst), 0);
}

#[rstest]
fn test_map_does_not_carry_notes() {
    let mut input = Fonad::just(2);
    input.add_note("loaded");
    let result = input.map(|value: i32| value * 2).wait();
    assert_eq!(result, Fonad::just(4));
    assert!(result.notes().is_empty());
}

#[rstest]
fn test_map_lifts_empty_result() {
    let clear = map(|_: String| String::new());
    assert!(clear.apply(Fonad::just("x".to_string())).wait().is_nothing());
}

#[rstest]
fn test_map_explicit_fault_propagates_unchanged() {
    let failing = map(|_: i32| Fonad::<i32>::fault("lookup", "not found"));
    let fault = failing.apply(Fonad::just(1)).wait();
    assert_eq!(fault.as_fault().map(|fault| fault.entries()[0].operation()), Some("lookup"));
}

#[rstest]
fn test_chain_extracts() {
    let parse = chain(|text: String| text.parse::<i32>().map(|number| (number + 1).to_string()));
    assert_eq!(
        parse.apply(Fonad::just("1".to_string())).wait(),
        Ok(Extracted::Value("2".to_string()))
    );
    assert!(parse.apply(Fonad::just("one".to_string())).wait().is_err());
}

#[tokio::test]
async fn test_map_deferred_rejection_equals_sync_error() {
    let sync = map(|_: i32| Err::<i32, _>(Exception::new("boom"))).apply(Fonad::just(1)).wait();
    let deferred_result = map(|_: i32| {
        deferred::<i32, _, _>(async { Err::<i32, _>(Exception::new("boom")) })
    })
    .apply(Fonad::just(1))
    .await;
    let messages = |fonad: &Fonad<i32>| {
        fonad
            .as_fault()
            .and_then(Fault::exception)
            .map(|exception| exception.message().to_string())
    };
    assert_eq!(messages(&sync), Some("boom".to_string()));
    assert_eq!(messages(&deferred_result), messages(&sync));
}

// =============================================================================
// call
// =============================================================================

#[rstest]
fn test_call_runs_every_function_and_returns_first_fault() {
    let runs = Arc::new(AtomicUsize::new(0));
    let a = counting(&runs);
    let b = func(|_: i32| Fonad::<i32>::fault("b", "failed"));
    let c = counting(&runs);

    let result = call(vec![a, b, c]).apply(Fonad::just(1)).wait();

    assert_eq!(runs.load(Ordering::SeqCst), 2);
    let fault = result.as_fault().expect("fault");
    assert_eq!(fault.entries()[0].operation(), "b");
}

#[tokio::test]
async fn test_call_picks_first_fault_in_list_order_not_completion_order() {
    let slow = func(|_: i32| {
        deferred::<i32, _, _>(async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Fonad::<i32>::fault("slow", "failed late")
        })
    });
    let fast = func(|_: i32| Fonad::<i32>::fault("fast", "failed early"));

    let result = call(vec![slow, fast]).apply(Fonad::just(1)).await;

    let fault = result.as_fault().expect("fault");
    assert_eq!(fault.entries()[0].operation(), "slow");
}

#[rstest]
fn test_call_returns_input_when_all_succeed() {
    let mut input = Fonad::just(5);
    input.add_note("kept");
    let result = call(vec![func(|value: i32| value * 100), add_note("called")])
        .apply(input)
        .wait();
    assert_eq!(result.value(), Some(&5));
    assert_eq!(result.notes(), ["kept", "called"]);
}

#[rstest]
fn test_call_in_order_stops_at_first_fault() {
    let runs = Arc::new(AtomicUsize::new(0));
    let functions = vec![
        counting(&runs),
        func(|_: i32| Fonad::<i32>::fault("second", "failed")),
        counting(&runs),
    ];
    let result = call_in_order(functions).apply(Fonad::just(1)).wait();
    assert!(result.is_fault());
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[rstest]
fn test_call_on_fault_only_touches_faults() {
    let classify = call_on_fault::<i32, _>(|fault| fault.set_root_cause("storage"));
    assert_eq!(classify.apply(Fonad::just(1)).wait(), Fonad::just(1));
    let result = classify.apply(Fonad::fault("write", "disk full")).wait();
    assert_eq!(result.as_fault().and_then(Fault::root_cause), Some("storage"));
}

#[rstest]
fn test_call_on_nothing_runs_for_nothing_only() {
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&runs);
    let observe = Func::query(move |input: &Fonad<i32>| {
        counter.fetch_add(1, Ordering::SeqCst);
        input.clone()
    });
    let on_nothing = call_on_nothing(observe);

    on_nothing.apply(Fonad::just(1)).wait();
    assert_eq!(runs.load(Ordering::SeqCst), 0);
    assert!(on_nothing.apply(Fonad::nothing()).wait().is_nothing());
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Notes and capture
// =============================================================================

#[rstest]
fn test_note_updaters_annotate_nothing() {
    let notes = call_on_nothing(vec![add_note("second"), prepend_note("first"), add_note("third")]);
    let result = notes.apply(Fonad::<i32>::nothing()).wait();
    assert!(result.is_nothing());
    assert_eq!(result.notes(), ["first", "second", "third"]);

    let reset = set_notes::<i32, _, _>(["only"]);
    assert_eq!(reset.apply(Fonad::ok()).wait().notes(), ["only"]);
}

#[rstest]
fn test_capture_is_visible_outside_the_pipeline() {
    let seen = Capture::new();
    let pipeline = pipe_fm![|value: i32| value * 2, capture(&seen), add_note("after capture")];
    let result = pipeline.run(4).wait();

    assert_eq!(result.notes(), ["after capture"]);
    assert_eq!(seen.get(), Some(Fonad::just(8)));

    assert!(seen.update(|fonad| fonad.add_note("outside")));
    assert_eq!(seen.take().map(|fonad| fonad.notes().to_vec()), Some(vec!["outside".to_string()]));
    assert!(seen.is_empty());
}

// =============================================================================
// Currying and tags
// =============================================================================

#[rstest]
fn test_curried_functions_keep_their_tag() {
    let scale = fonad_curry2!(value, |factor: i32, value: i32| value * factor);
    let annotate = fonad_curry2!(updater, |note: String, fonad: &mut Fonad<i32>| {
        fonad.add_note(note);
    });
    let between = fonad_curry3!(fonad, |low: i32, high: i32, input: Fonad<i32>| {
        let in_range = input.value().is_some_and(|value| (low..=high).contains(value));
        if in_range { input } else { Fonad::fault("between", "out of range") }
    });

    assert_eq!(scale(3).tag(), Tag::Value);
    assert_eq!(annotate("x".to_string()).tag(), Tag::Updater);
    assert_eq!(between(0)(10).tag(), Tag::Fonad);

    let pipeline = pipe_fm![scale(3), between(0)(10), annotate("in range".to_string())];
    let ok = pipeline.run(2).wait();
    assert_eq!(ok.value(), Some(&6));
    assert_eq!(ok.notes(), ["in range"]);

    let out = pipeline.run(5).wait();
    assert!(out.is_fault());
    assert_eq!(out.notes(), ["in range"]);
}

#[rstest]
fn test_partial_application_is_reusable() {
    let add = fonad_curry2!(value, |amount: i32, value: i32| value + amount);
    let add_one = add(1);
    let add_two = add(2);
    assert_eq!(add_one.apply(Fonad::just(1)).wait(), Fonad::just(2));
    assert_eq!(add_two.apply(Fonad::just(1)).wait(), Fonad::just(3));
    assert_eq!(add_one.apply(Fonad::just(10)).wait(), Fonad::just(11));
}

// =============================================================================
// Methods
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Account {
    balance: i64,
}

impl Emptiable for Account {}

impl Receiver for Account {
    type Arg = i64;

    fn method(&self, name: &str) -> Option<Method<Self>> {
        let method: Method<Self> = match name {
            "deposit" => |account, amounts| {
                account.balance += amounts.iter().sum::<i64>();
                account.clone().into_step("deposit")
            },
            "withdraw" => |account, amounts| {
                let total: i64 = amounts.iter().sum();
                if total > account.balance {
                    return Fonad::<Account>::fault("withdraw", "insufficient funds")
                        .into_step("withdraw");
                }
                account.balance -= total;
                account.clone().into_step("withdraw")
            },
            _ => return None,
        };
        Some(method)
    }
}

#[rstest]
fn test_call_method_mutates_and_returns_input() {
    let deposit = call_method::<Account>("deposit", [10, 5]);
    let result = deposit.apply(Fonad::just(Account { balance: 0 })).wait();
    assert_eq!(result, Fonad::just(Account { balance: 15 }));
}

#[rstest]
fn test_map_method_fault_is_returned() {
    let withdraw = map_method::<Account>("withdraw", 50);
    let result = withdraw.apply(Fonad::just(Account { balance: 10 })).wait();
    assert!(result.is_fault());
}

#[rstest]
fn test_call_method_if_gates_on_condition() {
    let rich = Pred::value(|account: &Account| account.balance > 100);
    let fee = call_method_if(rich, "withdraw", 1);
    assert_eq!(
        fee.apply(Fonad::just(Account { balance: 200 })).wait(),
        Fonad::just(Account { balance: 199 })
    );
    assert_eq!(
        fee.apply(Fonad::just(Account { balance: 50 })).wait(),
        Fonad::just(Account { balance: 50 })
    );
}
