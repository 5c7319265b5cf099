//! Integration tests for condition evaluation and the conditional combinators.

use std::time::Duration;

use fonad::prelude::*;
use rstest::rstest;

fn slow_positive() -> Pred<i32> {
    Pred::value(|value: &i32| {
        let value = *value;
        deferred_check(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            value > 0
        })
    })
    .named("slow_positive")
}

fn rejecting() -> Pred<i32> {
    Pred::value(|_: &i32| {
        deferred_check(async { Err::<bool, _>(Exception::new("service unavailable")) })
    })
}

// =============================================================================
// Evaluation
// =============================================================================

#[rstest]
#[case::hard_true(Condition::from(true), Ok(true))]
#[case::hard_false(Condition::from(false), Ok(false))]
#[case::literal_just(Condition::from(Fonad::just(0)), Ok(true))]
#[case::literal_nothing(Condition::from(Fonad::<i32>::nothing()), Ok(false))]
#[case::literal_ok(Condition::from(Fonad::<i32>::ok()), Ok(true))]
#[case::empty_list(Condition::from(Vec::<Pred<i32>>::new()), Ok(true))]
fn test_condition_forms(#[case] condition: Condition<i32>, #[case] expected: Result<bool, Fault>) {
    assert_eq!(check(condition, &Fonad::just(1)).wait(), expected);
}

#[rstest]
fn test_pred_may_answer_with_a_variant() {
    let known = Pred::value(|value: &i32| {
        if *value >= 0 { Fonad::just(*value < 10) } else { Fonad::<bool>::nothing() }
    });
    assert_eq!(check(known.clone(), &Fonad::just(3)).wait(), Ok(true));
    assert_eq!(check(known.clone(), &Fonad::just(30)).wait(), Ok(false));
    assert_eq!(check(known, &Fonad::just(-3)).wait(), Ok(false));
}

#[tokio::test]
async fn test_check_pred_list_mixes_sync_and_deferred() {
    let preds = [is_just(), slow_positive(), Pred::value(|value: &i32| value % 2 == 0)];
    assert_eq!(check_pred_list(&preds, &Fonad::just(4)).await, Ok(true));
    assert_eq!(check_pred_list(&preds, &Fonad::just(3)).await, Ok(false));
    assert_eq!(check_pred_list(&preds, &Fonad::just(-4)).await, Ok(false));
}

#[tokio::test]
async fn test_rejection_is_a_fault_never_false() {
    let preds = [Pred::value(|_: &i32| false), rejecting()];
    let verdict = check_pred_list(&preds, &Fonad::just(1)).await;
    let fault = verdict.expect_err("rejection");
    assert_eq!(fault.exception().map(Exception::message), Some("service unavailable"));
}

// =============================================================================
// Combinators
// =============================================================================

#[tokio::test]
async fn test_call_if_with_deferred_condition() {
    let audit = call_if(slow_positive(), add_note("audited"));
    assert_eq!(audit.apply(Fonad::just(5)).await.notes(), ["audited"]);
    assert!(audit.apply(Fonad::just(-5)).await.notes().is_empty());
}

#[tokio::test]
async fn test_call_if_with_rejected_condition_returns_fault() {
    let audit = call_if(rejecting(), add_note("audited"));
    assert!(audit.apply(Fonad::just(5)).await.is_fault());
}

#[rstest]
fn test_passthrough_if_bypasses_rest_of_pipeline() {
    let cached = Pred::value(|key: &String| key.starts_with("cached:"));
    let pipeline = pipe_fm![
        passthrough_if(cached),
        |key: String| format!("fetched {key}"),
        |text: String| text.to_uppercase(),
    ];
    assert_eq!(
        pipeline.run("cached:a".to_string()).wait(),
        Fonad::just("cached:a".to_string())
    );
    assert_eq!(pipeline.run("b".to_string()).wait(), Fonad::just("FETCHED B".to_string()));
}

#[rstest]
fn test_passthrough_if_has_no_reflection_guard() {
    let always = passthrough_if::<i32>(true);
    let result = always.apply(Fonad::nothing()).wait();
    assert_eq!(result, Fonad::passthrough(Fonad::nothing()));
}

#[rstest]
fn test_passthrough_is_inert_to_later_gated_stages() {
    let guarded = pipe_fm![passthrough_if(true), fault_if(true, "late guard")];
    assert_eq!(guarded.run(1).wait(), Fonad::just(1));

    let rewrapped = pipe_fm![passthrough_if(true), passthrough_if(true), |value: i32| value + 1];
    assert_eq!(rewrapped.run(1).wait(), Fonad::just(1));

    let analysed = pipe_fm![
        passthrough_if(true),
        case_of(vec![arm(or_else(), func(|_: i32| Fonad::<i32>::fault("arm", "ran")))]),
    ];
    assert_eq!(analysed.run(1).wait(), Fonad::just(1));
}

#[rstest]
fn test_case_of_strict_returns_passthrough_without_matching() {
    let strict = case_of_strict(vec![arm(is_fault(), reflect())]);
    let carried = Fonad::passthrough_value(4);
    assert_eq!(strict.apply(carried.clone()).wait(), Ok(carried));
}

#[rstest]
fn test_fault_if_keeps_earlier_fault_context() {
    let earlier = Fonad::<i32>::fault_with(
        FaultOptions::new("db").message("down").root_cause("network").code("E_DB"),
    );
    let guard = fault_if(true, FaultOptions::new("validate").code("E_VALIDATE"));

    let result = guard.apply(earlier).wait();
    let fault = result.as_fault().expect("fault");
    let operations: Vec<&str> = fault.entries().iter().map(FaultEntry::operation).collect();
    assert_eq!(operations, ["db", "validate"]);
    assert_eq!(fault.root_cause(), Some("network"));
    assert_eq!(fault.code(), Some("E_DB"));
}

#[rstest]
fn test_fault_if_replaces_input() {
    let too_big = fault_if(
        Pred::value(|value: &i32| *value > 10),
        FaultOptions::new("limit").message("value above 10"),
    );
    let pipeline = pipe_fm![too_big, |value: i32| value * 2];
    assert_eq!(pipeline.run(3).wait(), Fonad::just(6));

    let rejected = pipeline.run(11).wait();
    let fault = rejected.as_fault().expect("fault");
    assert_eq!(fault.entries()[0].messages(), ["value above 10"]);
}

#[rstest]
fn test_case_of_dispatches_on_variant() {
    let recover = case_of(vec![
        arm(is_fault(), func(|_: i32| 0)),
        arm(is_nothing(), Func::fonad(|_: Fonad<i32>| Fonad::just(-1))),
        arm(or_else(), reflect()),
    ]);
    assert_eq!(recover.apply(Fonad::just(9)).wait(), Fonad::just(9));
    assert_eq!(recover.apply(Fonad::nothing()).wait(), Fonad::just(-1));
    // Value functions never see a Fault, so the Fault comes back unchanged.
    assert!(recover.apply(Fonad::fault("read", "failed")).wait().is_fault());
}

#[rstest]
fn test_case_of_or_else_default() {
    let with_default = case_of(vec![
        arm(is_fault(), reflect()),
        arm(or_else(), func(|_: String| "default".to_string())),
    ]);
    assert_eq!(
        with_default.apply(Fonad::just("7".to_string())).wait(),
        Fonad::just("default".to_string())
    );
}

#[tokio::test]
async fn test_case_of_strict_reports_unmatched_input() {
    let strict = case_of_strict(vec![arm(slow_positive(), func(|value: i32| value + 1))]);
    assert_eq!(strict.apply(Fonad::just(1)).await, Ok(Fonad::just(2)));
    assert_eq!(
        strict.apply(Fonad::just(-1)).await,
        Err(FonadError::Unmatched {
            value: "Just(-1)".to_string()
        })
    );
}
