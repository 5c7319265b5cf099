//! Combinators gated by a [`Condition`].

use std::fmt::Debug;
use std::sync::Arc;

use super::Condition;
use crate::compose::{Func, Funcs};
use crate::control::{Eventual, Step};
use crate::error::FonadError;
use crate::fonad::{Fault, FaultOptions, Fonad, Payload};
use crate::operator::{Args, Receiver, call, call_method};
use crate::pipeline::thread;

/// Evaluates `condition` and continues with `on_true` when it holds.
///
/// `false` returns the input; a failed condition returns its `Fault`.
fn gate<T, F>(condition: &Condition<T>, input: Fonad<T>, operation: &'static str, on_true: F) -> Step<T>
where
    T: Payload,
    F: FnOnce(Fonad<T>) -> Step<T> + Send + 'static,
{
    condition.evaluate(&input).then(move |verdict| match verdict {
        Ok(true) => on_true(input),
        Ok(false) => Eventual::Now(input),
        Err(fault) => {
            tracing::debug!(operation, "condition failed; returning its fault");
            Eventual::Now(Fonad::Fault(fault))
        }
    })
}

/// [`call`] gated by a condition.
///
/// Non-`Just` inputs are returned unchanged without evaluating the
/// condition.
///
/// # Examples
///
/// ```rust
/// use fonad::Fonad;
/// use fonad::condition::{Pred, call_if};
/// use fonad::operator::add_note;
///
/// let large = Pred::value(|value: &i32| *value > 100);
/// let flag = call_if(large, add_note("large value"));
///
/// assert_eq!(flag.apply(Fonad::just(500)).wait().notes(), ["large value"]);
/// assert!(flag.apply(Fonad::just(5)).wait().notes().is_empty());
/// ```
pub fn call_if<T: Payload>(
    condition: impl Into<Condition<T>>,
    functions: impl Into<Funcs<T>>,
) -> Func<T> {
    let condition = Arc::new(condition.into());
    let batch = call(functions);
    Func::fonad(move |input: Fonad<T>| {
        if input.is_reflection() {
            return Eventual::Now(input);
        }
        let batch = batch.clone();
        gate(&condition, input, "call_if", move |input| batch.apply(input))
    })
    .named("call_if")
}

/// [`call_method`] gated by a condition.
pub fn call_method_if<T>(
    condition: impl Into<Condition<T>>,
    name: impl Into<String>,
    args: impl Into<Args<T::Arg>>,
) -> Func<T>
where
    T: Payload + Receiver + Debug,
    T::Arg: Send + Sync + 'static,
{
    let condition = Arc::new(condition.into());
    let method = call_method(name, args);
    Func::fonad(move |input: Fonad<T>| {
        if input.is_reflection() {
            return Eventual::Now(input);
        }
        let method = method.clone();
        gate(&condition, input, "call_method_if", move |input| method.apply(input))
    })
    .named("call_method_if")
}

/// Wraps the input in `Passthrough` when the condition holds.
///
/// The wrapped input rides through the remaining stages of a pipeline
/// untouched and is unwrapped at its end. An input that is already a
/// `Passthrough` is returned as is.
///
/// # Examples
///
/// ```rust
/// use fonad::condition::{Pred, passthrough_if};
/// use fonad::{Fonad, pipe_fm};
///
/// let cached = Pred::value(|value: &i32| *value == 42);
/// let pipeline = pipe_fm![passthrough_if(cached), |value: i32| value + 1];
///
/// assert_eq!(pipeline.run(42).wait(), Fonad::just(42));
/// assert_eq!(pipeline.run(1).wait(), Fonad::just(2));
/// ```
pub fn passthrough_if<T: Payload>(condition: impl Into<Condition<T>>) -> Func<T> {
    let condition = Arc::new(condition.into());
    Func::fonad(move |input: Fonad<T>| {
        if input.is_passthrough() {
            return Eventual::Now(input);
        }
        gate(&condition, input, "passthrough_if", |input| {
            Eventual::Now(Fonad::passthrough(input))
        })
    })
    .named("passthrough_if")
}

/// Replaces the input with a new `Fault` when the condition holds.
///
/// The input's notes are carried over, ahead of any notes in `options`.
/// A `Fault` input keeps its entries and gains one built from `options`.
/// A `Passthrough` input is returned as is.
///
/// # Examples
///
/// ```rust
/// use fonad::Fonad;
/// use fonad::condition::{Pred, fault_if};
///
/// let negative = Pred::value(|value: &i32| *value < 0);
/// let guard = fault_if(negative, "validate");
///
/// let mut input = Fonad::just(-1);
/// input.add_note("parsed");
/// let result = guard.apply(input).wait();
/// assert!(result.is_fault());
/// assert_eq!(result.notes(), ["parsed"]);
/// ```
pub fn fault_if<T: Payload>(
    condition: impl Into<Condition<T>>,
    options: impl Into<FaultOptions>,
) -> Func<T> {
    let condition = Arc::new(condition.into());
    let options = options.into();
    Func::fonad(move |input: Fonad<T>| {
        if input.is_passthrough() {
            return Eventual::Now(input);
        }
        let options = options.clone();
        gate(&condition, input, "fault_if", move |input| {
            let fault = match input {
                Fonad::Fault(mut fault) => {
                    fault.append_options(options);
                    fault
                }
                mut other => {
                    let mut fault = Fault::from_options(options);
                    fault.notes_mut().inherit(other.take_notes());
                    fault
                }
            };
            Eventual::Now(Fonad::Fault(fault))
        })
    })
    .named("fault_if")
}

/// One arm of a case analysis: a condition and the functions to run when
/// it is the first to hold.
#[derive(Debug, Clone)]
pub struct Arm<T> {
    when: Condition<T>,
    then: Arc<[Func<T>]>,
}

/// Builds an [`Arm`].
pub fn arm<T>(when: impl Into<Condition<T>>, then: impl Into<Funcs<T>>) -> Arm<T> {
    Arm {
        when: when.into(),
        then: then.into().into_shared(),
    }
}

enum Selection {
    Arm(usize),
    Unmatched,
    Failed(Fault),
}

/// Evaluates arm conditions in order, stopping at the first that holds.
fn select<T: Payload>(
    arms: Arc<[Arm<T>]>,
    start: usize,
    input: Fonad<T>,
) -> Eventual<(Fonad<T>, Selection)> {
    for index in start..arms.len() {
        let verdict = arms[index].when.evaluate(&input);
        match verdict {
            Eventual::Now(Ok(true)) => return Eventual::Now((input, Selection::Arm(index))),
            Eventual::Now(Ok(false)) => {}
            Eventual::Now(Err(fault)) => return Eventual::Now((input, Selection::Failed(fault))),
            pending @ Eventual::Later(_) => {
                return pending.then(move |verdict| match verdict {
                    Ok(true) => Eventual::Now((input, Selection::Arm(index))),
                    Ok(false) => select(arms, index + 1, input),
                    Err(fault) => Eventual::Now((input, Selection::Failed(fault))),
                });
            }
        }
    }
    Eventual::Now((input, Selection::Unmatched))
}

/// Runs the functions of the first arm whose condition holds.
///
/// The chosen arm's functions are applied left to right, as a pipeline
/// stage would. If no arm holds, the input is returned unchanged. A failed
/// condition stops the analysis and its `Fault` is returned. A
/// `Passthrough` input is returned without evaluating any arm.
///
/// # Examples
///
/// ```rust
/// use fonad::compose::reflect;
/// use fonad::condition::{arm, case_of, is_fault, is_just, or_else};
/// use fonad::Fonad;
///
/// let with_default = case_of(vec![
///     arm(is_fault(), reflect()),
///     arm(or_else(), fonad::compose::func(|_: String| "default".to_string())),
/// ]);
/// assert_eq!(
///     with_default.apply(Fonad::just("7".to_string())).wait(),
///     Fonad::just("default".to_string()),
/// );
///
/// let identity = case_of(vec![arm(is_fault(), reflect()), arm(is_just(), reflect())]);
/// assert_eq!(identity.apply(Fonad::just(7)).wait(), Fonad::just(7));
/// ```
pub fn case_of<T: Payload>(arms: impl IntoIterator<Item = Arm<T>>) -> Func<T> {
    let arms: Arc<[Arm<T>]> = arms.into_iter().collect();
    Func::fonad(move |input: Fonad<T>| {
        if input.is_passthrough() {
            return Eventual::Now(input);
        }
        let arms_for_actions = Arc::clone(&arms);
        select(Arc::clone(&arms), 0, input).then(move |(input, selection)| match selection {
            Selection::Arm(index) => thread(&arms_for_actions[index].then, input),
            Selection::Unmatched => Eventual::Now(input),
            Selection::Failed(fault) => Eventual::Now(Fonad::Fault(fault)),
        })
    })
    .named("case_of")
}

/// A case analysis that reports an unmatched input as an error.
///
/// Built by [`case_of_strict`].
#[derive(Debug, Clone)]
pub struct CaseOfStrict<T> {
    arms: Arc<[Arm<T>]>,
}

impl<T: Payload + Debug> CaseOfStrict<T> {
    /// Runs the analysis.
    ///
    /// # Errors
    ///
    /// Returns [`FonadError::Unmatched`] when no arm holds. A `Passthrough`
    /// input is returned as `Ok` without evaluating any arm.
    pub fn apply(&self, input: Fonad<T>) -> Eventual<Result<Fonad<T>, FonadError>> {
        if input.is_passthrough() {
            return Eventual::Now(Ok(input));
        }
        let arms = Arc::clone(&self.arms);
        select(Arc::clone(&self.arms), 0, input).then(move |(input, selection)| match selection {
            Selection::Arm(index) => thread(&arms[index].then, input).map(Ok),
            Selection::Unmatched => Eventual::Now(Err(FonadError::Unmatched {
                value: input.inspect(),
            })),
            Selection::Failed(fault) => Eventual::Now(Ok(Fonad::Fault(fault))),
        })
    }
}

/// Like [`case_of`], but an input no arm matches is an error.
///
/// # Examples
///
/// ```rust
/// use fonad::compose::reflect;
/// use fonad::condition::{arm, case_of_strict, is_fault};
/// use fonad::{Fonad, FonadError};
///
/// let faults_only = case_of_strict(vec![arm(is_fault(), reflect())]);
/// let error = faults_only.apply(Fonad::just(7)).wait().unwrap_err();
/// assert_eq!(error, FonadError::Unmatched { value: "Just(7)".to_string() });
/// ```
pub fn case_of_strict<T>(arms: impl IntoIterator<Item = Arm<T>>) -> CaseOfStrict<T> {
    CaseOfStrict {
        arms: arms.into_iter().collect(),
    }
}
