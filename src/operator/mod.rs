//! The core operators.
//!
//! | Operator           | Returns on success              | On a non-`Just` input |
//! |--------------------|---------------------------------|-----------------------|
//! | [`map`]            | the lifted function result      | input unchanged       |
//! | [`chain`]          | the extracted function result   | input unchanged       |
//! | [`call`]           | the input (conduit)             | input unchanged       |
//! | [`call_in_order`]  | the input (conduit)             | input unchanged       |
//! | [`map_method`]     | the lifted method result        | input unchanged       |
//! | [`call_method`]    | the input (conduit)             | input unchanged       |
//!
//! Failures are never raised: an `Err` or explicit `Fault` from the wrapped
//! function becomes the operator's result.
//!
//! Diagnostics helpers ([`add_note`], [`prepend_note`], [`set_notes`]),
//! fault handling ([`call_on_fault`], [`call_on_nothing`]) and [`capture`]
//! are provided as updater [`Func`]s so they compose into pipelines.
//!
//! # Examples
//!
//! ```rust
//! use fonad::operator::{call, map};
//! use fonad::{Exception, Fonad};
//!
//! let square = map(|value: i64| value * value);
//! assert_eq!(square.apply(Fonad::just(3)).wait(), Fonad::just(9));
//!
//! let boom = map(|_: i64| Err::<i64, _>(Exception::new("boom")));
//! let result = boom.apply(Fonad::just(1)).wait();
//! assert_eq!(
//!     result.as_fault().and_then(|fault| fault.exception()).map(Exception::message),
//!     Some("boom"),
//! );
//!
//! let validate = call(fonad::compose::func(|value: i64| {
//!     if value > 0 { Fonad::just(value) } else { Fonad::fault("validate", "not positive") }
//! }));
//! assert_eq!(validate.apply(Fonad::just(4)).wait(), Fonad::just(4));
//! assert!(validate.apply(Fonad::just(-4)).wait().is_fault());
//! ```

mod method;

pub use method::{Args, Method, Receiver, call_method, map_method};

use std::sync::Arc;

use crate::compose::{Func, Funcs, IntoFunc};
use crate::control::{Capture, Eventual, Step};
use crate::fonad::{Extract, Extracted, Fault, Fonad, Payload};

fn skip<T>(input: Fonad<T>, operation: &str) -> Step<T> {
    tracing::trace!(operation, "reflection passed through");
    Eventual::Now(input)
}

/// Applies a function to the `Just` value and lifts its result.
///
/// Variant-level functions ([`Func::fonad`] and friends) receive the `Just`
/// variant itself. Every other variant is returned unchanged and the
/// function is not invoked.
pub fn map<T: Payload, M>(function: impl IntoFunc<T, M>) -> Func<T> {
    let function = function.into_func();
    Func::fonad(move |input: Fonad<T>| {
        if input.is_reflection() {
            return skip(input, "map");
        }
        function.invoke(input, "map")
    })
    .named("map")
}

/// Like [`map`], but the result is extracted.
///
/// Built by [`chain`].
#[derive(Debug, Clone)]
pub struct Chain<T> {
    function: Func<T>,
}

/// The outcome of a [`Chain`]: the extracted value, or the variant that
/// stopped it (the reflection it received, or the `Fault` produced).
pub type Chained<T> = Eventual<Result<Extracted<T>, Fonad<T>>>;

impl<T: Payload> Chain<T> {
    /// Runs the chain.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fonad::operator::chain;
    /// use fonad::{Extracted, Fonad};
    ///
    /// let increment = chain(|value: i32| value + 1);
    /// assert_eq!(increment.apply(Fonad::just(1)).wait(), Ok(Extracted::Value(2)));
    ///
    /// let nothing = Fonad::<i32>::nothing();
    /// assert_eq!(increment.apply(nothing.clone()).wait(), Err(nothing));
    /// ```
    pub fn apply(&self, input: Fonad<T>) -> Chained<T> {
        if input.is_reflection() {
            tracing::trace!(operation = "chain", "reflection passed through");
            return Eventual::Now(Err(input));
        }
        self.function.invoke(input, "chain").map(|result| {
            if result.is_fault() {
                Err(result)
            } else {
                Ok(result.extract())
            }
        })
    }
}

/// Builds a [`Chain`].
pub fn chain<T: Payload, M>(function: impl IntoFunc<T, M>) -> Chain<T> {
    Chain {
        function: function.into_func(),
    }
}

impl<T: Payload> Fonad<T> {
    /// Method form of [`map`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fonad::Fonad;
    ///
    /// let doubled = Fonad::just(21).map(|value: i32| value * 2);
    /// assert_eq!(doubled.wait(), Fonad::just(42));
    /// ```
    pub fn map<M>(self, function: impl IntoFunc<T, M>) -> Step<T> {
        map(function).apply(self)
    }

    /// Method form of [`chain`].
    pub fn chain<M>(self, function: impl IntoFunc<T, M>) -> Chained<T> {
        chain(function).apply(self)
    }
}

/// Runs every function against `input` and returns the first `Fault` in
/// list order, or `input`.
///
/// All functions start before any outcome is inspected; pending ones are
/// driven together.
fn run_batch<T: Payload>(functions: &[Func<T>], mut input: Fonad<T>, operation: &str) -> Step<T> {
    let outcomes: Vec<_> = functions
        .iter()
        .map(|function| function.conduit(&mut input, operation))
        .collect();
    Eventual::join_all(outcomes).map(move |outcomes| {
        outcomes
            .into_iter()
            .flatten()
            .next()
            .map_or(input, Fonad::Fault)
    })
}

/// Runs functions for effect and returns the input.
///
/// Every function receives the same input and every function runs, even
/// when an earlier one fails. If any produced a `Fault`, the first one in
/// list order is returned instead of the input. Updaters annotate the input
/// in place.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// use fonad::Fonad;
/// use fonad::compose::func;
/// use fonad::operator::call;
///
/// let runs = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&runs);
/// let count = func(move |value: u8| {
///     counter.fetch_add(1, Ordering::SeqCst);
///     value
/// });
/// let fail = func(|_: u8| Fonad::<u8>::fault("fail", "always"));
///
/// let result = call(vec![count.clone(), fail, count]).apply(Fonad::just(1)).wait();
/// assert!(result.is_fault());
/// assert_eq!(runs.load(Ordering::SeqCst), 2);
/// ```
pub fn call<T: Payload>(functions: impl Into<Funcs<T>>) -> Func<T> {
    let functions = functions.into().into_shared();
    Func::fonad(move |input: Fonad<T>| {
        if input.is_reflection() {
            return skip(input, "call");
        }
        run_batch(&functions, input, "call")
    })
    .named("call")
}

fn run_in_order<T: Payload>(functions: Arc<[Func<T>]>, start: usize, mut input: Fonad<T>) -> Step<T> {
    for index in start..functions.len() {
        match functions[index].conduit(&mut input, "call_in_order") {
            Eventual::Now(None) => {}
            Eventual::Now(Some(fault)) => return Eventual::Now(Fonad::Fault(fault)),
            pending @ Eventual::Later(_) => {
                return pending.then(move |outcome| match outcome {
                    Some(fault) => Eventual::Now(Fonad::Fault(fault)),
                    None => run_in_order(functions, index + 1, input),
                });
            }
        }
    }
    Eventual::Now(input)
}

/// Sequential [`call`]: each function finishes before the next starts, and
/// the first `Fault` stops the run.
pub fn call_in_order<T: Payload>(functions: impl Into<Funcs<T>>) -> Func<T> {
    let functions = functions.into().into_shared();
    Func::fonad(move |input: Fonad<T>| {
        if input.is_reflection() {
            return skip(input, "call_in_order");
        }
        run_in_order(Arc::clone(&functions), 0, input)
    })
    .named("call_in_order")
}

/// Runs `handler` on `Fault` inputs; everything else passes unchanged.
///
/// Handlers add context without losing earlier entries.
///
/// # Examples
///
/// ```rust
/// use fonad::Fonad;
/// use fonad::operator::call_on_fault;
///
/// let annotate = call_on_fault(|fault| {
///     fault.set_code("E_LOAD");
///     fault.append_entry("load profile", "could not load", None);
/// });
/// let result = annotate.apply(Fonad::<i32>::fault("read", "missing")).wait();
/// let fault = result.as_fault().unwrap();
/// assert_eq!(fault.code(), Some("E_LOAD"));
/// assert_eq!(fault.entries().len(), 2);
/// ```
pub fn call_on_fault<T, F>(handler: F) -> Func<T>
where
    T: Payload,
    F: Fn(&mut Fault) + Send + Sync + 'static,
{
    Func::updater(move |input: &mut Fonad<T>| {
        if let Some(fault) = input.as_fault_mut() {
            handler(fault);
        }
    })
    .named("call_on_fault")
}

/// Runs functions for effect on `Nothing` inputs; everything else passes
/// unchanged.
///
/// Functions receive the `Nothing` itself, so only variant-level functions
/// see anything. Conduit rules apply as for [`call`].
pub fn call_on_nothing<T: Payload>(functions: impl Into<Funcs<T>>) -> Func<T> {
    let functions = functions.into().into_shared();
    Func::fonad(move |input: Fonad<T>| {
        if input.is_nothing() {
            run_batch(&functions, input, "call_on_nothing")
        } else {
            Eventual::Now(input)
        }
    })
    .named("call_on_nothing")
}

/// Appends a note to whatever variant passes.
pub fn add_note<T: Payload>(note: impl Into<String>) -> Func<T> {
    let note = note.into();
    Func::updater(move |input: &mut Fonad<T>| input.add_note(note.clone())).named("add_note")
}

/// Inserts a note at the front of whatever variant passes.
pub fn prepend_note<T: Payload>(note: impl Into<String>) -> Func<T> {
    let note = note.into();
    Func::updater(move |input: &mut Fonad<T>| input.prepend_note(note.clone()))
        .named("prepend_note")
}

/// Replaces the notes of whatever variant passes.
pub fn set_notes<T, I, S>(notes: I) -> Func<T>
where
    T: Payload,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let notes: Vec<String> = notes.into_iter().map(Into::into).collect();
    Func::updater(move |input: &mut Fonad<T>| input.set_notes(notes.iter().cloned()))
        .named("set_notes")
}

/// Records a copy of whatever variant passes into `cell`.
///
/// # Examples
///
/// ```rust
/// use fonad::control::Capture;
/// use fonad::operator::capture;
/// use fonad::{Fonad, pipe_fm};
///
/// let seen = Capture::new();
/// let pipeline = pipe_fm![|value: i32| value + 1, capture(&seen), |value: i32| value * 10];
///
/// assert_eq!(pipeline.run(1).wait(), Fonad::just(20));
/// assert_eq!(seen.get(), Some(Fonad::just(2)));
/// ```
pub fn capture<T: Payload>(cell: &Capture<T>) -> Func<T> {
    let cell = cell.clone();
    Func::updater(move |input: &mut Fonad<T>| cell.set(input.clone())).named("capture")
}
