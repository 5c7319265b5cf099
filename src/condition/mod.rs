//! Conditions and the combinators gated by them.
//!
//! A [`Condition`] is one of:
//!
//! - a hard `bool`
//! - a literal variant: `Fault` fails, `Nothing` is false, anything else true
//! - a predicate ([`Pred`]) evaluated against the input
//! - a list of conditions, all of which must hold
//!
//! Predicates may answer synchronously or not, and may fail. Evaluation
//! always yields a [`Verdict`]: `Ok(bool)`, or `Err(fault)` when a
//! predicate failed. A failure is never coerced to `false`.
//!
//! # Examples
//!
//! ```rust
//! use fonad::Fonad;
//! use fonad::condition::{Pred, check, check_pred_list, is_just};
//!
//! let input = Fonad::just(10);
//! assert_eq!(check(true, &input).wait(), Ok(true));
//! assert_eq!(check(is_just(), &input).wait(), Ok(true));
//!
//! let positive = Pred::value(|value: &i32| *value > 0);
//! let even = Pred::value(|value: &i32| value % 2 == 0);
//! assert_eq!(check_pred_list(&[positive, even], &input).wait(), Ok(true));
//! ```

mod combinators;

pub use combinators::{
    Arm, CaseOfStrict, arm, call_if, call_method_if, case_of, case_of_strict, fault_if,
    passthrough_if,
};

use std::borrow::Cow;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::control::{Eventual, Verdict};
use crate::error::Exception;
use crate::fonad::{Fault, Fonad};

/// Answers a predicate may give.
///
/// | Answer                  | Verdict                                        |
/// |-------------------------|------------------------------------------------|
/// | `bool`                  | that boolean                                   |
/// | `Result<bool, E>`       | the boolean, or a `Fault` for the error        |
/// | `Fonad<bool>`           | `Just(b)` is `b`, `Nothing` false, `Ok` true, `Fault` fails |
/// | `Eventual<bool>`        | the boolean, once available                    |
/// | `Verdict`               | itself                                         |
pub trait IntoVerdict {
    /// Performs the conversion.
    fn into_verdict(self) -> Verdict;
}

impl IntoVerdict for bool {
    fn into_verdict(self) -> Verdict {
        Eventual::Now(Ok(self))
    }
}

impl<E> IntoVerdict for Result<bool, E>
where
    E: Into<anyhow::Error>,
{
    fn into_verdict(self) -> Verdict {
        Eventual::Now(self.map_err(|error| Fault::caught("check", Exception::capture(error))))
    }
}

impl IntoVerdict for Fonad<bool> {
    fn into_verdict(self) -> Verdict {
        Eventual::Now(match self {
            Self::Just(just) => Ok(*just.value()),
            Self::Nothing(_) => Ok(false),
            Self::Fault(fault) => Err(fault),
            Self::Ok(_) | Self::Passthrough(_) => Ok(true),
        })
    }
}

impl IntoVerdict for Eventual<bool> {
    fn into_verdict(self) -> Verdict {
        self.map(Ok)
    }
}

impl IntoVerdict for Verdict {
    fn into_verdict(self) -> Verdict {
        self
    }
}

/// Wraps a future answer as a pending verdict.
///
/// # Examples
///
/// ```rust
/// use fonad::Fonad;
/// use fonad::condition::{Pred, check, deferred_check};
///
/// let slow = Pred::value(|value: &i32| {
///     let value = *value;
///     deferred_check(async move { value > 3 })
/// });
/// assert_eq!(check(slow, &Fonad::just(5)).wait(), Ok(true));
/// ```
pub fn deferred_check<F, V>(future: F) -> Verdict
where
    F: Future<Output = V> + Send + 'static,
    V: IntoVerdict,
{
    Eventual::later(async move { future.await.into_verdict().await })
}

type Test<T> = Arc<dyn Fn(&Fonad<T>) -> Verdict + Send + Sync>;

/// A predicate over a variant.
pub struct Pred<T> {
    name: Cow<'static, str>,
    test: Test<T>,
}

impl<T: 'static> Pred<T> {
    /// A predicate over the `Just` value; false for every other variant.
    pub fn value<F, V>(predicate: F) -> Self
    where
        F: Fn(&T) -> V + Send + Sync + 'static,
        V: IntoVerdict,
    {
        Self::fonad(move |input: &Fonad<T>| match input.value() {
            Some(value) => predicate(value).into_verdict(),
            None => Eventual::Now(Ok(false)),
        })
    }

    /// A predicate over the variant itself.
    pub fn fonad<F, V>(predicate: F) -> Self
    where
        F: Fn(&Fonad<T>) -> V + Send + Sync + 'static,
        V: IntoVerdict,
    {
        Self {
            name: Cow::Borrowed("predicate"),
            test: Arc::new(move |input: &Fonad<T>| predicate(input).into_verdict()),
        }
    }

    /// Sets the predicate name.
    #[must_use]
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// The predicate name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluates the predicate.
    pub fn test(&self, input: &Fonad<T>) -> Verdict {
        (self.test)(input)
    }
}

impl<T> Clone for Pred<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            test: Arc::clone(&self.test),
        }
    }
}

impl<T> fmt::Debug for Pred<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("Pred").field(&self.name).finish()
    }
}

macro_rules! variant_predicates {
    ($($name:ident),* $(,)?) => {
        paste::paste! {
            $(
                #[doc = "Predicate form of [`Fonad::is_" $name "`]."]
                pub fn [<is_ $name>]<T: 'static>() -> Pred<T> {
                    Pred::fonad(|input: &Fonad<T>| input.[<is_ $name>]())
                        .named(stringify!([<is_ $name>]))
                }

                #[doc = "Predicate form of [`Fonad::is_not_" $name "`]."]
                pub fn [<is_not_ $name>]<T: 'static>() -> Pred<T> {
                    Pred::fonad(|input: &Fonad<T>| input.[<is_not_ $name>]())
                        .named(stringify!([<is_not_ $name>]))
                }
            )*
        }
    };
}

variant_predicates!(just, nothing, ok, fault, passthrough);

/// A predicate that always holds; the default arm of a `case_of`.
pub fn or_else<T: 'static>() -> Pred<T> {
    Pred::fonad(|_: &Fonad<T>| true).named("or_else")
}

/// A condition gating a combinator.
#[derive(Debug, Clone)]
pub enum Condition<T> {
    /// A fixed answer.
    Hard(bool),
    /// A literal variant.
    Fonad(Fonad<T>),
    /// A predicate over the input.
    Pred(Pred<T>),
    /// Every condition must hold.
    All(Vec<Condition<T>>),
}

impl<T> From<bool> for Condition<T> {
    fn from(answer: bool) -> Self {
        Self::Hard(answer)
    }
}

impl<T> From<Fonad<T>> for Condition<T> {
    fn from(fonad: Fonad<T>) -> Self {
        Self::Fonad(fonad)
    }
}

impl<T> From<Pred<T>> for Condition<T> {
    fn from(pred: Pred<T>) -> Self {
        Self::Pred(pred)
    }
}

impl<T> From<Vec<Condition<T>>> for Condition<T> {
    fn from(conditions: Vec<Condition<T>>) -> Self {
        Self::All(conditions)
    }
}

impl<T> From<Vec<Pred<T>>> for Condition<T> {
    fn from(preds: Vec<Pred<T>>) -> Self {
        Self::All(preds.into_iter().map(Self::Pred).collect())
    }
}

impl<T: Clone + Send + 'static> Condition<T> {
    /// Evaluates the condition against `input`.
    pub fn evaluate(&self, input: &Fonad<T>) -> Verdict {
        match self {
            Self::Hard(answer) => Eventual::Now(Ok(*answer)),
            Self::Fonad(fonad) => Eventual::Now(match fonad {
                Fonad::Fault(fault) => Err(fault.clone()),
                Fonad::Nothing(_) => Ok(false),
                _ => Ok(true),
            }),
            Self::Pred(pred) => pred.test(input),
            Self::All(conditions) => {
                all_of(conditions.iter().map(|condition| condition.evaluate(input)))
            }
        }
    }
}

/// Reduces verdicts with logical AND once every one has settled.
///
/// The first failure in list order wins over any `false`.
fn all_of<I>(verdicts: I) -> Verdict
where
    I: IntoIterator<Item = Verdict>,
{
    Eventual::join_all(verdicts).map(|answers| {
        let mut holds = true;
        for answer in answers {
            match answer {
                Ok(answer) => holds &= answer,
                Err(fault) => {
                    tracing::debug!(
                        operation = ?fault.entries().first().map(|entry| entry.operation()),
                        "condition failed; propagating fault"
                    );
                    return Err(fault);
                }
            }
        }
        Ok(holds)
    })
}

/// Evaluates a condition against `input`.
pub fn check<T>(condition: impl Into<Condition<T>>, input: &Fonad<T>) -> Verdict
where
    T: Clone + Send + 'static,
{
    condition.into().evaluate(input)
}

/// Evaluates every predicate against `input` and combines the answers with
/// logical AND.
///
/// All predicates run, synchronous and pending alike. If any failed, the
/// first failure in list order is returned, even when another predicate
/// answered `false`. An empty list holds.
pub fn check_pred_list<T: 'static>(preds: &[Pred<T>], input: &Fonad<T>) -> Verdict {
    all_of(preds.iter().map(|pred| pred.test(input)))
}
