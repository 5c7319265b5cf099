//! Normalizing function results into pipeline steps.

use std::future::Future;

use super::{Eventual, Step};
use crate::error::Exception;
use crate::fonad::{Fonad, Payload};

/// Results a wrapped function may return.
///
/// | Returned                 | Step                                            |
/// |--------------------------|-------------------------------------------------|
/// | `T`                      | lifted (`Just`, or `Nothing` when empty)        |
/// | `Option<T>`              | lifted; `None` becomes an absent `Nothing`      |
/// | `Result<T, E>`           | lifted; `Err` becomes a `Fault` (caught exception) |
/// | `Fonad<T>`               | lifted; explicit faults propagate as they are   |
/// | `Step<T>`                | resolved and lifted                             |
///
/// `operation` labels any `Fault` created for an `Err`.
pub trait IntoStep<T> {
    /// Performs the conversion.
    fn into_step(self, operation: &str) -> Step<T>;
}

impl<T: Payload> IntoStep<T> for T {
    fn into_step(self, _operation: &str) -> Step<T> {
        Eventual::Now(Fonad::just(self).lift())
    }
}

impl<T: Payload> IntoStep<T> for Fonad<T> {
    fn into_step(self, _operation: &str) -> Step<T> {
        Eventual::Now(self.lift())
    }
}

impl<T: Payload> IntoStep<T> for Option<T> {
    fn into_step(self, _operation: &str) -> Step<T> {
        Eventual::Now(self.map_or_else(Fonad::nothing, |value| Fonad::just(value).lift()))
    }
}

impl<T, E> IntoStep<T> for Result<T, E>
where
    T: Payload,
    E: Into<anyhow::Error>,
{
    fn into_step(self, operation: &str) -> Step<T> {
        Eventual::Now(match self {
            Ok(value) => Fonad::just(value).lift(),
            Err(error) => Fonad::from_exception(operation, Exception::capture(error)),
        })
    }
}

impl<T: Payload> IntoStep<T> for Step<T> {
    fn into_step(self, _operation: &str) -> Step<T> {
        self.map(Fonad::lift)
    }
}

/// Wraps a future as a pending step.
///
/// The future's output is normalized like any other result once it
/// resolves, so an `Err` output (a rejection) becomes the same `Fault` a
/// synchronous `Err` would.
///
/// # Examples
///
/// ```rust
/// use fonad::control::deferred;
/// use fonad::{Exception, Fonad};
///
/// let step = deferred::<i32, _, _>(async { 21 * 2 });
/// assert_eq!(step.wait(), Fonad::just(42));
///
/// let rejected = deferred::<i32, _, _>(async { Err::<i32, _>(Exception::new("boom")) });
/// assert!(rejected.wait().is_fault());
/// ```
pub fn deferred<T, F, R>(future: F) -> Step<T>
where
    T: Payload,
    F: Future<Output = R> + Send + 'static,
    R: IntoStep<T>,
{
    Eventual::later(async move { future.await.into_step("deferred").await })
}
