//! Invoking named methods on `Just` values.

use std::fmt::Debug;
use std::sync::Arc;

use crate::compose::Func;
use crate::control::{Eventual, Step};
use crate::fonad::{Fault, Fonad, Payload};

/// A method resolved by name.
pub type Method<T> = fn(&mut T, &[<T as Receiver>::Arg]) -> Step<T>;

/// Values exposing methods by name.
///
/// # Examples
///
/// ```rust
/// use fonad::control::IntoStep;
/// use fonad::operator::{Args, Method, Receiver, map_method};
/// use fonad::{Emptiable, Fonad};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Counter(i64);
///
/// impl Emptiable for Counter {}
///
/// impl Receiver for Counter {
///     type Arg = i64;
///
///     fn method(&self, name: &str) -> Option<Method<Self>> {
///         let method: Method<Self> = match name {
///             "add" => |counter, args| Counter(counter.0 + args.iter().sum::<i64>()).into_step("add"),
///             _ => return None,
///         };
///         Some(method)
///     }
/// }
///
/// let add = map_method::<Counter>("add", [1, 2]);
/// assert_eq!(add.apply(Fonad::just(Counter(0))).wait(), Fonad::just(Counter(3)));
///
/// let missing = map_method::<Counter>("reset", Args::none());
/// assert!(missing.apply(Fonad::just(Counter(0))).wait().is_fault());
/// ```
pub trait Receiver: Sized {
    /// The argument type every method takes.
    type Arg;

    /// Returns `false` for values that have no methods at all.
    fn is_object(&self) -> bool {
        true
    }

    /// Looks a method up by name.
    fn method(&self, name: &str) -> Option<Method<Self>>;
}

/// Method arguments: a single value or a list, flattened into one list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args<A>(Vec<A>);

impl<A> Args<A> {
    /// No arguments.
    pub const fn none() -> Self {
        Self(Vec::new())
    }

    /// The arguments, in order.
    pub fn as_slice(&self) -> &[A] {
        &self.0
    }
}

impl<A> From<A> for Args<A> {
    fn from(argument: A) -> Self {
        Self(vec![argument])
    }
}

impl<A> From<Vec<A>> for Args<A> {
    fn from(arguments: Vec<A>) -> Self {
        Self(arguments)
    }
}

impl<A, const N: usize> From<[A; N]> for Args<A> {
    fn from(arguments: [A; N]) -> Self {
        Self(arguments.into())
    }
}

fn resolve<T>(target: &T, name: &str, operation: &str) -> Result<Method<T>, Fault>
where
    T: Receiver + Debug,
{
    if !target.is_object() {
        return Err(Fault::new(
            operation,
            format!("cannot call {name} on {target:?}: not an object"),
        ));
    }
    target
        .method(name)
        .ok_or_else(|| Fault::new(operation, format!("{target:?} has no method named {name}")))
}

/// Invokes a named method on the `Just` value and lifts its result.
///
/// A value that is not an object, or that has no method of that name,
/// yields a `Fault` naming the operation and the offending value.
pub fn map_method<T>(name: impl Into<String>, args: impl Into<Args<T::Arg>>) -> Func<T>
where
    T: Payload + Receiver + Debug,
    T::Arg: Send + Sync + 'static,
{
    let name: Arc<str> = name.into().into();
    let args = args.into();
    Func::fonad(move |input: Fonad<T>| -> Step<T> {
        let mut target = match input {
            Fonad::Just(just) => just.into_value(),
            reflection => return Eventual::Now(reflection),
        };
        match resolve(&target, &name, "map_method") {
            Ok(method) => method(&mut target, args.as_slice()),
            Err(fault) => Eventual::Now(fault.into()),
        }
    })
    .named("map_method")
}

/// Invokes a named method on the `Just` value for effect and returns the
/// input.
///
/// The method receives the value in place, so mutations it makes are kept.
/// A `Fault` result replaces the input.
pub fn call_method<T>(name: impl Into<String>, args: impl Into<Args<T::Arg>>) -> Func<T>
where
    T: Payload + Receiver + Debug,
    T::Arg: Send + Sync + 'static,
{
    let name: Arc<str> = name.into().into();
    let args = args.into();
    Func::fonad(move |mut input: Fonad<T>| -> Step<T> {
        let Some(just) = input.as_just_mut() else {
            return Eventual::Now(input);
        };
        let target = just.value_mut();
        let outcome = match resolve(target, &name, "call_method") {
            Ok(method) => method(target, args.as_slice()),
            Err(fault) => return Eventual::Now(fault.into()),
        };
        outcome.map(move |result| match result {
            Fonad::Fault(fault) => Fonad::Fault(fault),
            _ => input,
        })
    })
    .named("call_method")
}
