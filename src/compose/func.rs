//! Tagged pipeline functions.
//!
//! A [`Func`] records, at construction, what it receives:
//!
//! | Tag       | Receives           | On a non-`Just` input            |
//! |-----------|--------------------|----------------------------------|
//! | `Value`   | the `Just` value   | input returned, body not invoked |
//! | `Fonad`   | the variant        | body invoked                     |
//! | `Query`   | `&Fonad<T>`        | body invoked                     |
//! | `Updater` | `&mut Fonad<T>`    | body invoked, input returned     |
//!
//! Plain closures `Fn(T) -> R` become `Value` functions through
//! [`IntoFunc`], so operators accept closures and `Func`s alike.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::control::{Eventual, IntoStep, Step};
use crate::fonad::{ANONYMOUS_OPERATION, Fault, Fonad, Payload};

/// What a [`Func`] receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// The extracted `Just` value.
    Value,
    /// The variant itself, by value.
    Fonad,
    /// A shared reference to the variant.
    Query,
    /// A mutable reference to the variant; returns nothing.
    Updater,
}

type ValueBody<T> = Arc<dyn Fn(T, &str) -> Step<T> + Send + Sync>;
type FonadBody<T> = Arc<dyn Fn(Fonad<T>, &str) -> Step<T> + Send + Sync>;
type QueryBody<T> = Arc<dyn Fn(&Fonad<T>, &str) -> Step<T> + Send + Sync>;
type UpdaterBody<T> = Arc<dyn Fn(&mut Fonad<T>) + Send + Sync>;

enum Body<T> {
    Value(ValueBody<T>),
    Fonad(FonadBody<T>),
    Query(QueryBody<T>),
    Updater(UpdaterBody<T>),
}

impl<T> Clone for Body<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Value(body) => Self::Value(Arc::clone(body)),
            Self::Fonad(body) => Self::Fonad(Arc::clone(body)),
            Self::Query(body) => Self::Query(Arc::clone(body)),
            Self::Updater(body) => Self::Updater(Arc::clone(body)),
        }
    }
}

/// A type-erased, cheaply clonable pipeline function.
///
/// # Examples
///
/// ```rust
/// use fonad::Fonad;
/// use fonad::compose::{Func, Tag};
///
/// let double = Func::value(|value: i32| value * 2).named("double");
/// assert_eq!(double.tag(), Tag::Value);
/// assert_eq!(double.apply(Fonad::just(4)).wait(), Fonad::just(8));
///
/// // Value functions never see non-Just inputs.
/// let nothing = Fonad::<i32>::nothing();
/// assert_eq!(double.apply(nothing.clone()).wait(), nothing);
///
/// let mark = Func::updater(|fonad: &mut Fonad<i32>| fonad.add_note("seen"));
/// assert_eq!(mark.apply(Fonad::nothing()).wait().notes(), ["seen"]);
/// ```
pub struct Func<T> {
    name: Cow<'static, str>,
    body: Body<T>,
}

impl<T: Payload> Func<T> {
    /// Creates a function over the extracted `Just` value.
    pub fn value<F, R>(function: F) -> Self
    where
        F: Fn(T) -> R + Send + Sync + 'static,
        R: IntoStep<T>,
    {
        Self::with_body(Body::Value(Arc::new(move |value: T, operation: &str| {
            function(value).into_step(operation)
        })))
    }

    /// Creates a function over the variant itself.
    pub fn fonad<F, R>(function: F) -> Self
    where
        F: Fn(Fonad<T>) -> R + Send + Sync + 'static,
        R: IntoStep<T>,
    {
        Self::with_body(Body::Fonad(Arc::new(
            move |input: Fonad<T>, operation: &str| function(input).into_step(operation),
        )))
    }

    /// Creates a read-only function over the variant.
    pub fn query<F, R>(function: F) -> Self
    where
        F: Fn(&Fonad<T>) -> R + Send + Sync + 'static,
        R: IntoStep<T>,
    {
        Self::with_body(Body::Query(Arc::new(
            move |input: &Fonad<T>, operation: &str| function(input).into_step(operation),
        )))
    }

    /// Creates a function that mutates the variant in place.
    pub fn updater<F>(function: F) -> Self
    where
        F: Fn(&mut Fonad<T>) + Send + Sync + 'static,
    {
        Self::with_body(Body::Updater(Arc::new(function)))
    }

    const fn with_body(body: Body<T>) -> Self {
        Self {
            name: Cow::Borrowed(ANONYMOUS_OPERATION),
            body,
        }
    }

    /// Applies the function, labelling failures with its name.
    pub fn apply(&self, input: Fonad<T>) -> Step<T> {
        self.invoke(input, &self.name)
    }

    pub(crate) fn invoke(&self, input: Fonad<T>, operation: &str) -> Step<T> {
        match &self.body {
            Body::Value(body) => match input {
                Fonad::Just(just) => body(just.into_value(), operation),
                reflection => {
                    tracing::trace!(operation, function = %self.name, "value function skipped");
                    Eventual::Now(reflection)
                }
            },
            Body::Fonad(body) => body(input, operation),
            Body::Query(body) => body(&input, operation),
            Body::Updater(body) => {
                let mut input = input;
                body(&mut input);
                Eventual::Now(input)
            }
        }
    }

    /// Runs the function for effect against `input`.
    ///
    /// Updaters act on `input` in place; every other function receives a
    /// copy. Resolves to the `Fault` the function produced, if any.
    pub(crate) fn conduit(&self, input: &mut Fonad<T>, operation: &str) -> Eventual<Option<Fault>> {
        if let Body::Updater(body) = &self.body {
            body(input);
            return Eventual::Now(None);
        }
        self.invoke(input.clone(), operation).map(|result| match result {
            Fonad::Fault(fault) => Some(fault),
            _ => None,
        })
    }
}

impl<T> Func<T> {
    /// Sets the name used to label failures raised by [`Func::apply`].
    #[must_use]
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// The function name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// What the function receives.
    pub const fn tag(&self) -> Tag {
        match self.body {
            Body::Value(_) => Tag::Value,
            Body::Fonad(_) => Tag::Fonad,
            Body::Query(_) => Tag::Query,
            Body::Updater(_) => Tag::Updater,
        }
    }
}

impl<T> Clone for Func<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            body: self.body.clone(),
        }
    }
}

impl<T> fmt::Debug for Func<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Func")
            .field("name", &self.name)
            .field("tag", &self.tag())
            .finish()
    }
}

/// Conversion into a [`Func`].
///
/// `Marker` only disambiguates the implementations; callers never name it.
pub trait IntoFunc<T, Marker> {
    /// Performs the conversion.
    fn into_func(self) -> Func<T>;
}

impl<T> IntoFunc<T, Func<T>> for Func<T> {
    fn into_func(self) -> Func<T> {
        self
    }
}

impl<'a, T> IntoFunc<T, &'a Func<T>> for &'a Func<T> {
    fn into_func(self) -> Func<T> {
        self.clone()
    }
}

impl<T, F, R> IntoFunc<T, fn(T) -> R> for F
where
    T: Payload,
    F: Fn(T) -> R + Send + Sync + 'static,
    R: IntoStep<T>,
{
    fn into_func(self) -> Func<T> {
        Func::value(self)
    }
}

/// Converts a closure or function into a [`Func`].
///
/// # Examples
///
/// ```rust
/// use fonad::Fonad;
/// use fonad::compose::{Tag, func};
///
/// let increment = func(|value: u8| value + 1);
/// assert_eq!(increment.tag(), Tag::Value);
/// assert_eq!(increment.apply(Fonad::just(1)).wait(), Fonad::just(2));
/// ```
pub fn func<T, M>(function: impl IntoFunc<T, M>) -> Func<T> {
    function.into_func()
}

/// An ordered list of functions.
///
/// Built from one `Func`, a `Vec` or an array, so operators taking a list
/// also accept a single function.
#[derive(Debug, Clone)]
pub struct Funcs<T>(Vec<Func<T>>);

impl<T> Funcs<T> {
    /// The functions, in order.
    pub fn as_slice(&self) -> &[Func<T>] {
        &self.0
    }

    pub(crate) fn into_shared(self) -> Arc<[Func<T>]> {
        self.0.into()
    }
}

impl<T> From<Func<T>> for Funcs<T> {
    fn from(function: Func<T>) -> Self {
        Self(vec![function])
    }
}

impl<T> From<Vec<Func<T>>> for Funcs<T> {
    fn from(functions: Vec<Func<T>>) -> Self {
        Self(functions)
    }
}

impl<T, const N: usize> From<[Func<T>; N]> for Funcs<T> {
    fn from(functions: [Func<T>; N]) -> Self {
        Self(functions.into())
    }
}

/// The identity at the variant level.
///
/// Useful as the action of a `case_of` arm that should hand back its input.
pub fn reflect<T: Payload>() -> Func<T> {
    Func::fonad(|input: Fonad<T>| input).named("reflect")
}
