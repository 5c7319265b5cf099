//! Lifting raw values into variants.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use super::{Fonad, Nothing};
use crate::error::Exception;

/// Values that may be empty.
///
/// An empty value lifts to `Nothing` instead of `Just`. The default
/// implementation reports values as never empty, so new payload types only
/// need an empty `impl Emptiable for MyType {}`.
///
/// # Examples
///
/// ```rust
/// use fonad::Emptiable;
///
/// assert!(String::new().is_empty_value());
/// assert!(Vec::<i32>::new().is_empty_value());
/// assert!(None::<i32>.is_empty_value());
/// assert!(!0_i32.is_empty_value());
/// assert!(!false.is_empty_value());
/// ```
pub trait Emptiable {
    /// Returns `true` if the value counts as empty.
    fn is_empty_value(&self) -> bool {
        false
    }
}

macro_rules! never_empty {
    ($($ty:ty),* $(,)?) => {
        $(impl Emptiable for $ty {})*
    };
}

never_empty!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
);

macro_rules! empty_when_empty {
    ($([$($generics:tt)*] $ty:ty),* $(,)?) => {
        $(
            impl<$($generics)*> Emptiable for $ty {
                fn is_empty_value(&self) -> bool {
                    self.is_empty()
                }
            }
        )*
    };
}

empty_when_empty!(
    [] String,
    ['a] &'a str,
    [T] Vec<T>,
    [T] VecDeque<T>,
    [K, V, S] HashMap<K, V, S>,
    [K, V] BTreeMap<K, V>,
    [T, S] HashSet<T, S>,
    [T] BTreeSet<T>,
);

impl Emptiable for () {
    fn is_empty_value(&self) -> bool {
        true
    }
}

impl<T> Emptiable for Option<T> {
    fn is_empty_value(&self) -> bool {
        self.is_none()
    }
}

impl<T: Emptiable + ?Sized> Emptiable for Box<T> {
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl<T: Emptiable + ?Sized> Emptiable for Arc<T> {
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl<T: Emptiable + ?Sized> Emptiable for Rc<T> {
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl<T> Fonad<T>
where
    T: Emptiable,
{
    /// Normalizes a `Just` holding an empty value into `Nothing`.
    ///
    /// Every other variant is returned unchanged, notes included.
    #[must_use]
    pub fn lift(self) -> Self {
        match self {
            Self::Just(just) if just.value.is_empty_value() => Self::Nothing(Nothing {
                value: Some(just.value),
                notes: just.notes,
            }),
            other => other,
        }
    }
}

/// Conversion into a [`Fonad`].
///
/// | Input               | Result                                         |
/// |---------------------|------------------------------------------------|
/// | a variant           | itself (a `Just` with an empty value normalized) |
/// | an empty value      | `Nothing` carrying it                          |
/// | any other value     | `Just`                                         |
/// | `Option::None`      | an absent `Nothing`                            |
/// | `Result::Err`       | a `Fault` recording the captured exception     |
///
/// Lifting is idempotent: `fonadify(fonadify(x)) == fonadify(x)`.
pub trait IntoFonad<T> {
    /// Performs the conversion.
    fn into_fonad(self) -> Fonad<T>;
}

impl<T: Emptiable> IntoFonad<T> for T {
    fn into_fonad(self) -> Fonad<T> {
        Fonad::just(self).lift()
    }
}

impl<T: Emptiable> IntoFonad<T> for Fonad<T> {
    fn into_fonad(self) -> Fonad<T> {
        self.lift()
    }
}

impl<T: Emptiable> IntoFonad<T> for Option<T> {
    fn into_fonad(self) -> Fonad<T> {
        self.map_or_else(Fonad::nothing, |value| Fonad::just(value).lift())
    }
}

impl<T, E> IntoFonad<T> for Result<T, E>
where
    T: Emptiable,
    E: Into<anyhow::Error>,
{
    #[track_caller]
    fn into_fonad(self) -> Fonad<T> {
        match self {
            Ok(value) => Fonad::just(value).lift(),
            Err(error) => Fonad::from_exception("fonadify", Exception::capture(error)),
        }
    }
}

/// Lifts any supported value into a [`Fonad`].
///
/// # Examples
///
/// ```rust
/// use fonad::{Fonad, fonadify};
///
/// assert!(fonadify::<i32, _>(5).is_just());
/// assert!(fonadify::<String, _>(String::new()).is_nothing());
/// assert!(fonadify::<i32, _>(None).is_nothing());
///
/// let lifted = fonadify::<i32, _>(Fonad::fault("load", "failed"));
/// assert!(lifted.is_fault());
/// ```
#[track_caller]
pub fn fonadify<T, V>(value: V) -> Fonad<T>
where
    V: IntoFonad<T>,
{
    value.into_fonad()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::zero(0)]
    #[case::negative(-3)]
    #[case::positive(12)]
    fn test_numbers_lift_to_just(#[case] value: i32) {
        assert_eq!(fonadify::<i32, _>(value), Fonad::just(value));
    }

    #[rstest]
    fn test_false_is_just() {
        assert!(fonadify::<bool, _>(false).is_just());
    }

    #[rstest]
    fn test_empty_string_lifts_to_nothing_with_value() {
        let lifted = fonadify::<String, _>(String::new());
        assert_eq!(
            lifted.as_nothing().and_then(Nothing::value),
            Some(&String::new())
        );
    }

    #[rstest]
    fn test_none_lifts_to_absent_nothing() {
        let lifted = fonadify::<i32, _>(None::<i32>);
        assert!(lifted.is_nothing());
        assert!(lifted.as_nothing().and_then(Nothing::value).is_none());
    }

    #[rstest]
    fn test_err_lifts_to_fault() {
        let result: Result<i32, std::io::Error> =
            Err(std::io::Error::other("boom"));
        let lifted = fonadify::<i32, _>(result);
        let fault = lifted.as_fault().expect("fault");
        assert_eq!(fault.exception().map(Exception::message), Some("boom"));
    }

    #[rstest]
    fn test_lift_keeps_notes_when_normalizing() {
        let mut fonad = Fonad::just(Vec::<i32>::new());
        fonad.add_note("fetched");
        let lifted = fonad.lift();
        assert!(lifted.is_nothing());
        assert_eq!(lifted.notes(), ["fetched"]);
    }

    #[rstest]
    fn test_lifting_a_variant_returns_it() {
        let mut fault: Fonad<i32> = Fonad::fault("op", "failed");
        fault.add_note("context");
        assert_eq!(fonadify::<i32, _>(fault.clone()), fault);
    }

    #[rstest]
    fn test_boxed_values_delegate() {
        assert!(Box::new(String::new()).is_empty_value());
        assert!(!Arc::new(String::from("x")).is_empty_value());
    }
}
