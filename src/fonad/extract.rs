//! Extraction: the inverse of lifting.

use super::{Emptiable, Fonad};

/// The single value a variant yields when extracted.
///
/// | Variant       | Extracted                  |
/// |---------------|----------------------------|
/// | `Just(v)`     | `Value(v)`                 |
/// | `Nothing`     | `Empty(original or None)`  |
/// | `Ok`          | `Flag(true)`               |
/// | `Fault`       | `Flag(false)`              |
/// | `Passthrough` | `Carried(inner variant)`   |
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted<T> {
    /// The value of a `Just`, or a raw value.
    Value(T),
    /// The preserved empty value of a `Nothing`.
    Empty(Option<T>),
    /// `true` for `Ok`, `false` for `Fault`.
    Flag(bool),
    /// The variant carried by a `Passthrough`, not extracted further.
    Carried(Fonad<T>),
}

impl<T> Extracted<T> {
    /// The underlying value for `Value` and non-absent `Empty`.
    pub fn value(self) -> Option<T> {
        match self {
            Self::Value(value) | Self::Empty(Some(value)) => Some(value),
            Self::Empty(None) | Self::Flag(_) | Self::Carried(_) => None,
        }
    }

    /// The flag for `Flag`.
    pub const fn flag(&self) -> Option<bool> {
        match self {
            Self::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Truthiness of the extracted value.
    ///
    /// Empty values and `false` are falsy. A carried variant is truthy
    /// unless it is a `Nothing` or `Fault`.
    pub fn is_truthy(&self) -> bool
    where
        T: Emptiable,
    {
        match self {
            Self::Value(value) => !value.is_empty_value(),
            Self::Empty(_) => false,
            Self::Flag(flag) => *flag,
            Self::Carried(inner) => !(inner.is_nothing() || inner.is_fault()),
        }
    }
}

/// Values that can be extracted.
///
/// Implemented for every [`Fonad`] and, as the identity, for every raw
/// [`Emptiable`] value. Extraction never fails.
pub trait Extract<T> {
    /// Performs the extraction.
    fn extract(self) -> Extracted<T>;
}

impl<T> Extract<T> for Fonad<T> {
    fn extract(self) -> Extracted<T> {
        match self {
            Self::Just(just) => Extracted::Value(just.value),
            Self::Nothing(nothing) => Extracted::Empty(nothing.value),
            Self::Ok(_) => Extracted::Flag(true),
            Self::Fault(_) => Extracted::Flag(false),
            Self::Passthrough(passthrough) => Extracted::Carried(passthrough.into_inner()),
        }
    }
}

impl<T: Emptiable> Extract<T> for T {
    fn extract(self) -> Extracted<T> {
        Extracted::Value(self)
    }
}

/// Extracts a variant or raw value.
///
/// # Examples
///
/// ```rust
/// use fonad::{Extracted, Fonad, extract};
///
/// assert_eq!(extract(Fonad::just(7)), Extracted::Value(7));
/// assert_eq!(extract(Fonad::<i32>::ok()), Extracted::Flag(true));
/// assert_eq!(extract(Fonad::<i32>::fault("op", "failed")), Extracted::Flag(false));
/// assert_eq!(extract::<i32, _>(7), Extracted::Value(7));
///
/// let empty: Fonad<Vec<i32>> = Fonad::nothing_of(Vec::new());
/// assert_eq!(extract(empty), Extracted::Empty(Some(Vec::new())));
/// ```
pub fn extract<T, V>(value: V) -> Extracted<T>
where
    V: Extract<T>,
{
    value.extract()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_absent_nothing_extracts_to_none() {
        assert_eq!(extract(Fonad::<i32>::nothing()), Extracted::Empty(None));
    }

    #[rstest]
    fn test_passthrough_extracts_carried_variant_only_once() {
        let inner = Fonad::passthrough_value(1);
        let outer = Fonad::passthrough(inner.clone());
        assert_eq!(extract(outer), Extracted::Carried(inner));
    }

    #[rstest]
    #[case::value(Extracted::Value(3), true)]
    #[case::zero(Extracted::Value(0), true)]
    #[case::empty(Extracted::Empty(None), false)]
    #[case::ok(Extracted::Flag(true), true)]
    #[case::fault(Extracted::Flag(false), false)]
    #[case::carried_fault(Extracted::Carried(Fonad::fault("op", "failed")), false)]
    #[case::carried_just(Extracted::Carried(Fonad::just(1)), true)]
    fn test_truthiness(#[case] extracted: Extracted<i32>, #[case] expected: bool) {
        assert_eq!(extracted.is_truthy(), expected);
    }

    #[rstest]
    fn test_value_of_empty_string() {
        let extracted: Extracted<String> = Extracted::Empty(Some(String::new()));
        assert_eq!(extracted.value(), Some(String::new()));
    }
}
