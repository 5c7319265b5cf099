//! Curry macros producing tagged [`Func`](crate::compose::Func)s.
//!
//! `fonad_curry2!(tag, f)` turns `f(a, input)` into `a -> Func<T>`, and
//! `fonad_curry3!(tag, f)` turns `f(a, b, input)` into `a -> b -> Func<T>`.
//! The last parameter of `f` is what the resulting `Func` receives, chosen by
//! `tag`:
//!
//! | `tag`     | last parameter     |
//! |-----------|--------------------|
//! | `value`   | `T`                |
//! | `fonad`   | `Fonad<T>`         |
//! | `query`   | `&Fonad<T>`        |
//! | `updater` | `&mut Fonad<T>`    |
//!
//! Every partial application can be called again with different arguments,
//! and every saturated one yields a `Func` with the same tag. The function
//! and the bound arguments are shared through `Arc`, so bound arguments
//! must be `Clone + Send + Sync + 'static`.

/// Curries a 2-argument function into a [`Func`](crate::compose::Func)
/// factory.
///
/// # Examples
///
/// ```rust
/// use fonad::{Fonad, fonad_curry2};
/// use fonad::compose::Tag;
///
/// let add = fonad_curry2!(value, |amount: i64, current: i64| current + amount);
/// let add_five = add(5);
/// assert_eq!(add_five.tag(), Tag::Value);
/// assert_eq!(add_five.apply(Fonad::just(1)).wait(), Fonad::just(6));
/// assert_eq!(add(10).apply(Fonad::just(1)).wait(), Fonad::just(11));
///
/// let note = fonad_curry2!(updater, |text: String, fonad: &mut Fonad<i64>| {
///     fonad.add_note(text);
/// });
/// assert_eq!(note("saved".to_string()).apply(Fonad::ok()).wait().notes(), ["saved"]);
/// ```
#[macro_export]
macro_rules! fonad_curry2 {
    ($tag:ident, $function:expr $(,)?) => {{
        let function = ::std::sync::Arc::new($function);
        move |arg1| {
            let function = ::std::sync::Arc::clone(&function);
            $crate::compose::Func::$tag(move |input| {
                function(::std::clone::Clone::clone(&arg1), input)
            })
        }
    }};
}

/// Curries a 3-argument function into a [`Func`](crate::compose::Func)
/// factory.
///
/// # Examples
///
/// ```rust
/// use fonad::{Fonad, fonad_curry3};
///
/// let clamp = fonad_curry3!(value, |low: i32, high: i32, current: i32| current.clamp(low, high));
/// let percent = clamp(0);
/// assert_eq!(percent(100).apply(Fonad::just(140)).wait(), Fonad::just(100));
/// assert_eq!(percent(10).apply(Fonad::just(-3)).wait(), Fonad::just(0));
/// ```
#[macro_export]
macro_rules! fonad_curry3 {
    ($tag:ident, $function:expr $(,)?) => {{
        let function = ::std::sync::Arc::new($function);
        move |arg1| {
            let function = ::std::sync::Arc::clone(&function);
            move |arg2| {
                let function = ::std::sync::Arc::clone(&function);
                let arg1 = ::std::clone::Clone::clone(&arg1);
                $crate::compose::Func::$tag(move |input| {
                    function(
                        ::std::clone::Clone::clone(&arg1),
                        ::std::clone::Clone::clone(&arg2),
                        input,
                    )
                })
            }
        }
    }};
}

#[cfg(test)]
mod tests {
    use crate::Fonad;
    use crate::compose::Tag;
    use rstest::rstest;

    fn scale(factor: i64, value: i64) -> i64 {
        value * factor
    }

    #[rstest]
    fn test_curry2_value() {
        let curried = fonad_curry2!(value, scale);
        let triple = curried(3);
        assert_eq!(triple.apply(Fonad::just(2)).wait(), Fonad::just(6));
        assert_eq!(curried(4).apply(Fonad::just(2)).wait(), Fonad::just(8));
    }

    #[rstest]
    fn test_curry2_partial_is_reusable() {
        let curried = fonad_curry2!(value, scale);
        let double = curried(2);
        assert_eq!(double.apply(Fonad::just(1)).wait(), Fonad::just(2));
        assert_eq!(double.apply(Fonad::just(5)).wait(), Fonad::just(10));
    }

    #[rstest]
    fn test_curry2_fonad_tag_sees_reflections() {
        let relabel = fonad_curry2!(fonad, |label: String, input: Fonad<i64>| {
            let mut input = input;
            input.add_note(label);
            input
        });
        let labelled = relabel("checked".to_string());
        assert_eq!(labelled.tag(), Tag::Fonad);
        let result = labelled.apply(Fonad::nothing()).wait();
        assert!(result.is_nothing());
        assert_eq!(result.notes(), ["checked"]);
    }

    #[rstest]
    fn test_curry2_query_tag() {
        let count_with = fonad_curry2!(query, |extra: usize, input: &Fonad<usize>| {
            input.notes().len() + extra
        });
        assert_eq!(count_with(1).tag(), Tag::Query);
        assert_eq!(count_with(1).apply(Fonad::just(0)).wait(), Fonad::just(1));
    }

    #[rstest]
    fn test_curry3_every_partial_is_tagged_alike() {
        let between = fonad_curry3!(fonad, |low: i64, high: i64, input: Fonad<i64>| {
            let in_range = input.value().is_some_and(|value| (low..=high).contains(value));
            if in_range {
                input
            } else {
                Fonad::fault("between", "out of range")
            }
        });
        let from_one = between(1);
        let small = from_one(10);
        let large = from_one(100);
        assert_eq!(small.tag(), Tag::Fonad);
        assert_eq!(large.tag(), Tag::Fonad);
        assert!(small.apply(Fonad::just(50)).wait().is_fault());
        assert_eq!(large.apply(Fonad::just(50)).wait(), Fonad::just(50));
    }
}
