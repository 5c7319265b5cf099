//! The `pipe_fm!` and `pipe_async_fm!` macros.
//!
//! Both take a list of stages, each either a [`Func`](crate::compose::Func),
//! a reference to one, a pipeline, or a closure `Fn(T) -> R`, and build the
//! corresponding pipeline with [`pipe_fm`](crate::pipeline::pipe_fm) or
//! [`pipe_async_fm`](crate::pipeline::pipe_async_fm).

/// Builds a synchronous-first pipeline from a list of stages.
///
/// Stages run left to right. A stage returning a deferred step turns the
/// rest of the run asynchronous; the result is then `Later`.
///
/// # Examples
///
/// ```rust
/// use fonad::{Fonad, pipe_fm};
/// use fonad::operator::add_note;
///
/// let pipeline = pipe_fm![
///     |value: i64| value * value,
///     add_note("squared"),
///     |value: i64| value * 2,
/// ];
/// assert_eq!(pipeline.run(3).wait(), Fonad::just(18));
///
/// // Reflections skip every stage.
/// let nothing = Fonad::<i64>::nothing();
/// assert_eq!(pipeline.run(nothing.clone()).wait(), nothing);
/// ```
#[macro_export]
macro_rules! pipe_fm {
    ($($stage:expr),* $(,)?) => {
        $crate::pipeline::pipe_fm(::std::vec![
            $($crate::compose::IntoFunc::into_func($stage)),*
        ])
    };
}

/// Builds a pipeline that awaits every stage in turn.
///
/// # Examples
///
/// ```rust
/// use fonad::control::deferred;
/// use fonad::{Fonad, pipe_async_fm};
///
/// # futures::executor::block_on(async {
/// let pipeline = pipe_async_fm![
///     |value: i64| deferred::<i64, _, _>(async move { value * value }),
///     |value: i64| value * 2,
/// ];
/// assert_eq!(pipeline.run(3).await, Fonad::just(18));
/// # });
/// ```
#[macro_export]
macro_rules! pipe_async_fm {
    ($($stage:expr),* $(,)?) => {
        $crate::pipeline::pipe_async_fm(::std::vec![
            $($crate::compose::IntoFunc::into_func($stage)),*
        ])
    };
}
