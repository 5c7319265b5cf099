//! A value that is available now or later.
//!
//! Every operator returns an [`Eventual`]. Synchronous work completes as
//! [`Eventual::Now`] and never touches an executor; as soon as a stage
//! returns a future, the remainder of the computation becomes
//! [`Eventual::Later`].

use std::fmt;
use std::future::{Future, IntoFuture};

use futures::future::{BoxFuture, Either, Ready, ready};

/// A value that is either ready or still being computed.
///
/// `Eventual` implements [`IntoFuture`], so both forms can be `.await`ed.
///
/// # Examples
///
/// ```rust
/// use fonad::control::Eventual;
///
/// let now = Eventual::now(2).map(|value| value * 10);
/// assert!(now.is_now());
/// assert_eq!(now.into_now().ok(), Some(20));
///
/// let later = Eventual::later(async { 2 }).map(|value| value * 10);
/// assert!(!later.is_now());
/// assert_eq!(later.wait(), 20);
/// ```
pub enum Eventual<A> {
    /// The value is ready.
    Now(A),
    /// The value will be produced by the future.
    Later(BoxFuture<'static, A>),
}

impl<A> Eventual<A> {
    /// Wraps a ready value.
    #[inline]
    pub const fn now(value: A) -> Self {
        Self::Now(value)
    }

    /// Wraps a future.
    pub fn later<F>(future: F) -> Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        Self::Later(Box::pin(future))
    }

    /// Returns `true` if the value is ready.
    #[inline]
    pub const fn is_now(&self) -> bool {
        matches!(self, Self::Now(_))
    }

    /// Returns the ready value, or `self` if it is still pending.
    ///
    /// # Errors
    ///
    /// Returns `Err(self)` for [`Eventual::Later`].
    pub fn into_now(self) -> Result<A, Self> {
        match self {
            Self::Now(value) => Ok(value),
            later @ Self::Later(_) => Err(later),
        }
    }
}

impl<A> Eventual<A>
where
    A: Send + 'static,
{
    /// Transforms the value once it is available.
    pub fn map<B, F>(self, function: F) -> Eventual<B>
    where
        B: Send + 'static,
        F: FnOnce(A) -> B + Send + 'static,
    {
        match self {
            Self::Now(value) => Eventual::Now(function(value)),
            Self::Later(future) => Eventual::Later(Box::pin(async move { function(future.await) })),
        }
    }

    /// Chains another eventual computation.
    ///
    /// Stays synchronous while both sides are ready.
    pub fn then<B, F>(self, function: F) -> Eventual<B>
    where
        B: Send + 'static,
        F: FnOnce(A) -> Eventual<B> + Send + 'static,
    {
        match self {
            Self::Now(value) => function(value),
            Self::Later(future) => Eventual::later(async move { function(future.await).await }),
        }
    }

    /// Collects several eventual values, preserving their order.
    ///
    /// The result is ready if every member is ready. Otherwise every member
    /// is driven concurrently and the result is pending until all settle.
    pub fn join_all<I>(items: I) -> Eventual<Vec<A>>
    where
        I: IntoIterator<Item = Self>,
    {
        let items: Vec<Self> = items.into_iter().collect();
        if items.iter().all(Self::is_now) {
            let values = items
                .into_iter()
                .filter_map(|item| item.into_now().ok())
                .collect();
            return Eventual::Now(values);
        }
        Eventual::later(futures::future::join_all(
            items.into_iter().map(IntoFuture::into_future),
        ))
    }

    /// Blocks the current thread until the value is available.
    ///
    /// Ready values are returned without an executor. Pending values are
    /// driven by [`futures::executor::block_on`]; prefer `.await` inside
    /// async code.
    pub fn wait(self) -> A {
        match self {
            Self::Now(value) => value,
            Self::Later(future) => futures::executor::block_on(future),
        }
    }
}

impl<A> IntoFuture for Eventual<A> {
    type Output = A;
    type IntoFuture = Either<Ready<A>, BoxFuture<'static, A>>;

    fn into_future(self) -> Self::IntoFuture {
        match self {
            Self::Now(value) => Either::Left(ready(value)),
            Self::Later(future) => Either::Right(future),
        }
    }
}

impl<A: fmt::Debug> fmt::Debug for Eventual<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Now(value) => formatter.debug_tuple("Now").field(value).finish(),
            Self::Later(_) => formatter.write_str("Later(<future>)"),
        }
    }
}
