//! Pipelines: ordered stages threaded over one evolving variant.
//!
//! A [`Pipeline`] runs synchronously for as long as its stages do and
//! switches to a pending [`Step`] at the first stage that returns one. An
//! [`AsyncPipeline`] awaits every stage. Both:
//!
//! - return reflections given as input without running any stage
//! - run stage `N + 1` only after stage `N` has fully resolved
//! - unwrap a trailing `Passthrough` into the variant it carries
//!
//! Build them with [`pipe_fm!`](crate::pipe_fm) and
//! [`pipe_async_fm!`](crate::pipe_async_fm), or from a list of
//! [`Func`]s with [`pipe_fm`] and [`pipe_async_fm`].

use std::fmt;
use std::future::IntoFuture;
use std::sync::Arc;

use crate::compose::{Func, Funcs, IntoFunc};
use crate::control::{Eventual, IntoStep, Step};
use crate::fonad::{Fonad, IntoFonad, Payload};

/// Applies `stages` left to right, staying synchronous until a stage
/// returns a pending step.
pub(crate) fn thread<T: Payload>(stages: &Arc<[Func<T>]>, input: Fonad<T>) -> Step<T> {
    thread_from(Arc::clone(stages), 0, input)
}

fn thread_from<T: Payload>(stages: Arc<[Func<T>]>, start: usize, mut input: Fonad<T>) -> Step<T> {
    for index in start..stages.len() {
        let step = stages[index].apply(input);
        match step {
            Eventual::Now(output) => input = output,
            pending @ Eventual::Later(_) => {
                return pending.then(move |output| thread_from(stages, index + 1, output));
            }
        }
    }
    Eventual::Now(input)
}

fn unwrap_passthrough<T>(output: Fonad<T>) -> Fonad<T> {
    match output {
        Fonad::Passthrough(passthrough) => passthrough.into_inner(),
        other => other,
    }
}

/// A synchronous-first pipeline.
///
/// # Examples
///
/// ```rust
/// use fonad::compose::func;
/// use fonad::control::deferred;
/// use fonad::pipeline::pipe_fm;
/// use fonad::Fonad;
///
/// let ready = pipe_fm(vec![func(|value: u32| value + 1), func(|value: u32| value * 3)]);
/// let step = ready.run(1);
/// assert!(step.is_now());
/// assert_eq!(step.wait(), Fonad::just(6));
///
/// let pending = pipe_fm(vec![
///     func(|value: u32| deferred::<u32, _, _>(async move { value + 1 })),
///     func(|value: u32| value * 3),
/// ]);
/// let step = pending.run(1);
/// assert!(!step.is_now());
/// assert_eq!(step.wait(), Fonad::just(6));
/// ```
pub struct Pipeline<T> {
    stages: Arc<[Func<T>]>,
}

impl<T: Payload> Pipeline<T> {
    /// Runs the pipeline.
    ///
    /// The input is lifted first, so an empty value starts as `Nothing` and
    /// skips every stage.
    pub fn run(&self, input: impl IntoFonad<T>) -> Step<T> {
        let input = input.into_fonad();
        if input.is_reflection() {
            tracing::trace!(stages = self.stages.len(), "pipe_fm input is a reflection; skipping");
            return Eventual::Now(input);
        }
        thread(&self.stages, input).map(unwrap_passthrough)
    }

    /// Wraps the pipeline as a single stage.
    pub fn into_func(self) -> Func<T> {
        Func::fonad(move |input: Fonad<T>| self.run(input)).named("pipe_fm")
    }
}

impl<T> Pipeline<T> {
    /// The stages, in order.
    pub fn stages(&self) -> &[Func<T>] {
        &self.stages
    }
}

impl<T> Clone for Pipeline<T> {
    fn clone(&self) -> Self {
        Self {
            stages: Arc::clone(&self.stages),
        }
    }
}

impl<T> fmt::Debug for Pipeline<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Pipeline")
            .field("stages", &self.stages)
            .finish()
    }
}

impl<T: Payload> IntoFunc<T, Pipeline<T>> for Pipeline<T> {
    fn into_func(self) -> Func<T> {
        Self::into_func(self)
    }
}

/// Builds a [`Pipeline`] from a list of stages.
pub fn pipe_fm<T>(stages: impl Into<Funcs<T>>) -> Pipeline<T> {
    Pipeline {
        stages: stages.into().into_shared(),
    }
}

/// A pipeline that awaits each stage before starting the next.
pub struct AsyncPipeline<T> {
    stages: Arc<[Func<T>]>,
}

impl<T: Payload> AsyncPipeline<T> {
    /// Runs the pipeline.
    ///
    /// The input is normalized like a stage result, so it may be a plain
    /// value, a `Result` or a pending [`Step`].
    pub async fn run<R: IntoStep<T>>(&self, input: R) -> Fonad<T> {
        let input = input.into_step("pipe_async_fm").await;
        self.launch(input).await
    }

    /// Runs the pipeline on the output of `input`.
    ///
    /// An `Err` output becomes a `Fault` before any stage runs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fonad::{Exception, pipe_async_fm};
    ///
    /// # futures::executor::block_on(async {
    /// let pipeline = pipe_async_fm![|value: i32| value + 1];
    /// let rejected = pipeline
    ///     .run_future(async { Err::<i32, _>(Exception::new("unreachable")) })
    ///     .await;
    /// assert!(rejected.is_fault());
    /// # });
    /// ```
    pub async fn run_future<F, R>(&self, input: F) -> Fonad<T>
    where
        F: IntoFuture<Output = R>,
        R: IntoStep<T>,
    {
        let input = input.await.into_step("pipe_async_fm").await;
        self.launch(input).await
    }

    fn launch(&self, input: Fonad<T>) -> Step<T> {
        if input.is_reflection() {
            tracing::trace!(
                stages = self.stages.len(),
                "pipe_async_fm input is a reflection; skipping"
            );
            return Eventual::Now(unwrap_passthrough(input));
        }
        let stages = Arc::clone(&self.stages);
        Eventual::later(async move {
            let mut current = input;
            for stage in stages.iter() {
                current = stage.apply(current).await;
            }
            unwrap_passthrough(current)
        })
    }

    /// Wraps the pipeline as a single stage.
    pub fn into_func(self) -> Func<T> {
        Func::fonad(move |input: Fonad<T>| self.launch(input)).named("pipe_async_fm")
    }
}

impl<T> AsyncPipeline<T> {
    /// The stages, in order.
    pub fn stages(&self) -> &[Func<T>] {
        &self.stages
    }
}

impl<T> Clone for AsyncPipeline<T> {
    fn clone(&self) -> Self {
        Self {
            stages: Arc::clone(&self.stages),
        }
    }
}

impl<T> fmt::Debug for AsyncPipeline<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AsyncPipeline")
            .field("stages", &self.stages)
            .finish()
    }
}

impl<T: Payload> IntoFunc<T, AsyncPipeline<T>> for AsyncPipeline<T> {
    fn into_func(self) -> Func<T> {
        Self::into_func(self)
    }
}

/// Builds an [`AsyncPipeline`] from a list of stages.
pub fn pipe_async_fm<T>(stages: impl Into<Funcs<T>>) -> AsyncPipeline<T> {
    AsyncPipeline {
        stages: stages.into().into_shared(),
    }
}
