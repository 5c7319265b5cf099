//! Control structures shared by every operator.
//!
//! - [`Eventual`]: a value available now or later; the uniform return type
//!   of operators, whether the wrapped work is synchronous or not
//! - [`IntoStep`]: how wrapped function results become a [`Step`]
//! - [`Capture`]: a shared cell a pipeline writes the current variant into
//!
//! # Examples
//!
//! ```rust
//! use fonad::Fonad;
//! use fonad::control::{IntoStep, Step, deferred};
//!
//! let now: Step<i32> = 5.into_step("example");
//! assert!(now.is_now());
//!
//! let later: Step<i32> = deferred(async { 5 });
//! assert!(!later.is_now());
//! assert_eq!(later.wait(), Fonad::just(5));
//! ```

mod capture;
mod eventual;
mod step;

pub use capture::Capture;
pub use eventual::Eventual;
pub use step::{IntoStep, deferred};

use crate::fonad::{Fault, Fonad};

/// The eventual outcome of one pipeline stage.
pub type Step<T> = Eventual<Fonad<T>>;

/// The eventual outcome of evaluating a condition: a boolean, or the
/// `Fault` the condition raised.
pub type Verdict = Eventual<Result<bool, Fault>>;
