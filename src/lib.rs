//! # fonad
//!
//! A result/option algebra for composing fail-fast pipelines out of
//! synchronous and asynchronous functions.
//!
//! ## Overview
//!
//! An operation's outcome is a [`Fonad`]:
//!
//! - **`Just`**: success with a value
//! - **`Nothing`**: success with no value
//! - **`Ok`**: success carrying only a status message
//! - **`Fault`**: a failure with a trail of operations and messages
//! - **`Passthrough`**: a variant ferried through a pipeline untouched
//!
//! Every variant but `Just` is a *reflection*: operators hand it back
//! unchanged instead of applying their function, so a pipeline never needs
//! to branch on failure by hand.
//!
//! ## Modules
//!
//! - [`fonad`]: the variants, diagnostics, lifting and extraction
//! - [`control`]: [`Eventual`](control::Eventual) steps that are ready now
//!   or later, and the shared [`Capture`](control::Capture) cell
//! - [`compose`]: tagged functions ([`Func`](compose::Func)), currying and
//!   pipeline macros
//! - [`operator`]: `map`, `chain`, `call` and friends
//! - [`condition`]: predicates, conditions and the combinators they gate
//! - [`pipeline`]: `pipe_fm` and `pipe_async_fm`
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize` for [`Exception`], [`Status`], [`FaultEntry`] and
//!   [`Notes`]
//!
//! ## Example
//!
//! ```rust
//! use fonad::prelude::*;
//!
//! let pipeline = pipe_fm![
//!     fault_if(Pred::value(|text: &String| text.trim().is_empty()), "validate"),
//!     |text: String| text.trim().parse::<u32>().map(|number| (number * 2).to_string()),
//!     add_note("doubled"),
//! ];
//!
//! let doubled = pipeline.run(" 21 ".to_string()).wait();
//! assert_eq!(doubled.value().map(String::as_str), Some("42"));
//! assert_eq!(doubled.notes(), ["doubled"]);
//!
//! // A parse error becomes a Fault; later value stages are skipped.
//! assert!(pipeline.run("twenty-one".to_string()).wait().is_fault());
//! // Empty input lifts to Nothing and skips the whole pipeline.
//! assert!(pipeline.run(String::new()).wait().is_nothing());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types, traits and macros.
///
/// # Usage
///
/// ```rust
/// use fonad::prelude::*;
/// ```
pub mod prelude {
    pub use crate::compose::*;
    pub use crate::condition::*;
    pub use crate::control::*;
    pub use crate::error::{Exception, FonadError};
    pub use crate::fonad::*;
    pub use crate::operator::*;
    pub use crate::pipeline::*;
}

pub mod compose;
pub mod condition;
pub mod control;
pub mod error;
pub mod fonad;
pub mod operator;
pub mod pipeline;

pub use error::{Exception, FonadError};
pub use fonad::{
    CAUGHT_EXCEPTION, Emptiable, Extract, Extracted, Fault, FaultEntry, FaultOptions, Fonad,
    IntoFonad, Just, Notes, Nothing, Passthrough, Payload, Status, extract, fonadify,
};

static_assertions::assert_impl_all!(Fonad<i32>: Send, Sync, Clone);
static_assertions::assert_impl_all!(compose::Func<i32>: Send, Sync, Clone);
static_assertions::assert_impl_all!(condition::Pred<i32>: Send, Sync, Clone);
static_assertions::assert_impl_all!(control::Step<i32>: Send);
static_assertions::assert_impl_all!(control::Capture<i32>: Send, Sync, Clone);
static_assertions::assert_impl_all!(pipeline::Pipeline<i32>: Send, Sync, Clone);
