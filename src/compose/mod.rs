//! Pipeline functions and the macros that build them.
//!
//! # Overview
//!
//! - [`Func`]: a type-erased function tagged with what it receives ([`Tag`])
//! - [`IntoFunc`]: accepts closures, `Func`s and pipelines wherever a
//!   function is expected
//! - [`Funcs`]: an ordered list of functions for batch operators
//! - [`reflect`]: the variant-level identity
//! - [`fonad_curry2!`] and [`fonad_curry3!`]: curry multi-argument functions
//!   into `Func` factories whose every application keeps the tag
//! - [`pipe_fm!`] and [`pipe_async_fm!`]: build pipelines from stage lists
//!
//! # Tags
//!
//! Operators consult the tag to decide what to hand a function. A `Value`
//! function receives the unwrapped `Just` value and is never invoked on any
//! other variant. `Fonad`, `Query` and `Updater` functions receive the
//! variant itself, so they can inspect and annotate reflections too.
//!
//! # Examples
//!
//! ```rust
//! use fonad::compose::{Func, Tag, func};
//! use fonad::{Fonad, fonad_curry2};
//!
//! let halve = func(|value: i32| value / 2);
//! assert_eq!(halve.tag(), Tag::Value);
//!
//! let tag_with = fonad_curry2!(updater, |note: &'static str, fonad: &mut Fonad<i32>| {
//!     fonad.add_note(note);
//! });
//! let audited: Func<i32> = tag_with("audited");
//! assert_eq!(audited.tag(), Tag::Updater);
//! ```

mod curry_macro;
mod func;
mod pipe_macro;

pub use func::{Func, Funcs, IntoFunc, Tag, func, reflect};

pub use crate::fonad_curry2;
pub use crate::fonad_curry3;
pub use crate::pipe_async_fm;
pub use crate::pipe_fm;
