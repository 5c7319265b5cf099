//! The variant model.
//!
//! A [`Fonad<T>`] is one of five variants:
//!
//! | Variant         | Carries                               | Extraction yields          |
//! |-----------------|---------------------------------------|----------------------------|
//! | `Just`          | a value                               | the value                  |
//! | `Nothing`       | the original empty value, or nothing  | that empty value           |
//! | `Ok`            | a status message                      | `true`                     |
//! | `Fault`         | failure entries and context           | `false`                    |
//! | `Passthrough`   | another variant, ferried untouched    | the carried variant        |
//!
//! Every variant except `Passthrough` owns a list of diagnostic [`Notes`].
//! `Passthrough` is inert: note operations on it do nothing.
//!
//! Any variant other than `Just` is a *reflection*: operators such as
//! [`map`](crate::operator::map) return it unchanged without invoking their
//! function.
//!
//! # Examples
//!
//! ```rust
//! use fonad::Fonad;
//!
//! let mut value = Fonad::just(42);
//! value.add_note("loaded from cache");
//!
//! assert!(value.is_just());
//! assert!(value.is_not_fault());
//! assert_eq!(value.value(), Some(&42));
//! assert_eq!(value.notes(), ["loaded from cache"]);
//!
//! let mut carried = Fonad::passthrough(value);
//! carried.add_note("ignored");
//! assert!(carried.notes().is_empty());
//! ```

mod extract;
mod fault;
mod inspect;
mod lift;
mod notes;

pub use extract::{Extract, Extracted, extract};
pub(crate) use fault::ANONYMOUS_OPERATION;
pub use fault::{CAUGHT_EXCEPTION, Fault, FaultEntry, FaultOptions};
pub use lift::{Emptiable, IntoFonad, fonadify};
pub use notes::Notes;

use crate::error::Exception;

/// Values that can travel through pipelines.
///
/// Blanket-implemented for every `Emptiable + Clone + Send + Sync + 'static`
/// type.
pub trait Payload: Emptiable + Clone + Send + Sync + 'static {}

impl<T> Payload for T where T: Emptiable + Clone + Send + Sync + 'static {}

/// The `Just` payload: a present value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Just<T> {
    value: T,
    notes: Notes,
}

impl<T> Just<T> {
    /// The carried value.
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Mutable access to the carried value.
    pub const fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Consumes the payload, returning the value.
    pub fn into_value(self) -> T {
        self.value
    }

    /// The diagnostic notes.
    pub const fn notes(&self) -> &Notes {
        &self.notes
    }
}

/// The `Nothing` payload: an empty or absent value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nothing<T> {
    value: Option<T>,
    notes: Notes,
}

impl<T> Nothing<T> {
    /// The preserved empty value; `None` when the value was absent.
    pub const fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Consumes the payload, returning the preserved empty value.
    pub fn into_value(self) -> Option<T> {
        self.value
    }

    /// The diagnostic notes.
    pub const fn notes(&self) -> &Notes {
        &self.notes
    }
}

/// The `Ok` payload: bare success with a status message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Status {
    operation: Option<String>,
    message: Option<String>,
    notes: Notes,
}

impl Status {
    /// The label of the operation that succeeded.
    pub fn operation(&self) -> Option<&str> {
        self.operation.as_deref()
    }

    /// The status message.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The diagnostic notes.
    pub const fn notes(&self) -> &Notes {
        &self.notes
    }
}

/// The `Passthrough` payload: a variant ferried through a pipeline untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Passthrough<T> {
    inner: Box<Fonad<T>>,
}

impl<T> Passthrough<T> {
    /// The carried variant.
    pub fn inner(&self) -> &Fonad<T> {
        &self.inner
    }

    /// Consumes the payload, returning the carried variant.
    pub fn into_inner(self) -> Fonad<T> {
        *self.inner
    }
}

/// The outcome of an operation.
///
/// See the [module documentation](self) for the meaning of each variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Fonad<T> {
    /// A present value.
    Just(Just<T>),
    /// An empty or absent value.
    Nothing(Nothing<T>),
    /// Success without a payload.
    Ok(Status),
    /// A terminal failure.
    Fault(Fault),
    /// A bypass signal carrying another variant.
    Passthrough(Passthrough<T>),
}

// =============================================================================
// Constructors
// =============================================================================

impl<T> Fonad<T> {
    /// Wraps a value in `Just`, even when the value is empty.
    ///
    /// Use [`fonadify`] to pick `Just` or `Nothing` from the value.
    pub const fn just(value: T) -> Self {
        Self::Just(Just {
            value,
            notes: Notes::new(),
        })
    }

    /// Creates an absent `Nothing`.
    pub const fn nothing() -> Self {
        Self::Nothing(Nothing {
            value: None,
            notes: Notes::new(),
        })
    }

    /// Creates a `Nothing` preserving an empty value.
    ///
    /// A non-empty value is a misuse and yields a `Fault` describing it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fonad::Fonad;
    ///
    /// let empty: Fonad<Vec<i32>> = Fonad::nothing_of(Vec::new());
    /// assert!(empty.is_nothing());
    ///
    /// let misuse = Fonad::nothing_of(vec![1]);
    /// assert!(misuse.is_fault());
    /// ```
    #[track_caller]
    pub fn nothing_of(value: T) -> Self
    where
        T: Emptiable,
    {
        if value.is_empty_value() {
            Self::Nothing(Nothing {
                value: Some(value),
                notes: Notes::new(),
            })
        } else {
            tracing::debug!("Nothing constructed from a non-empty value");
            Self::Fault(Fault::new(
                "Nothing",
                "Nothing can only carry an empty or absent value",
            ))
        }
    }

    /// Creates an `Ok` with no status message.
    pub const fn ok() -> Self {
        Self::Ok(Status {
            operation: None,
            message: None,
            notes: Notes::new(),
        })
    }

    /// Creates an `Ok` for an operation with a status message.
    pub fn ok_with(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Ok(Status {
            operation: Some(operation.into()),
            message: Some(message.into()),
            notes: Notes::new(),
        })
    }

    /// Creates an `Ok` with a status message and no operation label.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fonad::Fonad;
    ///
    /// let done: Fonad<()> = Fonad::ok_message("saved");
    /// assert_eq!(done.status_msg(), "saved");
    /// assert_eq!(done.as_ok().and_then(|status| status.operation()), None);
    /// ```
    pub fn ok_message(message: impl Into<String>) -> Self {
        Self::Ok(Status {
            operation: None,
            message: Some(message.into()),
            notes: Notes::new(),
        })
    }

    /// Creates a `Fault` with one entry.
    #[track_caller]
    pub fn fault(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fault(Fault::new(operation, message))
    }

    /// Creates a `Fault` from options.
    #[track_caller]
    pub fn fault_with(options: impl Into<FaultOptions>) -> Self {
        Self::Fault(Fault::from_options(options.into()))
    }

    /// Lifts a caught exception into a `Fault`.
    #[track_caller]
    pub fn from_exception(operation: impl Into<String>, exception: Exception) -> Self {
        Self::Fault(Fault::caught(operation, exception))
    }

    /// Wraps a variant in `Passthrough`.
    pub fn passthrough(inner: Self) -> Self {
        Self::Passthrough(Passthrough {
            inner: Box::new(inner),
        })
    }

    /// Wraps a raw value in `Passthrough`.
    ///
    /// The value is carried as a `Just` without emptiness checks.
    pub fn passthrough_value(value: T) -> Self {
        Self::passthrough(Self::just(value))
    }
}

impl<T> From<Fault> for Fonad<T> {
    fn from(fault: Fault) -> Self {
        Self::Fault(fault)
    }
}

impl<T> From<Status> for Fonad<T> {
    fn from(status: Status) -> Self {
        Self::Ok(status)
    }
}

// =============================================================================
// Type Queries
// =============================================================================

macro_rules! variant_queries {
    ($($variant:ident => $name:ident : $payload:ty),* $(,)?) => {
        paste::paste! {
            impl<T> Fonad<T> {
                $(
                    #[doc = concat!("Returns `true` if this is `", stringify!($variant), "`.")]
                    #[inline]
                    pub const fn [<is_ $name>](&self) -> bool {
                        matches!(self, Self::$variant(_))
                    }

                    #[doc = concat!("Returns `true` unless this is `", stringify!($variant), "`.")]
                    #[inline]
                    pub const fn [<is_not_ $name>](&self) -> bool {
                        !self.[<is_ $name>]()
                    }

                    #[doc = concat!("Returns the `", stringify!($variant), "` payload, if this is one.")]
                    #[inline]
                    pub const fn [<as_ $name>](&self) -> Option<&$payload> {
                        match self {
                            Self::$variant(payload) => Some(payload),
                            _ => None,
                        }
                    }

                    #[doc = concat!("Returns the `", stringify!($variant), "` payload mutably, if this is one.")]
                    #[inline]
                    pub const fn [<as_ $name _mut>](&mut self) -> Option<&mut $payload> {
                        match self {
                            Self::$variant(payload) => Some(payload),
                            _ => None,
                        }
                    }
                )*
            }
        }
    };
}

variant_queries! {
    Just => just: Just<T>,
    Nothing => nothing: Nothing<T>,
    Ok => ok: Status,
    Fault => fault: Fault,
    Passthrough => passthrough: Passthrough<T>,
}

impl<T> Fonad<T> {
    /// Returns `true` for every variant other than `Just`.
    ///
    /// Operators return such inputs unchanged.
    #[inline]
    pub const fn is_reflection(&self) -> bool {
        !self.is_just()
    }

    /// The `Just` value, if any.
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Just(just) => Some(&just.value),
            _ => None,
        }
    }

    /// Consumes the variant, returning the `Just` value, if any.
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Just(just) => Some(just.value),
            _ => None,
        }
    }

    /// Replaces this variant with a `Just`, keeping its notes.
    pub fn convert_to_just(&mut self, value: T) {
        let notes = self.take_notes();
        *self = Self::Just(Just { value, notes });
    }
}

// =============================================================================
// Diagnostics
// =============================================================================

impl<T> Fonad<T> {
    const fn notes_mut(&mut self) -> Option<&mut Notes> {
        match self {
            Self::Just(just) => Some(&mut just.notes),
            Self::Nothing(nothing) => Some(&mut nothing.notes),
            Self::Ok(status) => Some(&mut status.notes),
            Self::Fault(fault) => Some(&mut fault.notes),
            Self::Passthrough(_) => None,
        }
    }

    /// The diagnostic notes, oldest first. Always empty for `Passthrough`.
    pub fn notes(&self) -> &[String] {
        match self {
            Self::Just(just) => just.notes.as_slice(),
            Self::Nothing(nothing) => nothing.notes.as_slice(),
            Self::Ok(status) => status.notes.as_slice(),
            Self::Fault(fault) => fault.notes.as_slice(),
            Self::Passthrough(_) => &[],
        }
    }

    /// Appends a note. No-op for `Passthrough`.
    pub fn add_note(&mut self, note: impl Into<String>) {
        if let Some(notes) = self.notes_mut() {
            notes.add(note);
        }
    }

    /// Inserts a note at the front. No-op for `Passthrough`.
    pub fn prepend_note(&mut self, note: impl Into<String>) {
        if let Some(notes) = self.notes_mut() {
            notes.prepend(note);
        }
    }

    /// Replaces every note. No-op for `Passthrough`.
    pub fn set_notes<I, S>(&mut self, notes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some(current) = self.notes_mut() {
            current.replace(notes);
        }
    }

    /// Removes and returns every note.
    pub fn take_notes(&mut self) -> Notes {
        self.notes_mut().map(Notes::take).unwrap_or_default()
    }
}
