//! The `Fault` variant: a terminal failure with accumulated context.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::panic::Location;
use std::sync::Arc;

use smallvec::SmallVec;

use super::Notes;
use crate::error::Exception;

/// Message recorded when a wrapped function fails, whether synchronously
/// (`Err`) or by a deferred computation resolving to `Err`.
pub const CAUGHT_EXCEPTION: &str = "caught exception";

pub(crate) const ANONYMOUS_OPERATION: &str = "anonymous";

/// One failure-raising event recorded by a [`Fault`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FaultEntry {
    operation: String,
    messages: Vec<String>,
    exception: Option<Exception>,
    #[cfg_attr(feature = "serde", serde(skip))]
    location: &'static Location<'static>,
    #[cfg_attr(feature = "serde", serde(skip))]
    backtrace: Arc<Backtrace>,
}

impl FaultEntry {
    #[track_caller]
    fn new(operation: String, messages: Vec<String>, exception: Option<Exception>) -> Self {
        Self {
            operation,
            messages,
            exception,
            location: Location::caller(),
            backtrace: Arc::new(Backtrace::capture()),
        }
    }

    /// The label of the operation that failed.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// The messages recorded for this event.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// The exception that caused this event, if any.
    pub const fn exception(&self) -> Option<&Exception> {
        self.exception.as_ref()
    }

    /// Where the entry was created.
    pub const fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// The call stack captured with the entry.
    ///
    /// Capture follows `RUST_BACKTRACE` / `RUST_LIB_BACKTRACE`; when disabled
    /// the backtrace status is [`BacktraceStatus::Disabled`].
    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    pub(crate) fn has_backtrace(&self) -> bool {
        self.backtrace.status() == BacktraceStatus::Captured
    }
}

impl PartialEq for FaultEntry {
    fn eq(&self, other: &Self) -> bool {
        self.operation == other.operation
            && self.messages == other.messages
            && self.exception == other.exception
    }
}

/// Options for building a [`Fault`].
///
/// # Examples
///
/// ```rust
/// use fonad::{Fault, FaultOptions};
///
/// let fault = Fault::from_options(
///     FaultOptions::new("insert")
///         .message("duplicate key")
///         .root_cause("constraint violation")
///         .code("E11000"),
/// );
/// assert_eq!(fault.entries()[0].operation(), "insert");
/// assert_eq!(fault.root_cause(), Some("constraint violation"));
/// assert_eq!(fault.code(), Some("E11000"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaultOptions {
    /// Label of the failing operation.
    pub operation: Option<String>,
    /// Messages for the first entry.
    pub messages: Vec<String>,
    /// Source exception for the first entry.
    pub exception: Option<Exception>,
    /// Root-cause label.
    pub root_cause: Option<String>,
    /// Error code.
    pub code: Option<String>,
    /// Message intended for clients of the failing operation.
    pub client_message: Option<String>,
    /// Initial diagnostic notes.
    pub notes: Vec<String>,
}

impl FaultOptions {
    /// Creates options for the given operation label.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Self::default()
        }
    }

    /// Adds a message.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }

    /// Sets the source exception.
    #[must_use]
    pub fn exception(mut self, exception: Exception) -> Self {
        self.exception = Some(exception);
        self
    }

    /// Sets the root-cause label.
    #[must_use]
    pub fn root_cause(mut self, root_cause: impl Into<String>) -> Self {
        self.root_cause = Some(root_cause.into());
        self
    }

    /// Sets the error code.
    #[must_use]
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Sets the client-facing message.
    #[must_use]
    pub fn client_message(mut self, message: impl Into<String>) -> Self {
        self.client_message = Some(message.into());
        self
    }

    /// Adds a diagnostic note.
    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl From<&str> for FaultOptions {
    fn from(operation: &str) -> Self {
        Self::new(operation)
    }
}

impl From<String> for FaultOptions {
    fn from(operation: String) -> Self {
        Self::new(operation)
    }
}

/// A terminal failure.
///
/// A `Fault` holds an append-only list of [`FaultEntry`] values, one per
/// failure-raising event, plus a root-cause label, an optional error code,
/// an optional client-facing message and diagnostic notes. Handlers add
/// context with [`Fault::append_entry`] and the setters; nothing ever removes
/// an entry.
///
/// Extraction of a `Fault` yields `false`.
///
/// # Examples
///
/// ```rust
/// use fonad::{Exception, Fault};
///
/// let mut fault = Fault::caught("read", Exception::new("disk on fire"));
/// fault.append_entry("load profile", "could not read profile", None);
///
/// assert_eq!(fault.entries().len(), 2);
/// assert_eq!(fault.exception().map(Exception::message), Some("disk on fire"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Fault {
    entries: SmallVec<[FaultEntry; 1]>,
    root_cause: Option<String>,
    code: Option<String>,
    client_message: Option<String>,
    pub(crate) notes: Notes,
}

impl Fault {
    /// Creates a fault with one entry.
    #[track_caller]
    pub fn new(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_entry(FaultEntry::new(
            operation.into(),
            vec![message.into()],
            None,
        ))
    }

    /// Creates a fault whose sole entry wraps a caught exception.
    #[track_caller]
    pub fn caught(operation: impl Into<String>, exception: Exception) -> Self {
        let operation = operation.into();
        tracing::debug!(%operation, %exception, "caught exception converted to fault");
        Self::with_entry(FaultEntry::new(
            operation,
            vec![CAUGHT_EXCEPTION.to_string()],
            Some(exception),
        ))
    }

    /// Creates a fault from options.
    #[track_caller]
    pub fn from_options(options: FaultOptions) -> Self {
        let FaultOptions {
            operation,
            messages,
            exception,
            root_cause,
            code,
            client_message,
            notes,
        } = options;
        let operation = operation.unwrap_or_else(|| ANONYMOUS_OPERATION.to_string());
        let mut fault = Self::with_entry(FaultEntry::new(operation, messages, exception));
        fault.root_cause = root_cause;
        fault.code = code;
        fault.client_message = client_message;
        fault.notes = notes.into_iter().collect();
        fault
    }

    fn with_entry(entry: FaultEntry) -> Self {
        let mut entries = SmallVec::new();
        entries.push(entry);
        Self {
            entries,
            root_cause: None,
            code: None,
            client_message: None,
            notes: Notes::new(),
        }
    }

    /// Records another failure-raising event, keeping earlier entries.
    #[track_caller]
    pub fn append_entry(
        &mut self,
        operation: impl Into<String>,
        message: impl Into<String>,
        exception: Option<Exception>,
    ) {
        self.entries.push(FaultEntry::new(
            operation.into(),
            vec![message.into()],
            exception,
        ));
    }

    /// Records an entry built from `options`, keeping earlier entries.
    ///
    /// `root_cause`, `code` and `client_message` fill only fields that are
    /// still unset. Notes from `options` are appended.
    #[track_caller]
    pub fn append_options(&mut self, options: FaultOptions) {
        let FaultOptions {
            operation,
            messages,
            exception,
            root_cause,
            code,
            client_message,
            notes,
        } = options;
        let operation = operation.unwrap_or_else(|| ANONYMOUS_OPERATION.to_string());
        self.entries.push(FaultEntry::new(operation, messages, exception));
        self.root_cause = self.root_cause.take().or(root_cause);
        self.code = self.code.take().or(code);
        self.client_message = self.client_message.take().or(client_message);
        self.notes.extend(notes);
    }

    /// Every recorded entry, oldest first.
    pub fn entries(&self) -> &[FaultEntry] {
        &self.entries
    }

    /// The exception of the first entry that carries one.
    pub fn exception(&self) -> Option<&Exception> {
        self.entries.iter().find_map(FaultEntry::exception)
    }

    /// The root-cause label.
    pub fn root_cause(&self) -> Option<&str> {
        self.root_cause.as_deref()
    }

    /// Sets the root-cause label.
    pub fn set_root_cause(&mut self, root_cause: impl Into<String>) {
        self.root_cause = Some(root_cause.into());
    }

    /// The error code.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Sets the error code.
    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = Some(code.into());
    }

    /// The client-facing message.
    pub fn client_message(&self) -> Option<&str> {
        self.client_message.as_deref()
    }

    /// Sets the client-facing message.
    pub fn set_client_message(&mut self, message: impl Into<String>) {
        self.client_message = Some(message.into());
    }

    /// The diagnostic notes.
    pub const fn notes(&self) -> &Notes {
        &self.notes
    }

    /// Mutable access to the diagnostic notes.
    pub const fn notes_mut(&mut self) -> &mut Notes {
        &mut self.notes
    }
}
