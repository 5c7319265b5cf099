//! Human-readable renderings of variants.
//!
//! These renderings are for people reading logs and test failures. They are
//! not a serialization format.

use std::fmt::{self, Debug, Display, Formatter};

use super::{Fault, Fonad, Notes};

fn write_notes(formatter: &mut Formatter<'_>, notes: &Notes, indent: &str) -> fmt::Result {
    if notes.is_empty() {
        return Ok(());
    }
    writeln!(formatter)?;
    write!(formatter, "{indent}notes:")?;
    for note in notes.recent_first() {
        writeln!(formatter)?;
        write!(formatter, "{indent}  - {note}")?;
    }
    Ok(())
}

impl Display for Fault {
    /// Renders the root cause, the notes (most recent first) and then every
    /// entry with its messages, exception, location and backtrace.
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "Fault")?;
        if let Some(root_cause) = self.root_cause() {
            writeln!(formatter)?;
            write!(formatter, "  root cause: {root_cause}")?;
        }
        if let Some(code) = self.code() {
            writeln!(formatter)?;
            write!(formatter, "  code: {code}")?;
        }
        if let Some(client_message) = self.client_message() {
            writeln!(formatter)?;
            write!(formatter, "  client message: {client_message}")?;
        }
        write_notes(formatter, self.notes(), "  ")?;
        for (index, entry) in self.entries().iter().enumerate() {
            writeln!(formatter)?;
            write!(formatter, "  [{index}] {}", entry.operation())?;
            if !entry.messages().is_empty() {
                write!(formatter, ": {}", entry.messages().join("; "))?;
            }
            if let Some(exception) = entry.exception() {
                writeln!(formatter)?;
                write!(formatter, "      exception: {exception}")?;
            }
            writeln!(formatter)?;
            write!(formatter, "      at {}", entry.location())?;
            if entry.has_backtrace() {
                writeln!(formatter)?;
                write!(formatter, "      backtrace:\n{}", entry.backtrace())?;
            }
        }
        Ok(())
    }
}

impl<T: Debug> Display for Fonad<T> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Just(just) => {
                write!(formatter, "Just({:?})", just.value())?;
                write_notes(formatter, just.notes(), "  ")
            }
            Self::Nothing(nothing) => {
                match nothing.value() {
                    Some(value) => write!(formatter, "Nothing({value:?})")?,
                    None => write!(formatter, "Nothing")?,
                }
                write_notes(formatter, nothing.notes(), "  ")
            }
            Self::Ok(status) => {
                write!(formatter, "Ok")?;
                match (status.operation(), status.message()) {
                    (Some(operation), Some(message)) => {
                        write!(formatter, "({operation}: {message})")?;
                    }
                    (Some(label), None) | (None, Some(label)) => write!(formatter, "({label})")?,
                    (None, None) => {}
                }
                write_notes(formatter, status.notes(), "  ")
            }
            Self::Fault(fault) => Display::fmt(fault, formatter),
            Self::Passthrough(passthrough) => {
                write!(formatter, "Passthrough({})", passthrough.inner())
            }
        }
    }
}

impl<T: Debug> Fonad<T> {
    /// Renders the variant for humans.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fonad::Fonad;
    ///
    /// let mut value = Fonad::just(3);
    /// value.add_note("first");
    /// value.add_note("second");
    /// assert_eq!(value.inspect(), "Just(3)\n  notes:\n    - second\n    - first");
    /// ```
    pub fn inspect(&self) -> String {
        self.to_string()
    }
}

impl<T> Fonad<T> {
    /// A one-line status for the variant.
    ///
    /// `Ok` reports its message (or operation), `Fault` its full rendering,
    /// `Just` and `Nothing` their most recent note, falling back to the
    /// variant name.
    pub fn status_msg(&self) -> String {
        match self {
            Self::Ok(status) => status
                .message()
                .or_else(|| status.operation())
                .unwrap_or("Ok")
                .to_string(),
            Self::Fault(fault) => fault.to_string(),
            Self::Just(just) => just.notes().latest().unwrap_or("Just").to_string(),
            Self::Nothing(nothing) => nothing.notes().latest().unwrap_or("Nothing").to_string(),
            Self::Passthrough(_) => "Passthrough".to_string(),
        }
    }
}
