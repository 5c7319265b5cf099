//! Error types for the fonad algebra.
//!
//! Two kinds of error live here:
//!
//! - [`Exception`]: the captured form of an error raised by a wrapped
//!   function. It is what a [`Fault`](crate::fonad::Fault) entry records as
//!   its source.
//! - [`FonadError`]: the few errors the library itself reports through a
//!   `Result` instead of a `Fault` (see [`case_of_strict`](crate::condition::case_of_strict)).

use std::sync::Arc;

/// A captured error raised by a wrapped computation.
///
/// `Exception` keeps the name, message and optional code of the original
/// error together with the original error itself (as an [`anyhow::Error`]).
/// It implements [`std::error::Error`], so wrapped functions can return it
/// directly from a `Result`.
///
/// # Examples
///
/// ```rust
/// use fonad::Exception;
///
/// let exception = Exception::new("boom").with_code("E_BOOM");
/// assert_eq!(exception.message(), "boom");
/// assert_eq!(exception.code(), Some("E_BOOM"));
/// assert_eq!(format!("{exception}"), "Error: boom");
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Exception {
    name: String,
    message: String,
    code: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip))]
    cause: Option<Arc<anyhow::Error>>,
}

impl Exception {
    /// Creates an exception named `Error` with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            name: "Error".to_string(),
            message: message.into(),
            code: None,
            cause: None,
        }
    }

    /// Replaces the exception name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Attaches an error code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Captures any error convertible into [`anyhow::Error`].
    ///
    /// An `Exception` passed in (possibly wrapped by `anyhow`) is returned as
    /// is. Otherwise the name is the short type name of `E`, the message is
    /// the error's display text, and `std::io::Error` kinds become the code.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fonad::Exception;
    ///
    /// let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    /// let exception = Exception::capture(io);
    /// assert_eq!(exception.name(), "Error");
    /// assert_eq!(exception.message(), "missing");
    /// assert_eq!(exception.code(), Some("NotFound"));
    /// ```
    pub fn capture<E>(error: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        let name = short_type_name::<E>();
        let error: anyhow::Error = error.into();
        match error.downcast::<Self>() {
            Ok(exception) => exception,
            Err(error) => {
                let code = error
                    .downcast_ref::<std::io::Error>()
                    .map(|io| format!("{:?}", io.kind()));
                Self {
                    name: name.to_string(),
                    message: error.to_string(),
                    code,
                    cause: Some(Arc::new(error)),
                }
            }
        }
    }

    /// The exception name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The exception message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The error code, if any.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// The original error this exception was captured from.
    pub fn cause(&self) -> Option<&anyhow::Error> {
        self.cause.as_deref()
    }
}

impl PartialEq for Exception {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.message == other.message && self.code == other.code
    }
}

impl std::fmt::Display for Exception {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}: {}", self.name, self.message)?;
        if let Some(code) = &self.code {
            write!(formatter, " (code: {code})")?;
        }
        Ok(())
    }
}

impl std::error::Error for Exception {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| &**cause as &(dyn std::error::Error + 'static))
    }
}

fn short_type_name<E>() -> &'static str {
    let full = std::any::type_name::<E>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Errors reported by the library through `Result` rather than `Fault`.
///
/// # Examples
///
/// ```rust
/// use fonad::FonadError;
///
/// let error = FonadError::Unmatched { value: "Just(7)".to_string() };
/// assert_eq!(format!("{error}"), "case_of_strict: no arm matched Just(7)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FonadError {
    /// No arm of a strict case analysis matched the input.
    #[error("case_of_strict: no arm matched {value}")]
    Unmatched {
        /// Rendering of the unmatched input.
        value: String,
    },
}
