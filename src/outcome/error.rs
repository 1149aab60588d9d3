//! Error types raised at the API boundary of an outcome.
//!
//! Domain errors are whatever the caller puts in `Err`. The types here cover
//! the two ways of misusing an outcome, plus the error a caught panic turns
//! into.

use std::any::Any;

/// Raised when the success extractor is called on an `Err` outcome.
///
/// The original error is carried unchanged and can be taken back with
/// [`UnwrappedOkWithErr::into_inner`]. When raised by
/// [`Outcome::unwrap`](super::Outcome::unwrap), this value is the panic
/// payload, so it can be recovered with `downcast`.
///
/// # Examples
///
/// ```rust
/// use hybrid_result::outcome::{Outcome, UnwrappedOkWithErr};
///
/// let error = Outcome::<i32, &str>::err("boom").try_unwrap().now();
/// assert_eq!(error, Some(Err(UnwrappedOkWithErr::new("boom"))));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("called `unwrap` on an `Err` outcome")]
pub struct UnwrappedOkWithErr<E> {
    error: E,
}

impl<E> UnwrappedOkWithErr<E> {
    /// Wraps the error found where a success was expected.
    pub const fn new(error: E) -> Self {
        Self { error }
    }

    /// The error that was found.
    pub const fn error(&self) -> &E {
        &self.error
    }

    /// Returns the error that was found.
    pub fn into_inner(self) -> E {
        self.error
    }
}

/// Raised when the error extractor is called on an `Ok` outcome.
///
/// # Examples
///
/// ```rust
/// use hybrid_result::outcome::{Outcome, UnwrappedErrWithOk};
///
/// let error = Outcome::<i32, &str>::ok(1).try_unwrap_err().now();
/// assert_eq!(error, Some(Err(UnwrappedErrWithOk::new(1))));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("called `unwrap_err` on an `Ok` outcome")]
pub struct UnwrappedErrWithOk<T> {
    value: T,
}

impl<T> UnwrappedErrWithOk<T> {
    /// Wraps the value found where an error was expected.
    pub const fn new(value: T) -> Self {
        Self { value }
    }

    /// The value that was found.
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Returns the value that was found.
    pub fn into_inner(self) -> T {
        self.value
    }
}

/// A panic caught by one of the `try_*catch*` constructors.
///
/// # Examples
///
/// ```rust
/// use hybrid_result::outcome::CaughtPanic;
///
/// let caught = CaughtPanic::new("index out of bounds");
/// assert_eq!(caught.to_string(), "panicked: index out of bounds");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
#[error("panicked: {message}")]
pub struct CaughtPanic {
    message: String,
}

impl CaughtPanic {
    /// Creates a caught panic with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Extracts the message from a panic payload.
    ///
    /// `&str` and `String` payloads keep their text; anything else becomes
    /// `"unknown panic"`.
    pub fn from_payload(payload: &(dyn Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|message| (*message).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Self { message }
    }

    /// The panic message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn unwrapped_ok_with_err_display() {
        let error = UnwrappedOkWithErr::new("boom");
        assert_eq!(error.to_string(), "called `unwrap` on an `Err` outcome");
        assert_eq!(error.error(), &"boom");
        assert_eq!(error.into_inner(), "boom");
    }

    #[rstest]
    fn unwrapped_err_with_ok_display() {
        let error = UnwrappedErrWithOk::new(42);
        assert_eq!(error.to_string(), "called `unwrap_err` on an `Ok` outcome");
        assert_eq!(error.value(), &42);
        assert_eq!(error.into_inner(), 42);
    }

    #[rstest]
    fn misuse_errors_are_std_errors() {
        use std::error::Error;

        let error = UnwrappedOkWithErr::new("boom");
        let _: &dyn Error = &error;
        assert!(error.source().is_none());
    }

    #[rstest]
    #[case(Box::new("static message") as Box<dyn Any + Send>, "static message")]
    #[case(Box::new("owned message".to_string()) as Box<dyn Any + Send>, "owned message")]
    #[case(Box::new(17_u8) as Box<dyn Any + Send>, "unknown panic")]
    fn caught_panic_reads_payload(#[case] payload: Box<dyn Any + Send>, #[case] expected: &str) {
        assert_eq!(CaughtPanic::from_payload(payload.as_ref()).message(), expected);
    }
}
