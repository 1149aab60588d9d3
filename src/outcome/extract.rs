//! Extraction: getting a plain value out of an outcome.
//!
//! Extractors cannot block, so their return type follows the receiver's
//! mode: an immediate outcome gives [`Extract::Ready`], a deferred one gives
//! [`Extract::Deferred`], a handle that produces the value once awaited.
//! Either way the result can be awaited.

use std::fmt;
use std::future::IntoFuture;
use std::panic::panic_any;

use futures::FutureExt;
use futures::future::{self, BoxFuture, Either, Ready};

use super::error::{UnwrappedErrWithOk, UnwrappedOkWithErr};
use super::{Outcome, Payload, Repr};

/// A value extracted from an [`Outcome`], available now or later.
///
/// # Examples
///
/// ```rust
/// use hybrid_result::outcome::{Extract, Outcome};
///
/// let ready = Outcome::<i32, String>::ok(1).unwrap_or(0);
/// assert!(ready.is_ready());
/// assert_eq!(ready.now(), Some(1));
///
/// let later = Outcome::<i32, String>::ok_later(async { 2 }).unwrap_or(0);
/// assert!(!later.is_ready());
/// assert_eq!(futures::executor::block_on(later.into_future()), 2);
/// ```
#[must_use = "an extracted value does nothing unless it is read or awaited"]
pub enum Extract<A> {
    /// The value, taken from an immediate outcome.
    Ready(A),
    /// A handle that yields the value once the deferred outcome settles.
    Deferred(BoxFuture<'static, A>),
}

impl<A> Extract<A> {
    /// Returns `true` if the value is available without awaiting.
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Takes the value if it is available now.
    ///
    /// A deferred handle is dropped, which abandons the read but not the
    /// underlying computation; other handles to it can still await it.
    pub fn now(self) -> Option<A> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Deferred(_) => None,
        }
    }

    /// Takes the value if it is available now.
    ///
    /// # Errors
    ///
    /// Returns `self` unchanged when the value is deferred.
    pub fn into_ready(self) -> Result<A, Self> {
        match self {
            Self::Ready(value) => Ok(value),
            deferred @ Self::Deferred(_) => Err(deferred),
        }
    }

    /// Transforms the value, now or when it arrives.
    pub fn map<B, F>(self, function: F) -> Extract<B>
    where
        A: 'static,
        F: FnOnce(A) -> B + Send + 'static,
    {
        match self {
            Self::Ready(value) => Extract::Ready(function(value)),
            Self::Deferred(future) => Extract::Deferred(future.map(function).boxed()),
        }
    }
}

impl<A: 'static> IntoFuture for Extract<A> {
    type Output = A;
    type IntoFuture = Either<Ready<A>, BoxFuture<'static, A>>;

    fn into_future(self) -> Self::IntoFuture {
        match self {
            Self::Ready(value) => Either::Left(future::ready(value)),
            Self::Deferred(future) => Either::Right(future),
        }
    }
}

impl<A: fmt::Debug> fmt::Debug for Extract<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(value) => formatter.debug_tuple("Ready").field(value).finish(),
            Self::Deferred(_) => formatter.write_str("Deferred"),
        }
    }
}

// =============================================================================
// Extractors
// =============================================================================

impl<T: Payload, E: Payload> Outcome<T, E> {
    fn extract<A, F>(self, settle: F) -> Extract<A>
    where
        A: Send + 'static,
        F: FnOnce(Result<T, E>) -> A + Send + 'static,
    {
        match self.repr {
            Repr::Settled(result) => Extract::Ready(settle(result)),
            Repr::Pending(pending) => Extract::Deferred(pending.map(settle).boxed()),
        }
    }

    /// Returns the success value.
    ///
    /// # Panics
    ///
    /// Panics with an [`UnwrappedOkWithErr`] payload carrying the original
    /// error if the outcome is `Err`. For a deferred outcome the panic is
    /// raised when the returned handle is awaited.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hybrid_result::outcome::Outcome;
    ///
    /// assert_eq!(Outcome::<i32, String>::ok(7).unwrap().now(), Some(7));
    /// ```
    pub fn unwrap(self) -> Extract<T> {
        self.extract(|result| match result {
            Ok(value) => value,
            Err(error) => panic_any(UnwrappedOkWithErr::new(error)),
        })
    }

    /// Returns the error value.
    ///
    /// # Panics
    ///
    /// Panics with an [`UnwrappedErrWithOk`] payload carrying the success
    /// value if the outcome is `Ok`.
    pub fn unwrap_err(self) -> Extract<E> {
        self.extract(|result| match result {
            Ok(value) => panic_any(UnwrappedErrWithOk::new(value)),
            Err(error) => error,
        })
    }

    /// Returns the success value, or the misuse error instead of panicking.
    pub fn try_unwrap(self) -> Extract<Result<T, UnwrappedOkWithErr<E>>> {
        self.extract(|result| result.map_err(UnwrappedOkWithErr::new))
    }

    /// Returns the error value, or the misuse error instead of panicking.
    pub fn try_unwrap_err(self) -> Extract<Result<E, UnwrappedErrWithOk<T>>> {
        self.extract(|result| match result {
            Ok(value) => Err(UnwrappedErrWithOk::new(value)),
            Err(error) => Ok(error),
        })
    }

    /// Returns the success value or `default`.
    pub fn unwrap_or(self, default: T) -> Extract<T> {
        self.extract(move |result| result.unwrap_or(default))
    }

    /// Returns the success value or computes one from the error.
    pub fn unwrap_or_else<F>(self, function: F) -> Extract<T>
    where
        F: FnOnce(E) -> T + Send + 'static,
    {
        self.extract(move |result| result.unwrap_or_else(function))
    }

    /// Returns the success value, or `None`. Never panics.
    pub fn safe_unwrap(self) -> Extract<Option<T>> {
        self.extract(Result::ok)
    }

    /// Collapses both tracks into one value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hybrid_result::outcome::Outcome;
    ///
    /// let message = Outcome::<i32, String>::err("boom".into())
    ///     .fold(|value| format!("got {value}"), |error| format!("failed: {error}"));
    /// assert_eq!(message.now().as_deref(), Some("failed: boom"));
    /// ```
    pub fn fold<A, OnOk, OnErr>(self, on_ok: OnOk, on_err: OnErr) -> Extract<A>
    where
        A: Send + 'static,
        OnOk: FnOnce(T) -> A + Send + 'static,
        OnErr: FnOnce(E) -> A + Send + 'static,
    {
        self.extract(move |result| match result {
            Ok(value) => on_ok(value),
            Err(error) => on_err(error),
        })
    }

    /// Discards the error: `Ok(v)` becomes `Some(v)`, `Err` becomes `None`.
    pub fn to_option(self) -> Extract<Option<T>> {
        self.extract(Result::ok)
    }
}
