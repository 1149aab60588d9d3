//! The unified synchronous/asynchronous result.
//!
//! An [`Outcome<T, E>`] is `Ok` or `Err`, and its answer is either known now
//! (immediate) or produced by a pending computation (deferred). The two
//! forms share one type and one set of combinators:
//!
//! - An outcome built from plain values is immediate, and stays immediate
//!   through any number of synchronous steps.
//! - The first step that involves a future promotes it to deferred. From
//!   there on, every step is deferred too.
//! - Extraction follows the same rule: [`Outcome::unwrap`] and friends return
//!   an [`Extract`], which is ready for an immediate outcome and a handle to
//!   await for a deferred one.
//!
//! # Examples
//!
//! ```rust
//! use hybrid_result::outcome::{Mode, Outcome};
//!
//! let parsed: Outcome<i32, String> = "21"
//!     .parse::<i32>()
//!     .map_err(|error| error.to_string())
//!     .into();
//!
//! let doubled = parsed.map(|x| x * 2);
//! assert_eq!(doubled.mode(), Mode::Immediate);
//! assert_eq!(doubled.to_string(), "Ok<42>");
//!
//! let fetched = doubled.flat_map(|x| Outcome::ok_later(async move { x + 1 }));
//! assert_eq!(fetched.mode(), Mode::Deferred);
//! assert_eq!(fetched.to_string(), "Pending");
//! assert_eq!(futures::executor::block_on(fetched.into_future()), Ok(43));
//! ```
//!
//! # Branch isolation
//!
//! Cloning an outcome gives another handle to the same value. Applying a
//! combinator derives a new value with its own error slot, so two chains
//! grown from the same parent never observe each other's failures:
//!
//! ```rust
//! use hybrid_result::outcome::Outcome;
//!
//! let parent = Outcome::<i32, String>::ok(2);
//! let failing = parent.clone().flat_zip(|_| Outcome::<i32, String>::err("no".into()));
//! let passing = parent.clone().flat_zip(|x| Outcome::<i32, String>::ok(x * 10));
//!
//! assert!(failing.is_err());
//! assert_eq!(passing.as_settled(), Some(&Ok((2, 20))));
//! assert_eq!(parent.as_settled(), Some(&Ok(2)));
//! ```

mod catch;
mod combinators;
mod error;
mod extract;
mod pending;
mod promote;
mod slot;

use std::fmt;
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::task::{Context, Poll};

use pin_project_lite::pin_project;

pub use error::{CaughtPanic, UnwrappedErrWithOk, UnwrappedOkWithErr};
pub use extract::Extract;
pub use pending::Pending;
pub use promote::{IntoOutcome, Mode};
pub use slot::ErrorSlot;

/// Values that can travel through a deferred outcome.
///
/// A deferred computation is shared between every handle and branch that
/// observes it, so its output must be clonable and thread-safe. The trait is
/// implemented for every type that qualifies.
pub trait Payload: Clone + Send + Sync + 'static {}

impl<A: Clone + Send + Sync + 'static> Payload for A {}

// =============================================================================
// Outcome Definition
// =============================================================================

/// A success (`Ok`) or failure (`Err`) that may not be known yet.
///
/// See the [module documentation](self) for an overview.
///
/// # Type Parameters
///
/// * `T` - The success type
/// * `E` - The error type
#[must_use = "this `Outcome` may be an `Err` variant, which should be handled"]
pub struct Outcome<T, E> {
    repr: Repr<T, E>,
}

/// Internal representation: an explicit variant for "not known yet".
pub(crate) enum Repr<T, E> {
    Settled(Result<T, E>),
    Pending(Pending<T, E>),
}

// =============================================================================
// Constructors
// =============================================================================

impl<T, E> Outcome<T, E> {
    /// Creates an immediate success.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hybrid_result::outcome::Outcome;
    ///
    /// let outcome = Outcome::<i32, String>::ok(42);
    /// assert!(outcome.is_ok());
    /// ```
    #[inline]
    pub const fn ok(value: T) -> Self {
        Self::from_result(Ok(value))
    }

    /// Creates an immediate failure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hybrid_result::outcome::Outcome;
    ///
    /// let outcome = Outcome::<i32, &str>::err("boom");
    /// assert!(outcome.is_err());
    /// ```
    #[inline]
    pub const fn err(error: E) -> Self {
        Self::from_result(Err(error))
    }

    /// Creates an immediate outcome from a standard `Result`.
    #[inline]
    pub const fn from_result(result: Result<T, E>) -> Self {
        Self {
            repr: Repr::Settled(result),
        }
    }

    /// Creates a deferred outcome from a pending handle.
    #[inline]
    pub const fn from_pending(pending: Pending<T, E>) -> Self {
        Self {
            repr: Repr::Pending(pending),
        }
    }

    /// `Ok(value)` when present, `Err(error)` otherwise.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hybrid_result::outcome::Outcome;
    ///
    /// assert!(Outcome::from_nullable(Some(1), "missing").is_ok());
    /// assert!(Outcome::<i32, _>::from_nullable(None, "missing").is_err());
    /// ```
    pub fn from_nullable(value: Option<T>, error: E) -> Self {
        Self::from_result(value.ok_or(error))
    }

    /// `Ok(value)` when `predicate` holds for it, `Err(error)` otherwise.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hybrid_result::outcome::Outcome;
    ///
    /// let even = Outcome::from_predicate(4, |x| x % 2 == 0, "odd");
    /// assert!(even.is_ok());
    ///
    /// let odd = Outcome::from_predicate(3, |x| x % 2 == 0, "odd");
    /// assert!(odd.is_err());
    /// ```
    pub fn from_predicate<P>(value: T, predicate: P, error: E) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        if predicate(&value) {
            Self::ok(value)
        } else {
            Self::err(error)
        }
    }
}

impl<T: Payload, E: Payload> Outcome<T, E> {
    /// Creates a provisional success whose value is produced by `future`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hybrid_result::outcome::Outcome;
    ///
    /// let outcome = Outcome::<i32, String>::ok_later(async { 42 });
    /// assert!(!outcome.is_settled());
    /// assert_eq!(futures::executor::block_on(outcome.into_future()), Ok(42));
    /// ```
    pub fn ok_later<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self::from_pending(Pending::new(async move { Ok(future.await) }))
    }

    /// Turns a pending computation of a result into a deferred outcome.
    ///
    /// The future may produce anything that converts into an outcome,
    /// including another deferred outcome; the nesting is flattened.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hybrid_result::outcome::Outcome;
    ///
    /// let nested = Outcome::from_future(async {
    ///     Outcome::<i32, String>::ok_later(async { 7 })
    /// });
    /// assert_eq!(futures::executor::block_on(nested.into_future()), Ok(7));
    /// ```
    pub fn from_future<F>(future: F) -> Self
    where
        F: Future + Send + 'static,
        F::Output: IntoOutcome<Ok = T, Err = E>,
    {
        Self::from_pending(Pending::new(async move {
            future.await.into_outcome().await
        }))
    }

    /// Waits for the outcome to settle and returns it in immediate form.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hybrid_result::outcome::{Mode, Outcome};
    ///
    /// let deferred = Outcome::<i32, String>::ok_later(async { 1 });
    /// let settled = futures::executor::block_on(deferred.settle());
    /// assert_eq!(settled.mode(), Mode::Immediate);
    /// ```
    pub async fn settle(self) -> Self {
        Self::from_result(self.await)
    }
}

// =============================================================================
// Inspection
// =============================================================================

impl<T, E> Outcome<T, E> {
    /// The current state, without driving anything.
    ///
    /// `None` while a deferred computation is still in flight.
    pub fn current(&self) -> Option<Result<&T, &E>> {
        match &self.repr {
            Repr::Settled(result) => Some(result.as_ref()),
            Repr::Pending(pending) => pending.current(),
        }
    }

    /// Returns `true` if the outcome is known to be `Ok`.
    ///
    /// A deferred outcome is only `Ok` once its computation has settled
    /// successfully.
    pub fn is_ok(&self) -> bool {
        matches!(self.current(), Some(Ok(_)))
    }

    /// Returns `true` if the outcome is known to be `Err`.
    ///
    /// A deferred outcome becomes `Err` as soon as its error slot is filled.
    pub fn is_err(&self) -> bool {
        matches!(self.current(), Some(Err(_)))
    }

    /// Returns `true` if the answer is known, whatever the mode.
    pub fn is_settled(&self) -> bool {
        self.current().is_some()
    }

    /// Whether the outcome is immediate or deferred.
    pub const fn mode(&self) -> Mode {
        match self.repr {
            Repr::Settled(_) => Mode::Immediate,
            Repr::Pending(_) => Mode::Deferred,
        }
    }

    /// Borrows the result of an immediate outcome.
    pub const fn as_settled(&self) -> Option<&Result<T, E>> {
        match &self.repr {
            Repr::Settled(result) => Some(result),
            Repr::Pending(_) => None,
        }
    }

    /// Takes the result of an immediate outcome, or hands back the pending
    /// handle of a deferred one.
    ///
    /// # Errors
    ///
    /// Returns the [`Pending`] handle when the outcome is deferred.
    pub fn into_settled(self) -> Result<Result<T, E>, Pending<T, E>> {
        match self.repr {
            Repr::Settled(result) => Ok(result),
            Repr::Pending(pending) => Err(pending),
        }
    }

    /// The error slot of a deferred outcome.
    pub const fn error_slot(&self) -> Option<&ErrorSlot<E>> {
        match &self.repr {
            Repr::Settled(_) => None,
            Repr::Pending(pending) => Some(pending.error_slot()),
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<T: Clone, E: Clone> Clone for Outcome<T, E> {
    fn clone(&self) -> Self {
        match &self.repr {
            Repr::Settled(result) => Self::from_result(result.clone()),
            Repr::Pending(pending) => Self::from_pending(pending.clone()),
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        Self::from_result(result)
    }
}

impl<T, E> From<Pending<T, E>> for Outcome<T, E> {
    fn from(pending: Pending<T, E>) -> Self {
        Self::from_pending(pending)
    }
}

/// Compares the current states.
///
/// Two outcomes are equal when both are settled to equal results. An
/// outcome that is still in flight equals nothing, not even itself.
impl<T: PartialEq, E: PartialEq> PartialEq for Outcome<T, E> {
    fn eq(&self, other: &Self) -> bool {
        match (self.current(), other.current()) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        }
    }
}

impl<T: fmt::Display, E: fmt::Display> fmt::Display for Outcome<T, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.current() {
            Some(Ok(value)) => write!(formatter, "Ok<{value}>"),
            Some(Err(error)) => write!(formatter, "Err<{error}>"),
            None => formatter.write_str("Pending"),
        }
    }
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Debug for Outcome<T, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.current() {
            Some(Ok(value)) => formatter.debug_tuple("Ok").field(value).finish(),
            Some(Err(error)) => formatter.debug_tuple("Err").field(error).finish(),
            None => formatter.write_str("Pending"),
        }
    }
}

// =============================================================================
// Awaiting
// =============================================================================

impl<T: Payload, E: Payload> IntoFuture for Outcome<T, E> {
    type Output = Result<T, E>;
    type IntoFuture = Settle<T, E>;

    /// Forces full settlement.
    ///
    /// An immediate outcome is ready on the first poll.
    fn into_future(self) -> Self::IntoFuture {
        let state = match self.repr {
            Repr::Settled(result) => SettleState::Ready {
                result: Some(result),
            },
            Repr::Pending(pending) => SettleState::Waiting { pending },
        };
        Settle { state }
    }
}

pin_project! {
    /// Future returned by awaiting an [`Outcome`].
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct Settle<T, E> {
        #[pin]
        state: SettleState<T, E>,
    }
}

pin_project! {
    #[project = SettleStateProj]
    enum SettleState<T, E> {
        Ready {
            result: Option<Result<T, E>>,
        },
        Waiting {
            #[pin]
            pending: Pending<T, E>,
        },
        Completed,
    }
}

impl<T: Clone, E: Clone> Future for Settle<T, E> {
    type Output = Result<T, E>;

    fn poll(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        match this.state.as_mut().project() {
            SettleStateProj::Ready { result } => {
                // INVARIANT: Ready is polled once before transitioning to Completed
                let result = result.take().expect(
                    "Settle internal error: result was already taken. \
                     This indicates the future was polled after completion.",
                );
                this.state.set(SettleState::Completed);
                Poll::Ready(result)
            }
            SettleStateProj::Waiting { pending } => match pending.poll(context) {
                Poll::Ready(result) => {
                    this.state.set(SettleState::Completed);
                    Poll::Ready(result)
                }
                Poll::Pending => Poll::Pending,
            },
            SettleStateProj::Completed => {
                panic!(
                    "Settle internal error: polled after completion. \
                     Futures should not be polled after returning Poll::Ready."
                );
            }
        }
    }
}
