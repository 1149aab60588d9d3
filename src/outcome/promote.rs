//! Promotion from immediate to deferred.
//!
//! Every combinator is built on two primitives defined here:
//!
//! - `chain` continues from the settled `Result` (used by the combinators
//!   that look at the error track)
//! - `bind` continues from the `Ok` value and short-circuits on `Err`
//!
//! An immediate receiver runs its continuation in place, and the result is
//! immediate unless the continuation hands back a deferred outcome. A
//! deferred receiver always wraps the continuation in a new [`Pending`], so
//! once a chain is deferred every later step stays deferred.

use super::pending::Pending;
use super::slot::ErrorSlot;
use super::{Outcome, Payload, Repr};

/// Whether an outcome is available now or still in flight.
///
/// # Examples
///
/// ```rust
/// use hybrid_result::outcome::{Mode, Outcome};
///
/// let immediate = Outcome::<i32, String>::ok(1);
/// assert_eq!(immediate.mode(), Mode::Immediate);
///
/// let deferred = immediate.map_async(|x| async move { x + 1 });
/// assert_eq!(deferred.mode(), Mode::Deferred);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// The result is known at construction time.
    Immediate,
    /// The result is produced by a pending computation.
    Deferred,
}

impl Mode {
    /// The mode of a step whose inputs have modes `self` and `other`.
    ///
    /// Deferred wins; there is no way back to immediate.
    #[must_use]
    pub const fn join(self, other: Self) -> Self {
        match (self, other) {
            (Self::Immediate, Self::Immediate) => Self::Immediate,
            _ => Self::Deferred,
        }
    }
}

/// Conversion into an [`Outcome`].
///
/// This is the one interface behind which the immediate and deferred forms
/// meet. Every mapper that returns "a result" may return anything that
/// implements it: an [`Outcome`] (immediate or deferred), a bare
/// [`Pending`] handle, or a standard [`Result`].
pub trait IntoOutcome {
    /// The success type.
    type Ok;
    /// The error type.
    type Err;

    /// Performs the conversion.
    fn into_outcome(self) -> Outcome<Self::Ok, Self::Err>;
}

impl<T, E> IntoOutcome for Outcome<T, E> {
    type Ok = T;
    type Err = E;

    #[inline]
    fn into_outcome(self) -> Self {
        self
    }
}

impl<T, E> IntoOutcome for Result<T, E> {
    type Ok = T;
    type Err = E;

    #[inline]
    fn into_outcome(self) -> Outcome<T, E> {
        Outcome::from_result(self)
    }
}

impl<T, E> IntoOutcome for Pending<T, E> {
    type Ok = T;
    type Err = E;

    #[inline]
    fn into_outcome(self) -> Outcome<T, E> {
        Outcome::from_pending(self)
    }
}

impl<T: Payload, E: Payload> Outcome<T, E> {
    /// Continues from the settled result.
    ///
    /// The derived outcome gets a fresh, empty error slot: the continuation
    /// may turn an error into a success, so the parent's error says nothing
    /// about the child.
    pub(crate) fn chain<R, F>(self, continuation: F) -> Outcome<R::Ok, R::Err>
    where
        F: FnOnce(Result<T, E>) -> R + Send + 'static,
        R: IntoOutcome,
        R::Ok: Payload,
        R::Err: Payload,
    {
        match self.repr {
            Repr::Settled(result) => continuation(result).into_outcome(),
            Repr::Pending(pending) => Outcome::from_pending(Pending::new(async move {
                continuation(pending.await).into_outcome().await
            })),
        }
    }

    /// Like [`chain`](Self::chain), for continuations whose error is known
    /// from the parent's error alone.
    ///
    /// When the parent's error is already in its slot, `seed` turns it into
    /// the child's error and the child's slot starts filled with it. `seed`
    /// must agree with what `continuation` produces for that error.
    pub(crate) fn chain_seeded<R, F, S>(self, continuation: F, seed: S) -> Outcome<R::Ok, R::Err>
    where
        F: FnOnce(Result<T, E>) -> R + Send + 'static,
        S: FnOnce(&E) -> R::Err,
        R: IntoOutcome,
        R::Ok: Payload,
        R::Err: Payload,
    {
        match self.repr {
            Repr::Settled(result) => continuation(result).into_outcome(),
            Repr::Pending(pending) => {
                let slot = pending
                    .error_slot()
                    .get()
                    .map_or_else(ErrorSlot::new, |error| ErrorSlot::filled(seed(error)));
                Outcome::from_pending(Pending::with_slot(
                    async move { continuation(pending.await).into_outcome().await },
                    slot,
                ))
            }
        }
    }

    /// Continues from the `Ok` value, passing an `Err` through untouched.
    ///
    /// The derived outcome gets its own error slot, seeded with the parent's
    /// error when that is already known.
    pub(crate) fn bind<R, F>(self, continuation: F) -> Outcome<R::Ok, R::Err>
    where
        F: FnOnce(T) -> R + Send + 'static,
        R: IntoOutcome,
        R::Ok: Payload,
        R::Err: Payload,
        E: Into<R::Err>,
    {
        match self.repr {
            Repr::Settled(Ok(value)) => continuation(value).into_outcome(),
            Repr::Settled(Err(error)) => Outcome::err(error.into()),
            Repr::Pending(pending) => {
                let slot = ErrorSlot::seeded(pending.error_slot());
                Outcome::from_pending(Pending::with_slot(
                    async move {
                        match pending.await {
                            Ok(value) => continuation(value).into_outcome().await,
                            Err(error) => Err(error.into()),
                        }
                    },
                    slot,
                ))
            }
        }
    }
}
