//! The deferred half of an outcome.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};

use super::slot::ErrorSlot;
use super::Payload;

/// A handle to a computation that will eventually produce `Result<T, E>`.
///
/// The computation is shared: every clone of a `Pending` observes the same
/// settled result, and driving any clone drives them all. Each `Pending`
/// owns an [`ErrorSlot`] that is filled the moment its own computation
/// settles with an error.
///
/// `Pending` is itself a [`Future`]; awaiting it yields the settled result.
pub struct Pending<T, E> {
    future: Shared<BoxFuture<'static, Result<T, E>>>,
    slot: ErrorSlot<E>,
}

impl<T: Payload, E: Payload> Pending<T, E> {
    /// Wraps a future in a fresh deferred handle with an empty error slot.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hybrid_result::outcome::Pending;
    ///
    /// let pending: Pending<i32, String> = Pending::new(async { Ok(42) });
    /// assert_eq!(futures::executor::block_on(pending), Ok(42));
    /// ```
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self::with_slot(future, ErrorSlot::new())
    }

    pub(crate) fn with_slot<F>(future: F, slot: ErrorSlot<E>) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        let writer = slot.clone();
        let future = async move {
            let result = future.await;
            if let Err(error) = &result {
                writer.fill(error.clone());
            }
            result
        }
        .boxed()
        .shared();
        Self { future, slot }
    }
}

impl<T, E> Pending<T, E> {
    /// Returns the current state without driving the computation.
    ///
    /// `None` while the computation is still in flight. A filled error slot
    /// takes precedence over anything else.
    pub fn current(&self) -> Option<Result<&T, &E>> {
        if let Some(error) = self.slot.get() {
            return Some(Err(error));
        }
        self.future.peek().map(Result::as_ref)
    }

    /// Returns `true` once the computation is known to have succeeded.
    pub fn is_ok(&self) -> bool {
        matches!(self.current(), Some(Ok(_)))
    }

    /// Returns `true` once the computation is known to have failed.
    pub fn is_err(&self) -> bool {
        matches!(self.current(), Some(Err(_)))
    }

    /// Returns `true` once the computation has settled either way.
    pub fn is_settled(&self) -> bool {
        self.current().is_some()
    }

    /// The error slot owned by this handle.
    pub const fn error_slot(&self) -> &ErrorSlot<E> {
        &self.slot
    }
}

impl<T, E> Clone for Pending<T, E> {
    fn clone(&self) -> Self {
        Self {
            future: self.future.clone(),
            slot: self.slot.clone(),
        }
    }
}

impl<T: Clone, E: Clone> Future for Pending<T, E> {
    type Output = Result<T, E>;

    fn poll(mut self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Self::Output> {
        self.future.poll_unpin(context)
    }
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Debug for Pending<T, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Pending")
            .field("current", &self.current())
            .finish()
    }
}
