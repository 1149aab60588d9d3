//! Constructors that turn panics into errors.
//!
//! A panic raised by the wrapped function is caught where it happens and
//! becomes an ordinary `Err`, so callers handle a "function that raised" and a
//! "function that returned an error" the same way.

use std::any::Any;
use std::future::Future;
use std::panic::{AssertUnwindSafe, catch_unwind};

use futures::FutureExt;

use super::error::CaughtPanic;
use super::pending::Pending;
use super::{Outcome, Payload};

fn convert_panic(payload: &(dyn Any + Send)) -> CaughtPanic {
    let caught = CaughtPanic::from_payload(payload);
    tracing::warn!(message = caught.message(), "converted panic into an error");
    caught
}

impl<T: Payload> Outcome<T, CaughtPanic> {
    /// Runs `function`, turning a panic into `Err(CaughtPanic)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hybrid_result::outcome::Outcome;
    ///
    /// let fine = Outcome::try_catch(|| 1 + 1);
    /// assert_eq!(fine.as_settled(), Some(&Ok(2)));
    ///
    /// let broken = Outcome::<i32, _>::try_catch(|| panic!("no luck"));
    /// assert_eq!(broken.unwrap_err().now().map(|caught| caught.to_string()),
    ///            Some("panicked: no luck".to_string()));
    /// ```
    pub fn try_catch<F>(function: F) -> Self
    where
        F: FnOnce() -> T,
    {
        Self::try_catch_with(function, std::convert::identity)
    }

    /// Runs a future-producing `function`, turning a panic into
    /// `Err(CaughtPanic)`.
    ///
    /// Panics raised while building the future and while polling it are
    /// both caught. The result is always deferred.
    pub fn try_async_catch<F, Fut>(function: F) -> Self
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T> + Send + 'static,
    {
        Self::try_async_catch_with(function, std::convert::identity)
    }
}

impl<T, E> Outcome<T, E> {
    /// Runs `function`, turning a panic into an error built by `mapper`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hybrid_result::outcome::Outcome;
    ///
    /// let parsed = Outcome::try_catch_with(
    ///     || "x".parse::<i32>().expect("not a number"),
    ///     |caught| format!("parse step failed ({})", caught.message()),
    /// );
    /// assert!(parsed.is_err());
    /// ```
    pub fn try_catch_with<F, M>(function: F, mapper: M) -> Self
    where
        F: FnOnce() -> T,
        M: FnOnce(CaughtPanic) -> E,
    {
        match catch_unwind(AssertUnwindSafe(function)) {
            Ok(value) => Self::ok(value),
            Err(payload) => Self::err(mapper(convert_panic(payload.as_ref()))),
        }
    }
}

impl<T: Payload, E: Payload> Outcome<T, E> {
    /// Asynchronous version of [`try_catch_with`](Self::try_catch_with).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hybrid_result::outcome::Outcome;
    ///
    /// let outcome = Outcome::<i32, String>::try_async_catch_with(
    ///     || async { panic!("lost connection") },
    ///     |caught| caught.message().to_string(),
    /// );
    /// let settled = futures::executor::block_on(outcome.into_future());
    /// assert_eq!(settled, Err("lost connection".to_string()));
    /// ```
    pub fn try_async_catch_with<F, Fut, M>(function: F, mapper: M) -> Self
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T> + Send + 'static,
        M: FnOnce(CaughtPanic) -> E + Send + 'static,
    {
        let future = match catch_unwind(AssertUnwindSafe(function)) {
            Ok(future) => future,
            Err(payload) => {
                let error = mapper(convert_panic(payload.as_ref()));
                return Self::from_pending(Pending::new(futures::future::ready(Err(error))));
            }
        };
        Self::from_pending(Pending::new(async move {
            AssertUnwindSafe(future)
                .catch_unwind()
                .await
                .map_err(|payload| mapper(convert_panic(payload.as_ref())))
        }))
    }
}
