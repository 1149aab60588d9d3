//! The combinator algebra.
//!
//! Every combinator has the same short-circuit contract: on an `Err`
//! receiver the supplied function is never called and the error passes
//! through unchanged. The exceptions are the combinators that look at the
//! error itself (`map_err`, `map_both`, `tap_err`, `or_else`, `flip`).
//!
//! Each combinator behaves the same whether the receiver is immediate or
//! deferred. The output is immediate only when the receiver is immediate and
//! the function hands back an immediate value.
//!
//! A function signals failure by returning an `Err`. A panic inside it is
//! not converted: it unwinds out of the combinator call for an immediate
//! receiver, and out of the poll for a deferred one. Functions that may
//! panic go through [`Outcome::try_map`] or
//! [`Outcome::try_catch_with`] instead.

use std::future::Future;

use super::error::CaughtPanic;
use super::promote::IntoOutcome;
use super::{Outcome, Payload};

// =============================================================================
// Mapping
// =============================================================================

impl<T: Payload, E: Payload> Outcome<T, E> {
    /// Transforms the success value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hybrid_result::outcome::Outcome;
    ///
    /// let outcome = Outcome::<i32, String>::ok(20).map(|x| x + 1);
    /// assert_eq!(outcome.as_settled(), Some(&Ok(21)));
    ///
    /// let failed = Outcome::<i32, String>::err("boom".into()).map(|x| x + 1);
    /// assert_eq!(failed.as_settled(), Some(&Err("boom".to_string())));
    /// ```
    ///
    /// # Panics
    ///
    /// A panic in `function` is not caught. Use [`try_map`](Self::try_map)
    /// to turn it into an error.
    pub fn map<U, F>(self, function: F) -> Outcome<U, E>
    where
        U: Payload,
        F: FnOnce(T) -> U + Send + 'static,
    {
        self.bind(move |value| Outcome::<U, E>::ok(function(value)))
    }

    /// Transforms the success value with an asynchronous function.
    ///
    /// The result is deferred unless the receiver is an immediate `Err`, in
    /// which case the function is never called.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hybrid_result::outcome::{Mode, Outcome};
    ///
    /// let outcome = Outcome::<i32, String>::ok(1).map_async(|x| async move { x * 10 });
    /// assert_eq!(outcome.mode(), Mode::Deferred);
    /// assert_eq!(futures::executor::block_on(outcome.into_future()), Ok(10));
    /// ```
    pub fn map_async<U, F, Fut>(self, function: F) -> Outcome<U, E>
    where
        U: Payload,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = U> + Send + 'static,
    {
        self.bind(move |value| Outcome::<U, E>::ok_later(function(value)))
    }

    /// Transforms the error, leaving a success untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hybrid_result::outcome::Outcome;
    ///
    /// let outcome = Outcome::<i32, &str>::err("boom").map_err(str::len);
    /// assert_eq!(outcome.as_settled(), Some(&Err(4)));
    /// ```
    pub fn map_err<E2, F>(self, function: F) -> Outcome<T, E2>
    where
        E2: Payload,
        F: FnOnce(E) -> E2 + Send + 'static,
    {
        self.chain(move |result| result.map_err(function))
    }

    /// Applies exactly one of the two functions, depending on the state.
    pub fn map_both<U, E2, OnOk, OnErr>(self, on_ok: OnOk, on_err: OnErr) -> Outcome<U, E2>
    where
        U: Payload,
        E2: Payload,
        OnOk: FnOnce(T) -> U + Send + 'static,
        OnErr: FnOnce(E) -> E2 + Send + 'static,
    {
        self.chain(move |result| result.map(on_ok).map_err(on_err))
    }

    /// Converts the error into a wider error type.
    ///
    /// This is how two pipelines with different error types are joined:
    /// widen both to a common enum, then bind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hybrid_result::outcome::Outcome;
    ///
    /// #[derive(Debug, Clone, PartialEq)]
    /// enum AppError {
    ///     Parse(String),
    /// }
    ///
    /// impl From<String> for AppError {
    ///     fn from(message: String) -> Self {
    ///         Self::Parse(message)
    ///     }
    /// }
    ///
    /// let outcome = Outcome::<i32, String>::err("bad".into()).err_into::<AppError>();
    /// assert_eq!(outcome.as_settled(), Some(&Err(AppError::Parse("bad".into()))));
    /// ```
    pub fn err_into<E2>(self) -> Outcome<T, E2>
    where
        E2: Payload,
        E: Into<E2>,
    {
        self.map_err(Into::into)
    }
}

// =============================================================================
// Binding
// =============================================================================

impl<T: Payload, E: Payload> Outcome<T, E> {
    /// Continues with a function that returns another outcome, flattening
    /// one level.
    ///
    /// The function may return an immediate or deferred [`Outcome`], a bare
    /// [`Pending`](super::Pending), or a plain `Result`. Whatever the shape,
    /// the output is a single outcome, immediate only if both the receiver
    /// and the returned value are.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hybrid_result::outcome::Outcome;
    ///
    /// fn half(x: i32) -> Result<i32, String> {
    ///     if x % 2 == 0 { Ok(x / 2) } else { Err(format!("{x} is odd")) }
    /// }
    ///
    /// let outcome = Outcome::<i32, String>::ok(8).flat_map(half).flat_map(half);
    /// assert_eq!(outcome.as_settled(), Some(&Ok(2)));
    ///
    /// let odd = Outcome::<i32, String>::ok(6).flat_map(half).flat_map(half);
    /// assert_eq!(odd.as_settled(), Some(&Err("3 is odd".to_string())));
    /// ```
    ///
    /// # Panics
    ///
    /// A panic in `function` is not caught. Wrap the body in
    /// [`Outcome::try_catch_with`] to turn it into an error.
    pub fn flat_map<R, F>(self, function: F) -> Outcome<R::Ok, E>
    where
        F: FnOnce(T) -> R + Send + 'static,
        R: IntoOutcome<Err = E>,
        R::Ok: Payload,
    {
        self.bind(function)
    }

    /// Alias of [`flat_map`](Self::flat_map).
    pub fn and_then<R, F>(self, function: F) -> Outcome<R::Ok, E>
    where
        F: FnOnce(T) -> R + Send + 'static,
        R: IntoOutcome<Err = E>,
        R::Ok: Payload,
    {
        self.bind(function)
    }

    /// Replaces an error with whatever `function` produces from it.
    ///
    /// A success passes through. The replacement may carry a different
    /// error type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hybrid_result::outcome::Outcome;
    ///
    /// let recovered = Outcome::<i32, String>::err("boom".into())
    ///     .or_else(|error| Ok::<i32, usize>(error.len() as i32));
    /// assert_eq!(recovered.as_settled(), Some(&Ok(4)));
    /// ```
    pub fn or_else<R, F>(self, function: F) -> Outcome<T, R::Err>
    where
        F: FnOnce(E) -> R + Send + 'static,
        R: IntoOutcome<Ok = T>,
        R::Err: Payload,
    {
        self.chain(move |result| match result {
            Ok(value) => Outcome::ok(value),
            Err(error) => function(error).into_outcome(),
        })
    }
}

// =============================================================================
// Zipping
// =============================================================================

impl<T: Payload, E: Payload> Outcome<T, E> {
    /// Pairs the success value with a value derived from it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hybrid_result::outcome::Outcome;
    ///
    /// let outcome = Outcome::<i32, String>::ok(2).zip(|x| x * 2);
    /// assert_eq!(outcome.as_settled(), Some(&Ok((2, 4))));
    /// ```
    pub fn zip<U, F>(self, function: F) -> Outcome<(T, U), E>
    where
        U: Payload,
        F: FnOnce(&T) -> U + Send + 'static,
    {
        self.bind(move |value| {
            let derived = function(&value);
            Outcome::<(T, U), E>::ok((value, derived))
        })
    }

    /// Pairs the success value with a value derived from it asynchronously.
    pub fn zip_async<U, F, Fut>(self, function: F) -> Outcome<(T, U), E>
    where
        U: Payload,
        F: FnOnce(&T) -> Fut + Send + 'static,
        Fut: Future<Output = U> + Send + 'static,
    {
        self.bind(move |value| {
            let derived = function(&value);
            Outcome::<(T, U), E>::ok_later(async move { (value, derived.await) })
        })
    }

    /// Pairs the success value with the success of a derived outcome.
    ///
    /// If the derived outcome fails, so does the pair.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hybrid_result::outcome::Outcome;
    ///
    /// let paired = Outcome::<i32, String>::ok(3).flat_zip(|x| Ok::<i32, String>(x + 1));
    /// assert_eq!(paired.as_settled(), Some(&Ok((3, 4))));
    ///
    /// let failed = Outcome::<i32, String>::ok(3).flat_zip(|_| Err::<i32, String>("no".into()));
    /// assert!(failed.is_err());
    /// ```
    pub fn flat_zip<R, F>(self, function: F) -> Outcome<(T, R::Ok), E>
    where
        F: FnOnce(&T) -> R + Send + 'static,
        R: IntoOutcome<Err = E>,
        R::Ok: Payload,
    {
        self.bind(move |value| {
            let derived = function(&value).into_outcome();
            derived.map(move |derived| (value, derived))
        })
    }

    /// Runs a check on the success value and keeps the value if it passes.
    ///
    /// Only the error of the derived outcome matters; its success value is
    /// discarded.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hybrid_result::outcome::Outcome;
    ///
    /// let positive = |x: &i32| {
    ///     if *x > 0 { Ok(()) } else { Err("not positive".to_string()) }
    /// };
    ///
    /// assert_eq!(Outcome::ok(5).zip_err(positive).as_settled(), Some(&Ok(5)));
    /// assert!(Outcome::ok(-5).zip_err(positive).is_err());
    /// ```
    pub fn zip_err<R, F>(self, function: F) -> Self
    where
        F: FnOnce(&T) -> R + Send + 'static,
        R: IntoOutcome<Err = E>,
        R::Ok: Payload,
    {
        self.bind(move |value| function(&value).into_outcome().map(move |_| value))
    }
}

// =============================================================================
// Inspection and conversion
// =============================================================================

impl<T: Payload, E: Payload> Outcome<T, E> {
    /// Calls `function` with the success value and passes the outcome on.
    pub fn tap<F>(self, function: F) -> Self
    where
        F: FnOnce(&T) + Send + 'static,
    {
        self.bind(move |value| {
            function(&value);
            Self::ok(value)
        })
    }

    /// Calls `function` with the error and passes the outcome on.
    ///
    /// A deferred receiver whose error is already known hands that error
    /// straight to the derived outcome, which reports `Err` before it is
    /// polled.
    pub fn tap_err<F>(self, function: F) -> Self
    where
        F: FnOnce(&E) + Send + 'static,
    {
        self.chain_seeded(
            move |result| {
                if let Err(error) = &result {
                    function(error);
                }
                result
            },
            E::clone,
        )
    }

    /// Swaps the two tracks.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hybrid_result::outcome::Outcome;
    ///
    /// let flipped = Outcome::<i32, String>::ok(1).flip();
    /// assert_eq!(flipped.as_settled(), Some(&Err(1)));
    /// ```
    pub fn flip(self) -> Outcome<E, T> {
        self.chain(|result| match result {
            Ok(value) => Err::<E, T>(value),
            Err(error) => Ok(error),
        })
    }

    /// Transforms the success value with a function that may panic.
    ///
    /// A panic is caught and turned into an error by `on_panic`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hybrid_result::outcome::Outcome;
    ///
    /// let divided = Outcome::<i32, String>::ok(0)
    ///     .try_map(|x| 10 / x, |caught| caught.message().to_string());
    /// assert!(divided.is_err());
    /// ```
    pub fn try_map<U, F, M>(self, function: F, on_panic: M) -> Outcome<U, E>
    where
        U: Payload,
        F: FnOnce(T) -> U + Send + 'static,
        M: FnOnce(CaughtPanic) -> E + Send + 'static,
    {
        self.bind(move |value| Outcome::<U, E>::try_catch_with(move || function(value), on_panic))
    }
}

impl<A: Payload, E: Payload> Outcome<Vec<A>, E> {
    /// Maps over every element of a vector payload.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hybrid_result::outcome::Outcome;
    ///
    /// let lengths = Outcome::<Vec<&str>, String>::ok(vec!["a", "bcd"]).inner_map(str::len);
    /// assert_eq!(lengths.as_settled(), Some(&Ok(vec![1, 3])));
    /// ```
    pub fn inner_map<B, F>(self, function: F) -> Outcome<Vec<B>, E>
    where
        B: Payload,
        F: FnMut(A) -> B + Send + 'static,
    {
        self.map(move |values| values.into_iter().map(function).collect())
    }
}
