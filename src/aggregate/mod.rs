//! Aggregation: combining many outcomes into one.
//!
//! Unlike [`flat_map`](crate::outcome::Outcome::flat_map), which stops at the
//! first failure, the functions here look at every input before deciding:
//!
//! - [`all`] succeeds with every value, or fails with every error.
//! - [`any`] succeeds with the first value in input order, or fails with
//!   every error.
//! - [`Outcome::validate`](crate::outcome::Outcome::validate) runs every
//!   check against one value and fails with every failing check's error.
//!
//! # Semantics
//!
//! ```text
//! all([r1, r2, ..., rn]):
//!   wait for every ri
//!   if every ri is Ok(vi): Ok([v1, ..., vn])
//!   else:                  Err([ei for every failing ri, in input order])
//!
//! any([r1, r2, ..., rn]):
//!   errors <- []
//!   for ri in order:
//!     wait for ri
//!     if ri is Ok(v): return Ok(v)
//!     errors.push(ri's error)
//!   return Err(errors)
//! ```
//!
//! The output is immediate when every input that had to be looked at is
//! immediate, and deferred otherwise.

mod validate;

pub use validate::Validator;

use std::future::IntoFuture;

use futures::future::join_all;

use crate::outcome::{IntoOutcome, Mode, Outcome, Payload, Pending};

// =============================================================================
// Traits
// =============================================================================

/// Collections of outcomes that can be combined with [`all`].
///
/// Implemented for `Vec<R>` and for tuples of up to eight elements. The
/// elements of a tuple may have different success types but must share the
/// error type.
pub trait AllOf {
    /// The combined success value.
    type Output: Payload;
    /// The shared error type.
    type Err: Payload;

    /// Combines the outcomes, collecting every error.
    fn all_of(self) -> Outcome<Self::Output, Vec<Self::Err>>;
}

/// Collections of outcomes that can be combined with [`any`].
///
/// Implemented for `Vec<R>` and for tuples of up to eight elements sharing
/// both the success and the error type.
pub trait AnyOf {
    /// The shared success type.
    type Ok: Payload;
    /// The shared error type.
    type Err: Payload;

    /// Returns the first success in input order, or every error.
    fn any_of(self) -> Outcome<Self::Ok, Vec<Self::Err>>;
}

/// Succeeds with every value, or fails with the error of every failing
/// input.
///
/// Deferred inputs are driven together, and every one of them is awaited
/// before deciding.
///
/// # Examples
///
/// ```rust
/// use hybrid_result::aggregate::all;
/// use hybrid_result::outcome::Outcome;
///
/// let both = all((Outcome::<i32, &str>::ok(1), Outcome::<&str, &str>::ok("two")));
/// assert_eq!(both.as_settled(), Some(&Ok((1, "two"))));
///
/// let failed = all(vec![
///     Outcome::<i32, &str>::ok(1),
///     Outcome::err("a"),
///     Outcome::err("b"),
/// ]);
/// assert_eq!(failed.as_settled(), Some(&Err(vec!["a", "b"])));
/// ```
pub fn all<I: AllOf>(inputs: I) -> Outcome<I::Output, Vec<I::Err>> {
    inputs.all_of()
}

/// Succeeds with the first success in input order, or fails with every
/// error.
///
/// Inputs after the first success are not awaited.
///
/// # Examples
///
/// ```rust
/// use hybrid_result::aggregate::any;
/// use hybrid_result::outcome::Outcome;
///
/// let first = any((
///     Outcome::<i32, &str>::err("a"),
///     Outcome::<i32, &str>::ok(2),
///     Outcome::<i32, &str>::ok(3),
/// ));
/// assert_eq!(first.as_settled(), Some(&Ok(2)));
///
/// let none = any(vec![Outcome::<i32, &str>::err("a"), Outcome::err("b")]);
/// assert_eq!(none.as_settled(), Some(&Err(vec!["a", "b"])));
/// ```
pub fn any<I: AnyOf>(inputs: I) -> Outcome<I::Ok, Vec<I::Err>> {
    inputs.any_of()
}

// =============================================================================
// Drivers
// =============================================================================

/// Takes every result out of a list of outcomes if all of them are
/// immediate; hands the list back untouched otherwise.
fn settle_now<T, E>(outcomes: Vec<Outcome<T, E>>) -> Result<Vec<Result<T, E>>, Vec<Outcome<T, E>>> {
    if outcomes.iter().any(|outcome| outcome.mode() == Mode::Deferred) {
        return Err(outcomes);
    }
    Ok(outcomes
        .into_iter()
        .filter_map(|outcome| outcome.into_settled().ok())
        .collect())
}

/// Waits for every outcome, then lets `decide` look at all the results.
pub(crate) fn gather<T, E, A, B, F>(outcomes: Vec<Outcome<T, E>>, decide: F) -> Outcome<A, B>
where
    T: Payload,
    E: Payload,
    A: Payload,
    B: Payload,
    F: FnOnce(Vec<Result<T, E>>) -> Result<A, B> + Send + 'static,
{
    match settle_now(outcomes) {
        Ok(results) => Outcome::from_result(decide(results)),
        Err(outcomes) => Outcome::from_pending(Pending::new(async move {
            decide(join_all(outcomes.into_iter().map(IntoFuture::into_future)).await)
        })),
    }
}

/// Splits results into every success or every error, keeping input order.
fn collect_all<T, E>(results: Vec<Result<T, E>>) -> Result<Vec<T>, Vec<E>> {
    let mut values = Vec::with_capacity(results.len());
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(value) => values.push(value),
            Err(error) => errors.push(error),
        }
    }
    if errors.is_empty() { Ok(values) } else { Err(errors) }
}

/// Looks at the outcomes one by one, stopping at the first success.
///
/// Stays immediate for as long as the outcomes it has to look at are
/// immediate; the first deferred one moves the rest of the scan into a
/// pending computation.
fn first_ok<T: Payload, E: Payload>(outcomes: Vec<Outcome<T, E>>) -> Outcome<T, Vec<E>> {
    let mut errors = Vec::new();
    let mut remaining = outcomes.into_iter();
    while let Some(outcome) = remaining.next() {
        match outcome.into_settled() {
            Ok(Ok(value)) => return Outcome::ok(value),
            Ok(Err(error)) => errors.push(error),
            Err(pending) => {
                let rest: Vec<_> = std::iter::once(Outcome::from_pending(pending))
                    .chain(remaining)
                    .collect();
                return Outcome::from_pending(Pending::new(async move {
                    let mut errors = errors;
                    for outcome in rest {
                        match outcome.await {
                            Ok(value) => return Ok(value),
                            Err(error) => errors.push(error),
                        }
                    }
                    Err(errors)
                }));
            }
        }
    }
    Outcome::err(errors)
}

// =============================================================================
// Vec Implementations
// =============================================================================

impl<R> AllOf for Vec<R>
where
    R: IntoOutcome,
    R::Ok: Payload,
    R::Err: Payload,
{
    type Output = Vec<R::Ok>;
    type Err = R::Err;

    fn all_of(self) -> Outcome<Self::Output, Vec<Self::Err>> {
        gather(self.into_iter().map(IntoOutcome::into_outcome).collect(), collect_all)
    }
}

impl<R> AnyOf for Vec<R>
where
    R: IntoOutcome,
    R::Ok: Payload,
    R::Err: Payload,
{
    type Ok = R::Ok;
    type Err = R::Err;

    fn any_of(self) -> Outcome<Self::Ok, Vec<Self::Err>> {
        first_ok(self.into_iter().map(IntoOutcome::into_outcome).collect())
    }
}

// =============================================================================
// Tuple Implementations
// =============================================================================

/// Splits a tuple of results into a tuple of values or the list of errors.
macro_rules! combine_results {
    ($($value:ident),+) => {{
        let mut errors = Vec::new();
        let ($($value,)+) = ($(
            match $value {
                Ok(value) => Some(value),
                Err(error) => {
                    errors.push(error);
                    None
                }
            },
        )+);
        match ($($value,)+) {
            ($(Some($value),)+) => Ok(($($value,)+)),
            _ => Err(errors),
        }
    }};
}

macro_rules! impl_aggregate_for_tuple {
    ($($ty:ident $value:ident),+) => {
        impl<Error, $($ty),+> AllOf for ($($ty,)+)
        where
            Error: Payload,
            $(
                $ty: IntoOutcome<Err = Error>,
                <$ty as IntoOutcome>::Ok: Payload,
            )+
        {
            type Output = ($(<$ty as IntoOutcome>::Ok,)+);
            type Err = Error;

            fn all_of(self) -> Outcome<Self::Output, Vec<Error>> {
                let ($($value,)+) = self;
                match ($($value.into_outcome().into_settled(),)+) {
                    ($(Ok($value),)+) => Outcome::from_result(combine_results!($($value),+)),
                    ($($value,)+) => {
                        let ($($value,)+) = ($(
                            $value.map_or_else(Outcome::from_pending, Outcome::from_result),
                        )+);
                        Outcome::from_pending(Pending::new(async move {
                            let ($($value,)+) = futures::join!($($value.into_future()),+);
                            combine_results!($($value),+)
                        }))
                    }
                }
            }
        }

        impl<Value, Error, $($ty),+> AnyOf for ($($ty,)+)
        where
            Value: Payload,
            Error: Payload,
            $($ty: IntoOutcome<Ok = Value, Err = Error>,)+
        {
            type Ok = Value;
            type Err = Error;

            fn any_of(self) -> Outcome<Value, Vec<Error>> {
                let ($($value,)+) = self;
                first_ok(vec![$($value.into_outcome()),+])
            }
        }
    };
}

impl_aggregate_for_tuple!(R1 first);
impl_aggregate_for_tuple!(R1 first, R2 second);
impl_aggregate_for_tuple!(R1 first, R2 second, R3 third);
impl_aggregate_for_tuple!(R1 first, R2 second, R3 third, R4 fourth);
impl_aggregate_for_tuple!(R1 first, R2 second, R3 third, R4 fourth, R5 fifth);
impl_aggregate_for_tuple!(R1 first, R2 second, R3 third, R4 fourth, R5 fifth, R6 sixth);
impl_aggregate_for_tuple!(
    R1 first, R2 second, R3 third, R4 fourth, R5 fifth, R6 sixth, R7 seventh
);
impl_aggregate_for_tuple!(
    R1 first, R2 second, R3 third, R4 fourth, R5 fifth, R6 sixth, R7 seventh, R8 eighth
);
