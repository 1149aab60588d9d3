//! Do-notation for outcomes.
//!
//! A [`Routine`] is a hand-written coroutine: each call to
//! [`Routine::step`] either yields an outcome to wait on or returns the
//! final value. [`run`] drives the routine, feeding every `Ok` value back in
//! and stopping at the first `Err`.
//!
//! # Motivation
//!
//! Chaining `flat_map` nests one closure per step, and a chain built in a
//! loop nests as deep as the loop runs. The driver here keeps no state per
//! step: it is a plain loop, so a routine can yield any number of times
//! without growing the stack, whether its outcomes are immediate or
//! deferred.
//!
//! For short, fixed pipelines the [`outcome!`](crate::outcome!) macro offers
//! the same short-circuiting with less ceremony.
//!
//! # Examples
//!
//! ```rust
//! use hybrid_result::sequence::Steps;
//!
//! let mut steps = Steps::new(0_u64);
//! for _ in 0..100_000 {
//!     steps = steps.then(|total| Ok::<u64, String>(total + 1));
//! }
//! assert_eq!(steps.run().as_settled(), Some(&Ok(100_000)));
//! ```

mod macros;

use std::collections::VecDeque;
use std::fmt;
use std::panic::Location;

use crate::outcome::{IntoOutcome, Outcome, Payload, Pending};

// =============================================================================
// Suspension points
// =============================================================================

/// What a [`Routine`] does at each step.
pub enum Suspend<Y, R, E> {
    /// Wait for an outcome, then resume with its `Ok` value.
    Yield {
        /// The outcome to wait for.
        outcome: Outcome<Y, E>,
        /// Where the routine yielded it.
        location: &'static Location<'static>,
    },
    /// Finish with a value.
    Return(R),
}

impl<Y, R, E> Suspend<Y, R, E> {
    /// Yields an outcome, recording the caller's location.
    #[track_caller]
    pub fn yield_outcome(outcome: impl IntoOutcome<Ok = Y, Err = E>) -> Self {
        Self::Yield {
            outcome: outcome.into_outcome(),
            location: Location::caller(),
        }
    }
}

impl<Y: fmt::Debug, R: fmt::Debug, E: fmt::Debug> fmt::Debug for Suspend<Y, R, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yield { outcome, location } => formatter
                .debug_struct("Yield")
                .field("outcome", outcome)
                .field("location", location)
                .finish(),
            Self::Return(value) => formatter.debug_tuple("Return").field(value).finish(),
        }
    }
}

/// A computation that suspends on outcomes.
///
/// The driver calls [`step`](Routine::step) with `None` first, then with the
/// `Ok` value of every outcome the routine yields. It never calls `step`
/// again after the routine returns or after a yielded outcome fails.
///
/// # Examples
///
/// ```rust
/// use hybrid_result::sequence::{Routine, Suspend, run};
///
/// struct Countdown {
///     remaining: u32,
/// }
///
/// impl Routine for Countdown {
///     type Resume = u32;
///     type Output = &'static str;
///     type Err = String;
///
///     fn step(&mut self, input: Option<u32>) -> Suspend<u32, &'static str, String> {
///         if let Some(value) = input {
///             self.remaining = value;
///         }
///         if self.remaining == 0 {
///             return Suspend::Return("liftoff");
///         }
///         Suspend::yield_outcome(Ok::<u32, String>(self.remaining - 1))
///     }
/// }
///
/// assert_eq!(run(Countdown { remaining: 3 }).as_settled(), Some(&Ok("liftoff")));
/// ```
pub trait Routine {
    /// The value the routine is resumed with.
    type Resume: Payload;
    /// The value the routine finishes with.
    type Output: Payload;
    /// The error type of every yielded outcome.
    type Err: Payload;

    /// Advances the routine to its next suspension point.
    fn step(&mut self, input: Option<Self::Resume>) -> Suspend<Self::Resume, Self::Output, Self::Err>;
}

// =============================================================================
// Drivers
// =============================================================================

/// An error together with the location of the yield that produced it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{error} (yielded at {location})")]
pub struct Traced<E> {
    error: E,
    location: &'static Location<'static>,
}

impl<E> Traced<E> {
    /// Pairs an error with the location it was yielded from.
    pub const fn new(error: E, location: &'static Location<'static>) -> Self {
        Self { error, location }
    }

    /// The error.
    pub const fn error(&self) -> &E {
        &self.error
    }

    /// Where the failing outcome was yielded.
    pub const fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Returns the error, dropping the location.
    pub fn into_error(self) -> E {
        self.error
    }
}

/// Drives a routine to completion.
///
/// Runs synchronously while the routine yields immediate outcomes. The
/// first deferred outcome moves the rest of the run into one pending
/// computation, so the result is deferred from then on.
pub fn run<R>(routine: R) -> Outcome<R::Output, R::Err>
where
    R: Routine + Send + 'static,
{
    drive(routine).map_err(Traced::into_error)
}

/// Like [`run`], but the error records which yield produced it.
///
/// # Examples
///
/// ```rust
/// use hybrid_result::sequence::{Steps, Traced};
///
/// let failed = Steps::new(1)
///     .then(|x| Ok::<i32, &str>(x + 1))
///     .then(|_| Err::<i32, &str>("second step"))
///     .run_traced();
///
/// let traced: Option<&Traced<&str>> = failed.current().and_then(Result::err);
/// assert_eq!(traced.map(Traced::error), Some(&"second step"));
/// assert_eq!(traced.map(|traced| traced.location().file()), Some(file!()));
/// ```
pub fn run_traced<R>(routine: R) -> Outcome<R::Output, Traced<R::Err>>
where
    R: Routine + Send + 'static,
{
    drive(routine)
}

fn short_circuit<E>(error: E, location: &'static Location<'static>) -> Traced<E> {
    tracing::debug!(%location, "routine short-circuited on an error");
    Traced::new(error, location)
}

fn drive<R>(mut routine: R) -> Outcome<R::Output, Traced<R::Err>>
where
    R: Routine + Send + 'static,
{
    let mut input = None;
    loop {
        match routine.step(input.take()) {
            Suspend::Return(value) => return Outcome::ok(value),
            Suspend::Yield { outcome, location } => match outcome.into_settled() {
                Ok(Ok(value)) => input = Some(value),
                Ok(Err(error)) => return Outcome::err(short_circuit(error, location)),
                Err(pending) => {
                    return Outcome::from_pending(Pending::new(drive_deferred(
                        routine,
                        Outcome::from_pending(pending),
                        location,
                    )));
                }
            },
        }
    }
}

async fn drive_deferred<R>(
    mut routine: R,
    mut awaiting: Outcome<R::Resume, R::Err>,
    mut location: &'static Location<'static>,
) -> Result<R::Output, Traced<R::Err>>
where
    R: Routine + Send + 'static,
{
    loop {
        let value = match awaiting.await {
            Ok(value) => value,
            Err(error) => return Err(short_circuit(error, location)),
        };
        match routine.step(Some(value)) {
            Suspend::Return(output) => return Ok(output),
            Suspend::Yield {
                outcome,
                location: yielded_at,
            } => {
                awaiting = outcome;
                location = yielded_at;
            }
        }
    }
}

// =============================================================================
// Steps
// =============================================================================

type Step<S, E> = Box<dyn FnOnce(S) -> Outcome<S, E> + Send>;

/// A routine built from a seed and a list of steps, each turning the
/// current state into the next.
///
/// Each step is recorded with the location of the [`then`](Steps::then)
/// call that added it, which is what [`run_traced`] reports.
pub struct Steps<S, E> {
    seed: Option<S>,
    steps: VecDeque<(Step<S, E>, &'static Location<'static>)>,
}

impl<S: Payload, E: Payload> Steps<S, E> {
    /// Starts a routine at `seed`.
    pub fn new(seed: S) -> Self {
        Self {
            seed: Some(seed),
            steps: VecDeque::new(),
        }
    }

    /// Appends a step.
    #[track_caller]
    #[must_use]
    pub fn then<F, R>(mut self, step: F) -> Self
    where
        F: FnOnce(S) -> R + Send + 'static,
        R: IntoOutcome<Ok = S, Err = E>,
    {
        let location = Location::caller();
        self.steps
            .push_back((Box::new(move |state| step(state).into_outcome()), location));
        self
    }

    /// The number of steps not yet run.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if there are no steps left.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Runs every step with [`run`].
    pub fn run(self) -> Outcome<S, E> {
        run(self)
    }

    /// Runs every step with [`run_traced`].
    pub fn run_traced(self) -> Outcome<S, Traced<E>> {
        run_traced(self)
    }
}

impl<S: Payload, E: Payload> Routine for Steps<S, E> {
    type Resume = S;
    type Output = S;
    type Err = E;

    /// Runs the next step on the current state.
    ///
    /// # Panics
    ///
    /// Panics if called with `None` after the seed has been taken. [`run`]
    /// and [`run_traced`] only pass `None` on the first step; a caller
    /// stepping by hand must feed every `Ok` value back in.
    fn step(&mut self, input: Option<S>) -> Suspend<S, S, E> {
        // INVARIANT: the driver passes `None` exactly once, on the first step
        let state = input.or_else(|| self.seed.take()).expect(
            "Steps internal error: no state to resume with. \
             This indicates the routine was stepped twice without input.",
        );
        match self.steps.pop_front() {
            Some((step, location)) => Suspend::Yield {
                outcome: step(state),
                location,
            },
            None => Suspend::Return(state),
        }
    }
}

impl<S, E> fmt::Debug for Steps<S, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Steps")
            .field("started", &self.seed.is_none())
            .field("remaining", &self.steps.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::Mode;
    use rstest::rstest;

    #[rstest]
    fn empty_steps_return_the_seed() {
        let outcome = Steps::<i32, String>::new(7).run();
        assert_eq!(outcome.mode(), Mode::Immediate);
        assert_eq!(outcome.as_settled(), Some(&Ok(7)));
    }

    #[rstest]
    fn first_error_stops_the_routine() {
        let outcome = Steps::new(1)
            .then(|x| Ok::<i32, &str>(x + 1))
            .then(|_| Err::<i32, &str>("stop"))
            .then(|_| -> Result<i32, &'static str> { panic!("must not run") })
            .run();
        assert_eq!(outcome.as_settled(), Some(&Err("stop")));
    }

    #[rstest]
    fn traced_error_points_at_the_yielding_step() {
        let expected_line = line!() + 3;
        let outcome = Steps::new(1)
            .then(|x| Ok::<i32, &str>(x + 1))
            .then(|_| Err::<i32, &str>("here"))
            .run_traced();
        let traced = outcome.current().and_then(Result::err).cloned();
        assert_eq!(traced.map(|traced| traced.location().line()), Some(expected_line));
    }

    #[rstest]
    fn traced_display_mentions_error_and_location() {
        let location = Location::caller();
        let traced = Traced::new("boom", location);
        assert!(traced.to_string().starts_with("boom (yielded at "));
        assert_eq!(traced.into_error(), "boom");
    }

    #[rstest]
    fn stepping_by_hand_feeds_values_back() {
        let mut steps = Steps::<i32, String>::new(1).then(|x| Ok::<i32, String>(x + 1));
        let Suspend::Yield { outcome, .. } = steps.step(None) else {
            panic!("first step should yield");
        };
        let next = outcome.as_settled().cloned().and_then(Result::ok);
        assert_eq!(next, Some(2));
        assert!(matches!(steps.step(next), Suspend::Return(2)));
    }

    #[rstest]
    #[should_panic(expected = "no state to resume with")]
    fn stepping_twice_without_input_panics() {
        let mut steps = Steps::<i32, String>::new(1).then(|x| Ok::<i32, String>(x + 1));
        let _ = steps.step(None);
        let _ = steps.step(None);
    }

    #[rstest]
    fn debug_reports_progress() {
        let steps = Steps::<i32, String>::new(0).then(|x| Ok::<i32, String>(x));
        assert_eq!(format!("{steps:?}"), "Steps { started: false, remaining: 1 }");
    }

    #[rstest]
    #[tokio::test]
    async fn deferred_step_promotes_the_rest_of_the_run() {
        let outcome = Steps::new(1)
            .then(|x| Ok::<i32, String>(x + 1))
            .then(|x| Outcome::<i32, String>::ok_later(async move { x * 10 }))
            .then(|x| Ok::<i32, String>(x + 1))
            .run();
        assert_eq!(outcome.mode(), Mode::Deferred);
        assert_eq!(outcome.await, Ok(21));
    }
}
