//! Validation: many checks against one value, every failure reported.

use super::gather;
use crate::outcome::{IntoOutcome, Outcome, Payload};

/// A boxed validator, for lists mixing several check functions.
///
/// # Examples
///
/// ```rust
/// use hybrid_result::aggregate::Validator;
/// use hybrid_result::outcome::Outcome;
///
/// let validators: Vec<Validator<i32, String>> = vec![
///     Box::new(|x: i32| Outcome::<(), String>::from_predicate((), |_| x > 0, "not positive".into())),
///     Box::new(|x: i32| Outcome::<(), String>::from_predicate((), |_| x % 2 == 0, "odd".into())),
/// ];
/// let checked = Outcome::<i32, String>::ok(-3).validate(validators);
/// assert_eq!(
///     checked.as_settled(),
///     Some(&Err(vec!["not positive".to_string(), "odd".to_string()]))
/// );
/// ```
pub type Validator<T, E> = Box<dyn FnOnce(T) -> Outcome<(), E> + Send>;

impl<T: Payload, E: Payload> Outcome<T, E> {
    /// Runs every validator against the success value.
    ///
    /// Each validator gets its own clone of the value. Every validator runs
    /// even after one has failed, and the error is the list of every failing
    /// validator's error, in order. When every check passes the original
    /// value comes through.
    ///
    /// A receiver that is already `Err` skips the validators; its error
    /// comes through as the only element of the list. A deferred receiver
    /// whose error is already known makes the result report that list
    /// before it is polled.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hybrid_result::outcome::Outcome;
    ///
    /// fn at_most_100(x: i32) -> Result<(), String> {
    ///     if x <= 100 { Ok(()) } else { Err(format!("{x} > 100")) }
    /// }
    ///
    /// fn not_13(x: i32) -> Result<(), String> {
    ///     if x == 13 { Err("unlucky".into()) } else { Ok(()) }
    /// }
    ///
    /// let checks: [fn(i32) -> Result<(), String>; 2] = [at_most_100, not_13];
    /// assert_eq!(Outcome::ok(42).validate(checks).as_settled(), Some(&Ok(42)));
    /// ```
    pub fn validate<I, F, R>(self, validators: I) -> Outcome<T, Vec<E>>
    where
        I: IntoIterator<Item = F>,
        F: FnOnce(T) -> R + Send + 'static,
        R: IntoOutcome<Err = E>,
        R::Ok: Payload,
    {
        let validators: Vec<F> = validators.into_iter().collect();
        self.chain_seeded(
            move |result| match result {
                Err(error) => Outcome::err(vec![error]),
                Ok(value) => {
                    let checks = validators
                        .into_iter()
                        .map(|validator| validator(value.clone()).into_outcome())
                        .collect();
                    gather(checks, move |results| {
                        let errors: Vec<E> = results.into_iter().filter_map(Result::err).collect();
                        if errors.is_empty() { Ok(value) } else { Err(errors) }
                    })
                }
            },
            |error| vec![error.clone()],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::Mode;
    use rstest::rstest;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn failing(message: &'static str) -> Validator<i32, &'static str> {
        Box::new(move |_: i32| Outcome::<(), &str>::err(message))
    }

    fn passing() -> Validator<i32, &'static str> {
        Box::new(|_: i32| Outcome::<(), &str>::ok(()))
    }

    #[rstest]
    fn collects_every_failure_in_order() {
        let outcome = Outcome::ok(42).validate(vec![passing(), failing("first"), failing("second")]);
        assert_eq!(outcome.as_settled(), Some(&Err(vec!["first", "second"])));
    }

    #[rstest]
    fn err_receiver_skips_validators() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let validators: Vec<Validator<i32, &'static str>> = vec![Box::new(move |_: i32| {
            counter.fetch_add(1, Ordering::SeqCst);
            Outcome::<(), &str>::ok(())
        })];
        let outcome = Outcome::<i32, &str>::err("already").validate(validators);
        assert_eq!(outcome.as_settled(), Some(&Err(vec!["already"])));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[rstest]
    fn empty_validator_list_passes() {
        let outcome = Outcome::<i32, &str>::ok(1).validate(Vec::<Validator<i32, &str>>::new());
        assert_eq!(outcome.mode(), Mode::Immediate);
        assert_eq!(outcome.as_settled(), Some(&Ok(1)));
    }

    #[rstest]
    #[tokio::test]
    async fn deferred_validators_are_all_awaited() {
        let validators: Vec<Validator<i32, &'static str>> = vec![
            Box::new(|_: i32| Outcome::<(), &str>::from_future(async { Err::<(), &str>("slow") })),
            failing("fast"),
        ];
        let outcome = Outcome::ok(5).validate(validators);
        assert_eq!(outcome.mode(), Mode::Deferred);
        assert_eq!(outcome.await, Err(vec!["slow", "fast"]));
    }
}
