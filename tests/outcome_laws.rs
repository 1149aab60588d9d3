//! Property-based tests for the Outcome laws.
//!
//! - **Identity Law**: `r.map(|x| x) == r`
//! - **Composition Law**: `r.map(f).map(g) == r.map(|x| g(f(x)))`
//! - **Left Identity**: `Outcome::ok(a).flat_map(f) == f(a)`
//! - **Associativity**: `r.flat_map(f).flat_map(g) == r.flat_map(|x| f(x).flat_map(g))`
//! - **Round trip**: `Ok(v).to_option() == Some(v)`, `Err(e).to_option() == None`
//!
//! Every law is checked for immediate outcomes and again for deferred ones,
//! which are settled with `futures::executor::block_on`.

use futures::executor::block_on;
use hybrid_result::outcome::Outcome;
use proptest::prelude::*;

fn deferred(result: Result<i32, String>) -> Outcome<i32, String> {
    Outcome::from_future(async move { result })
}

fn settle(outcome: Outcome<i32, String>) -> Result<i32, String> {
    block_on(outcome.into_future())
}

fn half(value: i32) -> Outcome<i32, String> {
    if value % 2 == 0 {
        Outcome::ok(value / 2)
    } else {
        Outcome::err(format!("{value} is odd"))
    }
}

fn decrement_later(value: i32) -> Outcome<i32, String> {
    Outcome::ok_later(async move { value.wrapping_sub(1) })
}

fn any_result() -> impl Strategy<Value = Result<i32, String>> {
    prop::result::maybe_ok(any::<i32>(), "[a-z]{1,8}")
}

// =============================================================================
// Functor Laws
// =============================================================================

proptest! {
    /// Identity Law for immediate outcomes
    #[test]
    fn prop_identity_law(result in any_result()) {
        let mapped = Outcome::from_result(result.clone()).map(|x| x);
        prop_assert_eq!(mapped.as_settled(), Some(&result));
    }

    /// Identity Law for deferred outcomes
    #[test]
    fn prop_deferred_identity_law(result in any_result()) {
        prop_assert_eq!(settle(deferred(result.clone()).map(|x| x)), result);
    }

    /// Composition Law for immediate and deferred outcomes
    #[test]
    fn prop_composition_law(result in any_result(), is_deferred in any::<bool>()) {
        let function1 = |n: i32| n.wrapping_add(1);
        let function2 = |n: i32| n.wrapping_mul(2);
        let build = |result: Result<i32, String>| {
            if is_deferred { deferred(result) } else { Outcome::from_result(result) }
        };

        let left = settle(build(result.clone()).map(function1).map(function2));
        let right = settle(build(result).map(move |x| function2(function1(x))));

        prop_assert_eq!(left, right);
    }
}

// =============================================================================
// Monad Laws
// =============================================================================

proptest! {
    /// Left Identity Law: ok(a).flat_map(f) == f(a)
    #[test]
    fn prop_left_identity_law(value in any::<i32>()) {
        prop_assert_eq!(settle(Outcome::ok(value).flat_map(half)), settle(half(value)));
        prop_assert_eq!(
            settle(Outcome::ok(value).flat_map(decrement_later)),
            settle(decrement_later(value))
        );
    }

    /// Right Identity Law: r.flat_map(ok) == r
    #[test]
    fn prop_right_identity_law(result in any_result(), is_deferred in any::<bool>()) {
        let outcome = if is_deferred { deferred(result.clone()) } else { Outcome::from_result(result.clone()) };
        prop_assert_eq!(settle(outcome.flat_map(Outcome::ok)), result);
    }

    /// Associativity Law with one immediate and one deferred function
    #[test]
    fn prop_associativity_law(result in any_result(), is_deferred in any::<bool>()) {
        let build = |result: Result<i32, String>| {
            if is_deferred { deferred(result) } else { Outcome::from_result(result) }
        };

        let left = settle(build(result.clone()).flat_map(half).flat_map(decrement_later));
        let right = settle(build(result).flat_map(|x| half(x).flat_map(decrement_later)));

        prop_assert_eq!(left, right);
    }
}

// =============================================================================
// Round Trip
// =============================================================================

proptest! {
    /// to_option keeps the value of an Ok and drops the error of an Err
    #[test]
    fn prop_to_option_round_trip(result in any_result()) {
        let expected = result.clone().ok();
        prop_assert_eq!(Outcome::from_result(result.clone()).to_option().now(), Some(expected.clone()));
        prop_assert_eq!(block_on(deferred(result).to_option().into_future()), expected);
    }

    /// flip is an involution
    #[test]
    fn prop_flip_involution(result in any_result()) {
        let flipped = Outcome::from_result(result.clone()).flip().flip();
        prop_assert_eq!(flipped.as_settled(), Some(&result));
    }
}
