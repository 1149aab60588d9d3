//! The `outcome!` macro: do-notation over `flat_map`.
//!
//! # Syntax
//!
//! The macro uses `<=` as the bind operator (since `<-` cannot be matched in
//! Rust macros).
//!
//! ```text
//! outcome! {
//!     pattern <= expression;   // bind: pattern receives the Ok value
//!     let pattern = expression; // pure let: regular let binding
//!     ...
//!     expression               // final expression: anything that converts
//!                              // into an Outcome
//! }
//! ```
//!
//! Every bound expression may be an [`Outcome`](crate::outcome::Outcome)
//! (immediate or deferred), a [`Pending`](crate::outcome::Pending) or a plain
//! `Result`. The first `Err` short-circuits the rest of the block.

/// Do-notation for outcomes.
///
/// Each `pattern <= expression;` line binds the `Ok` value of `expression`
/// for the rest of the block. The block is immediate while every bound
/// expression is immediate, and deferred from the first deferred one on.
///
/// # Examples
///
/// ```rust
/// use hybrid_result::outcome;
/// use hybrid_result::outcome::Outcome;
///
/// let sum = outcome! {
///     x <= Outcome::<i32, String>::ok(5);
///     y <= Ok::<i32, String>(10);
///     let z = x + y;
///     Outcome::<i32, String>::ok(z * 2)
/// };
/// assert_eq!(sum.as_settled(), Some(&Ok(30)));
///
/// let deferred = outcome! {
///     x <= Outcome::<i32, String>::ok_later(async { 1 });
///     (a, b) <= Ok::<(i32, i32), String>((x, x + 1));
///     Ok::<i32, String>(a + b)
/// };
/// assert_eq!(futures::executor::block_on(deferred.into_future()), Ok(3));
/// ```
#[macro_export]
macro_rules! outcome {
    // Terminal case: a single expression converting into an Outcome
    ($result:expr) => {
        $crate::outcome::IntoOutcome::into_outcome($result)
    };

    // Bind with identifier pattern: `identifier <= expr; rest`
    ($pattern:ident <= $bound:expr ; $($rest:tt)+) => {
        $crate::outcome::IntoOutcome::into_outcome($bound).flat_map(move |$pattern| {
            $crate::outcome!($($rest)+)
        })
    };

    // Bind with tuple pattern: `(pattern1, pattern2) <= expr; rest`
    (($($pattern:tt)*) <= $bound:expr ; $($rest:tt)+) => {
        $crate::outcome::IntoOutcome::into_outcome($bound).flat_map(move |($($pattern)*)| {
            $crate::outcome!($($rest)+)
        })
    };

    // Bind with wildcard pattern: `_ <= expr; rest`
    (_ <= $bound:expr ; $($rest:tt)+) => {
        $crate::outcome::IntoOutcome::into_outcome($bound).flat_map(move |_| {
            $crate::outcome!($($rest)+)
        })
    };

    // Pure let binding with identifier: `let identifier = expr; rest`
    (let $pattern:ident = $value:expr ; $($rest:tt)+) => {
        {
            let $pattern = $value;
            $crate::outcome!($($rest)+)
        }
    };

    // Pure let binding with tuple pattern: `let (a, b) = expr; rest`
    (let ($($pattern:tt)*) = $value:expr ; $($rest:tt)+) => {
        {
            let ($($pattern)*) = $value;
            $crate::outcome!($($rest)+)
        }
    };

    // Pure let binding with type annotation: `let identifier: Type = expr; rest`
    (let $pattern:ident : $ty:ty = $value:expr ; $($rest:tt)+) => {
        {
            let $pattern: $ty = $value;
            $crate::outcome!($($rest)+)
        }
    };
}
