//! # hybrid-result
//!
//! A `Result` type that unifies synchronous and asynchronous computation
//! under one value.
//!
//! ## Overview
//!
//! An [`Outcome<T, E>`](outcome::Outcome) is either `Ok` or `Err`, like the
//! standard `Result`. Unlike `Result`, its payload may still be in flight:
//! an outcome starts out immediate and silently becomes deferred the moment
//! any step of a pipeline is asynchronous. Callers build the whole pipeline
//! with the same combinators and only decide at the edge whether to read the
//! value synchronously or to `.await` it.
//!
//! - **Outcome**: the tagged value, its deferred error slot, and the
//!   combinator algebra (`map`, `flat_map`, `zip`, `flat_zip`, `zip_err`, ...)
//! - **Aggregate**: `all`, `any` and `validate`, which collect every error
//!   instead of stopping at the first
//! - **Sequence**: an iterative do-notation driver and the `outcome!` macro
//!
//! ## Feature Flags
//!
//! - `aggregate`: `all`, `any`, `validate`
//! - `sequence`: routines, `run`, `run_traced`, `outcome!`
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use hybrid_result::prelude::*;
//!
//! let immediate = Outcome::<i32, String>::ok(20).map(|x| x + 1).map(|x| x * 2);
//! assert_eq!(immediate.unwrap().now(), Some(42));
//!
//! let deferred = Outcome::<i32, String>::ok(20)
//!     .map_async(|x| async move { x + 1 })
//!     .map(|x| x * 2);
//! assert!(!deferred.is_settled());
//! assert_eq!(futures::executor::block_on(deferred.into_future()), Ok(42));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use hybrid_result::prelude::*;
/// ```
pub mod prelude {
    pub use crate::outcome::*;

    #[cfg(feature = "aggregate")]
    pub use crate::aggregate::*;

    #[cfg(feature = "sequence")]
    pub use crate::sequence::*;
}

pub mod outcome;

#[cfg(feature = "aggregate")]
pub mod aggregate;

#[cfg(feature = "sequence")]
pub mod sequence;
