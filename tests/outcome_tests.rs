//! Integration tests for the tagged value core: construction, inspection,
//! extraction and awaiting.

use hybrid_result::outcome::{
    CaughtPanic, ErrorSlot, Extract, Mode, Outcome, Pending, UnwrappedErrWithOk, UnwrappedOkWithErr,
};
use rstest::rstest;
use std::panic::{AssertUnwindSafe, catch_unwind};

static_assertions::assert_impl_all!(Outcome<i32, String>: Send, Sync, Clone);
static_assertions::assert_impl_all!(Pending<i32, String>: Send, Sync, Clone);
static_assertions::assert_impl_all!(ErrorSlot<String>: Send, Sync, Clone);
static_assertions::assert_impl_all!(Extract<i32>: Send);
static_assertions::assert_impl_all!(UnwrappedOkWithErr<String>: std::error::Error);
static_assertions::assert_impl_all!(CaughtPanic: std::error::Error, Send, Sync);

// =============================================================================
// Construction
// =============================================================================

#[rstest]
#[case(Some(5), Ok(5))]
#[case(None, Err("missing"))]
fn from_nullable(#[case] value: Option<i32>, #[case] expected: Result<i32, &'static str>) {
    let outcome = Outcome::from_nullable(value, "missing");
    assert_eq!(outcome.as_settled(), Some(&expected));
}

#[rstest]
#[case(10, Ok(10))]
#[case(-10, Err("negative"))]
fn from_predicate(#[case] value: i32, #[case] expected: Result<i32, &'static str>) {
    let outcome = Outcome::from_predicate(value, |x| *x >= 0, "negative");
    assert_eq!(outcome.as_settled(), Some(&expected));
}

#[rstest]
fn from_result_is_immediate() {
    let outcome: Outcome<i32, String> = Err("boom".to_string()).into();
    assert_eq!(outcome.mode(), Mode::Immediate);
    assert!(outcome.is_err());
}

#[rstest]
#[tokio::test]
async fn from_future_flattens_every_shape() {
    let plain = Outcome::from_future(async { Ok::<i32, String>(1) });
    let nested = Outcome::from_future(async { Outcome::<i32, String>::ok_later(async { 2 }) });
    let failing = Outcome::from_future(async {
        Outcome::<i32, String>::from_future(async { Err::<i32, String>("deep".into()) })
    });

    assert_eq!(plain.await, Ok(1));
    assert_eq!(nested.await, Ok(2));
    assert_eq!(failing.await, Err("deep".to_string()));
}

#[rstest]
#[tokio::test]
async fn from_pending_wraps_a_bare_handle() {
    let pending: Pending<i32, String> = Pending::new(async { Ok(3) });
    let outcome = Outcome::from(pending);
    assert_eq!(outcome.mode(), Mode::Deferred);
    assert_eq!(outcome.await, Ok(3));
}

// =============================================================================
// Inspection
// =============================================================================

#[rstest]
#[tokio::test]
async fn deferred_state_is_provisional_until_settled() {
    let outcome = Outcome::<i32, String>::from_future(async {
        tokio::task::yield_now().await;
        Err::<i32, String>("late".into())
    });
    assert!(!outcome.is_ok());
    assert!(!outcome.is_err());
    assert!(!outcome.is_settled());

    assert_eq!(outcome.clone().await, Err("late".to_string()));

    assert!(outcome.is_err());
    assert!(outcome.is_settled());
    assert_eq!(outcome.current(), Some(Err(&"late".to_string())));
    assert_eq!(outcome.to_string(), "Err<late>");
}

#[rstest]
#[tokio::test]
async fn error_slot_is_written_once_per_computation() {
    let outcome = Outcome::<i32, String>::from_future(async { Err::<i32, String>("first".into()) });
    let _ = outcome.clone().await;
    let _ = outcome.clone().await;

    let slot = outcome.error_slot().expect("deferred outcome has a slot");
    assert_eq!(slot.get().map(String::as_str), Some("first"));
    assert!(slot.is_filled());
}

#[rstest]
#[tokio::test]
async fn settled_success_keeps_an_empty_slot_on_every_clone() {
    let outcome = Outcome::<i32, String>::ok_later(async { 5 });
    let observer = outcome.clone();
    assert_eq!(outcome.clone().await, Ok(5));

    let slot = observer.error_slot().expect("deferred outcome has a slot");
    assert!(!slot.is_filled());
    assert!(slot.shares_cell_with(outcome.error_slot().expect("same value, same slot")));
    assert!(observer.is_ok());
    assert!(!observer.is_err());
    assert_eq!(observer.to_string(), "Ok<5>");
    assert_eq!(observer.await, Ok(5));
}

#[rstest]
fn immediate_outcomes_have_no_slot() {
    assert!(Outcome::<i32, String>::ok(1).error_slot().is_none());
}

// =============================================================================
// Extraction
// =============================================================================

#[rstest]
#[case(Outcome::ok(3), 3)]
#[case(Outcome::err("x".to_string()), 0)]
fn unwrap_or(#[case] outcome: Outcome<i32, String>, #[case] expected: i32) {
    assert_eq!(outcome.unwrap_or(0).now(), Some(expected));
}

#[rstest]
fn unwrap_or_else_sees_the_error() {
    let value = Outcome::<usize, String>::err("four".into()).unwrap_or_else(|error| error.len());
    assert_eq!(value.now(), Some(4));
}

#[rstest]
#[case(Outcome::ok(1), Some(1))]
#[case(Outcome::err("x".to_string()), None)]
fn safe_unwrap_never_panics(#[case] outcome: Outcome<i32, String>, #[case] expected: Option<i32>) {
    assert_eq!(outcome.safe_unwrap().now(), Some(expected));
}

#[rstest]
fn err_unwrap_raises_unwrapped_ok_with_err() {
    let payload = catch_unwind(AssertUnwindSafe(|| {
        let _ = Outcome::<i32, &str>::err("x").unwrap();
    }))
    .expect_err("unwrap on Err must panic");
    let error = payload
        .downcast::<UnwrappedOkWithErr<&str>>()
        .expect("payload must be UnwrappedOkWithErr");
    assert_eq!(error.into_inner(), "x");
}

#[rstest]
fn ok_unwrap_err_raises_unwrapped_err_with_ok() {
    let payload = catch_unwind(AssertUnwindSafe(|| {
        let _ = Outcome::<i32, &str>::ok(1).unwrap_err();
    }))
    .expect_err("unwrap_err on Ok must panic");
    let error = payload
        .downcast::<UnwrappedErrWithOk<i32>>()
        .expect("payload must be UnwrappedErrWithOk");
    assert_eq!(error.into_inner(), 1);
}

#[rstest]
#[tokio::test]
async fn deferred_extractors_return_handles() {
    let outcome = Outcome::<i32, String>::ok_later(async { 8 });

    let unwrapped = outcome.clone().unwrap();
    assert!(!unwrapped.is_ready());
    assert_eq!(unwrapped.await, 8);

    assert_eq!(outcome.clone().safe_unwrap().await, Some(8));
    assert_eq!(outcome.clone().to_option().await, Some(8));
    assert_eq!(outcome.try_unwrap_err().await, Err(UnwrappedErrWithOk::new(8)));
}

#[rstest]
#[tokio::test]
async fn fold_collapses_both_tracks() {
    let ok = Outcome::<i32, String>::ok(2).fold(|x| x * 10, |_| -1);
    let err = Outcome::<i32, String>::from_future(async { Err::<i32, String>("x".into()) })
        .fold(|x| x * 10, |_| -1);
    assert_eq!(ok.now(), Some(20));
    assert_eq!(err.await, -1);
}

// =============================================================================
// Panic Conversion
// =============================================================================

#[rstest]
fn try_catch_with_maps_the_panic() {
    let outcome = Outcome::<i32, String>::try_catch_with(
        || panic!("exploded"),
        |caught| format!("caught: {}", caught.message()),
    );
    assert_eq!(outcome.as_settled(), Some(&Err("caught: exploded".to_string())));
}

#[rstest]
#[tokio::test]
async fn try_async_catch_with_maps_the_panic() {
    let outcome = Outcome::<i32, usize>::try_async_catch_with(
        || async { panic!("far away") },
        |caught| caught.message().len(),
    );
    assert_eq!(outcome.await, Err(8));
}

// =============================================================================
// Awaiting
// =============================================================================

#[rstest]
#[tokio::test]
async fn awaiting_an_immediate_outcome_is_ready() {
    assert_eq!(Outcome::<i32, String>::ok(1).await, Ok(1));
    assert_eq!(Outcome::<i32, String>::err("e".into()).await, Err("e".to_string()));
}

#[rstest]
#[tokio::test]
async fn settle_turns_deferred_into_immediate() {
    let settled = Outcome::<i32, String>::ok_later(async { 4 }).map(|x| x + 1).settle().await;
    assert_eq!(settled.mode(), Mode::Immediate);
    assert_eq!(settled.as_settled(), Some(&Ok(5)));
}

#[rstest]
#[tokio::test]
async fn clones_share_one_computation() {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    let runs = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&runs);
    let outcome = Outcome::<i32, String>::ok_later(async move {
        counter.fetch_add(1, Ordering::SeqCst);
        1
    });
    let (first, second) = tokio::join!(outcome.clone().into_future(), outcome.clone().into_future());
    assert_eq!((first, second), (Ok(1), Ok(1)));
    assert_eq!(outcome.await, Ok(1));
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}
