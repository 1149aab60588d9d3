//! Write-once error cell of a deferred outcome.

use std::fmt;
use std::sync::{Arc, OnceLock};

/// The deferred error slot of a pending [`Outcome`](super::Outcome).
///
/// A slot starts empty and is filled at most once, when the computation it
/// belongs to settles with an error. Writes after the first are ignored, so
/// the first failure wins even when several pollers race to settle the same
/// computation.
///
/// Clones share one cell: they are handles to the same logical value.
/// Outcomes derived through a combinator never clone their parent's slot;
/// they allocate their own, seeded with the parent's error when it is
/// already known.
///
/// Only the computation that owns a slot writes to it. Callers get the read
/// side.
///
/// # Examples
///
/// ```rust
/// use hybrid_result::outcome::Outcome;
///
/// let outcome = Outcome::<i32, String>::from_future(async { Err::<i32, String>("first".into()) });
/// let slot = outcome.error_slot().cloned().expect("deferred outcome has a slot");
/// assert!(!slot.is_filled());
///
/// let _ = futures::executor::block_on(outcome.into_future());
/// assert_eq!(slot.get().map(String::as_str), Some("first"));
/// ```
///
/// The write side is not part of the public API:
///
/// ```compile_fail
/// use hybrid_result::outcome::Outcome;
///
/// let outcome = Outcome::<i32, String>::ok_later(async { 5 });
/// outcome.error_slot().unwrap().fill("forged".to_string());
/// ```
pub struct ErrorSlot<E> {
    cell: Arc<OnceLock<E>>,
}

impl<E> ErrorSlot<E> {
    /// Creates an empty slot.
    pub(crate) fn new() -> Self {
        Self {
            cell: Arc::new(OnceLock::new()),
        }
    }

    /// Creates a slot that already holds `error`.
    pub(crate) fn filled(error: E) -> Self {
        Self {
            cell: Arc::new(OnceLock::from(error)),
        }
    }

    /// Allocates a fresh slot for a derived outcome.
    ///
    /// If the parent's error is already known it is copied in, so the child
    /// reports `Err` before it is ever polled. The two slots never alias.
    pub(crate) fn seeded<P>(parent: &ErrorSlot<P>) -> Self
    where
        P: Clone + Into<E>,
    {
        parent
            .get()
            .cloned()
            .map_or_else(Self::new, |error| Self::filled(error.into()))
    }

    /// Stores `error` unless the slot is already filled.
    ///
    /// Returns `true` if this call won the write.
    pub(crate) fn fill(&self, error: E) -> bool {
        let stored = self.cell.set(error).is_ok();
        if stored {
            tracing::trace!("deferred error slot filled");
        }
        stored
    }

    /// Returns the stored error, if any.
    pub fn get(&self) -> Option<&E> {
        self.cell.get()
    }

    /// Returns `true` once an error has been stored.
    pub fn is_filled(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Returns `true` if both handles point at the same cell.
    pub fn shares_cell_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }
}

impl<E> Clone for ErrorSlot<E> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for ErrorSlot<E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ErrorSlot")
            .field("error", &self.cell.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn new_slot_is_empty() {
        let slot: ErrorSlot<String> = ErrorSlot::new();
        assert!(!slot.is_filled());
        assert_eq!(slot.get(), None);
    }

    #[rstest]
    fn first_write_wins() {
        let slot = ErrorSlot::new();
        assert!(slot.fill(1));
        assert!(!slot.fill(2));
        assert_eq!(slot.get(), Some(&1));
    }

    #[rstest]
    fn clones_share_the_cell() {
        let slot = ErrorSlot::new();
        let handle = slot.clone();
        handle.fill("boom");
        assert_eq!(slot.get(), Some(&"boom"));
        assert!(slot.shares_cell_with(&handle));
    }

    #[rstest]
    fn seeded_slot_copies_but_does_not_alias() {
        let parent = ErrorSlot::filled("parent".to_string());
        let child: ErrorSlot<String> = ErrorSlot::seeded(&parent);
        assert_eq!(child.get().map(String::as_str), Some("parent"));
        assert!(!child.shares_cell_with(&parent));
    }

    #[rstest]
    fn seeded_from_empty_parent_stays_empty() {
        let parent: ErrorSlot<&str> = ErrorSlot::new();
        let child: ErrorSlot<&str> = ErrorSlot::seeded(&parent);
        parent.fill("late");
        assert!(!child.is_filled());
    }

    #[rstest]
    fn concurrent_writers_store_exactly_one_error() {
        let slot = ErrorSlot::new();
        let winners: usize = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|index| {
                    let slot = slot.clone();
                    scope.spawn(move || usize::from(slot.fill(index)))
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or(0))
                .sum()
        });
        assert_eq!(winners, 1);
        assert!(slot.is_filled());
    }
}
