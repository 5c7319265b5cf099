//! A shared cell that pipeline stages write into.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::fonad::Fonad;

/// A one-slot cell shared between a pipeline and its caller.
///
/// Clones share the slot, so a stage built with
/// [`capture`](crate::operator::capture) records the variant where the caller
/// can see it, and later updates through any clone are visible to all.
///
/// # Examples
///
/// ```rust
/// use fonad::Fonad;
/// use fonad::control::Capture;
///
/// let cell = Capture::new();
/// let writer = cell.clone();
/// writer.set(Fonad::just(1));
/// writer.update(|fonad| fonad.add_note("seen"));
///
/// assert_eq!(cell.get().map(|fonad| fonad.notes().len()), Some(1));
/// ```
#[derive(Debug)]
pub struct Capture<T> {
    slot: Arc<Mutex<Option<Fonad<T>>>>,
}

impl<T> Capture<T> {
    /// Creates an empty cell.
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Stores a variant, replacing any previous one.
    pub fn set(&self, fonad: Fonad<T>) {
        *self.slot.lock() = Some(fonad);
    }

    /// Removes and returns the stored variant.
    pub fn take(&self) -> Option<Fonad<T>> {
        self.slot.lock().take()
    }

    /// Returns a copy of the stored variant.
    pub fn get(&self) -> Option<Fonad<T>>
    where
        T: Clone,
    {
        self.slot.lock().clone()
    }

    /// Mutates the stored variant. Returns `false` if the cell is empty.
    ///
    /// The lock is not held while `function` runs, so it may use this cell.
    /// Until it returns the cell reads as empty, and the updated variant then
    /// replaces anything stored in the meantime.
    pub fn update<F>(&self, function: F) -> bool
    where
        F: FnOnce(&mut Fonad<T>),
    {
        let Some(mut fonad) = self.take() else {
            return false;
        };
        function(&mut fonad);
        self.set(fonad);
        true
    }

    /// Converts the stored variant into `Just(value)`, keeping its notes.
    /// An empty cell receives a fresh `Just`.
    pub fn convert_to_just(&self, value: T) {
        let mut slot = self.slot.lock();
        match slot.as_mut() {
            Some(fonad) => fonad.convert_to_just(value),
            None => *slot = Some(Fonad::just(value)),
        }
    }

    /// Returns `true` if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.slot.lock().is_none()
    }
}

impl<T> Clone for Capture<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> Default for Capture<T> {
    fn default() -> Self {
        Self::new()
    }
}
