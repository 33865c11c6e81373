use std::sync::Arc;

use tokio::sync::watch;

/// Observable state cell.
///
/// `State<T>` holds one value behind a `tokio::sync::watch` channel. Setting
/// it replaces the value in one step and wakes every subscriber; readers see
/// either the old or the new value, never a mix. Cheap to clone: clones share
/// the same value.
///
/// # Example
///
/// ```
/// use datatable::state::State;
///
/// let count = State::new(1);
/// let rx = count.subscribe();
/// count.set(2);
/// assert_eq!(*rx.borrow(), 2);
/// assert_eq!(count.with(|v| v * 10), 20);
/// ```
#[derive(Debug)]
pub struct State<T> {
    tx: Arc<watch::Sender<T>>,
}

impl<T> State<T> {
    /// Create a new state with the given value
    pub fn new(value: T) -> Self {
        Self {
            tx: Arc::new(watch::Sender::new(value)),
        }
    }

    /// Get a clone of the current value
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.tx.borrow().clone()
    }

    /// Read the current value without cloning it
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Set a new value
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Subscribe to changes.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}
