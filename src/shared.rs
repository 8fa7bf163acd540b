//! Thread-safe handle around a [`MovieStore`].
//!
//! The store itself is single-threaded and its rollback update assumes no
//! observer sees a half-applied change. When a store has to be reached from
//! more than one thread, every access goes through one coarse lock here.

use crate::store::MovieStore;
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable, lock-guarded store handle.
#[derive(Clone, Debug, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<MovieStore>>,
}

impl SharedStore {
    pub fn new(store: MovieStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Run `f` with exclusive access to the store.
    ///
    /// The lock is held for the whole closure, so a multi-field update
    /// inside it is never observed half-done.
    pub fn with<R>(&self, f: impl FnOnce(&mut MovieStore) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut *guard)
    }
}

impl From<MovieStore> for SharedStore {
    fn from(store: MovieStore) -> Self {
        Self::new(store)
    }
}
