//! A cloneable handle that serializes access to one [`Store`].

use std::sync::Arc;

use parking_lot::Mutex;

use super::Store;
use crate::error::Result;
use crate::filter::Filter;
use crate::hit::Hit;
use crate::traits::Closer;

/// Shared, mutex-guarded access to a [`Store`].
///
/// Every call takes the lock for its whole duration, so operations from
/// different threads never interleave.
#[derive(Debug, Clone)]
pub struct SharedStore {
    inner: Arc<Mutex<Store>>,
}

impl SharedStore {
    /// Wraps a store.
    pub fn new(store: Store) -> Self {
        SharedStore {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Runs `f` with exclusive access to the store.
    pub fn with<R>(&self, f: impl FnOnce(&mut Store) -> R) -> R {
        f(&mut *self.inner.lock())
    }

    /// See [`Store::select`].
    pub fn select(&self, filter: Option<&dyn Filter>) -> Result<Vec<Hit>> {
        self.inner.lock().select(filter)
    }

    /// See [`Store::update`].
    pub fn update<F>(&self, filter: Option<&dyn Filter>, f: F) -> Result<(usize, usize)>
    where
        F: FnMut(Hit) -> Hit,
    {
        self.inner.lock().update(filter, f)
    }

    /// See [`Store::delete`].
    pub fn delete(&self, filter: Option<&dyn Filter>) -> Result<usize> {
        self.inner.lock().delete(filter)
    }

    /// See [`Store::insert`].
    pub fn insert(&self, hit: Hit) {
        self.inner.lock().insert(hit)
    }
}

impl Closer for SharedStore {
    fn close(&mut self) -> Result<()> {
        self.inner.lock().close()
    }
}
