//! Lazily initialised shared instances
//!
//! The completion cache is built on first use and then shared by every
//! completion callback for the life of the process. Several callbacks may
//! race to build it at startup; [`SharedSlot::get`] guarantees they all
//! observe the same instance.

use parking_lot::RwLock;
use std::sync::Arc;

type Factory<T> = Box<dyn Fn() -> T + Send + Sync>;

/// A lazily built, resettable `Arc<T>`.
pub struct SharedSlot<T> {
    value: RwLock<Option<Arc<T>>>,
    factory: Factory<T>,
}

impl<T> SharedSlot<T> {
    /// Create an empty slot; `factory` runs at most once per (re)initialisation.
    pub fn new(factory: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self {
            value: RwLock::new(None),
            factory: Box::new(factory),
        }
    }

    /// Get the shared instance, building it on first use.
    pub fn get(&self) -> Arc<T> {
        {
            let slot = self.value.read();
            if let Some(value) = slot.as_ref() {
                return Arc::clone(value);
            }
        }

        let mut slot = self.value.write();
        // Another thread may have built it while we waited for the write lock
        if let Some(value) = slot.as_ref() {
            return Arc::clone(value);
        }
        let value = Arc::new((self.factory)());
        *slot = Some(Arc::clone(&value));
        value
    }

    /// Whether an instance has been built.
    pub fn is_initialized(&self) -> bool {
        self.value.read().is_some()
    }

    /// Drop the current instance; the next `get` rebuilds it.
    ///
    /// Holders of a previously returned `Arc` keep their instance.
    pub fn reset(&self) {
        self.value.write().take();
    }
}
