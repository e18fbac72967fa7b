//! Observer registries
//!
//! Synchronous publish/subscribe used by editor components to tell the UI
//! that their data changed.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle returned by [`Observable::add`], used to unsubscribe
    pub struct ObserverId;
}

/// Observer callback type
pub type Observer<T> = Box<dyn FnMut(&T)>;

/// A registry of callbacks invoked synchronously on [`notify`](Observable::notify).
///
/// Delivery order between observers is unspecified.
pub struct Observable<T> {
    observers: SlotMap<ObserverId, Observer<T>>,
}

impl<T> Observable<T> {
    pub fn new() -> Self {
        Self {
            observers: SlotMap::with_key(),
        }
    }

    /// Register an observer
    pub fn add<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&T) + 'static,
    {
        self.observers.insert(Box::new(observer))
    }

    /// Remove an observer, returning whether it was registered
    pub fn remove(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id).is_some()
    }

    /// Invoke every registered observer with `event`
    pub fn notify(&mut self, event: &T) {
        tracing::trace!(observers = self.observers.len(), "notifying observers");
        for (_, observer) in self.observers.iter_mut() {
            observer(event);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Drop every observer
    pub fn clear(&mut self) {
        self.observers.clear();
    }
}

impl<T> Default for Observable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("observers", &self.observers.len())
            .finish()
    }
}
