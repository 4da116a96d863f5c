//! Typed publish/subscribe
//!
//! Listeners are shared closures identified by allocation, so subscribing the
//! same handler twice for one kind is a no-op. Publishing snapshots the
//! listener list first: a handler may subscribe, unsubscribe or publish while
//! being dispatched, and those changes apply from the next publish on.

use std::cell::RefCell;
use std::rc::Rc;

/// A subscribed callback
pub type Handler = Rc<dyn Fn()>;

/// Wrap a closure as a [`Handler`]
pub fn handler(f: impl Fn() + 'static) -> Handler {
    Rc::new(f)
}

/// Event dispatcher keyed by an event kind enum
pub struct EventBus<K> {
    listeners: RefCell<Vec<(K, Handler)>>,
}

impl<K> Default for EventBus<K> {
    fn default() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
        }
    }
}

impl<K: Copy + PartialEq> EventBus<K> {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, kind: K, handler: &Handler) -> Option<usize> {
        self.listeners
            .borrow()
            .iter()
            .position(|(k, h)| *k == kind && Rc::ptr_eq(h, handler))
    }

    /// Register `handler` for `kind`. Returns false if it was already registered.
    pub fn subscribe(&self, kind: K, handler: &Handler) -> bool {
        if self.position(kind, handler).is_some() {
            return false;
        }
        self.listeners.borrow_mut().push((kind, Rc::clone(handler)));
        true
    }

    /// Remove `handler` from `kind`. Returns false if it was not registered.
    pub fn unsubscribe(&self, kind: K, handler: &Handler) -> bool {
        match self.position(kind, handler) {
            Some(i) => {
                self.listeners.borrow_mut().remove(i);
                true
            }
            None => false,
        }
    }

    /// Call every handler registered for `kind`, in subscription order.
    /// Returns how many were called.
    pub fn publish(&self, kind: K) -> usize {
        let snapshot: Vec<Handler> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, h)| Rc::clone(h))
            .collect();
        for h in &snapshot {
            h();
        }
        snapshot.len()
    }

    /// Drop every listener (level teardown)
    pub fn clear(&self) {
        self.listeners.borrow_mut().clear();
    }
}

impl<K> std::fmt::Debug for EventBus<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}
