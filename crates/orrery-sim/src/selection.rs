//! Selection state shared between the picker and UI panels
//!
//! Holds at most one selected body id. The registry is the only writer that
//! can establish a selection (it owns the existence check); removal flows
//! back in through [`SelectionStore::invalidate`], so a reader can never
//! observe a selection pointing at a body that no longer exists.

use crate::registry::BodyId;
use parking_lot::Mutex;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

type ListenerFn = dyn Fn(Option<&BodyId>) + Send + Sync;

/// Handle returned by [`SelectionStore::subscribe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Inner {
    current: Option<BodyId>,
    listeners: Vec<(SubscriptionId, Arc<ListenerFn>)>,
    next_subscription: u64,
}

/// Single-selection store with synchronous change notification
pub struct SelectionStore {
    inner: Mutex<Inner>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                current: None,
                listeners: Vec::new(),
                next_subscription: 0,
            }),
        }
    }

    /// Currently selected body, if any
    pub fn current(&self) -> Option<BodyId> {
        self.inner.lock().current.clone()
    }

    /// Clear the selection, notifying subscribers if one was set
    pub fn clear(&self) {
        self.set(None);
    }

    /// Clear the selection only if it matches `id`
    ///
    /// Called by the registry whenever a body is removed. The check and the
    /// clear happen under one lock, so a selection established concurrently
    /// for a different body is never wiped.
    pub fn invalidate(&self, id: &BodyId) {
        let listeners = {
            let mut inner = self.inner.lock();
            if inner.current.as_ref() != Some(id) {
                return;
            }
            inner.current = None;
            inner.snapshot_listeners()
        };
        notify(&listeners, None);
    }

    /// Register a listener; called synchronously, in registration order, with
    /// the new selection on every change.
    pub fn subscribe(
        &self,
        listener: impl Fn(Option<&BodyId>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let mut inner = self.inner.lock();
        let id = SubscriptionId(inner.next_subscription);
        inner.next_subscription += 1;
        inner.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener; returns whether it was registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.lock();
        let before = inner.listeners.len();
        inner.listeners.retain(|(sub, _)| *sub != id);
        inner.listeners.len() != before
    }

    /// Set the selection. Crate-private: the registry validates existence
    /// before calling this.
    pub(crate) fn set(&self, id: Option<BodyId>) {
        let listeners = {
            let mut inner = self.inner.lock();
            if inner.current == id {
                return;
            }
            inner.current = id.clone();
            inner.snapshot_listeners()
        };
        notify(&listeners, id.as_ref());
    }
}

impl Inner {
    // Snapshot so listeners run outside the lock and may re-enter
    fn snapshot_listeners(&self) -> Vec<Arc<ListenerFn>> {
        self.listeners.iter().map(|(_, l)| l.clone()).collect()
    }
}

fn notify(listeners: &[Arc<ListenerFn>], current: Option<&BodyId>) {
    for listener in listeners {
        // A panicking listener must not starve the ones after it
        let result = catch_unwind(AssertUnwindSafe(|| listener(current)));
        if result.is_err() {
            tracing::warn!("selection listener panicked, continuing with remaining listeners");
        }
    }
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn id(s: &str) -> BodyId {
        BodyId::new(s)
    }

    #[test]
    fn test_starts_empty() {
        let store = SelectionStore::new();
        assert_eq!(store.current(), None);
    }

    #[test]
    fn test_set_and_clear() {
        let store = SelectionStore::new();
        store.set(Some(id("earth")));
        assert_eq!(store.current(), Some(id("earth")));
        store.clear();
        assert_eq!(store.current(), None);
    }

    #[test]
    fn test_invalidate_only_clears_matching_id() {
        let store = SelectionStore::new();
        store.set(Some(id("earth")));

        store.invalidate(&id("mars"));
        assert_eq!(store.current(), Some(id("earth")));

        store.invalidate(&id("earth"));
        assert_eq!(store.current(), None);
    }

    #[test]
    fn test_invalidate_never_clears_concurrent_other_selection() {
        // Invalidating a removed body while another body is being selected
        // must end with the other body selected, whichever side wins the
        // race. A check-then-clear split across two lock acquisitions could
        // wipe the new selection.
        let store = Arc::new(SelectionStore::new());

        for _ in 0..200 {
            store.set(Some(id("doomed")));

            let s1 = store.clone();
            let invalidator = std::thread::spawn(move || {
                s1.invalidate(&id("doomed"));
            });
            let s2 = store.clone();
            let selector = std::thread::spawn(move || {
                s2.set(Some(id("kept")));
            });
            invalidator.join().unwrap();
            selector.join().unwrap();

            assert_eq!(store.current(), Some(id("kept")));
        }
    }

    #[test]
    fn test_invalidate_notifies_listeners() {
        let store = SelectionStore::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = seen.clone();
        store.subscribe(move |current| s.lock().push(current.cloned()));

        store.set(Some(id("eros")));
        store.invalidate(&id("eros"));
        assert_eq!(*seen.lock(), vec![Some(id("eros")), None]);
    }

    #[test]
    fn test_listeners_notified_in_registration_order() {
        let store = SelectionStore::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in [1, 2, 3] {
            let order = order.clone();
            store.subscribe(move |_| order.lock().push(tag));
        }

        store.set(Some(id("eros")));
        assert_eq!(*order.lock(), vec![1, 2, 3]);
    }

    #[test]
    fn test_no_notification_when_unchanged() {
        let store = SelectionStore::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        store.subscribe(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        store.set(Some(id("earth")));
        store.set(Some(id("earth")));
        store.clear();
        store.clear();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_panicking_listener_does_not_block_others() {
        let store = SelectionStore::new();
        let reached = Arc::new(AtomicUsize::new(0));

        store.subscribe(|_| panic!("listener bug"));
        let r = reached.clone();
        store.subscribe(move |_| {
            r.fetch_add(1, Ordering::SeqCst);
        });

        store.set(Some(id("bennu")));
        assert_eq!(reached.load(Ordering::SeqCst), 1);
        // Store state is still consistent
        assert_eq!(store.current(), Some(id("bennu")));
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = SelectionStore::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        let sub = store.subscribe(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        store.set(Some(id("earth")));
        assert!(store.unsubscribe(sub));
        assert!(!store.unsubscribe(sub));
        store.clear();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_listener_sees_new_value() {
        let store = SelectionStore::new();
        let seen = Arc::new(Mutex::new(None));
        let s = seen.clone();
        store.subscribe(move |current| {
            *s.lock() = current.cloned();
        });

        store.set(Some(id("apophis")));
        assert_eq!(*seen.lock(), Some(id("apophis")));
        store.clear();
        assert_eq!(*seen.lock(), None);
    }
}
