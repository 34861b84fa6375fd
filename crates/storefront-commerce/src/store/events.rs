//! Change notifications for store subscribers.

use crate::cart::CartLine;
use crate::catalog::ProductRef;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// What changed in the store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// The cart was written. Carries the lines as persisted.
    CartChanged { lines: Vec<CartLine> },
    /// The cart key was removed.
    CartCleared,
    /// The wishlist was written.
    WishlistChanged { entries: Vec<ProductRef> },
}

/// Handle returned by [`crate::CommerceStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&StoreEvent) + Send + Sync>;

/// Ordered listener registry.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: AtomicU64,
    entries: RwLock<Vec<(SubscriptionId, Listener)>>,
}

impl Listeners {
    pub(crate) fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&StoreEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        match self.entries.write() {
            Ok(mut entries) => entries.push((id, Arc::new(listener))),
            Err(_) => tracing::warn!("listener registry poisoned; subscription dropped"),
        }
        id
    }

    pub(crate) fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let Ok(mut entries) = self.entries.write() else {
            return false;
        };
        let before = entries.len();
        entries.retain(|(existing, _)| *existing != id);
        entries.len() < before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Call every listener in subscription order.
    ///
    /// The registry lock is released before any listener runs, so a
    /// listener may subscribe, unsubscribe or write to the store.
    pub(crate) fn notify(&self, event: &StoreEvent) {
        let snapshot: Vec<Listener> = match self.entries.read() {
            Ok(entries) => entries.iter().map(|(_, l)| Arc::clone(l)).collect(),
            Err(_) => return,
        };
        tracing::debug!(listeners = snapshot.len(), ?event, "notifying store subscribers");
        for listener in snapshot {
            listener(event);
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners").field("len", &self.len()).finish()
    }
}
