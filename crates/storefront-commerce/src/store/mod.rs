//! The local commerce state store.
//!
//! Holds what the current visitor has chosen to buy (the cart) or save
//! (the wishlist), persisted through a [`StoragePort`]. Each collection is
//! one JSON array under its own key.
//!
//! Storage is a convenience cache, not a system of record: every
//! operation is best-effort. Unreadable or foreign data reads as empty,
//! failed writes are logged, and no error reaches the caller.

mod events;

pub use events::{StoreEvent, SubscriptionId};

use crate::cart::{CartLine, CartTotals, MAX_QUANTITY_PER_LINE};
use crate::catalog::{dedupe_by_id, ProductRef};
use crate::config::{StoreConfig, DEFAULT_CART_KEY, DEFAULT_WISHLIST_KEY};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Currency;
use events::Listeners;
use serde::de::DeserializeOwned;
use storefront_storage::{Cache, StoragePort};

/// Cart and wishlist state over a storage port.
///
/// # Example
///
/// ```rust
/// use storefront_commerce::prelude::*;
/// use storefront_storage::MemoryStorage;
///
/// let store = CommerceStore::new(MemoryStorage::new());
/// store.add_to_cart(&ProductRef::new("A", "Mug", 100.0));
/// store.add_to_cart(&ProductRef::new("A", "Mug", 100.0));
///
/// let cart = store.read_cart();
/// assert_eq!(cart.len(), 1);
/// assert_eq!(cart[0].quantity, 2);
/// ```
#[derive(Debug)]
pub struct CommerceStore<S> {
    cache: Cache<S>,
    cart_key: String,
    wishlist_key: String,
    currency: Currency,
    listeners: Listeners,
}

impl<S: StoragePort> CommerceStore<S> {
    /// Create a store with the default keys and currency.
    pub fn new(port: S) -> Self {
        Self::with_keys(port, DEFAULT_CART_KEY, DEFAULT_WISHLIST_KEY)
    }

    /// Create a store with custom storage keys.
    pub fn with_keys(
        port: S,
        cart_key: impl Into<String>,
        wishlist_key: impl Into<String>,
    ) -> Self {
        Self {
            cache: Cache::new(port),
            cart_key: cart_key.into(),
            wishlist_key: wishlist_key.into(),
            currency: Currency::default(),
            listeners: Listeners::default(),
        }
    }

    /// Create a store from configuration.
    pub fn from_config(port: S, config: &StoreConfig) -> Self {
        let mut store = Self::with_keys(port, &config.cart_key, &config.wishlist_key);
        store.currency = config.currency;
        store
    }

    /// Borrow the underlying storage port.
    pub fn port(&self) -> &S {
        self.cache.port()
    }

    // ---------------------------------------------------------------------
    // Cart
    // ---------------------------------------------------------------------

    /// Read the cart.
    ///
    /// Empty if nothing is stored, if the stored text is not a list, or if
    /// storage fails. Rows that are not cart lines are skipped.
    pub fn read_cart(&self) -> Vec<CartLine> {
        self.read_list(&self.cart_key)
    }

    /// Replace the persisted cart with `lines`, keeping their order.
    ///
    /// Lines with quantity zero are dropped. Subscribers are notified if
    /// the write succeeds.
    pub fn write_cart(&self, lines: &[CartLine]) {
        let lines: Vec<CartLine> = lines.iter().filter(|l| l.quantity > 0).cloned().collect();
        self.persist_cart(lines);
    }

    /// Add one unit of `product`.
    ///
    /// Increments the existing line for the product's id, or appends a
    /// new line with quantity 1. Returns the resulting cart.
    pub fn add_to_cart(&self, product: &ProductRef) -> Vec<CartLine> {
        let mut lines = self.read_cart();
        match lines.iter_mut().find(|l| l.product.id == product.id) {
            Some(line) => line.increment(),
            None => lines.push(CartLine::new(product.clone(), 1)),
        }
        self.persist_cart(lines)
    }

    /// Remove the line for `id`. Absent ids leave the cart unchanged.
    pub fn remove_from_cart(&self, id: &ProductId) -> Vec<CartLine> {
        let mut lines = self.read_cart();
        lines.retain(|l| &l.product.id != id);
        self.persist_cart(lines)
    }

    /// Set the quantity on the line for `id`.
    ///
    /// A quantity of zero removes the line. Quantities above
    /// [`MAX_QUANTITY_PER_LINE`] are clamped. Absent ids leave the cart
    /// unchanged.
    pub fn update_quantity(&self, id: &ProductId, quantity: u32) -> Vec<CartLine> {
        if quantity == 0 {
            return self.remove_from_cart(id);
        }

        let mut lines = self.read_cart();
        if let Some(line) = lines.iter_mut().find(|l| &l.product.id == id) {
            line.quantity = quantity.min(MAX_QUANTITY_PER_LINE);
        }
        self.persist_cart(lines)
    }

    /// Delete the persisted cart. Idempotent.
    pub fn clear_cart(&self) {
        match self.cache.delete(&self.cart_key) {
            Ok(()) => {
                tracing::debug!(key = %self.cart_key, "cleared cart");
                self.listeners.notify(&StoreEvent::CartCleared);
            }
            Err(e) => {
                tracing::warn!(key = %self.cart_key, error = %e, "failed to clear cart");
            }
        }
    }

    /// Total units across all lines.
    pub fn cart_item_count(&self) -> u64 {
        self.read_cart().iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Price the current cart in the store's currency.
    pub fn cart_totals(&self) -> Result<CartTotals, CommerceError> {
        CartTotals::compute(&self.read_cart(), self.currency)
    }

    // ---------------------------------------------------------------------
    // Wishlist
    // ---------------------------------------------------------------------

    /// Read the wishlist, with the same tolerance as [`Self::read_cart`].
    ///
    /// A product stored twice is listed once.
    pub fn read_wishlist(&self) -> Vec<ProductRef> {
        dedupe_by_id(self.read_list(&self.wishlist_key))
    }

    /// Remove `product` if it is saved, save it otherwise.
    ///
    /// Returns the resulting wishlist.
    pub fn toggle_wishlist(&self, product: &ProductRef) -> Vec<ProductRef> {
        let mut entries = self.read_wishlist();
        match entries.iter().position(|p| p.id == product.id) {
            Some(index) => {
                entries.remove(index);
            }
            None => entries.push(product.clone()),
        }
        self.persist_wishlist(entries)
    }

    /// Save `product` unless it is already saved.
    pub fn add_to_wishlist(&self, product: &ProductRef) -> Vec<ProductRef> {
        let mut entries = self.read_wishlist();
        if entries.iter().any(|p| p.id == product.id) {
            return entries;
        }
        entries.push(product.clone());
        self.persist_wishlist(entries)
    }

    /// Remove the entry for `id`.
    pub fn remove_from_wishlist(&self, id: &ProductId) -> Vec<ProductRef> {
        let mut entries = self.read_wishlist();
        entries.retain(|p| &p.id != id);
        self.persist_wishlist(entries)
    }

    /// Check whether `id` is saved.
    pub fn is_wishlisted(&self, id: &ProductId) -> bool {
        self.read_wishlist().iter().any(|p| &p.id == id)
    }

    /// Number of saved products.
    pub fn wishlist_len(&self) -> usize {
        self.read_wishlist().len()
    }

    // ---------------------------------------------------------------------
    // Subscriptions
    // ---------------------------------------------------------------------

    /// Register a listener called after every successful write.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&StoreEvent) + Send + Sync + 'static,
    {
        self.listeners.subscribe(listener)
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn read_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let rows = match self.cache.get::<Vec<serde_json::Value>>(key) {
            Ok(Some(rows)) => rows,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(key, error = %e, "unreadable stored list; treating as empty");
                return Vec::new();
            }
        };

        rows.into_iter()
            .enumerate()
            .filter_map(|(index, row)| match serde_json::from_value(row) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!(key, index, error = %e, "skipping unreadable stored row");
                    None
                }
            })
            .collect()
    }

    fn persist_cart(&self, lines: Vec<CartLine>) -> Vec<CartLine> {
        match self.cache.set(&self.cart_key, &lines) {
            Ok(()) => {
                tracing::debug!(key = %self.cart_key, lines = lines.len(), "saved cart");
                self.listeners.notify(&StoreEvent::CartChanged {
                    lines: lines.clone(),
                });
            }
            Err(e) => {
                tracing::warn!(key = %self.cart_key, error = %e, "failed to save cart");
            }
        }
        lines
    }

    fn persist_wishlist(&self, entries: Vec<ProductRef>) -> Vec<ProductRef> {
        match self.cache.set(&self.wishlist_key, &entries) {
            Ok(()) => {
                tracing::debug!(key = %self.wishlist_key, entries = entries.len(), "saved wishlist");
                self.listeners.notify(&StoreEvent::WishlistChanged {
                    entries: entries.clone(),
                });
            }
            Err(e) => {
                tracing::warn!(key = %self.wishlist_key, error = %e, "failed to save wishlist");
            }
        }
        entries
    }
}
