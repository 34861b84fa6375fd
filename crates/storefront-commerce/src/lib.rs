//! Cart, wishlist and checkout state for the storefront.
//!
//! The storefront keeps what a visitor has chosen to buy or save on the
//! visitor's side, independent of whether they are signed in. This crate
//! provides:
//!
//! - **Store**: [`CommerceStore`], the cart and wishlist over an injected
//!   storage port, with change subscriptions
//! - **Cart**: cart lines and totals
//! - **Catalog**: product references and image locator resolution
//! - **Checkout**: order numbers and the WhatsApp handoff
//!
//! # Example
//!
//! ```rust
//! use storefront_commerce::prelude::*;
//! use storefront_storage::MemoryStorage;
//!
//! let store = CommerceStore::new(MemoryStorage::new());
//! store.add_to_cart(&ProductRef::new("A", "Mug", 100.0));
//! store.add_to_cart(&ProductRef::new("B", "Bowl", 50.0));
//! store.update_quantity(&ProductId::new("A"), 3);
//!
//! let totals = store.cart_totals().unwrap();
//! assert_eq!(totals.subtotal.to_decimal(), 350.0);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod store;

pub use config::StoreConfig;
pub use error::CommerceError;
pub use ids::ProductId;
pub use money::{Currency, Money};
pub use store::CommerceStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::StoreConfig;
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{CartLine, CartTotals, LineTotal, MAX_QUANTITY_PER_LINE};

    // Catalog
    pub use crate::catalog::{dedupe_by_id, ImageConfig, ImageResolver, ProductRef};

    // Checkout
    pub use crate::checkout::{prepare_handoff, CheckoutConfig, Handoff, OrderNumber, OrderSummary};

    // Store
    pub use crate::store::{CommerceStore, StoreEvent, SubscriptionId};
}
