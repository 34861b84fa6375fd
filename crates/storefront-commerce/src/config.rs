//! Store configuration.

use crate::catalog::ImageConfig;
use crate::checkout::CheckoutConfig;
use crate::money::Currency;
use serde::{Deserialize, Serialize};

/// Storage key for the cart.
pub const DEFAULT_CART_KEY: &str = "rc_cart";

/// Storage key for the wishlist.
pub const DEFAULT_WISHLIST_KEY: &str = "wishlist";

/// Storefront state settings.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Key the cart is persisted under.
    #[serde(default = "default_cart_key")]
    pub cart_key: String,

    /// Key the wishlist is persisted under.
    #[serde(default = "default_wishlist_key")]
    pub wishlist_key: String,

    /// Currency catalog prices are quoted in.
    #[serde(default)]
    pub currency: Currency,

    /// Product image resolution.
    #[serde(default)]
    pub images: ImageConfig,

    /// Checkout handoff.
    #[serde(default)]
    pub checkout: CheckoutConfig,
}

fn default_cart_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

fn default_wishlist_key() -> String {
    DEFAULT_WISHLIST_KEY.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            cart_key: default_cart_key(),
            wishlist_key: default_wishlist_key(),
            currency: Currency::default(),
            images: ImageConfig::default(),
            checkout: CheckoutConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let config: StoreConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.cart_key, "rc_cart");
        assert_eq!(config.wishlist_key, "wishlist");
        assert_eq!(config.currency, Currency::INR);
        assert!(config.images.cache_bust);
    }

    #[test]
    fn test_partial_override() {
        let config: StoreConfig = serde_json::from_str(
            r#"{"currency":"USD","images":{"bucket":"media"},"checkout":{"whatsapp_number":"123"}}"#,
        )
        .unwrap();

        assert_eq!(config.currency, Currency::USD);
        assert_eq!(config.images.bucket, "media");
        assert_eq!(config.images.placeholder, "/placeholder.svg");
        assert_eq!(config.checkout.whatsapp_number, "123");
        assert_eq!(config.cart_key, "rc_cart");
    }
}
