//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::StoreConfig;

/// File names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Directory for the cart and wishlist files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,

    /// Store settings shared with the web storefront.
    #[serde(default)]
    pub store: StoreConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Problems that make the configuration unusable for some commands.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.store.cart_key == self.store.wishlist_key {
            problems.push("store.cart_key and store.wishlist_key must differ".to_string());
        }
        for (name, key) in [
            ("store.cart_key", &self.store.cart_key),
            ("store.wishlist_key", &self.store.wishlist_key),
        ] {
            if let Err(e) = storefront_storage::validate_key(key) {
                problems.push(format!("{}: {}", name, e));
            }
        }
        if !self
            .store
            .checkout
            .whatsapp_number
            .chars()
            .any(|c| c.is_ascii_digit())
        {
            problems.push("store.checkout.whatsapp_number is not set; checkout will fail".to_string());
        }

        problems
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}
