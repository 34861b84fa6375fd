//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod image;
pub mod wishlist;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use storefront_commerce::catalog::ProductRef;

/// Product fields accepted by commands that store a product.
#[derive(Args)]
pub struct ProductArgs {
    /// Catalog product ID.
    pub id: String,

    /// Display name.
    #[arg(long)]
    pub name: String,

    /// Unit price in major currency units.
    #[arg(long)]
    pub price: f64,

    /// Image locator (URL, site path or bucket path).
    #[arg(long, default_value = "")]
    pub image: String,

    /// Description.
    #[arg(long, default_value = "")]
    pub description: String,

    /// Category label.
    #[arg(long)]
    pub category: Option<String>,
}

impl ProductArgs {
    /// Build the product reference, rejecting prices the catalog never has.
    pub fn into_product(self) -> Result<ProductRef> {
        if !self.price.is_finite() || self.price < 0.0 {
            bail!("price must be a non-negative number, got {}", self.price);
        }
        let mut product = ProductRef::new(self.id, self.name, self.price)
            .with_image(self.image)
            .with_description(self.description);
        product.category = self.category;
        Ok(product)
    }
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// List cart lines.
    List,
    /// Add one unit of a product.
    Add(ProductArgs),
    /// Remove a product's line.
    Remove {
        /// Product ID.
        id: String,
    },
    /// Set a line's quantity (0 removes it).
    Set {
        /// Product ID.
        id: String,
        /// New quantity.
        quantity: u32,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
    /// Show cart totals.
    Total,
}

/// Arguments for the wishlist command.
#[derive(Args)]
pub struct WishlistArgs {
    #[command(subcommand)]
    pub command: Option<WishlistCommand>,
}

#[derive(Subcommand)]
pub enum WishlistCommand {
    /// List saved products.
    List,
    /// Save a product, or unsave it if already saved.
    Toggle(ProductArgs),
    /// Save a product if not already saved.
    Add(ProductArgs),
    /// Unsave a product.
    Remove {
        /// Product ID.
        id: String,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Order numbers already issued today, for sequential numbering.
    /// Without any, a random sequence is used.
    #[arg(long = "existing", value_name = "ORDER_NUMBER")]
    pub existing: Vec<String>,

    /// Empty the cart after preparing the handoff.
    #[arg(long)]
    pub clear: bool,
}

/// Arguments for the image command.
#[derive(Args)]
pub struct ImageArgs {
    /// Locator as stored in the catalog.
    #[arg(default_value = "")]
    pub locator: String,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
