//! Catalog module.
//!
//! The catalog itself lives in the backend. These are the pieces the
//! storefront copies out of it and the helpers it applies to them.

mod image;
mod product;

pub use image::{ImageConfig, ImageResolver};
pub use product::{dedupe_by_id, ProductRef};
pub(crate) use product::PRODUCT_FIELDS;
