//! Product references copied out of the catalog.

use crate::ids::ProductId;
use serde::{Deserialize, Deserializer, Serialize};

/// Field names [`ProductRef`] models itself.
pub(crate) const PRODUCT_FIELDS: &[&str] = &[
    "id",
    "name",
    "price",
    "image_url",
    "description",
    "category",
];

/// Snapshot of a catalog product at the moment it was added to the cart or
/// wishlist.
///
/// Fields the store does not know about are kept in `extra` so that a
/// catalog row round-trips through storage unchanged. Catalog rows carry
/// `null` for unset columns; those read as empty values. Older rows name the
/// image column `image`, which fills `image_url` when that is empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "CatalogRow")]
pub struct ProductRef {
    /// Catalog identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price in major currency units.
    pub price: f64,
    /// Image locator as stored in the catalog, possibly empty.
    pub image_url: String,
    /// Free-text description.
    pub description: String,
    /// Category label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Catalog fields not modelled here.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A product as it appears in storage, before normalization.
#[derive(Deserialize)]
struct CatalogRow {
    id: ProductId,
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    image_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    description: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

impl From<CatalogRow> for ProductRef {
    fn from(row: CatalogRow) -> Self {
        let image_url = if row.image_url.is_empty() {
            row.extra
                .get("image")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string()
        } else {
            row.image_url
        };

        Self {
            id: row.id,
            name: row.name,
            price: row.price,
            image_url,
            description: row.description,
            category: row.category,
            extra: row.extra,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ProductRef {
    /// Create a product reference with a name and price.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image_url: String::new(),
            description: String::new(),
            category: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Set the image locator.
    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the category label.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Keep one item per id.
///
/// Each id appears at the position of its first occurrence, carrying the
/// value of its last occurrence. Catalog queries that join through
/// categories can return the same product twice.
pub fn dedupe_by_id(items: Vec<ProductRef>) -> Vec<ProductRef> {
    let mut out: Vec<ProductRef> = Vec::with_capacity(items.len());
    for item in items {
        match out.iter_mut().find(|p| p.id == item.id) {
            Some(slot) => *slot = item,
            None => out.push(item),
        }
    }
    out
}
