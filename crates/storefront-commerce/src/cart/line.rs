//! Cart line type.

use std::collections::BTreeMap;

use crate::catalog::{ProductRef, PRODUCT_FIELDS};
use crate::ids::ProductId;
use serde::{Deserialize, Serialize, Serializer};

/// Maximum quantity held on a single cart line.
pub const MAX_QUANTITY_PER_LINE: u32 = 9999;

/// A product in the cart with the quantity the visitor wants.
///
/// Serialized flat: the product's fields and `quantity` share one object.
/// Extra product fields that collide with a line field are not written.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CartLine {
    /// The product snapshot.
    #[serde(flatten)]
    pub product: ProductRef,
    /// Units requested.
    pub quantity: u32,
}

impl CartLine {
    /// Create a line for a product.
    pub fn new(mut product: ProductRef, quantity: u32) -> Self {
        product.extra.remove("quantity");
        Self {
            product,
            quantity: quantity.min(MAX_QUANTITY_PER_LINE),
        }
    }

    /// The product's identifier.
    pub fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// Add one unit, saturating at [`MAX_QUANTITY_PER_LINE`].
    pub fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1).min(MAX_QUANTITY_PER_LINE);
    }
}

/// Write layout of a [`CartLine`].
#[derive(Serialize)]
struct FlatLine<'a> {
    id: &'a ProductId,
    name: &'a str,
    price: f64,
    image_url: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
    #[serde(flatten)]
    extra: BTreeMap<&'a str, &'a serde_json::Value>,
    quantity: u32,
}

impl Serialize for CartLine {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let product = &self.product;
        let extra = product
            .extra
            .iter()
            .map(|(key, value)| (key.as_str(), value))
            .filter(|(key, _)| *key != "quantity" && !PRODUCT_FIELDS.contains(key))
            .collect();

        FlatLine {
            id: &product.id,
            name: &product.name,
            price: product.price,
            image_url: &product.image_url,
            description: &product.description,
            category: product.category.as_deref(),
            extra,
            quantity: self.quantity,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_flat() {
        let line = CartLine::new(ProductRef::new("A", "Mug", 100.0), 2);
        let value = serde_json::to_value(&line).unwrap();

        assert_eq!(value["id"], "A");
        assert_eq!(value["price"], 100.0);
        assert_eq!(value["quantity"], 2);
        assert!(value.get("product").is_none());
        assert!(value.get("extra").is_none());
    }

    #[test]
    fn test_deserialize_keeps_quantity_out_of_extra() {
        let line: CartLine =
            serde_json::from_str(r#"{"id":"A","name":"Mug","price":100,"quantity":3}"#).unwrap();

        assert_eq!(line.quantity, 3);
        assert!(line.product.extra.is_empty());
    }

    #[test]
    fn test_stock_quantity_does_not_clash_with_line_quantity() {
        let product: ProductRef =
            serde_json::from_str(r#"{"id":"A","name":"Mug","price":100,"quantity":7}"#).unwrap();
        assert_eq!(product.extra.get("quantity"), Some(&serde_json::json!(7)));

        let line = CartLine::new(product, 1);
        let json = serde_json::to_string(&line).unwrap();
        assert_eq!(json.matches("\"quantity\"").count(), 1);

        let back: CartLine = serde_json::from_str(&json).unwrap();
        assert_eq!(back.quantity, 1);
    }

    #[test]
    fn test_reserved_extra_keys_are_not_written() {
        let mut product = ProductRef::new("A", "Mug", 100.0);
        product.extra.insert("quantity".to_string(), serde_json::json!(7));
        product.extra.insert("name".to_string(), serde_json::json!("Shadow"));
        product.extra.insert("stock".to_string(), serde_json::json!(4));
        let line = CartLine {
            product,
            quantity: 2,
        };

        let json = serde_json::to_string(&line).unwrap();
        assert_eq!(json.matches("\"quantity\"").count(), 1);
        assert_eq!(json.matches("\"name\"").count(), 1);

        let back: CartLine = serde_json::from_str(&json).unwrap();
        assert_eq!(back.quantity, 2);
        assert_eq!(back.product.name, "Mug");
        assert_eq!(back.product.extra.get("stock"), Some(&serde_json::json!(4)));
    }

    #[test]
    fn test_increment_saturates() {
        let mut line = CartLine::new(ProductRef::new("A", "Mug", 1.0), MAX_QUANTITY_PER_LINE + 5);
        assert_eq!(line.quantity, MAX_QUANTITY_PER_LINE);

        line.increment();
        assert_eq!(line.quantity, MAX_QUANTITY_PER_LINE);
    }
}
